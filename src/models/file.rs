use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Metadata row for an attachment stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct File {
    pub id: i32,
    pub name: String,
    pub path: String,
}

impl File {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            path: path.into(),
        }
    }
}

impl PartialEq for File {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.path == other.path
    }
}

impl Eq for File {}
