use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Reference data; rows are seeded by migrations and never modified at runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct City {
    pub id: i32,
    pub name: String,
}

impl City {
    pub fn new(id: i32, name: impl Into<String>) -> Self {
        Self { id, name: name.into() }
    }
}
