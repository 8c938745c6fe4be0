use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Candidate {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub creation_date: DateTime<Utc>,
    pub city_id: i32,
    pub file_id: i32,
}

impl Candidate {
    /// A candidate that has not been persisted yet (`id == 0`).
    pub fn new(name: impl Into<String>, description: impl Into<String>, city_id: i32, file_id: i32) -> Self {
        Self {
            id: 0,
            name: name.into(),
            description: description.into(),
            creation_date: Utc::now(),
            city_id,
            file_id,
        }
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Candidate {}
