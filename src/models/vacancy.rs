use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Vacancy {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub creation_date: DateTime<Utc>,
    pub visible: bool,
    pub city_id: i32,
    pub file_id: i32,
}

impl Vacancy {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        visible: bool,
        city_id: i32,
        file_id: i32,
    ) -> Self {
        Self {
            id: 0,
            title: title.into(),
            description: description.into(),
            creation_date: Utc::now(),
            visible,
            city_id,
            file_id,
        }
    }
}

impl PartialEq for Vacancy {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Vacancy {}
