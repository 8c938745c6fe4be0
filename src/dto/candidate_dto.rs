use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::form_fields::FormFields;
use crate::error::Result;
use crate::models::candidate::Candidate;
use crate::models::city::City;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CandidateForm {
    #[serde(default)]
    pub id: i32,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(max = 4000))]
    pub description: String,
    #[validate(range(min = 1))]
    pub city_id: i32,
}

impl CandidateForm {
    pub fn from_fields(form: &FormFields) -> Result<Self> {
        let candidate = Self {
            id: form.optional("id")?.unwrap_or(0),
            name: form.text("name"),
            description: form.text("description"),
            city_id: form.required("city_id")?,
        };
        candidate.validate()?;
        Ok(candidate)
    }

    /// `file_id` is filled in by the service once the attachment is stored.
    pub fn into_candidate(self) -> Candidate {
        Candidate {
            id: self.id,
            name: self.name,
            description: self.description,
            creation_date: Utc::now(),
            city_id: self.city_id,
            file_id: 0,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CandidateListResponse {
    pub user: String,
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Serialize)]
pub struct CandidatePageResponse {
    pub user: String,
    pub candidate: Candidate,
    pub cities: Vec<City>,
}
