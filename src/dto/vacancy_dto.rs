use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::dto::form_fields::FormFields;
use crate::error::Result;
use crate::models::city::City;
use crate::models::vacancy::Vacancy;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct VacancyForm {
    #[serde(default)]
    pub id: i32,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(max = 4000))]
    pub description: String,
    #[serde(default)]
    pub visible: bool,
    #[validate(range(min = 1))]
    pub city_id: i32,
}

impl VacancyForm {
    pub fn from_fields(form: &FormFields) -> Result<Self> {
        let vacancy = Self {
            id: form.optional("id")?.unwrap_or(0),
            title: form.text("title"),
            description: form.text("description"),
            visible: form.checkbox("visible"),
            city_id: form.required("city_id")?,
        };
        vacancy.validate()?;
        Ok(vacancy)
    }

    pub fn into_vacancy(self) -> Vacancy {
        Vacancy {
            id: self.id,
            title: self.title,
            description: self.description,
            creation_date: Utc::now(),
            visible: self.visible,
            city_id: self.city_id,
            file_id: 0,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VacancyListResponse {
    pub user: String,
    pub vacancies: Vec<Vacancy>,
}

#[derive(Debug, Serialize)]
pub struct VacancyPageResponse {
    pub user: String,
    pub vacancy: Vacancy,
    pub cities: Vec<City>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::file_dto::FileDto;

    #[test]
    fn blank_title_fails_validation() {
        let form = FormFields {
            fields: [("title", ""), ("city_id", "1")]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            file: FileDto::default(),
        };
        assert!(matches!(
            VacancyForm::from_fields(&form),
            Err(crate::error::Error::Validation(_))
        ));
    }

    #[test]
    fn unchecked_box_is_hidden() {
        let form = FormFields {
            fields: [("title", "Rust dev"), ("description", "d"), ("city_id", "2")]
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            file: FileDto::default(),
        };
        let vacancy = VacancyForm::from_fields(&form).unwrap().into_vacancy();
        assert!(!vacancy.visible);
        assert_eq!(vacancy.id, 0);
        assert_eq!(vacancy.city_id, 2);
    }
}
