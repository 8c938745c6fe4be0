use std::collections::HashMap;
use std::str::FromStr;

use crate::dto::file_dto::FileDto;
use crate::error::{Error, Result};

/// Text fields and the optional `file` part of a submitted multipart form.
#[derive(Debug, Default)]
pub struct FormFields {
    pub fields: HashMap<String, String>,
    pub file: FileDto,
}

impl FormFields {
    pub fn text(&self, name: &str) -> String {
        self.fields
            .get(name)
            .map(|value| value.trim().to_string())
            .unwrap_or_default()
    }

    pub fn required<T>(&self, name: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let raw = self
            .fields
            .get(name)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| Error::BadRequest(format!("Field {} is required", name)))?;
        raw.parse()
            .map_err(|e| Error::BadRequest(format!("Invalid value for {}: {}", name, e)))
    }

    pub fn optional<T>(&self, name: &str) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.fields.get(name).map(|value| value.trim()) {
            None | Some("") => Ok(None),
            Some(_) => self.required(name).map(Some),
        }
    }

    /// HTML checkboxes submit "on" when ticked and nothing otherwise.
    pub fn checkbox(&self, name: &str) -> bool {
        matches!(
            self.fields.get(name).map(|value| value.trim().to_ascii_lowercase()),
            Some(ref value) if value == "on" || value == "true" || value == "1"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> FormFields {
        FormFields {
            fields: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            file: FileDto::default(),
        }
    }

    #[test]
    fn required_parses_numbers() {
        let f = form(&[("city_id", " 3 ")]);
        assert_eq!(f.required::<i32>("city_id").unwrap(), 3);
    }

    #[test]
    fn required_rejects_missing_and_garbage() {
        let f = form(&[("city_id", "abc")]);
        assert!(matches!(f.required::<i32>("city_id"), Err(Error::BadRequest(_))));
        assert!(matches!(f.required::<i32>("id"), Err(Error::BadRequest(_))));
    }

    #[test]
    fn optional_treats_blank_as_none() {
        let f = form(&[("id", "")]);
        assert_eq!(f.optional::<i32>("id").unwrap(), None);
    }

    #[test]
    fn checkbox_values() {
        assert!(form(&[("visible", "on")]).checkbox("visible"));
        assert!(form(&[("visible", "true")]).checkbox("visible"));
        assert!(!form(&[]).checkbox("visible"));
    }
}
