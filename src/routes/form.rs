use axum::extract::Multipart;

use crate::dto::file_dto::FileDto;
use crate::dto::form_fields::FormFields;
use crate::error::Result;

/// Name of the multipart part that carries the attachment.
pub const FILE_FIELD: &str = "file";

pub async fn read_form(mut multipart: Multipart) -> Result<FormFields> {
    let mut form = FormFields::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::error!("Failed to get next field: {}", e);
        e
    })? {
        let field_name = field.name().unwrap_or_default().to_string();
        if field_name == FILE_FIELD {
            let name = field.file_name().unwrap_or_default().to_string();
            let content = field.bytes().await?;
            form.file = FileDto::new(name, content);
        } else {
            let value = field.text().await?;
            form.fields.insert(field_name, value);
        }
    }

    Ok(form)
}
