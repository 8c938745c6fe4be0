use axum::{
    extract::{Path, State},
    http::{header, HeaderValue},
    response::IntoResponse,
};

use crate::{
    error::{Error, Result},
    AppState,
};

pub async fn get_file(State(state): State<AppState>, Path(id): Path<i32>) -> Result<impl IntoResponse> {
    let file = state
        .file_service
        .find_by_id(id)
        .await?
        .ok_or_else(|| Error::NotFound("File not found".into()))?;

    let disposition = HeaderValue::from_str(&format!("inline; filename=\"{}\"", file.name.replace('"', "")))
        .unwrap_or_else(|_| HeaderValue::from_static("inline"));
    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/octet-stream")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.content,
    ))
}
