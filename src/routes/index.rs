use axum::{response::IntoResponse, Extension, Json};
use serde_json::json;

use crate::middleware::session::{display_name, SessionUser};

pub async fn index(user: Option<Extension<SessionUser>>) -> impl IntoResponse {
    Json(json!({ "user": display_name(user.as_deref()) }))
}
