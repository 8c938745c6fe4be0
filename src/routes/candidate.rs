use axum::{
    extract::{Multipart, Path, State},
    response::{IntoResponse, Redirect},
    Extension, Json,
};
use serde_json::json;

use crate::{
    dto::candidate_dto::{CandidateForm, CandidateListResponse, CandidatePageResponse},
    error::{Error, Result},
    middleware::session::{display_name, SessionUser},
    routes::form::read_form,
    AppState,
};

const LIST_PAGE: &str = "/candidates";
const NOT_FOUND: &str = "Candidate with the given id was not found";

pub async fn list_candidates(
    State(state): State<AppState>,
    user: Option<Extension<SessionUser>>,
) -> Result<impl IntoResponse> {
    let candidates = state.candidate_service.find_all().await?;
    Ok(Json(CandidateListResponse {
        user: display_name(user.as_deref()),
        candidates,
    }))
}

pub async fn creation_page(
    State(state): State<AppState>,
    user: Option<Extension<SessionUser>>,
) -> Result<impl IntoResponse> {
    let cities = state.city_service.find_all().await?;
    Ok(Json(json!({
        "user": display_name(user.as_deref()),
        "cities": cities,
    })))
}

pub async fn create_candidate(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let form = read_form(multipart).await?;
    let submitted = CandidateForm::from_fields(&form)?;
    state.city_service.require(submitted.city_id).await?;
    let candidate = submitted.into_candidate();
    state.candidate_service.save(candidate, form.file).await?;
    Ok(Redirect::to(LIST_PAGE))
}

pub async fn get_candidate(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    user: Option<Extension<SessionUser>>,
) -> Result<impl IntoResponse> {
    let candidate = state
        .candidate_service
        .find_by_id(id)
        .await?
        .ok_or_else(|| Error::NotFound(NOT_FOUND.into()))?;
    let cities = state.city_service.find_all().await?;
    Ok(Json(CandidatePageResponse {
        user: display_name(user.as_deref()),
        candidate,
        cities,
    }))
}

pub async fn update_candidate(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let form = read_form(multipart).await?;
    let id: i32 = form.required("id")?;
    let submitted = CandidateForm::from_fields(&form)?;
    state.city_service.require(submitted.city_id).await?;
    let candidate = submitted.into_candidate();
    let updated = state.candidate_service.update(candidate, form.file).await?;
    if !updated {
        tracing::warn!(candidate_id = id, "update of unknown candidate");
        return Err(Error::NotFound(NOT_FOUND.into()));
    }
    Ok(Redirect::to(LIST_PAGE))
}

pub async fn delete_candidate(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    if !state.candidate_service.delete_by_id(id).await? {
        return Err(Error::NotFound(NOT_FOUND.into()));
    }
    Ok(Redirect::to(LIST_PAGE))
}
