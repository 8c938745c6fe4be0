use axum::{
    extract::{Multipart, Path, State},
    response::{IntoResponse, Redirect},
    Extension, Json,
};
use serde_json::json;

use crate::{
    dto::vacancy_dto::{VacancyForm, VacancyListResponse, VacancyPageResponse},
    error::{Error, Result},
    middleware::session::{display_name, SessionUser},
    routes::form::read_form,
    AppState,
};

const LIST_PAGE: &str = "/vacancies";
const NOT_FOUND: &str = "Vacancy with the given id was not found";

pub async fn list_vacancies(
    State(state): State<AppState>,
    user: Option<Extension<SessionUser>>,
) -> Result<impl IntoResponse> {
    let vacancies = state.vacancy_service.find_all().await?;
    Ok(Json(VacancyListResponse {
        user: display_name(user.as_deref()),
        vacancies,
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

pub async fn create_vacancy(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let form = read_form(multipart).await?;
    let submitted = VacancyForm::from_fields(&form)?;
    state.city_service.require(submitted.city_id).await?;
    let vacancy = submitted.into_vacancy();
    state.vacancy_service.save(vacancy, form.file).await?;
    Ok(Redirect::to(LIST_PAGE))
}

pub async fn get_vacancy(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    user: Option<Extension<SessionUser>>,
) -> Result<impl IntoResponse> {
    let vacancy = state
        .vacancy_service
        .find_by_id(id)
        .await?
        .ok_or_else(|| Error::NotFound(NOT_FOUND.into()))?;
    let cities = state.city_service.find_all().await?;
    Ok(Json(VacancyPageResponse {
        user: display_name(user.as_deref()),
        vacancy,
        cities,
    }))
}

pub async fn update_vacancy(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<impl IntoResponse> {
    let form = read_form(multipart).await?;
    let id: i32 = form.required("id")?;
    let submitted = VacancyForm::from_fields(&form)?;
    state.city_service.require(submitted.city_id).await?;
    let vacancy = submitted.into_vacancy();
    let updated = state.vacancy_service.update(vacancy, form.file).await?;
    if !updated {
        tracing::warn!(vacancy_id = id, "update of unknown vacancy");
        return Err(Error::NotFound(NOT_FOUND.into()));
    }
    Ok(Redirect::to(LIST_PAGE))
}

pub async fn delete_vacancy(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse> {
    if !state.vacancy_service.delete_by_id(id).await? {
        return Err(Error::NotFound(NOT_FOUND.into()));
    }
    Ok(Redirect::to(LIST_PAGE))
}
