use axum::{
    extract::State,
    http::header,
    response::{AppendHeaders, IntoResponse, Redirect},
    Form, Json,
};
use validator::Validate;

use crate::{
    dto::user_dto::{LoginPayload, PageResponse, RegisterUserPayload},
    error::{Error, Result},
    middleware::{
        auth::LOGIN_PAGE,
        session::{expired_cookie, SessionUser},
    },
    models::user::User,
    AppState,
};

const HOME_PAGE: &str = "/vacancies";

pub async fn registration_page() -> impl IntoResponse {
    Json(PageResponse {
        page: "users/register",
        message: None,
    })
}

pub async fn register(
    State(state): State<AppState>,
    Form(payload): Form<RegisterUserPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = User::new(payload.email, payload.name, payload.password);
    match state.user_service.save(user).await? {
        Some(_) => Ok(Redirect::to(HOME_PAGE)),
        None => Err(Error::Conflict("A user with this email already exists".into())),
    }
}

pub async fn login_page() -> impl IntoResponse {
    Json(PageResponse {
        page: "users/login",
        message: None,
    })
}

pub async fn login(
    State(state): State<AppState>,
    Form(payload): Form<LoginPayload>,
) -> Result<impl IntoResponse> {
    let user = state
        .user_service
        .find_by_email_and_password(&payload.email, &payload.password)
        .await?
        .ok_or_else(|| Error::Unauthorized("Email or password is incorrect".into()))?;

    let token = state.session.issue(&SessionUser::from(&user))?;
    let cookie = state.session.cookie(&token)?;
    tracing::info!(user_id = user.id, "user logged in");
    Ok((AppendHeaders([(header::SET_COOKIE, cookie)]), Redirect::to(HOME_PAGE)))
}

pub async fn logout() -> impl IntoResponse {
    (
        AppendHeaders([(header::SET_COOKIE, expired_cookie())]),
        Redirect::to(LOGIN_PAGE),
    )
}
