use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use super::session::SessionKeys;

pub const LOGIN_PAGE: &str = "/users/login";

const ALWAYS_PERMITTED: [&str; 5] = ["/users/register", "/users/login", "/css", "/js", "/health"];

pub fn is_always_permitted(path: &str) -> bool {
    ALWAYS_PERMITTED.iter().any(|prefix| path.starts_with(prefix))
}

/// Lets public paths through; everything else needs a valid session or is
/// redirected to the login page. A verified session is attached to the request
/// as a [`super::session::SessionUser`] extension either way.
pub async fn require_session(State(keys): State<SessionKeys>, mut req: Request, next: Next) -> Response {
    let user = keys.from_headers(req.headers());
    let permitted = is_always_permitted(req.uri().path());

    match user {
        Some(user) => {
            req.extensions_mut().insert(user);
            next.run(req).await
        }
        None if permitted => next.run(req).await,
        None => {
            tracing::debug!(path = %req.uri().path(), "anonymous request redirected to login");
            Redirect::to(LOGIN_PAGE).into_response()
        }
    }
}
