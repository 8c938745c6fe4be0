mod common;

use axum::http::{header, StatusCode};
use common::{json_body, location, spawn_app};

#[tokio::test]
async fn protected_routes_redirect_anonymous_users_to_login() {
    let app = spawn_app();
    for uri in ["/candidates", "/vacancies/create", "/files/1", "/", "/users/logout"] {
        let resp = app.get(uri, None).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "{}", uri);
        assert_eq!(location(&resp), "/users/login", "{}", uri);
    }
}

#[tokio::test]
async fn public_routes_are_always_permitted() {
    let app = spawn_app();

    let resp = app.get("/users/login", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["page"], "users/login");

    let resp = app.get("/users/register", None).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app.get("/health", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["storage"], "memory");

    // Missing asset: a plain 404, not a login redirect.
    let resp = app.get("/css/missing.css", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn forged_session_cookie_is_rejected() {
    let app = spawn_app();
    let resp = app.get("/candidates", Some("session=not.a.jwt")).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/users/login");
}

#[tokio::test]
async fn login_grants_access_and_logout_revokes_cookie() {
    let app = spawn_app();
    let cookie = app.login_as("alice@example.com", "Alice", "secret").await;

    let resp = app.get("/", Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["user"], "Alice");

    let resp = app.get("/users/logout", Some(&cookie)).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/users/login");
    let set_cookie = resp.headers()[header::SET_COOKIE].to_str().unwrap().to_string();
    assert!(set_cookie.starts_with("session=;"));
    assert!(set_cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn duplicate_registration_is_a_conflict() {
    let app = spawn_app();
    app.login_as("bob@example.com", "Bob", "secret").await;

    let resp = app
        .post_form("/users/register", "email=bob%40example.com&name=Bobby&password=other", None)
        .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(json_body(resp).await["error"], "A user with this email already exists");
    assert_eq!(app.state.user_service.find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let app = spawn_app();
    app.login_as("carol@example.com", "Carol", "secret").await;

    let resp = app
        .post_form("/users/login", "email=carol%40example.com&password=wrong", None)
        .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(resp.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn invalid_registration_is_rejected() {
    let app = spawn_app();
    let resp = app
        .post_form("/users/register", "email=not-an-email&name=X&password=secret", None)
        .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
