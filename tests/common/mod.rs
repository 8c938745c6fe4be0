#![allow(dead_code)]

use std::path::Path;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, Response, StatusCode},
    Router,
};
use dreamjob_backend::{config::Config, create_router, AppState};
use serde_json::Value as JsonValue;
use tower::ServiceExt;

pub const BOUNDARY: &str = "----dreamjob-test-boundary";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    _tmp: tempfile::TempDir,
}

pub fn test_config(dir: &Path) -> Config {
    Config {
        server_address: "127.0.0.1:0".into(),
        database_url: None,
        session_secret: "test_secret_key".into(),
        session_ttl_hours: 1,
        file_directory: dir.join("files"),
        static_dir: dir.join("static"),
    }
}

pub fn spawn_app() -> TestApp {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = test_config(tmp.path());
    let state = AppState::in_memory(&config).expect("state");
    let router = create_router(state.clone(), &config);
    TestApp {
        router,
        state,
        _tmp: tmp,
    }
}

pub fn multipart_body(fields: &[(&str, &str)], file: Option<(&str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }
    if let Some((filename, content)) = file {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                BOUNDARY, filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

impl TestApp {
    pub async fn send(&self, req: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(req).await.expect("response")
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(&self, uri: &str, form: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(form.to_string())).unwrap()).await
    }

    pub async fn post_multipart(&self, uri: &str, body: Vec<u8>, cookie: &str) -> Response<Body> {
        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", BOUNDARY),
            )
            .header(header::COOKIE, cookie)
            .body(Body::from(body))
            .unwrap();
        self.send(req).await
    }

    /// Registers and logs in a user; returns the `Cookie` header value to send.
    pub async fn login_as(&self, email: &str, name: &str, password: &str) -> String {
        let form = format!(
            "email={}&name={}&password={}",
            email.replace('@', "%40"),
            name,
            password
        );
        let resp = self.post_form("/users/register", &form, None).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);

        let form = format!("email={}&password={}", email.replace('@', "%40"), password);
        let resp = self.post_form("/users/login", &form, None).await;
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        session_cookie(&resp).expect("session cookie")
    }
}

pub fn session_cookie(resp: &Response<Body>) -> Option<String> {
    resp.headers()
        .get(header::SET_COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .next()
        .map(str::to_string)
}

pub fn location(resp: &Response<Body>) -> &str {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

pub async fn json_body(resp: Response<Body>) -> JsonValue {
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn raw_body(resp: Response<Body>) -> Vec<u8> {
    to_bytes(resp.into_body(), 1024 * 1024).await.unwrap().to_vec()
}
