use axum::http::{header, HeaderMap, HeaderValue};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::models::user::User;

pub const SESSION_COOKIE: &str = "session";
pub const GUEST_NAME: &str = "Guest";

/// The logged-in user, as handlers see it through request extensions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i32,
    pub email: String,
    pub name: String,
}

impl From<&User> for SessionUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: i32,
    email: String,
    name: String,
    exp: usize,
}

/// Signs and verifies session cookies (HS256).
#[derive(Clone)]
pub struct SessionKeys {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
    ttl: Duration,
}

impl SessionKeys {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
            ttl: Duration::hours(ttl_hours),
        }
    }

    pub fn issue(&self, user: &SessionUser) -> Result<String> {
        let exp = (Utc::now() + self.ttl).timestamp().max(0) as usize;
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            exp,
        };
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    pub fn verify(&self, token: &str) -> Option<SessionUser> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        match decode::<Claims>(token, &self.decoding, &validation) {
            Ok(data) => Some(SessionUser {
                id: data.claims.sub,
                email: data.claims.email,
                name: data.claims.name,
            }),
            Err(e) => {
                tracing::debug!(error = %e, "rejected session cookie");
                None
            }
        }
    }

    /// Reads the session cookie from the request headers, if present and valid.
    pub fn from_headers(&self, headers: &HeaderMap) -> Option<SessionUser> {
        let token = cookie_value(headers, SESSION_COOKIE)?;
        self.verify(&token)
    }

    pub fn cookie(&self, token: &str) -> Result<HeaderValue> {
        let value = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            SESSION_COOKIE,
            token,
            self.ttl.num_seconds()
        );
        HeaderValue::from_str(&value).map_err(|e| Error::Internal(e.to_string()))
    }
}

pub fn expired_cookie() -> HeaderValue {
    HeaderValue::from_static("session=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
}

pub fn display_name(user: Option<&SessionUser>) -> String {
    user.map(|u| u.name.clone())
        .unwrap_or_else(|| GUEST_NAME.to_string())
}

fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> SessionUser {
        SessionUser {
            id: 1,
            email: "alice@example.com".into(),
            name: "Alice".into(),
        }
    }

    #[test]
    fn issued_token_verifies() {
        let keys = SessionKeys::new("secret", 1);
        let token = keys.issue(&alice()).unwrap();
        assert_eq!(keys.verify(&token), Some(alice()));
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let token = SessionKeys::new("one", 1).issue(&alice()).unwrap();
        assert_eq!(SessionKeys::new("two", 1).verify(&token), None);
    }

    #[test]
    fn session_is_read_among_other_cookies() {
        let keys = SessionKeys::new("secret", 1);
        let token = keys.issue(&alice()).unwrap();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("theme=dark; session={}; lang=en", token)).unwrap(),
        );
        assert_eq!(keys.from_headers(&headers), Some(alice()));
    }

    #[test]
    fn missing_or_blank_cookie_is_anonymous() {
        let keys = SessionKeys::new("secret", 1);
        let mut headers = HeaderMap::new();
        assert_eq!(keys.from_headers(&headers), None);
        headers.insert(header::COOKIE, HeaderValue::from_static("session="));
        assert_eq!(keys.from_headers(&headers), None);
    }

    #[test]
    fn guest_name_for_anonymous() {
        assert_eq!(display_name(None), GUEST_NAME);
        assert_eq!(display_name(Some(&alice())), "Alice");
    }
}
