use crate::config::AdminCredentials;
use crate::state::AppState;
use axum::Json;
use axum::extract::State;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

pub const ADMIN_COOKIE: &str = "admin_token";

const SESSION_TTL_HOURS: i64 = 24;

/// Admin sessions backed by a fixed username/password pair.
///
/// The session cookie is only marked `Secure` when the server speaks
/// HTTPS.
#[derive(Clone)]
pub struct AdminAuth {
    credentials: Arc<AdminCredentials>,
    sessions: Arc<DashMap<String, DateTime<Utc>>>,
    secure_cookie: bool,
}

impl AdminAuth {
    pub fn new(credentials: AdminCredentials, secure_cookie: bool) -> Self {
        Self {
            credentials: Arc::new(credentials),
            sessions: Arc::new(DashMap::new()),
            secure_cookie,
        }
    }

    pub fn username(&self) -> &str {
        &self.credentials.username
    }

    /// Returns a fresh session token when the credentials match.
    pub fn login(&self, username: &str, password: &str) -> Option<String> {
        let user_ok = constant_time_eq(username.as_bytes(), self.credentials.username.as_bytes());
        let password_ok =
            constant_time_eq(password.as_bytes(), self.credentials.password.as_bytes());
        if !(user_ok & password_ok) {
            return None;
        }

        let now = Utc::now();
        self.sessions.retain(|_, expires| *expires > now);

        let token = Uuid::new_v4().to_string();
        self.sessions
            .insert(token.clone(), now + Duration::hours(SESSION_TTL_HOURS));
        Some(token)
    }

    /// `Set-Cookie` value carrying `token`. An empty token with a zero
    /// lifetime clears the cookie.
    pub fn session_cookie(&self, token: &str, max_age_secs: i64) -> String {
        let mut cookie = format!(
            "{}={}; Max-Age={}; Path=/; HttpOnly; SameSite=Strict",
            ADMIN_COOKIE, token, max_age_secs
        );
        if self.secure_cookie {
            cookie.push_str("; Secure");
        }
        cookie
    }

    pub fn logout(&self, token: &str) -> bool {
        self.sessions.remove(token).is_some()
    }

    pub fn is_valid(&self, token: &str) -> bool {
        let expired = match self.sessions.get(token) {
            None => return false,
            Some(expires) => *expires <= Utc::now(),
        };

        if expired {
            self.sessions.remove(token);
        }
        !expired
    }

    pub fn is_authenticated(&self, headers: &HeaderMap) -> bool {
        token_from_headers(headers).is_some_and(|t| self.is_valid(&t))
    }
}

// Compares every byte so the time taken does not depend on where the
// first mismatch is.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Value of the `admin_token` cookie, if the request carries one.
pub fn token_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == ADMIN_COOKIE).then(|| value.to_owned())
        })
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

pub async fn admin_login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Response {
    let Some(token) = state.admin.login(&request.username, &request.password) else {
        warn!("Rejected admin login for {:?}", request.username);
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "success": false, "error": "Invalid credentials" })),
        )
            .into_response();
    };

    info!("Admin {:?} logged in", request.username);
    let cookie = state.admin.session_cookie(&token, SESSION_TTL_HOURS * 3600);
    ([(SET_COOKIE, cookie)], Json(json!({ "success": true }))).into_response()
}

pub async fn admin_logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = token_from_headers(&headers) {
        state.admin.logout(&token);
    }

    let cookie = state.admin.session_cookie("", 0);
    ([(SET_COOKIE, cookie)], Json(json!({ "success": true }))).into_response()
}

pub async fn admin_check(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if state.admin.is_authenticated(&headers) {
        return Json(json!({ "authenticated": true, "username": state.admin.username() }))
            .into_response();
    }
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "authenticated": false })),
    )
        .into_response()
}
