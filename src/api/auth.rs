/// Admin login/logout endpoints and the session gate
///
/// POST /api/auth/login, POST /api/auth/logout, GET /api/auth/check.
/// [`AdminSession`] is the extractor mutating handlers take to require a live session.

use crate::{
    api::{error::ApiError, AppState},
    auth::session::{expired_session_cookie, session_cookie, session_id_from_cookie_header},
    portfolio::types::LoginRequest,
};
use axum::{
    extract::{rejection::JsonRejection, FromRequestParts, State},
    http::{header, request::Parts, HeaderMap},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};

/// Proof that the request carries an authenticated session
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub session_id: String,
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(session_id) = session_id(&parts.headers) else {
            tracing::warn!("🔒 Rejected {} {}: no session", parts.method, parts.uri.path());
            return Err(ApiError::Unauthorized);
        };

        if !state.sessions.is_authenticated(&session_id).await {
            tracing::warn!("🔒 Rejected {} {}: session not authenticated", parts.method, parts.uri.path());
            return Err(ApiError::Unauthorized);
        }

        Ok(AdminSession { session_id })
    }
}

/// Create authentication routes
pub fn create_auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/check", get(check))
}

/// Log in with the admin credential
///
/// POST /api/auth/login
/// Body: { "username": "...", "password": "..." }
async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ApiError> {
    // Malformed or non-JSON bodies count as empty credentials.
    let request = match payload {
        Ok(Json(body)) => LoginRequest::from_body(&body),
        Err(_) => LoginRequest::default(),
    };

    if !state.credentials.verify(&request.username, &request.password) {
        tracing::warn!("🔒 Failed login attempt for user '{}'", request.username);
        return Err(ApiError::InvalidCredentials);
    }

    // A new login always starts a new session.
    if let Some(previous) = session_id(&headers) {
        state.sessions.remove(&previous).await;
    }

    let session = state.sessions.create().await;
    tracing::info!("🔓 Admin logged in");

    Ok((
        [(header::SET_COOKIE, session_cookie(&session, state.sessions.ttl_secs()))],
        Json(json!({ "message": "Login successful" })),
    )
        .into_response())
}

/// Invalidate the current session
///
/// POST /api/auth/logout
async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(id) = session_id(&headers) {
        if state.sessions.remove(&id).await {
            tracing::info!("👋 Admin logged out");
        }
    }

    (
        [(header::SET_COOKIE, expired_session_cookie())],
        Json(json!({ "message": "Logged out" })),
    )
        .into_response()
}

/// Report whether the caller holds a live session
///
/// GET /api/auth/check
/// Returns: { "authenticated": bool }
async fn check(State(state): State<AppState>, headers: HeaderMap) -> Json<serde_json::Value> {
    let authenticated = match session_id(&headers) {
        Some(id) => state.sessions.is_authenticated(&id).await,
        None => false,
    };

    Json(json!({ "authenticated": authenticated }))
}

fn session_id(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(session_id_from_cookie_header)
        .map(str::to_string)
}
