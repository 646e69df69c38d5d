/// Contact message endpoints
///
/// Submitting a message is public (the site's contact form); reading and deleting
/// messages is admin-only.
// TODO: rate-limit POST /api/contact per client address.

use crate::{
    api::{
        auth::AdminSession,
        error::{parse_id, ApiError},
        AppState,
    },
    portfolio::{types::ContactMessage, validation::validate_new_contact_message},
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get},
    Router,
};
use serde_json::Value;

/// Create contact message routes
pub fn create_contact_routes() -> Router<AppState> {
    Router::new()
        .route("/api/contact", get(list_messages).post(create_message))
        .route("/api/contact/{id}", delete(delete_message))
}

/// Submit a contact message
///
/// POST /api/contact
/// Body: { "name": "...", "email": "...", "message": "..." }
async fn create_message(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<ContactMessage>), ApiError> {
    let Json(body) = payload?;
    let input = validate_new_contact_message(&body)?;

    let message = state.storage.create_message(&input).await?;
    tracing::info!("✉️ Received contact message {} from {}", message.id, message.email);

    Ok((StatusCode::CREATED, Json(message)))
}

/// GET /api/contact
async fn list_messages(
    _admin: AdminSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<ContactMessage>>, ApiError> {
    Ok(Json(state.storage.list_messages().await?))
}

/// DELETE /api/contact/:id
async fn delete_message(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;

    if state.storage.delete_message(id).await? {
        tracing::info!("🗑️ Deleted contact message {}", id);
    }

    Ok(StatusCode::NO_CONTENT)
}
