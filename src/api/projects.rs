/// Project REST API endpoints
///
/// Listing is public; creating, updating and deleting require an admin session.

use crate::{
    api::{
        auth::AdminSession,
        error::{parse_id, ApiError},
        AppState,
    },
    portfolio::{
        types::Project,
        validation::{validate_new_project, validate_project_patch},
    },
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, patch},
    Router,
};
use serde_json::Value;

/// Create project routes
pub fn create_project_routes() -> Router<AppState> {
    Router::new()
        .route("/api/projects", get(list_projects).post(create_project))
        .route("/api/projects/{id}", patch(update_project).delete(delete_project))
}

/// List all projects
///
/// GET /api/projects
async fn list_projects(State(state): State<AppState>) -> Result<Json<Vec<Project>>, ApiError> {
    Ok(Json(state.storage.list_projects().await?))
}

/// Create a project
///
/// POST /api/projects
/// Body: { "title": "...", "description": "...", "image": "...", "link": "..." }
async fn create_project(
    _admin: AdminSession,
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Project>), ApiError> {
    let Json(body) = payload?;
    let input = validate_new_project(&body)?;

    let project = state.storage.create_project(&input).await?;
    tracing::info!("📌 Created project {} ({})", project.id, project.title);

    Ok((StatusCode::CREATED, Json(project)))
}

/// Update some fields of a project
///
/// PATCH /api/projects/:id
/// Body: any subset of the creation fields
async fn update_project(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Project>, ApiError> {
    let id = parse_id(&id)?;
    let Json(body) = payload?;
    let patch = validate_project_patch(&body)?;

    match state.storage.update_project(id, &patch).await? {
        Some(project) => {
            tracing::info!("✏️ Updated project {} ({})", project.id, project.title);
            Ok(Json(project))
        }
        None => Err(ApiError::NotFound("Project not found".to_string())),
    }
}

/// Delete a project
///
/// DELETE /api/projects/:id
/// Deleting an unknown id still answers 204.
async fn delete_project(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&id)?;

    if state.storage.delete_project(id).await? {
        tracing::info!("🗑️ Deleted project {}", id);
    } else {
        tracing::debug!("Delete of unknown project {} ignored", id);
    }

    Ok(StatusCode::NO_CONTENT)
}
