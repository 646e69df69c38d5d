/// HTTP API Layer
///
/// REST endpoints under `/api`:
/// - Admin login/logout/session check
/// - Project listing (public) and CRUD (admin)
/// - Contact form submission (public) and message management (admin)
/// - Image upload (admin)

use crate::{
    auth::{AdminCredentials, SessionStore},
    config::UploadConfig,
    portfolio::PortfolioStorage,
};
use axum::Router;
use std::sync::Arc;

// Error type shared by every handler
pub mod error;

// Login, logout, session check and the AdminSession gate
pub mod auth;

// Project endpoints
pub mod projects;

// Contact message endpoints
pub mod contact;

// Multipart image upload
pub mod upload;

pub use error::ApiError;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Storage accessor for projects and contact messages
    pub storage: PortfolioStorage,
    /// Authenticated admin sessions
    pub sessions: Arc<SessionStore>,
    /// The configured admin credential
    pub credentials: Arc<AdminCredentials>,
    /// Upload directory and public URL prefix
    pub upload: Arc<UploadConfig>,
}

/// Create all API routes
pub fn create_api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::create_auth_routes())
        .merge(projects::create_project_routes())
        .merge(contact::create_contact_routes())
        .merge(upload::create_upload_routes())
}
