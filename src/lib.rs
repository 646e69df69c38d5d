/// Folio: personal portfolio server
///
/// Public site data (projects, contact form) backed by SQLite, with a single-admin
/// area for managing projects, reading contact messages and uploading images.

// Core configuration and setup
pub mod config;

// Portfolio data layer - record types, validation and SQLite storage
pub mod portfolio;

// Admin credential check and session store
pub mod auth;

// HTTP API layer - REST endpoints for projects, contact messages, auth and uploads
pub mod api;

// Server setup and initialization
pub mod server;

// Re-export commonly used types for external consumers
pub use portfolio::{ContactMessage, PortfolioStorage, Project};
pub use server::{create_app, start_server};
