/// Folio: personal portfolio server
///
/// Main entry point. Loads configuration from the environment and starts the
/// HTTP server.

use folio::{config::Config, server::start_server};

/// Application entry point
///
/// The server provides:
/// - Public and admin REST API at /api/*
/// - Uploaded images at /uploads/*
/// - Health check at /healthz
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration (defaults to 0.0.0.0:5000 and data/portfolio.db)
    let config = Config::default();

    start_server(config).await?;

    Ok(())
}
