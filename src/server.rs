/// Server setup and initialization
///
/// Wires together all components: database, storage, sessions, static files and
/// HTTP routes. Provides the application factory used by `main` and the tests.

use crate::{
    api::{create_api_routes, AppState},
    auth::{AdminCredentials, SessionStore},
    config::Config,
    portfolio::{
        database::{open_database, seed_if_empty},
        PortfolioStorage,
    },
};
use anyhow::Result;
use axum::{extract::DefaultBodyLimit, routing::get, Router};
use std::{path::Path, sync::Arc, time::Duration};
use tokio::{net::TcpListener, signal};
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

/// How often expired sessions are swept from memory
const SESSION_PURGE_INTERVAL: Duration = Duration::from_secs(10 * 60);

/// Open storage, seed it and assemble the shared application state
pub async fn create_state(config: &Config) -> Result<AppState> {
    tracing::info!("📁 Ensuring data directory exists: {}", config.database.data_dir);
    std::fs::create_dir_all(&config.database.data_dir)
        .map_err(|e| anyhow::anyhow!("Failed to create data directory: {}", e))?;

    tracing::info!("📁 Ensuring upload directory exists: {}", config.upload.upload_dir);
    std::fs::create_dir_all(&config.upload.upload_dir)
        .map_err(|e| anyhow::anyhow!("Failed to create upload directory: {}", e))?;

    let pool = open_database(&config.database.database_path())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to open portfolio database: {}", e))?;
    let storage = PortfolioStorage::new(pool);

    tracing::info!("🌱 Checking seed data");
    seed_if_empty(&storage)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to seed projects: {}", e))?;

    tracing::info!("🔐 Initializing session store (ttl {}s)", config.auth.session_ttl_secs);

    Ok(AppState {
        storage,
        sessions: Arc::new(SessionStore::new(config.auth.session_ttl_secs)),
        credentials: Arc::new(AdminCredentials::from_config(&config.auth)),
        upload: Arc::new(config.upload.clone()),
    })
}

/// Build the router for an assembled state
pub fn create_router(state: AppState, config: &Config) -> Router {
    tracing::info!("📡 Creating HTTP router with all endpoints");

    let mut app = Router::new()
        // Health check endpoint
        .route("/healthz", get(health_check))

        // REST API
        .merge(create_api_routes().with_state(state))

        // Stored uploads
        .nest_service(
            &config.upload.public_prefix,
            ServeDir::new(&config.upload.upload_dir),
        );

    // Pre-built public site, when one is deployed next to the server
    if Path::new(&config.upload.public_dir).is_dir() {
        tracing::info!("🌐 Serving public site from {}", config.upload.public_dir);
        app = app.fallback_service(ServeDir::new(&config.upload.public_dir));
    }

    app.layer(DefaultBodyLimit::max(config.server.body_limit))
        .layer(TraceLayer::new_for_http())
}

/// Create the main Axum application with all routes and middleware
pub async fn create_app(config: Config) -> Result<Router> {
    let state = create_state(&config).await?;
    let app = create_router(state, &config);

    tracing::info!("✅ Application initialized successfully");

    Ok(app)
}

/// Start the HTTP server with the given configuration
///
/// Serves until Ctrl+C or SIGTERM, then drains in-flight requests.
pub async fn start_server(config: Config) -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .with_thread_ids(true)
        .with_level(true)
        .init();

    tracing::info!("Starting Folio server...");
    tracing::debug!("Configuration: {:?}", config);

    let state = create_state(&config).await?;

    // Lookups already drop expired sessions; this sweep only reclaims ones never presented again.
    let sessions = Arc::clone(&state.sessions);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_PURGE_INTERVAL);
        loop {
            interval.tick().await;
            let purged = sessions.purge_expired().await;
            if purged > 0 {
                tracing::debug!("⌛ Purged {} expired sessions", purged);
            }
        }
    });

    let app = create_router(state, &config);

    // Bind to the configured address
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&bind_addr).await?;

    tracing::info!("Server listening on http://{}", bind_addr);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shut down");

    Ok(())
}

/// Health check endpoint handler
async fn health_check() -> &'static str {
    "ok"
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("❌ Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
        tracing::info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                tracing::info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                tracing::error!("❌ Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
