/// Configuration management for the Folio server
///
/// Handles server binding, database location, the admin credential, session
/// lifetime and upload storage. Every value can be overridden from the environment.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Database configuration
    pub database: DatabaseConfig,
    /// Admin credential and session settings
    pub auth: AuthConfig,
    /// Upload and static file settings
    pub upload: UploadConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server bind address (e.g., "0.0.0.0")
    pub host: String,
    /// Server port number
    pub port: u16,
    /// Maximum accepted request body in bytes (bounds multipart uploads)
    pub body_limit: usize,
}

/// SQLite storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Directory holding the database file (default: "data")
    /// Creates: {data_dir}/portfolio.db
    pub data_dir: String,
}

/// The single shared admin credential
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,
    /// Seconds a session stays authenticated after login
    pub session_ttl_secs: i64,
}

/// Upload storage and public site directories
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Directory uploaded files are written to
    pub upload_dir: String,
    /// URL prefix the upload directory is served under
    pub public_prefix: String,
    /// Optional pre-built site served as a fallback for non-API routes
    pub public_dir: String,
}

impl DatabaseConfig {
    /// Path of the SQLite file inside the data directory
    pub fn database_path(&self) -> PathBuf {
        PathBuf::from(&self.data_dir).join("portfolio.db")
    }
}

// Keep the password out of debug output and logs.
impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("session_ttl_secs", &self.session_ttl_secs)
            .finish()
    }
}

impl Default for Config {
    /// Default configuration with ENV_VAR support for container deployment
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: env_or("FOLIO_HOST", "0.0.0.0"),
                port: env_parse("FOLIO_PORT", 5000),
                body_limit: env_parse("FOLIO_BODY_LIMIT", 10 * 1024 * 1024),
            },
            database: DatabaseConfig {
                data_dir: env_or("FOLIO_DATA_DIR", "data"),
            },
            auth: AuthConfig {
                username: env_or("FOLIO_ADMIN_USERNAME", "admin"),
                password: env_or("FOLIO_ADMIN_PASSWORD", "Messi@876910"),
                session_ttl_secs: env_parse("FOLIO_SESSION_TTL_SECS", 24 * 60 * 60),
            },
            upload: UploadConfig {
                upload_dir: env_or("FOLIO_UPLOAD_DIR", "public/uploads"),
                public_prefix: "/uploads".to_string(),
                public_dir: env_or("FOLIO_PUBLIC_DIR", "public"),
            },
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid {} value '{}', using default", key, raw);
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_path_lives_in_data_dir() {
        let db = DatabaseConfig { data_dir: "/tmp/folio".to_string() };
        assert_eq!(db.database_path(), PathBuf::from("/tmp/folio/portfolio.db"));
    }

    #[test]
    fn auth_debug_hides_password() {
        let auth = AuthConfig {
            username: "admin".to_string(),
            password: "hunter2".to_string(),
            session_ttl_secs: 60,
        };
        let rendered = format!("{:?}", auth);
        assert!(rendered.contains("admin"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn unparseable_number_falls_back() {
        assert_eq!(env_parse::<u16>("FOLIO_TEST_UNSET_PORT_VALUE", 5000), 5000);
    }
}
