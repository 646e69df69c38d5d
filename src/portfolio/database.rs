/// SQLite database setup for the portfolio
///
/// Opens (or creates) the single portfolio database, creates the two tables on
/// first run and inserts the seed projects when the projects table is empty.

use crate::portfolio::{storage::PortfolioStorage, types::seed_projects};
use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

/// Open the database file, creating its parent directory and the file if missing
pub async fn open_database(db_path: &Path) -> Result<SqlitePool> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| anyhow::anyhow!("Failed to create data directory '{}': {}", parent.display(), e))?;
    }

    tracing::info!("🗄️ Opening portfolio database: {}", db_path.display());

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true);
    let pool = SqlitePool::connect_with(options).await?;

    init_schema(&pool).await?;

    Ok(pool)
}

/// Open a private in-memory database with the schema applied
///
/// A single long-lived connection keeps the database alive for the pool's lifetime.
pub async fn open_in_memory() -> Result<SqlitePool> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(SqliteConnectOptions::from_str("sqlite::memory:")?)
        .await?;

    init_schema(&pool).await?;

    Ok(pool)
}

/// Create the portfolio tables
///
/// Safe to call multiple times (uses IF NOT EXISTS).
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS projects (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            image TEXT NOT NULL,
            link TEXT NOT NULL,
            created_at INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS contact_messages (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            email TEXT NOT NULL,
            message TEXT NOT NULL,
            created_at INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Insert the fixed seed projects if no project exists yet
///
/// Returns the number of rows inserted.
pub async fn seed_if_empty(storage: &PortfolioStorage) -> Result<usize> {
    if storage.count_projects().await? > 0 {
        return Ok(0);
    }

    let seeds = seed_projects();
    for seed in &seeds {
        storage.create_project(seed).await?;
    }

    tracing::info!("🌱 Seeded {} default projects", seeds.len());

    Ok(seeds.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn seeds_only_an_empty_table() {
        let storage = PortfolioStorage::new(open_in_memory().await.unwrap());

        assert_eq!(seed_if_empty(&storage).await.unwrap(), 2);
        assert_eq!(seed_if_empty(&storage).await.unwrap(), 0);

        let titles: Vec<String> = storage
            .list_projects()
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.title)
            .collect();
        assert_eq!(titles, vec!["Portfolio Website", "Telegram Bot"]);
    }

    #[tokio::test]
    async fn file_database_is_created_and_reopened() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("portfolio.db");

        let pool = open_database(&path).await.unwrap();
        let storage = PortfolioStorage::new(pool.clone());
        seed_if_empty(&storage).await.unwrap();
        pool.close().await;
        assert!(path.exists());

        let storage = PortfolioStorage::new(open_database(&path).await.unwrap());
        assert_eq!(storage.count_projects().await.unwrap(), 2);
        assert_eq!(seed_if_empty(&storage).await.unwrap(), 0);
    }
}
