/// SQLite persistence layer for portfolio records
///
/// Sole owner of the `projects` and `contact_messages` tables. Every operation is a
/// single statement; nothing is cached, so each read hits the database.

use crate::portfolio::types::{ContactMessage, NewContactMessage, NewProject, Project, ProjectPatch};
use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::{
    sqlite::{SqlitePool, SqliteRow},
    Row,
};

/// Storage accessor for projects and contact messages
#[derive(Debug, Clone)]
pub struct PortfolioStorage {
    /// SQLite connection pool for the portfolio database
    pool: SqlitePool,
}

impl PortfolioStorage {
    /// Create new storage instance with database connection
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All projects in insertion order
    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        let rows = sqlx::query(
            "SELECT id, title, description, image, link, created_at FROM projects ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(project_from_row).collect()
    }

    pub async fn count_projects(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM projects")
            .fetch_one(&self.pool)
            .await?;
        Ok(row.get("total"))
    }

    /// Insert a project, stamping `created_at` with the current time
    pub async fn create_project(&self, input: &NewProject) -> Result<Project> {
        let row = sqlx::query(
            r#"
            INSERT INTO projects (title, description, image, link, created_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id, title, description, image, link, created_at
            "#,
        )
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.image)
        .bind(&input.link)
        .bind(Utc::now().timestamp())
        .fetch_one(&self.pool)
        .await?;

        project_from_row(&row)
    }

    /// Apply a partial update; `None` when no project has this id
    ///
    /// `created_at` is never touched. An empty patch returns the current row.
    pub async fn update_project(&self, id: i64, patch: &ProjectPatch) -> Result<Option<Project>> {
        let row = sqlx::query(
            r#"
            UPDATE projects SET
                title = COALESCE(?, title),
                description = COALESCE(?, description),
                image = COALESCE(?, image),
                link = COALESCE(?, link)
            WHERE id = ?
            RETURNING id, title, description, image, link, created_at
            "#,
        )
        .bind(patch.title.as_deref())
        .bind(patch.description.as_deref())
        .bind(patch.image.as_deref())
        .bind(patch.link.as_deref())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(project_from_row).transpose()
    }

    /// Delete a project; deleting a missing id is not an error
    ///
    /// Returns whether a row was removed.
    pub async fn delete_project(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// All contact messages in arrival order
    pub async fn list_messages(&self) -> Result<Vec<ContactMessage>> {
        let rows = sqlx::query(
            "SELECT id, name, email, message, created_at FROM contact_messages ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(message_from_row).collect()
    }

    pub async fn create_message(&self, input: &NewContactMessage) -> Result<ContactMessage> {
        let row = sqlx::query(
            r#"
            INSERT INTO contact_messages (name, email, message, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, name, email, message, created_at
            "#,
        )
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.message)
        .bind(Utc::now().timestamp())
        .fetch_one(&self.pool)
        .await?;

        message_from_row(&row)
    }

    /// Delete a contact message; idempotent like [`Self::delete_project`]
    pub async fn delete_message(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM contact_messages WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn project_from_row(row: &SqliteRow) -> Result<Project> {
    Ok(Project {
        id: row.try_get("id")?,
        title: row.try_get("title")?,
        description: row.try_get("description")?,
        image: row.try_get("image")?,
        link: row.try_get("link")?,
        created_at: timestamp(row.try_get("created_at")?)?,
    })
}

fn message_from_row(row: &SqliteRow) -> Result<ContactMessage> {
    Ok(ContactMessage {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        message: row.try_get("message")?,
        created_at: timestamp(row.try_get("created_at")?)?,
    })
}

fn timestamp(secs: i64) -> Result<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| anyhow::anyhow!("Stored timestamp out of range: {}", secs))
}
