/// Portfolio record types
///
/// The two persisted entities plus their validated insert/patch inputs.
/// Records serialize with camelCase keys, timestamps as RFC 3339.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A showcased project shown on the public site
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Auto-assigned, never reused
    pub id: i64,
    pub title: String,
    pub description: String,
    /// Image URL or relative upload path (e.g., "/uploads/1700000000000-123.png")
    pub image: String,
    /// External link for the project
    pub link: String,
    /// Set once at insert
    pub created_at: DateTime<Utc>,
}

/// A message submitted through the public contact form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Validated fields for a new project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProject {
    pub title: String,
    pub description: String,
    pub image: String,
    pub link: String,
}

/// Validated partial update for a project; `None` leaves the column untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub link: Option<String>,
}

impl ProjectPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.image.is_none()
            && self.link.is_none()
    }
}

/// Validated fields for a new contact message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Login form fields; missing or non-string values read as empty
#[derive(Debug, Clone, Default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_body(body: &serde_json::Value) -> Self {
        let field = |name: &str| {
            body.get(name)
                .and_then(|value| value.as_str())
                .unwrap_or_default()
                .to_string()
        };
        Self {
            username: field("username"),
            password: field("password"),
        }
    }
}

/// Fixed rows inserted into an empty projects table on startup
pub fn seed_projects() -> Vec<NewProject> {
    vec![
        NewProject {
            title: "Portfolio Website".to_string(),
            description: "A professional portfolio website built with React and Express.".to_string(),
            image: "https://images.unsplash.com/photo-1460925895917-afdab827c52f?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80".to_string(),
            link: "https://github.com/messi004".to_string(),
        },
        NewProject {
            title: "Telegram Bot".to_string(),
            description: "An automated bot for Telegram group management.".to_string(),
            image: "https://images.unsplash.com/photo-1596558450255-7c0baff3412c?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80".to_string(),
            link: "https://t.me/Messi0004".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_serializes_camel_case() {
        let project = Project {
            id: 7,
            title: "T".to_string(),
            description: "D".to_string(),
            image: "/uploads/x.png".to_string(),
            link: "https://example.com".to_string(),
            created_at: DateTime::from_timestamp(1_700_000_000, 0).unwrap(),
        };
        let json = serde_json::to_value(&project).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["createdAt"], "2023-11-14T22:13:20Z");
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn login_fields_tolerate_odd_bodies() {
        let request = LoginRequest::from_body(&serde_json::json!({ "username": 1, "password": "x" }));
        assert_eq!(request.username, "");
        assert_eq!(request.password, "x");

        let request = LoginRequest::from_body(&serde_json::json!(["admin"]));
        assert_eq!(request.username, "");
        assert_eq!(request.password, "");
    }

    #[test]
    fn empty_patch_is_detected() {
        assert!(ProjectPatch::default().is_empty());
        let patch = ProjectPatch { link: Some("x".to_string()), ..Default::default() };
        assert!(!patch.is_empty());
    }
}
