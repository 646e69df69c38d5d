/// Request body validation
///
/// Explicit validators for each entity. A body must be a JSON object containing
/// only known keys; fields are checked in declaration order and the first failure
/// is reported. Accepted values are stored exactly as sent.

use crate::portfolio::types::{NewContactMessage, NewProject, ProjectPatch};
use serde_json::{Map, Value};
use thiserror::Error;

/// First offending field of a rejected body
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Offending field, empty when the body itself is malformed
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

const PROJECT_FIELDS: [&str; 4] = ["title", "description", "image", "link"];
const CONTACT_FIELDS: [&str; 3] = ["name", "email", "message"];

/// Validate a project creation body
pub fn validate_new_project(body: &Value) -> Result<NewProject, ValidationError> {
    let object = as_object(body, &PROJECT_FIELDS)?;
    Ok(NewProject {
        title: required_text(object, "title")?,
        description: required_text(object, "description")?,
        image: required_text(object, "image")?,
        link: required_text(object, "link")?,
    })
}

/// Validate a partial project update body
pub fn validate_project_patch(body: &Value) -> Result<ProjectPatch, ValidationError> {
    let object = as_object(body, &PROJECT_FIELDS)?;
    Ok(ProjectPatch {
        title: optional_text(object, "title")?,
        description: optional_text(object, "description")?,
        image: optional_text(object, "image")?,
        link: optional_text(object, "link")?,
    })
}

/// Validate a contact form body
pub fn validate_new_contact_message(body: &Value) -> Result<NewContactMessage, ValidationError> {
    let object = as_object(body, &CONTACT_FIELDS)?;
    let name = required_text(object, "name")?;
    let email = required_text(object, "email")?;
    let message = required_text(object, "message")?;
    Ok(NewContactMessage { name, email, message })
}

fn as_object<'a>(body: &'a Value, allowed: &[&str]) -> Result<&'a Map<String, Value>, ValidationError> {
    let object = body
        .as_object()
        .ok_or_else(|| ValidationError::new("", "Expected a JSON object"))?;

    if let Some(unknown) = object.keys().find(|key| !allowed.contains(&key.as_str())) {
        return Err(ValidationError::new(unknown, format!("Unrecognized key: \"{}\"", unknown)));
    }

    Ok(object)
}

fn required_text(object: &Map<String, Value>, field: &str) -> Result<String, ValidationError> {
    match object.get(field) {
        None | Some(Value::Null) => Err(ValidationError::new(field, format!("{} is required", field))),
        Some(value) => text(value, field),
    }
}

fn optional_text(object: &Map<String, Value>, field: &str) -> Result<Option<String>, ValidationError> {
    match object.get(field) {
        None => Ok(None),
        Some(value) => text(value, field).map(Some),
    }
}

fn text(value: &Value, field: &str) -> Result<String, ValidationError> {
    let raw = value
        .as_str()
        .ok_or_else(|| ValidationError::new(field, format!("{} must be a string", field)))?;
    // Whitespace-only counts as empty, but the value itself is kept verbatim.
    if raw.trim().is_empty() {
        return Err(ValidationError::new(field, format!("{} must not be empty", field)));
    }
    Ok(raw.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn project_body() -> Value {
        json!({
            "title": "Site",
            "description": "My site",
            "image": "/uploads/a.png",
            "link": "https://example.com"
        })
    }

    #[test]
    fn accepts_complete_project() {
        let project = validate_new_project(&project_body()).unwrap();
        assert_eq!(project.title, "Site");
        assert_eq!(project.link, "https://example.com");
    }

    #[test]
    fn missing_title_is_reported_first() {
        let mut body = project_body();
        body.as_object_mut().unwrap().remove("title");
        body.as_object_mut().unwrap().remove("link");

        let err = validate_new_project(&body).unwrap_err();
        assert_eq!(err.field, "title");
        assert_eq!(err.message, "title is required");
    }

    #[test]
    fn blank_and_non_string_values_are_rejected() {
        let mut body = project_body();
        body["description"] = json!("   ");
        assert_eq!(
            validate_new_project(&body).unwrap_err().message,
            "description must not be empty"
        );

        body["description"] = json!(42);
        assert_eq!(
            validate_new_project(&body).unwrap_err().message,
            "description must be a string"
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let mut body = project_body();
        body["id"] = json!(5);
        let err = validate_new_project(&body).unwrap_err();
        assert_eq!(err.field, "id");
        assert_eq!(err.message, "Unrecognized key: \"id\"");
    }

    #[test]
    fn non_object_body_is_rejected() {
        assert!(validate_new_project(&json!(["title"])).is_err());
        assert!(validate_project_patch(&json!("x")).is_err());
    }

    #[test]
    fn patch_keeps_only_present_fields() {
        let patch = validate_project_patch(&json!({ "title": "New" })).unwrap();
        assert_eq!(patch.title.as_deref(), Some("New"));
        assert!(patch.description.is_none());

        assert!(validate_project_patch(&json!({})).unwrap().is_empty());
        assert!(validate_project_patch(&json!({ "link": "" })).is_err());
    }

    #[test]
    fn surrounding_whitespace_is_preserved() {
        let mut body = project_body();
        body["title"] = json!("  Ray tracer  ");
        assert_eq!(validate_new_project(&body).unwrap().title, "  Ray tracer  ");

        let patch = validate_project_patch(&json!({ "link": " https://example.com\n" })).unwrap();
        assert_eq!(patch.link.as_deref(), Some(" https://example.com\n"));
    }

    #[test]
    fn contact_email_is_free_text() {
        let message = validate_new_contact_message(&json!({
            "name": "A", "email": "a", "message": "hi"
        }))
        .unwrap();
        assert_eq!(message.email, "a");

        let err = validate_new_contact_message(&json!({
            "name": "A", "email": " ", "message": "hi"
        }))
        .unwrap_err();
        assert_eq!(err.field, "email");
        assert_eq!(err.message, "email must not be empty");
    }
}
