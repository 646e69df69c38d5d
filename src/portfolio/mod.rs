/// Portfolio data layer
///
/// Record types, request validation, database setup and the storage accessor
/// for projects and contact messages.

pub mod database;
pub mod storage;
pub mod types;
pub mod validation;

pub use storage::PortfolioStorage;
pub use types::{ContactMessage, NewContactMessage, NewProject, Project, ProjectPatch};
pub use validation::ValidationError;
