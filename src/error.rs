//! Error types for the workspace store and the session flow.

use thiserror::Error;

/// Failure of a workspace store operation.
///
/// Every mutating store operation reports its outcome through this type so
/// callers can react; benign no-ops (deleting an id that is already gone)
/// are successes, not errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The addressed task or project does not exist.
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    /// A task referenced a project id that names no existing project.
    #[error("project {0} does not exist")]
    InvalidReference(String),

    /// A supplied field value is out of its permitted range.
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// Reading or writing the persisted document failed.
    #[error("persistence failure: {0}")]
    Persistence(String),
}

impl StoreError {
    pub fn task_not_found(id: &str) -> Self {
        StoreError::NotFound { kind: "task", id: id.to_string() }
    }

    pub fn project_not_found(id: &str) -> Self {
        StoreError::NotFound { kind: "project", id: id.to_string() }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Persistence(e.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Persistence(e.to_string())
    }
}

/// Rejection of a login or signup attempt.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("failed to create account: {0}")]
    SignupRejected(String),
}
