//! Mapping of domain errors to what a user gets to see.

use serde::Serialize;
use serde_json::{Value as JsonValue, json};
use tracing::error;

use stockroom_core::DomainError;

/// Message used for failures whose detail must not reach the user.
pub const GENERIC_FAILURE: &str = "the operation could not be completed; please try again";

/// A user-facing error: stable code + message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserError {
    pub code: &'static str,
    pub message: String,
}

impl UserError {
    /// Body for service front-ends: `{"error": code, "message": message}`.
    pub fn to_json(&self) -> JsonValue {
        json!({
            "error": self.code,
            "message": self.message,
        })
    }
}

/// Validation, auth, config and not-found errors pass through with their
/// message. Persistence failures and exhausted retries are logged and replaced
/// with [`GENERIC_FAILURE`].
pub fn user_error(err: &DomainError) -> UserError {
    match err {
        DomainError::Validation(msg) => user("validation_error", msg),
        DomainError::InvalidId(msg) => user("validation_error", msg),
        DomainError::NotFound(what) => user("not_found", format!("{what} was not found")),
        DomainError::Auth(msg) => user("auth_required", msg),
        DomainError::Config(msg) => user("config_error", msg),
        DomainError::Conflict(msg) => {
            error!(error = %msg, "write conflict surfaced to user");
            user("conflict", GENERIC_FAILURE)
        }
        DomainError::Persistence(msg) => {
            error!(error = %msg, "persistence failure surfaced to user");
            user("internal_error", GENERIC_FAILURE)
        }
    }
}

fn user(code: &'static str, message: impl Into<String>) -> UserError {
    UserError {
        code,
        message: message.into(),
    }
}
