//! Errors raised by the placement domain without touching the network.

/// A local refusal or failure; backend errors live in the client crate.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A form or draft broke one of its rules. The text is user-facing.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// No signed-in user where one is required.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Signed in, but with the wrong role.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The session persistence port failed to read or write.
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
