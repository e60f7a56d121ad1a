//! Error handling for the Shelf API client.
//!
//! Every remote failure collapses into one of three user-facing categories:
//! authentication failures (which tear the session down), validation
//! rejections (shown inline on the form), and network failures (shown as a
//! generic message). Nothing is retried.

use thiserror::Error;

/// Fallback when an auth response carries no server message.
pub const GENERIC_AUTH_MESSAGE: &str = "An error occurred.";

/// Fallback when a create-book rejection carries no server message.
pub const GENERIC_ADD_MESSAGE: &str = "Failed to add book.";

/// Message shown when a delete call fails.
pub const DELETE_FAILED_MESSAGE: &str = "Failed to delete the book. Please try again.";

/// Client error types that map HTTP failures to user-facing categories.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("authentication failed: {message}")]
    Auth { message: String },

    #[error("validation failed: {message}")]
    Validation { message: String },

    #[error("network failure: {message}")]
    Network { message: String },
}

impl ApiError {
    /// Create an authentication error
    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Whether this failure must tear the current session down.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }

    /// The message surfaced to the user, verbatim from the server when the
    /// response carried one.
    pub fn user_message(&self) -> &str {
        match self {
            Self::Auth { message } | Self::Validation { message } | Self::Network { message } => {
                message
            }
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_carries_message_verbatim() {
        let error = ApiError::auth("Invalid credentials");
        assert!(error.is_auth());
        assert_eq!(error.user_message(), "Invalid credentials");
    }

    #[test]
    fn test_validation_error_is_not_auth() {
        let error = ApiError::validation("Please add all required fields");
        assert!(!error.is_auth());
        assert_eq!(error.user_message(), "Please add all required fields");
    }

    #[test]
    fn test_network_error_display() {
        let error = ApiError::network(DELETE_FAILED_MESSAGE);
        assert_eq!(
            error.to_string(),
            format!("network failure: {DELETE_FAILED_MESSAGE}")
        );
    }
}
