//! Error types for shelf-core
//!
//! This module defines error types using thiserror for ergonomic error handling.
//! Errors are grouped by the boundary they come from: payload mapping,
//! configuration or bridge input.
//!
//! Reconciliation never produces an error: removing an unknown local file id or
//! setting an empty track list are no-ops. Everything in here is raised while
//! mapping payloads in and out of the model or while reading configuration.

use thiserror::Error;

/// Result type alias using our ShelfError type
pub type Result<T> = std::result::Result<T, ShelfError>;

/// Main error type for shelf-core
#[derive(Error, Debug)]
pub enum ShelfError {
    // ===== Payload Mapping Errors =====

    /// Payload matched neither the book nor the podcast shape
    #[error("Unrecognised {entity} payload: {reason}")]
    UnrecognisedShape {
        /// Entity being mapped (e.g. "media", "metadata")
        entity: String,
        reason: String,
    },

    // ===== Input Errors =====

    /// Bridge input could not be read (null pointer, bad UTF-8)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ===== Configuration Errors =====

    /// Configuration is invalid or incomplete
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Runtime environment was read before the host installed it
    #[error("Runtime environment not configured: {0}")]
    EnvironmentNotConfigured(String),

    // ===== External Library Errors =====

    /// JSON serialization/deserialization error
    #[error("JSON serialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),

    /// Settings loading error from the config crate
    #[error("Settings error: {0}")]
    ConfigError(#[from] ::config::ConfigError),

    /// Cover or content URL could not be parsed
    #[error("URL parse error: {0}")]
    UrlError(#[from] url::ParseError),

    /// JNI bridge error (Android only)
    #[error("JNI error: {0}")]
    #[cfg(target_os = "android")]
    JniError(String),
}

// Helper methods for creating common errors
impl ShelfError {
    /// Create an UnrecognisedShape error for the given entity
    pub fn unrecognised_shape<E: Into<String>, R: Into<String>>(entity: E, reason: R) -> Self {
        ShelfError::UnrecognisedShape {
            entity: entity.into(),
            reason: reason.into(),
        }
    }

    /// Create an InvalidInput error with a message
    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        ShelfError::InvalidInput(message.into())
    }

    /// Check if error came from mapping a payload into the model
    pub fn is_mapping_error(&self) -> bool {
        matches!(
            self,
            ShelfError::UnrecognisedShape { .. } | ShelfError::SerdeJsonError(_)
        )
    }

    /// Check if error is caused by missing or bad configuration
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ShelfError::InvalidConfiguration(_)
                | ShelfError::EnvironmentNotConfigured(_)
                | ShelfError::ConfigError(_)
        )
    }

    /// Get user-friendly error message suitable for display
    pub fn user_message(&self) -> String {
        match self {
            ShelfError::UnrecognisedShape { entity, .. } => {
                format!("The server sent a {} record this app does not understand.", entity)
            }
            ShelfError::EnvironmentNotConfigured(what) => {
                format!("Not connected to a server ({} missing). Please log in again.", what)
            }
            ShelfError::SerdeJsonError(_) => {
                "The server response could not be read.".to_string()
            }
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_error_classification() {
        let err = ShelfError::unrecognised_shape("media", "expected a JSON object");
        assert!(err.is_mapping_error());
        assert!(!err.is_config_error());
        assert_eq!(
            err.to_string(),
            "Unrecognised media payload: expected a JSON object"
        );
    }

    #[test]
    fn test_json_error_converts() {
        let parse: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: ShelfError = parse.unwrap_err().into();
        assert!(err.is_mapping_error());
        assert_eq!(err.user_message(), "The server response could not be read.");
    }

    #[test]
    fn test_config_error_classification() {
        let err = ShelfError::EnvironmentNotConfigured("server address".to_string());
        assert!(err.is_config_error());
        assert!(err.user_message().contains("server address missing"));
    }

    #[test]
    fn test_input_and_url_errors_are_not_mapping_errors() {
        let input = ShelfError::invalid_input("Null pointer received");
        assert!(!input.is_mapping_error());
        assert!(!input.is_config_error());

        let url: ShelfError = url::Url::parse("not a url").unwrap_err().into();
        assert!(!url.is_mapping_error());
        assert!(url.to_string().starts_with("URL parse error"));
    }
}
