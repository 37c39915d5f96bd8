//! Error types for the A2S workflow.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire A2S workspace.
///
/// Gate denials are deliberately absent: a refused navigation is a normal
/// outcome (`NavigationOutcome::Denied`), not an error.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum A2sError {
    /// A screen name that does not belong to the flow
    #[error("Unknown screen: '{0}'")]
    UnknownScreen(String),

    /// A payload addressed to a different state section than the current screen owns
    #[error("Payload for section '{payload}' cannot be folded while on screen '{screen}'")]
    PayloadSection { screen: String, payload: String },

    /// A payload that could not be decoded into a section update
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// A layout edit that does not fit the current layout or cart
    #[error("Placement error: {0}")]
    Placement(String),

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON"
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl A2sError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates an UnknownScreen error
    pub fn unknown_screen(name: impl Into<String>) -> Self {
        Self::UnknownScreen(name.into())
    }

    /// Creates an InvalidPayload error
    pub fn invalid_payload(message: impl Into<String>) -> Self {
        Self::InvalidPayload(message.into())
    }

    /// Creates a Placement error
    pub fn placement(message: impl Into<String>) -> Self {
        Self::Placement(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is an UnknownScreen error
    pub fn is_unknown_screen(&self) -> bool {
        matches!(self, Self::UnknownScreen(_))
    }

    /// Check if the caller sent a payload that could not be folded
    pub fn is_payload_error(&self) -> bool {
        matches!(self, Self::PayloadSection { .. } | Self::InvalidPayload(_))
    }

    /// Check if a layout edit was refused
    pub fn is_placement_error(&self) -> bool {
        matches!(self, Self::Placement(_))
    }

    /// Check if this is an IO error
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    /// Check if this is a config error
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for A2sError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for A2sError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for A2sError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for A2sError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from anyhow::Error for binaries handing errors back into the domain
impl From<anyhow::Error> for A2sError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, A2sError>`.
pub type Result<T> = std::result::Result<T, A2sError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion_keeps_kind() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "config.toml");
        let err: A2sError = io.into();
        assert!(err.is_io());
        assert!(err.to_string().contains("NotFound"));
    }

    #[test]
    fn test_payload_errors() {
        let err = A2sError::PayloadSection {
            screen: "room".to_string(),
            payload: "vendor".to_string(),
        };
        assert!(err.is_payload_error());
        assert!(A2sError::invalid_payload("budget must be a number").is_payload_error());
        assert!(!A2sError::unknown_screen("garage").is_payload_error());
    }

    #[test]
    fn test_json_error_is_serialization() {
        let err: A2sError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, A2sError::Serialization { ref format, .. } if format == "JSON"));
    }
}
