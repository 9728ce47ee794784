//! Error types and handling for `OfficeMap`

use thiserror::Error;

/// Main error type for the `OfficeMap` application
#[derive(Error, Debug)]
pub enum OfficeMapError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Routing service errors
    #[error("Routing error: {message}")]
    Routing { message: String },

}

impl OfficeMapError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new routing error
    pub fn routing<S: Into<String>>(message: S) -> Self {
        Self::Routing {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            OfficeMapError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            OfficeMapError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            OfficeMapError::Routing { .. } => {
                "Unable to reach the routing service. Please check your connection and API key."
                    .to_string()
            }
        }
    }
}

/// Message shown to the user when a command fails.
///
/// Errors that carry an `OfficeMapError` anywhere in their chain get its
/// friendly message, anything else is printed with its full context.
#[must_use]
pub fn user_message_for(error: &anyhow::Error) -> String {
    match error.downcast_ref::<OfficeMapError>() {
        Some(error) => error.user_message(),
        None => format!("{error:#}"),
    }
}
