// src/error.rs

//! Unified error handling for the absolutify crate.

use std::fmt;

use thiserror::Error;

/// Result type alias for absolutify operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing or joining failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Attribute value is not a valid URI reference
    #[error("Invalid reference '{reference}': {message}")]
    Reference { reference: String, message: String },

    /// A merge was needed but no usable base URL is available
    #[error("No usable base URL to resolve against")]
    MissingBase,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create an invalid reference error.
    pub fn reference(reference: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Reference {
            reference: reference.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
