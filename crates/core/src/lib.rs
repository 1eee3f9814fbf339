//! Shared primitives for all Rust crates in the PPE portal.

#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type used across PPE portal crates.
pub type AppResult<T> = Result<T, AppError>;

/// A validated non-empty UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AppError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for NonEmptyString {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input caught before any network call.
    #[error("validation error: {0}")]
    Validation(String),

    /// HTTP verb not accepted by an endpoint.
    #[error("method not allowed: {0}")]
    MethodNotAllowed(String),

    /// Request body larger than an endpoint accepts.
    #[error("payload too large: {0}")]
    PayloadTooLarge(String),

    /// Network failure reaching the gateway or the backend.
    #[error("transport error: {0}")]
    Transport(String),

    /// Remote side answered with something other than the agreed JSON.
    #[error("protocol error: {message}")]
    Protocol {
        /// Human readable failure summary.
        message: String,
        /// Raw response text kept for diagnostics.
        raw: String,
    },

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the error message without its category prefix.
    #[must_use]
    pub fn detail(&self) -> &str {
        match self {
            Self::Validation(message)
            | Self::MethodNotAllowed(message)
            | Self::PayloadTooLarge(message)
            | Self::Transport(message)
            | Self::Internal(message) => message.as_str(),
            Self::Protocol { message, .. } => message.as_str(),
        }
    }

    /// Returns the raw response excerpt for protocol errors.
    #[must_use]
    pub fn raw(&self) -> Option<&str> {
        match self {
            Self::Protocol { raw, .. } => Some(raw.as_str()),
            _ => None,
        }
    }
}
