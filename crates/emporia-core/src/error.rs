//! Error types for Emporia operations.
//!
//! This module provides a common `Error` type and `Result<T>` alias used across
//! all Emporia crates. Uses `thiserror` for derive macros.
//!
//! The taxonomy mirrors the failure classes the gateway distinguishes:
//! transport failures (no response received), server-reported failures
//! (a response carrying an error message), authentication rejections, and
//! decode failures (a response that does not match the typed contract).

use thiserror::Error;

/// Errors that can occur in Emporia operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Network/transport failure; no response was received.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The server answered with an error status and message.
    #[error("API error {status}: {message}")]
    Api {
        /// HTTP status code reported by the server.
        status: u16,
        /// Error message extracted from the response body, or the
        /// canonical status reason when the body carried none.
        message: String,
    },

    /// Authentication rejected (the transport maps 401 responses here).
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// A response body did not match the typed contract.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error (token storage).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a server-reported error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create an authentication error.
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    /// Create a decode error.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// True if this failure is an authentication rejection.
    ///
    /// Covers both the dedicated [`Error::Auth`] variant and a raw
    /// 401 surfaced as a server-reported error.
    pub fn is_auth(&self) -> bool {
        match self {
            Self::Auth(_) => true,
            Self::Api { status, .. } => *status == 401,
            _ => false,
        }
    }

    /// HTTP status code, when the server reported one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type alias using Emporia's Error type.
pub type Result<T> = std::result::Result<T, Error>;
