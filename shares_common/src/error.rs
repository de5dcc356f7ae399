//! Error types shared between client and server.
//!
//! The `SharesError` enum covers the failure taxonomy of a quote request
//! (unreachable network, server failure, malformed payload, missing resource)
//! together with the I/O and serialization failures of the plumbing
//! around it, so every crate can propagate a single error type.
use std::io;

use thiserror::Error;

/// Unified error type shared by client and server.
#[derive(Error, Debug)]
pub enum SharesError {
    /// The API host could not be reached; no request was issued.
    #[error("Network is unreachable")]
    NetworkUnreachable,

    /// Transport failure or a non-200 status from the API.
    #[error("Server error: {0}")]
    Server(String),

    /// The response body is malformed or misses a required field.
    #[error("Parse error: {0}")]
    Parse(String),

    /// An optional resource (such as a logo) is not available.
    #[error("Resource missing: {0}")]
    ResourceMissing(String),

    /// A ticker symbol failed validation.
    #[error("Invalid symbol '{value}': {reason}")]
    InvalidSymbol {
        /// Offending input.
        value: String,
        /// What rule it broke.
        reason: String,
    },

    /// A line of a companies file could not be parsed.
    #[error("Parse companies file error at line {line}: {message}")]
    ParseCompanies {
        /// 1-based line number.
        line: usize,
        /// Human-readable description.
        message: String,
    },

    /// I/O error originating from the standard library or sockets/files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// Invalid configuration such as a malformed base URL.
    #[error("Configuration error: {0}")]
    Config(String),
}
