//! Result type alias shared across the workspace.
//!
//! This module defines a convenient alias that defaults the error type to the
//! common `SharesError`, so functions can simply return `Result<T>`.
use crate::error::SharesError;

/// Workspace-wide `Result` alias with `SharesError` as the default error.
pub type Result<T, E = SharesError> = std::result::Result<T, E>;
