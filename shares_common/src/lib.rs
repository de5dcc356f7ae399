//!
//! Common types and utilities shared by the shares client and sandbox server.
//!
//! This crate aggregates:
//! - `error` — unified error type `SharesError` used across the workspace.
//! - `result` — handy `Result<T, SharesError>` alias.
//! - `company` — ticker symbols, companies and the directory file parser.
//! - `quote` — quote, logo and gainers payloads exchanged over HTTP.
//! - `api` — endpoint routes and URL building.
#![warn(missing_docs)]
pub mod api;
pub mod company;
pub mod error;
pub mod quote;
pub mod result;

pub use api::{ApiEndpoint, Endpoint};
pub use company::{Company, Symbol};
pub use error::SharesError;
pub use quote::{GainerEntry, Logo, LogoPayload, Quote};
pub use result::Result;
