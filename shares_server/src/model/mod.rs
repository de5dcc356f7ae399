//! Domain models and utilities for the sandbox server.
//!
//! - `market` — listed companies, their prices, and quote/gainers/logo views.
//! - `quote_generator` — background thread that random-walks the prices.

pub mod market;
pub mod quote_generator;
