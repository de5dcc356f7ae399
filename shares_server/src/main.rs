//! Sandbox quotes API server.
//!
//! Serves the gainers, quote and logo endpoints the `shares` client reads, backed
//! by an in-memory market whose prices random-walk in a background thread.
//!
//! - `QuoteGenerator` — moves every price one step per tick.
//! - `routes` — `axum` handlers; each checks the `token` query parameter.
//!
//! Usage example (CLI):
//! ```bash
//! shares_server --bind 127.0.0.1:8080 --token sandbox --tick-ms 250
//! ```
//!
//! Ctrl+C stops the listener gracefully and then the generator thread.
#![warn(missing_docs)]
use std::sync::{
    Arc, RwLock,
    atomic::{AtomicBool, Ordering},
};
use std::time::Duration;

use clap::Parser;
use log::{error, info, warn};
use shares_common::Result;

use crate::args::Args;
use crate::model::market::Market;
use crate::model::quote_generator::QuoteGenerator;
use crate::routes::AppState;

mod args;
pub mod model;
mod routes;

#[tokio::main]
async fn main() -> Result<()> {
    init_logger();
    let args = Args::parse();

    let market = Arc::new(RwLock::new(Market::sandbox()));
    log_listings(&market);

    let shutdown = Arc::new(AtomicBool::new(false));
    let generator = QuoteGenerator::start(
        market.clone(),
        Duration::from_millis(args.tick_ms),
        shutdown.clone(),
    );

    let state = AppState::new(market, &args.token, args.gainers);
    let listener = tokio::net::TcpListener::bind(args.bind.as_str()).await?;
    info!("Quotes API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, routes::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    shutdown.store(true, Ordering::SeqCst);
    if generator.join().is_err() {
        error!("Market generator panicked");
    }
    info!("Server stopped.");
    Ok(())
}

fn log_listings(market: &RwLock<Market>) {
    match market.read() {
        Ok(market) if market.is_empty() => warn!("Market opened with no listings"),
        Ok(market) => info!("Market opened with {} listings", market.len()),
        Err(e) => error!("Market lock poisoned: {}", e),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Error waiting for Ctrl+C: {}", e);
        return;
    }
    info!("Ctrl+C received. Shutting down server...");
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}
