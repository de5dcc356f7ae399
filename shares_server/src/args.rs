//! Command-line arguments of the sandbox server.

use clap::Parser;

/// Sandbox quotes API with a random-walk market.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Address to listen on.
    #[clap(long, default_value = "0.0.0.0:8080")]
    pub bind: String,

    /// Token every request must carry in its `token` query parameter.
    #[clap(long, default_value = "sandbox")]
    pub token: String,

    /// Maximum number of entries in the gainers list.
    #[clap(long, default_value_t = 10)]
    pub gainers: usize,

    /// Interval between price updates, in milliseconds.
    #[clap(long, default_value_t = 500)]
    pub tick_ms: u64,
}
