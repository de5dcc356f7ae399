//! Shares — a terminal quote viewer. It shows a directory of companies, lets the
//! user pick one, and displays its latest quote and logo fetched from the quotes
//! API. A background monitor watches the API host; losing it raises a banner and
//! regaining it refetches the gainers directory.
//!
//! Usage example (CLI):
//! ```bash
//! shares --base-url http://127.0.0.1:8080 --token sandbox --directory gainers
//! shares --directory file --companies ./companies.txt
//! ```
//!
//! The companies file holds one `SYMBOL,Name` per line.
//! See `shares_common::company` for details.
#![warn(missing_docs)]
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::time::Duration;

use clap::Parser;
use crossbeam_channel::unbounded;
use log::{info, warn};
use shares_client::args::{Args, DirectoryMode};
use shares_client::connectivity::{ConnectivityMonitor, TcpProbe};
use shares_client::coordinator::{Coordinator, Event};
use shares_client::input::InputReader;
use shares_client::model::directory::{CompanyDirectory, DirectorySource};
use shares_client::pipeline::QuoteFetchPipeline;
use shares_client::transport::ReqwestTransport;
use shares_client::view::TerminalView;
use shares_common::{ApiEndpoint, Result, SharesError};

fn main() -> Result<()> {
    init_logger();
    let args = Args::parse();

    let (events_tx, events_rx) = unbounded::<Event>();
    {
        let events = events_tx.clone();
        ctrlc::set_handler(move || {
            info!("Ctrl+C received. Shutting down client...");
            let _ = events.send(Event::Shutdown);
        })
        .map_err(|e| SharesError::Config(format!("Error setting Ctrl+C handler: {}", e)))?;
    }

    let (source, directory) = load_directory(&args)?;
    let timeout = Duration::from_millis(args.timeout_ms);
    let api = ApiEndpoint::new(&args.base_url, &args.token);
    let transport = ReqwestTransport::new(timeout)?;
    let pipeline = Arc::new(QuoteFetchPipeline::new(Arc::new(transport), api));
    info!("Quotes API: {}", pipeline.api().base_url());

    let shutdown = Arc::new(AtomicBool::new(false));
    let probe = TcpProbe::from_base_url(&args.base_url, timeout)?;
    info!("Probing {}", probe.target());
    ConnectivityMonitor::start(
        probe,
        Duration::from_millis(args.probe_interval_ms),
        events_tx.clone(),
        shutdown.clone(),
    );
    InputReader::spawn(BufReader::new(io::stdin()), events_tx.clone());

    let coordinator = Coordinator::new(
        pipeline,
        source,
        directory,
        TerminalView::stdout(),
        events_tx,
    );
    coordinator.run(events_rx);

    shutdown.store(true, Ordering::SeqCst);
    info!("Client stopped.");
    Ok(())
}

/// Build the initial directory for the selected mode.
///
/// The gainers directory starts empty and is filled once the server is reachable.
fn load_directory(args: &Args) -> Result<(DirectorySource, CompanyDirectory)> {
    match args.directory {
        DirectoryMode::Builtin => Ok((DirectorySource::Static, CompanyDirectory::builtin())),
        DirectoryMode::Gainers => Ok((DirectorySource::Gainers, CompanyDirectory::default())),
        DirectoryMode::File => {
            let raw = args.companies.as_deref().ok_or_else(|| {
                SharesError::Config(String::from("--directory file requires --companies <PATH>"))
            })?;
            let file_path = normalize_path(raw);
            if !is_file_exist(&file_path) {
                return Err(SharesError::Config(format!(
                    "companies file {} does not exist",
                    file_path.display()
                )));
            }
            let directory = CompanyDirectory::from_reader(BufReader::new(File::open(&file_path)?))?;
            if directory.is_empty() {
                warn!("Companies file {} lists no companies", file_path.display());
            }
            info!("Loaded {} companies from {}", directory.len(), file_path.display());
            Ok((DirectorySource::Static, directory))
        }
    }
}

fn init_logger() {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();
}

/// Normalize a CLI-provided path string by trimming whitespace and matching quotes.
///
/// This allows passing Windows paths in quotes without breaking parsing.
fn normalize_path(raw: &str) -> PathBuf {
    let trimmed = raw.trim();
    let no_quotes = trimmed
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .unwrap_or(trimmed);
    PathBuf::from(no_quotes)
}

/// Returns `true` if the provided path exists and is a regular file.
fn is_file_exist(path: &PathBuf) -> bool {
    path.exists() && path.is_file()
}
