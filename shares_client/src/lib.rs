//! Shares client — a single-screen quote viewer.
//!
//! The user picks a company from a directory and sees its latest quote and logo.
//! The crate is organised as:
//!
//! - `transport` — blocking HTTP `GET` behind the `HttpTransport` trait.
//! - `pipeline` — `QuoteFetchPipeline`: directory, quote and logo requests.
//! - `connectivity` — reachability probing and the background monitor.
//! - `coordinator` — the single owner of the screen state and its event loop.
//! - `view` — screen state, quote formatting and the terminal renderer.
//! - `input` — stdin commands.
//! - `model` — the company directory.
//! - `args` — command-line arguments.
pub mod args;
pub mod connectivity;
pub mod coordinator;
pub mod input;
pub mod model;
pub mod pipeline;
pub mod transport;
pub mod view;
