//! The coordinator owns every piece of mutable state of the screen.
//!
//! It runs on a single thread and consumes `Event`s from one channel. User input,
//! the connectivity monitor and the fetch workers all post into that channel, so
//! the directory, the connectivity flag, the current selection and the rendered
//! screen are only ever touched here.
//!
//! Each selection gets a fresh generation number and a `CancelToken`. Selecting
//! again trips the previous token, and any result whose generation is not the
//! current one is discarded, so a slow response for an old symbol can never
//! overwrite a newer one.
use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};
use std::thread;

use crossbeam_channel::{Receiver, Sender};
use log::{debug, error, info, warn};
use shares_common::{Company, Logo, Quote, SharesError, Symbol};

use crate::connectivity::ConnectivityState;
use crate::model::directory::{CompanyDirectory, DirectorySource};
use crate::pipeline::QuoteFetchPipeline;
use crate::view::{Banner, LogoView, Screen, View, render_quote};

/// Everything the coordinator reacts to.
#[derive(Debug)]
pub enum Event {
    /// Select a 0-based directory row.
    SelectRow(usize),
    /// Select a company by ticker.
    SelectSymbol(Symbol),
    /// Print the directory again.
    ShowDirectory,
    /// Refetch the directory now.
    RefreshDirectory,
    /// Posted by the connectivity monitor.
    Connectivity(ConnectivityState),
    /// Result of a directory fetch.
    DirectoryLoaded {
        generation: u64,
        result: Result<Vec<Company>, SharesError>,
    },
    /// Result of a quote fetch for a selection generation.
    QuoteLoaded {
        generation: u64,
        result: Result<Quote, SharesError>,
    },
    /// Result of a logo fetch for a selection generation.
    LogoLoaded {
        generation: u64,
        result: Result<Logo, SharesError>,
    },
    /// Stop the event loop.
    Shutdown,
}

/// Cancellation flag shared between the coordinator and the workers of one selection.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
struct Selection {
    symbol: Symbol,
    generation: u64,
    token: CancelToken,
}

/// Single owner of the screen state.
pub struct Coordinator<V: View> {
    pipeline: Arc<QuoteFetchPipeline>,
    source: DirectorySource,
    directory: CompanyDirectory,
    connectivity: ConnectivityState,
    selection: Option<Selection>,
    generation: u64,
    directory_generation: u64,
    /// Token of the directory fetch in flight, if any.
    directory_fetch: Option<CancelToken>,
    screen: Screen,
    view: V,
    events: Sender<Event>,
}

impl<V: View> Coordinator<V> {
    /// `events` is the sending half of the channel passed to [`Coordinator::run`];
    /// workers post their results through it.
    pub fn new(
        pipeline: Arc<QuoteFetchPipeline>,
        source: DirectorySource,
        directory: CompanyDirectory,
        view: V,
        events: Sender<Event>,
    ) -> Self {
        Self {
            pipeline,
            source,
            directory,
            connectivity: ConnectivityState::Unreachable,
            selection: None,
            generation: 0,
            directory_generation: 0,
            directory_fetch: None,
            screen: Screen::default(),
            view,
            events,
        }
    }

    /// Consume events until `Shutdown`.
    pub fn run(mut self, events: Receiver<Event>) {
        if !self.directory.is_empty() {
            self.view.show_directory(self.directory.companies());
        }
        for event in events.iter() {
            if !self.handle(event) {
                break;
            }
        }
        info!("Coordinator stopping...");
        if let Some(selection) = self.selection.take() {
            selection.token.cancel();
        }
        if let Some(token) = self.directory_fetch.take() {
            token.cancel();
        }
    }

    /// Apply one event; returns `false` once the loop should stop.
    pub fn handle(&mut self, event: Event) -> bool {
        match event {
            Event::SelectRow(row) => match self.directory.row(row).cloned() {
                Some(company) => self.select(company),
                None => warn!(
                    "Row {} does not exist; the directory has {} rows",
                    row + 1,
                    self.directory.len()
                ),
            },
            Event::SelectSymbol(symbol) => match self.directory.find(&symbol).cloned() {
                Some(company) => self.select(company),
                None => warn!("{} is not in the directory", symbol),
            },
            Event::ShowDirectory => self.view.show_directory(self.directory.companies()),
            Event::RefreshDirectory => self.refresh_directory(),
            Event::Connectivity(state) => self.on_connectivity(state),
            Event::DirectoryLoaded { generation, result } => {
                self.on_directory_loaded(generation, result)
            }
            Event::QuoteLoaded { generation, result } => self.on_quote_loaded(generation, result),
            Event::LogoLoaded { generation, result } => self.on_logo_loaded(generation, result),
            Event::Shutdown => return false,
        }
        true
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn directory(&self) -> &CompanyDirectory {
        &self.directory
    }

    pub fn connectivity(&self) -> ConnectivityState {
        self.connectivity
    }

    pub fn selected(&self) -> Option<&Symbol> {
        self.selection.as_ref().map(|selection| &selection.symbol)
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    fn select(&mut self, company: Company) {
        if self.connectivity == ConnectivityState::Unreachable {
            warn!("Not requesting {}: network unreachable", company.symbol);
            self.screen.banner = Some(Banner::NetworkUnreachable);
            self.redraw();
            return;
        }

        if let Some(previous) = self.selection.take() {
            previous.token.cancel();
        }
        self.generation += 1;
        let generation = self.generation;
        let token = CancelToken::new();
        info!("Selected {} ({})", company.symbol, company.name);

        self.screen.reset_for_request();
        self.selection = Some(Selection {
            symbol: company.symbol.clone(),
            generation,
            token: token.clone(),
        });
        self.redraw();

        let symbol = company.symbol.clone();
        self.spawn_worker(
            token.clone(),
            move |pipeline| pipeline.fetch_quote(&symbol),
            move |result| Event::QuoteLoaded { generation, result },
        );
        let symbol = company.symbol;
        self.spawn_worker(
            token,
            move |pipeline| pipeline.fetch_logo(&symbol),
            move |result| Event::LogoLoaded { generation, result },
        );
    }

    fn refresh_directory(&mut self) {
        match self.source {
            DirectorySource::Static => {
                debug!("Static directory; nothing to refetch");
                self.select_first_if_idle();
            }
            DirectorySource::Gainers => {
                if self.directory_fetch.is_some() {
                    debug!("Directory fetch already in flight");
                    return;
                }
                if self.connectivity == ConnectivityState::Unreachable {
                    warn!("Not fetching the directory: network unreachable");
                    return;
                }
                self.directory_generation += 1;
                let generation = self.directory_generation;
                let token = CancelToken::new();
                self.directory_fetch = Some(token.clone());
                info!("Fetching the gainers directory");
                self.spawn_worker(
                    token,
                    |pipeline| pipeline.fetch_directory(),
                    move |result| Event::DirectoryLoaded { generation, result },
                );
            }
        }
    }

    fn on_connectivity(&mut self, state: ConnectivityState) {
        let previous = self.connectivity;
        self.connectivity = state;
        match state {
            ConnectivityState::Unreachable => {
                warn!("Quotes server is unreachable");
                // A fetch started before the outage cannot be trusted to finish.
                if let Some(token) = self.directory_fetch.take() {
                    debug!("Abandoning the directory fetch in flight");
                    token.cancel();
                }
                self.screen.banner = Some(Banner::NetworkUnreachable);
                self.redraw();
            }
            ConnectivityState::Reachable if previous == ConnectivityState::Reachable => {}
            ConnectivityState::Reachable => {
                info!("Quotes server is reachable");
                if self.screen.banner == Some(Banner::NetworkUnreachable) {
                    self.screen.banner = None;
                    self.redraw();
                }
                self.refresh_directory();
            }
        }
    }

    fn on_directory_loaded(&mut self, generation: u64, result: Result<Vec<Company>, SharesError>) {
        if generation != self.directory_generation || self.directory_fetch.is_none() {
            debug!("Discarding stale directory (generation {})", generation);
            return;
        }
        self.directory_fetch = None;
        match result {
            Ok(companies) => {
                self.directory = CompanyDirectory::new(companies);
                info!("Directory loaded: {} companies", self.directory.len());
                self.view.show_directory(self.directory.companies());
                self.select_first_if_idle();
            }
            Err(e) => error!("Directory fetch failed: {}", e),
        }
    }

    fn on_quote_loaded(&mut self, generation: u64, result: Result<Quote, SharesError>) {
        if !self.is_current(generation) {
            debug!("Discarding stale quote (generation {})", generation);
            return;
        }

        self.screen.busy = false;
        match result {
            Ok(quote) => self.screen.show_quote(render_quote(&quote)),
            Err(e) => {
                error!("Quote request failed: {}", e);
                self.screen.banner = Some(Banner::for_quote_error(&e));
            }
        }
        self.redraw();
    }

    fn on_logo_loaded(&mut self, generation: u64, result: Result<Logo, SharesError>) {
        if !self.is_current(generation) {
            debug!("Discarding stale logo (generation {})", generation);
            return;
        }

        self.screen.logo = match result {
            Ok(logo) => LogoView::Remote(logo.url),
            Err(SharesError::ResourceMissing(reason)) => {
                info!("Using the default logo: {}", reason);
                LogoView::Default
            }
            Err(e) => {
                warn!("Logo request failed, using the default logo: {}", e);
                LogoView::Default
            }
        };
        self.redraw();
    }

    fn select_first_if_idle(&mut self) {
        if self.selection.is_some() {
            return;
        }
        if let Some(company) = self.directory.row(0).cloned() {
            self.select(company);
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.selection
            .as_ref()
            .is_some_and(|selection| selection.generation == generation)
    }

    fn redraw(&mut self) {
        self.view.draw(&self.screen);
    }

    /// Run `fetch` on a worker thread and post `wrap(result)` unless `token` was
    /// cancelled meanwhile.
    fn spawn_worker<T, F, W>(&self, token: CancelToken, fetch: F, wrap: W)
    where
        T: Send + 'static,
        F: FnOnce(&QuoteFetchPipeline) -> T + Send + 'static,
        W: FnOnce(T) -> Event + Send + 'static,
    {
        let pipeline = Arc::clone(&self.pipeline);
        let events = self.events.clone();
        thread::spawn(move || {
            if token.is_cancelled() {
                return;
            }
            let result = fetch(&pipeline);
            if token.is_cancelled() {
                debug!("Selection changed; dropping a finished request");
                return;
            }
            if events.send(wrap(result)).is_err() {
                debug!("Event channel closed; dropping a finished request");
            }
        });
    }
}
