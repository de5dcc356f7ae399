//! HTTP routes of the sandbox quotes API.
//!
//! - `GET /stock/market/list/gainers?token=` — top movers, largest change first.
//! - `GET /stock/{symbol}/quote?token=` — latest quote; `404` for unknown symbols.
//! - `GET /stock/{symbol}/logo?token=` — `{"url": ...}`; `404` for unknown symbols.
//!
//! Every route answers `401` when the token is missing or wrong.

use std::sync::{Arc, RwLock, RwLockReadGuard};

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use log::{debug, error, warn};
use serde::Deserialize;
use shares_common::api::{GAINERS_ROUTE, LOGO_ROUTE, QUOTE_ROUTE};
use shares_common::{LogoPayload, Quote, Symbol};

use crate::model::market::Market;

/// Shared state of all handlers.
#[derive(Clone)]
pub struct AppState {
    market: Arc<RwLock<Market>>,
    token: Arc<str>,
    gainers: usize,
}

impl AppState {
    /// `gainers` caps the length of the gainers list.
    pub fn new(market: Arc<RwLock<Market>>, token: &str, gainers: usize) -> Self {
        Self {
            market,
            token: Arc::from(token),
            gainers,
        }
    }

    fn authorize(&self, query: &TokenQuery) -> Result<(), StatusCode> {
        match query.token.as_deref() {
            Some(token) if token == &*self.token => Ok(()),
            _ => {
                warn!("Rejected request with a missing or wrong token");
                Err(StatusCode::UNAUTHORIZED)
            }
        }
    }

    fn market(&self) -> Result<RwLockReadGuard<'_, Market>, StatusCode> {
        self.market.read().map_err(|e| {
            error!("Market lock poisoned: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })
    }
}

/// Query string shared by every route.
#[derive(Debug, Default, Deserialize)]
pub struct TokenQuery {
    token: Option<String>,
}

/// Build the API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(GAINERS_ROUTE, get(gainers))
        .route(QUOTE_ROUTE, get(quote))
        .route(LOGO_ROUTE, get(logo))
        .with_state(state)
}

async fn gainers(
    State(state): State<AppState>,
    Query(query): Query<TokenQuery>,
) -> Result<Json<Vec<Quote>>, StatusCode> {
    state.authorize(&query)?;
    let quotes = state.market()?.gainers(state.gainers);
    debug!("Serving {} gainers", quotes.len());
    Ok(Json(quotes))
}

async fn quote(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(query): Query<TokenQuery>,
) -> Result<Json<Quote>, StatusCode> {
    state.authorize(&query)?;
    let symbol = listed_symbol(&symbol)?;
    state
        .market()?
        .quote(&symbol)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn logo(
    State(state): State<AppState>,
    Path(symbol): Path<String>,
    Query(query): Query<TokenQuery>,
) -> Result<Json<LogoPayload>, StatusCode> {
    state.authorize(&query)?;
    let symbol = listed_symbol(&symbol)?;
    state
        .market()?
        .logo(&symbol)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// A path segment that is not a valid ticker cannot be listed.
fn listed_symbol(raw: &str) -> Result<Symbol, StatusCode> {
    Symbol::parse(raw).map_err(|e| {
        debug!("Unknown symbol: {}", e);
        StatusCode::NOT_FOUND
    })
}
