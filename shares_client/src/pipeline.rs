//! Quote fetch pipeline: one request per call, parsed into domain types.
//!
//! Each operation issues a single `GET`, checks for HTTP 200 and decodes the body.
//! There are no retries; the caller decides how a failure is surfaced.
use std::collections::HashSet;
use std::sync::Arc;

use log::{debug, info, warn};
use shares_common::{ApiEndpoint, Company, Endpoint, GainerEntry, Logo, Quote, SharesError, Symbol};

use crate::transport::{HttpResponse, HttpTransport};

/// Fetches directory, quotes and logos from the quotes API.
pub struct QuoteFetchPipeline {
    transport: Arc<dyn HttpTransport>,
    api: ApiEndpoint,
}

impl QuoteFetchPipeline {
    pub fn new(transport: Arc<dyn HttpTransport>, api: ApiEndpoint) -> Self {
        Self { transport, api }
    }

    pub fn api(&self) -> &ApiEndpoint {
        &self.api
    }

    /// Fetch the gainers list.
    ///
    /// Transport failure, a non-200 status or an undecodable body is a
    /// [`SharesError::Server`]. Rows with an invalid symbol are skipped and
    /// duplicate symbols keep their first occurrence.
    pub fn fetch_directory(&self) -> Result<Vec<Company>, SharesError> {
        let response = self.get(Endpoint::Gainers, &self.api.gainers_url())?;
        if !response.is_ok() {
            return Err(SharesError::Server(format!(
                "gainers returned status {}",
                response.status
            )));
        }

        let entries: Vec<GainerEntry> = serde_json::from_str(&response.body)
            .map_err(|e| SharesError::Server(format!("failed to decode gainers: {}", e)))?;

        let mut seen = HashSet::new();
        let mut companies = Vec::with_capacity(entries.len());
        for entry in entries {
            match Company::try_from(entry) {
                Ok(company) if seen.insert(company.symbol.clone()) => companies.push(company),
                Ok(company) => debug!("Skipping duplicate gainer {}", company.symbol),
                Err(e) => warn!("Skipping gainer: {}", e),
            }
        }
        info!("Fetched {} gainers", companies.len());
        Ok(companies)
    }

    /// Fetch the latest quote for `symbol`.
    ///
    /// Non-200 or transport failure is a [`SharesError::Server`]; a missing or
    /// mistyped `companyName`, `symbol`, `latestPrice` or `change` is a
    /// [`SharesError::Parse`].
    pub fn fetch_quote(&self, symbol: &Symbol) -> Result<Quote, SharesError> {
        let response = self.get(Endpoint::Quote, &self.api.quote_url(symbol))?;
        if !response.is_ok() {
            return Err(SharesError::Server(format!(
                "quote for {} returned status {}",
                symbol, response.status
            )));
        }

        let quote = Quote::from_json(&response.body)?;
        if !quote.is_for(symbol) {
            warn!("Asked for {} but the quote is for {}", symbol, quote.symbol);
        }
        Ok(quote)
    }

    /// Fetch the logo location for `symbol`.
    ///
    /// A non-200 status or a missing `url` is a [`SharesError::ResourceMissing`];
    /// callers fall back to the default logo for every error.
    pub fn fetch_logo(&self, symbol: &Symbol) -> Result<Logo, SharesError> {
        let response = self.get(Endpoint::Logo, &self.api.logo_url(symbol))?;
        if !response.is_ok() {
            return Err(SharesError::ResourceMissing(format!(
                "logo for {} returned status {}",
                symbol, response.status
            )));
        }
        Logo::from_json(&response.body, symbol)
    }

    fn get(&self, endpoint: Endpoint, url: &str) -> Result<HttpResponse, SharesError> {
        debug!("GET {} from {}", endpoint, self.api.base_url());
        self.transport.get(url)
    }
}
