//! Shared API routes and URL helpers used by client and server.

use strum_macros::Display;

use crate::company::Symbol;

/// Default base URL the client talks to (the local sandbox).
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";
/// Query parameter carrying the API token.
pub const TOKEN_PARAM: &str = "token";
/// Route of the gainers list.
pub const GAINERS_ROUTE: &str = "/stock/market/list/gainers";
/// Route template of the quote endpoint (axum path syntax).
pub const QUOTE_ROUTE: &str = "/stock/{symbol}/quote";
/// Route template of the logo endpoint (axum path syntax).
pub const LOGO_ROUTE: &str = "/stock/{symbol}/logo";

/// The three endpoints of the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Endpoint {
    /// Top gainers list.
    Gainers,
    /// Per-symbol quote.
    Quote,
    /// Per-symbol logo.
    Logo,
}

/// Base URL plus token, producing fully qualified request URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoint {
    base_url: String,
    token: String,
}

impl ApiEndpoint {
    /// Creates an endpoint; a trailing `/` on `base_url` is ignored.
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            token: token.trim().to_string(),
        }
    }

    /// Base URL without the trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the gainers list.
    pub fn gainers_url(&self) -> String {
        self.with_token(GAINERS_ROUTE)
    }

    /// URL of the quote for `symbol`.
    pub fn quote_url(&self, symbol: &Symbol) -> String {
        self.with_token(&route_for(QUOTE_ROUTE, symbol))
    }

    /// URL of the logo for `symbol`.
    pub fn logo_url(&self, symbol: &Symbol) -> String {
        self.with_token(&route_for(LOGO_ROUTE, symbol))
    }

    fn with_token(&self, path: &str) -> String {
        format!(
            "{}{}?{}={}",
            self.base_url,
            path,
            TOKEN_PARAM,
            urlencoding::encode(&self.token)
        )
    }
}

fn route_for(template: &str, symbol: &Symbol) -> String {
    template.replace("{symbol}", &urlencoding::encode(symbol.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_urls_with_token() {
        let api = ApiEndpoint::new("https://cloud.iexapis.com/stable/", "pk_123");
        let symbol = Symbol::parse("aapl").expect("symbol");

        assert_eq!(
            api.gainers_url(),
            "https://cloud.iexapis.com/stable/stock/market/list/gainers?token=pk_123"
        );
        assert_eq!(
            api.quote_url(&symbol),
            "https://cloud.iexapis.com/stable/stock/AAPL/quote?token=pk_123"
        );
        assert_eq!(
            api.logo_url(&symbol),
            "https://cloud.iexapis.com/stable/stock/AAPL/logo?token=pk_123"
        );
    }

    #[test]
    fn token_is_url_encoded() {
        let api = ApiEndpoint::new(DEFAULT_BASE_URL, "a b&c");
        assert!(api.gainers_url().ends_with("?token=a%20b%26c"));
    }

    #[test]
    fn endpoint_names_are_lowercase() {
        assert_eq!(Endpoint::Quote.to_string(), "quote");
        assert_eq!(Endpoint::Gainers.to_string(), "gainers");
    }
}
