//! In-memory market backing the sandbox endpoints.
//!
//! Each listing keeps its opening price and its latest price. The change shown
//! in quotes is measured against the opening price, so gainers are ranked by
//! how far a price has moved since the server started.

use chrono::Utc;
use rand::Rng;
use shares_common::{Company, LogoPayload, Quote, Symbol};

/// Lowest price a random walk may reach.
const MIN_PRICE: f64 = 0.01;
/// Largest relative move per tick.
const MAX_STEP: f64 = 0.01;
const LOGO_BASE_URL: &str = "https://storage.googleapis.com/iexcloud-hl37opg/api/logos";

/// One listed company.
#[derive(Debug, Clone)]
pub struct Listing {
    /// Ticker and display name.
    pub company: Company,
    /// Price at startup; the reference for `change`.
    pub open: f64,
    /// Latest price.
    pub price: f64,
    /// Time of the last price update, ms since the UNIX epoch.
    pub updated_at: i64,
    /// Whether the logo endpoint has an image for this company.
    pub has_logo: bool,
}

/// All listings, in listing order.
#[derive(Debug, Clone, Default)]
pub struct Market {
    listings: Vec<Listing>,
}

impl Market {
    /// Create a market from `(company, opening price, has logo)` rows.
    pub fn new(rows: Vec<(Company, f64, bool)>) -> Self {
        let now = Utc::now().timestamp_millis();
        let listings = rows
            .into_iter()
            .map(|(company, open, has_logo)| Listing {
                company,
                open,
                price: open,
                updated_at: now,
                has_logo,
            })
            .collect();
        Self { listings }
    }

    /// The default sandbox universe: the built-in companies plus a few volatile names.
    ///
    /// Iconix has no logo so clients exercise their fallback.
    pub fn sandbox() -> Self {
        let opening = [131.96, 242.01, 1835.74, 3206.2, 258.33, 6.1];
        let mut rows: Vec<(Company, f64, bool)> = Company::builtin()
            .into_iter()
            .zip(opening)
            .map(|(company, open)| {
                let has_logo = company.symbol.as_str() != "ICON";
                (company, open, has_logo)
            })
            .collect();

        for (symbol, name, open) in [
            ("NVDA", "NVIDIA Corporation", 519.75),
            ("TSLA", "Tesla Inc", 793.53),
            ("NFLX", "Netflix Inc", 532.39),
            ("AMD", "Advanced Micro Devices Inc", 85.64),
            ("PLTR", "Palantir Technologies Inc", 25.79),
            ("NIO", "NIO Inc", 56.33),
        ] {
            if let Ok(symbol) = Symbol::parse(symbol) {
                rows.push((Company::new(symbol, name), open, true));
            }
        }
        Self::new(rows)
    }

    /// Calculate the next price using a small random walk around `current_price`.
    ///
    /// The change is sampled uniformly from `[-1%, +1%)` and the result is clamped
    /// to a minimum positive value.
    pub fn next_price<R: Rng + ?Sized>(rng: &mut R, current_price: f64) -> f64 {
        let change: f64 = rng.random_range(-MAX_STEP..MAX_STEP);
        let new_price = current_price * (1.0 + change);
        new_price.max(MIN_PRICE)
    }

    /// Move every price one step.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let now = Utc::now().timestamp_millis();
        for listing in &mut self.listings {
            listing.price = Self::next_price(rng, listing.price);
            listing.updated_at = now;
        }
    }

    /// Number of listings.
    pub fn len(&self) -> usize {
        self.listings.len()
    }

    /// `true` when nothing is listed.
    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }

    /// Listing for `symbol`.
    pub fn listing(&self, symbol: &Symbol) -> Option<&Listing> {
        self.listings
            .iter()
            .find(|listing| listing.company.symbol == *symbol)
    }

    /// Quote for `symbol`.
    pub fn quote(&self, symbol: &Symbol) -> Option<Quote> {
        self.listing(symbol).map(to_quote)
    }

    /// Up to `limit` quotes that are up since the open, largest change percent first.
    pub fn gainers(&self, limit: usize) -> Vec<Quote> {
        let mut quotes: Vec<Quote> = self
            .listings
            .iter()
            .map(to_quote)
            .filter(|quote| quote.change_percent.is_some_and(|pct| pct > 0.0))
            .collect();
        quotes.sort_by(|a, b| {
            let a = a.change_percent.unwrap_or(0.0);
            let b = b.change_percent.unwrap_or(0.0);
            b.total_cmp(&a)
        });
        quotes.truncate(limit);
        quotes
    }

    #[cfg(test)]
    pub(crate) fn set_price(&mut self, symbol: &Symbol, price: f64) {
        if let Some(listing) = self
            .listings
            .iter_mut()
            .find(|listing| listing.company.symbol == *symbol)
        {
            listing.price = price;
        }
    }

    /// Logo body for `symbol`; `url` is `None` when the company has no logo.
    pub fn logo(&self, symbol: &Symbol) -> Option<LogoPayload> {
        self.listing(symbol).map(|listing| LogoPayload {
            url: listing
                .has_logo
                .then(|| format!("{}/{}.png", LOGO_BASE_URL, listing.company.symbol)),
        })
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn to_quote(listing: &Listing) -> Quote {
    let change = listing.price - listing.open;
    let change_percent = if listing.open > 0.0 {
        Some((change / listing.open * 10_000.0).round() / 10_000.0)
    } else {
        None
    };
    Quote {
        symbol: listing.company.symbol.to_string(),
        company_name: listing.company.name.clone(),
        price: round2(listing.price),
        change: round2(change),
        change_percent,
        latest_update: Some(listing.updated_at),
    }
}
