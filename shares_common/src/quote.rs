//! Quote, logo and gainers payloads.
//!
//! These are the JSON bodies of the three API endpoints. Field names on the wire
//! are camelCase; the server encodes them and the client decodes them with
//! `serde_json`, so a missing or mistyped required field fails decoding.

use serde::{Deserialize, Serialize};

use crate::company::{Company, Symbol};
use crate::error::SharesError;

/// Latest quote for a single company.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Ticker as the server spells it; not validated.
    pub symbol: String,
    /// Company display name.
    pub company_name: String,
    /// Last traded price.
    #[serde(rename = "latestPrice")]
    pub price: f64,
    /// Absolute change against the previous close.
    pub change: f64,
    /// Relative change against the previous close, as a fraction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_percent: Option<f64>,
    /// Time of the last update in milliseconds since the UNIX epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_update: Option<i64>,
}

impl Quote {
    /// Decode a quote body.
    ///
    /// Any decoding failure is a [`SharesError::Parse`].
    pub fn from_json(body: &str) -> Result<Quote, SharesError> {
        serde_json::from_str(body).map_err(|e| SharesError::Parse(format!("quote: {e}")))
    }

    /// `true` when the quote is for `symbol`, ignoring case and padding.
    pub fn is_for(&self, symbol: &Symbol) -> bool {
        self.symbol.trim().eq_ignore_ascii_case(symbol.as_str())
    }
}

/// Body of the logo endpoint. `url` may be absent or empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoPayload {
    /// Location of the logo image.
    #[serde(default)]
    pub url: Option<String>,
}

/// A logo that is known to exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Logo {
    /// Location of the logo image.
    pub url: String,
}

impl Logo {
    /// Decode a logo body.
    ///
    /// Malformed JSON is a [`SharesError::Parse`]; a missing or blank `url` is a
    /// [`SharesError::ResourceMissing`].
    pub fn from_json(body: &str, symbol: &Symbol) -> Result<Logo, SharesError> {
        let payload: LogoPayload =
            serde_json::from_str(body).map_err(|e| SharesError::Parse(format!("logo: {e}")))?;

        match payload.url {
            Some(url) if !url.trim().is_empty() => Ok(Logo { url }),
            _ => Err(SharesError::ResourceMissing(format!("no logo url for {symbol}"))),
        }
    }
}

/// One row of the gainers list as the client reads it.
///
/// The server sends full quote objects; only these two fields are used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GainerEntry {
    /// Raw ticker, validated when converted into a [`Company`].
    pub symbol: String,
    /// Company name; some listings omit it.
    #[serde(default)]
    pub company_name: Option<String>,
}

impl TryFrom<GainerEntry> for Company {
    type Error = SharesError;

    fn try_from(entry: GainerEntry) -> Result<Self, Self::Error> {
        let symbol = Symbol::parse(&entry.symbol)?;
        let name = match entry.company_name {
            Some(name) if !name.trim().is_empty() => name,
            _ => symbol.to_string(),
        };
        Ok(Company::new(symbol, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aapl() -> Symbol {
        Symbol::parse("AAPL").expect("symbol")
    }

    #[test]
    fn decodes_quote_and_ignores_extra_fields() {
        let body = r#"{"symbol":"AAPL","companyName":"Apple Inc","latestPrice":132.05,
            "change":-1.5,"latestUpdate":1612000000000,"peRatio":35.2}"#;
        let quote = Quote::from_json(body).expect("quote decodes");

        assert_eq!(quote.symbol, "AAPL");
        assert!(quote.is_for(&aapl()));
        assert_eq!(quote.company_name, "Apple Inc");
        assert_eq!(quote.price, 132.05);
        assert_eq!(quote.change, -1.5);
        assert_eq!(quote.change_percent, None);
        assert_eq!(quote.latest_update, Some(1_612_000_000_000));
    }

    #[test]
    fn unusual_tickers_still_decode() {
        let body = r#"{"symbol":"brk/a ","companyName":"Berkshire","latestPrice":1.0,"change":0}"#;
        let quote = Quote::from_json(body).expect("quote decodes");
        assert_eq!(quote.symbol, "brk/a ");
        assert!(!quote.is_for(&aapl()));

        let body = r#"{"symbol":" aapl","companyName":"Apple","latestPrice":1.0,"change":0}"#;
        assert!(Quote::from_json(body).expect("quote decodes").is_for(&aapl()));
    }

    #[test]
    fn integer_prices_are_accepted() {
        let body = r#"{"symbol":"AAPL","companyName":"Apple","latestPrice":130,"change":2}"#;
        let quote = Quote::from_json(body).expect("quote decodes");
        assert_eq!(quote.change, 2.0);
    }

    #[test]
    fn missing_or_mistyped_quote_fields_are_parse_errors() {
        let bodies = [
            r#"{"symbol":"AAPL","companyName":"Apple","change":1.0}"#,
            r#"{"symbol":"AAPL","latestPrice":1.0,"change":1.0}"#,
            r#"{"symbol":"AAPL","companyName":"Apple","latestPrice":"1.0","change":1.0}"#,
            r#"{"symbol":"AAPL","companyName":"Apple","latestPrice":1.0,"change":null}"#,
            r#"[]"#,
        ];
        for body in bodies {
            let err = Quote::from_json(body).expect_err("must fail");
            assert!(matches!(err, SharesError::Parse(_)), "{body}");
        }
    }

    #[test]
    fn logo_without_url_is_missing_resource() {
        for body in [r#"{}"#, r#"{"url":""}"#, r#"{"url":null}"#] {
            let err = Logo::from_json(body, &aapl()).expect_err("no url");
            assert!(matches!(err, SharesError::ResourceMissing(_)), "{body}");
        }

        let err = Logo::from_json("not json", &aapl()).expect_err("bad body");
        assert!(matches!(err, SharesError::Parse(_)));
    }

    #[test]
    fn gainer_without_name_falls_back_to_symbol() {
        let entry = GainerEntry {
            symbol: String::from("nio"),
            company_name: None,
        };
        let company = Company::try_from(entry).expect("valid entry");
        assert_eq!(company.symbol.as_str(), "NIO");
        assert_eq!(company.name, "NIO");
    }
}
