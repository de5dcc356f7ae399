//! Ticker symbols and companies shared between client and server.

use std::fmt::{Display, Formatter};
use std::io::BufRead;

use serde::{Deserialize, Serialize};

use crate::error::SharesError;

const MAX_SYMBOL_LEN: usize = 15;

/// Normalized ticker symbol (e.g., `AAPL`, `BRK.B`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Parse and normalize a symbol to uppercase.
    pub fn parse(input: &str) -> Result<Self, SharesError> {
        let normalized = input.trim().to_ascii_uppercase();
        let invalid = |reason: String| SharesError::InvalidSymbol {
            value: input.to_owned(),
            reason,
        };

        let Some(first) = normalized.chars().next() else {
            return Err(invalid(String::from("symbol is empty")));
        };
        if !first.is_ascii_alphabetic() {
            return Err(invalid(format!("must start with a letter, found '{first}'")));
        }

        let len = normalized.chars().count();
        if len > MAX_SYMBOL_LEN {
            return Err(invalid(format!("{len} chars exceeds {MAX_SYMBOL_LEN}")));
        }

        if let Some(ch) = normalized
            .chars()
            .find(|ch| !(ch.is_ascii_alphanumeric() || *ch == '.' || *ch == '-'))
        {
            return Err(invalid(format!("unexpected character '{ch}'")));
        }

        Ok(Self(normalized))
    }

    /// Borrow the normalized text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Symbol {
    type Error = SharesError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Symbol {
    type Error = SharesError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Symbol> for String {
    fn from(value: Symbol) -> Self {
        value.0
    }
}

/// A selectable company: ticker plus display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Ticker, unique within a directory.
    pub symbol: Symbol,
    /// Display name.
    pub name: String,
}

impl Company {
    /// Creates a company from an already validated symbol.
    pub fn new(symbol: Symbol, name: impl Into<String>) -> Self {
        Self {
            symbol,
            name: name.into(),
        }
    }

    /// The companies the viewer ships with when no other source is configured.
    pub fn builtin() -> Vec<Company> {
        [
            ("AAPL", "Apple"),
            ("MSFT", "Microsoft"),
            ("GOOG", "Google"),
            ("AMZN", "Amazon"),
            ("FB", "Facebook"),
            ("ICON", "Iconix"),
        ]
        .into_iter()
        .map(|(symbol, name)| Company {
            symbol: Symbol(String::from(symbol)),
            name: String::from(name),
        })
        .collect()
    }
}

/// Trait providing file parsing for companies.
pub trait CompanyParser {
    /// Parses companies from a buffered reader.
    ///
    /// Each non-empty line is `SYMBOL,Name` or a bare `SYMBOL` (the name then
    /// defaults to the symbol). Lines starting with `#` are comments.
    fn parse_from_file<R: BufRead>(reader: R) -> Result<Vec<Company>, SharesError>;
}

impl CompanyParser for Company {
    fn parse_from_file<R: BufRead>(reader: R) -> Result<Vec<Self>, SharesError> {
        let mut companies = Vec::new();

        for (index, line_result) in reader.lines().enumerate() {
            let line = line_result?;
            let trimmed_line = line.trim();
            if trimmed_line.is_empty() || trimmed_line.starts_with('#') {
                continue;
            }

            let (raw_symbol, raw_name) = match trimmed_line.split_once(',') {
                Some((symbol, name)) => (symbol, name.trim()),
                None => (trimmed_line, ""),
            };

            let symbol = Symbol::parse(raw_symbol).map_err(|e| SharesError::ParseCompanies {
                line: index + 1,
                message: e.to_string(),
            })?;
            let name = if raw_name.is_empty() {
                symbol.to_string()
            } else {
                raw_name.to_string()
            };
            companies.push(Company { symbol, name });
        }
        Ok(companies)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_and_normalizes_symbol() {
        let parsed = Symbol::parse(" aapl ").expect("symbol should parse");
        assert_eq!(parsed.as_str(), "AAPL");
        assert_eq!(Symbol::parse("brk.b").expect("dotted").as_str(), "BRK.B");
    }

    #[test]
    fn rejects_bad_symbols() {
        for input in ["", "   ", "1AAPL", "AAPL$", "ABCDEFGHIJKLMNOP"] {
            let err = Symbol::parse(input).expect_err("must fail");
            assert!(matches!(err, SharesError::InvalidSymbol { .. }), "{input}");
        }
    }

    #[test]
    fn symbol_deserializes_through_validation() {
        let symbol: Symbol = serde_json::from_str("\"msft\"").expect("valid");
        assert_eq!(symbol.as_str(), "MSFT");
        assert!(serde_json::from_str::<Symbol>("\"$$\"").is_err());
    }

    #[test]
    fn builtin_directory_keeps_declared_order() {
        let symbols: Vec<String> = Company::builtin()
            .into_iter()
            .map(|c| c.symbol.to_string())
            .collect();
        assert_eq!(symbols, ["AAPL", "MSFT", "GOOG", "AMZN", "FB", "ICON"]);
    }

    #[test]
    fn parses_companies_file() {
        let input = "# watchlist\nAAPL,Apple Inc.\n\n nflx \nTSLA, Tesla\n";
        let companies = Company::parse_from_file(Cursor::new(input)).expect("file parses");

        assert_eq!(companies.len(), 3);
        assert_eq!(companies[0].name, "Apple Inc.");
        assert_eq!(companies[1].symbol.as_str(), "NFLX");
        assert_eq!(companies[1].name, "NFLX");
        assert_eq!(companies[2].name, "Tesla");
    }

    #[test]
    fn companies_file_error_names_the_line() {
        let err = Company::parse_from_file(Cursor::new("AAPL\n9BAD,Nope\n")).expect_err("bad line");
        assert!(matches!(err, SharesError::ParseCompanies { line: 2, .. }));
    }
}
