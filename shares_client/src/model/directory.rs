//! Company directory: the rows of the picker.
//!
//! The directory is either static (built in, or read from a file) or fetched
//! from the gainers endpoint. Rows are ordered and symbols are unique; a later
//! duplicate of a symbol is dropped.
use std::collections::HashSet;
use std::io::BufRead;

use log::debug;
use shares_common::company::CompanyParser;
use shares_common::{Company, SharesError, Symbol};

/// Where the directory comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectorySource {
    /// Loaded once at startup; never refetched.
    Static,
    /// Fetched from the gainers endpoint, refetched when connectivity returns.
    Gainers,
}

/// Ordered list of unique companies.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompanyDirectory {
    companies: Vec<Company>,
}

impl CompanyDirectory {
    pub fn new(companies: Vec<Company>) -> Self {
        let mut seen = HashSet::new();
        let companies = companies
            .into_iter()
            .filter(|company| {
                let fresh = seen.insert(company.symbol.clone());
                if !fresh {
                    debug!("Dropping duplicate directory row {}", company.symbol);
                }
                fresh
            })
            .collect();
        Self { companies }
    }

    pub fn builtin() -> Self {
        Self::new(Company::builtin())
    }

    /// Read a `SYMBOL,Name` per line companies file.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, SharesError> {
        Ok(Self::new(Company::parse_from_file(reader)?))
    }

    pub fn len(&self) -> usize {
        self.companies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }

    /// Company at a 0-based row.
    pub fn row(&self, index: usize) -> Option<&Company> {
        self.companies.get(index)
    }

    pub fn find(&self, symbol: &Symbol) -> Option<&Company> {
        self.companies.iter().find(|company| company.symbol == *symbol)
    }

    pub fn position(&self, symbol: &Symbol) -> Option<usize> {
        self.companies.iter().position(|company| company.symbol == *symbol)
    }

    pub fn companies(&self) -> &[Company] {
        &self.companies
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn symbol(s: &str) -> Symbol {
        Symbol::parse(s).expect("symbol")
    }

    #[test]
    fn builtin_rows_resolve_by_index_and_symbol() {
        let directory = CompanyDirectory::builtin();
        assert_eq!(directory.len(), 6);
        assert_eq!(directory.row(0).map(|c| c.name.as_str()), Some("Apple"));
        assert_eq!(directory.position(&symbol("fb")), Some(4));
        assert!(directory.row(6).is_none());
        assert!(directory.find(&symbol("TSLA")).is_none());
    }

    #[test]
    fn duplicates_keep_first_row() {
        let directory = CompanyDirectory::new(vec![
            Company::new(symbol("AAPL"), "Apple"),
            Company::new(symbol("AAPL"), "Apple again"),
            Company::new(symbol("MSFT"), "Microsoft"),
        ]);
        assert_eq!(directory.len(), 2);
        assert_eq!(directory.row(0).map(|c| c.name.as_str()), Some("Apple"));
    }

    #[test]
    fn empty_directory_has_no_rows() {
        let directory = CompanyDirectory::new(Vec::new());
        assert!(directory.is_empty());
        assert!(directory.row(0).is_none());
    }

    #[test]
    fn reads_companies_file() {
        let directory =
            CompanyDirectory::from_reader(Cursor::new("TSLA,Tesla\nTSLA,Dup\nNFLX\n")).expect("file");
        assert_eq!(directory.len(), 2);
        assert_eq!(directory.row(1).map(|c| c.name.as_str()), Some("NFLX"));
    }
}
