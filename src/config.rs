use indexmap::IndexSet;

use crate::{
    Result,
    dialect::{Dialect, QuoteChar},
};

/// Session level settings shared by a builder and every child builder it
/// creates. Survives [`Builder::reset`](crate::Builder::reset).
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Config {
    pub(crate) quote: QuoteChar,
    pub(crate) reference_chars: IndexSet<char>,
    pub(crate) retain_table_on_reset: bool,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn for_dialect(dialect: Dialect) -> Self {
        Self {
            quote: dialect.quote(),
            ..Self::default()
        }
    }

    /// Picks the quote character from a connection driver name
    /// (`mysql`, `pgsql`, `sqlite`).
    pub fn for_driver(driver: &str) -> Result<Self> {
        Dialect::from_driver(driver).map(Self::for_dialect)
    }

    pub fn quote(mut self, quote: QuoteChar) -> Self {
        self.quote = quote;
        self
    }

    /// Extra characters accepted in unquoted references.
    pub fn reference_chars<I>(mut self, chars: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        self.reference_chars.extend(chars);
        self
    }

    /// Keep the table across resets, for callers that bind one builder to a
    /// single table for its whole life.
    pub fn retain_table_on_reset(mut self, retain: bool) -> Self {
        self.retain_table_on_reset = retain;
        self
    }

    pub fn quote_char(&self) -> QuoteChar {
        self.quote
    }

    pub fn allows(&self, char: char) -> bool {
        self.reference_chars.contains(&char)
    }
}
