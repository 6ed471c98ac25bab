use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Postgres,
    MySql,
    Sqlite,
}

impl Dialect {
    /// Maps a connection driver name to its dialect.
    pub fn from_driver(driver: &str) -> Result<Self> {
        match driver {
            "mysql" => Ok(Self::MySql),
            "pgsql" | "postgres" | "postgresql" => Ok(Self::Postgres),
            "sqlite" => Ok(Self::Sqlite),
            other => Err(Error::UnsupportedDriver(other.to_string())),
        }
    }

    pub fn quote(self) -> QuoteChar {
        match self {
            Dialect::Postgres => QuoteChar::Double,
            Dialect::MySql | Dialect::Sqlite => QuoteChar::Backtick,
        }
    }
}

/// The character wrapping identifiers, either `` ` `` or `"`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum QuoteChar {
    #[default]
    Backtick,
    Double,
}

impl QuoteChar {
    #[inline]
    pub fn as_char(self) -> char {
        match self {
            QuoteChar::Backtick => '`',
            QuoteChar::Double => '"',
        }
    }
}

impl TryFrom<char> for QuoteChar {
    type Error = Error;

    fn try_from(value: char) -> Result<Self> {
        match value {
            '`' => Ok(QuoteChar::Backtick),
            '"' => Ok(QuoteChar::Double),
            _ => Err(Error::invalid_argument(
                "set_quote_char",
                "only accepts a back-quote or double quote character",
            )),
        }
    }
}

impl TryFrom<&str> for QuoteChar {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        let mut chars = value.chars();
        match (chars.next(), chars.next()) {
            (Some(char), None) => QuoteChar::try_from(char),
            _ => Err(Error::invalid_argument(
                "set_quote_char",
                "only accepts a single character",
            )),
        }
    }
}

pub trait HasDialect {
    const DIALECT: Dialect;
}

pub struct Postgres;

impl HasDialect for Postgres {
    const DIALECT: Dialect = Dialect::Postgres;
}

pub struct MySql;

impl HasDialect for MySql {
    const DIALECT: Dialect = Dialect::MySql;
}

pub struct Sqlite;

impl HasDialect for Sqlite {
    const DIALECT: Dialect = Dialect::Sqlite;
}
