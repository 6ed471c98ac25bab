//! A fluent SQL statement builder.
//!
//! Statements are accumulated in memory on a [`Builder`] and compiled to a
//! SQL string with positional `?` placeholders plus the ordered values for
//! them. Every table and column reference is validated when it is handed in
//! and quoted for the target database when the statement is rendered.
//!
//! ```
//! # fn main() -> quarry::Result<()> {
//! let mut builder = quarry::query("movies")?;
//! builder.select("title, year")?.where_eq("title", "The Lego Movie")?;
//! assert_eq!(
//!     "SELECT `movies`.`title`,`movies`.`year` FROM `movies` WHERE `movies`.`title`=?",
//!     builder.to_sql()?
//! );
//! assert_eq!(vec![quarry::Bind::from("The Lego Movie")], builder.params());
//! # Ok(())
//! # }
//! ```

mod bind;
mod builder;
mod col;
mod config;
mod db;
mod dialect;
mod error;
mod expr;
mod ident;
mod join;
mod operator;
mod paginate;
mod raw;
mod row;
mod set;
mod writer;

pub use bind::Bind;
pub use bind::Binds;
pub use bind::IntoBind;
pub use bind::IntoBinds;

pub use builder::Builder;
pub use builder::State;

pub use col::IntoColumns;

pub use config::Config;

pub use db::Connection;
pub use db::Db;
pub use db::LogEntry;
pub use db::Record;

pub use dialect::Dialect;
pub use dialect::HasDialect;
pub use dialect::MySql;
pub use dialect::Postgres;
pub use dialect::QuoteChar;
pub use dialect::Sqlite;

pub use error::Error;
pub use error::Result;

pub use expr::fncall::Function;
pub use expr::order::IntoSortInput;
pub use expr::order::SortInput;

pub use ident::Ident;
pub use ident::IntoIdent;
pub use ident::IntoReferenceChars;

pub use operator::Direction;
pub use operator::IntoLogic;
pub use operator::IntoOperator;
pub use operator::JoinType;
pub use operator::Logic;
pub use operator::Operator;

pub use paginate::Count;
pub use paginate::IntoCount;

pub use raw::IntoRaw;
pub use raw::Raw;

pub use row::IntoRow;
pub use row::IntoRows;
pub use row::Row;

/// A builder already pointed at `table`.
pub fn query<T: IntoIdent>(table: T) -> Result<Builder> {
    let mut builder = Builder::new();
    builder.from(table)?;
    Ok(builder)
}
