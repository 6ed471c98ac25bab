//! Runs builder statements against a database connection.
//!
//! The library never talks to a database itself. A [`Connection`] supplies
//! the narrow prepare/execute surface and [`Db`] drives it: it compiles the
//! statement held by its [`Builder`], hands the SQL and values over, and
//! resets the builder for the next statement.

use std::{
    fmt,
    ops::{Deref, DerefMut},
    time::SystemTime,
};

use crate::{
    Bind, Builder, Error, IntoBinds, Result,
    bind::Binds,
    config::Config,
    dialect::Dialect,
    row::{IntoRow, IntoRows, Row},
};

/// The database side of a [`Db`].
///
/// `prepare_and_execute` and `raw_execute` receive SQL with `?` placeholders
/// and one value per placeholder, in order. The counters describe the last
/// executed statement.
pub trait Connection {
    /// A fetched row.
    type Row: Record;

    /// Driver failure, reported inside [`Error::Execution`].
    type Error: fmt::Display;

    /// `mysql`, `pgsql` or `sqlite`, used to pick the quote character.
    fn driver_name(&self) -> &str;

    fn prepare_and_execute(
        &mut self,
        sql: &str,
        params: &[Bind],
    ) -> std::result::Result<Vec<Self::Row>, Self::Error>;

    /// Executes caller supplied SQL. Defaults to
    /// [`Connection::prepare_and_execute`].
    fn raw_execute(
        &mut self,
        sql: &str,
        params: &[Bind],
    ) -> std::result::Result<Vec<Self::Row>, Self::Error> {
        self.prepare_and_execute(sql, params)
    }

    fn row_count(&self) -> u64;

    fn column_count(&self) -> usize;

    fn last_insert_id(&self) -> u64;

    fn begin(&mut self) -> std::result::Result<(), Self::Error>;

    fn commit(&mut self) -> std::result::Result<(), Self::Error>;

    fn rollback(&mut self) -> std::result::Result<(), Self::Error>;
}

/// Read access to one column of a fetched row.
pub trait Record {
    fn get(&self, column: &str) -> Option<Bind>;
}

impl Record for Row {
    fn get(&self, column: &str) -> Option<Bind> {
        Row::get(self, column).cloned()
    }
}

/// One executed statement, kept while logging is enabled.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub sql: String,
    pub params: Binds,
    /// When the statement was handed to the connection.
    pub at: SystemTime,
    /// The driver message when the statement failed.
    pub error: Option<String>,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n[", self.sql)?;
        for (index, param) in self.params.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "'{param}'")?;
        }
        f.write_str("]")?;
        if let Some(error) = &self.error {
            write!(f, "\nerror: {error}")?;
        }
        Ok(())
    }
}

/// A connection paired with the builder that feeds it.
///
/// Builder methods are reachable directly through `Deref`. The statement
/// methods here (`get`, `insert`, `update`, `delete` and the aggregates)
/// finish the statement, execute it and reset the builder. A failed
/// statement leaves the builder compiled, so the next `from` or `select`
/// starts over.
///
/// `Db` is not meant to be shared. Wrap it in a `Mutex` to use it from
/// several threads.
pub struct Db<C: Connection> {
    conn: C,
    builder: Builder,
    depth: usize,
    log: Option<Vec<LogEntry>>,
}

impl<C: Connection> Db<C> {
    /// Fails with [`Error::UnsupportedDriver`] for drivers without a known
    /// quote character.
    pub fn new(conn: C) -> Result<Self> {
        let config = Config::for_driver(conn.driver_name())?;
        Ok(Self::from_parts(conn, config))
    }

    /// Like [`Db::new`], keeping every setting of `config` except the quote
    /// character, which still follows the driver.
    pub fn with_config(conn: C, config: Config) -> Result<Self> {
        let quote = Dialect::from_driver(conn.driver_name())?.quote();
        Ok(Self::from_parts(conn, config.quote(quote)))
    }

    fn from_parts(conn: C, config: Config) -> Self {
        Self {
            conn,
            builder: Builder::with_config(config),
            depth: 0,
            log: None,
        }
    }

    pub fn connection(&self) -> &C {
        &self.conn
    }

    pub fn connection_mut(&mut self) -> &mut C {
        &mut self.conn
    }

    pub fn into_inner(self) -> C {
        self.conn
    }

    pub fn row_count(&self) -> u64 {
        self.conn.row_count()
    }

    pub fn column_count(&self) -> usize {
        self.conn.column_count()
    }

    pub fn last_insert_id(&self) -> u64 {
        self.conn.last_insert_id()
    }

    // logging

    pub fn enable_log(&mut self) -> &mut Self {
        self.log.get_or_insert_with(Vec::new);
        self
    }

    pub fn log(&self) -> &[LogEntry] {
        self.log.as_deref().unwrap_or_default()
    }

    /// Returns the collected entries and turns logging off.
    pub fn take_log(&mut self) -> Vec<LogEntry> {
        self.log.take().unwrap_or_default()
    }

    fn record(&mut self, sql: &str, params: &[Bind], at: SystemTime, error: Option<String>) {
        if let Some(log) = self.log.as_mut() {
            log.push(LogEntry {
                sql: sql.to_string(),
                params: params.to_vec(),
                at,
                error,
            });
        }
    }

    // execution

    fn run(&mut self, sql: &str, params: &[Bind], raw: bool) -> Result<Vec<C::Row>> {
        tracing::debug!(sql, params = params.len(), raw, "executing statement");
        let at = SystemTime::now();
        let result = if raw {
            self.conn.raw_execute(sql, params)
        } else {
            self.conn.prepare_and_execute(sql, params)
        };
        match result {
            Ok(rows) => {
                self.record(sql, params, at, None);
                Ok(rows)
            }
            Err(err) => {
                tracing::warn!(sql, error = %err, "statement failed");
                self.record(sql, params, at, Some(err.to_string()));
                Err(Error::execution(sql, err))
            }
        }
    }

    /// Compiles and runs the builder's statement, then resets the builder.
    fn execute(&mut self) -> Result<Vec<C::Row>> {
        let (sql, params) = self.builder.compile()?;
        let rows = self.run(&sql, &params, false)?;
        self.builder.reset();
        Ok(rows)
    }

    /// Runs the current select and returns every row.
    pub fn get(&mut self) -> Result<Vec<C::Row>> {
        self.execute()
    }

    /// Runs the current select limited to one row.
    pub fn get_one(&mut self) -> Result<Option<C::Row>> {
        self.builder.limit(1)?;
        Ok(self.execute()?.into_iter().next())
    }

    /// Runs caller supplied SQL, then resets the builder.
    pub fn query<B: IntoBinds>(&mut self, sql: &str, params: B) -> Result<Vec<C::Row>> {
        let params = params.into_binds();
        let rows = self.run(sql, &params, false)?;
        self.builder.reset();
        Ok(rows)
    }

    /// Runs caller supplied SQL through [`Connection::raw_execute`]. The
    /// builder is left untouched.
    pub fn raw<B: IntoBinds>(&mut self, sql: &str, params: B) -> Result<Vec<C::Row>> {
        let params = params.into_binds();
        self.run(sql, &params, true)
    }

    /// Inserts one or more rows and returns the affected row count.
    pub fn insert<R: IntoRows>(&mut self, rows: R) -> Result<u64> {
        self.builder.insert(rows)?;
        self.execute()?;
        Ok(self.conn.row_count())
    }

    /// Inserts a single row and returns its generated id.
    pub fn insert_get_id<R: IntoRow>(&mut self, row: R) -> Result<u64> {
        self.builder.insert(row.into_row())?;
        self.execute()?;
        Ok(self.conn.last_insert_id())
    }

    pub fn update<R: IntoRow>(&mut self, row: R) -> Result<u64> {
        self.builder.update(row)?;
        self.execute()?;
        Ok(self.conn.row_count())
    }

    pub fn delete(&mut self) -> Result<u64> {
        self.builder.delete()?;
        self.execute()?;
        Ok(self.conn.row_count())
    }

    // aggregates

    fn aggregate<F>(&mut self, alias: &str, select: F) -> Result<Option<Bind>>
    where
        F: FnOnce(&mut Builder) -> Result<&mut Builder>,
    {
        select(&mut self.builder)?;
        let rows = self.execute()?;
        Ok(rows.first().and_then(|row| row.get(alias)).filter(|value| !value.is_null()))
    }

    /// Number of matching rows, or non-null values of `column`.
    pub fn count(&mut self, column: Option<&str>) -> Result<i64> {
        let value = self.aggregate("count", |builder| builder.count(column, None))?;
        Ok(value.and_then(|value| value.as_i64()).unwrap_or(0))
    }

    pub fn avg(&mut self, column: &str) -> Result<Option<Bind>> {
        self.aggregate("avg", |builder| builder.avg(Some(column), None))
    }

    pub fn min(&mut self, column: &str) -> Result<Option<Bind>> {
        self.aggregate("min", |builder| builder.min(Some(column), None))
    }

    pub fn max(&mut self, column: &str) -> Result<Option<Bind>> {
        self.aggregate("max", |builder| builder.max(Some(column), None))
    }

    pub fn sum(&mut self, column: &str) -> Result<Option<Bind>> {
        self.aggregate("sum", |builder| builder.sum(Some(column), None))
    }

    /// True when the current statement matches at least one row.
    pub fn exists(&mut self) -> Result<bool> {
        Ok(self.count(None)? > 0)
    }

    // transactions

    /// Nesting depth. Only the outermost level reaches the connection.
    pub fn transaction_depth(&self) -> usize {
        self.depth
    }

    pub fn begin_transaction(&mut self) -> Result<&mut Self> {
        if self.depth == 0 {
            self.conn
                .begin()
                .map_err(|err| Error::execution("BEGIN", err))?;
        }
        self.depth += 1;
        tracing::debug!(depth = self.depth, "transaction started");
        Ok(self)
    }

    pub fn commit(&mut self) -> Result<&mut Self> {
        match self.depth {
            0 => return Err(Error::invalid_argument("commit", "no transaction is open")),
            1 => self
                .conn
                .commit()
                .map_err(|err| Error::execution("COMMIT", err))?,
            _ => {}
        }
        self.depth -= 1;
        tracing::debug!(depth = self.depth, "transaction committed");
        Ok(self)
    }

    pub fn rollback(&mut self) -> Result<&mut Self> {
        match self.depth {
            0 => return Err(Error::invalid_argument("rollback", "no transaction is open")),
            1 => self
                .conn
                .rollback()
                .map_err(|err| Error::execution("ROLLBACK", err))?,
            _ => {}
        }
        self.depth -= 1;
        tracing::debug!(depth = self.depth, "transaction rolled back");
        Ok(self)
    }

    /// Runs `f` inside a transaction. Commits when it succeeds; otherwise
    /// rolls back and returns the original error.
    pub fn transaction<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        self.begin_transaction()?;
        let result = f(self).and_then(|value| {
            self.commit()?;
            Ok(value)
        });
        if result.is_err() {
            if let Err(err) = self.rollback() {
                tracing::warn!(error = %err, "rollback after failed transaction failed");
            }
        }
        result
    }
}

impl<C: Connection> Deref for Db<C> {
    type Target = Builder;

    fn deref(&self) -> &Builder {
        &self.builder
    }
}

impl<C: Connection> DerefMut for Db<C> {
    fn deref_mut(&mut self) -> &mut Builder {
        &mut self.builder
    }
}

impl<C> fmt::Debug for Db<C>
where
    C: Connection + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Db")
            .field("conn", &self.conn)
            .field("builder", &self.builder)
            .field("depth", &self.depth)
            .finish_non_exhaustive()
    }
}
