use indexmap::IndexMap;

use crate::{
    Bind, Error, Ident, IntoBind, IntoIdent, Result,
    bind::Binds,
    config::Config,
    ident,
};

/// One `column -> value` mapping of an INSERT or UPDATE, in column order.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Row {
    values: IndexMap<Ident, Bind>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field<K, V>(&mut self, column: K, value: V) -> &mut Self
    where
        K: IntoIdent,
        V: IntoBind,
    {
        self.values.insert(column.into_ident(), value.into_bind());
        self
    }

    /// By value variant of [`Row::field`].
    pub fn with<K, V>(mut self, column: K, value: V) -> Self
    where
        K: IntoIdent,
        V: IntoBind,
    {
        self.field(column, value);
        self
    }

    pub fn get(&self, column: &str) -> Option<&Bind> {
        self.values.get(&Ident::new(column))
    }

    pub fn columns(&self) -> impl Iterator<Item = &Ident> {
        self.values.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &Bind> {
        self.values.values()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Same column set, in any order.
    pub fn same_columns(&self, other: &Row) -> bool {
        self.len() == other.len() && self.values.keys().all(|key| other.values.contains_key(key))
    }

    /// Values in the column order of `columns`.
    pub(crate) fn collect_in(&self, columns: &Row, binds: &mut Binds) {
        for column in columns.values.keys() {
            if let Some(value) = self.values.get(column) {
                binds.push(value.clone());
            }
        }
    }

    pub(crate) fn validate(&self, config: &Config, method: &'static str) -> Result<()> {
        if self.is_empty() {
            return Err(Error::invalid_argument(method, "requires at least one column"));
        }
        for column in self.values.keys() {
            ident::validate_reference(column.as_str(), config, method)?;
        }
        Ok(())
    }

    /// Builds a row from any struct serializing to a JSON object.
    #[cfg(feature = "json")]
    pub fn from_serialize<T>(value: &T) -> Result<Self>
    where
        T: serde::Serialize,
    {
        match serde_json::to_value(value) {
            Ok(serde_json::Value::Object(object)) => Ok(object.into_iter().fold(
                Row::new(),
                |row, (column, value)| row.with(column, value),
            )),
            Ok(_) => Err(Error::invalid_argument(
                "insert",
                "cannot insert non associative data, pass a struct or key=>value map",
            )),
            Err(err) => Err(Error::invalid_argument("insert", err.to_string())),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Row
where
    K: IntoIdent,
    V: IntoBind,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Row::new(), |row, (column, value)| row.with(column, value))
    }
}

/// A single row: a [`Row`], a map or a sequence of `(column, value)` pairs.
pub trait IntoRow {
    fn into_row(self) -> Row;
}

impl IntoRow for Row {
    fn into_row(self) -> Row {
        self
    }
}

impl<K, V, S> IntoRow for IndexMap<K, V, S>
where
    K: IntoIdent,
    V: IntoBind,
{
    fn into_row(self) -> Row {
        self.into_iter().collect()
    }
}

impl<K, V, const N: usize> IntoRow for [(K, V); N]
where
    K: IntoIdent,
    V: IntoBind,
{
    fn into_row(self) -> Row {
        self.into_iter().collect()
    }
}

impl<K, V> IntoRow for Vec<(K, V)>
where
    K: IntoIdent,
    V: IntoBind,
{
    fn into_row(self) -> Row {
        self.into_iter().collect()
    }
}

/// One or many rows. Single row shapes insert one row.
pub trait IntoRows {
    fn into_rows(self) -> Vec<Row>;
}

impl IntoRows for Row {
    fn into_rows(self) -> Vec<Row> {
        vec![self]
    }
}

impl IntoRows for Vec<Row> {
    fn into_rows(self) -> Vec<Row> {
        self
    }
}

impl<const N: usize> IntoRows for [Row; N] {
    fn into_rows(self) -> Vec<Row> {
        self.into_iter().collect()
    }
}

impl<K, V, S> IntoRows for IndexMap<K, V, S>
where
    K: IntoIdent,
    V: IntoBind,
{
    fn into_rows(self) -> Vec<Row> {
        vec![self.into_row()]
    }
}

impl<K, V, S> IntoRows for Vec<IndexMap<K, V, S>>
where
    K: IntoIdent,
    V: IntoBind,
{
    fn into_rows(self) -> Vec<Row> {
        self.into_iter().map(IntoRow::into_row).collect()
    }
}

impl<K, V, const N: usize> IntoRows for [(K, V); N]
where
    K: IntoIdent,
    V: IntoBind,
{
    fn into_rows(self) -> Vec<Row> {
        vec![self.into_row()]
    }
}

impl<K, V> IntoRows for Vec<(K, V)>
where
    K: IntoIdent,
    V: IntoBind,
{
    fn into_rows(self) -> Vec<Row> {
        vec![self.into_row()]
    }
}
