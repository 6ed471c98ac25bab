use std::fmt;

use indexmap::IndexMap;
use smol_str::SmolStr;

use crate::{
    Error, Ident, Result,
    config::Config,
    ident,
    operator::Direction,
    writer::{FormatContext, FormatWriter},
};

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum SortKey {
    Column(Ident),
    /// `RAND()`, keyed by insertion so repeated calls each get an entry.
    Random(usize),
}

/// Ordered `column -> direction` entries of a GROUP BY or ORDER BY clause.
///
/// Setting a column again overwrites its direction but keeps the position it
/// was first given.
#[derive(Debug, Default, Clone)]
pub struct SortMap {
    entries: IndexMap<SortKey, Option<Direction>>,
    randoms: usize,
}

impl SortMap {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn insert(&mut self, column: Ident, direction: Option<Direction>) {
        self.entries.insert(SortKey::Column(column), direction);
    }

    pub fn extend<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (Ident, Option<Direction>)>,
    {
        for (column, direction) in entries {
            self.insert(column, direction);
        }
    }

    pub fn push_random(&mut self) {
        self.entries.insert(SortKey::Random(self.randoms), None);
        self.randoms += 1;
    }
}

impl FormatWriter for SortMap {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        for (index, (key, direction)) in self.entries.iter().enumerate() {
            if index > 0 {
                context.writer.write_char(',')?;
            }
            match key {
                SortKey::Column(column) => {
                    context.write_column(column)?;
                    if let Some(direction) = direction {
                        context.writer.write_char(' ')?;
                        direction.format_writer(context)?;
                    }
                }
                SortKey::Random(_) => context.writer.write_str("RAND()")?,
            }
        }
        Ok(())
    }
}

/// The shapes `group_by` and `order_by` accept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortInput {
    /// One reference, or a comma separated list of `column [direction]`.
    Text(SmolStr),
    /// A sequence of `column [direction]` tokens.
    Tokens(Vec<SmolStr>),
    /// Explicit `(column, direction)` pairs.
    Pairs(Vec<(SmolStr, SmolStr)>),
}

pub trait IntoSortInput {
    fn into_sort_input(self) -> SortInput;
}

impl IntoSortInput for SortInput {
    fn into_sort_input(self) -> SortInput {
        self
    }
}

impl IntoSortInput for &str {
    fn into_sort_input(self) -> SortInput {
        SortInput::Text(SmolStr::new(self))
    }
}

impl IntoSortInput for String {
    fn into_sort_input(self) -> SortInput {
        SortInput::Text(SmolStr::from(self))
    }
}

impl IntoSortInput for &String {
    fn into_sort_input(self) -> SortInput {
        SortInput::Text(SmolStr::new(self))
    }
}

impl<const N: usize> IntoSortInput for [&str; N] {
    fn into_sort_input(self) -> SortInput {
        SortInput::Tokens(self.into_iter().map(SmolStr::new).collect())
    }
}

impl IntoSortInput for &[&str] {
    fn into_sort_input(self) -> SortInput {
        SortInput::Tokens(self.iter().map(|token| SmolStr::new(token)).collect())
    }
}

impl IntoSortInput for Vec<&str> {
    fn into_sort_input(self) -> SortInput {
        SortInput::Tokens(self.into_iter().map(SmolStr::new).collect())
    }
}

impl IntoSortInput for Vec<String> {
    fn into_sort_input(self) -> SortInput {
        SortInput::Tokens(self.into_iter().map(SmolStr::from).collect())
    }
}

impl<const N: usize> IntoSortInput for [(&str, &str); N] {
    fn into_sort_input(self) -> SortInput {
        SortInput::Pairs(
            self.into_iter()
                .map(|(column, direction)| (SmolStr::new(column), SmolStr::new(direction)))
                .collect(),
        )
    }
}

impl IntoSortInput for Vec<(&str, &str)> {
    fn into_sort_input(self) -> SortInput {
        SortInput::Pairs(
            self.into_iter()
                .map(|(column, direction)| (SmolStr::new(column), SmolStr::new(direction)))
                .collect(),
        )
    }
}

impl<K, V, S> IntoSortInput for IndexMap<K, V, S>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    fn into_sort_input(self) -> SortInput {
        SortInput::Pairs(
            self.into_iter()
                .map(|(column, direction)| {
                    (SmolStr::new(column.as_ref()), SmolStr::new(direction.as_ref()))
                })
                .collect(),
        )
    }
}

/// Validates every entry before any of them is applied. A direction argument
/// is only allowed next to a single reference.
pub(crate) fn normalize(
    input: SortInput,
    direction: Option<&str>,
    config: &Config,
    method: &'static str,
) -> Result<Vec<(Ident, Option<Direction>)>> {
    let list_with_direction = || {
        Error::invalid_argument(
            method,
            "Cannot use a comma separated list of references and pass direction argument",
        )
    };

    match input {
        SortInput::Text(text) if text.contains(',') => {
            if direction.is_some() {
                return Err(list_with_direction());
            }
            text.split(',').map(|token| parse_token(token, config, method)).collect()
        }
        SortInput::Text(text) => {
            let reference = text.trim();
            ident::validate_reference(reference, config, method)?;
            let direction = Direction::parse_optional(direction, method)?;
            Ok(vec![(Ident::new(reference), direction)])
        }
        SortInput::Tokens(tokens) => {
            if direction.is_some() {
                return Err(list_with_direction());
            }
            tokens
                .iter()
                .map(|token| parse_token(token, config, method))
                .collect()
        }
        SortInput::Pairs(pairs) => {
            if direction.is_some() {
                return Err(list_with_direction());
            }
            pairs
                .iter()
                .map(|(column, direction)| {
                    ident::validate_reference(column, config, method)?;
                    let direction = Direction::parse(direction, method)?;
                    Ok((Ident::new(column.trim()), direction))
                })
                .collect()
        }
    }
}

/// `column` or `column direction`.
fn parse_token(token: &str, config: &Config, method: &'static str) -> Result<(Ident, Option<Direction>)> {
    let token = token.trim();
    let (column, direction) = match token.split_once(' ') {
        Some((column, direction)) => (column, Some(direction.trim())),
        None => (token, None),
    };
    ident::validate_reference(column, config, method)?;
    let direction = Direction::parse_optional(direction, method)?;
    Ok((Ident::new(column), direction))
}
