use std::{borrow::Cow, sync::Arc};

use smol_str::SmolStr;

use crate::{Error, Result, config::Config, dialect::QuoteChar};

/// A table or column reference as given by the caller, optionally qualified
/// (`table.column`) and optionally aliased (`column AS alias`).
#[derive(Debug, Default, Clone, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ident(SmolStr);

pub trait IntoIdent {
    fn into_ident(self) -> Ident;
}

impl IntoIdent for Ident {
    fn into_ident(self) -> Ident {
        self
    }
}

impl IntoIdent for char {
    fn into_ident(self) -> Ident {
        Ident::new(smol_str::format_smolstr!("{}", self))
    }
}

impl IntoIdent for &str {
    #[inline]
    fn into_ident(self) -> Ident {
        Ident::new(self)
    }
}

impl IntoIdent for &String {
    #[inline]
    fn into_ident(self) -> Ident {
        Ident::new(self)
    }
}

impl IntoIdent for String {
    #[inline(always)]
    fn into_ident(self) -> Ident {
        Ident::new(self)
    }
}

impl IntoIdent for Box<str> {
    #[inline]
    fn into_ident(self) -> Ident {
        Ident::new(self)
    }
}

impl IntoIdent for Arc<str> {
    #[inline]
    fn into_ident(self) -> Ident {
        Ident::new(self)
    }
}

impl IntoIdent for Cow<'_, str> {
    #[inline]
    fn into_ident(self) -> Ident {
        Ident::new(self)
    }
}

impl IntoIdent for SmolStr {
    #[inline(always)]
    fn into_ident(self) -> Ident {
        Ident::new(self)
    }
}

impl Ident {
    #[inline]
    pub fn new<T>(value: T) -> Self
    where
        T: Into<SmolStr>,
    {
        Self(value.into())
    }

    #[inline]
    pub fn new_static(value: &'static str) -> Self {
        Self(SmolStr::new_static(value))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_wildcard(&self) -> bool {
        self.0 == "*"
    }

    /// The name other references use for this table: its alias when it has
    /// one, the bare name otherwise.
    pub fn table_name(&self) -> &str {
        let (name, alias) = split_alias(self.0.as_str());
        alias.unwrap_or(name).trim()
    }
}

/// Splits `lhs AS rhs` on the first case insensitive ` as `.
pub fn split_alias(s: &str) -> (&str, Option<&str>) {
    if let Some(idx) = find_as(s.as_bytes()) {
        let left = &s[..idx];
        let right = &s[idx + 4..];
        (left, Some(right))
    } else {
        (s, None)
    }
}

/// Return the index of " as " in bytes case insensitive with no allocations.
fn find_as(h: &[u8]) -> Option<usize> {
    if h.len() < 4 {
        return None;
    }
    for (i, w) in h.windows(4).enumerate() {
        if w[0] == b' ' && w[3] == b' ' && (w[1] | 0x20) == b'a' && (w[2] | 0x20) == b's' {
            return Some(i);
        }
    }
    None
}

/// Strips every occurrence of the quote character.
pub fn unquote(value: &str, quote: QuoteChar) -> Cow<'_, str> {
    let quote = quote.as_char();
    if value.contains(quote) {
        Cow::Owned(value.replace(quote, ""))
    } else {
        Cow::Borrowed(value)
    }
}

/// Prefixes an unqualified reference with `table`. Qualified references keep
/// their own table. Every part is trimmed and unquoted.
pub fn qualify(reference: &str, table: Option<&str>, quote: QuoteChar) -> String {
    let clean = |part: &str| unquote(part.trim(), quote).into_owned();
    match reference.find('.') {
        Some(index) if index > 0 => reference.split('.').map(clean).collect::<Vec<_>>().join("."),
        _ => match table {
            Some(table) => format!("{}.{}", clean(table), clean(reference)),
            None => clean(reference),
        },
    }
}

/// Accepts `*`, or after unquoting and trimming, only ASCII letters, digits,
/// `_`, `.` and the configured extra characters. Aliased references are
/// checked on both sides of ` AS `.
pub fn validate_reference(value: &str, config: &Config, method: &'static str) -> Result<()> {
    if value == "*" {
        return Ok(());
    }
    if let (lhs, Some(rhs)) = split_alias(value) {
        validate_reference(lhs, config, method)?;
        return validate_reference(rhs, config, method);
    }

    let unquoted = unquote(value, config.quote);
    let trimmed = unquoted.trim();
    let valid = !trimmed.is_empty()
        && trimmed
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.' || config.allows(c));
    if valid {
        Ok(())
    } else {
        Err(Error::invalid_reference(method, value))
    }
}

/// Input accepted by `add_reference_chars`: a string whose every character
/// becomes allowed, or a sequence of single characters.
pub trait IntoReferenceChars {
    fn into_reference_chars(self) -> Result<Vec<char>>;
}

fn single_chars<'a, I>(values: I) -> Result<Vec<char>>
where
    I: IntoIterator<Item = &'a str>,
{
    values
        .into_iter()
        .map(|value| {
            let mut chars = value.chars();
            match (chars.next(), chars.next()) {
                (Some(char), None) => Ok(char),
                _ => Err(Error::invalid_argument(
                    "add_reference_chars",
                    "only accepts an Array of single chars, a longer string was provided",
                )),
            }
        })
        .collect()
}

impl IntoReferenceChars for char {
    fn into_reference_chars(self) -> Result<Vec<char>> {
        Ok(vec![self])
    }
}

impl IntoReferenceChars for &str {
    fn into_reference_chars(self) -> Result<Vec<char>> {
        Ok(self.chars().collect())
    }
}

impl IntoReferenceChars for String {
    fn into_reference_chars(self) -> Result<Vec<char>> {
        Ok(self.chars().collect())
    }
}

impl<const N: usize> IntoReferenceChars for [char; N] {
    fn into_reference_chars(self) -> Result<Vec<char>> {
        Ok(self.to_vec())
    }
}

impl IntoReferenceChars for Vec<char> {
    fn into_reference_chars(self) -> Result<Vec<char>> {
        Ok(self)
    }
}

impl<const N: usize> IntoReferenceChars for [&str; N] {
    fn into_reference_chars(self) -> Result<Vec<char>> {
        single_chars(self)
    }
}

impl IntoReferenceChars for &[&str] {
    fn into_reference_chars(self) -> Result<Vec<char>> {
        single_chars(self.iter().copied())
    }
}

impl IntoReferenceChars for Vec<&str> {
    fn into_reference_chars(self) -> Result<Vec<char>> {
        single_chars(self)
    }
}

impl IntoReferenceChars for Vec<String> {
    fn into_reference_chars(self) -> Result<Vec<char>> {
        single_chars(self.iter().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_as() {
        let matches = "users as u";
        let index = find_as(matches.as_bytes());
        assert_eq!(index, Some(5));
        let no_match = "users";
        let index = find_as(no_match.as_bytes());
        assert_eq!(index, None);
        let first_match = "users AS u as bob";
        let index = find_as(first_match.as_bytes());
        assert_eq!(index, Some(5));
    }

    #[test]
    fn test_table_name() {
        assert_eq!("movies", Ident::new_static("movies").table_name());
        assert_eq!("m", Ident::new_static("movies AS m").table_name());
    }

    #[test]
    fn test_qualify() {
        let q = QuoteChar::Backtick;
        assert_eq!("movies.title", qualify("title", Some("movies"), q));
        assert_eq!("actors.name", qualify("actors.name", Some("movies"), q));
        assert_eq!("actors.name", qualify("`actors` . `name`", Some("movies"), q));
        assert_eq!("movies.stage_name AS s_name", qualify("stage_name AS s_name", Some("movies"), q));
        assert_eq!("title", qualify("title", None, q));
    }

    #[test]
    fn test_unquote() {
        assert_eq!("movies.title", unquote("`movies`.`title`", QuoteChar::Backtick));
        assert_eq!("`movies`", unquote("`movies`", QuoteChar::Double));
    }

    #[test]
    fn test_validate_reference() {
        let config = Config::default();
        assert!(validate_reference("*", &config, "select").is_ok());
        assert!(validate_reference("movies.title", &config, "select").is_ok());
        assert!(validate_reference("`movies`.`title`", &config, "select").is_ok());
        assert!(validate_reference(" title ", &config, "select").is_ok());
        assert!(validate_reference("title as t", &config, "select").is_ok());
        assert!(validate_reference("title AS t AS u", &config, "select").is_ok());

        let err = validate_reference("title; drop", &config, "select").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidReference { method: "select", ref value } if value == "title; drop"
        ));
        assert!(validate_reference("title AS t-1", &config, "select").is_err());
        assert!(validate_reference("movies.*", &config, "select").is_err());
        assert!(validate_reference("", &config, "select").is_err());
    }

    #[test]
    fn test_extra_reference_chars() {
        let config = Config::default().reference_chars(':'.into_reference_chars().unwrap());
        assert!(validate_reference("movies::translations.movies_id", &config, "join").is_ok());

        let config = Config::default().reference_chars("ñáéõô".into_reference_chars().unwrap());
        assert!(validate_reference("años.película", &config, "from").is_err());
        assert!(validate_reference("años.peliculá", &config, "from").is_ok());
    }

    #[test]
    fn test_into_reference_chars() {
        assert_eq!(vec![':', '-'], [":", "-"].into_reference_chars().unwrap());
        assert_eq!(vec!['a', 'b'], "ab".into_reference_chars().unwrap());
        let err = [":", "--"].into_reference_chars().unwrap_err();
        assert!(err.is_invalid_input());
    }
}
