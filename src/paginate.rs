use std::fmt;

use smol_str::SmolStr;

use crate::{
    Error, Result,
    writer::{FormatContext, FormatWriter},
};

/// A row count kept as the digits it was given. Only the digits check is
/// applied, so very large values pass while `-1` does not.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Count(SmolStr);

impl Count {
    pub fn parse(value: &str, method: &'static str) -> Result<Self> {
        if value.chars().all(|c| c.is_ascii_digit()) {
            Ok(Self(SmolStr::new(value)))
        } else {
            Err(Error::invalid_argument(
                method,
                format!("Supplied argument to {method}() must be a positive integer, got '{value}'"),
            ))
        }
    }

    /// Zero and unset are the same thing.
    pub fn is_zero(&self) -> bool {
        self.0.chars().all(|c| c == '0')
    }

    pub fn as_str(&self) -> &str {
        match self.0.trim_start_matches('0') {
            "" => "0",
            digits => digits,
        }
    }
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait IntoCount {
    fn into_count(self, method: &'static str) -> Result<Count>;
}

macro_rules! impl_into_count {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl IntoCount for $ty {
                fn into_count(self, method: &'static str) -> Result<Count> {
                    Count::parse(&self.to_string(), method)
                }
            }
        )+
    };
}

impl_into_count!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize);

impl IntoCount for &str {
    fn into_count(self, method: &'static str) -> Result<Count> {
        Count::parse(self, method)
    }
}

impl IntoCount for String {
    fn into_count(self, method: &'static str) -> Result<Count> {
        Count::parse(&self, method)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Paginator {
    pub(crate) limit: Count,
    pub(crate) offset: Count,
}

impl Paginator {
    pub fn limit(&mut self, limit: Count) {
        self.limit = limit;
    }

    pub fn offset(&mut self, offset: Count) {
        self.offset = offset;
    }

    /// Page 1 (or 0) is the first page and has no offset.
    pub fn paginate(&mut self, page: u64, per_page: u64) -> Result<()> {
        if page > 1 {
            let offset = (page - 1).checked_mul(per_page).ok_or_else(|| {
                Error::invalid_argument("paginate", "page and per_page overflow the offset")
            })?;
            self.offset = Count(smol_str::format_smolstr!("{offset}"));
        }
        self.limit = Count(smol_str::format_smolstr!("{per_page}"));
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.limit.is_zero() && self.offset.is_zero()
    }

    /// An offset needs a limit, checked when the statement is rendered.
    pub fn validate(&self) -> Result<()> {
        if self.limit.is_zero() && !self.offset.is_zero() {
            return Err(Error::invalid_argument(
                "offset",
                "Cannot set OFFSET without LIMIT, please set limit() to use offset()",
            ));
        }
        Ok(())
    }
}

impl FormatWriter for Paginator {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        self.validate()?;
        if self.limit.is_zero() {
            return Ok(());
        }
        write!(context.writer, "LIMIT {}", self.limit)?;
        if !self.offset.is_zero() {
            write!(context.writer, " OFFSET {}", self.offset)?;
        }
        Ok(())
    }
}
