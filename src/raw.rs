use std::fmt;

use smol_str::SmolStr;

use crate::{
    Result,
    writer::{FormatContext, FormatWriter},
};

/// A trusted SQL fragment written verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raw(pub(crate) SmolStr);

impl Raw {
    pub fn new<T>(value: T) -> Self
    where
        T: Into<SmolStr>,
    {
        Self(value.into())
    }

    pub fn new_static(value: &'static str) -> Self {
        Self(SmolStr::new_static(value))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Counts every `?`, quoted or not.
    pub fn placeholder_count(&self) -> usize {
        self.0.matches('?').count()
    }
}

impl fmt::Display for Raw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub trait IntoRaw {
    fn into_raw(self) -> Raw;
}

impl IntoRaw for Raw {
    fn into_raw(self) -> Raw {
        self
    }
}

impl IntoRaw for &str {
    fn into_raw(self) -> Raw {
        Raw::new(self)
    }
}

impl IntoRaw for String {
    fn into_raw(self) -> Raw {
        Raw::new(self)
    }
}

impl FormatWriter for Raw {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        context.writer.write_str(&self.0)?;
        Ok(())
    }
}
