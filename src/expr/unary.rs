use std::fmt;

use crate::{
    Ident, Result,
    writer::{FormatContext, FormatWriter},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Null,
    NotNull,
}

impl UnaryOperator {
    pub fn new(negate: bool) -> Self {
        if negate { Self::NotNull } else { Self::Null }
    }
}

impl FormatWriter for UnaryOperator {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        match self {
            UnaryOperator::Null => context.writer.write_str(" IS NULL")?,
            UnaryOperator::NotNull => context.writer.write_str(" IS NOT NULL")?,
        }
        Ok(())
    }
}

/// `column IS [NOT ]NULL`, binds nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct UnaryCondition {
    pub(crate) column: Ident,
    pub(crate) operator: UnaryOperator,
}

impl FormatWriter for UnaryCondition {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        context.write_column(&self.column)?;
        self.operator.format_writer(context)
    }
}

#[cfg(test)]
mod tests {
    use crate::tests::format_writer_in;

    use super::*;

    #[test]
    fn test_is_null() {
        let condition = UnaryCondition {
            column: Ident::new_static("deleted_at"),
            operator: UnaryOperator::new(false),
        };
        assert_eq!("`users`.`deleted_at` IS NULL", format_writer_in(&condition, "users"));
        let condition = UnaryCondition {
            column: Ident::new_static("deleted_at"),
            operator: UnaryOperator::new(true),
        };
        assert_eq!("`users`.`deleted_at` IS NOT NULL", format_writer_in(&condition, "users"));
    }
}
