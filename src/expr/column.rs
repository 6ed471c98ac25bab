use std::fmt;

use crate::{
    Ident, Result,
    operator::Operator,
    writer::{FormatContext, FormatWriter},
};

/// `lhs<op>rhs` between two references, binds nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnCondition {
    pub(crate) lhs: Ident,
    pub(crate) operator: Operator,
    pub(crate) rhs: Ident,
}

impl FormatWriter for ColumnCondition {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        context.write_column(&self.lhs)?;
        self.operator.format_writer(context)?;
        context.write_column(&self.rhs)
    }
}
