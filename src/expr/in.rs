use std::fmt;

use crate::{
    Ident, Result,
    bind::Binds,
    writer::{FormatContext, FormatWriter},
};

use super::{CollectBindings, list::InList};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InOperator {
    In,
    NotIn,
}

impl InOperator {
    pub fn new(negate: bool) -> Self {
        if negate { Self::NotIn } else { Self::In }
    }
}

impl FormatWriter for InOperator {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        match self {
            InOperator::In => context.writer.write_str(" IN ")?,
            InOperator::NotIn => context.writer.write_str(" NOT IN ")?,
        }
        Ok(())
    }
}

/// `column[ NOT] IN (?,?,..)` or `column[ NOT] IN (subquery)`.
#[derive(Debug, Clone)]
pub struct InCondition {
    pub(crate) column: Ident,
    pub(crate) list: InList,
    pub(crate) operator: InOperator,
}

impl FormatWriter for InCondition {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        context.write_column(&self.column)?;
        self.operator.format_writer(context)?;
        context.writer.write_char('(')?;
        self.list.format_writer(context)?;
        context.writer.write_char(')')?;
        Ok(())
    }
}

impl CollectBindings for InCondition {
    fn collect_bindings(&self, binds: &mut Binds) {
        self.list.collect_bindings(binds);
    }
}
