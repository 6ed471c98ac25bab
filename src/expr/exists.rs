use std::fmt;

use crate::{
    Builder, Result,
    bind::Binds,
    writer::{FormatContext, FormatWriter},
};

use super::CollectBindings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExistsOperator {
    Exists,
    NotExists,
}

impl ExistsOperator {
    pub fn new(negate: bool) -> Self {
        if negate { Self::NotExists } else { Self::Exists }
    }
}

impl FormatWriter for ExistsOperator {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        match self {
            ExistsOperator::Exists => context.writer.write_str("EXISTS")?,
            ExistsOperator::NotExists => context.writer.write_str("NOT EXISTS")?,
        }
        Ok(())
    }
}

/// `[NOT ]EXISTS (subquery)`, binding the subquery's own values.
#[derive(Debug, Clone)]
pub struct ExistsCondition {
    pub(crate) subquery: Box<Builder>,
    pub(crate) operator: ExistsOperator,
}

impl FormatWriter for ExistsCondition {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        self.operator.format_writer(context)?;
        context.writer.write_str(" (")?;
        self.subquery.format_writer(context)?;
        context.writer.write_char(')')?;
        Ok(())
    }
}

impl CollectBindings for ExistsCondition {
    fn collect_bindings(&self, binds: &mut Binds) {
        self.subquery.collect_bindings(binds);
    }
}
