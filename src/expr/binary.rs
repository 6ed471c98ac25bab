use std::fmt;

use crate::{
    Bind, Ident, Result,
    bind::Binds,
    operator::Operator,
    writer::{FormatContext, FormatWriter},
};

use super::CollectBindings;

/// `[NOT ]column<op>?`
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryCondition {
    pub(crate) column: Ident,
    pub(crate) operator: Operator,
    pub(crate) value: Bind,
    pub(crate) negate: bool,
}

impl FormatWriter for BinaryCondition {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        if self.negate {
            context.writer.write_str("NOT ")?;
        }
        context.write_column(&self.column)?;
        self.operator.format_writer(context)?;
        context.write_placeholder()
    }
}

impl CollectBindings for BinaryCondition {
    fn collect_bindings(&self, binds: &mut Binds) {
        binds.push(self.value.clone());
    }
}
