use std::fmt;

use crate::{
    Result,
    bind::Binds,
    writer::{FormatContext, FormatWriter},
};

use super::{CollectBindings, cond::Conditions};

/// `[NOT ](child conditions)`
#[derive(Debug, Clone)]
pub struct GroupCondition {
    pub(crate) conditions: Conditions,
    pub(crate) negate: bool,
}

impl FormatWriter for GroupCondition {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        if self.negate {
            context.writer.write_str("NOT ")?;
        }
        context.writer.write_char('(')?;
        self.conditions.format_writer(context)?;
        context.writer.write_char(')')?;
        Ok(())
    }
}

impl CollectBindings for GroupCondition {
    fn collect_bindings(&self, binds: &mut Binds) {
        self.conditions.collect_bindings(binds);
    }
}
