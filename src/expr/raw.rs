use std::fmt;

use crate::{
    Raw, Result,
    bind::Binds,
    writer::{FormatContext, FormatWriter},
};

use super::CollectBindings;

/// `[NOT ]fragment` with its own values.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCondition {
    pub(crate) raw: Raw,
    pub(crate) binds: Binds,
    pub(crate) negate: bool,
}

impl FormatWriter for RawCondition {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        if self.negate {
            context.writer.write_str("NOT ")?;
        }
        self.raw.format_writer(context)?;
        // placeholders inside the fragment are the caller's, keep the count honest
        context.placeholder += self.binds.len();
        Ok(())
    }
}

impl CollectBindings for RawCondition {
    fn collect_bindings(&self, binds: &mut Binds) {
        binds.extend(self.binds.iter().cloned());
    }
}
