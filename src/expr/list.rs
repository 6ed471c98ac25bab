use std::fmt;

use crate::{
    Builder, Result,
    bind::Binds,
    writer::{FormatContext, FormatWriter},
};

use super::CollectBindings;

/// Right hand side of an `IN`: literal values or a subquery.
#[derive(Debug, Clone)]
pub enum InList {
    Binds(Binds),
    Subquery(Box<Builder>),
}

impl FormatWriter for InList {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        match self {
            InList::Binds(binds) => context.write_placeholders(binds.len()),
            InList::Subquery(builder) => builder.format_writer(context),
        }
    }
}

impl CollectBindings for InList {
    fn collect_bindings(&self, binds: &mut Binds) {
        match self {
            InList::Binds(values) => binds.extend(values.iter().cloned()),
            InList::Subquery(builder) => builder.collect_bindings(binds),
        }
    }
}
