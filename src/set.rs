use std::fmt;

use crate::{
    Builder, Result,
    bind::Binds,
    expr::CollectBindings,
    writer::{FormatContext, FormatWriter},
};

/// `(first)\nUNION[ ALL]\n(second)...`
#[derive(Debug, Clone)]
pub struct UnionClause {
    pub(crate) members: Vec<Builder>,
    pub(crate) all: bool,
}

impl UnionClause {
    pub(crate) fn new(members: Vec<Builder>, all: bool) -> Self {
        Self { members, all }
    }

    fn keyword(&self) -> &'static str {
        if self.all { "UNION ALL" } else { "UNION" }
    }
}

impl FormatWriter for UnionClause {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        for (index, member) in self.members.iter().enumerate() {
            if index > 0 {
                write!(context.writer, "\n{}\n", self.keyword())?;
            }
            context.writer.write_char('(')?;
            member.format_writer(context)?;
            context.writer.write_char(')')?;
        }
        Ok(())
    }
}

impl CollectBindings for UnionClause {
    fn collect_bindings(&self, binds: &mut Binds) {
        for member in &self.members {
            member.collect_bindings(binds);
        }
    }
}
