use std::fmt;

use crate::{
    Bind, Ident, Result,
    bind::Binds,
    writer::{FormatContext, FormatWriter},
};

use super::CollectBindings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BetweenOperator {
    Between,
    NotBetween,
}

impl BetweenOperator {
    pub fn new(negate: bool) -> Self {
        if negate { Self::NotBetween } else { Self::Between }
    }
}

impl FormatWriter for BetweenOperator {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        match self {
            BetweenOperator::Between => context.writer.write_str(" BETWEEN ")?,
            BetweenOperator::NotBetween => context.writer.write_str(" NOT BETWEEN ")?,
        }
        Ok(())
    }
}

/// `column[ NOT] BETWEEN ? AND ?`, binding `[low, high]`.
#[derive(Debug, Clone, PartialEq)]
pub struct BetweenCondition {
    pub(crate) column: Ident,
    pub(crate) low: Bind,
    pub(crate) high: Bind,
    pub(crate) operator: BetweenOperator,
}

impl FormatWriter for BetweenCondition {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        context.write_column(&self.column)?;
        self.operator.format_writer(context)?;
        context.write_placeholder()?;
        context.writer.write_str(" AND ")?;
        context.write_placeholder()
    }
}

impl CollectBindings for BetweenCondition {
    fn collect_bindings(&self, binds: &mut Binds) {
        binds.push(self.low.clone());
        binds.push(self.high.clone());
    }
}

#[cfg(test)]
mod tests {
    use crate::tests::format_writer_in;

    use super::*;

    #[test]
    fn test_not_between() {
        let condition = BetweenCondition {
            column: Ident::new_static("rating"),
            low: Bind::from(2),
            high: Bind::from(8),
            operator: BetweenOperator::new(true),
        };
        assert_eq!(
            "`movies`.`rating` NOT BETWEEN ? AND ?",
            format_writer_in(&condition, "movies")
        );
        let mut binds = Binds::new();
        condition.collect_bindings(&mut binds);
        assert_eq!(vec![Bind::from(2), Bind::from(8)], binds);
    }
}
