use std::fmt;

use crate::{
    Result,
    bind::Binds,
    operator::Logic,
    writer::{FormatContext, FormatWriter},
};

use super::{
    CollectBindings, between::BetweenCondition, binary::BinaryCondition, column::ColumnCondition,
    exists::ExistsCondition, fncall::FunctionCondition, group::GroupCondition, r#in::InCondition,
    raw::RawCondition, unary::UnaryCondition,
};

#[derive(Debug, Clone)]
pub enum ConditionKind {
    Binary(BinaryCondition),
    Between(BetweenCondition),
    In(InCondition),
    Unary(UnaryCondition),
    Column(ColumnCondition),
    Function(FunctionCondition),
    Exists(ExistsCondition),
    Raw(RawCondition),
    Group(GroupCondition),
}

impl FormatWriter for ConditionKind {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        match self {
            ConditionKind::Binary(binary) => binary.format_writer(context),
            ConditionKind::Between(between) => between.format_writer(context),
            ConditionKind::In(inc) => inc.format_writer(context),
            ConditionKind::Unary(unary) => unary.format_writer(context),
            ConditionKind::Column(column) => column.format_writer(context),
            ConditionKind::Function(function) => function.format_writer(context),
            ConditionKind::Exists(exists) => exists.format_writer(context),
            ConditionKind::Raw(raw) => raw.format_writer(context),
            ConditionKind::Group(group) => group.format_writer(context),
        }
    }
}

impl CollectBindings for ConditionKind {
    fn collect_bindings(&self, binds: &mut Binds) {
        match self {
            ConditionKind::Binary(binary) => binary.collect_bindings(binds),
            ConditionKind::Between(between) => between.collect_bindings(binds),
            ConditionKind::In(inc) => inc.collect_bindings(binds),
            ConditionKind::Unary(_) | ConditionKind::Column(_) => {}
            ConditionKind::Function(function) => function.collect_bindings(binds),
            ConditionKind::Exists(exists) => exists.collect_bindings(binds),
            ConditionKind::Raw(raw) => raw.collect_bindings(binds),
            ConditionKind::Group(group) => group.collect_bindings(binds),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Condition {
    logic: Logic,
    kind: ConditionKind,
}

impl Condition {
    pub fn new(logic: Logic, kind: ConditionKind) -> Self {
        Self { logic, kind }
    }
}

/// An ordered predicate sequence. The first connective is never written.
#[derive(Debug, Default, Clone)]
pub struct Conditions(pub(crate) Vec<Condition>);

impl Conditions {
    pub fn push(&mut self, other: Condition) {
        self.0.push(other);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FormatWriter for Conditions {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        for (index, condition) in self.0.iter().enumerate() {
            if index > 0 {
                context.writer.write_char(' ')?;
                condition.logic.format_writer(context)?;
                context.writer.write_char(' ')?;
            }
            condition.kind.format_writer(context)?;
        }
        Ok(())
    }
}

impl CollectBindings for Conditions {
    fn collect_bindings(&self, binds: &mut Binds) {
        for condition in &self.0 {
            condition.kind.collect_bindings(binds);
        }
    }
}
