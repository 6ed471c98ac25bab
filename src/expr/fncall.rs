use std::fmt;

use quarry_derive::WhereFunction;

use crate::{
    Bind, Ident, Result,
    bind::Binds,
    operator::Operator,
    writer::{FormatContext, FormatWriter},
};

use super::CollectBindings;

/// Date and time functions a column can be wrapped in before comparing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, WhereFunction)]
pub enum Function {
    Time,
    Hour,
    Minute,
    Date,
    Day,
    Month,
    Year,
    Week,
    Weekday,
    Quarter,
}

impl Function {
    pub fn as_str(self) -> &'static str {
        match self {
            Function::Time => "TIME",
            Function::Hour => "HOUR",
            Function::Minute => "MINUTE",
            Function::Date => "DATE",
            Function::Day => "DAY",
            Function::Month => "MONTH",
            Function::Year => "YEAR",
            Function::Week => "WEEK",
            Function::Weekday => "WEEKDAY",
            Function::Quarter => "QUARTER",
        }
    }

    /// Method name reported when the predicate is rejected.
    pub fn method(self) -> &'static str {
        match self {
            Function::Time => "where_time",
            Function::Hour => "where_hour",
            Function::Minute => "where_minute",
            Function::Date => "where_date",
            Function::Day => "where_day",
            Function::Month => "where_month",
            Function::Year => "where_year",
            Function::Week => "where_week",
            Function::Weekday => "where_weekday",
            Function::Quarter => "where_quarter",
        }
    }
}

/// `FUNC(column)<op>?`
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCondition {
    pub(crate) function: Function,
    pub(crate) column: Ident,
    pub(crate) operator: Operator,
    pub(crate) value: Bind,
}

impl FormatWriter for FunctionCondition {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        context.writer.write_str(self.function.as_str())?;
        context.writer.write_char('(')?;
        context.write_column(&self.column)?;
        context.writer.write_char(')')?;
        self.operator.format_writer(context)?;
        context.write_placeholder()
    }
}

impl CollectBindings for FunctionCondition {
    fn collect_bindings(&self, binds: &mut Binds) {
        binds.push(self.value.clone());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateFunction {
    Avg,
    Count,
    Max,
    Min,
    Sum,
}

impl AggregateFunction {
    pub fn as_str(self) -> &'static str {
        match self {
            AggregateFunction::Avg => "AVG",
            AggregateFunction::Count => "COUNT",
            AggregateFunction::Max => "MAX",
            AggregateFunction::Min => "MIN",
            AggregateFunction::Sum => "SUM",
        }
    }

    /// Lowercase name, the default alias and the method name.
    pub fn name(self) -> &'static str {
        match self {
            AggregateFunction::Avg => "avg",
            AggregateFunction::Count => "count",
            AggregateFunction::Max => "max",
            AggregateFunction::Min => "min",
            AggregateFunction::Sum => "sum",
        }
    }
}

/// `FUNC(column) AS alias` select item.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate {
    pub(crate) function: AggregateFunction,
    pub(crate) column: Ident,
    pub(crate) alias: Ident,
}

impl Aggregate {
    pub fn new(function: AggregateFunction, column: Ident, alias: Ident) -> Self {
        Self {
            function,
            column,
            alias,
        }
    }
}

impl FormatWriter for Aggregate {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        context.writer.write_str(self.function.as_str())?;
        context.writer.write_char('(')?;
        if self.column.is_wildcard() {
            context.writer.write_char('*')?;
        } else {
            context.write_column(&self.column)?;
        }
        context.writer.write_str(") AS ")?;
        context.write_quoted(self.alias.as_str())
    }
}

#[cfg(test)]
mod tests {
    use crate::tests::format_writer_in;

    use super::*;

    #[test]
    fn test_function_condition() {
        let condition = FunctionCondition {
            function: Function::Weekday,
            column: Ident::new_static("release_date"),
            operator: Operator::NotEq,
            value: Bind::from(6),
        };
        assert_eq!(
            "WEEKDAY(`movies`.`release_date`)<>?",
            format_writer_in(&condition, "movies")
        );
    }

    #[test]
    fn test_count_wildcard() {
        let count = Aggregate::new(
            AggregateFunction::Count,
            Ident::new_static("*"),
            Ident::new_static("count"),
        );
        assert_eq!("COUNT(*) AS `count`", format_writer_in(&count, "movies"));
    }
}
