use std::fmt;

use crate::{
    Error, Result,
    writer::{FormatContext, FormatWriter},
};

/// Comparison operators accepted in predicates and joins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    NotEq,
    BangEq,
    Gt,
    Gte,
    Lt,
    Lte,
    Like,
}

impl Operator {
    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::NotEq => "<>",
            Operator::BangEq => "!=",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Lt => "<",
            Operator::Lte => "<=",
            Operator::Like => "LIKE",
        }
    }

    /// Case insensitive match against the allowed operator set.
    pub fn parse(value: &str, method: &'static str) -> Result<Self> {
        let operator = match value.to_uppercase().as_str() {
            "=" => Operator::Eq,
            "<>" => Operator::NotEq,
            "!=" => Operator::BangEq,
            ">" => Operator::Gt,
            ">=" => Operator::Gte,
            "<" => Operator::Lt,
            "<=" => Operator::Lte,
            "LIKE" => Operator::Like,
            _ => {
                return Err(Error::InvalidOperator {
                    method,
                    value: value.to_string(),
                });
            }
        };
        Ok(operator)
    }

    /// Exact, case sensitive match against the operator tokens, used by the
    /// join shorthand. A column named `like` is not an operator here.
    pub fn is_operator(value: &str) -> bool {
        ["=", "<>", "!=", ">", ">=", "<", "<=", "LIKE"].contains(&value)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FormatWriter for Operator {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        // word operators need surrounding spaces, symbols are written tight
        let sql = self.as_str();
        if sql.len() > 2 {
            write!(context.writer, " {sql} ")?;
        } else {
            context.writer.write_str(sql)?;
        }
        Ok(())
    }
}

pub trait IntoOperator {
    fn into_operator(self, method: &'static str) -> Result<Operator>;
}

impl IntoOperator for Operator {
    fn into_operator(self, _method: &'static str) -> Result<Operator> {
        Ok(self)
    }
}

impl IntoOperator for &str {
    fn into_operator(self, method: &'static str) -> Result<Operator> {
        Operator::parse(self, method)
    }
}

impl IntoOperator for String {
    fn into_operator(self, method: &'static str) -> Result<Operator> {
        Operator::parse(&self, method)
    }
}

/// Connective rendered before every predicate but the first of a sequence.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Logic {
    #[default]
    And,
    Or,
    Xor,
}

impl Logic {
    pub fn as_str(self) -> &'static str {
        match self {
            Logic::And => "AND",
            Logic::Or => "OR",
            Logic::Xor => "XOR",
        }
    }

    /// Exact, case sensitive match.
    pub fn parse(value: &str, method: &'static str) -> Result<Self> {
        match value {
            "AND" => Ok(Logic::And),
            "OR" => Ok(Logic::Or),
            "XOR" => Ok(Logic::Xor),
            _ => Err(Error::InvalidLogic {
                method,
                value: value.to_string(),
            }),
        }
    }
}

impl FormatWriter for Logic {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        context.writer.write_str(self.as_str())?;
        Ok(())
    }
}

pub trait IntoLogic {
    fn into_logic(self, method: &'static str) -> Result<Logic>;
}

impl IntoLogic for Logic {
    fn into_logic(self, _method: &'static str) -> Result<Logic> {
        Ok(self)
    }
}

impl IntoLogic for &str {
    fn into_logic(self, method: &'static str) -> Result<Logic> {
        Logic::parse(self, method)
    }
}

/// Sort direction of a group or order entry. Ascending is never written, so
/// only the descending case has a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Desc,
}

impl Direction {
    /// Looks at the first three lowercase characters: `asc` is ascending,
    /// `dsc` and `des` are descending, anything else is rejected.
    pub fn parse(value: &str, method: &'static str) -> Result<Option<Self>> {
        let prefix: String = value.chars().take(3).collect::<String>().to_lowercase();
        match prefix.as_str() {
            "asc" => Ok(None),
            "dsc" | "des" => Ok(Some(Direction::Desc)),
            _ => Err(Error::InvalidDirection {
                method,
                value: value.to_string(),
            }),
        }
    }

    pub fn parse_optional(value: Option<&str>, method: &'static str) -> Result<Option<Self>> {
        match value {
            Some(value) => Self::parse(value, method),
            None => Ok(None),
        }
    }
}

impl FormatWriter for Direction {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        match self {
            Direction::Desc => context.writer.write_str("DESC")?,
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    #[default]
    Plain,
    Inner,
    Outer,
    Left,
    Right,
    Full,
    SelfJoin,
    Cross,
}

impl JoinType {
    /// Case insensitive. Unknown names fall back to a bare `JOIN`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_uppercase().as_str() {
            "INNER" => JoinType::Inner,
            "OUTER" => JoinType::Outer,
            "LEFT" => JoinType::Left,
            "RIGHT" => JoinType::Right,
            "FULL" => JoinType::Full,
            "SELF" => JoinType::SelfJoin,
            "CROSS" => JoinType::Cross,
            _ => JoinType::Plain,
        }
    }
}

impl FormatWriter for JoinType {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        let sql = match self {
            JoinType::Plain => "JOIN",
            JoinType::Inner => "INNER JOIN",
            JoinType::Outer => "OUTER JOIN",
            JoinType::Left => "LEFT JOIN",
            JoinType::Right => "RIGHT JOIN",
            JoinType::Full => "FULL JOIN",
            JoinType::SelfJoin => "SELF JOIN",
            JoinType::Cross => "CROSS JOIN",
        };
        context.writer.write_str(sql)?;
        Ok(())
    }
}
