use std::fmt;

use crate::{
    Ident, Result,
    dialect::QuoteChar,
    ident,
    operator::{JoinType, Operator},
    writer::{FormatContext, FormatWriter},
};

/// `TYPE table ON from_table.left<op>table.right`
#[derive(Debug, Clone, PartialEq)]
pub struct JoinClause {
    pub(crate) ty: JoinType,
    pub(crate) table: Ident,
    pub(crate) left: Ident,
    pub(crate) operator: Operator,
    pub(crate) right: Ident,
}

impl JoinClause {
    pub(crate) fn new(
        ty: JoinType,
        table: Ident,
        left: Ident,
        operator: Operator,
        right: Ident,
    ) -> Self {
        Self {
            ty,
            table,
            left,
            operator,
            right,
        }
    }
}

impl FormatWriter for JoinClause {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        self.ty.format_writer(context)?;
        context.writer.write_char(' ')?;
        context.write_quoted(self.table.as_str())?;
        context.writer.write_str(" ON ")?;
        context.write_column(&self.left)?;
        self.operator.format_writer(context)?;
        context.write_column_in(&self.right, self.table.table_name())
    }
}

/// Joins render on their own lines.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Joins(pub(crate) Vec<JoinClause>);

impl Joins {
    pub fn push(&mut self, join: JoinClause) {
        self.0.push(join);
    }
}

impl FormatWriter for Joins {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        for (index, join) in self.0.iter().enumerate() {
            if index > 0 {
                context.writer.write_char('\n')?;
            }
            context.writer.write_char(' ')?;
            join.format_writer(context)?;
        }
        Ok(())
    }
}

/// Drops a leading `table.` (quoted or not, any case) so the column can be
/// qualified against the table it belongs to.
pub(crate) fn strip_table_prefix(column: &str, table: &Ident, quote: QuoteChar) -> Ident {
    let column = ident::unquote(column, quote);
    let column = column.trim();
    let table = ident::unquote(table.as_str(), quote);
    let (name, alias) = ident::split_alias(&table);

    let stripped = [Some(name), alias]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|prefix| !prefix.is_empty())
        .find_map(|prefix| {
            let (head, tail) = column.split_at_checked(prefix.len())?;
            let tail = tail.strip_prefix('.')?;
            head.eq_ignore_ascii_case(prefix).then_some(tail)
        });
    Ident::new(stripped.unwrap_or(column))
}

#[cfg(test)]
mod tests {
    use crate::tests::format_writer_in;

    use super::*;

    #[test]
    fn test_strip_table_prefix() {
        let emails = Ident::new_static("emails");
        let q = QuoteChar::Backtick;
        assert_eq!("contact_id", strip_table_prefix("emails.contact_id", &emails, q).as_str());
        assert_eq!("contact_id", strip_table_prefix("`emails`.`contact_id`", &emails, q).as_str());
        assert_eq!("contact_id", strip_table_prefix("EMAILS.contact_id", &emails, q).as_str());
        assert_eq!("contact_id", strip_table_prefix("contact_id", &emails, q).as_str());
        assert_eq!("emails_id", strip_table_prefix("emails_id", &emails, q).as_str());
        assert_eq!("users.id", strip_table_prefix("users.id", &emails, q).as_str());

        let aliased = Ident::new_static("emails AS e");
        assert_eq!("contact_id", strip_table_prefix("e.contact_id", &aliased, q).as_str());
    }

    #[test]
    fn test_joins_on_separate_lines() {
        let mut joins = Joins::default();
        joins.push(JoinClause::new(
            JoinType::Plain,
            Ident::new_static("addresses"),
            Ident::new_static("id"),
            Operator::Eq,
            Ident::new_static("contact_id"),
        ));
        joins.push(JoinClause::new(
            JoinType::Left,
            Ident::new_static("emails"),
            Ident::new_static("id"),
            Operator::NotEq,
            Ident::new_static("contact_id"),
        ));
        assert_eq!(
            " JOIN `addresses` ON `contacts`.`id`=`addresses`.`contact_id`\n LEFT JOIN `emails` ON `contacts`.`id`<>`emails`.`contact_id`",
            format_writer_in(&joins, "contacts")
        );
    }
}
