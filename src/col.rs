use std::fmt;

use smol_str::SmolStr;

use crate::{
    Ident, Raw, Result,
    expr::fncall::Aggregate,
    writer::{FormatContext, FormatWriter},
};

#[derive(Debug, Clone, PartialEq)]
pub enum SelectItem {
    Plain(Ident),
    Raw(Raw),
    Aggregate(Aggregate),
}

impl FormatWriter for SelectItem {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        match self {
            SelectItem::Plain(ident) => context.write_column(ident),
            SelectItem::Raw(raw) => raw.format_writer(context),
            SelectItem::Aggregate(aggregate) => aggregate.format_writer(context),
        }
    }
}

/// The select list, rendered as `*` while empty.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Columns(pub(crate) Vec<SelectItem>);

impl Columns {
    pub fn push(&mut self, item: SelectItem) {
        self.0.push(item);
    }
}

impl FormatWriter for Columns {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        if self.0.is_empty() {
            context.writer.write_char('*')?;
            return Ok(());
        }
        for (index, item) in self.0.iter().enumerate() {
            if index > 0 {
                context.writer.write_char(',')?;
            }
            item.format_writer(context)?;
        }
        Ok(())
    }
}

/// Select input: a comma delimited string or a sequence of entries.
pub trait IntoColumns {
    fn into_columns(self) -> Vec<SmolStr>;
}

impl IntoColumns for &str {
    fn into_columns(self) -> Vec<SmolStr> {
        self.split(',').map(SmolStr::new).collect()
    }
}

impl IntoColumns for String {
    fn into_columns(self) -> Vec<SmolStr> {
        self.as_str().into_columns()
    }
}

impl IntoColumns for &String {
    fn into_columns(self) -> Vec<SmolStr> {
        self.as_str().into_columns()
    }
}

impl<const N: usize> IntoColumns for [&str; N] {
    fn into_columns(self) -> Vec<SmolStr> {
        self.into_iter().map(SmolStr::new).collect()
    }
}

impl<const N: usize> IntoColumns for [String; N] {
    fn into_columns(self) -> Vec<SmolStr> {
        self.into_iter().map(SmolStr::from).collect()
    }
}

impl IntoColumns for &[&str] {
    fn into_columns(self) -> Vec<SmolStr> {
        self.iter().map(|column| SmolStr::new(column)).collect()
    }
}

impl IntoColumns for Vec<&str> {
    fn into_columns(self) -> Vec<SmolStr> {
        self.into_iter().map(SmolStr::new).collect()
    }
}

impl IntoColumns for Vec<String> {
    fn into_columns(self) -> Vec<SmolStr> {
        self.into_iter().map(SmolStr::from).collect()
    }
}
