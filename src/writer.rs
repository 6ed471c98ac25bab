use std::{fmt::Write, ops::Deref};

use smol_str::SmolStr;

use crate::{
    Result,
    dialect::QuoteChar,
    ident::{self, Ident},
};

pub(crate) trait FormatWriter {
    fn format_writer<W: Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()>;
}

pub(crate) struct FormatContext<'a, W: Write> {
    pub(crate) writer: &'a mut W,
    pub(crate) quote: QuoteChar,
    /// Table unqualified column references are qualified with.
    pub(crate) table: Option<SmolStr>,
    pub(crate) placeholder: usize,
}

impl<'a, W: Write> FormatContext<'a, W> {
    pub fn new(writer: &'a mut W, quote: QuoteChar) -> Self {
        Self {
            writer,
            quote,
            table: None,
            placeholder: 0,
        }
    }

    /// Runs `f` with another quote character and qualifying table, restoring
    /// the outer ones afterwards. Used when a statement renders a subquery.
    pub(crate) fn scoped<F>(&mut self, quote: QuoteChar, table: Option<SmolStr>, f: F) -> Result<()>
    where
        F: FnOnce(&mut Self) -> Result<()>,
    {
        let outer_quote = std::mem::replace(&mut self.quote, quote);
        let outer_table = std::mem::replace(&mut self.table, table);
        let result = f(self);
        self.quote = outer_quote;
        self.table = outer_table;
        result
    }

    /// Writes one identifier segment wrapped in the quote character. Quote
    /// characters inside the segment are dropped and `*` is left bare.
    pub(crate) fn write_ident(&mut self, part: &str) -> Result<()> {
        if part == "*" {
            self.writer.write_char('*')?;
            return Ok(());
        }

        let quote = self.quote.as_char();
        self.writer.write_char(quote)?;
        for char in part.chars().filter(|c| *c != quote) {
            self.writer.write_char(char)?;
        }
        self.writer.write_char(quote)?;
        Ok(())
    }

    /// Quotes every dot separated segment and both sides of an ` AS ` alias.
    pub(crate) fn write_quoted(&mut self, value: &str) -> Result<()> {
        let mut rest = value;
        loop {
            let (reference, alias) = ident::split_alias(rest);
            for (index, part) in reference.split('.').enumerate() {
                if index > 0 {
                    self.writer.write_char('.')?;
                }
                self.write_ident(part)?;
            }
            match alias {
                Some(alias) => {
                    self.writer.write_str(" AS ")?;
                    rest = alias;
                }
                None => return Ok(()),
            }
        }
    }

    /// Qualifies with the current table, then quotes.
    pub(crate) fn write_column(&mut self, column: &Ident) -> Result<()> {
        let qualified = ident::qualify(column.as_str(), self.table.as_deref(), self.quote);
        self.write_quoted(&qualified)
    }

    /// Qualifies with an explicit table, then quotes.
    pub(crate) fn write_column_in(&mut self, column: &Ident, table: &str) -> Result<()> {
        let qualified = ident::qualify(column.as_str(), Some(table), self.quote);
        self.write_quoted(&qualified)
    }

    pub(crate) fn write_placeholder(&mut self) -> Result<()> {
        self.placeholder += 1;
        self.writer.write_char('?')?;
        Ok(())
    }

    /// `?,?,?` for `count` values.
    pub(crate) fn write_placeholders(&mut self, count: usize) -> Result<()> {
        for index in 0..count {
            if index > 0 {
                self.writer.write_char(',')?;
            }
            self.write_placeholder()?;
        }
        Ok(())
    }
}

impl<D> FormatWriter for D
where
    D: Deref,
    D::Target: FormatWriter,
{
    fn format_writer<W: Write>(&self, ctx: &mut FormatContext<'_, W>) -> Result<()> {
        self.deref().format_writer(ctx)
    }
}
