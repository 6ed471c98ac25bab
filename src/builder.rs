use std::{fmt, io, mem};

use quarry_derive::variant;
use smol_str::SmolStr;

use crate::{
    Bind, Error, Ident, IntoBind, IntoBinds, IntoIdent, IntoLogic, IntoOperator, IntoRaw, Logic,
    Operator, Raw, Result,
    bind::Binds,
    col::{Columns, IntoColumns, SelectItem},
    config::Config,
    dialect::{HasDialect, QuoteChar},
    expr::{
        CollectBindings,
        between::{BetweenCondition, BetweenOperator},
        binary::BinaryCondition,
        column::ColumnCondition,
        cond::{Condition, ConditionKind, Conditions},
        exists::{ExistsCondition, ExistsOperator},
        fncall::{Aggregate, AggregateFunction, Function, FunctionCondition},
        group::GroupCondition,
        r#in::{InCondition, InOperator},
        list::InList,
        order::{self, IntoSortInput, SortMap},
        raw::RawCondition,
        unary::{UnaryCondition, UnaryOperator},
    },
    ident::{self, IntoReferenceChars},
    join::{self, JoinClause, Joins},
    operator::JoinType,
    paginate::{IntoCount, Paginator},
    row::{IntoRow, IntoRows, Row},
    set::UnionClause,
    writer::{FormatContext, FormatWriter},
};

/// Where a builder is in its life cycle.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// Nothing set since construction or the last reset.
    #[default]
    Fresh,
    Building,
    /// Rendered at least once. The next `from`, `table`, `select` or
    /// `select_raw` starts over from a clean statement.
    Compiled,
}

#[derive(Debug, Default, Clone)]
enum QueryKind {
    #[default]
    Select,
    Insert(Vec<Row>),
    Update(Row),
    Delete,
    Truncate,
    Union(UnionClause),
}

impl QueryKind {
    fn name(&self) -> &'static str {
        match self {
            QueryKind::Select => "select",
            QueryKind::Insert(_) => "insert",
            QueryKind::Update(_) => "update",
            QueryKind::Delete => "delete",
            QueryKind::Truncate => "truncate",
            QueryKind::Union(_) => "union",
        }
    }
}

/// A fluent, in-memory SQL statement.
///
/// Clauses accumulate through `&mut self` calls and are rendered on demand by
/// [`Builder::to_sql`] and [`Builder::params`]. Every reference is validated
/// when it is handed in; the few checks that need the whole statement (a
/// missing table, an offset without a limit, insert rows with different
/// columns) run at render time.
#[derive(Debug, Default, Clone)]
pub struct Builder {
    config: Config,
    state: State,
    kind: QueryKind,
    // set by the first kind-establishing call, after which the kind is fixed
    explicit_kind: bool,
    distinct: bool,
    maybe_table: Option<Ident>,
    columns: Columns,
    joins: Joins,
    wheres: Conditions,
    group_by: SortMap,
    havings: Conditions,
    order_by: SortMap,
    paginator: Paginator,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// A builder quoting for the database `D`.
    pub fn dialect<D: HasDialect>() -> Self {
        Self::with_config(Config::for_dialect(D::DIALECT))
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn state(&self) -> State {
        self.state
    }

    fn touch(&mut self) {
        if self.state == State::Fresh {
            self.state = State::Building;
        }
    }

    fn reset_if_compiled(&mut self) {
        if self.state == State::Compiled {
            tracing::trace!(kind = self.kind.name(), "builder reused after compile, starting over");
            self.reset();
        }
    }

    fn set_kind(&mut self, method: &'static str, kind: QueryKind) -> Result<()> {
        let conflicts = mem::discriminant(&self.kind) != mem::discriminant(&kind)
            || matches!(kind, QueryKind::Union(_));
        if self.explicit_kind && conflicts {
            return Err(Error::ConflictingKind {
                method,
                previous: self.kind.name(),
            });
        }
        self.kind = kind;
        self.explicit_kind = true;
        self.touch();
        Ok(())
    }

    /// A builder for a nested group or subquery. It shares the quoting
    /// configuration and, when `bind_table` is set, the current table.
    fn child(&self, bind_table: bool) -> Builder {
        Builder {
            config: self.config.clone(),
            maybe_table: if bind_table { self.maybe_table.clone() } else { None },
            ..Builder::default()
        }
    }

    fn reference<T: IntoIdent>(&self, value: T, method: &'static str) -> Result<Ident> {
        let value = value.into_ident();
        ident::validate_reference(value.as_str(), &self.config, method)?;
        Ok(Ident::new(value.as_str().trim()))
    }

    fn push_where(&mut self, logic: Logic, kind: ConditionKind) {
        self.wheres.push(Condition::new(logic, kind));
        self.touch();
    }

    fn push_having(&mut self, logic: Logic, kind: ConditionKind) {
        self.havings.push(Condition::new(logic, kind));
        self.touch();
    }

    // table and select list

    pub fn from<T: IntoIdent>(&mut self, table: T) -> Result<&mut Self> {
        self.set_table(table, "from")
    }

    /// Alias of [`Builder::from`].
    pub fn table<T: IntoIdent>(&mut self, table: T) -> Result<&mut Self> {
        self.set_table(table, "table")
    }

    fn set_table<T: IntoIdent>(&mut self, table: T, method: &'static str) -> Result<&mut Self> {
        self.reset_if_compiled();
        let table = self.reference(table, method)?;
        self.maybe_table = Some(table);
        self.touch();
        Ok(self)
    }

    /// Appends validated columns, given as a comma separated string or a
    /// sequence of references.
    pub fn select<C: IntoColumns>(&mut self, columns: C) -> Result<&mut Self> {
        self.reset_if_compiled();
        let columns = columns
            .into_columns()
            .into_iter()
            .map(|column| self.reference(column, "select"))
            .collect::<Result<Vec<_>>>()?;
        self.set_kind("select", QueryKind::Select)?;
        for column in columns {
            self.columns.push(SelectItem::Plain(column));
        }
        Ok(self)
    }

    /// Appends trusted fragments, written exactly as given. A comma
    /// separated string keeps the whitespace around each piece.
    pub fn select_raw<C: IntoColumns>(&mut self, columns: C) -> Result<&mut Self> {
        self.reset_if_compiled();
        self.set_kind("select_raw", QueryKind::Select)?;
        for column in columns.into_columns() {
            self.columns.push(SelectItem::Raw(Raw::new(column)));
        }
        Ok(self)
    }

    pub fn distinct(&mut self) -> &mut Self {
        self.distinct = true;
        self.touch();
        self
    }

    fn aggregate(
        &mut self,
        function: AggregateFunction,
        column: Option<&str>,
        alias: Option<&str>,
    ) -> Result<&mut Self> {
        let method = function.name();
        let column = column.map_or("*", str::trim);
        if column == "*" && function != AggregateFunction::Count {
            return Err(Error::invalid_reference(method, column));
        }
        let column = self.reference(column, method)?;
        let alias = self.reference(alias.unwrap_or(method), method)?;
        self.set_kind(method, QueryKind::Select)?;
        self.columns
            .push(SelectItem::Aggregate(Aggregate::new(function, column, alias)));
        Ok(self)
    }

    /// `COUNT(column) AS alias`, counting every row when no column is given.
    pub fn count(&mut self, column: Option<&str>, alias: Option<&str>) -> Result<&mut Self> {
        self.aggregate(AggregateFunction::Count, column, alias)
    }

    pub fn avg(&mut self, column: Option<&str>, alias: Option<&str>) -> Result<&mut Self> {
        self.aggregate(AggregateFunction::Avg, column, alias)
    }

    pub fn min(&mut self, column: Option<&str>, alias: Option<&str>) -> Result<&mut Self> {
        self.aggregate(AggregateFunction::Min, column, alias)
    }

    pub fn max(&mut self, column: Option<&str>, alias: Option<&str>) -> Result<&mut Self> {
        self.aggregate(AggregateFunction::Max, column, alias)
    }

    pub fn sum(&mut self, column: Option<&str>, alias: Option<&str>) -> Result<&mut Self> {
        self.aggregate(AggregateFunction::Sum, column, alias)
    }

    // joins

    /// `JOIN table ON from.id=table.from_id`
    pub fn join<T: IntoIdent>(&mut self, table: T) -> Result<&mut Self> {
        self.join_with(table, None, None, None, None)
    }

    pub fn join_on<T: IntoIdent>(&mut self, table: T, left: &str, right: &str) -> Result<&mut Self> {
        self.join_with(table, Some(left), Some(right), None, None)
    }

    /// Either `(left, operator, right)` or `(left, right, operator)`.
    pub fn join_on_op<T: IntoIdent>(
        &mut self,
        table: T,
        left: &str,
        middle: &str,
        last: &str,
    ) -> Result<&mut Self> {
        self.join_with(table, Some(left), Some(middle), Some(last), None)
    }

    pub fn left_join<T: IntoIdent>(&mut self, table: T, left: &str, right: &str) -> Result<&mut Self> {
        self.join_with(table, Some(left), Some(right), None, Some("LEFT"))
    }

    pub fn right_join<T: IntoIdent>(&mut self, table: T, left: &str, right: &str) -> Result<&mut Self> {
        self.join_with(table, Some(left), Some(right), None, Some("RIGHT"))
    }

    pub fn inner_join<T: IntoIdent>(&mut self, table: T, left: &str, right: &str) -> Result<&mut Self> {
        self.join_with(table, Some(left), Some(right), None, Some("INNER"))
    }

    /// Full join form. `left` defaults to the `id` of the current table and
    /// `right` to `<current table>_id` on the joined table. When `right` is
    /// an operator token it swaps places with `operator`.
    pub fn join_with<T: IntoIdent>(
        &mut self,
        table: T,
        left: Option<&str>,
        right: Option<&str>,
        operator: Option<&str>,
        join_type: Option<&str>,
    ) -> Result<&mut Self> {
        const METHOD: &str = "join";
        let Some(from) = self.maybe_table.clone() else {
            return Err(Error::invalid_argument(
                METHOD,
                "The join() method requires the parent table to be set using the from() or table() methods",
            ));
        };
        let table = self.reference(table, METHOD)?;

        let (right, operator) = match right {
            Some(token) if Operator::is_operator(token) => (operator, Some(token)),
            _ => (right, operator),
        };
        let operator = match operator {
            Some(operator) => Operator::parse(operator, METHOD)?,
            None => Operator::Eq,
        };

        let quote = self.config.quote;
        let left = match left {
            Some(left) => {
                ident::validate_reference(left, &self.config, METHOD)?;
                join::strip_table_prefix(left, &from, quote)
            }
            None => Ident::new_static("id"),
        };
        let right = match right {
            Some(right) => {
                ident::validate_reference(right, &self.config, METHOD)?;
                join::strip_table_prefix(right, &table, quote)
            }
            None => {
                let (name, _) = ident::split_alias(from.as_str());
                Ident::new(format!("{}_id", ident::unquote(name.trim(), quote)))
            }
        };

        let ty = JoinType::parse(join_type.unwrap_or_default());
        self.joins
            .push(JoinClause::new(ty, table, left, operator, right));
        self.touch();
        Ok(self)
    }

    // where

    #[variant(where_eq, not)]
    fn where_eq_expr<C, V>(&mut self, logic: Logic, negate: bool, column: C, value: V) -> Result<&mut Self>
    where
        C: IntoIdent,
        V: IntoBind,
    {
        self.where_binary_expr(logic, negate, column, Operator::Eq, value)
    }

    #[variant(where_op, not)]
    fn where_op_expr<C, O, V>(
        &mut self,
        logic: Logic,
        negate: bool,
        column: C,
        operator: O,
        value: V,
    ) -> Result<&mut Self>
    where
        C: IntoIdent,
        O: IntoOperator,
        V: IntoBind,
    {
        self.where_binary_expr(logic, negate, column, operator, value)
    }

    /// Full form of a single comparison, with the connective given as
    /// `"AND"`, `"OR"` or `"XOR"`.
    pub fn where_clause<C, O, V, L>(
        &mut self,
        column: C,
        operator: O,
        value: V,
        logic: L,
        negate: bool,
    ) -> Result<&mut Self>
    where
        C: IntoIdent,
        O: IntoOperator,
        V: IntoBind,
        L: IntoLogic,
    {
        let logic = logic.into_logic("where")?;
        self.where_binary_expr(logic, negate, column, operator, value)
    }

    pub fn where_binary_expr<C, O, V>(
        &mut self,
        logic: Logic,
        negate: bool,
        column: C,
        operator: O,
        value: V,
    ) -> Result<&mut Self>
    where
        C: IntoIdent,
        O: IntoOperator,
        V: IntoBind,
    {
        let column = self.reference(column, "where")?;
        let operator = operator.into_operator("where")?;
        let binary = BinaryCondition {
            column,
            operator,
            value: value.into_bind(),
            negate,
        };
        self.push_where(logic, ConditionKind::Binary(binary));
        Ok(self)
    }

    /// Parenthesized predicates built by `callback` on a child bound to the
    /// current table. Skipped when the callback adds nothing.
    #[variant(where_group, not)]
    fn where_group_expr<F>(&mut self, logic: Logic, negate: bool, callback: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut Builder) -> Result<&mut Builder>,
    {
        let mut child = self.child(true);
        callback(&mut child)?;
        if !child.wheres.is_empty() {
            let group = GroupCondition {
                conditions: child.wheres,
                negate,
            };
            self.push_where(logic, ConditionKind::Group(group));
        }
        Ok(self)
    }

    #[variant(where_between, not)]
    fn where_between_expr<C, L, H>(
        &mut self,
        logic: Logic,
        negate: bool,
        column: C,
        low: L,
        high: H,
    ) -> Result<&mut Self>
    where
        C: IntoIdent,
        L: IntoBind,
        H: IntoBind,
    {
        let column = self.reference(column, "where_between")?;
        let between = BetweenCondition {
            column,
            low: low.into_bind(),
            high: high.into_bind(),
            operator: BetweenOperator::new(negate),
        };
        self.push_where(logic, ConditionKind::Between(between));
        Ok(self)
    }

    #[variant(where_in, not)]
    fn where_in_expr<C, V>(&mut self, logic: Logic, negate: bool, column: C, values: V) -> Result<&mut Self>
    where
        C: IntoIdent,
        V: IntoBinds,
    {
        let column = self.reference(column, "where_in")?;
        let values = values.into_binds();
        if values.is_empty() {
            return Err(Error::invalid_argument("where_in", "requires at least one value"));
        }
        let condition = InCondition {
            column,
            list: InList::Binds(values),
            operator: InOperator::new(negate),
        };
        self.push_where(logic, ConditionKind::In(condition));
        Ok(self)
    }

    /// `column IN (subquery)`. The child starts without a table, so the
    /// callback names its own with `from`.
    #[variant(where_in_sub, not)]
    fn where_in_sub_expr<C, F>(&mut self, logic: Logic, negate: bool, column: C, callback: F) -> Result<&mut Self>
    where
        C: IntoIdent,
        F: FnOnce(&mut Builder) -> Result<&mut Builder>,
    {
        let column = self.reference(column, "where_in")?;
        let mut child = self.child(false);
        callback(&mut child)?;
        let condition = InCondition {
            column,
            list: InList::Subquery(Box::new(child)),
            operator: InOperator::new(negate),
        };
        self.push_where(logic, ConditionKind::In(condition));
        Ok(self)
    }

    #[variant(where_null, not)]
    fn where_null_expr<C>(&mut self, logic: Logic, negate: bool, column: C) -> Result<&mut Self>
    where
        C: IntoIdent,
    {
        let column = self.reference(column, "where_null")?;
        let unary = UnaryCondition {
            column,
            operator: UnaryOperator::new(negate),
        };
        self.push_where(logic, ConditionKind::Unary(unary));
        Ok(self)
    }

    #[variant(where_column)]
    fn where_column_expr<L, R>(&mut self, logic: Logic, lhs: L, rhs: R) -> Result<&mut Self>
    where
        L: IntoIdent,
        R: IntoIdent,
    {
        self.where_column_op_expr(logic, lhs, Operator::Eq, rhs)
    }

    #[variant(where_column_op)]
    fn where_column_op_expr<L, O, R>(&mut self, logic: Logic, lhs: L, operator: O, rhs: R) -> Result<&mut Self>
    where
        L: IntoIdent,
        O: IntoOperator,
        R: IntoIdent,
    {
        let lhs = self.reference(lhs, "where_column")?;
        let operator = operator.into_operator("where_column")?;
        let rhs = self.reference(rhs, "where_column")?;
        let column = ColumnCondition { lhs, operator, rhs };
        self.push_where(logic, ConditionKind::Column(column));
        Ok(self)
    }

    /// `EXISTS (subquery)` built on a child bound to the current table.
    #[variant(where_exists, not)]
    fn where_exists_expr<F>(&mut self, logic: Logic, negate: bool, callback: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut Builder) -> Result<&mut Builder>,
    {
        let mut child = self.child(true);
        callback(&mut child)?;
        let exists = ExistsCondition {
            subquery: Box::new(child),
            operator: ExistsOperator::new(negate),
        };
        self.push_where(logic, ConditionKind::Exists(exists));
        Ok(self)
    }

    /// A trusted fragment with one bound value per `?` it contains.
    #[variant(where_raw, not)]
    fn where_raw_expr<R, B>(&mut self, logic: Logic, negate: bool, fragment: R, binds: B) -> Result<&mut Self>
    where
        R: IntoRaw,
        B: IntoBinds,
    {
        let raw = fragment.into_raw();
        let binds = binds.into_binds();
        let expected = raw.placeholder_count();
        if expected != binds.len() {
            return Err(Error::invalid_argument(
                "where_raw",
                format!(
                    "the fragment has {expected} placeholders but {} values were bound",
                    binds.len()
                ),
            ));
        }
        let condition = RawCondition { raw, binds, negate };
        self.push_where(logic, ConditionKind::Raw(condition));
        Ok(self)
    }

    pub(crate) fn where_function_expr<C, O, V>(
        &mut self,
        logic: Logic,
        function: Function,
        column: C,
        operator: O,
        value: V,
    ) -> Result<&mut Self>
    where
        C: IntoIdent,
        O: IntoOperator,
        V: IntoBind,
    {
        let method = function.method();
        let column = self.reference(column, method)?;
        let operator = operator.into_operator(method)?;
        let condition = FunctionCondition {
            function,
            column,
            operator,
            value: value.into_bind(),
        };
        self.push_where(logic, ConditionKind::Function(condition));
        Ok(self)
    }

    // having

    #[variant(having_eq, not)]
    fn having_eq_expr<C, V>(&mut self, logic: Logic, negate: bool, column: C, value: V) -> Result<&mut Self>
    where
        C: IntoIdent,
        V: IntoBind,
    {
        self.having_binary_expr(logic, negate, column, Operator::Eq, value)
    }

    #[variant(having_op, not)]
    fn having_op_expr<C, O, V>(
        &mut self,
        logic: Logic,
        negate: bool,
        column: C,
        operator: O,
        value: V,
    ) -> Result<&mut Self>
    where
        C: IntoIdent,
        O: IntoOperator,
        V: IntoBind,
    {
        self.having_binary_expr(logic, negate, column, operator, value)
    }

    pub fn having_clause<C, O, V, L>(
        &mut self,
        column: C,
        operator: O,
        value: V,
        logic: L,
        negate: bool,
    ) -> Result<&mut Self>
    where
        C: IntoIdent,
        O: IntoOperator,
        V: IntoBind,
        L: IntoLogic,
    {
        let logic = logic.into_logic("having")?;
        self.having_binary_expr(logic, negate, column, operator, value)
    }

    pub fn having_binary_expr<C, O, V>(
        &mut self,
        logic: Logic,
        negate: bool,
        column: C,
        operator: O,
        value: V,
    ) -> Result<&mut Self>
    where
        C: IntoIdent,
        O: IntoOperator,
        V: IntoBind,
    {
        let column = self.reference(column, "having")?;
        let operator = operator.into_operator("having")?;
        let binary = BinaryCondition {
            column,
            operator,
            value: value.into_bind(),
            negate,
        };
        self.push_having(logic, ConditionKind::Binary(binary));
        Ok(self)
    }

    #[variant(having_group, not)]
    fn having_group_expr<F>(&mut self, logic: Logic, negate: bool, callback: F) -> Result<&mut Self>
    where
        F: FnOnce(&mut Builder) -> Result<&mut Builder>,
    {
        let mut child = self.child(true);
        callback(&mut child)?;
        if !child.havings.is_empty() {
            let group = GroupCondition {
                conditions: child.havings,
                negate,
            };
            self.push_having(logic, ConditionKind::Group(group));
        }
        Ok(self)
    }

    // group, order, pagination

    pub fn group_by<I: IntoSortInput>(&mut self, input: I) -> Result<&mut Self> {
        let entries = order::normalize(input.into_sort_input(), None, &self.config, "group_by")?;
        self.group_by.extend(entries);
        self.touch();
        Ok(self)
    }

    pub fn group_by_dir<I: IntoSortInput>(&mut self, input: I, direction: &str) -> Result<&mut Self> {
        let entries =
            order::normalize(input.into_sort_input(), Some(direction), &self.config, "group_by")?;
        self.group_by.extend(entries);
        self.touch();
        Ok(self)
    }

    pub fn order_by<I: IntoSortInput>(&mut self, input: I) -> Result<&mut Self> {
        let entries = order::normalize(input.into_sort_input(), None, &self.config, "order_by")?;
        self.order_by.extend(entries);
        self.touch();
        Ok(self)
    }

    pub fn order_by_dir<I: IntoSortInput>(&mut self, input: I, direction: &str) -> Result<&mut Self> {
        let entries =
            order::normalize(input.into_sort_input(), Some(direction), &self.config, "order_by")?;
        self.order_by.extend(entries);
        self.touch();
        Ok(self)
    }

    /// `ORDER BY RAND()`
    pub fn order_by_rand(&mut self) -> &mut Self {
        self.order_by.push_random();
        self.touch();
        self
    }

    pub fn limit<N: IntoCount>(&mut self, limit: N) -> Result<&mut Self> {
        self.paginator.limit(limit.into_count("limit")?);
        self.touch();
        Ok(self)
    }

    /// Alias of [`Builder::limit`].
    pub fn take<N: IntoCount>(&mut self, limit: N) -> Result<&mut Self> {
        self.paginator.limit(limit.into_count("take")?);
        self.touch();
        Ok(self)
    }

    /// Needs a limit by the time the statement is rendered.
    pub fn offset<N: IntoCount>(&mut self, offset: N) -> Result<&mut Self> {
        self.paginator.offset(offset.into_count("offset")?);
        self.touch();
        Ok(self)
    }

    /// Alias of [`Builder::offset`].
    pub fn skip<N: IntoCount>(&mut self, offset: N) -> Result<&mut Self> {
        self.paginator.offset(offset.into_count("skip")?);
        self.touch();
        Ok(self)
    }

    /// Limit to `per_page` rows starting at page `page`, counted from 1.
    pub fn paginate(&mut self, page: u64, per_page: u64) -> Result<&mut Self> {
        self.paginator.paginate(page, per_page)?;
        self.touch();
        Ok(self)
    }

    // statement kinds

    /// One row or many. Every row must carry the same columns, which is
    /// checked when the statement is rendered.
    pub fn insert<R: IntoRows>(&mut self, rows: R) -> Result<&mut Self> {
        let rows = rows.into_rows();
        if rows.is_empty() {
            return Err(Error::invalid_argument("insert", "requires at least one row"));
        }
        for row in &rows {
            row.validate(&self.config, "insert")?;
        }
        self.set_kind("insert", QueryKind::Insert(rows))?;
        Ok(self)
    }

    pub fn update<R: IntoRow>(&mut self, row: R) -> Result<&mut Self> {
        let row = row.into_row();
        row.validate(&self.config, "update")?;
        self.set_kind("update", QueryKind::Update(row))?;
        Ok(self)
    }

    pub fn delete(&mut self) -> Result<&mut Self> {
        self.set_kind("delete", QueryKind::Delete)?;
        Ok(self)
    }

    pub fn truncate(&mut self) -> Result<&mut Self> {
        self.set_kind("truncate", QueryKind::Truncate)?;
        Ok(self)
    }

    /// Unions a copy of this statement with `members`. Ordering and
    /// pagination set afterwards apply to the union as a whole.
    pub fn union<I>(&mut self, members: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = Builder>,
    {
        self.union_expr(members, false, "union")
    }

    pub fn union_all<I>(&mut self, members: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = Builder>,
    {
        self.union_expr(members, true, "union_all")
    }

    fn union_expr<I>(&mut self, members: I, all: bool, method: &'static str) -> Result<&mut Self>
    where
        I: IntoIterator<Item = Builder>,
    {
        if self.explicit_kind {
            return Err(Error::ConflictingKind {
                method,
                previous: self.kind.name(),
            });
        }
        let others: Vec<Builder> = members.into_iter().collect();
        if others.is_empty() {
            return Err(Error::invalid_argument(method, "requires at least one statement"));
        }
        let mut members = Vec::with_capacity(others.len() + 1);
        members.push(self.clone());
        members.extend(others);
        self.set_kind(method, QueryKind::Union(UnionClause::new(members, all)))?;
        Ok(self)
    }

    // configuration

    /// Allows more characters in unquoted references, for this builder and
    /// every child it creates.
    pub fn add_reference_chars<C: IntoReferenceChars>(&mut self, chars: C) -> Result<&mut Self> {
        self.config.reference_chars.extend(chars.into_reference_chars()?);
        Ok(self)
    }

    pub fn set_quote_char(&mut self, quote: &str) -> Result<&mut Self> {
        self.config.quote = QuoteChar::try_from(quote)?;
        Ok(self)
    }

    /// Clears every clause. The configuration survives, and so does the
    /// table when the configuration retains it.
    pub fn reset(&mut self) -> &mut Self {
        let maybe_table = if self.config.retain_table_on_reset {
            self.maybe_table.take()
        } else {
            None
        };
        let config = mem::take(&mut self.config);
        *self = Self {
            config,
            maybe_table,
            ..Self::default()
        };
        self
    }

    // compiling

    fn render(&self) -> Result<String> {
        let mut sql = String::with_capacity(128);
        let mut context = FormatContext::new(&mut sql, self.config.quote);
        self.format_writer(&mut context)?;
        let placeholders = context.placeholder;
        tracing::debug!(kind = self.kind.name(), placeholders, sql = %sql, "compiled statement");
        Ok(sql)
    }

    /// Renders the statement with `?` placeholders.
    pub fn to_sql(&mut self) -> Result<String> {
        let sql = self.render()?;
        self.state = State::Compiled;
        Ok(sql)
    }

    /// Values for the placeholders of [`Builder::to_sql`], in order.
    pub fn params(&self) -> Binds {
        let mut binds = Binds::new();
        self.collect_bindings(&mut binds);
        binds
    }

    pub fn compile(&mut self) -> Result<(String, Binds)> {
        let sql = self.to_sql()?;
        Ok((sql, self.params()))
    }

    /// Renders with every placeholder replaced by its quoted value. For
    /// diagnostics only, the values are not escaped.
    pub fn to_sql_with(&self, params: &[Bind]) -> Result<String> {
        let sql = self.render()?;
        let mut values = params.iter();
        let mut interpolated = String::with_capacity(sql.len());
        for char in sql.chars() {
            let value = if char == '?' { values.next() } else { None };
            match value {
                Some(value) => {
                    interpolated.push('\'');
                    interpolated.push_str(&value.to_string());
                    interpolated.push('\'');
                }
                None => interpolated.push(char),
            }
        }
        Ok(interpolated)
    }

    /// Prints the interpolated statement to stdout, see [`Builder::debug_to`].
    pub fn debug(&mut self, stop: bool) -> Result<&mut Self> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.debug_to(&mut out, stop)
    }

    /// Writes the interpolated statement to `out`. With `stop` the call
    /// fails with [`Error::DebugHalt`] so the caller goes no further.
    pub fn debug_to<W: io::Write>(&mut self, out: &mut W, stop: bool) -> Result<&mut Self> {
        let sql = self.to_sql_with(&self.params())?;
        write!(out, "\nQuery debug:\n{sql}\n")?;
        if stop {
            return Err(Error::DebugHalt(sql));
        }
        Ok(self)
    }

    fn require_table(&self) -> Result<&Ident> {
        self.maybe_table.as_ref().ok_or_else(|| {
            Error::invalid_argument(
                "to_sql",
                "Cannot construct query without a table name, please set using the from() or table() methods",
            )
        })
    }

    fn write_statement<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        match &self.kind {
            QueryKind::Select => {
                let table = self.require_table()?;
                context.writer.write_str("SELECT ")?;
                if self.distinct {
                    context.writer.write_str("DISTINCT ")?;
                }
                self.columns.format_writer(context)?;
                context.writer.write_str(" FROM ")?;
                context.write_quoted(table.as_str())?;
                self.joins.format_writer(context)?;
                write_clause(context, " WHERE ", &self.wheres, !self.wheres.is_empty())?;
                write_clause(context, " GROUP BY ", &self.group_by, !self.group_by.is_empty())?;
                write_clause(context, " HAVING ", &self.havings, !self.havings.is_empty())?;
                write_clause(context, " ORDER BY ", &self.order_by, !self.order_by.is_empty())?;
                self.write_limit(context, " ")
            }
            QueryKind::Insert(rows) => {
                let table = self.require_table()?;
                let Some(first) = rows.first() else {
                    return Err(Error::invalid_argument("insert", "requires at least one row"));
                };
                if rows.iter().any(|row| !row.same_columns(first)) {
                    return Err(Error::invalid_argument(
                        "insert",
                        "Cannot get column names, ensure the provided columns are consistent",
                    ));
                }
                context.writer.write_str("INSERT INTO ")?;
                context.write_quoted(table.as_str())?;
                context.writer.write_str(" (")?;
                for (index, column) in first.columns().enumerate() {
                    if index > 0 {
                        context.writer.write_char(',')?;
                    }
                    context.write_quoted(column.as_str())?;
                }
                context.writer.write_str(") VALUES ")?;
                for index in 0..rows.len() {
                    if index > 0 {
                        context.writer.write_char(',')?;
                    }
                    context.writer.write_char('(')?;
                    context.write_placeholders(first.len())?;
                    context.writer.write_char(')')?;
                }
                Ok(())
            }
            QueryKind::Update(row) => {
                let table = self.require_table()?;
                context.writer.write_str("UPDATE ")?;
                context.write_quoted(table.as_str())?;
                context.writer.write_str(" SET ")?;
                for (index, column) in row.columns().enumerate() {
                    if index > 0 {
                        context.writer.write_char(',')?;
                    }
                    context.write_column(column)?;
                    context.writer.write_char('=')?;
                    context.write_placeholder()?;
                }
                write_clause(context, " WHERE ", &self.wheres, !self.wheres.is_empty())?;
                write_clause(context, " ORDER BY ", &self.order_by, !self.order_by.is_empty())?;
                self.write_limit(context, " ")
            }
            QueryKind::Delete => {
                let table = self.require_table()?;
                context.writer.write_str("DELETE FROM ")?;
                context.write_quoted(table.as_str())?;
                write_clause(context, " WHERE ", &self.wheres, !self.wheres.is_empty())?;
                write_clause(context, " ORDER BY ", &self.order_by, !self.order_by.is_empty())?;
                self.write_limit(context, " ")
            }
            QueryKind::Truncate => {
                let table = self.require_table()?;
                context.writer.write_str("TRUNCATE TABLE ")?;
                context.write_quoted(table.as_str())
            }
            QueryKind::Union(union) => {
                self.paginator.validate()?;
                union.format_writer(context)?;
                write_clause(context, "\nORDER BY ", &self.order_by, !self.order_by.is_empty())?;
                self.write_limit(context, "\n")
            }
        }
    }

    fn write_limit<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>, separator: &str) -> Result<()> {
        self.paginator.validate()?;
        if !self.paginator.is_empty() {
            context.writer.write_str(separator)?;
            self.paginator.format_writer(context)?;
        }
        Ok(())
    }
}

fn write_clause<W, T>(context: &mut FormatContext<'_, W>, keyword: &str, node: &T, present: bool) -> Result<()>
where
    W: fmt::Write,
    T: FormatWriter,
{
    if present {
        context.writer.write_str(keyword)?;
        node.format_writer(context)?;
    }
    Ok(())
}

impl FormatWriter for Builder {
    fn format_writer<W: fmt::Write>(&self, context: &mut FormatContext<'_, W>) -> Result<()> {
        let table = self
            .maybe_table
            .as_ref()
            .map(|table| SmolStr::new(table.table_name()));
        context.scoped(self.config.quote, table, |context| self.write_statement(context))
    }
}

impl CollectBindings for Builder {
    fn collect_bindings(&self, binds: &mut Binds) {
        match &self.kind {
            QueryKind::Select => {
                self.wheres.collect_bindings(binds);
                self.havings.collect_bindings(binds);
            }
            QueryKind::Insert(rows) => {
                if let Some(first) = rows.first() {
                    for row in rows {
                        row.collect_in(first, binds);
                    }
                }
            }
            QueryKind::Update(row) => {
                binds.extend(row.values().cloned());
                self.wheres.collect_bindings(binds);
            }
            QueryKind::Delete => self.wheres.collect_bindings(binds),
            QueryKind::Truncate => {}
            QueryKind::Union(union) => union.collect_bindings(binds),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{dialect::Postgres, query};

    use super::*;

    #[test]
    fn test_basic_select() -> Result<()> {
        let mut builder = query("movies")?;
        builder.select("title, year")?.where_eq("title", "The Lego Movie")?;
        assert_eq!(
            "SELECT `movies`.`title`,`movies`.`year` FROM `movies` WHERE `movies`.`title`=?",
            builder.to_sql()?
        );
        assert_eq!(vec![Bind::from("The Lego Movie")], builder.params());
        Ok(())
    }

    #[test]
    fn test_select_raw_verbatim() -> Result<()> {
        let mut builder = query("movies")?;
        builder.select_raw("COUNT(*) AS n, MAX(year)")?;
        assert_eq!("SELECT COUNT(*) AS n, MAX(year) FROM `movies`", builder.to_sql()?);
        Ok(())
    }

    #[test]
    fn test_postgres_quotes() -> Result<()> {
        let mut builder = Builder::dialect::<Postgres>();
        builder.from("movies")?.where_op("rating", ">=", 8)?;
        assert_eq!(
            "SELECT * FROM \"movies\" WHERE \"movies\".\"rating\">=?",
            builder.to_sql()?
        );
        Ok(())
    }

    #[test]
    fn test_where_variants() -> Result<()> {
        let mut builder = query("movies")?;
        builder
            .where_eq("year", 2020)?
            .or_where_op("title", "like", "The%")?
            .where_not_eq("rating", 0)?
            .or_where_not_op("genre", "<>", "drama")?;
        assert_eq!(
            "SELECT * FROM `movies` WHERE `movies`.`year`=? OR `movies`.`title` LIKE ? \
             AND NOT `movies`.`rating`=? OR NOT `movies`.`genre`<>?",
            builder.to_sql()?
        );
        assert_eq!(4, builder.params().len());
        Ok(())
    }

    #[test]
    fn test_where_clause_logic() -> Result<()> {
        let mut builder = query("movies")?;
        builder
            .where_eq("year", 2020)?
            .where_clause("rating", ">", 8, "XOR", false)?;
        assert_eq!(
            "SELECT * FROM `movies` WHERE `movies`.`year`=? XOR `movies`.`rating`>?",
            builder.to_sql()?
        );
        let err = query("movies")?
            .where_clause("rating", ">", 8, "xor", false)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidLogic { method: "where", .. }));
        Ok(())
    }

    #[test]
    fn test_where_group_nested() -> Result<()> {
        let mut builder = query("movies")?;
        builder.where_eq("year", 2020)?.where_not_group(|q| {
            q.where_op("rating", "<", 2)?.or_where_op("rating", ">", 8)
        })?;
        assert_eq!(
            "SELECT * FROM `movies` WHERE `movies`.`year`=? AND NOT (`movies`.`rating`<? OR `movies`.`rating`>?)",
            builder.to_sql()?
        );
        assert_eq!(
            vec![Bind::from(2020), Bind::from(2), Bind::from(8)],
            builder.params()
        );
        Ok(())
    }

    #[test]
    fn test_empty_group_is_skipped() -> Result<()> {
        let mut builder = query("movies")?;
        builder.where_group(|q| Ok(q))?;
        assert_eq!("SELECT * FROM `movies`", builder.to_sql()?);
        Ok(())
    }

    #[test]
    fn test_group_callback_error_propagates() -> Result<()> {
        let err = query("movies")?
            .where_group(|q| q.where_op("rating", "=>", 2))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidOperator { method: "where", .. }));
        Ok(())
    }

    #[test]
    fn test_between_null_column() -> Result<()> {
        let mut builder = query("movies")?;
        builder
            .where_between("year", 1980, 1989)?
            .or_where_not_between("rating", 2, 8)?
            .where_null("deleted_at")?
            .or_where_not_null("released_at")?
            .where_column("director", "writer")?
            .or_where_column_op("budget", ">", "revenue")?;
        assert_eq!(
            "SELECT * FROM `movies` WHERE `movies`.`year` BETWEEN ? AND ? \
             OR `movies`.`rating` NOT BETWEEN ? AND ? \
             AND `movies`.`deleted_at` IS NULL OR `movies`.`released_at` IS NOT NULL \
             AND `movies`.`director`=`movies`.`writer` OR `movies`.`budget`>`movies`.`revenue`",
            builder.to_sql()?
        );
        assert_eq!(
            vec![Bind::from(1980), Bind::from(1989), Bind::from(2), Bind::from(8)],
            builder.params()
        );
        Ok(())
    }

    #[test]
    fn test_where_in_empty() -> Result<()> {
        let err = query("movies")?.where_in("year", Vec::<i32>::new()).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { method: "where_in", .. }));
        Ok(())
    }

    #[test]
    fn test_where_raw_counts_placeholders() -> Result<()> {
        let mut builder = query("movies")?;
        builder.where_raw("YEAR(released) > ?", [2000])?;
        assert_eq!(
            "SELECT * FROM `movies` WHERE YEAR(released) > ?",
            builder.to_sql()?
        );
        let err = query("movies")?
            .where_raw("title = ? AND year = ?", [1])
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { method: "where_raw", .. }));
        Ok(())
    }

    #[test]
    fn test_where_raw_quoted_question_mark() -> Result<()> {
        let err = query("movies")?
            .where_raw("title <> 'why?'", Vec::<i32>::new())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { method: "where_raw", .. }));

        let mut builder = query("movies")?;
        builder
            .where_raw("title <> ? AND note <> 'why?'", ["Heat", "why?"])?
            .where_eq("year", 2000)?;
        let (sql, params) = builder.compile()?;
        assert_eq!(sql.matches('?').count(), params.len());
        assert_eq!(
            vec![Bind::from("Heat"), Bind::from("why?"), Bind::from(2000)],
            params
        );
        let interpolated = builder.to_sql_with(&params)?;
        assert!(interpolated.starts_with("SELECT * FROM `movies` WHERE title <> 'Heat' AND"));
        assert!(interpolated.ends_with("AND `movies`.`year`='2000'"));
        Ok(())
    }

    #[test]
    fn test_function_family() -> Result<()> {
        let mut builder = query("movies")?;
        builder
            .where_year_eq("released", 2020)?
            .or_where_weekday("released", "<>", 6)?;
        assert_eq!(
            "SELECT * FROM `movies` WHERE YEAR(`movies`.`released`)=? OR WEEKDAY(`movies`.`released`)<>?",
            builder.to_sql()?
        );
        let err = query("movies")?.where_month("released;", "=", 1).unwrap_err();
        assert!(matches!(err, Error::InvalidReference { method: "where_month", .. }));
        Ok(())
    }

    #[test]
    fn test_having() -> Result<()> {
        let mut builder = query("movies")?;
        builder
            .select("year")?
            .count(None, None)?
            .group_by("year")?
            .having_op("count", ">", 10)?
            .or_having_not_group(|q| q.having_eq("year", 2000))?;
        assert_eq!(
            "SELECT `movies`.`year`,COUNT(*) AS `count` FROM `movies` GROUP BY `movies`.`year` \
             HAVING `movies`.`count`>? OR NOT (`movies`.`year`=?)",
            builder.to_sql()?
        );
        assert_eq!(vec![Bind::from(10), Bind::from(2000)], builder.params());
        Ok(())
    }

    #[test]
    fn test_aggregate_wildcard() -> Result<()> {
        let err = query("movies")?.avg(None, None).unwrap_err();
        assert!(matches!(err, Error::InvalidReference { method: "avg", .. }));
        let mut builder = query("movies")?;
        builder.max(Some("rating"), Some("best"))?;
        assert_eq!(
            "SELECT MAX(`movies`.`rating`) AS `best` FROM `movies`",
            builder.to_sql()?
        );
        Ok(())
    }

    #[test]
    fn test_join_defaults() -> Result<()> {
        let mut builder = query("contacts")?;
        builder.join("addresses")?.join_on("emails", "contacts.id", "emails.contact_id")?;
        assert_eq!(
            "SELECT * FROM `contacts` JOIN `addresses` ON `contacts`.`id`=`addresses`.`contacts_id`\n \
             JOIN `emails` ON `contacts`.`id`=`emails`.`contact_id`",
            builder.to_sql()?
        );
        Ok(())
    }

    #[test]
    fn test_join_operator_swap() -> Result<()> {
        let mut builder = query("contacts")?;
        builder.join_on_op("emails", "id", "<>", "contact_id")?;
        let swapped = builder.to_sql()?;
        let mut builder = query("contacts")?;
        builder.join_on_op("emails", "id", "contact_id", "<>")?;
        assert_eq!(swapped, builder.to_sql()?);
        assert_eq!(
            "SELECT * FROM `contacts` JOIN `emails` ON `contacts`.`id`<>`emails`.`contact_id`",
            swapped
        );
        Ok(())
    }

    #[test]
    fn test_join_lowercase_operator_is_a_column() -> Result<()> {
        let mut builder = query("contacts")?;
        builder.join_on_op("emails", "id", "like", "=")?;
        assert_eq!(
            "SELECT * FROM `contacts` JOIN `emails` ON `contacts`.`id`=`emails`.`like`",
            builder.to_sql()?
        );
        Ok(())
    }

    #[test]
    fn test_join_types() -> Result<()> {
        let mut builder = query("contacts")?;
        builder
            .left_join("emails", "id", "contact_id")?
            .join_with("phones", None, None, None, Some("sideways"))?;
        assert_eq!(
            "SELECT * FROM `contacts` LEFT JOIN `emails` ON `contacts`.`id`=`emails`.`contact_id`\n \
             JOIN `phones` ON `contacts`.`id`=`phones`.`contacts_id`",
            builder.to_sql()?
        );
        Ok(())
    }

    #[test]
    fn test_join_requires_table() {
        let err = Builder::new().join("emails").unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { method: "join", .. }));
    }

    #[test]
    fn test_missing_table() {
        let mut builder = Builder::new();
        builder.where_eq("year", 2020).unwrap();
        let err = builder.to_sql().unwrap_err();
        assert!(err.to_string().contains("Cannot construct query without a table name"));
    }

    #[test]
    fn test_alias_qualifies() -> Result<()> {
        let mut builder = query("movies AS m")?;
        builder.select("title")?.where_eq("year", 2020)?;
        assert_eq!(
            "SELECT `m`.`title` FROM `movies` AS `m` WHERE `m`.`year`=?",
            builder.to_sql()?
        );
        Ok(())
    }

    #[test]
    fn test_update_delete_truncate() -> Result<()> {
        let mut builder = query("movies")?;
        builder
            .update(Row::new().with("archived", 1))?
            .where_op("year", "<", 1984)?
            .order_by_dir("year", "desc")?
            .limit(10)?;
        assert_eq!(
            "UPDATE `movies` SET `movies`.`archived`=? WHERE `movies`.`year`<? ORDER BY `movies`.`year` DESC LIMIT 10",
            builder.to_sql()?
        );
        assert_eq!(vec![Bind::from(1), Bind::from(1984)], builder.params());

        let mut builder = query("movies")?;
        builder.delete()?.where_op("year", "<", 1984)?;
        assert_eq!(
            "DELETE FROM `movies` WHERE `movies`.`year`<?",
            builder.to_sql()?
        );

        let mut builder = query("movies")?;
        builder.truncate()?;
        assert_eq!("TRUNCATE TABLE `movies`", builder.to_sql()?);
        assert!(builder.params().is_empty());
        Ok(())
    }

    #[test]
    fn test_insert_rows_follow_first_order() -> Result<()> {
        let mut builder = query("movies")?;
        builder.insert(vec![
            Row::new().with("title", "Inception").with("year", 2010),
            Row::new().with("year", 1982).with("title", "Blade Runner"),
        ])?;
        assert_eq!(
            "INSERT INTO `movies` (`title`,`year`) VALUES (?,?),(?,?)",
            builder.to_sql()?
        );
        assert_eq!(
            vec![
                Bind::from("Inception"),
                Bind::from(2010),
                Bind::from("Blade Runner"),
                Bind::from(1982),
            ],
            builder.params()
        );
        Ok(())
    }

    #[test]
    fn test_insert_mismatch_at_compile() -> Result<()> {
        let mut builder = query("movies")?;
        builder.insert(vec![Row::new().with("a", 1), Row::new().with("b", 2)])?;
        let err = builder.to_sql().unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { method: "insert", .. }));
        Ok(())
    }

    #[test]
    fn test_kind_conflict() -> Result<()> {
        let mut builder = query("movies")?;
        builder.select("title")?;
        let err = builder.insert(Row::new().with("title", "Up")).unwrap_err();
        assert!(matches!(
            err,
            Error::ConflictingKind {
                method: "insert",
                previous: "select"
            }
        ));
        let err = builder.union([query("movies")?]).unwrap_err();
        assert!(err.is_conflicting_kind());
        Ok(())
    }

    #[test]
    fn test_union_twice() -> Result<()> {
        let mut builder = query("movies")?;
        builder.union([query("movies")?])?;
        let err = builder.union([query("movies")?]).unwrap_err();
        assert!(matches!(
            err,
            Error::ConflictingKind {
                method: "union",
                previous: "union"
            }
        ));
        let err = query("movies")?.union(Vec::new()).unwrap_err();
        assert!(err.is_invalid_input());
        Ok(())
    }

    #[test]
    fn test_state_machine() -> Result<()> {
        let mut builder = Builder::new();
        assert_eq!(State::Fresh, builder.state());
        builder.from("movies")?.where_eq("year", 2020)?;
        assert_eq!(State::Building, builder.state());
        builder.to_sql()?;
        assert_eq!(State::Compiled, builder.state());
        assert_eq!("SELECT * FROM `movies` WHERE `movies`.`year`=?", builder.to_sql()?);

        builder.from("actors")?;
        assert_eq!(State::Building, builder.state());
        assert_eq!("SELECT * FROM `actors`", builder.to_sql()?);
        assert!(builder.params().is_empty());

        builder.reset();
        assert_eq!(State::Fresh, builder.state());
        Ok(())
    }

    #[test]
    fn test_reset_keeps_config() -> Result<()> {
        let config = Config::default().retain_table_on_reset(true);
        let mut builder = Builder::with_config(config);
        builder.set_quote_char("\"")?.add_reference_chars(":")?;
        builder.from("movies")?.where_eq("a:b", 1)?;
        builder.reset();
        assert_eq!(QuoteChar::Double, builder.config().quote_char());
        assert!(builder.config().allows(':'));
        assert_eq!("SELECT * FROM \"movies\"", builder.to_sql()?);

        let mut builder = query("movies")?;
        builder.reset();
        assert!(builder.to_sql().is_err());
        Ok(())
    }

    #[test]
    fn test_children_inherit_config() -> Result<()> {
        let mut builder = query("movies")?;
        builder.add_reference_chars(':')?;
        builder.where_group(|q| q.where_eq("title:en", "Up"))?;
        assert_eq!(
            "SELECT * FROM `movies` WHERE (`movies`.`title:en`=?)",
            builder.to_sql()?
        );
        Ok(())
    }

    #[test]
    fn test_offset_without_limit() -> Result<()> {
        let mut builder = query("movies")?;
        builder.offset(10)?;
        let err = builder.to_sql().unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { method: "offset", .. }));
        builder.take(5)?;
        assert_eq!("SELECT * FROM `movies` LIMIT 5 OFFSET 10", builder.to_sql()?);
        Ok(())
    }

    #[test]
    fn test_to_sql_with() -> Result<()> {
        let mut builder = query("movies")?;
        builder.where_eq("title", "Up")?.where_eq("year", 2009)?;
        assert_eq!(
            "SELECT * FROM `movies` WHERE `movies`.`title`='Up' AND `movies`.`year`=?",
            builder.to_sql_with(&[Bind::from("Up")])?
        );
        Ok(())
    }

    #[test]
    fn test_debug_to() -> Result<()> {
        let mut builder = query("movies")?;
        builder.where_eq("title", "The Lego Movie")?;
        let mut out = Vec::new();
        builder.debug_to(&mut out, false)?;
        assert_eq!(
            "\nQuery debug:\nSELECT * FROM `movies` WHERE `movies`.`title`='The Lego Movie'\n",
            String::from_utf8(out).unwrap()
        );

        let mut out = Vec::new();
        let err = builder.debug_to(&mut out, true).unwrap_err();
        assert!(err.is_debug_halt());
        Ok(())
    }
}
