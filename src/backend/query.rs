//! Backend-neutral description of a table read.
//!
//! A [`TableQuery`] captures column selection, filters, ordering, a row
//! limit and relational embeds. Backends translate it: [`TableQuery::to_postgrest_params`]
//! renders PostgREST query parameters, the SQLite snapshot walks the same
//! structure to build SQL.
//!
//! # Examples
//!
//! ```rust
//! use volley_league::backend::{tables, Direction, Embed, TableQuery};
//!
//! let query = TableQuery::from(tables::PLAYERS)
//!     .embed(Embed::parent("team", tables::TEAMS, "team_id"))
//!     .embed(Embed::children("stats", tables::PLAYER_STATS, "player_id"))
//!     .eq("team_id", 7)
//!     .order("name", Direction::Asc);
//!
//! let params = query.to_postgrest_params();
//! assert!(params.contains(&(
//!     "select".to_string(),
//!     "*,team:teams!team_id(*),stats:player_stats(*)".to_string()
//! )));
//! assert!(params.contains(&("team_id".to_string(), "eq.7".to_string())));
//! ```

use std::fmt;

use crate::{MatchId, PlayerId, TeamId};

/// Table names exposed by the league backend.
pub mod tables {
    pub const TEAMS: &str = "teams";
    pub const TEAM_STATISTICS: &str = "team_statistics";
    pub const TEAM_PERFORMANCE: &str = "team_performance";
    pub const PLAYERS: &str = "players";
    pub const PLAYER_STATS: &str = "player_stats";
    pub const PLAYER_RANKINGS: &str = "player_rankings";
    pub const MATCHES: &str = "matches";
    pub const MATCH_STATISTICS: &str = "match_statistics";
    pub const SET_SCORES: &str = "set_scores";
}

/// A literal compared against a column.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Int(i64),
    Text(String),
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Int(i) => write!(f, "{}", i),
            FilterValue::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for FilterValue {
    fn from(v: i64) -> Self {
        FilterValue::Int(v)
    }
}

impl From<i32> for FilterValue {
    fn from(v: i32) -> Self {
        FilterValue::Int(i64::from(v))
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        FilterValue::Text(v.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        FilterValue::Text(v)
    }
}

impl From<TeamId> for FilterValue {
    fn from(v: TeamId) -> Self {
        FilterValue::Int(v.as_i64())
    }
}

impl From<PlayerId> for FilterValue {
    fn from(v: PlayerId) -> Self {
        FilterValue::Int(v.as_i64())
    }
}

impl From<MatchId> for FilterValue {
    fn from(v: MatchId) -> Self {
        FilterValue::Int(v.as_i64())
    }
}

/// Row predicate. Top-level filters on a query are AND-ed.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    Eq(&'static str, FilterValue),
    Neq(&'static str, FilterValue),
    NotNull(&'static str),
    /// Case-insensitive substring match.
    ILike(&'static str, String),
    /// Any of the inner filters (OR).
    AnyOf(Vec<Filter>),
}

impl Filter {
    /// PostgREST `column.op.value` form used inside `or=(...)`.
    fn to_postgrest_inline(&self) -> String {
        match self {
            Filter::Eq(col, v) => format!("{}.eq.{}", col, inline_literal(&v.to_string())),
            Filter::Neq(col, v) => format!("{}.neq.{}", col, inline_literal(&v.to_string())),
            Filter::NotNull(col) => format!("{}.not.is.null", col),
            Filter::ILike(col, text) => {
                format!("{}.ilike.{}", col, inline_literal(&format!("*{}*", escape_like(text))))
            }
            Filter::AnyOf(inner) => format!("or({})", join_inline(inner)),
        }
    }

    /// PostgREST `(key, value)` query parameter.
    fn to_postgrest_param(&self) -> (String, String) {
        match self {
            Filter::Eq(col, v) => (col.to_string(), format!("eq.{}", v)),
            Filter::Neq(col, v) => (col.to_string(), format!("neq.{}", v)),
            Filter::NotNull(col) => (col.to_string(), "not.is.null".to_string()),
            Filter::ILike(col, text) => (col.to_string(), format!("ilike.*{}*", escape_like(text))),
            Filter::AnyOf(inner) => ("or".to_string(), format!("({})", join_inline(inner))),
        }
    }
}

fn join_inline(filters: &[Filter]) -> String {
    filters
        .iter()
        .map(Filter::to_postgrest_inline)
        .collect::<Vec<_>>()
        .join(",")
}

/// Quote a literal that would otherwise break PostgREST's logic-tree syntax.
fn inline_literal(raw: &str) -> String {
    let reserved = |c: char| matches!(c, ',' | '.' | ':' | '(' | ')' | '"') || c.is_whitespace();
    if raw.chars().any(reserved) {
        format!("\"{}\"", raw.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        raw.to_string()
    }
}

/// Strip wildcard characters so user text is matched literally.
fn sanitize_pattern(text: &str) -> String {
    text.chars().filter(|c| !matches!(c, '*' | '%')).collect()
}

/// Backslash-escape LIKE metacharacters. Both backends use `\` as the
/// escape character, so `_` in search text only ever matches `_`.
pub(crate) fn escape_like(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order {
    pub column: &'static str,
    pub direction: Direction,
}

impl Order {
    fn render(&self) -> String {
        format!("{}.{}", self.column, self.direction.as_str())
    }
}

/// How an embedded table relates to its parent row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Join {
    /// To-one: the parent row holds `fk` pointing at the embedded row's `id`.
    Parent { fk: &'static str },
    /// To-many: embedded rows hold `fk` pointing at the parent row's `id`.
    Children { fk: &'static str },
}

/// A related table returned inline with each parent row.
#[derive(Debug, Clone, PartialEq)]
pub struct Embed {
    pub alias: &'static str,
    pub table: &'static str,
    pub join: Join,
    pub order: Option<Order>,
    pub embeds: Vec<Embed>,
}

impl Embed {
    pub fn parent(alias: &'static str, table: &'static str, fk: &'static str) -> Self {
        Self {
            alias,
            table,
            join: Join::Parent { fk },
            order: None,
            embeds: Vec::new(),
        }
    }

    pub fn children(alias: &'static str, table: &'static str, fk: &'static str) -> Self {
        Self {
            alias,
            table,
            join: Join::Children { fk },
            order: None,
            embeds: Vec::new(),
        }
    }

    /// Nest another embed under this one.
    pub fn with(mut self, embed: Embed) -> Self {
        self.embeds.push(embed);
        self
    }

    pub fn ordered(mut self, column: &'static str, direction: Direction) -> Self {
        self.order = Some(Order { column, direction });
        self
    }

    fn select_fragment(&self) -> String {
        let inner = select_list(&[], &self.embeds);
        match self.join {
            Join::Parent { fk } => format!("{}:{}!{}({})", self.alias, self.table, fk, inner),
            Join::Children { .. } => format!("{}:{}({})", self.alias, self.table, inner),
        }
    }

    fn collect_orders(&self, prefix: &str, out: &mut Vec<(String, String)>) {
        let path = if prefix.is_empty() {
            self.alias.to_string()
        } else {
            format!("{}.{}", prefix, self.alias)
        };
        if let Some(order) = &self.order {
            out.push((format!("{}.order", path), order.render()));
        }
        for child in &self.embeds {
            child.collect_orders(&path, out);
        }
    }
}

fn select_list(columns: &[&'static str], embeds: &[Embed]) -> String {
    let mut parts: Vec<String> = if columns.is_empty() {
        vec!["*".to_string()]
    } else {
        columns.iter().map(|c| c.to_string()).collect()
    };
    parts.extend(embeds.iter().map(Embed::select_fragment));
    parts.join(",")
}

/// A read against one table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableQuery {
    pub table: &'static str,
    pub columns: Vec<&'static str>,
    pub embeds: Vec<Embed>,
    pub filters: Vec<Filter>,
    pub order: Vec<Order>,
    pub limit: Option<usize>,
}

impl TableQuery {
    pub fn from(table: &'static str) -> Self {
        Self {
            table,
            columns: Vec::new(),
            embeds: Vec::new(),
            filters: Vec::new(),
            order: Vec::new(),
            limit: None,
        }
    }

    /// Restrict the root columns; an empty selection means `*`.
    pub fn columns(mut self, columns: &[&'static str]) -> Self {
        self.columns = columns.to_vec();
        self
    }

    pub fn embed(mut self, embed: Embed) -> Self {
        self.embeds.push(embed);
        self
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn eq(self, column: &'static str, value: impl Into<FilterValue>) -> Self {
        self.filter(Filter::Eq(column, value.into()))
    }

    pub fn neq(self, column: &'static str, value: impl Into<FilterValue>) -> Self {
        self.filter(Filter::Neq(column, value.into()))
    }

    pub fn not_null(self, column: &'static str) -> Self {
        self.filter(Filter::NotNull(column))
    }

    pub fn ilike(self, column: &'static str, text: &str) -> Self {
        self.filter(Filter::ILike(column, sanitize_pattern(text)))
    }

    pub fn any_of(self, filters: Vec<Filter>) -> Self {
        self.filter(Filter::AnyOf(filters))
    }

    pub fn order(mut self, column: &'static str, direction: Direction) -> Self {
        self.order.push(Order { column, direction });
        self
    }

    pub fn limit(mut self, n: usize) -> Self {
        self.limit = Some(n);
        self
    }

    /// The `select=` clause including embeds.
    pub fn select_clause(&self) -> String {
        select_list(&self.columns, &self.embeds)
    }

    /// Render as PostgREST query parameters, in a stable order.
    pub fn to_postgrest_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), self.select_clause())];
        params.extend(self.filters.iter().map(Filter::to_postgrest_param));
        if !self.order.is_empty() {
            let order = self
                .order
                .iter()
                .map(Order::render)
                .collect::<Vec<_>>()
                .join(",");
            params.push(("order".to_string(), order));
        }
        for embed in &self.embeds {
            embed.collect_orders("", &mut params);
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params
    }
}
