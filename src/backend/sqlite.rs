//! Local SQLite snapshot of the league database.
//!
//! Mirrors the hosted schema so the same [`TableQuery`] can be served
//! offline. Embeds are resolved with one lookup per embed per row, which is
//! fine for league-sized tables.

use async_trait::async_trait;
use dirs::cache_dir;
use rusqlite::{
    functions::FunctionFlags, params_from_iter, types::Value as SqlValue, types::ValueRef, Connection,
};
use serde_json::{Map, Number, Value};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{query::escape_like, Backend, Embed, Filter, FilterValue, Join, TableQuery};
use crate::{error::LeagueError, Result};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS teams (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    image_url TEXT,
    city TEXT,
    league TEXT,
    primary_color TEXT,
    wins INTEGER DEFAULT 0,
    losses INTEGER DEFAULT 0,
    championships INTEGER DEFAULT 0,
    ranking INTEGER,
    founded INTEGER
);
CREATE TABLE IF NOT EXISTS team_statistics (
    id INTEGER PRIMARY KEY,
    team_id INTEGER REFERENCES teams(id),
    season TEXT,
    matches_played INTEGER,
    wins INTEGER,
    losses INTEGER,
    points_for INTEGER,
    points_against INTEGER,
    win_streak INTEGER,
    loss_streak INTEGER,
    form_points REAL,
    trend TEXT,
    last_updated TEXT,
    created_at TEXT
);
CREATE TABLE IF NOT EXISTS team_performance (
    id INTEGER PRIMARY KEY,
    team_id INTEGER REFERENCES teams(id),
    season TEXT,
    match_date TEXT,
    opponent_id INTEGER,
    result TEXT,
    points_scored INTEGER,
    points_conceded INTEGER,
    created_at TEXT
);
CREATE TABLE IF NOT EXISTS players (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    position TEXT,
    team_id INTEGER REFERENCES teams(id),
    nationality TEXT,
    age INTEGER,
    height TEXT,
    image_url TEXT,
    category TEXT,
    bio TEXT,
    created_at TEXT,
    updated_at TEXT
);
CREATE TABLE IF NOT EXISTS player_stats (
    id INTEGER PRIMARY KEY,
    player_id INTEGER REFERENCES players(id),
    season TEXT,
    points INTEGER,
    blocks INTEGER,
    aces INTEGER,
    attack_percentage REAL,
    digs INTEGER,
    matches_played INTEGER,
    attack_efficiency REAL,
    serve_effectiveness REAL,
    reception_quality REAL,
    block_efficiency REAL,
    defense_rating REAL,
    form_rating REAL,
    created_at TEXT,
    updated_at TEXT
);
CREATE TABLE IF NOT EXISTS player_rankings (
    id INTEGER PRIMARY KEY,
    player_id INTEGER REFERENCES players(id),
    position TEXT,
    overall_rank INTEGER,
    position_rank INTEGER,
    league_rank INTEGER,
    total_score REAL,
    efficiency REAL,
    form_rating REAL,
    consistency REAL,
    peak_performance REAL,
    rank_change INTEGER,
    form_trend,
    last_updated TEXT,
    created_at TEXT
);
CREATE TABLE IF NOT EXISTS matches (
    id INTEGER PRIMARY KEY,
    home_team_id INTEGER REFERENCES teams(id),
    away_team_id INTEGER REFERENCES teams(id),
    home_team_image_url TEXT,
    away_team_image_url TEXT,
    match_date TEXT NOT NULL,
    home_score INTEGER DEFAULT 0,
    away_score INTEGER DEFAULT 0,
    status TEXT,
    league TEXT,
    round TEXT,
    created_at TEXT,
    updated_at TEXT
);
CREATE TABLE IF NOT EXISTS match_statistics (
    id TEXT PRIMARY KEY,
    match_id INTEGER REFERENCES matches(id),
    team_id INTEGER REFERENCES teams(id),
    total_points INTEGER,
    attacks INTEGER,
    blocks INTEGER,
    aces INTEGER,
    errors INTEGER,
    digs INTEGER,
    kills INTEGER,
    created_at TEXT,
    updated_at TEXT
);
CREATE TABLE IF NOT EXISTS set_scores (
    id INTEGER PRIMARY KEY,
    match_id INTEGER REFERENCES matches(id),
    set_number INTEGER,
    home_score INTEGER,
    away_score INTEGER,
    duration_minutes INTEGER,
    created_at TEXT
);
CREATE INDEX IF NOT EXISTS idx_players_team ON players(team_id);
CREATE INDEX IF NOT EXISTS idx_matches_date ON matches(match_date);
CREATE INDEX IF NOT EXISTS idx_set_scores_match ON set_scores(match_id, set_number);
";

/// SQL name of the Unicode-aware lowercase function. SQLite's own `LOWER`
/// and `LIKE` only fold ASCII.
const LOWER_FN: &str = "unicode_lower";

/// Serves league tables from a SQLite file or an in-memory database.
pub struct SqliteBackend {
    conn: Mutex<Connection>,
    label: String,
}

impl SqliteBackend {
    /// Open an existing snapshot file.
    ///
    /// A missing file is an error rather than a silently created empty
    /// database.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(LeagueError::Snapshot {
                message: format!("snapshot not found at {}", path.display()),
            });
        }
        let conn = Connection::open(path)?;
        Self::with_connection(conn, path.display().to_string())
    }

    /// Create (or open) a snapshot file, making parent directories as needed.
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        Self::with_connection(conn, path.display().to_string())
    }

    pub fn new_in_memory() -> Result<Self> {
        Self::with_connection(Connection::open_in_memory()?, ":memory:".to_string())
    }

    fn with_connection(conn: Connection, label: String) -> Result<Self> {
        conn.create_scalar_function(
            LOWER_FN,
            1,
            FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
            |ctx| Ok(ctx.get::<Option<String>>(0)?.map(|s| s.to_lowercase())),
        )?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
            label,
        })
    }

    /// Default snapshot location: `<cache_dir>/volley-league/league.db`.
    pub fn default_path() -> Result<PathBuf> {
        let cache_dir = cache_dir().ok_or_else(|| LeagueError::Snapshot {
            message: "Could not determine cache directory".to_string(),
        })?;
        Ok(cache_dir.join("volley-league").join("league.db"))
    }

    /// Load rows into the snapshot from a SQL script.
    pub fn import_sql(&self, sql: &str) -> Result<()> {
        self.connection()?.execute_batch(sql)?;
        Ok(())
    }

    fn connection(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| LeagueError::Snapshot {
            message: "snapshot connection poisoned".to_string(),
        })
    }
}

#[async_trait]
impl Backend for SqliteBackend {
    async fn select(&self, query: &TableQuery) -> Result<Vec<Value>> {
        let conn = self.connection()?;
        run_query(&conn, query)
    }

    async fn count(&self, table: &'static str) -> Result<usize> {
        let conn = self.connection()?;
        let sql = format!("SELECT COUNT(*) FROM {}", quote_ident(table));
        let rows: i64 = conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(usize::try_from(rows).unwrap_or_default())
    }

    fn describe(&self) -> String {
        format!("sqlite {}", self.label)
    }
}

fn run_query(conn: &Connection, query: &TableQuery) -> Result<Vec<Value>> {
    let mut args: Vec<SqlValue> = Vec::new();
    let mut sql = format!("SELECT * FROM {}", quote_ident(query.table));

    let clauses: Vec<String> = query
        .filters
        .iter()
        .map(|f| filter_sql(f, &mut args))
        .collect();
    if !clauses.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&clauses.join(" AND "));
    }
    if !query.order.is_empty() {
        let order: Vec<String> = query
            .order
            .iter()
            .map(|o| format!("{} {}", quote_ident(o.column), o.direction.as_str().to_uppercase()))
            .collect();
        sql.push_str(" ORDER BY ");
        sql.push_str(&order.join(", "));
    }
    if let Some(limit) = query.limit {
        sql.push_str(&format!(" LIMIT {}", limit));
    }

    let mut rows = fetch_objects(conn, &sql, &args)?;
    for row in rows.iter_mut() {
        attach_embeds(conn, row, &query.embeds)?;
        if !query.columns.is_empty() {
            if let Value::Object(obj) = row {
                obj.retain(|key, _| {
                    query.columns.contains(&key.as_str())
                        || query.embeds.iter().any(|e| e.alias == key.as_str())
                });
            }
        }
    }
    Ok(rows)
}

fn filter_sql(filter: &Filter, args: &mut Vec<SqlValue>) -> String {
    match filter {
        Filter::Eq(col, v) => {
            args.push(to_sql_value(v));
            format!("{} = ?", quote_ident(col))
        }
        Filter::Neq(col, v) => {
            args.push(to_sql_value(v));
            format!("{} <> ?", quote_ident(col))
        }
        Filter::NotNull(col) => format!("{} IS NOT NULL", quote_ident(col)),
        Filter::ILike(col, text) => {
            args.push(SqlValue::Text(format!("%{}%", escape_like(&text.to_lowercase()))));
            format!("{}({}) LIKE ? ESCAPE '\\'", LOWER_FN, quote_ident(col))
        }
        Filter::AnyOf(inner) if inner.is_empty() => "0".to_string(),
        Filter::AnyOf(inner) => {
            let parts: Vec<String> = inner.iter().map(|f| filter_sql(f, args)).collect();
            format!("({})", parts.join(" OR "))
        }
    }
}

fn attach_embeds(conn: &Connection, row: &mut Value, embeds: &[Embed]) -> Result<()> {
    for embed in embeds {
        let embedded = match embed.join {
            Join::Parent { fk } => {
                let key = json_to_sql(row.get(fk));
                if key == SqlValue::Null {
                    Value::Null
                } else {
                    let sql = format!("SELECT * FROM {} WHERE \"id\" = ? LIMIT 1", quote_ident(embed.table));
                    let mut found = fetch_objects(conn, &sql, &[key])?;
                    match found.pop() {
                        Some(mut child) => {
                            attach_embeds(conn, &mut child, &embed.embeds)?;
                            child
                        }
                        None => Value::Null,
                    }
                }
            }
            Join::Children { fk } => {
                let key = json_to_sql(row.get("id"));
                let mut sql = format!("SELECT * FROM {} WHERE {} = ?", quote_ident(embed.table), quote_ident(fk));
                if let Some(order) = &embed.order {
                    sql.push_str(&format!(
                        " ORDER BY {} {}",
                        quote_ident(order.column),
                        order.direction.as_str().to_uppercase()
                    ));
                }
                let mut children = fetch_objects(conn, &sql, &[key])?;
                for child in children.iter_mut() {
                    attach_embeds(conn, child, &embed.embeds)?;
                }
                Value::Array(children)
            }
        };

        match row {
            Value::Object(obj) => {
                obj.insert(embed.alias.to_string(), embedded);
            }
            _ => {
                return Err(LeagueError::MalformedRow {
                    table: embed.table.to_string(),
                })
            }
        }
    }
    Ok(())
}

fn fetch_objects(conn: &Connection, sql: &str, args: &[SqlValue]) -> Result<Vec<Value>> {
    let mut stmt = conn.prepare(sql)?;
    let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
    let rows = stmt.query_map(params_from_iter(args.iter()), |row| {
        let mut obj = Map::with_capacity(names.len());
        for (idx, name) in names.iter().enumerate() {
            obj.insert(name.clone(), sql_to_json(row.get_ref(idx)?));
        }
        Ok(Value::Object(obj))
    })?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

fn sql_to_json(value: ValueRef<'_>) -> Value {
    match value {
        ValueRef::Null | ValueRef::Blob(_) => Value::Null,
        ValueRef::Integer(i) => Value::from(i),
        ValueRef::Real(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
        ValueRef::Text(bytes) => Value::String(String::from_utf8_lossy(bytes).into_owned()),
    }
}

fn json_to_sql(value: Option<&Value>) -> SqlValue {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .map(SqlValue::Integer)
            .or_else(|| n.as_f64().map(SqlValue::Real))
            .unwrap_or(SqlValue::Null),
        Some(Value::String(s)) => SqlValue::Text(s.clone()),
        Some(Value::Bool(b)) => SqlValue::Integer(i64::from(*b)),
        _ => SqlValue::Null,
    }
}

fn to_sql_value(value: &FilterValue) -> SqlValue {
    match value {
        FilterValue::Int(i) => SqlValue::Integer(*i),
        FilterValue::Text(s) => SqlValue::Text(s.clone()),
    }
}

fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}

#[cfg(test)]
mod tests;
