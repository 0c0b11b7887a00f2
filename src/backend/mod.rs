//! Backend query interface.
//!
//! The league data lives in a managed relational service. This module hides
//! it behind one trait so the query layer does not care whether rows come
//! from the hosted PostgREST endpoint or from a local SQLite snapshot:
//! - `query`: backend-neutral [`TableQuery`] builder
//! - `rest`: PostgREST client over `reqwest`
//! - `sqlite`: snapshot reader over `rusqlite`

pub mod query;
pub mod rest;
pub mod sqlite;

use async_trait::async_trait;
use serde_json::Value;

use crate::Result;

pub use query::{tables, Direction, Embed, Filter, FilterValue, Join, Order, TableQuery};
pub use rest::RestBackend;
pub use sqlite::SqliteBackend;

/// A read-only source of league rows.
///
/// Each returned row is a JSON object with embeds nested under their alias,
/// so both implementations feed the same serde models.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn select(&self, query: &TableQuery) -> Result<Vec<Value>>;

    /// Exact number of rows in `table`, unaffected by any response row cap.
    async fn count(&self, table: &'static str) -> Result<usize>;

    /// Short label for logs.
    fn describe(&self) -> String;
}
