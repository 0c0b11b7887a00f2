//! Error types for the volleyball league client

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LeagueError>;

#[derive(Error, Debug)]
pub enum LeagueError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Failed to parse id: {0}")]
    InvalidId(#[from] std::num::ParseIntError),

    #[error("No backend configured: pass --url/--anon-key or --snapshot, or set {url_var} and {key_var}")]
    MissingBackend { url_var: String, key_var: String },

    #[error("Snapshot error: {message}")]
    Snapshot { message: String },

    #[error("Invalid position: {position}")]
    InvalidPosition { position: String },

    #[error("Backend returned a non-object row for table {table}")]
    MalformedRow { table: String },

    #[error("Backend did not report a row count for table {table}")]
    MissingCount { table: String },
}

#[cfg(test)]
mod tests;
