//! Local snapshot management.

use std::path::{Path, PathBuf};

use crate::{backend::SqliteBackend, Result};

/// Load `file` into the snapshot at `path` (or the default location).
///
/// Returns the snapshot path that was written.
pub fn handle_snapshot_import(file: &Path, path: Option<PathBuf>) -> Result<PathBuf> {
    let target = match path {
        Some(p) => p,
        None => SqliteBackend::default_path()?,
    };
    let sql = std::fs::read_to_string(file)?;

    tracing::info!(source = %file.display(), snapshot = %target.display(), "importing snapshot");
    let snapshot = SqliteBackend::create(&target)?;
    snapshot.import_sql(&sql)?;

    println!("✓ Snapshot written to {}", target.display());
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{tables, Backend, TableQuery};

    #[tokio::test]
    async fn test_import_creates_readable_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let sql_file = dir.path().join("league.sql");
        std::fs::write(&sql_file, include_str!("../../tests/fixtures/league.sql")).unwrap();
        let target = dir.path().join("nested").join("league.db");

        let written = handle_snapshot_import(&sql_file, Some(target.clone())).unwrap();
        assert_eq!(written, target);

        let backend = SqliteBackend::open(&target).unwrap();
        let teams = backend.select(&TableQuery::from(tables::TEAMS)).await.unwrap();
        assert_eq!(teams.len(), 4);
    }

    #[test]
    fn test_missing_source_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = handle_snapshot_import(&dir.path().join("nope.sql"), Some(dir.path().join("x.db")))
            .unwrap_err();
        assert!(matches!(err, crate::LeagueError::Io(_)));
    }
}
