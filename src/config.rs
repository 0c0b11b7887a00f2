//! Backend endpoint and credential resolution.
//!
//! Flags win over environment variables. `--offline` without a path falls
//! back to the snapshot in the user cache directory.

use std::path::PathBuf;
use std::sync::Arc;

use crate::{
    backend::{Backend, RestBackend, SqliteBackend},
    cli::BackendArgs,
    LeagueError, Result, ANON_KEY_ENV_VAR, SNAPSHOT_ENV_VAR, URL_ENV_VAR,
};

/// Where league rows are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendConfig {
    Rest { url: String, anon_key: String },
    Snapshot { path: PathBuf },
}

impl BackendConfig {
    /// Resolve from flags, then the process environment.
    pub fn from_env(args: &BackendArgs) -> Result<Self> {
        Self::resolve(args, |name| std::env::var(name).ok())
    }

    /// Resolve from flags, then `lookup` for environment variables.
    ///
    /// Blank values count as unset.
    pub fn resolve<F>(args: &BackendArgs, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let flag = |value: &Option<String>| value.clone().filter(|v| !v.trim().is_empty());

        if let Some(path) = &args.snapshot {
            return Ok(BackendConfig::Snapshot { path: path.clone() });
        }

        if args.offline {
            let path = match env(SNAPSHOT_ENV_VAR) {
                Some(p) => PathBuf::from(p),
                None => SqliteBackend::default_path()?,
            };
            return Ok(BackendConfig::Snapshot { path });
        }

        let url = flag(&args.url).or_else(|| env(URL_ENV_VAR));
        let anon_key = flag(&args.anon_key).or_else(|| env(ANON_KEY_ENV_VAR));
        if let (Some(url), Some(anon_key)) = (url, anon_key) {
            return Ok(BackendConfig::Rest { url, anon_key });
        }

        if let Some(p) = env(SNAPSHOT_ENV_VAR) {
            return Ok(BackendConfig::Snapshot {
                path: PathBuf::from(p),
            });
        }

        Err(LeagueError::MissingBackend {
            url_var: URL_ENV_VAR.to_string(),
            key_var: ANON_KEY_ENV_VAR.to_string(),
        })
    }

    /// Build the process-wide backend handle.
    pub fn connect(&self) -> Result<Arc<dyn Backend>> {
        let backend: Arc<dyn Backend> = match self {
            BackendConfig::Rest { url, anon_key } => Arc::new(RestBackend::new(url.as_str(), anon_key)?),
            BackendConfig::Snapshot { path } => Arc::new(SqliteBackend::open(path)?),
        };
        tracing::debug!(backend = %backend.describe(), "backend ready");
        Ok(backend)
    }
}
