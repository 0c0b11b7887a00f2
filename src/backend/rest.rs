//! PostgREST client for the hosted league database.

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_RANGE},
    Client,
};
use serde_json::Value;

use super::{Backend, TableQuery};
use crate::{error::LeagueError, Result};

/// Path prefix PostgREST is mounted under on the managed service.
pub const REST_PATH: &str = "/rest/v1";

/// Reads tables over the PostgREST HTTP interface.
#[derive(Debug, Clone)]
pub struct RestBackend {
    client: Client,
    base_url: String,
    headers: HeaderMap,
}

impl RestBackend {
    /// Build a client for `base_url` authenticated with the public anon key.
    pub fn new(base_url: impl Into<String>, anon_key: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("volley-league/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            headers: auth_headers(anon_key)?,
        })
    }

    pub fn table_url(&self, table: &str) -> String {
        format!("{}{}/{}", self.base_url, REST_PATH, table)
    }
}

/// `apikey` plus bearer auth, as the managed service expects for anon reads.
fn auth_headers(anon_key: &str) -> Result<HeaderMap> {
    let mut h = HeaderMap::new();
    h.insert(ACCEPT, HeaderValue::from_static("application/json"));
    h.insert("apikey", HeaderValue::from_str(anon_key)?);
    h.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", anon_key))?,
    );
    Ok(h)
}

fn parse_content_range_total(range: &str) -> Option<usize> {
    range.rsplit_once('/')?.1.trim().parse().ok()
}

#[async_trait]
impl Backend for RestBackend {
    async fn select(&self, query: &TableQuery) -> Result<Vec<Value>> {
        let url = self.table_url(query.table);
        let params = query.to_postgrest_params();
        tracing::debug!(url = %url, params = ?params, "postgrest select");

        let rows = self
            .client
            .get(&url)
            .headers(self.headers.clone())
            .query(&params)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Value>>()
            .await?;
        Ok(rows)
    }

    /// `HEAD` with `Prefer: count=exact`; the total is the part of
    /// `Content-Range` after the slash (`0-999/1500`, `*/0`).
    async fn count(&self, table: &'static str) -> Result<usize> {
        let url = self.table_url(table);
        tracing::debug!(url = %url, "postgrest count");

        let response = self
            .client
            .head(&url)
            .headers(self.headers.clone())
            .header("Prefer", "count=exact")
            .send()
            .await?
            .error_for_status()?;
        response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range_total)
            .ok_or_else(|| LeagueError::MissingCount {
                table: table.to_string(),
            })
    }

    fn describe(&self) -> String {
        format!("postgrest {}", self.base_url)
    }
}
