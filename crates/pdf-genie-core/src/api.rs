//! Typed client for the PDF Genie backend HTTP surface.
//!
//! Four endpoints: `search` and `extract` return JSON that flows through the
//! normalizer; `pdf` and `download_csv` return raw bytes. The base URL and
//! per-request timeout come from [`Config`](crate::Config); nothing is
//! hardcoded. Non-2xx statuses are failures.

use std::time::Duration;

use serde_json::Value;

use crate::{Config, Mode, QueryError, ResultSet, normalize};

#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl ApiClient {
    pub fn new(config: &Config) -> Self {
        let mut base_url = config.base_url.clone();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            base_url,
            client: reqwest::Client::new(),
            timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Retrieval: GET `search?query=...`.
    pub async fn search(&self, query: &str) -> Result<Value, QueryError> {
        let url = format!("{}search?query={}", self.base_url, urlencoding::encode(query));
        self.get_json(&url).await
    }

    /// Extraction: GET `extract?entity_json=...`.
    pub async fn extract(&self, entity_json: &str) -> Result<Value, QueryError> {
        let url = format!(
            "{}extract?entity_json={}",
            self.base_url,
            urlencoding::encode(entity_json)
        );
        self.get_json(&url).await
    }

    /// Fetch the raw bytes of a source document via GET `pdf?url=...`.
    pub async fn fetch_pdf(&self, source: &str) -> Result<Vec<u8>, QueryError> {
        let url = format!("{}pdf?url={}", self.base_url, urlencoding::encode(source));
        self.get_bytes(&url).await
    }

    /// Render the current query + item list as CSV via GET `download_csv`.
    pub async fn download_csv(
        &self,
        entity_json: &str,
        results_json: &str,
    ) -> Result<Vec<u8>, QueryError> {
        let url = format!(
            "{}download_csv?entity_json={}&results_json={}",
            self.base_url,
            urlencoding::encode(entity_json),
            urlencoding::encode(results_json)
        );
        self.get_bytes(&url).await
    }

    async fn get_json(&self, url: &str) -> Result<Value, QueryError> {
        let resp = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| QueryError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(QueryError::Network(format!("HTTP {}", resp.status())));
        }

        resp.json()
            .await
            .map_err(|e| QueryError::MalformedResponse(e.to_string()))
    }

    async fn get_bytes(&self, url: &str) -> Result<Vec<u8>, QueryError> {
        let resp = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| QueryError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(QueryError::Network(format!("HTTP {}", resp.status())));
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| QueryError::Network(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

/// Dispatch one query for the given mode and normalize the response.
///
/// This is the whole request path between a submit ticket and the result
/// set it produces; the caller decides whether the result is still current.
pub async fn run_query(
    client: &ApiClient,
    mode: Mode,
    query: &str,
) -> Result<ResultSet, QueryError> {
    tracing::debug!(mode = mode.label(), "dispatching query");
    let raw = match mode {
        Mode::Retrieval => client.search(query).await?,
        Mode::Extraction => client.extract(query).await?,
    };
    let set = normalize(mode, raw)?;
    tracing::debug!(items = set.items.len(), "query normalized");
    Ok(set)
}
