//! Scan-style event store client.
//!
//! Reads a fault-event table one page at a time over HTTP. Each call to
//! [`ScanApiAdapter::scan_page`] returns up to one page of raw items and the
//! key to continue from; callers keep scanning until no key comes back.
//!
//! The store is written concurrently by other producers and a scan gives no
//! transactional guarantee, so consecutive pages may reflect different
//! moments in time.
//!
//! ## Wire format
//!
//! Request (`POST <endpoint>/scan`, basic auth with the access key pair):
//!
//! ```json
//! {"table": "FaultEventLog", "region": "eu-north-1", "exclusive_start_key": null}
//! ```
//!
//! Response:
//!
//! ```json
//! {"Items": [{"device_id": "press-04", "payload": {"timestamp": "1700000000"}}], "LastEvaluatedKey": null}
//! ```

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::AdapterError;

/// One page of a table scan.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ScanResponse {
    /// Raw items, exactly as stored.
    #[serde(rename = "Items", default)]
    pub items: Vec<Value>,
    /// Key to pass as `exclusive_start_key` for the next page.
    #[serde(rename = "LastEvaluatedKey", default)]
    pub last_evaluated_key: Option<Value>,
}

#[derive(Debug, Serialize)]
struct ScanRequest<'a> {
    table: &'a str,
    region: &'a str,
    exclusive_start_key: Option<&'a Value>,
}

/// Adapter for scanning a remote fault-event table.
#[derive(Debug, Clone)]
pub struct ScanApiAdapter {
    client: Client,
    endpoint: String,
    table: String,
    region: String,
    access_key_id: String,
    secret_access_key: String,
}

impl ScanApiAdapter {
    /// Create a new builder for configuring the adapter.
    pub fn builder() -> ScanApiAdapterBuilder {
        ScanApiAdapterBuilder::default()
    }

    /// The table being scanned.
    pub fn table(&self) -> &str {
        &self.table
    }

    /// The scan endpoint base URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch one page, starting after `exclusive_start_key` when given.
    pub async fn scan_page(
        &self,
        exclusive_start_key: Option<&Value>,
    ) -> Result<ScanResponse, AdapterError> {
        let url = format!("{}/scan", self.endpoint.trim_end_matches('/'));
        let body = ScanRequest {
            table: &self.table,
            region: &self.region,
            exclusive_start_key,
        };

        let response = self
            .client
            .post(&url)
            .basic_auth(&self.access_key_id, Some(&self.secret_access_key))
            .json(&body)
            .send()
            .await?;

        if response.status() == StatusCode::UNAUTHORIZED
            || response.status() == StatusCode::FORBIDDEN
        {
            return Err(AdapterError::Auth("Invalid credentials".to_string()));
        }

        if !response.status().is_success() {
            return Err(AdapterError::Http(format!(
                "Scan API returned status {}",
                response.status()
            )));
        }

        let page: ScanResponse = response
            .json()
            .await
            .map_err(|e| AdapterError::Parse(e.to_string()))?;

        debug!(
            table = %self.table,
            items = page.items.len(),
            more = page.last_evaluated_key.is_some(),
            "scanned page"
        );
        Ok(page)
    }
}

/// Builder for ScanApiAdapter.
#[derive(Debug, Default)]
pub struct ScanApiAdapterBuilder {
    endpoint: Option<String>,
    table: Option<String>,
    region: Option<String>,
    access_key_id: Option<String>,
    secret_access_key: Option<String>,
    timeout: Option<Duration>,
}

impl ScanApiAdapterBuilder {
    /// Set the scan API base URL (e.g., "https://store.example.com").
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the table to scan (default: "FaultEventLog").
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    /// Set the region the table lives in.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set the access key pair used for authentication.
    pub fn credentials(
        mut self,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        self.access_key_id = Some(access_key_id.into());
        self.secret_access_key = Some(secret_access_key.into());
        self
    }

    /// Set the request timeout (default: 10 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the adapter. Endpoint, region and credentials are required.
    pub fn build(self) -> Result<ScanApiAdapter, AdapterError> {
        let missing = |what: &str| AdapterError::Config(format!("scan API {} is required", what));

        let endpoint = self.endpoint.ok_or_else(|| missing("endpoint"))?;
        let region = self.region.ok_or_else(|| missing("region"))?;
        let access_key_id = self.access_key_id.ok_or_else(|| missing("access key id"))?;
        let secret_access_key = self
            .secret_access_key
            .ok_or_else(|| missing("secret access key"))?;

        let client = Client::builder()
            .timeout(self.timeout.unwrap_or(Duration::from_secs(10)))
            .build()?;

        Ok(ScanApiAdapter {
            client,
            endpoint,
            table: self.table.unwrap_or_else(|| "FaultEventLog".to_string()),
            region,
            access_key_id,
            secret_access_key,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_server::{serve_once, Method, StatusCode};
    use serde_json::json;

    fn adapter(url: &str) -> ScanApiAdapter {
        ScanApiAdapter::builder()
            .endpoint(url)
            .region("eu-north-1")
            .credentials("AKIDEXAMPLE", "secret")
            .build()
            .unwrap()
    }

    #[test]
    fn test_builder_defaults() {
        let adapter = adapter("http://store.local");
        assert_eq!(adapter.table(), "FaultEventLog");
        assert_eq!(adapter.endpoint(), "http://store.local");
    }

    #[test]
    fn test_builder_requires_credentials() {
        let err = ScanApiAdapter::builder()
            .endpoint("http://store.local")
            .region("eu-north-1")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("access key id"));
    }

    #[test]
    fn test_scan_response_defaults() {
        let page: ScanResponse = serde_json::from_str("{}").unwrap();
        assert!(page.items.is_empty());
        assert!(page.last_evaluated_key.is_none());
    }

    #[tokio::test]
    async fn test_scan_page_sends_start_key() {
        let (url, server) = serve_once(
            StatusCode::OK,
            r#"{"Items":[{"device_id":"a","timestamp":1}],"LastEvaluatedKey":{"device_id":"a"}}"#,
        )
        .await;

        let key = json!({"device_id": "z"});
        let page = adapter(&url).scan_page(Some(&key)).await.unwrap();

        assert_eq!(page.items.len(), 1);
        assert_eq!(page.last_evaluated_key, Some(json!({"device_id": "a"})));

        let request = server.await.unwrap();
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.path, "/scan");
        assert!(request
            .header("authorization")
            .is_some_and(|v| v.starts_with("Basic ")));
        assert_eq!(
            request.json(),
            json!({"table": "FaultEventLog", "region": "eu-north-1", "exclusive_start_key": {"device_id": "z"}})
        );
    }

    #[tokio::test]
    async fn test_scan_page_unauthorized() {
        let (url, _server) = serve_once(StatusCode::UNAUTHORIZED, "{}").await;
        let err = adapter(&url).scan_page(None).await.unwrap_err();
        assert!(matches!(err, AdapterError::Auth(_)));
    }

    #[tokio::test]
    async fn test_scan_page_bad_body() {
        let (url, _server) = serve_once(StatusCode::OK, r#"{"Items": 5}"#).await;
        let err = adapter(&url).scan_page(None).await.unwrap_err();
        assert!(matches!(err, AdapterError::Parse(_)));
    }
}
