//! Remote scan API event store.

use serde_json::Value;
use tokio::runtime::Handle;

use faultwatch_adapters::scan_api::ScanApiAdapter;

use super::{EventStore, ScanPage, StoreError};
use crate::settings::StoreSettings;

/// An event store backed by the remote scan API.
///
/// Each page is fetched by blocking on the async adapter, so a scan runs to
/// completion inside the refresh cycle that asked for it.
#[derive(Debug)]
pub struct ApiStore {
    adapter: ScanApiAdapter,
    runtime: Handle,
    description: String,
}

impl ApiStore {
    pub fn new(adapter: ScanApiAdapter, runtime: Handle) -> Self {
        let description = format!("api: {} ({})", adapter.table(), adapter.endpoint());
        Self {
            adapter,
            runtime,
            description,
        }
    }

    /// Build the adapter from validated store settings.
    pub fn from_settings(settings: &StoreSettings, runtime: Handle) -> Result<Self, StoreError> {
        let mut builder = ScanApiAdapter::builder().table(settings.table.as_str());
        if let Some(endpoint) = &settings.endpoint {
            builder = builder.endpoint(endpoint.as_str());
        }
        if let Some(region) = &settings.region {
            builder = builder.region(region.as_str());
        }
        if let (Some(id), Some(secret)) = (&settings.access_key_id, &settings.secret_access_key) {
            builder = builder.credentials(id.as_str(), secret.as_str());
        }

        Ok(Self::new(builder.build()?, runtime))
    }
}

impl EventStore for ApiStore {
    fn scan_page(&mut self, start_key: Option<&Value>) -> Result<ScanPage, StoreError> {
        let response = self.runtime.block_on(self.adapter.scan_page(start_key))?;
        Ok(response.into())
    }

    fn description(&self) -> &str {
        &self.description
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::StoreKind;

    fn settings() -> StoreSettings {
        StoreSettings {
            kind: StoreKind::Api,
            endpoint: Some("http://store.local".to_string()),
            region: Some("eu-north-1".to_string()),
            access_key_id: Some("AKIDEXAMPLE".to_string()),
            secret_access_key: Some("secret".to_string()),
            ..StoreSettings::default()
        }
    }

    #[test]
    fn test_from_settings() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let store = ApiStore::from_settings(&settings(), runtime.handle().clone()).unwrap();
        assert_eq!(store.description(), "api: FaultEventLog (http://store.local)");
    }

    #[test]
    fn test_from_settings_without_credentials() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let settings = StoreSettings {
            access_key_id: None,
            ..settings()
        };
        let err = ApiStore::from_settings(&settings, runtime.handle().clone()).unwrap_err();
        assert!(matches!(err, StoreError::Adapter(_)));
    }

    #[test]
    fn test_unreachable_store_is_an_error() {
        let runtime = tokio::runtime::Runtime::new().unwrap();
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let settings = StoreSettings {
            endpoint: Some(format!("http://127.0.0.1:{}", port)),
            ..settings()
        };

        let mut store = ApiStore::from_settings(&settings, runtime.handle().clone()).unwrap();
        assert!(store.scan_page(None).is_err());
    }
}
