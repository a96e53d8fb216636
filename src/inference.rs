//! Blocking front end for the inference adapter.
//!
//! The dashboard loop is synchronous, so each prediction blocks the refresh
//! cycle until the adapter returns. There is no cancellation and no cache.

use tokio::runtime::Handle;

use faultwatch_adapters::inference::{
    InferenceAdapter, InferenceError, InferenceRequest, Prediction,
};
use faultwatch_adapters::AdapterError;
use faultwatch_types::TelemetryRecord;

use crate::settings::InferenceSettings;

/// The outcome of one inference call, as shown by the risk panel.
pub type InferenceResult = Result<Prediction, InferenceError>;

/// Synchronous inference client.
#[derive(Debug, Clone)]
pub struct InferenceClient {
    adapter: InferenceAdapter,
    runtime: Handle,
}

impl InferenceClient {
    pub fn new(adapter: InferenceAdapter, runtime: Handle) -> Self {
        Self { adapter, runtime }
    }

    /// Build a client from settings. Returns `None` when no endpoint is set.
    pub fn from_settings(
        settings: &InferenceSettings,
        runtime: Handle,
    ) -> Result<Option<Self>, AdapterError> {
        let Some(endpoint) = &settings.endpoint else {
            return Ok(None);
        };

        let mut builder = InferenceAdapter::builder().endpoint(endpoint.as_str());
        if let Some(timeout) = settings.timeout() {
            builder = builder.timeout(timeout);
        }
        Ok(Some(Self::new(builder.build()?, runtime)))
    }

    pub fn endpoint(&self) -> &str {
        self.adapter.endpoint()
    }

    /// Request a risk assessment for `record`, blocking until it completes.
    pub fn predict(&self, record: &TelemetryRecord) -> InferenceResult {
        let request =
            InferenceRequest::new(&record.device_id, record.temperature, record.vibration);
        self.runtime.block_on(self.adapter.predict(&request))
    }
}
