//! Predictive-inference client.
//!
//! Posts the latest telemetry of one device to a stateless HTTP endpoint and
//! classifies whatever comes back. Every call is a single attempt: there
//! are no retries and no result cache, so a failed call is reported to the
//! caller as an [`InferenceError`] and the next refresh simply tries again.
//!
//! ## Wire format
//!
//! Request (`POST <endpoint>`):
//!
//! ```json
//! {"device_id": "press-04", "temperature": 71.5, "vibration": 0.031}
//! ```
//!
//! Response: any JSON object with a `prediction` key is a success. The usual
//! shape is
//!
//! ```json
//! {"prediction": "High Risk", "risk_score": 82, "confidence": 0.91, "failure_mode": "bearing wear"}
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use faultwatch_adapters::inference::{InferenceAdapter, InferenceRequest};
//!
//! # tokio_test::block_on(async {
//! let adapter = InferenceAdapter::builder()
//!     .endpoint("http://localhost:9000/predict")
//!     .build()
//!     .unwrap();
//!
//! let result = adapter.predict(&InferenceRequest::new("press-04", 71.5, 0.031)).await;
//! if let Err(e) = &result {
//!     eprintln!("{}: {}", e.tag(), e);
//! }
//! # });
//! ```

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use faultwatch_types::RiskLevel;

use crate::AdapterError;

/// Telemetry sent to the inference endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InferenceRequest {
    pub device_id: String,
    pub temperature: f64,
    pub vibration: f64,
}

impl InferenceRequest {
    pub fn new(device_id: impl Into<String>, temperature: f64, vibration: f64) -> Self {
        Self {
            device_id: device_id.into(),
            temperature,
            vibration,
        }
    }
}

/// A successful inference response.
///
/// The typed fields are read out of `body` when present; `body` itself is
/// kept verbatim so callers can show everything the service returned.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// The `prediction` label.
    pub label: RiskLevel,
    /// Failure likelihood on a 0–100 scale.
    pub risk_score: Option<f64>,
    /// Model confidence, usually 0–1.
    pub confidence: Option<f64>,
    /// Most likely failure mode.
    pub failure_mode: Option<String>,
    /// The full response body.
    pub body: Value,
}

impl Prediction {
    fn from_body(body: Value) -> Self {
        let label = match &body["prediction"] {
            Value::String(s) => RiskLevel::parse(s),
            other => RiskLevel::Other(other.to_string()),
        };
        let failure_mode = match &body["failure_mode"] {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        };

        Self {
            label,
            risk_score: body["risk_score"].as_f64(),
            confidence: body["confidence"].as_f64(),
            failure_mode,
            body,
        }
    }
}

/// Why an inference call produced no prediction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InferenceError {
    /// Transport failure or non-2xx status.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The body was not JSON.
    #[error("JSON decoding failed: {0}")]
    Decode(String),

    /// The body was JSON but had no `prediction` key.
    #[error("Missing 'prediction' key in inference response")]
    MissingPrediction { raw: Value },
}

impl InferenceError {
    /// Short category label for display.
    pub fn tag(&self) -> &'static str {
        match self {
            InferenceError::Http(_) => "HTTP error",
            InferenceError::Decode(_) => "JSON decoding failed",
            InferenceError::MissingPrediction { .. } => "Missing prediction key",
        }
    }

    /// The response body, when one was received and parsed.
    pub fn raw(&self) -> Option<&Value> {
        match self {
            InferenceError::MissingPrediction { raw } => Some(raw),
            _ => None,
        }
    }
}

/// Classify a response body.
///
/// Any JSON object with a `prediction` key is a success; everything else
/// maps to the matching [`InferenceError`].
pub fn classify_body(bytes: &[u8]) -> Result<Prediction, InferenceError> {
    let body: Value =
        serde_json::from_slice(bytes).map_err(|e| InferenceError::Decode(e.to_string()))?;

    match &body {
        Value::Object(map) if map.contains_key("prediction") => Ok(Prediction::from_body(body)),
        _ => Err(InferenceError::MissingPrediction { raw: body }),
    }
}

/// Client for the predictive-inference endpoint.
#[derive(Debug, Clone)]
pub struct InferenceAdapter {
    client: Client,
    endpoint: String,
}

impl InferenceAdapter {
    /// Create a new builder for configuring the adapter.
    pub fn builder() -> InferenceAdapterBuilder {
        InferenceAdapterBuilder::default()
    }

    /// The configured endpoint URL.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Request a risk assessment for one device.
    ///
    /// Never panics on remote misbehaviour; all failures come back as
    /// [`InferenceError`].
    pub async fn predict(&self, request: &InferenceRequest) -> Result<Prediction, InferenceError> {
        debug!(device = %request.device_id, endpoint = %self.endpoint, "requesting prediction");

        let result = self.send(request).await;
        if let Err(e) = &result {
            warn!(device = %request.device_id, error = %e, "inference failed");
        }
        result
    }

    async fn send(&self, request: &InferenceRequest) -> Result<Prediction, InferenceError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| InferenceError::Http(e.to_string()))?;

        let response = response
            .error_for_status()
            .map_err(|e| InferenceError::Http(e.to_string()))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| InferenceError::Http(e.to_string()))?;

        classify_body(&bytes)
    }
}

/// Builder for InferenceAdapter.
#[derive(Debug, Default)]
pub struct InferenceAdapterBuilder {
    endpoint: Option<String>,
    timeout: Option<Duration>,
}

impl InferenceAdapterBuilder {
    /// Set the endpoint URL requests are posted to.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set a request timeout. Without one the transport default applies.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the adapter.
    pub fn build(self) -> Result<InferenceAdapter, AdapterError> {
        let endpoint = self
            .endpoint
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| AdapterError::Config("inference endpoint is required".to_string()))?;

        let mut builder = Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(InferenceAdapter { client, endpoint })
    }
}
