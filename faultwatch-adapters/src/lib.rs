//! # faultwatch-adapters
//!
//! Adapters for the remote services a faultwatch dashboard talks to.
//!
//! ## Supported Services
//!
//! - **Predictive inference** (`inference` feature) - posts the latest
//!   telemetry for a device and classifies the response into a
//!   [`inference::Prediction`] or an [`inference::InferenceError`]
//! - **Scan API** (`scan-api` feature) - reads a fault-event table one page
//!   at a time, following continuation keys
//!
//! ## Quick Start (inference)
//!
//! ```rust,no_run
//! use faultwatch_adapters::inference::{InferenceAdapter, InferenceRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let adapter = InferenceAdapter::builder()
//!         .endpoint("https://inference.example.com/")
//!         .build()?;
//!
//!     let request = InferenceRequest::new("press-04", 71.5, 0.031);
//!     match adapter.predict(&request).await {
//!         Ok(prediction) => println!("{} ({:?})", prediction.label, prediction.risk_score),
//!         Err(e) => eprintln!("{}", e),
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;

#[cfg(feature = "inference")]
pub mod inference;

#[cfg(feature = "scan-api")]
pub mod scan_api;

#[cfg(all(test, any(feature = "inference", feature = "scan-api")))]
mod test_server;

pub use error::AdapterError;

// Re-export types for convenience
pub use faultwatch_types::{RiskBand, RiskLevel};
