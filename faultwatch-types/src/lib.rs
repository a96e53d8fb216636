//! # faultwatch-types
//!
//! Core value types for equipment telemetry. These are the shapes every
//! other faultwatch crate agrees on: a normalized [`TelemetryRecord`], its
//! [`DeviceStatus`], the bounded [`WindowMinutes`] selector, the
//! [`FaultBucket`] used for trend display, and the [`RiskLevel`] /
//! [`RiskBand`] pair used to present predictive-inference results.
//!
//! ## Design Goals
//!
//! - **Zero required dependencies**: types work without any serialization framework
//! - **Optional serialization**: enable the `serde` feature for JSON and friends
//! - **Values, not handles**: everything here is rebuilt every refresh cycle
//!
//! ## Features
//!
//! - `std` (default): Standard library support
//! - `serde`: serialization via serde
//!
//! ## Example
//!
//! ```rust
//! use faultwatch_types::{DeviceStatus, TelemetryRecord, WindowMinutes};
//!
//! let record = TelemetryRecord::new("press-04", 1_700_000_000, 71.5, 0.031, DeviceStatus::Fault);
//! assert!(record.is_fault());
//!
//! let window = WindowMinutes::new(60).unwrap();
//! assert_eq!(window.as_secs(), 3600);
//! assert!(WindowMinutes::new(300).is_err());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod record;
mod risk;
mod trend;
mod window;

pub use record::*;
pub use risk::*;
pub use trend::*;
pub use window::*;
