//! Risk classifications returned by predictive inference.

use alloc::string::{String, ToString};
use core::fmt;

/// The prediction label returned by the inference service.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "String", into = "String"))]
pub enum RiskLevel {
    High,
    Low,
    Other(String),
}

impl RiskLevel {
    /// Parse a prediction label such as `"High Risk"`.
    pub fn parse(label: &str) -> Self {
        match label {
            "High Risk" => RiskLevel::High,
            "Low Risk" => RiskLevel::Low,
            other => RiskLevel::Other(other.to_string()),
        }
    }

    /// The label as returned by the service.
    pub fn as_str(&self) -> &str {
        match self {
            RiskLevel::High => "High Risk",
            RiskLevel::Low => "Low Risk",
            RiskLevel::Other(label) => label,
        }
    }

    /// Whether the banner for this prediction should be shown as an alert.
    pub fn is_alert(&self) -> bool {
        matches!(self, RiskLevel::High)
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for RiskLevel {
    fn from(label: String) -> Self {
        RiskLevel::parse(&label)
    }
}

impl From<RiskLevel> for String {
    fn from(level: RiskLevel) -> Self {
        match level {
            RiskLevel::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

/// Gauge band for a risk score on the 0–100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RiskBand {
    Low,
    Medium,
    High,
}

impl RiskBand {
    /// Upper bound (exclusive) of the low band.
    pub const LOW_CEILING: f64 = 30.0;
    /// Upper bound (exclusive) of the medium band.
    pub const MEDIUM_CEILING: f64 = 70.0;

    /// Band for a risk score. Scores outside 0–100 land in the nearest band.
    pub fn from_score(score: f64) -> Self {
        if score < Self::LOW_CEILING {
            RiskBand::Low
        } else if score < Self::MEDIUM_CEILING {
            RiskBand::Medium
        } else {
            RiskBand::High
        }
    }

    /// Short label for display.
    pub fn label(&self) -> &'static str {
        match self {
            RiskBand::Low => "LOW",
            RiskBand::Medium => "MEDIUM",
            RiskBand::High => "HIGH",
        }
    }
}
