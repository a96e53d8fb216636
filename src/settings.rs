//! Startup settings.
//!
//! Settings are read once from a TOML secrets file, overlaid with
//! `FAULTWATCH__*` environment variables, and then passed by value to the
//! parts of the application that need them.
//!
//! ```toml
//! [store]
//! kind = "api"
//! endpoint = "https://store.example.com"
//! table = "FaultEventLog"
//! region = "eu-north-1"
//! access_key_id = "AKIDEXAMPLE"
//! secret_access_key = "..."
//!
//! [inference]
//! endpoint = "https://inference.example.com/predict"
//!
//! [dashboard]
//! window_minutes = 60
//! refresh_secs = 60
//! ```
//!
//! `FAULTWATCH__STORE__REGION=us-east-1` overrides `store.region`, and so on.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use thiserror::Error;

use faultwatch_types::WindowMinutes;

/// Errors loading or validating settings. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to load settings: {0}")]
    Load(#[from] ConfigError),

    #[error("Missing required setting '{0}'")]
    Missing(&'static str),

    #[error("Invalid setting '{key}': {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Where telemetry is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// A JSON export file.
    #[default]
    File,
    /// The remote scan API.
    Api,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StoreSettings {
    pub kind: StoreKind,
    /// Export file, for `kind = "file"`.
    pub path: Option<PathBuf>,
    pub endpoint: Option<String>,
    pub table: String,
    pub region: Option<String>,
    /// Maximum pages read per refresh.
    pub page_limit: usize,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            kind: StoreKind::default(),
            path: None,
            endpoint: None,
            table: "FaultEventLog".to_string(),
            region: None,
            page_limit: 10,
            access_key_id: None,
            secret_access_key: None,
        }
    }
}

/// Inference is disabled when no endpoint is set.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct InferenceSettings {
    pub endpoint: Option<String>,
    /// Request timeout. Unset means the HTTP client default.
    pub timeout_secs: Option<u64>,
}

impl InferenceSettings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    pub window_minutes: WindowMinutes,
    pub refresh_secs: u64,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            window_minutes: WindowMinutes::DEFAULT,
            refresh_secs: 60,
        }
    }
}

impl DashboardSettings {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs)
    }
}

/// All startup settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub store: StoreSettings,
    pub inference: InferenceSettings,
    pub dashboard: DashboardSettings,
}

impl Settings {
    /// Load settings from `path` (required when given) or from an optional
    /// `faultwatch.toml` in the working directory, then apply environment
    /// overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let builder = match path {
            Some(path) => Config::builder().add_source(File::from(path)),
            None => Config::builder().add_source(File::with_name("faultwatch").required(false)),
        };
        Self::build(builder, environment())
    }

    fn build(
        builder: ConfigBuilder<DefaultState>,
        env: Environment,
    ) -> Result<Self, SettingsError> {
        let config = builder.add_source(env).build()?;
        Ok(config.try_deserialize()?)
    }

    /// Check that the selected store has everything it needs.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let store = &self.store;
        match store.kind {
            StoreKind::File => {
                if store.path.is_none() {
                    return Err(SettingsError::Missing("store.path"));
                }
            }
            StoreKind::Api => {
                require(&store.endpoint, "store.endpoint")?;
                require(&store.region, "store.region")?;
                require(&store.access_key_id, "store.access_key_id")?;
                require(&store.secret_access_key, "store.secret_access_key")?;
                if store.table.trim().is_empty() {
                    return Err(SettingsError::Missing("store.table"));
                }
            }
        }

        if self.dashboard.refresh_secs == 0 {
            return Err(SettingsError::Invalid {
                key: "dashboard.refresh_secs",
                reason: "must be at least 1".to_string(),
            });
        }
        if let Some(endpoint) = &self.inference.endpoint {
            if endpoint.trim().is_empty() {
                return Err(SettingsError::Invalid {
                    key: "inference.endpoint",
                    reason: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }
}

fn environment() -> Environment {
    Environment::with_prefix("FAULTWATCH")
        .separator("__")
        .try_parsing(true)
}

fn require(value: &Option<String>, key: &'static str) -> Result<(), SettingsError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(SettingsError::Missing(key)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;
    use std::io::Write;

    fn parse(toml: &str) -> Result<Settings, SettingsError> {
        parse_with_env(toml, config::Map::new())
    }

    fn parse_with_env(
        toml: &str,
        env: config::Map<String, String>,
    ) -> Result<Settings, SettingsError> {
        let builder = Config::builder().add_source(File::from_str(toml, FileFormat::Toml));
        Settings::build(builder, environment().source(Some(env)))
    }

    const API_SETTINGS: &str = r#"
        [store]
        kind = "api"
        endpoint = "https://store.example.com"
        region = "eu-north-1"
        access_key_id = "AKIDEXAMPLE"
        secret_access_key = "secret"

        [inference]
        endpoint = "https://inference.example.com/predict"
        timeout_secs = 5

        [dashboard]
        window_minutes = 30
    "#;

    #[test]
    fn test_defaults() {
        let settings = parse("").unwrap();
        assert_eq!(settings.store.kind, StoreKind::File);
        assert_eq!(settings.store.table, "FaultEventLog");
        assert_eq!(settings.store.page_limit, 10);
        assert_eq!(settings.dashboard.window_minutes, WindowMinutes::DEFAULT);
        assert_eq!(settings.dashboard.refresh_interval(), Duration::from_secs(60));
        assert!(settings.inference.endpoint.is_none());
        assert!(settings.inference.timeout().is_none());
    }

    #[test]
    fn test_api_settings() {
        let settings = parse(API_SETTINGS).unwrap();
        settings.validate().unwrap();

        assert_eq!(settings.store.kind, StoreKind::Api);
        assert_eq!(settings.store.region.as_deref(), Some("eu-north-1"));
        assert_eq!(settings.inference.timeout(), Some(Duration::from_secs(5)));
        assert_eq!(settings.dashboard.window_minutes.minutes(), 30);
    }

    #[test]
    fn test_missing_credentials_are_fatal() {
        let settings = parse(
            r#"
            [store]
            kind = "api"
            endpoint = "https://store.example.com"
            region = "eu-north-1"
            access_key_id = "AKIDEXAMPLE"
            "#,
        )
        .unwrap();

        let err = settings.validate().unwrap_err();
        assert!(matches!(err, SettingsError::Missing("store.secret_access_key")));
    }

    #[test]
    fn test_file_store_requires_path() {
        let settings = parse("").unwrap();
        assert!(matches!(settings.validate(), Err(SettingsError::Missing("store.path"))));
    }

    #[test]
    fn test_window_out_of_range_rejected() {
        let err = parse("[dashboard]\nwindow_minutes = 300\n").unwrap_err();
        assert!(matches!(err, SettingsError::Load(_)));
    }

    #[test]
    fn test_zero_refresh_rejected() {
        let settings =
            parse("[store]\npath = \"events.json\"\n[dashboard]\nrefresh_secs = 0\n").unwrap();
        assert!(matches!(settings.validate(), Err(SettingsError::Invalid { .. })));
    }

    #[test]
    fn test_environment_overrides_file() {
        let mut env = config::Map::new();
        env.insert("FAULTWATCH__STORE__REGION".to_string(), "us-east-1".to_string());
        env.insert("FAULTWATCH__DASHBOARD__REFRESH_SECS".to_string(), "15".to_string());

        let settings = parse_with_env(API_SETTINGS, env).unwrap();
        assert_eq!(settings.store.region.as_deref(), Some("us-east-1"));
        assert_eq!(settings.dashboard.refresh_secs, 15);
    }

    #[test]
    fn test_load_from_path() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        write!(file, "[store]\npath = \"events.json\"\n").unwrap();

        let settings = Settings::load(Some(file.path())).unwrap();
        assert_eq!(settings.store.path, Some(PathBuf::from("events.json")));
    }

    #[test]
    fn test_load_missing_path_fails() {
        let err = Settings::load(Some(Path::new("/nonexistent/faultwatch.toml"))).unwrap_err();
        assert!(matches!(err, SettingsError::Load(_)));
    }
}
