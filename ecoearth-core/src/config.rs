use crate::error::{ConfigError, CoreError};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "ecoearth.toml";
pub const DEFAULT_LOG_FILTER: &str =
    "ecoearth=debug,gui=debug,background_service=debug,dashboard_client=info,dashboard_render=info";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub refresh: RefreshConfig,
    pub display: DisplayConfig,
    pub notifications: NotificationConfig,
    pub gui: GuiConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// May carry a path prefix, e.g. `https://host/app`.
    pub base_url: String,
    /// Endpoint paths resolve under the base URL's path, with or without a
    /// leading `/`.
    pub dashboard_path: String,
    pub status_path: String,
    pub user_agent: String,
    /// No timeout unless set; the transport default applies.
    pub request_timeout_secs: Option<u64>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            dashboard_path: "/api/dashboard-data".to_string(),
            status_path: "/api/system/status".to_string(),
            user_agent: concat!("ecoearth-dashboard/", env!("CARGO_PKG_VERSION")).to_string(),
            request_timeout_secs: None,
        }
    }
}

impl ApiConfig {
    pub fn base_url(&self) -> Result<Url, ConfigError> {
        Ok(Url::parse(&self.base_url)?)
    }

    /// Full URL of `path` below the base URL, keeping any base path prefix.
    pub fn endpoint_url(&self, path: &str) -> Result<Url, ConfigError> {
        let mut base = self.base_url()?;
        if !base.path().ends_with('/') {
            let prefixed = format!("{}/", base.path());
            base.set_path(&prefixed);
        }
        Ok(base.join(path.trim_start_matches('/'))?)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    pub interval_secs: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self { interval_secs: 30 }
    }
}

impl RefreshConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// chrono format string for post timestamps.
    pub time_format: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            time_format: "%H:%M".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    pub desktop: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GuiConfig {
    pub headless: bool,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for GuiConfig {
    fn default() -> Self {
        Self {
            headless: false,
            window_width: 1200.0,
            window_height: 800.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self, CoreError> {
        let config: AppConfig = toml::from_str(contents).map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let contents = std::fs::read_to_string(path)?;
        debug!("Loaded configuration from {}", path.display());
        Self::from_toml_str(&contents)
    }

    /// Loads `path` when it exists, otherwise falls back to the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            info!(
                "No configuration at {}, using built-in defaults",
                path.display()
            );
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = self.api.base_url()?;
        if base.cannot_be_a_base() {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".to_string(),
                value: self.api.base_url.clone(),
            });
        }

        for (field, value) in [
            ("api.dashboard_path", &self.api.dashboard_path),
            ("api.status_path", &self.api.status_path),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    value: value.clone(),
                });
            }
        }

        if self.refresh.interval_secs == 0 {
            return Err(ConfigError::ValidationFailed {
                reason: "refresh.interval_secs must be greater than zero".to_string(),
            });
        }

        if self.gui.window_width <= 0.0 || self.gui.window_height <= 0.0 {
            return Err(ConfigError::ValidationFailed {
                reason: "gui window size must be positive".to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.refresh.interval(), Duration::from_secs(30));
        assert_eq!(config.api.dashboard_path, "/api/dashboard-data");
        assert_eq!(config.api.status_path, "/api/system/status");
        assert!(config.api.request_timeout().is_none());
        assert!(!config.notifications.desktop);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [api]
            base_url = "http://dashboard.local:8080"

            [refresh]
            interval_secs = 10
            "#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "http://dashboard.local:8080");
        assert_eq!(config.api.status_path, "/api/system/status");
        assert_eq!(config.refresh.interval_secs, 10);
        assert_eq!(config.display.time_format, "%H:%M");
    }

    #[test]
    fn test_zero_interval_rejected() {
        let result = AppConfig::from_toml_str("[refresh]\ninterval_secs = 0\n");
        assert!(matches!(
            result,
            Err(CoreError::Config(ConfigError::ValidationFailed { .. }))
        ));
    }

    #[test]
    fn test_endpoint_url_keeps_base_path() {
        let mut api = ApiConfig::default();
        assert_eq!(
            api.endpoint_url(&api.dashboard_path).unwrap().as_str(),
            "http://127.0.0.1:5000/api/dashboard-data"
        );

        for base in ["https://eco.example.org/app", "https://eco.example.org/app/"] {
            api.base_url = base.to_string();
            assert_eq!(
                api.endpoint_url("/api/system/status").unwrap().as_str(),
                "https://eco.example.org/app/api/system/status"
            );
            assert_eq!(
                api.endpoint_url("api/system/status").unwrap().as_str(),
                "https://eco.example.org/app/api/system/status"
            );
        }
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let result = AppConfig::from_toml_str("[api]\nbase_url = \"not a url\"\n");
        assert!(matches!(
            result,
            Err(CoreError::Config(ConfigError::InvalidUrl(_)))
        ));
    }

    #[test]
    fn test_parse_error() {
        let result = AppConfig::from_toml_str("[refresh\ninterval_secs = 3");
        assert!(matches!(
            result,
            Err(CoreError::Config(ConfigError::Parse(_)))
        ));
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join("ecoearth-missing-config-for-test.toml");
        let result = AppConfig::load(&path);
        assert!(matches!(
            result,
            Err(CoreError::Config(ConfigError::FileNotFound { .. }))
        ));

        let fallback = AppConfig::load_or_default(&path).unwrap();
        assert_eq!(fallback.refresh.interval_secs, 30);
    }
}
