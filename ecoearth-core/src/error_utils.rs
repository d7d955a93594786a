use crate::error::*;
use tracing::{error, info, warn};

pub trait ErrorExt {
    fn log_error(&self) -> &Self;
    fn log_warn(&self) -> &Self;
    /// True when the backend answered and explicitly reported `success: false`.
    fn is_application_failure(&self) -> bool;
    fn user_friendly_message(&self) -> String;
    fn error_code(&self) -> String;
}

impl ErrorExt for CoreError {
    fn log_error(&self) -> &Self {
        error!("CoreError: {}", self);
        match self {
            CoreError::DashboardApi(e) => {
                error!("Dashboard API error details: {:?}", e);
            }
            CoreError::Config(e) => {
                error!("Configuration error details: {:?}", e);
            }
            _ => {}
        }
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("CoreError (warning): {}", self);
        self
    }

    fn is_application_failure(&self) -> bool {
        match self {
            CoreError::DashboardApi(e) => e.is_application_failure(),
            _ => false,
        }
    }

    fn user_friendly_message(&self) -> String {
        match self {
            CoreError::DashboardApi(e) => e.user_friendly_message(),
            CoreError::Config(e) => e.user_friendly_message(),
            CoreError::Network(_) => {
                "Network connection error. Please check that the dashboard server is reachable."
                    .to_string()
            }
            CoreError::Serialization(_) => {
                "The dashboard server sent data that could not be read.".to_string()
            }
            CoreError::Render { section, .. } => {
                format!("The {} section could not be displayed.", section)
            }
            CoreError::Notification { .. } => {
                "Desktop notifications are unavailable.".to_string()
            }
            _ => "An unexpected error occurred. Please try again later.".to_string(),
        }
    }

    fn error_code(&self) -> String {
        match self {
            CoreError::DashboardApi(_) => "DASHBOARD_API".to_string(),
            CoreError::Config(_) => "CONFIG".to_string(),
            CoreError::Io(_) => "IO".to_string(),
            CoreError::Serialization(_) => "SERIALIZATION".to_string(),
            CoreError::Network(_) => "NETWORK".to_string(),
            CoreError::Render { .. } => "RENDER".to_string(),
            CoreError::Notification { .. } => "NOTIFICATION".to_string(),
            CoreError::Gui { .. } => "GUI".to_string(),
            CoreError::Internal { .. } => "INTERNAL".to_string(),
        }
    }
}

impl ErrorExt for DashboardApiError {
    fn log_error(&self) -> &Self {
        error!("DashboardApiError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("DashboardApiError (warning): {}", self);
        self
    }

    fn is_application_failure(&self) -> bool {
        matches!(self, DashboardApiError::ApplicationFailure { .. })
    }

    fn user_friendly_message(&self) -> String {
        match self {
            DashboardApiError::ApplicationFailure { .. } => {
                "The dashboard server could not assemble its data.".to_string()
            }
            DashboardApiError::MissingData => {
                "The dashboard server returned an empty response.".to_string()
            }
            DashboardApiError::EndpointUnavailable { endpoint } => {
                format!("Dashboard endpoint {} is unavailable.", endpoint)
            }
            DashboardApiError::RequestTimeout => {
                "Request to the dashboard server timed out.".to_string()
            }
            DashboardApiError::ServerError { status_code } => {
                format!("The dashboard server failed with status {}.", status_code)
            }
            _ => "Dashboard API error occurred. Data will refresh automatically.".to_string(),
        }
    }

    fn error_code(&self) -> String {
        match self {
            DashboardApiError::ApplicationFailure { .. } => "API_APPLICATION_FAILURE".to_string(),
            DashboardApiError::MissingData => "API_MISSING_DATA".to_string(),
            DashboardApiError::EndpointUnavailable { .. } => {
                "API_ENDPOINT_UNAVAILABLE".to_string()
            }
            DashboardApiError::RequestTimeout => "API_TIMEOUT".to_string(),
            DashboardApiError::InvalidResponse { .. } => "API_INVALID_RESPONSE".to_string(),
            DashboardApiError::ServerError { .. } => "API_SERVER_ERROR".to_string(),
            DashboardApiError::UnexpectedStatus { .. } => "API_UNEXPECTED_STATUS".to_string(),
        }
    }
}

impl ErrorExt for ConfigError {
    fn log_error(&self) -> &Self {
        error!("ConfigError: {}", self);
        self
    }

    fn log_warn(&self) -> &Self {
        warn!("ConfigError (warning): {}", self);
        self
    }

    fn is_application_failure(&self) -> bool {
        false
    }

    fn user_friendly_message(&self) -> String {
        match self {
            ConfigError::FileNotFound { path } => {
                format!("Configuration file '{}' not found.", path)
            }
            ConfigError::InvalidValue { field, .. } => {
                format!("Invalid value for configuration field '{}'.", field)
            }
            ConfigError::InvalidUrl(_) => {
                "The configured dashboard base URL is not a valid URL.".to_string()
            }
            _ => "Configuration error occurred. Please check your settings.".to_string(),
        }
    }

    fn error_code(&self) -> String {
        match self {
            ConfigError::FileNotFound { .. } => "CONFIG_FILE_NOT_FOUND".to_string(),
            ConfigError::InvalidValue { .. } => "CONFIG_INVALID_VALUE".to_string(),
            ConfigError::ValidationFailed { .. } => "CONFIG_VALIDATION_FAILED".to_string(),
            ConfigError::InvalidUrl(_) => "CONFIG_INVALID_URL".to_string(),
            ConfigError::Parse(_) => "CONFIG_PARSE_ERROR".to_string(),
        }
    }
}

pub struct ErrorReporter {
    report_errors: bool,
    report_warnings: bool,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self {
            report_errors: true,
            report_warnings: true,
        }
    }

    pub fn with_error_reporting(mut self, enabled: bool) -> Self {
        self.report_errors = enabled;
        self
    }

    pub fn with_warning_reporting(mut self, enabled: bool) -> Self {
        self.report_warnings = enabled;
        self
    }

    pub fn report_error(&self, error: &CoreError) {
        if self.report_errors {
            error.log_error();
            info!("Error code: {}", error.error_code());
            info!("User message: {}", error.user_friendly_message());
        }
    }

    pub fn report_warning(&self, error: &CoreError) {
        if self.report_warnings {
            error.log_warn();
        }
    }
}

impl Default for ErrorReporter {
    fn default() -> Self {
        Self::new()
    }
}
