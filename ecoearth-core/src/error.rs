use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Dashboard API error: {0}")]
    DashboardApi(#[from] DashboardApiError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to render {section}: {reason}")]
    Render { section: String, reason: String },

    #[error("Notification failed: {message}")]
    Notification { message: String },

    #[error("GUI error: {message}")]
    Gui { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

#[derive(Error, Debug, Clone)]
pub enum DashboardApiError {
    #[error("Backend reported failure: {}", .reason.as_deref().unwrap_or("no reason given"))]
    ApplicationFailure { reason: Option<String> },

    #[error("Response reported success without data")]
    MissingData,

    #[error("API endpoint unavailable: {endpoint}")]
    EndpointUnavailable { endpoint: String },

    #[error("Request timeout")]
    RequestTimeout,

    #[error("Invalid API response: {details}")]
    InvalidResponse { details: String },

    #[error("Server error: {status_code}")]
    ServerError { status_code: u16 },

    #[error("Unexpected status {status_code} from {endpoint}")]
    UnexpectedStatus { endpoint: String, status_code: u16 },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("Configuration validation failed: {reason}")]
    ValidationFailed { reason: String },

    #[error("Invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Configuration parsing error: {0}")]
    Parse(#[from] toml::de::Error),
}
