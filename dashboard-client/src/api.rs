use ecoearth_core::{
    ApiConfig, CoreError, DashboardApiError, DashboardEnvelope, SystemStatus,
};
use reqwest::{Client, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Instant;
use tracing::{debug, error, info, warn};
use url::Url;

#[derive(Debug, Clone)]
pub struct DashboardApiClient {
    http_client: Client,
    dashboard_url: Url,
    status_url: Url,
    user_agent: String,
}

impl DashboardApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, CoreError> {
        let dashboard_url = config.endpoint_url(&config.dashboard_path)?;
        let status_url = config.endpoint_url(&config.status_path)?;

        let mut builder = Client::builder().user_agent(&config.user_agent);
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let http_client = builder.build()?;

        debug!(
            "Dashboard client targeting {} and {}",
            dashboard_url, status_url
        );

        Ok(Self {
            http_client,
            dashboard_url,
            status_url,
            user_agent: config.user_agent.clone(),
        })
    }

    pub fn dashboard_url(&self) -> &Url {
        &self.dashboard_url
    }

    pub fn status_url(&self) -> &Url {
        &self.status_url
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    pub async fn make_request(&self, method: Method, url: &Url) -> Result<Response, CoreError> {
        let start_time = Instant::now();
        let endpoint = url.path().to_string();

        info!("Making dashboard API request: {} {}", method, endpoint);
        let response = match self.http_client.request(method.clone(), url.clone()).send().await {
            Ok(response) => response,
            Err(e) => {
                error!("Network error for {} {}: {}", method, endpoint, e);
                if e.is_timeout() {
                    return Err(DashboardApiError::RequestTimeout.into());
                }
                return Err(CoreError::Network(e));
            }
        };

        let status = response.status();
        if status.is_success() {
            debug!(
                "Request successful: {} {} in {:?}",
                status,
                endpoint,
                start_time.elapsed()
            );
            return Ok(response);
        }

        error!("Request failed with status: {} for {}", status, endpoint);
        Err(match status {
            StatusCode::NOT_FOUND | StatusCode::GONE | StatusCode::SERVICE_UNAVAILABLE => {
                DashboardApiError::EndpointUnavailable { endpoint }
            }
            s if s.is_server_error() => DashboardApiError::ServerError {
                status_code: s.as_u16(),
            },
            s => DashboardApiError::UnexpectedStatus {
                endpoint,
                status_code: s.as_u16(),
            },
        }
        .into())
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, CoreError> {
        let response = self.make_request(Method::GET, url).await?;
        let body = response.bytes().await?;

        serde_json::from_slice(&body).map_err(|e| {
            warn!("Failed to parse response from {}: {}", url.path(), e);
            DashboardApiError::InvalidResponse {
                details: format!("{}: {}", url.path(), e),
            }
            .into()
        })
    }

    pub async fn get_dashboard_data(&self) -> Result<DashboardEnvelope, CoreError> {
        let envelope: DashboardEnvelope = self.get_json(&self.dashboard_url).await?;
        debug!(
            "Dashboard envelope: success={}, data_source={:?}, reddit_connected={:?}, groq_connected={:?}",
            envelope.success, envelope.data_source, envelope.reddit_connected, envelope.groq_connected
        );
        Ok(envelope)
    }

    pub async fn get_system_status(&self) -> Result<SystemStatus, CoreError> {
        let status: SystemStatus = self.get_json(&self.status_url).await?;
        debug!(
            "System status: primary_source_ok={}, ai_service_ok={}",
            status.primary_source_ok, status.ai_service_ok
        );
        Ok(status)
    }
}
