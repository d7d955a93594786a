pub mod api;


pub use api::DashboardApiClient;

use ecoearth_core::{CoreError, DashboardEnvelope, SystemStatus};
use std::future::Future;

/// Where the controller gets its data from.
///
/// Implemented by [`DashboardApiClient`] for the real backend and by scripted
/// sources in tests.
pub trait DashboardSource: Send + Sync + 'static {
    fn fetch_dashboard(
        &self,
    ) -> impl Future<Output = Result<DashboardEnvelope, CoreError>> + Send;

    fn fetch_status(&self) -> impl Future<Output = Result<SystemStatus, CoreError>> + Send;
}

impl DashboardSource for DashboardApiClient {
    fn fetch_dashboard(
        &self,
    ) -> impl Future<Output = Result<DashboardEnvelope, CoreError>> + Send {
        self.get_dashboard_data()
    }

    fn fetch_status(&self) -> impl Future<Output = Result<SystemStatus, CoreError>> + Send {
        self.get_system_status()
    }
}
