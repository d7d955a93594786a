use ecoearth_core::{CoreError, ErrorExt};
use notify_rust::Notification;
use tracing::debug;

const NOTIFICATION_SUMMARY: &str = "EcoEarth Dashboard";
const APP_NAME: &str = "ecoearth";

pub fn show_desktop_notification(message: &str) -> Result<(), CoreError> {
    Notification::new()
        .appname(APP_NAME)
        .summary(NOTIFICATION_SUMMARY)
        .body(message)
        .show()
        .map(|_| ())
        .map_err(|e| CoreError::Notification {
            message: e.to_string(),
        })
}

/// Fire-and-forget notification on the blocking pool. Failures are logged.
pub fn spawn_desktop_notification(message: &str) {
    let body = message.to_string();
    tokio::task::spawn_blocking(move || match show_desktop_notification(&body) {
        Ok(()) => debug!("Desktop notification shown"),
        Err(e) => {
            e.log_warn();
        }
    });
}
