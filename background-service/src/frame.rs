use chrono::{DateTime, Local};
use dashboard_render::WidgetTree;
use ecoearth_core::DashboardSnapshot;
use std::sync::Arc;

/// User-facing error notice raised by a failed poll.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub message: String,
    pub raised_at: DateTime<Local>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollStats {
    pub polls_started: u64,
    pub snapshots_applied: u64,
    pub failed_polls: u64,
}

/// What the controller publishes after every state change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardFrame {
    /// Last successfully applied snapshot. Failed polls leave it in place.
    pub snapshot: Option<Arc<DashboardSnapshot>>,
    pub tree: WidgetTree,
    pub last_update: Option<DateTime<Local>>,
    pub notice: Option<Notice>,
    pub stats: PollStats,
}

impl DashboardFrame {
    pub fn has_snapshot(&self) -> bool {
        self.snapshot.is_some()
    }
}
