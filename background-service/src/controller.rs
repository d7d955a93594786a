use crate::frame::{DashboardFrame, Notice, PollStats};
use crate::notify;
use crate::timer::RefreshTimer;
use chrono::{DateTime, Local};
use dashboard_client::DashboardSource;
use dashboard_render::{render_snapshot, render_status, Fragment, RenderOptions, WidgetTree};
use ecoearth_core::{
    AppConfig, CoreError, DashboardEnvelope, DashboardSnapshot, ErrorExt, ErrorReporter,
    SystemStatus,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load dashboard data";
pub const NETWORK_ERROR_MESSAGE: &str = "Network error loading data";

#[derive(Debug, Clone)]
pub struct ControllerConfig {
    pub refresh_interval: Duration,
    pub render: RenderOptions,
    pub desktop_notifications: bool,
}

impl ControllerConfig {
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            refresh_interval: config.refresh.interval(),
            render: RenderOptions {
                time_format: config.display.time_format.clone(),
            },
            desktop_notifications: config.notifications.desktop,
        }
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_secs(30),
            render: RenderOptions::default(),
            desktop_notifications: false,
        }
    }
}

#[derive(Debug)]
pub(crate) enum ControllerEvent {
    Tick,
    SnapshotFetched(Result<DashboardEnvelope, CoreError>),
    StatusFetched(Result<SystemStatus, CoreError>),
}

#[derive(Debug)]
enum Command {
    RefreshNow,
}

/// Owns all dashboard state. Runs as a single task once started, so snapshot
/// replacement and rendering are never concurrent.
///
/// Fetches run as separate tasks and report back through a channel. Responses
/// are applied in arrival order: when two fetches overlap, whichever answers
/// last determines what is shown.
pub struct DashboardController<S: DashboardSource> {
    source: Arc<S>,
    config: ControllerConfig,
    snapshot: Option<Arc<DashboardSnapshot>>,
    last_update: Option<DateTime<Local>>,
    tree: WidgetTree,
    notice: Option<Notice>,
    stats: PollStats,
    frames: watch::Sender<DashboardFrame>,
    events: mpsc::UnboundedSender<ControllerEvent>,
    events_rx: Option<mpsc::UnboundedReceiver<ControllerEvent>>,
    reporter: ErrorReporter,
}

impl<S: DashboardSource> DashboardController<S> {
    /// Builds the controller without touching the network.
    pub fn create(source: S, config: ControllerConfig) -> (Self, watch::Receiver<DashboardFrame>) {
        let (frames, frames_rx) = watch::channel(DashboardFrame::default());
        let (events, events_rx) = mpsc::unbounded_channel();

        let controller = Self {
            source: Arc::new(source),
            config,
            snapshot: None,
            last_update: None,
            tree: WidgetTree::new(),
            notice: None,
            stats: PollStats::default(),
            frames,
            events,
            events_rx: Some(events_rx),
            reporter: ErrorReporter::new(),
        };

        (controller, frames_rx)
    }

    /// Spawns the controller task: one awaited fetch, then the refresh timer,
    /// then a one-shot status check.
    pub fn start(mut self) -> RunningDashboard {
        let (commands, commands_rx) = mpsc::unbounded_channel();
        let (shutdown, shutdown_rx) = oneshot::channel();
        let events_rx = self.events_rx.take();

        let task = tokio::spawn(async move {
            match events_rx {
                Some(events_rx) => self.run(events_rx, commands_rx, shutdown_rx).await,
                None => error!("Dashboard controller started without an event channel"),
            }
        });

        RunningDashboard {
            handle: DashboardHandle { commands },
            shutdown,
            task,
        }
    }

    async fn run(
        mut self,
        mut events_rx: mpsc::UnboundedReceiver<ControllerEvent>,
        mut commands: mpsc::UnboundedReceiver<Command>,
        mut shutdown: oneshot::Receiver<()>,
    ) {
        info!(
            "Dashboard controller starting, refresh every {:?}",
            self.config.refresh_interval
        );

        self.stats.polls_started += 1;
        let initial = tokio::select! {
            result = self.source.fetch_dashboard() => result,
            _ = &mut shutdown => {
                info!("Dashboard controller stopped before the first load");
                return;
            }
        };
        self.apply_snapshot_result(initial);

        let tick_events = self.events.clone();
        let timer = RefreshTimer::spawn(self.config.refresh_interval, move || {
            tick_events.send(ControllerEvent::Tick).is_ok()
        });

        self.spawn_status_fetch();

        loop {
            // A dropped `RunningDashboard` also counts as shutdown.
            tokio::select! {
                _ = &mut shutdown => break,
                Some(event) = events_rx.recv() => self.handle_event(event),
                Some(Command::RefreshNow) = commands.recv() => {
                    debug!("Manual refresh requested");
                    self.spawn_snapshot_fetch();
                }
            }
        }

        timer.cancel();
        info!("Dashboard controller stopped");
    }

    fn handle_event(&mut self, event: ControllerEvent) {
        match event {
            ControllerEvent::Tick => self.spawn_snapshot_fetch(),
            ControllerEvent::SnapshotFetched(result) => self.apply_snapshot_result(result),
            ControllerEvent::StatusFetched(result) => self.apply_status_result(result),
        }
    }

    fn spawn_snapshot_fetch(&mut self) {
        self.stats.polls_started += 1;
        let source = Arc::clone(&self.source);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = source.fetch_dashboard().await;
            // The controller may have stopped while the request was in flight.
            let _ = events.send(ControllerEvent::SnapshotFetched(result));
        });
        self.publish();
    }

    fn spawn_status_fetch(&self) {
        let source = Arc::clone(&self.source);
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = source.fetch_status().await;
            let _ = events.send(ControllerEvent::StatusFetched(result));
        });
    }

    fn apply_snapshot_result(&mut self, result: Result<DashboardEnvelope, CoreError>) {
        let outcome = result.and_then(|envelope| envelope.into_snapshot().map_err(CoreError::from));

        match outcome {
            Ok(snapshot) => {
                self.stats.snapshots_applied += 1;
                self.last_update = Some(Local::now());
                self.notice = None;
                self.render(&snapshot);
                self.snapshot = Some(Arc::new(snapshot));
            }
            Err(e) if e.is_application_failure() => {
                self.stats.failed_polls += 1;
                error!("Failed to load data: {}", e);
                self.show_error(LOAD_FAILED_MESSAGE);
            }
            Err(e) => {
                self.stats.failed_polls += 1;
                error!("Error loading data: {}", e);
                self.reporter.report_error(&e);
                self.show_error(NETWORK_ERROR_MESSAGE);
            }
        }

        self.publish();
    }

    fn apply_status_result(&mut self, result: Result<SystemStatus, CoreError>) {
        match result {
            Ok(status) => {
                self.tree.mount(Fragment::ApiStatus(render_status(&status)));
                self.publish();
            }
            Err(e) => error!("Error checking API status: {}", e),
        }
    }

    fn render(&mut self, snapshot: &DashboardSnapshot) {
        for rendered in render_snapshot(snapshot, &self.config.render) {
            match rendered {
                Ok(fragment) => self.tree.mount(fragment),
                Err(e) => self.reporter.report_warning(&e),
            }
        }
    }

    fn show_error(&mut self, message: &str) {
        error!("Dashboard Error: {}", message);
        self.notice = Some(Notice {
            message: message.to_string(),
            raised_at: Local::now(),
        });
        if self.config.desktop_notifications {
            notify::spawn_desktop_notification(message);
        }
    }

    fn publish(&self) {
        self.frames.send_replace(DashboardFrame {
            snapshot: self.snapshot.clone(),
            tree: self.tree.clone(),
            last_update: self.last_update,
            notice: self.notice.clone(),
            stats: self.stats,
        });
    }
}

/// Cheap, cloneable way to poke a running controller.
#[derive(Debug, Clone)]
pub struct DashboardHandle {
    commands: mpsc::UnboundedSender<Command>,
}

impl DashboardHandle {
    /// Starts a fetch right away without disturbing the refresh cadence.
    pub fn refresh_now(&self) -> Result<(), CoreError> {
        self.commands
            .send(Command::RefreshNow)
            .map_err(|_| CoreError::Internal {
                message: "dashboard controller is not running".to_string(),
            })
    }
}

pub struct RunningDashboard {
    handle: DashboardHandle,
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl RunningDashboard {
    pub fn handle(&self) -> DashboardHandle {
        self.handle.clone()
    }

    /// Stops the refresh timer and the controller task. Responses still in
    /// flight are discarded.
    pub async fn dispose(self) -> Result<(), CoreError> {
        // A send error means the task already ended.
        let _ = self.shutdown.send(());
        self.task.await.map_err(|e| CoreError::Internal {
            message: format!("dashboard controller task failed: {}", e),
        })
    }
}
