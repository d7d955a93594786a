use background_service::{ControllerConfig, DashboardController, DashboardFrame, DashboardHandle};
use dashboard_client::DashboardApiClient;
use ecoearth_core::{AppConfig, ConfigError, CoreError, ErrorExt, DEFAULT_CONFIG_FILE};
use gui::App;
use iced::{Application, Settings};
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), CoreError> {
    let config = AppConfig::load_or_default(DEFAULT_CONFIG_FILE)?;

    let filter = EnvFilter::try_new(&config.logging.filter).map_err(|_| {
        ConfigError::InvalidValue {
            field: "logging.filter".to_string(),
            value: config.logging.filter.clone(),
        }
    })?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("Starting EcoEarth dashboard against {}", config.api.base_url);

    let runtime = tokio::runtime::Runtime::new()?;
    let client = DashboardApiClient::new(&config.api)?;
    let (controller, frames) =
        DashboardController::create(client, ControllerConfig::from_app_config(&config));

    let running = {
        let _guard = runtime.enter();
        controller.start()
    };

    let result = if config.gui.headless {
        runtime.block_on(run_headless(frames))
    } else {
        run_gui(&config, frames, running.handle())
    };

    if let Err(e) = runtime.block_on(running.dispose()) {
        e.log_warn();
    }

    result
}

fn run_gui(
    config: &AppConfig,
    frames: watch::Receiver<DashboardFrame>,
    handle: DashboardHandle,
) -> Result<(), CoreError> {
    let mut settings = Settings::with_flags(DashboardFlags { frames, handle });
    settings.window = iced::window::Settings {
        size: iced::Size::new(config.gui.window_width, config.gui.window_height),
        min_size: Some(iced::Size::new(800.0, 600.0)),
        ..Default::default()
    };

    EcoEarthApp::run(settings).map_err(|e| {
        tracing::error!("Application error: {}", e);
        CoreError::Gui {
            message: e.to_string(),
        }
    })
}

async fn run_headless(mut frames: watch::Receiver<DashboardFrame>) -> Result<(), CoreError> {
    tracing::info!("Running headless, press Ctrl+C to stop");

    loop {
        tokio::select! {
            changed = frames.changed() => {
                if changed.is_err() {
                    tracing::warn!("Dashboard controller stopped");
                    return Ok(());
                }
                let frame = frames.borrow_and_update().clone();
                log_frame(&frame);
            }
            signal = tokio::signal::ctrl_c() => {
                signal?;
                tracing::info!("Shutdown requested");
                return Ok(());
            }
        }
    }
}

fn log_frame(frame: &DashboardFrame) {
    let tree = &frame.tree;

    if let Some(overview) = tree.overview() {
        tracing::info!(
            posts = %overview.total_posts,
            news = %overview.total_news,
            effectiveness = %overview.effectiveness_score,
            source = %overview.data_source,
            "Overview"
        );
    }
    if let Some(topics) = tree.trending_topics() {
        let labels: Vec<&str> = topics.iter().map(|t| t.label.as_str()).collect();
        tracing::info!("Trending: {}", labels.join(", "));
    }
    if let Some(status) = tree.api_status() {
        tracing::info!(status = %status.label, "API status");
    }
    if let Some(notice) = &frame.notice {
        tracing::warn!(at = %notice.raised_at.format("%H:%M:%S"), "{}", notice.message);
    }

    tracing::debug!(
        polls_started = frame.stats.polls_started,
        snapshots_applied = frame.stats.snapshots_applied,
        failed_polls = frame.stats.failed_polls,
        "Poll statistics"
    );
}

struct DashboardFlags {
    frames: watch::Receiver<DashboardFrame>,
    handle: DashboardHandle,
}

struct EcoEarthApp {
    app: App,
}

impl Application for EcoEarthApp {
    type Message = gui::Message;
    type Theme = iced::Theme;
    type Executor = iced::executor::Default;
    type Flags = DashboardFlags;

    fn new(flags: Self::Flags) -> (Self, iced::Command<Self::Message>) {
        tracing::info!("Initializing application");
        (
            Self {
                app: App::new(flags.frames, flags.handle),
            },
            iced::Command::none(),
        )
    }

    fn title(&self) -> String {
        gui::TITLE.to_string()
    }

    fn update(&mut self, message: Self::Message) -> iced::Command<Self::Message> {
        if let Err(e) = self.app.update(message) {
            tracing::error!("Update error: {}", e);
        }
        iced::Command::none()
    }

    fn view(&self) -> iced::Element<Self::Message> {
        self.app.view()
    }

    fn subscription(&self) -> iced::Subscription<Self::Message> {
        self.app.subscription()
    }
}
