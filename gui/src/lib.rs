mod sections;
mod style;

use background_service::{DashboardFrame, DashboardHandle, Notice};
use chrono::{DateTime, Local};
use ecoearth_core::CoreError;
use iced::widget::{button, column, container, row, scrollable, text, Space};
use iced::{Element, Length, Subscription, Theme};
use tokio::sync::watch;
use tracing::debug;

pub const TITLE: &str = "EcoEarth - Environmental Impact Dashboard";

#[derive(Debug, Clone)]
pub enum Message {
    FrameUpdated(Box<DashboardFrame>),
    RefreshRequested,
    DismissNotice,
}

pub struct App {
    frame: DashboardFrame,
    frames: watch::Receiver<DashboardFrame>,
    handle: DashboardHandle,
    dismissed_notice: Option<DateTime<Local>>,
}

impl App {
    pub fn new(frames: watch::Receiver<DashboardFrame>, handle: DashboardHandle) -> Self {
        let frame = frames.borrow().clone();
        Self {
            frame,
            frames,
            handle,
            dismissed_notice: None,
        }
    }

    pub fn frame(&self) -> &DashboardFrame {
        &self.frame
    }

    /// The latest notice unless the user already dismissed it.
    pub fn visible_notice(&self) -> Option<&Notice> {
        self.frame
            .notice
            .as_ref()
            .filter(|notice| Some(notice.raised_at) != self.dismissed_notice)
    }

    pub fn update(&mut self, message: Message) -> Result<(), CoreError> {
        match message {
            Message::FrameUpdated(frame) => {
                self.frame = *frame;
                Ok(())
            }
            Message::RefreshRequested => {
                debug!("Refresh button pressed");
                self.handle.refresh_now()
            }
            Message::DismissNotice => {
                self.dismissed_notice = self.frame.notice.as_ref().map(|n| n.raised_at);
                Ok(())
            }
        }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        frame_updates(self.frames.clone())
    }

    pub fn view(&self) -> Element<Message, Theme> {
        let tree = &self.frame.tree;

        let last_update = match self.frame.last_update {
            Some(at) => format!("Last update: {}", at.format("%H:%M:%S")),
            None => "Waiting for first update".to_string(),
        };

        let header: Element<Message, Theme> = row![
            text(TITLE).size(24),
            Space::with_width(Length::Fill),
            column![
                sections::status_badge(tree.api_status()),
                text(last_update).size(12),
            ]
            .spacing(4),
            button("Refresh").on_press(Message::RefreshRequested),
        ]
        .spacing(20)
        .into();

        let mut body = column![header].spacing(20);

        if let Some(notice) = self.visible_notice() {
            body = body.push(
                container(
                    row![
                        text(&notice.message).size(14),
                        Space::with_width(Length::Fill),
                        button("Dismiss").on_press(Message::DismissNotice),
                    ]
                    .spacing(10),
                )
                .padding(10)
                .style(iced::theme::Container::Box),
            );
        }

        let content = column![
            sections::overview(tree.overview()),
            row![
                sections::trending_topics(tree.trending_topics()),
                sections::influencers(tree.top_influencers()),
            ]
            .spacing(20),
            sections::ground_impact(tree.ground_impact()),
            sections::ai_analysis(tree.ai_analysis()),
            row![
                sections::platform_breakdown(tree.platform_breakdown()),
                sections::sample_posts(tree.sample_posts()),
            ]
            .spacing(20),
        ]
        .spacing(20);

        body = body.push(scrollable(content));

        container(body)
            .width(Length::Fill)
            .height(Length::Fill)
            .padding(20)
            .into()
    }
}

/// Forwards every frame published by the controller into the iced runtime.
pub fn frame_updates(frames: watch::Receiver<DashboardFrame>) -> Subscription<Message> {
    iced::subscription::unfold("dashboard-frames", frames, |mut frames| async move {
        if frames.changed().await.is_err() {
            debug!("Frame channel closed");
            std::future::pending::<()>().await;
        }
        let frame = frames.borrow_and_update().clone();
        (Message::FrameUpdated(Box::new(frame)), frames)
    })
}
