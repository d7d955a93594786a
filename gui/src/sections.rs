use crate::style::{tone_color, MUTED};
use crate::Message;
use dashboard_render::{
    AiAnalysisView, GroundImpactView, InfluencerCard, OverviewView, PlatformRow, PostCard,
    StatusBadge, TopicView,
};
use iced::widget::{column, container, progress_bar, row, text, Column, Row, Space};
use iced::{theme, Element, Length, Theme};

fn card<'a>(title: &str, body: Element<'a, Message, Theme>) -> Element<'a, Message, Theme> {
    container(column![text(title).size(18), body].spacing(10))
        .width(Length::Fill)
        .padding(15)
        .style(theme::Container::Box)
        .into()
}

fn loading<'a>() -> Element<'a, Message, Theme> {
    text("Loading...").size(14).style(MUTED).into()
}

fn stat<'a>(value: &str, label: &str) -> Element<'a, Message, Theme> {
    column![text(value).size(24), text(label).size(12).style(MUTED)]
        .spacing(4)
        .width(Length::Fill)
        .into()
}

pub fn status_badge<'a>(badge: Option<&StatusBadge>) -> Element<'a, Message, Theme> {
    match badge {
        Some(badge) => text(&badge.label)
            .size(14)
            .style(tone_color(badge.tone))
            .into(),
        None => text("Checking API status...").size(14).style(MUTED).into(),
    }
}

pub fn overview<'a>(view: Option<&OverviewView>) -> Element<'a, Message, Theme> {
    let Some(view) = view else {
        return card("Overview", loading());
    };

    let stats = row![
        stat(&view.total_posts, "Posts Analyzed"),
        stat(&view.total_news, "News Articles"),
        stat(&view.effectiveness_score, "Effectiveness Score"),
        stat(&view.positive_sentiment, "Positive Sentiment"),
    ]
    .spacing(20);

    let footer = row![
        text(&view.last_updated).size(12).style(MUTED),
        Space::with_width(Length::Fill),
        text(&view.data_source).size(12).style(MUTED),
    ];

    card("Overview", column![stats, footer].spacing(10).into())
}

pub fn trending_topics<'a>(topics: Option<&[TopicView]>) -> Element<'a, Message, Theme> {
    let Some(topics) = topics else {
        return card("Trending Topics", loading());
    };

    let mut list = Column::new().spacing(6);
    for topic in topics {
        list = list.push(
            row![
                text(&topic.label).size(14),
                Space::with_width(Length::Fill),
                text(topic.badge()).size(12).style(MUTED),
            ]
            .spacing(10),
        );
    }
    card("Trending Topics", list.into())
}

pub fn influencers<'a>(cards: Option<&[InfluencerCard]>) -> Element<'a, Message, Theme> {
    let Some(cards) = cards else {
        return card("Top Influencers", loading());
    };

    let mut list = Column::new().spacing(8);
    for influencer in cards {
        list = list.push(
            column![
                text(&influencer.username).size(15),
                row![
                    text(&influencer.posts).size(12),
                    text(&influencer.impact).size(12),
                    text(&influencer.engagement).size(12),
                ]
                .spacing(12),
            ]
            .spacing(2),
        );
    }
    card("Top Influencers", list.into())
}

pub fn ground_impact<'a>(view: Option<&GroundImpactView>) -> Element<'a, Message, Theme> {
    let Some(view) = view else {
        return card("Ground Impact", loading());
    };

    let mut cells = Row::new().spacing(20);
    for cell in &view.cells {
        cells = cells.push(
            column![
                text(&cell.value).size(22).style(tone_color(cell.tone)),
                text(cell.label).size(12).style(MUTED),
            ]
            .spacing(4)
            .width(Length::Fill),
        );
    }
    card("Ground Impact", cells.into())
}

pub fn ai_analysis<'a>(view: Option<&AiAnalysisView>) -> Element<'a, Message, Theme> {
    let Some(view) = view else {
        return card("AI Analysis", loading());
    };

    let mut body = Column::new()
        .spacing(10)
        .push(text(&view.summary).size(14))
        .push(
            row![
                text(&view.positive).size(13).style(tone_color(dashboard_render::Tone::Success)),
                text(&view.negative).size(13).style(tone_color(dashboard_render::Tone::Danger)),
                text(&view.neutral).size(13).style(MUTED),
            ]
            .spacing(16),
        );

    if let Some(recommendations) = &view.recommendations {
        let mut list = Column::new().spacing(4).push(text("Recommendations").size(14));
        for recommendation in recommendations {
            list = list.push(text(format!("- {}", recommendation)).size(13));
        }
        body = body.push(list);
    }

    card("AI Analysis", body.into())
}

pub fn platform_breakdown<'a>(rows: Option<&[PlatformRow]>) -> Element<'a, Message, Theme> {
    let Some(rows) = rows else {
        return card("Platform Breakdown", loading());
    };

    let mut list = Column::new().spacing(10);
    for platform in rows {
        list = list.push(
            column![
                row![
                    text(&platform.display_name).size(14),
                    Space::with_width(Length::Fill),
                    text(&platform.posts).size(12),
                ],
                progress_bar(0.0..=100.0, platform.fill_percent as f32).height(8.0),
                text(&platform.avg_engagement).size(12).style(MUTED),
            ]
            .spacing(4),
        );
    }
    card("Platform Breakdown", list.into())
}

pub fn sample_posts<'a>(posts: Option<&[PostCard]>) -> Element<'a, Message, Theme> {
    let Some(posts) = posts else {
        return card("Sample Posts", loading());
    };

    let mut list = Column::new().spacing(12);
    for post in posts {
        list = list.push(
            column![
                row![
                    text(&post.subreddit).size(12).style(MUTED),
                    Space::with_width(Length::Fill),
                    text(&post.time).size(12).style(MUTED),
                ],
                text(&post.heading).size(14),
                row![
                    text(&post.author).size(12),
                    text(format!("{} upvotes", post.upvotes)).size(12),
                    text(format!("{} comments", post.comments)).size(12),
                ]
                .spacing(12),
            ]
            .spacing(4),
        );
    }
    card("Sample Posts", list.into())
}
