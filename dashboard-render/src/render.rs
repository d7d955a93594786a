use crate::format::{
    capitalize_words, format_number, format_post_time, group_thousands,
    topic_tag, truncate_chars,
};
use crate::mount::{Fragment, MountPoint};
use crate::view::*;
use ecoearth_core::{
    AiAnalysis, CoreError, DashboardSnapshot, GroundImpact, Influencer, Overview, PlatformStats,
    SamplePost, Section, SystemStatus,
};
use std::collections::BTreeMap;
use tracing::debug;

pub const SUBREDDIT_PLACEHOLDER: &str = "r/environment";
const POST_PREVIEW_CHARS: usize = 100;

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub time_format: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            time_format: "%H:%M".to_string(),
        }
    }
}

pub fn render_overview(overview: &Overview) -> OverviewView {
    OverviewView {
        total_posts: group_thousands(overview.total_posts),
        total_news: group_thousands(overview.total_news),
        effectiveness_score: format!("{}%", format_number(overview.effectiveness_score)),
        positive_sentiment: format!("{}%", format_number(overview.positive_sentiment)),
        last_updated: format!("Updated: {}", overview.last_updated),
        data_source: overview.data_source.to_uppercase(),
    }
}

pub fn render_trending_topics(topics: &[String]) -> Vec<TopicView> {
    topics
        .iter()
        .map(|topic| TopicView {
            label: topic.clone(),
            tag: topic_tag(topic),
        })
        .collect()
}

pub fn render_influencers(influencers: &[Influencer]) -> Vec<InfluencerCard> {
    influencers
        .iter()
        .map(|influencer| InfluencerCard {
            username: influencer.username.clone(),
            posts: format!("{} posts", influencer.posts_count),
            impact: format!("{}% impact", format_number(influencer.impact_score)),
            engagement: format!("{} engagement", group_thousands(influencer.total_engagement)),
        })
        .collect()
}

pub fn render_ground_impact(impact: &GroundImpact) -> GroundImpactView {
    GroundImpactView {
        cells: [
            ImpactCell {
                value: impact.cleanups_triggered.to_string(),
                label: "Cleanups",
                tone: Tone::Success,
            },
            ImpactCell {
                value: format!("{}kg", format_number(impact.plastic_reduced_kg)),
                label: "Plastic Reduced",
                tone: Tone::Info,
            },
            ImpactCell {
                value: impact.trees_planted.to_string(),
                label: "Trees Planted",
                tone: Tone::Warning,
            },
            ImpactCell {
                value: impact.people_engaged.to_string(),
                label: "People Engaged",
                tone: Tone::Primary,
            },
        ],
    }
}

pub fn render_ai_analysis(analysis: &AiAnalysis) -> AiAnalysisView {
    let sentiment = &analysis.sentiment_breakdown;
    AiAnalysisView {
        summary: analysis.summary.clone(),
        positive: format!("{}% Positive", format_number(sentiment.positive)),
        negative: format!("{}% Negative", format_number(sentiment.negative)),
        neutral: format!("{}% Neutral", format_number(sentiment.neutral)),
        recommendations: analysis
            .recommendations
            .as_ref()
            .filter(|recommendations| !recommendations.is_empty())
            .cloned(),
    }
}

/// Progress fill for a platform, `min(100, avg_engagement / 10)`.
pub fn engagement_fill_percent(avg_engagement: f64) -> f64 {
    (avg_engagement / 10.0).min(100.0)
}

pub fn render_platform_breakdown(breakdown: &BTreeMap<String, PlatformStats>) -> Vec<PlatformRow> {
    breakdown
        .iter()
        .map(|(platform, stats)| PlatformRow {
            platform: platform.clone(),
            display_name: capitalize_words(platform),
            posts: format!("{} posts", stats.count),
            fill_percent: engagement_fill_percent(stats.avg_engagement),
            avg_engagement: format!(
                "{} avg engagement per post",
                format_number(stats.avg_engagement)
            ),
        })
        .collect()
}

/// Title when present, otherwise the start of the body text. The trailing
/// `...` is always appended, even when nothing was cut.
pub fn post_heading(post: &SamplePost) -> String {
    let base = match post.title.as_deref() {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => post
            .text
            .as_deref()
            .map(|text| truncate_chars(text, POST_PREVIEW_CHARS))
            .unwrap_or_default(),
    };
    format!("{}...", base)
}

pub fn render_sample_posts(posts: &[SamplePost], options: &RenderOptions) -> Vec<PostCard> {
    posts
        .iter()
        .map(|post| PostCard {
            subreddit: post
                .subreddit
                .as_deref()
                .filter(|subreddit| !subreddit.is_empty())
                .unwrap_or(SUBREDDIT_PLACEHOLDER)
                .to_string(),
            time: format_post_time(post.timestamp.as_ref(), &options.time_format),
            heading: post_heading(post),
            author: format!("by {}", post.author),
            upvotes: post.upvotes.to_string(),
            comments: post.comments.to_string(),
        })
        .collect()
}

pub fn render_status(status: &SystemStatus) -> StatusBadge {
    let indicator = StatusIndicator::from_flags(status.primary_source_ok, status.ai_service_ok);
    StatusBadge {
        indicator,
        label: indicator.label().to_string(),
        tone: indicator.tone(),
    }
}

fn render_section<T>(
    section: &Section<T>,
    point: MountPoint,
    render: impl FnOnce(&T) -> Fragment,
) -> Result<Fragment, CoreError> {
    match section {
        Section::Ready(value) => Ok(render(value)),
        Section::Malformed(reason) => Err(CoreError::Render {
            section: point.id().to_string(),
            reason: reason.clone(),
        }),
    }
}

/// Renders all seven snapshot sections in display order. Each entry fails or
/// succeeds on its own.
pub fn render_snapshot(
    snapshot: &DashboardSnapshot,
    options: &RenderOptions,
) -> Vec<Result<Fragment, CoreError>> {
    let rendered = vec![
        render_section(&snapshot.overview, MountPoint::Overview, |overview| {
            Fragment::Overview(render_overview(overview))
        }),
        render_section(
            &snapshot.trending_topics,
            MountPoint::TrendingTopics,
            |topics| Fragment::TrendingTopics(render_trending_topics(topics)),
        ),
        render_section(
            &snapshot.top_influencers,
            MountPoint::TopInfluencers,
            |influencers| Fragment::TopInfluencers(render_influencers(influencers)),
        ),
        render_section(&snapshot.ground_impact, MountPoint::GroundImpact, |impact| {
            Fragment::GroundImpact(render_ground_impact(impact))
        }),
        render_section(&snapshot.ai_analysis, MountPoint::AiAnalysis, |analysis| {
            Fragment::AiAnalysis(render_ai_analysis(analysis))
        }),
        render_section(
            &snapshot.platform_breakdown,
            MountPoint::PlatformBreakdown,
            |breakdown| Fragment::PlatformBreakdown(render_platform_breakdown(breakdown)),
        ),
        render_section(&snapshot.sample_posts, MountPoint::SamplePosts, |posts| {
            Fragment::SamplePosts(render_sample_posts(posts, options))
        }),
    ];

    debug!(
        "Rendered snapshot: {}/{} sections ok",
        rendered.iter().filter(|r| r.is_ok()).count(),
        rendered.len()
    );
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecoearth_core::{PostTimestamp, SentimentBreakdown};
    use serde_json::json;

    fn post(title: Option<&str>, text: Option<&str>, subreddit: Option<&str>) -> SamplePost {
        SamplePost {
            id: None,
            subreddit: subreddit.map(str::to_string),
            timestamp: Some(PostTimestamp::Text("2024-05-01T08:15:00".to_string())),
            title: title.map(str::to_string),
            text: text.map(str::to_string),
            author: "u/coastal_cleaner".to_string(),
            upvotes: 1247,
            comments: 89,
        }
    }

    fn analysis(recommendations: Option<Vec<String>>) -> AiAnalysis {
        AiAnalysis {
            summary: "Reddit communities are <b>engaged</b>.".to_string(),
            sentiment_breakdown: SentimentBreakdown {
                positive: 68.0,
                negative: 15.0,
                neutral: 17.0,
            },
            recommendations,
            dominant_topic: None,
            engagement_trend: None,
            ai_generated: Some(false),
        }
    }

    #[test]
    fn test_render_overview() {
        let view = render_overview(&Overview {
            total_posts: 1247,
            total_news: 63,
            effectiveness_score: 82.0,
            positive_sentiment: 68.5,
            last_updated: "14:05:09".to_string(),
            data_source: "reddit".to_string(),
        });

        assert_eq!(view.total_posts, "1,247");
        assert_eq!(view.total_news, "63");
        assert_eq!(view.effectiveness_score, "82%");
        assert_eq!(view.positive_sentiment, "68.5%");
        assert_eq!(view.last_updated, "Updated: 14:05:09");
        assert_eq!(view.data_source, "REDDIT");
    }

    #[test]
    fn test_render_trending_topics() {
        let topics = render_trending_topics(&["Ocean Clean Up".to_string()]);
        assert_eq!(topics[0].label, "Ocean Clean Up");
        assert_eq!(topics[0].tag, "oceanclean up");
        assert_eq!(topics[0].badge(), "r/oceanclean up");
    }

    #[test]
    fn test_render_influencers() {
        let cards = render_influencers(&[Influencer {
            username: "u/climate_scientist".to_string(),
            posts_count: 22,
            impact_score: 96.0,
            total_engagement: 15200,
            average_engagement: Some(691.0),
        }]);

        assert_eq!(cards[0].posts, "22 posts");
        assert_eq!(cards[0].impact, "96% impact");
        assert_eq!(cards[0].engagement, "15,200 engagement");
    }

    #[test]
    fn test_ground_impact_order() {
        let view = render_ground_impact(&GroundImpact {
            cleanups_triggered: 28,
            plastic_reduced_kg: 520.0,
            trees_planted: 89,
            people_engaged: 1850,
            policy_discussions: Some(18),
            carbon_offset_tons: None,
        });

        let labels: Vec<_> = view.cells.iter().map(|c| c.label).collect();
        assert_eq!(
            labels,
            vec!["Cleanups", "Plastic Reduced", "Trees Planted", "People Engaged"]
        );
        let values: Vec<_> = view.cells.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(values, vec!["28", "520kg", "89", "1850"]);
    }

    #[test]
    fn test_ai_analysis_summary_verbatim() {
        let view = render_ai_analysis(&analysis(Some(vec!["Plant trees".to_string()])));
        assert_eq!(view.summary, "Reddit communities are <b>engaged</b>.");
        assert_eq!(view.positive, "68% Positive");
        assert_eq!(view.negative, "15% Negative");
        assert_eq!(view.neutral, "17% Neutral");
        assert_eq!(view.recommendations, Some(vec!["Plant trees".to_string()]));
    }

    #[test]
    fn test_recommendations_absent_or_empty_not_rendered() {
        assert_eq!(render_ai_analysis(&analysis(None)).recommendations, None);
        assert_eq!(
            render_ai_analysis(&analysis(Some(Vec::new()))).recommendations,
            None
        );
    }

    #[test]
    fn test_platform_fill_is_clamped() {
        assert_eq!(engagement_fill_percent(72.0), 7.2);
        assert_eq!(engagement_fill_percent(999.0), 99.9);
        assert_eq!(engagement_fill_percent(1000.0), 100.0);
        assert_eq!(engagement_fill_percent(1500.0), 100.0);
        assert_eq!(engagement_fill_percent(250_000.0), 100.0);
    }

    #[test]
    fn test_platform_rows_in_key_order() {
        let mut breakdown = BTreeMap::new();
        breakdown.insert(
            "twitter".to_string(),
            PlatformStats {
                count: 4,
                avg_engagement: 2400.0,
                total_engagement: None,
            },
        );
        breakdown.insert(
            "reddit".to_string(),
            PlatformStats {
                count: 1247,
                avg_engagement: 72.0,
                total_engagement: Some(89200),
            },
        );

        let rows = render_platform_breakdown(&breakdown);
        assert_eq!(rows[0].platform, "reddit");
        assert_eq!(rows[0].display_name, "Reddit");
        assert_eq!(rows[0].posts, "1247 posts");
        assert_eq!(rows[0].avg_engagement, "72 avg engagement per post");
        assert_eq!(rows[1].platform, "twitter");
        assert_eq!(rows[1].fill_percent, 100.0);
    }

    #[test]
    fn test_post_heading_always_appends_ellipsis() {
        let text = "a".repeat(40);
        let heading = post_heading(&post(None, Some(&text), None));
        assert_eq!(heading, format!("{}...", text));
        assert_eq!(heading.chars().count(), 43);

        let long = "b".repeat(150);
        let heading = post_heading(&post(None, Some(&long), None));
        assert_eq!(heading, format!("{}...", "b".repeat(100)));

        let heading = post_heading(&post(Some("Beach cleanup!"), Some(&long), None));
        assert_eq!(heading, "Beach cleanup!...");
    }

    #[test]
    fn test_post_heading_empty_title_uses_text() {
        let heading = post_heading(&post(Some(""), Some("Body text"), None));
        assert_eq!(heading, "Body text...");

        let heading = post_heading(&post(None, None, None));
        assert_eq!(heading, "...");
    }

    #[test]
    fn test_sample_post_card() {
        let options = RenderOptions::default();
        let cards = render_sample_posts(
            &[
                post(Some("Title"), None, None),
                post(Some("Title"), None, Some("")),
                post(Some("Title"), None, Some("r/climate")),
            ],
            &options,
        );

        assert_eq!(cards[0].subreddit, SUBREDDIT_PLACEHOLDER);
        assert_eq!(cards[1].subreddit, SUBREDDIT_PLACEHOLDER);
        assert_eq!(cards[2].subreddit, "r/climate");
        assert_eq!(cards[0].time, "08:15");
        assert_eq!(cards[0].author, "by u/coastal_cleaner");
        assert_eq!(cards[0].upvotes, "1247");
        assert_eq!(cards[0].comments, "89");
    }

    #[test]
    fn test_status_indicator_table() {
        let cases = [
            (true, true, "All Systems Operational", Tone::Success),
            (true, false, "Limited Functionality", Tone::Warning),
            (false, true, "Using Sample Data", Tone::Danger),
            (false, false, "Using Sample Data", Tone::Danger),
        ];

        for (primary, ai, label, tone) in cases {
            let badge = render_status(&SystemStatus {
                primary_source_ok: primary,
                ai_service_ok: ai,
                last_updated: None,
                status: None,
            });
            assert_eq!(badge.label, label);
            assert_eq!(badge.tone, tone);
        }
    }

    #[test]
    fn test_negative_engagement_still_renders() {
        let snapshot: DashboardSnapshot = serde_json::from_value(json!({
            "top_influencers": [{
                "username": "u/downvoted",
                "posts_count": 1,
                "impact_score": 0,
                "total_engagement": -3
            }, {
                "username": "u/controversial",
                "posts_count": 4,
                "impact_score": 12,
                "total_engagement": -12500
            }],
            "platform_breakdown": {
                "reddit": {"count": 1, "total_engagement": -3, "avg_engagement": -3}
            },
            "sample_posts": [{"title": "Hot take", "upvotes": -8, "comments": 0}]
        }))
        .unwrap();

        let rendered = render_snapshot(&snapshot, &RenderOptions::default());
        let mut influencers = None;
        let mut platforms = None;
        for fragment in rendered.into_iter().flatten() {
            match fragment {
                Fragment::TopInfluencers(cards) => influencers = Some(cards),
                Fragment::PlatformBreakdown(rows) => platforms = Some(rows),
                _ => {}
            }
        }

        let cards = influencers.expect("influencers should render");
        assert_eq!(cards[0].engagement, "-3 engagement");
        assert_eq!(cards[1].engagement, "-12,500 engagement");

        let rows = platforms.expect("platform breakdown should render");
        assert_eq!(rows[0].posts, "1 posts");
        assert_eq!(rows[0].fill_percent, -0.3);
        assert_eq!(rows[0].avg_engagement, "-3 avg engagement per post");
    }

    #[test]
    fn test_render_snapshot_isolates_malformed_sections() {
        let snapshot: DashboardSnapshot = serde_json::from_value(json!({
            "overview": null,
            "trending_topics": ["Climate Change"],
            "top_influencers": [],
            "ground_impact": {"cleanups_triggered": "many"},
            "ai_analysis": {
                "summary": "ok",
                "sentiment_breakdown": {"positive": 1, "negative": 2, "neutral": 3}
            },
            "platform_breakdown": {},
            "sample_posts": []
        }))
        .unwrap();

        let rendered = render_snapshot(&snapshot, &RenderOptions::default());
        assert_eq!(rendered.len(), 7);

        let failed: Vec<String> = rendered
            .iter()
            .filter_map(|r| match r {
                Err(CoreError::Render { section, .. }) => Some(section.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(failed, vec!["overview".to_string(), "groundImpact".to_string()]);

        let mounted: Vec<MountPoint> = rendered
            .iter()
            .filter_map(|r| r.as_ref().ok().map(Fragment::mount_point))
            .collect();
        assert_eq!(
            mounted,
            vec![
                MountPoint::TrendingTopics,
                MountPoint::TopInfluencers,
                MountPoint::AiAnalysis,
                MountPoint::PlatformBreakdown,
                MountPoint::SamplePosts,
            ]
        );
    }
}
