use crate::view::*;
use std::fmt;

/// Stable identifiers of the places a rendered fragment can be mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MountPoint {
    Overview,
    TrendingTopics,
    TopInfluencers,
    GroundImpact,
    AiAnalysis,
    PlatformBreakdown,
    SamplePosts,
    ApiStatus,
}

impl MountPoint {
    pub const ALL: [MountPoint; 8] = [
        MountPoint::Overview,
        MountPoint::TrendingTopics,
        MountPoint::TopInfluencers,
        MountPoint::GroundImpact,
        MountPoint::AiAnalysis,
        MountPoint::PlatformBreakdown,
        MountPoint::SamplePosts,
        MountPoint::ApiStatus,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            MountPoint::Overview => "overview",
            MountPoint::TrendingTopics => "trendingTopics",
            MountPoint::TopInfluencers => "topInfluencers",
            MountPoint::GroundImpact => "groundImpact",
            MountPoint::AiAnalysis => "aiAnalysis",
            MountPoint::PlatformBreakdown => "platformBreakdown",
            MountPoint::SamplePosts => "samplePosts",
            MountPoint::ApiStatus => "apiStatus",
        }
    }
}

impl fmt::Display for MountPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// A rendered section, ready to replace whatever its mount point holds.
#[derive(Debug, Clone, PartialEq)]
pub enum Fragment {
    Overview(OverviewView),
    TrendingTopics(Vec<TopicView>),
    TopInfluencers(Vec<InfluencerCard>),
    GroundImpact(GroundImpactView),
    AiAnalysis(AiAnalysisView),
    PlatformBreakdown(Vec<PlatformRow>),
    SamplePosts(Vec<PostCard>),
    ApiStatus(StatusBadge),
}

impl Fragment {
    pub fn mount_point(&self) -> MountPoint {
        match self {
            Fragment::Overview(_) => MountPoint::Overview,
            Fragment::TrendingTopics(_) => MountPoint::TrendingTopics,
            Fragment::TopInfluencers(_) => MountPoint::TopInfluencers,
            Fragment::GroundImpact(_) => MountPoint::GroundImpact,
            Fragment::AiAnalysis(_) => MountPoint::AiAnalysis,
            Fragment::PlatformBreakdown(_) => MountPoint::PlatformBreakdown,
            Fragment::SamplePosts(_) => MountPoint::SamplePosts,
            Fragment::ApiStatus(_) => MountPoint::ApiStatus,
        }
    }
}

/// The widget tree: one slot per mount point, empty until first rendered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetTree {
    overview: Option<OverviewView>,
    trending_topics: Option<Vec<TopicView>>,
    top_influencers: Option<Vec<InfluencerCard>>,
    ground_impact: Option<GroundImpactView>,
    ai_analysis: Option<AiAnalysisView>,
    platform_breakdown: Option<Vec<PlatformRow>>,
    sample_posts: Option<Vec<PostCard>>,
    api_status: Option<StatusBadge>,
}

impl WidgetTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the content of the fragment's mount point.
    pub fn mount(&mut self, fragment: Fragment) {
        match fragment {
            Fragment::Overview(view) => self.overview = Some(view),
            Fragment::TrendingTopics(view) => self.trending_topics = Some(view),
            Fragment::TopInfluencers(view) => self.top_influencers = Some(view),
            Fragment::GroundImpact(view) => self.ground_impact = Some(view),
            Fragment::AiAnalysis(view) => self.ai_analysis = Some(view),
            Fragment::PlatformBreakdown(view) => self.platform_breakdown = Some(view),
            Fragment::SamplePosts(view) => self.sample_posts = Some(view),
            Fragment::ApiStatus(view) => self.api_status = Some(view),
        }
    }

    pub fn is_mounted(&self, point: MountPoint) -> bool {
        match point {
            MountPoint::Overview => self.overview.is_some(),
            MountPoint::TrendingTopics => self.trending_topics.is_some(),
            MountPoint::TopInfluencers => self.top_influencers.is_some(),
            MountPoint::GroundImpact => self.ground_impact.is_some(),
            MountPoint::AiAnalysis => self.ai_analysis.is_some(),
            MountPoint::PlatformBreakdown => self.platform_breakdown.is_some(),
            MountPoint::SamplePosts => self.sample_posts.is_some(),
            MountPoint::ApiStatus => self.api_status.is_some(),
        }
    }

    pub fn overview(&self) -> Option<&OverviewView> {
        self.overview.as_ref()
    }

    pub fn trending_topics(&self) -> Option<&[TopicView]> {
        self.trending_topics.as_deref()
    }

    pub fn top_influencers(&self) -> Option<&[InfluencerCard]> {
        self.top_influencers.as_deref()
    }

    pub fn ground_impact(&self) -> Option<&GroundImpactView> {
        self.ground_impact.as_ref()
    }

    pub fn ai_analysis(&self) -> Option<&AiAnalysisView> {
        self.ai_analysis.as_ref()
    }

    pub fn platform_breakdown(&self) -> Option<&[PlatformRow]> {
        self.platform_breakdown.as_deref()
    }

    pub fn sample_posts(&self) -> Option<&[PostCard]> {
        self.sample_posts.as_deref()
    }

    pub fn api_status(&self) -> Option<&StatusBadge> {
        self.api_status.as_ref()
    }
}
