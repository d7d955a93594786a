//! Typed view fragments. Every field holds the exact text shown to the user.

/// Colour role of a label, badge or stat cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Primary,
    Success,
    Info,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverviewView {
    pub total_posts: String,
    pub total_news: String,
    pub effectiveness_score: String,
    pub positive_sentiment: String,
    pub last_updated: String,
    pub data_source: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopicView {
    pub label: String,
    pub tag: String,
}

impl TopicView {
    pub fn badge(&self) -> String {
        format!("r/{}", self.tag)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InfluencerCard {
    pub username: String,
    pub posts: String,
    pub impact: String,
    pub engagement: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImpactCell {
    pub value: String,
    pub label: &'static str,
    pub tone: Tone,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GroundImpactView {
    /// Cleanups, plastic reduced, trees planted, people engaged.
    pub cells: [ImpactCell; 4],
}

#[derive(Debug, Clone, PartialEq)]
pub struct AiAnalysisView {
    pub summary: String,
    pub positive: String,
    pub negative: String,
    pub neutral: String,
    /// `None` means the block is not shown at all.
    pub recommendations: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlatformRow {
    pub platform: String,
    pub display_name: String,
    pub posts: String,
    /// Progress fill in percent, never above 100.
    pub fill_percent: f64,
    pub avg_engagement: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PostCard {
    pub subreddit: String,
    pub time: String,
    pub heading: String,
    pub author: String,
    pub upvotes: String,
    pub comments: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusIndicator {
    Operational,
    Limited,
    SampleData,
}

impl StatusIndicator {
    pub fn from_flags(primary_source_ok: bool, ai_service_ok: bool) -> Self {
        match (primary_source_ok, ai_service_ok) {
            (true, true) => StatusIndicator::Operational,
            (true, false) => StatusIndicator::Limited,
            (false, _) => StatusIndicator::SampleData,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusIndicator::Operational => "All Systems Operational",
            StatusIndicator::Limited => "Limited Functionality",
            StatusIndicator::SampleData => "Using Sample Data",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            StatusIndicator::Operational => Tone::Success,
            StatusIndicator::Limited => Tone::Warning,
            StatusIndicator::SampleData => Tone::Danger,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusBadge {
    pub indicator: StatusIndicator,
    pub label: String,
    pub tone: Tone,
}
