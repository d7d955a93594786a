use crate::error::DashboardApiError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::collections::BTreeMap;

/// One snapshot section, decoded independently of its siblings.
///
/// A section that is missing or does not match its expected shape decodes to
/// `Malformed` so the remaining sections can still be rendered.
#[derive(Debug, Clone, PartialEq)]
pub enum Section<T> {
    Ready(T),
    Malformed(String),
}

impl<T> Section<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Section::Ready(value) => Some(value),
            Section::Malformed(_) => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Section::Ready(_))
    }
}

impl<T> Default for Section<T> {
    fn default() -> Self {
        Section::Malformed("section missing from snapshot".to_string())
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Section<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(match serde_json::from_value(raw) {
            Ok(value) => Section::Ready(value),
            Err(e) => Section::Malformed(e.to_string()),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DashboardSnapshot {
    #[serde(default)]
    pub overview: Section<Overview>,
    #[serde(default)]
    pub trending_topics: Section<Vec<String>>,
    #[serde(default)]
    pub top_influencers: Section<Vec<Influencer>>,
    #[serde(default)]
    pub ground_impact: Section<GroundImpact>,
    #[serde(default)]
    pub ai_analysis: Section<AiAnalysis>,
    #[serde(default)]
    pub platform_breakdown: Section<BTreeMap<String, PlatformStats>>,
    #[serde(default)]
    pub sample_posts: Section<Vec<SamplePost>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Overview {
    pub total_posts: u64,
    pub total_news: u64,
    pub effectiveness_score: f64,
    pub positive_sentiment: f64,
    pub last_updated: String,
    pub data_source: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Influencer {
    pub username: String,
    pub posts_count: i64,
    pub impact_score: f64,
    pub total_engagement: i64,
    pub average_engagement: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GroundImpact {
    pub cleanups_triggered: u64,
    pub plastic_reduced_kg: f64,
    pub trees_planted: u64,
    pub people_engaged: u64,
    pub policy_discussions: Option<u64>,
    pub carbon_offset_tons: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AiAnalysis {
    pub summary: String,
    pub sentiment_breakdown: SentimentBreakdown,
    pub recommendations: Option<Vec<String>>,
    pub dominant_topic: Option<String>,
    pub engagement_trend: Option<String>,
    pub ai_generated: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SentimentBreakdown {
    pub positive: f64,
    pub negative: f64,
    pub neutral: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlatformStats {
    pub count: u64,
    pub avg_engagement: f64,
    pub total_engagement: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SamplePost {
    pub id: Option<String>,
    pub subreddit: Option<String>,
    pub timestamp: Option<PostTimestamp>,
    pub title: Option<String>,
    pub text: Option<String>,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub upvotes: i64,
    #[serde(default)]
    pub comments: i64,
}

/// Post creation time as sent by the backend: an ISO-8601 string (usually
/// without an offset) or epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PostTimestamp {
    EpochMillis(f64),
    Text(String),
}

/// Body of `GET /api/dashboard-data`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DashboardEnvelope {
    #[serde(default)]
    pub success: bool,
    pub data: Option<DashboardSnapshot>,
    pub error: Option<String>,
    pub data_source: Option<String>,
    pub reddit_connected: Option<bool>,
    pub groq_connected: Option<bool>,
}

impl DashboardEnvelope {
    pub fn into_snapshot(self) -> Result<DashboardSnapshot, DashboardApiError> {
        if !self.success {
            return Err(DashboardApiError::ApplicationFailure { reason: self.error });
        }
        self.data.ok_or(DashboardApiError::MissingData)
    }
}

/// Body of `GET /api/system/status`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SystemStatus {
    #[serde(rename = "reddit_api", default)]
    pub primary_source_ok: bool,
    #[serde(rename = "groq_ai", default)]
    pub ai_service_ok: bool,
    pub last_updated: Option<String>,
    pub status: Option<String>,
}
