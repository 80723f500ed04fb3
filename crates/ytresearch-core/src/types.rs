//! Core data types for the research pipeline
//!
//! Channel and video snapshots are built once per request, never mutated,
//! and dropped when the response is serialized; nothing here persists.

use serde::{Deserialize, Serialize};

/// Placeholder for a channel with no custom handle or a video with no tags
pub const NONE_PLACEHOLDER: &str = "None";

/// Placeholder for a channel with no registered country
pub const UNKNOWN_COUNTRY: &str = "Unknown";

/// Canonical link to a channel page
pub fn channel_link(channel_id: &str) -> String {
    format!("https://www.youtube.com/channel/{}", channel_id)
}

/// Canonical watch link for a video
pub fn watch_link(video_id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", video_id)
}

/// Upload activity over the trailing 30-day window, plus the lifetime
/// views-per-subscriber ratio; computed on the analyze path only.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentStats {
    /// Videos uploaded in the last 30 days
    pub uploads_30d: u64,
    /// Summed view counts of those uploads
    pub views_30d: u64,
    /// Lifetime views / subscribers, 2 decimals, 0 when subscribers hidden
    pub views_per_subscriber: f64,
}

/// Immutable snapshot of one channel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelRecord {
    pub name: String,
    /// Canonical channel link; unique within one response
    pub link: String,
    /// Custom handle (e.g. `@somechannel`) or [`NONE_PLACEHOLDER`]
    pub tags: String,
    pub description: String,
    pub subscribers: u64,
    pub total_views: u64,
    pub total_videos: u64,
    /// Registered country code or [`UNKNOWN_COUNTRY`]
    pub country: String,
    /// Creation date as `YYYY-MM-DD`
    pub creation_date: String,
    /// Rounded age in average 30.44-day months
    pub age_months: i64,
    /// Present on the analyze path, absent on the filter path
    pub recent: Option<RecentStats>,
}

/// One of a channel's top recent videos
///
/// Parent-channel counters are denormalized onto every row so the video
/// CSV is flat and self-contained.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VideoRecord {
    pub channel_name: String,
    pub channel_subscribers: u64,
    pub channel_total_videos: u64,
    pub channel_views_30d: u64,
    /// Dense rank label within the channel's list, `Top 1` first
    pub rank: String,
    pub title: String,
    pub views: u64,
    pub views_per_hour: f64,
    /// Publish timestamp as `YYYY-MM-DD HH:MM:SS`
    pub published_at: String,
    /// Calendar month of publication, 1-12
    pub published_month: u32,
    pub age_days: i64,
    /// Comma-joined tag list or [`NONE_PLACEHOLDER`]
    pub tags: String,
    pub description: String,
    pub link: String,
    pub duration_minutes: f64,
    pub thumbnail: String,
}

/// Input for the analyze operation
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub api_key: String,
    /// Newline-separated channel IDs, handles or URLs
    #[serde(default)]
    pub channels: String,
}

/// Output of the analyze operation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResponse {
    pub channel_csv: String,
    pub video_csv: String,
}

/// Input for the filter operation
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterRequest {
    #[serde(default)]
    pub api_key: String,
    /// Comma- or newline-separated search keywords
    #[serde(default)]
    pub keywords: String,
    #[serde(default)]
    pub min_subscribers: Option<u64>,
    #[serde(default)]
    pub min_videos: Option<u64>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
}

impl FilterRequest {
    /// Subscriber floor, defaulting to 1000
    pub fn min_subscribers(&self) -> u64 {
        self.min_subscribers.unwrap_or(1000)
    }

    /// Lifetime-video floor, defaulting to 10
    pub fn min_videos(&self) -> u64 {
        self.min_videos.unwrap_or(10)
    }

    /// Country filter, defaulting to `US`; `ALL` disables it
    pub fn country(&self) -> &str {
        self.country.as_deref().filter(|c| !c.is_empty()).unwrap_or("US")
    }

    /// Relevance language passed through to search, empty for none
    pub fn language(&self) -> &str {
        self.language.as_deref().unwrap_or("")
    }
}

/// Output of the filter operation
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterResponse {
    /// At most 100 data rows even when more channels qualified
    pub channel_csv: String,
    /// Count of qualifying channels before the cap
    pub total_channels: usize,
}
