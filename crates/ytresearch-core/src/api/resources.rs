//! Channel and video resource wire types
//!
//! Models the `snippet`, `statistics` and `contentDetails` parts returned
//! by the batched `channels.list` and `videos.list` endpoints. All counters
//! arrive as JSON strings and decode leniently to 0 when absent.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::count_from_string;

/// Response envelope for `channels.list`
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelListResponse {
    #[serde(default)]
    pub items: Vec<ChannelResource>,
}

/// One channel with the `snippet,statistics` parts
#[derive(Debug, Clone, Deserialize)]
pub struct ChannelResource {
    pub id: String,
    pub snippet: ChannelSnippet,
    #[serde(default)]
    pub statistics: ChannelStatistics,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSnippet {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub custom_url: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    pub published_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStatistics {
    #[serde(default, deserialize_with = "count_from_string")]
    pub subscriber_count: u64,
    #[serde(default, deserialize_with = "count_from_string")]
    pub view_count: u64,
    #[serde(default, deserialize_with = "count_from_string")]
    pub video_count: u64,
}

/// Response envelope for `videos.list`
#[derive(Debug, Clone, Deserialize)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoResource>,
}

/// One video with the `snippet,statistics,contentDetails` parts
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoResource {
    pub id: String,
    pub snippet: VideoSnippet,
    #[serde(default)]
    pub statistics: VideoStatistics,
    #[serde(default)]
    pub content_details: VideoContentDetails,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoSnippet {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub published_at: DateTime<Utc>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub thumbnails: Thumbnails,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Thumbnails {
    #[serde(default)]
    pub high: Option<Thumbnail>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Thumbnail {
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatistics {
    #[serde(default, deserialize_with = "count_from_string")]
    pub view_count: u64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoContentDetails {
    /// ISO-8601 duration string (`PT#H#M#S`), absent for some live content
    #[serde(default)]
    pub duration: Option<String>,
}

impl VideoSnippet {
    /// High-resolution thumbnail URL, empty when the API omits it.
    pub fn thumbnail_url(&self) -> &str {
        self.thumbnails
            .high
            .as_ref()
            .map(|t| t.url.as_str())
            .unwrap_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_channel_resource() {
        let json = r#"{
            "items": [{
                "id": "UCtestchannel",
                "snippet": {
                    "title": "Test Channel",
                    "description": "A channel",
                    "customUrl": "@testchannel",
                    "country": "US",
                    "publishedAt": "2019-05-01T12:00:00Z"
                },
                "statistics": {
                    "viewCount": "1000000",
                    "subscriberCount": "5000",
                    "videoCount": "120"
                }
            }]
        }"#;
        let response: ChannelListResponse = serde_json::from_str(json).unwrap();
        let channel = &response.items[0];
        assert_eq!(channel.id, "UCtestchannel");
        assert_eq!(channel.snippet.title, "Test Channel");
        assert_eq!(channel.snippet.custom_url.as_deref(), Some("@testchannel"));
        assert_eq!(channel.statistics.subscriber_count, 5000);
        assert_eq!(channel.statistics.view_count, 1_000_000);
        assert_eq!(channel.statistics.video_count, 120);
    }

    #[test]
    fn test_parse_channel_missing_optional_fields() {
        let json = r#"{
            "items": [{
                "id": "UCbare",
                "snippet": {
                    "title": "Bare",
                    "publishedAt": "2021-01-01T00:00:00Z"
                }
            }]
        }"#;
        let response: ChannelListResponse = serde_json::from_str(json).unwrap();
        let channel = &response.items[0];
        assert!(channel.snippet.custom_url.is_none());
        assert!(channel.snippet.country.is_none());
        assert_eq!(channel.statistics.subscriber_count, 0);
    }

    #[test]
    fn test_parse_video_resource() {
        let json = r#"{
            "items": [{
                "id": "vid1",
                "snippet": {
                    "title": "A Video",
                    "description": "desc",
                    "publishedAt": "2024-06-15T08:30:00Z",
                    "tags": ["cooking", "recipe"],
                    "thumbnails": {"high": {"url": "https://i.ytimg.com/vi/vid1/hqdefault.jpg"}}
                },
                "statistics": {"viewCount": "500"},
                "contentDetails": {"duration": "PT1H2M3S"}
            }]
        }"#;
        let response: VideoListResponse = serde_json::from_str(json).unwrap();
        let video = &response.items[0];
        assert_eq!(video.statistics.view_count, 500);
        assert_eq!(video.content_details.duration.as_deref(), Some("PT1H2M3S"));
        assert_eq!(
            video.snippet.thumbnail_url(),
            "https://i.ytimg.com/vi/vid1/hqdefault.jpg"
        );
        assert_eq!(video.snippet.tags, vec!["cooking", "recipe"]);
    }

    #[test]
    fn test_parse_video_without_statistics() {
        let json = r#"{
            "items": [{
                "id": "vid2",
                "snippet": {"title": "No Stats", "publishedAt": "2024-06-15T08:30:00Z"}
            }]
        }"#;
        let response: VideoListResponse = serde_json::from_str(json).unwrap();
        let video = &response.items[0];
        assert_eq!(video.statistics.view_count, 0);
        assert!(video.content_details.duration.is_none());
        assert_eq!(video.snippet.thumbnail_url(), "");
    }
}
