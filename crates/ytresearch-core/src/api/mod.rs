//! Wire types for the YouTube Data API v3
//!
//! Contains serde models for the three endpoints the pipeline consumes:
//! search (channel- and video-type, paginated), channels and videos
//! (batched by ID list).

pub mod resources;
pub mod search;

pub use resources::{
    ChannelListResponse, ChannelResource, ChannelSnippet, ChannelStatistics, VideoContentDetails,
    VideoListResponse, VideoResource, VideoSnippet, VideoStatistics,
};
pub use search::{SearchItem, SearchItemId, SearchListResponse};

use serde::{Deserialize, Deserializer};

/// Deserializes the API's string-encoded counters (`"viewCount": "1234"`).
///
/// Missing, empty or malformed values decode to 0 rather than failing the
/// whole item, matching the pipeline's best-effort policy.
pub(crate) fn count_from_string<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw
        .as_deref()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Wrapper {
        #[serde(default, deserialize_with = "count_from_string")]
        count: u64,
    }

    #[test]
    fn test_count_from_valid_string() {
        let w: Wrapper = serde_json::from_str(r#"{"count": "1234"}"#).unwrap();
        assert_eq!(w.count, 1234);
    }

    #[test]
    fn test_count_from_missing_field() {
        let w: Wrapper = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(w.count, 0);
    }

    #[test]
    fn test_count_from_null() {
        let w: Wrapper = serde_json::from_str(r#"{"count": null}"#).unwrap();
        assert_eq!(w.count, 0);
    }

    #[test]
    fn test_count_from_malformed_string() {
        let w: Wrapper = serde_json::from_str(r#"{"count": "not-a-number"}"#).unwrap();
        assert_eq!(w.count, 0);
    }
}
