//! Channel and video aggregation
//!
//! For one resolved channel ID this module assembles the full research
//! record: lifetime statistics, trailing-30-day upload activity, and the
//! channel's top videos from the last 90 days with derived velocity
//! metrics. Upstream failures degrade to zero/empty values per call site;
//! a channel is only dropped entirely when its own lookup fails.

use chrono::{DateTime, Datelike, Duration, Utc};
use log::{debug, warn};

use crate::client::{BATCH_LIMIT, RequestBudget, VideoSearchQuery, YoutubeClient};
use crate::metrics;
use crate::types::{
    ChannelRecord, NONE_PLACEHOLDER, RecentStats, UNKNOWN_COUNTRY, VideoRecord, channel_link,
    watch_link,
};
use crate::api::{ChannelResource, VideoResource};

/// Recency window for upload-activity statistics, in days
const RECENT_WINDOW_DAYS: i64 = 30;

/// Window for the top-video query, in days
const TOP_VIDEO_WINDOW_DAYS: i64 = 90;

/// How many top videos are fetched per channel
const TOP_VIDEO_COUNT: u32 = 15;

/// Fetches a channel snapshot without 30-day statistics (filter path)
///
/// Returns `None` when the channel cannot be fetched; the failure is
/// logged and the caller skips the channel.
pub async fn basic_channel_info(
    client: &YoutubeClient,
    api_key: &str,
    channel_id: &str,
) -> Option<ChannelRecord> {
    let ids = vec![channel_id.to_string()];
    match client.get_channels(api_key, &ids).await {
        Ok(channels) => channels
            .first()
            .map(|resource| build_channel_record(resource, None, Utc::now())),
        Err(e) => {
            warn!("channel lookup failed for {channel_id}: {e}");
            None
        }
    }
}

/// Fetches the full channel record plus its top recent videos (analyze path)
///
/// Returns `None` when the channel itself cannot be fetched. The video
/// list may be empty when nothing was published in the top-video window.
pub async fn channel_and_video_data(
    client: &YoutubeClient,
    api_key: &str,
    channel_id: &str,
    budget: &RequestBudget,
) -> Option<(ChannelRecord, Vec<VideoRecord>)> {
    let ids = vec![channel_id.to_string()];
    let resource = match client.get_channels(api_key, &ids).await {
        Ok(channels) => channels.into_iter().next()?,
        Err(e) => {
            warn!("channel lookup failed for {channel_id}: {e}");
            return None;
        }
    };

    let recent = thirty_day_stats(client, api_key, channel_id, budget).await;

    let now = Utc::now();
    let views_per_subscriber =
        metrics::views_per_subscriber(resource.statistics.view_count, resource.statistics.subscriber_count);
    let record = build_channel_record(
        &resource,
        Some(RecentStats {
            uploads_30d: recent.0,
            views_30d: recent.1,
            views_per_subscriber,
        }),
        now,
    );

    let videos = top_videos(client, api_key, channel_id, &record, budget).await;
    Some((record, videos))
}

/// Upload count and summed views over the trailing 30 days
///
/// Paginates the channel's video search across all pages, then batch-fetches
/// statistics in chunks of [`BATCH_LIMIT`]. Failures truncate rather than
/// abort: whatever was collected before the failure is what gets counted.
async fn thirty_day_stats(
    client: &YoutubeClient,
    api_key: &str,
    channel_id: &str,
    budget: &RequestBudget,
) -> (u64, u64) {
    let published_after = Utc::now() - Duration::days(RECENT_WINDOW_DAYS);
    let query = VideoSearchQuery {
        published_after: Some(published_after),
        ..VideoSearchQuery::default()
    };

    let mut video_ids: Vec<String> = Vec::new();
    let mut page_token: Option<String> = None;

    loop {
        if budget.is_exhausted() {
            debug!("budget exhausted during 30-day pagination for {channel_id}");
            break;
        }
        let page = match client
            .search_videos_page(api_key, channel_id, &query, page_token.as_deref())
            .await
        {
            Ok(page) => page,
            Err(e) => {
                warn!("30-day video search failed for {channel_id}: {e}");
                break;
            }
        };
        video_ids.extend(page.video_ids());
        page_token = page.next_page_token;
        if page_token.is_none() {
            break;
        }
    }

    let mut total_views: u64 = 0;
    for chunk in video_ids.chunks(BATCH_LIMIT) {
        if budget.is_exhausted() {
            break;
        }
        match client.get_videos(api_key, chunk).await {
            Ok(videos) => {
                total_views += videos.iter().map(|v| v.statistics.view_count).sum::<u64>();
            }
            Err(e) => {
                warn!("30-day statistics batch failed for {channel_id}: {e}");
            }
        }
    }

    (video_ids.len() as u64, total_views)
}

/// The channel's top videos from the last 90 days, ordered by view count
async fn top_videos(
    client: &YoutubeClient,
    api_key: &str,
    channel_id: &str,
    channel: &ChannelRecord,
    budget: &RequestBudget,
) -> Vec<VideoRecord> {
    if budget.is_exhausted() {
        return Vec::new();
    }

    let query = VideoSearchQuery {
        published_after: Some(Utc::now() - Duration::days(TOP_VIDEO_WINDOW_DAYS)),
        order: Some("viewCount"),
        max_results: Some(TOP_VIDEO_COUNT),
    };

    let video_ids = match client
        .search_videos_page(api_key, channel_id, &query, None)
        .await
    {
        Ok(page) => page.video_ids(),
        Err(e) => {
            warn!("top-video search failed for {channel_id}: {e}");
            return Vec::new();
        }
    };
    if video_ids.is_empty() {
        return Vec::new();
    }

    let details = match client.get_videos(api_key, &video_ids).await {
        Ok(videos) => videos,
        Err(e) => {
            warn!("top-video detail lookup failed for {channel_id}: {e}");
            return Vec::new();
        }
    };

    let now = Utc::now();
    details
        .iter()
        .enumerate()
        .map(|(index, video)| build_video_record(index, video, channel, now))
        .collect()
}

/// Builds the channel snapshot from one API resource
fn build_channel_record(
    resource: &ChannelResource,
    recent: Option<RecentStats>,
    now: DateTime<Utc>,
) -> ChannelRecord {
    let snippet = &resource.snippet;
    let stats = &resource.statistics;

    ChannelRecord {
        name: snippet.title.clone(),
        link: channel_link(&resource.id),
        tags: snippet
            .custom_url
            .clone()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| NONE_PLACEHOLDER.to_string()),
        description: snippet.description.clone(),
        subscribers: stats.subscriber_count,
        total_views: stats.view_count,
        total_videos: stats.video_count,
        country: snippet
            .country
            .clone()
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| UNKNOWN_COUNTRY.to_string()),
        creation_date: snippet.published_at.format("%Y-%m-%d").to_string(),
        age_months: metrics::age_in_months(snippet.published_at, now),
        recent,
    }
}

/// Builds one video row, denormalizing the parent channel's counters
///
/// `index` is the position in the already view-count-ordered list, so rank
/// labels come out dense starting at `Top 1`.
fn build_video_record(
    index: usize,
    video: &VideoResource,
    channel: &ChannelRecord,
    now: DateTime<Utc>,
) -> VideoRecord {
    let snippet = &video.snippet;
    let published = snippet.published_at;
    let views = video.statistics.view_count;
    let hours = metrics::hours_since(published, now);

    let tags = if snippet.tags.is_empty() {
        NONE_PLACEHOLDER.to_string()
    } else {
        snippet.tags.join(", ")
    };

    VideoRecord {
        channel_name: channel.name.clone(),
        channel_subscribers: channel.subscribers,
        channel_total_videos: channel.total_videos,
        channel_views_30d: channel.recent.as_ref().map(|r| r.views_30d).unwrap_or(0),
        rank: format!("Top {}", index + 1),
        title: snippet.title.clone(),
        views,
        views_per_hour: metrics::views_per_hour(views, hours),
        published_at: published.format("%Y-%m-%d %H:%M:%S").to_string(),
        published_month: published.month(),
        age_days: metrics::age_in_days(published, now),
        tags,
        description: snippet.description.clone(),
        link: watch_link(&video.id),
        duration_minutes: metrics::duration_to_minutes(
            video.content_details.duration.as_deref().unwrap_or(""),
        ),
        thumbnail: snippet.thumbnail_url().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{
        ChannelSnippet, ChannelStatistics, VideoContentDetails, VideoSnippet, VideoStatistics,
    };
    use chrono::TimeZone;

    fn channel_resource() -> ChannelResource {
        ChannelResource {
            id: "UCtest".to_string(),
            snippet: ChannelSnippet {
                title: "Test Channel".to_string(),
                description: "about".to_string(),
                custom_url: Some("@test".to_string()),
                country: Some("US".to_string()),
                published_at: Utc.with_ymd_and_hms(2020, 1, 15, 0, 0, 0).unwrap(),
            },
            statistics: ChannelStatistics {
                subscriber_count: 5000,
                view_count: 1_000_000,
                video_count: 120,
            },
        }
    }

    fn video_resource(published: DateTime<Utc>) -> VideoResource {
        VideoResource {
            id: "vid1".to_string(),
            snippet: VideoSnippet {
                title: "A Video".to_string(),
                description: "desc".to_string(),
                published_at: published,
                tags: vec!["one".to_string(), "two".to_string()],
                thumbnails: Default::default(),
            },
            statistics: VideoStatistics { view_count: 500 },
            content_details: VideoContentDetails {
                duration: Some("PT1H2M3S".to_string()),
            },
        }
    }

    #[test]
    fn test_channel_record_fields() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        let record = build_channel_record(&channel_resource(), None, now);

        assert_eq!(record.name, "Test Channel");
        assert_eq!(record.link, "https://www.youtube.com/channel/UCtest");
        assert_eq!(record.tags, "@test");
        assert_eq!(record.creation_date, "2020-01-15");
        // 4 years elapsed: 1461 days / 30.44 = 48.0
        assert_eq!(record.age_months, 48);
        assert!(record.recent.is_none());
    }

    #[test]
    fn test_channel_record_placeholders() {
        let mut resource = channel_resource();
        resource.snippet.custom_url = None;
        resource.snippet.country = None;
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        let record = build_channel_record(&resource, None, now);

        assert_eq!(record.tags, NONE_PLACEHOLDER);
        assert_eq!(record.country, UNKNOWN_COUNTRY);
    }

    #[test]
    fn test_video_record_derivations() {
        let now = Utc.with_ymd_and_hms(2024, 6, 20, 10, 0, 0).unwrap();
        let published = Utc.with_ymd_and_hms(2024, 6, 20, 0, 0, 0).unwrap();
        let channel = build_channel_record(
            &channel_resource(),
            Some(RecentStats {
                uploads_30d: 4,
                views_30d: 20000,
                views_per_subscriber: 200.0,
            }),
            now,
        );

        let record = build_video_record(0, &video_resource(published), &channel, now);

        assert_eq!(record.rank, "Top 1");
        assert_eq!(record.views, 500);
        // 500 views over exactly 10 hours
        assert_eq!(record.views_per_hour, 50.0);
        assert_eq!(record.published_at, "2024-06-20 00:00:00");
        assert_eq!(record.published_month, 6);
        assert_eq!(record.age_days, 0);
        assert_eq!(record.tags, "one, two");
        assert_eq!(record.link, "https://www.youtube.com/watch?v=vid1");
        assert_eq!(record.duration_minutes, 62.05);
        assert_eq!(record.channel_views_30d, 20000);
    }

    #[test]
    fn test_video_record_rank_is_dense() {
        let now = Utc.with_ymd_and_hms(2024, 6, 20, 10, 0, 0).unwrap();
        let published = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let channel = build_channel_record(&channel_resource(), None, now);
        let video = video_resource(published);

        let ranks: Vec<String> = (0..3)
            .map(|i| build_video_record(i, &video, &channel, now).rank)
            .collect();
        assert_eq!(ranks, vec!["Top 1", "Top 2", "Top 3"]);
    }

    #[test]
    fn test_video_record_empty_tags_placeholder() {
        let now = Utc.with_ymd_and_hms(2024, 6, 20, 10, 0, 0).unwrap();
        let published = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();
        let channel = build_channel_record(&channel_resource(), None, now);
        let mut video = video_resource(published);
        video.snippet.tags.clear();
        video.content_details.duration = None;

        let record = build_video_record(0, &video, &channel, now);
        assert_eq!(record.tags, NONE_PLACEHOLDER);
        assert_eq!(record.duration_minutes, 0.0);
    }
}
