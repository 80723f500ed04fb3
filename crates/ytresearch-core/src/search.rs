//! Keyword-driven channel discovery and filtering
//!
//! Walks paginated channel-type search results for one keyword, enriches
//! each previously unseen hit with its basic channel info, and keeps the
//! channels that clear the subscriber, video-count and country bars. The
//! dedup set is request-scoped and shared across keywords by the caller.

use std::collections::HashSet;

use log::{debug, warn};

use crate::aggregator::basic_channel_info;
use crate::client::{RequestBudget, YoutubeClient};
use crate::types::ChannelRecord;

/// Predicate applied to each candidate channel
#[derive(Debug, Clone)]
pub struct FilterCriteria {
    /// Inclusive subscriber floor
    pub min_subscribers: u64,
    /// Inclusive lifetime-video floor
    pub min_videos: u64,
    /// Country code to match; `ALL` disables the country check.
    /// Also forwarded as the search `regionCode` when concrete.
    pub country: String,
    /// Relevance language for search, empty for none
    pub language: String,
}

impl FilterCriteria {
    /// Whether a channel clears all bars; boundaries are inclusive.
    pub fn matches(&self, channel: &ChannelRecord) -> bool {
        channel.subscribers >= self.min_subscribers
            && channel.total_videos >= self.min_videos
            && (self.country == "ALL" || channel.country == self.country)
    }

    fn region_code(&self) -> Option<&str> {
        if self.country == "ALL" {
            None
        } else {
            Some(&self.country)
        }
    }
}

/// Collects up to `max_results` qualifying channels for one keyword
///
/// Pages through search results until enough channels qualified or the
/// provider reports no further pages. `seen_channel_ids` carries the
/// request-scoped dedup state: hits already in it are skipped, and only
/// channels that pass the predicate are added. Search failures end the
/// keyword early with whatever was collected.
pub async fn search_by_keyword(
    client: &YoutubeClient,
    api_key: &str,
    keyword: &str,
    max_results: usize,
    criteria: &FilterCriteria,
    seen_channel_ids: &mut HashSet<String>,
    budget: &RequestBudget,
) -> Vec<ChannelRecord> {
    let mut collected: Vec<ChannelRecord> = Vec::new();
    let mut page_token: Option<String> = None;

    while collected.len() < max_results {
        if budget.is_exhausted() {
            debug!("budget exhausted while searching {keyword:?}");
            break;
        }

        let page = match client
            .search_channels_page(
                api_key,
                keyword,
                criteria.region_code(),
                Some(&criteria.language),
                page_token.as_deref(),
            )
            .await
        {
            Ok(page) => page,
            Err(e) => {
                warn!("channel search failed for {keyword:?}: {e}");
                break;
            }
        };

        if page.items.is_empty() {
            break;
        }

        for channel_id in page.channel_ids() {
            if collected.len() >= max_results || budget.is_exhausted() {
                break;
            }
            if seen_channel_ids.contains(&channel_id) {
                continue;
            }

            if let Some(channel) = basic_channel_info(client, api_key, &channel_id).await
                && criteria.matches(&channel)
            {
                seen_channel_ids.insert(channel_id);
                collected.push(channel);
            }

            // Paced per processed hit to stay under quota burst limits
            client.search_pacer().acquire().await;
        }

        page_token = page.next_page_token;
        if page_token.is_none() {
            break;
        }
    }

    debug!("keyword {keyword:?} yielded {} channels", collected.len());
    collected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel(subscribers: u64, total_videos: u64, country: &str) -> ChannelRecord {
        ChannelRecord {
            name: "c".to_string(),
            link: "l".to_string(),
            tags: "t".to_string(),
            description: String::new(),
            subscribers,
            total_views: 0,
            total_videos,
            country: country.to_string(),
            creation_date: "2020-01-01".to_string(),
            age_months: 12,
            recent: None,
        }
    }

    fn criteria(country: &str) -> FilterCriteria {
        FilterCriteria {
            min_subscribers: 1000,
            min_videos: 10,
            country: country.to_string(),
            language: String::new(),
        }
    }

    #[test]
    fn test_subscriber_boundary_is_inclusive() {
        let criteria = criteria("US");
        assert!(!criteria.matches(&channel(999, 10, "US")));
        assert!(criteria.matches(&channel(1000, 10, "US")));
    }

    #[test]
    fn test_video_count_boundary_is_inclusive() {
        let criteria = criteria("US");
        assert!(!criteria.matches(&channel(1000, 9, "US")));
        assert!(criteria.matches(&channel(1000, 10, "US")));
    }

    #[test]
    fn test_country_mismatch_excluded() {
        let criteria = criteria("US");
        assert!(!criteria.matches(&channel(1000, 10, "DE")));
        assert!(!criteria.matches(&channel(1000, 10, "Unknown")));
    }

    #[test]
    fn test_country_all_matches_everything() {
        let criteria = criteria("ALL");
        assert!(criteria.matches(&channel(1000, 10, "DE")));
        assert!(criteria.matches(&channel(1000, 10, "Unknown")));
    }

    #[test]
    fn test_region_code_suppressed_for_all() {
        assert_eq!(criteria("ALL").region_code(), None);
        assert_eq!(criteria("US").region_code(), Some("US"));
    }
}
