//! High-level research API
//!
//! Combines the resolver, client, aggregator, search engine and exporter
//! into the two request-scoped operations the web layer consumes: analyze
//! (identifier list to channel + video CSV) and filter (keyword list to a
//! capped channel CSV). Both are strictly sequential and best-effort: a
//! failing identifier or keyword is skipped, never fatal.

use std::collections::HashSet;

use log::{debug, warn};
use tokio_util::sync::CancellationToken;

use crate::aggregator::channel_and_video_data;
use crate::client::{ClientConfig, YoutubeClient};
use crate::error::{ResearchError, Result};
use crate::export::to_csv;
use crate::resolver::resolve_channel_id;
use crate::search::{FilterCriteria, search_by_keyword};
use crate::types::{
    AnalyzeRequest, AnalyzeResponse, ChannelRecord, FilterRequest, FilterResponse, VideoRecord,
};

/// Hard cap on channels returned by one filter operation
const FILTER_RESULT_CAP: usize = 100;

/// Qualifying-channel cap applied per keyword
const PER_KEYWORD_CAP: usize = 100;

/// Entry point for channel research operations
///
/// One instance is shared across requests; all per-request state (dedup
/// sets, accumulators, budget) lives on the operation's own stack, so
/// concurrent requests stay isolated without locking.
pub struct YoutubeResearch {
    client: YoutubeClient,
}

impl YoutubeResearch {
    /// Create a research instance with default configuration
    pub fn new() -> Result<Self> {
        let client = YoutubeClient::new()?;
        Ok(Self { client })
    }

    /// Create a research instance with custom client configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = YoutubeClient::with_config(config)?;
        Ok(Self { client })
    }

    /// Resolves and analyzes every identifier in the request
    ///
    /// Identifiers that fail to resolve or fetch are skipped; the
    /// inter-channel pacing delay applies after every identifier either
    /// way. Fails only when the input is invalid or nothing at all could
    /// be analyzed.
    pub async fn analyze(&self, request: &AnalyzeRequest) -> Result<AnalyzeResponse> {
        self.analyze_with_cancel(request, CancellationToken::new())
            .await
    }

    /// [`analyze`](Self::analyze) with an external cancellation signal
    ///
    /// Cancellation (like the overall timeout) abandons remaining
    /// identifiers and returns what was collected so far.
    pub async fn analyze_with_cancel(
        &self,
        request: &AnalyzeRequest,
        cancel: CancellationToken,
    ) -> Result<AnalyzeResponse> {
        let api_key = request.api_key.trim();
        if api_key.is_empty() {
            return Err(ResearchError::InvalidInput("API key is required".to_string()));
        }

        let identifiers = split_lines(&request.channels);
        if identifiers.is_empty() {
            return Err(ResearchError::InvalidInput(
                "channel list is required".to_string(),
            ));
        }

        let budget = self.client.operation_budget(cancel);
        let mut channels: Vec<ChannelRecord> = Vec::new();
        let mut videos: Vec<VideoRecord> = Vec::new();

        for identifier in &identifiers {
            if budget.is_exhausted() {
                debug!("budget exhausted; returning partial analyze results");
                break;
            }

            if let Some(channel_id) =
                resolve_channel_id(&self.client, api_key, identifier).await
            {
                match channel_and_video_data(&self.client, api_key, &channel_id, &budget).await {
                    Some((channel, channel_videos)) => {
                        channels.push(channel);
                        videos.extend(channel_videos);
                    }
                    None => warn!("no data for channel {channel_id}, skipping"),
                }
            }

            // Paced per identifier, successful or not
            self.client.channel_pacer().acquire().await;
        }

        if channels.is_empty() {
            return Err(ResearchError::NoResults(
                "could not fetch data for any channel; check the identifiers and API key"
                    .to_string(),
            ));
        }

        Ok(AnalyzeResponse {
            channel_csv: to_csv(&channels),
            video_csv: to_csv(&videos),
        })
    }

    /// Discovers channels matching the request's keywords and filters
    ///
    /// One dedup set spans all keywords, so a channel surfaced by two
    /// keywords appears once. Output is capped at [`FILTER_RESULT_CAP`]
    /// rows; `total_channels` reports the pre-cap count.
    pub async fn filter(&self, request: &FilterRequest) -> Result<FilterResponse> {
        self.filter_with_cancel(request, CancellationToken::new())
            .await
    }

    /// [`filter`](Self::filter) with an external cancellation signal
    pub async fn filter_with_cancel(
        &self,
        request: &FilterRequest,
        cancel: CancellationToken,
    ) -> Result<FilterResponse> {
        let api_key = request.api_key.trim();
        if api_key.is_empty() {
            return Err(ResearchError::InvalidInput("API key is required".to_string()));
        }

        let keywords = split_keywords(&request.keywords);
        if keywords.is_empty() {
            return Err(ResearchError::InvalidInput(
                "search keywords are required".to_string(),
            ));
        }

        let criteria = FilterCriteria {
            min_subscribers: request.min_subscribers(),
            min_videos: request.min_videos(),
            country: request.country().to_string(),
            language: request.language().to_string(),
        };

        let budget = self.client.operation_budget(cancel);
        let mut seen_channel_ids: HashSet<String> = HashSet::new();
        let mut seen_links: HashSet<String> = HashSet::new();
        let mut channels: Vec<ChannelRecord> = Vec::new();

        for keyword in &keywords {
            if budget.is_exhausted() {
                debug!("budget exhausted; returning partial filter results");
                break;
            }

            let matches = search_by_keyword(
                &self.client,
                api_key,
                keyword,
                PER_KEYWORD_CAP,
                &criteria,
                &mut seen_channel_ids,
                &budget,
            )
            .await;

            for channel in matches {
                // Link-keyed dedup across keywords
                if seen_links.insert(channel.link.clone()) {
                    channels.push(channel);
                }
            }

            if channels.len() >= FILTER_RESULT_CAP {
                break;
            }
        }

        if channels.is_empty() {
            return Err(ResearchError::NoResults(
                "no channels matched the filter criteria; try different keywords or thresholds"
                    .to_string(),
            ));
        }

        let total_channels = channels.len();
        let capped = &channels[..total_channels.min(FILTER_RESULT_CAP)];

        Ok(FilterResponse {
            channel_csv: to_csv(capped),
            total_channels,
        })
    }
}

/// Splits newline-separated channel identifiers, dropping blanks
fn split_lines(input: &str) -> Vec<String> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Splits comma- or newline-separated keywords, dropping blanks
fn split_keywords(input: &str) -> Vec<String> {
    input
        .replace('\n', ",")
        .split(',')
        .map(str::trim)
        .filter(|keyword| !keyword.is_empty())
        .map(str::to_string)
        .collect()
}
