//! YouTube Channel Research Core Library
//!
//! Resolves channel identifiers and search keywords into structured channel
//! and video metadata with derived analytics, and serializes the results to
//! CSV.
//!
//! # Overview
//!
//! The pipeline is built from five cooperating pieces:
//! - An identifier resolver that turns IDs, handles and URLs into canonical
//!   channel IDs
//! - A rate-paced, typed client over the YouTube Data API v3 search,
//!   channels and videos endpoints
//! - An aggregator that assembles one channel record plus its top recent
//!   videos with velocity metrics
//! - A search engine that discovers channels by keyword and filters them by
//!   subscriber, video-count and country thresholds
//! - A CSV exporter with fixed per-record schemas
//!
//! # Example
//!
//! ```no_run
//! use ytresearch_core::{AnalyzeRequest, Result, YoutubeResearch};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let research = YoutubeResearch::new()?;
//!
//!     let request = AnalyzeRequest {
//!         api_key: "YOUR_API_KEY".to_string(),
//!         channels: "https://www.youtube.com/@somechannel".to_string(),
//!     };
//!
//!     let response = research.analyze(&request).await?;
//!     println!("{}", response.channel_csv);
//!     Ok(())
//! }
//! ```
//!
//! # Best-effort semantics
//!
//! Upstream failures never abort a batch: a channel that cannot be resolved
//! or fetched is logged and skipped, and an operation only fails when its
//! input is invalid or the entire result set came out empty.

pub mod aggregator;
pub mod api;
mod client;
mod error;
pub mod export;
pub mod metrics;
pub mod resolver;
pub mod search;
mod research;
mod types;

// Re-export client types
pub use client::{
    BATCH_LIMIT, ClientConfig, Pacer, RequestBudget, SEARCH_PAGE_SIZE, VideoSearchQuery,
    YoutubeClient,
};

// Re-export error types
pub use error::{ResearchError, Result};

// Re-export the main research API
pub use research::YoutubeResearch;

// Re-export exporter entry points
pub use export::{CsvRecord, to_csv};

// Re-export data types
pub use types::{
    AnalyzeRequest, AnalyzeResponse, ChannelRecord, FilterRequest, FilterResponse, RecentStats,
    VideoRecord, channel_link, watch_link,
};

// Re-export search types
pub use search::FilterCriteria;
