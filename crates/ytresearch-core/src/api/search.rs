//! Search endpoint wire types
//!
//! One page of search results plus the opaque continuation cursor.
//! The client never loops internally; callers repeat the same query with
//! the returned token until it comes back absent.

use serde::Deserialize;

/// One page of the search list response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchListResponse {
    #[serde(default)]
    pub items: Vec<SearchItem>,

    /// Opaque cursor for the next page; `None` signals exhaustion
    pub next_page_token: Option<String>,
}

/// A single search hit
#[derive(Debug, Clone, Deserialize)]
pub struct SearchItem {
    pub id: SearchItemId,
}

/// Identifier of a search hit; exactly one of the fields is populated
/// depending on the `type` the query asked for.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchItemId {
    #[serde(default)]
    pub channel_id: Option<String>,
    #[serde(default)]
    pub video_id: Option<String>,
}

impl SearchListResponse {
    /// Channel IDs of all hits on this page, skipping non-channel items.
    pub fn channel_ids(&self) -> Vec<String> {
        self.items
            .iter()
            .filter_map(|item| item.id.channel_id.clone())
            .collect()
    }

    /// Video IDs of all hits on this page, skipping non-video items.
    pub fn video_ids(&self) -> Vec<String> {
        self.items
            .iter()
            .filter_map(|item| item.id.video_id.clone())
            .collect()
    }
}
