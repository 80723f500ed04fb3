//! Channel identifier resolution
//!
//! Turns whatever the caller pasted (a raw channel ID, a channel URL, a
//! `/c/Name` vanity URL, an `@handle` URL or a bare handle) into a
//! canonical channel ID. Only non-canonical inputs cost a search call.

use log::warn;
use regex::Regex;
use std::sync::OnceLock;

use crate::client::YoutubeClient;

/// Length of a canonical channel ID (`UC` prefix plus 22 characters)
const CANONICAL_ID_LEN: usize = 24;

fn path_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?:youtube\.com|youtu\.be)/(?:channel|c)/([a-zA-Z0-9_-]+)").unwrap()
    })
}

fn handle_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"(?:youtube\.com|youtu\.be)/@([a-zA-Z0-9_.-]+)").unwrap())
}

/// Whether the input already has the canonical channel-ID shape
pub fn is_canonical_id(identifier: &str) -> bool {
    identifier.starts_with("UC") && identifier.len() == CANONICAL_ID_LEN
}

/// Extracts the searchable handle from a channel reference
///
/// URL path forms (`/channel/...`, `/c/...`) are tried before `@handle`
/// forms; anything that matches neither is used verbatim.
///
/// # Example
/// ```
/// use ytresearch_core::resolver::extract_handle;
/// assert_eq!(extract_handle("https://www.youtube.com/c/SomeName"), "SomeName");
/// assert_eq!(extract_handle("https://youtube.com/@some.handle"), "some.handle");
/// assert_eq!(extract_handle("plain name"), "plain name");
/// ```
pub fn extract_handle(identifier: &str) -> &str {
    for pattern in [path_pattern(), handle_pattern()] {
        if let Some(captures) = pattern.captures(identifier) {
            return captures.get(1).map(|m| m.as_str()).unwrap_or(identifier);
        }
    }
    identifier
}

/// Resolves a channel reference to its canonical channel ID
///
/// Canonical IDs are returned unchanged with no network call. Everything
/// else is reduced to a handle and resolved through one channel-type
/// search; a failed or empty search yields `None` and is logged, never
/// surfaced as an error.
pub async fn resolve_channel_id(
    client: &YoutubeClient,
    api_key: &str,
    identifier: &str,
) -> Option<String> {
    let identifier = identifier.trim();

    if is_canonical_id(identifier) {
        return Some(identifier.to_string());
    }

    let handle = extract_handle(identifier);

    match client
        .search_channels_page(api_key, handle, None, None, None)
        .await
    {
        Ok(page) => {
            let resolved = page.items.first().and_then(|item| item.id.channel_id.clone());
            if resolved.is_none() {
                warn!("no channel found for {identifier:?}");
            }
            resolved
        }
        Err(e) => {
            warn!("channel search failed for {identifier:?}: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_id_shape() {
        assert!(is_canonical_id("UCXXXXXXXXXXXXXXXXXXXXXX"));
    }

    #[test]
    fn test_canonical_id_wrong_prefix() {
        assert!(!is_canonical_id("UDXXXXXXXXXXXXXXXXXXXXXX"));
    }

    #[test]
    fn test_canonical_id_wrong_length() {
        assert!(!is_canonical_id("UCshort"));
        assert!(!is_canonical_id("UCXXXXXXXXXXXXXXXXXXXXXXXXXX"));
    }

    #[test]
    fn test_extract_from_channel_url() {
        assert_eq!(
            extract_handle("https://www.youtube.com/channel/UCabc123"),
            "UCabc123"
        );
    }

    #[test]
    fn test_extract_from_vanity_url() {
        assert_eq!(
            extract_handle("https://youtube.com/c/CookingDaily"),
            "CookingDaily"
        );
    }

    #[test]
    fn test_extract_from_handle_url() {
        assert_eq!(
            extract_handle("https://www.youtube.com/@some_handle"),
            "some_handle"
        );
    }

    #[test]
    fn test_extract_from_short_domain() {
        assert_eq!(extract_handle("https://youtu.be/@handle.two"), "handle.two");
    }

    #[test]
    fn test_path_form_wins_over_handle_form() {
        // Ordered matching: the /channel/ form is checked first
        assert_eq!(
            extract_handle("https://www.youtube.com/channel/UCabc"),
            "UCabc"
        );
    }

    #[test]
    fn test_bare_name_passes_through() {
        assert_eq!(extract_handle("Some Channel Name"), "Some Channel Name");
    }
}
