//! CSV export
//!
//! Serializes ordered record lists to CSV text. Each record type carries a
//! fixed field-order schema; the header row is taken from the first record,
//! so a channel list built on the analyze path (which has the 30-day
//! columns) and one built on the filter path (which does not) each get the
//! matching header.

use crate::types::{ChannelRecord, VideoRecord};

/// A record that knows its own column schema
pub trait CsvRecord {
    /// Column names, in output order
    fn headers(&self) -> Vec<&'static str>;
    /// Field values rendered as strings, matching `headers` order
    fn fields(&self) -> Vec<String>;
}

/// Quotes a field when it contains a comma, double quote or line break,
/// doubling any inner double quotes.
pub fn escape_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Renders records to CSV text
///
/// Empty input produces an empty string with no header row. Rows are
/// newline-joined without a trailing newline.
pub fn to_csv<R: CsvRecord>(records: &[R]) -> String {
    let Some(first) = records.first() else {
        return String::new();
    };

    let mut rows = Vec::with_capacity(records.len() + 1);
    rows.push(first.headers().join(","));
    for record in records {
        let row = record
            .fields()
            .iter()
            .map(|field| escape_field(field))
            .collect::<Vec<_>>()
            .join(",");
        rows.push(row);
    }

    rows.join("\n")
}

impl CsvRecord for ChannelRecord {
    fn headers(&self) -> Vec<&'static str> {
        let mut headers = vec![
            "Channel Name",
            "Channel Link",
            "Channel Tags",
            "Channel Description",
            "Subscribers",
            "Total Views",
            "Total Videos",
        ];
        if self.recent.is_some() {
            headers.extend([
                "Video uploads in last 30 days",
                "Total Views in Last 30 Days",
                "Views Per Sub",
            ]);
        }
        headers.extend(["Country", "Channel Creation Date", "Channel Age (Months)"]);
        headers
    }

    fn fields(&self) -> Vec<String> {
        let mut fields = vec![
            self.name.clone(),
            self.link.clone(),
            self.tags.clone(),
            self.description.clone(),
            self.subscribers.to_string(),
            self.total_views.to_string(),
            self.total_videos.to_string(),
        ];
        if let Some(recent) = &self.recent {
            fields.push(recent.uploads_30d.to_string());
            fields.push(recent.views_30d.to_string());
            fields.push(recent.views_per_subscriber.to_string());
        }
        fields.push(self.country.clone());
        fields.push(self.creation_date.clone());
        fields.push(self.age_months.to_string());
        fields
    }
}

impl CsvRecord for VideoRecord {
    fn headers(&self) -> Vec<&'static str> {
        vec![
            "Channel Name",
            "Channel Subscribers",
            "Channel Total Videos",
            "Channel Views (Last 30 Days)",
            "Video Rank",
            "Title",
            "Views",
            "Views Per Hour",
            "Published At",
            "Published Month",
            "Video Age (Days)",
            "Tags",
            "Video Description",
            "Video Link",
            "Duration (Minutes)",
            "Thumbnail Link",
        ]
    }

    fn fields(&self) -> Vec<String> {
        vec![
            self.channel_name.clone(),
            self.channel_subscribers.to_string(),
            self.channel_total_videos.to_string(),
            self.channel_views_30d.to_string(),
            self.rank.clone(),
            self.title.clone(),
            self.views.to_string(),
            self.views_per_hour.to_string(),
            self.published_at.clone(),
            self.published_month.to_string(),
            self.age_days.to_string(),
            self.tags.clone(),
            self.description.clone(),
            self.link.clone(),
            self.duration_minutes.to_string(),
            self.thumbnail.clone(),
        ]
    }
}
