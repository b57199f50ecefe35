//! Watch-history loader
//!
//! The export is a JSON list of watched-video events. Each entry carries a
//! `title`, an RFC 3339 `time`, and usually a `subtitles` list whose first
//! entry names the channel. Events for removed or private videos ship
//! without `subtitles`; those map to [`UNKNOWN_CHANNEL`].

use chrono_tz::Tz;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::{WatchRecord, UNKNOWN_CHANNEL};

use super::localize;

/// One entry of `watch-history.json`, as exported.
///
/// Unrecognized fields (`titleUrl`, `products`, `activityControls`, ...) are
/// ignored. `subtitles` stays a raw [`Value`] because exports carry it as a
/// list, omit it entirely, or null it out.
#[derive(Debug, Deserialize)]
struct RawWatchEvent {
    title: String,
    time: String,
    #[serde(default)]
    subtitles: Value,
}

/// Parses a `watch-history.json` document into normalized records.
///
/// Strict: any malformed entry fails the whole parse. An empty list is
/// valid and yields an empty vec. Input order is preserved.
pub fn parse_watch_history(data: &[u8], tz: Tz) -> Result<Vec<WatchRecord>> {
    let raw: Vec<RawWatchEvent> =
        serde_json::from_slice(data).map_err(|e| Error::MalformedInput(e.to_string()))?;

    let mut records = Vec::with_capacity(raw.len());
    for event in &raw {
        records.push(WatchRecord {
            title: event.title.clone(),
            channel: channel_name(&event.subtitles)?,
            time: localize(&event.time, tz)?,
        });
    }

    debug!("parsed {} watch events", records.len());
    Ok(records)
}

/// Resolves the channel name from a raw `subtitles` value.
///
/// Absent, null, non-list, or empty-list values all mean the export has no
/// channel for this event. A non-empty list whose first entry lacks a string
/// `name` is malformed.
fn channel_name(subtitles: &Value) -> Result<String> {
    match subtitles.as_array().and_then(|entries| entries.first()) {
        Some(first) => first
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| Error::MalformedInput("subtitle entry without a name".to_string())),
        None => Ok(UNKNOWN_CHANNEL.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parse_basic_events() {
        let data = br#"[
            {
                "title": "Watched Building a ray tracer in one weekend",
                "subtitles": [{"name": "Code Cellar", "url": "https://example.com/c/1"}],
                "time": "2024-01-01T08:00:00Z"
            },
            {
                "title": "Watched a video that has been removed",
                "time": "2024-01-02T10:30:00Z"
            }
        ]"#;

        let records = parse_watch_history(data, Tz::UTC).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].channel, "Code Cellar");
        assert_eq!(records[0].time.hour(), 8);
        assert_eq!(records[1].channel, UNKNOWN_CHANNEL);
    }

    #[test]
    fn test_parse_localizes_timestamps() {
        let data = br#"[
            {
                "title": "Watched Late night jazz",
                "subtitles": [{"name": "Analog Kitchen"}],
                "time": "2024-06-01T22:30:00Z"
            }
        ]"#;

        let tz: Tz = "Europe/Vienna".parse().unwrap();
        let records = parse_watch_history(data, tz).unwrap();
        // UTC+2 in summer: 22:30 UTC is already the next local day
        assert_eq!(records[0].time.hour(), 0);
    }

    #[test]
    fn test_empty_subtitle_list_means_unknown() {
        let data = br#"[
            {"title": "Watched something", "subtitles": [], "time": "2024-01-01T08:00:00Z"}
        ]"#;

        let records = parse_watch_history(data, Tz::UTC).unwrap();
        assert_eq!(records[0].channel, UNKNOWN_CHANNEL);
    }

    #[test]
    fn test_null_subtitles_means_unknown() {
        let data = br#"[
            {"title": "Watched something", "subtitles": null, "time": "2024-01-01T08:00:00Z"}
        ]"#;

        let records = parse_watch_history(data, Tz::UTC).unwrap();
        assert_eq!(records[0].channel, UNKNOWN_CHANNEL);
    }

    #[test]
    fn test_subtitle_entry_without_name_is_malformed() {
        let data = br#"[
            {"title": "Watched something", "subtitles": [{"url": "https://example.com"}], "time": "2024-01-01T08:00:00Z"}
        ]"#;

        let err = parse_watch_history(data, Tz::UTC).unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));
    }

    #[test]
    fn test_missing_time_fails_whole_parse() {
        let data = br#"[
            {"title": "Watched a", "subtitles": [{"name": "A"}], "time": "2024-01-01T08:00:00Z"},
            {"title": "Watched b", "subtitles": [{"name": "B"}]}
        ]"#;

        let err = parse_watch_history(data, Tz::UTC).unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));
    }

    #[test]
    fn test_bad_timestamp_fails_whole_parse() {
        let data = br#"[
            {"title": "Watched a", "subtitles": [{"name": "A"}], "time": "last tuesday"}
        ]"#;

        let err = parse_watch_history(data, Tz::UTC).unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));
    }

    #[test]
    fn test_document_must_be_a_list() {
        let err = parse_watch_history(br#"{"title": "not a list"}"#, Tz::UTC).unwrap_err();
        assert!(matches!(err, Error::MalformedInput(_)));
    }

    #[test]
    fn test_empty_list_is_valid() {
        let records = parse_watch_history(b"[]", Tz::UTC).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_input_order_preserved() {
        let data = br#"[
            {"title": "Watched c", "subtitles": [{"name": "C"}], "time": "2024-03-01T08:00:00Z"},
            {"title": "Watched a", "subtitles": [{"name": "A"}], "time": "2024-01-01T08:00:00Z"},
            {"title": "Watched b", "subtitles": [{"name": "B"}], "time": "2024-02-01T08:00:00Z"}
        ]"#;

        let records = parse_watch_history(data, Tz::UTC).unwrap();
        let channels: Vec<&str> = records.iter().map(|r| r.channel.as_str()).collect();
        assert_eq!(channels, vec!["C", "A", "B"]);
    }
}
