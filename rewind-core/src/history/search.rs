//! Search-history loader
//!
//! The export is a JSON list of search events. Each entry carries a `title`
//! (the query, prefixed "Searched for ...") and an RFC 3339 `time`. No
//! channel here, so the record is just text plus a localized timestamp.

use chrono_tz::Tz;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::types::SearchRecord;

use super::localize;

/// One entry of `search-history.json`, as exported.
#[derive(Debug, Deserialize)]
struct RawSearchEvent {
    title: String,
    time: String,
}

/// Parses a `search-history.json` document into normalized records.
///
/// Strict: any malformed entry fails the whole parse. An empty list is
/// valid and yields an empty vec. Input order is preserved.
pub fn parse_search_history(data: &[u8], tz: Tz) -> Result<Vec<SearchRecord>> {
    let raw: Vec<RawSearchEvent> =
        serde_json::from_slice(data).map_err(|e| Error::MalformedInput(e.to_string()))?;

    let mut records = Vec::with_capacity(raw.len());
    for event in &raw {
        records.push(SearchRecord {
            title: event.title.clone(),
            time: localize(&event.time, tz)?,
        });
    }

    debug!("parsed {} search events", records.len());
    Ok(records)
}
