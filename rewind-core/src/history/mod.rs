//! History loaders
//!
//! Parse the two export files into normalized records:
//!
//! - `watch-history.json` → [`WatchRecord`] via [`watch::parse_watch_history`]
//! - `search-history.json` → [`SearchRecord`] via [`search::parse_search_history`]
//!
//! Both loaders are strict: a document that is not a JSON list, an entry
//! missing a required field, or an unparseable timestamp fails the whole
//! parse with [`Error::MalformedInput`](crate::Error::MalformedInput).
//! An empty list is valid input and yields an empty vec. Input order is
//! preserved so tie-breaking downstream stays deterministic.

pub mod search;
pub mod watch;

pub use search::parse_search_history;
pub use watch::parse_watch_history;

use chrono::DateTime;
use chrono_tz::Tz;

use crate::error::{Error, Result};

/// Parses an RFC 3339 timestamp and converts it into the user's timezone.
///
/// The instant is unchanged; only the wall-clock representation moves.
fn localize(raw: &str, tz: Tz) -> Result<DateTime<Tz>> {
    let parsed = DateTime::parse_from_rfc3339(raw)
        .map_err(|e| Error::MalformedInput(format!("bad timestamp {:?}: {}", raw, e)))?;
    Ok(parsed.with_timezone(&tz))
}
