//! Core domain types for rewind
//!
//! These types represent the normalized data model shared by the history
//! loaders, the analytics engine, and the settings store.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **WatchRecord** | One watched video: title, channel, localized timestamp |
//! | **SearchRecord** | One search: query title, localized timestamp |
//! | **Bucket** | A fixed or derived time interval grouping records for a histogram |
//! | **FrequencyTable** | Ranked `(label, count)` rows, truncated and exclusion-filtered |
//! | **ChartSpec** | Abstract renderable chart description; rendering is the transport's job |
//! | **User** | One settings row in the store, keyed by the chat platform's numeric id |
//!
//! Timestamps are instants converted into the user's timezone
//! ([`chrono_tz::Tz`]), not merely labeled with it: hour-of-day and day-of-week
//! derived downstream reflect local wall-clock time.

use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Placeholder channel for watch events whose export carries no subtitle.
///
/// Excluded from creator rankings; a ranking over placeholder-only data is
/// empty rather than a bar full of "unknown".
pub const UNKNOWN_CHANNEL: &str = "unknown";

// ============================================
// History records
// ============================================

/// A single watched-video event from the watch-history export.
///
/// Immutable once created; lives for one analysis request.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchRecord {
    /// Video title as exported (typically prefixed "Watched ...")
    pub title: String,
    /// Channel name, or [`UNKNOWN_CHANNEL`] when the export omits it
    pub channel: String,
    /// When the video was watched, in the user's timezone
    pub time: DateTime<Tz>,
}

/// A single search event from the search-history export.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRecord {
    /// Search text as exported (typically prefixed "Searched for ...")
    pub title: String,
    /// When the search happened, in the user's timezone
    pub time: DateTime<Tz>,
}

// ============================================
// Aggregate views
// ============================================

/// Ranked `(label, count)` rows, least first.
///
/// Produced by the frequency functions in [`crate::analytics::frequency`]:
/// ranked descending, truncated to N, then flipped ascending for renderers
/// that draw horizontal bars bottom-up.
pub type FrequencyTable = Vec<(String, i64)>;

/// Ordered `(bucket label, count)` rows.
///
/// Fixed-cardinality views (hour, weekday, month) always carry their complete
/// label set with zeros where nothing was observed; the weekly timeline only
/// spans first..=last observed week.
pub type TimeBucketHistogram = Vec<(String, i64)>;

// ============================================
// Chart specifications
// ============================================

/// How a chart should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ChartKind {
    /// Vertical bars, one per bucket
    Bar,
    /// Horizontal bars, drawn bottom-up from least to most
    HorizontalBar,
    /// A line over ordered buckets
    Line,
}

impl ChartKind {
    /// Returns the identifier used on the wire and in storage
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Bar => "bar",
            ChartKind::HorizontalBar => "horizontal-bar",
            ChartKind::Line => "line",
        }
    }
}

impl std::fmt::Display for ChartKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An abstract renderable chart.
///
/// The core never touches pixel buffers; the transport renders these however
/// it likes (image, terminal bars, a table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    /// How to draw it
    pub kind: ChartKind,
    /// Chart title
    pub title: String,
    /// X axis label; empty when the axis needs none
    pub x_label: String,
    /// Y axis label; empty when the axis needs none
    pub y_label: String,
    /// Ordered `(label, value)` pairs
    pub data: Vec<(String, i64)>,
}

// ============================================
// Settings store
// ============================================

/// Chat-side state for a user.
///
/// A tiny two-state machine owned by the settings store:
/// idle → awaiting-timezone (on command) → idle (on valid timezone text),
/// unchanged on invalid text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserState {
    /// Ready for uploads and commands
    Idle,
    /// The next message text is interpreted as a timezone name
    AwaitingTimezone,
}

impl UserState {
    /// Returns the identifier used in database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            UserState::Idle => "idle",
            UserState::AwaitingTimezone => "awaiting_timezone",
        }
    }
}

impl std::fmt::Display for UserState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for UserState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "idle" => Ok(UserState::Idle),
            "awaiting_timezone" => Ok(UserState::AwaitingTimezone),
            _ => Err(format!("unknown user state: {}", s)),
        }
    }
}

/// One row of the settings store.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Numeric identifier assigned by the chat platform
    pub id: i64,
    /// Current chat-side state
    pub state: UserState,
    /// IANA timezone name used to localize this user's exports
    pub timezone: String,
    /// Completed analyses, incremented after each successful run
    pub analyses: i64,
}

impl User {
    /// A fresh settings row: idle, UTC, no completed analyses.
    pub fn new(id: i64) -> Self {
        Self {
            id,
            state: UserState::Idle,
            timezone: "UTC".to_string(),
            analyses: 0,
        }
    }
}

/// Service-wide usage counters.
///
/// The only cross-user aggregation the store performs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UsageStats {
    /// Number of known users
    pub users: i64,
    /// Total completed analyses across all users
    pub analyses: i64,
}
