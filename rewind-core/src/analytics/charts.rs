//! Chart specifications
//!
//! Builders that pair the aggregation output with the titles and axis labels
//! the renderer should draw. Nothing here rasterizes anything; a [`ChartSpec`]
//! is data, and image formats stay the transport's problem.

use crate::analytics::{frequency, histogram};
use crate::types::{ChartKind, ChartSpec, SearchRecord, WatchRecord, UNKNOWN_CHANNEL};

/// The `n` most-watched creators, as a horizontal bar chart.
///
/// Exports without a channel count as nobody: a history of removed videos
/// produces an empty chart rather than one tall "unknown" bar.
pub fn top_creators(records: &[WatchRecord], n: usize) -> ChartSpec {
    let data = frequency::top_entities(
        records.iter().map(|r| r.channel.as_str()),
        n,
        &[UNKNOWN_CHANNEL],
    );
    ChartSpec {
        kind: ChartKind::HorizontalBar,
        title: format!("Top {} creators", n),
        x_label: "videos watched".to_string(),
        y_label: String::new(),
        data,
    }
}

/// Videos watched per week, as a line over the observed range.
pub fn watch_timeline(records: &[WatchRecord]) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Line,
        title: "Video Timeline".to_string(),
        x_label: String::new(),
        y_label: "videos watched per week".to_string(),
        data: histogram::weekly_timeline(records.iter().map(|r| r.time)),
    }
}

/// Videos watched per month, Jan..Dec.
pub fn watched_per_month(records: &[WatchRecord]) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Bar,
        title: "Videos watched per month".to_string(),
        x_label: String::new(),
        y_label: String::new(),
        data: histogram::month_of_year(records.iter().map(|r| r.time)),
    }
}

/// Videos watched per weekday, Mon..Sun.
pub fn watched_per_weekday(records: &[WatchRecord]) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Bar,
        title: "Videos watched per weekday".to_string(),
        x_label: String::new(),
        y_label: String::new(),
        data: histogram::day_of_week(records.iter().map(|r| r.time)),
    }
}

/// Videos watched per hour of day, 00:00..23:00.
pub fn watched_per_hour(records: &[WatchRecord]) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Bar,
        title: "Videos watched per hour".to_string(),
        x_label: String::new(),
        y_label: String::new(),
        data: histogram::hour_of_day(records.iter().map(|r| r.time)),
    }
}

/// The `n` most-searched words, as a horizontal bar chart.
pub fn top_search_words(records: &[SearchRecord], n: usize) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::HorizontalBar,
        title: format!("Top {} searchwords", n),
        x_label: String::new(),
        y_label: String::new(),
        data: frequency::top_words(records.iter().map(|r| r.title.as_str()), n),
    }
}

/// Searches per week, as a line over the observed range.
pub fn search_timeline(records: &[SearchRecord]) -> ChartSpec {
    ChartSpec {
        kind: ChartKind::Line,
        title: "Searches Timeline".to_string(),
        x_label: String::new(),
        y_label: "Searches per week".to_string(),
        data: histogram::weekly_timeline(records.iter().map(|r| r.time)),
    }
}
