//! Composite analyses
//!
//! The two operations a transport calls with raw export bytes: parse, guard
//! against an empty export, then assemble the summary text and chart set.
//! Parsing errors abort the whole analysis; a zero-day span only drops the
//! rate line from the summary.

use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analytics::charts;
use crate::analytics::summary::Summary;
use crate::error::Result;
use crate::history::{parse_search_history, parse_watch_history};
use crate::types::ChartSpec;

/// Table sizes for the ranked charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisOptions {
    /// Creators to keep in the watch-history ranking
    pub top_creators: usize,
    /// Words to keep in the search-history ranking
    pub top_search_words: usize,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            top_creators: 10,
            top_search_words: 24,
        }
    }
}

/// One finished analysis: a text block plus the charts to render after it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Human-readable overview, sent before any chart
    pub summary_text: String,
    /// Charts in presentation order
    pub charts: Vec<ChartSpec>,
}

impl AnalysisReport {
    /// A chartless report for an export that parsed fine but holds nothing.
    fn empty(message: &str) -> Self {
        Self {
            summary_text: message.to_string(),
            charts: Vec::new(),
        }
    }
}

/// Analyzes a `watch-history.json` export.
///
/// Returns the summary plus, in presentation order, the creator ranking,
/// the weekly timeline, and the month/weekday/hour histograms.
pub fn analyze_watch_history(
    raw: &[u8],
    tz: Tz,
    options: &AnalysisOptions,
) -> Result<AnalysisReport> {
    let records = parse_watch_history(raw, tz)?;
    let times: Vec<DateTime<Tz>> = records.iter().map(|r| r.time).collect();
    let Some(summary) = Summary::compute(&times) else {
        return Ok(AnalysisReport::empty(
            "No watched videos found in this export.",
        ));
    };

    let charts = vec![
        charts::top_creators(&records, options.top_creators),
        charts::watch_timeline(&records),
        charts::watched_per_month(&records),
        charts::watched_per_weekday(&records),
        charts::watched_per_hour(&records),
    ];
    debug!(
        "analyzed {} watch records into {} charts",
        records.len(),
        charts.len()
    );

    Ok(AnalysisReport {
        summary_text: summary_text(&summary, "Videos watched", "videos"),
        charts,
    })
}

/// Analyzes a `search-history.json` export.
///
/// Returns the summary plus the search-word ranking and the weekly timeline.
pub fn analyze_search_history(
    raw: &[u8],
    tz: Tz,
    options: &AnalysisOptions,
) -> Result<AnalysisReport> {
    let records = parse_search_history(raw, tz)?;
    let times: Vec<DateTime<Tz>> = records.iter().map(|r| r.time).collect();
    let Some(summary) = Summary::compute(&times) else {
        return Ok(AnalysisReport::empty("No searches found in this export."));
    };

    let charts = vec![
        charts::top_search_words(&records, options.top_search_words),
        charts::search_timeline(&records),
    ];
    debug!(
        "analyzed {} search records into {} charts",
        records.len(),
        charts.len()
    );

    Ok(AnalysisReport {
        summary_text: summary_text(&summary, "Searches", "searches"),
        charts,
    })
}

/// "<noun> since <date>: <count>", plus the per-day average when the span
/// allows one. A zero-day span omits the rate line instead of failing.
fn summary_text(summary: &Summary, since_noun: &str, rate_noun: &str) -> String {
    let mut text = format!(
        "{} since {}: {}",
        since_noun,
        summary.start_date(),
        summary.count
    );
    if let Ok(rate) = summary.rate_per_day() {
        text.push_str(&format!("\nAverage {} per day: {:.2}", rate_noun, rate));
    }
    text
}
