//! Summary statistics
//!
//! Count, observed span, average rate, and start date for a record set.
//! These are the numbers behind the text block that precedes the charts.

use chrono::DateTime;
use chrono_tz::Tz;

use crate::error::{Error, Result};

/// Summary statistics over a non-empty set of timestamps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// Number of records
    pub count: i64,
    /// Whole days between the earliest and latest record, rounded down
    pub span_days: i64,
    /// Earliest record, in the user's timezone
    pub first: DateTime<Tz>,
}

impl Summary {
    /// Computes summary statistics, or `None` when there is nothing to
    /// summarize.
    ///
    /// Timestamps need not be sorted; the earliest and latest are found by
    /// scan. The span rounds down to whole days, so records within the same
    /// 24 hours span zero days.
    pub fn compute(times: &[DateTime<Tz>]) -> Option<Summary> {
        let first = times.iter().min().copied()?;
        let last = times.iter().max().copied()?;
        Some(Summary {
            count: times.len() as i64,
            span_days: last.signed_duration_since(first).num_days(),
            first,
        })
    }

    /// Average records per day over the observed span.
    ///
    /// Undefined when the span is zero days; the caller is expected to drop
    /// the rate line from its output rather than fail the analysis.
    pub fn rate_per_day(&self) -> Result<f64> {
        if self.span_days == 0 {
            return Err(Error::DivisionUndefined);
        }
        Ok(self.count as f64 / self.span_days as f64)
    }

    /// The earliest record's date, formatted like "Jan 05 2024".
    pub fn start_date(&self) -> String {
        self.first.format("%b %d %Y").to_string()
    }
}
