//! Analytics engine
//!
//! Descriptive statistics over normalized history records. Everything here
//! is pure: same input, same output, no shared mutable state, so concurrent
//! analyses for different users need no locks.
//!
//! - [`summary`] — count, span, rate per day, start date
//! - [`frequency`] — ranked creator and search-word tables
//! - [`histogram`] — hour/weekday/month buckets and the weekly timeline
//! - [`charts`] — chart specifications built from the above
//! - [`report`] — the composite analyses the transport calls

pub mod charts;
pub mod frequency;
pub mod histogram;
pub mod report;
pub mod summary;

pub use report::{analyze_search_history, analyze_watch_history, AnalysisOptions, AnalysisReport};
pub use summary::Summary;
