//! # rewind-core
//!
//! Core library for rewind - a chat assistant that turns exported viewing
//! and search history into descriptive statistics and charts.
//!
//! This library provides:
//! - History loaders for the two JSON export shapes
//! - An analytics engine producing summaries and chart specifications
//! - A per-user settings store with SQLite
//! - Configuration management
//! - Logging infrastructure
//!
//! ## Architecture
//!
//! An analysis is a pure pipeline: raw export bytes plus a timezone go in,
//! a summary text and a list of renderable [`ChartSpec`]s come out. The
//! settings store sits beside the pipeline and only supplies the timezone
//! and keeps usage counters; rendering is entirely the transport's job.
//!
//! ## Example
//!
//! ```rust,no_run
//! use rewind_core::analytics::{analyze_watch_history, AnalysisOptions};
//! use rewind_core::{Config, Database};
//!
//! // Load configuration
//! let config = Config::load().expect("failed to load config");
//!
//! // Open the settings store
//! let db = Database::open(&config.database_path()).expect("failed to open database");
//! db.migrate().expect("failed to run migrations");
//!
//! // Analyze an export with the user's timezone
//! let raw = std::fs::read("watch-history.json").expect("failed to read export");
//! let tz = db.get_timezone(42).expect("failed to load timezone").parse().unwrap();
//! let report = analyze_watch_history(&raw, tz, &AnalysisOptions::default())
//!     .expect("failed to analyze export");
//! println!("{}", report.summary_text);
//! ```

// Re-export commonly used items at the crate root
pub use analytics::{AnalysisOptions, AnalysisReport};
pub use config::Config;
pub use db::Database;
pub use error::{Error, Result};
pub use types::*;

// Public modules
pub mod analytics;
pub mod config;
pub mod db;
pub mod error;
pub mod history;
pub mod logging;
pub mod types;
