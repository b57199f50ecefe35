//! rewind - personal history insights CLI
//!
//! Runs exported history files through the same engine a chat transport
//! would call, and renders the resulting charts in the terminal.

use anyhow::{Context, Result};
use chrono_tz::Tz;
use clap::{Parser, Subcommand, ValueEnum};
use rewind_core::analytics::{analyze_search_history, analyze_watch_history, AnalysisOptions};
use rewind_core::{AnalysisReport, ChartSpec, Config, Database, Error};
use std::path::{Path, PathBuf};

/// Widest bar drawn in terminal output, in cells
const MAX_BAR_WIDTH: usize = 40;

#[derive(Parser, Debug)]
#[command(name = "rewind")]
#[command(about = "Personal history insights from your data export")]
#[command(version)]
struct Args {
    /// User id whose stored settings to use (a chat transport supplies its own)
    #[arg(long, default_value_t = 0, global = true)]
    user: i64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze an exported history file
    Analyze {
        /// Path to watch-history.json or search-history.json
        file: PathBuf,

        /// History kind (default: inferred from the file name)
        #[arg(long, value_enum)]
        kind: Option<HistoryKind>,

        /// Timezone override for this run (e.g. Europe/Vienna)
        #[arg(long)]
        timezone: Option<String>,

        /// Creators to rank (default: from config)
        #[arg(long)]
        top_creators: Option<usize>,

        /// Search words to rank (default: from config)
        #[arg(long)]
        top_words: Option<usize>,

        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Terminal)]
        format: Format,
    },
    /// Set the stored timezone
    Timezone {
        /// IANA timezone name (e.g. Europe/Vienna)
        name: String,
    },
    /// Show the stored settings for this user
    Info,
    /// Show service-wide usage counters
    Stats,
}

/// Which of the two export shapes a file holds
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum HistoryKind {
    Watch,
    Search,
}

/// Output format
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Terminal,
    Markdown,
    Json,
}

fn main() -> Result<()> {
    let args = Args::parse();

    Config::ensure_xdg_env();
    let config = Config::load().context("failed to load configuration")?;
    let _log_guard = rewind_core::logging::init(&config.logging).ok();

    let db = Database::open(&config.database_path()).context("failed to open database")?;
    db.migrate().context("failed to run migrations")?;

    match args.command {
        Command::Analyze {
            file,
            kind,
            timezone,
            top_creators,
            top_words,
            format,
        } => {
            let mut options = config.analysis.options();
            if let Some(n) = top_creators {
                options.top_creators = n;
            }
            if let Some(n) = top_words {
                options.top_search_words = n;
            }
            analyze(
                &db,
                args.user,
                &file,
                kind,
                timezone.as_deref(),
                &options,
                format,
            )
        }
        Command::Timezone { name } => set_timezone(&db, args.user, &name),
        Command::Info => info(&db, args.user),
        Command::Stats => stats(&db),
    }
}

fn analyze(
    db: &Database,
    user: i64,
    file: &Path,
    kind: Option<HistoryKind>,
    timezone: Option<&str>,
    options: &AnalysisOptions,
    format: Format,
) -> Result<()> {
    let kind = match kind {
        Some(kind) => kind,
        None => infer_kind(file)?,
    };

    let tz: Tz = match timezone {
        Some(name) => name
            .parse()
            .map_err(|_| anyhow::anyhow!("unknown timezone: {}", name))?,
        None => db.get_timezone(user)?.parse().map_err(|_| {
            anyhow::anyhow!("stored timezone is unusable; set a new one with `rewind timezone`")
        })?,
    };

    let raw =
        std::fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;

    let report = match kind {
        HistoryKind::Watch => analyze_watch_history(&raw, tz, options),
        HistoryKind::Search => analyze_search_history(&raw, tz, options),
    }
    .context("could not parse file")?;

    match format {
        Format::Terminal => print_terminal(&report),
        Format::Markdown => print_markdown(&report),
        Format::Json => print_json(&report)?,
    }

    db.record_analysis_completed(user)?;
    Ok(())
}

/// Route by file name the way the chat transport routes uploads
fn infer_kind(file: &Path) -> Result<HistoryKind> {
    match file.file_name().and_then(|n| n.to_str()) {
        Some("watch-history.json") => Ok(HistoryKind::Watch),
        Some("search-history.json") => Ok(HistoryKind::Search),
        _ => anyhow::bail!(
            "cannot tell the history kind from {}; pass --kind watch or --kind search",
            file.display()
        ),
    }
}

fn set_timezone(db: &Database, user: i64, name: &str) -> Result<()> {
    // Walk the same two states a chat user walks through
    db.begin_timezone_change(user)?;
    match db.submit_timezone(user, name) {
        Ok(()) => {
            println!("Timezone set to {}.", name);
            Ok(())
        }
        Err(Error::Timezone(_)) => anyhow::bail!(
            "unknown timezone {:?}; use an IANA name like Europe/Vienna",
            name
        ),
        Err(e) => Err(e.into()),
    }
}

fn info(db: &Database, user: i64) -> Result<()> {
    let user = db.load_user(user)?;
    println!("State:    {}", user.state);
    println!("Timezone: {}", user.timezone);
    println!("Analyses: {}", user.analyses);
    Ok(())
}

fn stats(db: &Database) -> Result<()> {
    let stats = db.statistics()?;
    println!("Users:    {}", stats.users);
    println!("Analyses: {}", stats.analyses);
    Ok(())
}

// ============================================
// Rendering
// ============================================

fn print_terminal(report: &AnalysisReport) {
    println!();
    println!("{}", report.summary_text);
    println!();

    for chart in &report.charts {
        print_chart(chart);
    }
}

fn print_chart(chart: &ChartSpec) {
    println!("{}", chart.title);
    println!("{}", "─".repeat(chart.title.chars().count()));

    if chart.data.is_empty() {
        println!("  (no data)");
        println!();
        return;
    }

    let label_width = chart
        .data
        .iter()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);
    let peak = chart.data.iter().map(|(_, value)| *value).max().unwrap_or(0);

    for (label, value) in &chart.data {
        println!(
            "  {:<label_width$}  {:>6}  {}",
            label,
            value,
            bar(*value, peak)
        );
    }

    let axis = if !chart.x_label.is_empty() {
        &chart.x_label
    } else {
        &chart.y_label
    };
    if !axis.is_empty() {
        println!("  ({})", axis);
    }
    println!();
}

/// A bar proportional to the chart's peak; any nonzero value gets a cell
fn bar(value: i64, peak: i64) -> String {
    if value <= 0 || peak <= 0 {
        return String::new();
    }
    let width = ((value as f64 / peak as f64) * MAX_BAR_WIDTH as f64).round() as usize;
    "█".repeat(width.max(1))
}

fn print_markdown(report: &AnalysisReport) {
    println!("{}", report.summary_text);
    println!();

    for chart in &report.charts {
        println!("## {}", chart.title);
        println!();

        if chart.data.is_empty() {
            println!("*No data.*");
            println!();
            continue;
        }

        let value_heading = if !chart.x_label.is_empty() {
            chart.x_label.as_str()
        } else if !chart.y_label.is_empty() {
            chart.y_label.as_str()
        } else {
            "count"
        };
        println!("| Label | {} |", value_heading);
        println!("|-------|-------|");
        for (label, value) in &chart.data {
            println!("| {} | {} |", label, value);
        }
        println!();
    }
}

fn print_json(report: &AnalysisReport) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_infer_kind_from_export_names() {
        let kind = infer_kind(Path::new("/tmp/export/watch-history.json")).unwrap();
        assert_eq!(kind, HistoryKind::Watch);
        let kind = infer_kind(Path::new("search-history.json")).unwrap();
        assert_eq!(kind, HistoryKind::Search);
        assert!(infer_kind(Path::new("my-history.json")).is_err());
    }

    #[test]
    fn test_bar_scales_to_peak() {
        assert_eq!(bar(10, 10).chars().count(), MAX_BAR_WIDTH);
        assert_eq!(bar(5, 10).chars().count(), MAX_BAR_WIDTH / 2);
        assert_eq!(bar(0, 10), "");
    }

    #[test]
    fn test_bar_keeps_small_values_visible() {
        assert_eq!(bar(1, 1000).chars().count(), 1);
    }
}
