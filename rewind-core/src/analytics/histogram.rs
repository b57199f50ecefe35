//! Time-bucket histograms
//!
//! Fixed-cardinality views (hour of day, weekday, month) always return their
//! full label set, zero-filled. The weekly timeline is data-driven: buckets
//! run from the first observed week to the last, with interior gaps filled
//! with zero and nothing synthesized outside that range.
//!
//! All bucketing happens on the already-localized timestamps, so an evening
//! watch in Vienna lands in Vienna's evening, not UTC's.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike};
use chrono_tz::Tz;

use crate::types::TimeBucketHistogram;

const WEEKDAYS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Counts per hour of day, 24 buckets labeled "00:00".."23:00".
pub fn hour_of_day<I>(times: I) -> TimeBucketHistogram
where
    I: IntoIterator<Item = DateTime<Tz>>,
{
    let mut buckets = [0i64; 24];
    for t in times {
        buckets[t.hour() as usize] += 1;
    }
    buckets
        .iter()
        .enumerate()
        .map(|(hour, &count)| (format!("{:02}:00", hour), count))
        .collect()
}

/// Counts per weekday, 7 buckets labeled Mon..Sun.
pub fn day_of_week<I>(times: I) -> TimeBucketHistogram
where
    I: IntoIterator<Item = DateTime<Tz>>,
{
    let mut buckets = [0i64; 7];
    for t in times {
        buckets[t.weekday().num_days_from_monday() as usize] += 1;
    }
    WEEKDAYS
        .iter()
        .zip(buckets)
        .map(|(label, count)| (label.to_string(), count))
        .collect()
}

/// Counts per month, 12 buckets labeled Jan..Dec.
pub fn month_of_year<I>(times: I) -> TimeBucketHistogram
where
    I: IntoIterator<Item = DateTime<Tz>>,
{
    let mut buckets = [0i64; 12];
    for t in times {
        buckets[t.month0() as usize] += 1;
    }
    MONTHS
        .iter()
        .zip(buckets)
        .map(|(label, count)| (label.to_string(), count))
        .collect()
}

/// Counts per calendar week, each bucket labeled with its ending Sunday as
/// "YYYY-MM-DD".
///
/// Buckets span first observed week to last; interior gaps appear with count
/// zero, and empty input yields an empty histogram.
pub fn weekly_timeline<I>(times: I) -> TimeBucketHistogram
where
    I: IntoIterator<Item = DateTime<Tz>>,
{
    let mut counts: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    for t in times {
        *counts.entry(week_ending(t.date_naive())).or_insert(0) += 1;
    }

    let (first, last) = match (counts.keys().next(), counts.keys().next_back()) {
        (Some(&first), Some(&last)) => (first, last),
        _ => return Vec::new(),
    };

    let mut timeline = Vec::new();
    let mut week = first;
    while week <= last {
        let count = counts.get(&week).copied().unwrap_or(0);
        timeline.push((week.format("%Y-%m-%d").to_string(), count));
        week = week + Duration::days(7);
    }
    timeline
}

/// The Sunday that closes this date's week. A Sunday maps to itself.
fn week_ending(date: NaiveDate) -> NaiveDate {
    date + Duration::days(6 - date.weekday().num_days_from_monday() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Tz> {
        Tz::UTC.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_hour_of_day_localized() {
        let tz: Tz = "Europe/Vienna".parse().unwrap();
        // 08:00 UTC is 09:00 in Vienna during winter
        let times: Vec<DateTime<Tz>> = [
            utc(2024, 1, 1, 8),
            utc(2024, 1, 1, 8),
            utc(2024, 1, 1, 19),
        ]
        .iter()
        .map(|t| t.with_timezone(&tz))
        .collect();

        let hist = hour_of_day(times);
        assert_eq!(hist.len(), 24);
        assert_eq!(hist[9], ("09:00".to_string(), 2));
        assert_eq!(hist[20], ("20:00".to_string(), 1));
        let total: i64 = hist.iter().map(|(_, c)| c).sum();
        assert_eq!(total, 3);
    }

    #[test]
    fn test_fixed_buckets_on_empty_input() {
        assert_eq!(hour_of_day(Vec::new()).len(), 24);
        assert_eq!(day_of_week(Vec::new()).len(), 7);
        assert_eq!(month_of_year(Vec::new()).len(), 12);
        assert!(hour_of_day(Vec::new()).iter().all(|(_, c)| *c == 0));
    }

    #[test]
    fn test_day_of_week_labels() {
        // 2024-01-01 is a Monday, 2024-01-07 a Sunday
        let times = vec![utc(2024, 1, 1, 12), utc(2024, 1, 7, 12), utc(2024, 1, 8, 12)];
        let hist = day_of_week(times);
        assert_eq!(hist[0], ("Mon".to_string(), 2));
        assert_eq!(hist[6], ("Sun".to_string(), 1));
    }

    #[test]
    fn test_month_of_year_labels() {
        let times = vec![utc(2024, 1, 5, 12), utc(2024, 2, 2, 12), utc(2024, 12, 31, 12)];
        let hist = month_of_year(times);
        assert_eq!(hist[0], ("Jan".to_string(), 1));
        assert_eq!(hist[1], ("Feb".to_string(), 1));
        assert_eq!(hist[11], ("Dec".to_string(), 1));
        assert_eq!(hist[5], ("Jun".to_string(), 0));
    }

    #[test]
    fn test_weekly_timeline_fills_gaps() {
        // week ending 2024-01-07 and week ending 2024-01-21, nothing between
        let times = vec![utc(2024, 1, 1, 12), utc(2024, 1, 21, 12)];
        let hist = weekly_timeline(times);
        assert_eq!(
            hist,
            vec![
                ("2024-01-07".to_string(), 1),
                ("2024-01-14".to_string(), 0),
                ("2024-01-21".to_string(), 1),
            ]
        );
    }

    #[test]
    fn test_weekly_timeline_sunday_belongs_to_its_own_week() {
        let times = vec![utc(2024, 1, 7, 23)];
        let hist = weekly_timeline(times);
        assert_eq!(hist, vec![("2024-01-07".to_string(), 1)]);
    }

    #[test]
    fn test_weekly_timeline_empty() {
        assert!(weekly_timeline(Vec::new()).is_empty());
    }
}
