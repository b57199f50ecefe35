//! Ranked frequency tables
//!
//! Counting with deterministic tie-breaking: values are counted in first-seen
//! order, sorted descending by count with a stable sort, truncated to the
//! requested size, then flipped ascending. Horizontal-bar renderers draw
//! bottom-up, so ascending order puts the biggest bar on top.

use std::collections::HashMap;

use crate::types::FrequencyTable;

/// Ranks the `n` most frequent values, excluding any listed label.
///
/// Ties keep first-seen order before the ascending flip. Excluded-only input
/// yields an empty table, not a table of placeholders.
pub fn top_entities<'a, I>(values: I, n: usize, exclude: &[&str]) -> FrequencyTable
where
    I: IntoIterator<Item = &'a str>,
{
    let counts = count_first_seen(values.into_iter().filter(|v| !exclude.contains(v)));
    rank(counts, n)
}

/// Ranks the `n` most frequent whitespace-separated words across titles.
///
/// Tokens are matched case-sensitively and exactly, no stemming. A token
/// occurring in at least 90% of titles is boilerplate (the export prefixes
/// every search with the same words) and is dropped before ranking.
pub fn top_words<'a, I>(titles: I, n: usize) -> FrequencyTable
where
    I: IntoIterator<Item = &'a str>,
{
    let titles: Vec<&str> = titles.into_iter().collect();
    let cutoff = titles.len() as f64 * 0.9;

    let counts = count_first_seen(titles.iter().copied().flat_map(str::split_whitespace));
    let kept = counts
        .into_iter()
        .filter(|(_, count)| (*count as f64) < cutoff)
        .collect();
    rank(kept, n)
}

/// Counts occurrences, keeping the order each value was first seen.
fn count_first_seen<'a, I>(values: I) -> Vec<(String, i64)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(String, i64)> = Vec::new();
    for value in values {
        match slots.get(value) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                slots.insert(value, counts.len());
                counts.push((value.to_string(), 1));
            }
        }
    }
    counts
}

/// Stable descending sort, truncate to `n`, flip ascending.
fn rank(mut counts: Vec<(String, i64)>, n: usize) -> FrequencyTable {
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(n);
    counts.reverse();
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::UNKNOWN_CHANNEL;

    #[test]
    fn test_top_entities_ascending() {
        let values = vec!["a", "b", "a", "c", "a", "b"];
        let table = top_entities(values, 10, &[]);
        assert_eq!(
            table,
            vec![
                ("c".to_string(), 1),
                ("b".to_string(), 2),
                ("a".to_string(), 3),
            ]
        );
    }

    #[test]
    fn test_top_entities_truncates_to_biggest() {
        let values = vec!["a", "b", "a", "c", "a", "b"];
        let table = top_entities(values, 2, &[]);
        // c drops out, the two biggest remain, ascending
        assert_eq!(table, vec![("b".to_string(), 2), ("a".to_string(), 3)]);
    }

    #[test]
    fn test_top_entities_exclusion() {
        let values = vec![UNKNOWN_CHANNEL, "a", UNKNOWN_CHANNEL];
        let table = top_entities(values, 5, &[UNKNOWN_CHANNEL]);
        assert_eq!(table, vec![("a".to_string(), 1)]);
    }

    #[test]
    fn test_top_entities_all_excluded_is_empty() {
        let values = vec![UNKNOWN_CHANNEL; 4];
        let table = top_entities(values, 5, &[UNKNOWN_CHANNEL]);
        assert!(table.is_empty());
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let values = vec!["b", "a", "b", "a", "c"];
        let table = top_entities(values, 3, &[]);
        // descending with stable ties is [b, a, c]; flipped for the renderer
        assert_eq!(
            table,
            vec![
                ("c".to_string(), 1),
                ("a".to_string(), 2),
                ("b".to_string(), 2),
            ]
        );
    }

    #[test]
    fn test_top_words_counts_tokens() {
        let titles = vec!["rust lifetimes", "rust traits", "sourdough"];
        let table = top_words(titles, 10);
        assert_eq!(table.last(), Some(&("rust".to_string(), 2)));
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_top_words_drops_boilerplate() {
        // "the" appears in all 10 titles, each other word once
        let titles: Vec<String> = (0..10).map(|i| format!("the w{}", i)).collect();
        let table = top_words(titles.iter().map(String::as_str), 20);
        assert_eq!(table.len(), 10);
        assert!(table.iter().all(|(word, _)| word != "the"));
    }

    #[test]
    fn test_top_words_cutoff_is_inclusive() {
        // "hot" appears in 9 of 10 titles: exactly 90%, still dropped
        let mut titles: Vec<String> = (0..9).map(|i| format!("hot w{}", i)).collect();
        titles.push("cold w9".to_string());
        let table = top_words(titles.iter().map(String::as_str), 20);
        assert!(table.iter().all(|(word, _)| word != "hot"));
        assert!(table.iter().any(|(word, _)| word == "cold"));
    }

    #[test]
    fn test_top_words_ignores_extra_whitespace() {
        let titles = vec!["  rust   wasm  ", "rust", "sourdough"];
        let table = top_words(titles, 10);
        assert_eq!(
            table,
            vec![
                ("sourdough".to_string(), 1),
                ("wasm".to_string(), 1),
                ("rust".to_string(), 2),
            ]
        );
    }

    #[test]
    fn test_empty_input_is_empty_table() {
        assert!(top_entities(Vec::<&str>::new(), 5, &[]).is_empty());
        assert!(top_words(Vec::<&str>::new(), 5).is_empty());
    }
}
