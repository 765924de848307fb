// file: src/analysis/frequency.rs
// description: monotonic frequency table with deterministic top-N ranking
// reference: internal data structures

use serde::Serialize;
use serde::ser::SerializeMap;
use std::collections::HashMap;

/// Label → count accumulator for one pipeline run.
///
/// Counts only grow; the first-seen order of labels is retained so that
/// rankings break count ties deterministically. One run owns one table,
/// nothing is shared across runs.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    counts: HashMap<String, u64>,
    order: Vec<String>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, label: &str) {
        self.add(label, 1);
    }

    pub fn add(&mut self, label: &str, amount: u64) {
        if !self.counts.contains_key(label) {
            self.order.push(label.to_string());
        }
        *self.counts.entry(label.to_string()).or_insert(0) += amount;
    }

    pub fn count(&self, label: &str) -> u64 {
        self.counts.get(label).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// All labels ranked by count descending; ties resolve to whichever
    /// label was seen first.
    pub fn ranked(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<(usize, &str, u64)> = self
            .order
            .iter()
            .enumerate()
            .map(|(index, label)| (index, label.as_str(), self.count(label)))
            .collect();

        entries.sort_by(|a, b| b.2.cmp(&a.2).then(a.0.cmp(&b.0)));
        entries.into_iter().map(|(_, label, count)| (label, count)).collect()
    }

    pub fn top(&self, n: usize) -> Vec<(&str, u64)> {
        self.ranked().into_iter().take(n).collect()
    }

    /// Labels in first-seen order, with counts.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.order.iter().map(|label| (label.as_str(), self.count(label)))
    }
}

impl Serialize for FrequencyTable {
    /// Serialized as a map in ranked order so report files are stable
    /// across runs given the same input.
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let ranked = self.ranked();
        let mut map = serializer.serialize_map(Some(ranked.len()))?;
        for (label, count) in ranked {
            map.serialize_entry(label, &count)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_counts_accumulate() {
        let mut table = FrequencyTable::new();
        table.increment("ChatGPT");
        table.increment("ChatGPT");
        table.add("GPT", 3);

        assert_eq!(table.count("ChatGPT"), 2);
        assert_eq!(table.count("GPT"), 3);
        assert_eq!(table.count("missing"), 0);
        assert_eq!(table.total(), 5);
        assert_eq!(table.distinct(), 2);
    }

    #[test]
    fn test_top_n_tie_break_is_first_seen() {
        let mut table = FrequencyTable::new();
        table.add("a", 5);
        table.add("b", 5);
        table.add("c", 3);

        let top = table.top(2);
        assert_eq!(top, vec![("a", 5), ("b", 5)]);
    }

    #[test]
    fn test_ranked_full_order() {
        let mut table = FrequencyTable::new();
        table.add("low", 1);
        table.add("high", 9);
        table.add("mid", 4);

        let ranked = table.ranked();
        assert_eq!(ranked, vec![("high", 9), ("mid", 4), ("low", 1)]);
    }

    #[test]
    fn test_serialization_is_ranked_and_stable() {
        let mut table = FrequencyTable::new();
        table.add("b", 2);
        table.add("a", 7);

        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"a":7,"b":2}"#);
    }

    #[test]
    fn test_empty_table() {
        let table = FrequencyTable::new();
        assert!(table.is_empty());
        assert_eq!(table.total(), 0);
        assert!(table.top(5).is_empty());
    }
}
