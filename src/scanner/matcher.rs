// file: src/scanner/matcher.rs
// description: configured keyword/regex scanning with bounded context capture
// reference: https://docs.rs/regex

use crate::error::Result;
use crate::models::{Origin, PatternMatch};
use regex::{Regex, RegexBuilder};

/// Context radius captured on each side of a match, in characters.
const CONTEXT_RADIUS: usize = 100;

struct PatternEntry {
    label: String,
    regex: Regex,
}

/// An ordered set of labeled, case-insensitive patterns.
///
/// The labels and expressions are configuration data; this type only
/// compiles and applies them. Scanning is pure: same text and patterns,
/// same output, in pattern order then offset order.
pub struct PatternSet {
    entries: Vec<PatternEntry>,
}

impl PatternSet {
    /// Builds word-bounded literal patterns from a keyword list. The
    /// keyword itself becomes the label.
    pub fn from_keywords<I, S>(keywords: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut entries = Vec::new();
        for keyword in keywords {
            let keyword = keyword.as_ref();
            let regex = compile(&format!(r"\b{}\b", regex::escape(keyword)))?;
            entries.push(PatternEntry {
                label: keyword.to_string(),
                regex,
            });
        }
        Ok(Self { entries })
    }

    /// Builds patterns from raw (label, expression) pairs.
    pub fn from_patterns<I, L, E>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (L, E)>,
        L: Into<String>,
        E: AsRef<str>,
    {
        let mut entries = Vec::new();
        for (label, expression) in patterns {
            entries.push(PatternEntry {
                label: label.into(),
                regex: compile(expression.as_ref())?,
            });
        }
        Ok(Self { entries })
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when any pattern occurs in the text.
    pub fn matches_any(&self, text: &str) -> bool {
        self.entries.iter().any(|e| e.regex.is_match(text))
    }

    /// Labels of the patterns that occur in the text, in pattern order.
    pub fn present_labels(&self, text: &str) -> Vec<String> {
        self.entries
            .iter()
            .filter(|e| e.regex.is_match(text))
            .map(|e| e.label.clone())
            .collect()
    }

    /// Finds every non-overlapping occurrence of every pattern.
    ///
    /// Occurrences of different patterns over the same span are reported
    /// independently; each carries its own context window. Empty text
    /// yields an empty result rather than an error.
    pub fn scan(&self, text: &str, origin: &Origin) -> Vec<PatternMatch> {
        if text.is_empty() {
            return Vec::new();
        }

        let mut matches = Vec::new();
        for entry in &self.entries {
            for found in entry.regex.find_iter(text) {
                let context = extract_context(text, found.start(), found.end());
                matches.push(PatternMatch::new(
                    entry.label.clone(),
                    origin,
                    found.start(),
                    context,
                ));
            }
        }
        matches
    }
}

fn compile(expression: &str) -> Result<Regex> {
    Ok(RegexBuilder::new(expression).case_insensitive(true).build()?)
}

/// Captures a window of `CONTEXT_RADIUS` chars each side of the match,
/// clipped to char boundaries so multi-byte text never panics, with
/// newlines flattened to spaces.
fn extract_context(text: &str, start: usize, end: usize) -> String {
    let context_start = find_char_boundary_before(text, start.saturating_sub(CONTEXT_RADIUS));
    let context_end = find_char_boundary_after(text, (end + CONTEXT_RADIUS).min(text.len()));

    text[context_start..context_end]
        .trim()
        .replace('\n', " ")
        .replace("  ", " ")
}

fn find_char_boundary_before(text: &str, pos: usize) -> usize {
    let mut pos = pos.min(text.len());
    while pos > 0 && !text.is_char_boundary(pos) {
        pos -= 1;
    }
    pos
}

fn find_char_boundary_after(text: &str, pos: usize) -> usize {
    let mut pos = pos.min(text.len());
    while pos < text.len() && !text.is_char_boundary(pos) {
        pos += 1;
    }
    pos
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn origin() -> Origin {
        Origin::page("Test page")
    }

    #[test]
    fn test_scan_counts_match_per_pattern_occurrences() {
        let set = PatternSet::from_keywords(["ChatGPT", "GPT"]).unwrap();
        let text = "ChatGPT and GPT and ChatGPT again";

        let matches = set.scan(text, &origin());

        // ChatGPT twice, standalone GPT once; the GPT inside ChatGPT is
        // not a word-bounded standalone occurrence.
        let chatgpt = matches.iter().filter(|m| m.label == "ChatGPT").count();
        let gpt = matches.iter().filter(|m| m.label == "GPT").count();
        assert_eq!(chatgpt, 2);
        assert_eq!(gpt, 1);
        assert_eq!(matches.len(), chatgpt + gpt);
    }

    #[test]
    fn test_scan_is_deterministic() {
        let set = PatternSet::from_keywords(["AI slop", "hallucination"]).unwrap();
        let text = "This AI slop is pure hallucination, AI slop everywhere.";

        let first = set.scan(text, &origin());
        let second = set.scan(text, &origin());
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_text_and_empty_patterns() {
        let set = PatternSet::from_keywords(["ChatGPT"]).unwrap();
        assert!(set.scan("", &origin()).is_empty());

        let empty = PatternSet::from_keywords(Vec::<String>::new()).unwrap();
        assert!(empty.is_empty());
        assert!(empty.scan("some text", &origin()).is_empty());
    }

    #[test]
    fn test_case_insensitive_matching() {
        let set = PatternSet::from_keywords(["chatgpt"]).unwrap();
        let matches = set.scan("Written by CHATGPT.", &origin());
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].label, "chatgpt");
    }

    #[test]
    fn test_context_window_is_clipped_and_flattened() {
        let set = PatternSet::from_keywords(["needle"]).unwrap();
        let text = format!("{}\nneedle\n{}", "a".repeat(500), "b".repeat(500));

        let matches = set.scan(&text, &origin());
        assert_eq!(matches.len(), 1);
        assert!(!matches[0].context.contains('\n'));
        assert!(matches[0].context.chars().count() <= crate::models::matched::MAX_CONTEXT_CHARS);
        assert!(matches[0].context.contains("needle"));
    }

    #[test]
    fn test_multibyte_text_does_not_panic() {
        let set = PatternSet::from_keywords(["GPT"]).unwrap();
        let text = "日本語のテキスト GPT 日本語のテキスト 🎌";
        let matches = set.scan(text, &origin());

        assert_eq!(matches.len(), 1);
        assert!(!matches[0].context.is_empty());
    }

    #[test]
    fn test_overlapping_patterns_reported_independently() {
        let set = PatternSet::from_keywords(["language model", "model"]).unwrap();
        let matches = set.scan("a large language model", &origin());

        let labels: Vec<&str> = matches.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, vec!["language model", "model"]);
    }

    #[test]
    fn test_offsets_fall_within_text() {
        let set = PatternSet::from_keywords(["GPT"]).unwrap();
        let text = "prefix GPT suffix";
        for m in set.scan(text, &origin()) {
            assert!(m.offset < text.len());
        }
    }

    #[test]
    fn test_raw_pattern_compilation() {
        let set = PatternSet::from_patterns([("ai-policy", r"WP:(?:NOTAI|LLM)")]).unwrap();
        assert!(set.matches_any("cited WP:LLM today"));
        assert!(!set.matches_any("cited WP:V today"));
    }

    #[test]
    fn test_present_labels() {
        let set = PatternSet::from_keywords(["GPTZero", "AI detector"]).unwrap();
        let labels = set.present_labels("ran it through GPTZero twice");
        assert_eq!(labels, vec!["GPTZero"]);
    }
}
