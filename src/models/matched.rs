// file: src/models/matched.rs
// description: section and pattern match models produced by the scanner
// reference: internal data structures

use serde::{Deserialize, Serialize};

/// Hard cap on the stored context excerpt, in characters.
pub const MAX_CONTEXT_CHARS: usize = 300;

/// A titled slice of a larger document, produced by the section splitter.
/// The level is the heading marker run length (2 = top-level).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub level: u8,
    pub body: String,
}

/// Where a scanned text came from, for match attribution.
#[derive(Debug, Clone)]
pub struct Origin {
    pub page: String,
    pub section: Option<String>,
}

impl Origin {
    pub fn page(page: impl Into<String>) -> Self {
        Self {
            page: page.into(),
            section: None,
        }
    }

    pub fn section(page: impl Into<String>, section: impl Into<String>) -> Self {
        Self {
            page: page.into(),
            section: Some(section.into()),
        }
    }
}

/// One occurrence of a configured pattern in a scanned text unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternMatch {
    pub label: String,
    pub page: String,
    pub section: Option<String>,
    pub offset: usize,
    pub context: String,
}

impl PatternMatch {
    /// The context excerpt is clamped to `MAX_CONTEXT_CHARS` characters at
    /// construction so the invariant holds for every stored match.
    pub fn new(label: impl Into<String>, origin: &Origin, offset: usize, context: String) -> Self {
        let context = if context.chars().count() > MAX_CONTEXT_CHARS {
            context.chars().take(MAX_CONTEXT_CHARS).collect()
        } else {
            context
        };

        Self {
            label: label.into(),
            page: origin.page.clone(),
            section: origin.section.clone(),
            offset,
            context,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_is_capped() {
        let origin = Origin::page("Some page");
        let long = "x".repeat(MAX_CONTEXT_CHARS * 2);
        let m = PatternMatch::new("ChatGPT", &origin, 0, long);

        assert_eq!(m.context.chars().count(), MAX_CONTEXT_CHARS);
    }

    #[test]
    fn test_section_attribution() {
        let origin = Origin::section("Some page", "Discussion");
        let m = PatternMatch::new("ChatGPT", &origin, 12, "ctx".to_string());

        assert_eq!(m.page, "Some page");
        assert_eq!(m.section.as_deref(), Some("Discussion"));
        assert_eq!(m.offset, 12);
    }
}
