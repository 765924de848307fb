// file: src/scanner/outcome.rs
// description: closure outcome, vote and policy-citation extraction from discussions
// reference: https://en.wikipedia.org/wiki/Wikipedia:Deletion_process

use crate::scanner::patterns::{FORMAL_RESULT, VOTE, WIKIPEDIA_PAGE_LINK, WP_SHORTCUT_LINK};

/// Per-discussion cap on distinct policy citations.
const MAX_POLICIES_PER_DISCUSSION: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vote {
    pub stance: String,
    pub reasoning: String,
}

/// The closing admin's formal decision, when the discussion was closed.
pub fn formal_result(text: &str) -> Option<String> {
    FORMAL_RESULT
        .captures(text)
        .map(|caps| caps[1].trim().to_string())
}

/// Bolded bullet-point votes in discussion order, reasoning flattened
/// to a single line.
pub fn votes(text: &str) -> Vec<Vote> {
    VOTE.captures_iter(text)
        .map(|caps| Vote {
            stance: caps[1].to_string(),
            reasoning: caps[2].replace('\n', " ").trim().to_string(),
        })
        .collect()
}

/// Distinct policy citations in first-seen order, capped per discussion.
pub fn policy_citations(text: &str) -> Vec<String> {
    let mut seen = Vec::new();

    let shortcut = WP_SHORTCUT_LINK.captures_iter(text).map(|c| c[1].to_string());
    let full = WIKIPEDIA_PAGE_LINK
        .captures_iter(text)
        .map(|c| c[1].trim().to_string());

    for policy in shortcut.chain(full) {
        if !seen.contains(&policy) {
            seen.push(policy);
        }
        if seen.len() >= MAX_POLICIES_PER_DISCUSSION {
            break;
        }
    }

    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_formal_result() {
        let text = "The result was '''Delete'''. Thanks all.";
        assert_eq!(formal_result(text), Some("Delete".to_string()));
        assert_eq!(formal_result("no closure yet"), None);
    }

    #[test]
    fn test_formal_result_multiword() {
        let text = "The result was '''no consensus'''.";
        assert_eq!(formal_result(text), Some("no consensus".to_string()));
    }

    #[test]
    fn test_votes_in_order() {
        let text = "\
* '''Delete''' reads like ChatGPT output\n\
* '''Keep''' notable subject regardless\n\
*'''Merge''' into the parent article";

        let found = votes(text);
        assert_eq!(found.len(), 3);
        assert_eq!(found[0].stance, "Delete");
        assert!(found[0].reasoning.contains("ChatGPT"));
        assert_eq!(found[2].stance, "Merge");
    }

    #[test]
    fn test_policy_citations_dedup_and_order() {
        let text = "per [[WP:GNG]] and [[WP:NOT]], also [[WP:GNG]] again, \
                    see [[Wikipedia:Notability]]";
        let cited = policy_citations(text);
        assert_eq!(cited, vec!["GNG", "NOT", "Notability"]);
    }

    #[test]
    fn test_policy_citations_cap() {
        let mut text = String::new();
        for code in ["A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L"] {
            text.push_str(&format!("[[WP:{}]] ", code));
        }
        assert_eq!(policy_citations(&text).len(), 10);
    }
}
