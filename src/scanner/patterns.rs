// file: src/scanner/patterns.rs
// description: compiled regex patterns for wikitext analysis
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Any policy shortcut in an edit summary or discussion:
    // WP:V, Wikipedia:NPOV, MOS:AI and friends.
    pub static ref POLICY_CITATION: Regex = Regex::new(
        r"(?i)(?:WP|Wikipedia|MOS):[A-Z][A-Z0-9]*(?:[-_][A-Z0-9]+)*"
    ).expect("POLICY_CITATION regex is valid");

    // Closure line written by the closing admin.
    pub static ref FORMAL_RESULT: Regex = Regex::new(
        r"(?i)The result was '''([^']+)'''"
    ).expect("FORMAL_RESULT regex is valid");

    // Bolded bullet-point votes with up to 300 chars of reasoning.
    pub static ref VOTE: Regex = Regex::new(
        r"(?mi)^\*\s*'''(Delete|Keep|Redirect|Merge)'''(.{0,300})"
    ).expect("VOTE regex is valid");

    // Bracketed shortcut and full-name policy links inside wikitext.
    pub static ref WP_SHORTCUT_LINK: Regex = Regex::new(
        r"\[\[WP:([A-Z]+)\]\]"
    ).expect("WP_SHORTCUT_LINK regex is valid");

    pub static ref WIKIPEDIA_PAGE_LINK: Regex = Regex::new(
        r"\[\[Wikipedia:([A-Za-z ]+)\]\]"
    ).expect("WIKIPEDIA_PAGE_LINK regex is valid");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_citation_pattern() {
        assert!(POLICY_CITATION.is_match("rm per WP:NOT"));
        assert!(POLICY_CITATION.is_match("see MOS:AI and Wikipedia:V"));
        assert!(POLICY_CITATION.is_match("wp:rs applies"));
        assert!(!POLICY_CITATION.is_match("no citation here"));
    }

    #[test]
    fn test_policy_citation_compound_names() {
        let m = POLICY_CITATION.find("per WP:NOT-HOWTO thanks").unwrap();
        assert_eq!(m.as_str(), "WP:NOT-HOWTO");
    }

    #[test]
    fn test_formal_result_pattern() {
        let text = "The result was '''Delete'''. Closed by admin.";
        let caps = FORMAL_RESULT.captures(text).unwrap();
        assert_eq!(&caps[1], "Delete");
    }

    #[test]
    fn test_vote_pattern_anchors_to_bullet() {
        let text = "*'''Delete''' clearly AI slop\nmentions '''Keep''' inline";
        let stances: Vec<&str> = VOTE.captures_iter(text).map(|c| c.get(1).unwrap().as_str()).collect();
        assert_eq!(stances, vec!["Delete"]);
    }
}
