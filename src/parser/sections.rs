// file: src/parser/sections.rs
// description: wikitext section splitting on heading-marker lines
// reference: https://www.mediawiki.org/wiki/Help:Formatting

use crate::models::Section;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // A heading line: a run of 2..6 '=' markers surrounding a non-empty
    // title, with nothing else on the line.
    static ref HEADING_LINE: Regex =
        Regex::new(r"^(={2,6})\s*([^=\s][^\n]*?)\s*={2,6}$").expect("HEADING_LINE regex is valid");
}

/// Title used for text preceding the first heading.
pub const INTRO_TITLE: &str = "Introduction";

/// Splits wikitext into a flat, ordered list of titled sections.
///
/// The nesting level is the heading marker run length (2 = top-level);
/// it is recorded as metadata only, no tree is built. Sections whose
/// body trims to nothing are dropped.
pub fn split_sections(text: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut title = INTRO_TITLE.to_string();
    let mut level: u8 = 1;
    let mut body = String::new();

    for line in text.lines() {
        if let Some(caps) = HEADING_LINE.captures(line.trim_end()) {
            push_section(&mut sections, &title, level, &body);
            title = caps[2].trim().to_string();
            level = caps[1].len() as u8;
            body = String::new();
        } else {
            body.push_str(line);
            body.push('\n');
        }
    }

    push_section(&mut sections, &title, level, &body);
    sections
}

fn push_section(sections: &mut Vec<Section>, title: &str, level: u8, body: &str) {
    if body.trim().is_empty() {
        return;
    }

    sections.push(Section {
        title: title.to_string(),
        level,
        body: body.trim_end().to_string(),
    });
}
