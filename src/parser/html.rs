// file: src/parser/html.rs
// description: text and link extraction from static HTML pages
// reference: https://docs.rs/scraper

use lazy_static::lazy_static;
use scraper::{Html, Selector};

lazy_static! {
    static ref LINK_SELECTOR: Selector = Selector::parse("a[href]").expect("selector is valid");
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLink {
    pub href: String,
    pub text: String,
}

/// The pieces of a static page the pipeline cares about: visible text
/// (one whitespace-collapsed blob, ready for pattern scanning) and the
/// outgoing links.
#[derive(Debug, Clone)]
pub struct ExtractedPage {
    pub text: String,
    pub links: Vec<PageLink>,
}

pub fn extract_page(html: &str) -> ExtractedPage {
    let document = Html::parse_document(html);

    let mut text = String::new();
    for node in document.root_element().text() {
        let trimmed = node.trim();
        if trimmed.is_empty() {
            continue;
        }
        if !text.is_empty() {
            text.push(' ');
        }
        text.push_str(&collapse_whitespace(trimmed));
    }

    let links = document
        .select(&LINK_SELECTOR)
        .filter_map(|element| {
            let href = element.value().attr("href")?.trim().to_string();
            if href.is_empty() {
                return None;
            }
            let text = collapse_whitespace(&element.text().collect::<String>());
            Some(PageLink {
                href,
                text: text.trim().to_string(),
            })
        })
        .collect();

    ExtractedPage { text, links }
}

fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_text_extraction_collapses_whitespace() {
        let html = "<html><body><h1>Savannah</h1>\n  <p>12,345   registered\nusers</p></body></html>";
        let page = extract_page(html);

        assert!(page.text.contains("Savannah"));
        assert!(page.text.contains("12,345 registered users"));
    }

    #[test]
    fn test_link_extraction() {
        let html = r#"<body>
            <a href="https://github.com/example/repo">example repo</a>
            <a href="/local/page">local</a>
            <a name="anchor-without-href">skip me</a>
        </body>"#;

        let page = extract_page(html);
        assert_eq!(page.links.len(), 2);
        assert_eq!(page.links[0].href, "https://github.com/example/repo");
        assert_eq!(page.links[0].text, "example repo");
    }

    #[test]
    fn test_empty_document() {
        let page = extract_page("");
        assert!(page.text.is_empty());
        assert!(page.links.is_empty());
    }
}
