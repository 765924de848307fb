// file: src/client/mediawiki.rs
// description: MediaWiki Action API client for search, page content and recent changes
// reference: https://www.mediawiki.org/wiki/API:Main_page

use crate::client::{Paginator, RateLimitedFetcher};
use crate::error::{Result, ScanError};
use crate::models::{RawDocument, SourceKind};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::debug;

/// One search call: a term, an optional namespace restriction and a
/// result limit. Constructed per call, never mutated.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub term: String,
    pub namespace: Option<u32>,
    pub limit: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub title: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub wordcount: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecentChange {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub timestamp: Option<String>,
}

#[derive(Deserialize)]
struct SearchEnvelope {
    #[serde(default)]
    query: Option<SearchBody>,
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(default)]
    search: Vec<SearchHit>,
}

#[derive(Deserialize)]
struct ChangesEnvelope {
    #[serde(default)]
    query: Option<ChangesBody>,
}

#[derive(Deserialize)]
struct ChangesBody {
    #[serde(default)]
    recentchanges: Vec<RecentChange>,
}

#[derive(Deserialize)]
struct ParseEnvelope {
    parse: Option<ParseBody>,
}

#[derive(Deserialize)]
struct ParseBody {
    #[serde(default)]
    title: String,
    wikitext: Option<Wikitext>,
}

#[derive(Deserialize)]
struct Wikitext {
    #[serde(rename = "*")]
    content: Option<String>,
}

#[derive(Deserialize)]
struct PagesEnvelope {
    query: Option<PagesBody>,
}

#[derive(Deserialize)]
struct PagesBody {
    #[serde(default)]
    pages: HashMap<String, PageEntry>,
}

#[derive(Deserialize)]
struct PageEntry {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    missing: Option<Value>,
    #[serde(default)]
    revisions: Vec<RevisionEntry>,
}

#[derive(Deserialize)]
struct RevisionEntry {
    #[serde(rename = "*")]
    content: Option<String>,
    #[serde(default)]
    timestamp: Option<String>,
    #[serde(default)]
    user: Option<String>,
    #[serde(default)]
    comment: Option<String>,
}

pub struct MediaWikiClient<'a> {
    fetcher: &'a RateLimitedFetcher,
    endpoint: String,
}

impl<'a> MediaWikiClient<'a> {
    pub fn new(fetcher: &'a RateLimitedFetcher, endpoint: impl Into<String>) -> Self {
        Self {
            fetcher,
            endpoint: endpoint.into(),
        }
    }

    /// Full-text search (`list=search`), one fetch per call.
    pub async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchHit>> {
        let mut params = params([
            ("action", "query"),
            ("list", "search"),
            ("format", "json"),
            ("srwhat", "text"),
        ]);
        params.push(("srsearch".to_string(), query.term.clone()));
        params.push(("srlimit".to_string(), query.limit.to_string()));
        if let Some(namespace) = query.namespace {
            params.push(("srnamespace".to_string(), namespace.to_string()));
        }

        let value = self.fetcher.get_json(&self.endpoint, &params).await?;
        let envelope: SearchEnvelope = decode(value, "search response")?;

        Ok(envelope.query.map(|q| q.search).unwrap_or_default())
    }

    /// Current wikitext of a page via `action=parse`. A missing page is
    /// `Ok(None)`, not an error.
    pub async fn page_wikitext(&self, title: &str) -> Result<Option<RawDocument>> {
        let mut params = params([
            ("action", "parse"),
            ("format", "json"),
            ("prop", "wikitext"),
        ]);
        params.push(("page".to_string(), title.to_string()));

        let value = self.fetcher.get_json(&self.endpoint, &params).await?;
        let envelope: ParseEnvelope = decode(value, "parse response")?;

        let Some(body) = envelope.parse else {
            debug!("No parse body for '{}'", title);
            return Ok(None);
        };

        let Some(content) = body.wikitext.and_then(|w| w.content) else {
            return Ok(None);
        };

        let title = if body.title.is_empty() {
            title.to_string()
        } else {
            body.title
        };

        Ok(Some(RawDocument::new(title, content, SourceKind::Wikitext)))
    }

    /// Latest revision of a page with its edit metadata
    /// (`prop=revisions`, content + timestamp + user + comment).
    pub async fn page_revision(&self, title: &str) -> Result<Option<RawDocument>> {
        let mut params = params([
            ("action", "query"),
            ("format", "json"),
            ("prop", "revisions|info"),
            ("rvprop", "content|timestamp|user|comment"),
            ("rvlimit", "1"),
        ]);
        params.push(("titles".to_string(), title.to_string()));

        let value = self.fetcher.get_json(&self.endpoint, &params).await?;
        let envelope: PagesEnvelope = decode(value, "revisions response")?;

        let Some(body) = envelope.query else {
            return Ok(None);
        };

        let Some(entry) = body.pages.into_values().next() else {
            return Ok(None);
        };

        if entry.missing.is_some() {
            debug!("Page '{}' is missing", title);
            return Ok(None);
        }

        let Some(revision) = entry.revisions.into_iter().next() else {
            return Ok(None);
        };

        let Some(content) = revision.content else {
            return Ok(None);
        };

        let document = RawDocument::new(
            entry.title.unwrap_or_else(|| title.to_string()),
            content,
            SourceKind::Wikitext,
        )
        .with_revision(revision.timestamp, revision.user, revision.comment);

        Ok(Some(document))
    }

    /// Paginated `list=recentchanges` walk over a time window, newest
    /// first. Batches stream through the returned paginator.
    pub fn recent_changes(
        &self,
        start: &str,
        end: &str,
        namespace: u32,
        batch_size: u32,
        max_batches: usize,
    ) -> Paginator<'a> {
        let mut base = params([
            ("action", "query"),
            ("list", "recentchanges"),
            ("format", "json"),
            ("rcprop", "comment|timestamp|title"),
        ]);
        base.push(("rcstart".to_string(), start.to_string()));
        base.push(("rcend".to_string(), end.to_string()));
        base.push(("rcnamespace".to_string(), namespace.to_string()));
        base.push(("rclimit".to_string(), batch_size.to_string()));

        Paginator::new(self.fetcher, self.endpoint.clone(), base, max_batches)
    }

    /// Decodes the recent-changes list out of one paginated batch. A
    /// malformed batch yields an empty list (logged by the caller as a
    /// skipped batch), keeping the run alive.
    pub fn decode_recent_changes(batch: &Value) -> Vec<RecentChange> {
        match serde_json::from_value::<ChangesEnvelope>(batch.clone()) {
            Ok(envelope) => envelope.query.map(|q| q.recentchanges).unwrap_or_default(),
            Err(_) => Vec::new(),
        }
    }
}

fn params<const N: usize>(pairs: [(&str, &str); N]) -> Vec<(String, String)> {
    pairs
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn decode<T: serde::de::DeserializeOwned>(value: Value, context: &str) -> Result<T> {
    serde_json::from_value(value).map_err(|e| ScanError::Parse {
        context: context.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ApiConfig;
    use pretty_assertions::assert_eq;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher() -> RateLimitedFetcher {
        RateLimitedFetcher::new(&ApiConfig {
            mediawiki_endpoint: "https://example.org/w/api.php".to_string(),
            github_api_base: "https://example.org".to_string(),
            projects_api_base: "https://example.org/api".to_string(),
            user_agent: "wikiscan-test/0.1".to_string(),
            request_delay_ms: 0,
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_search_decodes_hits() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("list", "search"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"query": {"search": [
                    {"title": "Wikipedia:Articles for deletion/Example",
                     "snippet": "uses <b>ChatGPT</b>",
                     "timestamp": "2025-06-01T00:00:00Z",
                     "wordcount": 420}
                ]}}"#,
            ))
            .mount(&server)
            .await;

        let fetcher = fetcher();
        let client = MediaWikiClient::new(&fetcher, server.uri());
        let hits = client
            .search(&SearchQuery {
                term: "\"ChatGPT\" prefix:Wikipedia:Articles for deletion/".to_string(),
                namespace: Some(4),
                limit: 20,
            })
            .await
            .unwrap();

        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Wikipedia:Articles for deletion/Example");
        assert_eq!(hits[0].wordcount, Some(420));
    }

    #[tokio::test]
    async fn test_page_wikitext_present_and_missing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("page", "Known"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"parse": {"title": "Known", "wikitext": {"*": "== Discussion ==\ntext"}}}"#,
            ))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"error": {"code": "missingtitle"}}"#),
            )
            .mount(&server)
            .await;

        let fetcher = fetcher();
        let client = MediaWikiClient::new(&fetcher, server.uri());

        let known = client.page_wikitext("Known").await.unwrap().unwrap();
        assert_eq!(known.title, "Known");
        assert!(known.text.contains("== Discussion =="));
        assert_eq!(known.source, SourceKind::Wikitext);

        let missing = client.page_wikitext("Missing").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_page_revision_carries_edit_metadata() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"query": {"pages": {"123": {
                    "title": "Wikipedia:Bot policy",
                    "revisions": [{"*": "== Scope ==\nBots.",
                                   "timestamp": "2025-05-01T12:00:00Z",
                                   "user": "ExampleAdmin",
                                   "comment": "update scope"}]
                }}}}"#,
            ))
            .mount(&server)
            .await;

        let fetcher = fetcher();
        let client = MediaWikiClient::new(&fetcher, server.uri());
        let doc = client
            .page_revision("Wikipedia:Bot policy")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(doc.title, "Wikipedia:Bot policy");
        assert_eq!(doc.last_editor.as_deref(), Some("ExampleAdmin"));
        assert_eq!(doc.edit_comment.as_deref(), Some("update scope"));
    }

    #[test]
    fn test_decode_recent_changes_tolerates_bad_shape() {
        let good: Value = serde_json::json!({
            "query": {"recentchanges": [
                {"title": "A", "comment": "rm per WP:NOT", "timestamp": "2025-03-01T00:00:00Z"}
            ]}
        });
        let changes = MediaWikiClient::decode_recent_changes(&good);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].comment, "rm per WP:NOT");

        let bad: Value = serde_json::json!({"query": {"recentchanges": "oops"}});
        assert!(MediaWikiClient::decode_recent_changes(&bad).is_empty());
    }
}
