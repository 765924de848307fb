// file: src/client/mod.rs
// description: HTTP client module exports
// reference: internal module structure

pub mod fetcher;
pub mod github;
pub mod mediawiki;
pub mod paginator;
pub mod projects;

pub use fetcher::RateLimitedFetcher;
pub use github::GitHubClient;
pub use mediawiki::{MediaWikiClient, RecentChange, SearchHit, SearchQuery};
pub use paginator::Paginator;
pub use projects::ProjectsClient;
