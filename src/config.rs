// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{Result, ScanError};
use crate::utils::Validator;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub api: ApiConfig,
    pub pipeline: PipelineConfig,
    pub report: ReportConfig,
    pub keywords: KeywordConfig,
    pub citations: CitationsConfig,
    pub targets: TargetConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    pub mediawiki_endpoint: String,
    pub github_api_base: String,
    pub projects_api_base: String,
    pub user_agent: String,
    /// Floor between consecutive outbound requests, in milliseconds.
    pub request_delay_ms: u64,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PipelineConfig {
    /// Worker pool size for the project collector; everything else runs
    /// strictly sequentially.
    pub parallel_workers: usize,
    /// Ceiling on paginated batches per run.
    pub max_batches: usize,
    /// Items requested per paginated batch.
    pub batch_size: u32,
    /// How many discovered discussions get a full-text analysis pass.
    pub max_discussions: usize,
    /// Result limit per search query.
    pub search_limit: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportConfig {
    pub output_dir: PathBuf,
    pub pretty_json: bool,
    pub top_n: usize,
    pub max_samples: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KeywordConfig {
    /// Search phrases used to discover deletion discussions.
    pub afd_search: Vec<String>,
    /// Phrases editors use when they suspect generated text.
    pub detection_indicators: Vec<String>,
    /// Named detection tools worth tracking separately.
    pub detection_tools: Vec<String>,
    /// Keyword list for governance-page scans.
    pub ai_keywords: Vec<String>,
    /// Regex patterns marking a policy shortcut as AI-related.
    pub ai_policy_patterns: Vec<String>,
    /// Hosting/infrastructure terms for foundation-page scans.
    pub platform_keywords: Vec<String>,
    /// Repository host substrings counted in foundation link scans.
    pub repo_hosts: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CitationsConfig {
    /// Newest edit to include (MediaWiki rcstart, ISO 8601).
    pub period_start: String,
    /// Oldest edit to include (MediaWiki rcend, ISO 8601).
    pub period_end: String,
    pub namespace: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TargetConfig {
    pub governance_pages: Vec<String>,
    #[serde(default)]
    pub governance_categories: Vec<CategoryRule>,
    pub github_orgs: Vec<String>,
    pub foundation_pages: Vec<FoundationPage>,
}

/// Title-keyword rule assigning a page to a category; first rule wins.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CategoryRule {
    pub keywords: Vec<String>,
    pub category: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FoundationPage {
    pub name: String,
    pub url: String,
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("WIKISCAN")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| ScanError::Config(e.to_string()))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| ScanError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        Self {
            api: ApiConfig {
                mediawiki_endpoint: "https://en.wikipedia.org/w/api.php".to_string(),
                github_api_base: "https://api.github.com".to_string(),
                projects_api_base: "https://projects.eclipse.org/api".to_string(),
                user_agent: "wikiscan/0.1 (open-ecosystem research; wikiscan@example.org)"
                    .to_string(),
                request_delay_ms: 500,
                timeout_secs: 30,
            },
            pipeline: PipelineConfig {
                parallel_workers: 5,
                max_batches: 20,
                batch_size: 500,
                max_discussions: 30,
                search_limit: 20,
            },
            report: ReportConfig {
                output_dir: PathBuf::from("./reports"),
                pretty_json: true,
                top_n: 15,
                max_samples: 25,
            },
            keywords: KeywordConfig {
                afd_search: [
                    "AI-generated",
                    "ChatGPT",
                    "GPT",
                    "language model",
                    "suspected AI",
                    "looks like AI",
                    "AI writing",
                ]
                .map(String::from)
                .to_vec(),
                detection_indicators: [
                    "AI-generated",
                    "ChatGPT",
                    "GPT",
                    "language model",
                    "LLM",
                    "sounds like AI",
                    "looks like AI",
                    "reads like AI",
                    "AI slop",
                    "AI writing",
                    "AI-written",
                    "machine-generated",
                    "bot-written",
                    "hallucinated",
                    "hallucination",
                    "word salad",
                ]
                .map(String::from)
                .to_vec(),
                detection_tools: ["GPTZero", "AI detector", "detection tool", "AI checker"]
                    .map(String::from)
                    .to_vec(),
                ai_keywords: [
                    "artificial intelligence",
                    "machine learning",
                    "language model",
                    "neural network",
                    "deep learning",
                    "chatbot",
                    "GPT",
                    "ChatGPT",
                    "generative",
                    "AI-generated",
                    "AI-assisted",
                    "computer-generated",
                    "auto-generated",
                ]
                .map(String::from)
                .to_vec(),
                ai_policy_patterns: [
                    r"WP:NOTAI",
                    r"WP:AI",
                    r"Wikipedia:AI",
                    r"Wikipedia:AI[-_]generated",
                    r"WP:CHATGPT",
                    r"WP:LLM",
                    r"WP:BOTS?(?:\b|[^A-Z])",
                    r"MOS:AI",
                ]
                .map(String::from)
                .to_vec(),
                platform_keywords: [
                    "GitHub",
                    "GitLab",
                    "Savannah",
                    "self-hosted",
                    "mailing list",
                    "bug tracking",
                    "Subversion",
                    "Mercurial",
                ]
                .map(String::from)
                .to_vec(),
                repo_hosts: ["github.com", "gitlab.com", "savannah.gnu.org"]
                    .map(String::from)
                    .to_vec(),
            },
            citations: CitationsConfig {
                period_start: "2025-11-04T23:59:59Z".to_string(),
                period_end: "2025-01-01T00:00:00Z".to_string(),
                namespace: 0,
            },
            targets: TargetConfig {
                governance_pages: [
                    "Wikipedia:Five pillars",
                    "Wikipedia:What Wikipedia is not",
                    "Wikipedia:Neutral point of view",
                    "Wikipedia:Verifiability",
                    "Wikipedia:No original research",
                    "Wikipedia:Reliable sources",
                    "Wikipedia:Manual of Style",
                    "Wikipedia:Notability",
                    "Wikipedia:Consensus",
                    "Wikipedia:Bot policy",
                    "Wikipedia:Bots",
                    "Wikipedia:Automated editing",
                    "Wikipedia:Content assessment",
                    "Wikipedia:Administrators",
                    "Wikipedia:Arbitration",
                    "Wikipedia:Village pump",
                    "Wikipedia:Ignore all rules",
                    "Wikipedia:Assume good faith",
                ]
                .map(String::from)
                .to_vec(),
                governance_categories: default_governance_categories(),
                github_orgs: ["mozilla", "mozilla-mobile", "mozilla-services"]
                    .map(String::from)
                    .to_vec(),
                foundation_pages: vec![
                    FoundationPage {
                        name: "Savannah".to_string(),
                        url: "https://savannah.gnu.org".to_string(),
                    },
                    FoundationPage {
                        name: "Free Software Directory".to_string(),
                        url: "https://directory.fsf.org".to_string(),
                    },
                ],
            },
        }
    }

    fn validate(&self) -> Result<()> {
        if self.pipeline.parallel_workers == 0 {
            return Err(ScanError::Config(
                "parallel_workers must be greater than 0".to_string(),
            ));
        }

        if self.pipeline.max_batches == 0 {
            return Err(ScanError::Config(
                "max_batches must be greater than 0".to_string(),
            ));
        }

        if self.api.user_agent.trim().is_empty() {
            return Err(ScanError::Config("user_agent must be set".to_string()));
        }

        for url in [
            &self.api.mediawiki_endpoint,
            &self.api.github_api_base,
            &self.api.projects_api_base,
        ] {
            Validator::validate_url(url)?;
        }

        for page in &self.targets.foundation_pages {
            Validator::validate_url(&page.url)?;
        }

        Ok(())
    }
}

fn default_governance_categories() -> Vec<CategoryRule> {
    let rule = |keywords: &[&str], category: &str| CategoryRule {
        keywords: keywords.iter().map(|k| k.to_string()).collect(),
        category: category.to_string(),
    };

    vec![
        rule(
            &["policy", "five pillars", "what wikipedia is not"],
            "Policy",
        ),
        rule(
            &["guideline", "manual of style", "reliable sources", "notability"],
            "Guideline",
        ),
        rule(&["bot", "automated"], "Bot/Automation Policy"),
        rule(&["essay", "ignore all rules", "be bold"], "Essay"),
        rule(
            &["help", "village pump", "teahouse"],
            "Help/Community Page",
        ),
        rule(&["arbitration", "administrator"], "Administrative Page"),
        rule(&["wikiproject", "assessment"], "Project/Assessment Page"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default_config();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_workers_rejected() {
        let mut config = Config::default_config();
        config.pipeline.parallel_workers = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_endpoint_rejected() {
        let mut config = Config::default_config();
        config.api.mediawiki_endpoint = "en.wikipedia.org/w/api.php".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_governance_category_rules_present() {
        let config = Config::default_config();
        let categories: Vec<&str> = config
            .targets
            .governance_categories
            .iter()
            .map(|r| r.category.as_str())
            .collect();

        assert!(categories.contains(&"Policy"));
        assert!(categories.contains(&"Bot/Automation Policy"));
    }
}
