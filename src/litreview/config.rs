//! Configuration for litreview.
//!
//! Provides [`ReviewConfig`], the immutable settings object threaded through the client
//! factory, the workflow stages and the pre-check. Users construct it manually or through
//! [`ReviewConfig::from_env`]; no config-file parsing dependencies are involved.
//!
//! # Example
//!
//! ```rust
//! use litreview::ReviewConfig;
//!
//! let config = ReviewConfig::default();
//! assert_eq!(config.model.model, "llama-3.3-70b-versatile");
//! assert_eq!(config.limits.summarize, 2);
//! assert_eq!(config.limits.draft, 8);
//! ```

use crate::litreview::clients::groq;
use crate::litreview::error::ReviewError;
use crate::litreview::extraction::OutputMarkers;
use std::env;

/// Base URL of Groq's OpenAI compatible API.
pub const DEFAULT_ENDPOINT: &str = "https://api.groq.com/openai/v1";
/// Literal prefix every Groq credential carries.
pub const CREDENTIAL_PREFIX: &str = "gsk_";
/// Sentinel keyword that ends a conversation early.
pub const DEFAULT_SENTINEL: &str = "TERMINATE";

pub const DEFAULT_PAPER_SOURCE_URL: &str = "https://api.semanticscholar.org/graph/v1";

pub const DEFAULT_TOPIC: &str = "Generative AI";

pub const DEFAULT_PAPER_TITLES: [&str; 6] = [
    "Advancements in Generative AI: A Comprehensive Review of GANs, GPT, Autoencoders, Diffusion Model, and Transformers Staphord Bengesi",
    "The Age of Generative AI and AI-Generated Everything Hongyang Du",
    "Generative AI: A Review on Models and Applications Kuldeep Singh Kaswan Jagjit Singh Dhatterwal",
    "At the Dawn of Generative AI Era: A Tutorial-cum-Survey on New Frontiers in 6G Wireless Intelligence Abdulkadir Celik",
    "The Internet of Things in the Era of Generative AI: Vision and Challenges Xin Wang",
    "Accelerating Innovation With Generative AI: AI-Augmented Digital Prototyping and Innovation Methods Volker Bilgram",
];

/// Capability flags advertised for a model.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModelInfo {
    pub vision: bool,
    pub function_calling: bool,
    pub json_output: bool,
    /// Model family tag, e.g. `"llama3"`.
    pub family: String,
}

impl Default for ModelInfo {
    fn default() -> Self {
        Self {
            vision: false,
            function_calling: true,
            json_output: true,
            family: "llama3".to_string(),
        }
    }
}

/// Everything needed to build a handle to a remote chat-completion endpoint.
#[derive(Clone, Debug)]
pub struct ModelConfig {
    /// Base URL including the API version segment, without a trailing slash.
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub info: ModelInfo,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: String::new(),
            model: groq::model_to_string(groq::Model::Llama33_70bVersatile),
            info: ModelInfo::default(),
        }
    }
}

/// Where papers are searched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PaperSourceConfig {
    /// Base URL of the Semantic Scholar Graph API.
    pub base_url: String,
    /// Optional `x-api-key` for higher rate limits.
    pub api_key: Option<String>,
}

impl Default for PaperSourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_PAPER_SOURCE_URL.to_string(),
            api_key: None,
        }
    }
}

/// Message-count bounds for each stage's conversation. The task message counts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StageLimits {
    pub summarize: usize,
    pub filter: usize,
    pub draft: usize,
    pub revise: usize,
}

impl Default for StageLimits {
    fn default() -> Self {
        Self {
            summarize: 2,
            filter: 2,
            draft: 8,
            revise: 8,
        }
    }
}

/// Settings for one literature review run.
#[derive(Clone, Debug)]
pub struct ReviewConfig {
    pub model: ModelConfig,
    pub papers: PaperSourceConfig,
    /// Topic the review is written about and papers are filtered against.
    pub topic: String,
    /// Titles looked up in the paper source, one search per title.
    pub paper_titles: Vec<String>,
    /// Target length of each per-paper summary, in words.
    pub summary_word_count: usize,
    /// Target length of the review, in words.
    pub review_word_count: usize,
    pub markers: OutputMarkers,
    pub sentinel: String,
    pub limits: StageLimits,
    /// Search hits requested per title.
    pub results_per_title: usize,
}

impl Default for ReviewConfig {
    fn default() -> Self {
        Self {
            model: ModelConfig::default(),
            papers: PaperSourceConfig::default(),
            topic: DEFAULT_TOPIC.to_string(),
            paper_titles: DEFAULT_PAPER_TITLES.iter().map(|t| t.to_string()).collect(),
            summary_word_count: 100,
            review_word_count: 500,
            markers: OutputMarkers::default(),
            sentinel: DEFAULT_SENTINEL.to_string(),
            limits: StageLimits::default(),
            results_per_title: 1,
        }
    }
}

impl ReviewConfig {
    /// Build a config from the process environment, falling back to defaults.
    ///
    /// | Variable | Field |
    /// |----------|-------|
    /// | `GROQ_API_KEY` | `model.api_key` |
    /// | `LITREVIEW_ENDPOINT` | `model.endpoint` |
    /// | `LITREVIEW_MODEL` | `model.model` |
    /// | `LITREVIEW_TOPIC` | `topic` |
    /// | `LITREVIEW_PAPERS` | `paper_titles` (`;` separated) |
    /// | `LITREVIEW_SUMMARY_WORDS` | `summary_word_count` |
    /// | `LITREVIEW_REVIEW_WORDS` | `review_word_count` |
    /// | `SEMANTIC_SCHOLAR_API_KEY` | `papers.api_key` |
    ///
    /// The credential is not validated here; see [`crate::precheck`].
    pub fn from_env() -> Result<Self, ReviewError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ReviewConfig::from_env`] but reads variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ReviewError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ReviewConfig::default();

        if let Some(key) = lookup("GROQ_API_KEY") {
            config.model.api_key = key.trim().to_string();
        }
        if let Some(endpoint) = non_empty(lookup("LITREVIEW_ENDPOINT")) {
            config.model.endpoint = endpoint.trim_end_matches('/').to_string();
        }
        if let Some(model) = non_empty(lookup("LITREVIEW_MODEL")) {
            config.model.model = model;
        }
        if let Some(key) = non_empty(lookup("SEMANTIC_SCHOLAR_API_KEY")) {
            config.papers.api_key = Some(key);
        }
        if let Some(topic) = non_empty(lookup("LITREVIEW_TOPIC")) {
            config.topic = topic;
        }
        if let Some(papers) = non_empty(lookup("LITREVIEW_PAPERS")) {
            config.paper_titles = papers
                .split(';')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(words) = non_empty(lookup("LITREVIEW_SUMMARY_WORDS")) {
            config.summary_word_count = parse_word_count("LITREVIEW_SUMMARY_WORDS", &words)?;
        }
        if let Some(words) = non_empty(lookup("LITREVIEW_REVIEW_WORDS")) {
            config.review_word_count = parse_word_count("LITREVIEW_REVIEW_WORDS", &words)?;
        }

        Ok(config)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_word_count(name: &str, value: &str) -> Result<usize, ReviewError> {
    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ReviewError::Config(format!(
            "{} must be a positive integer, got '{}'",
            name, value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = ReviewConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.model.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.topic, DEFAULT_TOPIC);
        assert_eq!(config.paper_titles.len(), 6);
        assert!(config.model.api_key.is_empty());
    }

    #[test]
    fn overrides_are_applied() {
        let config = ReviewConfig::from_lookup(lookup_from(&[
            ("GROQ_API_KEY", " gsk_abc "),
            ("LITREVIEW_ENDPOINT", "http://localhost:8080/v1/"),
            ("LITREVIEW_PAPERS", "Paper A; ;Paper B"),
            ("LITREVIEW_REVIEW_WORDS", "250"),
        ]))
        .unwrap();
        assert_eq!(config.model.api_key, "gsk_abc");
        assert_eq!(config.model.endpoint, "http://localhost:8080/v1");
        assert_eq!(config.paper_titles, vec!["Paper A", "Paper B"]);
        assert_eq!(config.review_word_count, 250);
    }

    #[test]
    fn invalid_word_count_is_a_config_error() {
        let err = ReviewConfig::from_lookup(lookup_from(&[("LITREVIEW_SUMMARY_WORDS", "lots")]))
            .unwrap_err();
        assert!(matches!(err, ReviewError::Config(_)));
    }
}
