//! Paper source adapter.
//!
//! [`PaperSource`] is the seam to an external academic-search service: one call takes a
//! query and a result bound and returns papers in the service's ranking order.
//! [`SemanticScholarSource`] implements it over the Semantic Scholar Graph API.
//!
//! Missing abstracts and links never fail a search; they degrade to
//! [`NO_SUMMARY`] and [`NO_LINK`].
//!
//! ```
//! use litreview::papers::{Paper, NO_LINK, NO_SUMMARY};
//!
//! let paper = Paper::from_parts("Attention Is All You Need", None, None);
//! assert_eq!(paper.summary, NO_SUMMARY);
//! assert_eq!(paper.link, NO_LINK);
//! ```

use crate::litreview::client_wrapper::ClientError;
use crate::litreview::clients::http_pool::get_http_client;
use crate::litreview::config::PaperSourceConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub const NO_SUMMARY: &str = "No summary available";
pub const NO_LINK: &str = "No link available";

/// A fetched paper. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Paper {
    pub title: String,
    /// Abstract text, or [`NO_SUMMARY`].
    pub summary: String,
    /// URL of the paper, or [`NO_LINK`].
    pub link: String,
}

impl Paper {
    /// Build a paper, substituting placeholders for absent or blank fields.
    pub fn from_parts(
        title: impl Into<String>,
        summary: Option<String>,
        link: Option<String>,
    ) -> Self {
        Self {
            title: title.into(),
            summary: present(summary).unwrap_or_else(|| NO_SUMMARY.to_string()),
            link: present(link).unwrap_or_else(|| NO_LINK.to_string()),
        }
    }

    pub fn has_link(&self) -> bool {
        self.link != NO_LINK
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// An external academic-search service.
#[async_trait]
pub trait PaperSource: Send + Sync {
    /// Up to `max_results` papers matching `query`, best match first.
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<Paper>, ClientError>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: Option<String>,
    #[serde(rename = "abstract")]
    abstract_text: Option<String>,
    url: Option<String>,
}

/// Decode a Semantic Scholar `/paper/search` response body into papers.
///
/// Hits without a title are dropped.
pub fn parse_search_response(body: &str) -> Result<Vec<Paper>, serde_json::Error> {
    let response: SearchResponse = serde_json::from_str(body)?;
    Ok(response
        .data
        .into_iter()
        .filter_map(|hit| {
            let title = present(hit.title)?;
            Some(Paper::from_parts(title, hit.abstract_text, hit.url))
        })
        .collect())
}

/// [`PaperSource`] backed by the Semantic Scholar Graph API.
pub struct SemanticScholarSource {
    base_url: String,
    api_key: Option<String>,
    http: reqwest::Client,
}

impl SemanticScholarSource {
    pub fn new(config: &PaperSourceConfig) -> Self {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        Self {
            http: get_http_client(&base_url),
            base_url,
            api_key: config.api_key.clone(),
        }
    }

    fn search_url(&self, query: &str, max_results: usize) -> String {
        format!(
            "{}/paper/search?query={}&limit={}&fields=title,abstract,url",
            self.base_url,
            urlencoding::encode(query),
            max_results
        )
    }
}

#[async_trait]
impl PaperSource for SemanticScholarSource {
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<Paper>, ClientError> {
        let mut request = self.http.get(self.search_url(query, max_results));
        if let Some(key) = &self.api_key {
            request = request.header("x-api-key", key);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            log::error!(
                "SemanticScholarSource::search({}): HTTP {}: {}",
                query,
                status,
                body
            );
            return Err(format!("paper search returned HTTP {}", status).into());
        }

        let mut papers = parse_search_response(&body)?;
        papers.truncate(max_results);
        log::debug!(
            "SemanticScholarSource::search({}): {} result(s)",
            query,
            papers.len()
        );
        Ok(papers)
    }
}
