//! Wikipedia-backed article source

use super::ArticleSource;
use crate::config::WikipediaConfig;
use crate::error::{Error, FetchError, Result};
use crate::types::ArticleId;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use url::Url;

/// Article source backed by the public Wikipedia HTTP endpoints
///
/// Issues one request per operation: no caching, no pagination. The client
/// carries the configured timeout and User-Agent on every request.
pub struct WikipediaSource {
    client: reqwest::Client,
    config: WikipediaConfig,
}

impl WikipediaSource {
    /// Create a source from endpoint configuration
    ///
    /// Builds the underlying HTTP client with the configured request timeout
    /// and User-Agent header.
    pub fn new(config: WikipediaConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self { client, config })
    }

    fn api_url(&self, params: &[(&str, &str)]) -> Result<Url> {
        Url::parse_with_params(&self.config.api_base, params).map_err(|e| Error::Config {
            message: format!("invalid API base URL '{}': {}", self.config.api_base, e),
            key: Some("wikipedia.api_base".to_string()),
        })
    }

    fn page_url(&self, params: &[(&str, &str)]) -> Result<Url> {
        Url::parse_with_params(&self.config.page_base, params).map_err(|e| Error::Config {
            message: format!("invalid page base URL '{}': {}", self.config.page_base, e),
            key: Some("wikipedia.page_base".to_string()),
        })
    }

    /// GET a URL and return the body text after checking the status code
    async fn get_text(&self, url: Url) -> Result<String> {
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Fetch(FetchError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            }));
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl ArticleSource for WikipediaSource {
    async fn random_article_id(&self) -> Result<ArticleId> {
        let url = self.api_url(&[
            ("action", "query"),
            ("list", "random"),
            ("rnnamespace", "0"),
            ("format", "json"),
        ])?;
        let url_str = url.to_string();

        let body = self.get_text(url).await?;
        let parsed: RandomQueryResponse = serde_json::from_str(&body)?;

        let entry = parsed.query.random.first().ok_or_else(|| {
            Error::Fetch(FetchError::MissingField {
                url: url_str,
                field: "query.random[0].id".to_string(),
            })
        })?;

        tracing::debug!(article_id = entry.id, "selected random article");
        Ok(ArticleId::new(entry.id))
    }

    async fn article_extract(&self, id: ArticleId) -> Result<String> {
        let id_str = id.to_string();
        let url = self.api_url(&[
            ("action", "query"),
            ("prop", "extracts"),
            ("format", "json"),
            ("pageids", id_str.as_str()),
        ])?;
        let url_str = url.to_string();

        let body = self.get_text(url).await?;
        let parsed: ExtractQueryResponse = serde_json::from_str(&body)?;

        parsed
            .query
            .pages
            .get(&id_str)
            .and_then(|page| page.extract.clone())
            .ok_or_else(|| {
                Error::Fetch(FetchError::MissingField {
                    url: url_str,
                    field: format!("query.pages.{id_str}.extract"),
                })
            })
    }

    async fn article_html(&self, id: ArticleId) -> Result<String> {
        let id_str = id.to_string();
        let url = self.page_url(&[("curid", id_str.as_str())])?;
        self.get_text(url).await
    }
}

/// Response shape of the random-article query
#[derive(Debug, Deserialize)]
struct RandomQueryResponse {
    query: RandomQuery,
}

#[derive(Debug, Deserialize)]
struct RandomQuery {
    #[serde(default)]
    random: Vec<RandomEntry>,
}

#[derive(Debug, Deserialize)]
struct RandomEntry {
    id: u64,
}

/// Response shape of the extracts query, keyed by page id
#[derive(Debug, Deserialize)]
struct ExtractQueryResponse {
    query: ExtractQuery,
}

#[derive(Debug, Deserialize)]
struct ExtractQuery {
    #[serde(default)]
    pages: HashMap<String, ExtractPage>,
}

#[derive(Debug, Deserialize)]
struct ExtractPage {
    extract: Option<String>,
}
