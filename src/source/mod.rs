//! Article sources
//!
//! The [`ArticleSource`] trait is the seam between the survey loop and the
//! outside world: the production implementation ([`WikipediaSource`]) talks
//! to Wikipedia over HTTP, and tests substitute scripted sources.

mod wikipedia;

pub use wikipedia::WikipediaSource;

use crate::error::Result;
use crate::types::ArticleId;
use async_trait::async_trait;

/// Supplier of random article identifiers and article content
#[async_trait]
pub trait ArticleSource: Send + Sync {
    /// Select a random article and return its id
    ///
    /// Fails with a fetch error when the id cannot be obtained; a missing or
    /// empty result set is an error, never a silent default.
    async fn random_article_id(&self) -> Result<ArticleId>;

    /// Fetch the short plain-text extract of an article
    async fn article_extract(&self, id: ArticleId) -> Result<String>;

    /// Fetch the full rendered page of an article as raw markup
    async fn article_html(&self, id: ArticleId) -> Result<String>;
}
