//! Core types for wiki-wordcount

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::stats::DigitHistogram;

/// Unique identifier for a Wikipedia article (page id)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleId(pub u64);

impl ArticleId {
    /// Create a new ArticleId
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the inner u64 value
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl From<u64> for ArticleId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ArticleId> for u64 {
    fn from(id: ArticleId) -> Self {
        id.0
    }
}

impl PartialEq<u64> for ArticleId {
    fn eq(&self, other: &u64) -> bool {
        self.0 == *other
    }
}

impl PartialEq<ArticleId> for u64 {
    fn eq(&self, other: &ArticleId) -> bool {
        *self == other.0
    }
}

impl std::fmt::Display for ArticleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ArticleId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

/// Per-article survey result
///
/// One record is produced per successfully surveyed article, in iteration order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleRecord {
    /// Id of the surveyed article
    pub article_id: ArticleId,

    /// Number of whitespace-separated words in the article's extracted body text
    pub n_words: u64,

    /// Leading decimal digit of `n_words` (0 only when `n_words` is 0)
    pub first_digit: u8,

    /// Short plain-text summary of the article, captured only when
    /// [`SurveyConfig::include_extracts`](crate::config::SurveyConfig::include_extracts) is set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extract: Option<String>,
}

/// Final output of a survey run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SurveyReport {
    /// Per-article records in iteration order
    pub records: Vec<ArticleRecord>,

    /// Leading-digit counts over all records
    pub histogram: DigitHistogram,

    /// Number of iterations that failed and were skipped
    pub skipped: u64,

    /// When the run started
    pub started_at: DateTime<Utc>,

    /// When the run finished
    pub finished_at: DateTime<Utc>,
}

/// Progress events emitted during a survey run
///
/// Subscribe via [`Surveyor::subscribe`](crate::survey::Surveyor::subscribe).
/// Events are broadcast fire-and-forget; they are dropped when nobody listens.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    /// A random article id was selected and its survey is starting
    ArticleStarted {
        /// Zero-based iteration index
        index: u32,
        /// Id of the selected article
        id: ArticleId,
    },

    /// An article was surveyed successfully
    ArticleSurveyed {
        /// The record produced for the article
        record: ArticleRecord,
    },

    /// An iteration failed and was skipped
    ArticleSkipped {
        /// Zero-based iteration index
        index: u32,
        /// Id of the article, if one had already been selected
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<ArticleId>,
        /// Error message describing the failure
        error: String,
    },

    /// The run finished
    SurveyComplete {
        /// Number of articles surveyed successfully
        surveyed: u64,
        /// Number of iterations skipped due to failures
        skipped: u64,
    },
}
