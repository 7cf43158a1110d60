//! Configuration types for wiki-wordcount

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Wikipedia endpoint configuration
///
/// Groups the endpoint bases and HTTP client settings used when talking to
/// Wikipedia. Used as a nested sub-config within [`Config`]. The bases are
/// overridable so tests can point the client at a local mock server.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WikipediaConfig {
    /// Base URL of the MediaWiki query API (default: "https://en.wikipedia.org/w/api.php")
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Base URL for rendered pages, queried with `curid` (default: "https://en.wikipedia.org/wiki")
    #[serde(default = "default_page_base")]
    pub page_base: String,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout (default: 30 seconds)
    #[serde(default = "default_request_timeout", with = "duration_serde")]
    pub request_timeout: Duration,
}

impl Default for WikipediaConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            page_base: default_page_base(),
            user_agent: default_user_agent(),
            request_timeout: default_request_timeout(),
        }
    }
}

/// What to do when a single article's survey fails
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Propagate the first error and end the run with no report
    Abort,
    /// Log the failure, count it as skipped, and continue with the next article (default)
    #[default]
    Skip,
}

/// Survey behavior configuration
///
/// Groups settings for the survey loop itself. Used as a nested sub-config
/// within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SurveyConfig {
    /// Number of articles to survey (default: 100)
    #[serde(default = "default_n_articles")]
    pub n_articles: u32,

    /// How to handle a failed iteration (default: skip)
    #[serde(default)]
    pub failure_policy: FailurePolicy,

    /// Also fetch each article's short extract and carry it in the record
    /// as diagnostic output (default: false)
    ///
    /// When disabled the extract endpoint is never called.
    #[serde(default)]
    pub include_extracts: bool,
}

impl Default for SurveyConfig {
    fn default() -> Self {
        Self {
            n_articles: default_n_articles(),
            failure_policy: FailurePolicy::default(),
            include_extracts: false,
        }
    }
}

/// Retry behavior for transient fetch failures
///
/// Retries are off by default (`max_attempts: 0`): every fetch is a single
/// attempt unless the embedder opts in.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of retry attempts (default: 0, no retries)
    #[serde(default)]
    pub max_attempts: u32,

    /// Initial delay before first retry (default: 1 second)
    #[serde(default = "default_initial_delay", with = "duration_serde")]
    pub initial_delay: Duration,

    /// Maximum delay between retries (default: 60 seconds)
    #[serde(default = "default_max_delay", with = "duration_serde")]
    pub max_delay: Duration,

    /// Multiplier for exponential backoff (default: 2.0)
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,

    /// Add random jitter to delays (default: true)
    #[serde(default = "default_true")]
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 0,
            initial_delay: default_initial_delay(),
            max_delay: default_max_delay(),
            backoff_multiplier: default_backoff_multiplier(),
            jitter: true,
        }
    }
}

/// Main configuration for the surveyor
///
/// Works out of the box with `Config::default()`: English Wikipedia endpoints,
/// 100 articles, skip-on-failure, no retries.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Wikipedia endpoints and HTTP client settings
    #[serde(default)]
    pub wikipedia: WikipediaConfig,

    /// Survey loop settings
    #[serde(default)]
    pub survey: SurveyConfig,

    /// Retry settings for transient fetch failures
    #[serde(default)]
    pub retry: RetryConfig,
}

impl Config {
    /// Validate the configuration
    ///
    /// Rejects empty endpoint bases and a non-positive backoff multiplier.
    pub fn validate(&self) -> Result<()> {
        if self.wikipedia.api_base.trim().is_empty() {
            return Err(Error::Config {
                message: "api_base must not be empty".to_string(),
                key: Some("wikipedia.api_base".to_string()),
            });
        }
        if self.wikipedia.page_base.trim().is_empty() {
            return Err(Error::Config {
                message: "page_base must not be empty".to_string(),
                key: Some("wikipedia.page_base".to_string()),
            });
        }
        if self.retry.backoff_multiplier <= 0.0 {
            return Err(Error::Config {
                message: format!(
                    "backoff_multiplier must be positive, got {}",
                    self.retry.backoff_multiplier
                ),
                key: Some("retry.backoff_multiplier".to_string()),
            });
        }
        Ok(())
    }
}

fn default_api_base() -> String {
    "https://en.wikipedia.org/w/api.php".to_string()
}

fn default_page_base() -> String {
    "https://en.wikipedia.org/wiki".to_string()
}

fn default_user_agent() -> String {
    format!("wiki-wordcount/{}", env!("CARGO_PKG_VERSION"))
}

fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_n_articles() -> u32 {
    100
}

fn default_initial_delay() -> Duration {
    Duration::from_secs(1)
}

fn default_max_delay() -> Duration {
    Duration::from_secs(60)
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_true() -> bool {
    true
}

// Duration serialization helper
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}
