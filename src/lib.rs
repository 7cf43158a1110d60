//! # wiki-wordcount
//!
//! Library for surveying random Wikipedia articles: each article's rendered
//! page is fetched, reduced to its visible body text, word-counted, and
//! classified by the leading decimal digit of that count. The collected
//! records and their leading-digit histogram are the raw material for a
//! Benford's-law-style look at article lengths.
//!
//! ## Design Philosophy
//!
//! wiki-wordcount is designed to be:
//! - **Library-first** - No CLI or UI, purely a Rust crate for embedding
//! - **Sensible defaults** - Works out of the box against English Wikipedia
//! - **Event-driven** - Consumers subscribe to progress events, no polling required
//! - **Swappable** - Article content comes through a trait, so tests and
//!   embedders can substitute their own sources
//!
//! ## Quick Start
//!
//! ```no_run
//! use wiki_wordcount::{Config, Surveyor};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut config = Config::default();
//!     config.survey.n_articles = 10;
//!
//!     let surveyor = Surveyor::new(config)?;
//!
//!     // Subscribe to progress events
//!     let mut events = surveyor.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             println!("Event: {:?}", event);
//!         }
//!     });
//!
//!     let report = surveyor.run().await?;
//!     println!("{}", serde_json::to_string_pretty(&report)?);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Article body text extraction
pub mod extract;
/// Retry logic with exponential backoff
pub mod retry;
/// Article sources (trait seam + Wikipedia HTTP implementation)
pub mod source;
/// Word counting and leading-digit statistics
pub mod stats;
/// Survey orchestration
pub mod survey;
/// Core types and events
pub mod types;

// Re-export commonly used types
pub use config::{Config, FailurePolicy, RetryConfig, SurveyConfig, WikipediaConfig};
pub use error::{Error, FetchError, ParseError, Result};
pub use source::{ArticleSource, WikipediaSource};
pub use stats::DigitHistogram;
pub use survey::Surveyor;
pub use types::{ArticleId, ArticleRecord, Event, SurveyReport};
