//! Survey orchestration
//!
//! [`Surveyor`] drives the pipeline: select a random article, fetch its
//! rendered page (and optionally its extract), reduce the page to visible
//! text, count words, classify the leading digit, and collect one record per
//! article. The loop is strictly sequential; consumers observe progress
//! through broadcast events instead of polling.

use crate::config::{Config, FailurePolicy};
use crate::error::{Error, Result};
use crate::extract;
use crate::retry::fetch_with_retry;
use crate::source::{ArticleSource, WikipediaSource};
use crate::stats::{self, DigitHistogram};
use crate::types::{ArticleId, ArticleRecord, Event, SurveyReport};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Capacity of the event broadcast channel
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// A failed iteration, carrying the article id when one was already selected
struct IterationFailure {
    id: Option<ArticleId>,
    error: Error,
}

/// Drives the word-count survey over random Wikipedia articles
pub struct Surveyor {
    config: Config,
    source: Arc<dyn ArticleSource>,
    event_tx: broadcast::Sender<Event>,
}

impl Surveyor {
    /// Create a surveyor backed by the Wikipedia HTTP endpoints
    pub fn new(config: Config) -> Result<Self> {
        let source = Arc::new(WikipediaSource::new(config.wikipedia.clone())?);
        Self::with_source(config, source)
    }

    /// Create a surveyor with a custom article source
    ///
    /// Used by tests and by embedders that supply ids and content from
    /// somewhere other than the live Wikipedia endpoints.
    pub fn with_source(config: Config, source: Arc<dyn ArticleSource>) -> Result<Self> {
        config.validate()?;
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Ok(Self {
            config,
            source,
            event_tx,
        })
    }

    /// Subscribe to progress events
    ///
    /// Each receiver gets every event emitted after the subscription. Events
    /// are dropped (not buffered) when no receiver exists.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Run the survey and return the collected report
    ///
    /// Surveys `config.survey.n_articles` articles sequentially. With
    /// [`FailurePolicy::Skip`] a failed iteration is logged, counted, and
    /// skipped; with [`FailurePolicy::Abort`] the first error ends the run.
    /// Zero articles yields an empty report without touching the network.
    pub async fn run(&self) -> Result<SurveyReport> {
        let n_articles = self.config.survey.n_articles;
        let started_at = Utc::now();
        let mut records = Vec::with_capacity(n_articles as usize);
        let mut histogram = DigitHistogram::new();
        let mut skipped = 0u64;

        tracing::info!(n_articles, "starting survey");

        for index in 0..n_articles {
            match self.survey_one(index).await {
                Ok(record) => {
                    histogram.record(record.first_digit);
                    self.emit(Event::ArticleSurveyed {
                        record: record.clone(),
                    });
                    records.push(record);
                }
                Err(failure) => match self.config.survey.failure_policy {
                    FailurePolicy::Abort => {
                        tracing::error!(
                            index,
                            article_id = ?failure.id,
                            error = %failure.error,
                            "article survey failed, aborting run"
                        );
                        return Err(failure.error);
                    }
                    FailurePolicy::Skip => {
                        tracing::warn!(
                            index,
                            article_id = ?failure.id,
                            error = %failure.error,
                            "article survey failed, skipping"
                        );
                        skipped += 1;
                        self.emit(Event::ArticleSkipped {
                            index,
                            id: failure.id,
                            error: failure.error.to_string(),
                        });
                    }
                },
            }
        }

        let finished_at = Utc::now();
        self.emit(Event::SurveyComplete {
            surveyed: records.len() as u64,
            skipped,
        });
        tracing::info!(surveyed = records.len(), skipped, "survey complete");

        Ok(SurveyReport {
            records,
            histogram,
            skipped,
            started_at,
            finished_at,
        })
    }

    /// Survey one article: select an id, then run the per-article pipeline
    async fn survey_one(&self, index: u32) -> std::result::Result<ArticleRecord, IterationFailure> {
        let retry = &self.config.retry;

        let article_id = fetch_with_retry(retry, || self.source.random_article_id())
            .await
            .map_err(|error| IterationFailure { id: None, error })?;

        self.emit(Event::ArticleStarted {
            index,
            id: article_id,
        });

        self.survey_article(article_id)
            .await
            .map_err(|error| IterationFailure {
                id: Some(article_id),
                error,
            })
    }

    /// Fetch, extract, count and classify a single article
    async fn survey_article(&self, article_id: ArticleId) -> Result<ArticleRecord> {
        let retry = &self.config.retry;

        let extract_text = if self.config.survey.include_extracts {
            Some(fetch_with_retry(retry, || self.source.article_extract(article_id)).await?)
        } else {
            None
        };

        let html = fetch_with_retry(retry, || self.source.article_html(article_id)).await?;
        let text = extract::article_text(&html)?;
        let n_words = stats::count_words(&text);
        let first_digit = stats::first_digit(n_words as i64)?;

        tracing::debug!(%article_id, n_words, first_digit, "article surveyed");

        Ok(ArticleRecord {
            article_id,
            n_words,
            first_digit,
            extract: extract_text,
        })
    }

    fn emit(&self, event: Event) {
        // send errors only mean nobody is subscribed
        let _ = self.event_tx.send(event);
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SurveyConfig;
    use crate::error::FetchError;
    use async_trait::async_trait;
    use std::collections::{HashMap, VecDeque};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};

    /// Test double that serves ids and content from in-memory tables
    #[derive(Default)]
    struct ScriptedSource {
        ids: Mutex<VecDeque<u64>>,
        htmls: HashMap<u64, String>,
        extracts: HashMap<u64, String>,
        id_calls: AtomicU32,
        html_calls: AtomicU32,
        extract_calls: AtomicU32,
    }

    impl ScriptedSource {
        fn new(ids: &[u64]) -> Self {
            Self {
                ids: Mutex::new(ids.iter().copied().collect()),
                ..Default::default()
            }
        }

        fn with_article(mut self, id: u64, html: &str) -> Self {
            self.htmls.insert(id, html.to_string());
            self
        }

        fn with_extract(mut self, id: u64, extract: &str) -> Self {
            self.extracts.insert(id, extract.to_string());
            self
        }
    }

    #[async_trait]
    impl ArticleSource for ScriptedSource {
        async fn random_article_id(&self) -> Result<ArticleId> {
            self.id_calls.fetch_add(1, Ordering::SeqCst);
            self.ids
                .lock()
                .unwrap()
                .pop_front()
                .map(ArticleId::new)
                .ok_or_else(|| {
                    Error::Fetch(FetchError::MissingField {
                        url: "scripted://random".to_string(),
                        field: "query.random[0].id".to_string(),
                    })
                })
        }

        async fn article_extract(&self, id: ArticleId) -> Result<String> {
            self.extract_calls.fetch_add(1, Ordering::SeqCst);
            self.extracts.get(&id.get()).cloned().ok_or_else(|| {
                Error::Fetch(FetchError::HttpStatus {
                    url: format!("scripted://extract/{id}"),
                    status: 404,
                })
            })
        }

        async fn article_html(&self, id: ArticleId) -> Result<String> {
            self.html_calls.fetch_add(1, Ordering::SeqCst);
            self.htmls.get(&id.get()).cloned().ok_or_else(|| {
                Error::Fetch(FetchError::HttpStatus {
                    url: format!("scripted://page/{id}"),
                    status: 404,
                })
            })
        }
    }

    fn page_with_words(n: usize) -> String {
        let words: Vec<String> = (0..n).map(|i| format!("w{i}")).collect();
        format!(
            "<html><body><div class=\"mw-parser-output\"><p>{}</p></div></body></html>",
            words.join(" ")
        )
    }

    fn config_for(n_articles: u32) -> Config {
        Config {
            survey: SurveyConfig {
                n_articles,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn single_article_produces_expected_record() {
        let source = ScriptedSource::new(&[12345]).with_article(12345, &page_with_words(2345));
        let surveyor = Surveyor::with_source(config_for(1), Arc::new(source)).unwrap();

        let report = surveyor.run().await.unwrap();

        assert_eq!(report.records.len(), 1);
        let record = &report.records[0];
        assert_eq!(record.article_id, 12345u64);
        assert_eq!(record.n_words, 2345);
        assert_eq!(record.first_digit, 2);
        assert!(record.extract.is_none());
        assert_eq!(report.skipped, 0);
        assert_eq!(report.histogram.count(2), 1);
        assert_eq!(report.histogram.total(), 1);
        assert!(report.finished_at >= report.started_at);
    }

    #[tokio::test]
    async fn zero_articles_yields_empty_report_without_fetches() {
        let source = Arc::new(ScriptedSource::new(&[]));
        let surveyor = Surveyor::with_source(config_for(0), source.clone()).unwrap();

        let report = surveyor.run().await.unwrap();

        assert!(report.records.is_empty());
        assert_eq!(report.skipped, 0);
        assert!(report.histogram.is_empty());
        assert_eq!(source.id_calls.load(Ordering::SeqCst), 0);
        assert_eq!(source.html_calls.load(Ordering::SeqCst), 0);
        assert_eq!(source.extract_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn records_preserve_iteration_order() {
        let source = ScriptedSource::new(&[10, 20, 30])
            .with_article(10, &page_with_words(1))
            .with_article(20, &page_with_words(2))
            .with_article(30, &page_with_words(3));
        let surveyor = Surveyor::with_source(config_for(3), Arc::new(source)).unwrap();

        let report = surveyor.run().await.unwrap();

        let ids: Vec<u64> = report.records.iter().map(|r| r.article_id.get()).collect();
        assert_eq!(ids, vec![10, 20, 30]);
        let words: Vec<u64> = report.records.iter().map(|r| r.n_words).collect();
        assert_eq!(words, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn skip_policy_counts_failures_and_continues() {
        // Article 2 has no page; the other two survive
        let source = ScriptedSource::new(&[1, 2, 3])
            .with_article(1, &page_with_words(5))
            .with_article(3, &page_with_words(7));
        let surveyor = Surveyor::with_source(config_for(3), Arc::new(source)).unwrap();

        let report = surveyor.run().await.unwrap();

        assert_eq!(report.records.len(), 2);
        assert_eq!(report.skipped, 1);
        let ids: Vec<u64> = report.records.iter().map(|r| r.article_id.get()).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(report.histogram.total(), 2);
    }

    #[tokio::test]
    async fn abort_policy_propagates_first_failure() {
        let source = ScriptedSource::new(&[1, 2])
            .with_article(2, &page_with_words(4));
        let mut config = config_for(2);
        config.survey.failure_policy = FailurePolicy::Abort;
        let surveyor = Surveyor::with_source(config, Arc::new(source)).unwrap();

        let err = surveyor.run().await.unwrap_err();
        assert!(matches!(
            err,
            Error::Fetch(FetchError::HttpStatus { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn extracts_are_skipped_unless_enabled() {
        let source = Arc::new(
            ScriptedSource::new(&[5]).with_article(5, &page_with_words(9)),
        );
        let surveyor = Surveyor::with_source(config_for(1), source.clone()).unwrap();

        let report = surveyor.run().await.unwrap();

        assert_eq!(source.extract_calls.load(Ordering::SeqCst), 0);
        assert!(report.records[0].extract.is_none());
    }

    #[tokio::test]
    async fn extracts_ride_along_when_enabled() {
        let source = Arc::new(
            ScriptedSource::new(&[5])
                .with_article(5, &page_with_words(9))
                .with_extract(5, "A short summary."),
        );
        let mut config = config_for(1);
        config.survey.include_extracts = true;
        let surveyor = Surveyor::with_source(config, source.clone()).unwrap();

        let report = surveyor.run().await.unwrap();

        assert_eq!(source.extract_calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            report.records[0].extract.as_deref(),
            Some("A short summary.")
        );
    }

    #[tokio::test]
    async fn a_page_without_content_container_is_a_skippable_failure() {
        let source = ScriptedSource::new(&[1, 2])
            .with_article(1, "<html><body><p>no container</p></body></html>")
            .with_article(2, &page_with_words(3));
        let surveyor = Surveyor::with_source(config_for(2), Arc::new(source)).unwrap();

        let report = surveyor.run().await.unwrap();

        assert_eq!(report.records.len(), 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.records[0].article_id, 2u64);
    }

    #[tokio::test]
    async fn empty_article_yields_zero_words_and_digit_zero() {
        let source = ScriptedSource::new(&[8]).with_article(
            8,
            "<html><body><div class=\"mw-parser-output\"></div></body></html>",
        );
        let surveyor = Surveyor::with_source(config_for(1), Arc::new(source)).unwrap();

        let report = surveyor.run().await.unwrap();

        assert_eq!(report.records[0].n_words, 0);
        assert_eq!(report.records[0].first_digit, 0);
        assert_eq!(report.histogram.count(0), 1);
    }

    #[tokio::test]
    async fn events_trace_the_run_in_order() {
        let source = ScriptedSource::new(&[42]).with_article(42, &page_with_words(100));
        let surveyor = Surveyor::with_source(config_for(1), Arc::new(source)).unwrap();
        let mut events = surveyor.subscribe();

        surveyor.run().await.unwrap();

        assert!(matches!(
            events.try_recv().unwrap(),
            Event::ArticleStarted { index: 0, id } if id == 42u64
        ));
        assert!(matches!(
            events.try_recv().unwrap(),
            Event::ArticleSurveyed { record } if record.n_words == 100
        ));
        assert!(matches!(
            events.try_recv().unwrap(),
            Event::SurveyComplete {
                surveyed: 1,
                skipped: 0
            }
        ));
        assert!(events.try_recv().is_err(), "no further events expected");
    }

    #[tokio::test]
    async fn skipped_iteration_emits_event_with_article_id() {
        let source = ScriptedSource::new(&[9]);
        let surveyor = Surveyor::with_source(config_for(1), Arc::new(source)).unwrap();
        let mut events = surveyor.subscribe();

        let report = surveyor.run().await.unwrap();
        assert_eq!(report.skipped, 1);

        // ArticleStarted fires once the id is known, then the skip
        assert!(matches!(
            events.try_recv().unwrap(),
            Event::ArticleStarted { id, .. } if id == 9u64
        ));
        match events.try_recv().unwrap() {
            Event::ArticleSkipped { index, id, error } => {
                assert_eq!(index, 0);
                assert_eq!(id, Some(ArticleId::new(9)));
                assert!(error.contains("404"), "error should carry context: {error}");
            }
            other => panic!("expected ArticleSkipped, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn invalid_config_is_rejected_at_construction() {
        let mut config = config_for(1);
        config.wikipedia.api_base = String::new();
        let result = Surveyor::with_source(config, Arc::new(ScriptedSource::new(&[])));
        assert!(result.is_err());
    }
}
