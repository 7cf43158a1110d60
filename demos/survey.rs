//! Basic survey example
//!
//! This example demonstrates the core functionality of wiki-wordcount:
//! - Building a configuration
//! - Creating a surveyor instance
//! - Subscribing to events
//! - Running a small survey and printing the report as JSON

use wiki_wordcount::{Config, Event, Surveyor};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing for logging (optional)
    // Uncomment if you add tracing-subscriber to your dependencies:
    // tracing_subscriber::fmt::init();

    // Build configuration: a short run with per-article failures skipped
    let mut config = Config::default();
    config.survey.n_articles = 10;

    // Create surveyor instance
    let surveyor = Surveyor::new(config)?;

    // Subscribe to events
    let mut events = surveyor.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            match event {
                Event::ArticleStarted { index, id } => {
                    println!("→ [{}] surveying article {}", index + 1, id);
                }
                Event::ArticleSurveyed { record } => {
                    println!(
                        "✓ article {}: {} words (leading digit {})",
                        record.article_id, record.n_words, record.first_digit
                    );
                }
                Event::ArticleSkipped { index, id, error } => {
                    println!("✗ [{}] skipped {:?}: {}", index + 1, id, error);
                }
                Event::SurveyComplete { surveyed, skipped } => {
                    println!("Done: {} surveyed, {} skipped", surveyed, skipped);
                }
            }
        }
    });

    // Run the survey and print the full report
    let report = surveyor.run().await?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
