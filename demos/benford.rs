//! Leading-digit distribution example
//!
//! Surveys a batch of random articles and prints the observed leading-digit
//! frequencies of their word counts next to the Benford's law expectation.

use wiki_wordcount::stats::benford_expected;
use wiki_wordcount::{Config, Surveyor};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::default();
    config.survey.n_articles = 30;

    let surveyor = Surveyor::new(config)?;
    let report = surveyor.run().await?;

    println!(
        "Surveyed {} articles ({} skipped)\n",
        report.records.len(),
        report.skipped
    );
    println!("digit  observed  benford");

    let dist = report.histogram.distribution();
    for digit in 1u8..=9 {
        println!(
            "{:>5}  {:>7.1}%  {:>6.1}%",
            digit,
            dist[digit as usize] * 100.0,
            benford_expected(digit) * 100.0
        );
    }

    Ok(())
}
