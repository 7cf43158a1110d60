//! Word counting and leading-digit statistics

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Count the whitespace-separated words in a text blob
///
/// A word is a maximal run of non-whitespace characters. Empty text counts
/// as zero words.
pub fn count_words(text: &str) -> u64 {
    text.split_whitespace().count() as u64
}

/// Leading decimal digit of a non-negative number
///
/// Returns the integer value of the first character of `n`'s decimal
/// representation: `first_digit(942) == 9`, `first_digit(7) == 7`, and
/// `first_digit(0) == 0`. Negative input fails with
/// [`Error::NegativeWordCount`] since the sign character is not a digit.
pub fn first_digit(n: i64) -> Result<u8> {
    if n < 0 {
        return Err(Error::NegativeWordCount { value: n });
    }
    let mut m = n as u64;
    while m >= 10 {
        m /= 10;
    }
    Ok(m as u8)
}

/// Expected relative frequency of a leading digit under Benford's law
///
/// Defined for digits 1 through 9 as `log10(1 + 1/d)`; returns 0.0 for any
/// other input (a leading digit of 0 only occurs for the number 0, which the
/// law does not cover).
pub fn benford_expected(digit: u8) -> f64 {
    if (1..=9).contains(&digit) {
        (1.0 + 1.0 / f64::from(digit)).log10()
    } else {
        0.0
    }
}

/// Counts of leading digits 0 through 9
///
/// Built incrementally as articles are surveyed; index `d` holds the number
/// of records whose word count had leading digit `d`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DigitHistogram {
    counts: [u64; 10],
}

impl DigitHistogram {
    /// Create an empty histogram
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one observation of a leading digit
    ///
    /// Digits above 9 are ignored; callers obtain digits from
    /// [`first_digit`], which only produces 0 through 9.
    pub fn record(&mut self, digit: u8) {
        if let Some(slot) = self.counts.get_mut(digit as usize) {
            *slot += 1;
        }
    }

    /// Number of observations of a given digit
    pub fn count(&self, digit: u8) -> u64 {
        self.counts.get(digit as usize).copied().unwrap_or(0)
    }

    /// Total number of observations
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Observed relative frequency of each digit
    ///
    /// Returns all zeros when the histogram is empty.
    pub fn distribution(&self) -> [f64; 10] {
        let total = self.total();
        if total == 0 {
            return [0.0; 10];
        }
        let mut dist = [0.0; 10];
        for (digit, &count) in self.counts.iter().enumerate() {
            dist[digit] = count as f64 / total as f64;
        }
        dist
    }

    /// True when no observations have been recorded
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}
