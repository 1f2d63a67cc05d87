//! Word tallying and count merging.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("static pattern"));

/// A tally of lowercase word tokens to occurrence counts.
///
/// Merging is a point-wise sum, so it is associative and commutative:
/// per-chunk tallies can be folded together in any order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WordCounts {
    counts: HashMap<String, u64>,
}

impl WordCounts {
    /// Create an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// True if no words have been recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Total occurrences across all words.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Occurrence count for `word` (zero if unseen).
    pub fn get(&self, word: &str) -> u64 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Record one occurrence of `word`.
    pub fn record(&mut self, word: &str) {
        *self.counts.entry(word.to_string()).or_insert(0) += 1;
    }

    /// Add every count from `other` into this tally.
    pub fn absorb(&mut self, other: WordCounts) {
        for (word, count) in other.counts {
            *self.counts.entry(word).or_insert(0) += count;
        }
    }

    /// Point-wise sum of two tallies.
    pub fn merge(mut a: WordCounts, b: WordCounts) -> WordCounts {
        a.absorb(b);
        a
    }

    /// Iterate over (word, count) pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(word, count)| (word.as_str(), *count))
    }
}

impl FromIterator<(&'static str, u64)> for WordCounts {
    fn from_iter<I: IntoIterator<Item = (&'static str, u64)>>(iter: I) -> Self {
        Self {
            counts: iter
                .into_iter()
                .map(|(word, count)| (word.to_string(), count))
                .collect(),
        }
    }
}

/// Tally word frequencies in `text`.
///
/// Tokens are runs of word characters (Unicode letters, digits, and
/// underscore), case-folded to lowercase; everything else separates
/// tokens. Pure function, safe to run concurrently over distinct chunks.
pub fn count_words(text: &str) -> WordCounts {
    let lowered = text.to_lowercase();
    let mut counts = WordCounts::new();
    for token in WORD_RE.find_iter(&lowered) {
        counts.record(token.as_str());
    }
    counts
}
