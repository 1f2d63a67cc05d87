//! Chart construction from merged word counts.

use crate::count::WordCounts;

/// One bar of the frequency chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bar {
    /// The word
    pub label: String,

    /// Its occurrence count
    pub value: u64,
}

/// A renderer-independent description of the frequency chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSpec {
    /// Chart title
    pub title: String,

    /// X-axis label
    pub x_label: String,

    /// Y-axis label
    pub y_label: String,

    /// X-tick label rotation hint in degrees
    pub x_tick_rotation_degrees: u32,

    /// Bars in display order, highest count first
    pub bars: Vec<Bar>,
}

impl ChartSpec {
    /// Build the top-`top_n` chart for merged counts.
    ///
    /// Returns `None` when there are no words to chart; callers must not
    /// hand an empty tally to a renderer.
    pub fn top_words(counts: &WordCounts, top_n: usize) -> Option<Self> {
        let top = top_words(counts, top_n);
        if top.is_empty() {
            return None;
        }
        Some(Self {
            title: format!("Top {} most frequent words", top_n),
            x_label: "Words".to_string(),
            y_label: "Frequency".to_string(),
            x_tick_rotation_degrees: 45,
            bars: top
                .into_iter()
                .map(|(label, value)| Bar { label, value })
                .collect(),
        })
    }

    /// Largest bar value (zero for an empty chart).
    pub fn max_value(&self) -> u64 {
        self.bars.iter().map(|b| b.value).max().unwrap_or(0)
    }
}

/// Select the `n` most frequent words, highest count first.
///
/// Equal counts order lexicographically, so repeated runs over the same
/// document produce the same chart.
pub fn top_words(counts: &WordCounts, n: usize) -> Vec<(String, u64)> {
    let mut entries: Vec<(String, u64)> = counts
        .iter()
        .map(|(word, count)| (word.to_string(), count))
        .collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    entries.truncate(n);
    entries
}
