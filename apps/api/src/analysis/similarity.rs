//! Text similarity backends.
//!
//! The scorer only needs "how similar are these two text blocks, in [0, 1]". The backend is a
//! trait object carried by the engine so an embedding model can replace the default lexical
//! backend without touching the scoring code.

use std::collections::HashMap;

/// Normalized similarity between two text blocks.
///
/// Implementations must return a value in [0, 1] and exactly 0.0 when either side is empty.
pub trait TextSimilarity: Send + Sync {
    fn similarity(&self, source: &str, target: &str) -> f64;

    /// Short label reported in logs.
    fn backend_name(&self) -> &'static str;
}

/// Cosine similarity of term-frequency vectors.
///
/// Terms are maximal runs of ASCII alphanumerics plus `+`, `#` and `.` inside a word, so
/// "c++", "c#" and "node.js" survive tokenization. Deterministic and allocation-light.
#[derive(Debug, Clone, Copy, Default)]
pub struct TermFrequencyCosine;

impl TextSimilarity for TermFrequencyCosine {
    fn similarity(&self, source: &str, target: &str) -> f64 {
        let a = term_frequencies(source);
        let b = term_frequencies(target);
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }

        let (small, large) = if a.len() <= b.len() { (&a, &b) } else { (&b, &a) };
        let dot: f64 = small
            .iter()
            .filter_map(|(term, &x)| large.get(term).map(|&y| x * y))
            .sum();

        let norm_a = a.values().map(|x| x * x).sum::<f64>().sqrt();
        let norm_b = b.values().map(|x| x * x).sum::<f64>().sqrt();
        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }

        (dot / (norm_a * norm_b)).clamp(0.0, 1.0)
    }

    fn backend_name(&self) -> &'static str {
        "term_frequency_cosine"
    }
}

fn term_frequencies(text: &str) -> HashMap<String, f64> {
    let mut tf = HashMap::new();
    for term in tokenize(text) {
        *tf.entry(term).or_insert(0.0) += 1.0;
    }
    tf
}

/// Lowercased terms of `text`.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '+' | '#' | '.')))
        .map(|raw| raw.trim_matches('.'))
        .filter(|term| term.chars().any(|c| c.is_ascii_alphanumeric()))
        .map(|term| term.to_ascii_lowercase())
        .collect()
}
