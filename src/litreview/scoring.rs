//! ROUGE scoring of a generated review against a human-written reference.
//!
//! Text is lowercased and split on every character outside `[a-z0-9]`; tokens longer than
//! three characters are stemmed with the English Snowball stemmer. ROUGE-1 and ROUGE-2 use
//! clipped n-gram overlap, ROUGE-L the longest common token subsequence. Precision is
//! measured against the generated text, recall against the reference, and each score is
//! the F-measure rounded to four decimals.
//!
//! ```
//! use litreview::scoring::calculate_rouge_score;
//!
//! let scores = calculate_rouge_score("the cat sat", "the cat sat");
//! assert_eq!(scores.rouge1, 1.0);
//! assert_eq!(scores.rouge_l, 1.0);
//! ```

use rust_stemmers::{Algorithm, Stemmer};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// ROUGE F-measures, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RougeScores {
    #[serde(rename = "ROUGE-1")]
    pub rouge1: f64,
    #[serde(rename = "ROUGE-2")]
    pub rouge2: f64,
    #[serde(rename = "ROUGE-L")]
    pub rouge_l: f64,
}

impl fmt::Display for RougeScores {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ROUGE-1: {:.4}, ROUGE-2: {:.4}, ROUGE-L: {:.4}",
            self.rouge1, self.rouge2, self.rouge_l
        )
    }
}

/// Score `machine_text` against the reference `human_text`.
pub fn calculate_rouge_score(machine_text: &str, human_text: &str) -> RougeScores {
    let stemmer = Stemmer::create(Algorithm::English);
    let candidate = tokenize(machine_text, &stemmer);
    let reference = tokenize(human_text, &stemmer);

    RougeScores {
        rouge1: round4(ngram_fmeasure(&candidate, &reference, 1)),
        rouge2: round4(ngram_fmeasure(&candidate, &reference, 2)),
        rouge_l: round4(lcs_fmeasure(&candidate, &reference)),
    }
}

fn tokenize(text: &str, stemmer: &Stemmer) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit()))
        .filter(|t| !t.is_empty())
        .map(|t| {
            if t.len() > 3 {
                stemmer.stem(t).into_owned()
            } else {
                t.to_string()
            }
        })
        .collect()
}

fn ngram_counts(tokens: &[String], n: usize) -> HashMap<&[String], usize> {
    let mut counts = HashMap::new();
    if tokens.len() >= n {
        for gram in tokens.windows(n) {
            *counts.entry(gram).or_insert(0) += 1;
        }
    }
    counts
}

fn ngram_fmeasure(candidate: &[String], reference: &[String], n: usize) -> f64 {
    let candidate_counts = ngram_counts(candidate, n);
    let reference_counts = ngram_counts(reference, n);
    let candidate_total: usize = candidate_counts.values().sum();
    let reference_total: usize = reference_counts.values().sum();
    if candidate_total == 0 || reference_total == 0 {
        return 0.0;
    }

    let overlap: usize = candidate_counts
        .iter()
        .map(|(gram, count)| (*count).min(*reference_counts.get(gram).unwrap_or(&0)))
        .sum();

    fmeasure(
        overlap as f64 / candidate_total as f64,
        overlap as f64 / reference_total as f64,
    )
}

fn lcs_fmeasure(candidate: &[String], reference: &[String]) -> f64 {
    if candidate.is_empty() || reference.is_empty() {
        return 0.0;
    }
    let lcs = lcs_length(candidate, reference);
    fmeasure(
        lcs as f64 / candidate.len() as f64,
        lcs as f64 / reference.len() as f64,
    )
}

/// Two-row dynamic program over the token sequences.
fn lcs_length(a: &[String], b: &[String]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for x in a {
        for (j, y) in b.iter().enumerate() {
            curr[j + 1] = if x == y {
                prev[j] + 1
            } else {
                curr[j].max(prev[j + 1])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

fn fmeasure(precision: f64, recall: f64) -> f64 {
    if precision + recall > 0.0 {
        2.0 * precision * recall / (precision + recall)
    } else {
        0.0
    }
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
