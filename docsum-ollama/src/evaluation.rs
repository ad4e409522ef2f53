//! Heuristic quality checks for generated summaries.
//!
//! Nothing here talks to Ollama. The scores are cheap enough to compute for
//! every completed job and are used to compare models and summary modes.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static SENTENCE_BREAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+").expect("sentence pattern compiles"));
static WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[a-zA-Z]+\b").expect("word pattern compiles"));

/// Phrases that show the opening sentence says what the document is.
const TOPIC_PHRASES: [&str; 10] = [
    "this document",
    "this report",
    "this policy",
    "this guide",
    "this manual",
    "this letter",
    "this correspondence",
    "this financial",
    "this is a",
    "this is an",
];

/// Scores for one summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryEvaluation {
    pub starts_on_topic: bool,
    pub word_count: usize,
    /// Generation time in seconds, two decimals.
    pub time_taken: f64,
    /// Flesch reading ease, 0 to 100.
    pub readability: f64,
    pub readability_label: &'static str,
}

/// Score a summary that took `elapsed_secs` to generate.
pub fn evaluate_summary(summary: &str, elapsed_secs: f64) -> SummaryEvaluation {
    let time_taken = round_to(elapsed_secs, 2);
    if summary.is_empty() {
        return SummaryEvaluation {
            starts_on_topic: false,
            word_count: 0,
            time_taken,
            readability: 0.0,
            readability_label: "N/A",
        };
    }

    let readability = flesch_reading_ease(summary);
    SummaryEvaluation {
        starts_on_topic: starts_on_topic(summary),
        word_count: summary.split_whitespace().count(),
        time_taken,
        readability,
        readability_label: readability_label(readability),
    }
}

/// Whether the first sentence introduces the document ("This report covers...").
pub fn starts_on_topic(summary: &str) -> bool {
    let first = summary
        .trim()
        .split('.')
        .next()
        .unwrap_or_default()
        .to_lowercase();
    !first.is_empty() && TOPIC_PHRASES.iter().any(|phrase| first.contains(phrase))
}

/// Flesch reading ease, clamped to `0.0..=100.0` and rounded to one decimal.
///
/// Higher is easier: 90+ reads at a primary-school level, below 30 is
/// professional prose.
pub fn flesch_reading_ease(text: &str) -> f64 {
    if text.trim().is_empty() {
        return 0.0;
    }

    let sentences = SENTENCE_BREAK
        .split(text)
        .filter(|s| !s.trim().is_empty())
        .count()
        .max(1);
    let words: Vec<&str> = WORD.find_iter(text).map(|m| m.as_str()).collect();
    let syllables: usize = words.iter().map(|w| syllables(w)).sum();
    let word_count = words.len().max(1) as f64;

    let score = 206.835
        - 1.015 * (word_count / sentences as f64)
        - 84.6 * (syllables as f64 / word_count);
    round_to(score.clamp(0.0, 100.0), 1)
}

fn readability_label(score: f64) -> &'static str {
    if score >= 70.0 {
        "Easy"
    } else if score >= 50.0 {
        "Medium"
    } else if score >= 30.0 {
        "Difficult"
    } else {
        "Very Difficult"
    }
}

/// Vowel groups, minus a silent trailing `e`, never less than one.
fn syllables(word: &str) -> usize {
    let word = word.to_ascii_lowercase();
    let mut count = 0;
    let mut prev_vowel = false;
    for c in word.chars() {
        let vowel = matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        if vowel && !prev_vowel {
            count += 1;
        }
        prev_vowel = vowel;
    }
    if word.ends_with('e') && count > 1 {
        count -= 1;
    }
    count.max(1)
}

#[inline]
fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opening_sentence_must_name_the_document() {
        assert!(starts_on_topic("This report covers Q3 revenue. Sales rose."));
        assert!(starts_on_topic("  THIS IS AN internal memo about parking."));
        assert!(!starts_on_topic("Sales rose sharply. This report explains why."));
        assert!(!starts_on_topic(""));
    }

    #[test]
    fn syllables_follow_vowel_groups() {
        assert_eq!(syllables("cat"), 1);
        assert_eq!(syllables("reading"), 2);
        assert_eq!(syllables("make"), 1);
        assert_eq!(syllables("the"), 1);
        assert_eq!(syllables("rhythm"), 1);
        assert_eq!(syllables("Beautiful"), 3);
    }

    #[test]
    fn simple_prose_reads_easily() {
        // 6 words, 2 sentences, 6 syllables scores 119.19 before clamping.
        assert_eq!(flesch_reading_ease("The cat sat. The dog ran."), 100.0);
        let label = evaluate_summary("The cat sat. The dog ran.", 0.0).readability_label;
        assert_eq!(label, "Easy");
    }

    #[test]
    fn dense_prose_is_clamped_at_zero() {
        let text = "Interdisciplinary institutionalization necessitates unprecedented \
                    organizational reconceptualization notwithstanding considerable \
                    administrative complexity";
        assert_eq!(flesch_reading_ease(text), 0.0);
        assert_eq!(evaluate_summary(text, 1.0).readability_label, "Very Difficult");
    }

    #[test]
    fn labels_follow_score_bands() {
        assert_eq!(readability_label(70.0), "Easy");
        assert_eq!(readability_label(69.9), "Medium");
        assert_eq!(readability_label(50.0), "Medium");
        assert_eq!(readability_label(30.0), "Difficult");
        assert_eq!(readability_label(29.9), "Very Difficult");
    }

    #[test]
    fn empty_summary_is_not_scored() {
        let eval = evaluate_summary("", 4.5678);
        assert_eq!(
            eval,
            SummaryEvaluation {
                starts_on_topic: false,
                word_count: 0,
                time_taken: 4.57,
                readability: 0.0,
                readability_label: "N/A",
            }
        );
    }

    #[test]
    fn full_evaluation_serializes_flat() {
        let eval = evaluate_summary("This document is a lease. It ends in May.", 12.346);
        assert!(eval.starts_on_topic);
        assert_eq!(eval.word_count, 9);
        assert_eq!(eval.time_taken, 12.35);

        let value = serde_json::to_value(&eval).unwrap();
        assert_eq!(value["readability_label"], eval.readability_label);
        assert_eq!(value["word_count"], 9);
    }
}
