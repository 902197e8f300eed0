//! Lexis Metrics - Text Analysis Algorithms
//!
//! The five pure analysis functions behind every Lexis operation. All of them
//! are total over `&str`: no I/O, no panics, deterministic for any input
//! including empty strings and unusual Unicode. Lengths are always measured
//! in Unicode scalar values, never bytes.

use lexis_core::{Metric, MetricValue};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

/// Word tokens: alphanumeric runs with apostrophes, so contractions count once.
static WORD_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[\w']+\b").expect("Invalid word token regex"));

/// Punctuation stripped by character counting and longest-word normalization.
const PUNCTUATION: [char; 11] = ['.', ',', '!', '?', ';', ':', '(', ')', '\'', '"', '`'];

/// Sentence terminators.
const SENTENCE_TERMINATORS: [char; 3] = ['.', '!', '?'];

/// Count word tokens.
///
/// Standalone punctuation never matches the token pattern, so it contributes
/// nothing; empty and whitespace-only input count zero.
pub fn word_count(text: &str) -> u64 {
    WORD_TOKEN.find_iter(text).count() as u64
}

/// Count characters, whitespace never included.
///
/// With `exclude_punctuation` the fixed punctuation set is dropped as well.
pub fn character_count(text: &str, exclude_punctuation: bool) -> u64 {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .filter(|c| !exclude_punctuation || !PUNCTUATION.contains(c))
        .count() as u64
}

/// Count sentences.
///
/// The text splits on `.`, `!` and `?`; fragments that trim to empty are
/// dropped, which collapses runs of terminators. Non-empty trimmed text
/// without any terminator is exactly one sentence.
pub fn sentence_count(text: &str) -> u64 {
    text.split(SENTENCE_TERMINATORS)
        .filter(|fragment| !fragment.trim().is_empty())
        .count() as u64
}

/// Count paragraphs.
///
/// Every line that does not trim to empty is a paragraph; blank lines only
/// separate, and runs of them collapse.
pub fn paragraph_count(text: &str) -> u64 {
    text.split('\n')
        .filter(|line| !line.trim().is_empty())
        .count() as u64
}

/// Collect the distinct longest words of the text.
///
/// The input is lowercased, the fixed punctuation set is stripped, and the
/// remainder splits on whitespace runs. The maximum word length is taken over
/// that whole token pool (one pool for the entire text, never per paragraph)
/// and every distinct word at that length is returned. No tokens, empty set.
pub fn longest_words(text: &str) -> BTreeSet<String> {
    let normalized: String = text
        .to_lowercase()
        .chars()
        .filter(|c| !PUNCTUATION.contains(c))
        .collect();

    let max_len = normalized
        .split_whitespace()
        .map(|word| word.chars().count())
        .max()
        .unwrap_or(0);
    if max_len == 0 {
        return BTreeSet::new();
    }

    normalized
        .split_whitespace()
        .filter(|word| word.chars().count() == max_len)
        .map(str::to_string)
        .collect()
}

/// Run the operation a descriptor names over `text`.
pub fn compute(metric: Metric, text: &str) -> MetricValue {
    match metric {
        Metric::WordCount => MetricValue::Count(word_count(text)),
        Metric::CharacterCount {
            exclude_punctuation,
        } => MetricValue::Count(character_count(text, exclude_punctuation)),
        Metric::SentenceCount => MetricValue::Count(sentence_count(text)),
        Metric::ParagraphCount => MetricValue::Count(paragraph_count(text)),
        Metric::LongestWords => MetricValue::Words(longest_words(text)),
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn word_set(words: &[&str]) -> BTreeSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_word_count_classic_sentence() {
        assert_eq!(word_count("The quick brown fox jumps over the lazy dog."), 9);
    }

    #[test]
    fn test_word_count_contractions_are_one_word() {
        assert_eq!(word_count("don't stop"), 2);
        assert_eq!(word_count("it's the baker's dozen"), 4);
    }

    #[test]
    fn test_word_count_empty_and_whitespace() {
        assert_eq!(word_count(""), 0);
        assert_eq!(word_count("   \t\n  "), 0);
    }

    #[test]
    fn test_word_count_ignores_standalone_punctuation() {
        assert_eq!(word_count("!!! ... ??? ;;"), 0);
        assert_eq!(word_count("one, two... three!"), 3);
    }

    #[test]
    fn test_character_count_fixture() {
        assert_eq!(character_count("Hello, World!", true), 10);
        assert_eq!(character_count("Hello, World!", false), 12);
    }

    #[test]
    fn test_character_count_empty() {
        assert_eq!(character_count("", false), 0);
        assert_eq!(character_count("", true), 0);
        assert_eq!(character_count(" \t\r\n", false), 0);
    }

    #[test]
    fn test_character_count_is_code_points_not_bytes() {
        // "héllo" is six bytes but five scalar values
        assert_eq!(character_count("héllo", false), 5);
        assert_eq!(character_count("日本語 テスト", false), 6);
    }

    #[test]
    fn test_character_count_strips_only_the_fixed_set() {
        // Hyphen is not in the fixed punctuation set
        assert_eq!(character_count("re-use", true), 6);
        assert_eq!(character_count("(a;b:c)", true), 3);
    }

    #[test]
    fn test_sentence_count_fixture_collapses_terminator_runs() {
        assert_eq!(sentence_count("Wait!!! What??? Really..."), 3);
    }

    #[test]
    fn test_sentence_count_simple() {
        assert_eq!(sentence_count("One. Two. Three."), 3);
        assert_eq!(sentence_count("Mixed! Terminators? Work."), 3);
    }

    #[test]
    fn test_sentence_count_no_terminator_is_one_sentence() {
        assert_eq!(sentence_count("no terminal punctuation here"), 1);
    }

    #[test]
    fn test_sentence_count_empty_and_punctuation_only() {
        assert_eq!(sentence_count(""), 0);
        assert_eq!(sentence_count("   "), 0);
        assert_eq!(sentence_count("..."), 0);
        assert_eq!(sentence_count("?!"), 0);
    }

    #[test]
    fn test_paragraph_count_fixture() {
        assert_eq!(
            paragraph_count("First paragraph.\n\nSecond paragraph.\n\nThird paragraph."),
            3
        );
    }

    #[test]
    fn test_paragraph_count_single_line() {
        assert_eq!(paragraph_count("just one line"), 1);
    }

    #[test]
    fn test_paragraph_count_empty_and_blank() {
        assert_eq!(paragraph_count(""), 0);
        assert_eq!(paragraph_count("\n\n\n"), 0);
        assert_eq!(paragraph_count("  \n \t \n"), 0);
    }

    #[test]
    fn test_paragraph_count_whitespace_lines_separate_like_blank_lines() {
        assert_eq!(paragraph_count("alpha\n   \nbeta"), 2);
    }

    #[test]
    fn test_longest_words_fixture_whole_pool_single_winner() {
        // "paragraph" wins across both lines; the duplicate collapses
        assert_eq!(
            longest_words("This is a sample paragraph.\nAnother sample paragraph."),
            word_set(&["paragraph"])
        );
    }

    #[test]
    fn test_longest_words_ties_are_all_returned() {
        assert_eq!(
            longest_words("alpha gamma delta"),
            word_set(&["alpha", "gamma", "delta"])
        );
    }

    #[test]
    fn test_longest_words_is_case_insensitive() {
        assert_eq!(
            longest_words("Paragraph PARAGRAPH paragraph"),
            word_set(&["paragraph"])
        );
    }

    #[test]
    fn test_longest_words_empty_inputs() {
        assert_eq!(longest_words(""), BTreeSet::new());
        assert_eq!(longest_words("   \n  "), BTreeSet::new());
        // Punctuation-only input normalizes to no tokens
        assert_eq!(longest_words("... !!! ???"), BTreeSet::new());
    }

    #[test]
    fn test_longest_words_strips_punctuation_before_measuring() {
        // "longest." measures 7 after stripping, tying with "another"
        assert_eq!(
            longest_words("another word is longest."),
            word_set(&["another", "longest"])
        );
    }

    #[test]
    fn test_compute_dispatches_each_metric() {
        let text = "One two.\nThree four!";
        assert_eq!(compute(Metric::WordCount, text), MetricValue::Count(4));
        assert_eq!(
            compute(
                Metric::CharacterCount {
                    exclude_punctuation: true
                },
                text
            ),
            MetricValue::Count(15)
        );
        assert_eq!(compute(Metric::SentenceCount, text), MetricValue::Count(2));
        assert_eq!(compute(Metric::ParagraphCount, text), MetricValue::Count(2));
        assert_eq!(
            compute(Metric::LongestWords, text),
            MetricValue::Words(word_set(&["three"]))
        );
    }
}

// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================
