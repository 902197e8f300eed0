//! Fuzz test for the Lexis metric functions
//!
//! This fuzz target runs every metric over arbitrary byte sequences to find:
//! - Panics or crashes
//! - Infinite loops
//! - Memory safety issues
//!
//! Run with: cargo +nightly fuzz run metrics_fuzz -- -max_total_time=60

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Try to interpret the bytes as UTF-8
    // Every metric should handle any valid UTF-8 string without panicking
    if let Ok(text) = std::str::from_utf8(data) {
        let words = lexis_metrics::word_count(text);
        let with_punctuation = lexis_metrics::character_count(text, false);
        let without_punctuation = lexis_metrics::character_count(text, true);
        let sentences = lexis_metrics::sentence_count(text);
        let paragraphs = lexis_metrics::paragraph_count(text);
        let longest = lexis_metrics::longest_words(text);

        // Basic invariants that should always hold:
        // 1. Excluding punctuation never counts more characters
        assert!(
            without_punctuation <= with_punctuation,
            "Punctuation exclusion grew the character count"
        );

        // 2. Character counts are bounded by the scalar-value length
        assert!(
            with_punctuation as usize <= text.chars().count(),
            "Character count exceeded the input length"
        );

        // 3. Every word token consumes at least one non-whitespace character
        assert!(
            words <= with_punctuation,
            "More words than non-whitespace characters"
        );

        // 4. Paragraphs are bounded by the number of lines
        assert!(
            paragraphs as usize <= text.split('\n').count(),
            "More paragraphs than lines"
        );

        // 5. All longest words share one positive length
        let mut lengths = longest.iter().map(|w| w.chars().count());
        if let Some(first) = lengths.next() {
            assert!(first > 0, "Longest word with zero length");
            assert!(
                lengths.all(|len| len == first),
                "Longest words at differing lengths"
            );
        }

        // 6. Whitespace-only input measures zero on every metric
        if text.trim().is_empty() {
            assert_eq!(words, 0);
            assert_eq!(sentences, 0);
            assert_eq!(paragraphs, 0);
            assert!(longest.is_empty());
        }
    }
});
