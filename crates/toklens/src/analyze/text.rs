//! Structural text analysis: segmentation, density, and readability.
//!
//! Everything here is a pure function of its input text (no state, no
//! I/O) and is safe to call concurrently from any thread.

use std::collections::HashSet;

use serde::Serialize;
use unicode_segmentation::UnicodeSegmentation;

// ─── Segmentation ────────────────────────────────────────────────────────────

/// Extract words using UAX #29 word boundaries.
///
/// Punctuation-only runs are not words; `"don't"` stays one word.
#[must_use]
pub fn words(text: &str) -> Vec<&str> {
    text.unicode_words().collect()
}

/// Extract sentences using UAX #29 sentence boundaries.
///
/// Segments are trimmed and empty ones discarded. Decimal numbers and
/// runs of terminal punctuation do not split; abbreviation handling is as
/// good as the default boundary rules.
#[must_use]
pub fn sentences(text: &str) -> Vec<&str> {
    text.unicode_sentences()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// Estimate the syllable count of a single word.
///
/// Heuristic, not phonetic truth: lowercase, strip non-letters, count
/// non-vowel→vowel transitions, drop one for a silent trailing `e`, floor
/// at 1.
#[must_use]
pub fn syllables(word: &str) -> usize {
    let letters: String = word
        .to_lowercase()
        .chars()
        .filter(char::is_ascii_lowercase)
        .collect();

    let mut count = 0usize;
    let mut prev_was_vowel = false;
    for c in letters.chars() {
        let is_vowel = matches!(c, 'a' | 'e' | 'i' | 'o' | 'u');
        if is_vowel && !prev_was_vowel {
            count += 1;
        }
        prev_was_vowel = is_vowel;
    }

    if letters.ends_with('e') && count > 1 {
        count -= 1;
    }

    count.max(1)
}

// ─── Density ─────────────────────────────────────────────────────────────────

/// Structural density of a text: how much of it is content versus
/// whitespace, and how varied its vocabulary is.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DensityMetrics {
    /// Non-whitespace chars / total chars; 0 for empty text.
    pub content_density: f64,
    /// Distinct lowercased words / total words; 0 when there are no words.
    pub lexical_diversity: f64,
    /// `1 − content_density`; 0 for empty text.
    pub whitespace_ratio: f64,
}

impl DensityMetrics {
    /// Weighted blend of content density and lexical diversity.
    #[must_use]
    pub fn information_density(&self) -> f64 {
        self.content_density * 0.6 + self.lexical_diversity * 0.4
    }

    /// Five-level label for [`Self::information_density`].
    #[must_use]
    pub fn density_category(&self) -> &'static str {
        match self.information_density() {
            d if d >= 0.8 => "Very High",
            d if d >= 0.6 => "High",
            d if d >= 0.4 => "Medium",
            d if d >= 0.2 => "Low",
            _ => "Very Low",
        }
    }
}

/// Compute [`DensityMetrics`] for `text`.
#[must_use]
pub fn density(text: &str) -> DensityMetrics {
    let total_chars = text.chars().count();
    let non_ws = text.chars().filter(|c| !c.is_whitespace()).count();
    let content_density = ratio(non_ws, total_chars);
    let whitespace_ratio = ratio(total_chars - non_ws, total_chars);

    let lowered = text.to_lowercase();
    let lowered_words = words(&lowered);
    let unique: HashSet<&str> = lowered_words.iter().copied().collect();
    let lexical_diversity = ratio(unique.len(), lowered_words.len());

    DensityMetrics {
        content_density,
        lexical_diversity,
        whitespace_ratio,
    }
}

// ─── Readability ─────────────────────────────────────────────────────────────

/// Readability and complexity of a text.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ReadabilityMetrics {
    /// Flesch Reading Ease, clamped to `[0, 100]`.
    pub flesch_score: f64,
    /// Composite complexity, clamped to `[0, 1]`.
    pub complexity_score: f64,
    /// Words per sentence.
    pub avg_sentence_length: f64,
}

impl ReadabilityMetrics {
    /// Standard Flesch reading-level label.
    #[must_use]
    pub fn reading_level(&self) -> &'static str {
        reading_level(self.flesch_score)
    }

    /// Five-level label for the complexity score.
    #[must_use]
    pub fn complexity_level(&self) -> &'static str {
        complexity_level(self.complexity_score)
    }
}

/// Five-level label for a complexity score in `[0, 1]`.
#[must_use]
pub fn complexity_level(score: f64) -> &'static str {
    match score {
        s if s >= 0.8 => "Very Complex",
        s if s >= 0.6 => "Complex",
        s if s >= 0.4 => "Moderate",
        s if s >= 0.2 => "Simple",
        _ => "Very Simple",
    }
}

/// Standard Flesch reading-level label for a score in `[0, 100]`.
#[must_use]
pub fn reading_level(flesch_score: f64) -> &'static str {
    match flesch_score {
        s if s >= 90.0 => "Very Easy",
        s if s >= 80.0 => "Easy",
        s if s >= 70.0 => "Fairly Easy",
        s if s >= 60.0 => "Standard",
        s if s >= 50.0 => "Fairly Difficult",
        s if s >= 30.0 => "Difficult",
        _ => "Very Difficult",
    }
}

/// Compute [`ReadabilityMetrics`] for `text`.
///
/// Texts with no words or no sentences score 0 across the board.
#[must_use]
pub fn readability(text: &str) -> ReadabilityMetrics {
    let words = words(text);
    let sentences = sentences(text);

    if words.is_empty() || sentences.is_empty() {
        return ReadabilityMetrics {
            flesch_score: 0.0,
            complexity_score: 0.0,
            avg_sentence_length: 0.0,
        };
    }

    let avg_sentence_length = words.len() as f64 / sentences.len() as f64;

    let total_syllables: usize = words.iter().map(|w| syllables(w)).sum();
    let avg_syllables_per_word = total_syllables as f64 / words.len() as f64;

    let flesch_score = (206.835 - 1.015 * avg_sentence_length - 84.6 * avg_syllables_per_word)
        .clamp(0.0, 100.0);

    let complexity_score = complexity(&words, avg_sentence_length);

    ReadabilityMetrics {
        flesch_score,
        complexity_score,
        avg_sentence_length,
    }
}

/// Weighted composite of word length, sentence length, and vocabulary
/// richness, clamped to `≤ 1`.
fn complexity(words: &[&str], avg_sentence_length: f64) -> f64 {
    let total_len: usize = words.iter().map(|w| w.chars().count()).sum();
    let avg_word_length = ratio(total_len, words.len());

    let unique: HashSet<&str> = words.iter().copied().collect();
    let vocabulary_richness = ratio(unique.len(), words.len());

    let complexity = (avg_word_length / 10.0) * 0.3
        + (avg_sentence_length / 30.0) * 0.4
        + (1.0 - vocabulary_richness) * 0.3;

    complexity.min(1.0)
}

/// `numerator / denominator`, or 0 when the denominator is 0.
fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
