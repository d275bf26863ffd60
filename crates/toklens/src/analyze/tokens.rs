//! Token-level metrics: counts, frequency distribution, top-N ranking.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::tokenize::{TokenCoder, TokenId};

/// Number of entries in the most-frequent ranking unless overridden.
pub const DEFAULT_TOP_N: usize = 10;

/// Shown in place of token text when the id does not decode to standalone
/// UTF-8 (BPE tokens routinely cut through multi-byte characters).
const UNRENDERABLE: &str = "\u{FFFD}";

/// One entry in the most-frequent-token ranking.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TokenInfo {
    /// The token rendered in isolation.
    pub text: String,
    /// Vocabulary id.
    pub token_id: TokenId,
    /// Occurrences in the analyzed text.
    pub count: u64,
}

impl TokenInfo {
    /// This token's share of all token occurrences; 0 when the text had no
    /// tokens.
    #[must_use]
    pub fn relative_frequency(&self, total_tokens: usize) -> f64 {
        if total_tokens == 0 {
            0.0
        } else {
            self.count as f64 / total_tokens as f64
        }
    }
}

/// Token-level statistics for one text under one vocabulary.
#[derive(Clone, Debug, Serialize)]
pub struct TokenMetrics {
    /// Length of the encoded sequence.
    pub total_tokens: usize,
    /// Number of distinct ids in the sequence.
    pub unique_tokens: usize,
    /// Tokens per whitespace-separated word; 0 when there are no words.
    ///
    /// Uses plain whitespace splitting, not the Unicode word rules: this
    /// ratio describes tokenizer granularity, not linguistic structure.
    pub token_word_ratio: f64,
    /// Mean char-length of each token occurrence decoded in isolation;
    /// 0 for an empty sequence.
    pub avg_token_length: f64,
    /// Occurrence count per token id.
    pub frequency: BTreeMap<TokenId, u64>,
    /// Top-N tokens by descending count, ties broken by ascending id.
    pub most_frequent: Vec<TokenInfo>,
}

impl TokenMetrics {
    /// Distinct tokens / total tokens; 0 for an empty sequence.
    #[must_use]
    pub fn uniqueness_ratio(&self) -> f64 {
        if self.total_tokens == 0 {
            0.0
        } else {
            self.unique_tokens as f64 / self.total_tokens as f64
        }
    }
}

/// Compute [`TokenMetrics`] for `text` with the given coder.
///
/// Deterministic for a fixed coder: identical input yields an identical
/// metrics value, including the ranking order.
#[must_use]
pub fn token_metrics(coder: &dyn TokenCoder, text: &str, top_n: usize) -> TokenMetrics {
    let ids = coder.encode(text);
    let total_tokens = ids.len();

    let mut frequency: BTreeMap<TokenId, u64> = BTreeMap::new();
    for id in &ids {
        *frequency.entry(*id).or_insert(0) += 1;
    }
    let unique_tokens = frequency.len();

    let word_count = text.split_whitespace().count();
    let token_word_ratio = if word_count == 0 {
        0.0
    } else {
        total_tokens as f64 / word_count as f64
    };

    // Decode each distinct id once and weight by its count; same mean as
    // decoding every occurrence.
    let avg_token_length = if total_tokens == 0 {
        0.0
    } else {
        let total_len: u64 = frequency
            .iter()
            .map(|(id, count)| decoded_len(coder, *id) as u64 * count)
            .sum();
        total_len as f64 / total_tokens as f64
    };

    let most_frequent = most_frequent(coder, &frequency, top_n);

    TokenMetrics {
        total_tokens,
        unique_tokens,
        token_word_ratio,
        avg_token_length,
        frequency,
        most_frequent,
    }
}

/// Char-length of a single token decoded in isolation; 0 when it is not
/// standalone UTF-8.
fn decoded_len(coder: &dyn TokenCoder, id: TokenId) -> usize {
    coder.decode(&[id]).map_or(0, |s| s.chars().count())
}

/// Rank the frequency table: descending count, ties by ascending id.
fn most_frequent(
    coder: &dyn TokenCoder,
    frequency: &BTreeMap<TokenId, u64>,
    limit: usize,
) -> Vec<TokenInfo> {
    let mut ranked: Vec<(TokenId, u64)> = frequency.iter().map(|(id, c)| (*id, *c)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked
        .into_iter()
        .take(limit)
        .map(|(token_id, count)| TokenInfo {
            text: coder
                .decode(&[token_id])
                .unwrap_or_else(|_| UNRENDERABLE.to_owned()),
            token_id,
            count,
        })
        .collect()
}
