//! Side-by-side comparison of two tokenization schemes over one text.

use std::collections::BTreeSet;

use serde::Serialize;

use super::tokens::{TokenMetrics, token_metrics};
use crate::tokenize::{TokenCoder, TokenId};

/// Outcome of tokenizing the same text under two models.
#[derive(Clone, Debug, Serialize)]
pub struct ComparisonResult {
    /// First model name, as requested.
    pub model_a: String,
    /// Second model name, as requested.
    pub model_b: String,
    /// Token metrics under the first model.
    pub metrics_a: TokenMetrics,
    /// Token metrics under the second model.
    pub metrics_b: TokenMetrics,
    /// `total_tokens(A) / total_tokens(B)`; 0 when B produced no tokens.
    pub efficiency: f64,
    /// Jaccard similarity of the two token-id sets, in `[0, 1]`.
    ///
    /// Ids live in each vocabulary's own rank space, so this figure is
    /// only meaningful when both models resolve to the same or related
    /// vocabularies; across unrelated vocabularies it measures numeric
    /// coincidence, nothing linguistic.
    pub token_overlap: f64,
}

impl ComparisonResult {
    /// Human description of which model tokenizes the text more tightly.
    #[must_use]
    pub fn efficiency_description(&self) -> String {
        match self.efficiency {
            e if e < 0.8 => format!("{} is significantly more efficient", self.model_a),
            e if e < 0.9 => format!("{} is more efficient", self.model_a),
            e if e <= 1.1 => "Models have similar efficiency".to_owned(),
            e if e <= 1.25 => format!("{} is more efficient", self.model_b),
            _ => format!("{} is significantly more efficient", self.model_b),
        }
    }

    /// Five-level label for the overlap score.
    #[must_use]
    pub fn overlap_description(&self) -> &'static str {
        match self.token_overlap {
            o if o >= 0.8 => "Very high token overlap",
            o if o >= 0.6 => "High token overlap",
            o if o >= 0.4 => "Moderate token overlap",
            o if o >= 0.2 => "Low token overlap",
            _ => "Very low token overlap",
        }
    }
}

/// Compare `text` under two coders.
///
/// Both sides are computed independently, with no shared cache and no
/// side effects; the call is safe anywhere a single analysis is.
#[must_use]
pub fn compare(
    coder_a: &dyn TokenCoder,
    coder_b: &dyn TokenCoder,
    model_a: &str,
    model_b: &str,
    text: &str,
    top_n: usize,
) -> ComparisonResult {
    let metrics_a = token_metrics(coder_a, text, top_n);
    let metrics_b = token_metrics(coder_b, text, top_n);

    let efficiency = if metrics_b.total_tokens == 0 {
        0.0
    } else {
        metrics_a.total_tokens as f64 / metrics_b.total_tokens as f64
    };

    let token_overlap = jaccard(&metrics_a, &metrics_b);

    ComparisonResult {
        model_a: model_a.to_owned(),
        model_b: model_b.to_owned(),
        metrics_a,
        metrics_b,
        efficiency,
        token_overlap,
    }
}

/// `|A∩B| / |A∪B|` over the distinct token ids; 0 when the union is empty.
fn jaccard(a: &TokenMetrics, b: &TokenMetrics) -> f64 {
    let set_a: BTreeSet<TokenId> = a.frequency.keys().copied().collect();
    let set_b: BTreeSet<TokenId> = b.frequency.keys().copied().collect();

    let union = set_a.union(&set_b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = set_a.intersection(&set_b).count();
    intersection as f64 / union as f64
}
