//! Published per-model token pricing, in USD per million tokens.
//!
//! Prices follow the providers' public pricing pages; unknown models fall
//! back to a mid-tier default so cost estimates never fail outright.

use serde::Serialize;

/// Price card for one model.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ModelPricing {
    /// USD per million input tokens.
    pub input_per_mtok: f64,
    /// USD per million output tokens.
    pub output_per_mtok: f64,
    /// Short human description.
    pub description: &'static str,
}

/// Look up the price card for `model`.
///
/// Unknown models get the mid-tier default card.
#[must_use]
pub fn pricing_for(model: &str) -> ModelPricing {
    let (input, output, description) = match model {
        "claude-opus-4-1" => (15.0, 75.0, "Claude Opus 4.1 - Most capable"),
        "claude-opus-4" => (15.0, 75.0, "Claude Opus 4"),
        "claude-sonnet-4" => (3.0, 15.0, "Claude Sonnet 4 - High performance"),
        "claude-sonnet-3.7" => (3.0, 15.0, "Claude Sonnet 3.7"),
        "claude-haiku-3.5" => (0.80, 4.0, "Claude Haiku 3.5 - Fastest"),
        "claude-haiku-3" | "claude-3-haiku" => (0.25, 1.25, "Claude Haiku 3"),
        "claude-3-opus" => (15.0, 75.0, "Claude 3 Opus (deprecated)"),
        "claude-3-sonnet" => (3.0, 15.0, "Claude 3 Sonnet"),
        "gpt-4" => (30.0, 60.0, "GPT-4"),
        "gpt-3.5-turbo" => (0.5, 1.5, "GPT-3.5 Turbo"),
        "text-davinci-003" => (20.0, 20.0, "Text Davinci 003"),
        _ => (3.0, 15.0, "Unknown model (mid-tier pricing)"),
    };
    ModelPricing {
        input_per_mtok: input,
        output_per_mtok: output,
        description,
    }
}

/// Cost of `tokens` input tokens under `model`.
#[must_use]
pub fn input_cost(model: &str, tokens: u64) -> f64 {
    tokens as f64 / 1_000_000.0 * pricing_for(model).input_per_mtok
}

/// Cost of `tokens` output tokens under `model`.
#[must_use]
pub fn output_cost(model: &str, tokens: u64) -> f64 {
    tokens as f64 / 1_000_000.0 * pricing_for(model).output_per_mtok
}

/// Format a cost compactly, widening precision as the amount shrinks.
#[must_use]
pub fn format_cost(cost: f64) -> String {
    if cost < 0.001 {
        format!("${cost:.6}")
    } else if cost < 0.01 {
        format!("${cost:.4}")
    } else {
        format!("${cost:.2}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("claude-opus-4-1", 15.0)]
    #[case("gpt-3.5-turbo", 0.5)]
    #[case("text-davinci-003", 20.0)]
    fn known_models_have_their_price(#[case] model: &str, #[case] input: f64) {
        assert_eq!(pricing_for(model).input_per_mtok, input);
    }

    #[test]
    fn unknown_model_uses_default_card() {
        let p = pricing_for("some-future-model");
        assert_eq!(p.input_per_mtok, 3.0);
        assert_eq!(p.output_per_mtok, 15.0);
    }

    #[test]
    fn costs_scale_per_million_tokens() {
        assert!((input_cost("gpt-3.5-turbo", 1_000_000) - 0.5).abs() < 1e-12);
        assert!((output_cost("gpt-3.5-turbo", 2_000_000) - 3.0).abs() < 1e-12);
        assert_eq!(input_cost("gpt-3.5-turbo", 0), 0.0);
    }

    #[rstest]
    #[case(0.000_123, "$0.000123")]
    #[case(0.0042, "$0.0042")]
    #[case(1.5, "$1.50")]
    fn cost_formats_by_magnitude(#[case] cost: f64, #[case] expected: &str) {
        assert_eq!(format_cost(cost), expected);
    }
}
