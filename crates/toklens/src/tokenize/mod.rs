//! Tokenizer adapter: encoding identities, the coder trait, and model
//! resolution.

mod coder;
mod error;
mod resolve;

pub use coder::{BpeCoder, TokenCoder};
pub use encoding_id::EncodingId;
pub use error::TokenizeError;
pub use resolve::ModelCatalog;

/// A token identifier in a vocabulary's rank space.
pub type TokenId = u32;

mod encoding_id {
    use std::fmt;

    /// Stable identifier for each supported BPE vocabulary.
    ///
    /// Variant declaration order mirrors the alphabetical string order so
    /// `BTreeMap` key sequences match the `as_str` ordering.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub enum EncodingId {
        /// `cl100k_base` (GPT-3.5 / GPT-4 family).
        Cl100k,
        /// `o200k_base` (GPT-4o family).
        O200k,
        /// `p50k_base` (Davinci-era completion models).
        P50k,
        /// `p50k_edit` (Davinci-era edit models).
        P50kEdit,
        /// `r50k_base` (GPT-3).
        R50k,
    }

    impl EncodingId {
        /// Canonical vocabulary name, e.g. `"cl100k_base"`.
        #[must_use]
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Cl100k => "cl100k_base",
                Self::O200k => "o200k_base",
                Self::P50k => "p50k_base",
                Self::P50kEdit => "p50k_edit",
                Self::R50k => "r50k_base",
            }
        }
    }

    impl fmt::Display for EncodingId {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.pad(self.as_str())
        }
    }

    impl std::str::FromStr for EncodingId {
        type Err = ();

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s {
                "cl100k_base" => Ok(Self::Cl100k),
                "o200k_base" => Ok(Self::O200k),
                "p50k_base" => Ok(Self::P50k),
                "p50k_edit" => Ok(Self::P50kEdit),
                "r50k_base" => Ok(Self::R50k),
                _ => Err(()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    // ── EncodingId ─────────────────────────────────────────────────────────

    #[rstest]
    #[case(EncodingId::Cl100k, "cl100k_base")]
    #[case(EncodingId::O200k, "o200k_base")]
    #[case(EncodingId::P50k, "p50k_base")]
    #[case(EncodingId::P50kEdit, "p50k_edit")]
    #[case(EncodingId::R50k, "r50k_base")]
    fn encoding_id_round_trips_through_str(#[case] id: EncodingId, #[case] name: &str) {
        assert_eq!(id.as_str(), name);
        assert_eq!(name.parse::<EncodingId>(), Ok(id));
    }

    #[test]
    fn unknown_encoding_name_fails_to_parse() {
        assert!("q99k_base".parse::<EncodingId>().is_err());
    }

    // ── BpeCoder ───────────────────────────────────────────────────────────

    #[fixture]
    fn cl100k() -> BpeCoder {
        BpeCoder::new(EncodingId::Cl100k).expect("cl100k init should succeed")
    }

    /// Empty string encodes to zero tokens.
    #[rstest]
    fn empty_string_encodes_to_nothing(cl100k: BpeCoder) {
        assert!(cl100k.encode("").is_empty());
    }

    /// Non-empty inputs all produce at least one token.
    #[rstest]
    #[case("a")]
    #[case("hello")]
    #[case("Hello, world!")]
    #[case("fn main() { println!(\"hi\"); }")]
    fn nonempty_input_has_positive_count(cl100k: BpeCoder, #[case] input: &str) {
        assert!(!cl100k.encode(input).is_empty());
    }

    /// Encoding is deterministic for a fixed vocabulary.
    #[rstest]
    fn encode_is_deterministic(cl100k: BpeCoder) {
        let text = "The quick brown fox jumps over the lazy dog.";
        assert_eq!(cl100k.encode(text), cl100k.encode(text));
    }

    /// Decoding the full encoded sequence restores the input text.
    #[rstest]
    fn decode_restores_input(cl100k: BpeCoder) {
        let text = "hello world";
        let ids = cl100k.encode(text);
        assert_eq!(cl100k.decode(&ids).unwrap(), text);
    }
}
