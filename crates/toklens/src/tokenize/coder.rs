use super::error::TokenizeError;
use super::{EncodingId, TokenId};

/// Common interface for token coders.
///
/// Implementations must be deterministic: the same text always encodes to
/// the same id sequence for a fixed vocabulary.
pub trait TokenCoder: Send + Sync {
    /// The vocabulary this coder speaks.
    fn encoding(&self) -> EncodingId;

    /// Encode `text` into a sequence of token ids.
    fn encode(&self, text: &str) -> Vec<TokenId>;

    /// Render a sequence of token ids back to text.
    ///
    /// Fails when the byte sequence behind `ids` is not valid UTF-8 on its
    /// own. Single tokens cut through multi-byte characters in every BPE
    /// vocabulary, so callers decoding isolated tokens must tolerate this.
    fn decode(&self, ids: &[TokenId]) -> Result<String, TokenizeError>;
}

// ─── tiktoken-backed coder ───────────────────────────────────────────────────

/// Token coder backed by one of the `tiktoken-rs` BPE vocabularies.
pub struct BpeCoder {
    id: EncodingId,
    bpe: tiktoken_rs::CoreBPE,
}

impl BpeCoder {
    /// Initialise the coder for `id` (loads the vocabulary data).
    pub fn new(id: EncodingId) -> Result<Self, TokenizeError> {
        let bpe = match id {
            EncodingId::Cl100k => tiktoken_rs::cl100k_base(),
            EncodingId::O200k => tiktoken_rs::o200k_base(),
            EncodingId::P50k => tiktoken_rs::p50k_base(),
            EncodingId::P50kEdit => tiktoken_rs::p50k_edit(),
            EncodingId::R50k => tiktoken_rs::r50k_base(),
        }
        .map_err(|e| TokenizeError::Init(e.to_string()))?;
        Ok(Self { id, bpe })
    }
}

impl TokenCoder for BpeCoder {
    fn encoding(&self) -> EncodingId {
        self.id
    }

    fn encode(&self, text: &str) -> Vec<TokenId> {
        self.bpe.encode_ordinary(text)
    }

    fn decode(&self, ids: &[TokenId]) -> Result<String, TokenizeError> {
        self.bpe
            .decode(ids.to_vec())
            .map_err(|e| TokenizeError::Decode(e.to_string()))
    }
}
