use std::collections::BTreeMap;

use super::EncodingId;

/// Immutable model-name → vocabulary table.
///
/// Built once at startup and shared by reference. Resolution never
/// fails: unknown names fall back to [`ModelCatalog::DEFAULT`] so that analysis
/// always produces a result.
#[derive(Clone, Debug)]
pub struct ModelCatalog {
    entries: BTreeMap<String, EncodingId>,
}

impl ModelCatalog {
    /// Vocabulary used when a model name is not in the table.
    pub const DEFAULT: EncodingId = EncodingId::Cl100k;

    /// The built-in table of known model names.
    ///
    /// Claude names map to GPT vocabularies as an approximation (Anthropic
    /// does not publish its vocabulary), so counts for those models are
    /// indicative, not exact.
    #[must_use]
    pub fn builtin() -> Self {
        let entries = [
            ("gpt-3.5-turbo", EncodingId::Cl100k),
            ("gpt-4", EncodingId::Cl100k),
            ("gpt-4-turbo", EncodingId::Cl100k),
            ("gpt-4o", EncodingId::O200k),
            ("gpt-4o-mini", EncodingId::O200k),
            ("text-embedding-ada-002", EncodingId::Cl100k),
            ("text-davinci-003", EncodingId::P50k),
            ("text-davinci-edit-001", EncodingId::P50kEdit),
            ("gpt-3", EncodingId::R50k),
            ("claude-3-opus", EncodingId::Cl100k),
            ("claude-3-sonnet", EncodingId::Cl100k),
            ("claude-3-haiku", EncodingId::Cl100k),
        ]
        .into_iter()
        .map(|(name, id)| (name.to_owned(), id))
        .collect();
        Self { entries }
    }

    /// Builder: add or override a single model entry.
    #[must_use]
    pub fn with_model(mut self, name: impl Into<String>, id: EncodingId) -> Self {
        self.entries.insert(name.into(), id);
        self
    }

    /// Resolve a model name to its vocabulary.
    ///
    /// Accepts either a model name from the table or a raw vocabulary name
    /// (e.g. `"o200k_base"`); anything unrecognised resolves to
    /// [`Self::DEFAULT`].
    #[must_use]
    pub fn resolve(&self, model: &str) -> EncodingId {
        self.entries
            .get(model)
            .copied()
            .or_else(|| model.parse().ok())
            .unwrap_or(Self::DEFAULT)
    }

    /// Model names known to the table, in sorted order.
    pub fn known_models(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl Default for ModelCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn catalog() -> ModelCatalog {
        ModelCatalog::builtin()
    }

    #[rstest]
    #[case("gpt-3.5-turbo", EncodingId::Cl100k)]
    #[case("gpt-4", EncodingId::Cl100k)]
    #[case("gpt-4o", EncodingId::O200k)]
    #[case("text-davinci-003", EncodingId::P50k)]
    #[case("gpt-3", EncodingId::R50k)]
    #[case("claude-3-opus", EncodingId::Cl100k)]
    fn known_models_resolve_to_their_vocabulary(
        catalog: ModelCatalog,
        #[case] model: &str,
        #[case] expected: EncodingId,
    ) {
        assert_eq!(catalog.resolve(model), expected);
    }

    /// Unknown names never fail; they fall back to the default.
    #[rstest]
    #[case("llama-70b")]
    #[case("")]
    #[case("gpt-17")]
    fn unknown_model_falls_back_to_default(catalog: ModelCatalog, #[case] model: &str) {
        assert_eq!(catalog.resolve(model), ModelCatalog::DEFAULT);
    }

    /// Raw vocabulary names are accepted directly.
    #[rstest]
    fn raw_vocabulary_name_resolves(catalog: ModelCatalog) {
        assert_eq!(catalog.resolve("o200k_base"), EncodingId::O200k);
    }

    /// `with_model` overrides the built-in table.
    #[rstest]
    fn with_model_overrides_entry(catalog: ModelCatalog) {
        let catalog = catalog.with_model("gpt-4", EncodingId::O200k);
        assert_eq!(catalog.resolve("gpt-4"), EncodingId::O200k);
    }
}
