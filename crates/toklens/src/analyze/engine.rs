//! The analysis orchestrator: merges structural and token metrics into
//! [`AnalysisResult`]s, one input at a time or in batches.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::time::Instant;

use serde::Serialize;
use tracing::debug;

use super::compare::ComparisonResult;
use super::error::AnalyzeError;
use super::text;
use super::tokens::{DEFAULT_TOP_N, token_metrics};
use crate::extract;
use crate::tokenize::{BpeCoder, ModelCatalog, TokenCoder};

/// Source label used for text analyzed without a backing file.
pub const DIRECT_INPUT: &str = "direct-input";

// ─── Result value ────────────────────────────────────────────────────────────

/// Complete analysis of one input under one model.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnalysisResult {
    /// Where the text came from (file name or [`DIRECT_INPUT`]).
    pub source: String,
    /// Char count of the analyzed text.
    pub input_chars: usize,
    /// Model name the analysis was requested with.
    pub model: String,
    /// Length of the encoded token sequence.
    pub total_tokens: usize,
    /// Distinct token ids in the sequence.
    pub unique_tokens: usize,
    /// Tokens per whitespace-separated word.
    pub token_word_ratio: f64,
    /// Mean char-length of a token decoded in isolation.
    pub avg_token_length: f64,
    /// Non-whitespace chars / total chars.
    pub content_density: f64,
    /// Distinct lowercased words / total words.
    pub lexical_diversity: f64,
    /// Whitespace chars / total chars.
    pub whitespace_ratio: f64,
    /// Flesch Reading Ease, clamped to `[0, 100]`.
    pub flesch_score: f64,
    /// Composite complexity, clamped to `[0, 1]`.
    pub complexity_score: f64,
    /// Words per sentence.
    pub avg_sentence_length: f64,
    /// Wall-clock duration of the whole analysis, in milliseconds.
    pub processing_ms: u64,
}

impl AnalysisResult {
    /// Distinct tokens / total tokens; 0 for an empty sequence.
    #[must_use]
    pub fn uniqueness_ratio(&self) -> f64 {
        if self.total_tokens == 0 {
            0.0
        } else {
            self.unique_tokens as f64 / self.total_tokens as f64
        }
    }

    /// Tokens per char of input; 0 for empty input.
    #[must_use]
    pub fn tokens_per_char(&self) -> f64 {
        if self.input_chars == 0 {
            0.0
        } else {
            self.total_tokens as f64 / self.input_chars as f64
        }
    }

    /// Standard Flesch reading-level label.
    #[must_use]
    pub fn reading_level(&self) -> &'static str {
        text::reading_level(self.flesch_score)
    }

    /// Five-level complexity label.
    #[must_use]
    pub fn complexity_level(&self) -> &'static str {
        text::complexity_level(self.complexity_score)
    }

    /// Duration formatted for display: `"312 ms"` or `"2.41 s"`.
    #[must_use]
    pub fn formatted_processing_time(&self) -> String {
        if self.processing_ms < 1000 {
            format!("{} ms", self.processing_ms)
        } else {
            format!("{:.2} s", self.processing_ms as f64 / 1000.0)
        }
    }
}

// ─── Batch outcome types ─────────────────────────────────────────────────────

/// Per-input outcome of a batch run.
///
/// A failing input yields a `BatchItem` with the error in `outcome`
/// instead of aborting the batch.
#[derive(Debug)]
pub struct BatchItem {
    /// The input's identifier (its path as given).
    pub source: String,
    /// The analysis, or why it failed.
    pub outcome: Result<AnalysisResult, AnalyzeError>,
}

impl BatchItem {
    /// Returns `true` when the input analyzed successfully.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Aggregate view over a finished batch; derived on demand, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct BatchSummary {
    /// Number of inputs in the batch.
    pub total: usize,
    /// Number of successful analyses.
    pub succeeded: usize,
    /// Sum of `total_tokens` over successes.
    pub total_tokens: u64,
    /// Mean `total_tokens` over successes; 0 with no successes.
    pub mean_tokens: f64,
    /// Mean Flesch score over successes; 0 with no successes.
    pub mean_flesch: f64,
    /// `succeeded / total`; 0 for an empty batch.
    pub success_rate: f64,
}

impl BatchSummary {
    /// Summarise a batch outcome list.
    #[must_use]
    pub fn from_items(items: &[BatchItem]) -> Self {
        let total = items.len();
        let successes: Vec<&AnalysisResult> =
            items.iter().filter_map(|i| i.outcome.as_ref().ok()).collect();
        let succeeded = successes.len();

        let total_tokens: u64 = successes.iter().map(|r| r.total_tokens as u64).sum();
        let (mean_tokens, mean_flesch) = if succeeded == 0 {
            (0.0, 0.0)
        } else {
            (
                total_tokens as f64 / succeeded as f64,
                successes.iter().map(|r| r.flesch_score).sum::<f64>() / succeeded as f64,
            )
        };
        let success_rate = if total == 0 {
            0.0
        } else {
            succeeded as f64 / total as f64
        };

        Self {
            total,
            succeeded,
            total_tokens,
            mean_tokens,
            mean_flesch,
            success_rate,
        }
    }
}

// ─── Engine ──────────────────────────────────────────────────────────────────

/// The analysis engine.
///
/// Holds only immutable configuration (the model catalog and the ranking
/// depth), so a single instance can serve any number of threads.
#[derive(Clone, Debug)]
pub struct Engine {
    catalog: ModelCatalog,
    top_n: usize,
}

impl Engine {
    /// Create an engine over `catalog`.
    #[must_use]
    pub fn new(catalog: ModelCatalog) -> Self {
        Self {
            catalog,
            top_n: DEFAULT_TOP_N,
        }
    }

    /// Builder: change how many entries the most-frequent ranking keeps.
    #[must_use]
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n;
        self
    }

    /// The model catalog this engine resolves names against.
    #[must_use]
    pub fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    fn coder_for(&self, model: &str) -> Result<BpeCoder, AnalyzeError> {
        Ok(BpeCoder::new(self.catalog.resolve(model))?)
    }

    /// Analyze a piece of text under `model`.
    ///
    /// Empty text is not an error; it produces an all-zero result.
    pub fn analyze_text(
        &self,
        source: &str,
        content: &str,
        model: &str,
    ) -> Result<AnalysisResult, AnalyzeError> {
        let started = Instant::now();
        let coder = self.coder_for(model)?;
        Ok(self.merge(&coder, source, content, model, started))
    }

    /// Extract `path` and analyze its text under `model`.
    pub fn analyze_file(&self, path: &Path, model: &str) -> Result<AnalysisResult, AnalyzeError> {
        let coder = self.coder_for(model)?;
        self.analyze_file_with(&coder, path, model)
    }

    /// Token metrics alone (no structural analysis) for `content`.
    pub fn token_metrics(
        &self,
        content: &str,
        model: &str,
    ) -> Result<super::tokens::TokenMetrics, AnalyzeError> {
        let coder = self.coder_for(model)?;
        Ok(token_metrics(&coder, content, self.top_n))
    }

    /// Compare `content` under two models.
    ///
    /// Both sides are computed independently; a model name may appear on
    /// both sides.
    pub fn compare(
        &self,
        content: &str,
        model_a: &str,
        model_b: &str,
    ) -> Result<ComparisonResult, AnalyzeError> {
        let coder_a = self.coder_for(model_a)?;
        let coder_b = self.coder_for(model_b)?;
        Ok(super::compare::compare(
            &coder_a, &coder_b, model_a, model_b, content, self.top_n,
        ))
    }

    /// Analyze many files, tolerating per-item failures.
    ///
    /// Items run on a scoped worker pool; `on_progress(completed / total,
    /// source)` fires exactly once per item, from the single consumer
    /// thread, ending at 1.0. The returned outcomes are ordered by input
    /// position regardless of completion order.
    pub fn analyze_batch<F>(
        &self,
        inputs: &[PathBuf],
        model: &str,
        mut on_progress: F,
    ) -> Vec<BatchItem>
    where
        F: FnMut(f64, &str),
    {
        let total = inputs.len();
        if total == 0 {
            return Vec::new();
        }

        // The vocabulary load is the only fallible setup step; if it
        // fails, every item reports that failure and the batch contract
        // (N outcomes, progress to 1.0) still holds.
        let coder = match self.coder_for(model) {
            Ok(c) => c,
            Err(e) => {
                let reason = e.to_string();
                return inputs
                    .iter()
                    .enumerate()
                    .map(|(i, path)| {
                        let source = path.display().to_string();
                        on_progress((i + 1) as f64 / total as f64, &source);
                        BatchItem {
                            source,
                            outcome: Err(AnalyzeError::Internal(reason.clone())),
                        }
                    })
                    .collect();
            }
        };

        let next = AtomicUsize::new(0);
        let workers = std::thread::available_parallelism().map_or(1, std::num::NonZero::get);
        let workers = workers.min(total);
        let (tx, rx) = mpsc::channel::<(usize, BatchItem)>();

        let mut slots: Vec<Option<BatchItem>> = Vec::with_capacity(total);
        slots.resize_with(total, || None);

        std::thread::scope(|scope| {
            for _ in 0..workers {
                let tx = tx.clone();
                let next = &next;
                let coder = &coder;
                scope.spawn(move || {
                    loop {
                        let idx = next.fetch_add(1, Ordering::Relaxed);
                        let Some(path) = inputs.get(idx) else { break };
                        let item = BatchItem {
                            source: path.display().to_string(),
                            outcome: self.analyze_file_with(coder, path, model),
                        };
                        if tx.send((idx, item)).is_err() {
                            break;
                        }
                    }
                });
            }
            drop(tx);

            // Single consumer: owns the progress sink and restores input
            // order by writing each outcome into its slot.
            let mut completed = 0usize;
            for (idx, item) in rx {
                completed += 1;
                if let Err(e) = &item.outcome {
                    debug!(source = %item.source, error = %e, "batch item failed");
                }
                on_progress(completed as f64 / total as f64, &item.source);
                slots[idx] = Some(item);
            }
        });

        #[allow(clippy::expect_used)] // each index is sent exactly once
        let outcomes: Vec<BatchItem> = slots
            .into_iter()
            .map(|s| s.expect("batch outcome missing"))
            .collect();
        outcomes
    }

    fn analyze_file_with(
        &self,
        coder: &dyn TokenCoder,
        path: &Path,
        model: &str,
    ) -> Result<AnalysisResult, AnalyzeError> {
        let started = Instant::now();
        let content = extract::extract(path)?;
        let source = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        Ok(self.merge(coder, &source, &content, model, started))
    }

    /// Merge token and structural metrics into one result, stamping the
    /// duration since `started`.
    fn merge(
        &self,
        coder: &dyn TokenCoder,
        source: &str,
        content: &str,
        model: &str,
        started: Instant,
    ) -> AnalysisResult {
        let tokens = token_metrics(coder, content, self.top_n);
        let density = text::density(content);
        let readability = text::readability(content);

        let processing_ms = started.elapsed().as_millis() as u64;
        debug!(
            source,
            model,
            total_tokens = tokens.total_tokens,
            processing_ms,
            "analysis complete"
        );

        AnalysisResult {
            source: source.to_owned(),
            input_chars: content.chars().count(),
            model: model.to_owned(),
            total_tokens: tokens.total_tokens,
            unique_tokens: tokens.unique_tokens,
            token_word_ratio: tokens.token_word_ratio,
            avg_token_length: tokens.avg_token_length,
            content_density: density.content_density,
            lexical_diversity: density.lexical_diversity,
            whitespace_ratio: density.whitespace_ratio,
            flesch_score: readability.flesch_score,
            complexity_score: readability.complexity_score,
            avg_sentence_length: readability.avg_sentence_length,
            processing_ms,
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(ModelCatalog::builtin())
    }
}
