//! End-to-end engine behavior against the real BPE vocabularies: single
//! analysis, model comparison, and batch semantics (ordering, partial
//! failure, progress).

use std::path::PathBuf;

use rstest::{fixture, rstest};

use toklens::analyze::{AnalyzeError, BatchSummary, DIRECT_INPUT, Engine};
use toklens::extract::ExtractError;
use toklens::tokenize::ModelCatalog;

const SAMPLE: &str = "The cat sat. The dog ran fast.";

#[fixture]
fn engine() -> Engine {
    Engine::new(ModelCatalog::builtin())
}

fn temp_file(dir: &std::path::Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

// ── single analysis ───────────────────────────────────────────────────────────

#[rstest]
fn analysis_merges_token_and_structure_metrics(engine: Engine) {
    let r = engine
        .analyze_text(DIRECT_INPUT, SAMPLE, "gpt-3.5-turbo")
        .unwrap();

    assert_eq!(r.source, DIRECT_INPUT);
    assert_eq!(r.model, "gpt-3.5-turbo");
    assert_eq!(r.input_chars, SAMPLE.chars().count());
    assert!(r.total_tokens > 0);
    assert!(r.unique_tokens <= r.total_tokens);
    assert!((r.avg_sentence_length - 3.5).abs() < 1e-12);
    // Short, simple sentences clamp Flesch to the top of the scale.
    assert_eq!(r.flesch_score, 100.0);
}

#[rstest]
fn invariants_hold_for_awkward_inputs(
    engine: Engine,
    #[values("", " ", "a", "\n\n\n", "?!?!", "héllo wörld — ünïcode")] input: &str,
) {
    let r = engine.analyze_text(DIRECT_INPUT, input, "gpt-4").unwrap();
    assert!(r.unique_tokens <= r.total_tokens);
    assert!((0.0..=100.0).contains(&r.flesch_score));
    assert!((0.0..=1.0).contains(&r.complexity_score));
    assert!((0.0..=1.0).contains(&r.content_density));
    assert!((0.0..=1.0).contains(&r.whitespace_ratio));
}

#[rstest]
fn empty_text_zeroes_every_metric(engine: Engine) {
    let r = engine.analyze_text(DIRECT_INPUT, "", "gpt-3.5-turbo").unwrap();
    assert_eq!(r.total_tokens, 0);
    assert_eq!(r.unique_tokens, 0);
    assert_eq!(r.content_density, 0.0);
    assert_eq!(r.lexical_diversity, 0.0);
    assert_eq!(r.flesch_score, 0.0);
    assert_eq!(r.complexity_score, 0.0);
    assert_eq!(r.token_word_ratio, 0.0);
    assert_eq!(r.avg_token_length, 0.0);
}

/// Unknown model names analyze under the default vocabulary instead of
/// failing.
#[rstest]
fn unknown_model_analyzes_like_the_default(engine: Engine) {
    let known = engine
        .analyze_text(DIRECT_INPUT, SAMPLE, "gpt-3.5-turbo")
        .unwrap();
    let unknown = engine
        .analyze_text(DIRECT_INPUT, SAMPLE, "mystery-model-9000")
        .unwrap();
    assert_eq!(known.total_tokens, unknown.total_tokens);
}

#[rstest]
fn ranking_is_stable_across_runs(engine: Engine) {
    let text = "to be or not to be, that is the question; to be is to be";
    let a = engine.token_metrics(text, "gpt-4").unwrap();
    let b = engine.token_metrics(text, "gpt-4").unwrap();
    assert_eq!(a.most_frequent, b.most_frequent);

    // Descending counts, ascending ids on ties.
    for pair in a.most_frequent.windows(2) {
        assert!(
            pair[0].count > pair[1].count
                || (pair[0].count == pair[1].count && pair[0].token_id < pair[1].token_id)
        );
    }
}

// ── comparison ────────────────────────────────────────────────────────────────

#[rstest]
fn comparing_a_model_with_itself_is_identity(engine: Engine) {
    let c = engine.compare(SAMPLE, "gpt-4", "gpt-4").unwrap();
    assert!((c.efficiency - 1.0).abs() < 1e-12);
    assert!((c.token_overlap - 1.0).abs() < 1e-12);
}

#[rstest]
fn different_vocabularies_differ_somewhere(engine: Engine) {
    let text = "The quick brown fox jumps over the lazy dog, repeatedly and enthusiastically.";
    let c = engine.compare(text, "gpt-3.5-turbo", "gpt-4o").unwrap();
    assert!(c.metrics_a.total_tokens > 0);
    assert!(c.metrics_b.total_tokens > 0);
    assert!(c.efficiency > 0.0);
    assert!((0.0..=1.0).contains(&c.token_overlap));
}

// ── file analysis ─────────────────────────────────────────────────────────────

#[rstest]
fn file_analysis_uses_the_file_name_as_source(engine: Engine) {
    let dir = tempfile::tempdir().unwrap();
    let path = temp_file(dir.path(), "essay.txt", SAMPLE);

    let r = engine.analyze_file(&path, "gpt-3.5-turbo").unwrap();
    assert_eq!(r.source, "essay.txt");
    assert!(r.total_tokens > 0);
}

#[rstest]
fn unsupported_file_propagates_a_classified_error(engine: Engine) {
    let dir = tempfile::tempdir().unwrap();
    let path = temp_file(dir.path(), "slides.pdf", "not text");

    let err = engine.analyze_file(&path, "gpt-4").unwrap_err();
    assert!(matches!(
        err,
        AnalyzeError::Extract(ExtractError::UnsupportedFormat { .. })
    ));
}

// ── batch semantics ───────────────────────────────────────────────────────────

#[rstest]
fn batch_preserves_order_and_tolerates_failures(engine: Engine) {
    let dir = tempfile::tempdir().unwrap();
    let good_a = temp_file(dir.path(), "a.txt", "Alpha beta gamma.");
    let missing = dir.path().join("missing.txt");
    let good_b = temp_file(dir.path(), "b.md", "Delta epsilon zeta eta.");

    let inputs = vec![good_a, missing, good_b];
    let items = engine.analyze_batch(&inputs, "gpt-3.5-turbo", |_, _| {});

    assert_eq!(items.len(), 3);
    assert!(items[0].is_success());
    assert!(!items[1].is_success());
    assert!(items[2].is_success());

    // Outcomes line up with their inputs regardless of completion order.
    assert!(items[0].source.ends_with("a.txt"));
    assert!(items[1].source.ends_with("missing.txt"));
    assert!(items[2].source.ends_with("b.md"));

    assert!(matches!(
        items[1].outcome,
        Err(AnalyzeError::Extract(ExtractError::NotFound { .. }))
    ));

    let summary = BatchSummary::from_items(&items);
    assert_eq!(summary.total, 3);
    assert_eq!(summary.succeeded, 2);
    assert!((summary.success_rate - 2.0 / 3.0).abs() < 1e-12);
    assert!(summary.total_tokens > 0);
    assert!(summary.mean_flesch > 0.0);
}

#[rstest]
fn progress_fires_once_per_item_and_ends_at_one(engine: Engine) {
    let dir = tempfile::tempdir().unwrap();
    let inputs: Vec<PathBuf> = (0..5)
        .map(|i| temp_file(dir.path(), &format!("f{i}.txt"), "Some sentence here."))
        .collect();

    let mut fractions: Vec<f64> = Vec::new();
    let items = engine.analyze_batch(&inputs, "gpt-3.5-turbo", |fraction, _| {
        fractions.push(fraction);
    });

    assert_eq!(items.len(), 5);
    assert_eq!(fractions.len(), 5);
    assert!(fractions.windows(2).all(|w| w[0] <= w[1]));
    assert!((fractions.last().copied().unwrap() - 1.0).abs() < 1e-12);
}

#[rstest]
fn progress_counts_failures_too(engine: Engine) {
    let dir = tempfile::tempdir().unwrap();
    let inputs = vec![
        dir.path().join("ghost1.txt"),
        dir.path().join("ghost2.txt"),
    ];

    let mut calls = 0usize;
    let items = engine.analyze_batch(&inputs, "gpt-4", |_, _| calls += 1);

    assert_eq!(items.len(), 2);
    assert_eq!(calls, 2);
    assert!(items.iter().all(|i| !i.is_success()));

    let summary = BatchSummary::from_items(&items);
    assert_eq!(summary.mean_tokens, 0.0);
    assert_eq!(summary.mean_flesch, 0.0);
    assert_eq!(summary.success_rate, 0.0);
}

#[rstest]
fn empty_batch_is_empty(engine: Engine) {
    let items = engine.analyze_batch(&[], "gpt-4", |_, _| unreachable!());
    assert!(items.is_empty());
}
