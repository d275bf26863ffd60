//! Report rendering: human-readable and JSON views of analysis results.

mod format;

pub use format::{format_number, format_pct, format_score};

use std::io::Write;

use crate::analyze::{AnalysisResult, BatchItem, BatchSummary, ComparisonResult};
use crate::pricing;

use format::{dim, heading};

/// Rendering configuration derived from CLI flags.
pub struct OutputOptions {
    /// Emit JSON instead of human-readable text.
    pub json: bool,
    /// When `true`, emit ANSI color codes.
    pub color: bool,
}

impl OutputOptions {
    /// Create a new output configuration from CLI flags.
    ///
    /// Color is enabled only for a terminal stdout without `NO_COLOR` set.
    #[must_use]
    pub fn new(json: bool, no_color: bool) -> Self {
        let color = !no_color && std::env::var("NO_COLOR").is_err() && {
            use std::io::IsTerminal;
            std::io::stdout().is_terminal()
        };
        Self { json, color }
    }
}

// ─── Single analysis ─────────────────────────────────────────────────────────

/// Write one analysis report to `out`.
pub fn write_analysis(
    out: &mut dyn Write,
    result: &AnalysisResult,
    opts: &OutputOptions,
) -> std::io::Result<()> {
    if opts.json {
        serde_json::to_writer_pretty(&mut *out, result)?;
        return writeln!(out);
    }

    writeln!(
        out,
        "{}  {}",
        heading(&result.source, opts.color),
        dim(&format!("({}, {} chars)", result.model, format_number(result.input_chars)), opts.color)
    )?;
    writeln!(out)?;

    writeln!(out, "{}", heading("Tokens", opts.color))?;
    writeln!(out, "  total             {}", format_number(result.total_tokens))?;
    writeln!(
        out,
        "  unique            {}  ({})",
        format_number(result.unique_tokens),
        format_pct(result.uniqueness_ratio())
    )?;
    writeln!(out, "  per word          {:.2}", result.token_word_ratio)?;
    writeln!(out, "  avg length        {:.2} chars", result.avg_token_length)?;
    writeln!(
        out,
        "  est. input cost   {}",
        pricing::format_cost(pricing::input_cost(&result.model, result.total_tokens as u64))
    )?;
    writeln!(out)?;

    writeln!(out, "{}", heading("Structure", opts.color))?;
    writeln!(out, "  content density   {}", format_pct(result.content_density))?;
    writeln!(out, "  whitespace        {}", format_pct(result.whitespace_ratio))?;
    writeln!(out, "  lexical diversity {}", format_pct(result.lexical_diversity))?;
    writeln!(out)?;

    writeln!(out, "{}", heading("Readability", opts.color))?;
    writeln!(
        out,
        "  flesch            {:.1}  ({})",
        result.flesch_score,
        result.reading_level()
    )?;
    writeln!(
        out,
        "  complexity        {}  ({})",
        format_score(result.complexity_score),
        result.complexity_level()
    )?;
    writeln!(out, "  avg sentence      {:.1} words", result.avg_sentence_length)?;
    writeln!(out)?;

    writeln!(
        out,
        "{}",
        dim(&format!("processed in {}", result.formatted_processing_time()), opts.color)
    )
}

// ─── Comparison ──────────────────────────────────────────────────────────────

/// Write a two-model comparison report to `out`.
pub fn write_comparison(
    out: &mut dyn Write,
    comparison: &ComparisonResult,
    opts: &OutputOptions,
) -> std::io::Result<()> {
    if opts.json {
        serde_json::to_writer_pretty(&mut *out, comparison)?;
        return writeln!(out);
    }

    writeln!(
        out,
        "{} vs {}",
        heading(&comparison.model_a, opts.color),
        heading(&comparison.model_b, opts.color)
    )?;
    writeln!(out)?;

    writeln!(
        out,
        "  tokens        {} vs {}",
        format_number(comparison.metrics_a.total_tokens),
        format_number(comparison.metrics_b.total_tokens)
    )?;
    writeln!(
        out,
        "  unique        {} vs {}",
        format_number(comparison.metrics_a.unique_tokens),
        format_number(comparison.metrics_b.unique_tokens)
    )?;
    writeln!(
        out,
        "  efficiency    {}  ({})",
        format_score(comparison.efficiency),
        comparison.efficiency_description()
    )?;
    writeln!(
        out,
        "  overlap       {}  ({})",
        format_score(comparison.token_overlap),
        comparison.overlap_description()
    )?;
    Ok(())
}

// ─── Batch ───────────────────────────────────────────────────────────────────

/// Write a batch report (per-item table plus summary) to `out`.
pub fn write_batch(
    out: &mut dyn Write,
    items: &[BatchItem],
    opts: &OutputOptions,
) -> std::io::Result<()> {
    let summary = BatchSummary::from_items(items);

    if opts.json {
        serde_json::to_writer_pretty(&mut *out, &batch_json(items, &summary))?;
        return writeln!(out);
    }

    let path_w = items
        .iter()
        .map(|i| i.source.chars().count())
        .max()
        .unwrap_or(0)
        .max(4);

    writeln!(
        out,
        "{}",
        heading(
            &format!("{:<path_w$}  {:>10}  {:>7}", "PATH", "TOKENS", "FLESCH"),
            opts.color
        )
    )?;
    for item in items {
        match &item.outcome {
            Ok(r) => writeln!(
                out,
                "{:<path_w$}  {:>10}  {:>7.1}",
                item.source,
                format_number(r.total_tokens),
                r.flesch_score
            )?,
            Err(e) => writeln!(
                out,
                "{:<path_w$}  {}",
                item.source,
                dim(&format!("error: {e}"), opts.color)
            )?,
        }
    }

    writeln!(out)?;
    writeln!(
        out,
        "{}/{} succeeded ({})  ·  {} tokens total  ·  mean flesch {:.1}",
        summary.succeeded,
        summary.total,
        format_pct(summary.success_rate),
        format_number(summary.total_tokens as usize),
        summary.mean_flesch
    )
}

/// JSON value for a batch: per-item outcomes plus the derived summary.
fn batch_json(items: &[BatchItem], summary: &BatchSummary) -> serde_json::Value {
    let items: Vec<serde_json::Value> = items
        .iter()
        .map(|item| match &item.outcome {
            Ok(result) => serde_json::json!({
                "source": item.source,
                "ok": true,
                "result": result,
            }),
            Err(e) => serde_json::json!({
                "source": item.source,
                "ok": false,
                "error": e.to_string(),
            }),
        })
        .collect();

    serde_json::json!({
        "items": items,
        "summary": summary,
    })
}
