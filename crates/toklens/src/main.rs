//! toklens — token-level and structural text analysis from the command
//! line.

use std::io::{IsTerminal, Read, Write};
use std::path::PathBuf;

use clap::Parser;

use toklens::analyze::{DIRECT_INPUT, Engine};
use toklens::output::{self, OutputOptions};
use toklens::tokenize::ModelCatalog;
use toklens::{extract, walk};

// ─── CLI ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(
    name = "toklens",
    about = "Token-level and structural text analysis across LLM tokenizers",
    version
)]
struct Cli {
    /// Files or directories to analyze; `-` or piped input reads stdin.
    paths: Vec<PathBuf>,

    /// Model whose tokenizer to use.
    #[arg(short = 'm', long, default_value = "gpt-3.5-turbo", value_name = "MODEL")]
    model: String,

    /// Compare against a second model instead of running a full analysis.
    #[arg(long, value_name = "MODEL")]
    compare: Option<String>,

    /// Analyze this literal text instead of files or stdin.
    #[arg(long, value_name = "TEXT", conflicts_with = "paths")]
    text: Option<String>,

    /// Entries to keep in the most-frequent-token ranking.
    #[arg(long, default_value_t = 10, value_name = "N")]
    top: usize,

    /// Output JSON instead of a report.
    #[arg(long)]
    json: bool,

    /// Include files ignored by .gitignore.
    #[arg(long)]
    no_ignore: bool,

    /// Suppress batch progress on stderr.
    #[arg(long)]
    quiet: bool,

    /// Disable ANSI colors.
    #[arg(long)]
    no_color: bool,
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

fn read_stdin_or_exit() -> String {
    let mut buf = String::new();
    if let Err(e) = std::io::stdin().read_to_string(&mut buf) {
        eprintln!("error reading stdin: {e}");
        std::process::exit(exitcode::IOERR);
    }
    buf
}

fn report_and_exit(e: impl miette::Diagnostic + Send + Sync + 'static) -> ! {
    eprintln!("{:?}", miette::Report::new(e));
    std::process::exit(exitcode::IOERR);
}

/// The text to analyze when the run has a single text source.
enum TextSource {
    /// From `--text`.
    Direct(String),
    /// From piped or `-` stdin.
    Stdin(String),
}

impl TextSource {
    fn label(&self) -> &'static str {
        match self {
            Self::Direct(_) => DIRECT_INPUT,
            Self::Stdin(_) => "stdin",
        }
    }

    fn content(&self) -> &str {
        match self {
            Self::Direct(s) | Self::Stdin(s) => s,
        }
    }
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut cli = Cli::parse();

    // Resolve a single text source, if any.
    let dash_count = cli.paths.iter().filter(|p| p.as_os_str() == "-").count();
    if dash_count > 1 || (dash_count == 1 && cli.paths.len() > 1) {
        eprintln!("error: `-` (stdin) cannot be combined with other paths");
        std::process::exit(exitcode::USAGE);
    }

    let mut source: Option<TextSource> = cli.text.take().map(TextSource::Direct);
    if dash_count == 1 {
        cli.paths.clear();
        source = Some(TextSource::Stdin(read_stdin_or_exit()));
    }
    if cli.paths.is_empty() && source.is_none() && !std::io::stdin().is_terminal() {
        source = Some(TextSource::Stdin(read_stdin_or_exit()));
    }

    let engine = Engine::new(ModelCatalog::builtin()).with_top_n(cli.top);
    let opts = OutputOptions::new(cli.json, cli.no_color);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    if let Some(other) = cli.compare.as_deref() {
        run_compare(&engine, &cli, other, source.as_ref(), &mut out, &opts);
        return;
    }

    if let Some(source) = source {
        let result = match engine.analyze_text(source.label(), source.content(), &cli.model) {
            Ok(r) => r,
            Err(e) => report_and_exit(e),
        };
        write_or_exit(output::write_analysis(&mut out, &result, &opts));
        return;
    }

    if cli.paths.is_empty() {
        eprintln!("error: nothing to analyze (pass paths, --text, or pipe stdin)");
        std::process::exit(exitcode::USAGE);
    }

    run_paths(&engine, &cli, &mut out, &opts);
}

/// Analyze one or many files.
fn run_paths(engine: &Engine, cli: &Cli, out: &mut dyn Write, opts: &OutputOptions) {
    let discovered = walk::discover(&cli.paths, cli.no_ignore);
    for e in &discovered.errors {
        eprintln!("warning: {e}");
    }

    if discovered.files.is_empty() {
        eprintln!("error: no supported files found");
        std::process::exit(exitcode::NOINPUT);
    }

    if let [path] = discovered.files.as_slice() {
        let result = match engine.analyze_file(path, &cli.model) {
            Ok(r) => r,
            Err(e) => report_and_exit(e),
        };
        write_or_exit(output::write_analysis(out, &result, opts));
        return;
    }

    let quiet = cli.quiet;
    let items = engine.analyze_batch(&discovered.files, &cli.model, |fraction, source| {
        if !quiet {
            eprintln!("{:>5.1}%  {source}", fraction * 100.0);
        }
    });

    write_or_exit(output::write_batch(out, &items, opts));
}

/// Compare the primary model against `other` over a single text source.
fn run_compare(
    engine: &Engine,
    cli: &Cli,
    other: &str,
    source: Option<&TextSource>,
    out: &mut dyn Write,
    opts: &OutputOptions,
) {
    let content = if let Some(source) = source {
        source.content().to_owned()
    } else {
        let discovered = walk::discover(&cli.paths, cli.no_ignore);
        for e in &discovered.errors {
            eprintln!("warning: {e}");
        }
        match discovered.files.as_slice() {
            [path] => match extract::extract(path) {
                Ok(c) => c,
                Err(e) => report_and_exit(e),
            },
            [] => {
                eprintln!("error: --compare needs text (a single file, --text, or stdin)");
                std::process::exit(exitcode::USAGE);
            }
            _ => {
                eprintln!("error: --compare works on a single input, not a batch");
                std::process::exit(exitcode::USAGE);
            }
        }
    };

    let comparison = match engine.compare(&content, &cli.model, other) {
        Ok(c) => c,
        Err(e) => report_and_exit(e),
    };
    write_or_exit(output::write_comparison(out, &comparison, opts));
}

fn write_or_exit(result: std::io::Result<()>) {
    if let Err(e) = result {
        eprintln!("error writing output: {e}");
        std::process::exit(exitcode::IOERR);
    }
}
