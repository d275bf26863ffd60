//! toklens — token-level and structural text analysis across LLM
//! tokenizers.
//!
//! Given text and a model name, the [`analyze::Engine`] computes token
//! statistics (counts, uniqueness, frequency ranking), structural density
//! metrics, and readability scores; it can compare two models over the
//! same text and analyze whole batches of files with progress reporting
//! and per-item failure tolerance.
//!
//! ```no_run
//! use toklens::analyze::{DIRECT_INPUT, Engine};
//! use toklens::tokenize::ModelCatalog;
//!
//! let engine = Engine::new(ModelCatalog::builtin());
//! let result = engine
//!     .analyze_text(DIRECT_INPUT, "The cat sat on the mat.", "gpt-4")
//!     .unwrap();
//! assert!(result.total_tokens > 0);
//! ```

pub mod analyze;
pub mod extract;
pub mod output;
pub mod pricing;
pub mod tokenize;
pub mod walk;
