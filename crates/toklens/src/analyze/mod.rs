//! The analysis engine: structural text metrics, token metrics, model
//! comparison, and the orchestrator that merges them.
//!
//! [`text`] and [`tokens`] are independent of each other; [`Engine`]
//! runs both over the same input and merges the outcome into one
//! [`AnalysisResult`].

pub mod compare;
mod engine;
mod error;
pub mod text;
pub mod tokens;

pub use compare::ComparisonResult;
pub use engine::{
    AnalysisResult, BatchItem, BatchSummary, DIRECT_INPUT, Engine,
};
pub use error::AnalyzeError;
pub use tokens::{DEFAULT_TOP_N, TokenInfo, TokenMetrics};
