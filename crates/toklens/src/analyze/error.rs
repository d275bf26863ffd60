use crate::extract::ExtractError;
use crate::tokenize::TokenizeError;

/// Error type for analysis failures.
///
/// Unknown model names are deliberately absent: resolution always falls
/// back to the default vocabulary instead of failing.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum AnalyzeError {
    /// The input could not be turned into text.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Extract(#[from] ExtractError),

    /// The tokenizer could not be initialised or used.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Tokenize(#[from] TokenizeError),

    /// Any computation failure not otherwise classified.
    #[error("analysis failed: {0}")]
    #[diagnostic(code(toklens::analyze::internal))]
    Internal(String),
}
