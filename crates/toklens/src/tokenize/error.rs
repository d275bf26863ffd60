/// Error type for tokenizer failures.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum TokenizeError {
    /// The BPE vocabulary could not be loaded.
    #[error("tokenizer init failed: {0}")]
    #[diagnostic(code(toklens::tokenize::init))]
    Init(String),

    /// A token sequence could not be rendered back to text.
    #[error("token decode failed: {0}")]
    #[diagnostic(
        code(toklens::tokenize::decode),
        help("the token ids may not form a valid UTF-8 sequence for this vocabulary")
    )]
    Decode(String),
}
