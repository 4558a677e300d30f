use thiserror::Error;

/// Failures that abort a whole extraction call.
///
/// Malformed declarations inside an otherwise well-formed file are not
/// errors; the affected node is omitted from the result and a warning is
/// logged instead.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("python grammar is incompatible with the parser: {0}")]
    Grammar(#[from] tree_sitter::LanguageError),

    #[error("parser produced no syntax tree")]
    ParseFailed,

    #[error("syntax error at line {line}, column {column}")]
    Syntax { line: usize, column: usize },
}
