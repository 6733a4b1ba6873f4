//! Front-end errors.

use quill_diagnostic::{Diagnostic, ErrorCode, ToDiagnostic};
use quill_grammar::GrammarError;
use quill_lexer::ScanError;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FrontError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Grammar(#[from] GrammarError),
    #[error("no grammar rule found at {line}:{col}")]
    NoMatch { line: u32, col: u32 },
    #[error("unexpected `{text}` after the last rule at {line}:{col}")]
    TrailingTokens { line: u32, col: u32, text: String },
    #[error("malformed {what} at {line}:{col}")]
    Malformed { what: &'static str, line: u32, col: u32 },
    #[error("notation bootstrap failed: {0}")]
    Bootstrap(String),
}

impl ToDiagnostic for FrontError {
    fn code(&self) -> ErrorCode {
        match self {
            FrontError::Scan(err) => err.code(),
            FrontError::Grammar(err) => err.code(),
            FrontError::NoMatch { .. } => ErrorCode::E0401,
            FrontError::TrailingTokens { .. } => ErrorCode::E0402,
            FrontError::Malformed { .. } => ErrorCode::E0403,
            FrontError::Bootstrap(_) => ErrorCode::E0902,
        }
    }

    fn to_diagnostic(&self) -> Diagnostic {
        match self {
            FrontError::Scan(err) => err.to_diagnostic(),
            FrontError::Grammar(err) => err.to_diagnostic(),
            FrontError::NoMatch { line, col } | FrontError::Malformed { line, col, .. } => {
                Diagnostic::error(self.code())
                    .with_message(self.to_string())
                    .at(*line, *col)
            }
            FrontError::TrailingTokens { line, col, .. } => Diagnostic::error(self.code())
                .with_message(self.to_string())
                .at(*line, *col)
                .with_note("rules are separated by `;`"),
            FrontError::Bootstrap(_) => Diagnostic::error(self.code()).with_message(self.to_string()),
        }
    }
}
