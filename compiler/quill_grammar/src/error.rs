//! Grammar errors.

use quill_diagnostic::{Diagnostic, ErrorCode, ToDiagnostic};

use crate::ProductionKind;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GrammarError {
    #[error("rule `{name}` is defined more than once")]
    DuplicateRule { name: String },
    #[error("rule `{rule}`: `{kind}` needs at least one alternative")]
    EmptyArity { rule: String, kind: ProductionKind },
    #[error("rule `{rule}`: `optional` is only allowed directly inside `and`")]
    MisplacedOptional { rule: String },
    #[error("rule `{rule}` refers to undefined rule `{reference}`")]
    UnresolvedRule { rule: String, reference: String },
    #[error("`{name}` is not a valid rule name")]
    InvalidRuleName { name: String },
}

impl ToDiagnostic for GrammarError {
    fn code(&self) -> ErrorCode {
        match self {
            GrammarError::DuplicateRule { .. } => ErrorCode::E0301,
            GrammarError::EmptyArity { .. } => ErrorCode::E0302,
            GrammarError::MisplacedOptional { .. } => ErrorCode::E0303,
            GrammarError::UnresolvedRule { .. } => ErrorCode::E0305,
            GrammarError::InvalidRuleName { .. } => ErrorCode::E0306,
        }
    }

    fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code()).with_message(self.to_string());
        match self {
            GrammarError::InvalidRuleName { .. } => diag.with_note(
                "rule names are identifiers; `__` is reserved for generated helpers",
            ),
            GrammarError::MisplacedOptional { .. } => {
                diag.with_note("wrap the optional part in `and(...)`")
            }
            _ => diag,
        }
    }
}
