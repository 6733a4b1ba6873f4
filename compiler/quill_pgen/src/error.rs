//! Compile and link errors.

use quill_diagnostic::{Diagnostic, ErrorCode, ToDiagnostic};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    #[error("rule `{rule}` uses unknown token `{token}`")]
    UnresolvedToken { rule: String, token: String },
}

impl ToDiagnostic for CompileError {
    fn code(&self) -> ErrorCode {
        match self {
            CompileError::UnresolvedToken { .. } => ErrorCode::E0304,
        }
    }

    fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code())
            .with_message(self.to_string())
            .with_note("token names come from the lexical specification")
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    #[error("rule `{rule}` refers to undefined rule `{reference}`")]
    UnresolvedRule { rule: String, reference: String },
    #[error("no rule named `{name}`")]
    UnknownRoot { name: String },
}

impl ToDiagnostic for LinkError {
    fn code(&self) -> ErrorCode {
        ErrorCode::E0305
    }

    fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code()).with_message(self.to_string())
    }
}
