//! Lexical specification errors.

use std::path::PathBuf;

use quill_diagnostic::{Diagnostic, ErrorCode, ToDiagnostic};
use quill_ir::TokenTableError;

use crate::Table;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LexSpecError {
    #[error("{table} line {line}: expected {expected}, found `{text}`")]
    MalformedLine {
        table: Table,
        line: u32,
        expected: &'static str,
        text: String,
    },
    #[error("{table} line {line}: `{name}` has an empty literal")]
    EmptyLiteral { table: Table, line: u32, name: String },
    #[error("{table}: `{second}` spells `{literal}`, already taken by `{first}`")]
    Collision {
        table: Table,
        literal: String,
        first: String,
        second: String,
    },
    #[error(transparent)]
    TokenName(#[from] TokenTableError),
    #[error("cannot read {}: {message}", path.display())]
    Io { path: PathBuf, message: String },
}

impl ToDiagnostic for LexSpecError {
    fn code(&self) -> ErrorCode {
        match self {
            LexSpecError::MalformedLine { .. } => ErrorCode::E0101,
            LexSpecError::EmptyLiteral { .. } => ErrorCode::E0102,
            LexSpecError::Collision { .. } => ErrorCode::E0103,
            LexSpecError::TokenName(TokenTableError::Overflow) => ErrorCode::E0902,
            LexSpecError::TokenName(_) => ErrorCode::E0104,
            LexSpecError::Io { .. } => ErrorCode::E0901,
        }
    }

    fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code()).with_message(self.to_string());
        match self {
            LexSpecError::MalformedLine { table, line, .. }
            | LexSpecError::EmptyLiteral { table, line, .. } => {
                diag.in_file(table.file_name()).at(*line, 1)
            }
            LexSpecError::Collision { table, .. } => diag
                .in_file(table.file_name())
                .with_note("each literal may name only one token"),
            LexSpecError::Io { path, .. } => diag.in_file(path.display().to_string()),
            LexSpecError::TokenName(_) => diag,
        }
    }
}
