//! Structured diagnostics and their plain-text rendering.

use std::fmt;

use crate::ErrorCode;

/// Severity level for diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// A 1-based position in a named input.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Location {
    pub file: Option<String>,
    pub line: u32,
    pub col: u32,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{file}:{}:{}", self.line, self.col),
            None => write!(f, "{}:{}", self.line, self.col),
        }
    }
}

/// A diagnostic ready to be shown to the user.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Diagnostic {
    pub code: ErrorCode,
    pub severity: Severity,
    pub message: String,
    pub location: Option<Location>,
    pub notes: Vec<String>,
}

impl Diagnostic {
    #[cold]
    pub fn error(code: ErrorCode) -> Self {
        Diagnostic {
            code,
            severity: Severity::Error,
            message: String::new(),
            location: None,
            notes: Vec::new(),
        }
    }

    #[cold]
    pub fn warning(code: ErrorCode) -> Self {
        Diagnostic {
            severity: Severity::Warning,
            ..Self::error(code)
        }
    }

    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    #[must_use]
    pub fn at(mut self, line: u32, col: u32) -> Self {
        let file = self.location.take().and_then(|loc| loc.file);
        self.location = Some(Location { file, line, col });
        self
    }

    /// Attach a file name. Has no visible effect until a position is set.
    #[must_use]
    pub fn in_file(mut self, file: impl Into<String>) -> Self {
        let file = Some(file.into());
        match &mut self.location {
            Some(loc) => loc.file = file,
            None => {
                self.location = Some(Location {
                    file,
                    line: 0,
                    col: 0,
                });
            }
        }
        self
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)?;
        match &self.location {
            Some(loc) if loc.line > 0 => write!(f, "\n  --> {loc}")?,
            Some(Location {
                file: Some(file), ..
            }) => write!(f, "\n  --> {file}")?,
            _ => {}
        }
        for note in &self.notes {
            write!(f, "\n  = note: {note}")?;
        }
        Ok(())
    }
}

/// Conversion from a crate-level error into a [`Diagnostic`].
pub trait ToDiagnostic {
    fn code(&self) -> ErrorCode;

    fn to_diagnostic(&self) -> Diagnostic;
}
