//! Command handlers.
//!
//! Each handler returns the text destined for stdout; commands that write
//! files return an empty string. Shared helpers (file reading, loading a
//! lexical specification or grammar, output sinks) live here.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use quill_diagnostic::{Diagnostic, ErrorCode, ToDiagnostic};
use quill_emit::{Emitter, FileEmitter, StringEmitter};
use quill_front::FrontError;
use quill_grammar::{Grammar, GrammarError};
use quill_lexer::ScanError;
use quill_lexgen::{LexSpec, LexSpecError, Lexicon, TableOptions};
use quill_pgen::{CompileError, LinkError};
use tracing::debug;

use crate::{Command, Invocation};

mod generate;
mod inspect;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("cannot read `{}`: {message}", .path.display())]
    Read { path: PathBuf, message: String },
    #[error("cannot write `{}`: {message}", .path.display())]
    Write { path: PathBuf, message: String },
    #[error(transparent)]
    LexSpec(#[from] LexSpecError),
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Grammar(#[from] GrammarError),
    #[error(transparent)]
    Front(#[from] FrontError),
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error(transparent)]
    Link(#[from] LinkError),
}

impl ToDiagnostic for CliError {
    fn code(&self) -> ErrorCode {
        match self {
            CliError::Read { .. } | CliError::Write { .. } => ErrorCode::E0901,
            CliError::LexSpec(err) => err.code(),
            CliError::Scan(err) => err.code(),
            CliError::Grammar(err) => err.code(),
            CliError::Front(err) => err.code(),
            CliError::Compile(err) => err.code(),
            CliError::Link(err) => err.code(),
        }
    }

    fn to_diagnostic(&self) -> Diagnostic {
        match self {
            CliError::Read { path, message } | CliError::Write { path, message } => {
                Diagnostic::error(self.code())
                    .with_message(message.clone())
                    .in_file(path.display().to_string())
            }
            CliError::LexSpec(err) => err.to_diagnostic(),
            CliError::Scan(err) => err.to_diagnostic(),
            CliError::Grammar(err) => err.to_diagnostic(),
            CliError::Front(err) => err.to_diagnostic(),
            CliError::Compile(err) => err.to_diagnostic(),
            CliError::Link(err) => err.to_diagnostic(),
        }
    }
}

/// Run a parsed command line.
pub fn run(invocation: &Invocation) -> Result<String, CliError> {
    debug!(command = ?invocation.command, "run");
    match &invocation.command {
        Command::Lexgen { lex } => generate::lexgen(invocation, lex),
        Command::Pgen { grammar, lex } => generate::pgen(invocation, grammar, lex),
        Command::Tokens { input, lex } => inspect::tokens(invocation, input, lex),
        Command::Parse {
            input,
            lex,
            grammar,
            root,
        } => inspect::parse(invocation, input, lex, grammar, root.as_deref()),
        Command::Listing { grammar } => inspect::listing(grammar),
    }
}

pub(crate) fn read_file(path: &Path) -> Result<String, CliError> {
    fs::read_to_string(path).map_err(|err| CliError::Read {
        path: path.to_owned(),
        message: match err.kind() {
            io::ErrorKind::NotFound => "no such file".to_owned(),
            io::ErrorKind::PermissionDenied => "permission denied".to_owned(),
            io::ErrorKind::InvalidData => "not valid UTF-8".to_owned(),
            _ => err.to_string(),
        },
    })
}

pub(crate) fn load_lexicon(dir: &Path, delimiter: u8) -> Result<Lexicon, CliError> {
    let spec = LexSpec::load_dir(dir, &TableOptions { delimiter })?;
    Ok(Lexicon::build(&spec)?)
}

/// Parse a grammar file, rejecting references to undefined rules.
pub(crate) fn load_grammar(path: &Path) -> Result<Grammar, CliError> {
    let grammar = quill_front::parse_grammar(&read_file(path)?)?;
    grammar.check_references()?;
    Ok(grammar)
}

/// Where generated source goes: a file, or a string for stdout.
pub(crate) enum Sink {
    File(PathBuf, FileEmitter),
    Text(StringEmitter),
}

impl Sink {
    pub(crate) fn open(path: Option<&Path>) -> Result<Sink, CliError> {
        let Some(path) = path else {
            return Ok(Sink::Text(StringEmitter::new()));
        };
        FileEmitter::new(path)
            .map(|out| Sink::File(path.to_owned(), out))
            .map_err(|err| write_error(path, &err))
    }

    /// Flush a file, or hand back the collected text.
    pub(crate) fn close(self) -> Result<String, CliError> {
        match self {
            Sink::File(path, out) => {
                out.finish().map_err(|err| write_error(&path, &err))?;
                debug!(path = %path.display(), "wrote");
                Ok(String::new())
            }
            Sink::Text(out) => Ok(out.finish()),
        }
    }
}

impl Emitter for Sink {
    fn emit(&mut self, text: &str) {
        match self {
            Sink::File(_, out) => out.emit(text),
            Sink::Text(out) => out.emit(text),
        }
    }

    fn emit_newline(&mut self) {
        match self {
            Sink::File(_, out) => out.emit_newline(),
            Sink::Text(out) => out.emit_newline(),
        }
    }

    fn emit_indent(&mut self, level: usize) {
        match self {
            Sink::File(_, out) => out.emit_indent(level),
            Sink::Text(out) => out.emit_indent(level),
        }
    }
}

fn write_error(path: &Path, err: &io::Error) -> CliError {
    CliError::Write {
        path: path.to_owned(),
        message: err.to_string(),
    }
}
