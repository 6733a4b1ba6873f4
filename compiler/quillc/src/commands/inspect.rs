//! `tokens`, `parse` and `listing`: looking at what the toolkit produces.

use std::fmt::Write;
use std::path::Path;

use quill_ir::StringInterner;
use quill_lexer::tokenize;
use quill_parse::Parser;
use quill_pgen::{LinkError, Plan, Program};

use super::{load_grammar, load_lexicon, read_file, CliError};
use crate::Invocation;

/// One `line:col NAME "text"` line per token.
pub(crate) fn tokens(invocation: &Invocation, input: &Path, lex: &Path) -> Result<String, CliError> {
    let lexicon = load_lexicon(lex, invocation.delimiter)?;
    let source = read_file(input)?;
    let interner = StringInterner::new();
    let tokens = tokenize(&lexicon, &source, &interner)?;

    let table = lexicon.table();
    let mut out = String::new();
    for token in &tokens {
        // Writing to a String cannot fail.
        let _ = writeln!(
            out,
            "{}:{} {} {:?}",
            token.line,
            token.col,
            table.name(token.kind),
            interner.lookup(token.text)
        );
    }
    Ok(out)
}

/// The parse tree, followed by a note when input is left over.
pub(crate) fn parse(
    invocation: &Invocation,
    input: &Path,
    lex: &Path,
    grammar: &Path,
    root: Option<&str>,
) -> Result<String, CliError> {
    let lexicon = load_lexicon(lex, invocation.delimiter)?;
    let grammar = load_grammar(grammar)?;
    let program = Program::link(&Plan::compile(&grammar, lexicon.table())?)?;
    let root = match root {
        Some(root) => root,
        None => grammar.names().next().ok_or_else(|| LinkError::UnknownRoot {
            name: String::new(),
        })?,
    };

    let source = read_file(input)?;
    let interner = StringInterner::new();
    let tokens = tokenize(&lexicon, &source, &interner)?;
    let mut parser = Parser::new(invocation.parse.clone());
    let parsed = program.parse(&mut parser, root, tokens)?;

    let mut out = parser.printer(&program, &interner).render(parsed.root);
    out.push('\n');
    if let Some(first) = parsed.remainder.first() {
        let _ = writeln!(
            out,
            "unparsed: {} token(s) from {}:{}",
            parsed.remainder.len(),
            first.line,
            first.col
        );
    }
    Ok(out)
}

pub(crate) fn listing(grammar: &Path) -> Result<String, CliError> {
    let grammar = quill_front::parse_grammar(&read_file(grammar)?)?;
    Ok(grammar.listing().to_string())
}
