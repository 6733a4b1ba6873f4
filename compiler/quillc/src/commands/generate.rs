//! `lexgen` and `pgen`: source generation.

use std::path::Path;

use quill_lexgen::emit_scanner;
use quill_pgen::{emit_implementation, emit_interface, Plan};
use tracing::info;

use super::{load_grammar, load_lexicon, CliError, Sink};
use crate::Invocation;

/// File names `pgen -o <dir>` writes, matching the default module paths.
pub(crate) const INTERFACE_FILE: &str = "rules.rs";
pub(crate) const IMPLEMENTATION_FILE: &str = "parser.rs";

pub(crate) fn lexgen(invocation: &Invocation, lex: &Path) -> Result<String, CliError> {
    let lexicon = load_lexicon(lex, invocation.delimiter)?;
    let mut sink = Sink::open(invocation.output.as_deref())?;
    emit_scanner(&lexicon, &invocation.emit, &mut sink);
    info!(kinds = lexicon.table().len(), "emitted scanner");
    sink.close()
}

pub(crate) fn pgen(invocation: &Invocation, grammar: &Path, lex: &Path) -> Result<String, CliError> {
    let lexicon = load_lexicon(lex, invocation.delimiter)?;
    let grammar = load_grammar(grammar)?;
    let plan = Plan::compile(&grammar, lexicon.table())?;

    let dir = invocation.output.as_deref();
    let mut interface = Sink::open(dir.map(|dir| dir.join(INTERFACE_FILE)).as_deref())?;
    emit_interface(&plan, &invocation.emit, &mut interface);
    let mut implementation = Sink::open(dir.map(|dir| dir.join(IMPLEMENTATION_FILE)).as_deref())?;
    emit_implementation(&plan, &invocation.emit, &mut implementation);
    info!(
        rules = plan.rules().len(),
        functions = plan.functions().len(),
        "emitted parser"
    );

    let interface = interface.close()?;
    let implementation = implementation.close()?;
    Ok(if dir.is_some() {
        String::new()
    } else {
        format!("{interface}\n{implementation}")
    })
}
