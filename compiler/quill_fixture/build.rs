//! Runs the lexical spec compiler over `lex/` and the grammar compiler over
//! `grammar.quill`, writing the generated modules to `OUT_DIR`.

use std::error::Error;
use std::path::PathBuf;
use std::{env, fs};

use quill_emit::{EmitOptions, StringEmitter};
use quill_lexgen::{emit_scanner, LexSpec, Lexicon, TableOptions};
use quill_pgen::{emit_implementation, emit_interface, Plan};

fn main() -> Result<(), Box<dyn Error>> {
    let root = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let lex_dir = root.join("lex");
    let grammar_path = root.join("grammar.quill");
    println!("cargo:rerun-if-changed={}", lex_dir.display());
    println!("cargo:rerun-if-changed={}", grammar_path.display());

    let lexicon = Lexicon::build(&LexSpec::load_dir(&lex_dir, &TableOptions::default())?)?;
    let grammar = quill_front::parse_grammar(&fs::read_to_string(&grammar_path)?)?;
    grammar.check_references()?;
    let plan = Plan::compile(&grammar, lexicon.table())?;
    let options = EmitOptions::default();

    let mut generated = String::new();
    module(&mut generated, "tokens", |out| emit_scanner(&lexicon, &options, out));
    module(&mut generated, "rules", |out| emit_interface(&plan, &options, out));
    module(&mut generated, "parser", |out| emit_implementation(&plan, &options, out));

    fs::write(PathBuf::from(env::var("OUT_DIR")?).join("generated.rs"), generated)?;
    Ok(())
}

/// Generated files open with inner attributes, which `include!` accepts only
/// at the top of a module body.
fn module(out: &mut String, name: &str, emit: impl FnOnce(&mut StringEmitter)) {
    let mut file = StringEmitter::new();
    emit(&mut file);
    out.push_str(&format!("pub mod {name} {{\n{}}}\n\n", file.finish()));
}
