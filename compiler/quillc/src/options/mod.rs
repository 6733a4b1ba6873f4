//! Hand-rolled argument parsing.
//!
//! Flags take their value inline (`--lex=dir`); `-o` takes the next
//! argument. The first positional argument is the command, the second (if
//! the command takes one) its input file.

use std::path::PathBuf;

use quill_emit::EmitOptions;
use quill_parse::ParseOptions;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct UsageError(pub String);

/// What to do, with the paths each command needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Emit scanner source for a lexical specification.
    Lexgen { lex: PathBuf },
    /// Emit the rule interface and matching functions for a grammar.
    Pgen { grammar: PathBuf, lex: PathBuf },
    /// Scan a file and print its tokens.
    Tokens { input: PathBuf, lex: PathBuf },
    /// Scan and parse a file and print the tree.
    Parse {
        input: PathBuf,
        lex: PathBuf,
        grammar: PathBuf,
        root: Option<String>,
    },
    /// Print a grammar's listing.
    Listing { grammar: PathBuf },
}

/// A parsed command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub command: Command,
    /// `-o`: a file for `lexgen`, a directory for `pgen`. Stdout otherwise.
    pub output: Option<PathBuf>,
    /// Field delimiter of the lexical tables.
    pub delimiter: u8,
    pub emit: EmitOptions,
    pub parse: ParseOptions,
}

#[derive(Default)]
struct Flags {
    positional: Vec<String>,
    output: Option<PathBuf>,
    lex: Option<PathBuf>,
    grammar: Option<PathBuf>,
    root: Option<String>,
    delimiter: Option<u8>,
    emit: EmitOptions,
    parse: ParseOptions,
}

pub fn parse_args(args: &[String]) -> Result<Invocation, UsageError> {
    let mut flags = Flags::default();
    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        if arg == "-o" {
            let Some(path) = args.get(i + 1) else {
                return Err(UsageError("`-o` needs a path".into()));
            };
            flags.output = Some(PathBuf::from(path));
            i += 2;
            continue;
        }
        flags.apply(arg)?;
        i += 1;
    }
    flags.finish()
}

impl Flags {
    fn apply(&mut self, arg: &str) -> Result<(), UsageError> {
        if !arg.starts_with('-') {
            self.positional.push(arg.to_owned());
            return Ok(());
        }
        let (flag, value) = match arg.split_once('=') {
            Some((flag, value)) => (flag, Some(value)),
            None => (arg, None),
        };
        match (flag, value) {
            ("--ignore-newlines", None) => self.parse.ignore_newlines = true,
            ("--prune-newlines", None) => self.parse.prune_newlines = true,
            ("--lex", Some(dir)) => self.lex = Some(PathBuf::from(dir)),
            ("--grammar", Some(file)) => self.grammar = Some(PathBuf::from(file)),
            ("--root", Some(rule)) => self.root = Some(rule.to_owned()),
            ("--delimiter", Some(value)) => {
                let &[byte] = value.as_bytes() else {
                    return Err(UsageError(format!(
                        "`--delimiter` takes a single byte, got `{value}`"
                    )));
                };
                self.delimiter = Some(byte);
            }
            ("--ir", Some(path)) => self.emit.ir_path = path.to_owned(),
            ("--scanner", Some(path)) => self.emit.scanner_path = path.to_owned(),
            ("--runtime", Some(path)) => self.emit.runtime_path = path.to_owned(),
            ("--tokens", Some(path)) => self.emit.tokens_path = path.to_owned(),
            ("--interface", Some(path)) => self.emit.interface_path = path.to_owned(),
            _ => return Err(UsageError(format!("unknown option `{arg}`"))),
        }
        Ok(())
    }

    fn finish(mut self) -> Result<Invocation, UsageError> {
        let mut positional = std::mem::take(&mut self.positional).into_iter();
        let Some(name) = positional.next() else {
            return Err(UsageError("missing command".into()));
        };
        let file = positional.next().map(PathBuf::from);
        if let Some(extra) = positional.next() {
            return Err(UsageError(format!("unexpected argument `{extra}`")));
        }

        let command = match name.as_str() {
            "lexgen" => {
                no_file(&name, file)?;
                Command::Lexgen {
                    lex: self.lex(&name)?,
                }
            }
            "pgen" => Command::Pgen {
                grammar: need(&name, "a grammar file", file)?,
                lex: self.lex(&name)?,
            },
            "tokens" => Command::Tokens {
                input: need(&name, "an input file", file)?,
                lex: self.lex(&name)?,
            },
            "parse" => Command::Parse {
                input: need(&name, "an input file", file)?,
                lex: self.lex(&name)?,
                grammar: need(&name, "`--grammar=<file>`", self.grammar.take())?,
                root: self.root.take(),
            },
            "listing" => Command::Listing {
                grammar: need(&name, "a grammar file", file)?,
            },
            _ => return Err(UsageError(format!("unknown command `{name}`"))),
        };

        Ok(Invocation {
            command,
            output: self.output,
            delimiter: self.delimiter.unwrap_or(b','),
            emit: self.emit,
            parse: self.parse,
        })
    }

    fn lex(&mut self, command: &str) -> Result<PathBuf, UsageError> {
        need(command, "`--lex=<dir>`", self.lex.take())
    }

}

fn no_file(command: &str, file: Option<PathBuf>) -> Result<(), UsageError> {
    match file {
        Some(file) => Err(UsageError(format!(
            "`{command}` takes no file argument, got `{}`",
            file.display()
        ))),
        None => Ok(()),
    }
}

fn need<T>(command: &str, what: &str, value: Option<T>) -> Result<T, UsageError> {
    value.ok_or_else(|| UsageError(format!("`{command}` needs {what}")))
}

pub const USAGE: &str = "\
Usage: quill <command> [options]

Commands:
  lexgen  --lex=<dir> [-o <file>]          Emit scanner source
  pgen    <grammar> --lex=<dir> [-o <dir>] Emit rules.rs and parser.rs
  tokens  <input> --lex=<dir>              Print the token stream
  parse   <input> --lex=<dir> --grammar=<file> [--root=<rule>]
                                           Print the parse tree
  listing <grammar>                        Print the grammar listing

Options:
  --delimiter=<c>      Field delimiter of the lexical tables (default `,`)
  --ignore-newlines    Drop newline tokens before parsing
  --prune-newlines     Strip newline leaves from the finished tree
  --ir=<path>          Path of the crate providing tokens (default quill_ir)
  --scanner=<path>     Scanner runtime path (default quill_lexer)
  --runtime=<path>     Parser runtime path (default quill_parse)
  --tokens=<path>      Module holding token constants (default crate::tokens)
  --interface=<path>   Module holding rule constants (default crate::rules)
  -o <path>            Write output to a file (lexgen) or directory (pgen)

Set RUST_LOG to enable logging; QUILL_LOG_TREE for a span tree.
";

#[cfg(test)]
mod tests;
