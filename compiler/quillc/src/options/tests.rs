use super::*;
use pretty_assertions::assert_eq;

fn args(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_owned).collect()
}

fn parse(line: &str) -> Result<Invocation, UsageError> {
    parse_args(&args(line))
}

#[test]
fn lexgen_with_output() {
    let inv = parse("lexgen --lex=spec -o out/tokens.rs").unwrap();
    assert_eq!(inv.command, Command::Lexgen { lex: "spec".into() });
    assert_eq!(inv.output, Some(PathBuf::from("out/tokens.rs")));
    assert_eq!(inv.delimiter, b',');
    assert_eq!(inv.emit, EmitOptions::default());
}

#[test]
fn flags_may_precede_the_command() {
    let inv = parse("--lex=spec --ignore-newlines parse input.txt --grammar=g.txt --root=expr").unwrap();
    assert_eq!(
        inv.command,
        Command::Parse {
            input: "input.txt".into(),
            lex: "spec".into(),
            grammar: "g.txt".into(),
            root: Some("expr".into()),
        }
    );
    assert!(inv.parse.ignore_newlines);
    assert!(!inv.parse.prune_newlines);
}

#[test]
fn emit_paths_and_delimiter() {
    let inv = parse("pgen g.txt --lex=spec --runtime=rt --interface=crate::gen::rules --delimiter=|")
        .unwrap();
    assert_eq!(inv.emit.runtime_path, "rt");
    assert_eq!(inv.emit.interface_path, "crate::gen::rules");
    assert_eq!(inv.emit.tokens_path, "crate::tokens");
    assert_eq!(inv.delimiter, b'|');
}

#[test]
fn usage_errors() {
    let cases = [
        ("", "missing command"),
        ("frobnicate", "unknown command `frobnicate`"),
        ("lexgen", "`lexgen` needs `--lex=<dir>`"),
        ("lexgen --lex=d extra", "`lexgen` takes no file argument, got `extra`"),
        ("pgen --lex=d", "`pgen` needs a grammar file"),
        ("parse in.txt --lex=d", "`parse` needs `--grammar=<file>`"),
        ("listing g.txt --verbose", "unknown option `--verbose`"),
        ("listing g.txt -o", "`-o` needs a path"),
        ("listing a b c", "unexpected argument `c`"),
        ("lexgen --lex=d --delimiter=ab", "`--delimiter` takes a single byte, got `ab`"),
    ];
    for (line, message) in cases {
        assert_eq!(parse(line).unwrap_err().to_string(), message, "{line:?}");
    }
}
