use super::*;
use pretty_assertions::assert_eq;

fn literal(name: &str, literal: &str, line: u32) -> LiteralDef {
    LiteralDef {
        name: name.into(),
        literal: literal.into(),
        line,
    }
}

#[test]
fn literals_split_at_first_delimiter() {
    let defs = parse_literals(
        Table::Symbols,
        "PLUS,+\nCOMMA,,\nEQEQ,==\r\n",
        &TableOptions::default(),
    )
    .unwrap();
    assert_eq!(
        defs,
        vec![
            literal("PLUS", "+", 1),
            literal("COMMA", ",", 2),
            literal("EQEQ", "==", 3)
        ]
    );
}

#[test]
fn literals_are_unescaped() {
    let defs = parse_literals(Table::Symbols, "BACKSLASH,\\\\\nTAB,\\t", &TableOptions::default())
        .unwrap();
    assert_eq!(defs[0].literal, "\\");
    assert_eq!(defs[1].literal, "\t");
}

#[test]
fn blank_lines_are_skipped_but_counted() {
    let defs = parse_literals(Table::Keywords, "\nKEYWORD_IF,if\n\r\nKEYWORD_IN,in\n", &TableOptions::default())
        .unwrap();
    assert_eq!(defs, vec![literal("KEYWORD_IF", "if", 2), literal("KEYWORD_IN", "in", 4)]);
}

#[test]
fn pairs_split_twice() {
    let defs = parse_pairs(
        Table::Comments,
        "BLOCK,/*,*/\nLINE,//,\\n\r\n",
        &TableOptions::default(),
    )
    .unwrap();
    assert_eq!(
        defs,
        vec![
            PairDef {
                name: "BLOCK".into(),
                open: "/*".into(),
                close: "*/".into(),
                line: 1
            },
            PairDef {
                name: "LINE".into(),
                open: "//".into(),
                close: "\n".into(),
                line: 2
            },
        ]
    );
}

#[test]
fn custom_delimiter() {
    let options = TableOptions { delimiter: b'\t' };
    let defs = parse_pairs(Table::Strings, "STRING\t\"\t\"", &options).unwrap();
    assert_eq!(defs[0].open, "\"");
    assert_eq!(defs[0].close, "\"");
}

#[test]
fn missing_fields_are_malformed() {
    let err = parse_literals(Table::Symbols, "PLUS", &TableOptions::default()).unwrap_err();
    assert_eq!(
        err,
        LexSpecError::MalformedLine {
            table: Table::Symbols,
            line: 1,
            expected: "NAME<delim>literal",
            text: "PLUS".into()
        }
    );
    let err = parse_pairs(Table::Comments, "BLOCK,/*", &TableOptions::default()).unwrap_err();
    assert!(matches!(err, LexSpecError::MalformedLine { line: 1, .. }));
}

#[test]
fn empty_literals_are_rejected() {
    let err = parse_literals(Table::Keywords, "KEYWORD_X,", &TableOptions::default()).unwrap_err();
    assert_eq!(
        err,
        LexSpecError::EmptyLiteral {
            table: Table::Keywords,
            line: 1,
            name: "KEYWORD_X".into()
        }
    );
    let err = parse_pairs(Table::Strings, "STRING,\",", &TableOptions::default()).unwrap_err();
    assert!(matches!(err, LexSpecError::EmptyLiteral { .. }));
}

#[test]
fn error_messages_name_the_table() {
    let err = parse_literals(Table::Symbols, "\nPLUS", &TableOptions::default()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "symbols.txt line 2: expected NAME<delim>literal, found `PLUS`"
    );
}

#[test]
fn load_dir_treats_missing_tables_as_empty() {
    let dir = std::env::temp_dir().join(format!("quill-lexgen-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("symbols.txt"), "PLUS,+\n").unwrap();
    std::fs::write(dir.join("keywords.txt"), "KEYWORD_IF,if\n").unwrap();

    let spec = LexSpec::load_dir(&dir, &TableOptions::default()).unwrap();
    std::fs::remove_dir_all(&dir).unwrap();

    assert_eq!(spec.symbols, vec![literal("PLUS", "+", 1)]);
    assert_eq!(spec.keywords, vec![literal("KEYWORD_IF", "if", 1)]);
    assert!(spec.comments.is_empty());
    assert!(spec.strings.is_empty());
}
