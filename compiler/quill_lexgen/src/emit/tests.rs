use super::*;
use crate::{LexSpec, TableOptions};
use pretty_assertions::assert_eq;
use quill_emit::StringEmitter;

fn emit(symbols: &str, keywords: &str, comments: &str, strings: &str) -> String {
    let spec =
        LexSpec::from_tables(symbols, keywords, comments, strings, &TableOptions::default())
            .unwrap();
    let lexicon = Lexicon::build(&spec).unwrap();
    let mut out = StringEmitter::new();
    emit_scanner(&lexicon, &EmitOptions::default(), &mut out);
    out.finish()
}

fn sample() -> String {
    emit(
        "EQEQ,==\nEQ,=\n",
        "KEYWORD_IN,in\nKEYWORD_INT,int\n",
        "LINE,//,\\n\n",
        "STRING,\",\"\n",
    )
}

/// The block of `source` starting at the line containing `first` and
/// ending at the next line equal to `last`.
fn block<'a>(source: &'a str, first: &str, last: &str) -> &'a str {
    let start = source.find(first).unwrap();
    let start = source[..start].rfind('\n').map_or(0, |i| i + 1);
    let end = start + source[start..].find(&format!("\n{last}\n")).unwrap() + last.len() + 2;
    &source[start..end]
}

#[test]
fn header_and_imports() {
    let src = sample();
    assert!(src.starts_with(GENERATED_HEADER));
    assert!(src.contains("use quill_ir::{StringInterner, Token, TokenKind};\n"));
    assert!(src.contains("use quill_lexer::{Classifier, Delimited, ScanError};\n"));
}

#[test]
fn kind_constants_in_table_order() {
    let src = sample();
    assert!(src.contains("pub const TOKEN_NEWLINE: TokenKind = TokenKind::from_raw(1);\n"));
    assert!(src.contains("pub const STRING: TokenKind = TokenKind::from_raw(5);\n"));
    assert!(src.contains("pub const EQEQ: TokenKind = TokenKind::from_raw(6);\n"));
    assert!(src.contains("pub const KEYWORD_INT: TokenKind = TokenKind::from_raw(9);\n"));
    assert!(src.contains("pub const LINE_OPEN: TokenKind = TokenKind::from_raw(10);\n"));
    assert!(src.contains("pub const TOKEN_NOP: TokenKind = TokenKind::from_raw(14);\n"));
    assert!(src.contains("pub const TOKEN_COUNT: usize = 15;\n"));
}

#[test]
fn text_table_shows_literals() {
    let src = sample();
    let text = block(&src, "pub const TOKEN_TEXT", "];");
    assert!(text.contains("    \"\\\\n\",\n"), "{text}");
    assert!(text.contains("    \"==\",\n"));
    assert!(text.contains("    \"int\",\n"));
    assert!(text.contains("    \"TOKEN_NOP\",\n"));
}

#[test]
fn name_lookup_and_string_check() {
    let src = sample();
    assert!(src.contains("        \"EQEQ\" => EQEQ,\n"));
    assert!(src.contains("        _ => TOKENTYPE_UNKNOWN,\n"));
    assert!(src.contains("    matches!(kind, STRING)\n"));
}

#[test]
fn symbol_classifier_nests_by_depth() {
    let src = sample();
    assert_eq!(
        block(&src, "fn symbol(", "    }"),
        "    fn symbol(&self, word: &[u8]) -> Option<(TokenKind, usize)> {
        match word.get(0) {
            Some(&b'=') => {
                match word.get(1) {
                    Some(&b'=') => {
                        return Some((EQEQ, 2));
                    }
                    _ => {}
                }
                return Some((EQ, 1));
            }
            _ => {}
        }
        None
    }
"
    );
}

#[test]
fn keyword_classifier_guards_terminals_by_length() {
    let src = sample();
    assert_eq!(
        block(&src, "fn keyword(", "    }"),
        "    fn keyword(&self, word: &[u8]) -> Option<TokenKind> {
        match word.get(0) {
            Some(&b'i') => {
                match word.get(1) {
                    Some(&b'n') => {
                        if word.len() == 2 { return Some(KEYWORD_IN); }
                        match word.get(2) {
                            Some(&b't') => {
                                if word.len() == 3 { return Some(KEYWORD_INT); }
                            }
                            _ => {}
                        }
                    }
                    _ => {}
                }
            }
            _ => {}
        }
        None
    }
"
    );
}

#[test]
fn start_of_symbol_lists_first_bytes() {
    let src = emit("PLUS,+\nEQ,=\nBACKSLASH,\\\\\n", "", "", "");
    assert!(src.contains("            b'+' | b'=' | b'\\\\' => true,\n"), "{src}");
}

#[test]
fn delimiters_use_byte_strings() {
    let src = sample();
    assert_eq!(
        block(&src, "fn comment_start(", "    }"),
        "    fn comment_start(&self, input: &[u8]) -> Option<Delimited<'_>> {
        if input.starts_with(b\"//\") {
            return Some(Delimited {
                kind: LINE_OPEN,
                open_len: 2,
                close: b\"\\n\",
            });
        }
        None
    }
"
    );
    assert!(src.contains("                kind: STRING,\n"));
}

#[test]
fn empty_specification_still_implements_the_trait() {
    let src = emit("", "", "", "");
    assert!(src.contains("impl Classifier for Lexer {\n"));
    assert!(src.contains("    fn symbol(&self, word: &[u8]) -> Option<(TokenKind, usize)> {\n        let _ = word;\n        None\n    }\n"));
    assert!(src.contains("        let _ = input;\n        None\n"));
    assert!(src.contains("    let _ = kind;\n    false\n"));
    assert!(src.ends_with("    quill_lexer::tokenize(&Lexer, input, interner)\n}\n"));
}
