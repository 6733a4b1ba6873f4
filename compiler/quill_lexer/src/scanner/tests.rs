use super::*;
use crate::Delimited;
use pretty_assertions::assert_eq;

const PLUS: TokenKind = TokenKind::from_raw(5);
const EQEQ: TokenKind = TokenKind::from_raw(6);
const EQ: TokenKind = TokenKind::from_raw(7);
const SEMI: TokenKind = TokenKind::from_raw(8);
const KW_IF: TokenKind = TokenKind::from_raw(9);
const KW_IN: TokenKind = TokenKind::from_raw(10);
const KW_INT: TokenKind = TokenKind::from_raw(11);
const STRING: TokenKind = TokenKind::from_raw(12);
const BLOCK: TokenKind = TokenKind::from_raw(13);
const LINE: TokenKind = TokenKind::from_raw(14);

/// Linear-search classifier; the trie-backed one lives in `quill_lexgen`.
struct ListSpec {
    symbols: Vec<(&'static [u8], TokenKind)>,
    keywords: Vec<(&'static [u8], TokenKind)>,
    comments: Vec<(&'static [u8], &'static [u8], TokenKind)>,
    strings: Vec<(&'static [u8], &'static [u8], TokenKind)>,
}

fn spec() -> ListSpec {
    ListSpec {
        symbols: vec![(b"+", PLUS), (b"==", EQEQ), (b"=", EQ), (b";", SEMI)],
        keywords: vec![(b"if", KW_IF), (b"in", KW_IN), (b"int", KW_INT)],
        comments: vec![(b"/*", b"*/", BLOCK), (b"//", b"\n", LINE)],
        strings: vec![(b"\"", b"\"", STRING)],
    }
}

fn delimited(
    list: &[(&'static [u8], &'static [u8], TokenKind)],
    input: &[u8],
) -> Option<Delimited<'static>> {
    list.iter()
        .find(|(open, _, _)| input.starts_with(open))
        .map(|&(open, close, kind)| Delimited {
            kind,
            open_len: open.len(),
            close,
        })
}

impl Classifier for ListSpec {
    fn symbol(&self, input: &[u8]) -> Option<(TokenKind, usize)> {
        self.symbols
            .iter()
            .filter(|(lit, _)| input.starts_with(lit))
            .max_by_key(|(lit, _)| lit.len())
            .map(|&(lit, kind)| (kind, lit.len()))
    }

    fn is_start_of_symbol(&self, byte: u8) -> bool {
        self.symbols.iter().any(|(lit, _)| lit[0] == byte)
    }

    fn keyword(&self, word: &[u8]) -> Option<TokenKind> {
        self.keywords
            .iter()
            .find(|(lit, _)| *lit == word)
            .map(|&(_, kind)| kind)
    }

    fn comment_start(&self, input: &[u8]) -> Option<Delimited<'_>> {
        delimited(&self.comments, input)
    }

    fn string_start(&self, input: &[u8]) -> Option<Delimited<'_>> {
        delimited(&self.strings, input)
    }
}

fn scan(input: &str) -> Result<Vec<(TokenKind, String)>, ScanError> {
    let interner = StringInterner::new();
    let tokens = tokenize(&spec(), input, &interner)?;
    Ok(tokens
        .iter()
        .map(|t| (t.kind, interner.lookup(t.text).to_owned()))
        .collect())
}

fn kinds(input: &str) -> Vec<TokenKind> {
    scan(input).unwrap().into_iter().map(|(k, _)| k).collect()
}

fn tok(kind: TokenKind, text: &str) -> (TokenKind, String) {
    (kind, text.to_owned())
}

#[test]
fn longest_symbol_wins() {
    assert_eq!(
        scan("a == b").unwrap(),
        vec![
            tok(TokenKind::WORD, "a"),
            tok(EQEQ, "=="),
            tok(TokenKind::WORD, "b")
        ]
    );
    assert_eq!(kinds("a = = b"), vec![TokenKind::WORD, EQ, EQ, TokenKind::WORD]);
    assert_eq!(kinds("a===b"), vec![TokenKind::WORD, EQEQ, EQ, TokenKind::WORD]);
}

#[test]
fn keywords_need_exact_length() {
    assert_eq!(
        kinds("if iff i int in inte"),
        vec![
            KW_IF,
            TokenKind::WORD,
            TokenKind::WORD,
            KW_INT,
            KW_IN,
            TokenKind::WORD
        ]
    );
}

#[test]
fn words_take_underscore_dollar_and_digits() {
    assert_eq!(
        scan("_x $y z9").unwrap(),
        vec![
            tok(TokenKind::WORD, "_x"),
            tok(TokenKind::WORD, "$y"),
            tok(TokenKind::WORD, "z9")
        ]
    );
}

#[test]
fn numbers() {
    assert_eq!(
        scan("12 3.5 2f 7. 0.5f").unwrap(),
        vec![
            tok(TokenKind::INTEGER, "12"),
            tok(TokenKind::FLOATING, "3.5"),
            tok(TokenKind::FLOATING, "2f"),
            tok(TokenKind::FLOATING, "7."),
            tok(TokenKind::FLOATING, "0.5f"),
        ]
    );
}

#[test]
fn second_decimal_point_ends_the_number() {
    assert_eq!(
        scan("1.2.3"),
        Err(ScanError::Unclassifiable {
            line: 1,
            col: 4,
            byte: b'.'
        })
    );
}

#[test]
fn number_then_word() {
    assert_eq!(
        scan("3abc").unwrap(),
        vec![tok(TokenKind::INTEGER, "3"), tok(TokenKind::WORD, "abc")]
    );
}

#[test]
fn newlines_collapse() {
    assert_eq!(
        kinds("a\n\n\r\n  \nb\n"),
        vec![
            TokenKind::WORD,
            TokenKind::NEWLINE,
            TokenKind::WORD,
            TokenKind::NEWLINE
        ]
    );
}

#[test]
fn leading_newline_is_kept() {
    assert_eq!(kinds("\na"), vec![TokenKind::NEWLINE, TokenKind::WORD]);
}

#[test]
fn positions_are_one_based() {
    let interner = StringInterner::new();
    let tokens = tokenize(&spec(), "x\n  if +", &interner).unwrap();
    let positions: Vec<_> = tokens.iter().map(|t| (t.line, t.col, t.len)).collect();
    assert_eq!(positions, vec![(1, 1, 1), (1, 2, 1), (2, 3, 2), (2, 6, 1)]);
}

#[test]
fn block_comment_is_skipped() {
    assert_eq!(kinds("a /* b == c */ + d"), vec![TokenKind::WORD, PLUS, TokenKind::WORD]);
}

#[test]
fn block_comment_open_is_not_reused_as_close() {
    assert_eq!(kinds("a /*/ b */ c"), vec![TokenKind::WORD, TokenKind::WORD]);
}

#[test]
fn line_comment_keeps_its_newline() {
    assert_eq!(
        kinds("a // note == x\nb"),
        vec![TokenKind::WORD, TokenKind::NEWLINE, TokenKind::WORD]
    );
}

#[test]
fn line_comment_at_end_of_input() {
    assert_eq!(kinds("a // trailing"), vec![TokenKind::WORD]);
}

#[test]
fn strings_keep_escaped_terminators() {
    assert_eq!(
        scan(r#"x = "say \"hi\"";"#).unwrap(),
        vec![
            tok(TokenKind::WORD, "x"),
            tok(EQ, "="),
            tok(STRING, r#"say \"hi\""#),
            tok(SEMI, ";"),
        ]
    );
}

#[test]
fn empty_string() {
    assert_eq!(scan("\"\"").unwrap(), vec![tok(STRING, "")]);
}

#[test]
fn multi_line_string_keeps_its_start_position() {
    let interner = StringInterner::new();
    let tokens = tokenize(&spec(), "  \"ab\ncd\" e", &interner).unwrap();
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, STRING);
    assert_eq!(interner.lookup(tokens[0].text), "ab\ncd");
    assert_eq!((tokens[0].line, tokens[0].col), (1, 3));
    assert_eq!((tokens[1].line, tokens[1].col), (2, 5));
}

#[test]
fn scan_line_reports_need_more() {
    let interner = StringInterner::new();
    let spec = spec();
    let mut scanner = LineScanner::new(&spec, &interner);
    let mut out = Vec::new();

    assert_eq!(scanner.scan_line(1, "a /* open\n", &mut out), Ok(ScanStatus::NeedMore));
    assert!(scanner.is_pending());
    assert_eq!(scanner.scan_line(2, "still open\n", &mut out), Ok(ScanStatus::NeedMore));
    assert_eq!(scanner.scan_line(3, "done */ b\n", &mut out), Ok(ScanStatus::Complete));
    assert_eq!(scanner.finish(), Ok(()));

    let kinds: Vec<_> = out.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![TokenKind::WORD, TokenKind::WORD, TokenKind::NEWLINE]
    );
    assert_eq!(out[1].line, 3);
}

#[test]
fn newline_collapse_spans_calls() {
    let interner = StringInterner::new();
    let spec = spec();
    let mut scanner = LineScanner::new(&spec, &interner);
    let mut out = Vec::new();
    scanner.scan_line(1, "a\n", &mut out).unwrap();
    scanner.scan_line(2, "\n", &mut out).unwrap();
    scanner.scan_line(3, "b\n", &mut out).unwrap();
    assert_eq!(out.len(), 4);
}

#[test]
fn unterminated_constructs_at_end_of_input() {
    assert_eq!(
        scan("a /* never"),
        Err(ScanError::UnterminatedComment { line: 1, col: 3 })
    );
    assert_eq!(
        scan("x\n \"open\nstill"),
        Err(ScanError::UnterminatedString { line: 2, col: 2 })
    );
}

#[test]
fn unclassifiable_byte_is_an_error() {
    let err = scan("a\nb @ c").unwrap_err();
    assert_eq!(
        err,
        ScanError::Unclassifiable {
            line: 2,
            col: 3,
            byte: b'@'
        }
    );
    let diag = err.to_diagnostic();
    assert_eq!(diag.code, ErrorCode::E0201);
    assert_eq!(
        diag.to_string(),
        "error[E0201]: no lexical category matches `@`\n  --> 2:3\n  = note: the lexical specification declares no symbol for it"
    );
}

#[test]
fn non_ascii_byte_is_described_by_value() {
    let err = scan("é").unwrap_err();
    assert_eq!(err.to_string(), "no lexical category matches byte 0xc3 at 1:1");
}

#[test]
fn resolve_orders_symbol_keyword_number() {
    let spec = spec();
    assert_eq!(spec.resolve(b"=="), EQEQ);
    assert_eq!(spec.resolve(b"in"), KW_IN);
    assert_eq!(spec.resolve(b"42"), TokenKind::INTEGER);
    assert_eq!(spec.resolve(b"4.2"), TokenKind::FLOATING);
    assert_eq!(spec.resolve(b"4f"), TokenKind::FLOATING);
    assert_eq!(spec.resolve(b"==x"), TokenKind::UNKNOWN);
    assert_eq!(spec.resolve(b"word"), TokenKind::UNKNOWN);
    assert_eq!(spec.resolve(b""), TokenKind::UNKNOWN);
}

mod proptest_scanner {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn keyword_iff_exact_spelling(word in "[a-z][a-z0-9_]{0,5}") {
            let expected = match word.as_str() {
                "if" => KW_IF,
                "in" => KW_IN,
                "int" => KW_INT,
                _ => TokenKind::WORD,
            };
            prop_assert_eq!(kinds(&word), vec![expected]);
        }

        #[test]
        fn equals_runs_split_greedily(run in 1usize..12) {
            let input = "=".repeat(run);
            let got = kinds(&input);
            prop_assert_eq!(got.len(), run / 2 + run % 2);
            prop_assert!(got[..run / 2].iter().all(|k| *k == EQEQ));
            if run % 2 == 1 {
                prop_assert_eq!(got.last().copied(), Some(EQ));
            }
        }
    }
}
