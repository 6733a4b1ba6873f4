use super::*;
use pretty_assertions::assert_eq;
use quill_ir::TokenKind;

fn notation() -> Notation {
    Notation::new().unwrap()
}

#[test]
fn rules_map_back_to_their_names() {
    let n = notation();
    for rule in NotationRule::ALL {
        let id = n.program().rule_id(rule.name()).unwrap();
        assert_eq!(n.rule_of(id), Some(rule));
    }
    assert_eq!(n.program().names().len(), NotationRule::ALL.len());
}

#[test]
fn list_helper_precedes_list() {
    let names: Vec<_> = notation().grammar().names().map(str::to_owned).collect();
    let helper = names.iter().position(|n| n == "list1").unwrap();
    let list = names.iter().position(|n| n == "list").unwrap();
    assert!(helper < list);
}

#[test]
fn keywords_and_symbols_scan() {
    let n = notation();
    let tokens = tokenize(n.lexicon(), "or -> rule:x; // trailing\n", n.interner()).unwrap();
    let names: Vec<_> = tokens
        .iter()
        .map(|t| n.lexicon().table().name(t.kind))
        .collect();
    assert_eq!(
        names,
        [
            "KEYWORD_OR",
            "SYMBOL_ARROW",
            "KEYWORD_RULE",
            "SYMBOL_COLON",
            "TOKEN_WORD",
            "SYMBOL_SEMICOLON",
            "TOKEN_NEWLINE",
        ]
    );
}

#[test]
fn block_comments_span_lines() {
    let n = notation();
    let tokens = tokenize(n.lexicon(), "/* one\ntwo */ epsilon", n.interner()).unwrap();
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        [n.lexicon().table().lookup("KEYWORD_EPSILON").unwrap()]
    );
    assert_eq!((tokens[0].line, tokens[0].col), (2, 8));
}

#[test]
fn words_with_digits_and_underscores_stay_whole() {
    let n = notation();
    let tokens = tokenize(n.lexicon(), "production_rule_set1", n.interner()).unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::WORD);
}

#[test]
fn parse_tree_of_a_single_rule() {
    let n = notation();
    let tokens = tokenize(n.lexicon(), "a -> epsilon", n.interner()).unwrap();
    let mut parser = Parser::new(ParseOptions {
        ignore_newlines: true,
        prune_newlines: false,
    });
    let parsed = n
        .program()
        .parse(&mut parser, "production_rule_set", tokens)
        .unwrap();
    assert!(parsed.is_complete());
    // The rule set holds one rule, so its node collapses into that rule.
    assert_eq!(
        parser.printer(n.program(), n.interner()).render(parsed.root),
        "[production_rule] {\n  [identifier] \"a\"\n  [production_rule] \"->\"\n  [epsilon] \"epsilon\"\n}"
    );
}

#[test]
fn missing_rule_is_no_match() {
    let err = notation().parse("-> epsilon").unwrap_err();
    assert_eq!(err, FrontError::NoMatch { line: 1, col: 1 });
}

#[test]
fn empty_source_is_no_match_at_origin() {
    let err = notation().parse("// nothing here\n").unwrap_err();
    assert_eq!(err, FrontError::NoMatch { line: 1, col: 1 });
}

#[test]
fn missing_separator_leaves_trailing_tokens() {
    let err = notation().parse("a -> epsilon\nb -> epsilon").unwrap_err();
    assert_eq!(
        err,
        FrontError::TrailingTokens {
            line: 2,
            col: 1,
            text: "b".into(),
        }
    );
}

#[test]
fn scan_errors_pass_through() {
    let err = notation().parse("a -> epsilon # b").unwrap_err();
    assert!(matches!(err, FrontError::Scan(_)));
}
