use pretty_assertions::assert_eq;
use quill_grammar::{Grammar, GrammarError, Production};

use crate::{FrontError, Notation};

fn parse(source: &str) -> Result<Grammar, FrontError> {
    Notation::new().unwrap().parse(source)
}

fn listing(source: &str) -> String {
    parse(source).unwrap().listing().to_string()
}

fn tok(name: &str) -> Production {
    Production::token(name)
}

fn rule(name: &str) -> Production {
    Production::rule(name)
}

#[test]
fn rules_in_source_order() {
    assert_eq!(
        listing("a -> and(token:X, rule:b); b -> epsilon"),
        "a -> X AND <b>\nb -> E\n"
    );
}

#[test]
fn trailing_separator_is_accepted() {
    assert_eq!(listing("a -> token:X;\nb -> token:Y;\n"), "a -> X\nb -> Y\n");
}

#[test]
fn single_item_lists_keep_their_operator() {
    let g = parse("a -> or(rule:b); b -> and(epsilon)").unwrap();
    assert_eq!(g.get("a"), Some(&Production::or([rule("b")])));
    assert_eq!(g.get("b"), Some(&Production::and([Production::Epsilon])));
}

#[test]
fn epsilon_inside_a_list() {
    let g = parse("a -> or(token:X, epsilon)").unwrap();
    assert_eq!(g.get("a"), Some(&Production::or([tok("X"), Production::Epsilon])));
}

#[test]
fn nested_productions() {
    let g = parse("a -> and(token:X, optional(rule:b), or(token:Y, token:Z), rule:c)").unwrap();
    assert_eq!(
        g.get("a"),
        Some(&Production::and([
            tok("X"),
            Production::optional(rule("b")),
            Production::or([tok("Y"), tok("Z")]),
            rule("c"),
        ]))
    );
}

#[test]
fn delimited_sequence_adds_helper_first() {
    assert_eq!(
        listing("args -> sequence(token:SYMBOL_COMMA, rule:word)"),
        "args1 -> (SYMBOL_COMMA AND <word> AND <args1>) OR E\nargs -> <word> AND <args1>\n"
    );
}

#[test]
fn bare_sequence() {
    assert_eq!(
        listing("s -> sequence(token:X)"),
        "s1 -> (X AND <s1>) OR E\ns -> X AND <s1>\n"
    );
}

#[test]
fn sequences_nest_inside_productions() {
    assert_eq!(
        listing("a -> and(token:X, sequence(token:Y), sequence(token:Z))"),
        "a1 -> (Y AND <a1>) OR E\n\
         a2 -> (Z AND <a2>) OR E\n\
         a -> X AND (Y AND <a1>) AND (Z AND <a2>)\n"
    );
}

#[test]
fn keywords_work_as_names() {
    assert_eq!(
        listing("or -> rule:and; and -> token:KEYWORD_AND; sequence -> rule:or"),
        "or -> <and>\nand -> KEYWORD_AND\nsequence -> <or>\n"
    );
}

#[test]
fn comments_are_ignored() {
    assert_eq!(
        listing("// leading\na -> /* inline */ token:X; // trailing\n"),
        "a -> X\n"
    );
}

#[test]
fn duplicate_rules_are_rejected() {
    assert_eq!(
        parse("a -> epsilon; a -> token:X").unwrap_err(),
        FrontError::Grammar(GrammarError::DuplicateRule { name: "a".into() })
    );
}

#[test]
fn optional_outside_and_is_rejected() {
    assert_eq!(
        parse("a -> optional(token:X)").unwrap_err(),
        FrontError::Grammar(GrammarError::MisplacedOptional { rule: "a".into() })
    );
}

#[test]
fn helper_names_cannot_be_redefined() {
    assert_eq!(
        parse("s -> sequence(token:X); s1 -> epsilon").unwrap_err(),
        FrontError::Grammar(GrammarError::DuplicateRule { name: "s1".into() })
    );
}

#[test]
fn double_underscore_names_are_rejected() {
    assert!(matches!(
        parse("a__b -> epsilon").unwrap_err(),
        FrontError::Grammar(GrammarError::InvalidRuleName { .. })
    ));
}
