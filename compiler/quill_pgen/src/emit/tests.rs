use super::*;
use pretty_assertions::assert_eq;
use quill_emit::StringEmitter;
use quill_grammar::{Grammar, Production};
use quill_ir::{TokenGroup, TokenTable};

fn plan() -> Plan {
    let mut builder = TokenTable::builder();
    builder
        .declare("KEYWORD_OR", TokenGroup::Keyword, Some("or".into()))
        .unwrap();
    builder
        .declare("SYMBOL_COMMA", TokenGroup::Symbol, Some(",".into()))
        .unwrap();
    let tokens = builder.finish();

    let mut g = Grammar::new();
    g.add_rule(
        "or1",
        Production::or([
            Production::and([Production::token("KEYWORD_OR"), Production::rule("or")]),
            Production::Epsilon,
        ]),
    )
    .unwrap();
    g.add_rule(
        "or",
        Production::and([
            Production::token("TOKEN_WORD"),
            Production::optional(Production::token("SYMBOL_COMMA")),
        ]),
    )
    .unwrap();
    Plan::compile(&g, &tokens).unwrap()
}

fn emitted(emit: impl FnOnce(&Plan, &EmitOptions, &mut StringEmitter)) -> String {
    let mut out = StringEmitter::new();
    emit(&plan(), &EmitOptions::default(), &mut out);
    out.finish()
}

#[test]
fn interface_lists_rules() {
    assert_eq!(
        emitted(|plan, options, out| emit_interface(plan, options, out)),
        "\
// @generated by quill. Do not edit by hand.
//! Rule identities for this grammar.

#![allow(non_upper_case_globals)]

use quill_ir::RuleId;
use quill_parse::{Outcome, Parser};

/// Signature shared by every rule entry point.
pub type RuleFn = fn(&mut Parser) -> Outcome;

// or1 -> (KEYWORD_OR AND <or>) OR E
pub const or1: RuleId = RuleId::from_raw(0);
// or -> TOKEN_WORD AND [SYMBOL_COMMA]
pub const or: RuleId = RuleId::from_raw(1);

/// Rule names in id order.
pub const RULE_NAMES: &[&str] = &[
    \"or1\",
    \"or\",
];
"
    );
}

#[test]
fn implementation_emits_helpers_first() {
    let text = emitted(|plan, options, out| emit_implementation(plan, options, out));
    let expected_functions = "\
fn or1__and0__token0(p: &mut Parser) -> Outcome {
    p.expect(tokens::KEYWORD_OR, rules::or1)
}

fn or1__and0(p: &mut Parser) -> Outcome {
    let node = p.begin();
    let child = or1__and0__token0(p);
    if !p.attach(&node, child) {
        p.release(node);
        return Outcome::Unmatched;
    }
    let child = rule_or(p);
    if !p.attach(&node, child) {
        p.release(node);
        return Outcome::Unmatched;
    }
    p.finish_and(node)
}

/// `or1 -> (KEYWORD_OR AND <or>) OR E`
pub fn rule_or1(p: &mut Parser) -> Outcome {
    match or1__and0(p) {
        Outcome::Unmatched => {}
        matched => return p.stamp(matched, rules::or1),
    }
    Outcome::Epsilon
}

fn or__token0(p: &mut Parser) -> Outcome {
    p.expect(tokens::TOKEN_WORD, rules::or)
}

fn or__opt1(p: &mut Parser) -> Outcome {
    p.expect(tokens::SYMBOL_COMMA, rules::or)
}

/// `or -> TOKEN_WORD AND [SYMBOL_COMMA]`
pub fn rule_or(p: &mut Parser) -> Outcome {
    let node = p.begin();
    let child = or__token0(p);
    if !p.attach(&node, child) {
        p.release(node);
        return Outcome::Unmatched;
    }
    let child = or__opt1(p);
    p.attach(&node, child);
    let outcome = p.finish_and(node);
    p.stamp(outcome, rules::or)
}
";
    assert!(text.contains(expected_functions), "{text}");
    assert!(text.starts_with("// @generated by quill. Do not edit by hand.\n"));
    assert!(text.contains("use crate::tokens as tokens;\nuse crate::rules::{self as rules, RuleFn};\n"));
    assert!(text.ends_with(
        "pub const ENTRY_POINTS: &[(&str, RuleFn)] = &[\n    (\"or1\", rule_or1 as RuleFn),\n    (\"or\", rule_or as RuleFn),\n];\n"
    ));
}

#[test]
fn custom_paths_reach_use_lines() {
    let options = EmitOptions {
        runtime_path: "runtime".into(),
        tokens_path: "super::kinds".into(),
        interface_path: "super::ids".into(),
        ..EmitOptions::default()
    };
    let mut out = StringEmitter::new();
    emit_implementation(&plan(), &options, &mut out);
    let text = out.finish();
    assert!(text.contains("use runtime::{Outcome, Parser};"));
    assert!(text.contains("use super::kinds as tokens;"));
    assert!(text.contains("use super::ids::{self as rules, RuleFn};"));
}

#[test]
fn alias_rule_calls_before_stamping() {
    let mut g = Grammar::new();
    g.add_rule("start", Production::rule("word")).unwrap();
    g.add_rule("word", Production::token("TOKEN_WORD")).unwrap();
    let plan = Plan::compile(&g, &TokenTable::builtin()).unwrap();

    let mut out = StringEmitter::new();
    emit_implementation(&plan, &EmitOptions::default(), &mut out);
    let text = out.finish();
    assert!(
        text.contains(
            "\
/// `start -> <word>`
pub fn rule_start(p: &mut Parser) -> Outcome {
    let outcome = rule_word(p);
    p.stamp(outcome, rules::start)
}
"
        ),
        "{text}"
    );
    assert!(!text.contains("p.stamp(rule_"), "{text}");
}

#[test]
fn epsilon_rule_stamps_nothing_borrowed() {
    let mut g = Grammar::new();
    g.add_rule("nothing", Production::Epsilon).unwrap();
    let plan = Plan::compile(&g, &TokenTable::builtin()).unwrap();

    let mut out = StringEmitter::new();
    emit_implementation(&plan, &EmitOptions::default(), &mut out);
    let text = out.finish();
    assert!(
        text.contains("pub fn rule_nothing(p: &mut Parser) -> Outcome {\n    Outcome::Epsilon\n}\n"),
        "{text}"
    );
}
