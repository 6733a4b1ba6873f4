//! Rust source emission for a plan.
//!
//! Two files come out of a plan:
//!
//! - the interface: one `RuleId` constant per rule, each under a comment
//!   with the rule's listing, plus `RULE_NAMES` and the `RuleFn` type;
//! - the implementation: every matching function, helpers first, and an
//!   `ENTRY_POINTS` table mapping rule names to their functions.
//!
//! Rule references become plain calls to `rule_<name>`, so a reference to an
//! undefined rule is reported by the Rust compiler.

use quill_emit::literal::{identifier, string_literal};
use quill_emit::{EmitOptions, Emitter, GENERATED_HEADER};
use tracing::debug;

use crate::plan::rule_fn_name;
use crate::{Body, Callee, FnRole, MatchFn, Plan};

pub fn emit_interface(plan: &Plan, options: &EmitOptions, out: &mut impl Emitter) {
    out.emit_line(0, GENERATED_HEADER);
    out.emit_line(0, "//! Rule identities for this grammar.");
    out.emit_line(0, "");
    out.emit_line(0, "#![allow(non_upper_case_globals)]");
    out.emit_line(0, "");
    out.emit_line(0, &format!("use {}::RuleId;", options.ir_path));
    out.emit_line(0, &format!("use {}::{{Outcome, Parser}};", options.runtime_path));
    out.emit_line(0, "");
    out.emit_line(0, "/// Signature shared by every rule entry point.");
    out.emit_line(0, "pub type RuleFn = fn(&mut Parser) -> Outcome;");
    out.emit_line(0, "");

    for rule in plan.rules() {
        out.emit_comment(0, &rule.listing);
        out.emit_line(
            0,
            &format!(
                "pub const {}: RuleId = RuleId::from_raw({});",
                identifier(&rule.name),
                rule.id.raw()
            ),
        );
    }
    out.emit_line(0, "");

    out.emit_line(0, "/// Rule names in id order.");
    out.emit_line(0, "pub const RULE_NAMES: &[&str] = &[");
    for rule in plan.rules() {
        out.emit_line(1, &format!("{},", string_literal(&rule.name)));
    }
    out.emit_line(0, "];");
    debug!(rules = plan.rules().len(), "emitted rule interface");
}

pub fn emit_implementation(plan: &Plan, options: &EmitOptions, out: &mut impl Emitter) {
    out.emit_line(0, GENERATED_HEADER);
    out.emit_line(0, "//! Matching functions for this grammar.");
    out.emit_line(0, "");
    out.emit_line(0, "#![allow(non_snake_case, unused_imports, clippy::all)]");
    out.emit_line(0, "");
    out.emit_line(0, &format!("use {}::{{Outcome, Parser}};", options.runtime_path));
    out.emit_line(0, "");
    out.emit_line(0, &format!("use {} as tokens;", options.tokens_path));
    out.emit_line(0, &format!("use {}::{{self as rules, RuleFn}};", options.interface_path));
    out.emit_line(0, "");

    for function in plan.functions() {
        emit_function(plan, function, out);
        out.emit_line(0, "");
    }

    out.emit_line(0, "/// Entry point of every rule, in id order.");
    out.emit_line(0, "pub const ENTRY_POINTS: &[(&str, RuleFn)] = &[");
    for rule in plan.rules() {
        out.emit_line(
            1,
            &format!(
                "({}, {} as RuleFn),",
                string_literal(&rule.name),
                rule_fn_name(&rule.name)
            ),
        );
    }
    out.emit_line(0, "];");
    debug!(functions = plan.functions().len(), "emitted matching functions");
}

fn emit_function(plan: &Plan, function: &MatchFn, out: &mut impl Emitter) {
    let owner = owner_const(plan, function);
    let stamp = match function.role {
        FnRole::Rule(id) => {
            if let Some(rule) = plan.rules().get(id.index()) {
                out.emit_line(0, &format!("/// `{}`", rule.listing));
            }
            out.emit_line(0, &format!("pub fn {}(p: &mut Parser) -> Outcome {{", function.name));
            Some(owner.as_str())
        }
        FnRole::Helper => {
            out.emit_line(0, &format!("fn {}(p: &mut Parser) -> Outcome {{", function.name));
            None
        }
    };
    // Wraps a matched result in the rule's stamp when this is an entry point.
    // `expr` must not borrow `p`.
    let finish = |expr: &str| match stamp {
        Some(id) => format!("p.stamp({expr}, {id})"),
        None => expr.to_owned(),
    };

    match &function.body {
        Body::Epsilon => out.emit_line(1, "Outcome::Epsilon"),
        Body::Token { name, .. } => {
            out.emit_line(1, &format!("p.expect(tokens::{name}, {owner})"));
        }
        Body::Call(callee) => match callee {
            Callee::Fn(_) | Callee::Rule(_) if stamp.is_some() => {
                out.emit_line(1, &format!("let outcome = {};", call(plan, callee)));
                out.emit_line(1, &finish("outcome"));
            }
            _ => out.emit_line(1, &finish(&call(plan, callee))),
        },
        Body::Or(callees) => {
            let mut reaches_epsilon = false;
            for callee in callees {
                if *callee == Callee::Epsilon {
                    reaches_epsilon = true;
                    break;
                }
                out.emit_line(1, &format!("match {} {{", call(plan, callee)));
                out.emit_line(2, "Outcome::Unmatched => {}");
                out.emit_line(2, &format!("matched => return {},", finish("matched")));
                out.emit_line(1, "}");
            }
            if reaches_epsilon {
                out.emit_line(1, "Outcome::Epsilon");
            } else {
                out.emit_line(1, "Outcome::Unmatched");
            }
        }
        Body::And(steps) => {
            out.emit_line(1, "let node = p.begin();");
            for step in steps {
                if step.callee == Callee::Epsilon {
                    continue;
                }
                out.emit_line(1, &format!("let child = {};", call(plan, &step.callee)));
                if step.optional {
                    out.emit_line(1, "p.attach(&node, child);");
                } else {
                    out.emit_line(1, "if !p.attach(&node, child) {");
                    out.emit_line(2, "p.release(node);");
                    out.emit_line(2, "return Outcome::Unmatched;");
                    out.emit_line(1, "}");
                }
            }
            if stamp.is_some() {
                out.emit_line(1, "let outcome = p.finish_and(node);");
                out.emit_line(1, &finish("outcome"));
            } else {
                out.emit_line(1, "p.finish_and(node)");
            }
        }
    }
    out.emit_line(0, "}");
}

/// Path of the owning rule's identity constant.
fn owner_const(plan: &Plan, function: &MatchFn) -> String {
    format!("rules::{}", identifier(plan.owner_name(function)))
}

fn call(plan: &Plan, callee: &Callee) -> String {
    match callee {
        Callee::Fn(id) => format!("{}(p)", plan.function(*id).name),
        Callee::Rule(name) => format!("{}(p)", rule_fn_name(name)),
        Callee::Epsilon => "Outcome::Epsilon".to_owned(),
    }
}

#[cfg(test)]
mod tests;
