//! Linked plans, run directly against the parser runtime.

use quill_ir::{RuleId, Token};
use quill_parse::{Outcome, Parsed, Parser, RuleNames};
use quill_stack::ensure_sufficient_stack;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::{Body, Callee, FnId, FnRole, LinkError, Plan};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Target {
    Fn(FnId),
    Epsilon,
}

#[derive(Clone, Debug)]
enum Exec {
    Token(quill_ir::TokenKind),
    And(Vec<(Target, bool)>),
    Or(Vec<Target>),
    Call(Target),
    Epsilon,
}

#[derive(Clone, Debug)]
struct Linked {
    owner: RuleId,
    stamps: bool,
    exec: Exec,
}

/// A plan with every rule reference resolved.
///
/// Behaves exactly like the emitted source for the same plan: the same
/// helper structure, the same stamping, the same rollback.
#[derive(Clone, Debug)]
pub struct Program {
    functions: Vec<Linked>,
    entries: Vec<FnId>,
    names: Vec<String>,
    index: FxHashMap<String, RuleId>,
}

impl Program {
    /// Resolve rule references; the first undefined one is an error.
    pub fn link(plan: &Plan) -> Result<Program, LinkError> {
        let entry_of: FxHashMap<&str, FnId> = plan
            .rules()
            .iter()
            .map(|r| (r.name.as_str(), r.function))
            .collect();

        let mut functions = Vec::with_capacity(plan.functions().len());
        for function in plan.functions() {
            let resolve = |callee: &Callee| match callee {
                Callee::Fn(id) => Ok(Target::Fn(*id)),
                Callee::Epsilon => Ok(Target::Epsilon),
                Callee::Rule(name) => entry_of
                    .get(name.as_str())
                    .map(|&id| Target::Fn(id))
                    .ok_or_else(|| LinkError::UnresolvedRule {
                        rule: plan.owner_name(function).to_owned(),
                        reference: name.clone(),
                    }),
            };
            let exec = match &function.body {
                Body::Token { kind, .. } => Exec::Token(*kind),
                Body::Epsilon => Exec::Epsilon,
                Body::Call(callee) => Exec::Call(resolve(callee)?),
                Body::Or(callees) => Exec::Or(callees.iter().map(resolve).collect::<Result<_, _>>()?),
                Body::And(steps) => Exec::And(
                    steps
                        .iter()
                        .map(|step| resolve(&step.callee).map(|t| (t, step.optional)))
                        .collect::<Result<_, _>>()?,
                ),
            };
            functions.push(Linked {
                owner: function.owner,
                stamps: matches!(function.role, FnRole::Rule(_)),
                exec,
            });
        }

        let names: Vec<String> = plan.rules().iter().map(|r| r.name.clone()).collect();
        let index = plan.rules().iter().map(|r| (r.name.clone(), r.id)).collect();
        debug!(rules = names.len(), functions = functions.len(), "linked program");
        Ok(Program {
            functions,
            entries: plan.rules().iter().map(|r| r.function).collect(),
            names,
            index,
        })
    }

    pub fn rule_id(&self, name: &str) -> Option<RuleId> {
        self.index.get(name).copied()
    }

    /// Rule names in id order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Run rule `rule` at the parser's current position.
    ///
    /// # Panics
    /// Panics if `rule` does not belong to this program.
    pub fn run(&self, parser: &mut Parser, rule: RuleId) -> Outcome {
        self.exec(parser, self.entries[rule.index()])
    }

    /// Parse `tokens` from the rule named `root`.
    pub fn parse(
        &self,
        parser: &mut Parser,
        root: &str,
        tokens: impl IntoIterator<Item = Token>,
    ) -> Result<Parsed, LinkError> {
        let rule = self.rule_id(root).ok_or_else(|| LinkError::UnknownRoot {
            name: root.to_owned(),
        })?;
        Ok(parser.parse(tokens, |p| self.run(p, rule)))
    }

    fn call(&self, p: &mut Parser, target: Target) -> Outcome {
        match target {
            Target::Fn(id) => self.exec(p, id),
            Target::Epsilon => Outcome::Epsilon,
        }
    }

    fn exec(&self, p: &mut Parser, id: FnId) -> Outcome {
        ensure_sufficient_stack(|| {
            let function = &self.functions[id.index()];
            let outcome = self.body(p, function);
            if function.stamps {
                p.stamp(outcome, function.owner)
            } else {
                outcome
            }
        })
    }

    fn body(&self, p: &mut Parser, function: &Linked) -> Outcome {
        match &function.exec {
            Exec::Token(kind) => p.expect(*kind, function.owner),
            Exec::Epsilon => Outcome::Epsilon,
            Exec::Call(target) => self.call(p, *target),
            Exec::Or(targets) => {
                for &target in targets {
                    match self.call(p, target) {
                        Outcome::Unmatched => {}
                        matched => return matched,
                    }
                }
                Outcome::Unmatched
            }
            Exec::And(steps) => {
                let node = p.begin();
                for &(target, optional) in steps {
                    let child = self.call(p, target);
                    if !p.attach(&node, child) && !optional {
                        p.release(node);
                        return Outcome::Unmatched;
                    }
                }
                p.finish_and(node)
            }
        }
    }
}

impl RuleNames for Program {
    fn rule_name(&self, rule: RuleId) -> Option<&str> {
        self.names.get(rule.index()).map(String::as_str)
    }
}
