//! Matching-function plans.
//!
//! A [`Plan`] is the grammar compiler's output before any text is written:
//! one [`MatchFn`] per named rule plus one per non-trivial sub-production,
//! listed bottom-up so every helper precedes the function that calls it.
//!
//! Helper names are `<owner>__<suffix><index>`, where `owner` is the rule
//! name (for children of the rule's own production) or the enclosing
//! helper's name, `suffix` is `token`, `and`, `or` or `opt`, and `index` is
//! the child's position. Rule names cannot contain `__`, so helper names
//! never collide with each other or with `rule_<name>`.

use quill_grammar::{Grammar, Production};
use quill_ir::{RuleId, TokenKind, TokenTable};
use quill_stack::ensure_sufficient_stack;
use tracing::debug;

use crate::CompileError;

/// Index of a function in [`Plan::functions`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct FnId(u32);

impl FnId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// What a call site invokes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Callee {
    /// A helper synthesized for a sub-production.
    Fn(FnId),
    /// A named rule, resolved at link time.
    Rule(String),
    /// Always matches, consumes nothing.
    Epsilon,
}

/// One child of an `and` body.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    pub callee: Callee,
    /// An optional child that misses is skipped instead of failing the `and`.
    pub optional: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Body {
    Token { kind: TokenKind, name: String },
    And(Vec<Step>),
    Or(Vec<Callee>),
    Call(Callee),
    Epsilon,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FnRole {
    /// Entry point of a named rule; stamps its identity on anonymous matches.
    Rule(RuleId),
    Helper,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchFn {
    pub name: String,
    /// The named rule this function belongs to. Token leaves it matches
    /// carry this identity.
    pub owner: RuleId,
    pub role: FnRole,
    pub body: Body,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlannedRule {
    pub id: RuleId,
    pub name: String,
    /// `name -> production` listing line, without the newline.
    pub listing: String,
    pub function: FnId,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Plan {
    rules: Vec<PlannedRule>,
    functions: Vec<MatchFn>,
}

impl Plan {
    /// Compile every rule of `grammar`, resolving token names in `tokens`.
    pub fn compile(grammar: &Grammar, tokens: &TokenTable) -> Result<Plan, CompileError> {
        let mut plan = Plan::default();
        for (id, def) in grammar.rules() {
            let before = plan.functions.len();
            let mut builder = Builder {
                plan: &mut plan,
                tokens,
                rule: &def.name,
                owner: id,
            };
            let body = builder.body(&def.name, &def.production)?;
            let function = builder.push(rule_fn_name(&def.name), FnRole::Rule(id), body);
            debug!(
                rule = %def.name,
                helpers = plan.functions.len() - before - 1,
                "compiled rule"
            );
            plan.rules.push(PlannedRule {
                id,
                name: def.name.clone(),
                listing: format!("{} -> {}", def.name, def.production),
                function,
            });
        }
        Ok(plan)
    }

    pub fn rules(&self) -> &[PlannedRule] {
        &self.rules
    }

    /// All functions, helpers before their callers.
    pub fn functions(&self) -> &[MatchFn] {
        &self.functions
    }

    pub fn function(&self, id: FnId) -> &MatchFn {
        &self.functions[id.index()]
    }

    pub fn rule(&self, name: &str) -> Option<&PlannedRule> {
        self.rules.iter().find(|r| r.name == name)
    }

    /// Name of the rule that owns `function`.
    pub fn owner_name(&self, function: &MatchFn) -> &str {
        &self.rules[function.owner.index()].name
    }

    /// Look a function up by its emitted name.
    pub fn find(&self, name: &str) -> Option<&MatchFn> {
        self.functions.iter().find(|f| f.name == name)
    }
}

/// Name of the entry function of rule `rule`.
pub(crate) fn rule_fn_name(rule: &str) -> String {
    format!("rule_{rule}")
}

fn suffix(production: &Production) -> &'static str {
    match production {
        Production::Token(_) => "token",
        Production::And(_) => "and",
        Production::Or(_) => "or",
        Production::Optional(_) => "opt",
        Production::Epsilon | Production::Rule(_) => "",
    }
}

struct Builder<'a> {
    plan: &'a mut Plan,
    tokens: &'a TokenTable,
    rule: &'a str,
    owner: RuleId,
}

impl Builder<'_> {
    fn push(&mut self, name: String, role: FnRole, body: Body) -> FnId {
        let Ok(raw) = u32::try_from(self.plan.functions.len()) else {
            panic!("more than {} matching functions", u32::MAX);
        };
        self.plan.functions.push(MatchFn {
            name,
            owner: self.owner,
            role,
            body,
        });
        FnId(raw)
    }

    /// Body of a function for `production`; helpers for its children are
    /// named under `prefix`.
    fn body(&mut self, prefix: &str, production: &Production) -> Result<Body, CompileError> {
        ensure_sufficient_stack(|| match production {
            Production::Epsilon => Ok(Body::Epsilon),
            Production::Token(name) => Ok(Body::Token {
                kind: self.token(name)?,
                name: name.clone(),
            }),
            Production::Rule(name) => Ok(Body::Call(Callee::Rule(name.clone()))),
            Production::And(children) => {
                let mut steps = Vec::with_capacity(children.len());
                for (index, child) in children.iter().enumerate() {
                    steps.push(Step {
                        optional: matches!(child, Production::Optional(_)),
                        callee: self.child(prefix, index, child)?,
                    });
                }
                Ok(Body::And(steps))
            }
            Production::Or(children) => {
                let mut callees = Vec::with_capacity(children.len());
                for (index, child) in children.iter().enumerate() {
                    callees.push(self.child(prefix, index, child)?);
                }
                Ok(Body::Or(callees))
            }
            Production::Optional(inner) => self.body(prefix, inner),
        })
    }

    fn child(
        &mut self,
        prefix: &str,
        index: usize,
        child: &Production,
    ) -> Result<Callee, CompileError> {
        match child {
            Production::Epsilon => Ok(Callee::Epsilon),
            Production::Rule(name) => Ok(Callee::Rule(name.clone())),
            Production::Optional(inner) if inner.is_trivial() => self.child(prefix, index, inner),
            _ => {
                let name = format!("{prefix}__{}{index}", suffix(child));
                let body = self.body(&name, child)?;
                Ok(Callee::Fn(self.push(name, FnRole::Helper, body)))
            }
        }
    }

    fn token(&self, name: &str) -> Result<TokenKind, CompileError> {
        self.tokens
            .lookup(name)
            .ok_or_else(|| CompileError::UnresolvedToken {
                rule: self.rule.to_owned(),
                token: name.to_owned(),
            })
    }
}
