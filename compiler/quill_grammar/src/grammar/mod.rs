//! Rule tables.

use std::fmt;

use quill_ir::RuleId;
use quill_stack::ensure_sufficient_stack;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::{GrammarError, Production, ProductionKind};

/// A named rule and its production.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleDef {
    pub name: String,
    pub production: Production,
}

/// Ordered table of named rules.
///
/// A rule's [`RuleId`] is its declaration index. References between rules
/// are by name and may point forward; [`Grammar::check_references`] reports
/// names that never got defined.
#[derive(Clone, Debug, Default)]
pub struct Grammar {
    rules: Vec<RuleDef>,
    index: FxHashMap<String, RuleId>,
}

impl Grammar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rule after checking its name and the shape of its production.
    pub fn add_rule(
        &mut self,
        name: impl Into<String>,
        production: Production,
    ) -> Result<RuleId, GrammarError> {
        let name = name.into();
        if !is_rule_name(&name) {
            return Err(GrammarError::InvalidRuleName { name });
        }
        if self.index.contains_key(&name) {
            return Err(GrammarError::DuplicateRule { name });
        }
        check_shape(&name, &production, false)?;

        let Some(id) = RuleId::from_index(self.rules.len()) else {
            return Err(GrammarError::InvalidRuleName { name });
        };
        debug!(rule = %name, id = id.raw(), "add rule");
        self.index.insert(name.clone(), id);
        self.rules.push(RuleDef { name, production });
        Ok(id)
    }

    /// Desugar a repetition of `item` (optionally separated by `delim`)
    /// owned by rule `owner`.
    ///
    /// Adds the helper rule `<owner>N`, with `N` the first number from 1
    /// that is not already a rule name:
    ///
    /// ```text
    /// <owner>N -> or(and([delim,] item, rule:<owner>N), epsilon)
    /// ```
    ///
    /// and returns `and(item, rule:<owner>N)` for use in place of the
    /// sequence. One or more items are matched.
    pub fn add_sequence(
        &mut self,
        owner: &str,
        delim: Option<Production>,
        item: Production,
    ) -> Result<Production, GrammarError> {
        let helper = (1u32..)
            .map(|n| format!("{owner}{n}"))
            .find(|name| !self.index.contains_key(name))
            .unwrap_or_else(|| format!("{owner}_seq"));

        let mut repeat = Vec::with_capacity(3);
        repeat.extend(delim);
        repeat.push(item.clone());
        repeat.push(Production::rule(helper.clone()));
        let body = Production::or([Production::And(repeat), Production::Epsilon]);

        debug!(owner, helper = %helper, "add sequence helper");
        self.add_rule(helper.clone(), body)?;
        Ok(Production::and([item, Production::rule(helper)]))
    }

    pub fn get(&self, name: &str) -> Option<&Production> {
        self.id(name).map(|id| &self.rules[id.index()].production)
    }

    pub fn id(&self, name: &str) -> Option<RuleId> {
        self.index.get(name).copied()
    }

    pub fn rule(&self, id: RuleId) -> Option<&RuleDef> {
        self.rules.get(id.index())
    }

    /// Rules in declaration order, with their ids.
    pub fn rules(&self) -> impl Iterator<Item = (RuleId, &RuleDef)> {
        self.rules
            .iter()
            .enumerate()
            .filter_map(|(i, def)| RuleId::from_index(i).map(|id| (id, def)))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|def| def.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// `(rule, reference)` for every rule reference with no definition, in
    /// declaration order.
    pub fn unresolved_references(&self) -> Vec<(&str, &str)> {
        self.rules
            .iter()
            .flat_map(|def| {
                def.production
                    .rule_refs()
                    .into_iter()
                    .filter(|name| !self.index.contains_key(*name))
                    .map(move |name| (def.name.as_str(), name))
            })
            .collect()
    }

    /// Fail on the first rule reference with no definition.
    pub fn check_references(&self) -> Result<(), GrammarError> {
        match self.unresolved_references().first() {
            Some(&(rule, reference)) => Err(GrammarError::UnresolvedRule {
                rule: rule.to_owned(),
                reference: reference.to_owned(),
            }),
            None => Ok(()),
        }
    }

    /// One `name -> production` line per rule.
    pub fn listing(&self) -> Listing<'_> {
        Listing(self)
    }
}

/// Display adapter for [`Grammar::listing`].
pub struct Listing<'g>(&'g Grammar);

impl fmt::Display for Listing<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for def in &self.0.rules {
            writeln!(f, "{} -> {}", def.name, def.production)?;
        }
        Ok(())
    }
}

/// An identifier (`[A-Za-z_][A-Za-z0-9_]*`) without `__`.
fn is_rule_name(name: &str) -> bool {
    let mut bytes = name.bytes();
    let starts_well = bytes
        .next()
        .is_some_and(|b| b.is_ascii_alphabetic() || b == b'_');
    starts_well
        && bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_')
        && !name.contains("__")
}

fn check_shape(rule: &str, production: &Production, in_and: bool) -> Result<(), GrammarError> {
    ensure_sufficient_stack(|| match production {
        Production::Epsilon | Production::Token(_) | Production::Rule(_) => Ok(()),
        Production::And(children) | Production::Or(children) if children.is_empty() => {
            Err(GrammarError::EmptyArity {
                rule: rule.to_owned(),
                kind: production.kind(),
            })
        }
        Production::And(children) => children
            .iter()
            .try_for_each(|child| check_shape(rule, child, true)),
        Production::Or(children) => children
            .iter()
            .try_for_each(|child| check_shape(rule, child, false)),
        Production::Optional(inner) => {
            if !in_and || inner.kind() == ProductionKind::Optional {
                return Err(GrammarError::MisplacedOptional {
                    rule: rule.to_owned(),
                });
            }
            check_shape(rule, inner, false)
        }
    })
}

#[cfg(test)]
mod tests;
