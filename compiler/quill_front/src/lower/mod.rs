//! Notation tree to `Grammar`.
//!
//! Anonymous single-child nodes collapse during parsing, so a list holding
//! one expression may show up as the expression itself, and a rule set
//! holding one rule as that rule. Lowering keys on each node's rule rather
//! than on a fixed tree shape wherever that can happen.

use quill_grammar::{Grammar, Production};
use quill_parse::NodeRef;
use quill_stack::ensure_sufficient_stack;
use tracing::trace;

use crate::{FrontError, Notation, NotationRule};

pub(crate) struct Lowering<'n> {
    notation: &'n Notation,
    grammar: Grammar,
}

impl<'n> Lowering<'n> {
    pub(crate) fn new(notation: &'n Notation) -> Self {
        Lowering {
            notation,
            grammar: Grammar::new(),
        }
    }

    /// Lower a `production_rule_set` tree, adding rules in source order.
    pub(crate) fn rule_set(mut self, root: NodeRef<'_>) -> Result<Grammar, FrontError> {
        let mut pending = vec![root];
        while let Some(node) = pending.pop() {
            match self.kind(node) {
                Some(NotationRule::ProductionRule) => self.production_rule(node)?,
                Some(NotationRule::RuleSet | NotationRule::RuleSetTail) | None
                    if !node.is_leaf() =>
                {
                    pending.extend(node.children().collect::<Vec<_>>().into_iter().rev());
                }
                // `;` separators
                _ if node.is_leaf() => {}
                _ => return Err(self.malformed("rule list", node)),
            }
        }
        Ok(self.grammar)
    }

    /// `identifier -> expression`
    fn production_rule(&mut self, node: NodeRef<'_>) -> Result<(), FrontError> {
        let (Some(name), Some(expr)) = (node.child(0), node.child(2)) else {
            return Err(self.malformed("rule", node));
        };
        let name = self.text(name);
        trace!(rule = name, "lowering rule");
        let production = self.expression(name, expr)?;
        self.grammar.add_rule(name, production)?;
        Ok(())
    }

    fn expression(&mut self, owner: &str, node: NodeRef<'_>) -> Result<Production, FrontError> {
        ensure_sufficient_stack(|| self.expression_inner(owner, node))
    }

    fn expression_inner(
        &mut self,
        owner: &str,
        node: NodeRef<'_>,
    ) -> Result<Production, FrontError> {
        let Some(kind) = self.kind(node) else {
            return Err(self.malformed("production", node));
        };
        match kind {
            NotationRule::Epsilon => Ok(Production::Epsilon),
            NotationRule::TokenRef => self
                .reference(node)
                .map(Production::token)
                .ok_or_else(|| self.malformed("token reference", node)),
            NotationRule::RuleRef => self
                .reference(node)
                .map(Production::rule)
                .ok_or_else(|| self.malformed("rule reference", node)),
            NotationRule::And | NotationRule::Or => {
                let Some(list) = node.child(2) else {
                    return Err(self.malformed("production list", node));
                };
                let mut items = Vec::new();
                self.list(owner, list, &mut items)?;
                Ok(if kind == NotationRule::And {
                    Production::and(items)
                } else {
                    Production::or(items)
                })
            }
            NotationRule::Optional => {
                let Some(inner) = node.child(2) else {
                    return Err(self.malformed("optional", node));
                };
                Ok(Production::optional(self.expression(owner, inner)?))
            }
            NotationRule::Sequence => self.sequence(owner, node),
            NotationRule::RuleSet
            | NotationRule::RuleSetTail
            | NotationRule::ProductionRule
            | NotationRule::Expression
            | NotationRule::ListTail
            | NotationRule::List
            | NotationRule::Identifier => Err(self.malformed("production", node)),
        }
    }

    /// Flatten `list`/`list1` nodes into their expressions, dropping commas.
    fn list(
        &mut self,
        owner: &str,
        node: NodeRef<'_>,
        out: &mut Vec<Production>,
    ) -> Result<(), FrontError> {
        let mut pending = vec![node];
        while let Some(node) = pending.pop() {
            match self.kind(node) {
                Some(NotationRule::List | NotationRule::ListTail) if !node.is_leaf() => {
                    pending.extend(node.children().collect::<Vec<_>>().into_iter().rev());
                }
                Some(NotationRule::List | NotationRule::ListTail) => {}
                _ => out.push(self.expression(owner, node)?),
            }
        }
        Ok(())
    }

    /// `sequence(item)` or `sequence(delim, item)`, expanded through a
    /// helper rule named after `owner`.
    fn sequence(&mut self, owner: &str, node: NodeRef<'_>) -> Result<Production, FrontError> {
        let (delim, item) = match node.len() {
            4 => (None, node.child(2)),
            5 => (
                node.child(2),
                node.child(3).and_then(|tail| tail.child(1)),
            ),
            _ => (None, None),
        };
        let Some(item) = item else {
            return Err(self.malformed("sequence", node));
        };
        let delim = delim.map(|d| self.expression(owner, d)).transpose()?;
        let item = self.expression(owner, item)?;
        Ok(self.grammar.add_sequence(owner, delim, item)?)
    }

    /// Name after `token:` or `rule:`.
    fn reference(&self, node: NodeRef<'_>) -> Option<&'n str> {
        node.child(2).filter(|name| name.is_leaf()).map(|name| self.text(name))
    }

    fn kind(&self, node: NodeRef<'_>) -> Option<NotationRule> {
        node.rule().and_then(|rule| self.notation.rule_of(rule))
    }

    fn text(&self, node: NodeRef<'_>) -> &'n str {
        node.token()
            .map_or("", |token| self.notation.interner().lookup(token.text))
    }

    fn malformed(&self, what: &'static str, node: NodeRef<'_>) -> FrontError {
        let (line, col) = first_token(node).unwrap_or((1, 1));
        FrontError::Malformed { what, line, col }
    }
}

/// Position of the leftmost token under `node`.
fn first_token(node: NodeRef<'_>) -> Option<(u32, u32)> {
    let mut node = node;
    loop {
        if let Some(token) = node.token() {
            return Some((token.line, token.col));
        }
        node = node.child(0)?;
    }
}

#[cfg(test)]
mod tests;
