//! Read-only views over a finished tree, and tree printing.

use std::fmt::{self, Write};

use quill_ir::{RuleId, StringLookup, Token};
use quill_stack::ensure_sufficient_stack;

use crate::{NodeArena, NodeId, Parser, Root};

/// Maps rule ids to display names.
pub trait RuleNames {
    fn rule_name(&self, rule: RuleId) -> Option<&str>;
}

impl RuleNames for [&str] {
    fn rule_name(&self, rule: RuleId) -> Option<&str> {
        self.get(rule.index()).copied()
    }
}

impl RuleNames for [String] {
    fn rule_name(&self, rule: RuleId) -> Option<&str> {
        self.get(rule.index()).map(String::as_str)
    }
}

impl RuleNames for Vec<String> {
    fn rule_name(&self, rule: RuleId) -> Option<&str> {
        self.as_slice().rule_name(rule)
    }
}

impl<T: RuleNames + ?Sized> RuleNames for &T {
    fn rule_name(&self, rule: RuleId) -> Option<&str> {
        (**self).rule_name(rule)
    }
}

/// A node together with the arena it lives in.
#[derive(Copy, Clone)]
pub struct NodeRef<'a> {
    arena: &'a NodeArena,
    id: NodeId,
}

impl<'a> NodeRef<'a> {
    pub fn new(arena: &'a NodeArena, id: NodeId) -> Self {
        NodeRef { arena, id }
    }

    pub fn id(self) -> NodeId {
        self.id
    }

    pub fn rule(self) -> Option<RuleId> {
        self.arena.get(self.id).rule()
    }

    pub fn token(self) -> Option<&'a Token> {
        self.arena.get(self.id).token()
    }

    pub fn is_leaf(self) -> bool {
        self.arena.get(self.id).is_leaf()
    }

    pub fn len(self) -> usize {
        self.arena.get(self.id).children().len()
    }

    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    pub fn child(self, index: usize) -> Option<NodeRef<'a>> {
        let arena = self.arena;
        arena
            .get(self.id)
            .children()
            .get(index)
            .map(|&id| NodeRef { arena, id })
    }

    pub fn children(self) -> impl Iterator<Item = NodeRef<'a>> + 'a {
        let arena = self.arena;
        arena
            .get(self.id)
            .children()
            .iter()
            .map(move |&id| NodeRef { arena, id })
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("rule", &self.rule())
            .field("token", &self.token())
            .field("children", &self.len())
            .finish()
    }
}

impl Parser {
    /// View a node of the most recent parse.
    pub fn view(&self, id: NodeId) -> NodeRef<'_> {
        NodeRef::new(self.arena(), id)
    }

    pub fn printer<'a, N, S>(&'a self, names: &'a N, strings: &'a S) -> TreePrinter<'a, N, S>
    where
        N: RuleNames + ?Sized,
        S: StringLookup + ?Sized,
    {
        TreePrinter {
            arena: self.arena(),
            names,
            strings,
        }
    }
}

/// Renders trees as text:
///
/// ```text
/// [or1] {
///   [or1] "or"
///   [or] "x"
/// }
/// ```
///
/// Leaves print their quoted text (`\n` for a newline), epsilon prints `E`,
/// a failed parse prints `NO_MATCH`. Each level indents by two spaces.
pub struct TreePrinter<'a, N: ?Sized, S: ?Sized> {
    arena: &'a NodeArena,
    names: &'a N,
    strings: &'a S,
}

impl<N, S> TreePrinter<'_, N, S>
where
    N: RuleNames + ?Sized,
    S: StringLookup + ?Sized,
{
    pub fn render(&self, root: Root) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = self.write(&mut out, root);
        out
    }

    pub fn write(&self, out: &mut impl Write, root: Root) -> fmt::Result {
        match root {
            Root::Unmatched => out.write_str("NO_MATCH"),
            Root::Epsilon => out.write_str("E"),
            Root::Node(id) => self.write_node(out, id, 0),
        }
    }

    fn write_node(&self, out: &mut impl Write, id: NodeId, level: usize) -> fmt::Result {
        ensure_sufficient_stack(|| {
            let node = self.arena.get(id);
            indent(out, level)?;
            if let Some(name) = node.rule().and_then(|r| self.names.rule_name(r)) {
                write!(out, "[{name}] ")?;
            }
            if node.is_leaf() {
                return match node.token() {
                    Some(token) if token.is_newline() => out.write_str("\\n"),
                    Some(token) => write!(out, "\"{}\"", self.strings.lookup(token.text)),
                    None => out.write_str("{\n}"),
                };
            }
            out.write_str("{\n")?;
            for &child in node.children() {
                self.write_node(out, child, level + 1)?;
                out.write_char('\n')?;
            }
            indent(out, level)?;
            out.write_char('}')
        })
    }
}

fn indent(out: &mut impl Write, level: usize) -> fmt::Result {
    for _ in 0..level {
        out.write_str("  ")?;
    }
    Ok(())
}
