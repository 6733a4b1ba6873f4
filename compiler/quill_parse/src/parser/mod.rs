//! The parser state shared by all matching functions.

use quill_ir::{RuleId, Token, TokenKind};
use quill_stack::ensure_sufficient_stack;
use tracing::{debug, trace};

use crate::{Node, NodeArena, NodeId, Outcome, Pending, Root, TokenCursor};

/// Parser configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Drop newline tokens as they are fed, before any rule sees them.
    pub ignore_newlines: bool,
    /// Strip newline leaves from the finished tree.
    pub prune_newlines: bool,
}

/// Result of [`Parser::parse`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Parsed {
    pub root: Root,
    /// Tokens the root rule left unconsumed.
    pub remainder: Vec<Token>,
}

impl Parsed {
    /// Matched, and every token consumed.
    pub fn is_complete(&self) -> bool {
        self.root.is_matched() && self.remainder.is_empty()
    }
}

/// Node arena plus token cursor.
///
/// Each parser owns its own state; nothing is shared between instances.
#[derive(Debug, Default)]
pub struct Parser {
    arena: NodeArena,
    cursor: TokenCursor,
    options: ParseOptions,
}

impl Parser {
    pub fn new(options: ParseOptions) -> Self {
        Parser {
            arena: NodeArena::new(),
            cursor: TokenCursor::new(),
            options,
        }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    pub fn cursor(&self) -> &TokenCursor {
        &self.cursor
    }

    /// Append tokens to the cursor, dropping newlines if so configured.
    pub fn feed(&mut self, tokens: impl IntoIterator<Item = Token>) {
        let ignore = self.options.ignore_newlines;
        self.cursor
            .extend(tokens.into_iter().filter(|t| !(ignore && t.is_newline())));
    }

    /// Parse the fed tokens with `root`, starting from an empty arena.
    pub fn parse(
        &mut self,
        tokens: impl IntoIterator<Item = Token>,
        root: impl FnOnce(&mut Parser) -> Outcome,
    ) -> Parsed {
        self.arena.clear();
        self.cursor.clear();
        self.feed(tokens);
        let fed = self.cursor.len();

        let mut root = Root::from(ensure_sufficient_stack(|| root(self)));
        if self.options.prune_newlines {
            root = self.prune_newlines(root);
        }
        let remainder = self.cursor.drain();
        debug!(
            fed,
            unconsumed = remainder.len(),
            nodes = self.arena.live(),
            matched = root.is_matched(),
            "parse finished"
        );
        Parsed { root, remainder }
    }

    /// The front token, if any. Never consumes.
    #[inline]
    pub fn next(&self) -> Option<&Token> {
        self.cursor.peek()
    }

    /// Consume the front token as a leaf owned by `rule`.
    pub fn match_token(&mut self, rule: RuleId) -> Outcome {
        let Some(token) = self.cursor.pop() else {
            return Outcome::Unmatched;
        };
        trace!(kind = ?token.kind, line = token.line, col = token.col, ?rule, "match");
        let id = self.arena.alloc(Node::leaf(token, rule));
        Outcome::Matched(Pending::new(id))
    }

    /// Consume the front token if it has `kind`; otherwise leave the cursor
    /// untouched.
    pub fn expect(&mut self, kind: TokenKind, rule: RuleId) -> Outcome {
        match self.next() {
            Some(token) if token.kind == kind => self.match_token(rule),
            _ => Outcome::Unmatched,
        }
    }

    /// Start an anonymous interior node.
    pub fn begin(&mut self) -> Pending {
        Pending::new(self.arena.alloc(Node::default()))
    }

    /// Append `child` to `parent`. Epsilon contributes nothing; returns
    /// `false` only for `Unmatched`.
    pub fn attach(&mut self, parent: &Pending, child: Outcome) -> bool {
        match child {
            Outcome::Unmatched => false,
            Outcome::Epsilon => true,
            Outcome::Matched(child) => {
                let child = child.into_id();
                self.arena.get_mut(parent.id()).children.push(child);
                true
            }
        }
    }

    /// Free `node` and its subtree, returning every token it holds to the
    /// front of the cursor in its original order.
    pub fn release(&mut self, node: Pending) {
        let id = node.into_id();
        trace!(?id, "release");
        self.release_node(id);
    }

    fn release_node(&mut self, id: NodeId) {
        ensure_sufficient_stack(|| {
            let node = self.arena.free(id);
            for &child in node.children.iter().rev() {
                self.release_node(child);
            }
            if let Some(token) = node.token {
                self.cursor.push_front(token);
            }
        });
    }

    /// Complete an `and` node.
    ///
    /// A node with no children matched nothing but epsilons and optional
    /// misses, and is rejected. An anonymous node whose only child is itself
    /// an interior node collapses into that child.
    pub fn finish_and(&mut self, node: Pending) -> Outcome {
        let n = self.arena.get(node.id());
        if n.children.is_empty() {
            self.release(node);
            return Outcome::Unmatched;
        }
        let anonymous = n.rule.is_none() && n.token.is_none();
        if let [only] = *n.children.as_slice() {
            if anonymous && !self.arena.get(only).is_leaf() {
                self.arena.free(node.into_id());
                return Outcome::Matched(Pending::new(only));
            }
        }
        Outcome::Matched(node)
    }

    /// Give an anonymous match the identity of `rule`. Nodes that already
    /// carry an identity keep it, so the outermost rule wins only over
    /// helper nodes.
    pub fn stamp(&mut self, outcome: Outcome, rule: RuleId) -> Outcome {
        if let Outcome::Matched(pending) = &outcome {
            let node = self.arena.get_mut(pending.id());
            if node.rule.is_none() {
                node.rule = Some(rule);
            }
        }
        outcome
    }

    /// Remove newline leaves from the tree under `root`. Interior nodes left
    /// without children go too; a root that ends up empty becomes epsilon.
    pub fn prune_newlines(&mut self, root: Root) -> Root {
        let Root::Node(id) = root else {
            return root;
        };
        if self.prune_newlines_under(id) {
            self.arena.free(id);
            return Root::Epsilon;
        }
        root
    }

    /// Prune below `id`; `true` when `id` itself should be dropped.
    fn prune_newlines_under(&mut self, id: NodeId) -> bool {
        if self.is_newline_leaf(id) {
            return true;
        }
        let children = std::mem::take(&mut self.arena.get_mut(id).children);
        if children.is_empty() {
            return false;
        }
        ensure_sufficient_stack(|| {
            let mut kept = smallvec::SmallVec::with_capacity(children.len());
            for child in children {
                if self.prune_newlines_under(child) {
                    self.arena.free(child);
                } else {
                    kept.push(child);
                }
            }
            let emptied = kept.is_empty();
            self.arena.get_mut(id).children = kept;
            emptied
        })
    }

    fn is_newline_leaf(&self, id: NodeId) -> bool {
        self.arena.get(id).token.is_some_and(|t| t.is_newline())
    }
}
