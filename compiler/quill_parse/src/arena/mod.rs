//! Syntax-tree node storage.

use std::fmt;

use quill_ir::{RuleId, Token};
use smallvec::SmallVec;

/// Index of a node in a [`NodeArena`].
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
#[repr(transparent)]
pub struct NodeId(u32);

impl NodeId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// A syntax-tree node.
///
/// Leaves wrap the token they consumed; interior nodes own an ordered child
/// list. `rule` is `None` until a named rule stamps the node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Node {
    pub(crate) rule: Option<RuleId>,
    pub(crate) token: Option<Token>,
    pub(crate) children: SmallVec<[NodeId; 4]>,
}

impl Node {
    pub(crate) fn leaf(token: Token, rule: RuleId) -> Self {
        Node {
            rule: Some(rule),
            token: Some(token),
            children: SmallVec::new(),
        }
    }

    pub fn rule(&self) -> Option<RuleId> {
        self.rule
    }

    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Slot storage for nodes with a free list.
///
/// Allocation reuses released slots before growing, so a parse that
/// backtracks a lot does not grow the arena past its peak live size.
#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    slots: Vec<Node>,
    free: Vec<NodeId>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        NodeArena {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    pub fn alloc(&mut self, node: Node) -> NodeId {
        if let Some(id) = self.free.pop() {
            self.slots[id.index()] = node;
            return id;
        }
        let Ok(raw) = u32::try_from(self.slots.len()) else {
            panic!("node arena exhausted: more than {} nodes", u32::MAX);
        };
        self.slots.push(node);
        NodeId(raw)
    }

    /// Take the node out of its slot and put the slot on the free list.
    pub fn free(&mut self, id: NodeId) -> Node {
        let node = std::mem::take(&mut self.slots[id.index()]);
        self.free.push(id);
        node
    }

    /// # Panics
    /// Panics if `id` is out of bounds.
    #[inline]
    #[track_caller]
    pub fn get(&self, id: NodeId) -> &Node {
        &self.slots[id.index()]
    }

    #[inline]
    #[track_caller]
    pub(crate) fn get_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.slots[id.index()]
    }

    /// Nodes currently allocated.
    pub fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Slots ever allocated; the arena's high-water mark.
    pub fn capacity_used(&self) -> usize {
        self.slots.len()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}
