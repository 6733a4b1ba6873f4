//! Match outcomes.

use crate::NodeId;

/// Result of one matching function.
///
/// `Unmatched` and `Epsilon` carry nothing and allocate nothing. `Matched`
/// carries a [`Pending`] node that the caller must attach, finish, stamp,
/// or release.
#[must_use]
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    Unmatched,
    Epsilon,
    Matched(Pending),
}

impl Outcome {
    /// `Epsilon` counts as a match.
    pub fn is_matched(&self) -> bool {
        !matches!(self, Outcome::Unmatched)
    }

    pub fn node(&self) -> Option<NodeId> {
        match self {
            Outcome::Matched(pending) => Some(pending.id()),
            Outcome::Unmatched | Outcome::Epsilon => None,
        }
    }
}

/// Ownership of an arena node that is not yet part of a finished tree.
///
/// Not `Clone`. A discarded branch hands its `Pending` to
/// `Parser::release`, the only path by which its tokens return to the
/// cursor.
#[must_use = "a pending node must be attached, finished, or released"]
#[derive(Debug, PartialEq, Eq)]
pub struct Pending(NodeId);

impl Pending {
    pub(crate) fn new(id: NodeId) -> Self {
        Pending(id)
    }

    pub fn id(&self) -> NodeId {
        self.0
    }

    pub(crate) fn into_id(self) -> NodeId {
        self.0
    }
}

/// Final outcome of a parse, detached from the ownership rules of
/// [`Outcome`]. Its node, if any, lives in the parser's arena until the next
/// parse.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Root {
    Unmatched,
    Epsilon,
    Node(NodeId),
}

impl Root {
    pub fn is_matched(self) -> bool {
        !matches!(self, Root::Unmatched)
    }

    pub fn node(self) -> Option<NodeId> {
        match self {
            Root::Node(id) => Some(id),
            Root::Unmatched | Root::Epsilon => None,
        }
    }
}

impl From<Outcome> for Root {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Unmatched => Root::Unmatched,
            Outcome::Epsilon => Root::Epsilon,
            Outcome::Matched(pending) => Root::Node(pending.into_id()),
        }
    }
}
