//! Parser runtime.
//!
//! Generated matching functions (and the `quill_pgen` interpreter) drive a
//! [`Parser`]: they peek and consume tokens through it, build syntax-tree
//! nodes in its [`NodeArena`], and report one of three [`Outcome`]s.
//!
//! Backtracking is explicit. A node under construction is a [`Pending`]
//! handle that must be attached to a parent, finished, or released; releasing
//! returns every token it holds to the front of the [`TokenCursor`], so the
//! next alternative sees exactly the tokens the failed one started with.

mod arena;
mod cursor;
mod outcome;
mod parser;
mod tree;

pub use arena::{Node, NodeArena, NodeId};
pub use cursor::TokenCursor;
pub use outcome::{Outcome, Pending, Root};
pub use parser::{ParseOptions, Parsed, Parser};
pub use tree::{NodeRef, RuleNames, TreePrinter};
