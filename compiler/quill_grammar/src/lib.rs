//! Grammar model.
//!
//! A [`Grammar`] is an ordered table of named rules, each owning one
//! [`Production`] tree. Rule references are by name and stay unresolved
//! here; the parser generator links them.
//!
//! Rules are checked as they are added: names must be identifiers free of
//! `__` (reserved for synthesized helper functions), `and`/`or` need at least
//! one child, and `optional` may only appear directly inside an `and`.

mod error;
mod grammar;
mod production;

pub use error::GrammarError;
pub use grammar::{Grammar, Listing, RuleDef};
pub use production::{Production, ProductionKind};
