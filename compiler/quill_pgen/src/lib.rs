//! Grammar compiler.
//!
//! A [`Grammar`](quill_grammar::Grammar) is compiled in two steps:
//!
//! 1. [`Plan::compile`] turns every rule into matching functions. Non-trivial
//!    sub-productions get helper functions named
//!    `<owner>__<token|and|or|opt><index>`; token names are resolved against a
//!    `TokenTable`. Rule references stay symbolic.
//! 2. The plan is either emitted as Rust source ([`emit_interface`],
//!    [`emit_implementation`]) or linked into a [`Program`] and run directly
//!    against a `quill_parse::Parser`.
//!
//! Unresolved rule references surface at link time: as a [`LinkError`] from
//! [`Program::link`], or as an unknown function in the emitted source.

mod emit;
mod error;
mod plan;
mod program;

pub use emit::{emit_implementation, emit_interface};
pub use error::{CompileError, LinkError};
pub use plan::{Body, Callee, FnId, FnRole, MatchFn, Plan, PlannedRule, Step};
pub use program::Program;
