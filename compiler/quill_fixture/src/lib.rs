//! A scanner and parser produced by quill and compiled as ordinary Rust.
//!
//! `build.rs` compiles the tables under `lex/` and the rules in
//! `grammar.quill`; the output lands here as three modules:
//!
//! - [`tokens`]: token-kind constants and the `Lexer` classifier
//! - [`rules`]: one `RuleId` per rule, `RULE_NAMES` and `RuleFn`
//! - [`parser`]: the matching functions and `ENTRY_POINTS`
//!
//! The grammar is a small statement language: `let` bindings and arithmetic
//! over integers, floats, strings, words and calls, separated by `;`.

include!(concat!(env!("OUT_DIR"), "/generated.rs"));

/// Directory holding the lexical tables the scanner was generated from.
pub const LEX_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/lex");

/// Notation source the parser was generated from.
pub const GRAMMAR: &str = include_str!("../grammar.quill");
