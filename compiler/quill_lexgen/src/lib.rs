//! Lexical specification compiler.
//!
//! Four line-oriented tables (symbols, keywords, comments, strings) are
//! parsed into a [`LexSpec`], compiled into a [`Lexicon`] (token table plus
//! one [`Trie`] each for symbols and keywords), and either used in-process as
//! a `quill_lexer::Classifier` or emitted as Rust source by
//! [`emit_scanner`].
//!
//! Colliding literals, empty literals and malformed table lines are
//! specification errors: [`Lexicon::build`] fails and nothing is emitted.

mod emit;
mod error;
mod lexicon;
mod table;
mod trie;

pub use emit::emit_scanner;
pub use error::LexSpecError;
pub use lexicon::{DelimiterDef, Lexicon};
pub use table::{LexSpec, LiteralDef, PairDef, Table, TableOptions};
pub use trie::{Trie, TrieError, TrieNode};
