//! Scanner runtime.
//!
//! A lexical specification is compiled into a [`Classifier`]: either the
//! trie-backed `Lexicon` from `quill_lexgen`, or the nested-match source it
//! emits. This crate holds everything that does not depend on a particular
//! specification:
//!
//! - byte classes ([`chars`]) and escape decoding ([`escape`])
//! - the [`Classifier`] seam and literal resolution
//! - [`LineScanner`], the stateful line-at-a-time tokenizer, and the
//!   whole-input [`tokenize`] wrapper

pub mod chars;
mod classify;
pub mod escape;
mod scanner;

pub use classify::{Classifier, Delimited};
pub use scanner::{tokenize, LineScanner, ScanError, ScanStatus};
