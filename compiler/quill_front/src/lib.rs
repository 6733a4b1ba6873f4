//! Grammar notation front end.
//!
//! Grammars are written as `;`-separated rules:
//!
//! ```text
//! // boolean disjunction
//! or  -> and(rule:word, rule:or1);
//! or1 -> or(and(token:KEYWORD_OR, rule:or), epsilon);
//! args -> sequence(token:SYMBOL_COMMA, rule:word);
//! ```
//!
//! `token:NAME` and `rule:NAME` reference a token kind and a rule;
//! `and(..)`, `or(..)`, `optional(..)` and `epsilon` build productions;
//! `sequence(item)` and `sequence(delim, item)` match one or more items
//! through a synthesized helper rule.
//!
//! The notation is scanned and parsed with the toolkit itself: a `Lexicon`
//! built from embedded tables and a `Program` linked from the notation's own
//! grammar ([`Notation::grammar`]). The resulting tree is lowered to a
//! `Grammar`.

mod error;
mod lower;
mod notation;

pub use error::FrontError;
pub use notation::{Notation, NotationRule, NOTATION_SOURCE};

/// Parse grammar notation with a freshly built [`Notation`].
pub fn parse_grammar(source: &str) -> Result<quill_grammar::Grammar, FrontError> {
    Notation::new()?.parse(source)
}
