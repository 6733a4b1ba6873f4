//! quill IR - shared types for the scanner, parser and both generators.
//!
//! - Names for interned token text
//! - Tokens and token kinds
//! - `TokenTable`, the open enumeration of token kinds assembled from a
//!   lexical specification
//! - `RuleId`, the identity parse-tree nodes carry
//!
//! # Design Philosophy
//!
//! - **Intern Everything**: token text is stored once and referenced by `Name(u32)`
//! - **Copy Tokens**: a `Token` is 20 bytes and `Copy`, so push-back during
//!   backtracking never allocates

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-copied types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod interner;
mod name;
mod rule;
mod token;

pub use interner::{InternError, StringInterner, StringLookup};
pub use name::Name;
pub use rule::RuleId;
pub use token::{Token, TokenDef, TokenGroup, TokenKind, TokenTable, TokenTableBuilder, TokenTableError};
