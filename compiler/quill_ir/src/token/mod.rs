//! Tokens and token kinds.
//!
//! `TokenKind` is an open enumeration: the five builtin kinds are fixed, and
//! every other kind is assigned by a `TokenTable` built from a lexical
//! specification. The final kind of every table is `TOKEN_NOP`.

mod table;

pub use table::{TokenDef, TokenGroup, TokenTable, TokenTableBuilder, TokenTableError};

use std::fmt;

use crate::Name;

/// Token kind index into a `TokenTable`.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
#[repr(transparent)]
pub struct TokenKind(u16);

impl TokenKind {
    pub const UNKNOWN: TokenKind = TokenKind(0);
    /// Fixed so generated parsers and the newline-ignoring cursor can refer
    /// to it without a table.
    pub const NEWLINE: TokenKind = TokenKind(1);
    pub const WORD: TokenKind = TokenKind(2);
    pub const INTEGER: TokenKind = TokenKind(3);
    pub const FLOATING: TokenKind = TokenKind(4);

    /// Number of builtin kinds preceding the declared ones.
    pub const BUILTIN_COUNT: u16 = 5;

    #[inline]
    pub const fn from_raw(raw: u16) -> Self {
        TokenKind(raw)
    }

    #[inline]
    pub const fn raw(self) -> u16 {
        self.0
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn is_builtin(self) -> bool {
        self.0 < Self::BUILTIN_COUNT
    }
}

impl fmt::Debug for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            TokenKind::UNKNOWN => f.write_str("UNKNOWN"),
            TokenKind::NEWLINE => f.write_str("NEWLINE"),
            TokenKind::WORD => f.write_str("WORD"),
            TokenKind::INTEGER => f.write_str("INTEGER"),
            TokenKind::FLOATING => f.write_str("FLOATING"),
            TokenKind(raw) => write!(f, "TokenKind({raw})"),
        }
    }
}

/// A scanned token.
///
/// Lines and columns are 1-based. `len` is the byte length of `text`; for a
/// string literal that is the content between its delimiters.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Token {
    pub kind: TokenKind,
    pub line: u32,
    pub col: u32,
    pub text: Name,
    pub len: u32,
}

crate::static_assert_size!(Token, 20);

impl Token {
    #[inline]
    pub const fn new(kind: TokenKind, line: u32, col: u32, text: Name, len: u32) -> Self {
        Token {
            kind,
            line,
            col,
            text,
            len,
        }
    }

    #[inline]
    pub fn is_newline(&self) -> bool {
        self.kind == TokenKind::NEWLINE
    }
}
