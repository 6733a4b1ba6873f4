//! The seam between the scanner and a compiled lexical specification.

use quill_ir::TokenKind;

use crate::chars::is_number;

/// An opening comment or string delimiter found at the scan position.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Delimited<'a> {
    /// `NAME_OPEN` for comments, the literal kind `NAME` for strings.
    pub kind: TokenKind,
    pub open_len: usize,
    pub close: &'a [u8],
}

/// Classification queries answered by a compiled lexical specification.
///
/// Implemented by `quill_lexgen::Lexicon` in-process and by the source
/// `quill_lexgen` emits.
pub trait Classifier {
    /// Longest declared symbol at the start of `input`, with its length.
    fn symbol(&self, input: &[u8]) -> Option<(TokenKind, usize)>;

    /// Whether any declared symbol starts with `byte`.
    fn is_start_of_symbol(&self, byte: u8) -> bool;

    /// The keyword spelled exactly by `word`. A prefix or extension of a
    /// keyword is not that keyword.
    fn keyword(&self, word: &[u8]) -> Option<TokenKind>;

    /// Comment delimiter opening at the start of `input`.
    fn comment_start(&self, input: &[u8]) -> Option<Delimited<'_>>;

    /// String delimiter opening at the start of `input`.
    fn string_start(&self, input: &[u8]) -> Option<Delimited<'_>>;

    /// Kind of a standalone literal: symbol, then keyword, then number.
    fn resolve(&self, word: &[u8]) -> TokenKind {
        if let Some((kind, len)) = self.symbol(word) {
            if len == word.len() {
                return kind;
            }
        }
        if let Some(kind) = self.keyword(word) {
            return kind;
        }
        match word.first() {
            Some(&b) if is_number(b) => {
                if word.ends_with(b"f") || word.contains(&b'.') {
                    TokenKind::FLOATING
                } else {
                    TokenKind::INTEGER
                }
            }
            _ => TokenKind::UNKNOWN,
        }
    }
}

impl<C: Classifier + ?Sized> Classifier for &C {
    fn symbol(&self, input: &[u8]) -> Option<(TokenKind, usize)> {
        (**self).symbol(input)
    }

    fn is_start_of_symbol(&self, byte: u8) -> bool {
        (**self).is_start_of_symbol(byte)
    }

    fn keyword(&self, word: &[u8]) -> Option<TokenKind> {
        (**self).keyword(word)
    }

    fn comment_start(&self, input: &[u8]) -> Option<Delimited<'_>> {
        (**self).comment_start(input)
    }

    fn string_start(&self, input: &[u8]) -> Option<Delimited<'_>> {
        (**self).string_start(input)
    }
}
