//! Token cursor with push-back.

use std::collections::VecDeque;

use quill_ir::Token;

/// The pending token sequence of a parse.
///
/// Tokens leave from the front when matched and return to the front when
/// the node holding them is released.
#[derive(Clone, Debug, Default)]
pub struct TokenCursor {
    tokens: VecDeque<Token>,
}

impl TokenCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// The front token, without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.front()
    }

    pub fn pop(&mut self) -> Option<Token> {
        self.tokens.pop_front()
    }

    /// Return a token to the front.
    pub fn push_front(&mut self, token: Token) {
        self.tokens.push_front(token);
    }

    /// Append a token to the end of the sequence.
    pub fn push_back(&mut self, token: Token) {
        self.tokens.push_back(token);
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Token> {
        self.tokens.iter()
    }

    /// Take every remaining token, leaving the cursor empty.
    pub fn drain(&mut self) -> Vec<Token> {
        self.tokens.drain(..).collect()
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
    }
}

impl Extend<Token> for TokenCursor {
    fn extend<I: IntoIterator<Item = Token>>(&mut self, iter: I) {
        self.tokens.extend(iter);
    }
}

#[cfg(test)]
mod tests;
