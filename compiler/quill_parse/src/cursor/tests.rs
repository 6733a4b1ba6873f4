use super::*;
use pretty_assertions::assert_eq;
use quill_ir::{Name, TokenKind};

fn tok(col: u32) -> Token {
    Token::new(TokenKind::WORD, 1, col, Name::EMPTY, 1)
}

#[test]
fn peek_does_not_consume() {
    let mut cursor = TokenCursor::new();
    cursor.extend([tok(1), tok(2)]);
    assert_eq!(cursor.peek(), Some(&tok(1)));
    assert_eq!(cursor.peek(), Some(&tok(1)));
    assert_eq!(cursor.len(), 2);
}

#[test]
fn pop_then_push_front_restores_order() {
    let mut cursor = TokenCursor::new();
    cursor.extend([tok(1), tok(2), tok(3)]);
    let first = cursor.pop().unwrap();
    let second = cursor.pop().unwrap();
    cursor.push_front(second);
    cursor.push_front(first);
    assert_eq!(cursor.iter().copied().collect::<Vec<_>>(), vec![tok(1), tok(2), tok(3)]);
}

#[test]
fn exhausted_cursor() {
    let mut cursor = TokenCursor::new();
    assert!(cursor.is_empty());
    assert_eq!(cursor.peek(), None);
    assert_eq!(cursor.pop(), None);
}

#[test]
fn drain_empties() {
    let mut cursor = TokenCursor::new();
    cursor.push_back(tok(1));
    cursor.push_back(tok(2));
    assert_eq!(cursor.drain(), vec![tok(1), tok(2)]);
    assert!(cursor.is_empty());
    cursor.push_back(tok(3));
    cursor.clear();
    assert!(cursor.is_empty());
}
