//! Line-at-a-time tokenizer.
//!
//! Each call to [`LineScanner::scan_line`] consumes one line (including its
//! trailing `\n`, if any). Block comments and string literals may span
//! lines: while one is open the scanner carries the close delimiter (and, for
//! strings, the content gathered so far) into the next call and reports
//! [`ScanStatus::NeedMore`].
//!
//! Per position, in priority order: continuation of an open comment or
//! string, whitespace, comment start, string start, number, symbol (longest
//! match), word (keyword when it spells one exactly), newline. Consecutive
//! newlines collapse into one token.

use std::borrow::Cow;

use quill_diagnostic::{Diagnostic, ErrorCode, ToDiagnostic};
use quill_ir::{Name, StringInterner, Token, TokenKind};
use tracing::{debug, trace};

use crate::chars::{is_alphanumeric, is_number, is_numeric, is_whitespace};
use crate::Classifier;

/// Whether the scanner is between tokens or inside a multi-line construct.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ScanStatus {
    Complete,
    /// A comment or string is still open; feed the next line.
    NeedMore,
}

#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum ScanError {
    #[error("no lexical category matches {} at {line}:{col}", describe_byte(.byte))]
    Unclassifiable { line: u32, col: u32, byte: u8 },
    #[error("comment opened at {line}:{col} is never closed")]
    UnterminatedComment { line: u32, col: u32 },
    #[error("string opened at {line}:{col} is never closed")]
    UnterminatedString { line: u32, col: u32 },
}

fn describe_byte(byte: &u8) -> String {
    if byte.is_ascii_graphic() {
        format!("`{}`", char::from(*byte))
    } else {
        format!("byte {byte:#04x}")
    }
}

impl ToDiagnostic for ScanError {
    fn code(&self) -> ErrorCode {
        match self {
            ScanError::Unclassifiable { .. } => ErrorCode::E0201,
            ScanError::UnterminatedComment { .. } => ErrorCode::E0202,
            ScanError::UnterminatedString { .. } => ErrorCode::E0203,
        }
    }

    fn to_diagnostic(&self) -> Diagnostic {
        let diag = Diagnostic::error(self.code());
        match *self {
            ScanError::Unclassifiable { line, col, byte } => diag
                .with_message(format!("no lexical category matches {}", describe_byte(&byte)))
                .at(line, col)
                .with_note("the lexical specification declares no symbol for it"),
            ScanError::UnterminatedComment { line, col } => {
                diag.with_message("unterminated comment").at(line, col)
            }
            ScanError::UnterminatedString { line, col } => {
                diag.with_message("unterminated string literal").at(line, col)
            }
        }
    }
}

/// A comment or string carried across lines.
enum Open<'c> {
    Comment {
        close: &'c [u8],
        line: u32,
        col: u32,
    },
    String {
        kind: TokenKind,
        close: &'c [u8],
        buffer: Vec<u8>,
        line: u32,
        col: u32,
    },
}

/// Stateful tokenizer over a [`Classifier`].
pub struct LineScanner<'c, C: ?Sized> {
    classifier: &'c C,
    interner: &'c StringInterner,
    open: Option<Open<'c>>,
    last_kind: Option<TokenKind>,
}

impl<'c, C: Classifier + ?Sized> LineScanner<'c, C> {
    pub fn new(classifier: &'c C, interner: &'c StringInterner) -> Self {
        LineScanner {
            classifier,
            interner,
            open: None,
            last_kind: None,
        }
    }

    /// Whether a comment or string is open.
    pub fn is_pending(&self) -> bool {
        self.open.is_some()
    }

    /// Tokenize one line, appending to `out`.
    pub fn scan_line(
        &mut self,
        line_no: u32,
        line: &str,
        out: &mut Vec<Token>,
    ) -> Result<ScanStatus, ScanError> {
        let classifier = self.classifier;
        let bytes = line.as_bytes();
        let mut pos = 0;
        trace!(line = line_no, len = bytes.len(), "scan line");

        while pos < bytes.len() {
            if let Some(open) = self.open.take() {
                match self.continue_open(open, line_no, bytes, pos, out) {
                    Some(next) => {
                        pos = next;
                        continue;
                    }
                    None => return Ok(ScanStatus::NeedMore),
                }
            }

            let byte = bytes[pos];
            if is_whitespace(byte) {
                pos += 1;
                continue;
            }

            let rest = &bytes[pos..];
            if let Some(delim) = classifier.comment_start(rest) {
                self.open = Some(Open::Comment {
                    close: delim.close,
                    line: line_no,
                    col: one_based(pos),
                });
                pos += delim.open_len.max(1);
                continue;
            }
            if let Some(delim) = classifier.string_start(rest) {
                self.open = Some(Open::String {
                    kind: delim.kind,
                    close: delim.close,
                    buffer: Vec::new(),
                    line: line_no,
                    col: one_based(pos),
                });
                pos += delim.open_len.max(1);
                continue;
            }

            pos = if is_numeric(byte) {
                self.number(line_no, bytes, pos, out)
            } else if let Some(next) = self.symbol(line_no, bytes, pos, out) {
                next
            } else if is_alphanumeric(byte) {
                self.word(line_no, bytes, pos, out)
            } else if byte == b'\n' {
                self.newline(line_no, pos, out)
            } else {
                return Err(ScanError::Unclassifiable {
                    line: line_no,
                    col: one_based(pos),
                    byte,
                });
            };
        }

        Ok(if self.open.is_some() {
            ScanStatus::NeedMore
        } else {
            ScanStatus::Complete
        })
    }

    /// End of input. A line comment left open by a missing final newline is
    /// accepted; anything else still open is an error.
    pub fn finish(&mut self) -> Result<(), ScanError> {
        match self.open.take() {
            None => Ok(()),
            Some(Open::Comment { close, .. }) if close.ends_with(b"\n") => Ok(()),
            Some(Open::Comment { line, col, .. }) => {
                Err(ScanError::UnterminatedComment { line, col })
            }
            Some(Open::String { line, col, .. }) => {
                Err(ScanError::UnterminatedString { line, col })
            }
        }
    }

    /// Resume an open construct at `pos`. Returns the position after its
    /// close delimiter, or `None` (with the construct re-stored) when the
    /// line ends first.
    fn continue_open(
        &mut self,
        open: Open<'c>,
        line_no: u32,
        bytes: &[u8],
        pos: usize,
        out: &mut Vec<Token>,
    ) -> Option<usize> {
        match open {
            Open::Comment { close, .. } => {
                let Some(at) = find(&bytes[pos..], close) else {
                    self.open = Some(open);
                    return None;
                };
                let mut end = pos + at + close.len();
                // A close ending in a newline leaves it for the newline token.
                if close.ends_with(b"\n") {
                    end -= 1;
                }
                Some(end)
            }
            Open::String {
                kind,
                close,
                mut buffer,
                line,
                col,
            } => {
                let mut from = pos;
                let end = loop {
                    let Some(at) = find(&bytes[from..], close).map(|at| from + at) else {
                        break None;
                    };
                    let before = if at > pos {
                        Some(bytes[at - 1])
                    } else {
                        buffer.last().copied()
                    };
                    if before != Some(b'\\') {
                        break Some(at);
                    }
                    from = at + 1;
                };
                let Some(end) = end else {
                    buffer.extend_from_slice(&bytes[pos..]);
                    trace!(line = line_no, "string continues");
                    self.open = Some(Open::String {
                        kind,
                        close,
                        buffer,
                        line,
                        col,
                    });
                    return None;
                };
                buffer.extend_from_slice(&bytes[pos..end]);
                let text = self.intern(&buffer);
                self.push(out, Token::new(kind, line, col, text, length(buffer.len())));
                Some(end + close.len())
            }
        }
    }

    /// Digits with at most one decimal point and an optional `f` suffix.
    fn number(&mut self, line_no: u32, bytes: &[u8], start: usize, out: &mut Vec<Token>) -> usize {
        let mut end = start;
        let mut decimal = false;
        while end < bytes.len() && is_number(bytes[end]) {
            if bytes[end] == b'.' {
                if decimal {
                    break;
                }
                decimal = true;
            }
            end += 1;
        }
        if bytes.get(end) == Some(&b'f') {
            decimal = true;
            end += 1;
        }
        let kind = if decimal {
            TokenKind::FLOATING
        } else {
            TokenKind::INTEGER
        };
        let text = self.intern(&bytes[start..end]);
        self.push(
            out,
            Token::new(kind, line_no, one_based(start), text, length(end - start)),
        );
        end
    }

    fn symbol(
        &mut self,
        line_no: u32,
        bytes: &[u8],
        start: usize,
        out: &mut Vec<Token>,
    ) -> Option<usize> {
        if !self.classifier.is_start_of_symbol(bytes[start]) {
            return None;
        }
        let (kind, len) = self.classifier.symbol(&bytes[start..])?;
        if len == 0 {
            return None;
        }
        let end = start + len;
        let text = self.intern(&bytes[start..end]);
        self.push(out, Token::new(kind, line_no, one_based(start), text, length(len)));
        Some(end)
    }

    /// Maximal alphanumeric run, then an exact keyword check.
    fn word(&mut self, line_no: u32, bytes: &[u8], start: usize, out: &mut Vec<Token>) -> usize {
        let mut end = start + 1;
        while end < bytes.len() && is_alphanumeric(bytes[end]) {
            end += 1;
        }
        let word = &bytes[start..end];
        let kind = self.classifier.keyword(word).unwrap_or(TokenKind::WORD);
        let text = self.intern(word);
        self.push(
            out,
            Token::new(kind, line_no, one_based(start), text, length(end - start)),
        );
        end
    }

    fn newline(&mut self, line_no: u32, pos: usize, out: &mut Vec<Token>) -> usize {
        if self.last_kind != Some(TokenKind::NEWLINE) {
            let text = self.interner.intern("\n");
            self.push(
                out,
                Token::new(TokenKind::NEWLINE, line_no, one_based(pos), text, 1),
            );
        }
        pos + 1
    }

    fn push(&mut self, out: &mut Vec<Token>, token: Token) {
        trace!(kind = token.kind.raw(), line = token.line, col = token.col, "token");
        self.last_kind = Some(token.kind);
        out.push(token);
    }

    fn intern(&self, bytes: &[u8]) -> Name {
        match String::from_utf8_lossy(bytes) {
            Cow::Borrowed(text) => self.interner.intern(text),
            Cow::Owned(text) => self.interner.intern(&text),
        }
    }
}

/// Tokenize a whole input. Lines keep their `\n`, so newline tokens appear
/// between lines; an open comment or string at the end is an error.
pub fn tokenize<C: Classifier + ?Sized>(
    classifier: &C,
    input: &str,
    interner: &StringInterner,
) -> Result<Vec<Token>, ScanError> {
    let mut scanner = LineScanner::new(classifier, interner);
    let mut tokens = Vec::new();
    for (index, line) in input.split_inclusive('\n').enumerate() {
        scanner.scan_line(one_based(index), line, &mut tokens)?;
    }
    scanner.finish()?;
    debug!(tokens = tokens.len(), "tokenized input");
    Ok(tokens)
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// 1-based position from a 0-based index.
fn one_based(index: usize) -> u32 {
    u32::try_from(index + 1).unwrap_or(u32::MAX)
}

fn length(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests;
