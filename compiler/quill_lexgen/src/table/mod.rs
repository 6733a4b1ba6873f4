//! The four definition tables of a lexical specification.
//!
//! One definition per line, fields separated by a single delimiter byte
//! (`,` by default), split at the first delimiter(s) so a literal may itself
//! contain the delimiter:
//!
//! ```text
//! symbols.txt / keywords.txt    NAME,literal
//! comments.txt / strings.txt    NAME,open,close
//! ```
//!
//! Literals are backslash-escaped; trailing `\r`/`\n` are stripped and blank
//! lines are skipped.

use std::fmt;
use std::fs;
use std::path::Path;

use quill_lexer::escape::unescape;
use tracing::debug;

use crate::LexSpecError;

/// Which table a definition came from.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Table {
    Symbols,
    Keywords,
    Comments,
    Strings,
}

impl Table {
    pub const ALL: [Table; 4] = [Table::Symbols, Table::Keywords, Table::Comments, Table::Strings];

    /// File name inside a lexical specification directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Table::Symbols => "symbols.txt",
            Table::Keywords => "keywords.txt",
            Table::Comments => "comments.txt",
            Table::Strings => "strings.txt",
        }
    }

    fn is_pair(self) -> bool {
        matches!(self, Table::Comments | Table::Strings)
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Table parsing options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableOptions {
    pub delimiter: u8,
}

impl Default for TableOptions {
    fn default() -> Self {
        TableOptions { delimiter: b',' }
    }
}

/// `NAME,literal`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LiteralDef {
    pub name: String,
    pub literal: String,
    pub line: u32,
}

/// `NAME,open,close`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PairDef {
    pub name: String,
    pub open: String,
    pub close: String,
    pub line: u32,
}

/// A parsed lexical specification.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LexSpec {
    pub symbols: Vec<LiteralDef>,
    pub keywords: Vec<LiteralDef>,
    pub comments: Vec<PairDef>,
    pub strings: Vec<PairDef>,
}

impl LexSpec {
    pub fn from_tables(
        symbols: &str,
        keywords: &str,
        comments: &str,
        strings: &str,
        options: &TableOptions,
    ) -> Result<Self, LexSpecError> {
        Ok(LexSpec {
            symbols: parse_literals(Table::Symbols, symbols, options)?,
            keywords: parse_literals(Table::Keywords, keywords, options)?,
            comments: parse_pairs(Table::Comments, comments, options)?,
            strings: parse_pairs(Table::Strings, strings, options)?,
        })
    }

    /// Read `symbols.txt`, `keywords.txt`, `comments.txt` and `strings.txt`
    /// from `dir`. A missing table is empty.
    pub fn load_dir(dir: &Path, options: &TableOptions) -> Result<Self, LexSpecError> {
        let mut sources = Table::ALL.map(|_| String::new());
        for (table, source) in Table::ALL.iter().zip(sources.iter_mut()) {
            let path = dir.join(table.file_name());
            match fs::read_to_string(&path) {
                Ok(text) => *source = text,
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                    debug!(path = %path.display(), "table missing, treated as empty");
                }
                Err(err) => {
                    return Err(LexSpecError::Io {
                        path,
                        message: err.to_string(),
                    })
                }
            }
        }
        let [symbols, keywords, comments, strings] = &sources;
        Self::from_tables(symbols, keywords, comments, strings, options)
    }
}

/// Parse a symbols or keywords table.
pub fn parse_literals(
    table: Table,
    source: &str,
    options: &TableOptions,
) -> Result<Vec<LiteralDef>, LexSpecError> {
    debug_assert!(!table.is_pair());
    let mut defs = Vec::new();
    for (line, text) in lines(source) {
        let Some((name, literal)) = split_once(text, options.delimiter) else {
            return Err(malformed(table, line, "NAME<delim>literal", text));
        };
        let literal = unescape(literal);
        if literal.is_empty() {
            return Err(LexSpecError::EmptyLiteral {
                table,
                line,
                name: name.to_owned(),
            });
        }
        defs.push(LiteralDef {
            name: name.to_owned(),
            literal,
            line,
        });
    }
    Ok(defs)
}

/// Parse a comments or strings table.
pub fn parse_pairs(
    table: Table,
    source: &str,
    options: &TableOptions,
) -> Result<Vec<PairDef>, LexSpecError> {
    debug_assert!(table.is_pair());
    let mut defs = Vec::new();
    for (line, text) in lines(source) {
        let Some((name, open, close)) = split_once(text, options.delimiter)
            .and_then(|(name, rest)| split_once(rest, options.delimiter).map(|(o, c)| (name, o, c)))
        else {
            return Err(malformed(table, line, "NAME<delim>open<delim>close", text));
        };
        let (open, close) = (unescape(open), unescape(close));
        if open.is_empty() || close.is_empty() {
            return Err(LexSpecError::EmptyLiteral {
                table,
                line,
                name: name.to_owned(),
            });
        }
        defs.push(PairDef {
            name: name.to_owned(),
            open,
            close,
            line,
        });
    }
    Ok(defs)
}

/// Non-blank lines with their 1-based numbers and line endings removed.
fn lines(source: &str) -> impl Iterator<Item = (u32, &str)> {
    source.lines().enumerate().filter_map(|(index, text)| {
        let text = text.trim_end_matches(['\r', '\n']);
        if text.is_empty() {
            return None;
        }
        Some((u32::try_from(index + 1).unwrap_or(u32::MAX), text))
    })
}

fn split_once(text: &str, delimiter: u8) -> Option<(&str, &str)> {
    let at = text.bytes().position(|b| b == delimiter)?;
    Some((text.get(..at)?, text.get(at + 1..)?))
}

fn malformed(table: Table, line: u32, expected: &'static str, text: &str) -> LexSpecError {
    LexSpecError::MalformedLine {
        table,
        line,
        expected,
        text: text.to_owned(),
    }
}

#[cfg(test)]
mod tests;
