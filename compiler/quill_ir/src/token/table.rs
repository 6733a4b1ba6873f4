//! The kind table assembled from a lexical specification.

use rustc_hash::FxHashMap;

use super::TokenKind;

/// Which part of the lexical specification declared a kind.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenGroup {
    Builtin,
    Symbol,
    Keyword,
    CommentOpen,
    CommentClose,
    /// Kind carried by a scanned string literal.
    StringLiteral,
    StringOpen,
    StringClose,
    Nop,
}

/// One row of the table.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct TokenDef {
    pub name: String,
    pub group: TokenGroup,
    /// Decoded literal text for symbols, keywords and delimiters.
    pub literal: Option<String>,
}

#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum TokenTableError {
    #[error("token name `{0}` is declared more than once")]
    DuplicateName(String),
    #[error("`{0}` is not a valid token name")]
    InvalidName(String),
    #[error("too many token kinds (limit is {limit})", limit = u16::MAX)]
    Overflow,
}

const BUILTIN_NAMES: [&str; TokenKind::BUILTIN_COUNT as usize] = [
    "TOKENTYPE_UNKNOWN",
    "TOKEN_NEWLINE",
    "TOKEN_WORD",
    "TOKEN_INTEGER",
    "TOKEN_FLOATING",
];

pub const NOP_NAME: &str = "TOKEN_NOP";

/// Kind ⇄ name ⇄ literal lookups.
///
/// Built once per lexical specification through `TokenTableBuilder` and
/// immutable afterwards.
#[derive(Clone, Debug)]
pub struct TokenTable {
    defs: Vec<TokenDef>,
    by_name: FxHashMap<String, TokenKind>,
}

impl TokenTable {
    pub fn builder() -> TokenTableBuilder {
        TokenTableBuilder::new()
    }

    /// Table holding only the builtin kinds and `TOKEN_NOP`.
    pub fn builtin() -> Self {
        TokenTableBuilder::new().finish()
    }

    fn def(&self, kind: TokenKind) -> Option<&TokenDef> {
        self.defs.get(kind.index())
    }

    /// Symbolic name, `TOKENTYPE_UNKNOWN` for kinds outside the table.
    pub fn name(&self, kind: TokenKind) -> &str {
        self.def(kind).map_or(BUILTIN_NAMES[0], |def| def.name.as_str())
    }

    pub fn group(&self, kind: TokenKind) -> Option<TokenGroup> {
        self.def(kind).map(|def| def.group)
    }

    pub fn literal(&self, kind: TokenKind) -> Option<&str> {
        self.def(kind).and_then(|def| def.literal.as_deref())
    }

    /// Display form: the literal for declared literals, `\n` for newline,
    /// the symbolic name for everything else.
    pub fn display(&self, kind: TokenKind) -> &str {
        if kind == TokenKind::NEWLINE {
            return "\\n";
        }
        match self.def(kind) {
            Some(TokenDef {
                literal: Some(text),
                group: TokenGroup::Symbol | TokenGroup::Keyword,
                ..
            }) => text,
            _ => self.name(kind),
        }
    }

    pub fn lookup(&self, name: &str) -> Option<TokenKind> {
        self.by_name.get(name).copied()
    }

    /// The trailing `TOKEN_NOP` kind.
    pub fn nop(&self) -> TokenKind {
        self.lookup(NOP_NAME).unwrap_or(TokenKind::UNKNOWN)
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TokenKind, &TokenDef)> {
        self.defs.iter().enumerate().map(|(i, def)| {
            #[expect(
                clippy::cast_possible_truncation,
                reason = "builder rejects tables larger than u16::MAX"
            )]
            let kind = TokenKind::from_raw(i as u16);
            (kind, def)
        })
    }

    /// Kinds declared by the lexical specification, in declaration order.
    pub fn declared(&self) -> impl Iterator<Item = (TokenKind, &TokenDef)> {
        self.iter()
            .filter(|(_, def)| !matches!(def.group, TokenGroup::Builtin | TokenGroup::Nop))
    }
}

impl Default for TokenTable {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Assigns kinds in declaration order after the builtins.
pub struct TokenTableBuilder {
    defs: Vec<TokenDef>,
    by_name: FxHashMap<String, TokenKind>,
}

impl TokenTableBuilder {
    fn new() -> Self {
        let mut builder = TokenTableBuilder {
            defs: Vec::with_capacity(32),
            by_name: FxHashMap::default(),
        };
        for (i, name) in BUILTIN_NAMES.iter().enumerate() {
            #[expect(clippy::cast_possible_truncation, reason = "five builtins")]
            let kind = TokenKind::from_raw(i as u16);
            builder.by_name.insert((*name).to_owned(), kind);
            builder.defs.push(TokenDef {
                name: (*name).to_owned(),
                group: TokenGroup::Builtin,
                literal: None,
            });
        }
        builder
    }

    /// Declare a new kind. Names must be identifiers (`[A-Za-z_][A-Za-z0-9_]*`)
    /// because they become constants in generated source.
    pub fn declare(
        &mut self,
        name: &str,
        group: TokenGroup,
        literal: Option<String>,
    ) -> Result<TokenKind, TokenTableError> {
        if !is_identifier(name) {
            return Err(TokenTableError::InvalidName(name.to_owned()));
        }
        if self.by_name.contains_key(name) || name == NOP_NAME {
            return Err(TokenTableError::DuplicateName(name.to_owned()));
        }
        // One slot stays reserved for TOKEN_NOP.
        let raw = u16::try_from(self.defs.len())
            .ok()
            .filter(|&raw| raw < u16::MAX)
            .ok_or(TokenTableError::Overflow)?;
        let kind = TokenKind::from_raw(raw);
        self.by_name.insert(name.to_owned(), kind);
        self.defs.push(TokenDef {
            name: name.to_owned(),
            group,
            literal,
        });
        Ok(kind)
    }

    pub fn finish(mut self) -> TokenTable {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "declare keeps the table below u16::MAX"
        )]
        let nop = TokenKind::from_raw(self.defs.len() as u16);
        self.by_name.insert(NOP_NAME.to_owned(), nop);
        self.defs.push(TokenDef {
            name: NOP_NAME.to_owned(),
            group: TokenGroup::Nop,
            literal: None,
        });
        TokenTable {
            defs: self.defs,
            by_name: self.by_name,
        }
    }
}

fn is_identifier(name: &str) -> bool {
    let mut bytes = name.bytes();
    matches!(bytes.next(), Some(b) if b.is_ascii_alphabetic() || b == b'_')
        && bytes.all(|b| b.is_ascii_alphanumeric() || b == b'_')
}
