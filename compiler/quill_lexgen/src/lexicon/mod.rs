//! A compiled lexical specification.

use quill_ir::{TokenGroup, TokenKind, TokenTable, TokenTableBuilder, TokenTableError};
use quill_lexer::{Classifier, Delimited};
use tracing::debug;

use crate::{LexSpec, LexSpecError, LiteralDef, PairDef, Table, Trie, TrieError};

/// A comment or string delimiter pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DelimiterDef {
    pub name: String,
    /// Kind reported when the pair opens: the literal kind `NAME` for
    /// strings, `NAME_OPEN` for comments.
    pub kind: TokenKind,
    pub open_kind: TokenKind,
    pub close_kind: TokenKind,
    pub open: String,
    pub close: String,
}

impl DelimiterDef {
    fn delimited(&self) -> Delimited<'_> {
        Delimited {
            kind: self.kind,
            open_len: self.open.len(),
            close: self.close.as_bytes(),
        }
    }
}

/// Token table, symbol and keyword tries, and delimiter pairs.
///
/// Kinds are numbered: builtins, string literal kinds, symbols, keywords,
/// comment `_OPEN`/`_CLOSE` pairs, string `_OPEN`/`_CLOSE` pairs, then
/// `TOKEN_NOP`.
pub struct Lexicon {
    table: TokenTable,
    symbols: Trie,
    keywords: Trie,
    comments: Vec<DelimiterDef>,
    strings: Vec<DelimiterDef>,
}

impl Lexicon {
    pub fn build(spec: &LexSpec) -> Result<Self, LexSpecError> {
        let mut builder = TokenTable::builder();

        let string_kinds = spec
            .strings
            .iter()
            .map(|def| builder.declare(&def.name, TokenGroup::StringLiteral, None))
            .collect::<Result<Vec<_>, _>>()?;
        let symbol_kinds = declare_literals(&mut builder, &spec.symbols, TokenGroup::Symbol)?;
        let keyword_kinds = declare_literals(&mut builder, &spec.keywords, TokenGroup::Keyword)?;
        let comment_kinds = declare_pairs(
            &mut builder,
            &spec.comments,
            TokenGroup::CommentOpen,
            TokenGroup::CommentClose,
        )?;
        let string_pair_kinds = declare_pairs(
            &mut builder,
            &spec.strings,
            TokenGroup::StringOpen,
            TokenGroup::StringClose,
        )?;
        let table = builder.finish();

        let symbols = build_trie(&table, Table::Symbols, &spec.symbols, &symbol_kinds)?;
        let keywords = build_trie(&table, Table::Keywords, &spec.keywords, &keyword_kinds)?;

        let comments = spec
            .comments
            .iter()
            .zip(comment_kinds)
            .map(|(def, (open_kind, close_kind))| delimiter(def, open_kind, open_kind, close_kind))
            .collect();
        let strings = spec
            .strings
            .iter()
            .zip(string_kinds)
            .zip(string_pair_kinds)
            .map(|((def, kind), (open_kind, close_kind))| delimiter(def, kind, open_kind, close_kind))
            .collect();

        debug!(
            kinds = table.len(),
            symbol_nodes = symbols.len(),
            keyword_nodes = keywords.len(),
            "built lexicon"
        );
        Ok(Lexicon {
            table,
            symbols,
            keywords,
            comments,
            strings,
        })
    }

    pub fn table(&self) -> &TokenTable {
        &self.table
    }

    pub fn symbols(&self) -> &Trie {
        &self.symbols
    }

    pub fn keywords(&self) -> &Trie {
        &self.keywords
    }

    pub fn comments(&self) -> &[DelimiterDef] {
        &self.comments
    }

    pub fn strings(&self) -> &[DelimiterDef] {
        &self.strings
    }
}

fn declare_literals(
    builder: &mut TokenTableBuilder,
    defs: &[LiteralDef],
    group: TokenGroup,
) -> Result<Vec<TokenKind>, LexSpecError> {
    defs.iter()
        .map(|def| {
            builder
                .declare(&def.name, group, Some(def.literal.clone()))
                .map_err(LexSpecError::from)
        })
        .collect()
}

fn declare_pairs(
    builder: &mut TokenTableBuilder,
    defs: &[PairDef],
    open_group: TokenGroup,
    close_group: TokenGroup,
) -> Result<Vec<(TokenKind, TokenKind)>, LexSpecError> {
    defs.iter()
        .map(|def| -> Result<_, LexSpecError> {
            let open = builder.declare(&format!("{}_OPEN", def.name), open_group, Some(def.open.clone()))?;
            let close =
                builder.declare(&format!("{}_CLOSE", def.name), close_group, Some(def.close.clone()))?;
            Ok((open, close))
        })
        .collect()
}

fn build_trie(
    table: &TokenTable,
    which: Table,
    defs: &[LiteralDef],
    kinds: &[TokenKind],
) -> Result<Trie, LexSpecError> {
    let mut trie = Trie::new();
    for (def, &kind) in defs.iter().zip(kinds) {
        trie.insert(def.literal.as_bytes(), kind).map_err(|err| match err {
            TrieError::Collision { existing } => LexSpecError::Collision {
                table: which,
                literal: def.literal.clone(),
                first: table.name(existing).to_owned(),
                second: def.name.clone(),
            },
            TrieError::Empty => LexSpecError::EmptyLiteral {
                table: which,
                line: def.line,
                name: def.name.clone(),
            },
            TrieError::Overflow => LexSpecError::TokenName(TokenTableError::Overflow),
        })?;
    }
    Ok(trie)
}

fn delimiter(def: &PairDef, kind: TokenKind, open_kind: TokenKind, close_kind: TokenKind) -> DelimiterDef {
    DelimiterDef {
        name: def.name.clone(),
        kind,
        open_kind,
        close_kind,
        open: def.open.clone(),
        close: def.close.clone(),
    }
}

impl Classifier for Lexicon {
    fn symbol(&self, input: &[u8]) -> Option<(TokenKind, usize)> {
        self.symbols.longest_match(input)
    }

    fn is_start_of_symbol(&self, byte: u8) -> bool {
        self.symbols.starts_with(byte)
    }

    fn keyword(&self, word: &[u8]) -> Option<TokenKind> {
        self.keywords.exact(word)
    }

    fn comment_start(&self, input: &[u8]) -> Option<Delimited<'_>> {
        self.comments
            .iter()
            .find(|def| input.starts_with(def.open.as_bytes()))
            .map(DelimiterDef::delimited)
    }

    fn string_start(&self, input: &[u8]) -> Option<Delimited<'_>> {
        self.strings
            .iter()
            .find(|def| input.starts_with(def.open.as_bytes()))
            .map(DelimiterDef::delimited)
    }
}
