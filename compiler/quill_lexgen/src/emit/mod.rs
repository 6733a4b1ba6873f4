//! Rust source emission for a compiled lexicon.
//!
//! The emitted module holds the token-kind constants, name and text
//! tables, and a unit `Lexer` implementing `Classifier`. The symbol and
//! keyword classifiers are nested `match`es mirroring the tries: one arm per
//! populated branch, and a fallthrough to the enclosing level when no arm
//! matches. Symbol terminals return after their inner `match`, so the
//! deepest terminal on the input's path wins. Keyword terminals return
//! before it, guarded by the word length.

use quill_emit::literal::{byte_literal, byte_string_literal, string_literal};
use quill_emit::{EmitOptions, Emitter, GENERATED_HEADER};
use quill_ir::TokenTable;
use tracing::debug;

use crate::{DelimiterDef, Lexicon, TrieNode};

pub fn emit_scanner(lexicon: &Lexicon, options: &EmitOptions, out: &mut impl Emitter) {
    let table = lexicon.table();
    out.emit_line(0, GENERATED_HEADER);
    out.emit_line(0, "//! Token kinds and scanner for this lexical specification.");
    out.emit_line(0, "");
    out.emit_line(0, &format!("use {}::{{StringInterner, Token, TokenKind}};", options.ir_path));
    out.emit_line(
        0,
        &format!("use {}::{{Classifier, Delimited, ScanError}};", options.scanner_path),
    );
    out.emit_line(0, "");

    emit_kinds(table, out);
    emit_lookups(lexicon, out);
    emit_lexer(lexicon, options, out);
    debug!(kinds = table.len(), "emitted scanner");
}

fn emit_kinds(table: &TokenTable, out: &mut impl Emitter) {
    for (kind, def) in table.iter() {
        out.emit_line(
            0,
            &format!(
                "pub const {}: TokenKind = TokenKind::from_raw({});",
                def.name,
                kind.raw()
            ),
        );
    }
    out.emit_line(0, "");
    out.emit_line(0, &format!("pub const TOKEN_COUNT: usize = {};", table.len()));
    out.emit_line(0, "");

    out.emit_line(0, "/// Symbolic name of each kind.");
    out.emit_line(0, "pub const TOKEN_NAMES: [&str; TOKEN_COUNT] = [");
    for (_, def) in table.iter() {
        out.emit_line(1, &format!("{},", string_literal(&def.name)));
    }
    out.emit_line(0, "];");
    out.emit_line(0, "");

    out.emit_line(0, "/// Display text of each kind.");
    out.emit_line(0, "pub const TOKEN_TEXT: [&str; TOKEN_COUNT] = [");
    for (kind, _) in table.iter() {
        out.emit_line(1, &format!("{},", string_literal(table.display(kind))));
    }
    out.emit_line(0, "];");
    out.emit_line(0, "");
}

fn emit_lookups(lexicon: &Lexicon, out: &mut impl Emitter) {
    let table = lexicon.table();
    out.emit_line(0, "pub fn token_type_to_name(kind: TokenKind) -> &'static str {");
    out.emit_line(
        1,
        "TOKEN_NAMES.get(kind.index()).copied().unwrap_or(\"TOKENTYPE_UNKNOWN\")",
    );
    out.emit_line(0, "}");
    out.emit_line(0, "");

    out.emit_line(0, "pub fn token_type_to_str(kind: TokenKind) -> &'static str {");
    out.emit_line(1, "TOKEN_TEXT.get(kind.index()).copied().unwrap_or(\"UNKNOWN\")");
    out.emit_line(0, "}");
    out.emit_line(0, "");

    out.emit_line(0, "pub fn token_name_to_token_type(name: &str) -> TokenKind {");
    out.emit_line(1, "match name {");
    for (_, def) in table.iter().skip(1) {
        out.emit_line(2, &format!("{} => {},", string_literal(&def.name), def.name));
    }
    out.emit_line(2, "_ => TOKENTYPE_UNKNOWN,");
    out.emit_line(1, "}");
    out.emit_line(0, "}");
    out.emit_line(0, "");

    out.emit_line(0, "pub fn token_type_is_string(kind: TokenKind) -> bool {");
    let strings: Vec<&str> = lexicon
        .strings()
        .iter()
        .map(|def| table.name(def.kind))
        .collect();
    if strings.is_empty() {
        out.emit_line(1, "let _ = kind;");
        out.emit_line(1, "false");
    } else {
        out.emit_line(1, &format!("matches!(kind, {})", strings.join(" | ")));
    }
    out.emit_line(0, "}");
    out.emit_line(0, "");
}

fn emit_lexer(lexicon: &Lexicon, options: &EmitOptions, out: &mut impl Emitter) {
    let table = lexicon.table();
    out.emit_line(0, "/// Scanner generated from the lexical specification.");
    out.emit_line(0, "#[derive(Copy, Clone, Debug, Default)]");
    out.emit_line(0, "pub struct Lexer;");
    out.emit_line(0, "");
    out.emit_line(0, "#[allow(clippy::single_match, clippy::match_single_binding)]");
    out.emit_line(0, "impl Classifier for Lexer {");

    out.emit_line(1, "fn symbol(&self, word: &[u8]) -> Option<(TokenKind, usize)> {");
    if lexicon.symbols().is_empty() {
        out.emit_line(2, "let _ = word;");
    }
    emit_symbol_node(table, lexicon.symbols().root(), 0, 2, out);
    out.emit_line(2, "None");
    out.emit_line(1, "}");
    out.emit_line(0, "");

    out.emit_line(1, "fn is_start_of_symbol(&self, byte: u8) -> bool {");
    let firsts: Vec<String> = lexicon
        .symbols()
        .root()
        .children()
        .map(|(byte, _)| byte_literal(byte))
        .collect();
    out.emit_line(2, "match byte {");
    if !firsts.is_empty() {
        out.emit_line(3, &format!("{} => true,", firsts.join(" | ")));
    }
    out.emit_line(3, "_ => false,");
    out.emit_line(2, "}");
    out.emit_line(1, "}");
    out.emit_line(0, "");

    out.emit_line(1, "fn keyword(&self, word: &[u8]) -> Option<TokenKind> {");
    if lexicon.keywords().is_empty() {
        out.emit_line(2, "let _ = word;");
    }
    emit_keyword_node(table, lexicon.keywords().root(), 0, 2, out);
    out.emit_line(2, "None");
    out.emit_line(1, "}");
    out.emit_line(0, "");

    emit_delimiters(table, "comment_start", lexicon.comments(), out);
    out.emit_line(0, "");
    emit_delimiters(table, "string_start", lexicon.strings(), out);
    out.emit_line(0, "}");
    out.emit_line(0, "");

    out.emit_line(0, "/// Tokenize a whole input with [`Lexer`].");
    out.emit_line(
        0,
        "pub fn tokenize(input: &str, interner: &StringInterner) -> Result<Vec<Token>, ScanError> {",
    );
    out.emit_line(1, &format!("{}::tokenize(&Lexer, input, interner)", options.scanner_path));
    out.emit_line(0, "}");
}

/// Longest match: children first, then this node's terminal.
fn emit_symbol_node(
    table: &TokenTable,
    node: TrieNode<'_>,
    depth: usize,
    level: usize,
    out: &mut impl Emitter,
) {
    if node.has_children() {
        out.emit_line(level, &format!("match word.get({depth}) {{"));
        for (byte, child) in node.children() {
            out.emit_line(level + 1, &format!("Some(&{}) => {{", byte_literal(byte)));
            emit_symbol_node(table, child, depth + 1, level + 2, out);
            out.emit_line(level + 1, "}");
        }
        out.emit_line(level + 1, "_ => {}");
        out.emit_line(level, "}");
    }
    if let Some(kind) = node.terminal() {
        out.emit_line(level, &format!("return Some(({}, {depth}));", table.name(kind)));
    }
}

/// Exact match: this node's terminal only when the word ends here.
fn emit_keyword_node(
    table: &TokenTable,
    node: TrieNode<'_>,
    depth: usize,
    level: usize,
    out: &mut impl Emitter,
) {
    if let Some(kind) = node.terminal() {
        out.emit_line(
            level,
            &format!("if word.len() == {depth} {{ return Some({}); }}", table.name(kind)),
        );
    }
    if node.has_children() {
        out.emit_line(level, &format!("match word.get({depth}) {{"));
        for (byte, child) in node.children() {
            out.emit_line(level + 1, &format!("Some(&{}) => {{", byte_literal(byte)));
            emit_keyword_node(table, child, depth + 1, level + 2, out);
            out.emit_line(level + 1, "}");
        }
        out.emit_line(level + 1, "_ => {}");
        out.emit_line(level, "}");
    }
}

fn emit_delimiters(table: &TokenTable, name: &str, defs: &[DelimiterDef], out: &mut impl Emitter) {
    out.emit_line(1, &format!("fn {name}(&self, input: &[u8]) -> Option<Delimited<'_>> {{"));
    for def in defs {
        out.emit_line(
            2,
            &format!("if input.starts_with({}) {{", byte_string_literal(def.open.as_bytes())),
        );
        out.emit_line(3, "return Some(Delimited {");
        out.emit_line(4, &format!("kind: {},", table.name(def.kind)));
        out.emit_line(4, &format!("open_len: {},", def.open.len()));
        out.emit_line(4, &format!("close: {},", byte_string_literal(def.close.as_bytes())));
        out.emit_line(3, "});");
        out.emit_line(2, "}");
    }
    if defs.is_empty() {
        out.emit_line(2, "let _ = input;");
    }
    out.emit_line(2, "None");
    out.emit_line(1, "}");
}

#[cfg(test)]
mod tests;
