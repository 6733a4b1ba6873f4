//! The notation's own lexical tables and grammar.

use quill_grammar::{Grammar, Production};
use quill_ir::{RuleId, StringInterner};
use quill_lexer::tokenize;
use quill_lexgen::{LexSpec, Lexicon, TableOptions};
use quill_parse::{ParseOptions, Parser};
use quill_pgen::{Plan, Program};
use tracing::debug;

use crate::lower::Lowering;
use crate::FrontError;

const SYMBOLS: &str = "\
SYMBOL_ARROW,->
SYMBOL_COLON,:
SYMBOL_COMMA,,
SYMBOL_LPAREN,(
SYMBOL_RPAREN,)
SYMBOL_SEMICOLON,;
";

const KEYWORDS: &str = "\
KEYWORD_TOKEN,token
KEYWORD_RULE,rule
KEYWORD_AND,and
KEYWORD_OR,or
KEYWORD_OPTIONAL,optional
KEYWORD_EPSILON,epsilon
KEYWORD_SEQUENCE,sequence
";

const COMMENTS: &str = "\
LINE_COMMENT,//,\\n
BLOCK_COMMENT,/*,*/
";

/// The notation's grammar, written in the notation.
pub const NOTATION_SOURCE: &str = "\
// A grammar is one or more rules separated (or terminated) by `;`.
production_rule_set -> and(rule:production_rule, rule:production_rule_set1);
production_rule_set1 -> or(
    and(token:SYMBOL_SEMICOLON, rule:production_rule, rule:production_rule_set1),
    token:SYMBOL_SEMICOLON,
    epsilon);
production_rule -> and(rule:identifier, token:SYMBOL_ARROW, rule:production_expression);
production_expression -> or(
    rule:optional, rule:and, rule:or, rule:sequence, rule:rule_ref, rule:token_ref, rule:epsilon);
optional -> and(token:KEYWORD_OPTIONAL, token:SYMBOL_LPAREN, rule:production_expression, token:SYMBOL_RPAREN);
and -> and(token:KEYWORD_AND, token:SYMBOL_LPAREN, rule:list, token:SYMBOL_RPAREN);
or -> and(token:KEYWORD_OR, token:SYMBOL_LPAREN, rule:list, token:SYMBOL_RPAREN);
sequence -> and(
    token:KEYWORD_SEQUENCE,
    token:SYMBOL_LPAREN,
    rule:production_expression,
    optional(and(token:SYMBOL_COMMA, rule:production_expression)),
    token:SYMBOL_RPAREN);
rule_ref -> and(token:KEYWORD_RULE, token:SYMBOL_COLON, rule:identifier);
token_ref -> and(token:KEYWORD_TOKEN, token:SYMBOL_COLON, rule:identifier);
epsilon -> token:KEYWORD_EPSILON;
list -> sequence(token:SYMBOL_COMMA, rule:production_expression);
/* Keywords double as names, so `rule:or` and `or -> ...` work. */
identifier -> or(
    token:TOKEN_WORD,
    token:KEYWORD_TOKEN, token:KEYWORD_RULE, token:KEYWORD_AND, token:KEYWORD_OR,
    token:KEYWORD_OPTIONAL, token:KEYWORD_EPSILON, token:KEYWORD_SEQUENCE);
";

/// Rules of the notation grammar.
///
/// Lowering matches on these instead of comparing rule names.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NotationRule {
    RuleSet,
    RuleSetTail,
    ProductionRule,
    Expression,
    Optional,
    And,
    Or,
    Sequence,
    RuleRef,
    TokenRef,
    Epsilon,
    ListTail,
    List,
    Identifier,
}

impl NotationRule {
    pub const ALL: [NotationRule; 14] = [
        NotationRule::RuleSet,
        NotationRule::RuleSetTail,
        NotationRule::ProductionRule,
        NotationRule::Expression,
        NotationRule::Optional,
        NotationRule::And,
        NotationRule::Or,
        NotationRule::Sequence,
        NotationRule::RuleRef,
        NotationRule::TokenRef,
        NotationRule::Epsilon,
        NotationRule::ListTail,
        NotationRule::List,
        NotationRule::Identifier,
    ];

    pub fn name(self) -> &'static str {
        match self {
            NotationRule::RuleSet => "production_rule_set",
            NotationRule::RuleSetTail => "production_rule_set1",
            NotationRule::ProductionRule => "production_rule",
            NotationRule::Expression => "production_expression",
            NotationRule::Optional => "optional",
            NotationRule::And => "and",
            NotationRule::Or => "or",
            NotationRule::Sequence => "sequence",
            NotationRule::RuleRef => "rule_ref",
            NotationRule::TokenRef => "token_ref",
            NotationRule::Epsilon => "epsilon",
            NotationRule::ListTail => "list1",
            NotationRule::List => "list",
            NotationRule::Identifier => "identifier",
        }
    }

    fn from_name(name: &str) -> Option<NotationRule> {
        NotationRule::ALL.into_iter().find(|rule| rule.name() == name)
    }
}

/// The notation grammar, built directly from productions.
///
/// Parsing [`NOTATION_SOURCE`] with a [`Notation`] yields the same grammar.
fn notation_grammar() -> Result<Grammar, FrontError> {
    fn tok(name: &str) -> Production {
        Production::token(name)
    }
    fn rule(name: &str) -> Production {
        Production::rule(name)
    }
    /// `KEYWORD ( inner )`
    fn wrapped(keyword: &str, inner: Production) -> Production {
        Production::and([tok(keyword), tok("SYMBOL_LPAREN"), inner, tok("SYMBOL_RPAREN")])
    }
    /// `KEYWORD : identifier`
    fn reference(keyword: &str) -> Production {
        Production::and([tok(keyword), tok("SYMBOL_COLON"), rule("identifier")])
    }

    let mut g = Grammar::new();
    g.add_rule(
        NotationRule::RuleSet.name(),
        Production::and([rule("production_rule"), rule("production_rule_set1")]),
    )?;
    g.add_rule(
        NotationRule::RuleSetTail.name(),
        Production::or([
            Production::and([
                tok("SYMBOL_SEMICOLON"),
                rule("production_rule"),
                rule("production_rule_set1"),
            ]),
            tok("SYMBOL_SEMICOLON"),
            Production::Epsilon,
        ]),
    )?;
    g.add_rule(
        NotationRule::ProductionRule.name(),
        Production::and([
            rule("identifier"),
            tok("SYMBOL_ARROW"),
            rule("production_expression"),
        ]),
    )?;
    g.add_rule(
        NotationRule::Expression.name(),
        Production::or(
            ["optional", "and", "or", "sequence", "rule_ref", "token_ref", "epsilon"].map(rule),
        ),
    )?;
    g.add_rule(
        NotationRule::Optional.name(),
        wrapped("KEYWORD_OPTIONAL", rule("production_expression")),
    )?;
    g.add_rule(NotationRule::And.name(), wrapped("KEYWORD_AND", rule("list")))?;
    g.add_rule(NotationRule::Or.name(), wrapped("KEYWORD_OR", rule("list")))?;
    g.add_rule(
        NotationRule::Sequence.name(),
        Production::and([
            tok("KEYWORD_SEQUENCE"),
            tok("SYMBOL_LPAREN"),
            rule("production_expression"),
            Production::optional(Production::and([
                tok("SYMBOL_COMMA"),
                rule("production_expression"),
            ])),
            tok("SYMBOL_RPAREN"),
        ]),
    )?;
    g.add_rule(NotationRule::RuleRef.name(), reference("KEYWORD_RULE"))?;
    g.add_rule(NotationRule::TokenRef.name(), reference("KEYWORD_TOKEN"))?;
    g.add_rule(NotationRule::Epsilon.name(), tok("KEYWORD_EPSILON"))?;
    let list = g.add_sequence(
        NotationRule::List.name(),
        Some(tok("SYMBOL_COMMA")),
        rule("production_expression"),
    )?;
    g.add_rule(NotationRule::List.name(), list)?;
    g.add_rule(
        NotationRule::Identifier.name(),
        Production::or(
            [
                "TOKEN_WORD",
                "KEYWORD_TOKEN",
                "KEYWORD_RULE",
                "KEYWORD_AND",
                "KEYWORD_OR",
                "KEYWORD_OPTIONAL",
                "KEYWORD_EPSILON",
                "KEYWORD_SEQUENCE",
            ]
            .map(tok),
        ),
    )?;
    Ok(g)
}

/// Scanner, parser program and interner for the grammar notation.
pub struct Notation {
    lexicon: Lexicon,
    grammar: Grammar,
    program: Program,
    /// Indexed by `RuleId`.
    kinds: Vec<Option<NotationRule>>,
    interner: StringInterner,
}

impl Notation {
    pub fn new() -> Result<Notation, FrontError> {
        let spec = LexSpec::from_tables(SYMBOLS, KEYWORDS, COMMENTS, "", &TableOptions::default())
            .map_err(|err| FrontError::Bootstrap(err.to_string()))?;
        let lexicon = Lexicon::build(&spec).map_err(|err| FrontError::Bootstrap(err.to_string()))?;
        let grammar = notation_grammar()?;
        let plan = Plan::compile(&grammar, lexicon.table())
            .map_err(|err| FrontError::Bootstrap(err.to_string()))?;
        let program = Program::link(&plan).map_err(|err| FrontError::Bootstrap(err.to_string()))?;
        let kinds = program
            .names()
            .iter()
            .map(|name| NotationRule::from_name(name))
            .collect();
        debug!(
            tokens = lexicon.table().len(),
            rules = grammar.len(),
            "notation ready"
        );
        Ok(Notation {
            lexicon,
            grammar,
            program,
            kinds,
            interner: StringInterner::new(),
        })
    }

    /// Parse notation text into a grammar.
    pub fn parse(&self, source: &str) -> Result<Grammar, FrontError> {
        let tokens = tokenize(&self.lexicon, source, &self.interner)?;
        let mut parser = Parser::new(ParseOptions {
            ignore_newlines: true,
            prune_newlines: false,
        });
        let parsed = self
            .program
            .parse(&mut parser, NotationRule::RuleSet.name(), tokens.iter().copied())
            .map_err(|err| FrontError::Bootstrap(err.to_string()))?;

        let Some(root) = parsed.root.node() else {
            let (line, col) = tokens
                .iter()
                .find(|t| !t.is_newline())
                .map_or((1, 1), |t| (t.line, t.col));
            return Err(FrontError::NoMatch { line, col });
        };
        if let Some(extra) = parsed.remainder.first() {
            return Err(FrontError::TrailingTokens {
                line: extra.line,
                col: extra.col,
                text: self.interner.lookup(extra.text).to_owned(),
            });
        }

        let grammar = Lowering::new(self).rule_set(parser.view(root))?;
        debug!(rules = grammar.len(), "parsed grammar notation");
        Ok(grammar)
    }

    /// The notation's own grammar.
    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interner
    }

    /// Which notation rule produced a node, if any.
    pub fn rule_of(&self, id: RuleId) -> Option<NotationRule> {
        self.kinds.get(id.index()).copied().flatten()
    }
}

#[cfg(test)]
mod tests;
