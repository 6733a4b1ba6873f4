//! Production trees.

use std::fmt;

use quill_stack::ensure_sufficient_stack;

/// One node of a rule's production tree.
///
/// `Or` children are tried strictly in order and the first match wins;
/// `And` fails as a whole if any required child fails. Token and rule
/// references are by name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Production {
    Epsilon,
    Token(String),
    Rule(String),
    And(Vec<Production>),
    Or(Vec<Production>),
    Optional(Box<Production>),
}

/// The variant of a [`Production`], without its payload.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ProductionKind {
    Epsilon,
    Token,
    Rule,
    And,
    Or,
    Optional,
}

impl ProductionKind {
    /// Keyword spelling in the grammar notation.
    pub fn keyword(self) -> &'static str {
        match self {
            ProductionKind::Epsilon => "epsilon",
            ProductionKind::Token => "token",
            ProductionKind::Rule => "rule",
            ProductionKind::And => "and",
            ProductionKind::Or => "or",
            ProductionKind::Optional => "optional",
        }
    }
}

impl fmt::Display for ProductionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl Production {
    pub fn token(name: impl Into<String>) -> Self {
        Production::Token(name.into())
    }

    pub fn rule(name: impl Into<String>) -> Self {
        Production::Rule(name.into())
    }

    pub fn and(children: impl IntoIterator<Item = Production>) -> Self {
        Production::And(children.into_iter().collect())
    }

    pub fn or(children: impl IntoIterator<Item = Production>) -> Self {
        Production::Or(children.into_iter().collect())
    }

    pub fn optional(inner: Production) -> Self {
        Production::Optional(Box::new(inner))
    }

    pub fn kind(&self) -> ProductionKind {
        match self {
            Production::Epsilon => ProductionKind::Epsilon,
            Production::Token(_) => ProductionKind::Token,
            Production::Rule(_) => ProductionKind::Rule,
            Production::And(_) => ProductionKind::And,
            Production::Or(_) => ProductionKind::Or,
            Production::Optional(_) => ProductionKind::Optional,
        }
    }

    /// Direct children: the operands of `and`/`or`, the inner production of
    /// `optional`, nothing for leaves.
    pub fn children(&self) -> &[Production] {
        match self {
            Production::And(children) | Production::Or(children) => children,
            Production::Optional(inner) => std::slice::from_ref(inner.as_ref()),
            Production::Epsilon | Production::Token(_) | Production::Rule(_) => &[],
        }
    }

    /// Epsilon and rule references never need a function of their own.
    pub fn is_trivial(&self) -> bool {
        matches!(self, Production::Epsilon | Production::Rule(_))
    }

    /// Every rule name referenced anywhere in this tree, in source order.
    pub fn rule_refs(&self) -> Vec<&str> {
        let mut refs = Vec::new();
        self.walk(&mut |p| {
            if let Production::Rule(name) = p {
                refs.push(name.as_str());
            }
        });
        refs
    }

    /// Every token name referenced anywhere in this tree, in source order.
    pub fn token_refs(&self) -> Vec<&str> {
        let mut refs = Vec::new();
        self.walk(&mut |p| {
            if let Production::Token(name) = p {
                refs.push(name.as_str());
            }
        });
        refs
    }

    /// Pre-order traversal.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Production)) {
        ensure_sufficient_stack(|| {
            visit(self);
            for child in self.children() {
                child.walk(visit);
            }
        });
    }

    fn needs_parens(&self) -> bool {
        matches!(self, Production::And(_) | Production::Or(_))
    }

    fn fmt_operands(children: &[Production], op: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, child) in children.iter().enumerate() {
            if i > 0 {
                write!(f, " {op} ")?;
            }
            if child.needs_parens() {
                write!(f, "({child})")?;
            } else {
                write!(f, "{child}")?;
            }
        }
        Ok(())
    }
}

/// Listing notation: infix `AND`/`OR`, `[p]` for optional, `<name>` for rule
/// references, bare token names, `E` for epsilon.
impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| match self {
            Production::Epsilon => f.write_str("E"),
            Production::Token(name) => f.write_str(name),
            Production::Rule(name) => write!(f, "<{name}>"),
            Production::And(children) => Production::fmt_operands(children, "AND", f),
            Production::Or(children) => Production::fmt_operands(children, "OR", f),
            Production::Optional(inner) => write!(f, "[{inner}]"),
        })
    }
}
