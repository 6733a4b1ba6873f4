use super::*;
use pretty_assertions::assert_eq;

fn tok(name: &str) -> Production {
    Production::token(name)
}

fn rule(name: &str) -> Production {
    Production::rule(name)
}

fn boolean_grammar() -> Grammar {
    let mut g = Grammar::new();
    g.add_rule("or", Production::and([rule("and"), rule("or1")])).unwrap();
    g.add_rule(
        "or1",
        Production::or([Production::and([tok("KEYWORD_OR"), rule("or")]), Production::Epsilon]),
    )
    .unwrap();
    g.add_rule("and", tok("TOKEN_WORD")).unwrap();
    g
}

#[test]
fn ids_follow_declaration_order() {
    let g = boolean_grammar();
    assert_eq!(g.len(), 3);
    assert_eq!(g.id("or"), Some(RuleId::from_raw(0)));
    assert_eq!(g.id("and"), Some(RuleId::from_raw(2)));
    assert_eq!(g.id("xor"), None);
    assert_eq!(g.rule(RuleId::from_raw(1)).map(|d| d.name.as_str()), Some("or1"));
    assert_eq!(g.names().collect::<Vec<_>>(), vec!["or", "or1", "and"]);
    assert_eq!(g.get("and"), Some(&tok("TOKEN_WORD")));
}

#[test]
fn listing_renders_every_rule() {
    assert_eq!(
        boolean_grammar().listing().to_string(),
        "or -> <and> AND <or1>\n\
         or1 -> (KEYWORD_OR AND <or>) OR E\n\
         and -> TOKEN_WORD\n"
    );
}

#[test]
fn duplicate_rule_is_rejected() {
    let mut g = boolean_grammar();
    assert_eq!(
        g.add_rule("or", Production::Epsilon),
        Err(GrammarError::DuplicateRule { name: "or".into() })
    );
    assert_eq!(g.len(), 3);
}

#[test]
fn rule_names_must_be_identifiers() {
    let mut g = Grammar::new();
    for bad in ["", "1x", "a-b", "a__b", "__x", "x y"] {
        assert_eq!(
            g.add_rule(bad, Production::Epsilon),
            Err(GrammarError::InvalidRuleName { name: bad.into() }),
            "{bad:?}"
        );
    }
    assert!(g.add_rule("_x1", Production::Epsilon).is_ok());
    assert!(g.add_rule("a_b", Production::Epsilon).is_ok());
}

#[test]
fn empty_operators_are_rejected() {
    let mut g = Grammar::new();
    assert_eq!(
        g.add_rule("a", Production::and([])),
        Err(GrammarError::EmptyArity { rule: "a".into(), kind: ProductionKind::And })
    );
    assert_eq!(
        g.add_rule("b", Production::and([tok("T"), Production::or([])])),
        Err(GrammarError::EmptyArity { rule: "b".into(), kind: ProductionKind::Or })
    );
    assert!(g.is_empty());
}

#[test]
fn optional_only_inside_and() {
    let mut g = Grammar::new();
    let misplaced = |rule: &str| -> Result<RuleId, GrammarError> {
        Err(GrammarError::MisplacedOptional { rule: rule.into() })
    };

    assert_eq!(g.add_rule("top", Production::optional(tok("T"))), misplaced("top"));
    assert_eq!(
        g.add_rule("in_or", Production::or([Production::optional(tok("T")), tok("U")])),
        misplaced("in_or")
    );
    assert_eq!(
        g.add_rule(
            "nested",
            Production::and([Production::optional(Production::optional(tok("T")))])
        ),
        misplaced("nested")
    );
    assert!(g
        .add_rule("ok", Production::and([Production::optional(tok("T")), tok("U")]))
        .is_ok());
}

#[test]
fn unresolved_references_are_listed() {
    let mut g = Grammar::new();
    g.add_rule("a", Production::and([rule("b"), rule("c"), rule("a")])).unwrap();
    g.add_rule("b", Production::or([rule("d"), Production::Epsilon])).unwrap();
    assert_eq!(g.unresolved_references(), vec![("a", "c"), ("b", "d")]);
    assert_eq!(
        g.check_references(),
        Err(GrammarError::UnresolvedRule { rule: "a".into(), reference: "c".into() })
    );

    g.add_rule("c", Production::Epsilon).unwrap();
    g.add_rule("d", Production::Epsilon).unwrap();
    assert_eq!(g.check_references(), Ok(()));
}

#[test]
fn sequence_adds_numbered_helper() {
    let mut g = Grammar::new();
    let seq = g
        .add_sequence("list", Some(tok("SYMBOL_COMMA")), rule("item"))
        .unwrap();
    assert_eq!(seq, Production::and([rule("item"), rule("list1")]));
    assert_eq!(
        g.get("list1"),
        Some(&Production::or([
            Production::and([tok("SYMBOL_COMMA"), rule("item"), rule("list1")]),
            Production::Epsilon,
        ]))
    );

    // A second sequence in the same rule takes the next free number.
    let seq = g.add_sequence("list", None, tok("TOKEN_WORD")).unwrap();
    assert_eq!(seq, Production::and([tok("TOKEN_WORD"), rule("list2")]));
    assert_eq!(
        g.listing().to_string(),
        "list1 -> (SYMBOL_COMMA AND <item> AND <list1>) OR E\n\
         list2 -> (TOKEN_WORD AND <list2>) OR E\n"
    );
}

#[test]
fn sequence_skips_taken_names() {
    let mut g = Grammar::new();
    g.add_rule("args1", Production::Epsilon).unwrap();
    let seq = g.add_sequence("args", None, rule("arg")).unwrap();
    assert_eq!(seq, Production::and([rule("arg"), rule("args2")]));
}

mod proptest_names {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn identifiers_without_double_underscore_are_accepted(name in "[a-z][a-z0-9]{0,6}(_[a-z0-9]{1,4}){0,2}") {
            let mut g = Grammar::new();
            prop_assert!(g.add_rule(name.clone(), Production::Epsilon).is_ok());
            prop_assert_eq!(g.id(&name), Some(RuleId::from_raw(0)));
        }

        #[test]
        fn double_underscore_is_reserved(head in "[a-z]{1,4}", tail in "[a-z]{0,4}") {
            let name = format!("{head}__{tail}");
            let mut g = Grammar::new();
            prop_assert_eq!(
                g.add_rule(name.clone(), Production::Epsilon),
                Err(GrammarError::InvalidRuleName { name })
            );
        }
    }
}
