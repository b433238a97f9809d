use pretty_assertions::assert_eq;
use proptest::prelude::*;
use sprig::*;

fn render(source: &str) -> String {
    parse(source, "<test>")
        .unwrap()
        .iter()
        .map(|node| node.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

// ═══════════════════════════════════════════════════════════════════════
// Desugaring
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_dict_sugar_matches_explicit_form() {
    assert_eq!(render("{:a 1}"), render("(dicty :a 1)"));
    assert_eq!(render("{:a 1}"), "(dicty :a 1)");
}

#[test]
fn test_list_sugar_matches_explicit_form() {
    assert_eq!(render("[1 2]"), render("(listy 1 2)"));
}

#[test]
fn test_quote_becomes_property() {
    let wood = parse("'(a b)", "<test>").unwrap();
    let expr = wood[0].as_expression().unwrap();
    assert!(expr.is_quoted());
    assert_eq!(expr.children.len(), 2);
}

#[test]
fn test_inline_fn_keeps_children() {
    let wood = parse("#(+ % 1)", "<test>").unwrap();
    let expr = wood[0].as_expression().unwrap();
    assert!(expr.inline_fn);
    assert_eq!(expr.children.len(), 3);
    assert_eq!(wood[0].to_string(), "#(+ % 1)");
}

#[test]
fn test_expression_location_is_opening_bracket() {
    let wood = parse("\n  (f x)", "<test>").unwrap();
    assert_eq!(wood[0].location(), Some(&SourceLocation::new("<test>", 2, 3)));
}

#[test]
fn test_top_level_sequence() {
    let wood = parse("(def x 1) x (f x)", "<test>").unwrap();
    assert_eq!(wood.len(), 3);
    assert!(wood[1].as_literal().is_some());
}

// ═══════════════════════════════════════════════════════════════════════
// Bracket Errors
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_unclosed_bracket() {
    let err = parse("(f (g x)", "<test>").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Structure);
    assert_eq!(err.location, Some(SourceLocation::new("<test>", 1, 1)));
}

#[test]
fn test_stray_closing_bracket() {
    let err = parse("(f x))", "<test>").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Structure);
    assert_eq!(err.location, Some(SourceLocation::new("<test>", 1, 6)));
}

#[test]
fn test_deep_nesting_is_an_error() {
    let depth = 200_000;
    let source = format!("{}1{}", "(do ".repeat(depth), ")".repeat(depth));
    let err = parse(&source, "<test>").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Structure);
    assert!(err.message.contains("nested deeper than"));
}

#[test]
fn test_nesting_at_limit_builds() {
    let depth = sprig::context::DEFAULT_MAX_DEPTH;
    let source = format!("{}1{}", "(do ".repeat(depth), ")".repeat(depth));
    assert_eq!(parse(&source, "<test>").unwrap().len(), 1);
}

// ═══════════════════════════════════════════════════════════════════════
// Properties
// ═══════════════════════════════════════════════════════════════════════

fn balanced() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        Just("x".to_string()),
        Just("42".to_string()),
        Just(":k".to_string()),
        Just("nil".to_string()),
    ];
    leaf.prop_recursive(4, 32, 4, |inner| {
        prop::collection::vec(inner, 0..4).prop_map(|items| format!("({})", items.join(" ")))
    })
}

proptest! {
    #[test]
    fn prop_boundary_finds_last_token(body in balanced()) {
        let source = format!("({})", body);
        let tokens = tokenize(&source, "<prop>");
        prop_assert_eq!(boundary(&tokens), Some(tokens.len() - 1));
    }

    #[test]
    fn prop_missing_closer_is_structure_error(body in balanced()) {
        let source = format!("({}", body);
        let err = parse(&source, "<prop>").unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::Structure);
    }

    #[test]
    fn prop_display_reproduces_source(body in balanced()) {
        let source = format!("({})", body);
        prop_assert_eq!(render(&source), source);
    }
}
