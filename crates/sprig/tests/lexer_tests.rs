use pretty_assertions::assert_eq;
use sprig::*;

fn shape(source: &str) -> Vec<(TokenKind, String)> {
    tokenize(source, "<test>")
        .into_iter()
        .map(|t| (t.kind, t.text))
        .collect()
}

fn tok(kind: TokenKind, text: &str) -> (TokenKind, String) {
    (kind, text.to_string())
}

// ═══════════════════════════════════════════════════════════════════════
// Token Sequences
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_simple_call() {
    assert_eq!(
        shape("(+ 1 2)"),
        vec![
            tok(TokenKind::OpeningBracket, "("),
            tok(TokenKind::Identifier, "+"),
            tok(TokenKind::Number, "1"),
            tok(TokenKind::Number, "2"),
            tok(TokenKind::ClosingBracket, ")"),
        ]
    );
}

#[test]
fn test_columns_strictly_increase_on_one_line() {
    let tokens = tokenize("(+ 1 2)", "<test>");
    assert!(tokens.iter().all(|t| t.location.line == 1));
    let columns: Vec<usize> = tokens.iter().map(|t| t.location.column).collect();
    assert_eq!(columns, vec![1, 2, 4, 6, 7]);
    assert!(columns.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn test_positions_never_decrease() {
    let tokens = tokenize("(defn f [x]\n  ; note\n  (+ x 1))\n", "prog.sp");
    let positions: Vec<(usize, usize)> = tokens
        .iter()
        .map(|t| (t.location.line, t.location.column))
        .collect();
    assert!(positions.windows(2).all(|w| w[0] <= w[1]));
    assert!(tokens.iter().all(|t| t.location.file == "prog.sp"));
}

#[test]
fn test_line_comment_is_elided() {
    assert_eq!(shape("; comment\n(+ 1 2)"), shape("(+ 1 2)"));
    assert_eq!(shape("# comment\n(+ 1 2)"), shape("(+ 1 2)"));
}

#[test]
fn test_comment_advances_line() {
    let tokens = tokenize("; comment\n(+ 1 2)", "<test>");
    assert_eq!(tokens[0].location, SourceLocation::new("<test>", 2, 1));
}

// ═══════════════════════════════════════════════════════════════════════
// Bracket Sugar
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_curly_bracket_sugar() {
    assert_eq!(shape("{:a 1}"), shape("(dicty :a 1)"));
}

#[test]
fn test_square_bracket_sugar() {
    assert_eq!(shape("[1 2]"), shape("(listy 1 2)"));
}

#[test]
fn test_all_closers_are_plain() {
    let kinds: Vec<TokenKind> = tokenize(")]}", "<test>").iter().map(|t| t.kind).collect();
    assert_eq!(kinds, vec![TokenKind::ClosingBracket; 3]);
}

// ═══════════════════════════════════════════════════════════════════════
// Literals
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_keywords_and_specials() {
    assert_eq!(
        shape("nil true :name 'x"),
        vec![
            tok(TokenKind::Nil, "nil"),
            tok(TokenKind::Boolean, "true"),
            tok(TokenKind::Keyword, ":name"),
            tok(TokenKind::Quote, "'"),
            tok(TokenKind::Identifier, "x"),
        ]
    );
}

#[test]
fn test_threading_heads_are_identifiers() {
    assert_eq!(
        shape("-> ->> ... .upper def? &"),
        vec![
            tok(TokenKind::Identifier, "->"),
            tok(TokenKind::Identifier, "->>"),
            tok(TokenKind::Identifier, "..."),
            tok(TokenKind::Identifier, ".upper"),
            tok(TokenKind::Identifier, "def?"),
            tok(TokenKind::Identifier, "&"),
        ]
    );
}

#[test]
fn test_string_keeps_spaces_and_brackets() {
    assert_eq!(
        shape(r#"(print "a (b) ; c")"#),
        vec![
            tok(TokenKind::OpeningBracket, "("),
            tok(TokenKind::Identifier, "print"),
            tok(TokenKind::String, "a (b) ; c"),
            tok(TokenKind::ClosingBracket, ")"),
        ]
    );
}
