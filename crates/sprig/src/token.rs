//! Tokens produced by the lexer

use std::fmt;

/// Source code location for error reporting.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    /// File name or identifier
    pub file: String,

    /// Line number (1-indexed)
    pub line: usize,

    /// Column number (1-indexed)
    pub column: usize,
}

impl SourceLocation {
    /// Create a new source location.
    pub fn new(file: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// The lexical category of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Integer literal, optionally signed: `42`, `-7`
    Number,
    /// Plain identifier: `defn`, `+`, `.upper`
    Identifier,
    /// String literal (text holds the unescaped contents)
    String,
    /// `nil`
    Nil,
    /// `true` or `false`
    Boolean,
    /// Identifier-shaped token beginning with `:`
    Keyword,
    /// The `'` prefix
    Quote,
    /// `(`, `#(`, and the opening half of `{` / `[`
    OpeningBracket,
    /// `)`, `}` or `]`
    ClosingBracket,
}

/// A single lexical unit.
///
/// Tokens are immutable once the lexer has produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Token category
    pub kind: TokenKind,

    /// Literal text (for strings, the unescaped contents)
    pub text: String,

    /// Where the token starts
    pub location: SourceLocation,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, text: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            text: text.into(),
            location,
        }
    }

    /// Check whether this token is an identifier with exactly the given text.
    pub fn is_identifier(&self, text: &str) -> bool {
        self.kind == TokenKind::Identifier && self.text == text
    }

    /// Check whether this opening bracket introduces an inline function literal.
    pub fn opens_inline_fn(&self) -> bool {
        self.kind == TokenKind::OpeningBracket && self.text == "#("
    }
}
