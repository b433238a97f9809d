//! Single-pass tokenizer
//!
//! Turns source text into a flat sequence of [`Token`]s. Tokenizing never
//! fails: characters that start no token are skipped.
//!
//! Bracket sugar is expanded here: `{` becomes `(` followed by the identifier
//! `dicty`, and `[` becomes `(` followed by `listy`.

use tracing::debug;

use crate::token::{SourceLocation, Token, TokenKind};

/// Characters that may start or continue an identifier besides ASCII letters.
pub const ALPHABET: &[char] = &[
    '+', '-', '*', '/', '=', '<', '>', '?', '!', '.', '_', '&', ':', '^', '%',
];

/// Tokenize `source`, attributing positions to `source_name`.
pub fn tokenize(source: &str, source_name: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(source, source_name);
    lexer.lex();
    lexer.tokens
}

struct Lexer<'a> {
    chars: Vec<char>,
    file: &'a str,
    pointer: usize,
    line: usize,
    column: usize,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn new(source: &str, file: &'a str) -> Self {
        Self {
            chars: source.chars().collect(),
            file,
            pointer: 0,
            line: 1,
            column: 1,
            tokens: Vec::new(),
        }
    }

    fn lex(&mut self) {
        while let Some(c) = self.current() {
            match c {
                '#' if self.peek() == Some('(') => {
                    let location = self.location();
                    self.advance();
                    self.advance();
                    self.emit(TokenKind::OpeningBracket, "#(", location);
                }
                ';' | '#' => self.skip_comment(),
                c if c.is_ascii_digit() => self.lex_number(),
                '+' | '-' if self.peek().is_some_and(|n| n.is_ascii_digit()) => self.lex_number(),
                c if is_identifier_char(c) => self.lex_identifier(),
                '"' => self.lex_string(),
                '\'' => self.single(TokenKind::Quote, "'"),
                '(' => self.single(TokenKind::OpeningBracket, "("),
                ')' | '}' | ']' => self.single(TokenKind::ClosingBracket, ")"),
                '{' => self.sugar("dicty"),
                '[' => self.sugar("listy"),
                c if c.is_whitespace() => self.advance(),
                other => {
                    debug!(character = ?other, line = self.line, column = self.column, "skipping character");
                    self.advance();
                }
            }
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Token Rules
    // ═══════════════════════════════════════════════════════════════════

    fn skip_comment(&mut self) {
        while let Some(c) = self.current() {
            self.advance();
            if c == '\n' {
                return;
            }
        }
    }

    fn lex_number(&mut self) {
        let location = self.location();
        let mut text = String::new();
        // the sign (or first digit) is always taken
        if let Some(c) = self.current() {
            text.push(c);
            self.advance();
        }
        while let Some(c) = self.current().filter(char::is_ascii_digit) {
            text.push(c);
            self.advance();
        }
        self.emit(TokenKind::Number, text, location);
    }

    fn lex_identifier(&mut self) {
        let location = self.location();
        let mut text = String::new();
        while let Some(c) = self
            .current()
            .filter(|c| is_identifier_char(*c) || c.is_ascii_digit())
        {
            text.push(c);
            self.advance();
        }
        let kind = match text.as_str() {
            "nil" => TokenKind::Nil,
            "true" | "false" => TokenKind::Boolean,
            t if t.starts_with(':') => TokenKind::Keyword,
            _ => TokenKind::Identifier,
        };
        self.emit(kind, text, location);
    }

    fn lex_string(&mut self) {
        let location = self.location();
        self.advance(); // opening quote
        let mut text = String::new();
        loop {
            let Some(c) = self.current() else {
                debug!(%location, "dropping unterminated string literal");
                return;
            };
            self.advance();
            match c {
                '"' => break,
                '\\' => {
                    // unknown escapes consume the escaped character and append nothing
                    if let Some(escaped) = self.current() {
                        self.advance();
                        match escaped {
                            'n' => text.push('\n'),
                            '"' => text.push('"'),
                            _ => {}
                        }
                    }
                }
                other => text.push(other),
            }
        }
        self.emit(TokenKind::String, text, location);
    }

    fn single(&mut self, kind: TokenKind, text: &str) {
        let location = self.location();
        self.advance();
        self.emit(kind, text, location);
    }

    fn sugar(&mut self, constructor: &str) {
        let location = self.location();
        self.advance();
        self.emit(TokenKind::OpeningBracket, "(", location.clone());
        self.emit(TokenKind::Identifier, constructor, location);
    }

    // ═══════════════════════════════════════════════════════════════════
    // Cursor
    // ═══════════════════════════════════════════════════════════════════

    fn current(&self) -> Option<char> {
        self.chars.get(self.pointer).copied()
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pointer + 1).copied()
    }

    /// Consume one character, keeping line and column in step.
    fn advance(&mut self) {
        if let Some(c) = self.current() {
            self.pointer += 1;
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }

    fn location(&self) -> SourceLocation {
        SourceLocation::new(self.file, self.line, self.column)
    }

    fn emit(&mut self, kind: TokenKind, text: impl Into<String>, location: SourceLocation) {
        self.tokens.push(Token::new(kind, text, location));
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphabetic() || ALPHABET.contains(&c)
}
