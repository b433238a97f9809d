//! Tree builder: tokens to wood
//!
//! Tokens are read in one pass. Each opening bracket pushes a frame that
//! collects children until its matching closing bracket pops it back into the
//! enclosing frame, so nesting depth costs heap, not host stack. Prefixes
//! never produce nodes of their own: `'` and `^name` queue properties that
//! are attached to whichever node comes next.

use crate::context::DEFAULT_MAX_DEPTH;
use crate::error::ParseError;
use crate::lexer::tokenize;
use crate::node::{Expression, Literal, Node, Wood, QUOTED};
use crate::token::{SourceLocation, Token, TokenKind};

/// Tokenize and build `source` in one step.
pub fn parse(source: &str, source_name: &str) -> Result<Wood, ParseError> {
    build(&tokenize(source, source_name))
}

/// Build the wood for a token sequence.
///
/// Empty input yields an empty wood. Brackets may nest up to
/// [`DEFAULT_MAX_DEPTH`] levels.
///
/// # Errors
///
/// Returns a `ParseError` for unbalanced brackets, nesting past the limit or
/// an empty `^` property.
pub fn build(tokens: &[Token]) -> Result<Wood, ParseError> {
    build_with_limit(tokens, DEFAULT_MAX_DEPTH)
}

/// Build the wood, rejecting brackets nested deeper than `max_nesting`.
pub fn build_with_limit(tokens: &[Token], max_nesting: usize) -> Result<Wood, ParseError> {
    let mut root = Frame::default();
    let mut open: Vec<Frame> = Vec::new();

    for token in tokens {
        match token.kind {
            TokenKind::OpeningBracket => {
                if open.len() >= max_nesting {
                    return Err(ParseError::new(format!(
                        "brackets nested deeper than {} levels",
                        max_nesting
                    ))
                    .with_location(token.location.clone()));
                }
                let properties = std::mem::take(&mut current(&mut root, &mut open).pending);
                open.push(Frame::opened(token, properties));
            }
            TokenKind::ClosingBracket => {
                let Some(frame) = open.pop() else {
                    return Err(ParseError::new("unbalanced brackets: unexpected closing bracket")
                        .with_location(token.location.clone()));
                };
                let node = Node::Expression(frame.close());
                current(&mut root, &mut open).children.push(node);
            }
            TokenKind::Quote => {
                current(&mut root, &mut open).pending.push(QUOTED.to_string());
            }
            TokenKind::Identifier if token.text.starts_with('^') => {
                let property = &token.text[1..];
                if property.is_empty() {
                    return Err(ParseError::new("property marker `^` must be followed by a name")
                        .with_location(token.location.clone()));
                }
                current(&mut root, &mut open).pending.push(property.to_string());
            }
            _ => {
                let frame = current(&mut root, &mut open);
                let literal = Literal::new(token.clone())
                    .with_properties(std::mem::take(&mut frame.pending));
                frame.children.push(Node::Literal(literal));
            }
        }
    }

    // The outermost bracket still open is the one never closed
    if let Some(unclosed) = open.into_iter().next() {
        let error = ParseError::new("unbalanced brackets: this bracket is never closed");
        return Err(match unclosed.location {
            Some(location) => error.with_location(location),
            None => error,
        });
    }
    Ok(root.children)
}

/// Find the index of the closing bracket matching `tokens[0]`.
///
/// Returns `None` if `tokens` does not start with an opening bracket or the
/// bracket is never closed.
pub fn boundary(tokens: &[Token]) -> Option<usize> {
    if tokens.first()?.kind != TokenKind::OpeningBracket {
        return None;
    }
    let mut depth = 0usize;
    for (idx, token) in tokens.iter().enumerate() {
        match token.kind {
            TokenKind::OpeningBracket => depth += 1,
            TokenKind::ClosingBracket => {
                depth -= 1;
                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

/// An expression under construction (or the top level, with no bracket).
#[derive(Default)]
struct Frame {
    location: Option<SourceLocation>,
    inline_fn: bool,
    properties: Vec<String>,
    children: Vec<Node>,
    pending: Vec<String>,
}

impl Frame {
    fn opened(token: &Token, properties: Vec<String>) -> Self {
        Self {
            location: Some(token.location.clone()),
            inline_fn: token.opens_inline_fn(),
            properties,
            ..Self::default()
        }
    }

    /// Properties queued right before the closing bracket are dropped.
    fn close(self) -> Expression {
        let mut expression = Expression::new(self.children)
            .with_properties(self.properties)
            .inline(self.inline_fn);
        expression.location = self.location;
        expression
    }
}

fn current<'a>(root: &'a mut Frame, open: &'a mut [Frame]) -> &'a mut Frame {
    match open.last_mut() {
        Some(frame) => frame,
        None => root,
    }
}
