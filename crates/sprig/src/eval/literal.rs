//! Literal evaluation and quoting

use super::Evaluate;
use crate::node::{Expression, Literal, Node};
use crate::token::{Token, TokenKind};
use crate::{Environment, EvalContext, EvalError, Value};

impl Evaluate for Literal {
    fn eval_form(
        &self,
        env: &Environment,
        _ctx: &EvalContext,
        _top_level: bool,
    ) -> Result<Value, EvalError> {
        if let Some(value) = constant(&self.token)? {
            return Ok(value);
        }
        if self.is_quoted() {
            return Ok(Value::symbol(self.token.text.clone()));
        }
        match self.token.kind {
            TokenKind::Identifier => env.get(&self.token.text).ok_or_else(|| {
                EvalError::name(
                    format!("name '{}' is not defined", self.token.text),
                    Some(self.token.location.clone()),
                )
            }),
            _ => Err(EvalError::structure(
                format!("unexpected token {}", self.token.text),
                Some(self.token.location.clone()),
            )),
        }
    }
}

/// The value of a self-evaluating token, or `None` if it needs the environment.
fn constant(token: &Token) -> Result<Option<Value>, EvalError> {
    let value = match token.kind {
        TokenKind::Number => token.text.parse::<i64>().map(Value::I64).map_err(|_| {
            EvalError::structure(
                format!("integer literal out of range: {}", token.text),
                Some(token.location.clone()),
            )
        })?,
        TokenKind::String => Value::string(token.text.clone()),
        TokenKind::Nil => Value::Nil,
        TokenKind::Boolean => Value::Bool(token.text == "true"),
        TokenKind::Keyword => Value::keyword(&token.text),
        TokenKind::Identifier
        | TokenKind::Quote
        | TokenKind::OpeningBracket
        | TokenKind::ClosingBracket => return Ok(None),
    };
    Ok(Some(value))
}

/// Turn a node into data without evaluating it.
fn quote(node: &Node) -> Result<Value, EvalError> {
    match node {
        Node::Literal(lit) => Ok(constant(&lit.token)?
            .unwrap_or_else(|| Value::symbol(lit.token.text.clone()))),
        Node::Expression(expr) => quote_expression(expr),
    }
}

/// A quoted expression evaluates to the list of its quoted children.
pub(super) fn quote_expression(expr: &Expression) -> Result<Value, EvalError> {
    expr.children
        .iter()
        .map(quote)
        .collect::<Result<Vec<_>, _>>()
        .map(Value::list)
}
