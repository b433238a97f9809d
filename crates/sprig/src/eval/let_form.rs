//! `let` bindings and destructuring

use super::call::call_value;
use super::{eval_body, head_location, identifier, validate, Evaluate};
use crate::node::{Expression, Node};
use crate::token::SourceLocation;
use crate::{Environment, EvalContext, EvalError, Value};

/// `(let [target value ...] body...)`
///
/// Bindings are applied in order to one local copy of `env`; each right-hand
/// side sees the bindings before it.
pub(super) fn eval_let(
    expr: &Expression,
    env: &Environment,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    let location = head_location(expr);
    validate(ctx, "let", expr.tail(), &location)?;
    let tail = expr.tail();

    let bindings = tail[0].as_expression().ok_or_else(|| {
        EvalError::structure("let: bindings must be a form", location.clone())
    })?;

    let local = env.snapshot();
    for pair in bindings.vector_items().chunks(2) {
        let [target, value] = pair else {
            return Err(EvalError::structure(
                "let: every binding target needs a value",
                location,
            ));
        };
        let computed = value.eval(&local, ctx)?;
        match target {
            Node::Expression(pattern) => destructure(pattern, computed, &local, &location)?,
            Node::Literal(_) => local.define(identifier("let", target)?, computed),
        }
    }

    eval_body(&tail[1..], &local, ctx)
}

/// Bind each name in `pattern` to a part of `value`, fetched with `get`.
///
/// `{a b}` looks up the keys `:a` and `:b`; `[a b]` (or a bare form) takes
/// items by position.
fn destructure(
    pattern: &Expression,
    value: Value,
    local: &Environment,
    location: &Option<SourceLocation>,
) -> Result<(), EvalError> {
    let get = local.get("get").ok_or_else(|| {
        EvalError::runtime(
            "let: destructuring requires a `get` function",
            location.clone(),
        )
    })?;

    let (by_key, names) = if pattern.is_dict_literal() {
        (true, pattern.tail())
    } else {
        (false, pattern.vector_items())
    };

    for (idx, node) in names.iter().enumerate() {
        let name = identifier("let", node)?;
        let key = if by_key {
            Value::keyword(name)
        } else {
            Value::I64(idx as i64)
        };
        let item = call_value(&get, vec![value.clone(), key, Value::Nil])
            .map_err(|e| e.or_at(location.as_ref()))?;
        local.define(name, item);
    }
    Ok(())
}
