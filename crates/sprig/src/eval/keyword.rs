//! Keyword-as-function: `(:key coll default?)`

use super::call::call_value;
use super::{head_location, Evaluate};
use crate::node::{Expression, Literal};
use crate::rules::Arity;
use crate::{Environment, EvalContext, EvalError, Value};

pub(super) fn eval_keyword(
    expr: &Expression,
    head: &Literal,
    env: &Environment,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    let location = head_location(expr);
    let get = env.get("get").ok_or_else(|| {
        EvalError::runtime(
            "unable to use a keyword as a function without a `get` function",
            location.clone(),
        )
    })?;

    let tail = expr.tail();
    Arity::Between(1, 2).check(tail.len()).map_err(|reason| {
        EvalError::structure(format!("{}: {}", head.token.text, reason), location.clone())
    })?;

    let collection = tail[0].eval(env, ctx)?;
    let key = Value::keyword(&head.token.text);
    let default = match tail.get(1) {
        Some(node) => node.eval(env, ctx)?,
        None => Value::Nil,
    };
    call_value(&get, vec![collection, key, default]).map_err(|e| e.or_at(location.as_ref()))
}
