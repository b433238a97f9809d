//! Sequencing and conditionals: `do`, `or`, `and`, `if`, `when`, `cond`

use super::{eval_body, head_location, validate, Evaluate};
use crate::node::Expression;
use crate::{Environment, EvalContext, EvalError, Value};

/// `(do body...)`
pub(super) fn eval_do(
    expr: &Expression,
    env: &Environment,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    eval_body(expr.tail(), env, ctx)
}

/// `(or forms...)`: first truthy value, else the last value; nil when empty.
pub(super) fn eval_or(
    expr: &Expression,
    env: &Environment,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    let mut result = Value::Nil;
    for node in expr.tail() {
        result = node.eval(env, ctx)?;
        if result.is_truthy() {
            return Ok(result);
        }
    }
    Ok(result)
}

/// `(and forms...)`: first falsy value, else the last value; true when empty.
pub(super) fn eval_and(
    expr: &Expression,
    env: &Environment,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    let mut result = Value::Bool(true);
    for node in expr.tail() {
        result = node.eval(env, ctx)?;
        if !result.is_truthy() {
            return Ok(result);
        }
    }
    Ok(result)
}

/// `(if cond then else?)`
pub(super) fn eval_if(
    expr: &Expression,
    env: &Environment,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    validate(ctx, "if", expr.tail(), &head_location(expr))?;
    let tail = expr.tail();

    if tail[0].eval(env, ctx)?.is_truthy() {
        tail[1].eval(env, ctx)
    } else if let Some(otherwise) = tail.get(2) {
        otherwise.eval(env, ctx)
    } else {
        Ok(Value::Nil)
    }
}

/// `(when cond body...)`
pub(super) fn eval_when(
    expr: &Expression,
    env: &Environment,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    validate(ctx, "when", expr.tail(), &head_location(expr))?;
    let tail = expr.tail();

    if tail[0].eval(env, ctx)?.is_truthy() {
        eval_body(&tail[1..], env, ctx)
    } else {
        Ok(Value::Nil)
    }
}

/// `(cond test result ...)`
pub(super) fn eval_cond(
    expr: &Expression,
    env: &Environment,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    if expr.tail().is_empty() {
        return Ok(Value::Nil);
    }
    validate(ctx, "cond", expr.tail(), &head_location(expr))?;

    for pair in expr.tail().chunks(2) {
        if let [test, result] = pair {
            if test.eval(env, ctx)?.is_truthy() {
                return result.eval(env, ctx);
            }
        }
    }
    Ok(Value::Nil)
}
