//! `try` / `catch`

use std::sync::Arc;

use super::{eval_body, head_location, identifier, validate, Evaluate};
use crate::error::type_name;
use crate::node::Expression;
use crate::{Environment, EvalContext, EvalError, Value};

/// `(try main (catch Class alias body...))`
///
/// `Class` is evaluated first and must be an error class. If `main` fails
/// with an error that class catches, the error is bound to `alias` in a local
/// copy of the environment and `body` runs there. Other errors propagate.
pub(super) fn eval_try(
    expr: &Expression,
    env: &Environment,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    let location = head_location(expr);
    validate(ctx, "try", expr.tail(), &location)?;
    let tail = expr.tail();

    let clause = tail[1].as_expression().ok_or_else(|| {
        EvalError::structure("try: second argument must be a catch clause", location.clone())
    })?;
    validate(ctx, "catch", &clause.children, &location)?;
    let children = &clause.children;

    let class = children[1].eval(env, ctx)?;
    let Value::ErrorClass(kind) = &class else {
        return Err(EvalError::type_error(
            format!(
                "catch: expected an error class, got '{}'",
                type_name(&class)
            ),
            children[1].location().cloned(),
        ));
    };
    let alias = identifier("catch", &children[2])?;

    match tail[0].eval(env, ctx) {
        Err(err) if kind.catches(err.kind()) => {
            let local = env.overlay([(alias.to_string(), Value::Exception(Arc::new(err)))]);
            eval_body(&children[3..], &local, ctx)
        }
        result => result,
    }
}
