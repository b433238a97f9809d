//! Dot-form method calls: `(.method object args...)`

use super::call::eval_args;
use super::{head_location, validate, Evaluate};
use crate::node::Expression;
use crate::value::methods;
use crate::{Environment, EvalContext, EvalError, Value};

/// Whether `name` heads a dot-form. The ellipsis `...` does not.
pub(super) fn is_dot_form(name: &str) -> bool {
    name.starts_with('.') && name != "..."
}

pub(super) fn eval_dot(
    expr: &Expression,
    name: &str,
    env: &Environment,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    let location = head_location(expr);
    let method = &name[1..];
    if method.is_empty() {
        return Err(EvalError::structure(
            "dot-form: method name is mandatory",
            location,
        ));
    }
    validate(ctx, "dot-form", expr.tail(), &location)?;
    let tail = expr.tail();

    let receiver = tail[0].eval(env, ctx)?;
    let Some(class) = receiver.class_name() else {
        return Err(EvalError::type_error(
            format!(
                "dot-form: {:?} has no class identity; call module members as (.member module ...)",
                receiver
            ),
            location,
        ));
    };
    let missing = || {
        EvalError::name(
            format!("an '{}' object has no method '{}'", class, method),
            location.clone(),
        )
    };

    let result = match &receiver {
        Value::Object(obj) => {
            if !obj.has_method(method) {
                return Err(missing());
            }
            let args = eval_args(&tail[1..], env, ctx)?;
            obj.call_method(method, &args)
        }
        _ => {
            let native = methods::lookup(&receiver, method).ok_or_else(missing)?;
            let args = eval_args(&tail[1..], env, ctx)?;
            native(&receiver, &args)
        }
    };
    result.map_err(|e| e.or_at(location.as_ref()))
}
