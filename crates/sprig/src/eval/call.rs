//! Function call evaluation

use super::{function, head_location, Evaluate};
use crate::error::{type_name, ErrorKind};
use crate::node::{Expression, Node};
use crate::rules::Arity;
use crate::{BuiltinFn, Environment, EvalContext, EvalError, Value};

/// Evaluate `nodes` left to right.
pub(super) fn eval_args(
    nodes: &[Node],
    env: &Environment,
    ctx: &EvalContext,
) -> Result<Vec<Value>, EvalError> {
    nodes.iter().map(|node| node.eval(env, ctx)).collect()
}

/// Invoke `callee` with the evaluated tail of `expr`.
pub(super) fn eval_call(
    expr: &Expression,
    callee: &Value,
    env: &Environment,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    let location = head_location(expr);

    // Checked here, not at build time, so quoted dict forms stay valid data
    if expr.is_dict_literal() && expr.tail().len() % 2 != 0 {
        return Err(EvalError::structure(
            "dicty: every key must be followed by a value",
            location,
        ));
    }

    let args = eval_args(expr.tail(), env, ctx)?;
    call_value(callee, args).map_err(|e| e.or_at(location.as_ref()))
}

/// Call a Value as a function.
///
/// # Errors
///
/// Returns a `TypeError` if the value is not callable.
/// Returns `ArityError` if the argument count doesn't match.
pub fn call_value(func: &Value, args: Vec<Value>) -> Result<Value, EvalError> {
    call_value_with_kwargs(func, args, Vec::new())
}

/// Call a Value as a function, passing keyword arguments.
///
/// User functions see the keyword arguments as a dict bound to `kwargs`,
/// keyed by keywords. Builtins take none.
pub fn call_value_with_kwargs(
    func: &Value,
    args: Vec<Value>,
    kwargs: Vec<(String, Value)>,
) -> Result<Value, EvalError> {
    match func {
        Value::Function(f) => function::call_function(f, args, kwargs),
        Value::BuiltinFn(b) if kwargs.is_empty() => call_builtin(b, args),
        Value::BuiltinFn(b) => Err(EvalError::raised(
            ErrorKind::Type,
            format!("{}() takes no keyword arguments", b.name),
        )),
        other => Err(EvalError::raised(
            ErrorKind::Type,
            format!("'{}' object is not callable", type_name(other)),
        )),
    }
}

/// Call a built-in function.
fn call_builtin(func: &BuiltinFn, args: Vec<Value>) -> Result<Value, EvalError> {
    // Check arity (if not variadic)
    if let Ok(expected) = usize::try_from(func.arity) {
        Arity::Exactly(expected)
            .check(args.len())
            .map_err(|reason| EvalError::Arity {
                name: func.name.clone(),
                message: reason,
                location: None,
            })?;
    }

    // Call the native function
    (func.func)(&args)
}
