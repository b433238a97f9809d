//! Closure construction and invocation (`fn`, `defn`, `#(...)`)

use std::sync::Arc;

use super::{eval_body, head_location, identifier, validate};
use crate::node::{Expression, Node};
use crate::token::SourceLocation;
use crate::{Environment, EvalContext, EvalError, FunctionKind, FunctionValue, Params, Value};

/// Display name of functions built by `fn` and `#(...)`.
pub const ANONYMOUS: &str = "<anonymous function>";

/// Name under which keyword arguments are bound inside a call.
pub const KWARGS: &str = "kwargs";

/// `(fn [params...] body...)`
pub(super) fn eval_fn(
    expr: &Expression,
    env: &Environment,
    ctx: &EvalContext,
) -> Result<Value, EvalError> {
    let location = head_location(expr);
    validate(ctx, "fn", expr.tail(), &location)?;
    let tail = expr.tail();
    make_closure("fn", ANONYMOUS, &tail[0], &tail[1..], env, ctx, location)
}

/// Build a closure over `env` (captured by reference, not copied).
pub(super) fn make_closure(
    form: &str,
    name: &str,
    params: &Node,
    body: &[Node],
    env: &Environment,
    ctx: &EvalContext,
    location: Option<SourceLocation>,
) -> Result<Value, EvalError> {
    let list = params.as_expression().ok_or_else(|| {
        EvalError::structure(
            format!("{}: parameter list must be a form, got {}", form, params),
            params.location().cloned(),
        )
    })?;
    let params = parse_params(form, list, &location)?;

    Ok(Value::Function(Arc::new(FunctionValue {
        name: name.to_string(),
        kind: FunctionKind::Closure(params),
        body: Arc::new(body.to_vec()),
        env: env.clone(),
        ctx: ctx.clone(),
        location,
    })))
}

/// Split a parameter list on its optional `&` marker.
fn parse_params(
    form: &str,
    list: &Expression,
    location: &Option<SourceLocation>,
) -> Result<Params, EvalError> {
    let names = list
        .vector_items()
        .iter()
        .map(|node| identifier(form, node))
        .collect::<Result<Vec<_>, _>>()?;

    let mut ampersands = names
        .iter()
        .enumerate()
        .filter(|(_, name)| **name == "&")
        .map(|(idx, _)| idx);

    let Some(amp) = ampersands.next() else {
        return Ok(Params {
            positional: names.iter().map(|n| n.to_string()).collect(),
            rest: None,
        });
    };
    if ampersands.next().is_some() {
        return Err(EvalError::structure(
            format!("{}: only one '&' is allowed in a parameter list", form),
            location.clone(),
        ));
    }
    if amp + 1 == names.len() {
        return Err(EvalError::structure(
            format!("{}: '&' must be followed by a name for the extra arguments", form),
            location.clone(),
        ));
    }
    if amp + 2 != names.len() {
        return Err(EvalError::structure(
            format!("{}: only one name may follow '&'", form),
            location.clone(),
        ));
    }

    Ok(Params {
        positional: names[..amp].iter().map(|n| n.to_string()).collect(),
        rest: Some(names[amp + 1].to_string()),
    })
}

/// `#(...)`: a function whose body is the literal itself, read as a plain form.
pub(super) fn inline(expr: &Expression, env: &Environment, ctx: &EvalContext) -> Value {
    let mut body = Expression::new(expr.children.clone());
    body.location = expr.location.clone();

    Value::Function(Arc::new(FunctionValue {
        name: ANONYMOUS.to_string(),
        kind: FunctionKind::Inline,
        body: Arc::new(vec![Node::Expression(body)]),
        env: env.clone(),
        ctx: ctx.clone(),
        location: head_location(expr),
    }))
}

/// Call a user-defined function.
///
/// The call frame is a fresh copy of the captured environment, read at call
/// time, overlaid with the argument bindings. It is dropped on return.
pub(super) fn call_function(
    func: &FunctionValue,
    mut args: Vec<Value>,
    kwargs: Vec<(String, Value)>,
) -> Result<Value, EvalError> {
    let kwargs = Value::map_from_pairs(
        kwargs
            .into_iter()
            .map(|(name, value)| (Value::keyword(name), value)),
    )?;

    let mut bindings: Vec<(String, Value)> = Vec::with_capacity(args.len() + 2);
    match &func.kind {
        FunctionKind::Closure(params) => {
            params
                .arity()
                .check(args.len())
                .map_err(|reason| EvalError::Arity {
                    name: func.name.clone(),
                    message: reason,
                    location: func.location.clone(),
                })?;

            let extras = args.split_off(params.positional.len());
            bindings.extend(params.positional.iter().cloned().zip(args));
            if let Some(rest) = &params.rest {
                bindings.push((rest.clone(), Value::list(extras)));
            }
        }
        FunctionKind::Inline => {
            if let Some(first) = args.first() {
                bindings.push(("%".to_string(), first.clone()));
            }
            bindings.extend(
                args.into_iter()
                    .enumerate()
                    .map(|(idx, value)| (format!("%{}", idx + 1), value)),
            );
        }
    }
    bindings.push((KWARGS.to_string(), kwargs));

    let frame = func.env.overlay(bindings);
    eval_body(&func.body, &frame, &func.ctx)
}
