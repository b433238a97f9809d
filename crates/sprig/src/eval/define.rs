//! Top-level definitions: `def`, `def?`, `defn`, `defn?`, `import`, `require`

use super::call::call_value;
use super::{function, head_location, identifier, validate, Evaluate};
use crate::modules::{IMPORT, REQUIRE};
use crate::node::Expression;
use crate::{Environment, EvalContext, EvalError, Value};

/// `(def name value)` / `(def? name value)`
///
/// `def` always overwrites. `def?` returns the existing binding untouched,
/// without evaluating `value`.
pub(super) fn eval_def(
    expr: &Expression,
    env: &Environment,
    ctx: &EvalContext,
    once: bool,
) -> Result<Value, EvalError> {
    let form = if once { "def?" } else { "def" };
    validate(ctx, form, expr.tail(), &head_location(expr))?;
    let tail = expr.tail();
    let name = identifier(form, &tail[0])?;

    if once {
        if let Some(existing) = env.get(name) {
            return Ok(existing);
        }
    }

    let value = tail[1].eval(env, ctx)?;
    env.define(name, value.clone());
    Ok(value)
}

/// `(defn name [params...] body...)` / `(defn? ...)`
pub(super) fn eval_defn(
    expr: &Expression,
    env: &Environment,
    ctx: &EvalContext,
    once: bool,
) -> Result<Value, EvalError> {
    let form = if once { "defn?" } else { "defn" };
    let location = head_location(expr);
    validate(ctx, form, expr.tail(), &location)?;
    let tail = expr.tail();
    let name = identifier(form, &tail[0])?;

    if once {
        if let Some(existing) = env.get(name) {
            return Ok(existing);
        }
    }

    let func = function::make_closure(form, name, &tail[1], &tail[2..], env, ctx, location)?;
    env.define(name, func.clone());
    Ok(func)
}

/// Which resolver a module form goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Resolver {
    /// `(import a.b.c)` binds `c`
    Import,
    /// `(require a/b/c)` binds `c`
    Require,
}

impl Resolver {
    fn form(&self) -> &'static str {
        match self {
            Resolver::Import => "import",
            Resolver::Require => "require",
        }
    }

    fn builtin(&self) -> &'static str {
        match self {
            Resolver::Import => IMPORT,
            Resolver::Require => REQUIRE,
        }
    }

    fn separator(&self) -> char {
        match self {
            Resolver::Import => '.',
            Resolver::Require => '/',
        }
    }
}

/// `(import path)` / `(require path)`: bind the resolved module under the
/// last segment of its path. Returns nil.
pub(super) fn eval_module(
    expr: &Expression,
    env: &Environment,
    ctx: &EvalContext,
    resolver: Resolver,
) -> Result<Value, EvalError> {
    let form = resolver.form();
    let location = head_location(expr);
    validate(ctx, form, expr.tail(), &location)?;
    let path = identifier(form, &expr.tail()[0])?;

    let resolve = env.get(resolver.builtin()).ok_or_else(|| {
        EvalError::runtime(
            format!("{}: no `{}` resolver is installed", form, resolver.builtin()),
            location.clone(),
        )
    })?;
    let module = call_value(&resolve, vec![Value::string(path)])
        .map_err(|e| e.or_at(location.as_ref()))?;

    let alias = path.rsplit(resolver.separator()).next().unwrap_or(path);
    env.define(alias, module);
    Ok(Value::Nil)
}
