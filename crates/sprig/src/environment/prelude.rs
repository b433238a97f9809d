//! Standard prelude with built-in functions

use std::cmp::Ordering;

use super::Environment;
use crate::error::{type_name, ErrorKind, EvalError};
use crate::eval::call_value;
use crate::rules::Arity;
use crate::value::{BuiltinFn, HashableValue, Value};

impl Environment {
    /// Create an environment with standard built-in functions.
    pub fn with_prelude() -> Self {
        let env = Self::new();
        env.load_prelude();
        env
    }

    /// Load the standard prelude into this environment.
    pub fn load_prelude(&self) {
        // Arithmetic
        self.define_builtin(BuiltinFn::new("+", -1, builtin_add));
        self.define_builtin(BuiltinFn::new("-", -1, builtin_sub));
        self.define_builtin(BuiltinFn::new("*", -1, builtin_mul));
        self.define_builtin(BuiltinFn::new("/", -1, builtin_div));
        self.define_builtin(BuiltinFn::new("mod", -1, builtin_mod));

        // Comparison and logic
        self.define_builtin(BuiltinFn::new("=", -1, builtin_eq));
        self.define_builtin(BuiltinFn::new("<", -1, |args| compare_chain("<", args)));
        self.define_builtin(BuiltinFn::new(">", -1, |args| compare_chain(">", args)));
        self.define_builtin(BuiltinFn::new("<=", -1, |args| compare_chain("<=", args)));
        self.define_builtin(BuiltinFn::new(">=", -1, |args| compare_chain(">=", args)));
        self.define_builtin(BuiltinFn::new("not", 1, |args| {
            Ok(Value::Bool(!args[0].is_truthy()))
        }));

        // Collections
        self.define_builtin(BuiltinFn::new("listy", -1, |args| Ok(Value::list(args.to_vec()))));
        self.define_builtin(BuiltinFn::new("dicty", -1, builtin_dicty));
        self.define_builtin(BuiltinFn::new("get", -1, builtin_get));
        self.define_builtin(BuiltinFn::new("count", 1, builtin_count));

        // Printing
        self.define_builtin(BuiltinFn::new("print", -1, builtin_print));
        self.define_builtin(BuiltinFn::new("println", -1, builtin_print));
        self.define_builtin(BuiltinFn::new("prn", -1, builtin_print));
        self.define_builtin(BuiltinFn::new("str", -1, builtin_str));

        // Functions and types
        self.define_builtin(BuiltinFn::new("apply", 2, builtin_apply));
        self.define_builtin(BuiltinFn::new("type", 1, |args| {
            Ok(Value::string(type_name(&args[0])))
        }));
        self.define_builtin(BuiltinFn::new("throw", 2, builtin_throw));

        // Error classes
        for kind in ErrorKind::ALL {
            if kind != ErrorKind::Interrupt {
                self.define(kind.name(), Value::ErrorClass(kind));
            }
        }
    }
}

fn type_error(message: impl Into<String>) -> EvalError {
    EvalError::raised(ErrorKind::Type, message)
}

// ═══════════════════════════════════════════════════════════════════════
// Arithmetic
// ═══════════════════════════════════════════════════════════════════════

/// Fold `args` left to right with `op`; a single argument is returned as-is.
fn reduce(
    name: &str,
    args: &[Value],
    op: fn(&Value, &Value) -> Result<Value, EvalError>,
) -> Result<Value, EvalError> {
    let (first, rest) = args
        .split_first()
        .ok_or_else(|| type_error(format!("{} expects at least 1 argument, got 0", name)))?;
    rest.iter().try_fold(first.clone(), |acc, cur| op(&acc, cur))
}

fn unsupported(op: &str, a: &Value, b: &Value) -> EvalError {
    type_error(format!(
        "unsupported operand type(s) for {}: '{}' and '{}'",
        op,
        type_name(a),
        type_name(b)
    ))
}

fn overflow(op: &str) -> EvalError {
    EvalError::raised(ErrorKind::Arithmetic, format!("integer overflow in {}", op))
}

/// Apply an integer op with overflow checking, or a float op if either side is a float.
fn numeric(
    op: &str,
    a: &Value,
    b: &Value,
    int_op: fn(i64, i64) -> Option<i64>,
    float_op: fn(f64, f64) -> f64,
) -> Result<Value, EvalError> {
    match (a, b) {
        (Value::I64(x), Value::I64(y)) => int_op(*x, *y).map(Value::I64).ok_or_else(|| overflow(op)),
        _ => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => Ok(Value::F64(float_op(x, y))),
            _ => Err(unsupported(op, a, b)),
        },
    }
}

fn add(a: &Value, b: &Value) -> Result<Value, EvalError> {
    match (a, b) {
        (Value::String(x), Value::String(y)) => Ok(Value::string(format!("{}{}", x, y))),
        (Value::List(x), Value::List(y)) => {
            let mut items = x.as_ref().clone();
            items.extend(y.iter().cloned());
            Ok(Value::list(items))
        }
        _ => numeric("+", a, b, i64::checked_add, |x, y| x + y),
    }
}

fn sub(a: &Value, b: &Value) -> Result<Value, EvalError> {
    numeric("-", a, b, i64::checked_sub, |x, y| x - y)
}

fn mul(a: &Value, b: &Value) -> Result<Value, EvalError> {
    numeric("*", a, b, i64::checked_mul, |x, y| x * y)
}

fn div(a: &Value, b: &Value) -> Result<Value, EvalError> {
    match (a.as_f64(), b.as_f64()) {
        (Some(_), Some(y)) if y == 0.0 => {
            Err(EvalError::raised(ErrorKind::ZeroDivision, "division by zero"))
        }
        (Some(x), Some(y)) => Ok(Value::F64(x / y)),
        _ => Err(unsupported("/", a, b)),
    }
}

/// Modulo with the sign of the divisor.
fn modulo(a: &Value, b: &Value) -> Result<Value, EvalError> {
    match (a, b) {
        (Value::I64(_), Value::I64(0)) => Err(EvalError::raised(
            ErrorKind::ZeroDivision,
            "integer modulo by zero",
        )),
        (Value::I64(x), Value::I64(y)) => {
            let r = x.checked_rem(*y).ok_or_else(|| overflow("mod"))?;
            if r != 0 && (r < 0) != (*y < 0) {
                Ok(Value::I64(r + y))
            } else {
                Ok(Value::I64(r))
            }
        }
        _ => match (a.as_f64(), b.as_f64()) {
            (Some(_), Some(y)) if y == 0.0 => {
                Err(EvalError::raised(ErrorKind::ZeroDivision, "float modulo"))
            }
            (Some(x), Some(y)) => {
                let r = x % y;
                if r != 0.0 && (r < 0.0) != (y < 0.0) {
                    Ok(Value::F64(r + y))
                } else {
                    Ok(Value::F64(r))
                }
            }
            _ => Err(unsupported("mod", a, b)),
        },
    }
}

fn builtin_add(args: &[Value]) -> Result<Value, EvalError> {
    reduce("+", args, add)
}

fn builtin_sub(args: &[Value]) -> Result<Value, EvalError> {
    reduce("-", args, sub)
}

fn builtin_mul(args: &[Value]) -> Result<Value, EvalError> {
    reduce("*", args, mul)
}

fn builtin_div(args: &[Value]) -> Result<Value, EvalError> {
    reduce("/", args, div)
}

fn builtin_mod(args: &[Value]) -> Result<Value, EvalError> {
    reduce("mod", args, modulo)
}

// ═══════════════════════════════════════════════════════════════════════
// Comparison
// ═══════════════════════════════════════════════════════════════════════

fn builtin_eq(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::Bool(args.windows(2).all(|pair| pair[0] == pair[1])))
}

fn order(op: &str, a: &Value, b: &Value) -> Result<Option<Ordering>, EvalError> {
    match (a, b) {
        (Value::String(x), Value::String(y)) => Ok(Some(x.cmp(y))),
        _ => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => Ok(x.partial_cmp(&y)),
            _ => Err(type_error(format!(
                "'{}' not supported between instances of '{}' and '{}'",
                op,
                type_name(a),
                type_name(b)
            ))),
        },
    }
}

fn compare_chain(op: &str, args: &[Value]) -> Result<Value, EvalError> {
    if args.is_empty() {
        return Err(type_error(format!("{} expects at least 1 argument, got 0", op)));
    }
    for pair in args.windows(2) {
        let holds = match order(op, &pair[0], &pair[1])? {
            Some(ordering) => match op {
                "<" => ordering == Ordering::Less,
                ">" => ordering == Ordering::Greater,
                "<=" => ordering != Ordering::Greater,
                _ => ordering != Ordering::Less,
            },
            None => false,
        };
        if !holds {
            return Ok(Value::Bool(false));
        }
    }
    Ok(Value::Bool(true))
}

// ═══════════════════════════════════════════════════════════════════════
// Collections
// ═══════════════════════════════════════════════════════════════════════

fn builtin_dicty(args: &[Value]) -> Result<Value, EvalError> {
    if args.len() % 2 != 0 {
        return Err(EvalError::raised(
            ErrorKind::Value,
            format!("dicty expects an even number of arguments, got {}", args.len()),
        ));
    }
    Value::map_from_pairs(
        args.chunks(2)
            .map(|pair| (pair[0].clone(), pair[1].clone())),
    )
}

/// `(get coll key [default])`: index into a list or string, look up a dict key.
///
/// Missing keys, out-of-range indices and nil collections yield the default.
fn builtin_get(args: &[Value]) -> Result<Value, EvalError> {
    Arity::Between(2, 3)
        .check(args.len())
        .map_err(|reason| EvalError::Arity {
            name: "get".to_string(),
            message: reason,
            location: None,
        })?;
    let default = args.get(2).cloned().unwrap_or(Value::Nil);
    let (coll, key) = (&args[0], &args[1]);
    let index = key.as_i64().and_then(|i| usize::try_from(i).ok());

    let found = match coll {
        Value::List(items) => index.and_then(|i| items.get(i).cloned()),
        Value::String(s) => index
            .and_then(|i| s.chars().nth(i))
            .map(|c| Value::string(c.to_string())),
        Value::Map(entries) if HashableValue::is_hashable(key) => {
            entries.get(&HashableValue(key.clone())).cloned()
        }
        _ => None,
    };
    Ok(found.unwrap_or(default))
}

fn builtin_count(args: &[Value]) -> Result<Value, EvalError> {
    let n = match &args[0] {
        Value::Nil => 0,
        Value::List(items) => items.len(),
        Value::Map(entries) => entries.len(),
        Value::String(s) => s.chars().count(),
        other => {
            return Err(type_error(format!(
                "object of type '{}' has no count",
                type_name(other)
            )))
        }
    };
    Ok(Value::I64(n as i64))
}

// ═══════════════════════════════════════════════════════════════════════
// Printing
// ═══════════════════════════════════════════════════════════════════════

fn joined(args: &[Value], sep: &str) -> String {
    args.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(sep)
}

fn builtin_print(args: &[Value]) -> Result<Value, EvalError> {
    println!("{}", joined(args, " "));
    Ok(Value::Nil)
}

fn builtin_str(args: &[Value]) -> Result<Value, EvalError> {
    Ok(Value::string(joined(args, "")))
}

// ═══════════════════════════════════════════════════════════════════════
// Functions and errors
// ═══════════════════════════════════════════════════════════════════════

fn builtin_apply(args: &[Value]) -> Result<Value, EvalError> {
    let list = args[1].as_list().ok_or_else(|| {
        type_error(format!(
            "apply expects a list of arguments, got '{}'",
            type_name(&args[1])
        ))
    })?;
    call_value(&args[0], list.to_vec())
}

fn builtin_throw(args: &[Value]) -> Result<Value, EvalError> {
    match &args[0] {
        Value::ErrorClass(kind) if *kind != ErrorKind::Interrupt => {
            Err(EvalError::raised(*kind, args[1].to_string()))
        }
        other => Err(type_error(format!(
            "exceptions must be error classes, got '{}'",
            type_name(other)
        ))),
    }
}
