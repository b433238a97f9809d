//! Built-in methods reachable through the dot-form
//!
//! `(.upper "abc")` looks up `upper` on the receiver's class and calls it
//! with the receiver plus the remaining evaluated arguments.

use super::{HashableValue, Value};
use crate::error::{type_name, ErrorKind, EvalError};
use crate::rules::Arity;

/// A native method: receiver first, then the call arguments.
pub type NativeMethod = fn(&Value, &[Value]) -> Result<Value, EvalError>;

/// Find a built-in method for `receiver`.
///
/// Returns `None` if the receiver's class has no method called `name`.
pub fn lookup(receiver: &Value, name: &str) -> Option<NativeMethod> {
    let method: NativeMethod = match (receiver, name) {
        // String methods
        (Value::String(_), "upper") => str_upper,
        (Value::String(_), "lower") => str_lower,
        (Value::String(_), "strip") => str_strip,
        (Value::String(_), "split") => str_split,
        (Value::String(_), "startswith") => str_startswith,
        (Value::String(_), "endswith") => str_endswith,
        (Value::String(_), "join") => str_join,
        (Value::String(_), "replace") => str_replace,

        // List methods
        (Value::List(_), "index") => list_index,
        (Value::List(_), "count") => list_count,
        (Value::List(_), "copy") => identity,

        // Dict methods
        (Value::Map(_), "get") => map_get,
        (Value::Map(_), "keys") => map_keys,
        (Value::Map(_), "values") => map_values,
        (Value::Map(_), "items") => map_items,
        (Value::Map(_), "copy") => identity,

        // Exception methods
        (Value::Exception(_), "kind") => exception_kind,
        (Value::Exception(_), "message") => exception_message,

        _ => return None,
    };
    Some(method)
}

fn check(method: &str, arity: Arity, args: &[Value]) -> Result<(), EvalError> {
    arity.check(args.len()).map_err(|reason| EvalError::Arity {
        name: method.to_string(),
        message: reason,
        location: None,
    })
}

fn text_arg<'a>(method: &str, value: &'a Value) -> Result<&'a str, EvalError> {
    value.as_str().ok_or_else(|| {
        EvalError::raised(
            ErrorKind::Type,
            format!("{} expects a str argument, got '{}'", method, type_name(value)),
        )
    })
}

fn receiver_str(receiver: &Value) -> &str {
    receiver.as_str().unwrap_or_default()
}

// ═══════════════════════════════════════════════════════════════════════
// str
// ═══════════════════════════════════════════════════════════════════════

fn str_upper(receiver: &Value, args: &[Value]) -> Result<Value, EvalError> {
    check("upper", Arity::Exactly(0), args)?;
    Ok(Value::string(receiver_str(receiver).to_uppercase()))
}

fn str_lower(receiver: &Value, args: &[Value]) -> Result<Value, EvalError> {
    check("lower", Arity::Exactly(0), args)?;
    Ok(Value::string(receiver_str(receiver).to_lowercase()))
}

fn str_strip(receiver: &Value, args: &[Value]) -> Result<Value, EvalError> {
    check("strip", Arity::Exactly(0), args)?;
    Ok(Value::string(receiver_str(receiver).trim()))
}

fn str_split(receiver: &Value, args: &[Value]) -> Result<Value, EvalError> {
    check("split", Arity::Between(0, 1), args)?;
    let s = receiver_str(receiver);
    let parts: Vec<Value> = match args.first() {
        Some(sep) => {
            let sep = text_arg("split", sep)?;
            if sep.is_empty() {
                return Err(EvalError::raised(ErrorKind::Value, "empty separator"));
            }
            s.split(sep).map(Value::string).collect()
        }
        None => s.split_whitespace().map(Value::string).collect(),
    };
    Ok(Value::list(parts))
}

fn str_startswith(receiver: &Value, args: &[Value]) -> Result<Value, EvalError> {
    check("startswith", Arity::Exactly(1), args)?;
    let prefix = text_arg("startswith", &args[0])?;
    Ok(Value::Bool(receiver_str(receiver).starts_with(prefix)))
}

fn str_endswith(receiver: &Value, args: &[Value]) -> Result<Value, EvalError> {
    check("endswith", Arity::Exactly(1), args)?;
    let suffix = text_arg("endswith", &args[0])?;
    Ok(Value::Bool(receiver_str(receiver).ends_with(suffix)))
}

fn str_join(receiver: &Value, args: &[Value]) -> Result<Value, EvalError> {
    check("join", Arity::Exactly(1), args)?;
    let items = args[0].as_list().ok_or_else(|| {
        EvalError::raised(
            ErrorKind::Type,
            format!("join expects a list, got '{}'", type_name(&args[0])),
        )
    })?;
    let parts = items
        .iter()
        .map(|item| text_arg("join", item).map(str::to_string))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Value::string(parts.join(receiver_str(receiver))))
}

fn str_replace(receiver: &Value, args: &[Value]) -> Result<Value, EvalError> {
    check("replace", Arity::Exactly(2), args)?;
    let old = text_arg("replace", &args[0])?;
    let new = text_arg("replace", &args[1])?;
    Ok(Value::string(receiver_str(receiver).replace(old, new)))
}

// ═══════════════════════════════════════════════════════════════════════
// list
// ═══════════════════════════════════════════════════════════════════════

fn list_index(receiver: &Value, args: &[Value]) -> Result<Value, EvalError> {
    check("index", Arity::Exactly(1), args)?;
    let items = receiver.as_list().unwrap_or_default();
    items
        .iter()
        .position(|item| *item == args[0])
        .map(|idx| Value::I64(idx as i64))
        .ok_or_else(|| EvalError::raised(ErrorKind::Value, format!("{:?} is not in list", args[0])))
}

fn list_count(receiver: &Value, args: &[Value]) -> Result<Value, EvalError> {
    check("count", Arity::Exactly(1), args)?;
    let items = receiver.as_list().unwrap_or_default();
    Ok(Value::I64(items.iter().filter(|item| **item == args[0]).count() as i64))
}

fn identity(receiver: &Value, args: &[Value]) -> Result<Value, EvalError> {
    check("copy", Arity::Exactly(0), args)?;
    Ok(receiver.clone())
}

// ═══════════════════════════════════════════════════════════════════════
// dict
// ═══════════════════════════════════════════════════════════════════════

fn map_get(receiver: &Value, args: &[Value]) -> Result<Value, EvalError> {
    check("get", Arity::Between(1, 2), args)?;
    let default = args.get(1).cloned().unwrap_or(Value::Nil);
    let Some(entries) = receiver.as_map() else {
        return Ok(default);
    };
    if !HashableValue::is_hashable(&args[0]) {
        return Ok(default);
    }
    Ok(entries
        .get(&HashableValue(args[0].clone()))
        .cloned()
        .unwrap_or(default))
}

fn map_keys(receiver: &Value, args: &[Value]) -> Result<Value, EvalError> {
    check("keys", Arity::Exactly(0), args)?;
    let keys = receiver
        .as_map()
        .map(|entries| entries.keys().map(|k| k.0.clone()).collect())
        .unwrap_or_default();
    Ok(Value::list(keys))
}

fn map_values(receiver: &Value, args: &[Value]) -> Result<Value, EvalError> {
    check("values", Arity::Exactly(0), args)?;
    let values = receiver
        .as_map()
        .map(|entries| entries.values().cloned().collect())
        .unwrap_or_default();
    Ok(Value::list(values))
}

fn map_items(receiver: &Value, args: &[Value]) -> Result<Value, EvalError> {
    check("items", Arity::Exactly(0), args)?;
    let items = receiver
        .as_map()
        .map(|entries| {
            entries
                .iter()
                .map(|(k, v)| Value::list(vec![k.0.clone(), v.clone()]))
                .collect()
        })
        .unwrap_or_default();
    Ok(Value::list(items))
}

// ═══════════════════════════════════════════════════════════════════════
// exception
// ═══════════════════════════════════════════════════════════════════════

fn exception_kind(receiver: &Value, args: &[Value]) -> Result<Value, EvalError> {
    check("kind", Arity::Exactly(0), args)?;
    match receiver {
        Value::Exception(e) => Ok(Value::ErrorClass(e.kind())),
        _ => Ok(Value::Nil),
    }
}

fn exception_message(receiver: &Value, args: &[Value]) -> Result<Value, EvalError> {
    check("message", Arity::Exactly(0), args)?;
    match receiver {
        Value::Exception(e) => Ok(Value::string(e.message())),
        _ => Ok(Value::Nil),
    }
}
