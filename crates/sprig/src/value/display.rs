//! Display and Debug implementations for Value
//!
//! `Debug` renders values the way they would be written in source
//! (strings quoted); `Display` is what `print` shows.

use std::fmt;

use super::*;

fn write_float(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    if n.is_finite() && n.fract() == 0.0 {
        write!(f, "{:.1}", n)
    } else {
        write!(f, "{}", n)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "nil"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::I64(n) => write!(f, "{}", n),
            Value::F64(n) => write_float(f, *n),

            Value::String(s) => write!(f, "{:?}", s.as_ref()),
            Value::Keyword(k) => write!(f, ":{}", k),
            Value::Symbol(s) => write!(f, "{}", s),

            Value::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{:?}", item)?;
                }
                write!(f, "]")
            }

            Value::Map(entries) => {
                write!(f, "{{")?;
                for (i, (k, v)) in entries.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?} {:?}", k.0, v)?;
                }
                write!(f, "}}")
            }

            Value::Function(func) => write!(f, "<fn {}>", func.name),
            Value::BuiltinFn(b) => write!(f, "<builtin {}>", b.name),
            Value::ErrorClass(kind) => write!(f, "<class {}>", kind),
            Value::Exception(e) => write!(f, "<{}: {}>", e.kind(), e.message()),
            Value::Object(obj) => write!(f, "<{} {:?}>", obj.class_name(), obj),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "{}", s.as_ref()), // No quotes for Display
            Value::Exception(e) => write!(f, "{}: {}", e.kind(), e.message()),
            _ => fmt::Debug::fmt(self, f),
        }
    }
}
