//! Value trait implementations: constructors, predicates, extractors, From traits, PartialEq

use std::sync::Arc;

use super::*;

// ═══════════════════════════════════════════════════════════════════
// Convenience Constructors
// ═══════════════════════════════════════════════════════════════════

impl Value {
    /// Create a string value
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(Arc::new(s.into()))
    }

    /// Create a keyword value; a leading `:` is stripped
    pub fn keyword(name: impl AsRef<str>) -> Self {
        let name = name.as_ref();
        Value::Keyword(Arc::new(name.strip_prefix(':').unwrap_or(name).to_string()))
    }

    /// Create a symbol value
    pub fn symbol(name: impl Into<String>) -> Self {
        Value::Symbol(Arc::new(name.into()))
    }

    /// Create a list value
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Arc::new(items))
    }

    /// Create a map value
    pub fn map(entries: ValueMap) -> Self {
        Value::Map(Arc::new(entries))
    }

    /// Build a map from key/value pairs, rejecting unhashable keys.
    pub fn map_from_pairs(
        pairs: impl IntoIterator<Item = (Value, Value)>,
    ) -> Result<Self, EvalError> {
        let mut entries = ValueMap::new();
        for (k, v) in pairs {
            entries.insert(HashableValue::new(k)?, v);
        }
        Ok(Value::map(entries))
    }

    /// Wrap a host object
    pub fn object(obj: impl HostObject + 'static) -> Self {
        Value::Object(Arc::new(obj))
    }

    // ═══════════════════════════════════════════════════════════════════
    // Type Predicates
    // ═══════════════════════════════════════════════════════════════════

    /// Check if value is nil
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Check if value is numeric (integer or float)
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::I64(_) | Value::F64(_))
    }

    /// Check if value is callable (function or builtin)
    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Function(_) | Value::BuiltinFn(_))
    }

    /// Truthiness used by `if`, `when`, `cond`, `and`, `or`.
    ///
    /// nil, false, zero, and empty strings/lists/maps are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Bool(b) => *b,
            Value::I64(n) => *n != 0,
            Value::F64(f) => *f != 0.0,
            Value::String(s) => !s.is_empty(),
            Value::List(items) => !items.is_empty(),
            Value::Map(entries) => !entries.is_empty(),
            _ => true,
        }
    }

    /// The class name used by the dot-form.
    ///
    /// Primitives (nil, booleans, numbers, keywords, symbols) have no class
    /// identity and return `None`.
    pub fn class_name(&self) -> Option<String> {
        match self {
            Value::Nil
            | Value::Bool(_)
            | Value::I64(_)
            | Value::F64(_)
            | Value::Keyword(_)
            | Value::Symbol(_) => None,
            Value::String(_) => Some("str".to_string()),
            Value::List(_) => Some("list".to_string()),
            Value::Map(_) => Some("dict".to_string()),
            Value::Function(_) | Value::BuiltinFn(_) => Some("function".to_string()),
            Value::ErrorClass(_) => Some("type".to_string()),
            Value::Exception(_) => Some("exception".to_string()),
            Value::Object(obj) => Some(obj.class_name().to_string()),
        }
    }

    /// Human-readable name of a callable
    pub fn display_name(&self) -> Option<&str> {
        match self {
            Value::Function(f) => Some(&f.name),
            Value::BuiltinFn(b) => Some(&b.name),
            _ => None,
        }
    }

    // ═══════════════════════════════════════════════════════════════════
    // Value Extractors
    // ═══════════════════════════════════════════════════════════════════

    /// Extract integer
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::I64(n) => Some(*n),
            _ => None,
        }
    }

    /// Extract a number as f64
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::I64(n) => Some(*n as f64),
            Value::F64(f) => Some(*f),
            _ => None,
        }
    }

    /// Extract string reference
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Extract list slice
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Extract map reference
    pub fn as_map(&self) -> Option<&ValueMap> {
        match self {
            Value::Map(entries) => Some(entries.as_ref()),
            _ => None,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════
// From Implementations
// ═══════════════════════════════════════════════════════════════════

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::I64(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::F64(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::list(items)
    }
}

impl From<ErrorKind> for Value {
    fn from(kind: ErrorKind) -> Self {
        Value::ErrorClass(kind)
    }
}

impl From<BuiltinFn> for Value {
    fn from(f: BuiltinFn) -> Self {
        Value::BuiltinFn(f)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Nil)
    }
}

// ═══════════════════════════════════════════════════════════════════
// Equality
// ═══════════════════════════════════════════════════════════════════

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::I64(a), Value::I64(b)) => a == b,
            (Value::F64(a), Value::F64(b)) => a == b,
            (Value::I64(a), Value::F64(b)) | (Value::F64(b), Value::I64(a)) => (*a as f64) == *b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Keyword(a), Value::Keyword(b)) => a == b,
            (Value::Symbol(a), Value::Symbol(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Function(a), Value::Function(b)) => Arc::ptr_eq(a, b),
            (Value::BuiltinFn(a), Value::BuiltinFn(b)) => Arc::ptr_eq(&a.func, &b.func),
            (Value::ErrorClass(a), Value::ErrorClass(b)) => a == b,
            (Value::Exception(a), Value::Exception(b)) => Arc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}
