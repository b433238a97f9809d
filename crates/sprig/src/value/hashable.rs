//! Hashable wrapper for Value to enable use as dictionary keys

use std::hash::{Hash, Hasher};

use super::Value;
use crate::error::{type_name, ErrorKind, EvalError};

/// A wrapper for Value that implements Hash and Eq.
///
/// Only nil, booleans, integers, strings, keywords and symbols can be used
/// as keys. Construct through [`HashableValue::new`] to enforce this.
#[derive(Debug, Clone)]
pub struct HashableValue(pub Value);

impl HashableValue {
    /// Wrap `value`, rejecting types that cannot be keys.
    pub fn new(value: Value) -> Result<Self, EvalError> {
        if Self::is_hashable(&value) {
            Ok(Self(value))
        } else {
            Err(EvalError::raised(
                ErrorKind::Type,
                format!("unhashable type: '{}'", type_name(&value)),
            ))
        }
    }

    /// Check if a value can be hashed
    pub fn is_hashable(value: &Value) -> bool {
        matches!(
            value,
            Value::Nil
                | Value::Bool(_)
                | Value::I64(_)
                | Value::String(_)
                | Value::Keyword(_)
                | Value::Symbol(_)
        )
    }

    /// The wrapped value
    pub fn value(&self) -> &Value {
        &self.0
    }
}

impl Hash for HashableValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(&self.0).hash(state);

        match &self.0 {
            Value::Bool(b) => b.hash(state),
            Value::I64(n) => n.hash(state),
            Value::String(s) | Value::Keyword(s) | Value::Symbol(s) => s.hash(state),
            // everything else hashes by discriminant only
            _ => {}
        }
    }
}

impl PartialEq for HashableValue {
    fn eq(&self, other: &Self) -> bool {
        // Delegate to Value's PartialEq
        self.0 == other.0
    }
}

impl Eq for HashableValue {}
