//! Host objects: values with a class identity supplied by the embedding program

use std::fmt;

use indexmap::IndexMap;

use super::Value;
use crate::error::EvalError;
use crate::eval::call_value;

/// A value owned by the host, reachable from programs through the dot-form
/// `(.method object args...)`.
pub trait HostObject: fmt::Debug + Send + Sync {
    /// Class name shown in diagnostics.
    fn class_name(&self) -> &str;

    /// Whether `name` resolves to a method on this object.
    fn has_method(&self, name: &str) -> bool;

    /// Invoke the method `name`.
    ///
    /// Only called after [`HostObject::has_method`] returned true.
    fn call_method(&self, name: &str, args: &[Value]) -> Result<Value, EvalError>;
}

/// A named collection of members, resolved by `require` / `import`.
///
/// Callable members are invoked with the dot-form arguments; other members
/// are returned as-is when accessed without arguments.
#[derive(Debug, Clone)]
pub struct Module {
    /// Full module path, e.g. `core/str`
    pub name: String,

    /// Members in definition order
    pub members: IndexMap<String, Value>,
}

impl Module {
    /// Create an empty module.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            members: IndexMap::new(),
        }
    }

    /// Add a member (builder pattern).
    pub fn with_member(mut self, name: impl Into<String>, value: Value) -> Self {
        self.members.insert(name.into(), value);
        self
    }
}

impl HostObject for Module {
    fn class_name(&self) -> &str {
        "module"
    }

    fn has_method(&self, name: &str) -> bool {
        self.members.contains_key(name)
    }

    fn call_method(&self, name: &str, args: &[Value]) -> Result<Value, EvalError> {
        match self.members.get(name) {
            Some(member) if member.is_callable() => call_value(member, args.to_vec()),
            Some(member) if args.is_empty() => Ok(member.clone()),
            Some(_) => Err(EvalError::raised(
                crate::error::ErrorKind::Type,
                format!("member '{}' of module '{}' is not callable", name, self.name),
            )),
            None => Err(EvalError::name(
                format!("module '{}' has no member '{}'", self.name, name),
                None,
            )),
        }
    }
}
