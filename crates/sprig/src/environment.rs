//! Runtime environment managing variable and function bindings

mod prelude;

use std::fmt;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::IndexMap;

use crate::value::{BuiltinFn, Value};

/// The runtime environment: a mapping from name to value.
///
/// An `Environment` is a shared *handle*. Cloning it yields another handle to
/// the same mapping, which is how closures capture their defining
/// environment by reference. A fresh, independent mapping is produced with
/// [`Environment::snapshot`] or [`Environment::overlay`]; function calls and
/// `let` use these so their bindings never leak back into the caller.
///
/// # Example
///
/// ```
/// use sprig::{Environment, Value};
///
/// let env = Environment::new();
/// env.define("x", Value::I64(1));
///
/// // Another handle sees later definitions
/// let alias = env.clone();
/// env.define("y", Value::I64(2));
/// assert_eq!(alias.get("y"), Some(Value::I64(2)));
///
/// // An overlay is a copy; its bindings stay local
/// let local = env.overlay([("z".to_string(), Value::I64(3))]);
/// assert!(local.contains("x"));
/// assert!(!env.contains("z"));
/// ```
#[derive(Clone, Default)]
pub struct Environment {
    bindings: Arc<RwLock<IndexMap<String, Value>>>,
}

impl Environment {
    /// Create a new empty environment.
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, IndexMap<String, Value>> {
        self.bindings.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, IndexMap<String, Value>> {
        self.bindings.write().unwrap_or_else(|e| e.into_inner())
    }

    // ═══════════════════════════════════════════════════════════════════
    // Binding Definition
    // ═══════════════════════════════════════════════════════════════════

    /// Bind `name`, overwriting any existing binding.
    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.write().insert(name.into(), value);
    }

    /// Register a built-in function under its own name.
    pub fn define_builtin(&self, builtin: BuiltinFn) {
        let name = builtin.name.clone();
        self.define(name, Value::BuiltinFn(builtin));
    }

    // ═══════════════════════════════════════════════════════════════════
    // Binding Lookup
    // ═══════════════════════════════════════════════════════════════════

    /// Look up a binding by name.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.read().get(name).cloned()
    }

    /// Check if a binding exists.
    pub fn contains(&self, name: &str) -> bool {
        self.read().contains_key(name)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Copies
    // ═══════════════════════════════════════════════════════════════════

    /// An independent copy of every current binding.
    pub fn snapshot(&self) -> Environment {
        Environment {
            bindings: Arc::new(RwLock::new(self.read().clone())),
        }
    }

    /// An independent copy with `bindings` applied on top.
    pub fn overlay(&self, bindings: impl IntoIterator<Item = (String, Value)>) -> Environment {
        let local = self.snapshot();
        {
            let mut map = local.write();
            for (name, value) in bindings {
                map.insert(name, value);
            }
        }
        local
    }

    /// Whether two handles refer to the same mapping.
    pub fn ptr_eq(&self, other: &Environment) -> bool {
        Arc::ptr_eq(&self.bindings, &other.bindings)
    }

    // ═══════════════════════════════════════════════════════════════════
    // Iteration and Inspection
    // ═══════════════════════════════════════════════════════════════════

    /// Binding names in definition order.
    pub fn names(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    /// Get the number of bindings.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Check if the environment is empty.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Remove every binding.
    pub fn clear(&self) {
        self.write().clear();
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Values may hold closures over this very mapping; list names only.
        f.debug_struct("Environment")
            .field("names", &self.names())
            .finish()
    }
}
