//! Module registry backing `require` and `import`
//!
//! The registry maps full module paths (`core/str`, `os.path`) to values,
//! usually [`Module`] host objects. [`ModuleRegistry::install`] binds the two
//! resolver builtins the evaluator calls by convention: `__require__` and
//! `__import__`.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::debug;

use crate::environment::Environment;
use crate::error::{ErrorKind, EvalError};
use crate::value::{BuiltinFn, Module, Value};

/// Name of the resolver builtin called by `require`.
pub const REQUIRE: &str = "__require__";

/// Name of the resolver builtin called by `import`.
pub const IMPORT: &str = "__import__";

/// Shared table of resolvable modules.
///
/// Cloning yields another handle to the same table, so modules registered
/// after [`ModuleRegistry::install`] are still resolvable.
#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
    modules: Arc<DashMap<String, Value>>,
}

impl ModuleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `value` under the module path `name`, replacing any previous entry.
    pub fn register(&self, name: impl Into<String>, value: Value) {
        self.modules.insert(name.into(), value);
    }

    /// Register a [`Module`] under its own name.
    pub fn register_module(&self, module: Module) {
        let name = module.name.clone();
        self.register(name, Value::object(module));
    }

    /// Check if a module path is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    /// Registered module paths, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.modules.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// Resolve a module path.
    pub fn resolve(&self, name: &str) -> Result<Value, EvalError> {
        debug!(module = name, "resolving module");
        self.modules
            .get(name)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| {
                EvalError::raised(ErrorKind::Runtime, format!("no module named '{}'", name))
            })
    }

    /// Bind the `__require__` and `__import__` resolvers into `env`.
    pub fn install(&self, env: &Environment) {
        for resolver in [REQUIRE, IMPORT] {
            let registry = self.clone();
            env.define_builtin(BuiltinFn::new(resolver, 1, move |args| match &args[0] {
                Value::String(name) | Value::Symbol(name) => registry.resolve(name),
                other => Err(EvalError::raised(
                    ErrorKind::Type,
                    format!("module name must be a string, got {:?}", other),
                )),
            }));
        }
    }
}
