//! Callable value types: user functions and builtins

use std::fmt;
use std::sync::Arc;

use super::Value;
use crate::context::EvalContext;
use crate::environment::Environment;
use crate::error::EvalError;
use crate::node::Node;
use crate::rules::Arity;
use crate::token::SourceLocation;

/// Type alias for builtin function pointers to reduce complexity
pub type BuiltinFnPtr = Arc<dyn Fn(&[Value]) -> Result<Value, EvalError> + Send + Sync>;

/// Parameter list of a closure, split on the `&` marker.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Params {
    /// Names bound positionally
    pub positional: Vec<String>,

    /// Collector for extra arguments (the name after `&`)
    pub rest: Option<String>,
}

impl Params {
    /// Arity accepted by a function with these parameters.
    pub fn arity(&self) -> Arity {
        if self.rest.is_some() {
            Arity::AtLeast(self.positional.len())
        } else {
            Arity::Exactly(self.positional.len())
        }
    }
}

/// How a user function receives its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FunctionKind {
    /// `fn` / `defn`: named parameters with an arity check
    Closure(Params),

    /// `#(...)`: arguments bound to `%`, `%1`, `%2`, ...; no arity check
    Inline,
}

/// A user-defined function.
///
/// Holds a *reference* to the environment it was defined in. Each call
/// copies that environment into a fresh frame, so later definitions in the
/// defining environment are visible while the call's own bindings are not
/// leaked back.
#[derive(Clone)]
pub struct FunctionValue {
    /// Display name (`<anonymous function>` for `fn` and `#(...)`)
    pub name: String,

    /// Parameter handling
    pub kind: FunctionKind,

    /// Body nodes, evaluated in order; the last value is returned
    pub body: Arc<Vec<Node>>,

    /// Defining environment (shared, not snapshotted)
    pub env: Environment,

    /// Evaluation settings in effect at definition time
    pub ctx: EvalContext,

    /// Location of the defining form's head
    pub location: Option<SourceLocation>,
}

impl fmt::Debug for FunctionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionValue")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("body", &self.body.len())
            .field("location", &self.location)
            .finish()
    }
}

/// A built-in native function.
///
/// These are Rust functions exposed to the interpreter.
#[derive(Clone)]
pub struct BuiltinFn {
    /// Function name (for display/debugging)
    pub name: String,

    /// Arity (-1 for variadic)
    pub arity: i32,

    /// The actual function pointer
    pub func: BuiltinFnPtr,
}

impl BuiltinFn {
    /// Wrap a native function.
    pub fn new(
        name: impl Into<String>,
        arity: i32,
        func: impl Fn(&[Value]) -> Result<Value, EvalError> + Send + Sync + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            arity,
            func: Arc::new(func),
        }
    }
}

impl fmt::Debug for BuiltinFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BuiltinFn({})", self.name)
    }
}
