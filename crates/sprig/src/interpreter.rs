//! Top-level driver
//!
//! An [`Interpreter`] owns the root environment for a program run, the
//! evaluation context and the module registry. Each top-level node of a
//! program is evaluated in order against the same root environment.
//!
//! Evaluation recurses on the host stack, so the driver runs it on a worker
//! thread whose stack is sized from [`EvalContext::max_depth`]. The depth
//! limit then trips with a `RecursionError` long before the stack runs out,
//! whatever thread the caller is on.

use std::thread;

use tracing::{debug, dispatcher};

use crate::error::Result;
use crate::eval::Evaluate;
use crate::modules::ModuleRegistry;
use crate::node::Node;
use crate::parser::parse;
use crate::{Environment, EvalContext, EvalError, Value};

/// Host stack reserved per level of nesting on the evaluation thread.
pub const STACK_PER_LEVEL: usize = 32 * 1024;

const MIN_STACK: usize = 8 * 1024 * 1024;
const MAX_STACK: usize = 1024 * 1024 * 1024;

/// A program run: root environment, context and modules.
///
/// # Example
///
/// ```
/// use sprig::{Interpreter, Value};
///
/// let interp = Interpreter::new();
/// interp.eval_str("(defn twice [x] (* x 2))", "<doc>").unwrap();
/// let result = interp.eval_str("(twice 21)", "<doc>").unwrap();
/// assert_eq!(result, Value::I64(42));
/// ```
#[derive(Debug, Clone)]
pub struct Interpreter {
    env: Environment,
    ctx: EvalContext,
    modules: ModuleRegistry,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    /// Create an interpreter with the standard prelude and module resolvers.
    pub fn new() -> Self {
        Self::with_context(EvalContext::new())
    }

    /// Create an interpreter with the prelude and a custom context.
    pub fn with_context(ctx: EvalContext) -> Self {
        let env = Environment::with_prelude();
        let modules = ModuleRegistry::new();
        modules.install(&env);
        Self { env, ctx, modules }
    }

    /// Create an interpreter with an empty root environment.
    ///
    /// Nothing is bound, not even `get` or the module resolvers.
    pub fn bare() -> Self {
        Self {
            env: Environment::new(),
            ctx: EvalContext::new(),
            modules: ModuleRegistry::new(),
        }
    }

    /// The root environment.
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// The evaluation context.
    pub fn context(&self) -> &EvalContext {
        &self.ctx
    }

    /// The module registry consulted by `require` and `import`.
    pub fn modules(&self) -> &ModuleRegistry {
        &self.modules
    }

    /// Parse and run `source`, returning the value of the last top-level
    /// form (nil for an empty program).
    ///
    /// `source_name` only appears in diagnostics.
    pub fn eval_str(&self, source: &str, source_name: &str) -> Result<Value> {
        let wood = parse(source, source_name)?;
        Ok(self.eval_wood(&wood)?)
    }

    /// Run already-built top-level nodes in order on the evaluation thread.
    ///
    /// The caller's tracing dispatcher is carried over to that thread.
    pub fn eval_wood(&self, wood: &[Node]) -> std::result::Result<Value, EvalError> {
        let stack_size = self
            .ctx
            .max_depth
            .saturating_mul(STACK_PER_LEVEL)
            .clamp(MIN_STACK, MAX_STACK);
        let dispatch = dispatcher::get_default(|current| current.clone());

        thread::scope(|scope| {
            let worker = thread::Builder::new()
                .name("sprig-eval".to_string())
                .stack_size(stack_size)
                .spawn_scoped(scope, || {
                    dispatcher::with_default(&dispatch, || self.eval_forms(wood))
                })
                .map_err(|e| {
                    EvalError::runtime(format!("unable to start evaluation thread: {}", e), None)
                })?;
            worker
                .join()
                .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
        })
    }

    fn eval_forms(&self, wood: &[Node]) -> std::result::Result<Value, EvalError> {
        let mut last = Value::Nil;
        for node in wood {
            debug!(form = %node, "evaluating top-level form");
            last = node.eval_form(&self.env, &self.ctx, true)?;
        }
        Ok(last)
    }
}

/// Run `source` once in a fresh interpreter.
pub fn run(source: &str, source_name: &str) -> Result<Value> {
    Interpreter::new().eval_str(source, source_name)
}
