//! Evaluation context configuration

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use crate::error::EvalError;
use crate::rules::{ShapeOracle, StandardRules};
use crate::token::SourceLocation;

/// Default nesting limit for expression evaluation and for bracket nesting
/// in source.
///
/// [`crate::Interpreter`] sizes its evaluation thread's stack for this limit.
/// Code that evaluates nodes directly on a small stack should pick a lower one.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Configuration and state for evaluation.
///
/// This is passed through all evaluation calls and controls behavior like
/// the nesting limit, interruption and tracing. Clones share the depth
/// counter and the interrupt flag, so a function value carrying a clone
/// still counts against (and can be stopped by) the context that created it.
#[derive(Debug, Clone)]
pub struct EvalContext {
    /// Maximum expression nesting (stack overflow protection)
    pub max_depth: usize,

    /// Current nesting, shared between clones
    depth: Arc<AtomicUsize>,

    /// Interrupt flag - set to true to abort evaluation
    pub interrupt: Arc<AtomicBool>,

    /// Whether to trace evaluation (for debugging)
    pub trace: bool,

    /// Arity and shape rules for special forms
    pub oracle: Arc<dyn ShapeOracle>,
}

impl Default for EvalContext {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            depth: Arc::new(AtomicUsize::new(0)),
            interrupt: Arc::new(AtomicBool::new(false)),
            trace: false,
            oracle: Arc::new(StandardRules),
        }
    }
}

impl EvalContext {
    /// Create a new context with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context with a custom nesting limit.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            max_depth,
            ..Default::default()
        }
    }

    /// Replace the special-form rules (builder pattern).
    pub fn with_oracle(mut self, oracle: impl ShapeOracle + 'static) -> Self {
        self.oracle = Arc::new(oracle);
        self
    }

    /// Enable or disable per-expression tracing (builder pattern).
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Check if evaluation has been interrupted.
    pub fn is_interrupted(&self) -> bool {
        self.interrupt.load(Ordering::Relaxed)
    }

    /// Request interruption of evaluation.
    pub fn interrupt(&self) {
        self.interrupt.store(true, Ordering::Relaxed);
    }

    /// Reset the interrupt flag.
    pub fn reset_interrupt(&self) {
        self.interrupt.store(false, Ordering::Relaxed);
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.depth.load(Ordering::Relaxed)
    }

    /// Enter one level of nesting. Returns error if max depth exceeded.
    ///
    /// The level is released when the returned guard is dropped.
    pub fn enter(&self, location: Option<&SourceLocation>) -> Result<DepthGuard, EvalError> {
        let depth = self.depth.fetch_add(1, Ordering::Relaxed);
        let guard = DepthGuard {
            depth: Arc::clone(&self.depth),
        };
        if depth >= self.max_depth {
            return Err(EvalError::StackOverflow {
                depth,
                max: self.max_depth,
                location: location.cloned(),
            });
        }
        Ok(guard)
    }
}

/// RAII guard that releases one nesting level when dropped.
#[derive(Debug)]
pub struct DepthGuard {
    depth: Arc<AtomicUsize>,
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        self.depth.fetch_sub(1, Ordering::Relaxed);
    }
}
