//! Value representation for runtime values

mod callable;
mod display;
mod hashable;
mod impls;
pub mod methods;
mod object;

pub use callable::{BuiltinFn, BuiltinFnPtr, FunctionKind, FunctionValue, Params};
pub use hashable::HashableValue;
pub use object::{HostObject, Module};

use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::{ErrorKind, EvalError};

/// Key-unique mapping used for dictionaries.
pub type ValueMap = IndexMap<HashableValue, Value>;

/// Runtime value produced by the evaluator.
///
/// Values are organized into three tiers:
/// - Tier 1: Inline primitives (no allocation)
/// - Tier 2: Heap-allocated, immutable data (Arc-wrapped)
/// - Tier 3: Callables, error classes and host objects
#[derive(Clone)]
pub enum Value {
    // ═══════════════════════════════════════════════════════════════════
    // Tier 1: Inline Primitives
    // ═══════════════════════════════════════════════════════════════════
    /// The nil sentinel
    Nil,

    /// Boolean: `true` or `false`
    Bool(bool),

    /// Integer (the only numeric literal the lexer produces)
    I64(i64),

    /// Float, produced by `/` and host functions
    F64(f64),

    // ═══════════════════════════════════════════════════════════════════
    // Tier 2: Heap-Allocated Data
    // ═══════════════════════════════════════════════════════════════════
    /// Text
    String(Arc<String>),

    /// Keyword, stored without its leading colon
    Keyword(Arc<String>),

    /// Quoted identifier
    Symbol(Arc<String>),

    /// Ordered sequence
    List(Arc<Vec<Value>>),

    /// Key-unique mapping
    Map(Arc<ValueMap>),

    // ═══════════════════════════════════════════════════════════════════
    // Tier 3: Callables and Host Values
    // ═══════════════════════════════════════════════════════════════════
    /// User-defined function (`fn`, `defn`, `#(...)`)
    Function(Arc<FunctionValue>),

    /// Built-in native function
    BuiltinFn(BuiltinFn),

    /// An error class usable in `catch`
    ErrorClass(ErrorKind),

    /// A caught error instance
    Exception(Arc<EvalError>),

    /// Opaque host object, e.g. a resolved module
    Object(Arc<dyn HostObject>),
}
