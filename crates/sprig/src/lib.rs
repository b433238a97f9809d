//! # Sprig
//!
//! A small Lisp with a tree-walking evaluator.
//!
//! Source text flows through three stages:
//!
//! - **Lexer**: characters to a flat sequence of positioned tokens
//! - **Parser**: tokens to a *wood* of literals and nested expressions,
//!   desugaring `'`, `^name`, `{...}` and `[...]`
//! - **Evaluator**: walks the wood against a shared root environment,
//!   running special forms, closures, destructuring, `try`/`catch` and the
//!   threading macros `->` / `->>`
//!
//! Closures capture their defining environment by reference and copy it on
//! every call, so later top-level definitions are visible inside a function
//! while the function's own bindings never leak out.
//!
//! ```
//! let value = sprig::run("(-> 1 (+ 2) (* 3))", "<doc>").unwrap();
//! assert_eq!(value, sprig::Value::I64(9));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod context;
pub mod environment;
pub mod error;
pub mod eval;
pub mod interpreter;
pub mod lexer;
pub mod modules;
pub mod node;
pub mod parser;
pub mod rules;
pub mod token;
pub mod value;

// Re-export main types
pub use context::EvalContext;
pub use environment::Environment;
pub use error::{ErrorKind, EvalError, ParseError, Result, SprigError};
pub use eval::{call_value, call_value_with_kwargs, evaluate, Evaluate, SpecialForm};
pub use interpreter::{run, Interpreter};
pub use lexer::tokenize;
pub use modules::ModuleRegistry;
pub use node::{Expression, Literal, Node, Wood};
pub use parser::{boundary, build, build_with_limit, parse};
pub use rules::{Arity, ShapeOracle, StandardRules, Verdict};
pub use token::{SourceLocation, Token, TokenKind};
pub use value::{
    BuiltinFn, BuiltinFnPtr, FunctionKind, FunctionValue, HashableValue, HostObject, Module,
    Params, Value,
};

/// Sprig version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
