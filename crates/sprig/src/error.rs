//! Error types for parsing and evaluation

use std::fmt;

use thiserror::Error;

use crate::token::SourceLocation;
use crate::value::Value;

/// The error taxonomy visible to `try`/`catch`.
///
/// Kinds form a small hierarchy: a handler naming a kind also catches
/// every kind beneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Root of every catchable kind
    Exception,
    /// Malformed or misplaced form
    Structure,
    /// Wrong argument count at call time (child of `Structure`)
    Arity,
    /// Unresolved identifier or method
    Name,
    /// Operation on a value of the wrong shape
    Type,
    /// Missing capability or other runtime failure
    Runtime,
    /// Nesting limit exceeded (child of `Runtime`)
    Recursion,
    /// Numeric failure
    Arithmetic,
    /// Division or modulo by zero (child of `Arithmetic`)
    ZeroDivision,
    /// Argument has the right type but an unusable value
    Value,
    /// Evaluation was interrupted; outside the `Exception` tree
    Interrupt,
}

impl ErrorKind {
    /// Every kind, in declaration order.
    pub const ALL: [ErrorKind; 11] = [
        ErrorKind::Exception,
        ErrorKind::Structure,
        ErrorKind::Arity,
        ErrorKind::Name,
        ErrorKind::Type,
        ErrorKind::Runtime,
        ErrorKind::Recursion,
        ErrorKind::Arithmetic,
        ErrorKind::ZeroDivision,
        ErrorKind::Value,
        ErrorKind::Interrupt,
    ];

    /// The class name programs use to refer to this kind.
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::Exception => "Exception",
            ErrorKind::Structure => "StructureError",
            ErrorKind::Arity => "ArityError",
            ErrorKind::Name => "NameError",
            ErrorKind::Type => "TypeError",
            ErrorKind::Runtime => "RuntimeError",
            ErrorKind::Recursion => "RecursionError",
            ErrorKind::Arithmetic => "ArithmeticError",
            ErrorKind::ZeroDivision => "ZeroDivisionError",
            ErrorKind::Value => "ValueError",
            ErrorKind::Interrupt => "Interrupt",
        }
    }

    /// Look a kind up by its class name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    /// The immediate parent kind.
    pub fn parent(&self) -> Option<ErrorKind> {
        match self {
            ErrorKind::Exception | ErrorKind::Interrupt => None,
            ErrorKind::Arity => Some(ErrorKind::Structure),
            ErrorKind::Recursion => Some(ErrorKind::Runtime),
            ErrorKind::ZeroDivision => Some(ErrorKind::Arithmetic),
            _ => Some(ErrorKind::Exception),
        }
    }

    /// Check whether a handler for `self` catches an error of kind `raised`.
    pub fn catches(&self, raised: ErrorKind) -> bool {
        let mut current = Some(raised);
        while let Some(kind) = current {
            if kind == *self {
                return true;
            }
            current = kind.parent();
        }
        false
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn at(location: &Option<SourceLocation>) -> String {
    match location {
        Some(loc) => format!(" at {}", loc),
        None => String::new(),
    }
}

/// Error raised while building the tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("StructureError: {message}{}", at(.location))]
pub struct ParseError {
    /// Human-readable error message
    pub message: String,

    /// Optional source location
    pub location: Option<SourceLocation>,
}

impl ParseError {
    /// Create a new parse error with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            location: None,
        }
    }

    /// Add location information to the error.
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// Parse errors are always structure errors.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Structure
    }
}

/// Errors that occur during evaluation.
#[derive(Error, Debug, Clone)]
pub enum EvalError {
    /// Malformed special form, misplaced top-level form, empty head
    #[error("StructureError: {message}{}", at(.location))]
    Structure {
        /// Error message
        message: String,
        /// Location of the offending head token
        location: Option<SourceLocation>,
    },

    /// Unresolvable identifier or missing method
    #[error("NameError: {message}{}", at(.location))]
    Name {
        /// Error message
        message: String,
        /// Location of the offending token
        location: Option<SourceLocation>,
    },

    /// Operation on a value of the wrong shape
    #[error("TypeError: {message}{}", at(.location))]
    Type {
        /// Error message
        message: String,
        /// Location of the offending head token
        location: Option<SourceLocation>,
    },

    /// A required capability is missing
    #[error("RuntimeError: {message}{}", at(.location))]
    Runtime {
        /// Error message
        message: String,
        /// Location of the offending head token
        location: Option<SourceLocation>,
    },

    /// Wrong argument count passed to a function
    #[error("ArityError: {name}: {message}{}", at(.location))]
    Arity {
        /// Function display name
        name: String,
        /// Why the arguments were rejected
        message: String,
        /// Where the function was defined (builtins have none)
        location: Option<SourceLocation>,
    },

    /// An exception raised by the host library or by `throw`
    #[error("{kind}: {message}{}", at(.location))]
    Raised {
        /// Exception class
        kind: ErrorKind,
        /// Error message
        message: String,
        /// Where it was raised, when known
        location: Option<SourceLocation>,
    },

    /// Evaluation nested deeper than the configured limit
    #[error("RecursionError: maximum depth {max} exceeded{}", at(.location))]
    StackOverflow {
        /// Depth reached
        depth: usize,
        /// Configured limit
        max: usize,
        /// Where the limit was hit
        location: Option<SourceLocation>,
    },

    /// Evaluation was interrupted
    #[error("evaluation interrupted")]
    Interrupted,
}

impl EvalError {
    /// Create a structure error.
    pub fn structure(message: impl Into<String>, location: Option<SourceLocation>) -> Self {
        EvalError::Structure {
            message: message.into(),
            location,
        }
    }

    /// Create a name error.
    pub fn name(message: impl Into<String>, location: Option<SourceLocation>) -> Self {
        EvalError::Name {
            message: message.into(),
            location,
        }
    }

    /// Create a type error.
    pub fn type_error(message: impl Into<String>, location: Option<SourceLocation>) -> Self {
        EvalError::Type {
            message: message.into(),
            location,
        }
    }

    /// Create a runtime error.
    pub fn runtime(message: impl Into<String>, location: Option<SourceLocation>) -> Self {
        EvalError::Runtime {
            message: message.into(),
            location,
        }
    }

    /// Raise a host exception of the given kind without a location.
    pub fn raised(kind: ErrorKind, message: impl Into<String>) -> Self {
        EvalError::Raised {
            kind,
            message: message.into(),
            location: None,
        }
    }

    /// The kind `try`/`catch` matches against.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EvalError::Structure { .. } => ErrorKind::Structure,
            EvalError::Name { .. } => ErrorKind::Name,
            EvalError::Type { .. } => ErrorKind::Type,
            EvalError::Runtime { .. } => ErrorKind::Runtime,
            EvalError::Arity { .. } => ErrorKind::Arity,
            EvalError::Raised { kind, .. } => *kind,
            EvalError::StackOverflow { .. } => ErrorKind::Recursion,
            EvalError::Interrupted => ErrorKind::Interrupt,
        }
    }

    /// The bare message, without kind prefix or location.
    pub fn message(&self) -> String {
        match self {
            EvalError::Structure { message, .. }
            | EvalError::Name { message, .. }
            | EvalError::Type { message, .. }
            | EvalError::Runtime { message, .. }
            | EvalError::Raised { message, .. } => message.clone(),
            EvalError::Arity { name, message, .. } => format!("{}: {}", name, message),
            EvalError::StackOverflow { max, .. } => format!("maximum depth {} exceeded", max),
            EvalError::Interrupted => "evaluation interrupted".to_string(),
        }
    }

    /// The attached location, if any.
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            EvalError::Structure { location, .. }
            | EvalError::Name { location, .. }
            | EvalError::Type { location, .. }
            | EvalError::Runtime { location, .. }
            | EvalError::Arity { location, .. }
            | EvalError::Raised { location, .. }
            | EvalError::StackOverflow { location, .. } => location.as_ref(),
            EvalError::Interrupted => None,
        }
    }

    /// Attach `location` to a host exception or builtin arity error that was
    /// raised without one.
    pub fn or_at(self, location: Option<&SourceLocation>) -> Self {
        match self {
            EvalError::Raised {
                kind,
                message,
                location: None,
            } => EvalError::Raised {
                kind,
                message,
                location: location.cloned(),
            },
            EvalError::Arity {
                name,
                message,
                location: None,
            } => EvalError::Arity {
                name,
                message,
                location: location.cloned(),
            },
            other => other,
        }
    }
}

/// Top-level error returned by the driver.
#[derive(Error, Debug, Clone)]
pub enum SprigError {
    /// The tree could not be built
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Evaluation failed
    #[error(transparent)]
    Eval(#[from] EvalError),
}

impl SprigError {
    /// The kind of the underlying error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SprigError::Parse(e) => e.kind(),
            SprigError::Eval(e) => e.kind(),
        }
    }
}

/// Result type alias for the driver.
pub type Result<T> = std::result::Result<T, SprigError>;

/// Get the name of a value's type for error messages.
pub fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Nil => "nil",
        Value::Bool(_) => "bool",
        Value::I64(_) => "int",
        Value::F64(_) => "float",
        Value::String(_) => "str",
        Value::Keyword(_) => "keyword",
        Value::Symbol(_) => "symbol",
        Value::List(_) => "list",
        Value::Map(_) => "dict",
        Value::Function(_) | Value::BuiltinFn(_) => "function",
        Value::ErrorClass(_) => "type",
        Value::Exception(_) => "exception",
        Value::Object(_) => "object",
    }
}
