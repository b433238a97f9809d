//! Tree nodes produced by the parser
//!
//! A parsed program is a *wood*: an ordered forest of [`Node`]s. Leaves are
//! [`Literal`]s wrapping one token; interior nodes are [`Expression`]s.

use std::fmt;

use crate::token::{SourceLocation, Token, TokenKind};

/// Property attached by the `'` prefix.
pub const QUOTED: &str = "quoted:true";

/// Head identifier produced by `{ ... }` sugar.
pub const DICT_MARKER: &str = "dicty";

/// Head identifier produced by `[ ... ]` sugar.
pub const LIST_MARKER: &str = "listy";

/// A parsed program.
pub type Wood = Vec<Node>;

/// A leaf node wrapping exactly one token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    /// The wrapped token
    pub token: Token,

    /// Properties attached by `'` and `^name` prefixes
    pub properties: Vec<String>,
}

impl Literal {
    /// Create a literal without properties.
    pub fn new(token: Token) -> Self {
        Self {
            token,
            properties: Vec::new(),
        }
    }

    /// Attach properties (builder pattern).
    pub fn with_properties(mut self, properties: Vec<String>) -> Self {
        self.properties = properties;
        self
    }

    /// Check if this literal carries the `quoted:true` property.
    pub fn is_quoted(&self) -> bool {
        self.properties.iter().any(|p| p == QUOTED)
    }

    /// Check if this literal is an identifier with the given text.
    pub fn is_identifier(&self, text: &str) -> bool {
        self.token.is_identifier(text)
    }
}

/// An interior node with ordered children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expression {
    /// Child nodes; the first one, if any, determines dispatch
    pub children: Vec<Node>,

    /// Properties attached by `'` and `^name` prefixes
    pub properties: Vec<String>,

    /// Whether this came from `#( ... )`
    pub inline_fn: bool,

    /// Location of the opening bracket
    pub location: Option<SourceLocation>,
}

impl Expression {
    /// Create an expression from its children.
    pub fn new(children: Vec<Node>) -> Self {
        Self {
            children,
            properties: Vec::new(),
            inline_fn: false,
            location: None,
        }
    }

    /// Attach properties (builder pattern).
    pub fn with_properties(mut self, properties: Vec<String>) -> Self {
        self.properties = properties;
        self
    }

    /// Mark as an inline function literal (builder pattern).
    pub fn inline(mut self, inline_fn: bool) -> Self {
        self.inline_fn = inline_fn;
        self
    }

    /// Set the location of the opening bracket (builder pattern).
    pub fn at(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    /// The head node, if any.
    pub fn head(&self) -> Option<&Node> {
        self.children.first()
    }

    /// All children after the head.
    pub fn tail(&self) -> &[Node] {
        self.children.get(1..).unwrap_or(&[])
    }

    /// Check if this expression carries the `quoted:true` property.
    pub fn is_quoted(&self) -> bool {
        self.properties.iter().any(|p| p == QUOTED)
    }

    /// Check whether the head is the identifier `name`.
    pub fn head_is(&self, name: &str) -> bool {
        matches!(self.head(), Some(Node::Literal(lit)) if lit.is_identifier(name))
    }

    /// Check whether this is a dictionary constructor call (`{...}` or `(dicty ...)`).
    pub fn is_dict_literal(&self) -> bool {
        self.head_is(DICT_MARKER)
    }

    /// Items of a binding or parameter list, with a leading `listy` marker
    /// (from `[...]` sugar) stripped.
    pub fn vector_items(&self) -> &[Node] {
        if self.head_is(LIST_MARKER) {
            self.tail()
        } else {
            &self.children
        }
    }
}

/// A node in the parsed tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Leaf
    Literal(Literal),
    /// Interior node
    Expression(Expression),
}

impl Node {
    /// The best location available for diagnostics.
    pub fn location(&self) -> Option<&SourceLocation> {
        match self {
            Node::Literal(lit) => Some(&lit.token.location),
            Node::Expression(expr) => expr
                .location
                .as_ref()
                .or_else(|| expr.head().and_then(Node::location)),
        }
    }

    /// The literal inside this node, if it is one.
    pub fn as_literal(&self) -> Option<&Literal> {
        match self {
            Node::Literal(lit) => Some(lit),
            Node::Expression(_) => None,
        }
    }

    /// The expression inside this node, if it is one.
    pub fn as_expression(&self) -> Option<&Expression> {
        match self {
            Node::Expression(expr) => Some(expr),
            Node::Literal(_) => None,
        }
    }

    /// The identifier text, if this node is an identifier literal.
    pub fn identifier(&self) -> Option<&str> {
        match self {
            Node::Literal(lit) if lit.token.kind == TokenKind::Identifier => {
                Some(lit.token.text.as_str())
            }
            _ => None,
        }
    }
}

impl From<Literal> for Node {
    fn from(lit: Literal) -> Self {
        Node::Literal(lit)
    }
}

impl From<Expression> for Node {
    fn from(expr: Expression) -> Self {
        Node::Expression(expr)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Canonical rendering
// ═══════════════════════════════════════════════════════════════════════

fn write_properties(f: &mut fmt::Formatter<'_>, properties: &[String]) -> fmt::Result {
    for property in properties {
        if property == QUOTED {
            write!(f, "'")?;
        } else {
            write!(f, "^{} ", property)?;
        }
    }
    Ok(())
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_properties(f, &self.properties)?;
        match self.token.kind {
            TokenKind::String => write!(f, "{:?}", self.token.text),
            _ => write!(f, "{}", self.token.text),
        }
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_properties(f, &self.properties)?;
        write!(f, "{}", if self.inline_fn { "#(" } else { "(" })?;
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", child)?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Literal(lit) => lit.fmt(f),
            Node::Expression(expr) => expr.fmt(f),
        }
    }
}
