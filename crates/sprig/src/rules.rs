//! Arity and shape rules for special forms
//!
//! The evaluator consults a [`ShapeOracle`] before running any special form
//! with a fixed shape. The oracle is keyed by form name and answers with a
//! [`Verdict`]; the evaluator never inspects how the answer was reached.

use std::fmt;

use crate::node::Node;

/// An accepted argument count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Exactly `n`
    Exactly(usize),
    /// `n` or more
    AtLeast(usize),
    /// Between `min` and `max`, inclusive
    Between(usize, usize),
}

impl Arity {
    /// Check `count` against this arity, explaining any mismatch.
    pub fn check(&self, count: usize) -> Result<(), String> {
        let ok = match *self {
            Arity::Exactly(n) => count == n,
            Arity::AtLeast(n) => count >= n,
            Arity::Between(min, max) => (min..=max).contains(&count),
        };
        if ok {
            Ok(())
        } else {
            Err(format!("expected {}, got {}", self, count))
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = |n: usize| if n == 1 { "" } else { "s" };
        match *self {
            Arity::Exactly(n) => write!(f, "exactly {} argument{}", n, plural(n)),
            Arity::AtLeast(n) => write!(f, "at least {} argument{}", n, plural(n)),
            Arity::Between(min, max) => write!(f, "between {} and {} arguments", min, max),
        }
    }
}

/// The oracle's answer for one form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    /// Whether the tail is acceptable
    pub valid: bool,

    /// Number of tail nodes (meaningful when valid)
    pub arity: usize,

    /// Why the tail was rejected (empty when valid)
    pub reason: String,
}

impl Verdict {
    /// An accepting verdict.
    pub fn accept(arity: usize) -> Self {
        Self {
            valid: true,
            arity,
            reason: String::new(),
        }
    }

    /// A rejecting verdict.
    pub fn reject(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            arity: 0,
            reason: reason.into(),
        }
    }
}

/// Validates the tail of a special form against a named rule.
pub trait ShapeOracle: fmt::Debug + Send + Sync {
    /// Validate `tail` (the form's nodes after its head) against `rule`.
    fn validate(&self, rule: &str, tail: &[Node]) -> Verdict;
}

/// Shape requirement for one position in a tail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    /// An identifier literal
    Identifier,
    /// A parenthesized form
    Expression,
    /// A form whose items (after a `listy` marker) come in pairs
    PairedExpression,
    /// A form headed by the given identifier
    HeadedBy(&'static str),
}

impl Shape {
    fn accepts(&self, node: &Node) -> bool {
        match self {
            Shape::Identifier => node.identifier().is_some(),
            Shape::Expression => node.as_expression().is_some(),
            Shape::PairedExpression => node
                .as_expression()
                .is_some_and(|e| e.vector_items().len() % 2 == 0),
            Shape::HeadedBy(name) => node.as_expression().is_some_and(|e| e.head_is(name)),
        }
    }

    fn describe(&self) -> String {
        match self {
            Shape::Identifier => "an identifier".to_string(),
            Shape::Expression => "a form".to_string(),
            Shape::PairedExpression => "a form with an even number of items".to_string(),
            Shape::HeadedBy(name) => format!("a ({} ...) form", name),
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Rule {
    arity: Arity,
    shapes: &'static [(usize, Shape)],
    even: bool,
}

impl Rule {
    const fn arity(arity: Arity) -> Self {
        Self {
            arity,
            shapes: &[],
            even: false,
        }
    }

    const fn shaped(arity: Arity, shapes: &'static [(usize, Shape)]) -> Self {
        Self {
            arity,
            shapes,
            even: false,
        }
    }

    fn validate(&self, tail: &[Node]) -> Verdict {
        if let Err(reason) = self.arity.check(tail.len()) {
            return Verdict::reject(reason);
        }
        if self.even && tail.len() % 2 != 0 {
            return Verdict::reject(format!("expected an even number of arguments, got {}", tail.len()));
        }
        for (position, shape) in self.shapes {
            if let Some(node) = tail.get(*position) {
                if !shape.accepts(node) {
                    return Verdict::reject(format!(
                        "argument {} must be {}",
                        position + 1,
                        shape.describe()
                    ));
                }
            }
        }
        Verdict::accept(tail.len())
    }
}

/// The built-in rule book for every special form.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardRules;

impl StandardRules {
    fn rule(name: &str) -> Option<Rule> {
        use Shape::*;
        let rule = match name {
            "if" => Rule::arity(Arity::Between(2, 3)),
            "when" => Rule::arity(Arity::AtLeast(2)),
            "cond" => Rule {
                arity: Arity::AtLeast(2),
                shapes: &[],
                even: true,
            },
            "let" => Rule::shaped(Arity::AtLeast(1), &[(0, PairedExpression)]),
            "fn" => Rule::shaped(Arity::AtLeast(1), &[(0, Expression)]),
            "def" | "def?" => Rule::shaped(Arity::Exactly(2), &[(0, Identifier)]),
            "defn" | "defn?" => {
                Rule::shaped(Arity::AtLeast(2), &[(0, Identifier), (1, Expression)])
            }
            "import" | "require" => Rule::shaped(Arity::Exactly(1), &[(0, Identifier)]),
            "try" => Rule::shaped(Arity::Exactly(2), &[(1, HeadedBy("catch"))]),
            "catch" => Rule::shaped(
                Arity::AtLeast(3),
                &[(0, Identifier), (1, Identifier), (2, Identifier)],
            ),
            "dot-form" => Rule::arity(Arity::AtLeast(1)),
            _ => return None,
        };
        Some(rule)
    }
}

impl ShapeOracle for StandardRules {
    fn validate(&self, rule: &str, tail: &[Node]) -> Verdict {
        match Self::rule(rule) {
            Some(r) => r.validate(tail),
            None => Verdict::reject(format!("no rule named '{}'", rule)),
        }
    }
}
