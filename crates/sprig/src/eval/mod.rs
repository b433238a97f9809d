//! Expression evaluation
//!
//! [`Evaluate`] is implemented for every tree node. An [`Expression`] is
//! dispatched on its head: a keyword head is a lookup, an identifier naming a
//! [`SpecialForm`] runs that form, a `.method` head is a dot-form call, and
//! anything else is evaluated to a callable and invoked.

mod call;
mod control;
mod define;
mod dot;
mod function;
mod keyword;
mod let_form;
mod literal;
mod threading;
mod try_catch;

pub use call::{call_value, call_value_with_kwargs};

use tracing::trace;

use crate::node::{Expression, Node};
use crate::token::{SourceLocation, TokenKind};
use crate::{Environment, EvalContext, EvalError, Value};

/// Trait for evaluating tree nodes to values.
///
/// This is the core abstraction for the tree-walking interpreter.
pub trait Evaluate {
    /// Evaluate this node. `top_level` is true only for the nodes of the
    /// program itself; definition forms are rejected anywhere else.
    fn eval_form(
        &self,
        env: &Environment,
        ctx: &EvalContext,
        top_level: bool,
    ) -> Result<Value, EvalError>;

    /// Evaluate this node in a nested position.
    fn eval(&self, env: &Environment, ctx: &EvalContext) -> Result<Value, EvalError> {
        self.eval_form(env, ctx, false)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Special Forms
// ═══════════════════════════════════════════════════════════════════════

/// Head identifiers with hard-coded evaluation rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialForm {
    /// `(do body...)`
    Do,
    /// `(or forms...)`
    Or,
    /// `(and forms...)`
    And,
    /// `(try main (catch Class alias body...))`
    Try,
    /// `(-> value forms...)`
    ThreadFirst,
    /// `(->> value forms...)`
    ThreadLast,
    /// `(if cond then else?)`
    If,
    /// `(when cond body...)`
    When,
    /// `(cond test result ...)`
    Cond,
    /// `(let [bindings...] body...)`
    Let,
    /// `(fn [params...] body...)`
    Fn,
    /// `(def name value)`
    Def,
    /// `(def? name value)`
    DefOnce,
    /// `(defn name [params...] body...)`
    Defn,
    /// `(defn? name [params...] body...)`
    DefnOnce,
    /// `(import a.b.c)`
    Import,
    /// `(require a/b/c)`
    Require,
}

impl SpecialForm {
    /// Every special form.
    pub const ALL: [SpecialForm; 17] = [
        SpecialForm::Do,
        SpecialForm::Or,
        SpecialForm::And,
        SpecialForm::Try,
        SpecialForm::ThreadFirst,
        SpecialForm::ThreadLast,
        SpecialForm::If,
        SpecialForm::When,
        SpecialForm::Cond,
        SpecialForm::Let,
        SpecialForm::Fn,
        SpecialForm::Def,
        SpecialForm::DefOnce,
        SpecialForm::Defn,
        SpecialForm::DefnOnce,
        SpecialForm::Import,
        SpecialForm::Require,
    ];

    /// Look a form up by its head identifier.
    pub fn from_name(name: &str) -> Option<Self> {
        let form = match name {
            "do" => SpecialForm::Do,
            "or" => SpecialForm::Or,
            "and" => SpecialForm::And,
            "try" => SpecialForm::Try,
            "->" => SpecialForm::ThreadFirst,
            "->>" => SpecialForm::ThreadLast,
            "if" => SpecialForm::If,
            "when" => SpecialForm::When,
            "cond" => SpecialForm::Cond,
            "let" => SpecialForm::Let,
            "fn" => SpecialForm::Fn,
            "def" => SpecialForm::Def,
            "def?" => SpecialForm::DefOnce,
            "defn" => SpecialForm::Defn,
            "defn?" => SpecialForm::DefnOnce,
            "import" => SpecialForm::Import,
            "require" => SpecialForm::Require,
            _ => return None,
        };
        Some(form)
    }

    /// The head identifier.
    pub fn name(&self) -> &'static str {
        match self {
            SpecialForm::Do => "do",
            SpecialForm::Or => "or",
            SpecialForm::And => "and",
            SpecialForm::Try => "try",
            SpecialForm::ThreadFirst => "->",
            SpecialForm::ThreadLast => "->>",
            SpecialForm::If => "if",
            SpecialForm::When => "when",
            SpecialForm::Cond => "cond",
            SpecialForm::Let => "let",
            SpecialForm::Fn => "fn",
            SpecialForm::Def => "def",
            SpecialForm::DefOnce => "def?",
            SpecialForm::Defn => "defn",
            SpecialForm::DefnOnce => "defn?",
            SpecialForm::Import => "import",
            SpecialForm::Require => "require",
        }
    }

    /// Whether the form may only appear at the top level of a program.
    pub fn top_level_only(&self) -> bool {
        matches!(
            self,
            SpecialForm::Def
                | SpecialForm::DefOnce
                | SpecialForm::Defn
                | SpecialForm::DefnOnce
                | SpecialForm::Import
                | SpecialForm::Require
        )
    }

    fn eval(
        &self,
        expr: &Expression,
        env: &Environment,
        ctx: &EvalContext,
        top_level: bool,
    ) -> Result<Value, EvalError> {
        if self.top_level_only() && !top_level {
            return Err(EvalError::structure(
                format!("{}: can only be used at the top level of a program", self.name()),
                head_location(expr),
            ));
        }

        match self {
            SpecialForm::Do => control::eval_do(expr, env, ctx),
            SpecialForm::Or => control::eval_or(expr, env, ctx),
            SpecialForm::And => control::eval_and(expr, env, ctx),
            SpecialForm::Try => try_catch::eval_try(expr, env, ctx),
            SpecialForm::ThreadFirst => {
                threading::eval_thread(expr, env, ctx, threading::Position::First)
            }
            SpecialForm::ThreadLast => {
                threading::eval_thread(expr, env, ctx, threading::Position::Last)
            }
            SpecialForm::If => control::eval_if(expr, env, ctx),
            SpecialForm::When => control::eval_when(expr, env, ctx),
            SpecialForm::Cond => control::eval_cond(expr, env, ctx),
            SpecialForm::Let => let_form::eval_let(expr, env, ctx),
            SpecialForm::Fn => function::eval_fn(expr, env, ctx),
            SpecialForm::Def => define::eval_def(expr, env, ctx, false),
            SpecialForm::DefOnce => define::eval_def(expr, env, ctx, true),
            SpecialForm::Defn => define::eval_defn(expr, env, ctx, false),
            SpecialForm::DefnOnce => define::eval_defn(expr, env, ctx, true),
            SpecialForm::Import => define::eval_module(expr, env, ctx, define::Resolver::Import),
            SpecialForm::Require => {
                define::eval_module(expr, env, ctx, define::Resolver::Require)
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Main Dispatcher
// ═══════════════════════════════════════════════════════════════════════

impl Evaluate for Node {
    fn eval_form(
        &self,
        env: &Environment,
        ctx: &EvalContext,
        top_level: bool,
    ) -> Result<Value, EvalError> {
        // Check for interruption before each expression
        if ctx.is_interrupted() {
            return Err(EvalError::Interrupted);
        }

        let _depth = ctx.enter(self.location())?;
        if ctx.trace {
            trace!(depth = ctx.depth(), node = %self, "eval");
        }

        match self {
            Node::Literal(lit) => lit.eval_form(env, ctx, top_level),
            Node::Expression(expr) => expr.eval_form(env, ctx, top_level),
        }
    }
}

impl Evaluate for Expression {
    fn eval_form(
        &self,
        env: &Environment,
        ctx: &EvalContext,
        top_level: bool,
    ) -> Result<Value, EvalError> {
        if self.is_quoted() {
            return literal::quote_expression(self);
        }
        if self.inline_fn {
            return Ok(function::inline(self, env, ctx));
        }

        let head = self.head().ok_or_else(|| {
            EvalError::structure("cannot evaluate an empty expression", self.location.clone())
        })?;

        match head {
            Node::Literal(lit) if lit.is_quoted() => Err(EvalError::structure(
                "head of an expression cannot be quoted",
                Some(lit.token.location.clone()),
            )),
            Node::Literal(lit) => match lit.token.kind {
                TokenKind::Keyword => keyword::eval_keyword(self, lit, env, ctx),
                TokenKind::Identifier => {
                    let name = lit.token.text.as_str();
                    if let Some(form) = SpecialForm::from_name(name) {
                        return form.eval(self, env, ctx, top_level);
                    }
                    if dot::is_dot_form(name) {
                        return dot::eval_dot(self, name, env, ctx);
                    }
                    let callee = head.eval(env, ctx)?;
                    call::eval_call(self, &callee, env, ctx)
                }
                _ => Err(EvalError::structure(
                    format!(
                        "head of an expression should be an identifier, got {}",
                        lit.token.text
                    ),
                    Some(lit.token.location.clone()),
                )),
            },
            Node::Expression(_) => {
                let callee = head.eval(env, ctx)?;
                call::eval_call(self, &callee, env, ctx)
            }
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Shared Helpers
// ═══════════════════════════════════════════════════════════════════════

/// Location of an expression's head token, used for diagnostics.
fn head_location(expr: &Expression) -> Option<SourceLocation> {
    expr.head()
        .and_then(Node::location)
        .or(expr.location.as_ref())
        .cloned()
}

/// Ask the context's oracle whether `nodes` fit `rule`, returning their count.
fn validate(
    ctx: &EvalContext,
    rule: &str,
    nodes: &[Node],
    location: &Option<SourceLocation>,
) -> Result<usize, EvalError> {
    let verdict = ctx.oracle.validate(rule, nodes);
    if verdict.valid {
        Ok(verdict.arity)
    } else {
        Err(EvalError::structure(
            format!("{}: {}", rule, verdict.reason),
            location.clone(),
        ))
    }
}

/// Evaluate `body` in order and return the last value (nil if empty).
fn eval_body(body: &[Node], env: &Environment, ctx: &EvalContext) -> Result<Value, EvalError> {
    let mut last = Value::Nil;
    for node in body {
        last = node.eval(env, ctx)?;
    }
    Ok(last)
}

/// The identifier text of `node`, or a structure error naming `form`.
fn identifier<'a>(form: &str, node: &'a Node) -> Result<&'a str, EvalError> {
    node.identifier().ok_or_else(|| {
        EvalError::structure(
            format!("{}: expected an identifier, got {}", form, node),
            node.location().cloned(),
        )
    })
}

// ═══════════════════════════════════════════════════════════════════════
// Convenience Functions
// ═══════════════════════════════════════════════════════════════════════

/// Evaluate a node (convenience wrapper).
pub fn evaluate(
    node: &Node,
    env: &Environment,
    ctx: &EvalContext,
    top_level: bool,
) -> Result<Value, EvalError> {
    node.eval_form(env, ctx, top_level)
}
