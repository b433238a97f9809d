//! Threading macros `->` and `->>`

use super::Evaluate;
use crate::node::{Expression, Node};
use crate::{Environment, EvalContext, EvalError, Value};

/// Where the running value is inserted into each step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Position {
    /// As the first argument (`->`)
    First,
    /// As the last argument (`->>`)
    Last,
}

/// Rewrite `(-> x (f a) g)` into `(g (f x a))` and evaluate it.
///
/// The rewrite works on a copy of the tail; the parsed tree is never touched.
pub(super) fn eval_thread(
    expr: &Expression,
    env: &Environment,
    ctx: &EvalContext,
    position: Position,
) -> Result<Value, EvalError> {
    let (first, steps) = match expr.tail() {
        [] => return Ok(Value::Nil),
        [only] => return only.eval(env, ctx),
        [first, steps @ ..] => (first, steps),
    };

    let threaded = steps
        .iter()
        .cloned()
        .fold(first.clone(), |target, step| thread(target, step, position));
    threaded.eval(env, ctx)
}

fn thread(target: Node, step: Node, position: Position) -> Node {
    let mut form = match step {
        Node::Expression(expr) => expr,
        Node::Literal(lit) => {
            let location = lit.token.location.clone();
            Expression::new(vec![Node::Literal(lit)]).at(location)
        }
    };
    match position {
        Position::First => {
            let at = form.children.len().min(1);
            form.children.insert(at, target);
        }
        Position::Last => form.children.push(target),
    }
    Node::Expression(form)
}
