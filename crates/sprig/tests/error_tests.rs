use pretty_assertions::assert_eq;
use sprig::*;

fn eval(src: &str) -> sprig::Result<Value> {
    Interpreter::new().eval_str(src, "<test>")
}

fn eval_err(src: &str) -> EvalError {
    match eval(src) {
        Err(SprigError::Eval(err)) => err,
        other => panic!("expected an evaluation error, got {:?}", other),
    }
}

// ═══════════════════════════════════════════════════════════════════════
// try / catch
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_try_returns_main_value_without_error() {
    assert_eq!(
        eval("(try (+ 1 2) (catch Exception e 0))").unwrap(),
        Value::I64(3)
    );
}

#[test]
fn test_catch_matching_class() {
    let src = r#"(try (/ 1 0) (catch ZeroDivisionError e (print "caught")))"#;
    assert_eq!(eval(src).unwrap(), Value::Nil);
}

#[test]
fn test_caught_error_is_bound() {
    let src = "(try (/ 1 0) (catch ZeroDivisionError e (.message e)))";
    assert_eq!(eval(src).unwrap(), Value::string("division by zero"));
}

#[test]
fn test_catch_parent_class() {
    let src = "(try (/ 1 0) (catch ArithmeticError e (.kind e)))";
    assert!(matches!(
        eval(src).unwrap(),
        Value::ErrorClass(ErrorKind::ZeroDivision)
    ));
}

#[test]
fn test_non_matching_class_propagates() {
    let err = eval("(try (/ 1 0) (catch NameError e 0))").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ZeroDivision);
}

#[test]
fn test_alias_does_not_leak() {
    let interp = Interpreter::new();
    interp
        .eval_str("(try (/ 1 0) (catch Exception err 0))", "<test>")
        .unwrap();
    assert!(!interp.env().contains("err"));
}

#[test]
fn test_catch_class_must_be_error_class() {
    let err = eval("(def nope 5) (try 1 (catch nope e 0))").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);
}

#[test]
fn test_try_requires_catch_clause() {
    let err = eval("(try 1 (finally 2))").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Structure);
}

#[test]
fn test_throw_and_catch() {
    let src = r#"(try (throw ValueError "bad input") (catch Exception e (.message e)))"#;
    assert_eq!(eval(src).unwrap(), Value::string("bad input"));
}

#[test]
fn test_throw_uncaught_has_location() {
    let err = eval_err("\n(throw ValueError \"bad\")");
    assert_eq!(err.kind(), ErrorKind::Value);
    assert_eq!(err.location(), Some(&SourceLocation::new("<test>", 2, 2)));
}

#[test]
fn test_language_errors_are_catchable() {
    let src = "(try undefined-name (catch NameError e :missing))";
    assert_eq!(eval(src).unwrap(), Value::keyword("missing"));
}

// ═══════════════════════════════════════════════════════════════════════
// Structure Errors
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_def_inside_do_is_rejected() {
    let err = eval_err("(do (def x 1))");
    assert_eq!(err.kind(), ErrorKind::Structure);
    assert!(err.message().contains("top level"));
}

#[test]
fn test_defn_inside_function_is_rejected() {
    let err = eval_err("(defn f [] (defn g [] 1)) (f)");
    assert_eq!(err.kind(), ErrorKind::Structure);
}

#[test]
fn test_empty_expression() {
    assert_eq!(eval_err("()").kind(), ErrorKind::Structure);
}

#[test]
fn test_literal_heads() {
    assert_eq!(eval_err("(1 2)").kind(), ErrorKind::Structure);
    assert_eq!(eval_err("('f 1)").kind(), ErrorKind::Structure);
}

#[test]
fn test_if_arity() {
    assert_eq!(eval_err("(if true)").kind(), ErrorKind::Structure);
    assert_eq!(eval_err("(if 1 2 3 4)").kind(), ErrorKind::Structure);
}

#[test]
fn test_def_requires_identifier() {
    assert_eq!(eval_err("(def 1 2)").kind(), ErrorKind::Structure);
}

#[test]
fn test_odd_dict_literal() {
    assert_eq!(eval_err("{:a}").kind(), ErrorKind::Structure);
}

#[test]
fn test_bad_rest_parameters() {
    assert_eq!(eval_err("(fn [a &] a)").kind(), ErrorKind::Structure);
    assert_eq!(eval_err("(fn [& a b] a)").kind(), ErrorKind::Structure);
    assert_eq!(eval_err("(fn [& a & b] a)").kind(), ErrorKind::Structure);
}

#[test]
fn test_structure_error_location_is_head() {
    let err = eval_err("(do\n  (if))");
    assert_eq!(err.location(), Some(&SourceLocation::new("<test>", 2, 4)));
}

// ═══════════════════════════════════════════════════════════════════════
// Name and Type Errors
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_name_error_message() {
    let err = eval("undefined_name").unwrap_err();
    assert_eq!(
        err.to_string(),
        "NameError: name 'undefined_name' is not defined at <test>:1:1"
    );
}

#[test]
fn test_calling_a_number() {
    let err = eval_err("(def x 1) (x)");
    assert_eq!(err.kind(), ErrorKind::Type);
    assert_eq!(err.message(), "'int' object is not callable");
}

#[test]
fn test_dot_form_on_primitive() {
    assert_eq!(eval_err("(.upper 1)").kind(), ErrorKind::Type);
}

#[test]
fn test_unhashable_dict_key() {
    assert_eq!(eval_err("{[1] 2}").kind(), ErrorKind::Type);
}

#[test]
fn test_zero_division() {
    let err = eval_err("(mod 5 0)");
    assert_eq!(err.kind(), ErrorKind::ZeroDivision);
}

// ═══════════════════════════════════════════════════════════════════════
// Arity Errors
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_arity_error_points_at_definition() {
    let err = eval_err("(def f (fn [x y] x))\n(f 1)");
    assert!(matches!(err, EvalError::Arity { .. }));
    assert_eq!(err.location(), Some(&SourceLocation::new("<test>", 1, 9)));
}

#[test]
fn test_arity_error_names_function() {
    let err = eval_err("(defn pair [a b] [a b]) (pair 1 2 3)");
    assert_eq!(err.kind(), ErrorKind::Arity);
    assert!(err.message().starts_with("pair:"));
}

#[test]
fn test_variadic_minimum() {
    assert_eq!(
        eval_err("(defn f [a b & r] a) (f 1)").kind(),
        ErrorKind::Arity
    );
}

#[test]
fn test_builtin_arity_uses_call_site() {
    let err = eval_err("(not 1 2)");
    assert_eq!(err.kind(), ErrorKind::Arity);
    assert_eq!(err.location(), Some(&SourceLocation::new("<test>", 1, 2)));
}

#[test]
fn test_arity_is_caught_as_structure_error() {
    let src = "(defn f [x] x) (try (f) (catch StructureError e :bad-shape))";
    assert_eq!(eval(src).unwrap(), Value::keyword("bad-shape"));
}

// ═══════════════════════════════════════════════════════════════════════
// Missing Capabilities
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_destructuring_without_get() {
    let err = Interpreter::bare()
        .eval_str("(let [[a b] 1] a)", "<test>")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Runtime);
}

#[test]
fn test_keyword_call_without_get() {
    let err = Interpreter::bare()
        .eval_str("(:a 1)", "<test>")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Runtime);
}

#[test]
fn test_require_without_resolver() {
    let err = Interpreter::bare()
        .eval_str("(require core/str)", "<test>")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Runtime);
}

// ═══════════════════════════════════════════════════════════════════════
// Depth Limit and Interrupts
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_unbounded_recursion_overflows() {
    let interp = Interpreter::with_context(EvalContext::with_max_depth(64));
    let err = interp
        .eval_str("(defn spin [n] (spin (+ n 1))) (spin 0)", "<test>")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Recursion);
    assert_eq!(interp.context().depth(), 0);
}

#[test]
fn test_overflow_is_catchable() {
    let interp = Interpreter::with_context(EvalContext::with_max_depth(64));
    let src = r#"
        (defn spin [n] (spin (+ n 1)))
        (try (spin 0) (catch RecursionError e :deep))
    "#;
    assert_eq!(
        interp.eval_str(src, "<test>").unwrap(),
        Value::keyword("deep")
    );
}

#[test]
fn test_default_limit_raises_recursion_error() {
    let interp = Interpreter::new();
    let err = interp
        .eval_str("(defn spin [n] (spin (+ n 1))) (spin 0)", "<test>")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Recursion);
    assert_eq!(interp.context().depth(), 0);
}

#[test]
fn test_default_limit_on_small_host_thread() {
    let result = std::thread::Builder::new()
        .stack_size(256 * 1024)
        .spawn(|| {
            let src = r#"
                (defn spin [n] (if (< n 0) n (spin (+ n 1))))
                (try (spin 0) (catch RecursionError e :deep))
            "#;
            Interpreter::new().eval_str(src, "<test>").map_err(|e| e.kind())
        })
        .unwrap()
        .join()
        .unwrap();
    assert_eq!(result, Ok(Value::keyword("deep")));
}

#[test]
fn test_deep_source_nesting_is_recursion_error() {
    let depth = sprig::context::DEFAULT_MAX_DEPTH;
    let source = format!("{}1{}", "(do ".repeat(depth), ")".repeat(depth));
    let err = eval(&source).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Recursion);
}

#[test]
fn test_interrupt_stops_evaluation() {
    let interp = Interpreter::new();
    interp.context().interrupt();
    let err = interp.eval_str("(+ 1 2)", "<test>").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Interrupt);

    interp.context().reset_interrupt();
    assert_eq!(
        interp.eval_str("(+ 1 2)", "<test>").unwrap(),
        Value::I64(3)
    );
}

#[test]
fn test_interrupt_is_not_catchable() {
    let interp = Interpreter::new();
    interp.context().interrupt();
    let err = interp
        .eval_str("(try 1 (catch Exception e 0))", "<test>")
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Interrupt);
}
