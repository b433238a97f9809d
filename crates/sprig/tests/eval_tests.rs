use pretty_assertions::assert_eq;
use sprig::*;

fn eval(src: &str) -> sprig::Result<Value> {
    Interpreter::new().eval_str(src, "<test>")
}

fn int(n: i64) -> Value {
    Value::I64(n)
}

// ═══════════════════════════════════════════════════════════════════════
// Literals and Calls
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_arithmetic() {
    assert_eq!(eval("(+ 1 2)").unwrap(), int(3));
    assert_eq!(eval("(- 10 4 3)").unwrap(), int(3));
    assert_eq!(eval("(* 2 3 4)").unwrap(), int(24));
    assert_eq!(eval("(/ 7 2)").unwrap(), Value::F64(3.5));
    assert_eq!(eval("(mod -7 3)").unwrap(), int(2));
}

#[test]
fn test_nested_calls() {
    assert_eq!(eval("(+ (* 2 3) (- 5 1))").unwrap(), int(10));
}

#[test]
fn test_string_concatenation() {
    assert_eq!(eval(r#"(+ "ab" "cd")"#).unwrap(), Value::string("abcd"));
    assert_eq!(eval(r#"(str "n=" 1)"#).unwrap(), Value::string("n=1"));
}

#[test]
fn test_comparisons() {
    assert_eq!(eval("(< 1 2 3)").unwrap(), Value::Bool(true));
    assert_eq!(eval("(< 1 3 2)").unwrap(), Value::Bool(false));
    assert_eq!(eval("(= 1 1 1)").unwrap(), Value::Bool(true));
    assert_eq!(eval("(not nil)").unwrap(), Value::Bool(true));
}

#[test]
fn test_collections() {
    assert_eq!(
        eval("[1 (+ 1 1) 3]").unwrap(),
        Value::list(vec![int(1), int(2), int(3)])
    );
    assert_eq!(eval("(count [1 2 3])").unwrap(), int(3));
    assert_eq!(eval("(get {:a 1} :a)").unwrap(), int(1));
    assert_eq!(eval("(get {:a 1} :b 0)").unwrap(), int(0));
    assert_eq!(eval("(get [10 20] 1)").unwrap(), int(20));
}

#[test]
fn test_expression_head_is_called() {
    assert_eq!(eval("((fn [x] (* x x)) 4)").unwrap(), int(16));
}

#[test]
fn test_quote() {
    assert_eq!(eval("'x").unwrap(), Value::symbol("x"));
    assert_eq!(
        eval("'(f 1)").unwrap(),
        Value::list(vec![Value::symbol("f"), int(1)])
    );
}

#[test]
fn test_type_and_apply() {
    assert_eq!(eval("(type 1)").unwrap(), Value::string("int"));
    assert_eq!(eval("(type {:a 1})").unwrap(), Value::string("dict"));
    assert_eq!(eval("(apply + [1 2 3])").unwrap(), int(6));
}

// ═══════════════════════════════════════════════════════════════════════
// Control Forms
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_do() {
    assert_eq!(eval("(do 1 2 3)").unwrap(), int(3));
    assert_eq!(eval("(do)").unwrap(), Value::Nil);
}

#[test]
fn test_or_and() {
    assert_eq!(eval("(or nil false 3 4)").unwrap(), int(3));
    assert_eq!(eval("(or nil false)").unwrap(), Value::Bool(false));
    assert_eq!(eval("(or)").unwrap(), Value::Nil);
    assert_eq!(eval("(and 1 2 3)").unwrap(), int(3));
    assert_eq!(eval("(and 1 nil 3)").unwrap(), Value::Nil);
    assert_eq!(eval("(and)").unwrap(), Value::Bool(true));
}

#[test]
fn test_or_short_circuits() {
    // The undefined name is never evaluated
    assert_eq!(eval("(or 1 undefined)").unwrap(), int(1));
    assert_eq!(eval("(and false undefined)").unwrap(), Value::Bool(false));
}

#[test]
fn test_if() {
    assert_eq!(eval("(if true 1 2)").unwrap(), int(1));
    assert_eq!(eval("(if 0 1 2)").unwrap(), int(2));
    assert_eq!(eval("(if \"\" 1)").unwrap(), Value::Nil);
    assert_eq!(eval("(if [] 1 2)").unwrap(), int(2));
}

#[test]
fn test_when() {
    assert_eq!(eval("(when true 1 2)").unwrap(), int(2));
    assert_eq!(eval("(when false 1 2)").unwrap(), Value::Nil);
}

#[test]
fn test_cond() {
    let src = "(def x 5) (cond (< x 0) :neg (= x 0) :zero true :pos)";
    assert_eq!(eval(src).unwrap(), Value::keyword("pos"));
    assert_eq!(eval("(cond false 1)").unwrap(), Value::Nil);
    assert_eq!(eval("(cond)").unwrap(), Value::Nil);
}

#[test]
fn test_cond_odd_count_is_structure_error() {
    let err = eval("(cond true 1 false)").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Structure);
}

// ═══════════════════════════════════════════════════════════════════════
// let and Destructuring
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_let() {
    assert_eq!(eval("(let [x 1 y 2] (+ x y))").unwrap(), int(3));
}

#[test]
fn test_let_is_sequential() {
    assert_eq!(eval("(let [x 1 y (+ x 1)] (* x y))").unwrap(), int(2));
}

#[test]
fn test_let_does_not_leak() {
    let interp = Interpreter::new();
    interp.eval_str("(let [tmp 1] tmp)", "<test>").unwrap();
    let err = interp.eval_str("tmp", "<test>").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Name);
}

#[test]
fn test_let_odd_bindings_is_structure_error() {
    let err = eval("(let [x 1 y] x)").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Structure);
}

#[test]
fn test_list_destructuring() {
    assert_eq!(eval("(let [[a b] [1 2]] (+ a b))").unwrap(), int(3));
}

#[test]
fn test_list_destructuring_missing_is_nil() {
    assert_eq!(eval("(let [[a b] [1]] b)").unwrap(), Value::Nil);
}

#[test]
fn test_dict_destructuring() {
    assert_eq!(eval("(let [{a b} {:a 1 :b 2}] (- b a))").unwrap(), int(1));
}

#[test]
fn test_destructuring_targets_must_be_names() {
    let err = eval("(let [[a [b c]] [1 [2 3]]] a)").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Structure);
}

// ═══════════════════════════════════════════════════════════════════════
// Functions
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_defn_and_call() {
    assert_eq!(eval("(defn add [a b] (+ a b)) (add 2 3)").unwrap(), int(5));
}

#[test]
fn test_fn_body_returns_last() {
    assert_eq!(eval("((fn [] 1 2 3))").unwrap(), int(3));
    assert_eq!(eval("((fn []))").unwrap(), Value::Nil);
}

#[test]
fn test_recursion() {
    let src = "(defn fact [n] (if (<= n 1) 1 (* n (fact (- n 1))))) (fact 10)";
    assert_eq!(eval(src).unwrap(), int(3_628_800));
}

#[test]
fn test_variadic() {
    let src = "(defn f [a & more] [a more]) (f 1 2 3)";
    assert_eq!(
        eval(src).unwrap(),
        Value::list(vec![int(1), Value::list(vec![int(2), int(3)])])
    );
    assert_eq!(
        eval("(defn f [a & more] more) (f 1)").unwrap(),
        Value::list(vec![])
    );
}

#[test]
fn test_inline_fn() {
    assert_eq!(eval("(#(+ % 1) 2)").unwrap(), int(3));
    assert_eq!(eval("(#(- %1 %2) 10 3)").unwrap(), int(7));
    assert_eq!(eval("(#(+ 1 2))").unwrap(), int(3));
}

#[test]
fn test_keyword_arguments_from_host() {
    let interp = Interpreter::new();
    let f = interp
        .eval_str("(fn [x] (+ x (get kwargs :bonus 0)))", "<test>")
        .unwrap();
    let result =
        call_value_with_kwargs(&f, vec![int(1)], vec![("bonus".to_string(), int(10))]).unwrap();
    assert_eq!(result, int(11));
    assert_eq!(call_value(&f, vec![int(1)]).unwrap(), int(1));
}

#[test]
fn test_builtin_rejects_keyword_arguments() {
    let interp = Interpreter::new();
    let plus = interp.env().get("+").unwrap();
    let err = call_value_with_kwargs(&plus, vec![], vec![("x".to_string(), int(1))]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Type);
}

#[test]
fn test_keyword_as_function() {
    assert_eq!(eval("(:a {:a 1})").unwrap(), int(1));
    assert_eq!(eval("(:b {:a 1} 7)").unwrap(), int(7));
    assert_eq!(eval("(:b {:a 1})").unwrap(), Value::Nil);
}

// ═══════════════════════════════════════════════════════════════════════
// Definitions
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_def_returns_value() {
    assert_eq!(eval("(def x (+ 1 2))").unwrap(), int(3));
}

#[test]
fn test_def_once() {
    assert_eq!(eval("(def x 1) (def? x 2) x").unwrap(), int(1));
    assert_eq!(eval("(def? y 2) y").unwrap(), int(2));
}

#[test]
fn test_defn_once() {
    let src = "(defn f [] 1) (defn? f [] 2) (f)";
    assert_eq!(eval(src).unwrap(), int(1));
    assert_eq!(eval("(defn? g [] 2) (g)").unwrap(), int(2));
}

#[test]
fn test_def_redefinition_overwrites() {
    assert_eq!(eval("(def x 1) (def x 2) x").unwrap(), int(2));
}

// ═══════════════════════════════════════════════════════════════════════
// Threading Macros
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_thread_first() {
    assert_eq!(eval("(-> 1 (+ 2) (* 3))").unwrap(), int(9));
}

#[test]
fn test_thread_last() {
    assert_eq!(eval("(->> 1 (+ 2) (* 3))").unwrap(), int(9));
}

#[test]
fn test_thread_position_matters() {
    assert_eq!(eval("(-> 10 (- 1))").unwrap(), int(9));
    assert_eq!(eval("(->> 10 (- 1))").unwrap(), int(-9));
}

#[test]
fn test_thread_bare_function_step() {
    let src = "(defn inc [x] (+ x 1)) (-> 1 inc inc)";
    assert_eq!(eval(src).unwrap(), int(3));
}

#[test]
fn test_thread_degenerate() {
    assert_eq!(eval("(->)").unwrap(), Value::Nil);
    assert_eq!(eval("(-> 5)").unwrap(), int(5));
}

// ═══════════════════════════════════════════════════════════════════════
// Dot-form Methods
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn test_string_methods() {
    assert_eq!(eval(r#"(.upper "abc")"#).unwrap(), Value::string("ABC"));
    assert_eq!(
        eval(r#"(.split "a,b" ",")"#).unwrap(),
        Value::list(vec![Value::string("a"), Value::string("b")])
    );
    assert_eq!(
        eval(r#"(-> "  hi  " .strip .upper)"#).unwrap(),
        Value::string("HI")
    );
}

#[test]
fn test_map_methods() {
    assert_eq!(
        eval("(.keys {:a 1 :b 2})").unwrap(),
        Value::list(vec![Value::keyword("a"), Value::keyword("b")])
    );
}

#[test]
fn test_missing_method_is_name_error() {
    let err = eval(r#"(.nope "abc")"#).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Name);
}

#[test]
fn test_ellipsis_is_not_a_dot_form() {
    let err = eval("(... 1)").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Name);
}
