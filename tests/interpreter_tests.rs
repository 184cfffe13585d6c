// Integration tests for the hlang interpreter
//
// These tests verify the interpreter's behavior by running complete hlang
// programs and checking printed output, bound variables and errors. Tests
// cover:
// - Declarations, assignment and scoping
// - Control flow (agar / ya fir / ya, jabtak, dohraye, roko, aage badho)
// - Functions and closures
// - Operators, literal coercion and display strings
// - Runtime errors

use hlang::errors::{ErrorKind, HlangError};
use hlang::interpreter::{Interpreter, Value};
use hlang::parser::parse_source;
use hlang::runner::run_captured;
use pretty_assertions::assert_eq;
use std::cell::RefCell;
use std::rc::Rc;

/// Runs `code` on a fresh interpreter, returning it with its captured output
/// and the program result.
fn run_code(code: &str) -> (Interpreter, String, Result<Value, HlangError>) {
    let program = parse_source(code);
    let buffer = Rc::new(RefCell::new(Vec::new()));
    let mut interp = Interpreter::new();
    interp.set_output(buffer.clone());
    let result = interp.run_program(&program);
    let output = String::from_utf8_lossy(&buffer.borrow()).into_owned();
    (interp, output, result)
}

fn output_of(code: &str) -> String {
    let (_, output, result) = run_code(code);
    if let Err(err) = result {
        panic!("program failed: {}\noutput so far:\n{}", err.summary(), output);
    }
    output
}

fn error_of(code: &str) -> HlangError {
    match run_code(code).2 {
        Err(err) => err,
        Ok(value) => panic!("expected an error, program returned {:?}", value),
    }
}

#[test]
fn test_declare_and_print() {
    assert_eq!(output_of("ye count = 0\nbol(count)"), "0\n");
}

#[test]
fn test_repeat_with_break_runs_once() {
    let code = r#"
        dohraye {
            bol("ek baar")
            roko
        }
    "#;
    assert_eq!(output_of(code), "ek baar\n");
}

#[test]
fn test_function_with_two_params_returns_sum() {
    let code = r#"
        firseKaro jod(a, b) {
            wapas bhejo + a b
        }
        ye natija = jod(2, 3)
    "#;
    let (interp, _, result) = run_code(code);
    assert_eq!(result, Ok(Value::Number(5.0)));
    assert_eq!(interp.get_variable("natija"), Some(Value::Number(5.0)));
}

#[test]
fn test_string_concatenation() {
    let code = r#"
        ye x = "hi"
        bol(+ x "!")
    "#;
    assert_eq!(output_of(code), "hi!\n");
}

#[test]
fn test_function_without_return_yields_null() {
    let code = r#"
        firseKaro khali() {
            bol("andar")
        }
        firseKaro sunya() {}
        bol(khali())
        bol(sunya())
    "#;
    assert_eq!(output_of(code), "andar\nnull\nnull\n");
}

#[test]
fn test_function_without_return_yields_last_statement_value() {
    let code = r#"
        firseKaro aakhri() {
            ye y = 7
        }
        bol(aakhri())
    "#;
    assert_eq!(output_of(code), "7\n");
}

#[test]
fn test_operand_leading_expression_is_not_folded() {
    // `x + "!"` is read as the argument `x` followed by the argument `+ "!" <nothing>`
    let code = r#"
        ye x = "hi"
        bol(x + "!")
    "#;
    assert_eq!(output_of(code), "hi\n!null\n");
}

#[test]
fn test_infix_return_returns_left_operand() {
    let code = r#"
        firseKaro jod(a, b) {
            wapas bhejo a + b
        }
        bol(jod(2, 3))
    "#;
    assert_eq!(output_of(code), "2\n");
}

#[test]
fn test_arithmetic_and_comparison() {
    let code = r#"
        bol(+ 1 2, - 10 4, * 3 4, / 7 2, % 7 3)
        bol(< 1 2, > 1 2, <= 2 2, >= 1 2, == 3 3, != 3 3)
        bol(- 0 2.5)
    "#;
    assert_eq!(
        output_of(code),
        "3\n6\n12\n3.5\n1\ntrue\nfalse\ntrue\nfalse\ntrue\nfalse\n-2.5\n"
    );
}

#[test]
fn test_modulo_truncates_operands() {
    let (interp, _, result) = run_code("ye r = % 7.9 3.2\nye n = % - 0 7 3");
    assert!(result.is_ok());
    assert_eq!(interp.get_variable("r"), Some(Value::Number(1.0)));
    assert_eq!(interp.get_variable("n"), Some(Value::Number(-1.0)));
}

#[test]
fn test_division_and_modulo_by_zero_fail() {
    for left in ["0", "1", "- 0 5", "2.5"] {
        let err = error_of(&format!("ye x = / {} 0", left));
        assert_eq!(err.kind, ErrorKind::DivisionByZero, "left operand {}", left);

        let err = error_of(&format!("ye x = % {} 0", left));
        assert_eq!(err.kind, ErrorKind::ModuloByZero, "left operand {}", left);
    }
}

#[test]
fn test_modulo_by_fraction_below_one_fails() {
    assert_eq!(error_of("ye x = % 5 0.5").kind, ErrorKind::ModuloByZero);
}

#[test]
fn test_literals_are_coerced_by_content() {
    let code = r#"
        ye s = "123"
        ye t = + s 1
        ye u = + "abc" 1
        ye v = + "1.5" "1.5"
    "#;
    let (interp, _, _) = run_code(code);
    assert_eq!(interp.get_variable("s"), Some(Value::Number(123.0)));
    assert_eq!(interp.get_variable("t"), Some(Value::Number(124.0)));
    assert_eq!(interp.get_variable("u"), Some(Value::Str("abc1".to_string())));
    assert_eq!(interp.get_variable("v"), Some(Value::Number(3.0)));
}

#[test]
fn test_malformed_number_literal_is_a_string() {
    let (interp, _, _) = run_code("ye v = 1.2.3");
    assert_eq!(interp.get_variable("v"), Some(Value::Str("1.2.3".to_string())));
}

#[test]
fn test_concatenation_uses_display_strings() {
    let code = r#"
        firseKaro f() {}
        bol(+ "n=" 4, + "b=" < 1 2, + "x=" f(), + "f=" f, + 1 "a")
    "#;
    assert_eq!(output_of(code), "n=4\nb=true\nx=null\nf=<function>\n1a\n");
}

#[test]
fn test_unsupported_operators() {
    assert_eq!(error_of("ye x = - \"a\" 1").kind, ErrorKind::UnsupportedOperator);
    assert_eq!(error_of("ye x = == \"a\" \"a\"").kind, ErrorKind::UnsupportedOperator);
    assert_eq!(error_of("ye x = && 1 1").kind, ErrorKind::UnsupportedOperator);
    assert_eq!(error_of("ye x = * 2").kind, ErrorKind::UnsupportedOperator);
}

#[test]
fn test_logical_operators_evaluate_both_sides() {
    let code = r#"
        firseKaro gawah(x) { bol(x) wapas bhejo x }
        ye r = || gawah(0) gawah(1)
    "#;
    let (_, output, result) = run_code(code);
    assert_eq!(output, "0\n1\n");
    assert_eq!(result.map_err(|e| e.kind), Err(ErrorKind::UnsupportedOperator));
}

#[test]
fn test_undefined_variable() {
    let err = error_of("bol(nahi)");
    assert_eq!(err.kind, ErrorKind::UndefinedVariable);
    assert_eq!(err.message, "undefined variable: nahi");
}

#[test]
fn test_undefined_variable_suggests_close_name() {
    let err = error_of("ye ginti = 1\nbol(gintii)");
    assert_eq!(err.suggestion.as_deref(), Some("ginti"));
}

#[test]
fn test_assignment_requires_existing_binding() {
    let err = error_of("y = 5");
    assert_eq!(err.kind, ErrorKind::UndefinedVariable);
    assert!(err.message.contains("cannot assign"));
}

#[test]
fn test_assignment_updates_outer_binding() {
    let code = r#"
        ye ginti = 0
        firseKaro badhao() {
            ginti = + ginti 1
        }
        badhao()
        badhao()
        bol(ginti)
    "#;
    assert_eq!(output_of(code), "2\n");
}

#[test]
fn test_declaration_shadows_outer_binding() {
    let code = r#"
        ye x = 1
        firseKaro f() {
            ye x = 2
            wapas bhejo x
        }
        bol(f())
        bol(x)
    "#;
    assert_eq!(output_of(code), "2\n1\n");
}

#[test]
fn test_binding_visible_in_nested_scopes_not_siblings() {
    let code = r#"
        firseKaro pehla() {
            ye x = 1
            firseKaro andar() { wapas bhejo x }
            wapas bhejo andar()
        }
        firseKaro doosra() {
            wapas bhejo x
        }
        bol(pehla())
        bol(doosra())
    "#;
    let (_, output, result) = run_code(code);
    assert_eq!(output, "1\n");
    assert_eq!(result.map_err(|e| e.kind), Err(ErrorKind::UndefinedVariable));
}

#[test]
fn test_closures_use_declaration_scope() {
    let code = r#"
        ye naam = "bahar"
        firseKaro banao() {
            ye naam = "andar"
            firseKaro dikhao() { bol(naam) }
            wapas bhejo dikhao
        }
        ye f = banao()
        firseKaro chalao() {
            ye naam = "call site"
            f()
        }
        chalao()
    "#;
    assert_eq!(output_of(code), "andar\n");
}

#[test]
fn test_closure_state_is_shared() {
    let code = r#"
        firseKaro counter() {
            ye n = 0
            firseKaro agla() {
                n = + n 1
                wapas bhejo n
            }
            wapas bhejo agla
        }
        ye c = counter()
        ye d = counter()
        c()
        c()
        bol(c())
        bol(d())
    "#;
    assert_eq!(output_of(code), "3\n1\n");
}

#[test]
fn test_missing_arguments_are_null_and_extras_are_evaluated() {
    let code = r#"
        firseKaro dikhao(a, b) {
            bol(a)
            bol(b)
        }
        dikhao(1)
        dikhao(1, 2, bol("extra"))
    "#;
    assert_eq!(output_of(code), "1\nnull\nextra\n1\n2\n");
}

#[test]
fn test_calling_non_function_fails() {
    let err = error_of("ye x = 5\nx()");
    assert_eq!(err.kind, ErrorKind::NotAFunction);
    assert_eq!(err.message, "x is not a function");

    assert_eq!(error_of("nahi()").kind, ErrorKind::UndefinedVariable);
}

#[test]
fn test_redeclaring_function_overwrites() {
    let code = r#"
        firseKaro f() { wapas bhejo 1 }
        firseKaro f() { wapas bhejo 2 }
        bol(f())
    "#;
    assert_eq!(output_of(code), "2\n");
}

#[test]
fn test_recursion() {
    let code = r#"
        firseKaro factorial(n) {
            agar <= n 1 { wapas bhejo 1 }
            wapas bhejo * n factorial(- n 1)
        }
        bol(factorial(5))
    "#;
    assert_eq!(output_of(code), "120\n");
}

#[test]
fn test_while_with_break_and_continue() {
    let code = r#"
        ye i = 0
        jabtak < i 5 {
            i = + i 1
            agar == i 3 { aage badho }
            agar == i 5 { roko }
            bol(i)
        }
        bol("done")
    "#;
    assert_eq!(output_of(code), "1\n2\n4\ndone\n");
}

#[test]
fn test_break_only_exits_innermost_loop() {
    let code = r#"
        ye a = 0
        jabtak < a 2 {
            a = + a 1
            dohraye {
                bol(+ "andar " a)
                roko
            }
            bol(+ "bahar " a)
        }
    "#;
    assert_eq!(output_of(code), "andar 1\nbahar 1\nandar 2\nbahar 2\n");
}

#[test]
fn test_continue_in_repeat_loop() {
    let code = r#"
        ye k = 0
        dohraye {
            k = + k 1
            agar < k 3 { aage badho }
            bol(k)
            roko
        }
    "#;
    assert_eq!(output_of(code), "3\n");
}

#[test]
fn test_return_from_inside_loop() {
    let code = r#"
        firseKaro dhundo() {
            ye i = 0
            dohraye {
                i = + i 1
                agar == i 4 { wapas bhejo * i 10 }
            }
        }
        bol(dhundo())
        bol("aage")
    "#;
    assert_eq!(output_of(code), "40\naage\n");
}

#[test]
fn test_break_does_not_escape_function_call() {
    let code = r#"
        firseKaro ruk() {
            bol("pehle")
            roko
            bol("kabhi nahi")
        }
        ye j = 0
        jabtak < j 2 {
            j = + j 1
            ruk()
            bol(j)
        }
    "#;
    assert_eq!(output_of(code), "pehle\n1\npehle\n2\n");
}

#[test]
fn test_while_never_runs_when_condition_falsy() {
    let (_, output, result) = run_code("jabtak 0 { bol(1) }");
    assert_eq!(output, "");
    assert_eq!(result, Ok(Value::Null));
}

#[test]
fn test_if_else_if_else() {
    let code = r#"
        firseKaro jaancho(n) {
            agar > n 10 { wapas bhejo "bada" }
            ya fir > n 5 { wapas bhejo "beech" }
            ya fir > n 0 { wapas bhejo "chhota" }
            ya { wapas bhejo "shunya" }
        }
        bol(jaancho(20), jaancho(7), jaancho(2), jaancho(0))
    "#;
    assert_eq!(output_of(code), "bada\nbeech\nchhota\nshunya\n");
}

#[test]
fn test_only_first_truthy_else_if_runs() {
    let code = r#"
        firseKaro sach(label) {
            bol(label)
            wapas bhejo 1
        }
        agar 0 { bol("a") } ya fir sach("c1") { bol("b") } ya fir sach("c2") { bol("c") }
    "#;
    assert_eq!(output_of(code), "c1\nb\n");
}

#[test]
fn test_truthiness_in_conditions() {
    let code = r#"
        firseKaro f() {}
        agar "" { bol("empty string") }
        agar "0" { bol("numeric string") }
        agar "haan" { bol("non-empty string") }
        agar 0 { bol("zero") }
        agar f { bol("function") }
        agar f() { bol("null") }
    "#;
    assert_eq!(output_of(code), "non-empty string\nfunction\n");
}

#[test]
fn test_top_level_return_stops_program() {
    let (_, output, result) = run_code("bol(1)\nwapas bhejo 5\nbol(2)");
    assert_eq!(output, "1\n");
    assert_eq!(result, Ok(Value::Number(5.0)));
}

#[test]
fn test_runtime_error_aborts_program() {
    assert_eq!(
        run_captured("bol(1)\nbol(/ 1 0)\nbol(2)"),
        "1\nDivision By Zero: division by zero\n"
    );
}

#[test]
fn test_environment_restored_after_failed_call() {
    let code = r#"
        ye x = "global"
        firseKaro tod() {
            ye x = "local"
            bol(/ 1 0)
        }
        tod()
    "#;
    let (interp, _, result) = run_code(code);
    assert!(result.is_err());
    assert_eq!(interp.get_variable("x"), Some(Value::Str("global".to_string())));
}

#[test]
fn test_interpreter_runs_several_programs() {
    let mut interp = Interpreter::new();
    let buffer = Rc::new(RefCell::new(Vec::new()));
    interp.set_output(buffer.clone());

    interp.run_program(&parse_source("ye x = 1\nroko")).unwrap();
    interp.run_program(&parse_source("bol(x)")).unwrap();

    assert_eq!(String::from_utf8_lossy(&buffer.borrow()), "1\n");
}

#[test]
fn test_interpreters_do_not_share_state() {
    let (first, _, _) = run_code("ye x = 1");
    let (second, _, _) = run_code("ye y = 2");
    assert_eq!(first.get_variable("y"), None);
    assert_eq!(second.get_variable("x"), None);
}

#[test]
fn test_global_bindings_are_sorted() {
    let (interp, _, _) = run_code("ye b = 2\nye a = 1\nfirseKaro c() {}");
    let names: Vec<String> = interp.global_bindings().into_iter().map(|(name, _)| name).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[test]
fn test_comments_and_semicolons_are_ignored() {
    let code = "ye x = 1; // pehla\nbol(x); // doosra\n";
    assert_eq!(output_of(code), "1\n");
}

#[test]
fn test_unknown_characters_are_skipped() {
    assert_eq!(output_of("ye x = @5\nbol(x) $"), "5\n");
}

#[test]
fn test_deep_recursion_runs_to_completion() {
    let code = r#"
        firseKaro jod(n) {
            agar <= n 0 { wapas bhejo 0 }
            wapas bhejo + n jod(- n 1)
        }
        bol(jod(10000))
    "#;
    assert_eq!(output_of(code), "50005000\n");
}

#[test]
fn test_deeply_nested_prefix_expression() {
    let code = format!("bol({}0)", "+ 1 ".repeat(3000));
    assert_eq!(output_of(&code), "3000\n");
}

#[test]
fn test_inner_function_keeps_its_call_frame() {
    let code = r#"
        firseKaro bahar() {
            firseKaro andar() { wapas bhejo 1 }
            wapas bhejo andar
        }
        ye g = bahar()
    "#;
    let (interp, _, result) = run_code(code);
    assert!(result.is_ok());

    let Some(Value::Function(function)) = interp.get_variable("g") else {
        panic!("g should hold a function");
    };
    // The frame of `bahar` is the closure of `andar` and still binds it
    let bound = function.closure.borrow().get("andar");
    assert!(matches!(bound, Some(Value::Function(ref inner)) if Rc::ptr_eq(inner, &function)));
}
