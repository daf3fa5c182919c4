use std::{cell::RefCell, collections::VecDeque, rc::Rc};

use keel::{interpreter::console::Console, run_with_console};

/// A console that records what the program prints and serves scripted input.
#[derive(Default)]
struct RecordingConsole {
    printed: Vec<String>,
    inputs: VecDeque<String>,
    cleared: usize,
}

impl Console for RecordingConsole {
    fn print(&mut self, text: &str) {
        self.printed.push(text.to_string());
    }

    fn input(&mut self, _prompt: &str) -> String {
        self.inputs.pop_front().unwrap_or_default()
    }

    fn clear(&mut self) {
        self.cleared += 1;
    }
}

fn run_recorded(src: &str, inputs: &[&str]) -> (Result<(), String>, Vec<String>, usize) {
    let console =
        Rc::new(RefCell::new(RecordingConsole { inputs: inputs.iter()
                                                              .map(ToString::to_string)
                                                              .collect(),
                                                ..RecordingConsole::default() }));
    let result = run_with_console(src, Rc::clone(&console) as Rc<RefCell<dyn Console>>)
        .map_err(|e| e.to_string());

    let console = console.borrow();
    (result, console.printed.clone(), console.cleared)
}

fn assert_success(src: &str) {
    let (result, _, _) = run_recorded(src, &[]);
    if let Err(e) = result {
        panic!("Script failed: {e}");
    }
}

fn assert_prints(src: &str, expected: &[&str]) {
    let (result, printed, _) = run_recorded(src, &[]);
    if let Err(e) = result {
        panic!("Script failed: {e}");
    }
    assert_eq!(printed, expected, "printed output mismatch for:\n{src}");
}

fn assert_failure_with(src: &str, needle: &str) {
    match run_recorded(src, &[]).0 {
        Ok(()) => panic!("Script succeeded but was expected to fail:\n{src}"),
        Err(e) => {
            assert!(e.contains(needle),
                    "expected error containing '{needle}', got '{e}'")
        },
    }
}

#[test]
fn arithmetic_and_precedence() {
    assert_prints("print(1 + 2 * 3);", &["7"]);
    assert_prints("print((1 + 2) * 3);", &["9"]);
    assert_prints("print(10 / 4);", &["2.5"]);
    assert_prints("print(8 - 5 - 1);", &["2"]);
    assert_prints("print(-3 + 5);", &["2"]);
}

#[test]
fn string_concatenation() {
    assert_prints("print(\"foo\" + \"bar\");", &["foobar"]);
    assert_failure_with("print(1 + \"bar\");",
                        "No operator '+' exists for types float and string.");
}

#[test]
fn logic_and_equality() {
    assert_prints("print(true || false);", &["true"]);
    assert_prints("print(true && false);", &["false"]);
    assert_prints("print(1 == 1 && \"a\" != \"b\");", &["true"]);
    assert_failure_with("print(1 && true);", "No operator '&&'");
    assert_failure_with("print(1 == \"a\");", "No operator '=='");
}

#[test]
fn unary_negation_is_numbers_only() {
    assert_prints("print(-(2 * 3));", &["-6"]);
    assert_failure_with("print(-\"x\");", "No unary operator '-'");
}

#[test]
fn declarations_and_inference() {
    assert_prints("var x = 1 + 1;\nprint(x);", &["2"]);
    assert_prints("let x: float = 4;\nprint(x);", &["4"]);
    assert_prints("let anything: object = \"s\";\nprint(anything);", &["s"]);
    assert_failure_with("let x: float = \"s\";",
                        "Expected a value of type float, found string.");
}

#[test]
fn assignments_keep_the_declared_type() {
    assert_prints("var x = 1;\nx = 2;\nprint(x);", &["2"]);
    assert_failure_with("var x = 1;\nx = \"s\";",
                        "Expected a value of type float, found string.");
    assert_failure_with("x = 1;", "Could not resolve 'x'.");
}

#[test]
fn constants_reject_assignment() {
    assert_prints("const k: float = 7;\nprint(k);", &["7"]);
    assert_failure_with("const k: float = 7;\nk = 8;",
                        "Cannot change the value of constant 'k'.");
}

#[test]
fn scopes_shadow_and_do_not_leak() {
    assert_prints("var x = 1;\n{\n  var x = 2;\n  print(x);\n}\nprint(x);",
                  &["2", "1"]);
    assert_failure_with("{ var x = 1; }\nprint(x);", "Could not resolve 'x'.");
    assert_failure_with("var x = 1;\nvar x = 2;",
                        "Variable 'x' has already been declared in this scope.");
}

#[test]
fn clause_bodies_forbid_bare_declarations() {
    assert_failure_with("if (true) var x = 1;", "Expected an identifier");
    assert_success("if (true) { var x = 1; }");
}

#[test]
fn if_elseif_else_chains() {
    let chain = "func describe(n: float): void {\n\
                 if (n == 0) { print(\"zero\"); }\n\
                 elseif (n == 1) { print(\"one\"); }\n\
                 else { print(\"many\"); }\n\
                 }\n\
                 describe(0);\ndescribe(1);\ndescribe(5);";
    assert_prints(chain, &["zero", "one", "many"]);
    assert_failure_with("if (1) { }", "Expected a value of type bool, found float.");
}

#[test]
fn while_loops_and_break() {
    assert_prints("var i = 0;\nwhile (i != 3) { i = i + 1; }\nprint(i);", &["3"]);
    assert_prints("var i = 0;\nwhile (true) {\n  i = i + 1;\n  if (i == 5) break;\n}\nprint(i);",
                  &["5"]);
    assert_failure_with("while (\"yes\") { }",
                        "Expected a value of type bool, found string.");
}

#[test]
fn for_loops_cover_an_inclusive_range() {
    assert_prints("for (let i = 1, 3) { print(i); }", &["1", "2", "3"]);
    assert_prints("for (let i = 3, 1) { print(i); }", &[]);
    assert_prints("for (let i = 1, 10) { if (i == 2) break;\nprint(i); }", &["1"]);
}

#[test]
fn for_bounds_must_be_numeric() {
    assert_failure_with("for (let i = true, 3) { }",
                        "Expected a value of type float, found bool.");
    assert_failure_with("for (let i = 1, \"x\") { }",
                        "Expected a value of type float, found string.");
}

#[test]
fn for_iterator_is_scoped_to_the_loop() {
    assert_failure_with("for (let i = 1, 3) { }\nprint(i);", "Could not resolve 'i'.");
}

#[test]
fn functions_return_values() {
    assert_prints("func add(a: float, b: float): float { return a + b; }\nprint(add(1, 2));",
                  &["3"]);
    assert_prints("func greet(): void { print(\"hi\"); }\ngreet();", &["hi"]);
}

#[test]
fn functions_recurse() {
    let fact = "func fact(n: float): float {\n\
                if (n == 0) { return 1; }\n\
                return n * fact(n - 1);\n\
                }\n\
                print(fact(5));";
    assert_prints(fact, &["120"]);
}

#[test]
fn closures_capture_the_declaration_scope() {
    let shadowed = "var base = 10;\n\
                    func addBase(x: float): float { return x + base; }\n\
                    {\n  var base = 100;\n  print(addBase(1));\n}";
    assert_prints(shadowed, &["11"]);

    let counter = "var count = 0;\n\
                   func bump(): void { count = count + 1; }\n\
                   bump();\nbump();\nprint(count);";
    assert_prints(counter, &["2"]);
}

#[test]
fn calls_check_arity_and_argument_types() {
    let add = "func add(a: float, b: float): float { return a + b; }\n";
    assert_failure_with(&format!("{add}print(add(1));"), "2 arguments expected, got 1.");
    assert_failure_with(&format!("{add}print(add(1, \"x\"));"),
                        "Expected a value of type float, found string.");
    assert_failure_with("var x = 1;\nx();", "'x' is not a function.");
    assert_failure_with("nope();", "Could not resolve 'nope'.");
}

#[test]
fn object_parameters_keep_the_runtime_type() {
    let show = "func show(x: object): void { print(x); }\nshow(1);\nshow(\"s\");\nshow(true);";
    assert_prints(show, &["1", "s", "true"]);

    // The parameter is bound with the argument's runtime type, so operators
    // see a float, not an opaque object.
    assert_prints("func twice(x: object): void { print(x + x); }\ntwice(2);", &["4"]);
}

#[test]
fn functions_are_first_class() {
    let double = "func double(x: float): float { return x * 2; }\n";
    assert_prints(&format!("{double}let f: (float) -> float = double;\nprint(f(4));"),
                  &["8"]);
    assert_failure_with(&format!("{double}let g: (string) -> float = double;"),
                        "Expected a value of type (string) -> float");
}

#[test]
fn return_values_are_checked_against_the_declared_type() {
    // An explicit return is checked even when the result is discarded.
    assert_failure_with("func f(): float { return \"s\"; }\nf();",
                        "Expected a value of type float, found string.");
    // A bare return is an explicit void return.
    assert_failure_with("func f(): float { return; }\nf();",
                        "Expected a value of type float, found void.");
    assert_success("func f(): void { return; }\nf();");
}

#[test]
fn fall_through_returns_void() {
    let quiet = "func quiet(): float { var x = 1; }\n";

    // Discarded as a statement, the missing value goes unnoticed.
    assert_success(&format!("{quiet}quiet();"));
    // Used as an expression, it fails the declared return type.
    assert_failure_with(&format!("{quiet}print(quiet());"),
                        "Expected a value of type float, found void.");
}

#[test]
fn control_flow_cannot_escape() {
    assert_failure_with("break;", "'break' can only be used inside a loop.");
    assert_failure_with("return;", "'return' can only be used inside a function.");
    assert_failure_with("func f(): void { break; }\nf();",
                        "'break' can only be used inside a loop.");
}

#[test]
fn break_stops_only_the_innermost_loop() {
    let nested = "for (let i = 1, 2) {\n\
                  var j = 0;\n\
                  while (true) {\n  j = j + 1;\n  if (j == 2) break;\n}\n\
                  print(i + j);\n\
                  }";
    assert_prints(nested, &["3", "4"]);
}

#[test]
fn returned_closures_keep_their_captured_scope() {
    let counter = "func makeAdder(): (float) -> float {\n\
                   var base = 100;\n\
                   func add(x: float): float { return x + base; }\n\
                   return add;\n\
                   }\n\
                   let f: (float) -> float = makeAdder();\n\
                   print(f(1));";
    assert_prints(counter, &["101"]);
}

#[test]
fn return_escapes_nested_loops() {
    let find = "func find(): float {\n\
                for (let i = 1, 10) {\n  if (i == 4) return i;\n}\n\
                return 0;\n\
                }\n\
                print(find());";
    assert_prints(find, &["4"]);
}

#[test]
fn arrays_length_and_get() {
    let xs = "let xs: float[] = [1, 2, 3];\n";
    assert_prints(&format!("{xs}print(length(xs));"), &["3"]);
    assert_prints(&format!("{xs}print(get(xs, 1));"), &["2"]);
    assert_prints(&format!("{xs}let first: float = get(xs, 0);\nprint(first);"),
                  &["1"]);
    assert_prints("print([1, 2, 3]);", &["[1, 2, 3]"]);
}

#[test]
fn get_truncates_the_index() {
    // There are no decimal literals; 3 / 2 produces the fractional 1.5.
    assert_prints("print(get([10, 20], 3 / 2));", &["20"]);
}

#[test]
fn array_access_is_bounds_checked() {
    assert_failure_with("print(get([1, 2], 2));",
                        "Index 2 is out of range for an array of 2 elements.");
    assert_failure_with("print(get([1, 2], 0 - 1));", "Index -1 is out of range");
}

#[test]
fn array_literals_must_not_be_empty() {
    assert_failure_with("var xs = [];", "Array literals must have at least one element.");
}

#[test]
fn array_element_types_come_from_the_first_element() {
    // Later elements are not checked against the first one's type; the
    // mismatch only surfaces when something relies on the declared type.
    assert_prints("var xs = [1, \"two\"];\nprint(get(xs, 1));", &["two"]);
}

#[test]
fn arrays_compare_by_identity() {
    let src = "var xs = [1, 2];\nvar ys = xs;\nvar zs = [1, 2];\n\
               print(xs == ys);\nprint(xs == zs);";
    assert_prints(src, &["true", "false"]);
}

#[test]
fn input_is_routed_through_the_console() {
    let (result, printed, _) = run_recorded("print(input(\"name? \") + \"!\");", &["zoe"]);
    assert_eq!(result, Ok(()));
    assert_eq!(printed, vec!["zoe!"]);
}

#[test]
fn clear_is_routed_through_the_console() {
    let (result, _, cleared) = run_recorded("clear();\nclear();", &[]);
    assert_eq!(result, Ok(()));
    assert_eq!(cleared, 2);
}

#[test]
fn the_error_builtin_aborts_the_run() {
    let (result, printed, _) = run_recorded("print(\"before\");\nerror(\"boom\");\nprint(\"after\");",
                                            &[]);
    assert!(result.is_err_and(|e| e.contains("boom")));
    assert_eq!(printed, vec!["before"]);
}

#[test]
fn lexical_errors_are_reported() {
    assert_failure_with("print(@);", "Invalid character: '@'.");
    assert_failure_with("print(\"abc", "Unterminated string literal.");
}

#[test]
fn nul_bytes_do_not_truncate_the_program() {
    let (result, printed, _) = run_recorded("print(1);\0print(2);", &[]);
    assert!(result.is_err_and(|e| e.contains("Invalid character")));
    assert_eq!(printed, Vec::<String>::new());
}

#[test]
fn parse_errors_are_reported() {
    assert_failure_with("var x = 1", "Expected ';', found end of input.");
    assert_failure_with("let x: int = 1;", "'int' is not a type.");
    assert_failure_with("print(1.5);", "found '.'");
}

#[test]
fn errors_carry_line_numbers() {
    assert_failure_with("var x = 1;\nvar y = 2;\ny = \"s\";", "Error on line 3:");
}
