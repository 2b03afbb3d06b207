use std::fs;

use operon::{evaluate, interpreter::value::core::Number};
use pretty_assertions::assert_eq;
use walkdir::WalkDir;

#[test]
fn script_files_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/scripts").into_iter()
                                     .filter_map(Result::ok)
                                     .filter(|e| e.path().extension().is_some_and(|ext| ext == "calc"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        if let Err((line, e)) = evaluate(&content, false) {
            panic!("Script {path:?} failed on line {line}:\n{e}");
        }
    }

    assert!(count > 0, "No scripts found in tests/scripts");
}

fn assert_success(src: &str) {
    if let Err((line, e)) = evaluate(src, false) {
        panic!("Script failed on line {line}: {e}");
    }
}

fn assert_failure(src: &str) {
    if evaluate(src, false).is_ok() {
        panic!("Script succeeded but was expected to fail")
    }
}

fn assert_value(src: &str, expected: i64) {
    match evaluate(src, false) {
        Ok(value) => assert_eq!(value, Some(Number::from(expected)), "{src}"),
        Err((line, e)) => panic!("Script failed on line {line}: {e}"),
    }
}

#[test]
fn assignment_and_basic_arithmetic() {
    assert_success("x = 1 + 2\nassert(x == 3)");
    assert_success("x = 7 * 9\nassert(x == 63)");
    assert_success("x = 8 - 5\nassert(x == 3)");
    assert_success("x = 10 / 2\nassert(x == 5)");
    assert_success("x = 7 // 2\nassert(x == 3)");
    assert_success("x = 2 ^ 10\nassert(x == 1024)");
}

#[test]
fn precedence_follows_tiers() {
    assert_value("2 + 3 * 4", 14);
    assert_value("(2 + 3) * 4", 20);
    assert_value("2 * 3 ^ 2", 18);
    assert_value("-2 ^ 2", -4);
    assert_value("-7 % 3", 2);
    assert_value("1 + 2 == 3", 1);
    assert_value("1 < 2 == 1", 1);
}

#[test]
fn associativity() {
    assert_value("10 - 4 - 3", 3);
    assert_value("64 / 4 / 2", 8);
    assert_value("2 ^ 3 ^ 2", 512);
    assert_success("a = b = 5\nassert(a == 5)\nassert(b == 5)");
}

#[test]
fn implicit_multiplication() {
    assert_value("2 3", 6);
    assert_value("2(3)", 6);
    assert_value("(2)(3)", 6);
    assert_success("x = 4\nassert(3 x == 12)\nassert(x x == 16)");
}

#[test]
fn modifiers_are_told_apart_from_operators() {
    assert_value("8 - 3", 5);
    assert_value("-3", -3);
    assert_value("8 * -3", -24);
    assert_value("8 - -3", 11);
    assert_value("3! + 1", 7);
    assert_value("!0", 1);
}

#[test]
fn exact_arithmetic() {
    assert_success("assert(1 / 3 + 1 / 3 == 2 / 3)");
    assert_success("assert(2 ^ 100 / 2 ^ 99 == 2)");
    assert_success("assert(20! == 2432902008176640000)");
    assert_success("assert(2 == 2.0)");
    assert_success("assert(4 ^ -1 == 1 / 4)");
    assert_value("1 ^ 5000000000", 1);
    assert_value("(-1) ^ 5000000001", -1);
    assert_value("(-1) ^ -5000000000", 1);
    assert_value("0 ^ 5000000000", 0);
    assert_failure("2 ^ 5000000000");
}

#[test]
fn increments_and_decrements() {
    assert_success("x = 1\nassert(x++ == 1)\nassert(x == 2)\nassert(++x == 3)");
    assert_success("x = 5\nassert(x-- == 5)\nassert(--x == 3)");
    assert_failure("5++");
    assert_failure("pi++");
}

#[test]
fn compound_assignment() {
    assert_success("x = 5\nx += 3\nassert(x == 8)");
    assert_success("x = 5\nx -= 3\nassert(x == 2)");
    assert_success("x = 5\nx *= 3\nassert(x == 15)");
    assert_success("x = 6\nx /= 4\nassert(x == 3 / 2)");
    assert_success("x = 7\nx %= 4\nassert(x == 3)");
    assert_success("x = 3\nx ^= 2\nassert(x == 9)");
}

#[test]
fn deferred_assignment() {
    assert_success("a = 42\nppa := ++a\nassert(a == 42)\nppa\nassert(a == 43)\nppa\nassert(a == 44)");
    assert_success("a = 1\nb := $a\na = 2\nassert(b == 1)");
    assert_success("x = 2\ny := x * 10\nx = 3\nassert(y == 30)");
    assert_success("a = 5\nc := b := a\na = 9\nassert(b == 9)\nassert(c == 9)");
}

#[test]
fn self_reading_definitions_fail() {
    assert_failure("a := a + 1\na");
    assert_failure("p := q\nq := p\np");
    assert_value("a := a + 1\nb = 4\nb", 4);
}

#[test]
fn ternary_selects_lazily() {
    assert_value("1 ? 10 : 20", 10);
    assert_value("0 ? 10 : 20", 20);
    assert_value("0 ? 1 : 0 ? 2 : 3", 3);
    assert_success("x = 0\n1 ? (x = 5) : (x = 9)\nassert(x == 5)");
    assert_success("x = 0\n0 ? (x = 5) : 7\nassert(x == 0)");
    assert_failure("1 : 2");
}

#[test]
fn logic_short_circuits() {
    assert_success("x = 0\n0 && (x = 1)\nassert(x == 0)");
    assert_success("x = 0\n1 || (x = 1)\nassert(x == 0)");
    assert_success("x = 0\n1 && (x = 1)\nassert(x == 1)");
    assert_value("0 || 0", 0);
    assert_value("1 && 1", 1);
}

#[test]
fn factorial_domain() {
    assert_value("0!", 1);
    assert_value("5!", 120);
    assert_failure("(-1)!");
    assert_failure("1.5!");
}

#[test]
fn user_functions() {
    assert_success(":define f(x) = x + 1\n:define f(x, y) = x * y\nassert(f(2) == 3)\nassert(f(2, 5) == 10)");
    assert_success(":define fact(n) = n <= 1 ? 1 : n * fact(n - 1)\nassert(fact(10) == 3628800)");
    assert_success("x = 10\n:define g(x) = x * 2\nassert(g(3) == 6)\nassert(x == 10)");
    assert_success("k = 3\n:define h(x) = x + k\nk = 4\nassert(h(1) == 5)");
    assert_failure(":define loop(n) = loop(n + 1)\nloop(0)");
}

#[test]
fn builtins() {
    assert_value("abs(-4)", 4);
    assert_value("sign(-4)", -1);
    assert_value("floor(7 / 2)", 3);
    assert_value("ceil(7 / 2)", 4);
    assert_value("sqrt(49)", 7);
    assert_value("min(3, 9)", 3);
    assert_value("max(3, 9)", 9);
    assert_value("round(7 / 2)", 4);
    assert_value("round(-7 / 2)", -4);
    assert_value("round(5 / 3)", 2);
    assert_value("round(-4 / 3)", -1);
    assert_failure("assert(0)");
    assert_failure("assert(void)");
}

#[test]
fn errors_report_their_line() {
    let (line, _) = evaluate("x = 1\ny = 2\n1 / 0", false).unwrap_err();
    assert_eq!(line, 3);

    let (line, _) = evaluate("x = (1 +\\\n 2\n)", false).unwrap_err();
    assert_eq!(line, 1);
}

#[test]
fn comments_and_continuations() {
    assert_value("# leading comment\nx = 2 # trailing comment\nx + \\\n  1", 3);
}
