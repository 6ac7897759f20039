use std::fs::{self};

use pyrite::{
    Session, evaluate,
    error::{InterpreterError, ParseError, RuntimeError},
    interpreter::value::core::Value,
    repl::{LineBuffer, LineStatus},
};
use walkdir::WalkDir;

#[test]
fn docs_examples_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("docs").into_iter()
                            .filter_map(Result::ok)
                            .filter(|e| e.path().extension().is_some_and(|ext| ext == "md"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        for (i, transcript) in extract_transcripts(&content).into_iter().enumerate() {
            count += 1;
            let actual = replay(&transcript);
            let expected = expected_output(&transcript);
            assert_eq!(actual,
                       expected,
                       "Transcript {} in {:?} produced different output:\n{}",
                       i + 1,
                       path,
                       transcript.join("\n"));
        }
    }

    assert!(count > 0, "no pyrite transcripts found under docs/");
}

fn extract_transcripts(markdown: &str) -> Vec<Vec<String>> {
    let mut blocks = Vec::new();
    let mut inside = false;
    let mut buf = Vec::new();

    for line in markdown.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```pyrite") {
            inside = true;
            buf.clear();
            continue;
        }
        if inside && trimmed.starts_with("```") {
            inside = false;
            blocks.push(buf.clone());
            continue;
        }
        if inside {
            buf.push(line.to_string());
        }
    }

    blocks
}

/// Feeds the prompt lines of a transcript through a session and collects
/// what would be printed.
fn replay(transcript: &[String]) -> Vec<String> {
    let mut session = Session::new();
    let mut buffer = LineBuffer::new();
    let mut printed = Vec::new();

    let mut run = |source: &str, printed: &mut Vec<String>| match session.run(source) {
        Ok(results) => printed.extend(results.iter().filter_map(pyrite::Evaluation::echo)),
        Err(e) => printed.push(e.to_string()),
    };

    for line in transcript {
        let input = line.strip_prefix(">>> ")
                        .or_else(|| line.strip_prefix("... "))
                        .or_else(|| (line == ">>>" || line == "...").then_some(""));
        let Some(input) = input else {
            continue;
        };
        if let LineStatus::Complete(source) = buffer.push(input) {
            run(&source, &mut printed);
        }
    }
    if let Some(source) = buffer.finish() {
        run(&source, &mut printed);
    }

    printed
}

fn expected_output(transcript: &[String]) -> Vec<String> {
    transcript.iter()
              .filter(|line| {
                  !line.starts_with(">>>") && !line.starts_with("...") && !line.trim().is_empty()
              })
              .cloned()
              .collect()
}

fn assert_value(src: &str, expected: Value) {
    match evaluate(src) {
        Ok(Some(value)) => assert_eq!(value, expected, "Script: {src}"),
        Ok(None) => panic!("Script produced no value: {src}"),
        Err(e) => panic!("Script failed: {e}\n{src}"),
    }
}

fn assert_failure(src: &str) -> InterpreterError {
    match evaluate(src) {
        Ok(value) => panic!("Script succeeded with {value:?} but was expected to fail"),
        Err(e) => e,
    }
}

fn int(n: i64) -> Value {
    Value::Integer(n)
}

fn float(r: f64) -> Value {
    Value::Float(r)
}

#[test]
fn precedence_of_arithmetic() {
    assert_value("2 + 3 * 4", int(14));
    assert_value("(2 + 3) * 4", int(20));
    assert_value("10 - 4 - 3", int(3));
    assert_value("2 * 3 ** 2", int(18));
    assert_value("1 + 2 * 3 - 4 / 2", float(5.0));
}

#[test]
fn exponentiation_binding() {
    assert_value("2 ** 3 ** 2", int(512));
    assert_value("-2 ** 2", int(-4));
    assert_value("2 ** -2", float(0.25));
    assert_value("(-2) ** 2", int(4));
    assert_value("2.0 ** 3", float(8.0));
}

#[test]
fn truncating_integer_division_and_remainder() {
    assert_value("-7 // 2", int(-3));
    assert_value("-7 % 2", int(-1));
    assert_value("100 // 10 // 3", int(3));
    assert_value("20 // 3 % 4", int(2));
    assert_value("17.0 // 9", float(1.0));
    assert_value("7 / 2", float(3.5));
}

#[test]
fn division_by_zero_is_error() {
    for src in ["5 / 0", "5 % 0", "5 // 0", "5.0 / 0.0"] {
        let err = assert_failure(src);
        assert!(matches!(err, InterpreterError::Runtime(RuntimeError::DivisionByZero { .. })),
                "{src}: {err}");
    }
}

#[test]
fn failed_division_does_not_assign() {
    let mut session = Session::new();
    session.run("x = 1").unwrap();

    assert!(session.run("x = 5 / 0").is_err());
    assert_eq!(session.environment().get("x"), Some(&int(1)));
}

#[test]
fn string_operations() {
    assert_value("'ab' * 3", Value::from("ababab"));
    assert_value("3 * \"ab\"", Value::from("ababab"));
    assert_value("\"ab\" * -1", Value::from(""));
    assert_value("'foo' + \"bar\"", Value::from("foobar"));
    assert_value("'A' < 'a'", Value::Bool(true));
    assert_value("'abc' <= 'abd'", Value::Bool(true));
    assert_value("'x' == 'x'", Value::Bool(true));
    assert_value("'x' != 'x'", Value::Bool(false));
}

#[test]
fn unsupported_operations_name_the_operator() {
    let err = assert_failure("'a' - 'b'");
    assert_eq!(err.to_string(),
               "Error on line 1: Unsupported operation: str - str.");

    assert_failure("1 + 'a'");
    assert_failure("'a' < 1");
    assert_failure("2.5 * 'a'");
}

#[test]
fn chained_comparisons() {
    assert_value("1 < 2 < 3", Value::Bool(true));
    assert_value("1 < 3 < 2", Value::Bool(false));
    assert_value("1 == 1 < 2", Value::Bool(true));
    assert_value("3 > 2 >= 2 != 1", Value::Bool(true));
    assert_value("2 == 2.0", Value::Bool(true));
    assert_value("True == True", Value::Bool(true));
}

#[test]
fn chained_comparison_short_circuits() {
    // 'undefined' is never evaluated because 2 < 1 is already false.
    assert_value("2 < 1 < undefined", Value::Bool(false));
}

#[test]
fn assignment_and_variables() {
    assert_value("x = 5\nx", int(5));
    assert_value("x = 5\nx == 5", Value::Bool(true));
    assert_value("a = b = 3\na + b", int(6));
    assert_value("x = 2\nx += 3\nx", int(5));
    assert_value("x = 7\nx -= 2\nx", int(5));
    assert_value("s = 'a'\ns += 'b'\ns", Value::from("ab"));
}

#[test]
fn undefined_variable_is_error() {
    let err = assert_failure("foo");
    assert_eq!(err,
               InterpreterError::Runtime(RuntimeError::UnknownVariable { name: "foo".to_string(),
                                                                         line: 1, }));
}

#[test]
fn if_elif_else() {
    let src = "\
x = 15
if x < 10:
    size = 'small'
elif x < 20:
    size = 'medium'
else:
    size = 'large'
size";
    assert_value(src, Value::from("medium"));

    assert_value("a = 5\nif a == 5:\n    b = 6\nb", int(6));
    assert_value("r = 0\nif 0:\n    r = 1\nelif '':\n    r = 2\nelse:\n    r = 3\nr", int(3));
}

#[test]
fn while_else_runs_without_break() {
    let src = "\
a = 1
s = 0
while a < 101:
    s = s + a
    a = a + 1
else:
    s = s * 2
s";
    assert_value(src, int(10100));

    let src = "\
a = 1
s = 0
while a < 101:
    s = s + a
    a = a + 1
s";
    assert_value(src, int(5050));
}

#[test]
fn break_skips_else() {
    let src = "\
s = 0
while True:
    s += 1
    if s == 10:
        break
else:
    s = 404
s";
    assert_value(src, int(10));
}

#[test]
fn else_runs_when_condition_starts_false() {
    let src = "\
s = 0
while False:
    s = 1
else:
    s = 404
s";
    assert_value(src, int(404));
}

#[test]
fn continue_skips_rest_of_iteration() {
    let src = "\
i = 0
odd = 0
while i < 10:
    i += 1
    if i % 2 == 0:
        continue
    odd += i
odd";
    assert_value(src, int(25));
}

#[test]
fn nested_loops_break_inner_only() {
    let src = "\
i = 0
count = 0
while i < 3:
    i += 1
    j = 0
    while True:
        j += 1
        count += 1
        if j == 2:
            break
count";
    assert_value(src, int(6));
}

#[test]
fn loop_signals_outside_loops_are_errors() {
    assert!(matches!(assert_failure("break"),
                     InterpreterError::Runtime(RuntimeError::BreakOutsideLoop { line: 1 })));
    assert!(matches!(assert_failure("x = 1\nif x:\n    continue"),
                     InterpreterError::Runtime(RuntimeError::ContinueOutsideLoop { line: 3 })));
}

#[test]
fn syntax_errors() {
    assert!(matches!(assert_failure("1.2.3"),
                     InterpreterError::Parse(ParseError::InvalidNumber { .. })));
    assert!(matches!(assert_failure("'open"),
                     InterpreterError::Parse(ParseError::UnterminatedString { .. })));
    assert!(matches!(assert_failure("1 + 2 = 3"),
                     InterpreterError::Parse(ParseError::InvalidAssignmentTarget { .. })));
    assert!(matches!(assert_failure("(1 + 2"),
                     InterpreterError::Parse(ParseError::ExpectedClosingParen { .. })));
    assert!(matches!(assert_failure("if True\n    x = 1"),
                     InterpreterError::Parse(ParseError::Expected { .. })));
    assert!(matches!(assert_failure("if True:\nx = 1"),
                     InterpreterError::Parse(ParseError::Expected { .. })));
    assert!(matches!(assert_failure("x = 1 2"),
                     InterpreterError::Parse(ParseError::UnexpectedTrailingTokens { .. })));
    assert!(matches!(assert_failure("99999999999999999999"),
                     InterpreterError::Parse(ParseError::LiteralTooLarge { .. })));
}

#[test]
fn inconsistent_dedent_is_error() {
    let src = "\
if True:
        x = 1
    y = 2";
    assert!(matches!(assert_failure(src),
                     InterpreterError::Parse(ParseError::InconsistentDedent { line: 3 })));
}

#[test]
fn syntax_error_prevents_any_evaluation() {
    let mut session = Session::new();

    assert!(session.run("x = 1\ny = (").is_err());
    assert!(session.environment().get("x").is_none());
}

#[test]
fn comments_and_blank_lines_are_ignored() {
    let src = "\
# setup
total = 0   # running sum

i = 3
while i > 0:
    # decrement
    total += i

    i -= 1
total";
    assert_value(src, int(6));
}

#[test]
fn integer_overflow_is_error() {
    assert!(matches!(assert_failure("9223372036854775807 + 1"),
                     InterpreterError::Runtime(RuntimeError::Overflow { .. })));
    assert!(matches!(assert_failure("2 ** 64"),
                     InterpreterError::Runtime(RuntimeError::Overflow { .. })));
}

#[test]
fn error_lines_point_at_the_statement() {
    let err = assert_failure("x = 1\ny = 2\nz = x / 0");
    assert_eq!(err.to_string(), "Error on line 3: Division by zero.");
}

#[test]
fn session_keeps_variables_between_runs() {
    let mut session = Session::new();
    session.run("counter = 1").unwrap();
    session.run("counter += 41").unwrap();

    let results = session.run("counter").unwrap();
    assert_eq!(results[0].value, Some(int(42)));
    assert_eq!(results[0].echo().as_deref(), Some("42"));
}

#[test]
fn compound_statements_are_not_echoed() {
    let mut session = Session::new();
    let results = session.run("x = 1\nif x:\n    x\nx").unwrap();

    let echoes: Vec<_> = results.iter().map(pyrite::Evaluation::echo).collect();
    assert_eq!(echoes, vec![None, None, Some("1".to_string())]);
}

#[test]
fn repl_buffer_keeps_else_in_block() {
    let mut buffer = LineBuffer::new();

    for line in ["while False:", "    x = 1", "else:", "    x = 2"] {
        assert_eq!(buffer.push(line), LineStatus::NeedMore);
    }
    let LineStatus::Complete(source) = buffer.push("") else {
        panic!("block should be complete");
    };

    assert_eq!(evaluate(&format!("{source}x")).unwrap(), Some(int(2)));
}

#[test]
fn huge_repetition_is_an_error_not_a_crash() {
    assert!(matches!(assert_failure("'a' * 9223372036854775807"),
                     InterpreterError::Runtime(RuntimeError::Overflow { line: 1 })));
    assert!(matches!(assert_failure("'ab' * 4611686018427387904"),
                     InterpreterError::Runtime(RuntimeError::Overflow { line: 1 })));
    assert_value("'' * 9223372036854775807", Value::from(""));
}

#[test]
fn large_integers_widen_to_floats() {
    assert_value("9007199254740993 / 1", float(9_007_199_254_740_992.0));
    assert_value("9007199254740993 + 0.5", float(9_007_199_254_740_992.0));
    assert_value("9007199254740993 > 1.5", Value::Bool(true));
    assert_value("2 ** 60 * 1.0", float(1_152_921_504_606_846_976.0));
}

#[test]
fn exponents_beyond_u32_range() {
    assert_value("1 ** 5000000000", int(1));
    assert_value("0 ** 5000000000", int(0));
    assert_value("(-1) ** 5000000001", int(-1));
    assert_value("(-1) ** 5000000000", int(1));
    assert_value("2 ** 5000000000", float(f64::INFINITY));
}

#[test]
fn float_literal_with_trailing_dot() {
    assert_value("1.", float(1.0));
    assert_value("1. + 2", float(3.0));
}

#[test]
fn loop_value_is_last_statement_before_break() {
    let src = "\
i = 0
while True:
    i += 1
    if i == 3:
        break";
    assert_value(src, int(3));

    let src = "\
i = 0
while i < 3:
    i += 1
    continue
    i = 100";
    assert_value(src, int(3));
}

#[test]
fn results_before_a_runtime_error_are_delivered() {
    let mut session = Session::new();
    let mut echoes = Vec::new();

    let result = session.run_each("1 + 1\nx = 3\nx * 2\nx / 0\n99", |evaluation| {
                            echoes.extend(evaluation.echo());
                        });

    assert_eq!(result,
               Err(InterpreterError::Runtime(RuntimeError::DivisionByZero { line: 4 })));
    assert_eq!(echoes, ["2", "6"]);
    assert_eq!(session.environment().get("x"), Some(&int(3)));
}
