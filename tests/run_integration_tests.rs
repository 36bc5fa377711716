use rusty_monkey::interpreter::Interpreter;

use regex::Regex;
use test_generator::test_resources;

#[derive(Debug, PartialEq)]
enum LineResult {
    Value(String),
    ParserError(Vec<String>),
}

#[test_resources("tests/cases/**/*.mk")]
fn test_interpreter(file: &str) {
    let source = std::fs::read_to_string(file).unwrap();

    let output_regexer = Regex::new(r"// expect: (.*)$").unwrap();
    let parser_error_regexer = Regex::new(r"// expect parse error: (.*)$").unwrap();

    // Every line runs against the same top-level scope, like the REPL.
    let mut interpreter = Interpreter::new();

    for (line_no, line) in source.lines().enumerate() {
        let code = match line.find("// expect") {
            Some(idx) => &line[..idx],
            None => line,
        };
        if code.trim().is_empty() || code.trim_start().starts_with("//") {
            continue;
        }

        let result = match interpreter.run_line(code) {
            Ok(value) => LineResult::Value(value.to_string()),
            Err(errors) => LineResult::ParserError(errors),
        };

        if let Some(r) = output_regexer.captures(line) {
            let expected = LineResult::Value(r.get(1).unwrap().as_str().to_owned());
            assert_eq!(expected, result, "{}:{}", file, line_no + 1);
        } else if let Some(r) = parser_error_regexer.captures(line) {
            let expected = r.get(1).unwrap().as_str();
            match &result {
                LineResult::ParserError(errors) => assert!(
                    errors.iter().any(|e| e.contains(expected)),
                    "{}:{}: {:?} does not mention {:?}",
                    file,
                    line_no + 1,
                    errors,
                    expected
                ),
                other => panic!("{}:{}: expected parse error, got {:?}", file, line_no + 1, other),
            }
        } else if let LineResult::ParserError(errors) = &result {
            panic!("{}:{}: unexpected parse errors {:?}", file, line_no + 1, errors);
        }
    }
}
