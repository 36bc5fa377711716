pub mod frontend;
pub mod interpreter;

use frontend::{Parser, Program};
use interpreter::{Environment, Object};

/// Parses `source` into a program plus its rendered diagnostics. The program
/// holds every statement that parsed cleanly; evaluate it only when the
/// diagnostics are empty.
pub fn parse(source: &str) -> (Program, Vec<String>) {
    let mut parser = Parser::new(source);
    let program = parser.parse_program();
    (program, parser.error_messages())
}

/// Evaluates `program` against `env`. Bindings made at the top level persist
/// in `env` for later calls.
pub fn evaluate(program: &Program, env: &Environment) -> Object {
    interpreter::evaluator::eval_program(program, env)
}
