use super::builtins;
use super::environment::Environment;
use super::function::Function;
use super::object::{Object, NULL};
use crate::frontend::grammar::{Block, Expr, ExprType, Identifier, Program, Stmt, StmtType};

/// Returns early with an `Error`, or with a `ReturnValue` still travelling
/// out of a function body. Any other value is handed back.
macro_rules! propagate {
    ($value:expr) => {
        match $value {
            value @ (Object::Error(_) | Object::ReturnValue(_)) => return value,
            value => value,
        }
    };
}

/// Owns the long-lived top-level scope that successive programs run against.
pub struct Interpreter {
    globals: Environment,
}

impl Interpreter {
    pub fn new() -> Self {
        Interpreter {
            globals: Environment::new(),
        }
    }

    pub fn globals(&self) -> &Environment {
        &self.globals
    }

    /// Takes `&mut self` so only one program runs against the globals at a time.
    pub fn eval_program(&mut self, program: &Program) -> Object {
        eval_program(program, &self.globals)
    }

    /// Parses and evaluates one line. Diagnostics prevent evaluation.
    pub fn run_line(&mut self, source: &str) -> Result<Object, Vec<String>> {
        let (program, errors) = crate::parse(source);
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(self.eval_program(&program))
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

pub fn eval_program(program: &Program, env: &Environment) -> Object {
    let mut result = NULL;

    for stmt in program.stmts.iter() {
        result = eval_statement(stmt, env);

        match result {
            Object::ReturnValue(value) => return *value,
            Object::Error(_) => return result,
            _ => {}
        }
    }

    result
}

/// Evaluates statements in `env` as given; callers create the child scope.
/// A `ReturnValue` is passed up still wrapped.
pub fn eval_block(block: &Block, env: &Environment) -> Object {
    let mut result = NULL;

    for stmt in block.stmts.iter() {
        result = eval_statement(stmt, env);

        if matches!(result, Object::ReturnValue(_) | Object::Error(_)) {
            return result;
        }
    }

    result
}

pub fn eval_statement(stmt: &Stmt, env: &Environment) -> Object {
    match &stmt.stmt {
        StmtType::Let(name, expr) => {
            let value = propagate!(eval_expression(expr, env));
            tracing::trace!(name = %name.name, %value, "let");
            env.set(&name.name, value);
            NULL
        }
        StmtType::Return(expr) => {
            let value = propagate!(eval_expression(expr, env));
            Object::ReturnValue(Box::new(value))
        }
        StmtType::Expression(expr) => eval_expression(expr, env),
        StmtType::Block(block) => eval_block(block, &env.extend()),
    }
}

pub fn eval_expression(expr: &Expr, env: &Environment) -> Object {
    match &expr.expr {
        ExprType::Identifier(ident) => eval_identifier(ident, env),
        ExprType::Integer(n) => Object::Integer(*n),
        ExprType::Str(s) => Object::String(s.clone()),
        ExprType::Boolean(b) => Object::from(*b),
        ExprType::Prefix(op, operand) => {
            let value = propagate!(eval_expression(operand, env));
            Object::apply_prefix_op(*op, value)
        }
        ExprType::Infix(op, lhs, rhs) => {
            // Right operand first.
            let rhs = propagate!(eval_expression(rhs, env));
            let lhs = propagate!(eval_expression(lhs, env));
            Object::apply_infix_op(*op, lhs, rhs)
        }
        ExprType::If(condition, consequence, alternative) => {
            eval_if(condition, consequence, alternative.as_ref(), env)
        }
        ExprType::Function(func_info) => {
            Object::Function(Function::new(func_info.clone(), env.clone()))
        }
        ExprType::Call(callee, args) => eval_call(callee, args, env),
    }
}

fn eval_identifier(ident: &Identifier, env: &Environment) -> Object {
    if let Some(value) = env.get(&ident.name) {
        return value;
    }

    match builtins::lookup(&ident.name) {
        Some(builtin) => Object::Builtin(builtin),
        None => Object::Error(format!("variable doesn't exist {}", ident.name)),
    }
}

fn eval_if(
    condition: &Expr,
    consequence: &Block,
    alternative: Option<&Block>,
    env: &Environment,
) -> Object {
    let condition = propagate!(eval_expression(condition, env));

    if condition.is_truthy() {
        eval_block(consequence, &env.extend())
    } else if let Some(alternative) = alternative {
        eval_block(alternative, &env.extend())
    } else {
        NULL
    }
}

fn eval_call(callee: &Expr, raw_args: &[Expr], env: &Environment) -> Object {
    let callee = propagate!(eval_expression(callee, env));

    let mut args = Vec::with_capacity(raw_args.len());
    for raw_arg in raw_args.iter() {
        args.push(propagate!(eval_expression(raw_arg, env)));
    }

    apply_function(callee, args)
}

pub fn apply_function(callee: Object, args: Vec<Object>) -> Object {
    match callee {
        Object::Function(func) => func.call(args),
        Object::Builtin(builtin) => builtin.call(args),
        other => Object::Error(format!("not a function: {}", other.kind())),
    }
}
