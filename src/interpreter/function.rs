use super::environment::Environment;
use super::evaluator::eval_block;
use super::object::Object;
use crate::frontend::grammar::FuncInfo;

use std::fmt;
use std::rc::Rc;

struct FunctionData {
    func_info: Rc<FuncInfo>,
    closure: Environment,
}

/// A function literal paired with the scope it was evaluated in.
#[derive(Clone)]
pub struct Function(Rc<FunctionData>);

impl Function {
    pub fn new(func_info: Rc<FuncInfo>, closure: Environment) -> Self {
        Function(Rc::new(FunctionData { func_info, closure }))
    }

    pub fn func_info(&self) -> &FuncInfo {
        &self.0.func_info
    }

    pub fn closure(&self) -> &Environment {
        &self.0.closure
    }

    /// Runs the body in a fresh scope parented on the captured one, never the
    /// caller's. A `return` inside the body stops at this boundary.
    #[tracing::instrument(level = "debug", skip_all, fields(arity = args.len()))]
    pub fn call(&self, args: Vec<Object>) -> Object {
        let params = &self.0.func_info.params;
        if params.len() != args.len() {
            return Object::Error(format!(
                "wrong number of arguments: want {}, got {}",
                params.len(),
                args.len()
            ));
        }

        let env = self.0.closure.extend();
        for (param, arg) in params.iter().zip(args) {
            env.set(&param.name, arg);
        }

        match eval_block(&self.0.func_info.body, &env) {
            Object::ReturnValue(value) => *value,
            other => other,
        }
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let params: Vec<_> = self.0.func_info.params.iter().map(|p| &p.name).collect();
        write!(f, "<fn({:?})>", params)
    }
}

impl PartialEq<Function> for Function {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Function {}
