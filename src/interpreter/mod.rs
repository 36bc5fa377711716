pub mod builtins;
pub mod environment;
pub mod evaluator;
pub mod function;
pub mod object;

pub use environment::Environment;
pub use evaluator::Interpreter;
pub use object::Object;
