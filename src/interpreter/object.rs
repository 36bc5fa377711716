use super::builtins::Builtin;
use super::function::Function;
use crate::frontend::grammar::{InfixOperator, PrefixOperator};
use std::fmt;

pub const TRUE: Object = Object::Boolean(true);
pub const FALSE: Object = Object::Boolean(false);
pub const NULL: Object = Object::Null;

/// Runtime value. Failures are values too: an `Error` is returned like any
/// other result and every step hands it back up unchanged.
#[derive(Debug, PartialEq, Clone)]
pub enum Object {
    Integer(i64),
    Boolean(bool),
    String(String),
    Null,
    /// Carries a `return` out of nested blocks. Unwrapped at the function
    /// call or program boundary.
    ReturnValue(Box<Object>),
    Function(Function),
    Builtin(Builtin),
    Error(String),
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ObjectKind {
    Integer,
    Boolean,
    String,
    Null,
    ReturnValue,
    Function,
    Builtin,
    Error,
}

impl Object {
    pub fn kind(&self) -> ObjectKind {
        match self {
            Object::Integer(_) => ObjectKind::Integer,
            Object::Boolean(_) => ObjectKind::Boolean,
            Object::String(_) => ObjectKind::String,
            Object::Null => ObjectKind::Null,
            Object::ReturnValue(_) => ObjectKind::ReturnValue,
            Object::Function(_) => ObjectKind::Function,
            Object::Builtin(_) => ObjectKind::Builtin,
            Object::Error(_) => ObjectKind::Error,
        }
    }

    /// Non-zero integers and `true` are truthy. Everything else is falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Object::Boolean(b) => *b,
            Object::Integer(n) => *n != 0,
            _ => false,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Object::Error(_))
    }

    pub fn apply_infix_op(op: InfixOperator, lhs: Object, rhs: Object) -> Object {
        match (lhs, rhs) {
            (Object::Integer(a), Object::Integer(b)) => integer_binop(op, a, b),
            (Object::String(a), Object::String(b)) if op == InfixOperator::Add => {
                Object::String(a + &b)
            }
            (lhs, rhs) => match op {
                InfixOperator::EqualTo => Object::from(lhs == rhs),
                InfixOperator::NotEqualTo => Object::from(lhs != rhs),
                _ => Object::Error(format!(
                    "unknown infix operator {} for operands {} and {}",
                    op.symbol(),
                    lhs,
                    rhs
                )),
            },
        }
    }

    pub fn apply_prefix_op(op: PrefixOperator, value: Object) -> Object {
        match op {
            PrefixOperator::LogicalNot => Object::from(!value.is_truthy()),
            PrefixOperator::Negate => match value {
                Object::Integer(n) => Object::Integer(n.wrapping_neg()),
                _ => Object::Error(format!(
                    "unknown prefix operator {} for operand {}",
                    op.symbol(),
                    value
                )),
            },
        }
    }
}

/// Two's-complement arithmetic. Only division checks its operand.
fn integer_binop(op: InfixOperator, a: i64, b: i64) -> Object {
    match op {
        InfixOperator::Add => Object::Integer(a.wrapping_add(b)),
        InfixOperator::Subtract => Object::Integer(a.wrapping_sub(b)),
        InfixOperator::Multiply => Object::Integer(a.wrapping_mul(b)),
        InfixOperator::Divide => {
            if b == 0 {
                Object::Error("division by zero".to_owned())
            } else {
                Object::Integer(a.wrapping_div(b))
            }
        }
        InfixOperator::EqualTo => Object::from(a == b),
        InfixOperator::NotEqualTo => Object::from(a != b),
        InfixOperator::GreaterThan => Object::from(a > b),
        InfixOperator::LessThan => Object::from(a < b),
    }
}

impl From<bool> for Object {
    fn from(value: bool) -> Self {
        if value {
            TRUE
        } else {
            FALSE
        }
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Object::Integer(n) => write!(f, "{}", n),
            Object::Boolean(b) => write!(f, "{}", b),
            Object::String(s) => write!(f, "{}", s),
            Object::Null => write!(f, "null"),
            Object::ReturnValue(value) => write!(f, "{}", value),
            Object::Function(func) => write!(f, "{}", func.func_info().ast_string()),
            Object::Builtin(builtin) => write!(f, "builtin function {}", builtin.name()),
            Object::Error(message) => write!(f, "Error: {}", message),
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ObjectKind::Integer => "INTEGER",
            ObjectKind::Boolean => "BOOLEAN",
            ObjectKind::String => "STRING",
            ObjectKind::Null => "NULL",
            ObjectKind::ReturnValue => "RETURN_VALUE",
            ObjectKind::Function => "FUNCTION",
            ObjectKind::Builtin => "BUILTIN",
            ObjectKind::Error => "ERROR",
        };
        write!(f, "{}", name)
    }
}
