use super::object::Object;
use std::fmt;

type BuiltinFnType = fn(Vec<Object>) -> Object;

/// A native function. Misuse is reported as an `Error` value, never a panic.
#[derive(Clone, Copy)]
pub struct Builtin {
    name: &'static str,
    func: BuiltinFnType,
    arity: usize,
}

const BUILTINS: &[Builtin] = &[Builtin {
    name: "len",
    func: len,
    arity: 1,
}];

/// Finds a builtin by name. Consulted only after the scope chain misses.
pub fn lookup(name: &str) -> Option<Builtin> {
    BUILTINS.iter().find(|b| b.name == name).copied()
}

impl Builtin {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn call(&self, args: Vec<Object>) -> Object {
        if self.arity == args.len() {
            (self.func)(args)
        } else {
            Object::Error(format!(
                "wrong number of arguments: want {}, got {}",
                self.arity,
                args.len()
            ))
        }
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "<builtin {}>", self.name)
    }
}

impl PartialEq<Builtin> for Builtin {
    // Function pointers are not reliably comparable, so builtins compare by name.
    fn eq(&self, other: &Builtin) -> bool {
        self.name == other.name
    }
}

impl Eq for Builtin {}

/// Byte length of a string.
fn len(args: Vec<Object>) -> Object {
    match &args[..] {
        [Object::String(s)] => Object::Integer(s.len() as i64),
        [other] => Object::Error(format!("len supports only STRING, got {}", other.kind())),
        args => Object::Error(format!(
            "wrong number of arguments: want 1, got {}",
            args.len()
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn call_len(args: Vec<Object>) -> Object {
        lookup("len").map(|b| b.call(args)).unwrap_or(Object::Null)
    }

    #[test]
    fn test_lookup() {
        assert_eq!(lookup("len").map(|b| b.name()), Some("len"));
        assert_eq!(lookup("puts"), None);
    }

    #[test]
    fn test_len() {
        assert_eq!(
            call_len(vec![Object::String("hello".to_owned())]),
            Object::Integer(5)
        );
        assert_eq!(call_len(vec![Object::String(String::new())]), Object::Integer(0));
    }

    #[test]
    fn test_len_misuse() {
        assert_eq!(
            call_len(vec![Object::Integer(5)]),
            Object::Error("len supports only STRING, got INTEGER".to_owned())
        );
        assert_eq!(
            call_len(vec![
                Object::String("a".to_owned()),
                Object::String("b".to_owned())
            ]),
            Object::Error("wrong number of arguments: want 1, got 2".to_owned())
        );
        assert_eq!(
            call_len(vec![]),
            Object::Error("wrong number of arguments: want 1, got 0".to_owned())
        );
    }
}
