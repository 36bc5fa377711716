use super::object::Object;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// A lexical scope. Cloning shares the scope: closures and child scopes hold
/// the same bindings as the creator and observe later `set`s on it.
#[derive(Clone)]
pub struct Environment {
    env_ptr: Rc<RefCell<EnvironmentData>>,
}

struct EnvironmentData {
    values: HashMap<String, Object>,
    enclosing: Option<Environment>,
}

impl Environment {
    pub fn new() -> Self {
        let env_data = EnvironmentData {
            values: HashMap::new(),
            enclosing: None,
        };
        Environment {
            env_ptr: Rc::new(RefCell::new(env_data)),
        }
    }

    /// New empty scope whose parent is `self`.
    pub fn extend(&self) -> Self {
        let env_data = EnvironmentData {
            values: HashMap::new(),
            enclosing: Some(self.clone()),
        };
        Environment {
            env_ptr: Rc::new(RefCell::new(env_data)),
        }
    }

    /// Looks `name` up here, then in each enclosing scope.
    pub fn get(&self, name: &str) -> Option<Object> {
        let env_data = self.env_ptr.borrow();
        match env_data.values.get(name) {
            Some(obj) => Some(obj.clone()),
            None => env_data.enclosing.as_ref()?.get(name),
        }
    }

    /// Binds `name` in this scope only. Enclosing scopes are never written,
    /// so a binding here shadows rather than overwrites.
    pub fn set(&self, name: &str, value: Object) -> Object {
        self.env_ptr
            .borrow_mut()
            .values
            .insert(name.to_owned(), value.clone());
        value
    }

    pub fn ptr_eq(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.env_ptr, &other.env_ptr)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Environment {
    // Bindings may hold closures over this very scope, so only names are shown.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let env_data = self.env_ptr.borrow();
        let mut names: Vec<_> = env_data.values.keys().collect();
        names.sort();
        f.debug_struct("Environment")
            .field("names", &names)
            .field("enclosing", &env_data.enclosing)
            .finish()
    }
}
