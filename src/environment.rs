use crate::value::Value;
use std::collections::HashMap;

/// The single name-to-value mapping of a run.
///
/// There are no nested scopes: binding a name replaces whatever it held
/// before, and nothing is restored when a `let` body or a call finishes.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.values.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Binds `name`, overwriting any previous binding.
    pub fn bind(&mut self, name: &str, value: Value) {
        log::trace!("bind {} = {}", name, value);
        self.values.insert(name.to_string(), value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
