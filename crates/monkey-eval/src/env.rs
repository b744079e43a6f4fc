//! Environments - name-to-value scopes with lexical nesting.

use rustc_hash::FxHashMap;

use crate::heap::EnvRef;
use crate::object::Object;

/// A scope mapping names to values, with an optional link to the enclosing
/// scope.
///
/// An environment only knows its *own* bindings; walking the outer chain
/// requires the heap the outer handle points into, so chained lookup lives
/// on [`Heap::get_binding`](crate::Heap::get_binding).
#[derive(Debug, Default)]
pub struct Environment {
    bindings: FxHashMap<String, Object>,
    outer: Option<EnvRef>,
}

impl Environment {
    /// Creates an empty environment with no enclosing scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty environment enclosed by `outer`.
    pub fn with_outer(outer: EnvRef) -> Self {
        Self {
            bindings: FxHashMap::default(),
            outer: Some(outer),
        }
    }

    /// Looks up `name` in this scope only.
    pub fn get(&self, name: &str) -> Option<Object> {
        self.bindings.get(name).copied()
    }

    /// Binds `name` to `value` in this scope, copying the key.
    ///
    /// Overwrites any existing local binding of the same name; never
    /// touches outer scopes.
    pub fn insert(&mut self, name: &str, value: Object) {
        self.bindings.insert(name.to_string(), value);
    }

    /// The enclosing scope, if any.
    pub fn outer(&self) -> Option<EnvRef> {
        self.outer
    }

    /// Iterates over the values bound in this scope.
    ///
    /// Used by the collector to trace outgoing references.
    pub fn values(&self) -> impl Iterator<Item = &Object> {
        self.bindings.values()
    }
}
