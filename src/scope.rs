use crate::types::Type;
use std::collections::HashMap;

/// The type-parameter environment threaded through `resolve`. Generalizes the teacher's
/// value-level `Env<Type>` (which bound identifiers to inferred expression types) to bind a
/// generic alias's type parameters to the types they were instantiated with.
#[derive(Clone, Default)]
pub struct Scope {
    bindings: HashMap<String, Type>,
}

impl Scope {
    pub fn new() -> Self {
        Scope {
            bindings: HashMap::new(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Type> {
        self.bindings.get(name)
    }

    pub fn with(mut self, name: &str, ty: Type) -> Self {
        self.bindings.insert(name.to_string(), ty);
        self
    }
}

#[test]
fn should_get_bound_type_parameter() {
    let scope = Scope::new().with("T", Type::Number);
    assert_eq!(scope.get("T"), Some(&Type::Number));
}

#[test]
fn should_shadow_on_rebinding() {
    let scope = Scope::new().with("T", Type::Number).with("T", Type::String);
    assert_eq!(scope.get("T"), Some(&Type::String));
}

#[test]
fn unbound_name_is_absent() {
    let scope = Scope::new();
    assert_eq!(scope.get("T"), None);
}
