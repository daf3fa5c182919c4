use std::{cell::RefCell, collections::HashMap, rc::Rc};

use crate::{error::RuntimeError, interpreter::value::Value, types::Type};

/// A shared handle to a scope node.
///
/// Scopes are reference counted because the interpreter's active scope and
/// any number of closures may point at the same node. Each node holds only a
/// parent pointer; children are never tracked, so the chain is a tree and a
/// node is freed as soon as nothing references it.
pub type ScopeRef = Rc<RefCell<Scope>>;

/// A single variable binding.
///
/// The binding is owned exclusively by the scope that declared it; the value
/// slot is overwritten in place by assignments, which makes updates visible
/// to every holder of a reference to the scope.
#[derive(Debug)]
pub struct Variable {
    /// The current value.
    pub value: Value,
    /// The declared type every future assignment must satisfy.
    pub ty: Type,
    /// Whether assignments to this binding are rejected.
    pub is_constant: bool,
}

/// One node of the scope chain: a map of bindings plus a parent pointer.
#[derive(Debug, Default)]
pub struct Scope {
    variables: HashMap<String, Variable>,
    parent: Option<ScopeRef>,
}

impl Scope {
    /// Creates a root scope with no parent.
    #[must_use]
    pub fn root() -> ScopeRef {
        Rc::new(RefCell::new(Self::default()))
    }

    /// Creates a child scope of `parent`.
    #[must_use]
    pub fn child(parent: &ScopeRef) -> ScopeRef {
        Rc::new(RefCell::new(Self { variables: HashMap::new(),
                                    parent: Some(Rc::clone(parent)) }))
    }

    /// Declares a new binding in `scope`.
    ///
    /// Shadowing a binding of an outer scope is allowed; redeclaring a name
    /// already bound in `scope` itself is not.
    ///
    /// # Errors
    /// - [`RuntimeError::TypeMismatch`] if the value's type does not satisfy
    ///   the declared type.
    /// - [`RuntimeError::DuplicateBinding`] if the name is already bound in
    ///   this scope.
    pub fn declare(scope: &ScopeRef,
                   name: &str,
                   ty: Type,
                   value: Value,
                   is_constant: bool,
                   line: usize)
                   -> Result<(), RuntimeError> {
        if !value.ty.matches(&ty) {
            return Err(RuntimeError::TypeMismatch { expected: ty.to_string(),
                                                    found: value.ty.to_string(),
                                                    line });
        }

        let mut node = scope.borrow_mut();

        if node.variables.contains_key(name) {
            return Err(RuntimeError::DuplicateBinding { name: name.to_string(),
                                                        line });
        }

        node.variables.insert(name.to_string(), Variable { value,
                                                           ty,
                                                           is_constant });
        Ok(())
    }

    /// Returns the current value of `name`, searching outward from `scope`.
    ///
    /// # Errors
    /// [`RuntimeError::UnresolvedName`] if no scope in the chain binds the
    /// name.
    pub fn get(scope: &ScopeRef, name: &str, line: usize) -> Result<Value, RuntimeError> {
        let holder = Self::resolve(scope, name, line)?;
        let node = holder.borrow();

        Ok(node.variables[name].value.clone())
    }

    /// Overwrites the binding of `name` with `value`, searching outward from
    /// `scope`.
    ///
    /// # Errors
    /// - [`RuntimeError::UnresolvedName`] if the name is unbound.
    /// - [`RuntimeError::TypeMismatch`] if the value's type does not satisfy
    ///   the binding's declared type.
    /// - [`RuntimeError::ConstAssignment`] if the binding is constant.
    pub fn set(scope: &ScopeRef,
               name: &str,
               value: Value,
               line: usize)
               -> Result<(), RuntimeError> {
        let holder = Self::resolve(scope, name, line)?;
        let mut node = holder.borrow_mut();
        let variable = node.variables
                           .get_mut(name)
                           .unwrap_or_else(|| unreachable!("resolve found the binding"));

        if !value.ty.matches(&variable.ty) {
            return Err(RuntimeError::TypeMismatch { expected: variable.ty.to_string(),
                                                    found: value.ty.to_string(),
                                                    line });
        }

        if variable.is_constant {
            return Err(RuntimeError::ConstAssignment { name: name.to_string(),
                                                       line });
        }

        variable.value = value;
        Ok(())
    }

    /// Walks the chain from `scope` outward and returns the first node that
    /// binds `name`.
    fn resolve(scope: &ScopeRef, name: &str, line: usize) -> Result<ScopeRef, RuntimeError> {
        let mut current = Rc::clone(scope);

        loop {
            let parent = {
                let node = current.borrow();

                if node.variables.contains_key(name) {
                    return Ok(Rc::clone(&current));
                }

                node.parent.clone()
            };

            match parent {
                Some(outer) => current = outer,
                None => {
                    return Err(RuntimeError::UnresolvedName { name: name.to_string(),
                                                              line });
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Scope;
    use crate::{error::RuntimeError, interpreter::value::Value, types::Type};

    #[test]
    fn declares_and_resolves() {
        let root = Scope::root();
        Scope::declare(&root, "x", Type::Float, Value::float(1.0), false, 1).unwrap();

        let value = Scope::get(&root, "x", 2).unwrap();
        assert_eq!(value.as_float(2).unwrap(), 1.0);
    }

    #[test]
    fn rejects_redeclaration_in_same_scope() {
        let root = Scope::root();
        Scope::declare(&root, "x", Type::Float, Value::float(1.0), false, 1).unwrap();

        let error = Scope::declare(&root, "x", Type::Float, Value::float(2.0), false, 2);
        assert!(matches!(error, Err(RuntimeError::DuplicateBinding { .. })));
    }

    #[test]
    fn shadows_outer_bindings() {
        let root = Scope::root();
        Scope::declare(&root, "x", Type::Float, Value::float(1.0), false, 1).unwrap();

        let inner = Scope::child(&root);
        Scope::declare(&inner, "x", Type::String, Value::string("two"), false, 2).unwrap();

        assert!(Scope::get(&inner, "x", 3).unwrap().as_string(3).is_ok());
        assert_eq!(Scope::get(&root, "x", 3).unwrap().as_float(3).unwrap(), 1.0);
    }

    #[test]
    fn set_walks_outward_and_is_shared() {
        let root = Scope::root();
        Scope::declare(&root, "x", Type::Float, Value::float(1.0), false, 1).unwrap();

        let inner = Scope::child(&root);
        Scope::set(&inner, "x", Value::float(5.0), 2).unwrap();

        assert_eq!(Scope::get(&root, "x", 3).unwrap().as_float(3).unwrap(), 5.0);
    }

    #[test]
    fn set_enforces_declared_type_and_constness() {
        let root = Scope::root();
        Scope::declare(&root, "x", Type::Float, Value::float(1.0), false, 1).unwrap();
        Scope::declare(&root, "k", Type::Float, Value::float(2.0), true, 1).unwrap();

        assert!(matches!(Scope::set(&root, "x", Value::string("no"), 2),
                         Err(RuntimeError::TypeMismatch { .. })));
        assert!(matches!(Scope::set(&root, "k", Value::float(3.0), 2),
                         Err(RuntimeError::ConstAssignment { .. })));
    }

    #[test]
    fn unresolved_names_fail() {
        let root = Scope::root();
        assert!(matches!(Scope::get(&root, "missing", 1),
                         Err(RuntimeError::UnresolvedName { .. })));
    }
}
