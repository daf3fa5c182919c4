use std::{cell::RefCell, rc::Rc};

use crate::{
    error::RuntimeError,
    interpreter::{
        console::Console,
        environment::{Scope, ScopeRef},
        evaluator::core::EvalResult,
        value::{Callable, Value},
    },
    types::Type,
};

/// Creates a root scope with the builtin bindings installed.
///
/// Builtins are ordinary constant bindings, so programs can shadow them in
/// inner scopes, pass them around as function values, and compare them by
/// identity. `print`, `input` and `clear` capture a handle to `console`.
pub fn install(console: &Rc<RefCell<dyn Console>>) -> ScopeRef {
    let root = Scope::root();

    let handle = Rc::clone(console);
    declare(&root,
            "print",
            builtin(move |arguments, _| {
                        handle.borrow_mut().print(&arguments[0].to_string());
                        Ok(Value::void())
                    },
                    Type::Void,
                    vec![Type::Object]));

    let handle = Rc::clone(console);
    declare(&root,
            "input",
            builtin(move |arguments, line| {
                        let prompt = arguments[0].as_string(line)?;
                        Ok(Value::string(handle.borrow_mut().input(prompt)))
                    },
                    Type::String,
                    vec![Type::String]));

    let handle = Rc::clone(console);
    declare(&root,
            "clear",
            builtin(move |_, _| {
                        handle.borrow_mut().clear();
                        Ok(Value::void())
                    },
                    Type::Void,
                    Vec::new()));

    declare(&root,
            "error",
            builtin(|arguments, line| {
                        Err(RuntimeError::Raised { message: arguments[0].as_string(line)?
                                                                        .to_string(),
                                                   line })
                    },
                    Type::Void,
                    vec![Type::String]));

    declare(&root,
            "length",
            builtin(|arguments, line| {
                        let elements = arguments[0].as_array(line)?;
                        #[allow(clippy::cast_precision_loss)]
                        let length = elements.len() as f64;

                        Ok(Value::float(length))
                    },
                    Type::Float,
                    vec![Type::array(Type::Object)]));

    declare(&root,
            "get",
            builtin(|arguments, line| {
                        let elements = arguments[0].as_array(line)?;
                        // The fraction is discarded, not rounded.
                        #[allow(clippy::cast_possible_truncation)]
                        let index = arguments[1].as_float(line)?.trunc() as i64;

                        usize::try_from(index).ok()
                                              .and_then(|position| elements.get(position))
                                              .cloned()
                                              .ok_or(RuntimeError::IndexOutOfRange { length:
                                                                                         elements.len(),
                                                                                     found: index,
                                                                                     line })
                    },
                    Type::Object,
                    vec![Type::array(Type::Object), Type::Float]));

    root
}

/// Wraps a host closure into a function value with the given signature.
fn builtin(function: impl Fn(&[Value], usize) -> EvalResult<Value> + 'static,
           return_type: Type,
           parameter_types: Vec<Type>)
           -> Value {
    Value::function(Callable::Builtin(Rc::new(function)), return_type, parameter_types)
}

/// Declares a builtin as a constant binding in the root scope.
///
/// Builtin names are distinct and the scope is freshly created, so the
/// declaration cannot fail.
fn declare(root: &ScopeRef, name: &str, value: Value) {
    let ty = value.ty.clone();

    if Scope::declare(root, name, ty, value, true, 0).is_err() {
        unreachable!("builtin '{name}' declared twice");
    }
}
