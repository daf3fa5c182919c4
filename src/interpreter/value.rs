use std::rc::Rc;

use crate::{
    ast::FunctionDecl,
    error::RuntimeError,
    interpreter::{environment::ScopeRef, evaluator::core::EvalResult},
    types::Type,
};

/// The signature of a host-provided builtin function.
///
/// Builtins receive the already type-checked argument values and the line of
/// the call site for error reporting.
pub type BuiltinFn = dyn Fn(&[Value], usize) -> EvalResult<Value>;

/// Something that can be invoked by a call expression or call statement.
#[derive(Clone)]
pub enum Callable {
    /// A host builtin such as `print` or `length`.
    Builtin(Rc<BuiltinFn>),
    /// A function declared in the program, paired with the scope chain that
    /// was active at its declaration site. Every call runs in a fresh child
    /// of that captured chain, never of the caller's.
    Declared {
        /// The parsed declaration the function was created from.
        declaration: Rc<FunctionDecl>,
        /// The environment captured at the declaration site.
        closure: ScopeRef,
    },
}

impl std::fmt::Debug for Callable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Builtin(_) => write!(f, "Builtin"),
            Self::Declared { declaration, .. } => write!(f, "Declared({})", declaration.name),
        }
    }
}

/// The raw data a value carries.
///
/// Arrays are reference-counted so that passing one to a function or storing
/// it in a variable shares the elements instead of copying them.
#[derive(Debug, Clone)]
pub enum Payload {
    /// A numeric payload.
    Float(f64),
    /// A string payload.
    String(String),
    /// A boolean payload.
    Bool(bool),
    /// The payload of `void`-typed values.
    Void,
    /// An ordered sequence of values.
    Array(Rc<Vec<Value>>),
    /// A callable payload.
    Function(Callable),
}

/// A runtime value: a payload paired with the type describing it.
///
/// The payload and the type always agree; every constructor establishes the
/// pairing itself, so no evaluation path ever needs to re-check it.
#[derive(Debug, Clone)]
pub struct Value {
    /// The raw data.
    pub payload: Payload,
    /// The type of the data.
    pub ty: Type,
}

impl Value {
    /// Creates a `float` value.
    #[must_use]
    pub const fn float(value: f64) -> Self {
        Self { payload: Payload::Float(value),
               ty: Type::Float }
    }

    /// Creates a `string` value.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self { payload: Payload::String(value.into()),
               ty: Type::String }
    }

    /// Creates a `bool` value.
    #[must_use]
    pub const fn boolean(value: bool) -> Self {
        Self { payload: Payload::Bool(value),
               ty: Type::Bool }
    }

    /// Creates the `void` value.
    #[must_use]
    pub const fn void() -> Self {
        Self { payload: Payload::Void,
               ty: Type::Void }
    }

    /// Creates an array value from its elements and element type.
    #[must_use]
    pub fn array(elements: Vec<Self>, element_type: Type) -> Self {
        Self { payload: Payload::Array(Rc::new(elements)),
               ty: Type::array(element_type) }
    }

    /// Creates a function value from a callable and its signature.
    #[must_use]
    pub fn function(callable: Callable, return_type: Type, parameter_types: Vec<Type>) -> Self {
        Self { payload: Payload::Function(callable),
               ty: Type::function(return_type, parameter_types) }
    }

    /// Extracts the numeric payload, or reports a type mismatch.
    pub fn as_float(&self, line: usize) -> EvalResult<f64> {
        match &self.payload {
            Payload::Float(value) => Ok(*value),
            _ => Err(RuntimeError::TypeMismatch { expected: Type::Float.to_string(),
                                                  found: self.ty.to_string(),
                                                  line }),
        }
    }

    /// Extracts the string payload, or reports a type mismatch.
    pub fn as_string(&self, line: usize) -> EvalResult<&str> {
        match &self.payload {
            Payload::String(value) => Ok(value),
            _ => Err(RuntimeError::TypeMismatch { expected: Type::String.to_string(),
                                                  found: self.ty.to_string(),
                                                  line }),
        }
    }

    /// Extracts the boolean payload, or reports a type mismatch.
    pub fn as_bool(&self, line: usize) -> EvalResult<bool> {
        match &self.payload {
            Payload::Bool(value) => Ok(*value),
            _ => Err(RuntimeError::TypeMismatch { expected: Type::Bool.to_string(),
                                                  found: self.ty.to_string(),
                                                  line }),
        }
    }

    /// Extracts the array elements, or reports a type mismatch.
    pub fn as_array(&self, line: usize) -> EvalResult<&Rc<Vec<Self>>> {
        match &self.payload {
            Payload::Array(elements) => Ok(elements),
            _ => Err(RuntimeError::TypeMismatch { expected: Type::array(Type::Object).to_string(),
                                                  found: self.ty.to_string(),
                                                  line }),
        }
    }
}

impl PartialEq for Payload {
    /// Payload equality as observed by the language's `==` operator.
    ///
    /// Scalars compare by value. Arrays and functions compare by identity:
    /// two separately built arrays are never equal, but a value and its
    /// copies share one allocation and are.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Float(left), Self::Float(right)) => left == right,
            (Self::String(left), Self::String(right)) => left == right,
            (Self::Bool(left), Self::Bool(right)) => left == right,
            (Self::Void, Self::Void) => true,
            (Self::Array(left), Self::Array(right)) => Rc::ptr_eq(left, right),
            (Self::Function(left), Self::Function(right)) => match (left, right) {
                (Callable::Builtin(left), Callable::Builtin(right)) => Rc::ptr_eq(left, right),
                (Callable::Declared { declaration: left, .. },
                 Callable::Declared { declaration: right, .. }) => Rc::ptr_eq(left, right),
                _ => false,
            },
            _ => false,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.payload {
            Payload::Float(value) => write!(f, "{value}"),
            Payload::String(value) => write!(f, "{value}"),
            Payload::Bool(value) => write!(f, "{value}"),
            Payload::Void => write!(f, "void"),
            Payload::Array(elements) => {
                write!(f, "[")?;
                for (index, element) in elements.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{element}")?;
                }
                write!(f, "]")
            },
            Payload::Function(_) => write!(f, "<{}>", self.ty),
        }
    }
}
