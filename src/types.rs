/// Describes the type of a value or binding.
///
/// Types are structural: two function types are compatible when their shapes
/// line up, regardless of where they were written. `Object` is the universal
/// top type that every value is assignable to; it is the parameter type of
/// builtins like `print` that accept anything.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    /// Double-precision numeric type.
    Float,
    /// Text type.
    String,
    /// Boolean type.
    Bool,
    /// The type of statements-as-values: functions with nothing to return.
    Void,
    /// The universal top type; every type matches it.
    Object,
    /// A function type with a return type and ordered parameter types.
    Function {
        /// The type of the value the function returns.
        return_type: Box<Self>,
        /// The parameter types, in call order.
        parameter_types: Vec<Self>,
    },
    /// An array type with a single element type.
    Array(Box<Self>),
}

impl Type {
    /// Builds a function type from its return and parameter types.
    #[must_use]
    pub fn function(return_type: Self, parameter_types: Vec<Self>) -> Self {
        Self::Function { return_type: Box::new(return_type),
                         parameter_types }
    }

    /// Builds an array type from its element type.
    #[must_use]
    pub fn array(element_type: Self) -> Self {
        Self::Array(Box::new(element_type))
    }

    /// Reports whether a value of type `self` is assignable to a slot of
    /// type `target`.
    ///
    /// This is the single compatibility predicate of the language, used for
    /// declarations, assignments, parameter binding, return values and the
    /// boolean/numeric requirements of conditions and loop bounds.
    ///
    /// Rules, in order:
    /// - a `target` of `Object` matches anything;
    /// - two function types match when their parameter counts are equal,
    ///   every parameter type matches positionally, and the return types
    ///   match;
    /// - two array types match when their element types match;
    /// - otherwise both sides must be the same scalar.
    #[must_use]
    pub fn matches(&self, target: &Self) -> bool {
        if matches!(target, Self::Object) {
            return true;
        }

        match (self, target) {
            (Self::Function { return_type: value_return,
                              parameter_types: value_parameters, },
             Self::Function { return_type: target_return,
                              parameter_types: target_parameters, }) => {
                value_parameters.len() == target_parameters.len()
                && value_parameters.iter()
                                   .zip(target_parameters)
                                   .all(|(value, target)| value.matches(target))
                && value_return.matches(target_return)
            },
            (Self::Array(value_element), Self::Array(target_element)) => {
                value_element.matches(target_element)
            },
            (Self::Float, Self::Float)
            | (Self::String, Self::String)
            | (Self::Bool, Self::Bool)
            | (Self::Void, Self::Void) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Float => write!(f, "float"),
            Self::String => write!(f, "string"),
            Self::Bool => write!(f, "bool"),
            Self::Void => write!(f, "void"),
            Self::Object => write!(f, "object"),
            Self::Function { return_type,
                             parameter_types, } => {
                write!(f, "(")?;
                for (index, parameter) in parameter_types.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{parameter}")?;
                }
                write!(f, ") -> {return_type}")
            },
            Self::Array(element) => write!(f, "{element}[]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Type;

    #[test]
    fn object_matches_everything() {
        assert!(Type::Float.matches(&Type::Object));
        assert!(Type::String.matches(&Type::Object));
        assert!(Type::array(Type::Float).matches(&Type::Object));
        assert!(Type::function(Type::Void, vec![]).matches(&Type::Object));
    }

    #[test]
    fn object_is_not_assignable_to_scalars() {
        assert!(!Type::Object.matches(&Type::Float));
        assert!(!Type::Object.matches(&Type::String));
    }

    #[test]
    fn scalars_match_by_name() {
        assert!(Type::Float.matches(&Type::Float));
        assert!(!Type::Float.matches(&Type::String));
        assert!(!Type::Bool.matches(&Type::Void));
    }

    #[test]
    fn arrays_match_by_element_type() {
        assert!(Type::array(Type::Float).matches(&Type::array(Type::Float)));
        assert!(!Type::array(Type::Float).matches(&Type::array(Type::String)));
        assert!(Type::array(Type::Float).matches(&Type::array(Type::Object)));
    }

    #[test]
    fn nested_arrays_are_not_scalars() {
        assert!(!Type::array(Type::Float).matches(&Type::Float));
        assert!(!Type::Float.matches(&Type::array(Type::Float)));
    }

    #[test]
    fn function_types_match_structurally() {
        let double = Type::function(Type::Float, vec![Type::Float]);
        let same = Type::function(Type::Float, vec![Type::Float]);
        let wrong_arity = Type::function(Type::Float, vec![Type::Float, Type::Float]);
        let wrong_return = Type::function(Type::Void, vec![Type::Float]);

        assert!(double.matches(&same));
        assert!(!double.matches(&wrong_arity));
        assert!(!double.matches(&wrong_return));
    }

    #[test]
    fn function_parameters_match_positionally() {
        let left = Type::function(Type::Void, vec![Type::Float, Type::String]);
        let flipped = Type::function(Type::Void, vec![Type::String, Type::Float]);
        let relaxed = Type::function(Type::Void, vec![Type::Object, Type::Object]);

        assert!(!left.matches(&flipped));
        assert!(left.matches(&relaxed));
    }

    #[test]
    fn higher_order_function_types_recurse() {
        let callback = Type::function(Type::Float, vec![Type::Float]);
        let takes_callback = Type::function(Type::Void, vec![callback.clone()]);
        let takes_other = Type::function(Type::Void, vec![Type::function(Type::Void, vec![])]);

        assert!(takes_callback.matches(&Type::function(Type::Void, vec![callback])));
        assert!(!takes_callback.matches(&takes_other));
    }

    #[test]
    fn renders_source_syntax() {
        assert_eq!(Type::array(Type::Float).to_string(), "float[]");
        assert_eq!(Type::function(Type::Void, vec![Type::Float, Type::Bool]).to_string(),
                   "(float, bool) -> void");
    }
}
