#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can occur during evaluation.
pub enum RuntimeError {
    /// A value's type did not satisfy the type required by its position.
    ///
    /// Raised for declarations, assignments, parameter binding, return
    /// values, non-boolean conditions and non-numeric loop bounds.
    TypeMismatch {
        /// The type the position required.
        expected: String,
        /// The type that was actually supplied.
        found: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A name was declared twice in the same scope.
    DuplicateBinding {
        /// The name of the variable.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// No scope in the chain has a binding for this name.
    UnresolvedName {
        /// The name that could not be resolved.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to assign to a `const` binding.
    ConstAssignment {
        /// The name of the constant.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A call supplied the wrong number of arguments.
    ArityMismatch {
        /// How many parameters the function declares.
        expected: usize,
        /// How many arguments the call supplied.
        found: usize,
        /// The source line where the error occurred.
        line: usize,
    },
    /// No binary operator is defined for the operand types.
    UnsupportedOperator {
        /// The operator that was applied.
        operator: String,
        /// The type of the left operand.
        left: String,
        /// The type of the right operand.
        right: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// No unary operator is defined for the operand type.
    UnsupportedUnaryOperator {
        /// The operator that was applied.
        operator: String,
        /// The type of the operand.
        operand: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A `return` or `break` escaped every construct that could absorb it.
    IllegalControlFlow {
        /// Details describing which signal escaped from where.
        details: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to call a value that is not a function.
    NotCallable {
        /// The name the call referred to.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Tried to access an array element outside the valid range.
    IndexOutOfRange {
        /// The number of elements in the array.
        length: usize,
        /// The index that was actually requested.
        found: i64,
        /// The source line where the error occurred.
        line: usize,
    },
    /// An array literal had no elements to take its element type from.
    EmptyArrayLiteral {
        /// The source line where the error occurred.
        line: usize,
    },
    /// The program called the `error` builtin.
    Raised {
        /// The message the program supplied.
        message: String,
        /// The source line where the error occurred.
        line: usize,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TypeMismatch { expected,
                                 found,
                                 line, } => {
                write!(f,
                       "Error on line {line}: Expected a value of type {expected}, found {found}.")
            },
            Self::DuplicateBinding { name, line } => {
                write!(f,
                       "Error on line {line}: Variable '{name}' has already been declared in this scope.")
            },
            Self::UnresolvedName { name, line } => {
                write!(f, "Error on line {line}: Could not resolve '{name}'.")
            },
            Self::ConstAssignment { name, line } => {
                write!(f,
                       "Error on line {line}: Cannot change the value of constant '{name}'.")
            },
            Self::ArityMismatch { expected,
                                  found,
                                  line, } => {
                write!(f,
                       "Error on line {line}: {expected} arguments expected, got {found}.")
            },
            Self::UnsupportedOperator { operator,
                                        left,
                                        right,
                                        line, } => {
                write!(f,
                       "Error on line {line}: No operator '{operator}' exists for types {left} and {right}.")
            },
            Self::UnsupportedUnaryOperator { operator,
                                             operand,
                                             line, } => {
                write!(f,
                       "Error on line {line}: No unary operator '{operator}' exists for type {operand}.")
            },
            Self::IllegalControlFlow { details, line } => {
                write!(f, "Error on line {line}: {details}")
            },
            Self::NotCallable { name, line } => {
                write!(f, "Error on line {line}: '{name}' is not a function.")
            },
            Self::IndexOutOfRange { length,
                                    found,
                                    line, } => {
                write!(f,
                       "Error on line {line}: Index {found} is out of range for an array of {length} elements.")
            },
            Self::EmptyArrayLiteral { line } => {
                write!(f, "Error on line {line}: Array literals must have at least one element.")
            },
            Self::Raised { message, line } => {
                write!(f, "Error on line {line}: {message}")
            },
        }
    }
}

impl std::error::Error for RuntimeError {}
