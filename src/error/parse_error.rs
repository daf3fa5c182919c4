#[derive(Debug, Clone, PartialEq)]
/// Represents all errors that can occur during lexing or parsing.
pub enum ParseError {
    /// The lexer hit a character that starts no token.
    InvalidCharacter {
        /// The offending source text.
        text: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A string literal was still open when the input ended.
    UnterminatedString {
        /// The source line where the string started.
        line: usize,
    },
    /// Found an unexpected token while parsing.
    UnexpectedToken {
        /// A description of what the parser expected.
        expected: String,
        /// The token encountered.
        found: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Reached the end of input unexpectedly.
    UnexpectedEndOfInput {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A type annotation used a name that is not a type.
    InvalidTypeName {
        /// The unknown type name.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCharacter { text, line } => {
                write!(f, "Error on line {line}: Invalid character: '{text}'.")
            },
            Self::UnterminatedString { line } => {
                write!(f, "Error on line {line}: Unterminated string literal.")
            },
            Self::UnexpectedToken { expected,
                                    found,
                                    line, } => {
                write!(f,
                       "Error on line {line}: Expected {expected}, found {found}.")
            },
            Self::UnexpectedEndOfInput { line } => {
                write!(f, "Error on line {line}: Unexpected end of input.")
            },
            Self::InvalidTypeName { name, line } => {
                write!(f, "Error on line {line}: '{name}' is not a type.")
            },
        }
    }
}

impl std::error::Error for ParseError {}
