/// Core expression parsing.
///
/// Contains the program entry point, the precedence-climbing binary
/// expression parser and primary expression parsing.
pub mod core;

/// Statement parsing.
///
/// Dispatches on the leading token to the individual statement forms:
/// declarations, control flow, blocks, assignments and bare calls.
pub mod statement;

/// Type annotation parsing.
///
/// Parses scalar names, `T[]` array types and `(T, ..) -> T` function types
/// into [`crate::types::Type`] descriptors.
pub mod types;

/// Utility functions for the parser.
///
/// Token expectation, identifier extraction and comma-separated list
/// parsing shared by the other parser modules.
pub mod utils;
