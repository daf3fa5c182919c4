/// Turns source text into tokens.
///
/// The lexer is generated by `logos` and produces the token stream the
/// parser consumes. Whitespace and `#` line comments are skipped here, so
/// they never reach the parser. A line counter is threaded through the
/// lexer's extras for diagnostics.
pub mod lexer;

/// Turns tokens into the abstract syntax tree.
///
/// A recursive-descent parser with precedence climbing for binary
/// expressions. Parsing is fail-fast: the first malformed construct aborts
/// with a [`crate::error::ParseError`].
pub mod parser;

/// The scope chain.
///
/// Implements the tree of variable-binding maps that gives the language
/// lexical scoping, shadowing and closures.
pub mod environment;

/// Runtime values.
///
/// Defines the value representation carried through evaluation: a payload
/// paired with the [`crate::types::Type`] describing it.
pub mod value;

/// The host terminal.
///
/// A small trait abstracting `print`, `input` and `clear` so that every
/// interpreter instance can be wired to a real terminal or to a test
/// harness.
pub mod console;

/// Walks the tree and executes the program.
///
/// Evaluates expressions to values, executes statements and threads the
/// `return`/`break` control signals through nested constructs.
pub mod evaluator;
