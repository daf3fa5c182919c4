/// The interpreter core.
///
/// Defines the [`core::Interpreter`] state, the control [`core::Signal`]
/// produced by `return` and `break`, and the top-level entry point that
/// turns an escaped signal into an error.
pub mod core;

/// Builtin functions.
///
/// Installs the host-provided bindings (`print`, `input`, `error`, `length`,
/// `get`, `clear`) into a fresh root scope.
pub mod builtins;

/// Expression evaluation.
///
/// Literals, variable lookups, unary and binary operators, array literals
/// and function invocation.
pub mod expression;

/// Statement execution.
///
/// Declarations, assignments, control flow, blocks and call statements.
pub mod statement;
