/// Parsing errors.
///
/// Defines all error types that can occur during lexing and parsing of source
/// code. Parse errors include invalid characters, unterminated strings and
/// unexpected tokens; the parser performs no recovery, so the first error
/// aborts the run.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation: type
/// mismatches, scope violations, bad calls, illegal control flow and array
/// accesses out of range. Runtime errors are fatal and unrecoverable within a
/// single run.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
