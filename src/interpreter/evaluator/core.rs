use std::{cell::RefCell, rc::Rc};

use crate::{
    ast::Statement,
    error::RuntimeError,
    interpreter::{
        console::{Console, StdConsole},
        environment::ScopeRef,
        evaluator::builtins,
        value::Value,
    },
};

pub type EvalResult<T> = Result<T, RuntimeError>;

/// A control signal travelling up the statement tree.
///
/// Signals are produced by `return` and `break` and absorbed by the nearest
/// function call or loop respectively. A signal that reaches the top level
/// is a runtime error.
#[derive(Debug)]
pub enum Signal {
    /// A `return` carrying the returned value.
    Return {
        /// The returned value; `void` for a bare `return;`.
        value: Value,
        /// The line of the `return` statement.
        line: usize,
    },
    /// A `break` escaping the innermost loop.
    Break {
        /// The line of the `break` statement.
        line: usize,
    },
}

/// A tree-walking interpreter instance.
///
/// Each instance owns its own scope chain with its own builtin bindings, so
/// several interpreters can coexist in one process without sharing state.
pub struct Interpreter {
    /// The currently active scope. Statement execution swaps this for a
    /// child scope on block entry and restores it on exit.
    pub(in crate::interpreter::evaluator) scope: ScopeRef,
}

impl Interpreter {
    /// Creates an interpreter wired to the real terminal.
    #[must_use]
    pub fn new() -> Self {
        Self::with_console(Rc::new(RefCell::new(StdConsole)))
    }

    /// Creates an interpreter whose `print`, `input` and `clear` builtins
    /// talk to `console`.
    #[must_use]
    pub fn with_console(console: Rc<RefCell<dyn Console>>) -> Self {
        Self { scope: builtins::install(&console) }
    }

    /// Runs a whole program.
    ///
    /// # Errors
    /// Propagates the first runtime error. A `return` or `break` signal that
    /// escapes the top level becomes an
    /// [`RuntimeError::IllegalControlFlow`].
    pub fn interpret(&mut self, program: &Statement) -> EvalResult<()> {
        match self.exec(program)? {
            None => Ok(()),
            Some(Signal::Break { line }) => {
                Err(RuntimeError::IllegalControlFlow { details: "'break' can only be used inside a loop.".to_string(),
                                                       line })
            },
            Some(Signal::Return { line, .. }) => {
                Err(RuntimeError::IllegalControlFlow { details: "'return' can only be used inside a function.".to_string(),
                                                       line })
            },
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
