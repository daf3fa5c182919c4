//! # keel
//!
//! keel is a small, statically typed scripting language written in Rust.
//! Source text is lexed, parsed into a syntax tree and executed by a
//! tree-walking interpreter with lexical scoping, closures and runtime
//! type checking.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::{cell::RefCell, rc::Rc};

use logos::Logos;

use crate::{
    error::ParseError,
    interpreter::{
        console::{Console, StdConsole},
        evaluator::core::Interpreter,
        lexer::{LexerExtras, Token},
        parser::core::parse_program,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Statement` enums that represent the
/// syntactic structure of source code as a tree. The AST is built by the
/// parser and traversed by the evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source line numbers to every node for error reporting.
/// - Defines the operator enums and their precedence.
pub mod ast;
/// Provides unified error types for parsing and evaluation.
///
/// This module defines all errors that can be raised during lexing, parsing
/// or evaluating code. It standardizes error reporting and carries detailed
/// information about failures, including source locations for debugging and
/// user feedback.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches line numbers and detailed messages for context.
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representation, scoping and the console abstraction to provide a complete
/// runtime for source code execution.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator and values.
/// - Provides entry points for parsing and executing programs.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// The structural type system.
///
/// This module defines the [`types::Type`] descriptor and the matching
/// relation every declaration, assignment, argument and return value is
/// checked against at runtime.
pub mod types;

/// Turns source text into a token stream.
///
/// Each token is paired with the line it started on, and an end-of-input
/// marker is appended so the parser never has to reason about a missing
/// token.
///
/// # Errors
/// Returns a [`ParseError`] when the source contains a character that starts
/// no token, or a string literal that is still open at the end of input.
pub fn tokenize(source: &str) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(source, LexerExtras { line: 1 });

    while let Some(token) = lexer.next() {
        match token {
            Ok(token) => tokens.push((token, lexer.extras.line)),
            Err(()) => {
                let slice = lexer.slice();

                return Err(if slice.starts_with('"') {
                    ParseError::UnterminatedString { line: lexer.extras.line }
                } else {
                    ParseError::InvalidCharacter { text: slice.to_string(),
                                                   line: lexer.extras.line }
                });
            },
        }
    }

    tokens.push((Token::EndOfFile, lexer.extras.line));

    Ok(tokens)
}

/// Runs a program against the real terminal.
///
/// This function lexes, parses and executes the provided source string. If
/// execution succeeds, it returns `Ok(())`; otherwise it returns an error
/// with details about the failure.
///
/// # Errors
/// Returns an error if lexing or parsing fails, or if any runtime error
/// occurs.
///
/// # Examples
/// ```
/// // A well-formed program runs to completion.
/// assert!(keel::run("var x = 1 + 2;").is_ok());
///
/// // 'y' is never declared, so this fails at runtime.
/// assert!(keel::run("x = 1;").is_err());
/// ```
pub fn run(source: &str) -> Result<(), Box<dyn std::error::Error>> {
    run_with_console(source, Rc::new(RefCell::new(StdConsole)))
}

/// Runs a program against a caller-provided console.
///
/// Embedders and tests use this entry point to capture what the program
/// prints and to script its input.
///
/// # Errors
/// Returns an error if lexing or parsing fails, or if any runtime error
/// occurs.
pub fn run_with_console(source: &str,
                        console: Rc<RefCell<dyn Console>>)
                        -> Result<(), Box<dyn std::error::Error>> {
    let tokens = tokenize(source)?;
    let program = parse_program(&mut tokens.iter().peekable())?;

    let mut interpreter = Interpreter::with_console(console);
    interpreter.interpret(&program)?;

    Ok(())
}
