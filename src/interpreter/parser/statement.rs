use std::iter::Peekable;

use crate::{
    ast::{FunctionDecl, IfClause, Parameter, Statement},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::{ParseResult, parse_expression},
            types::parse_type,
            utils::{expect, parse_comma_separated, parse_identifier},
        },
    },
    types::Type,
};

/// Parses a single statement, dispatching on the leading token.
///
/// `can_declare` is false inside the clause bodies of `if`, `while`, `for`
/// and `else`: a declaration there would bind into a scope that vanishes
/// immediately, so the grammar forces an explicit nested block instead.
/// With declarations disabled, `let`/`const`/`var`/`func` fall through to
/// the bare-call arm and fail with the mismatched-token error.
///
/// # Parameters
/// - `tokens`: Token iterator containing `(Token, line)` pairs.
/// - `can_declare`: Whether declaration statements are permitted here.
///
/// # Returns
/// A parsed [`Statement`] node.
pub fn parse_statement<'a, I>(tokens: &mut Peekable<I>, can_declare: bool) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let assignment_ahead = is_assignment(tokens);

    match tokens.peek() {
        Some((Token::If, _)) => parse_if(tokens),
        Some((Token::Let | Token::Const | Token::Var, _)) if can_declare => {
            parse_variable_declaration(tokens)
        },
        Some((Token::For, _)) => parse_for(tokens),
        Some((Token::LBrace, _)) => parse_block(tokens),
        Some((Token::While, _)) => parse_while(tokens),
        Some((Token::Return, _)) => parse_return(tokens),
        Some((Token::Break, _)) => {
            let line = expect(tokens, &Token::Break)?;
            expect(tokens, &Token::Semicolon)?;

            Ok(Statement::Break { line })
        },
        Some((Token::Identifier(_), _)) if assignment_ahead => parse_assignment(tokens),
        Some((Token::Func, _)) if can_declare => parse_function_declaration(tokens),
        _ => parse_call_statement(tokens),
    }
}

/// Reports whether the next two tokens are `identifier =`, the start of an
/// assignment statement rather than a bare call.
fn is_assignment<'a, I>(tokens: &Peekable<I>) -> bool
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut lookahead = tokens.clone();
    lookahead.next();

    matches!(lookahead.peek(), Some((Token::Equals, _)))
}

/// Parses an `if` statement with chained `elseif` clauses and an optional
/// `else` body.
///
/// Syntax:
/// ```text
/// if (<condition>) <body>
/// elseif (<condition>) <body>
/// else <body>
/// ```
///
/// Clause bodies are parsed with declarations disabled.
fn parse_if<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::If)?;
    let mut clauses = vec![parse_if_clause(tokens)?];

    while let Some((Token::ElseIf, _)) = tokens.peek() {
        tokens.next();
        clauses.push(parse_if_clause(tokens)?);
    }

    let else_body = if let Some((Token::Else, _)) = tokens.peek() {
        tokens.next();
        Some(Box::new(parse_statement(tokens, false)?))
    } else {
        None
    };

    Ok(Statement::If { clauses,
                       else_body,
                       line })
}

/// Parses the parenthesized condition and body shared by `if` and `elseif`
/// clauses. The leading keyword has already been consumed.
fn parse_if_clause<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<IfClause>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    expect(tokens, &Token::LParen)?;
    let condition = parse_expression(tokens)?;
    expect(tokens, &Token::RParen)?;
    let body = parse_statement(tokens, false)?;

    Ok(IfClause { condition, body })
}

/// Parses a `while (<condition>) <body>` loop.
fn parse_while<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::While)?;
    expect(tokens, &Token::LParen)?;
    let condition = parse_expression(tokens)?;
    expect(tokens, &Token::RParen)?;
    let body = parse_statement(tokens, false)?;

    Ok(Statement::While { condition,
                          body: Box::new(body),
                          line })
}

/// Parses a `for (let <name> = <lower>, <upper>) <body>` loop.
///
/// Both bounds are full expressions; their numeric requirement is checked
/// at evaluation time.
fn parse_for<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::For)?;
    expect(tokens, &Token::LParen)?;
    expect(tokens, &Token::Let)?;
    let (variable, _) = parse_identifier(tokens)?;
    expect(tokens, &Token::Equals)?;
    let lower = parse_expression(tokens)?;
    expect(tokens, &Token::Comma)?;
    let upper = parse_expression(tokens)?;
    expect(tokens, &Token::RParen)?;
    let body = parse_statement(tokens, false)?;

    Ok(Statement::For { variable,
                        lower,
                        upper,
                        body: Box::new(body),
                        line })
}

/// Parses a brace-delimited block.
fn parse_block<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::LBrace)?;
    let statements = parse_block_statements(tokens)?;

    Ok(Statement::Block { statements, line })
}

/// Parses statements up to and including the closing `}` of a block whose
/// `{` has already been consumed. Declarations are permitted again inside.
fn parse_block_statements<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Vec<Statement>>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut statements = Vec::new();

    loop {
        match tokens.peek() {
            Some((Token::RBrace, _)) => {
                tokens.next();
                break;
            },
            Some((Token::EndOfFile, line)) => {
                return Err(ParseError::UnexpectedToken { expected: "'}'".to_string(),
                                                         found: "end of input".to_string(),
                                                         line: *line });
            },
            Some(_) => statements.push(parse_statement(tokens, true)?),
            None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
        }
    }

    Ok(statements)
}

/// Parses a variable declaration statement.
///
/// Forms:
/// - `var <name> = <expression>;` — the declared type is inferred from the
///   initializer's runtime type;
/// - `let <name>: <type> = <expression>;`
/// - `const <name>: <type> = <expression>;` — additionally marks the
///   binding immutable.
fn parse_variable_declaration<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Var, _)) = tokens.peek() {
        let line = expect(tokens, &Token::Var)?;
        let (name, _) = parse_identifier(tokens)?;
        expect(tokens, &Token::Equals)?;
        let value = parse_expression(tokens)?;
        expect(tokens, &Token::Semicolon)?;

        return Ok(Statement::VariableDeclaration { name,
                                                   ty: None,
                                                   value,
                                                   is_constant: false,
                                                   line });
    }

    let is_constant = matches!(tokens.peek(), Some((Token::Const, _)));
    let keyword = if is_constant { Token::Const } else { Token::Let };

    let line = expect(tokens, &keyword)?;
    let (name, _) = parse_identifier(tokens)?;
    expect(tokens, &Token::Colon)?;
    let ty = parse_type(tokens)?;
    expect(tokens, &Token::Equals)?;
    let value = parse_expression(tokens)?;
    expect(tokens, &Token::Semicolon)?;

    Ok(Statement::VariableDeclaration { name,
                                        ty: Some(ty),
                                        value,
                                        is_constant,
                                        line })
}

/// Parses a `return;` or `return <expression>;` statement.
fn parse_return<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::Return)?;

    let value = if let Some((Token::Semicolon, _)) = tokens.peek() {
        None
    } else {
        Some(parse_expression(tokens)?)
    };

    expect(tokens, &Token::Semicolon)?;

    Ok(Statement::Return { value, line })
}

/// Parses an `<identifier> = <expression>;` assignment statement.
fn parse_assignment<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (name, line) = parse_identifier(tokens)?;
    expect(tokens, &Token::Equals)?;
    let value = parse_expression(tokens)?;
    expect(tokens, &Token::Semicolon)?;

    Ok(Statement::Assignment { name, value, line })
}

/// Parses a bare call statement: `<identifier>(<arguments>);`.
///
/// This is also the fall-through arm of [`parse_statement`], so any token
/// that starts no statement fails here with the identifier expectation.
fn parse_call_statement<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (name, line) = parse_identifier(tokens)?;
    expect(tokens, &Token::LParen)?;
    let arguments = parse_comma_separated(tokens, parse_expression, &Token::RParen)?;
    expect(tokens, &Token::Semicolon)?;

    Ok(Statement::Call { name,
                         arguments,
                         line })
}

/// Parses a function declaration.
///
/// Syntax:
/// ```text
/// func <name>(<name>: <type>, ...): <return type> { <body> }
/// ```
///
/// The return type is mandatory (`void` for procedures) and the body must
/// be a block.
fn parse_function_declaration<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let line = expect(tokens, &Token::Func)?;
    let (name, _) = parse_identifier(tokens)?;
    expect(tokens, &Token::LParen)?;
    let parameters = parse_comma_separated(tokens, parse_parameter, &Token::RParen)?;
    expect(tokens, &Token::Colon)?;
    let return_type = parse_type(tokens)?;
    expect(tokens, &Token::LBrace)?;
    let body = parse_block_statements(tokens)?;

    Ok(Statement::Function(FunctionDecl { name,
                                          parameters,
                                          return_type,
                                          body,
                                          line }))
}

/// Parses a single `name: Type` parameter.
fn parse_parameter<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Parameter>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let (name, _) = parse_identifier(tokens)?;
    expect(tokens, &Token::Colon)?;
    let ty: Type = parse_type(tokens)?;

    Ok(Parameter { name, ty })
}
