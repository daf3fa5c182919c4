use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr, LiteralValue, Statement, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            statement::parse_statement,
            utils::{expect, parse_comma_separated},
        },
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a whole program.
///
/// The program is a sequence of statements with no enclosing braces; it is
/// returned as a single block so the evaluator can treat the top level like
/// any other statement. The token stream must end with the end-of-file
/// token appended by the caller, which is consumed here.
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
///
/// # Returns
/// A [`Statement::Block`] containing every top-level statement.
///
/// # Errors
/// Propagates the first parse error; there is no recovery.
pub fn parse_program<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Statement>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut statements = Vec::new();

    while let Some((token, _)) = tokens.peek()
          && !matches!(token, Token::EndOfFile)
    {
        statements.push(parse_statement(tokens, true)?);
    }

    expect(tokens, &Token::EndOfFile)?;

    Ok(Statement::Block { statements,
                          line: 1 })
}

/// Parses a full expression.
///
/// This is the entry point for expression parsing; it starts the
/// precedence climb with a threshold below every operator.
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_binary_expression(tokens, 0)
}

/// Parses binary expressions by precedence climbing.
///
/// After parsing a primary expression, operators are consumed while their
/// precedence is strictly greater than `parent_precedence`; the right-hand
/// side is parsed recursively with the consumed operator's precedence as
/// the new threshold. Operators of equal precedence therefore associate to
/// the left.
///
/// Precedence, lowest to highest: `||` < `&&` < `==`/`!=` < `+`/`-` <
/// `*`/`/`.
///
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
/// - `parent_precedence`: The threshold an operator must exceed to be
///   consumed at this level.
///
/// # Returns
/// A left-associative binary expression tree.
fn parse_binary_expression<'a, I>(tokens: &mut Peekable<I>,
                                  parent_precedence: u8)
                                  -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = parse_primary(tokens)?;

    loop {
        let Some((token, line)) = tokens.peek() else {
            break;
        };
        let Some(op) = token_to_binary_operator(token) else {
            break;
        };

        if op.precedence() <= parent_precedence {
            break;
        }

        let line = *line;
        tokens.next();

        let right = parse_binary_expression(tokens, op.precedence())?;

        left = Expr::Binary { left: Box::new(left),
                              op,
                              right: Box::new(right),
                              line };
    }

    Ok(left)
}

/// Parses a primary expression.
///
/// Primaries are literals, parenthesized expressions, unary minus applied
/// to a primary, array literals, and identifiers — where an identifier
/// immediately followed by `(` is a call and anything else a variable
/// reference.
///
/// # Parameters
/// - `tokens`: Token iterator with lookahead.
///
/// # Returns
/// The parsed expression node.
///
/// # Errors
/// `UnexpectedToken` when the next token starts no expression.
fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.peek() {
        Some((Token::Number(value), line)) => {
            let expr = Expr::Literal { value: LiteralValue::Number(*value),
                                       line: *line };
            tokens.next();
            Ok(expr)
        },
        Some((Token::String(value), line)) => {
            let expr = Expr::Literal { value: LiteralValue::String(value.clone()),
                                       line: *line };
            tokens.next();
            Ok(expr)
        },
        Some((Token::Bool(value), line)) => {
            let expr = Expr::Literal { value: LiteralValue::Bool(*value),
                                       line: *line };
            tokens.next();
            Ok(expr)
        },
        Some((Token::Identifier(name), line)) => {
            let (name, line) = (name.clone(), *line);
            tokens.next();

            if let Some((Token::LParen, _)) = tokens.peek() {
                tokens.next();
                let arguments = parse_comma_separated(tokens, parse_expression, &Token::RParen)?;

                return Ok(Expr::Call { name,
                                       arguments,
                                       line });
            }

            Ok(Expr::Variable { name, line })
        },
        Some((Token::Minus, line)) => {
            let line = *line;
            tokens.next();

            let operand = parse_primary(tokens)?;

            Ok(Expr::Unary { op: UnaryOperator::Negate,
                             operand: Box::new(operand),
                             line })
        },
        Some((Token::LParen, _)) => {
            tokens.next();
            let expression = parse_expression(tokens)?;
            expect(tokens, &Token::RParen)?;

            Ok(expression)
        },
        Some((Token::LBracket, line)) => {
            let line = *line;
            tokens.next();

            let elements = parse_comma_separated(tokens, parse_expression, &Token::RBracket)?;

            Ok(Expr::Array { elements, line })
        },
        Some((token, line)) => {
            Err(ParseError::UnexpectedToken { expected: "an expression".to_string(),
                                              found: token.describe(),
                                              line: *line })
        },
        None => Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    }
}

/// Maps a token to its corresponding binary operator.
///
/// Returns `None` for every token that is not a binary operator, which is
/// how the precedence climb knows an expression has ended.
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::DoublePipe => Some(BinaryOperator::Or),
        Token::DoubleAmpersand => Some(BinaryOperator::And),
        Token::EqualEqual => Some(BinaryOperator::Equal),
        Token::BangEqual => Some(BinaryOperator::NotEqual),
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        _ => None,
    }
}
