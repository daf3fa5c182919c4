use std::iter::Peekable;

use crate::{
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            core::ParseResult,
            utils::{expect, parse_comma_separated},
        },
    },
    types::Type,
};

/// Parses a type annotation.
///
/// Grammar:
/// ```text
/// type := "(" (type ("," type)*)? ")" "->" type   function type
///       | scalar "[" "]"                          array type
///       | scalar                                  scalar type
/// scalar := "float" | "string" | "bool" | "object" | "void"
/// ```
///
/// `void` arrives as its own keyword token rather than an identifier, so it
/// is accepted explicitly; that also makes `(string) -> void` expressible,
/// which function-typed bindings need.
///
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of a type.
///
/// # Returns
/// The parsed [`Type`] descriptor.
///
/// # Errors
/// Returns a `ParseError` when the annotation is malformed or names an
/// unknown type.
pub fn parse_type<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Type>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::LParen, _)) = tokens.peek() {
        tokens.next();

        let parameter_types = parse_comma_separated(tokens, parse_type, &Token::RParen)?;
        expect(tokens, &Token::Arrow)?;
        let return_type = parse_type(tokens)?;

        return Ok(Type::function(return_type, parameter_types));
    }

    if let Some((Token::Void, _)) = tokens.peek() {
        tokens.next();

        return Ok(Type::Void);
    }

    let scalar = match tokens.next() {
        Some((Token::Identifier(name), line)) => match name.as_str() {
            "float" => Type::Float,
            "string" => Type::String,
            "bool" => Type::Bool,
            "object" => Type::Object,
            _ => {
                return Err(ParseError::InvalidTypeName { name: name.clone(),
                                                         line: *line });
            },
        },
        Some((token, line)) => {
            return Err(ParseError::UnexpectedToken { expected: "a type name".to_string(),
                                                     found: token.describe(),
                                                     line: *line });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line: 0 }),
    };

    if let Some((Token::LBracket, _)) = tokens.peek() {
        tokens.next();
        expect(tokens, &Token::RBracket)?;

        return Ok(Type::array(scalar));
    }

    Ok(scalar)
}

#[cfg(test)]
mod tests {
    use super::parse_type;
    use crate::{error::ParseError, interpreter::lexer::Token, types::Type};

    fn parse(tokens: Vec<Token>) -> Result<Type, ParseError> {
        let stream: Vec<(Token, usize)> = tokens.into_iter().map(|token| (token, 1)).collect();
        parse_type(&mut stream.iter().peekable())
    }

    fn ident(name: &str) -> Token {
        Token::Identifier(name.to_string())
    }

    #[test]
    fn parses_scalars() {
        assert_eq!(parse(vec![ident("float")]), Ok(Type::Float));
        assert_eq!(parse(vec![ident("object")]), Ok(Type::Object));
        assert_eq!(parse(vec![Token::Void]), Ok(Type::Void));
    }

    #[test]
    fn parses_arrays() {
        assert_eq!(parse(vec![ident("string"), Token::LBracket, Token::RBracket]),
                   Ok(Type::array(Type::String)));
    }

    #[test]
    fn parses_function_types() {
        let tokens = vec![Token::LParen,
                          ident("float"),
                          Token::Comma,
                          ident("bool"),
                          Token::RParen,
                          Token::Arrow,
                          Token::Void];

        assert_eq!(parse(tokens),
                   Ok(Type::function(Type::Void, vec![Type::Float, Type::Bool])));
    }

    #[test]
    fn rejects_unknown_names() {
        assert!(matches!(parse(vec![ident("int")]),
                         Err(ParseError::InvalidTypeName { .. })));
    }
}
