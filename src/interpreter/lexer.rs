use logos::Logos;

/// Represents a lexical token in the source input.
///
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens in the language. `<`, `>` and `.`
/// are lexed but have no grammar production yet, so using them is a parse
/// error rather than a lexical one.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Numeric literal tokens: maximal runs of digits, such as `42`. There
    /// is no decimal point and no sign; negation is a unary operator.
    #[regex(r"[0-9]+", parse_number)]
    Number(f64),
    /// String literal tokens, such as `"hello"`. Strings may span lines;
    /// the surrounding quotes are stripped.
    #[regex(r#""[^"]*""#, parse_string)]
    String(String),
    /// Boolean literal tokens: `true` or `false`.
    #[token("true", parse_bool)]
    #[token("false", parse_bool)]
    Bool(bool),
    /// `if`
    #[token("if")]
    If,
    /// `elseif`
    #[token("elseif")]
    ElseIf,
    /// `else`
    #[token("else")]
    Else,
    /// `for`
    #[token("for")]
    For,
    /// `while`
    #[token("while")]
    While,
    /// `let`
    #[token("let")]
    Let,
    /// `const`
    #[token("const")]
    Const,
    /// `var`
    #[token("var")]
    Var,
    /// `func`
    #[token("func")]
    Func,
    /// `return`
    #[token("return")]
    Return,
    /// `break`
    #[token("break")]
    Break,
    /// `void`
    #[token("void")]
    Void,
    /// Identifier tokens; variable or function names such as `x` or
    /// `counter`. Identifiers are runs of letters and underscores — digits
    /// are not identifier characters.
    #[regex(r"[a-zA-Z_]+", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `||`
    #[token("||")]
    DoublePipe,
    /// `&&`
    #[token("&&")]
    DoubleAmpersand,
    /// `->`
    #[token("->")]
    Arrow,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `*`
    #[token("*")]
    Star,
    /// `/`
    #[token("/")]
    Slash,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `{`
    #[token("{")]
    LBrace,
    /// `}`
    #[token("}")]
    RBrace,
    /// `[`
    #[token("[")]
    LBracket,
    /// `]`
    #[token("]")]
    RBracket,
    /// `=`
    #[token("=")]
    Equals,
    /// `,`
    #[token(",")]
    Comma,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `:`
    #[token(":")]
    Colon,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// `.`
    #[token(".")]
    Period,
    /// End of input; never produced by lexing, only appended by the caller
    /// once the lexer runs dry. A NUL byte in the source is an invalid
    /// character like any other.
    EndOfFile,

    /// `# Comments.`
    #[regex(r"#[^\n\r]*", logos::skip)]
    Comment,
    /// Newlines; counted for diagnostics, then skipped.
    #[token("\n", |lex| {
        lex.extras.line += 1;
        logos::Skip
    })]
    NewLine,
    /// Spaces, tabs and feeds.
    #[regex(r"[ \t\r\f]+", logos::skip)]
    Ignored,
}

impl Token {
    /// Returns a short human-readable description for diagnostics.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Number(n) => format!("number '{n}'"),
            Self::String(s) => format!("string \"{s}\""),
            Self::Bool(b) => format!("'{b}'"),
            Self::Identifier(name) => format!("identifier '{name}'"),
            Self::If => "'if'".to_string(),
            Self::ElseIf => "'elseif'".to_string(),
            Self::Else => "'else'".to_string(),
            Self::For => "'for'".to_string(),
            Self::While => "'while'".to_string(),
            Self::Let => "'let'".to_string(),
            Self::Const => "'const'".to_string(),
            Self::Var => "'var'".to_string(),
            Self::Func => "'func'".to_string(),
            Self::Return => "'return'".to_string(),
            Self::Break => "'break'".to_string(),
            Self::Void => "'void'".to_string(),
            Self::DoublePipe => "'||'".to_string(),
            Self::DoubleAmpersand => "'&&'".to_string(),
            Self::Arrow => "'->'".to_string(),
            Self::EqualEqual => "'=='".to_string(),
            Self::BangEqual => "'!='".to_string(),
            Self::Plus => "'+'".to_string(),
            Self::Minus => "'-'".to_string(),
            Self::Star => "'*'".to_string(),
            Self::Slash => "'/'".to_string(),
            Self::LParen => "'('".to_string(),
            Self::RParen => "')'".to_string(),
            Self::LBrace => "'{'".to_string(),
            Self::RBrace => "'}'".to_string(),
            Self::LBracket => "'['".to_string(),
            Self::RBracket => "']'".to_string(),
            Self::Equals => "'='".to_string(),
            Self::Comma => "','".to_string(),
            Self::Semicolon => "';'".to_string(),
            Self::Colon => "':'".to_string(),
            Self::Less => "'<'".to_string(),
            Self::Greater => "'>'".to_string(),
            Self::Period => "'.'".to_string(),
            Self::EndOfFile => "end of input".to_string(),
            Self::Comment | Self::NewLine | Self::Ignored => "whitespace".to_string(),
        }
    }
}

/// Additional information carried by the lexer during tokenization.
///
/// Tracks the current line number for error reporting and diagnostics.
#[derive(Default)]
pub struct LexerExtras {
    /// The current line number in the source being tokenized.
    pub line: usize,
}

/// Parses a numeric literal from the current token slice.
fn parse_number(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}

/// Strips the quotes off a string literal and counts the newlines it spans.
fn parse_string(lex: &mut logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    lex.extras.line += slice.chars().filter(|&c| c == '\n').count();
    slice[1..slice.len() - 1].to_string()
}

/// Parses a boolean literal from the current token slice.
fn parse_bool(lex: &logos::Lexer<Token>) -> Option<bool> {
    match lex.slice() {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use logos::Logos;

    use super::{LexerExtras, Token};

    fn lex(source: &str) -> Vec<Token> {
        Token::lexer_with_extras(source, LexerExtras { line: 1 }).map(|token| token.expect("lexes"))
                                                                 .collect()
    }

    #[test]
    fn skips_whitespace_and_comments() {
        let tokens = lex("let x # a comment\n  = 1;");
        assert_eq!(tokens,
                   vec![Token::Let,
                        Token::Identifier("x".to_string()),
                        Token::Equals,
                        Token::Number(1.0),
                        Token::Semicolon]);
    }

    #[test]
    fn keywords_beat_identifiers_but_not_prefixes() {
        assert_eq!(lex("elseif"), vec![Token::ElseIf]);
        assert_eq!(lex("elseifx"), vec![Token::Identifier("elseifx".to_string())]);
    }

    #[test]
    fn digits_do_not_extend_identifiers() {
        assert_eq!(lex("x1"),
                   vec![Token::Identifier("x".to_string()), Token::Number(1.0)]);
    }

    #[test]
    fn strings_lose_their_quotes() {
        assert_eq!(lex("\"hi\""), vec![Token::String("hi".to_string())]);
    }

    #[test]
    fn unterminated_string_fails() {
        let mut lexer = Token::lexer_with_extras("\"oops", LexerExtras { line: 1 });
        assert!(lexer.next().is_some_and(|token| token.is_err()));
    }

    #[test]
    fn nul_is_an_invalid_character() {
        let mut lexer = Token::lexer_with_extras("\0", LexerExtras { line: 1 });
        assert!(lexer.next().is_some_and(|token| token.is_err()));
    }

    #[test]
    fn tracks_line_numbers() {
        let mut lexer = Token::lexer_with_extras("1\n2\n3", LexerExtras { line: 1 });
        while lexer.next().is_some() {}
        assert_eq!(lexer.extras.line, 3);
    }
}
