use super::span::Span;
use std::fmt;

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Token {
    // Single-character tokens.
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Plus,
    Minus,
    Asterisk,
    Slash,
    Comma,
    Semicolon,
    LeftAngle,
    RightAngle,

    // One or two character tokens.
    Bang,
    BangEq,
    Equals,
    DoubleEq,

    // Literals. Integers stay as text until the parser converts them.
    Identifier(String),
    String(String),
    Integer(String),

    // Keywords.
    Let,
    Function,
    True,
    False,
    If,
    Else,
    Return,

    Illegal(String),
    EndOfFile,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Span,
}

/// Classifies identifier text against the keyword table.
pub fn lookup_keyword(ident: &str) -> Option<Token> {
    let keyword = match ident {
        "let" => Token::Let,
        "fn" => Token::Function,
        "true" => Token::True,
        "false" => Token::False,
        "if" => Token::If,
        "else" => Token::Else,
        "return" => Token::Return,
        _ => return None,
    };

    Some(keyword)
}

impl Token {
    /// Source text the token was read from.
    pub fn literal(&self) -> &str {
        match self {
            Token::LeftParen => "(",
            Token::RightParen => ")",
            Token::LeftBrace => "{",
            Token::RightBrace => "}",
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Asterisk => "*",
            Token::Slash => "/",
            Token::Comma => ",",
            Token::Semicolon => ";",
            Token::LeftAngle => "<",
            Token::RightAngle => ">",
            Token::Bang => "!",
            Token::BangEq => "!=",
            Token::Equals => "=",
            Token::DoubleEq => "==",
            Token::Identifier(s) | Token::String(s) | Token::Integer(s) | Token::Illegal(s) => s,
            Token::Let => "let",
            Token::Function => "fn",
            Token::True => "true",
            Token::False => "false",
            Token::If => "if",
            Token::Else => "else",
            Token::Return => "return",
            Token::EndOfFile => "",
        }
    }

    /// Name of the token's kind, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Token::Identifier(_) => "IDENT",
            Token::String(_) => "STRING",
            Token::Integer(_) => "INT",
            Token::Illegal(_) => "ILLEGAL",
            Token::EndOfFile => "EOF",
            Token::LeftParen => "(",
            Token::RightParen => ")",
            Token::LeftBrace => "{",
            Token::RightBrace => "}",
            Token::Plus => "+",
            Token::Minus => "-",
            Token::Asterisk => "*",
            Token::Slash => "/",
            Token::Comma => ",",
            Token::Semicolon => ";",
            Token::LeftAngle => "<",
            Token::RightAngle => ">",
            Token::Bang => "!",
            Token::BangEq => "!=",
            Token::Equals => "=",
            Token::DoubleEq => "==",
            Token::Let => "LET",
            Token::Function => "FUNCTION",
            Token::True => "TRUE",
            Token::False => "FALSE",
            Token::If => "IF",
            Token::Else => "ELSE",
            Token::Return => "RETURN",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::EndOfFile => write!(f, "end of input"),
            Token::String(s) => write!(f, "\"{}\"", s),
            t => write!(f, "{}", t.literal()),
        }
    }
}
