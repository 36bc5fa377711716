use super::span::Span;

/// A recoverable syntax error, located at the token that caused it.
#[derive(Debug, PartialEq, Clone, thiserror::Error)]
#[error("{}: {error}", .span.start_pos)]
pub struct ParserError {
    pub span: Span,
    pub error: ParserErrorType,
}

#[derive(Debug, PartialEq, Clone, thiserror::Error)]
pub enum ParserErrorType {
    #[error("expected next token to be {expected}, got {got} instead")]
    ExpectedToken {
        expected: &'static str,
        got: &'static str,
    },
    #[error("no prefix parse function for {0} found")]
    NoPrefixParse(String),
    #[error("could not parse \"{0}\" as integer")]
    InvalidInteger(String),
    #[error("illegal token {0}")]
    IllegalToken(String),
    #[error("unterminated block, expected }}")]
    UnclosedBrace,
}

pub type ParserResult<T> = Result<T, ParserError>;
