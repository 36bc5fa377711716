use super::cursor::Cursor;
use super::span::Span;
use super::token::{lookup_keyword, SpannedToken, Token};

pub struct Lexer<'src> {
    source: &'src str,
    cursor: Cursor<'src>,
}

impl<'src> Lexer<'src> {
    /// Creates a lexer from source.
    pub fn new(source: &'src str) -> Self {
        Lexer {
            source,
            cursor: Cursor::new(source),
        }
    }

    /// Returns the next token. Once the source is exhausted this keeps
    /// returning `Token::EndOfFile`.
    pub fn next_token(&mut self) -> SpannedToken {
        // Get rid of whitespace.
        self.cursor.take_while(is_whitespace_char);

        let start_pos = self.cursor.get_position();
        let token = self.lex_token(start_pos.byte_pos);
        let end_pos = self.cursor.get_position();

        SpannedToken {
            token,
            span: Span::new(start_pos, end_pos),
        }
    }

    fn lex_token(&mut self, start_idx: usize) -> Token {
        let ch = match self.cursor.take() {
            Some(ch) => ch,
            None => return Token::EndOfFile,
        };

        match ch {
            // Single-character tokens.
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            '{' => Token::LeftBrace,
            '}' => Token::RightBrace,
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Asterisk,
            '/' => Token::Slash,
            ',' => Token::Comma,
            ';' => Token::Semicolon,
            '<' => Token::LeftAngle,
            '>' => Token::RightAngle,

            // Potentially two character tokens.
            '=' => self.look_for_eq_sign(Token::Equals, Token::DoubleEq),
            '!' => self.look_for_eq_sign(Token::Bang, Token::BangEq),

            // String literals.
            '"' => self.lex_string(start_idx),

            // Integers.
            _ if is_digit_char(ch) => self.lex_integer(start_idx),

            // Identifiers.
            _ if is_identifier_start(ch) => self.lex_identifier_or_kw(start_idx),

            _ => Token::Illegal(ch.to_string()),
        }
    }

    /// Checks if next char is '='. If so, consume it and return t2.
    /// Otherwise, return t1.
    fn look_for_eq_sign(&mut self, t1: Token, t2: Token) -> Token {
        if self.cursor.take_if('=') {
            t2
        } else {
            t1
        }
    }

    /// Scans up to the closing '"'. The contents are kept verbatim.
    /// start_idx is the opening '"'.
    fn lex_string(&mut self, start_idx: usize) -> Token {
        self.cursor.take_while(|ch| ch != '"');
        let end_idx = self.cursor.byte_pos();

        if self.cursor.take_if('"') {
            Token::String(self.source[start_idx + 1..end_idx].to_owned())
        } else {
            Token::Illegal(self.cursor.slice_from(start_idx).to_owned())
        }
    }

    fn lex_integer(&mut self, start_idx: usize) -> Token {
        self.cursor.take_while(is_digit_char);
        Token::Integer(self.cursor.slice_from(start_idx).to_owned())
    }

    /// Scan up to end of lexeme and return it as identifier. Checks for keywords.
    fn lex_identifier_or_kw(&mut self, start_idx: usize) -> Token {
        self.cursor.take_while(is_identifier_char);

        let ident = self.cursor.slice_from(start_idx);
        lookup_keyword(ident).unwrap_or_else(|| Token::Identifier(ident.to_owned()))
    }

    /// Returns an iterator version of lexer.
    pub fn iter(self) -> LexerIterator<'src> {
        LexerIterator { lexer: self }
    }
}

pub struct LexerIterator<'src> {
    lexer: Lexer<'src>,
}

impl<'src> Iterator for LexerIterator<'src> {
    type Item = SpannedToken;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.lexer.next_token();

        if token.token == Token::EndOfFile {
            return None;
        }

        Some(token)
    }
}

fn is_whitespace_char(ch: char) -> bool {
    matches!(ch, ' ' | '\t' | '\n' | '\r')
}

fn is_digit_char(ch: char) -> bool {
    ch.is_ascii_digit()
}

fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_identifier_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}
