use super::span::CodePosition;
use std::iter::Peekable;
use std::str::CharIndices;

/// Character stream over a source line with one character of lookahead.
#[derive(Debug, Clone)]
pub struct Cursor<'src> {
    source: &'src str,
    chars: Peekable<CharIndices<'src>>,
    position: CodePosition,
}

impl<'src> Cursor<'src> {
    pub fn new(source: &'src str) -> Self {
        Cursor {
            source,
            chars: source.char_indices().peekable(),
            position: CodePosition::new(0, 1, 1),
        }
    }

    /// Position of the character about to be read.
    pub fn get_position(&self) -> CodePosition {
        self.position
    }

    /// Byte offset of the character about to be read, or the source length at the end.
    pub fn byte_pos(&self) -> usize {
        self.position.byte_pos
    }

    pub fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|&(_, ch)| ch)
    }

    /// Consumes the next character.
    pub fn take(&mut self) -> Option<char> {
        let (_, ch) = self.chars.next()?;

        self.position.byte_pos = match self.chars.peek() {
            Some(&(idx, _)) => idx,
            None => self.source.len(),
        };

        if ch == '\n' {
            self.position.line_no += 1;
            self.position.column_no = 1;
        } else {
            self.position.column_no += 1;
        }

        Some(ch)
    }

    /// Consumes the next character if it equals `target`.
    pub fn take_if(&mut self, target: char) -> bool {
        if self.peek() == Some(target) {
            self.take();
            true
        } else {
            false
        }
    }

    /// Consumes characters while they meet `condition`.
    /// Afterwards the next character (if any) fails it.
    pub fn take_while<F>(&mut self, condition: F)
    where
        F: Fn(char) -> bool,
    {
        while let Some(ch) = self.peek() {
            if !condition(ch) {
                break;
            }
            self.take();
        }
    }

    /// Slice of the source between `start` and the current position.
    pub fn slice_from(&self, start: usize) -> &'src str {
        &self.source[start..self.position.byte_pos]
    }
}
