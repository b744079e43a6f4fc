//! Core lexer implementation.
//!
//! The lexer transforms source code text into a stream of tokens. It holds
//! no allocations of its own; token payloads are borrowed slices of the
//! input.

use crate::cursor::Cursor;
use crate::token::{keyword_from_ident, Token};

/// Lexer for Monkey source code.
pub struct Lexer<'a> {
    /// Character cursor for source traversal.
    cursor: Cursor<'a>,

    /// Starting position of the current token (byte offset).
    token_start: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            token_start: 0,
        }
    }

    /// Returns the next token from the source code.
    ///
    /// This is the main entry point for tokenization. It skips whitespace,
    /// then dispatches to the appropriate lexing method based on the current
    /// character.
    ///
    /// # Returns
    ///
    /// The next token in the source stream, or `Token::Eof` at end of file.
    pub fn next_token(&mut self) -> Token<'a> {
        self.skip_whitespace();

        self.token_start = self.cursor.position();

        if self.cursor.is_at_end() {
            return Token::Eof;
        }

        match self.cursor.current_char() {
            '(' => {
                self.cursor.advance();
                Token::LParen
            },
            ')' => {
                self.cursor.advance();
                Token::RParen
            },
            '{' => {
                self.cursor.advance();
                Token::LBrace
            },
            '}' => {
                self.cursor.advance();
                Token::RBrace
            },
            ',' => {
                self.cursor.advance();
                Token::Comma
            },
            ';' => {
                self.cursor.advance();
                Token::Semicolon
            },
            '+' => {
                self.cursor.advance();
                Token::Plus
            },
            '-' => {
                self.cursor.advance();
                Token::Minus
            },
            '*' => {
                self.cursor.advance();
                Token::Asterisk
            },
            '/' => {
                self.cursor.advance();
                Token::Slash
            },
            '<' => {
                self.cursor.advance();
                Token::Lt
            },
            '>' => {
                self.cursor.advance();
                Token::Gt
            },
            '=' => self.lex_equals(),
            '!' => self.lex_bang(),
            c if is_ident_start(c) => self.lex_identifier(),
            c if c.is_ascii_digit() => self.lex_int(),
            c => {
                self.cursor.advance();
                Token::Illegal(c)
            },
        }
    }

    /// Lexes equals or equals-equals.
    ///
    /// Handles: `=`, `==`
    fn lex_equals(&mut self) -> Token<'a> {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            Token::Eq
        } else {
            Token::Assign
        }
    }

    /// Lexes bang or not-equals.
    ///
    /// Handles: `!`, `!=`
    fn lex_bang(&mut self) -> Token<'a> {
        self.cursor.advance();
        if self.cursor.match_char('=') {
            Token::NotEq
        } else {
            Token::Bang
        }
    }

    /// Lexes an identifier or keyword.
    ///
    /// Identifiers start with a letter or underscore, followed by more
    /// letters or underscores. After reading the identifier, checks if it
    /// matches a reserved keyword.
    fn lex_identifier(&mut self) -> Token<'a> {
        while is_ident_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }

        let text = self.cursor.slice_from(self.token_start);

        keyword_from_ident(text).unwrap_or(Token::Ident(text))
    }

    /// Lexes an integer literal.
    ///
    /// The digit run is returned as source text; conversion to a numeric
    /// value happens in the parser.
    fn lex_int(&mut self) -> Token<'a> {
        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }

        Token::Int(self.cursor.slice_from(self.token_start))
    }

    /// Skips over ASCII whitespace.
    fn skip_whitespace(&mut self) {
        while self.cursor.current_char().is_ascii_whitespace() {
            self.cursor.advance();
        }
    }
}

/// Iterating a lexer yields every token up to (excluding) `Eof`.
impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        match self.next_token() {
            Token::Eof => None,
            token => Some(token),
        }
    }
}

/// Returns true if `c` can start an identifier.
#[inline]
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Returns true if `c` can continue an identifier.
///
/// Deliberately the same set as [`is_ident_start`]: digits do not continue
/// identifiers in this language.
#[inline]
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}
