//! monkey-lex - Lexical Analyzer (Lexer/Tokenizer)
//!
//! First phase of the interpreter pipeline: transforms a stream of
//! characters into a stream of tokens.
//!
//! ```text
//! Source: "let x = 42;"
//!
//! Tokens: [Let] [Ident("x")] [Assign] [Int("42")] [Semicolon] [Eof]
//!         (whitespace skipped)
//! ```
//!
//! The lexer is direct-coded: one small function per token category,
//! dispatched on the current character, with a single character of
//! lookahead to resolve `=` vs `==` and `!` vs `!=`. It allocates nothing;
//! `Ident` and `Int` payloads are borrowed slices of the input, and callers
//! that need them past the input's lifetime copy them out (the parser does
//! this when it builds the AST).
//!
//! # Example
//!
//! ```
//! use monkey_lex::{Lexer, Token};
//!
//! let mut lexer = Lexer::new("1 + 2");
//! assert_eq!(lexer.next_token(), Token::Int("1"));
//! assert_eq!(lexer.next_token(), Token::Plus);
//! assert_eq!(lexer.next_token(), Token::Int("2"));
//! assert_eq!(lexer.next_token(), Token::Eof);
//! ```

pub mod cursor;
mod lexer;
mod token;

#[cfg(test)]
mod edge_cases;

pub use lexer::Lexer;
pub use token::{keyword_from_ident, Token};
