//! Lexical analysis for the shale front end.
//!
//! This crate turns a raw character stream into classified tokens: keywords,
//! identifiers, integer constants and operators. Matchers backtrack through
//! the input cursor, and every token's text is interned.

mod scanner;
mod token;
mod trie;

pub use scanner::{IDENTIFIER_LIMIT, KEYWORDS, OPERATORS, ScanError, Scanner};
pub use token::{IntType, Token, TokenKind};
