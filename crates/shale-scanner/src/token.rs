//! Token definitions.

use shale_strings::IStr;

/// Integer-literal subtype selected by the constant's suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntType {
    #[default]
    Int,
    Long,
    LongLong,
    Unsigned,
    UnsignedLong,
    UnsignedLongLong,
}

/// The kind of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Keyword,
    Identifier,
    IntConstant(IntType),
    StrConstant,
    Operator,
}

/// A classified token. `text` is the interned source text, so tokens are
/// cheap to copy and compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'i> {
    pub kind: TokenKind,
    pub text: IStr<'i>,
}

impl<'i> Token<'i> {
    pub fn new(kind: TokenKind, text: IStr<'i>) -> Self {
        Token { kind, text }
    }
}
