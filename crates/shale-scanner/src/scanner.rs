//! The token scanner: an ordered set of backtracking matchers.

use crate::token::{IntType, Token, TokenKind};
use crate::trie::Trie;
use shale_input::Cursor;
use shale_strings::{Interner, StringsError};
use thiserror::Error;

/// Length limit for identifier and integer-constant spellings, in bytes.
/// A spelling that reaches the limit without a boundary is a match failure.
pub const IDENTIFIER_LIMIT: usize = 63;

/// The C reserved words.
pub const KEYWORDS: &[&str] = &[
    "auto",
    "break",
    "case",
    "char",
    "const",
    "continue",
    "default",
    "do",
    "double",
    "else",
    "enum",
    "extern",
    "float",
    "for",
    "goto",
    "if",
    "inline",
    "int",
    "long",
    "register",
    "restrict",
    "return",
    "short",
    "signed",
    "sizeof",
    "static",
    "struct",
    "switch",
    "typedef",
    "union",
    "unsigned",
    "void",
    "volatile",
    "while",
    "_Alignas",
    "_Alignof",
    "_Atomic",
    "_Bool",
    "_Complex",
    "_Generic",
    "_Imaginary",
    "_Noreturn",
    "_Static_assert",
    "_Thread_local",
];

/// Operator spellings.
pub const OPERATORS: &[&str] = &[
    "+", "++", "+=", "-", "--", "-=", "*", "*=", "/", "/=", "%", "%=", "=", "==", "!", "!=", "<",
    "<=", ">", ">=", "<<", "<<=", ">>", ">>=", "&", "&&", "&=", "|", "||", "|=", "^", "^=", "~",
    "~=",
];

/// Errors surfacing from [`Scanner::next_token`]. Individual matcher
/// failures never escape; only interner exhaustion or input no matcher
/// accepts is reported.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScanError {
    #[error(transparent)]
    OutOfMemory(#[from] StringsError),

    /// No matcher accepted the input at `offset`.
    #[error("no token matched at offset {offset}")]
    UnrecognizedInput { offset: usize },
}

/// Word boundary: whitespace or end of input terminates a candidate token.
pub(crate) fn is_boundary(c: u8) -> bool {
    c.is_ascii_whitespace()
}

/// Matcher priority. The operator matcher runs last: it decides on
/// single-character lookahead and must not shadow the longer literals the
/// other matchers own.
const MATCHERS: &[Matcher] = &[
    Matcher::Keyword,
    Matcher::Identifier,
    Matcher::IntConstant,
    Matcher::Operator,
];

#[derive(Clone, Copy)]
enum Matcher {
    Keyword,
    Identifier,
    IntConstant,
    Operator,
}

enum Base {
    Dec,
    Hex,
    Oct,
}

impl Base {
    fn accepts(&self, c: u8) -> bool {
        match self {
            Base::Dec => c.is_ascii_digit(),
            Base::Hex => c.is_ascii_hexdigit(),
            // Octal digits as the front end accepts them.
            Base::Oct => (b'1'..=b'8').contains(&c),
        }
    }
}

/// The scanner holds no state across tokens beyond the caller's cursor;
/// each [`Scanner::next_token`] call is a fresh attempt at the current
/// offset.
pub struct Scanner<'i> {
    interner: &'i Interner,
    keywords: Trie<'i>,
    operators: Trie<'i>,
}

impl<'i> Scanner<'i> {
    /// Build the matcher tries, interning every keyword and operator up
    /// front so later token comparisons are pointer comparisons.
    pub fn new(interner: &'i Interner) -> Result<Self, ScanError> {
        Ok(Scanner {
            interner,
            keywords: Trie::build(KEYWORDS, interner)?,
            operators: Trie::build(OPERATORS, interner)?,
        })
    }

    /// Parse the next token starting at the cursor's current offset.
    ///
    /// Leading whitespace is skipped; `Ok(None)` signals end of input. Each
    /// matcher attempt saves the offset and restores it on failure. If no
    /// matcher accepts at a non-whitespace offset the scanner reports
    /// [`ScanError::UnrecognizedInput`] rather than retrying in place.
    pub fn next_token(&self, input: &mut impl Cursor) -> Result<Option<Token<'i>>, ScanError> {
        self.skip_whitespace(input);
        if input.at_eof() {
            return Ok(None);
        }

        let start = input.offset();
        for &matcher in MATCHERS {
            input.set_offset(start);
            let matched = match matcher {
                Matcher::Keyword => self.match_keyword(input)?,
                Matcher::Identifier => self.match_identifier(input)?,
                Matcher::IntConstant => self.match_integer_constant(input)?,
                Matcher::Operator => self.match_operator(input)?,
            };
            if let Some(token) = matched {
                return Ok(Some(token));
            }
        }

        input.set_offset(start);
        Err(ScanError::UnrecognizedInput { offset: start })
    }

    fn skip_whitespace(&self, input: &mut impl Cursor) {
        loop {
            let at = input.offset();
            match input.next_char() {
                Some(c) if is_boundary(c) => continue,
                _ => {
                    input.set_offset(at);
                    return;
                }
            }
        }
    }

    fn match_keyword(&self, input: &mut impl Cursor) -> Result<Option<Token<'i>>, ScanError> {
        Ok(self
            .keywords
            .match_word(input)
            .map(|text| Token::new(TokenKind::Keyword, text)))
    }

    fn match_operator(&self, input: &mut impl Cursor) -> Result<Option<Token<'i>>, ScanError> {
        Ok(self
            .operators
            .match_word(input)
            .map(|text| Token::new(TokenKind::Operator, text)))
    }

    /// An identifier starts with an ASCII letter or underscore and continues
    /// with letters, digits or underscores up to [`IDENTIFIER_LIMIT`],
    /// terminated by a boundary.
    fn match_identifier(&self, input: &mut impl Cursor) -> Result<Option<Token<'i>>, ScanError> {
        let mut text = String::new();
        match input.next_char() {
            Some(c) if c.is_ascii_alphabetic() || c == b'_' => text.push(char::from(c)),
            _ => return Ok(None),
        }

        loop {
            if text.len() >= IDENTIFIER_LIMIT {
                // Identifier too big.
                return Ok(None);
            }
            match input.next_char() {
                None => break,
                Some(c) if is_boundary(c) => break,
                Some(c) if c.is_ascii_alphanumeric() || c == b'_' => text.push(char::from(c)),
                Some(_) => return Ok(None),
            }
        }

        let text = self.interner.intern(&text)?;
        Ok(Some(Token::new(TokenKind::Identifier, text)))
    }

    /// An integer constant is a lone `0`, a `0x`/`0X` hex literal, a `0`
    /// octal literal, or a decimal literal, with an optional `u`/`l`/`ll`
    /// suffix in any case combination. The suffix selects the [`IntType`]
    /// and is not part of the token text.
    fn match_integer_constant(
        &self,
        input: &mut impl Cursor,
    ) -> Result<Option<Token<'i>>, ScanError> {
        let mut text = String::new();
        let first = match input.next_char() {
            Some(c) if c.is_ascii_digit() => c,
            _ => return Ok(None),
        };
        text.push(char::from(first));

        let mut base = Base::Dec;
        if first == b'0' {
            // Hex or octal prefix, just 0, or straight into a suffix.
            match input.next_char() {
                None => return self.make_int(text, IntType::Int),
                Some(c) if is_boundary(c) => return self.make_int(text, IntType::Int),
                Some(c @ (b'x' | b'X')) => {
                    base = Base::Hex;
                    text.push(char::from(c));
                }
                Some(c @ b'1'..=b'8') => {
                    base = Base::Oct;
                    text.push(char::from(c));
                }
                Some(c) => return self.match_int_suffix(input, text, c),
            }
        }

        // Remaining digits; the byte ending the run feeds the suffix parser.
        let ender = loop {
            if text.len() >= IDENTIFIER_LIMIT {
                // Constant spelling too big.
                return Ok(None);
            }
            match input.next_char() {
                None => return self.make_int(text, IntType::Int),
                Some(c) if is_boundary(c) => return self.make_int(text, IntType::Int),
                Some(c) if base.accepts(c) => text.push(char::from(c)),
                Some(c) => break c,
            }
        };

        self.match_int_suffix(input, text, ender)
    }

    fn match_int_suffix(
        &self,
        input: &mut impl Cursor,
        text: String,
        first: u8,
    ) -> Result<Option<Token<'i>>, ScanError> {
        match first {
            b'u' | b'U' => match input.next_char() {
                None => self.make_int(text, IntType::Unsigned),
                Some(c) if is_boundary(c) => self.make_int(text, IntType::Unsigned),
                Some(b'l' | b'L') => match input.next_char() {
                    None => self.make_int(text, IntType::UnsignedLong),
                    Some(c) if is_boundary(c) => self.make_int(text, IntType::UnsignedLong),
                    Some(b'l' | b'L') => match input.next_char() {
                        None => self.make_int(text, IntType::UnsignedLongLong),
                        Some(c) if is_boundary(c) => {
                            self.make_int(text, IntType::UnsignedLongLong)
                        }
                        Some(_) => Ok(None),
                    },
                    Some(_) => Ok(None),
                },
                Some(_) => Ok(None),
            },
            b'l' | b'L' => match input.next_char() {
                None => self.make_int(text, IntType::Long),
                Some(c) if is_boundary(c) => self.make_int(text, IntType::Long),
                Some(b'l' | b'L') => match input.next_char() {
                    None => self.make_int(text, IntType::LongLong),
                    Some(c) if is_boundary(c) => self.make_int(text, IntType::LongLong),
                    Some(_) => Ok(None),
                },
                Some(_) => Ok(None),
            },
            _ => Ok(None),
        }
    }

    fn make_int(&self, text: String, int_type: IntType) -> Result<Option<Token<'i>>, ScanError> {
        let text = self.interner.intern(&text)?;
        Ok(Some(Token::new(TokenKind::IntConstant(int_type), text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shale_input::InputBuffer;

    fn keyword(scanner: &Scanner<'_>, source: &str) -> Option<String> {
        let mut input = InputBuffer::from_bytes(source.as_bytes());
        scanner
            .match_keyword(&mut input)
            .unwrap()
            .map(|t| t.text.as_str().to_owned())
    }

    fn identifier(scanner: &Scanner<'_>, source: &str) -> Option<String> {
        let mut input = InputBuffer::from_bytes(source.as_bytes());
        scanner
            .match_identifier(&mut input)
            .unwrap()
            .map(|t| t.text.as_str().to_owned())
    }

    fn integer(scanner: &Scanner<'_>, source: &str) -> Option<(String, IntType)> {
        let mut input = InputBuffer::from_bytes(source.as_bytes());
        scanner
            .match_integer_constant(&mut input)
            .unwrap()
            .map(|t| {
                let TokenKind::IntConstant(int_type) = t.kind else {
                    panic!("not an integer constant: {t:?}");
                };
                (t.text.as_str().to_owned(), int_type)
            })
    }

    fn operator(scanner: &Scanner<'_>, source: &str) -> Option<String> {
        let mut input = InputBuffer::from_bytes(source.as_bytes());
        scanner
            .match_operator(&mut input)
            .unwrap()
            .map(|t| t.text.as_str().to_owned())
    }

    #[test]
    fn keyword_matcher_accepts_every_reserved_word() {
        let interner = Interner::new();
        let scanner = Scanner::new(&interner).unwrap();
        for &word in KEYWORDS {
            assert_eq!(keyword(&scanner, word).as_deref(), Some(word), "{word}");
        }
    }

    #[test]
    fn keyword_matcher_rejects_non_reserved_words() {
        let interner = Interner::new();
        let scanner = Scanner::new(&interner).unwrap();
        let invalid = [
            "class",
            "namespace",
            "template",
            "typename",
            "virtual",
            "final",
            "throw",
            "catch",
            "try",
            "bool",
            "true",
            "false",
            "offsetof",
            "alignof",
            "containerof",
            "",
            " ",
            "domain",
            "intx",
        ];
        for word in invalid {
            assert_eq!(keyword(&scanner, word), None, "{word:?}");
        }
    }

    #[test]
    fn operator_matcher_accepts_every_spelling() {
        let interner = Interner::new();
        let scanner = Scanner::new(&interner).unwrap();
        for &op in OPERATORS {
            assert_eq!(operator(&scanner, op).as_deref(), Some(op), "{op}");
        }
    }

    #[test]
    fn identifier_matcher_valid_and_invalid() {
        let interner = Interner::new();
        let scanner = Scanner::new(&interner).unwrap();

        for word in ["_good", "good", "_123good", "_123", "_"] {
            assert_eq!(identifier(&scanner, word).as_deref(), Some(word), "{word}");
        }
        for word in ["0xdeadfood", "", "\nbad", "\tbad", " bad", "-bad", "bad-bad"] {
            assert_eq!(identifier(&scanner, word), None, "{word:?}");
        }
    }

    #[test]
    fn identifier_matcher_enforces_the_length_limit() {
        let interner = Interner::new();
        let scanner = Scanner::new(&interner).unwrap();

        let longest = "a".repeat(IDENTIFIER_LIMIT - 1);
        assert_eq!(identifier(&scanner, &longest).as_deref(), Some(&*longest));
        let too_long = "a".repeat(IDENTIFIER_LIMIT);
        assert_eq!(identifier(&scanner, &too_long), None);
    }

    #[test]
    fn integer_matcher_bases_and_suffixes() {
        let interner = Interner::new();
        let scanner = Scanner::new(&interner).unwrap();

        assert_eq!(integer(&scanner, "0"), Some(("0".into(), IntType::Int)));
        assert_eq!(integer(&scanner, "12"), Some(("12".into(), IntType::Int)));
        assert_eq!(
            integer(&scanner, "0xdeadf00d"),
            Some(("0xdeadf00d".into(), IntType::Int))
        );
        assert_eq!(
            integer(&scanner, "0Xbaba17ba"),
            Some(("0Xbaba17ba".into(), IntType::Int))
        );
        assert_eq!(
            integer(&scanner, "012345678"),
            Some(("012345678".into(), IntType::Int))
        );

        // The suffix selects the subtype and is not part of the text.
        assert_eq!(integer(&scanner, "12l"), Some(("12".into(), IntType::Long)));
        assert_eq!(
            integer(&scanner, "12LL"),
            Some(("12".into(), IntType::LongLong))
        );
        assert_eq!(
            integer(&scanner, "12u"),
            Some(("12".into(), IntType::Unsigned))
        );
        assert_eq!(
            integer(&scanner, "12ul"),
            Some(("12".into(), IntType::UnsignedLong))
        );
        assert_eq!(
            integer(&scanner, "12uL"),
            Some(("12".into(), IntType::UnsignedLong))
        );
        assert_eq!(
            integer(&scanner, "0xdeadf00dUL"),
            Some(("0xdeadf00d".into(), IntType::UnsignedLong))
        );
        assert_eq!(
            integer(&scanner, "12ULL"),
            Some(("12".into(), IntType::UnsignedLongLong))
        );
    }

    #[test]
    fn integer_matcher_rejects_malformed_constants() {
        let interner = Interner::new();
        let scanner = Scanner::new(&interner).unwrap();

        for text in ["-42", "deadf00d", "0deaff00d", "00", "", "-a", "10ulll", "12lu"] {
            assert_eq!(integer(&scanner, text), None, "{text:?}");
        }
    }
}
