/*!
# Errors

Error types raised while tokenizing ([`LexError`]) and parsing
([`ParseError`]) a JSON document. Every error aborts the parse; there is no
recovery.
*/
use std::error::Error;
use std::fmt;

use crate::tokenizer::TokenKind;

/// The reason a byte sequence could not be scanned into a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexErrorKind {
    /// A backslash followed by a character that is not a known escape.
    InvalidEscape(char),
    /// A `\u` escape without four hex digits, or an unpaired surrogate.
    InvalidUnicodeEscape,
    /// End of input before the closing quote of a string.
    UnterminatedString,
    /// A raw control character (below U+0020) inside a string.
    ControlCharacterInString,
    /// Something starting with `t`/`f` that is not `true`/`false`.
    InvalidBoolean,
    /// Something starting with `n` that is not `null`.
    InvalidNull,
    /// A sign with no digit after it.
    InvalidNumber,
    /// A decimal point with no digit after it.
    InvalidFraction,
    /// A character that cannot start any token.
    UnexpectedCharacter(char),
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEscape(c) => {
                write!(f, "invalid escape sequence '\\{}'", c.escape_debug())
            }
            Self::InvalidUnicodeEscape => {
                write!(f, "invalid unicode escape sequence")
            }
            Self::UnterminatedString => write!(f, "unterminated string literal"),
            Self::ControlCharacterInString => {
                write!(f, "control character in string literal")
            }
            Self::InvalidBoolean => write!(f, "invalid boolean value"),
            Self::InvalidNull => write!(f, "invalid null value"),
            Self::InvalidNumber => write!(f, "invalid character in number"),
            Self::InvalidFraction => write!(f, "invalid fractional part"),
            Self::UnexpectedCharacter(c) => {
                write!(f, "unexpected character '{}'", c.escape_debug())
            }
        }
    }
}

/// A lexical error, raised by the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    /// What went wrong
    pub kind: LexErrorKind,
    /// Byte offset where the offending construct starts
    pub offset: usize,
}

impl LexError {
    pub(crate) const fn new(kind: LexErrorKind, offset: usize) -> Self {
        Self { kind, offset }
    }
}

impl Error for LexError {}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at byte {}", self.kind, self.offset)
    }
}

/// Represents errors that can occur while parsing a JSON document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The tokenizer rejected the input.
    Lex(LexError),
    /// A token that cannot start a value.
    UnexpectedToken {
        /// Kind of the offending token
        found: TokenKind,
        /// Byte offset of the offending token
        offset: usize,
    },
    /// An object key (or string value) was required.
    ExpectedString {
        /// Kind of the offending token
        found: TokenKind,
        /// Byte offset of the offending token
        offset: usize,
    },
    /// A `:` was required after an object key.
    ExpectedColon {
        /// Kind of the offending token
        found: TokenKind,
        /// Byte offset of the offending token
        offset: usize,
    },
    /// A `,` or `}` was required after an object member.
    ExpectedCommaOrBraceEnd {
        /// Kind of the offending token
        found: TokenKind,
        /// Byte offset of the offending token
        offset: usize,
    },
    /// A `,` or `]` was required after an array element.
    ExpectedCommaOrBracketEnd {
        /// Kind of the offending token
        found: TokenKind,
        /// Byte offset of the offending token
        offset: usize,
    },
    /// A number token was required.
    ExpectedNumber {
        /// Kind of the offending token
        found: TokenKind,
        /// Byte offset of the offending token
        offset: usize,
    },
    /// A boolean token was required, or its text was not `true`/`false`.
    ExpectedBoolean {
        /// Kind of the offending token
        found: TokenKind,
        /// Byte offset of the offending token
        offset: usize,
    },
    /// A `null` token was required.
    ExpectedNull {
        /// Kind of the offending token
        found: TokenKind,
        /// Byte offset of the offending token
        offset: usize,
    },
    /// A number lexeme that does not convert to `f64`.
    NumberFormat {
        /// The lexeme
        text: String,
        /// Byte offset of the lexeme
        offset: usize,
    },
    /// The input ended while a rule still expected tokens.
    UnexpectedEndOfInput,
    /// Objects and arrays are nested deeper than the configured ceiling.
    MaxNestingExceeded {
        /// The configured ceiling
        limit: usize,
        /// Byte offset of the bracket that crossed it
        offset: usize,
    },
    /// A key appeared twice in one object under
    /// [`DuplicateKeys::Reject`](crate::options::DuplicateKeys::Reject).
    DuplicateKey {
        /// The repeated key
        key: String,
        /// Byte offset of the second occurrence
        offset: usize,
    },
    /// Tokens remain after the top-level value.
    TrailingContent {
        /// Byte offset of the first extra token
        offset: usize,
    },
}

impl ParseError {
    /// Returns the byte offset in the input where the error was detected,
    /// if one is known.
    #[must_use]
    pub const fn offset(&self) -> Option<usize> {
        match self {
            Self::Lex(err) => Some(err.offset),
            Self::UnexpectedToken { offset, .. }
            | Self::ExpectedString { offset, .. }
            | Self::ExpectedColon { offset, .. }
            | Self::ExpectedCommaOrBraceEnd { offset, .. }
            | Self::ExpectedCommaOrBracketEnd { offset, .. }
            | Self::ExpectedNumber { offset, .. }
            | Self::ExpectedBoolean { offset, .. }
            | Self::ExpectedNull { offset, .. }
            | Self::NumberFormat { offset, .. }
            | Self::MaxNestingExceeded { offset, .. }
            | Self::DuplicateKey { offset, .. }
            | Self::TrailingContent { offset } => Some(*offset),
            Self::UnexpectedEndOfInput => None,
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Lex(err) => Some(err),
            _ => None,
        }
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        Self::Lex(err)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Lex(err) => write!(f, "Lexical error: {err}"),
            Self::UnexpectedToken { found, offset } => {
                write!(f, "Unexpected token {found} at byte {offset}")
            }
            Self::ExpectedString { found, offset } => {
                write!(f, "Expected String, found {found} at byte {offset}")
            }
            Self::ExpectedColon { found, offset } => {
                write!(f, "Expected Colon, found {found} at byte {offset}")
            }
            Self::ExpectedCommaOrBraceEnd { found, offset } => write!(
                f,
                "Expected Comma or ObjectEnd, found {found} at byte {offset}"
            ),
            Self::ExpectedCommaOrBracketEnd { found, offset } => write!(
                f,
                "Expected Comma or ArrayEnd, found {found} at byte {offset}"
            ),
            Self::ExpectedNumber { found, offset } => {
                write!(f, "Expected Number, found {found} at byte {offset}")
            }
            Self::ExpectedBoolean { found, offset } => {
                write!(f, "Expected Boolean, found {found} at byte {offset}")
            }
            Self::ExpectedNull { found, offset } => {
                write!(f, "Expected Null, found {found} at byte {offset}")
            }
            Self::NumberFormat { text, offset } => {
                write!(f, "Malformed number {text:?} at byte {offset}")
            }
            Self::UnexpectedEndOfInput => write!(f, "Unexpected end of input"),
            Self::MaxNestingExceeded { limit, offset } => write!(
                f,
                "Maximum nesting depth of {limit} exceeded at byte {offset}"
            ),
            Self::DuplicateKey { key, offset } => {
                write!(f, "Duplicate object key {key:?} at byte {offset}")
            }
            Self::TrailingContent { offset } => write!(
                f,
                "Unexpected trailing content after top-level value at byte {offset}"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lex_error_display() {
        let err = LexError::new(LexErrorKind::InvalidEscape('x'), 3);
        assert_eq!(err.to_string(), r"invalid escape sequence '\x' at byte 3");
    }

    #[test]
    fn parse_error_display() {
        let err = ParseError::ExpectedColon {
            found: TokenKind::Comma,
            offset: 5,
        };
        assert_eq!(err.to_string(), "Expected Colon, found Comma at byte 5");
    }

    #[test]
    fn lex_error_converts_and_keeps_source() {
        let err: ParseError =
            LexError::new(LexErrorKind::UnterminatedString, 0).into();
        assert_eq!(err.offset(), Some(0));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("unterminated string literal"));
    }

    #[test]
    fn end_of_input_has_no_offset() {
        assert_eq!(ParseError::UnexpectedEndOfInput.offset(), None);
    }
}
