//! # JSON Token
//!
//! Defines the tokens produced when scanning a JSON document.
use std::borrow::Cow;
use std::fmt::Display;

/// The kind of a lexical unit in a JSON document.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    /* Delimiters */
    /// Opening curly brace
    ObjectStart,

    /// Closing curly brace
    ObjectEnd,

    /// Opening square bracket
    ArrayStart,

    /// Closing square bracket
    ArrayEnd,

    /// Colon character
    Colon,

    /// Comma character
    Comma,

    /* Values */
    /// String literal
    String,

    /// Numeric literal
    Number,

    /// `true` or `false`
    Boolean,

    /// Nil value
    Null,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::ObjectStart => "ObjectStart",
            Self::ObjectEnd => "ObjectEnd",
            Self::ArrayStart => "ArrayStart",
            Self::ArrayEnd => "ArrayEnd",
            Self::Colon => "Colon",
            Self::Comma => "Comma",
            Self::String => "String",
            Self::Number => "Number",
            Self::Boolean => "Boolean",
            Self::Null => "Null",
        };
        write!(f, "{name}")
    }
}

/// A single token from a JSON document.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token<'a> {
    /// What kind of lexical unit this is
    pub kind: TokenKind,
    /// The lexeme. For strings this is the decoded content (escapes
    /// resolved), borrowed from the input whenever no escape occurred.
    pub text: Cow<'a, str>,
    /// Byte offset of the first byte of the token in the input
    pub offset: usize,
}

impl<'a> Token<'a> {
    /// Construct a token borrowing its lexeme from the input.
    pub(crate) const fn borrowed(
        kind: TokenKind,
        text: &'a str,
        offset: usize,
    ) -> Self {
        Self {
            kind,
            text: Cow::Borrowed(text),
            offset,
        }
    }
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {:?}", self.kind, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_display() {
        assert_eq!(TokenKind::ObjectStart.to_string(), "ObjectStart");
        assert_eq!(TokenKind::Number.to_string(), "Number");
    }

    #[test]
    fn token_display_quotes_text() {
        let token = Token::borrowed(TokenKind::String, "a\"b", 0);
        assert_eq!(token.to_string(), r#"String "a\"b""#);
    }
}
