//! # JSON Lexer
//!
//! Scans an input JSON document one byte at a time and produces tokens on
//! demand. Multi-byte UTF-8 sequences are only ever found inside string
//! literals, where they pass through untouched.
use std::borrow::Cow;

use log::trace;

use crate::error::{LexError, LexErrorKind};
use crate::tokenizer::{Token, TokenKind};

/// A lexer that pulls tokens out of a borrowed JSON document.
///
/// The cursor only moves forward. Once an error has been returned through
/// the [`Iterator`] interface, the iterator is exhausted.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    /// The input document
    input: &'a str,
    /// Current position (current byte)
    position: usize,
    /// Current reading position (after current byte)
    read_position: usize,
    /// Current byte under examination, `0` once past the end
    byte: u8,
    /// Set after the iterator yields an error
    failed: bool,
}

impl<'a> Tokenizer<'a> {
    /// Creates a tokenizer positioned at the start of `input`.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        let mut lexer = Self {
            input,
            position: 0,
            read_position: 0,
            byte: 0,
            failed: false,
        };
        // put the lexer in an initial working state
        lexer.read_byte();
        lexer
    }

    /// Reads and consumes the next byte in the input sequence.
    fn read_byte(&mut self) {
        self.byte = self
            .input
            .as_bytes()
            .get(self.read_position)
            .copied()
            .unwrap_or(0);
        self.position = self.read_position;
        self.read_position += 1;
    }

    /// Whether the cursor has run past the last byte.
    const fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// The full character starting at the cursor.
    fn current_char(&self) -> char {
        self.input[self.position..]
            .chars()
            .next()
            .unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    /// Consume whitespace byte(s) starting from the current position.
    fn skip_whitespace(&mut self) {
        while !self.at_end() && matches!(self.byte, b' ' | b'\t' | b'\n' | b'\r')
        {
            self.read_byte();
        }
    }

    /// Returns the next token, or `None` once only whitespace remains.
    ///
    /// # Errors
    ///
    /// Returns a [`LexError`] if the bytes at the cursor do not form a valid
    /// token.
    pub fn next_token(&mut self) -> Result<Option<Token<'a>>, LexError> {
        self.skip_whitespace();
        if self.at_end() {
            return Ok(None);
        }

        let token = match self.byte {
            b'{' => self.read_punctuation(TokenKind::ObjectStart),
            b'}' => self.read_punctuation(TokenKind::ObjectEnd),
            b'[' => self.read_punctuation(TokenKind::ArrayStart),
            b']' => self.read_punctuation(TokenKind::ArrayEnd),
            b':' => self.read_punctuation(TokenKind::Colon),
            b',' => self.read_punctuation(TokenKind::Comma),
            b'"' => self.read_string()?,
            b't' => self.read_keyword(
                "true",
                TokenKind::Boolean,
                LexErrorKind::InvalidBoolean,
            )?,
            b'f' => self.read_keyword(
                "false",
                TokenKind::Boolean,
                LexErrorKind::InvalidBoolean,
            )?,
            b'n' => self.read_keyword(
                "null",
                TokenKind::Null,
                LexErrorKind::InvalidNull,
            )?,
            b'-' | b'+' | b'0'..=b'9' => self.read_number()?,
            _ => {
                return Err(LexError::new(
                    LexErrorKind::UnexpectedCharacter(self.current_char()),
                    self.position,
                ));
            }
        };

        trace!("token {token} at byte {}", token.offset);
        Ok(Some(token))
    }

    /// Consumes a single structural byte.
    fn read_punctuation(&mut self, kind: TokenKind) -> Token<'a> {
        let start = self.position;
        self.read_byte();
        Token::borrowed(kind, &self.input[start..self.position], start)
    }

    /// Matches `expected` byte for byte (`true`/`false`/`null`).
    fn read_keyword(
        &mut self,
        expected: &'static str,
        kind: TokenKind,
        error: LexErrorKind,
    ) -> Result<Token<'a>, LexError> {
        let start = self.position;
        for &b in expected.as_bytes() {
            if self.at_end() || self.byte != b {
                return Err(LexError::new(error, start));
            }
            self.read_byte();
        }
        Ok(Token::borrowed(kind, expected, start))
    }

    /// Reads a number: optional sign, digits, optional `.` and digits.
    fn read_number(&mut self) -> Result<Token<'a>, LexError> {
        let start = self.position;

        // optional leading sign
        if matches!(self.byte, b'-' | b'+') {
            self.read_byte();
        }

        // integer part
        if !self.byte.is_ascii_digit() {
            return Err(LexError::new(LexErrorKind::InvalidNumber, start));
        }
        while self.byte.is_ascii_digit() {
            self.read_byte();
        }

        // fractional part
        if self.byte == b'.' {
            self.read_byte();
            if !self.byte.is_ascii_digit() {
                return Err(LexError::new(LexErrorKind::InvalidFraction, start));
            }
            while self.byte.is_ascii_digit() {
                self.read_byte();
            }
        }

        Ok(Token::borrowed(
            TokenKind::Number,
            &self.input[start..self.position],
            start,
        ))
    }

    /// Reads a string literal and resolves its escape sequences.
    ///
    /// The decoded text borrows from the input until the first escape is
    /// seen; only then is an owned buffer allocated.
    fn read_string(&mut self) -> Result<Token<'a>, LexError> {
        let start = self.position;
        // Skip opening quote
        self.read_byte();
        let mut run_start = self.position;
        let mut decoded: Option<String> = None;

        loop {
            if self.at_end() {
                return Err(LexError::new(
                    LexErrorKind::UnterminatedString,
                    start,
                ));
            }
            match self.byte {
                b'"' => break,
                b'\\' => {
                    let buf = decoded.get_or_insert_with(String::new);
                    buf.push_str(&self.input[run_start..self.position]);
                    let escape_at = self.position;
                    self.read_byte();
                    if self.at_end() {
                        return Err(LexError::new(
                            LexErrorKind::UnterminatedString,
                            start,
                        ));
                    }
                    let c = match self.byte {
                        b'"' => '"',
                        b'\\' => '\\',
                        b'/' => '/',
                        b'b' => '\u{8}',
                        b'f' => '\u{c}',
                        b'n' => '\n',
                        b'r' => '\r',
                        b't' => '\t',
                        b'u' => self.read_unicode_escape(escape_at)?,
                        _ => {
                            return Err(LexError::new(
                                LexErrorKind::InvalidEscape(
                                    self.current_char(),
                                ),
                                escape_at,
                            ));
                        }
                    };
                    buf.push(c);
                    self.read_byte();
                    run_start = self.position;
                }
                b if b < 0x20 => {
                    return Err(LexError::new(
                        LexErrorKind::ControlCharacterInString,
                        self.position,
                    ));
                }
                _ => self.read_byte(),
            }
        }

        let text = match decoded {
            Some(mut buf) => {
                buf.push_str(&self.input[run_start..self.position]);
                Cow::Owned(buf)
            }
            None => Cow::Borrowed(&self.input[run_start..self.position]),
        };
        // Skip closing quote
        self.read_byte();

        Ok(Token {
            kind: TokenKind::String,
            text,
            offset: start,
        })
    }

    /// Decodes the code point of a `\uXXXX` escape (and the low half of a
    /// surrogate pair, if needed). On entry the cursor is on the `u`; on
    /// success it is left on the last hex digit.
    fn read_unicode_escape(&mut self, escape_at: usize) -> Result<char, LexError> {
        let invalid =
            || LexError::new(LexErrorKind::InvalidUnicodeEscape, escape_at);

        let high = self.read_hex4().ok_or_else(invalid)?;
        let code = match high {
            0xD800..=0xDBFF => {
                self.read_byte();
                if self.byte != b'\\' {
                    return Err(invalid());
                }
                self.read_byte();
                if self.byte != b'u' {
                    return Err(invalid());
                }
                let low = self.read_hex4().ok_or_else(invalid)?;
                if !(0xDC00..=0xDFFF).contains(&low) {
                    return Err(invalid());
                }
                0x10000 + ((high - 0xD800) << 10) + (low - 0xDC00)
            }
            0xDC00..=0xDFFF => return Err(invalid()),
            _ => high,
        };
        char::from_u32(code).ok_or_else(invalid)
    }

    /// Reads four hex digits following the cursor.
    fn read_hex4(&mut self) -> Option<u32> {
        let mut value = 0;
        for _ in 0..4 {
            self.read_byte();
            if self.at_end() {
                return None;
            }
            value = value * 16 + char::from(self.byte).to_digit(16)?;
        }
        Some(value)
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token<'a>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_token() {
            Ok(token) => token.map(Ok),
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

/// Tokenize a whole JSON document.
///
/// # Errors
///
/// Returns the first [`LexError`] encountered.
pub fn tokenize(text: &str) -> Result<Vec<Token<'_>>, LexError> {
    Tokenizer::new(text).collect()
}
