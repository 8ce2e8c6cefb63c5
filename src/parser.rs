/*!
# Parser

Recursive-descent parser that pulls tokens from a [`Tokenizer`] one at a
time and assembles a [`Value`] tree.

## Examples

```rust
use jsondescent::parser::Parser;
use jsondescent::value::Value;

let value = Parser::new(r#"{"a": 1, "b": [true, false, null]}"#)
    .parse()
    .expect("valid JSON");
assert_eq!(value.get("a"), Some(&Value::Number(1.0)));
```

## Errors

Structural problems are reported as a [`ParseError`] naming what was
expected and the kind of token actually found:

```rust
use jsondescent::error::ParseError;
use jsondescent::parser::Parser;

let result = Parser::new(r#"{"a" 1}"#).parse();
assert!(matches!(result, Err(ParseError::ExpectedColon { .. })));
```
*/
use log::debug;

use crate::error::ParseError;
use crate::options::{DuplicateKeys, ParseOptions};
use crate::tokenizer::{Token, TokenKind, Tokenizer};
use crate::value::{Map, Value};

/// Parser for turning a JSON document into a [`Value`].
///
/// The parser owns its tokenizer and a single token of lookahead. Each
/// grammar rule consumes exactly the tokens of its construct and leaves the
/// lookahead on the first token after it.
#[derive(Debug)]
pub struct Parser<'a> {
    tokenizer: Tokenizer<'a>,
    /// The lookahead token; `None` once the input is exhausted
    current: Option<Token<'a>>,
    options: ParseOptions,
    /// Number of objects/arrays currently open
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Creates a parser over `input` with the default options.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self::with_options(input, ParseOptions::default())
    }

    /// Creates a parser over `input` with the given options.
    #[must_use]
    pub fn with_options(input: &'a str, options: ParseOptions) -> Self {
        Self {
            tokenizer: Tokenizer::new(input),
            current: None,
            options,
            depth: 0,
        }
    }

    /// Parse the whole document.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] on the first lexical or grammar violation.
    /// No partial result is produced.
    pub fn parse(mut self) -> Result<Value, ParseError> {
        debug!("parsing with {:?}", self.options);
        self.advance()?;
        let value = self.parse_value()?;

        if !self.options.allow_trailing_content {
            if let Some(token) = &self.current {
                return Err(ParseError::TrailingContent {
                    offset: token.offset,
                });
            }
        }

        debug!("parsed {} of depth {}", value.kind_name(), value.depth());
        Ok(value)
    }

    /// Replace the lookahead with the next token from the tokenizer.
    fn advance(&mut self) -> Result<(), ParseError> {
        self.current = self.tokenizer.next_token()?;
        Ok(())
    }

    /// The lookahead token, or [`ParseError::UnexpectedEndOfInput`].
    fn peek(&self) -> Result<&Token<'a>, ParseError> {
        self.current.as_ref().ok_or(ParseError::UnexpectedEndOfInput)
    }

    /// Kind and offset of the lookahead token.
    fn lookahead(&self) -> Result<(TokenKind, usize), ParseError> {
        self.peek().map(|token| (token.kind, token.offset))
    }

    /// Take the lookahead token and advance past it.
    fn bump(&mut self) -> Result<Token<'a>, ParseError> {
        let token = self
            .current
            .take()
            .ok_or(ParseError::UnexpectedEndOfInput)?;
        self.advance()?;
        Ok(token)
    }

    /// Parse a value rule, dispatching on the lookahead kind.
    fn parse_value(&mut self) -> Result<Value, ParseError> {
        let (kind, offset) = self.lookahead()?;
        match kind {
            TokenKind::ObjectStart => self.parse_object(),
            TokenKind::ArrayStart => self.parse_array(),
            TokenKind::String => self.parse_string().map(Value::String),
            TokenKind::Number => self.parse_number(),
            TokenKind::Boolean => self.parse_boolean(),
            TokenKind::Null => self.parse_null(),
            TokenKind::ObjectEnd
            | TokenKind::ArrayEnd
            | TokenKind::Colon
            | TokenKind::Comma => Err(ParseError::UnexpectedToken {
                found: kind,
                offset,
            }),
        }
    }

    /// Record entry into an object or array opened at `offset`.
    fn enter(&mut self, offset: usize) -> Result<(), ParseError> {
        self.depth += 1;
        let Some(limit) = self.options.max_depth else {
            return Ok(());
        };
        if self.depth > limit {
            debug!("nesting limit {limit} exceeded at byte {offset}");
            return Err(ParseError::MaxNestingExceeded { limit, offset });
        }
        Ok(())
    }

    /// Parse an object rule into a [`Value::Object`].
    fn parse_object(&mut self) -> Result<Value, ParseError> {
        let open = self.bump()?;
        self.enter(open.offset)?;
        let mut map = Map::new();

        while self.peek()?.kind != TokenKind::ObjectEnd {
            let key_offset = self.peek()?.offset;
            let key = self.parse_string()?;

            let token = self.peek()?;
            if token.kind != TokenKind::Colon {
                return Err(ParseError::ExpectedColon {
                    found: token.kind,
                    offset: token.offset,
                });
            }
            self.advance()?;

            let value = self.parse_value()?;
            self.insert_member(&mut map, key, value, key_offset)?;

            match self.lookahead()? {
                (TokenKind::Comma, _) => {
                    self.advance()?;
                    // a comma commits to another member: `{"a":1,}` is rejected
                    let (found, offset) = self.lookahead()?;
                    if found != TokenKind::String {
                        return Err(ParseError::ExpectedString { found, offset });
                    }
                }
                (TokenKind::ObjectEnd, _) => break,
                (found, offset) => {
                    return Err(ParseError::ExpectedCommaOrBraceEnd {
                        found,
                        offset,
                    });
                }
            }
        }

        self.bump()?;
        self.depth -= 1;
        Ok(Value::Object(map))
    }

    /// Apply the duplicate key policy while inserting a member.
    fn insert_member(
        &self,
        map: &mut Map,
        key: String,
        value: Value,
        offset: usize,
    ) -> Result<(), ParseError> {
        if !map.contains_key(&key) {
            map.insert(key, value);
            return Ok(());
        }

        debug!("duplicate key {key:?} at byte {offset}");
        match self.options.duplicate_keys {
            DuplicateKeys::LastWins => {
                map.insert(key, value);
                Ok(())
            }
            DuplicateKeys::FirstWins => Ok(()),
            DuplicateKeys::Reject => Err(ParseError::DuplicateKey { key, offset }),
        }
    }

    /// Parse an array rule into a [`Value::Array`].
    fn parse_array(&mut self) -> Result<Value, ParseError> {
        let open = self.bump()?;
        self.enter(open.offset)?;
        let mut items = vec![];

        while self.peek()?.kind != TokenKind::ArrayEnd {
            items.push(self.parse_value()?);

            match self.lookahead()? {
                (TokenKind::Comma, _) => {
                    self.advance()?;
                    // `]` cannot start a value, so `[1,]` is rejected
                    let (found, offset) = self.lookahead()?;
                    if found == TokenKind::ArrayEnd {
                        return Err(ParseError::UnexpectedToken { found, offset });
                    }
                }
                (TokenKind::ArrayEnd, _) => break,
                (found, offset) => {
                    return Err(ParseError::ExpectedCommaOrBracketEnd {
                        found,
                        offset,
                    });
                }
            }
        }

        self.bump()?;
        self.depth -= 1;
        Ok(Value::Array(items))
    }

    /// Parse a string rule. The tokenizer already resolved the escapes.
    fn parse_string(&mut self) -> Result<String, ParseError> {
        let token = self.peek()?;
        if token.kind != TokenKind::String {
            return Err(ParseError::ExpectedString {
                found: token.kind,
                offset: token.offset,
            });
        }
        Ok(self.bump()?.text.into_owned())
    }

    /// Parse a number rule into a [`Value::Number`].
    fn parse_number(&mut self) -> Result<Value, ParseError> {
        let token = self.peek()?;
        if token.kind != TokenKind::Number {
            return Err(ParseError::ExpectedNumber {
                found: token.kind,
                offset: token.offset,
            });
        }
        // Overlong digit runs parse to infinity, which has no JSON form.
        let number = token
            .text
            .parse::<f64>()
            .ok()
            .filter(|number| number.is_finite())
            .ok_or_else(|| ParseError::NumberFormat {
                text: token.text.to_string(),
                offset: token.offset,
            })?;
        self.advance()?;
        Ok(Value::Number(number))
    }

    /// Parse a boolean rule into a [`Value::Boolean`].
    fn parse_boolean(&mut self) -> Result<Value, ParseError> {
        let token = self.peek()?;
        let value = match (token.kind, &*token.text) {
            (TokenKind::Boolean, "true") => true,
            (TokenKind::Boolean, "false") => false,
            (found, _) => {
                return Err(ParseError::ExpectedBoolean {
                    found,
                    offset: token.offset,
                });
            }
        };
        self.advance()?;
        Ok(Value::Boolean(value))
    }

    /// Parse a null rule into [`Value::Null`].
    fn parse_null(&mut self) -> Result<Value, ParseError> {
        let token = self.peek()?;
        if token.kind != TokenKind::Null {
            return Err(ParseError::ExpectedNull {
                found: token.kind,
                offset: token.offset,
            });
        }
        self.advance()?;
        Ok(Value::Null)
    }
}
