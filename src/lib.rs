/*!
# `jsondescent` Library

A two-stage JSON deserializer: a byte-level [`tokenizer`] that turns text
into [`Token`](tokenizer::Token)s on demand, and a recursive-descent
[`parser`] that assembles them into a [`Value`] tree.

```
use jsondescent::{parse, Value};

let value = parse(r#"{"a": 1, "b": [true, false, null]}"#).unwrap();
assert_eq!(value.get("a"), Some(&Value::Number(1.0)));
assert_eq!(value.depth(), 3);
```

Strictness is set per parse through [`ParseOptions`]:

```
use jsondescent::{parse_with_options, DuplicateKeys, ParseError, ParseOptions};

let options = ParseOptions::default().with_duplicate_keys(DuplicateKeys::Reject);
let result = parse_with_options(r#"{"a": 1, "a": 2}"#, options);
assert!(matches!(result, Err(ParseError::DuplicateKey { .. })));
```
*/

pub mod commands;
pub mod error;
pub mod options;
pub mod parser;
pub mod tokenizer;
pub mod utils;
pub mod value;

// Re-exports
pub use error::{LexError, LexErrorKind, ParseError};
pub use options::{DuplicateKeys, ParseOptions};
pub use parser::Parser;
pub use value::{Map, Value};

/// Parse a JSON document with the default [`ParseOptions`].
///
/// # Errors
///
/// Returns a [`ParseError`] describing the first problem in the input.
pub fn parse(input: &str) -> Result<Value, ParseError> {
    Parser::new(input).parse()
}

/// Parse a JSON document with the given options.
///
/// # Errors
///
/// Returns a [`ParseError`] describing the first problem in the input.
pub fn parse_with_options(
    input: &str,
    options: ParseOptions,
) -> Result<Value, ParseError> {
    Parser::with_options(input, options).parse()
}
