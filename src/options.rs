/*!
# Parse Options

Construction-time strictness settings for the [`Parser`](crate::parser::Parser).

```
use jsondescent::options::{DuplicateKeys, ParseOptions};

let options = ParseOptions::default()
    .with_max_depth(Some(16))
    .with_duplicate_keys(DuplicateKeys::Reject);
assert_eq!(options.max_depth, Some(16));
assert!(!options.allow_trailing_content);
```
*/

/// Default ceiling on object/array nesting.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// What to do when a key appears more than once in the same object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateKeys {
    /// Keep the last value, in the position of the first occurrence.
    #[default]
    LastWins,
    /// Keep the first value and ignore later ones.
    FirstWins,
    /// Fail with [`ParseError::DuplicateKey`](crate::error::ParseError::DuplicateKey).
    Reject,
}

/// Strictness settings for a single parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum nesting of objects and arrays. `None` removes the ceiling,
    /// leaving only the call stack as a limit.
    pub max_depth: Option<usize>,
    /// Duplicate key policy.
    pub duplicate_keys: DuplicateKeys,
    /// Accept (and ignore) tokens after the top-level value.
    pub allow_trailing_content: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
            duplicate_keys: DuplicateKeys::default(),
            allow_trailing_content: false,
        }
    }
}

impl ParseOptions {
    /// Set the nesting ceiling.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the duplicate key policy.
    #[must_use]
    pub const fn with_duplicate_keys(mut self, policy: DuplicateKeys) -> Self {
        self.duplicate_keys = policy;
        self
    }

    /// Allow or reject tokens after the top-level value.
    #[must_use]
    pub const fn with_trailing_content(mut self, allow: bool) -> Self {
        self.allow_trailing_content = allow;
        self
    }
}
