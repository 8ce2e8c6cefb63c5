//! Miscellaneous utility functions used by the `jd` binary.

use anyhow::Context as _;
use colored::Colorize;
use std::io::Write;
use std::io::{self, ErrorKind};

use crate::tokenizer::{Token, TokenKind};
use crate::value::Value;

/// Converts a byte offset into a 1-indexed `(line, column)` pair. Columns
/// count characters, not bytes.
#[must_use]
pub fn line_col(input: &str, offset: usize) -> (usize, usize) {
    let mut end = offset.min(input.len());
    while !input.is_char_boundary(end) {
        end -= 1;
    }
    let before = &input[..end];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}

/// Treats a broken pipe as success, so that piping to
/// tools like `head` exits cleanly.
fn ignore_broken_pipe(
    result: io::Result<()>,
    what: &'static str,
) -> anyhow::Result<()> {
    match result {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == ErrorKind::BrokenPipe => Ok(()),
        Err(err) => Err(err).context(what),
    }
}

/// Write one line per token: kind, lexeme and byte offset.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn write_tokens<W: Write>(
    writer: &mut W,
    tokens: &[Token<'_>],
) -> anyhow::Result<()> {
    let result = (|| -> io::Result<()> {
        for token in tokens {
            let kind = token.kind.to_string();
            let text = match token.kind {
                TokenKind::String => format!("{:?}", token.text).green(),
                TokenKind::Number | TokenKind::Boolean => token.text.yellow(),
                TokenKind::Null => token.text.red().dimmed(),
                _ => token.text.normal(),
            };
            writeln!(writer, "{:>5}  {:<12} {}", token.offset, kind.bold(), text)?;
        }
        Ok(())
    })();
    ignore_broken_pipe(result, "write token listing to stdout")
}

/// Write a parsed value with syntax highlighting, followed by a newline.
///
/// # Errors
///
/// Returns an error if writing to `writer` fails.
pub fn write_colored_result<W: Write>(
    writer: &mut W,
    value: &Value,
    pretty: bool,
) -> anyhow::Result<()> {
    let result = (|| -> io::Result<()> {
        write_colored_json(writer, value, 0, pretty)?;
        writeln!(writer)
    })();
    ignore_broken_pipe(result, "write colorized JSON to stdout")
}

/// Quote and escape a string the way it would appear in a JSON document.
fn quote(s: &str) -> String {
    serde_json::Value::from(s).to_string()
}

/// Recursively write a JSON value with syntax highlighting.
fn write_colored_json<W: Write>(
    writer: &mut W,
    value: &Value,
    indent: usize,
    pretty: bool,
) -> io::Result<()> {
    let next_indent = indent + 2;

    match value {
        Value::Null => write!(writer, "{}", "null".red().dimmed()),
        Value::Boolean(b) => {
            write!(writer, "{}", b.to_string().yellow().bold())
        }
        Value::Number(n) => write!(writer, "{}", n.to_string().yellow()),
        Value::String(s) => write!(writer, "{}", quote(s).green()),
        Value::Array(arr) => {
            write!(writer, "[")?;
            for (i, item) in arr.iter().enumerate() {
                if i > 0 {
                    write!(writer, ",")?;
                }
                if pretty {
                    writeln!(writer)?;
                    write!(writer, "{:width$}", "", width = next_indent)?;
                }
                write_colored_json(writer, item, next_indent, pretty)?;
            }
            if pretty && !arr.is_empty() {
                writeln!(writer)?;
                write!(writer, "{:width$}", "", width = indent)?;
            }
            write!(writer, "]")
        }
        Value::Object(obj) => {
            write!(writer, "{{")?;
            for (i, (key, val)) in obj.iter().enumerate() {
                if i > 0 {
                    write!(writer, ",")?;
                }
                if pretty {
                    writeln!(writer)?;
                    write!(writer, "{:width$}", "", width = next_indent)?;
                }
                write!(writer, "{}", quote(key).cyan())?;
                write!(writer, "{}", if pretty { ": " } else { ":" })?;
                write_colored_json(writer, val, next_indent, pretty)?;
            }
            if pretty && !obj.is_empty() {
                writeln!(writer)?;
                write!(writer, "{:width$}", "", width = indent)?;
            }
            write!(writer, "}}")
        }
    }
}
