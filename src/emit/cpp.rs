use std::fmt::{self, Display, Write};
use std::path::Path;
use std::sync::OnceLock;

use anyhow::Result;
use regex::Regex;

use crate::config::OutputConfig;

/// Columns a tab occupies when wrapping byte arrays.
const TAB_WIDTH: usize = 4;

/// Delimiter used for every raw string literal.
const RAW_DELIMITER: &str = "<!>";

const HEADER_EXTENSIONS: &[&str] = &["h", "hh", "hpp", "hxx", "inc"];

/// Accumulates the body of one generated C++ source file.
///
/// Bodies are written with `write!`/`writeln!`; string values go through the
/// [`Escaped`], [`RawLiteral`] and [`ByteArray`] adapters so escaping happens
/// once, while formatting into the buffer.
pub struct CppWriter {
    body: String,
    banner: String,
    max_literal: usize,
    wrap_width: usize,
}

impl CppWriter {
    pub fn new(output: &OutputConfig) -> Self {
        CppWriter {
            body: String::new(),
            banner: output.banner.clone(),
            max_literal: output.max_literal,
            wrap_width: output.wrap_width,
        }
    }

    /// `text` as one or more raw string literals.
    pub fn raw<'a>(&self, text: &'a str) -> RawLiteral<'a> {
        RawLiteral {
            text,
            max_literal: self.max_literal,
        }
    }

    /// `bytes` as a wrapped list of decimal values, continuation lines
    /// indented by `indent` tabs.
    pub fn bytes<'a>(&self, bytes: &'a [u8], indent: usize) -> ByteArray<'a> {
        ByteArray {
            bytes,
            indent,
            wrap_width: self.wrap_width,
        }
    }

    /// Wrap the body into the final file contents.
    ///
    /// The banner comes first, then `#pragma once` for header outputs, then the
    /// trimmed body (or a placeholder when empty), ending in one newline.
    pub fn finish(self, path: &Path) -> String {
        let body = self.body.trim();
        let mut out = String::with_capacity(self.banner.len() + body.len() + 32);
        out.push_str(&self.banner);
        out.push_str("\n\n");
        if is_header(path) {
            out.push_str("#pragma once\n\n");
        }
        out.push_str(if body.is_empty() { "/* NO CONTENT */" } else { body });
        out.push('\n');
        out
    }
}

impl Write for CppWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.body.push_str(s);
        Ok(())
    }
}

fn is_header(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| HEADER_EXTENSIONS.contains(&ext))
}

/// A value escaped for a double-quoted C string.
pub struct Escaped<'a>(pub &'a str);

impl Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in self.0.chars() {
            match ch {
                '\\' => f.write_str("\\\\")?,
                '"' => f.write_str("\\\"")?,
                '\x07' => f.write_str("\\a")?,
                '\x08' => f.write_str("\\b")?,
                '\x0c' => f.write_str("\\f")?,
                '\n' => f.write_str("\\n")?,
                '\r' => f.write_str("\\r")?,
                '\t' => f.write_str("\\t")?,
                '\x0b' => f.write_str("\\v")?,
                // Octal escapes stop after three digits, unlike `\x`.
                c if c.is_ascii_control() => write!(f, "\\{:03o}", c as u32)?,
                c => f.write_char(c)?,
            }
        }
        Ok(())
    }
}

/// Text written as C++ raw string literals.
///
/// Compilers cap the length of a single literal, so text longer than
/// `max_literal` bytes becomes several adjacent literals inside parentheses.
pub struct RawLiteral<'a> {
    text: &'a str,
    max_literal: usize,
}

impl Display for RawLiteral<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let segments = split_literal(self.text, self.max_literal);
        if let [only] = segments.as_slice() {
            return write!(f, "R\"{RAW_DELIMITER}({only}){RAW_DELIMITER}\"");
        }

        f.write_char('(')?;
        for (i, segment) in segments.iter().enumerate() {
            if i > 0 {
                f.write_char(' ')?;
            }
            write!(f, "R\"{RAW_DELIMITER}({segment}){RAW_DELIMITER}\"")?;
        }
        f.write_char(')')
    }
}

/// Split `text` into chunks of at most `max` bytes on char boundaries,
/// preferring to cut right after a blank line.
pub fn split_literal(text: &str, max: usize) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut rest = text;

    while rest.len() > max {
        let mut end = max;
        while end > 0 && !rest.is_char_boundary(end) {
            end -= 1;
        }
        if let Some(pos) = rest[..end].rfind("\n\n") {
            end = pos + 1;
        }
        if end == 0 {
            // `max` is smaller than the first character.
            end = rest.chars().next().map_or(rest.len(), char::len_utf8);
        }
        let (segment, tail) = rest.split_at(end);
        segments.push(segment);
        rest = tail;
    }

    segments.push(rest);
    segments
}

/// Lines joined as a newline-terminated block, the form license bodies and
/// similar multi-line values are embedded in.
pub fn join_lines<S: AsRef<str>>(lines: &[S]) -> String {
    let mut text = String::new();
    for line in lines {
        text.push_str(line.as_ref());
        text.push('\n');
    }
    text
}

/// Bytes as comma-separated decimal values, wrapped to a column limit.
pub struct ByteArray<'a> {
    bytes: &'a [u8],
    indent: usize,
    wrap_width: usize,
}

impl Display for ByteArray<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let limit = self.wrap_width.saturating_sub(self.indent * TAB_WIDTH);
        let last = self.bytes.len().saturating_sub(1);
        let mut column = 0;

        for (i, byte) in self.bytes.iter().enumerate() {
            let width = decimal_width(*byte) + usize::from(i != last);
            if column > 0 {
                if column + 1 + width > limit {
                    f.write_char('\n')?;
                    for _ in 0..self.indent {
                        f.write_char('\t')?;
                    }
                    column = 0;
                } else {
                    f.write_char(' ')?;
                    column += 1;
                }
            }
            write!(f, "{byte}")?;
            if i != last {
                f.write_char(',')?;
            }
            column += width;
        }
        Ok(())
    }
}

fn decimal_width(byte: u8) -> usize {
    match byte {
        0..=9 => 1,
        10..=99 => 2,
        _ => 3,
    }
}

/// Turn a file stem into a C identifier fragment.
pub fn identifier(raw: &str) -> Result<String> {
    Ok(non_identifier_chars()?.replace_all(raw, "_").into_owned())
}

/// Compiled once per process; generators call [`identifier`] per input file.
fn non_identifier_chars() -> Result<&'static Regex> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    if let Some(re) = PATTERN.get() {
        return Ok(re);
    }
    let re = Regex::new(r"[^A-Za-z0-9_]")?;
    Ok(PATTERN.get_or_init(|| re))
}
