use std::io::{self, BufRead, Lines};

/// A `Key: value` tag with its continuation lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub name: String,
    pub values: Vec<String>,
}

/// Line scanner over a Debian-copyright-style manifest.
///
/// Holds one line of lookahead in `current`; `None` means end of stream and a
/// blank line is `Some("")`. Lines starting with `#` are never observed.
pub struct ManifestReader<R> {
    lines: Lines<R>,
    current: Option<String>,
    line_num: usize,
}

impl<R: BufRead> ManifestReader<R> {
    pub fn new(input: R) -> io::Result<Self> {
        let mut reader = ManifestReader {
            lines: input.lines(),
            current: None,
            line_num: 0,
        };
        reader.advance()?;
        Ok(reader)
    }

    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// 1-based number of the current line (counting skipped comments).
    pub fn line_num(&self) -> usize {
        self.line_num
    }

    /// Move to the next non-comment line.
    pub fn advance(&mut self) -> io::Result<()> {
        loop {
            self.current = self.lines.next().transpose()?;
            self.line_num += 1;
            match &self.current {
                Some(line) if line.starts_with('#') => continue,
                _ => return Ok(()),
            }
        }
    }

    /// Read the tag starting at the current line.
    ///
    /// Returns `None` without consuming anything when the current line has no
    /// `:` separator or nothing before it, which marks a paragraph boundary. Otherwise the line is
    /// split at the first `:` and every following line indented by a space or
    /// tab is taken as a continuation value.
    pub fn read_next_tag(&mut self) -> io::Result<Option<Tag>> {
        let (name, first) = match self.current().and_then(|line| line.split_once(':')) {
            Some((name, first)) if !name.is_empty() => (name.to_string(), first.trim().to_string()),
            _ => return Ok(None),
        };

        let mut values = vec![first];
        loop {
            self.advance()?;
            match self.current() {
                Some(line) if line.starts_with([' ', '\t']) => values.push(line.trim().to_string()),
                _ => break,
            }
        }

        Ok(Some(Tag { name, values }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader(text: &str) -> ManifestReader<&[u8]> {
        ManifestReader::new(text.as_bytes()).unwrap()
    }

    #[test]
    fn test_tag_with_continuations() {
        let mut r = reader("License: Apache-2.0\n Line 1\n .\n\tLine 2\nFiles: x\n");
        let tag = r.read_next_tag().unwrap().unwrap();
        assert_eq!(tag.name, "License");
        assert_eq!(tag.values, vec!["Apache-2.0", "Line 1", ".", "Line 2"]);
        assert_eq!(r.current(), Some("Files: x"));
    }

    #[test]
    fn test_blank_line_is_boundary() {
        let mut r = reader("\nFiles: a\n");
        assert_eq!(r.read_next_tag().unwrap(), None);
        assert_eq!(r.current(), Some(""));
    }

    #[test]
    fn test_comment_lines_skipped() {
        let mut r = reader("# header\n# more\nCopyright: 2020 Alice\n# inside\n 2021 Bob\n");
        assert_eq!(r.line_num(), 3);
        let tag = r.read_next_tag().unwrap().unwrap();
        assert_eq!(tag.values, vec!["2020 Alice", "2021 Bob"]);
        assert_eq!(r.current(), None);
    }

    #[test]
    fn test_splits_on_first_colon_only() {
        let mut r = reader("Source: https://example.org/repo\n");
        let tag = r.read_next_tag().unwrap().unwrap();
        assert_eq!(tag.name, "Source");
        assert_eq!(tag.values, vec!["https://example.org/repo"]);
    }

    #[test]
    fn test_line_without_separator() {
        let mut r = reader("not a tag\n");
        assert_eq!(r.read_next_tag().unwrap(), None);
        assert_eq!(r.current(), Some("not a tag"));
    }

    #[test]
    fn test_empty_tag_name_is_boundary() {
        let mut r = reader(": stray\nFiles: x\n");
        assert_eq!(r.read_next_tag().unwrap(), None);
        assert_eq!(r.current(), Some(": stray"));
    }
}
