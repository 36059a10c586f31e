//! line oriented tokenizing of UBC text files
//!
//! Every UBC file is a plain text file where anything after a comment marker (`!` by default)
//! is ignored. Lines that are empty after the comment is removed are dropped entirely, so
//! any indexing into the returned lines is over _retained_ lines only.

use super::error::ReadError;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// default marker that starts a comment in every UBC file
pub const COMMENT_MARKER: char = '!';

/// a single line of a file with the comment text removed
#[derive(Debug, Clone, PartialEq, derive_more::Constructor)]
pub struct Line {
    /// 1-based line number in the source file
    pub number: usize,
    /// comment-stripped and trimmed text of the line. Never empty
    pub text: String,
}

impl Line {
    /// whitespace delimited tokens of this line
    pub fn tokens(&self) -> std::str::SplitAsciiWhitespace<'_> {
        self.text.split_ascii_whitespace()
    }

    pub fn token_count(&self) -> usize {
        self.tokens().count()
    }
}

/// remove everything at and after `marker`
pub fn strip_comment(line: &str, marker: char) -> &str {
    match line.find(marker) {
        Some(idx) => &line[..idx],
        None => line,
    }
}

/// iterate over the retained lines of a reader
pub(crate) fn retained_lines<R: BufRead>(
    reader: R,
    marker: char,
) -> impl Iterator<Item = std::io::Result<Line>> {
    reader
        .lines()
        .enumerate()
        .filter_map(move |(idx, line)| match line {
            Ok(line) => {
                let kept = strip_comment(&line, marker).trim();
                if kept.is_empty() {
                    None
                } else {
                    Some(Ok(Line::new(idx + 1, kept.to_string())))
                }
            }
            Err(e) => Some(Err(e)),
        })
}

fn open(path: &Path) -> Result<BufReader<File>, ReadError> {
    let file = File::open(path).map_err(|e| ReadError::new(path, e))?;
    Ok(BufReader::new(file))
}

/// read every retained line of the file at `path`
pub fn read_lines(path: &Path, marker: char) -> Result<Vec<Line>, ReadError> {
    let reader = open(path)?;

    retained_lines(reader, marker)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| ReadError::new(path, e))
}

/// read only up to the first retained line of the file at `path`. Nothing past
/// that line is pulled from the file.
pub fn read_first_line(path: &Path, marker: char) -> Result<Option<Line>, ReadError> {
    let reader = open(path)?;

    retained_lines(reader, marker)
        .next()
        .transpose()
        .map_err(|e| ReadError::new(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comments_and_blank_lines_are_dropped() {
        let text = "! header comment\n1.0 2.0 ! trailing\n\n   \n3.0\n!\n";
        let lines = retained_lines(text.as_bytes(), '!')
            .collect::<Result<Vec<_>, _>>()
            .unwrap();

        assert_eq!(
            lines,
            vec![
                Line::new(2, "1.0 2.0".to_string()),
                Line::new(5, "3.0".to_string())
            ]
        );
        assert_eq!(lines[0].token_count(), 2);
    }

    #[test]
    fn custom_marker() {
        assert_eq!(strip_comment("4 5 6 # cells", '#'), "4 5 6 ");
        assert_eq!(strip_comment("4 5 6 # cells", '!'), "4 5 6 # cells");
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let path = Path::new("/this/path/does/not/exist.msh");
        let err = read_lines(path, COMMENT_MARKER).unwrap_err();
        assert_eq!(err.path(), path);
    }
}
