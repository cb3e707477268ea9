//! The immutable text a capture produces, plus its line index.
//!
//! All positions exposed by this crate are codepoint indices. A `Document`
//! keeps a boundary table mapping each codepoint index to its byte offset so
//! that slicing stays `O(1)` and always lands on a `char` boundary.

use std::fmt;

/// A derived 1-indexed line/column pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Loc {
    pub line: usize,
    pub column: usize,
}

impl Loc {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Precomputed line-start offsets, in codepoints.
///
/// The first entry is always `0`; every `\n` starts a new line at the index
/// after it, so a document ending in `\n` has a trailing empty line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentIndex {
    line_starts: Vec<usize>,
}

impl DocumentIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, ch) in text.chars().enumerate() {
            if ch == '\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Codepoint index where the 1-indexed `line` starts.
    pub fn line_start(&self, line: usize) -> Option<usize> {
        line.checked_sub(1).and_then(|i| self.line_starts.get(i).copied())
    }

    /// The line is the number of line starts at or before `index`.
    pub fn loc(&self, index: usize) -> Loc {
        let line = self.line_starts.partition_point(|&start| start <= index);
        let start = self.line_starts[line - 1];
        Loc::new(line, index - start + 1)
    }
}

/// Fixture text after marker stripping.
#[derive(Debug, PartialEq, Eq)]
pub struct Document {
    name: String,
    text: String,
    /// Byte offset of every codepoint, plus `text.len()` at the end.
    boundaries: Vec<usize>,
    index: DocumentIndex,
}

impl Document {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let mut boundaries: Vec<usize> = text.char_indices().map(|(b, _)| b).collect();
        boundaries.push(text.len());
        let index = DocumentIndex::new(&text);
        Self {
            name: name.into(),
            text,
            boundaries,
            index,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in codepoints.
    pub fn len(&self) -> usize {
        self.boundaries.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn line_index(&self) -> &DocumentIndex {
        &self.index
    }

    pub fn line_count(&self) -> usize {
        self.index.line_count()
    }

    pub(crate) fn byte_offset(&self, index: usize) -> usize {
        self.boundaries[index.min(self.len())]
    }

    /// Text between two codepoint indices. Callers ensure `start <= end`.
    pub fn slice(&self, start: usize, end: usize) -> &str {
        &self.text[self.byte_offset(start)..self.byte_offset(end)]
    }

    pub fn char_at(&self, index: usize) -> Option<char> {
        if index >= self.len() {
            return None;
        }
        self.slice(index, index + 1).chars().next()
    }

    /// Text of the 1-indexed `line` with its `\n` (and a preceding `\r`) removed.
    pub fn line(&self, line: usize) -> Option<&str> {
        let start = self.index.line_start(line)?;
        let end = self.index.line_start(line + 1).unwrap_or(self.len() + 1) - 1;
        let text = self.slice(start, end.max(start));
        Some(text.strip_suffix('\r').unwrap_or(text))
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_starts_after_newlines() {
        let index = DocumentIndex::new("ab\ncd\n");
        assert_eq!(index.line_count(), 3);
        assert_eq!(index.line_start(1), Some(0));
        assert_eq!(index.line_start(2), Some(3));
        assert_eq!(index.line_start(3), Some(6));
        assert_eq!(index.line_start(0), None);
        assert_eq!(index.line_start(4), None);
    }

    #[test]
    fn test_loc_on_newline_stays_on_its_line() {
        let index = DocumentIndex::new("ab\ncd");
        assert_eq!(index.loc(0), Loc::new(1, 1));
        assert_eq!(index.loc(2), Loc::new(1, 3));
        assert_eq!(index.loc(3), Loc::new(2, 1));
        assert_eq!(index.loc(5), Loc::new(2, 3));
    }

    #[test]
    fn test_lengths_count_codepoints() {
        let doc = Document::new("t", "a🌵b");
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.as_str().len(), 6);
        assert_eq!(doc.char_at(1), Some('🌵'));
        assert_eq!(doc.slice(1, 3), "🌵b");
        assert_eq!(doc.char_at(3), None);
    }

    #[test]
    fn test_line_extraction() {
        let doc = Document::new("t", "one\r\ntwo\n");
        assert_eq!(doc.line(1), Some("one"));
        assert_eq!(doc.line(2), Some("two"));
        assert_eq!(doc.line(3), Some(""));
        assert_eq!(doc.line(4), None);
        assert_eq!(doc.line(0), None);
    }

    #[test]
    fn test_empty_document_has_one_empty_line() {
        let doc = Document::new("t", "");
        assert!(doc.is_empty());
        assert_eq!(doc.len(), 0);
        assert_eq!(doc.line_count(), 1);
        assert_eq!(doc.line(1), Some(""));
        assert_eq!(doc.line_index().loc(0), Loc::new(1, 1));
    }
}
