//! A position within a shared [`Document`].
//!
//! A `Cursor` is nothing more than an `Arc<Document>` and a codepoint index.
//! Cloning forks an independent lineage over the same document; `next` is the
//! only way to move.

use std::sync::Arc;

use crate::diagnostics::{cross_document, reversed_cursor, FixtureError};
use crate::document::{Document, Loc};
use crate::render;

#[derive(Debug, Clone)]
pub struct Cursor {
    doc: Arc<Document>,
    index: usize,
    context_lines: usize,
}

impl Cursor {
    pub(crate) fn new(doc: Arc<Document>, index: usize, context_lines: usize) -> Self {
        let index = index.min(doc.len());
        Self {
            doc,
            index,
            context_lines,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn doc(&self) -> &Arc<Document> {
        &self.doc
    }

    /// The whole document text.
    pub fn text(&self) -> &str {
        self.doc.as_str()
    }

    /// Advances by `n` codepoints, stopping at the end of the document.
    /// Returns how far the cursor actually moved.
    pub fn next(&mut self, n: usize) -> usize {
        let target = self.index.saturating_add(n).min(self.doc.len());
        let moved = target - self.index;
        self.index = target;
        moved
    }

    pub fn is_eof(&self) -> bool {
        self.index == self.doc.len()
    }

    /// The codepoint under the cursor, `None` at end of document.
    pub fn peek(&self) -> Option<char> {
        self.doc.char_at(self.index)
    }

    /// Everything from the cursor to the end of the document.
    pub fn rest(&self) -> &str {
        self.doc.slice(self.index, self.doc.len())
    }

    pub fn starts_with(&self, pattern: &str) -> bool {
        self.rest().starts_with(pattern)
    }

    pub fn same_doc(&self, other: &Cursor) -> bool {
        Arc::ptr_eq(&self.doc, &other.doc)
    }

    /// Text between this cursor and a later cursor on the same document.
    ///
    /// The order is never swapped: `other` must not lie before `self`.
    pub fn take_until(&self, other: &Cursor) -> Result<&str, FixtureError> {
        if !self.same_doc(other) {
            return Err(cross_document(format!(
                "cursor on '{}' cannot take until a cursor on a different document '{}'",
                self.doc.name(),
                other.doc.name()
            )));
        }
        if other.index < self.index {
            return Err(reversed_cursor(self.index, other.index));
        }
        Ok(self.doc.slice(self.index, other.index))
    }

    pub fn get_loc(&self) -> Loc {
        self.doc.line_index().loc(self.index)
    }

    /// Text of a 1-indexed line, or `None` when out of range.
    pub fn extract_line(&self, line: usize) -> Option<&str> {
        self.doc.line(line)
    }

    pub fn line_count(&self) -> usize {
        self.doc.line_count()
    }

    /// A stable snippet of the cursor's line with a caret under its column.
    pub fn print_debug(&self) -> String {
        render::debug_snippet(self, self.context_lines)
    }

    pub(crate) fn context_lines(&self) -> usize {
        self.context_lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(text: &str, index: usize) -> Cursor {
        Cursor::new(Arc::new(Document::new("test", text)), index, 1)
    }

    #[test]
    fn test_next_clamps_at_end() {
        let mut c = cursor("abc", 1);
        assert_eq!(c.next(10), 2);
        assert_eq!(c.index(), 3);
        assert!(c.is_eof());
        assert_eq!(c.next(1), 0);
        assert_eq!(c.index(), 3);
    }

    #[test]
    fn test_next_counts_codepoints() {
        let mut c = cursor("🌵é-x", 0);
        c.next(2);
        assert_eq!(c.peek(), Some('-'));
        assert_eq!(c.rest(), "-x");
    }

    #[test]
    fn test_clone_is_independent() {
        let mut c = cursor("abcdef", 2);
        let mut m = c.clone();
        assert_eq!(m.index(), c.index());
        m.next(3);
        assert_eq!(c.index(), 2);
        c.next(1);
        assert_eq!(m.index(), 5);
        assert!(m.same_doc(&c));
    }

    #[test]
    fn test_take_until_rejects_reversed_order() {
        let c = cursor("abcdef", 4);
        let earlier = cursor("abcdef", 1);
        let mut later = c.clone();
        later.next(1);
        assert_eq!(c.take_until(&later).unwrap(), "e");

        let mut back = c.clone();
        back.index = 1;
        let err = c.take_until(&back).unwrap_err();
        assert_eq!(err.error_type(), crate::ErrorType::ReversedCursor);

        let err = c.take_until(&earlier).unwrap_err();
        assert_eq!(err.error_type(), crate::ErrorType::CrossDocumentCursor);
    }

    #[test]
    fn test_peek_at_eof_is_none() {
        let c = cursor("ab", 2);
        assert_eq!(c.peek(), None);
        assert_eq!(c.rest(), "");
        assert!(!c.starts_with("a"));
    }

    #[test]
    fn test_new_clamps_index() {
        let c = cursor("ab", 7);
        assert_eq!(c.index(), 2);
    }
}
