//! Captured fixtures and the cursors replayed from them.

use std::sync::Arc;

use crate::config::{CaptureConfig, DEFAULT_DOCUMENT_NAME};
use crate::cursor::Cursor;
use crate::diagnostics::{exhausted_iterator, FixtureError};
use crate::document::Document;
use crate::scanner::MarkerScanner;

/// A recorded position, in codepoints, in the clean document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Marker {
    pub offset: usize,
}

/// A parsed fixture: the clean document plus its markers in recorded order.
#[derive(Debug, Clone)]
pub struct CaptureResult {
    doc: Arc<Document>,
    markers: Vec<Marker>,
    context_lines: usize,
}

/// Captures a fixture using the default marker syntax.
pub fn capture(fixture: &str) -> Result<CaptureResult, FixtureError> {
    capture_with(&CaptureConfig::default(), fixture)
}

pub fn capture_with(config: &CaptureConfig, fixture: &str) -> Result<CaptureResult, FixtureError> {
    config.validate()?;
    let stripped = MarkerScanner::new(&config.marker, &config.name).scan(fixture)?;
    let markers = stripped
        .offsets
        .into_iter()
        .map(|offset| Marker { offset })
        .collect();
    Ok(CaptureResult {
        doc: Arc::new(Document::new(config.name.clone(), stripped.text)),
        markers,
        context_lines: config.context_lines,
    })
}

impl CaptureResult {
    /// A fresh iterator starting at the first marker.
    pub fn iter(&self) -> Cursors<'_> {
        Cursors {
            capture: self,
            position: 0,
        }
    }

    pub fn doc(&self) -> &Arc<Document> {
        &self.doc
    }

    pub fn text(&self) -> &str {
        self.doc.as_str()
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Cursor at the `n`th marker (0-indexed).
    pub fn cursor_at(&self, n: usize) -> Option<Cursor> {
        self.markers
            .get(n)
            .map(|marker| Cursor::new(Arc::clone(&self.doc), marker.offset, self.context_lines))
    }
}

impl<'a> IntoIterator for &'a CaptureResult {
    type Item = Cursor;
    type IntoIter = Cursors<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Cursors over a capture's markers, one per marker, in order.
#[derive(Debug, Clone)]
pub struct Cursors<'a> {
    capture: &'a CaptureResult,
    position: usize,
}

impl Cursors<'_> {
    /// Like `Iterator::next`, but running out of markers is an error.
    pub fn next_cursor(&mut self) -> Result<Cursor, FixtureError> {
        self.next()
            .ok_or_else(|| exhausted_iterator(self.capture.len()))
    }

    /// Markers not yet handed out.
    pub fn remaining(&self) -> usize {
        self.capture.len() - self.position
    }
}

impl Iterator for Cursors<'_> {
    type Item = Cursor;

    fn next(&mut self) -> Option<Cursor> {
        let cursor = self.capture.cursor_at(self.position)?;
        self.position += 1;
        Some(cursor)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Cursors<'_> {}

impl std::iter::FusedIterator for Cursors<'_> {}

/// Builds a capture from text pieces and explicit marks, with no delimiter
/// syntax involved.
#[derive(Debug, Clone)]
pub struct FixtureBuilder {
    name: String,
    text: String,
    len: usize,
    markers: Vec<Marker>,
    context_lines: usize,
}

impl Default for FixtureBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl FixtureBuilder {
    pub fn new() -> Self {
        Self {
            name: DEFAULT_DOCUMENT_NAME.to_string(),
            text: String::new(),
            len: 0,
            markers: Vec::new(),
            context_lines: CaptureConfig::default().context_lines,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn context_lines(mut self, context_lines: usize) -> Self {
        self.context_lines = context_lines;
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text.push_str(text);
        self.len += text.chars().count();
        self
    }

    /// Records a marker at the current end of the text.
    pub fn mark(mut self) -> Self {
        self.markers.push(Marker { offset: self.len });
        self
    }

    pub fn build(self) -> CaptureResult {
        CaptureResult {
            doc: Arc::new(Document::new(self.name, self.text)),
            markers: self.markers,
            context_lines: self.context_lines,
        }
    }
}
