//! Fixture-driven cursors for testing scanning code.
//!
//! Write a fixture with `🌵()` wherever a position matters, capture it, and
//! replay a [`Cursor`] at each marker:
//!
//! ```
//! let result = cursor_fixture::capture("let x = 🌵()42🌵();").unwrap();
//! let mut iter = result.iter();
//! let start = iter.next_cursor().unwrap();
//! let end = iter.next_cursor().unwrap();
//! assert_eq!(start.take_until(&end).unwrap(), "42");
//! assert_eq!(end.get_loc().column, 11);
//! ```

pub use crate::capture::{capture, capture_with, CaptureResult, Cursors, FixtureBuilder, Marker};
pub use crate::config::{CaptureConfig, MarkerSyntax};
pub use crate::cursor::Cursor;
pub use crate::diagnostics::{ErrorType, FixtureError, Span};
pub use crate::document::{Document, DocumentIndex, Loc};

pub mod capture;
pub mod config;
pub mod cursor;
pub mod diagnostics;
pub mod document;
pub mod harness;
pub mod render;
pub mod scanner;
