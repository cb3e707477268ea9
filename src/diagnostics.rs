//! # Fixture Diagnostics
//!
//! This module defines the unified, `miette`-based error type for the cursor
//! engine. Every failure the crate can produce, from a malformed marker in a
//! fixture to a cursor used against the wrong document, is a [`FixtureError`].
//!
//! # Error Construction
//!
//! - Use the constructor helpers (`malformed_fixture`, `cross_document`, ...)
//!   rather than building variants by hand.
//! - Attach a source and span whenever the error points into fixture text, so
//!   that `miette` can render a labelled snippet.
//! - Use [`FixtureError::error_type`] in tests instead of matching on message
//!   strings.

use std::sync::Arc;

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceCode};
use thiserror::Error;

pub type SourceArc = Arc<NamedSource<String>>;

/// A half-open byte range into the source attached to an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// Type-safe error classification that corresponds to `FixtureError` variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorType {
    /// Marker syntax is unterminated or invalid
    MalformedFixture,
    /// `take_until` across two different documents
    CrossDocumentCursor,
    /// `take_until` where the argument lies before the receiver
    ReversedCursor,
    /// The cursor iterator was advanced past its last marker
    ExhaustedIterator,
    /// Bad capture configuration
    InvalidConfig,
    /// Filesystem failures while loading suites
    Io,
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::MalformedFixture => "MalformedFixture",
            ErrorType::CrossDocumentCursor => "CrossDocumentCursor",
            ErrorType::ReversedCursor => "ReversedCursor",
            ErrorType::ExhaustedIterator => "ExhaustedIterator",
            ErrorType::InvalidConfig => "InvalidConfig",
            ErrorType::Io => "Io",
        }
    }
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Minimal error context for diagnostics.
#[derive(Debug, Default)]
pub struct ErrorContext {
    /// The source the span points into (if any).
    pub source: Option<SourceArc>,
    /// The primary span for this error (if any).
    pub span: Option<Span>,
    /// An optional help message.
    pub help: Option<String>,
}

impl ErrorContext {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_help(help: impl Into<String>) -> Self {
        Self {
            help: Some(help.into()),
            ..Self::default()
        }
    }

    pub fn with_all(source: SourceArc, span: Span, help: impl Into<String>) -> Self {
        Self {
            source: Some(source),
            span: Some(span),
            help: Some(help.into()),
        }
    }
}

/// Every failure mode of fixture capture and cursor use.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Malformed fixture: {message}")]
    MalformedFixture { message: String, ctx: ErrorContext },
    #[error("Cross-document cursor: {message}")]
    CrossDocumentCursor { message: String, ctx: ErrorContext },
    #[error("Reversed cursor: {message}")]
    ReversedCursor { message: String, ctx: ErrorContext },
    #[error("Exhausted iterator: {message}")]
    ExhaustedIterator { message: String, ctx: ErrorContext },
    #[error("Invalid config: {message}")]
    InvalidConfig {
        message: String,
        ctx: ErrorContext,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    },
    #[error("I/O error: {message}")]
    Io {
        message: String,
        ctx: ErrorContext,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    },
}

impl FixtureError {
    fn get_ctx(&self) -> &ErrorContext {
        match self {
            FixtureError::MalformedFixture { ctx, .. } => ctx,
            FixtureError::CrossDocumentCursor { ctx, .. } => ctx,
            FixtureError::ReversedCursor { ctx, .. } => ctx,
            FixtureError::ExhaustedIterator { ctx, .. } => ctx,
            FixtureError::InvalidConfig { ctx, .. } => ctx,
            FixtureError::Io { ctx, .. } => ctx,
        }
    }

    fn message(&self) -> &str {
        match self {
            FixtureError::MalformedFixture { message, .. }
            | FixtureError::CrossDocumentCursor { message, .. }
            | FixtureError::ReversedCursor { message, .. }
            | FixtureError::ExhaustedIterator { message, .. }
            | FixtureError::InvalidConfig { message, .. }
            | FixtureError::Io { message, .. } => message,
        }
    }

    /// Returns the type-safe classification for this error.
    pub fn error_type(&self) -> ErrorType {
        match self {
            FixtureError::MalformedFixture { .. } => ErrorType::MalformedFixture,
            FixtureError::CrossDocumentCursor { .. } => ErrorType::CrossDocumentCursor,
            FixtureError::ReversedCursor { .. } => ErrorType::ReversedCursor,
            FixtureError::ExhaustedIterator { .. } => ErrorType::ExhaustedIterator,
            FixtureError::InvalidConfig { .. } => ErrorType::InvalidConfig,
            FixtureError::Io { .. } => ErrorType::Io,
        }
    }

    /// The span this error points at, if it has one.
    pub fn span(&self) -> Option<Span> {
        self.get_ctx().span
    }
}

impl Diagnostic for FixtureError {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        Some(Box::new(self.error_type()) as Box<dyn std::fmt::Display + 'a>)
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        self.get_ctx()
            .help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn std::fmt::Display + 'a>)
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.get_ctx()
            .source
            .as_ref()
            .map(|s| s.as_ref() as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let ctx = self.get_ctx();
        let span = ctx.span?;
        // Zero-width spans still get a visible one-column label.
        let len = if span.end > span.start {
            span.end - span.start
        } else {
            1
        };
        let label = LabeledSpan::new(Some(self.message().to_string()), span.start, len);
        Some(Box::new(std::iter::once(label)))
    }
}

/// Converts fixture text into a named source for error contexts.
pub fn to_error_source(name: &str, source: &str) -> SourceArc {
    Arc::new(NamedSource::new(name, source.to_string()))
}

// ============================================================================
// CONSTRUCTOR HELPERS
// ============================================================================

/// A marker sigil that is not followed by its closing suffix.
pub fn malformed_fixture(
    msg: impl Into<String>,
    source: SourceArc,
    span: Span,
    help: impl Into<String>,
) -> FixtureError {
    FixtureError::MalformedFixture {
        message: msg.into(),
        ctx: ErrorContext::with_all(source, span, help),
    }
}

pub fn cross_document(msg: impl Into<String>) -> FixtureError {
    FixtureError::CrossDocumentCursor {
        message: msg.into(),
        ctx: ErrorContext::with_help("clone the receiver cursor instead of capturing the fixture twice"),
    }
}

pub fn reversed_cursor(from: usize, to: usize) -> FixtureError {
    FixtureError::ReversedCursor {
        message: format!("cannot take from index {} back to index {}", from, to),
        ctx: ErrorContext::with_help("call take_until on the earlier cursor"),
    }
}

pub fn exhausted_iterator(consumed: usize) -> FixtureError {
    FixtureError::ExhaustedIterator {
        message: format!("all {} markers have already been consumed", consumed),
        ctx: ErrorContext::none(),
    }
}

pub fn invalid_config(
    msg: impl Into<String>,
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
) -> FixtureError {
    FixtureError::InvalidConfig {
        message: msg.into(),
        ctx: ErrorContext::none(),
        source,
    }
}

pub fn io_error(msg: impl Into<String>, source: std::io::Error) -> FixtureError {
    FixtureError::Io {
        message: msg.into(),
        ctx: ErrorContext::none(),
        source: Some(Box::new(source)),
    }
}
