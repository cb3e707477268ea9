//! Capture configuration.
//!
//! The defaults match the marker syntax used throughout the fixtures in this
//! crate, so most callers never construct a config by hand and just call
//! [`crate::capture`].

use serde::{Deserialize, Serialize};

use crate::diagnostics::{invalid_config, FixtureError};

pub const DEFAULT_MARKER_OPEN: &str = "🌵";
pub const DEFAULT_MARKER_CLOSE: &str = "()";
pub const DEFAULT_DOCUMENT_NAME: &str = "fixture";

/// The delimiter token that records a position: `open` immediately followed by
/// `close`. An `open` without its `close` is a malformed fixture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerSyntax {
    pub open: String,
    pub close: String,
}

impl MarkerSyntax {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            open: open.into(),
            close: close.into(),
        }
    }

    /// The full delimiter as it appears in fixture text.
    pub fn token(&self) -> String {
        format!("{}{}", self.open, self.close)
    }
}

impl Default for MarkerSyntax {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER_OPEN, DEFAULT_MARKER_CLOSE)
    }
}

/// Settings for turning raw fixture text into a [`crate::CaptureResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Name given to the document in diagnostics.
    pub name: String,
    pub marker: MarkerSyntax,
    /// Lines of context printed before and after the cursor line by `print_debug`.
    pub context_lines: usize,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_DOCUMENT_NAME.to_string(),
            marker: MarkerSyntax::default(),
            context_lines: 1,
        }
    }
}

impl CaptureConfig {
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_marker(mut self, marker: MarkerSyntax) -> Self {
        self.marker = marker;
        self
    }

    pub fn with_context_lines(mut self, context_lines: usize) -> Self {
        self.context_lines = context_lines;
        self
    }

    /// Parses a config from YAML, then validates it.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, FixtureError> {
        let config: CaptureConfig = serde_yaml::from_str(yaml)
            .map_err(|e| invalid_config(format!("unparsable config: {}", e), Some(Box::new(e))))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), FixtureError> {
        if self.marker.open.is_empty() {
            return Err(invalid_config("marker open sigil must not be empty", None));
        }
        Ok(())
    }
}
