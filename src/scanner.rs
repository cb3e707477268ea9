//! Marker scanning: turns raw fixture text into a clean document and the
//! ordered codepoint offsets where markers were removed.

use crate::config::MarkerSyntax;
use crate::diagnostics::{invalid_config, malformed_fixture, to_error_source, FixtureError, Span};

/// Output of a successful scan, before it is wrapped in a `CaptureResult`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stripped {
    pub text: String,
    pub offsets: Vec<usize>,
}

/// Strips every `open`+`close` delimiter out of a raw fixture.
#[derive(Debug, Clone)]
pub struct MarkerScanner<'a> {
    syntax: &'a MarkerSyntax,
    name: &'a str,
}

impl<'a> MarkerScanner<'a> {
    pub fn new(syntax: &'a MarkerSyntax, name: &'a str) -> Self {
        Self { syntax, name }
    }

    pub fn scan(&self, raw: &str) -> Result<Stripped, FixtureError> {
        let open = self.syntax.open.as_str();
        let close = self.syntax.close.as_str();
        if open.is_empty() {
            return Err(invalid_config("marker open sigil must not be empty", None));
        }

        let mut text = String::with_capacity(raw.len());
        let mut offsets = Vec::new();
        let mut chars = 0;
        let mut rest = raw;

        while let Some(found) = rest.find(open) {
            let (content, tail) = rest.split_at(found);
            text.push_str(content);
            chars += content.chars().count();

            let after_open = &tail[open.len()..];
            if !after_open.starts_with(close) {
                let start = raw.len() - tail.len();
                return Err(malformed_fixture(
                    format!("marker '{}' is missing its closing '{}'", open, close),
                    to_error_source(self.name, raw),
                    Span::new(start, start + open.len()),
                    format!("write the marker as '{}'", self.syntax.token()),
                ));
            }

            offsets.push(chars);
            rest = &after_open[close.len()..];
        }
        text.push_str(rest);

        Ok(Stripped { text, offsets })
    }
}
