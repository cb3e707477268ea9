//! # Fixture Test Harness
//!
//! Helpers for testing scanning code against captured fixtures. Every helper
//! takes an explicit [`TestContext`] that collects assertion failures; nothing
//! here relies on global or per-thread test state. Call
//! [`TestContext::finish`] at the end of a test to panic with every recorded
//! failure at once.

use std::fmt::Debug;

use difference::{Changeset, Difference};

use crate::capture::{capture, CaptureResult, FixtureBuilder};
use crate::cursor::Cursor;
use crate::diagnostics::{ErrorType, FixtureError};

pub mod suite;
mod util;

pub use util::trim_new_line;

/// The fixture used by [`run_parse_test`]: three integers, each bracketed by
/// a pair of markers.
pub const PARSE_FIXTURE: &str = "-----🌵()1992🌵()------🌵()12🌵()---🌵()86🌵()---";
pub const PARSE_VALUES: [i64; 3] = [1992, 12, 86];

/// A value produced by scanning code under test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scanned {
    Integer(i64),
    /// Scanned text that could not be interpreted.
    Invalid(String),
}

/// Type-safe expectation for a scan result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expectation {
    Value(Scanned),
    Error(ErrorType),
}

impl Expectation {
    pub fn value(value: Scanned) -> Self {
        Self::Value(value)
    }

    pub fn error(error_type: ErrorType) -> Self {
        Self::Error(error_type)
    }

    pub fn matches(&self, result: &Result<Scanned, FixtureError>) -> bool {
        match (self, result) {
            (Expectation::Value(expected), Ok(actual)) => expected == actual,
            (Expectation::Error(expected), Err(error)) => &error.error_type() == expected,
            _ => false,
        }
    }
}

/// Explicit per-test context threaded through every harness helper.
#[derive(Debug)]
pub struct TestContext {
    name: String,
    assertions: usize,
    failures: Vec<String>,
}

impl TestContext {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            assertions: 0,
            failures: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    pub fn assertions(&self) -> usize {
        self.assertions
    }

    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.assertions += 1;
        self.failures.push(message.into());
    }

    /// Records a failure unless `actual == expected`. `message` is typically
    /// the document text, so a failure shows what was being scanned.
    pub fn is<T: PartialEq + Debug>(&mut self, actual: T, expected: T, message: &str) -> bool {
        self.assertions += 1;
        if actual == expected {
            return true;
        }
        self.failures.push(format!(
            "expected {:?}, got {:?}\n  in: {}",
            expected, actual, message
        ));
        false
    }

    /// Structural equality, reported as a diff of pretty-printed values.
    pub fn deep_equal<T: PartialEq + Debug>(&mut self, actual: &T, expected: &T, message: &str) -> bool {
        self.assertions += 1;
        if actual == expected {
            return true;
        }
        let diff = render_diff(&format!("{:#?}", expected), &format!("{:#?}", actual));
        self.failures.push(format!("values differ\n{}\n  in: {}", diff, message));
        false
    }

    /// String equality, reported as a line diff.
    pub fn is_str(&mut self, actual: &str, expected: &str, message: &str) -> bool {
        self.assertions += 1;
        if actual == expected {
            return true;
        }
        self.failures.push(format!(
            "strings differ\n{}\n  in: {}",
            render_diff(expected, actual),
            message
        ));
        false
    }

    /// Unwraps `result`, recording the error as a failure.
    pub fn ok<T>(&mut self, result: Result<T, FixtureError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.fail(error.to_string());
                None
            }
        }
    }

    /// Panics with every recorded failure, if there are any.
    pub fn finish(self) {
        if self.failures.is_empty() {
            return;
        }
        panic!(
            "{}: {} of {} assertions failed\n\n{}",
            self.name,
            self.failures.len(),
            self.assertions,
            self.failures.join("\n\n")
        );
    }
}

/// `-expected` / `+actual` line diff.
fn render_diff(expected: &str, actual: &str) -> String {
    let changeset = Changeset::new(expected, actual, "\n");
    let mut out = Vec::new();
    for diff in &changeset.diffs {
        let (prefix, text) = match diff {
            Difference::Same(x) => (' ', x),
            Difference::Add(x) => ('+', x),
            Difference::Rem(x) => ('-', x),
        };
        for line in text.split('\n') {
            out.push(format!("  {}{}", prefix, line));
        }
    }
    out.join("\n")
}

/// Scans an integer at `cursor`, leaving the cursor after its last digit.
pub fn parse_integer(
    cursor: &mut Cursor,
    is_digit: impl Fn(&Cursor) -> bool,
) -> Result<Scanned, FixtureError> {
    let marker = cursor.clone();
    while is_digit(cursor) && !cursor.is_eof() {
        cursor.next(1);
    }
    let text = marker.take_until(cursor)?;
    Ok(text
        .parse()
        .map(Scanned::Integer)
        .unwrap_or_else(|_| Scanned::Invalid(text.to_string())))
}

/// Runs `is_digit` through an integer scanner at each marker pair of
/// [`PARSE_FIXTURE`]: the scan must produce the expected value and stop
/// exactly on the pair's closing marker.
pub fn run_parse_test(ctx: &mut TestContext, is_digit: impl Fn(&Cursor) -> bool) {
    let Some(result) = ctx.ok(capture(PARSE_FIXTURE)) else {
        return;
    };
    let mut iter = result.iter();

    for value in PARSE_VALUES {
        let Some(mut cursor) = ctx.ok(iter.next_cursor()) else {
            return;
        };
        let Some(target) = ctx.ok(iter.next_cursor()) else {
            return;
        };

        let scanned = parse_integer(&mut cursor, &is_digit);
        let expected = Expectation::value(Scanned::Integer(value));
        if !expected.matches(&scanned) {
            match scanned {
                Ok(actual) => {
                    ctx.deep_equal(&actual, &Scanned::Integer(value), cursor.text());
                }
                Err(error) => ctx.fail(error.to_string()),
            }
        }
        ctx.is(cursor.index(), target.index(), cursor.text());
    }
}

fn first_cursor(ctx: &mut TestContext, input: &str) -> Option<Cursor> {
    let result = ctx.ok(capture(trim_new_line(input)))?;
    let cursor = ctx.ok(result.iter().next_cursor())?;
    Some(cursor)
}

/// Checks the location of the first marker in `input`.
pub fn run_loc_test(ctx: &mut TestContext, input: &str, line: usize, column: usize) {
    let Some(cursor) = first_cursor(ctx, input) else {
        return;
    };
    let loc = cursor.get_loc();
    ctx.is(loc.line, line, cursor.text());
    ctx.is(loc.column, column, cursor.text());
}

/// Renders the lines around the first marker as `"{n} | {text}"`.
pub fn surrounding_lines(cursor: &Cursor) -> String {
    let loc = cursor.get_loc();
    (loc.line.saturating_sub(1)..=loc.line + 1)
        .filter_map(|n| cursor.extract_line(n).map(|line| format!("{} | {}", n, line)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Checks the lines extracted around the first marker in `input`.
pub fn run_get_line_test(ctx: &mut TestContext, input: &str, expected: &str) {
    let Some(cursor) = first_cursor(ctx, input) else {
        return;
    };
    let output = surrounding_lines(&cursor);
    ctx.is_str(&output, trim_new_line(expected), cursor.text());
}

/// Snapshot check of `print_debug` at the first marker in `input`.
pub fn run_print_debug_test(ctx: &mut TestContext, input: &str, expected: &str) {
    let Some(cursor) = first_cursor(ctx, input) else {
        return;
    };
    let output = cursor.print_debug();
    ctx.is_str(&output, trim_new_line(expected), trim_new_line(expected));
}

/// Checks the clean document produced for an already captured fixture.
pub fn run_capture_test(ctx: &mut TestContext, input: &CaptureResult, expected: &str) {
    let Some(cursor) = ctx.ok(input.iter().next_cursor()) else {
        return;
    };
    ctx.is_str(cursor.text(), expected, cursor.text());
}

/// Same check as [`run_capture_test`] for a fixture built inline.
pub fn run_inline_test(ctx: &mut TestContext, input: FixtureBuilder, expected: &str) {
    run_capture_test(ctx, &input.build(), expected);
}
