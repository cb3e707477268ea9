//! Data-driven fixture suites.
//!
//! A suite is a YAML list of cases. Each case has a fixture and one or more
//! expectations about the cursor at its first marker:
//!
//! ```yaml
//! - name: second line
//!   fixture: "abc\nde🌵()f"
//!   expect:
//!     loc: { line: 2, column: 3 }
//!     line: def
//! - name: unterminated marker
//!   fixture: "ab🌵c"
//!   expect:
//!     error: MalformedFixture
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use walkdir::WalkDir;

use super::{surrounding_lines, trim_new_line, TestContext};
use crate::capture::capture_with;
use crate::config::CaptureConfig;
use crate::diagnostics::{invalid_config, io_error, ErrorType, FixtureError};

#[derive(Debug, Clone, Deserialize)]
pub struct SuiteCase {
    pub name: String,
    pub fixture: String,
    #[serde(default)]
    pub expect: CaseExpectation,
    #[serde(default)]
    pub context_lines: Option<usize>,
    #[serde(default)]
    pub skip: bool,
    #[serde(default)]
    pub only: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ExpectedLoc {
    pub line: usize,
    pub column: usize,
}

/// Every field that is present is checked.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CaseExpectation {
    pub loc: Option<ExpectedLoc>,
    /// Text of the cursor's own line.
    pub line: Option<String>,
    /// `"{n} | {text}"` rows for the lines around the cursor.
    pub lines: Option<String>,
    /// Exact `print_debug` output.
    pub debug: Option<String>,
    /// The clean document.
    pub doc: Option<String>,
    /// Number of markers captured.
    pub markers: Option<usize>,
    pub error: Option<ErrorType>,
}

#[derive(Debug, Default)]
pub struct SuiteSummary {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    /// Case name and its failure messages.
    pub failures: Vec<(String, Vec<String>)>,
}

impl SuiteSummary {
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed + self.skipped
    }
}

fn is_suite_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == "yaml" || ext == "yml")
}

/// Recursively finds suite files under `root`, sorted for a stable run order.
pub fn discover_suite_files<P: AsRef<Path>>(root: P) -> Result<Vec<PathBuf>, FixtureError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| {
            let message = format!("failed to walk directory: {}", e);
            io_error(message, e.into())
        })?;
        if !entry.file_type().is_file() || !is_suite_file(entry.path()) {
            continue;
        }
        files.push(entry.path().to_path_buf());
    }
    files.sort();
    Ok(files)
}

pub fn load_suite(path: &Path) -> Result<Vec<SuiteCase>, FixtureError> {
    let content = fs::read_to_string(path)
        .map_err(|e| io_error(format!("failed to read '{}'", path.display()), e))?;
    parse_suite(&content).map_err(|e| match e {
        FixtureError::InvalidConfig { message, .. } => {
            invalid_config(format!("{}: {}", path.display(), message), None)
        }
        other => other,
    })
}

pub fn parse_suite(yaml: &str) -> Result<Vec<SuiteCase>, FixtureError> {
    serde_yaml::from_str(yaml)
        .map_err(|e| invalid_config(format!("unparsable suite: {}", e), Some(Box::new(e))))
}

/// Runs one case, recording failures in `ctx`.
pub fn run_case(ctx: &mut TestContext, case: &SuiteCase) {
    let mut config = CaptureConfig::default().named(case.name.clone());
    if let Some(context_lines) = case.context_lines {
        config = config.with_context_lines(context_lines);
    }
    let expect = &case.expect;

    let result = match capture_with(&config, trim_new_line(&case.fixture)) {
        Ok(result) => result,
        Err(error) => {
            match expect.error {
                Some(expected) => {
                    ctx.is(error.error_type(), expected, &case.fixture);
                }
                None => ctx.fail(error.to_string()),
            }
            return;
        }
    };

    if let Some(count) = expect.markers {
        ctx.is(result.len(), count, result.text());
    }
    if let Some(doc) = &expect.doc {
        ctx.is_str(result.text(), trim_new_line(doc), result.text());
    }

    let has_cursor_checks = expect.loc.is_some()
        || expect.line.is_some()
        || expect.lines.is_some()
        || expect.debug.is_some()
        || expect.error.is_some();
    if !has_cursor_checks {
        return;
    }

    let cursor = match result.iter().next_cursor() {
        Ok(cursor) => cursor,
        Err(error) => {
            match expect.error {
                Some(expected) => {
                    ctx.is(error.error_type(), expected, result.text());
                }
                None => ctx.fail(error.to_string()),
            }
            return;
        }
    };

    if let Some(expected) = expect.error {
        ctx.fail(format!("expected {} but the case succeeded", expected));
    }
    let loc = cursor.get_loc();
    if let Some(expected) = expect.loc {
        ctx.is((loc.line, loc.column), (expected.line, expected.column), cursor.text());
    }
    if let Some(line) = &expect.line {
        ctx.is(cursor.extract_line(loc.line), Some(line.as_str()), cursor.text());
    }
    if let Some(lines) = &expect.lines {
        ctx.is_str(&surrounding_lines(&cursor), trim_new_line(lines), cursor.text());
    }
    if let Some(debug) = &expect.debug {
        ctx.is_str(&cursor.print_debug(), trim_new_line(debug), cursor.text());
    }
}

/// Runs every case. When any case is marked `only`, unmarked cases are skipped.
pub fn run_suite(cases: &[SuiteCase]) -> SuiteSummary {
    let has_only = cases.iter().any(|case| case.only);
    let mut summary = SuiteSummary::default();

    for case in cases {
        if case.skip || (has_only && !case.only) {
            summary.skipped += 1;
            continue;
        }
        let mut ctx = TestContext::new(case.name.clone());
        run_case(&mut ctx, case);
        if ctx.passed() {
            summary.passed += 1;
            continue;
        }
        summary.failed += 1;
        summary
            .failures
            .push((case.name.clone(), ctx.failures().to_vec()));
    }
    summary
}
