//! Debug snippet rendering for cursors.
//!
//! The plain snippet is what `Cursor::print_debug` returns and what snapshot
//! tests compare against, so its layout must never depend on the terminal.
//! The colored variant writes the same text through `termcolor`.

use std::io::Write;

use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use unicode_width::UnicodeWidthStr;

use crate::cursor::Cursor;

const GUTTER_SEPARATOR: &str = " | ";
const CARET: char = '^';

/// One row of a rendered snippet.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Row<'a> {
    Source { number: usize, text: &'a str },
    Caret { pad: usize },
}

fn rows(cursor: &Cursor, context_lines: usize) -> (Vec<Row<'_>>, usize) {
    let loc = cursor.get_loc();
    let first = loc.line.saturating_sub(context_lines).max(1);
    let last = (loc.line + context_lines).min(cursor.line_count());

    let mut rows = Vec::new();
    for number in first..=last {
        let Some(text) = cursor.extract_line(number) else {
            continue;
        };
        rows.push(Row::Source { number, text });
        if number == loc.line {
            // Pad by display width so wide glyphs keep the caret aligned.
            let before: String = text.chars().take(loc.column - 1).collect();
            rows.push(Row::Caret {
                pad: before.as_str().width(),
            });
        }
    }
    (rows, last.to_string().len())
}

/// Renders the cursor's line, a caret row under its column, and up to
/// `context_lines` lines on either side. Rows are joined with `\n` and there
/// is no trailing newline.
pub fn debug_snippet(cursor: &Cursor, context_lines: usize) -> String {
    let (rows, width) = rows(cursor, context_lines);
    rows.iter()
        .map(|row| match row {
            Row::Source { number, text } => {
                format!("{:>width$}{}{}", number, GUTTER_SEPARATOR, text, width = width)
            }
            Row::Caret { pad } => format!(
                "{:width$}{}{:pad$}{}",
                "",
                GUTTER_SEPARATOR,
                "",
                CARET,
                width = width,
                pad = *pad
            ),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Writes the snippet with a blue gutter and a red caret.
pub fn write_debug_colored(cursor: &Cursor, writer: &mut impl WriteColor) -> std::io::Result<()> {
    let (rows, width) = rows(cursor, cursor.context_lines());
    let gutter = ColorSpec::new().set_fg(Some(Color::Blue)).set_bold(true).clone();
    let caret = ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true).clone();

    for row in &rows {
        match row {
            Row::Source { number, text } => {
                writer.set_color(&gutter)?;
                write!(writer, "{:>width$}{}", number, GUTTER_SEPARATOR, width = width)?;
                writer.reset()?;
                writeln!(writer, "{}", text)?;
            }
            Row::Caret { pad } => {
                writer.set_color(&gutter)?;
                write!(writer, "{:width$}{}", "", GUTTER_SEPARATOR, width = width)?;
                writer.set_color(&caret)?;
                writeln!(writer, "{:pad$}{}", "", CARET, pad = *pad)?;
                writer.reset()?;
            }
        }
    }
    writer.reset()
}

/// Prints the snippet to stderr, colored when the terminal supports it.
pub fn print_debug_to_stderr(cursor: &Cursor) {
    let mut stderr = StandardStream::stderr(ColorChoice::Auto);
    if write_debug_colored(cursor, &mut stderr).is_err() {
        eprintln!("{}", cursor.print_debug());
    }
}
