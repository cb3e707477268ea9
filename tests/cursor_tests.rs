//! Public-surface tests for capture, cursors, and locations.

use cursor_fixture::{capture, Cursor, ErrorType, Loc};

const SAMPLES: &[&str] = &[
    "",
    "single line",
    "two\nlines",
    "trailing\n",
    "\n\nblank lines\n\n",
    "uni🌶code\nглиф\n日本語",
    "crlf\r\nline",
];

/// Captures `text` with a marker appended, then walks a cursor from the start.
fn cursor_at_start(text: &str) -> Cursor {
    let fixture = format!("🌵(){}", text);
    capture(&fixture).unwrap().iter().next().unwrap()
}

#[cfg(test)]
mod capture_tests {
    use super::*;

    #[test]
    fn test_yields_one_cursor_per_marker_in_order() {
        let result = capture("🌵()a🌵()bc🌵()\nd🌵()").unwrap();
        let indices: Vec<usize> = result.iter().map(|c| c.index()).collect();
        assert_eq!(indices, vec![0, 1, 3, 5]);
        assert_eq!(result.text(), "abc\nd");
    }

    #[test]
    fn test_marker_count_matches_token_count() {
        for k in 0..6 {
            let fixture = "x🌵()".repeat(k);
            let result = capture(&fixture).unwrap();
            assert_eq!(result.iter().count(), k);
            assert_eq!(result.text(), "x".repeat(k));
        }
    }

    #[test]
    fn test_malformed_fixture_fails_at_capture() {
        let err = capture("abc🌵def").unwrap_err();
        assert_eq!(err.error_type(), ErrorType::MalformedFixture);
    }

    #[test]
    fn test_malformed_fixture_renders_with_miette() {
        let err = capture("ab🌵(c").unwrap_err();
        let report = miette::Report::new(err);
        let rendered = format!("{:?}", report);
        assert!(rendered.contains("missing its closing"));
    }

    #[test]
    fn test_exhausted_iterator_is_explicit() {
        let result = capture("a🌵()b").unwrap();
        let mut iter = result.iter();
        assert!(iter.next_cursor().is_ok());
        let err = iter.next_cursor().unwrap_err();
        assert_eq!(err.error_type(), ErrorType::ExhaustedIterator);
    }
}

#[cfg(test)]
mod cursor_behaviour_tests {
    use super::*;

    #[test]
    fn test_clone_then_advance_is_independent() {
        let result = capture("ab🌵()cdef").unwrap();
        let c = result.iter().next().unwrap();
        let mut m = c.clone();
        assert_eq!(m.index(), c.index());
        m.next(2);
        assert_eq!(c.index(), 2);
        assert_eq!(m.index(), 4);
    }

    #[test]
    fn test_take_until_matches_document_substring() {
        for text in SAMPLES {
            let len = text.chars().count();
            for i in 0..=len {
                for j in i..=len {
                    let mut c = cursor_at_start(text);
                    c.next(i);
                    let m = c.clone();
                    c.next(j - i);
                    let expected: String = text.chars().skip(i).take(j - i).collect();
                    assert_eq!(m.take_until(&c).unwrap(), expected);
                }
            }
        }
    }

    #[test]
    fn test_next_past_end_clamps() {
        let mut c = cursor_at_start("abc");
        assert_eq!(c.next(100), 3);
        assert!(c.is_eof());
        assert_eq!(c.index(), 3);
    }

    #[test]
    fn test_take_until_reversed_is_rejected() {
        let mut later = cursor_at_start("abcdef");
        later.next(3);
        let earlier = cursor_at_start("abcdef");
        // Different captures, so the document check comes first.
        assert_eq!(
            later.take_until(&earlier).unwrap_err().error_type(),
            ErrorType::CrossDocumentCursor
        );

        let start = later.clone();
        let mut end = start.clone();
        end.next(1);
        assert_eq!(
            end.take_until(&start).unwrap_err().error_type(),
            ErrorType::ReversedCursor
        );
    }

    #[test]
    fn test_cursor_can_move_to_another_thread() {
        let result = capture("ab🌵()c").unwrap();
        let cursor = result.iter().next().unwrap();
        let mut moved = cursor.clone();
        let handle = std::thread::spawn(move || {
            moved.next(1);
            moved.index()
        });
        assert_eq!(handle.join().unwrap(), 3);
        assert_eq!(cursor.index(), 2);
    }
}

#[cfg(test)]
mod location_tests {
    use super::*;

    #[test]
    fn test_loc_round_trips_through_extract_line() {
        for text in SAMPLES {
            let chars: Vec<char> = text.chars().collect();
            let mut c = cursor_at_start(text);
            loop {
                let Loc { line, column } = c.get_loc();
                let line_text = c.extract_line(line).unwrap();
                match line_text.chars().nth(column - 1) {
                    Some(ch) => assert_eq!(ch, chars[c.index()], "in {:?}", text),
                    None => assert!(
                        c.is_eof() || matches!(chars[c.index()], '\n' | '\r'),
                        "in {:?} at {}",
                        text,
                        c.index()
                    ),
                }
                if c.is_eof() {
                    break;
                }
                c.next(1);
            }
        }
    }

    #[test]
    fn test_extract_line_out_of_range_is_none() {
        for text in SAMPLES {
            let c = cursor_at_start(text);
            let total = c.line_count();
            assert_eq!(c.extract_line(0), None);
            assert_eq!(c.extract_line(total + 1), None);
            assert!(c.extract_line(total).is_some());
        }
    }

    #[test]
    fn test_line_two_column_three() {
        let result = capture("abc\nde🌵()f").unwrap();
        let cursor = result.iter().next().unwrap();
        assert_eq!(cursor.get_loc(), Loc::new(2, 3));
    }

    #[test]
    fn test_print_debug_snapshot() {
        let result = capture("abc\nde🌵()f").unwrap();
        let cursor = result.iter().next().unwrap();
        let snapshot = "1 | abc\n2 | def\n  |   ^";
        assert_eq!(cursor.print_debug(), snapshot);
        // Stable across calls and across re-captures.
        assert_eq!(cursor.print_debug(), snapshot);
        let again = capture("abc\nde🌵()f").unwrap();
        assert_eq!(again.iter().next().unwrap().print_debug(), snapshot);
    }

    #[test]
    fn test_print_debug_at_eof_after_trailing_newline() {
        let result = capture("abc\n🌵()").unwrap();
        let cursor = result.iter().next().unwrap();
        assert_eq!(cursor.get_loc(), Loc::new(2, 1));
        assert_eq!(cursor.print_debug(), "1 | abc\n2 | \n  | ^");
    }
}
