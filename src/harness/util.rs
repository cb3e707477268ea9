/// Strips one leading and one trailing line break, so fixtures can be written
/// as raw string literals that start and end on their own lines.
pub fn trim_new_line(s: &str) -> &str {
    let s = s
        .strip_prefix("\r\n")
        .or_else(|| s.strip_prefix('\n'))
        .unwrap_or(s);
    s.strip_suffix("\r\n")
        .or_else(|| s.strip_suffix('\n'))
        .unwrap_or(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trims_single_newline_each_side() {
        assert_eq!(trim_new_line("\nabc\n"), "abc");
        assert_eq!(trim_new_line("\n\nabc\n\n"), "\nabc\n");
        assert_eq!(trim_new_line("\r\nabc\r\n"), "abc");
        assert_eq!(trim_new_line("abc"), "abc");
        assert_eq!(trim_new_line("\n"), "");
    }
}
