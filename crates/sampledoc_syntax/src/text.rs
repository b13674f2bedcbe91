//! Text helpers shared by the parser and the documentation pipeline.

/// Remove the common minimal indentation of all non-blank lines.
///
/// The first and the last lines are dropped when they are blank, and blank lines in between
/// become empty. Lines are joined with `\n`.
///
/// ## Examples
/// ```rust
/// use sampledoc_syntax::text::trim_indent;
///
/// assert_eq!(trim_indent("\n    val x = 1\n      .inc()\n  "), "val x = 1\n  .inc()");
/// ```
pub fn trim_indent(text: &str) -> String {
    let mut lines: Vec<&str> = text.lines().collect();
    if text.ends_with('\n') {
        lines.push("");
    }
    if lines.first().is_some_and(|l| l.trim().is_empty()) {
        lines.remove(0);
    }
    if lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }

    let indent = lines
        .iter()
        .filter(|l| !l.trim().is_empty())
        .map(|l| indent_width(l))
        .min()
        .unwrap_or(0);

    lines
        .iter()
        .map(|l| if l.trim().is_empty() { "" } else { skip_chars(l, indent) })
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Leading whitespace characters of `line`; a wide space counts as one.
pub fn indent_width(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// `line` without its first `count` characters.
fn skip_chars(line: &str, count: usize) -> &str {
    line.char_indices().nth(count).map_or("", |(i, _)| &line[i..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_indent_block_body() {
        let body = "\n        final int x = 1;\n        assertTrue(x > 0);\n    ";
        assert_eq!(trim_indent(body), "final int x = 1;\nassertTrue(x > 0);");
    }

    #[test]
    fn test_trim_indent_keeps_relative_indent_and_inner_blank_lines() {
        let body = "\n    if (x) {\n\n        y()\n    }\n";
        assert_eq!(trim_indent(body), "if (x) {\n\n    y()\n}");
    }

    #[test]
    fn test_trim_indent_single_line() {
        assert_eq!(trim_indent("  \"Hello $name!\"  "), "\"Hello $name!\"");
        assert_eq!(trim_indent(""), "");
        assert_eq!(trim_indent("\n   \n"), "");
    }

    #[test]
    fn test_indent_width_counts_characters() {
        assert_eq!(indent_width("    x"), 4);
        assert_eq!(indent_width("\u{3000}x"), 1);
        assert_eq!(indent_width("\u{a0}\u{a0}x"), 2);
        assert_eq!(indent_width("x"), 0);
    }
}
