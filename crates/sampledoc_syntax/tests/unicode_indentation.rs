//! Bodies indented with non-ASCII whitespace.

use sampledoc_core::LanguageId;
use sampledoc_syntax::parser;
use sampledoc_syntax::text::trim_indent;

#[test]
fn mixed_width_whitespace_is_trimmed_by_character() {
    let text = "\u{3000}a\n\u{a0}\u{a0}b\n\u{2003}\tc";
    assert_eq!(trim_indent(text), "a\n\u{a0}b\n\tc");
}

#[test]
fn text_block_with_wide_spaces_parses() {
    let source = "public class WideSample {\n    void render() {\n        String s = \"\"\"\n\u{3000}a\n\u{a0}\u{a0}b\n        \"\"\";\n    }\n}\n";
    let outline = match parser::parse(LanguageId::Java, source) {
        Ok(outline) => outline,
        Err(errors) => panic!("expected an outline, got {errors:?}"),
    };

    let body = outline.classes[0].functions[0].body_text().unwrap();
    let lines: Vec<&str> = body.lines().collect();
    assert!(lines.contains(&"a"), "{body:?}");
    assert!(lines.contains(&"\u{a0}b"), "{body:?}");
}

#[test]
fn every_whitespace_mix_is_safe() {
    let spaces = [" ", "\t", "\u{a0}", "\u{2003}", "\u{3000}"];
    for first in spaces {
        for second in spaces {
            let text = format!("{first}{second}x\n{second}y\n{first}{first}{first}z");
            let trimmed = trim_indent(&text);
            assert!(trimmed.lines().any(|l| !l.starts_with(char::is_whitespace)), "{trimmed:?}");
        }
    }
}
