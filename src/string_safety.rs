use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // CSI and OSC sequences, as matched by the `ansi-regex` npm package.
    static ref ANSI_ESCAPE_REGEX: Regex = Regex::new(concat!(
        r"[\x1B\x{9B}][\[\]()#;?]*",
        r"(?:(?:(?:[a-zA-Z0-9]*(?:;[a-zA-Z0-9]*)*)?\x07)",
        r"|(?:(?:[0-9]{1,4}(?:;[0-9]{0,4})*)?[0-9A-PR-TZcf-ntqry=><~]))",
    ))
    .unwrap();
}

const ESC: char = '\u{1b}';
const CSI: char = '\u{9b}';

/// Removes terminal color and formatting escape sequences. Lone escape
/// characters that do not start a recognized sequence are dropped as well.
pub fn strip_ansi(value: &str) -> Cow<'_, str> {
    if !value.contains([ESC, CSI]) {
        return Cow::Borrowed(value);
    }
    let stripped = ANSI_ESCAPE_REGEX.replace_all(value, "");
    if stripped.contains([ESC, CSI]) {
        Cow::Owned(stripped.replace([ESC, CSI], ""))
    } else {
        Cow::Owned(stripped.into_owned())
    }
}

/// Characters XML 1.0 allows in text and attribute values.
pub fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\u{9}' | '\u{A}' | '\u{D}'
            | '\u{20}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Drops characters that XML 1.0 forbids, such as the ESC left in raw
/// terminal output.
pub fn strip_invalid_xml_chars(value: &str) -> Cow<'_, str> {
    if value.chars().all(is_xml_char) {
        return Cow::Borrowed(value);
    }
    Cow::Owned(value.chars().filter(|c| is_xml_char(*c)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_ansi_colors() {
        pretty_assertions::assert_eq!(
            strip_ansi("\u{1b}[31mexpect(\u{1b}[39m\u{1b}[31mreceived\u{1b}[39m).toBe()"),
            "expect(received).toBe()"
        );
        pretty_assertions::assert_eq!(
            strip_ansi("\u{1b}[1m\u{1b}[2mbold dim\u{1b}[22m"),
            "bold dim"
        );
    }

    #[test]
    fn test_strip_ansi_window_title() {
        pretty_assertions::assert_eq!(strip_ansi("\u{1b}]0;jest\u{7}output"), "output");
    }

    #[test]
    fn test_strip_ansi_lone_escape() {
        let stripped = strip_ansi("broken \u{1b} sequence \u{9b}");
        assert!(!stripped.contains('\u{1b}'));
        assert_eq!(stripped, "broken  sequence ");
    }

    #[test]
    fn test_strip_ansi_plain_text_is_borrowed() {
        assert!(matches!(strip_ansi("plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn test_strip_invalid_xml_chars() {
        pretty_assertions::assert_eq!(
            strip_invalid_xml_chars(
                "\u{1b}[1m● \u{1b}[22mfailed\u{0}\u{8}\u{b}\u{c}\u{1f}\u{fffe}"
            ),
            "[1m● [22mfailed"
        );
        pretty_assertions::assert_eq!(strip_invalid_xml_chars("a\tb\r\nc"), "a\tb\r\nc");
        assert!(matches!(strip_invalid_xml_chars("plain"), Cow::Borrowed("plain")));
    }
}
