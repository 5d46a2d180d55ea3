//! Removal of control characters that are illegal in WordprocessingML.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;

/// C0 controls except TAB, LF and CR, plus DEL.
const XML_UNSAFE_CONTROLS: &str = r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F]";

fn control_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(XML_UNSAFE_CONTROLS).expect("control character class is valid"))
}

/// Strip characters that would corrupt the document XML.
///
/// Everything else, including Arabic script, digits, tabs and line breaks,
/// is left untouched. The function is idempotent.
pub fn sanitize(text: &str) -> String {
    sanitize_cow(text).into_owned()
}

/// Borrowing variant of [`sanitize`]; only allocates when something was removed.
pub fn sanitize_cow(text: &str) -> Cow<'_, str> {
    control_regex().replace_all(text, "")
}

/// Whether `c` is one of the characters [`sanitize`] removes.
pub fn is_xml_unsafe(c: char) -> bool {
    matches!(c, '\u{00}'..='\u{08}' | '\u{0B}' | '\u{0C}' | '\u{0E}'..='\u{1F}' | '\u{7F}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_every_listed_control() {
        let controls: String = (0u8..=0x1F)
            .chain(std::iter::once(0x7F))
            .map(char::from)
            .collect();
        let cleaned = sanitize(&controls);
        assert_eq!(cleaned, "\t\n\r");
    }

    #[test]
    fn test_keeps_arabic_and_digits() {
        let text = "كتاب ١٢٣ 456 Hello";
        assert_eq!(sanitize(text), text);
        assert!(matches!(sanitize_cow(text), Cow::Borrowed(_)));
    }

    #[test]
    fn test_strips_embedded_controls() {
        assert_eq!(sanitize("ab\u{0}c\u{7}d\u{1B}e\u{7F}"), "abcde");
        assert_eq!(sanitize("line\u{0C}one\r\nline two"), "lineone\r\nline two");
    }

    #[test]
    fn test_idempotent() {
        let text = "\u{2}مرحبا\u{0B} world\u{1F}\n";
        let once = sanitize(text);
        assert_eq!(sanitize(&once), once);
    }

    #[test]
    fn test_predicate_matches_regex() {
        for code in 0u32..=0x80 {
            let c = char::from_u32(code).unwrap();
            let removed = sanitize(&c.to_string()).is_empty();
            assert_eq!(is_xml_unsafe(c), removed, "mismatch at {:#x}", code);
        }
    }
}
