//! Leading-label derivation for remote directory names.
//!
//! A source directory is usually named after the show, often in Han script
//! with release junk appended ("一起去看流星雨 4K修复" and the like). The
//! label is the leading run of characters that can belong to a title: Han
//! characters, ASCII letters, digits, `_` and `-`. The display form keeps
//! the run verbatim; the safe form keeps only its ASCII subset and is used
//! as the default machine-safe filename prefix.

use std::sync::OnceLock;

use regex::Regex;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Label {
    /// Leading title run, verbatim. Shown to the operator.
    pub display: String,
    /// ASCII-only subset of the run, usable inside generated filenames.
    pub safe: String,
}

fn leading_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[\p{Han}A-Za-z0-9_-]+").expect("leading label pattern"))
}

/// Derive the display/safe label pair from a directory name. Both fields are
/// empty when the name starts with a character outside the title alphabet.
pub fn leading_label(text: &str) -> Label {
    let Some(m) = leading_pattern().find(text) else {
        return Label::default();
    };
    let display = m.as_str().to_string();
    let safe = display.chars().filter(char::is_ascii).collect();
    Label { display, safe }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_name_passes_through() {
        let label = leading_label("Breaking-Bad_S01 1080p");
        assert_eq!(label.display, "Breaking-Bad_S01");
        assert_eq!(label.safe, "Breaking-Bad_S01");
    }

    #[test]
    fn han_only_name_has_empty_safe_prefix() {
        let label = leading_label("一起去看流星雨（2009）");
        assert_eq!(label.display, "一起去看流星雨");
        assert_eq!(label.safe, "");
    }

    #[test]
    fn mixed_name_keeps_ascii_subset() {
        let label = leading_label("流星雨2009 remaster");
        assert_eq!(label.display, "流星雨2009");
        assert_eq!(label.safe, "2009");
    }

    #[test]
    fn disallowed_first_char_yields_empty_label() {
        assert_eq!(leading_label("（2009）流星雨"), Label::default());
        assert_eq!(leading_label(""), Label::default());
    }
}
