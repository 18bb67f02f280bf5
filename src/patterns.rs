//! Cached regex patterns.
//!
//! Uses LazyLock to compile patterns once on first use; the compiled set is
//! shared read-only by every transform call.

use regex_lite::Regex;
use std::sync::LazyLock;

/// Matches `/* @noflip */` and `/*! @noflip */` markers.
pub static NOFLIP_MARKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)/\*!?\s*@noflip\s*\*/").unwrap());

/// Matches a trailing `!important` flag, including surrounding whitespace.
pub static IMPORTANT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s*!\s*important\s*$").unwrap());

/// Matches a `:dir(ltr)` / `:dir(rtl)` pseudo-class argument.
pub static DIR_SELECTOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(:dir\(\s*)(ltr|rtl)(\s*\))").unwrap());

/// Matches `[min-|max-][device-]aspect-ratio: a/b` media features.
pub static ASPECT_RATIO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(min-|max-)?((?:device-)?aspect-ratio\s*:\s*)(\d+(?:\.\d+)?)(\s*/\s*)(\d+(?:\.\d+)?)")
        .unwrap()
});

/// Matches a CSS identifier.
pub static IDENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-?-?[A-Za-z_][A-Za-z0-9_-]*").unwrap());

/// Matches a property name, including custom properties.
pub static PROPERTY_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:--[A-Za-z0-9_-]*|-?[A-Za-z_][A-Za-z0-9_-]*)$").unwrap());

/// Matches a compass cursor keyword such as `nw-resize`.
pub static COMPASS_CURSOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^([nesw]{1,4})-resize$").unwrap());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noflip_marker() {
        assert!(NOFLIP_MARKER_RE.is_match("/* @noflip */"));
        assert!(NOFLIP_MARKER_RE.is_match("/*!@NOFLIP*/"));
        assert!(!NOFLIP_MARKER_RE.is_match("/* noflip */"));
    }

    #[test]
    fn test_important() {
        let m = IMPORTANT_RE.find("left !important ").unwrap();
        assert_eq!(m.as_str(), " !important ");
        assert!(!IMPORTANT_RE.is_match("left"));
    }

    #[test]
    fn test_aspect_ratio() {
        let caps = ASPECT_RATIO_RE.captures("(min-aspect-ratio: 16/9)").unwrap();
        assert_eq!(caps.get(1).map(|m| m.as_str()), Some("min-"));
        assert_eq!(&caps[3], "16");
        assert_eq!(&caps[5], "9");
    }

    #[test]
    fn test_property_name() {
        assert!(PROPERTY_NAME_RE.is_match("margin-left"));
        assert!(PROPERTY_NAME_RE.is_match("-webkit-transform"));
        assert!(PROPERTY_NAME_RE.is_match("--gutter"));
        assert!(!PROPERTY_NAME_RE.is_match("a b"));
        assert!(!PROPERTY_NAME_RE.is_match("`COMMENT_0` float"));
    }
}
