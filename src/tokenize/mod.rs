//! Protective tokenizers.
//!
//! Spans that must survive the rewrite untouched (comments, `@noflip`
//! regions, `calc()` expressions) are swapped for placeholders of the form
//! `` `LABEL_n` `` before rewriting and restored afterwards. Backticks never
//! occur in the text being rewritten because [`escape_backticks`] runs first.

pub mod calc;

use std::borrow::Cow;
use std::ops::Range;

use memchr::memmem;

use crate::patterns::NOFLIP_MARKER_RE;

pub use calc::CalcTokenizer;

/// Placeholder labels, in tokenize order.
pub const NOFLIP_SINGLE: &str = "NOFLIP_SINGLE_";
pub const NOFLIP_CLASS: &str = "NOFLIP_CLASS_";
pub const COMMENT: &str = "COMMENT_";
pub const CALC: &str = "CALC_";

/// Percent-escape literal backticks so they cannot collide with placeholders.
pub fn escape_backticks(css: &str) -> Cow<'_, str> {
    if memchr::memchr(b'`', css.as_bytes()).is_some() {
        Cow::Owned(css.replace('`', "%60"))
    } else {
        Cow::Borrowed(css)
    }
}

/// Replaces matched spans with indexed placeholders and puts them back.
#[derive(Debug)]
pub struct Tokenizer {
    label: &'static str,
    spans: Vec<String>,
}

impl Tokenizer {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            spans: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    pub(crate) fn push(&mut self, span: &str) -> String {
        let placeholder = format!("`{}{}`", self.label, self.spans.len());
        self.spans.push(span.to_string());
        placeholder
    }

    pub(crate) fn span(&self, index: usize) -> Option<&str> {
        self.spans.get(index).map(String::as_str)
    }

    /// Replace every match produced by `find` with a placeholder.
    ///
    /// `find(text, from)` returns the next match starting at or after
    /// `from`. Matches must not overlap and must be non-empty.
    pub fn tokenize<F>(&mut self, text: &str, mut find: F) -> String
    where
        F: FnMut(&str, usize) -> Option<Range<usize>>,
    {
        let mut out = String::with_capacity(text.len());
        let mut pos = 0;
        while let Some(range) = find(text, pos) {
            if range.start < pos || range.end <= range.start {
                break;
            }
            out.push_str(&text[pos..range.start]);
            let placeholder = self.push(&text[range.clone()]);
            out.push_str(&placeholder);
            pos = range.end;
        }
        out.push_str(&text[pos..]);
        out
    }

    /// Restore every placeholder carrying this tokenizer's label.
    pub fn detokenize(&self, text: &str) -> String {
        self.restore(text, |span, out| out.push_str(span))
    }

    /// Walk placeholders, letting `emit` write each restored span.
    ///
    /// `emit` also sees the output written so far, so it can inspect (and
    /// remove) what precedes the placeholder.
    pub(crate) fn restore<F>(&self, text: &str, mut emit: F) -> String
    where
        F: FnMut(&str, &mut String),
    {
        if self.spans.is_empty() {
            return text.to_string();
        }
        let prefix = format!("`{}", self.label);
        let mut out = String::with_capacity(text.len());
        let mut pos = 0;
        for start in memmem::find_iter(text.as_bytes(), prefix.as_bytes()) {
            if start < pos {
                continue;
            }
            let digits_start = start + prefix.len();
            let digits_len = text[digits_start..]
                .bytes()
                .take_while(u8::is_ascii_digit)
                .count();
            let close = digits_start + digits_len;
            if digits_len == 0 || text.as_bytes().get(close) != Some(&b'`') {
                continue;
            }
            let Some(span) = text[digits_start..close]
                .parse::<usize>()
                .ok()
                .and_then(|index| self.span(index))
            else {
                continue;
            };
            out.push_str(&text[pos..start]);
            emit(span, &mut out);
            pos = close + 1;
        }
        out.push_str(&text[pos..]);
        out
    }
}

/// Find the next CSS comment. An unterminated comment runs to the end.
pub fn find_comment(text: &str, from: usize) -> Option<Range<usize>> {
    let bytes = text.as_bytes();
    let start = from + memmem::find(&bytes[from..], b"/*")?;
    let end = memmem::find(&bytes[start + 2..], b"*/")
        .map(|offset| start + 2 + offset + 2)
        .unwrap_or(bytes.len());
    Some(start..end)
}

/// What follows a `@noflip` marker.
enum Guarded {
    /// A single declaration ending at the given byte.
    Declaration(usize),
    /// A selector whose block opens at the given byte.
    Rule(usize),
    Nothing,
}

fn classify_guarded(text: &str, from: usize) -> Guarded {
    let bytes = text.as_bytes();
    let mut i = from;
    let mut content = false;
    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' => {
                i = skip_string(bytes, i);
                content = true;
                continue;
            }
            b'\\' => {
                i += 1;
                content = true;
            }
            b'{' => return Guarded::Rule(i),
            b';' if content => return Guarded::Declaration(i + 1),
            b'}' if content => return Guarded::Declaration(i),
            b';' | b'}' => return Guarded::Nothing,
            b if !b.is_ascii_whitespace() => content = true,
            _ => {}
        }
        i += 1;
    }
    if content {
        Guarded::Declaration(bytes.len())
    } else {
        Guarded::Nothing
    }
}

/// Find a `@noflip` marker followed by a single declaration.
pub fn find_noflip_declaration(text: &str, from: usize) -> Option<Range<usize>> {
    let mut search = from;
    loop {
        let marker = NOFLIP_MARKER_RE.find_at(text, search)?;
        if let Guarded::Declaration(end) = classify_guarded(text, marker.end()) {
            return Some(marker.start()..end);
        }
        search = marker.end();
    }
}

/// Find a `@noflip` marker followed by a selector and its whole block.
pub fn find_noflip_rule(text: &str, from: usize) -> Option<Range<usize>> {
    let mut search = from;
    loop {
        let marker = NOFLIP_MARKER_RE.find_at(text, search)?;
        if let Guarded::Rule(open) = classify_guarded(text, marker.end())
            && let Some(close) = matching_brace(text.as_bytes(), open)
        {
            return Some(marker.start()..close + 1);
        }
        search = marker.end();
    }
}

/// Index of the `}` closing the block opened at `open`.
fn matching_brace(bytes: &[u8], open: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' => {
                i = skip_string(bytes, i);
                continue;
            }
            b'\\' => i += 1,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
        i += 1;
    }
    None
}

/// Index just past the string literal starting at `start`.
///
/// An unterminated string ends at the next newline, as in CSS.
pub(crate) fn skip_string(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut i = start + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' => return i,
            b if b == quote => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Whether a whole string is a protected placeholder other than `calc()`.
pub(crate) fn is_protected_placeholder(text: &str) -> bool {
    let Some(inner) = text.strip_prefix('`').and_then(|t| t.strip_suffix('`')) else {
        return false;
    };
    [NOFLIP_SINGLE, NOFLIP_CLASS, COMMENT].iter().any(|label| {
        inner
            .strip_prefix(label)
            .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
    })
}

/// Whether a string is a `calc()` placeholder, optionally sign-flipped.
pub(crate) fn is_calc_placeholder(text: &str) -> bool {
    let text = text.strip_prefix('-').unwrap_or(text);
    text.strip_prefix('`')
        .and_then(|t| t.strip_suffix('`'))
        .and_then(|t| t.strip_prefix(CALC))
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

/// Split leading whitespace and protected placeholders off a segment.
pub(crate) fn split_leading_trivia(segment: &str) -> (&str, &str) {
    let bytes = segment.as_bytes();
    let mut i = 0;
    loop {
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if bytes.get(i) != Some(&b'`') {
            break;
        }
        let Some(len) = memchr::memchr(b'`', &bytes[i + 1..]) else {
            break;
        };
        let end = i + 1 + len + 1;
        if !is_protected_placeholder(&segment[i..end]) {
            break;
        }
        i = end;
    }
    segment.split_at(i)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comments(text: &str) -> (Tokenizer, String) {
        let mut t = Tokenizer::new(COMMENT);
        let out = t.tokenize(text, find_comment);
        (t, out)
    }

    #[test]
    fn test_comment_roundtrip() {
        let css = "a { /* one */ float: left; /* two /* still two */ }";
        let (t, tokenized) = comments(css);
        assert_eq!(t.len(), 2);
        assert_eq!(tokenized, "a { `COMMENT_0` float: left; `COMMENT_1` }");
        assert_eq!(t.detokenize(&tokenized), css);
    }

    #[test]
    fn test_unterminated_comment_runs_to_end() {
        let (t, tokenized) = comments("a { float: left } /* open");
        assert_eq!(tokenized, "a { float: left } `COMMENT_0`");
        assert_eq!(t.span(0), Some("/* open"));
    }

    #[test]
    fn test_noflip_declaration() {
        let css = ".a { /* @noflip */ float: left; color: red }";
        let mut t = Tokenizer::new(NOFLIP_SINGLE);
        let out = t.tokenize(css, find_noflip_declaration);
        assert_eq!(out, ".a { `NOFLIP_SINGLE_0` color: red }");
        assert_eq!(t.span(0), Some("/* @noflip */ float: left;"));
        assert_eq!(t.detokenize(&out), css);
    }

    #[test]
    fn test_noflip_declaration_before_closing_brace() {
        let css = ".a { /*! @NoFlip */ float: left }";
        let mut t = Tokenizer::new(NOFLIP_SINGLE);
        let out = t.tokenize(css, find_noflip_declaration);
        assert_eq!(out, ".a { `NOFLIP_SINGLE_0`}");
    }

    #[test]
    fn test_noflip_marker_before_rule_is_not_a_declaration() {
        let css = "/* @noflip */ .a { float: left; }";
        let mut single = Tokenizer::new(NOFLIP_SINGLE);
        let out = single.tokenize(css, find_noflip_declaration);
        assert_eq!(out, css);

        let mut class = Tokenizer::new(NOFLIP_CLASS);
        let out = class.tokenize(css, find_noflip_rule);
        assert_eq!(out, "`NOFLIP_CLASS_0`");
        assert_eq!(class.detokenize(&out), css);
    }

    #[test]
    fn test_noflip_rule_with_nested_block() {
        let css = "/* @noflip */ @media print { .a { float: left } } .b { float: left }";
        let mut class = Tokenizer::new(NOFLIP_CLASS);
        let out = class.tokenize(css, find_noflip_rule);
        assert_eq!(out, "`NOFLIP_CLASS_0` .b { float: left }");
    }

    #[test]
    fn test_escape_backticks() {
        assert_eq!(escape_backticks("a`b"), "a%60b");
        assert!(matches!(escape_backticks("plain"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_unknown_placeholder_index_is_left_alone() {
        let (t, _) = comments("/* x */");
        assert_eq!(t.detokenize("`COMMENT_7` `COMMENT_0`"), "`COMMENT_7` /* x */");
    }

    #[test]
    fn test_placeholder_classification() {
        assert!(is_protected_placeholder("`COMMENT_12`"));
        assert!(!is_protected_placeholder("`COMMENT_`"));
        assert!(!is_protected_placeholder("`CALC_0`"));
        assert!(is_calc_placeholder("`CALC_0`"));
        assert!(is_calc_placeholder("-`CALC_3`"));
        assert_eq!(
            split_leading_trivia("\n  `COMMENT_0` float: left"),
            ("\n  `COMMENT_0` ", "float: left")
        );
    }
}
