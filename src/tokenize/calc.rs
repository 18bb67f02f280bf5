//! Balanced `calc()` tokenizer.
//!
//! A `calc()` expression can nest parentheses to any depth, so each
//! occurrence is found with a counting scan rather than a pattern. The scan
//! is bounded in both length and depth; an occurrence that runs past either
//! bound, or is never closed, is left in place untokenized.

use memchr::memmem;

use super::{CALC, Tokenizer, skip_string};

/// Longest `calc()` expression the scanner will follow, in bytes.
pub const MAX_CALC_LEN: usize = 16 * 1024;

/// Deepest parenthesis nesting the scanner will follow.
pub const MAX_CALC_DEPTH: usize = 64;

const PREFIXES: [&str; 2] = ["-webkit-", "-moz-"];

#[derive(Debug)]
pub struct CalcTokenizer {
    inner: Tokenizer,
}

impl Default for CalcTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl CalcTokenizer {
    pub fn new() -> Self {
        Self {
            inner: Tokenizer::new(CALC),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn tokenize(&mut self, text: &str) -> String {
        let lowered = text.to_ascii_lowercase();
        self.inner
            .tokenize(text, |text, from| find_calc(text, &lowered, from))
    }

    /// Restore expressions, applying any sign flip written in front of them.
    pub fn detokenize(&self, text: &str) -> String {
        self.inner.restore(text, |span, out| {
            if out.ends_with('-') {
                out.pop();
                out.push_str(&negate_quantities(span));
            } else {
                out.push_str(span);
            }
        })
    }
}

/// Find the next complete `calc(...)` span at or after `from`.
///
/// `lowered` is an ASCII-lowercased copy of `text`; byte offsets agree.
fn find_calc(text: &str, lowered: &str, from: usize) -> Option<std::ops::Range<usize>> {
    let bytes = text.as_bytes();
    let mut search = from;
    loop {
        let hit = search + memmem::find(&lowered.as_bytes()[search..], b"calc(")?;
        search = hit + 5;

        let start = PREFIXES
            .iter()
            .find(|prefix| lowered[..hit].ends_with(*prefix))
            .map_or(hit, |prefix| hit - prefix.len());
        if start > 0 && is_name_byte(bytes[start - 1]) {
            continue;
        }

        match balanced_end(bytes, hit + 4) {
            Some(end) => return Some(start..end),
            None => {
                log::debug!("leaving unterminated calc() at byte {start}");
            }
        }
    }
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_'
}

/// Index just past the `)` balancing the `(` at `open`.
fn balanced_end(bytes: &[u8], open: usize) -> Option<usize> {
    let limit = bytes.len().min(open + MAX_CALC_LEN);
    let mut depth = 0usize;
    let mut i = open;
    while i < limit {
        match bytes[i] {
            b'"' | b'\'' => {
                i = skip_string(bytes, i);
                continue;
            }
            b'\\' => i += 1,
            b'(' => {
                depth += 1;
                if depth > MAX_CALC_DEPTH {
                    return None;
                }
            }
            b')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            b';' | b'{' | b'}' => return None,
            _ => {}
        }
        i += 1;
    }
    None
}

/// Negate every dimension and percentage in an expression.
///
/// Unitless numbers are factors or divisors and keep their sign, so the
/// expression as a whole changes sign.
pub fn negate_quantities(expr: &str) -> String {
    let bytes = expr.as_bytes();
    let mut out = String::with_capacity(expr.len() + 8);
    let mut copied = 0;
    let mut i = 0;
    while i < bytes.len() {
        let b = bytes[i];
        let starts_number = b.is_ascii_digit()
            || (b == b'.' && bytes.get(i + 1).is_some_and(u8::is_ascii_digit));
        if !starts_number || (i > 0 && is_number_context(bytes[i - 1])) {
            i += 1;
            continue;
        }

        let number_end = scan_number(bytes, i);
        let unit_end = scan_unit(bytes, number_end);
        if unit_end == number_end {
            i = number_end;
            continue;
        }

        let sign = (i > 0)
            .then(|| bytes[i - 1])
            .filter(|&s| (s == b'-' || s == b'+') && is_unary_sign(bytes, i - 1));
        match sign {
            Some(b'-') => {
                out.push_str(&expr[copied..i - 1]);
            }
            Some(_) => {
                out.push_str(&expr[copied..i - 1]);
                out.push('-');
            }
            None => {
                out.push_str(&expr[copied..i]);
                out.push('-');
            }
        }
        out.push_str(&expr[i..unit_end]);
        copied = unit_end;
        i = unit_end;
    }
    out.push_str(&expr[copied..]);
    out
}

/// A byte that makes a following digit part of a larger token.
fn is_number_context(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'.' || b == b'`'
}

/// Whether the sign at `at` applies to the number after it.
fn is_unary_sign(bytes: &[u8], at: usize) -> bool {
    at == 0 || matches!(bytes[at - 1], b'(' | b' ' | b'\t' | b'\n' | b'\r' | b',' | b'*' | b'/')
}

fn scan_number(bytes: &[u8], start: usize) -> usize {
    let mut i = start;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i + 1 < bytes.len() && bytes[i] == b'.' && bytes[i + 1].is_ascii_digit() {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        if j < bytes.len() && bytes[j].is_ascii_digit() {
            while j < bytes.len() && bytes[j].is_ascii_digit() {
                j += 1;
            }
            return j;
        }
    }
    i
}

fn scan_unit(bytes: &[u8], start: usize) -> usize {
    if bytes.get(start) == Some(&b'%') {
        return start + 1;
    }
    let mut i = start;
    while i < bytes.len() && bytes[i].is_ascii_alphabetic() {
        i += 1;
    }
    i
}
