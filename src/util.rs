//! Stylesheet decoding.

use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_8};

/// Decode stylesheet bytes to a string.
///
/// The encoding is chosen the way browsers pick it for a standalone
/// stylesheet:
/// 1. A byte order mark wins
/// 2. Otherwise a leading `@charset "...";` rule names the encoding
/// 3. Otherwise UTF-8, with malformed sequences replaced by U+FFFD
///
/// Returns `Cow::Borrowed` when the input is already valid UTF-8.
///
/// # Examples
///
/// ```
/// use cssflip::decode_stylesheet;
///
/// assert_eq!(decode_stylesheet(b"a { float: left }"), "a { float: left }");
/// assert_eq!(
///     decode_stylesheet(b"@charset \"iso-8859-1\"; a::after { content: \"\xe9\" }"),
///     "@charset \"iso-8859-1\"; a::after { content: \"\u{e9}\" }"
/// );
/// ```
pub fn decode_stylesheet(bytes: &[u8]) -> Cow<'_, str> {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        let (result, _, malformed) = encoding.decode(bytes);
        if malformed {
            log::warn!("malformed {} input after byte order mark", encoding.name());
        }
        return result;
    }

    if let Some(label) = charset_label(bytes)
        && let Some(encoding) = Encoding::for_label(label)
    {
        // UTF-16 labels in an ASCII-compatible @charset rule mean UTF-8.
        let encoding = encoding.output_encoding();
        log::debug!("decoding stylesheet as {}", encoding.name());
        let (result, _) = encoding.decode_without_bom_handling(bytes);
        return result;
    }

    let (result, malformed) = UTF_8.decode_without_bom_handling(bytes);
    if malformed {
        log::warn!("stylesheet is not valid UTF-8, replacing malformed sequences");
    }
    result
}

/// The label of a leading `@charset "label";` rule.
///
/// Only the exact byte form browsers recognize is accepted: lowercase
/// `@charset`, one space, a double-quoted label, then `;`.
fn charset_label(bytes: &[u8]) -> Option<&[u8]> {
    const PREFIX: &[u8] = b"@charset \"";
    let rest = bytes.strip_prefix(PREFIX)?;
    let end = memchr::memchr(b'"', rest)?;
    if rest.get(end + 1) != Some(&b';') {
        return None;
    }
    Some(&rest[..end])
}
