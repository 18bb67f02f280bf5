//! Selectors and `@media` / `@container` preludes.

use std::borrow::Cow;

use regex_lite::Captures;

use crate::patterns::{ASPECT_RATIO_RE, DIR_SELECTOR_RE, IDENT_RE};

use super::Context;

/// Media features naming an axis, each paired with its counterpart.
const AXIS_FEATURES: [(&str, &str); 6] = [
    ("width", "height"),
    ("min-width", "min-height"),
    ("max-width", "max-height"),
    ("device-width", "device-height"),
    ("min-device-width", "min-device-height"),
    ("max-device-width", "max-device-height"),
];

/// `:dir(ltr)` ↔ `:dir(rtl)` when the inline direction mirrors.
pub fn rewrite_selector<'a>(selector: &'a str, ctx: &Context) -> Cow<'a, str> {
    if !ctx.desc.dir_flipped {
        return Cow::Borrowed(selector);
    }
    DIR_SELECTOR_RE.replace_all(selector, |caps: &Captures<'_>| {
        format!("{}{}{}", &caps[1], ctx.swap.get(&caps[2]), &caps[3])
    })
}

/// Rewrite an at-rule prelude; only `@media` and `@container` change.
pub fn rewrite_at_rule<'a>(prelude: &'a str, ctx: &Context) -> Cow<'a, str> {
    let name_end = prelude[1..]
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
        .map_or(prelude.len(), |i| i + 1);
    let name = prelude[1..name_end].to_ascii_lowercase();
    if !matches!(name.as_str(), "media" | "container") || !ctx.desc.quarter_turned {
        return Cow::Borrowed(prelude);
    }
    let (head, query) = prelude.split_at(name_end);
    let query = swap_aspect_ratios(query);
    let query = swap_axis_features(&query, ctx);
    Cow::Owned(format!("{head}{query}"))
}

/// `min-aspect-ratio: a/b` becomes `max-aspect-ratio: b/a` and vice versa.
fn swap_aspect_ratios(query: &str) -> Cow<'_, str> {
    ASPECT_RATIO_RE.replace_all(query, |caps: &Captures<'_>| {
        let bound = match caps.get(1).map(|m| m.as_str().to_ascii_lowercase()) {
            Some(b) if b == "min-" => "max-",
            Some(b) if b == "max-" => "min-",
            _ => "",
        };
        format!("{bound}{}{}{}{}", &caps[2], &caps[5], &caps[4], &caps[3])
    })
}

fn swap_axis_features(query: &str, ctx: &Context) -> String {
    let mut out = String::with_capacity(query.len());
    let mut last = 0;
    for m in IDENT_RE.find_iter(query) {
        let word = m.as_str();
        let lower = word.to_ascii_lowercase();
        let swapped = AXIS_FEATURES.iter().find_map(|&(a, b)| {
            if lower == a {
                Some(b)
            } else if lower == b {
                Some(a)
            } else {
                None
            }
        });
        let replacement = match swapped {
            Some(feature) => Cow::Borrowed(feature),
            None if matches!(lower.as_str(), "portrait" | "landscape") => ctx.swap.get(word),
            None => continue,
        };
        out.push_str(&query[last..m.start()]);
        out.push_str(&replacement);
        last = m.end();
    }
    out.push_str(&query[last..]);
    out
}

#[cfg(test)]
mod tests {
    use crate::rewrite::tests::{rtl, run};

    fn turn(css: &str) -> String {
        run("lr-tb", "tb-rl", css)
    }

    #[test]
    fn test_media_width_and_orientation() {
        assert_eq!(
            turn("@media (min-width: 600px) and (orientation: portrait) { }"),
            "@media (min-height: 600px) and (orientation: landscape) { }"
        );
        assert_eq!(
            turn("@container card (400px <= width < 700px) { }"),
            "@container card (400px <= height < 700px) { }"
        );
        assert_eq!(
            rtl("@media (min-width: 600px) { }"),
            "@media (min-width: 600px) { }"
        );
    }

    #[test]
    fn test_media_aspect_ratio() {
        assert_eq!(
            turn("@media (min-aspect-ratio: 16/9) { }"),
            "@media (max-aspect-ratio: 9/16) { }"
        );
        assert_eq!(
            turn("@media (max-device-aspect-ratio: 4 / 3) { }"),
            "@media (min-device-aspect-ratio: 3 / 4) { }"
        );
        assert_eq!(
            turn("@media (aspect-ratio: 2/1) { }"),
            "@media (aspect-ratio: 1/2) { }"
        );
    }

    #[test]
    fn test_other_at_rules_are_untouched() {
        assert_eq!(
            turn("@supports (width: 1px) { }"),
            "@supports (width: 1px) { }"
        );
        assert_eq!(turn("@font-face { }"), "@font-face { }");
    }
}
