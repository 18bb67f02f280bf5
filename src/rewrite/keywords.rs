//! Keyword rules: sides, directions, cursors, property lists and URLs.

use std::ops::Range;

use crate::patterns::COMPASS_CURSOR_RE;
use crate::value::{Edit, Function, Kind, Part, Value};

use super::{Context, PropertyKind, gradient, property, rewrite_value};

/// Swap side keywords and rewrite nested functions and URLs.
pub fn generic<'a>(value: &Value<'a>, range: Range<usize>, edit: &mut Edit<'a>, ctx: &Context) {
    for i in range {
        if let Some(new) = generic_part(&value.parts[i], ctx) {
            edit.set(i, new);
        }
    }
}

/// Generic rewrite of a single component, `None` when it is unchanged.
pub fn generic_part(part: &Part<'_>, ctx: &Context) -> Option<String> {
    match part.kind()? {
        Kind::Ident => ctx.swap.side(part.text).map(|side| side.into_owned()),
        Kind::Url => url(part.text, ctx),
        Kind::Function => function(part.text, ctx),
        _ => None,
    }
}

/// Rewrite a function component by name.
pub fn function(text: &str, ctx: &Context) -> Option<String> {
    let f = Function::parse(text)?;
    let name = f.base_name();
    let new = match name.as_str() {
        "linear-gradient" | "repeating-linear-gradient" => gradient::linear(&f, ctx),
        "radial-gradient" | "repeating-radial-gradient" => gradient::radial(&f, ctx),
        "conic-gradient" | "repeating-conic-gradient" => gradient::conic(&f, ctx),
        "drop-shadow" => f.rebuild(&rewrite_value(PropertyKind::Shadow, f.args, ctx)),
        "env" => f.rebuild(&safe_area_inset(f.args, ctx)),
        _ => f.rebuild(&rewrite_value(PropertyKind::Generic, f.args, ctx)),
    };
    (new != text).then_some(new)
}

/// `env(safe-area-inset-left)` names a physical side.
fn safe_area_inset(args: &str, ctx: &Context) -> String {
    let value = Value::parse(args);
    let mut edit = value.edit();
    if let Some((i, part)) = value.items().next()
        && let Some(ident) = part.ident()
        && let Some(side) = ident.strip_prefix("safe-area-inset-")
        && let Some(new) = ctx.swap.side(side)
    {
        edit.set(i, format!("safe-area-inset-{new}"));
    }
    for (i, part) in value.items().skip(1) {
        if let Some(new) = generic_part(part, ctx) {
            edit.set(i, new);
        }
    }
    edit.finish()
}

/// Swap every identifier the table knows.
pub fn swap_keywords<'a>(
    value: &Value<'a>,
    range: Range<usize>,
    edit: &mut Edit<'a>,
    ctx: &Context,
) {
    for i in range {
        if let Some(ident) = value.parts[i].ident()
            && ctx.swap.lookup(ident).is_some()
        {
            edit.set(i, ctx.swap.get(ident).into_owned());
        }
    }
}

/// `writing-mode`: map each `-`-separated flow or axis word.
pub fn writing_mode<'a>(value: &Value<'a>, edit: &mut Edit<'a>, ctx: &Context) {
    for (i, part) in value.items() {
        let Some(ident) = part.ident() else {
            continue;
        };
        let mapped: Vec<String> = ident
            .split('-')
            .map(|word| {
                let known = crate::orientation::Side::from_flow(word).is_some()
                    || word.eq_ignore_ascii_case("horizontal")
                    || word.eq_ignore_ascii_case("vertical");
                if known {
                    ctx.swap.get(word).into_owned()
                } else {
                    word.to_string()
                }
            })
            .collect();
        let new = mapped.join("-");
        if new != ident {
            edit.set(i, new);
        }
    }
}

/// `float`, `clear`, `text-align`: only a mirrored inline direction swaps
/// left and right.
pub fn inline_only<'a>(value: &Value<'a>, edit: &mut Edit<'a>, ctx: &Context) {
    if !ctx.desc.dir_flipped {
        return;
    }
    for (i, part) in value.items() {
        let new = match part.ident() {
            Some(word) if word.eq_ignore_ascii_case("left") => "right",
            Some(word) if word.eq_ignore_ascii_case("right") => "left",
            _ => continue,
        };
        let shouted = part.text.bytes().all(|b| b.is_ascii_uppercase());
        edit.set(i, if shouted { new.to_ascii_uppercase() } else { new.to_string() });
    }
}

/// Leave keywords alone but still honour the URL options.
pub fn urls_only<'a>(value: &Value<'a>, edit: &mut Edit<'a>, ctx: &Context) {
    for (i, part) in value.items() {
        if part.kind() == Some(Kind::Url)
            && let Some(new) = url(part.text, ctx)
        {
            edit.set(i, new);
        }
    }
}

pub fn cursor<'a>(value: &Value<'a>, edit: &mut Edit<'a>, ctx: &Context) {
    for (i, part) in value.items() {
        let new = match part.kind() {
            Some(Kind::Url) => url(part.text, ctx),
            Some(Kind::Ident) => cursor_keyword(part.text, ctx),
            _ => None,
        };
        if let Some(new) = new {
            edit.set(i, new);
        }
    }
}

/// Map a cursor keyword; unknown compass strings stay as they are.
fn cursor_keyword(word: &str, ctx: &Context) -> Option<String> {
    if let Some(new) = ctx.swap.lookup(word) {
        return Some(new.to_string());
    }
    let caps = COMPASS_CURSOR_RE.captures(word)?;
    let compass = caps.get(1)?.as_str();
    let new = ctx.swap.lookup(compass)?;
    Some(format!("{new}-resize"))
}

/// `transition`, `will-change`: rename the listed properties.
pub fn property_list<'a>(value: &Value<'a>, edit: &mut Edit<'a>, ctx: &Context) {
    for (i, part) in value.items() {
        if let Some(ident) = part.ident()
            && let std::borrow::Cow::Owned(new) = property::rename(ident, ctx)
        {
            edit.set(i, new);
        }
    }
}

/// Rewrite direction and side words inside a `url(...)` component.
///
/// Only whole words bounded by non-letters are swapped, so `left.png`
/// changes while `leftover.png` does not.
pub fn url(text: &str, ctx: &Context) -> Option<String> {
    let options = ctx.options;
    if !options.transform_dir_in_url && !options.transform_edge_in_url {
        return None;
    }
    let eligible = |word: &str| {
        let lower = word.to_ascii_lowercase();
        let dir_word = matches!(lower.as_str(), "ltr" | "rtl")
            || (ctx.desc.quarter_turned && matches!(lower.as_str(), "horizontal" | "vertical"));
        let edge_word = matches!(lower.as_str(), "top" | "right" | "bottom" | "left");
        (options.transform_dir_in_url && dir_word) || (options.transform_edge_in_url && edge_word)
    };

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find(|c: char| c.is_ascii_alphabetic()) {
        out.push_str(&rest[..start]);
        let word_len = rest[start..]
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(rest.len() - start);
        let word = &rest[start..start + word_len];
        if eligible(word) {
            out.push_str(&ctx.swap.get(word));
        } else {
            out.push_str(word);
        }
        rest = &rest[start + word_len..];
    }
    out.push_str(rest);
    (out != text).then_some(out)
}
