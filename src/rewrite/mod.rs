//! Stylesheet rewrite pipeline.
//!
//! The tokenized stylesheet is scanned once. Text ending in `{` is a prelude
//! (a selector or an at-rule), text ending in `;`, `}` or the end of input is
//! a declaration. Each declaration is renamed and its value handed to exactly
//! one value rule, chosen by [`PropertyKind`].

mod gradient;
mod keywords;
mod media;
mod position;
mod property;
mod shadow;
mod shorthand;
mod transform;

pub use property::PropertyKind;

use crate::options::Options;
use crate::orientation::TransformDescriptor;
use crate::patterns::{IMPORTANT_RE, PROPERTY_NAME_RE};
use crate::swap::TextSwap;
use crate::tokenize::{skip_string, split_leading_trivia};
use crate::value::{Edit, Value};

/// Everything a rule needs to know about the current transform.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    pub desc: &'a TransformDescriptor,
    pub swap: &'a TextSwap,
    pub options: &'a Options,
}

impl<'a> Context<'a> {
    pub fn new(desc: &'a TransformDescriptor, swap: &'a TextSwap, options: &'a Options) -> Self {
        Self {
            desc,
            swap,
            options,
        }
    }
}

/// Rewrite a tokenized stylesheet.
pub fn rewrite(css: &str, ctx: &Context) -> String {
    let bytes = css.as_bytes();
    let mut out = String::with_capacity(css.len() + css.len() / 8);
    let mut start = 0;
    let mut depth = 0usize;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' => {
                i = skip_string(bytes, i);
                continue;
            }
            b'\\' => i += 1,
            b'(' => depth += 1,
            b')' => depth = depth.saturating_sub(1),
            b'{' if depth == 0 => {
                out.push_str(&rewrite_prelude(&css[start..i], ctx));
                out.push('{');
                start = i + 1;
            }
            b';' | b'}' if depth == 0 => {
                out.push_str(&rewrite_declaration(&css[start..i], ctx));
                out.push(bytes[i] as char);
                start = i + 1;
            }
            _ => {}
        }
        i += 1;
    }
    if start < css.len() {
        out.push_str(&rewrite_declaration(&css[start..], ctx));
    }
    out
}

fn rewrite_prelude(prelude: &str, ctx: &Context) -> String {
    let (trivia, rest) = split_leading_trivia(prelude);
    let rewritten = if rest.starts_with('@') {
        media::rewrite_at_rule(rest, ctx)
    } else {
        media::rewrite_selector(rest, ctx)
    };
    format!("{trivia}{rewritten}")
}

/// Rewrite one `name: value` declaration, keeping its surrounding whitespace.
fn rewrite_declaration(segment: &str, ctx: &Context) -> String {
    let (trivia, rest) = split_leading_trivia(segment);
    if rest.starts_with('@') {
        // `@import url(...)` and friends.
        return format!("{trivia}{}", rewrite_value(PropertyKind::Verbatim, rest, ctx));
    }
    let Some(colon) = find_colon(rest) else {
        return segment.to_string();
    };
    let name_text = &rest[..colon];
    let name = name_text.trim();
    if !PROPERTY_NAME_RE.is_match(name) {
        return segment.to_string();
    }

    let value = &rest[colon + 1..];
    let (value, important) = match IMPORTANT_RE.find(value) {
        Some(m) => (&value[..m.start()], &value[m.start()..]),
        None => (value, ""),
    };

    let kind = PropertyKind::of(name);
    let new_name = property::rename(name, ctx);
    let new_value = rewrite_value(kind, value, ctx);

    let name_start = name_text.len() - name_text.trim_start().len();
    let name_end = name_start + name.len();
    let out = format!(
        "{trivia}{}{new_name}{}:{new_value}{important}",
        &name_text[..name_start],
        &name_text[name_end..],
    );
    if out != segment {
        log::trace!("{} -> {}", segment.trim(), out.trim());
    }
    out
}

fn find_colon(text: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'"' | b'\'' => {
                i = skip_string(bytes, i);
                continue;
            }
            b':' => return Some(i),
            b'(' => return None,
            _ => {}
        }
        i += 1;
    }
    None
}

/// Rewrite a declaration value with the rule for `kind`.
pub fn rewrite_value(kind: PropertyKind, text: &str, ctx: &Context) -> String {
    let value = Value::parse(text);
    let mut edit = value.edit();
    apply(kind, &value, &mut edit, ctx);
    edit.finish()
}

fn apply<'a>(kind: PropertyKind, value: &Value<'a>, edit: &mut Edit<'a>, ctx: &Context) {
    let all = 0..value.parts.len();
    match kind {
        PropertyKind::Direction | PropertyKind::Resize => keywords::swap_keywords(value, all, edit, ctx),
        PropertyKind::WritingMode => keywords::writing_mode(value, edit, ctx),
        PropertyKind::InlineOnly => keywords::inline_only(value, edit, ctx),
        PropertyKind::Verbatim => keywords::urls_only(value, edit, ctx),
        PropertyKind::Cursor => keywords::cursor(value, edit, ctx),
        PropertyKind::PropertyList => keywords::property_list(value, edit, ctx),
        PropertyKind::Generic => keywords::generic(value, all, edit, ctx),
        PropertyKind::FourValue => shorthand::four_value(value, edit, ctx),
        PropertyKind::BorderImage => shorthand::border_image(value, edit, ctx),
        PropertyKind::PairSwap => shorthand::pair_swap(value, all, edit, ctx),
        PropertyKind::BorderRadius => shorthand::border_radius(value, edit, ctx),
        PropertyKind::CornerRadius => shorthand::pair_swap(value, all, edit, ctx),
        PropertyKind::Shadow => shadow::shadow(value, edit, ctx),
        PropertyKind::Position => position::position_list(value, edit, ctx),
        PropertyKind::PositionAxis(axis) => position::position_axis(value, axis, edit, ctx),
        PropertyKind::Background => position::background(value, edit, ctx),
        PropertyKind::Size => position::size_list(value, edit, ctx),
        PropertyKind::Repeat => position::repeat_list(value, edit, ctx),
        PropertyKind::Origin => position::origin(value, edit, ctx),
        PropertyKind::Transform => transform::transform_list(value, edit, ctx),
        PropertyKind::Translate => transform::translate_property(value, edit, ctx),
        PropertyKind::Rotate => transform::rotate_property(value, edit, ctx),
        PropertyKind::Scale => transform::scale_property(value, edit, ctx),
    }
}
