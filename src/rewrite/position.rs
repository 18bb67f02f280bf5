//! Positions, background shorthands, sizes and repeats.

use std::borrow::Cow;

use crate::orientation::{Axis, Side};
use crate::value::{Edit, Kind, Part, Role, Value, complement_percentage, is_zero};

use super::Context;
use super::keywords::generic_part;
use super::shorthand::swap_texts;

/// A position keyword: a side, or `None` for `center`.
fn position_keyword(part: &Part<'_>) -> Option<Option<Side>> {
    let ident = part.ident()?;
    if ident.eq_ignore_ascii_case("center") {
        return Some(None);
    }
    Side::from_name(ident).map(Some)
}

/// A length-percentage, or a function that computes one.
fn is_length_like(part: &Part<'_>) -> bool {
    part.is_numeric()
        || part.function().is_some_and(|f| {
            matches!(f.base_name().as_str(), "var" | "min" | "max" | "clamp" | "env")
        })
}

fn is_position_component(part: &Part<'_>) -> bool {
    position_keyword(part).is_some() || is_length_like(part)
}

/// `100% - v` for a length-percentage component.
fn complement<'a>(part: &Part<'a>) -> Cow<'a, str> {
    let text = part.text;
    match part.kind() {
        Some(Kind::Percentage) => complement_percentage(text)
            .map(Cow::Owned)
            .unwrap_or(Cow::Borrowed(text)),
        Some(Kind::Number | Kind::Dimension) if is_zero(text) => Cow::Borrowed("100%"),
        _ => match text.strip_prefix('-') {
            Some(magnitude) => Cow::Owned(format!("calc(100% + {magnitude})")),
            None => Cow::Owned(format!("calc(100% - {text})")),
        },
    }
}

/// Transform one component along its source axis.
fn component<'a>(part: &Part<'a>, axis: Axis, ctx: &Context) -> Cow<'a, str> {
    if position_keyword(part).is_some() {
        ctx.swap.get(part.text)
    } else if ctx.desc.flips(axis) {
        complement(part)
    } else {
        Cow::Borrowed(part.text)
    }
}

fn set_if_changed<'a>(value: &Value<'a>, edit: &mut Edit<'a>, index: usize, new: Cow<'a, str>) {
    if new != value.parts[index].text {
        edit.set(index, new);
    }
}

/// Rewrite a run of one to four position components.
pub fn rewrite_position<'a>(value: &Value<'a>, indices: &[usize], edit: &mut Edit<'a>, ctx: &Context) {
    let parts: Vec<&Part<'a>> = indices.iter().map(|&i| &value.parts[i]).collect();
    if !parts.iter().all(|p| is_position_component(p)) {
        return;
    }
    match indices {
        [i] => {
            let new = component(parts[0], Axis::X, ctx);
            if ctx.desc.quarter_turned && position_keyword(parts[0]).is_none() {
                edit.set(*i, format!("center {new}"));
            } else {
                set_if_changed(value, edit, *i, new);
            }
        }
        [i0, i1] => {
            let keywords = (position_keyword(parts[0]), position_keyword(parts[1]));
            if let (Some(_), Some(_)) = keywords {
                for (&i, part) in indices.iter().zip(&parts) {
                    set_if_changed(value, edit, i, ctx.swap.get(part.text));
                }
                return;
            }
            let y_first = matches!(keywords.0, Some(Some(side)) if !side.is_horizontal())
                || matches!(keywords.1, Some(Some(side)) if side.is_horizontal());
            let (x, y) = if y_first { (1, 0) } else { (0, 1) };
            let new_x = component(parts[x], Axis::X, ctx);
            let new_y = component(parts[y], Axis::Y, ctx);
            if ctx.desc.quarter_turned {
                set_if_changed(value, edit, *i0, new_y);
                set_if_changed(value, edit, *i1, new_x);
            } else {
                set_if_changed(value, edit, indices[x], new_x);
                set_if_changed(value, edit, indices[y], new_y);
            }
        }
        [_, _, _] | [_, _, _, _] => {
            // Edge-offset form: offsets follow their edge keyword.
            for (&i, part) in indices.iter().zip(&parts) {
                if position_keyword(part).is_some() {
                    set_if_changed(value, edit, i, ctx.swap.get(part.text));
                }
            }
        }
        _ => {}
    }
}

/// `background-position`, `object-position`: a comma list of positions.
pub fn position_list<'a>(value: &Value<'a>, edit: &mut Edit<'a>, ctx: &Context) {
    for layer in value.layers() {
        let items = value.item_indices(layer);
        rewrite_position(value, &items, edit, ctx);
    }
}

/// `background-position-x` / `-y`: components along one source axis.
pub fn position_axis<'a>(value: &Value<'a>, axis: Axis, edit: &mut Edit<'a>, ctx: &Context) {
    for layer in value.layers() {
        let items = value.item_indices(layer);
        let edge_form = items
            .iter()
            .any(|&i| matches!(position_keyword(&value.parts[i]), Some(Some(_))));
        for &i in &items {
            let part = &value.parts[i];
            if position_keyword(part).is_some() {
                set_if_changed(value, edit, i, ctx.swap.get(part.text));
            } else if !edge_form && is_length_like(part) {
                set_if_changed(value, edit, i, component(part, axis, ctx));
            }
        }
    }
}

/// `transform-origin`, `perspective-origin`: a position plus optional z.
pub fn origin<'a>(value: &Value<'a>, edit: &mut Edit<'a>, ctx: &Context) {
    let items = value.item_indices(0..value.parts.len());
    let len = items.len().min(2);
    rewrite_position(value, &items[..len], edit, ctx);
}

fn is_size_component(part: &Part<'_>) -> bool {
    is_length_like(part)
        || part
            .ident()
            .is_some_and(|word| ["auto", "cover", "contain"].iter().any(|k| word.eq_ignore_ascii_case(k)))
}

fn is_repeat_component(part: &Part<'_>) -> bool {
    part.ident().is_some_and(|word| {
        ["repeat-x", "repeat-y", "repeat", "no-repeat", "space", "round"]
            .iter()
            .any(|k| word.eq_ignore_ascii_case(k))
    })
}

/// Rewrite the size components of one layer.
fn rewrite_size<'a>(value: &Value<'a>, indices: &[usize], edit: &mut Edit<'a>, ctx: &Context) {
    if !ctx.desc.quarter_turned {
        return;
    }
    match indices {
        [i] => {
            let part = &value.parts[*i];
            if is_length_like(part) {
                edit.set(*i, format!("auto {}", part.text));
            }
        }
        [a, b] => swap_texts(value, edit, *a, *b),
        _ => {}
    }
}

/// Rewrite the repeat keywords of one layer.
fn rewrite_repeat<'a>(value: &Value<'a>, indices: &[usize], edit: &mut Edit<'a>, ctx: &Context) {
    if !ctx.desc.quarter_turned {
        return;
    }
    match indices {
        [i] => {
            let text = value.parts[*i].text;
            let new = if text.eq_ignore_ascii_case("repeat-x") {
                "repeat-y"
            } else if text.eq_ignore_ascii_case("repeat-y") {
                "repeat-x"
            } else {
                return;
            };
            edit.set(*i, new);
        }
        [a, b] => swap_texts(value, edit, *a, *b),
        _ => {}
    }
}

pub fn size_list<'a>(value: &Value<'a>, edit: &mut Edit<'a>, ctx: &Context) {
    for layer in value.layers() {
        let items = value.item_indices(layer);
        rewrite_size(value, &items, edit, ctx);
    }
}

pub fn repeat_list<'a>(value: &Value<'a>, edit: &mut Edit<'a>, ctx: &Context) {
    for layer in value.layers() {
        let items = value.item_indices(layer);
        rewrite_repeat(value, &items, edit, ctx);
    }
}

/// `background`, `mask`: the position, size and repeat runs of each layer,
/// plus gradients and URLs.
pub fn background<'a>(value: &Value<'a>, edit: &mut Edit<'a>, ctx: &Context) {
    for layer in value.layers() {
        let mut position = Vec::new();
        let mut size = Vec::new();
        let mut repeat = Vec::new();
        let mut position_done = false;
        let mut in_size = false;

        for i in layer {
            let part = &value.parts[i];
            match part.role {
                Role::Slash => {
                    if !position.is_empty() && size.is_empty() {
                        position_done = true;
                        in_size = true;
                    }
                }
                Role::Item(_) => {
                    if in_size {
                        if is_size_component(part) {
                            size.push(i);
                            continue;
                        }
                        in_size = false;
                    }
                    if !position_done && is_position_component(part) {
                        position.push(i);
                        continue;
                    }
                    if !position.is_empty() {
                        position_done = true;
                    }
                    if is_repeat_component(part) {
                        repeat.push(i);
                    } else if let Some(new) = generic_part(part, ctx) {
                        edit.set(i, new);
                    }
                }
                Role::Space | Role::Comma => {}
            }
        }

        rewrite_position(value, &position, edit, ctx);
        rewrite_size(value, &size, edit, ctx);
        rewrite_repeat(value, &repeat, edit, ctx);
    }
}
