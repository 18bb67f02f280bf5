//! Four-value shorthands, `border-image` and `border-radius`.

use std::ops::Range;

use crate::value::{Edit, Kind, Role, Value};

use super::Context;
use super::keywords::generic_part;

/// Fill the missing slots of a 1-4 value shorthand.
///
/// Slot `k` falls back to the opposite slot `k ^ 2`, then to the first
/// value, which is how CSS expands `margin: a b c`.
pub fn resolve<T: Copy>(slots: [Option<T>; 4]) -> Option<[T; 4]> {
    let first = slots[0]?;
    Some(std::array::from_fn(|k| slots[k].or(slots[k ^ 2]).unwrap_or(first)))
}

fn slots_of<T: Copy>(values: &[T]) -> Option<[Option<T>; 4]> {
    if values.is_empty() || values.len() > 4 {
        return None;
    }
    Some(std::array::from_fn(|k| values.get(k).copied()))
}

/// `hint` if that many values still express `values`, otherwise four.
fn emit_count<T: Copy + PartialEq>(values: &[T; 4], hint: usize) -> usize {
    let n = hint.clamp(1, 4);
    match slots_of(&values[..n]).and_then(resolve) {
        Some(expanded) if expanded == *values => n,
        _ => 4,
    }
}

/// Write `new` over the items at `indices`, dropping or appending values
/// when the count changes.
fn write_run<'a>(value: &Value<'a>, edit: &mut Edit<'a>, indices: &[usize], new: &[&str]) {
    for (j, &index) in indices.iter().enumerate() {
        match new.get(j) {
            Some(text) => {
                if *text != value.parts[index].text {
                    edit.set(index, text.to_string());
                }
            }
            None => {
                edit.set(index, "");
                if index > 0 && value.parts[index - 1].role == Role::Space {
                    edit.set(index - 1, "");
                }
            }
        }
    }
    if new.len() > indices.len()
        && let Some(&last) = indices.last()
    {
        let mut tail = edit.get(last).to_string();
        for text in &new[indices.len()..] {
            tail.push(' ');
            tail.push_str(text);
        }
        edit.set(last, tail);
    }
}

/// Permute a run of 1-4 side values by the side map.
fn permute_run<'a>(value: &Value<'a>, edit: &mut Edit<'a>, indices: &[usize], ctx: &Context) {
    let texts: Vec<&str> = indices.iter().map(|&i| value.parts[i].text).collect();
    let Some(full) = slots_of(&texts).and_then(resolve) else {
        return;
    };
    let permuted = ctx.desc.permute_sides(full);
    let count = emit_count(&permuted, texts.len());
    write_run(value, edit, indices, &permuted[..count]);
}

/// `margin`, `padding`, `border-width` and the other side shorthands.
pub fn four_value<'a>(value: &Value<'a>, edit: &mut Edit<'a>, ctx: &Context) {
    if value.has_role(Role::Comma) || value.has_role(Role::Slash) {
        return;
    }
    let indices: Vec<usize> = value
        .items()
        .filter(|(_, part)| !part.is_ident("fill"))
        .map(|(i, _)| i)
        .collect();
    permute_run(value, edit, &indices, ctx);
}

fn is_slice_component(kind: Option<Kind>, text: &str) -> bool {
    matches!(
        kind,
        Some(Kind::Number | Kind::Percentage | Kind::Dimension | Kind::Calc)
    ) || (kind == Some(Kind::Ident) && text.eq_ignore_ascii_case("auto"))
}

fn is_repeat_keyword(text: &str) -> bool {
    ["stretch", "repeat", "round", "space"]
        .iter()
        .any(|word| text.eq_ignore_ascii_case(word))
}

/// `border-image`: slice, width and outset are side groups around `/`.
pub fn border_image<'a>(value: &Value<'a>, edit: &mut Edit<'a>, ctx: &Context) {
    let mut repeats = Vec::new();
    for group in value.split_at_role(0..value.parts.len(), Role::Slash) {
        let mut run = Vec::new();
        let mut run_done = false;
        for i in value.item_indices(group) {
            let part = &value.parts[i];
            if part.is_ident("fill") {
                continue;
            }
            if is_slice_component(part.kind(), part.text) {
                if !run_done {
                    run.push(i);
                }
                continue;
            }
            if !run.is_empty() {
                run_done = true;
            }
            if part.ident().is_some_and(is_repeat_keyword) {
                repeats.push(i);
            } else if let Some(new) = generic_part(part, ctx) {
                edit.set(i, new);
            }
        }
        if !run.is_empty() {
            permute_run(value, edit, &run, ctx);
        }
    }
    if ctx.desc.quarter_turned && repeats.len() == 2 {
        swap_texts(value, edit, repeats[0], repeats[1]);
    }
}

/// Exchange the texts of two parts.
pub(super) fn swap_texts<'a>(value: &Value<'a>, edit: &mut Edit<'a>, a: usize, b: usize) {
    let (first, second) = (value.parts[a].text, value.parts[b].text);
    edit.set(a, second);
    edit.set(b, first);
}

/// Two values addressing the x and y axes trade places on a quarter turn.
pub fn pair_swap<'a>(value: &Value<'a>, range: Range<usize>, edit: &mut Edit<'a>, ctx: &Context) {
    if !ctx.desc.quarter_turned {
        return;
    }
    if let [a, b] = value.item_indices(range)[..] {
        swap_texts(value, edit, a, b);
    }
}

/// `border-radius`: each group is permuted by the corner map; the
/// horizontal and vertical radii groups swap on a quarter turn.
pub fn border_radius<'a>(value: &Value<'a>, edit: &mut Edit<'a>, ctx: &Context) {
    if value.has_role(Role::Comma) {
        return;
    }
    let groups: Vec<Vec<usize>> = value
        .split_at_role(0..value.parts.len(), Role::Slash)
        .into_iter()
        .map(|range| value.item_indices(range))
        .collect();
    if groups.len() > 2 {
        return;
    }

    let mut expanded = Vec::with_capacity(groups.len());
    for group in &groups {
        let texts: Vec<&str> = group.iter().map(|&i| value.parts[i].text).collect();
        let Some(full) = slots_of(&texts).and_then(resolve) else {
            return;
        };
        expanded.push((ctx.desc.permute_corners(full), group.len()));
    }
    if ctx.desc.quarter_turned && expanded.len() == 2 {
        expanded.swap(0, 1);
    }

    for (group, (values, hint)) in groups.iter().zip(&expanded) {
        let count = emit_count(values, *hint);
        write_run(value, edit, group, &values[..count]);
    }
}
