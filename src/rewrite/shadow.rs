//! `box-shadow`, `text-shadow` and `drop-shadow()` offsets.

use std::borrow::Cow;

use crate::orientation::Side;
use crate::value::{Edit, Part, Value, flip_sign};

use super::Context;
use super::keywords::generic_part;

/// Offset component for a target axis, given the source side feeding it.
fn offset_from<'a>(source: Side, x: &Part<'a>, y: &Part<'a>) -> Cow<'a, str> {
    match source {
        Side::Top => flip_sign(y),
        Side::Right => Cow::Borrowed(x.text),
        Side::Bottom => Cow::Borrowed(y.text),
        Side::Left => flip_sign(x),
    }
}

pub fn shadow<'a>(value: &Value<'a>, edit: &mut Edit<'a>, ctx: &Context) {
    for layer in value.layers() {
        let mut offsets = Vec::with_capacity(2);
        for i in value.item_indices(layer) {
            let part = &value.parts[i];
            if part.is_numeric() {
                if offsets.len() < 2 {
                    offsets.push(i);
                }
            } else if let Some(new) = generic_part(part, ctx) {
                edit.set(i, new);
            }
        }
        let [xi, yi] = offsets[..] else {
            continue;
        };
        let (x, y) = (&value.parts[xi], &value.parts[yi]);
        let new_x = offset_from(ctx.desc.side_map[1], x, y);
        let new_y = offset_from(ctx.desc.side_map[2], x, y);
        if new_x != x.text {
            edit.set(xi, new_x.into_owned());
        }
        if new_y != y.text {
            edit.set(yi, new_y.into_owned());
        }
    }
}
