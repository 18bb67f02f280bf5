//! Property classification and renaming.

use std::borrow::Cow;

use crate::orientation::{Axis, Corner, Side};
use crate::value::strip_vendor_prefix;

use super::Context;

/// Which value rule a property's value goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    Direction,
    WritingMode,
    /// Physical left/right only: `float`, `clear`, `text-align`.
    InlineOnly,
    /// Values with side-like keywords that are not physical sides.
    Verbatim,
    Cursor,
    FourValue,
    BorderImage,
    /// Two values addressing the x and y axes.
    PairSwap,
    BorderRadius,
    CornerRadius,
    Shadow,
    Position,
    PositionAxis(Axis),
    Background,
    Size,
    Repeat,
    Transform,
    Translate,
    Rotate,
    Scale,
    Origin,
    Resize,
    PropertyList,
    Generic,
}

impl PropertyKind {
    /// Classify a property name, ignoring case and vendor prefixes.
    pub fn of(name: &str) -> PropertyKind {
        if name.starts_with("--") {
            return PropertyKind::Generic;
        }
        let base = strip_vendor_prefix(name).1.to_ascii_lowercase();
        match base.as_str() {
            "direction" => PropertyKind::Direction,
            "writing-mode" => PropertyKind::WritingMode,
            "float" | "clear" | "text-align" | "text-align-last" => PropertyKind::InlineOnly,
            "caption-side" | "vertical-align" => PropertyKind::Verbatim,
            "cursor" => PropertyKind::Cursor,
            "margin" | "padding" | "border-width" | "border-style" | "border-color" | "inset"
            | "scroll-margin" | "scroll-padding" | "border-image-width" | "border-image-outset"
            | "border-image-slice" | "mask-border-width" | "mask-border-outset"
            | "mask-border-slice" | "mask-box-image-width" | "mask-box-image-outset"
            | "mask-box-image-slice" => PropertyKind::FourValue,
            "border-image" | "mask-border" | "mask-box-image" => PropertyKind::BorderImage,
            "overflow" | "overscroll-behavior" | "border-image-repeat" | "mask-border-repeat"
            | "mask-box-image-repeat" => PropertyKind::PairSwap,
            "border-radius" => PropertyKind::BorderRadius,
            "box-shadow" | "text-shadow" => PropertyKind::Shadow,
            "background-position" | "mask-position" | "object-position" => PropertyKind::Position,
            "background-position-x" | "mask-position-x" => PropertyKind::PositionAxis(Axis::X),
            "background-position-y" | "mask-position-y" => PropertyKind::PositionAxis(Axis::Y),
            "background" | "mask" => PropertyKind::Background,
            "background-size" | "mask-size" => PropertyKind::Size,
            "background-repeat" | "mask-repeat" => PropertyKind::Repeat,
            "transform" => PropertyKind::Transform,
            "translate" => PropertyKind::Translate,
            "rotate" => PropertyKind::Rotate,
            "scale" => PropertyKind::Scale,
            "transform-origin" | "perspective-origin" => PropertyKind::Origin,
            "resize" => PropertyKind::Resize,
            "transition" | "transition-property" | "will-change" => PropertyKind::PropertyList,
            other if CornerName::parse(other).is_some() => PropertyKind::CornerRadius,
            _ => PropertyKind::Generic,
        }
    }
}

/// Properties whose whole name names an axis.
const AXIS_PROPERTIES: [(&str, &str); 4] = [
    ("width", "height"),
    ("min-width", "min-height"),
    ("max-width", "max-height"),
    ("contain-intrinsic-width", "contain-intrinsic-height"),
];

/// Properties with `-x` / `-y` longhands.
const AXIS_SUFFIXED: [&str; 4] = [
    "overflow",
    "overscroll-behavior",
    "background-position",
    "mask-position",
];

/// A corner radius longhand name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CornerName {
    corner: Corner,
    /// `border-radius-topleft` rather than `border-top-left-radius`.
    legacy: bool,
}

impl CornerName {
    fn parse(base: &str) -> Option<CornerName> {
        if let Some(sides) = base
            .strip_prefix("border-")
            .and_then(|rest| rest.strip_suffix("-radius"))
        {
            let (vertical, horizontal) = sides.split_once('-')?;
            let corner = Corner::from_sides(Side::from_name(vertical)?, Side::from_name(horizontal)?)?;
            return Some(CornerName { corner, legacy: false });
        }
        let sides = base.strip_prefix("border-radius-")?;
        let split = ["top", "bottom"]
            .into_iter()
            .find(|prefix| sides.starts_with(prefix))?
            .len();
        let (vertical, horizontal) = sides.split_at(split);
        let corner = Corner::from_sides(Side::from_name(vertical)?, Side::from_name(horizontal)?)?;
        Some(CornerName { corner, legacy: true })
    }

    fn render(self) -> String {
        let (vertical, horizontal) = self.corner.sides();
        if self.legacy {
            format!("border-radius-{}{}", vertical.name(), horizontal.name())
        } else {
            format!("border-{}-{}-radius", vertical.name(), horizontal.name())
        }
    }
}

/// Rename a property for the target orientation.
///
/// Custom properties are never renamed. A vendor prefix is kept as written.
pub fn rename<'a>(name: &'a str, ctx: &Context) -> Cow<'a, str> {
    if name.starts_with("--") {
        return Cow::Borrowed(name);
    }
    let (prefix, base) = strip_vendor_prefix(name);
    let lower = base.to_ascii_lowercase();

    let renamed = rename_base(&lower, ctx);
    match renamed {
        Some(new_base) if new_base != lower => Cow::Owned(format!("{prefix}{new_base}")),
        _ => Cow::Borrowed(name),
    }
}

fn rename_base(base: &str, ctx: &Context) -> Option<String> {
    if let Some(corner_name) = CornerName::parse(base) {
        return Some(
            CornerName {
                corner: ctx.desc.target_corner(corner_name.corner),
                ..corner_name
            }
            .render(),
        );
    }

    if ctx.desc.quarter_turned {
        for (a, b) in AXIS_PROPERTIES {
            if base == a {
                return Some(b.to_string());
            }
            if base == b {
                return Some(a.to_string());
            }
        }
        for stem in AXIS_SUFFIXED {
            if let Some(axis) = base.strip_prefix(stem).and_then(|s| s.strip_prefix('-')) {
                let swapped = match axis {
                    "x" => "y",
                    "y" => "x",
                    _ => continue,
                };
                return Some(format!("{stem}-{swapped}"));
            }
        }
    }

    if !base.split('-').any(|part| Side::from_name(part).is_some()) {
        return None;
    }
    let parts: Vec<Cow<'_, str>> = base
        .split('-')
        .map(|part| ctx.swap.side(part).unwrap_or(Cow::Borrowed(part)))
        .collect();
    Some(parts.join("-"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orientation::WritingDirection;
    use crate::rewrite::tests::with_context;

    #[test]
    fn test_classify() {
        assert_eq!(PropertyKind::of("margin"), PropertyKind::FourValue);
        assert_eq!(PropertyKind::of("-webkit-border-image"), PropertyKind::BorderImage);
        assert_eq!(PropertyKind::of("FLOAT"), PropertyKind::InlineOnly);
        assert_eq!(PropertyKind::of("border-top-left-radius"), PropertyKind::CornerRadius);
        assert_eq!(PropertyKind::of("-moz-border-radius-bottomright"), PropertyKind::CornerRadius);
        assert_eq!(
            PropertyKind::of("background-position-y"),
            PropertyKind::PositionAxis(Axis::Y)
        );
        assert_eq!(PropertyKind::of("--margin"), PropertyKind::Generic);
        assert_eq!(PropertyKind::of("margin-left"), PropertyKind::Generic);
    }

    #[test]
    fn test_rename_sides_and_corners() {
        with_context(WritingDirection::LR_TB, WritingDirection::RL_TB, |ctx| {
            assert_eq!(rename("margin-left", ctx), "margin-right");
            assert_eq!(rename("border-right-width", ctx), "border-left-width");
            assert_eq!(rename("left", ctx), "right");
            assert_eq!(rename("top", ctx), "top");
            assert_eq!(rename("border-top-left-radius", ctx), "border-top-right-radius");
            assert_eq!(rename("-moz-border-radius-topleft", ctx), "-moz-border-radius-topright");
            assert_eq!(rename("--left", ctx), "--left");
            assert_eq!(rename("width", ctx), "width");
            assert_eq!(rename("inset-inline-start", ctx), "inset-inline-start");
        });
    }

    #[test]
    fn test_rename_under_quarter_turn() {
        with_context(WritingDirection::LR_TB, WritingDirection::TB_RL, |ctx| {
            assert_eq!(rename("width", ctx), "height");
            assert_eq!(rename("max-height", ctx), "max-width");
            assert_eq!(rename("overflow-x", ctx), "overflow-y");
            assert_eq!(rename("background-position-y", ctx), "background-position-x");
            assert_eq!(rename("margin-top", ctx), "margin-right");
            assert_eq!(rename("padding-left", ctx), "padding-top");
            assert_eq!(rename("border-left-width", ctx), "border-top-width");
            assert_eq!(rename("-webkit-min-width", ctx), "-webkit-min-height");
        });
    }
}
