//! 2D and 3D transforms.
//!
//! Every function is conjugated by the change of axes: source x lands on
//! target x (or y after a quarter turn), negated when `flip_x` is set, and
//! likewise for y. Rotation angles also change sign under a reflection.

use std::borrow::Cow;

use crate::value::{Edit, Function, Part, Value, flip_sign};

use super::Context;
use super::shorthand::swap_texts;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TransformFunction {
    Translate,
    TranslateX,
    TranslateY,
    Translate3d,
    Scale,
    ScaleX,
    ScaleY,
    Scale3d,
    Rotate,
    RotateX,
    RotateY,
    RotateZ,
    Rotate3d,
    Skew,
    SkewX,
    SkewY,
    Matrix,
    Matrix3d,
}

impl TransformFunction {
    fn from_name(name: &str) -> Option<Self> {
        let function = match name.to_ascii_lowercase().as_str() {
            "translate" => Self::Translate,
            "translatex" => Self::TranslateX,
            "translatey" => Self::TranslateY,
            "translate3d" => Self::Translate3d,
            "scale" => Self::Scale,
            "scalex" => Self::ScaleX,
            "scaley" => Self::ScaleY,
            "scale3d" => Self::Scale3d,
            "rotate" => Self::Rotate,
            "rotatex" => Self::RotateX,
            "rotatey" => Self::RotateY,
            "rotatez" => Self::RotateZ,
            "rotate3d" => Self::Rotate3d,
            "skew" => Self::Skew,
            "skewx" => Self::SkewX,
            "skewy" => Self::SkewY,
            "matrix" => Self::Matrix,
            "matrix3d" => Self::Matrix3d,
            _ => return None,
        };
        Some(function)
    }

    /// Whether the name ends in an axis letter that follows a quarter turn.
    fn has_axis_suffix(self) -> bool {
        matches!(
            self,
            Self::TranslateX
                | Self::TranslateY
                | Self::ScaleX
                | Self::ScaleY
                | Self::RotateX
                | Self::RotateY
                | Self::SkewX
                | Self::SkewY
        )
    }
}

/// `translateX` ↔ `translateY`, keeping the letter's case.
fn swap_axis_suffix(name: &str) -> String {
    let mut out = name.to_string();
    let swapped = match out.pop() {
        Some('X') => 'Y',
        Some('Y') => 'X',
        Some('x') => 'y',
        Some('y') => 'x',
        Some(other) => other,
        None => return out,
    };
    out.push(swapped);
    out
}

fn signed<'a>(part: &Part<'a>, negate: bool) -> Cow<'a, str> {
    if negate {
        flip_sign(part)
    } else {
        Cow::Borrowed(part.text)
    }
}

/// Target arguments for a translation vector `(x, y[, z])`.
fn translate_args<'a>(args: &[Part<'a>], ctx: &Context) -> Option<Vec<Cow<'a, str>>> {
    let d = ctx.desc;
    let mut out = match args {
        [x] if d.quarter_turned => return Some(vec![Cow::Borrowed("0"), signed(x, d.flip_x)]),
        [x] => return Some(vec![signed(x, d.flip_x)]),
        [x, y] => vec![signed(x, d.flip_x), signed(y, d.flip_y)],
        [x, y, z] => vec![signed(x, d.flip_x), signed(y, d.flip_y), Cow::Borrowed(z.text)],
        _ => return None,
    };
    if d.quarter_turned {
        out.swap(0, 1);
    }
    Some(out)
}

/// Target arguments for a rotation about `(x, y, z)` by an angle.
fn rotate3d_args<'a>(args: &[Part<'a>], ctx: &Context) -> Option<Vec<Cow<'a, str>>> {
    let d = ctx.desc;
    let [x, y, z, angle] = args else {
        log::debug!("leaving rotate3d() with {} arguments unchanged", args.len());
        return None;
    };
    let mut out = vec![
        signed(x, d.flip_x != d.reflected),
        signed(y, d.flip_y != d.reflected),
        signed(z, d.reflected),
        Cow::Borrowed(angle.text),
    ];
    if d.quarter_turned {
        out.swap(0, 1);
    }
    Some(out)
}

/// Conjugate a column-major matrix by the signed axis permutation.
fn conjugate<'a>(args: &[Part<'a>], rows: usize, cols: usize, ctx: &Context) -> Vec<Cow<'a, str>> {
    let d = ctx.desc;
    let target: [usize; 4] = if d.quarter_turned { [1, 0, 2, 3] } else { [0, 1, 2, 3] };
    let negated = [d.flip_x, d.flip_y, false, false];
    let mut out = vec![Cow::Borrowed(""); args.len()];
    for col in 0..cols {
        for row in 0..rows {
            out[target[col] * rows + target[row]] =
                signed(&args[col * rows + row], negated[row] != negated[col]);
        }
    }
    out
}

/// New arguments for one transform function.
fn rewrite_call<'a>(
    function: TransformFunction,
    args: &[Part<'a>],
    ctx: &Context,
) -> Option<Vec<Cow<'a, str>>> {
    use TransformFunction as F;

    let d = ctx.desc;
    let skew_sign = d.flip_x != d.flip_y;
    let out = match (function, args) {
        (F::Translate | F::Translate3d, _) => translate_args(args, ctx)?,
        (F::TranslateX, [a]) => vec![signed(a, d.flip_x)],
        (F::TranslateY, [a]) => vec![signed(a, d.flip_y)],
        (F::Scale, [x, y]) | (F::Scale3d, [x, y, _]) => {
            let mut out: Vec<_> = args.iter().map(|p| Cow::Borrowed(p.text)).collect();
            if d.quarter_turned {
                out[0] = Cow::Borrowed(y.text);
                out[1] = Cow::Borrowed(x.text);
            }
            out
        }
        (F::Scale | F::ScaleX | F::ScaleY, [a]) => vec![Cow::Borrowed(a.text)],
        (F::Rotate | F::RotateZ, [a]) => vec![signed(a, d.reflected)],
        (F::RotateX, [a]) => vec![signed(a, d.flip_x != d.reflected)],
        (F::RotateY, [a]) => vec![signed(a, d.flip_y != d.reflected)],
        (F::Rotate3d, _) => rotate3d_args(args, ctx)?,
        (F::Skew, [a]) if d.quarter_turned => vec![Cow::Borrowed("0"), signed(a, skew_sign)],
        (F::Skew, [a]) | (F::SkewX | F::SkewY, [a]) => vec![signed(a, skew_sign)],
        (F::Skew, [a, b]) => {
            let mut out = vec![signed(a, skew_sign), signed(b, skew_sign)];
            if d.quarter_turned {
                out.swap(0, 1);
            }
            out
        }
        (F::Matrix, _) if args.len() == 6 => conjugate(args, 2, 3, ctx),
        (F::Matrix3d, _) if args.len() == 16 => conjugate(args, 4, 4, ctx),
        _ => {
            log::debug!("leaving {function:?} with {} arguments unchanged", args.len());
            return None;
        }
    };
    Some(out)
}

/// Comma-separated arguments, each a single component.
fn arguments<'a>(value: &Value<'a>) -> Option<Vec<(usize, Part<'a>)>> {
    value
        .layers()
        .into_iter()
        .map(|layer| match value.item_indices(layer)[..] {
            [i] => Some((i, value.parts[i])),
            _ => None,
        })
        .collect()
}

/// Rewrite one transform function, `None` when it is unchanged.
fn rewrite_function(text: &str, ctx: &Context) -> Option<String> {
    let f = Function::parse(text)?;
    let function = TransformFunction::from_name(f.name)?;
    let value = Value::parse(f.args);
    let args = arguments(&value)?;
    let parts: Vec<Part<'_>> = args.iter().map(|(_, part)| *part).collect();
    let new_args = rewrite_call(function, &parts, ctx)?;

    let new_args = if new_args.len() == args.len() {
        let mut edit = value.edit();
        for ((i, part), new) in args.iter().zip(new_args) {
            if new != part.text {
                edit.set(*i, new);
            }
        }
        edit.finish()
    } else {
        new_args.join(", ")
    };
    let name = if ctx.desc.quarter_turned && function.has_axis_suffix() {
        swap_axis_suffix(f.name)
    } else {
        f.name.to_string()
    };
    let new = format!("{name}({new_args}{}", f.close);
    (new != text).then_some(new)
}

/// `transform`: a space-separated list of functions.
pub fn transform_list<'a>(value: &Value<'a>, edit: &mut Edit<'a>, ctx: &Context) {
    for (i, part) in value.items() {
        if part.function().is_some()
            && let Some(new) = rewrite_function(part.text, ctx)
        {
            edit.set(i, new);
        }
    }
}

fn write_items<'a>(
    value: &Value<'a>,
    items: &[usize],
    new: Vec<Cow<'a, str>>,
    edit: &mut Edit<'a>,
) {
    if new.len() == items.len() {
        for (&i, text) in items.iter().zip(new) {
            if text != value.parts[i].text {
                edit.set(i, text);
            }
        }
    } else if let (Some(&first), Some(&last)) = (items.first(), items.last()) {
        edit.set(first, new.join(" "));
        for i in first + 1..=last {
            edit.set(i, "");
        }
    }
}

/// The `translate` property: `x [y [z]]`.
pub fn translate_property<'a>(value: &Value<'a>, edit: &mut Edit<'a>, ctx: &Context) {
    let items = value.item_indices(0..value.parts.len());
    let parts: Vec<Part<'a>> = items.iter().map(|&i| value.parts[i]).collect();
    if !parts.iter().all(Part::is_numeric) {
        return;
    }
    if let Some(new) = translate_args(&parts, ctx) {
        write_items(value, &items, new, edit);
    }
}

/// The `rotate` property: an angle, optionally after an axis name or vector.
pub fn rotate_property<'a>(value: &Value<'a>, edit: &mut Edit<'a>, ctx: &Context) {
    let d = ctx.desc;
    let items = value.item_indices(0..value.parts.len());
    let parts: Vec<Part<'a>> = items.iter().map(|&i| value.parts[i]).collect();
    let new = match &parts[..] {
        [angle] if angle.is_numeric() => vec![signed(angle, d.reflected)],
        [axis, angle] => {
            let negate = match axis.ident().map(str::to_ascii_lowercase).as_deref() {
                Some("x") => d.flip_x != d.reflected,
                Some("y") => d.flip_y != d.reflected,
                Some("z") => d.reflected,
                _ => return,
            };
            vec![ctx.swap.get(axis.text), signed(angle, negate)]
        }
        [_, _, _, _] => match rotate3d_args(&parts, ctx) {
            Some(new) => new,
            None => return,
        },
        _ => return,
    };
    write_items(value, &items, new, edit);
}

/// The `scale` property: `x [y [z]]`.
pub fn scale_property<'a>(value: &Value<'a>, edit: &mut Edit<'a>, ctx: &Context) {
    if !ctx.desc.quarter_turned {
        return;
    }
    let items = value.item_indices(0..value.parts.len());
    if let [x, y, ..] = items[..]
        && items.len() <= 3
    {
        swap_texts(value, edit, x, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rewrite::tests::{rtl, run};

    fn turn(css: &str) -> String {
        run("lr-tb", "tb-rl", css)
    }

    #[test]
    fn test_function_names() {
        assert_eq!(TransformFunction::from_name("translateX"), Some(TransformFunction::TranslateX));
        assert_eq!(TransformFunction::from_name("MATRIX3D"), Some(TransformFunction::Matrix3d));
        assert_eq!(TransformFunction::from_name("perspective"), None);
        assert_eq!(swap_axis_suffix("translateX"), "translateY");
        assert_eq!(swap_axis_suffix("skewy"), "skewx");
    }

    #[test]
    fn test_mirror_translate_rotate_skew() {
        assert_eq!(rtl("transform: translateX(10px)"), "transform: translateX(-10px)");
        assert_eq!(rtl("transform: translate(10px, 20px)"), "transform: translate(-10px, 20px)");
        assert_eq!(rtl("transform: translate(-50%)"), "transform: translate(50%)");
        assert_eq!(rtl("transform: rotate(45deg)"), "transform: rotate(-45deg)");
        assert_eq!(rtl("transform: skewX(10deg) scale(2)"), "transform: skewX(-10deg) scale(2)");
        assert_eq!(rtl("transform: rotateY(30deg)"), "transform: rotateY(-30deg)");
        assert_eq!(rtl("transform: rotateX(30deg)"), "transform: rotateX(30deg)");
        assert_eq!(rtl("transform: translate3d(1px, 2px, 3px)"), "transform: translate3d(-1px, 2px, 3px)");
    }

    #[test]
    fn test_mirror_matrix() {
        assert_eq!(
            rtl("transform: matrix(1, 2, 3, 4, 5, 6)"),
            "transform: matrix(1, -2, -3, 4, -5, 6)"
        );
        assert_eq!(
            rtl("transform: matrix3d(1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 16)"),
            "transform: matrix3d(1, -2, -3, -4, -5, 6, 7, 8, -9, 10, 11, 12, -13, 14, 15, 16)"
        );
        assert_eq!(rtl("transform: matrix(1, 2, 3)"), "transform: matrix(1, 2, 3)");
    }

    #[test]
    fn test_rotate3d_argument_count() {
        assert_eq!(
            rtl("transform: rotate3d(1, 2, 3, 10deg)"),
            "transform: rotate3d(1, -2, -3, 10deg)"
        );
        assert_eq!(rtl("transform: rotate3d(1, 2, 10deg)"), "transform: rotate3d(1, 2, 10deg)");
    }

    #[test]
    fn test_quarter_turn() {
        assert_eq!(turn("transform: translateX(10px)"), "transform: translateY(10px)");
        assert_eq!(turn("transform: translateY(10px)"), "transform: translateX(-10px)");
        assert_eq!(turn("transform: translate(10px)"), "transform: translate(0, 10px)");
        assert_eq!(turn("transform: translate(1px, 2px)"), "transform: translate(-2px, 1px)");
        assert_eq!(turn("transform: scale(1, 2)"), "transform: scale(2, 1)");
        assert_eq!(turn("transform: scaleX(2)"), "transform: scaleY(2)");
        assert_eq!(turn("transform: rotate(45deg)"), "transform: rotate(45deg)");
        assert_eq!(turn("transform: skew(10deg)"), "transform: skew(0, -10deg)");
        assert_eq!(
            turn("transform: matrix(1, 2, 3, 4, 5, 6)"),
            "transform: matrix(4, -3, -2, 1, -6, 5)"
        );
    }

    #[test]
    fn test_individual_properties() {
        assert_eq!(rtl("translate: 10px 20px"), "translate: -10px 20px");
        assert_eq!(turn("translate: 10px"), "translate: 0 10px");
        assert_eq!(rtl("rotate: 30deg"), "rotate: -30deg");
        assert_eq!(rtl("rotate: z 30deg"), "rotate: z -30deg");
        assert_eq!(turn("rotate: x 30deg"), "rotate: y 30deg");
        assert_eq!(rtl("rotate: 1 0 0 30deg"), "rotate: 1 0 0 30deg");
        assert_eq!(turn("scale: 1 2"), "scale: 2 1");
        assert_eq!(rtl("scale: 1 2"), "scale: 1 2");
        assert_eq!(rtl("rotate: none"), "rotate: none");
    }
}
