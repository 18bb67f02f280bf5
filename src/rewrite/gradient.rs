//! Gradient functions: angles, `to` sides and radial/conic positions.

use std::f64::consts::TAU;

use crate::value::{Edit, Function, Kind, Value, format_number, split_unit};

use super::Context;
use super::position::rewrite_position;
use super::shorthand::swap_texts;

/// Units per full turn for an angle unit.
fn full_turn(unit: &str) -> Option<f64> {
    match unit.to_ascii_lowercase().as_str() {
        "deg" => Some(360.0),
        "grad" => Some(400.0),
        "rad" => Some(TAU),
        "turn" => Some(1.0),
        _ => None,
    }
}

/// Rotate or mirror a gradient angle.
///
/// Standard angles run clockwise from the top. Prefixed gradients use the
/// legacy convention, counter-clockwise from the right, and are converted
/// around the same formula. A zero angle is returned unchanged.
pub fn rotate_angle(text: &str, legacy: bool, ctx: &Context) -> Option<String> {
    let (number, unit) = split_unit(text);
    let max = full_turn(unit)?;
    let angle: f64 = number.parse().ok()?;
    if angle == 0.0 {
        log::debug!("leaving zero gradient angle {text:?} unchanged");
        return None;
    }

    let quarter = max / 4.0;
    let standard = if legacy { quarter - angle } else { angle };
    let offset = ctx.desc.side_map[0].index() as f64 * quarter;
    let rotated = if ctx.desc.reflected {
        max + (offset - standard)
    } else {
        max - (offset - standard)
    }
    .rem_euclid(max);
    let result = if legacy {
        (quarter - rotated).rem_euclid(max)
    } else {
        rotated
    };
    Some(format!("{}{unit}", format_angle(result, decimal_places(number))))
}

/// Count the digits after the decimal point of a number.
fn decimal_places(number: &str) -> usize {
    number.split_once('.').map_or(0, |(_, fraction)| {
        fraction.bytes().take_while(u8::is_ascii_digit).count()
    })
}

/// Format an angle with at least four decimals, never dropping below the
/// precision the input was written with.
fn format_angle(value: f64, places: usize) -> String {
    if places <= 4 {
        return format_number(value, 4);
    }
    let text = format!("{value:.places$}");
    if text.bytes().all(|b| b == b'0' || b == b'.' || b == b'-') {
        return "0".to_string();
    }
    text
}

/// Map the side keywords of a `to <side>` or legacy `<side>` direction.
fn map_sides<'a>(value: &Value<'a>, indices: &[usize], edit: &mut Edit<'a>, ctx: &Context) {
    for &i in indices {
        if let Some(new) = ctx.swap.side(value.parts[i].text) {
            edit.set(i, new.into_owned());
        }
    }
}

/// Swap explicit ellipse radii on a quarter turn.
fn swap_radii<'a>(value: &Value<'a>, indices: &[usize], edit: &mut Edit<'a>, ctx: &Context) {
    if !ctx.desc.quarter_turned {
        return;
    }
    let radii: Vec<usize> = indices
        .iter()
        .copied()
        .filter(|&i| value.parts[i].is_numeric())
        .collect();
    if let [a, b] = radii[..] {
        swap_texts(value, edit, a, b);
    }
}

/// Split the first argument at an `at` or `from` keyword.
fn split_at_keyword(value: &Value<'_>, indices: &[usize], keyword: &str) -> Option<usize> {
    indices.iter().position(|&i| value.parts[i].is_ident(keyword))
}

fn first_argument(value: &Value<'_>) -> Vec<usize> {
    value
        .layers()
        .into_iter()
        .next()
        .map(|layer| value.item_indices(layer))
        .unwrap_or_default()
}

pub fn linear(f: &Function<'_>, ctx: &Context) -> String {
    let value = Value::parse(f.args);
    let mut edit = value.edit();
    let first = first_argument(&value);

    match first[..] {
        [i] if value.parts[i].kind() == Some(Kind::Dimension) => {
            if let Some(angle) = rotate_angle(value.parts[i].text, f.is_prefixed(), ctx) {
                edit.set(i, angle);
            }
        }
        [i, ..] if value.parts[i].is_ident("to") => map_sides(&value, &first[1..], &mut edit, ctx),
        [_, ..] if f.is_prefixed() => map_sides(&value, &first, &mut edit, ctx),
        _ => {}
    }
    f.rebuild(&edit.finish())
}

pub fn radial(f: &Function<'_>, ctx: &Context) -> String {
    let value = Value::parse(f.args);
    let mut edit = value.edit();
    let layers = value.layers();
    let first = first_argument(&value);

    if let Some(at) = split_at_keyword(&value, &first, "at") {
        swap_radii(&value, &first[..at], &mut edit, ctx);
        rewrite_position(&value, &first[at + 1..], &mut edit, ctx);
    } else if f.is_prefixed() && layers.len() > 2 {
        // Legacy syntax: position, then shape and size.
        rewrite_position(&value, &first, &mut edit, ctx);
        let shape = value.item_indices(layers[1].clone());
        swap_radii(&value, &shape, &mut edit, ctx);
    } else {
        swap_radii(&value, &first, &mut edit, ctx);
    }
    f.rebuild(&edit.finish())
}

pub fn conic(f: &Function<'_>, ctx: &Context) -> String {
    let value = Value::parse(f.args);
    let mut edit = value.edit();
    let first = first_argument(&value);

    if let Some(from) = split_at_keyword(&value, &first, "from")
        && let Some(&i) = first.get(from + 1)
        && let Some(angle) = rotate_angle(value.parts[i].text, false, ctx)
    {
        edit.set(i, angle);
    }
    if let Some(at) = split_at_keyword(&value, &first, "at") {
        rewrite_position(&value, &first[at + 1..], &mut edit, ctx);
    }
    f.rebuild(&edit.finish())
}

#[cfg(test)]
mod tests {
    use crate::rewrite::tests::{rtl, run};

    fn turn(css: &str) -> String {
        run("lr-tb", "tb-rl", css)
    }

    #[test]
    fn test_linear_angles() {
        assert_eq!(
            rtl("background-image: linear-gradient(45deg, red, blue)"),
            "background-image: linear-gradient(315deg, red, blue)"
        );
        assert_eq!(
            turn("background-image: linear-gradient(45deg, red, blue)"),
            "background-image: linear-gradient(135deg, red, blue)"
        );
        assert_eq!(
            rtl("background-image: linear-gradient(0.25turn, red, blue)"),
            "background-image: linear-gradient(0.75turn, red, blue)"
        );
        assert_eq!(
            rtl("background-image: linear-gradient(100grad, red, blue)"),
            "background-image: linear-gradient(300grad, red, blue)"
        );
    }

    #[test]
    fn test_angle_precision_round_trips() {
        let there = rtl("background-image: linear-gradient(1.5707963rad, red, blue)");
        assert_eq!(
            there,
            "background-image: linear-gradient(4.7123890rad, red, blue)"
        );
        assert_eq!(
            rtl(&there),
            "background-image: linear-gradient(1.5707963rad, red, blue)"
        );

        let there = rtl("background-image: linear-gradient(12.345deg, red, blue)");
        assert_eq!(
            there,
            "background-image: linear-gradient(347.655deg, red, blue)"
        );
        assert_eq!(
            rtl(&there),
            "background-image: linear-gradient(12.345deg, red, blue)"
        );

        let there = turn("background-image: linear-gradient(12.3456789deg, red, blue)");
        assert_eq!(
            run("tb-rl", "lr-tb", &there),
            "background-image: linear-gradient(12.3456789deg, red, blue)"
        );
    }

    #[test]
    fn test_zero_angle_passes_through() {
        assert_eq!(
            turn("background-image: linear-gradient(0deg, red, blue)"),
            "background-image: linear-gradient(0deg, red, blue)"
        );
    }

    #[test]
    fn test_linear_sides() {
        assert_eq!(
            rtl("background: linear-gradient(to left, red, blue) no-repeat"),
            "background: linear-gradient(to right, red, blue) no-repeat"
        );
        assert_eq!(
            rtl("background-image: linear-gradient(to top left, #fff 0%, #000 100%)"),
            "background-image: linear-gradient(to top right, #fff 0%, #000 100%)"
        );
        assert_eq!(
            turn("background-image: repeating-linear-gradient(to bottom, red, blue 10px)"),
            "background-image: repeating-linear-gradient(to left, red, blue 10px)"
        );
    }

    #[test]
    fn test_legacy_linear() {
        assert_eq!(
            rtl("background-image: -webkit-linear-gradient(left, red, blue)"),
            "background-image: -webkit-linear-gradient(right, red, blue)"
        );
        assert_eq!(
            rtl("background-image: -webkit-linear-gradient(45deg, red, blue)"),
            "background-image: -webkit-linear-gradient(135deg, red, blue)"
        );
    }

    #[test]
    fn test_radial() {
        assert_eq!(
            rtl("background-image: radial-gradient(circle at 25% 50%, red, blue)"),
            "background-image: radial-gradient(circle at 75% 50%, red, blue)"
        );
        assert_eq!(
            turn("background-image: radial-gradient(ellipse 10px 20px at left top, red, blue)"),
            "background-image: radial-gradient(ellipse 20px 10px at top right, red, blue)"
        );
        assert_eq!(
            rtl("background-image: -webkit-radial-gradient(left top, circle, red, blue)"),
            "background-image: -webkit-radial-gradient(right top, circle, red, blue)"
        );
    }

    #[test]
    fn test_conic() {
        assert_eq!(
            rtl("background-image: conic-gradient(from 90deg at 10% 50%, red, blue)"),
            "background-image: conic-gradient(from 270deg at 90% 50%, red, blue)"
        );
    }
}
