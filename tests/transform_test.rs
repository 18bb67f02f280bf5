//! End-to-end stylesheet transforms.

use cssflip::{Options, WritingDirection, transform};

fn rtl(css: &str) -> String {
    transform(css, &Options::default())
}

fn between(source: WritingDirection, target: WritingDirection, css: &str) -> String {
    let options = Options::default()
        .with_source_dir(source)
        .with_target_dir(target);
    transform(css, &options)
}

// ============================================================================
// Left-to-right to right-to-left
// ============================================================================

#[test]
fn test_four_value_shorthand() {
    assert_eq!(rtl("padding: 1px 2px 3px 4px"), "padding: 1px 4px 3px 2px");
}

#[test]
fn test_direction() {
    assert_eq!(rtl("direction: ltr"), "direction: rtl");
}

#[test]
fn test_cursor() {
    assert_eq!(rtl("cursor: nw-resize"), "cursor: ne-resize");
}

#[test]
fn test_float() {
    assert_eq!(rtl("float: left"), "float: right");
}

#[test]
fn test_background_position() {
    assert_eq!(
        rtl("background-position: 25% 50%"),
        "background-position: 75% 50%"
    );
}

#[test]
fn test_border_radius() {
    assert_eq!(
        rtl("border-radius: 15px 10px 15px 0px"),
        "border-radius: 10px 15px 0px 15px"
    );
}

#[test]
fn test_full_stylesheet() {
    let css = "\
.sidebar {
  float: left;
  margin-left: 10px;
  padding: 0 20px 0 5px;
  border-left: 1px solid #ccc;
  text-align: left;
}
.icon:dir(ltr) {
  left: 0;
  box-shadow: 2px 2px 4px rgba(0, 0, 0, 0.5);
}
";
    let expected = "\
.sidebar {
  float: right;
  margin-right: 10px;
  padding: 0 5px 0 20px;
  border-right: 1px solid #ccc;
  text-align: right;
}
.icon:dir(rtl) {
  right: 0;
  box-shadow: -2px 2px 4px rgba(0, 0, 0, 0.5);
}
";
    assert_eq!(rtl(css), expected);
}

#[test]
fn test_comments_are_preserved() {
    let css = "/* float: left */ .a { /* margin-left: 1px /* nested */ float: left }";
    assert_eq!(
        rtl(css),
        "/* float: left */ .a { /* margin-left: 1px /* nested */ float: right }"
    );
}

#[test]
fn test_calc_is_protected_and_sign_flipped() {
    assert_eq!(
        rtl(".a { margin-left: calc(100% - 10px) }"),
        ".a { margin-right: calc(100% - 10px) }"
    );
    assert_eq!(
        rtl(".a { box-shadow: calc(1px + 2px) 3px red }"),
        ".a { box-shadow: calc(-1px + -2px) 3px red }"
    );
}

#[test]
fn test_unknown_css_is_untouched() {
    let css = "@font-face { font-family: \"Left\"; src: url(left.woff) }\n.a { color: red }";
    assert_eq!(rtl(css), css);
}

#[test]
fn test_content_strings_are_untouched() {
    let css = ".a::before { content: \"left\"; float: left }";
    assert_eq!(rtl(css), ".a::before { content: \"left\"; float: right }");
}

// ============================================================================
// Vertical writing modes
// ============================================================================

#[test]
fn test_quarter_turn_to_vertical_rl() {
    let css = ".a { width: 10px; margin: 1px 2px 3px 4px; box-shadow: 1px 2px red }";
    assert_eq!(
        between(WritingDirection::LR_TB, WritingDirection::TB_RL, css),
        ".a { height: 10px; margin: 4px 1px 2px 3px; box-shadow: -2px 1px red }"
    );
}

#[test]
fn test_quarter_turn_to_vertical_lr() {
    let css = ".a { min-width: 10px; margin: 1px 2px 3px 4px; float: left }";
    assert_eq!(
        between(WritingDirection::LR_TB, WritingDirection::TB_LR, css),
        ".a { min-height: 10px; margin: 4px 3px 2px 1px; float: left }"
    );
}

#[test]
fn test_quarter_turn_media_query() {
    let css = "@media (max-width: 600px) { .a { overflow-x: hidden } }";
    assert_eq!(
        between(WritingDirection::LR_TB, WritingDirection::TB_RL, css),
        "@media (max-height: 600px) { .a { overflow-y: hidden } }"
    );
}

// ============================================================================
// Algebra
// ============================================================================

#[test]
fn test_equal_directions_are_identity() {
    let css = ".a { float: left; padding: 1px 2px 3px 4px } `weird` /* @noflip";
    for dir in WritingDirection::all() {
        assert_eq!(between(dir, dir, css), css, "{dir}");
    }
}

#[test]
fn test_round_trips() {
    let css = ".a { float: left; padding: 1px 2px 3px 4px; cursor: nw-resize; \
               background-position: 25% 50%; border-radius: 15px 10px 15px 0px; \
               margin-left: 1px; width: 2px }";
    for target in WritingDirection::all() {
        let there = between(WritingDirection::LR_TB, target, css);
        let back = between(target, WritingDirection::LR_TB, &there);
        assert_eq!(back, css, "lr-tb -> {target} -> lr-tb");
    }
}

#[test]
fn test_rtl_is_an_involution() {
    let css = ".a { text-align: left; border-left-color: red; right: 3px }";
    assert_eq!(rtl(&rtl(css)), css);
}
