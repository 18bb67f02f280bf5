//! Orientation algebra.
//!
//! A writing direction is a pair of flow directions, one for the inline axis
//! and one for the block axis. Each flow direction is identified by the side
//! it starts from, so the four flows `tb`, `rl`, `bt` and `lr` carry the
//! ordinals 0 to 3 of the sides top, right, bottom and left. Stepping an
//! ordinal by one rotates a quarter turn, stepping by two reflects.
//!
//! [`TransformDescriptor::solve`] turns a source and target direction into
//! the flags and permutation tables every rewrite rule consumes.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// A physical side of the box, in CSS shorthand order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top = 0,
    Right = 1,
    Bottom = 2,
    Left = 3,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];

    pub fn from_index(index: usize) -> Side {
        Self::ALL[index & 3]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Whether the side lies on the horizontal axis (left or right).
    pub fn is_horizontal(self) -> bool {
        self.index() & 1 == 1
    }

    pub fn name(self) -> &'static str {
        match self {
            Side::Top => "top",
            Side::Right => "right",
            Side::Bottom => "bottom",
            Side::Left => "left",
        }
    }

    pub fn from_name(name: &str) -> Option<Side> {
        Side::ALL
            .into_iter()
            .find(|side| name.eq_ignore_ascii_case(side.name()))
    }

    /// Compass letter used by cursor keywords.
    pub fn compass(self) -> char {
        match self {
            Side::Top => 'n',
            Side::Right => 'e',
            Side::Bottom => 's',
            Side::Left => 'w',
        }
    }

    /// Flow token for a direction that starts at this side.
    pub fn flow(self) -> &'static str {
        match self {
            Side::Top => "tb",
            Side::Right => "rl",
            Side::Bottom => "bt",
            Side::Left => "lr",
        }
    }

    pub fn from_flow(token: &str) -> Option<Side> {
        Side::ALL
            .into_iter()
            .find(|side| token.eq_ignore_ascii_case(side.flow()))
    }
}

/// A corner of the box, in `border-radius` order.
///
/// Corner `k` sits at the clockwise start of side `k`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft = 0,
    TopRight = 1,
    BottomRight = 2,
    BottomLeft = 3,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomRight,
        Corner::BottomLeft,
    ];

    pub fn from_index(index: usize) -> Corner {
        Self::ALL[index & 3]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// The vertical and horizontal sides meeting at this corner.
    pub fn sides(self) -> (Side, Side) {
        match self {
            Corner::TopLeft => (Side::Top, Side::Left),
            Corner::TopRight => (Side::Top, Side::Right),
            Corner::BottomRight => (Side::Bottom, Side::Right),
            Corner::BottomLeft => (Side::Bottom, Side::Left),
        }
    }

    /// The corner where two adjacent sides meet, in either order.
    pub fn from_sides(a: Side, b: Side) -> Option<Corner> {
        let (vertical, horizontal) = if a.is_horizontal() { (b, a) } else { (a, b) };
        if vertical.is_horizontal() || !horizontal.is_horizontal() {
            return None;
        }
        Corner::ALL
            .into_iter()
            .find(|corner| corner.sides() == (vertical, horizontal))
    }

    /// Whether the corner lies on the NE/SW diagonal.
    pub fn is_anti_diagonal(self) -> bool {
        matches!(self, Corner::TopRight | Corner::BottomLeft)
    }
}

/// Source or target writing direction, e.g. `lr-tb` or `tb-rl`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize), serde(try_from = "String"))]
pub struct WritingDirection {
    /// Side the inline axis starts from.
    pub inline: Side,
    /// Side the block axis starts from.
    pub block: Side,
}

impl WritingDirection {
    /// Left-to-right lines stacked top to bottom.
    pub const LR_TB: WritingDirection = WritingDirection {
        inline: Side::Left,
        block: Side::Top,
    };

    /// Right-to-left lines stacked top to bottom.
    pub const RL_TB: WritingDirection = WritingDirection {
        inline: Side::Right,
        block: Side::Top,
    };

    /// Top-to-bottom lines stacked right to left (`vertical-rl`).
    pub const TB_RL: WritingDirection = WritingDirection {
        inline: Side::Top,
        block: Side::Right,
    };

    /// Top-to-bottom lines stacked left to right (`vertical-lr`).
    pub const TB_LR: WritingDirection = WritingDirection {
        inline: Side::Top,
        block: Side::Left,
    };

    pub fn new(inline: Side, block: Side) -> Option<Self> {
        (inline.is_horizontal() != block.is_horizontal()).then_some(Self { inline, block })
    }

    /// Every valid direction, horizontal ones first.
    pub fn all() -> impl Iterator<Item = WritingDirection> {
        Side::ALL.into_iter().flat_map(|inline| {
            Side::ALL
                .into_iter()
                .filter_map(move |block| WritingDirection::new(inline, block))
        })
    }

    fn ordinals(self) -> [usize; 2] {
        [self.inline.index(), self.block.index()]
    }
}

impl Default for WritingDirection {
    fn default() -> Self {
        Self::LR_TB
    }
}

impl fmt::Display for WritingDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.inline.flow(), self.block.flow())
    }
}

impl FromStr for WritingDirection {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidDirection(s.to_string());
        let (inline, block) = s.trim().split_once('-').ok_or_else(invalid)?;
        let inline = Side::from_flow(inline).ok_or_else(invalid)?;
        let block = Side::from_flow(block).ok_or_else(invalid)?;
        WritingDirection::new(inline, block).ok_or_else(invalid)
    }
}

impl TryFrom<String> for WritingDirection {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// An axis of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Flags and permutation tables for one source → target change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformDescriptor {
    /// Inline direction mirrored (`ltr` ↔ `rtl`).
    pub dir_flipped: bool,
    /// Inline and block axes swap places.
    pub quarter_turned: bool,
    /// The NE/SW and NW/SE diagonals swap.
    ///
    /// Compares the diagonals of the two start corners, so unlike a plain
    /// `(s0 + s1) % 3 != (t0 + t1) % 3` it stays false for the half turns
    /// `rl-tb`/`lr-bt` and `tb-rl`/`bt-lr`.
    pub corners_flipped: bool,
    /// The change is a mirror rather than a pure rotation.
    pub reflected: bool,
    /// Target side index → source side.
    pub side_map: [Side; 4],
    /// Target corner index → source corner.
    pub corner_map: [Corner; 4],
    /// Source horizontal positions must be complemented.
    pub flip_x: bool,
    /// Source vertical positions must be complemented.
    pub flip_y: bool,
}

impl TransformDescriptor {
    pub fn identity() -> Self {
        Self {
            dir_flipped: false,
            quarter_turned: false,
            corners_flipped: false,
            reflected: false,
            side_map: Side::ALL,
            corner_map: Corner::ALL,
            flip_x: false,
            flip_y: false,
        }
    }

    pub fn solve(source: WritingDirection, target: WritingDirection) -> Self {
        let s = source.ordinals();
        let t = target.ordinals();

        let dir_flipped = ((s[0] ^ t[0]) % 3) != 0;
        let quarter_turned = (s[0] & 1) != (t[0] & 1);
        // Start corners on the NW/SE diagonal sum to 3; NE/SW ones to 1 or 5.
        let corners_flipped = ((s[0] + s[1]) % 3 == 0) != ((t[0] + t[1]) % 3 == 0);
        let reflected = ((s[0] + 4 - s[1]) & 3) != ((t[0] + 4 - t[1]) & 3);

        let mut side_map = Side::ALL;
        let mut corner_map = Corner::ALL;
        for i in 0..4 {
            let key = t[i & 1] ^ (i & 2);
            let value = s[i & 1] ^ (i & 2);
            side_map[key] = Side::from_index(value);
            corner_map[key] = Corner::from_index(value + usize::from(reflected));
        }

        let flip_x = side_map[3] == Side::Right || side_map[0] == Side::Right;
        let flip_y = side_map[2] == Side::Top || side_map[1] == Side::Top;

        Self {
            dir_flipped,
            quarter_turned,
            corners_flipped,
            reflected,
            side_map,
            corner_map,
            flip_x,
            flip_y,
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }

    /// Source side feeding the given target side.
    pub fn source_side(&self, target: Side) -> Side {
        self.side_map[target.index()]
    }

    /// Target side a source side lands on.
    pub fn target_side(&self, source: Side) -> Side {
        Side::ALL
            .into_iter()
            .find(|&target| self.source_side(target) == source)
            .unwrap_or(source)
    }

    /// Target corner a source corner lands on.
    pub fn target_corner(&self, source: Corner) -> Corner {
        Corner::ALL
            .into_iter()
            .find(|&target| self.corner_map[target.index()] == source)
            .unwrap_or(source)
    }

    /// Reorder four side values into target order.
    pub fn permute_sides<T: Copy>(&self, values: [T; 4]) -> [T; 4] {
        self.side_map.map(|source| values[source.index()])
    }

    /// Reorder four corner values into target order.
    pub fn permute_corners<T: Copy>(&self, values: [T; 4]) -> [T; 4] {
        self.corner_map.map(|source| values[source.index()])
    }

    /// Whether positive values along a source axis point the other way
    /// after the change.
    pub fn flips(&self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.flip_x,
            Axis::Y => self.flip_y,
        }
    }
}

impl Default for TransformDescriptor {
    fn default() -> Self {
        Self::solve(WritingDirection::LR_TB, WritingDirection::RL_TB)
    }
}
