//! Keyword substitution table derived from a [`TransformDescriptor`].

use std::borrow::Cow;
use std::collections::HashMap;

use crate::orientation::{Corner, Side, TransformDescriptor};

/// Case-insensitive keyword → keyword map.
///
/// Keys from different families (side names, flow tokens, compass parts,
/// axis words) never collide, so one table serves every rewrite rule; each
/// rule only asks about the words it recognizes.
#[derive(Debug, Clone, Default)]
pub struct TextSwap {
    map: HashMap<String, String>,
}

/// Words that trade places when the inline and block axes swap.
const QUARTER_TURN_PAIRS: [(&str, &str); 6] = [
    ("width", "height"),
    ("horizontal", "vertical"),
    ("text", "vertical-text"),
    ("row-resize", "col-resize"),
    ("portrait", "landscape"),
    ("x", "y"),
];

impl TextSwap {
    pub fn new(desc: &TransformDescriptor) -> Self {
        let mut table = Self::default();

        for side in Side::ALL {
            let target = desc.target_side(side);
            table.insert(side.name(), target.name());
            table.insert(side.flow(), target.flow());
            table.insert(&side.compass().to_string(), &target.compass().to_string());
        }

        for corner in Corner::ALL {
            let (vertical, horizontal) = desc.target_corner(corner).sides();
            let (from_v, from_h) = corner.sides();
            table.insert(
                &format!("{}{}", from_v.compass(), from_h.compass()),
                &format!("{}{}", vertical.compass(), horizontal.compass()),
            );
        }

        if desc.quarter_turned {
            table.insert_pair("ns", "ew");
            for (a, b) in QUARTER_TURN_PAIRS {
                table.insert_pair(a, b);
            }
        }

        if desc.dir_flipped {
            table.insert_pair("ltr", "rtl");
        }

        if desc.corners_flipped {
            table.insert_pair("nesw", "nwse");
            table.insert_pair("nesw-resize", "nwse-resize");
        }

        table
    }

    fn insert(&mut self, from: &str, to: &str) {
        if from != to {
            self.map.insert(from.to_string(), to.to_string());
        }
    }

    fn insert_pair(&mut self, a: &str, b: &str) {
        self.insert(a, b);
        self.insert(b, a);
    }

    /// Look up a keyword, falling back to the keyword itself.
    ///
    /// An all-uppercase keyword gets an uppercase replacement; anything else
    /// gets the canonical lowercase spelling.
    pub fn get<'a>(&self, word: &'a str) -> Cow<'a, str> {
        match self.lookup(word) {
            Some(replacement) => {
                let shouted = word.chars().any(|c| c.is_ascii_alphabetic())
                    && !word.chars().any(|c| c.is_ascii_lowercase());
                if shouted {
                    Cow::Owned(replacement.to_ascii_uppercase())
                } else {
                    Cow::Owned(replacement.to_string())
                }
            }
            None => Cow::Borrowed(word),
        }
    }

    /// Look up a keyword, returning `None` when the table leaves it alone.
    pub fn lookup(&self, word: &str) -> Option<&str> {
        if word.bytes().any(|b| b.is_ascii_uppercase()) {
            self.map.get(&word.to_ascii_lowercase()).map(String::as_str)
        } else {
            self.map.get(word).map(String::as_str)
        }
    }

    /// Map a side keyword, if the word is one.
    pub fn side<'a>(&self, word: &'a str) -> Option<Cow<'a, str>> {
        Side::from_name(word).map(|_| self.get(word))
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orientation::WritingDirection;

    fn table(source: WritingDirection, target: WritingDirection) -> TextSwap {
        TextSwap::new(&TransformDescriptor::solve(source, target))
    }

    #[test]
    fn test_ltr_to_rtl_table() {
        let t = table(WritingDirection::LR_TB, WritingDirection::RL_TB);
        assert_eq!(t.get("left"), "right");
        assert_eq!(t.get("right"), "left");
        assert_eq!(t.get("top"), "top");
        assert_eq!(t.get("ltr"), "rtl");
        assert_eq!(t.get("nw"), "ne");
        assert_eq!(t.get("e"), "w");
        assert_eq!(t.get("lr"), "rl");
        assert_eq!(t.get("nesw-resize"), "nwse-resize");
        // No quarter turn: axis words stay.
        assert_eq!(t.get("width"), "width");
        assert_eq!(t.get("ns"), "ns");
    }

    #[test]
    fn test_quarter_turn_table() {
        let t = table(WritingDirection::LR_TB, WritingDirection::TB_RL);
        assert_eq!(t.get("top"), "right");
        assert_eq!(t.get("left"), "top");
        assert_eq!(t.get("width"), "height");
        assert_eq!(t.get("horizontal"), "vertical");
        assert_eq!(t.get("tb"), "rl");
        assert_eq!(t.get("ns"), "ew");
        assert_eq!(t.get("nw"), "ne");
        assert_eq!(t.get("text"), "vertical-text");
        assert_eq!(t.get("x"), "y");
        assert_eq!(t.get("ltr"), "ltr");
    }

    #[test]
    fn test_case_handling_and_fallback() {
        let t = table(WritingDirection::LR_TB, WritingDirection::RL_TB);
        assert_eq!(t.get("LEFT"), "RIGHT");
        assert_eq!(t.get("Left"), "right");
        assert_eq!(t.get("center"), "center");
        assert!(t.side("center").is_none());
        assert_eq!(t.side("left").as_deref(), Some("right"));
    }

    #[test]
    fn test_identity_table_is_empty() {
        let t = table(WritingDirection::TB_RL, WritingDirection::TB_RL);
        assert!(t.is_empty());
    }
}
