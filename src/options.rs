//! Transform options.

use crate::orientation::WritingDirection;

/// Options controlling a [`transform`](crate::transform) call.
///
/// ```
/// use cssflip::{Options, WritingDirection};
///
/// let options = Options::default()
///     .with_target_dir(WritingDirection::TB_RL)
///     .with_dir_in_url(true);
/// assert_eq!(options.source_dir, WritingDirection::LR_TB);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(default, rename_all = "camelCase", deny_unknown_fields)
)]
pub struct Options {
    /// Swap `ltr`/`rtl` inside `url(...)`.
    pub transform_dir_in_url: bool,
    /// Swap side names inside `url(...)`.
    pub transform_edge_in_url: bool,
    pub source_dir: WritingDirection,
    pub target_dir: WritingDirection,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            transform_dir_in_url: false,
            transform_edge_in_url: false,
            source_dir: WritingDirection::LR_TB,
            target_dir: WritingDirection::RL_TB,
        }
    }
}

impl Options {
    pub fn with_source_dir(mut self, dir: WritingDirection) -> Self {
        self.source_dir = dir;
        self
    }

    pub fn with_target_dir(mut self, dir: WritingDirection) -> Self {
        self.target_dir = dir;
        self
    }

    pub fn with_dir_in_url(mut self, enabled: bool) -> Self {
        self.transform_dir_in_url = enabled;
        self
    }

    pub fn with_edge_in_url(mut self, enabled: bool) -> Self {
        self.transform_edge_in_url = enabled;
        self
    }

    /// Parse options from camelCase JSON, e.g. `{"targetDir": "tb-rl"}`.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> crate::Result<Self> {
        serde_json::from_str(json).map_err(|e| crate::Error::Options(e.to_string()))
    }
}

/// Positional form: the flag swaps `ltr`/`rtl` in URLs.
impl From<bool> for Options {
    fn from(transform_dir_in_url: bool) -> Self {
        Self {
            transform_dir_in_url,
            ..Self::default()
        }
    }
}

/// Positional form: direction-in-URL and edge-in-URL flags.
impl From<(bool, bool)> for Options {
    fn from((transform_dir_in_url, transform_edge_in_url): (bool, bool)) -> Self {
        Self {
            transform_dir_in_url,
            transform_edge_in_url,
            ..Self::default()
        }
    }
}
