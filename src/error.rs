//! Error types for cssflip operations.
//!
//! The stylesheet transform itself never fails; these errors come from
//! building [`Options`](crate::Options) and from the command-line shell.

use thiserror::Error;

/// Errors that can occur while configuring a transform or reading input.
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid writing direction {0:?}: expected <inline>-<block> such as lr-tb or tb-rl")]
    InvalidDirection(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "serde")]
    #[error("invalid options: {0}")]
    Options(String),
}

pub type Result<T> = std::result::Result<T, Error>;
