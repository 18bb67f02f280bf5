//! # cssflip
//!
//! Rewrites CSS written for one writing direction so that it is correct for
//! another: left-to-right to right-to-left, or horizontal to one of the
//! vertical writing modes.
//!
//! ## Features
//!
//! - Mirrors sides, corners, cursors, shorthands, shadows, positions,
//!   gradients and transforms
//! - Rotates between horizontal and vertical writing modes, swapping axes
//!   (`width` ↔ `height`, media features, `background-size`, ...)
//! - Leaves everything it does not recognize byte-identical
//! - Honours `/* @noflip */` before a declaration or a rule
//!
//! ## Quick Start
//!
//! ```
//! use cssflip::{Options, transform};
//!
//! let css = ".nav { float: left; padding: 1px 2px 3px 4px; }";
//! let flipped = transform(css, &Options::default());
//! assert_eq!(flipped, ".nav { float: right; padding: 1px 4px 3px 2px; }");
//! ```
//!
//! ## Vertical writing modes
//!
//! ```
//! use cssflip::{Options, WritingDirection, transform};
//!
//! let options = Options::default().with_target_dir(WritingDirection::TB_RL);
//! assert_eq!(transform("width: 10px", &options), "height: 10px");
//! ```

pub mod error;
pub mod options;
pub mod orientation;
pub(crate) mod patterns;
pub mod rewrite;
pub mod swap;
pub mod tokenize;
pub mod util;
pub mod value;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::{Error, Result};
pub use options::Options;
pub use orientation::{Axis, Corner, Side, TransformDescriptor, WritingDirection};
pub use util::decode_stylesheet;

use rewrite::Context;
use swap::TextSwap;
use tokenize::{
    COMMENT, CalcTokenizer, NOFLIP_CLASS, NOFLIP_SINGLE, Tokenizer, escape_backticks,
    find_comment, find_noflip_declaration, find_noflip_rule,
};

/// Transform a stylesheet from `options.source_dir` to `options.target_dir`.
///
/// Never fails: anything that is not recognized is passed through
/// unchanged. Equal source and target directions return the input as is.
pub fn transform(css: &str, options: &Options) -> String {
    let desc = TransformDescriptor::solve(options.source_dir, options.target_dir);
    if desc.is_identity() {
        log::debug!("{} -> {} is the identity, skipping", options.source_dir, options.target_dir);
        return css.to_string();
    }
    let swap = TextSwap::new(&desc);
    let ctx = Context::new(&desc, &swap, options);

    let css = escape_backticks(css);

    let mut noflip_single = Tokenizer::new(NOFLIP_SINGLE);
    let text = noflip_single.tokenize(&css, find_noflip_declaration);
    let mut noflip_class = Tokenizer::new(NOFLIP_CLASS);
    let text = noflip_class.tokenize(&text, find_noflip_rule);
    let mut comments = Tokenizer::new(COMMENT);
    let text = comments.tokenize(&text, find_comment);
    let mut calc = CalcTokenizer::new();
    let text = calc.tokenize(&text);
    log::debug!(
        "protected {} noflip declarations, {} noflip rules, {} comments, {} calc() expressions",
        noflip_single.len(),
        noflip_class.len(),
        comments.len(),
        calc.len()
    );

    let text = rewrite::rewrite(&text, &ctx);

    let text = calc.detokenize(&text);
    let text = comments.detokenize(&text);
    let text = noflip_class.detokenize(&text);
    noflip_single.detokenize(&text)
}
