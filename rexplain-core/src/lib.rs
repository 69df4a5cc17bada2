//! Rexplain Core Library
//!
//! Explains regular expressions in plain language and assembles them from
//! building blocks.
//!
//! The explainer turns a pattern into an ordered list of fragments, each
//! with the source text it covers, a sentence describing it, and its nesting
//! depth. The block formatter turns a tree of blocks into a pattern.

/// Logging macros - no-op when logging feature is disabled
#[cfg(not(feature = "logging"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {};
}

/// Logging macros - use log crate when logging feature is enabled
#[cfg(feature = "logging")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

pub mod blocks;
pub mod error;
pub mod explainer;
pub mod flags;
pub mod fragment;
pub mod input;
pub mod quantifier;
pub mod tester;
pub mod validate;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use blocks::{Block, BlockNode, Nesting, blocks_from_json, format_blocks};
pub use error::{ExplainError, Result, Span};
pub use explainer::{Explainer, explain, explain_pattern};
pub use flags::{Flag, explain_flags};
pub use fragment::{Explanation, Fragment, FragmentKind};
pub use input::PatternInput;
pub use quantifier::Quantifier;
pub use tester::{MatchSpan, find_matches};
pub use validate::{is_valid, validate};

/// Explain combined user input, either `/pattern/flags` or a bare pattern
///
/// This is the main entry point for free-form input.
pub fn explain_input(text: &str, separate_flags: &str) -> Result<Explanation> {
    let input = PatternInput::parse(text, separate_flags);
    explain(&input.pattern, &input.flags)
}
