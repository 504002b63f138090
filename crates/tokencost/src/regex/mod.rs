//! # Regex Utilities
//!
//! The GPT-2 split pattern uses a negative lookahead (``\s+(?!\S)``), which requires
//! the extended machinery of the [`fancy_regex`] crate; custom patterns frequently
//! don't, and run faster under the standard [`regex`] crate.
//!
//! * Labeling Patterns - [`RegexWrapperPattern`]
//!   * [`RegexWrapperPattern::Basic`] - a pattern which was written for [`regex`].
//!   * [`RegexWrapperPattern::Fancy`] - a pattern which was written for [`fancy_regex`].
//!   * [`RegexWrapperPattern::Adaptive`] - unknown target, try basic; then fall-up to fancy.
//! * Wrapping Compiled Regex - [`RegexWrapper`]
//!
//! The [`RegexWrapper`] type supports only one operation, ``find_iter()``, which yields
//! byte ranges for either backend; a `fancy_regex` runtime failure (see
//! [`regex_wrapper::FANCY_BACKTRACK_LIMIT`]) is yielded as an error.

pub mod pattern_tools;
pub mod regex_wrapper;

#[doc(inline)]
pub use regex_wrapper::{
    ConstRegexWrapperPattern,
    MatchesWrapper,
    RegexWrapper,
    RegexWrapperPattern,
};
