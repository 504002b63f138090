//! # Split Patterns

use crate::{join_patterns, regex::ConstRegexWrapperPattern};

/// The GPT-2 / GPT-3 ("`r50k_base`") split pattern.
///
/// Requires `fancy_regex` for the ``\s+(?!\S)`` lookahead, which leaves the last
/// whitespace char of a run to prefix the following word.
pub const GPT2_PATTERN: ConstRegexWrapperPattern = ConstRegexWrapperPattern::Fancy(join_patterns!(
    r"'s",
    r"'t",
    r"'re",
    r"'ve",
    r"'m",
    r"'ll",
    r"'d",
    r" ?\p{L}+",
    r" ?\p{N}+",
    r" ?[^\s\p{L}\p{N}]+",
    r"\s+(?!\S)",
    r"\s+",
));
