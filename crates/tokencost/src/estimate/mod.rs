//! # Token Estimation
//!
//! A cheap approximation of the token count, for callers that need a figure
//! without a vocabulary: segment the text into words, then scale by an
//! expected tokens/word ratio.
//!
//! Not a substitute for [`crate::tokenizer::Tokenizer::count_tokens`].

pub mod word_count;

#[doc(inline)]
pub use word_count::{WORD_PATTERN, WordCountEstimator};
