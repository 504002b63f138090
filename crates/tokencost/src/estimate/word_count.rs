//! # Word Count Estimator

use crate::{
    errors::{TCResult, TokenCostError},
    join_patterns,
    vocab::size_hints::EXPECTED_TOKENS_PER_WORD,
};

/// Language-agnostic word pattern.
///
/// * each CJK ideograph, kana, or hangul syllable is a word;
/// * a run of letters, marks and digits is a word, and may be joined by
///   ``'``, ``’`` or ``.`` (``it's``, ``3.14``);
/// * any other non-space char is a word.
///
/// A `regex` crate pattern; matching it cannot fail.
pub const WORD_PATTERN: &str = join_patterns!(
    r"[\p{Hani}\p{Hira}\p{Kana}\p{Hang}]",
    "[[\\pL\\pM\\pN]--[\\p{Hani}\\p{Hira}\\p{Kana}\\p{Hang}]]+\
     (?:['’.][[\\pL\\pM\\pN]--[\\p{Hani}\\p{Hira}\\p{Kana}\\p{Hang}]]+)*",
    r"\S",
);

/// Estimates token counts from word counts.
#[derive(Debug, Clone)]
pub struct WordCountEstimator {
    regex: regex::Regex,
    tokens_per_word: f32,
}

impl WordCountEstimator {
    /// Create an estimator with [`EXPECTED_TOKENS_PER_WORD`].
    pub fn new() -> TCResult<Self> {
        Ok(Self {
            regex: regex::Regex::new(WORD_PATTERN)
                .map_err(|err| TokenCostError::Regex(format!("{WORD_PATTERN:?}: {err}")))?,
            tokens_per_word: EXPECTED_TOKENS_PER_WORD,
        })
    }

    /// Sets the tokens/word ratio.
    pub fn with_tokens_per_word(
        mut self,
        tokens_per_word: f32,
    ) -> Self {
        self.tokens_per_word = tokens_per_word;
        self
    }

    /// Get the tokens/word ratio.
    pub fn tokens_per_word(&self) -> f32 {
        self.tokens_per_word
    }

    /// Split text into words; whitespace is dropped.
    pub fn split_words<'a>(
        &self,
        text: &'a str,
    ) -> Vec<&'a str> {
        self.regex.find_iter(text).map(|m| m.as_str()).collect()
    }

    /// Count the words of a text.
    pub fn count_words(
        &self,
        text: &str,
    ) -> usize {
        self.regex.find_iter(text).count()
    }

    /// Estimate the token count of a text: ``ceil(words * tokens_per_word)``.
    pub fn estimate_tokens(
        &self,
        text: &str,
    ) -> usize {
        (self.count_words(text) as f32 * self.tokens_per_word).ceil() as usize
    }
}
