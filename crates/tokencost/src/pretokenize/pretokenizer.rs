//! # Pretokenizer

use core::ops::Range;

use crate::{
    errors::TCResult,
    pretokenize::GPT2_PATTERN,
    regex::{RegexWrapper, RegexWrapperPattern},
    vocab::size_hints::EXPECTED_BYTES_PER_TOKEN,
};

/// Chunk reference for [`Pretokenizer`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ChunkSpan {
    /// A pattern match.
    Word(Range<usize>),

    /// Text between (or after) pattern matches.
    Gap(Range<usize>),
}

impl From<ChunkSpan> for Range<usize> {
    fn from(span: ChunkSpan) -> Self {
        match span {
            ChunkSpan::Word(range) => range,
            ChunkSpan::Gap(range) => range,
        }
    }
}

/// Pattern-driven text splitter.
///
/// Each instance owns its compiled regex; engines never share one.
#[derive(Debug, Clone)]
pub struct Pretokenizer {
    regex: RegexWrapper,
}

impl Pretokenizer {
    /// Build a pretokenizer over [`GPT2_PATTERN`].
    pub fn gpt2() -> TCResult<Self> {
        Self::from_pattern(GPT2_PATTERN)
    }

    /// Compile a pretokenizer from a pattern.
    pub fn from_pattern<P>(pattern: P) -> TCResult<Self>
    where
        P: Into<RegexWrapperPattern>,
    {
        Ok(Self::from_regex(pattern.into().compile()?))
    }

    /// Wrap an already compiled regex.
    pub fn from_regex(regex: RegexWrapper) -> Self {
        Self { regex }
    }

    /// Get the split regex.
    pub fn regex(&self) -> &RegexWrapper {
        &self.regex
    }

    /// Iterate over all [`ChunkSpan`]s in the text, in order.
    ///
    /// # Arguments
    /// * `text` - the text to split.
    /// * `f` - the function to apply to each span;
    ///   halts when the function returns `false`.
    ///
    /// # Returns
    /// `true` if every span was accepted; [`crate::errors::TokenCostError::Regex`] if
    /// matching failed, after the spans before the failure were emitted.
    pub fn for_each_span<F>(
        &self,
        text: &str,
        f: &mut F,
    ) -> TCResult<bool>
    where
        F: FnMut(ChunkSpan) -> bool,
    {
        let mut last = 0;
        for range in self.regex.find_iter(text) {
            let range = range?;
            let Range { start, end } = range;
            if start == end {
                continue;
            }

            if last < start && !f(ChunkSpan::Gap(last..start)) {
                return Ok(false);
            }

            if !f(ChunkSpan::Word(range)) {
                return Ok(false);
            }
            last = end;
        }

        if last < text.len() && !f(ChunkSpan::Gap(last..text.len())) {
            return Ok(false);
        }

        Ok(true)
    }

    /// Apply a fallible function to each chunk, in order.
    ///
    /// Stops at the first error.
    pub fn try_for_each_chunk<'a, F>(
        &self,
        text: &'a str,
        mut f: F,
    ) -> TCResult<()>
    where
        F: FnMut(&'a str) -> TCResult<()>,
    {
        let mut result = Ok(());
        self.for_each_span(text, &mut |span| {
            match f(&text[Range::<usize>::from(span)]) {
                Ok(()) => true,
                Err(err) => {
                    result = Err(err);
                    false
                }
            }
        })?;
        result
    }

    /// Split text into spans.
    pub fn split_spans(
        &self,
        text: &str,
    ) -> TCResult<Vec<ChunkSpan>> {
        let capacity = text.len() as f32 / (EXPECTED_BYTES_PER_TOKEN * 0.8);
        let mut spans = Vec::with_capacity(capacity as usize);

        self.for_each_span(text, &mut |span| {
            spans.push(span);
            true
        })?;

        Ok(spans)
    }

    /// Split text into chunks.
    ///
    /// The chunks concatenate to `text`; empty text yields no chunks.
    pub fn split<'a>(
        &self,
        text: &'a str,
    ) -> TCResult<Vec<&'a str>> {
        Ok(self
            .split_spans(text)?
            .into_iter()
            .map(|span| &text[Range::<usize>::from(span)])
            .collect())
    }
}
