//! # Common Statistics

/// Expected bytes/token ratio for English-like text.
pub const EXPECTED_BYTES_PER_TOKEN: f32 = 4.0;

/// Expected tokens/word ratio for English-like text.
pub const EXPECTED_TOKENS_PER_WORD: f32 = 1.3;

/// Estimate the token count of `len` bytes of text.
///
/// Used to size output buffers; never used as a count.
pub fn est_token_capacity(len: usize) -> usize {
    (len as f32 / EXPECTED_BYTES_PER_TOKEN) as usize + 1
}
