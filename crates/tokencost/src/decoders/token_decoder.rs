//! # Token Decoder Trait

use crate::{errors::TCResult, types::TokenType};

/// Convert decoded bytes to a `String`, replacing invalid UTF-8 with `U+FFFD`.
///
/// Valid input is moved, not copied.
pub fn string_from_utf8_lossy(buf: Vec<u8>) -> String {
    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(err) => String::from_utf8_lossy(err.as_bytes()).into_owned(),
    }
}

/// Trait for token decoders.
pub trait TokenDecoder<T: TokenType>: Send + Sync {
    /// Decodes tokens into bytes.
    ///
    /// ## Arguments
    /// * `tokens` - A slice of tokens to decode.
    ///
    /// ## Returns
    /// The decoded bytes, or `UnknownTokenId` for the first unknown token.
    fn try_decode_to_bytes(
        &self,
        tokens: &[T],
    ) -> TCResult<Vec<u8>>;

    /// Decodes a batch of tokens into bytes.
    fn try_decode_batch_to_bytes(
        &self,
        batch: &[&[T]],
    ) -> TCResult<Vec<Vec<u8>>> {
        batch
            .iter()
            .map(|tokens| self.try_decode_to_bytes(tokens))
            .collect()
    }

    /// Decodes tokens into a string.
    ///
    /// UTF-8 lossy decoding is used to handle invalid UTF-8 sequences;
    /// a token sequence that splits a multi-byte char decodes to `U+FFFD`.
    fn try_decode_to_string(
        &self,
        tokens: &[T],
    ) -> TCResult<String> {
        self.try_decode_to_bytes(tokens).map(string_from_utf8_lossy)
    }

    /// Decodes a batch of tokens into strings.
    ///
    /// UTF-8 lossy decoding is used to handle invalid UTF-8 sequences.
    fn try_decode_batch_to_strings(
        &self,
        batch: &[&[T]],
    ) -> TCResult<Vec<String>> {
        batch
            .iter()
            .map(|tokens| self.try_decode_to_string(tokens))
            .collect()
    }
}
