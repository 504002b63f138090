//! # BPE Decoder

use std::sync::Arc;

use crate::{
    decoders::TokenDecoder,
    errors::{TCResult, TokenCostError},
    types::TokenType,
    vocab::VocabularyTable,
};

/// A [`TokenDecoder`] over a shared [`VocabularyTable`].
///
/// Each id maps to its token string; the strings are concatenated and
/// inverted through the byte table.
#[derive(Clone, Debug)]
pub struct BpeDecoder<T: TokenType> {
    vocab: Arc<VocabularyTable<T>>,
}

impl<T: TokenType> BpeDecoder<T> {
    /// Create a decoder.
    pub fn new(vocab: Arc<VocabularyTable<T>>) -> Self {
        Self { vocab }
    }

    /// Get the vocabulary.
    pub fn vocab(&self) -> &Arc<VocabularyTable<T>> {
        &self.vocab
    }

    /// Decode tokens, appending to a target buffer.
    ///
    /// On error, `buf` holds the bytes of the tokens before the failing one.
    pub fn decode_append(
        &self,
        tokens: &[T],
        buf: &mut Vec<u8>,
    ) -> TCResult<()> {
        let byte_table = self.vocab.byte_table();
        for &token in tokens {
            let Some(symbols) = self.vocab.token_string(token) else {
                return Err(TokenCostError::UnknownTokenId {
                    id: token.to_u64().unwrap_or(u64::MAX),
                });
            };
            byte_table.append_bytes(symbols, buf)?;
        }
        Ok(())
    }
}

impl<T: TokenType> TokenDecoder<T> for BpeDecoder<T> {
    fn try_decode_to_bytes(
        &self,
        tokens: &[T],
    ) -> TCResult<Vec<u8>> {
        let mut buf = Vec::with_capacity(tokens.len() * 4);
        self.decode_append(tokens, &mut buf)?;
        Ok(buf)
    }
}
