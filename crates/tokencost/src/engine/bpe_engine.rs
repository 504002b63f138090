//! # BPE Engine

use std::sync::Arc;

use crate::{
    decoders::{BpeDecoder, TokenDecoder},
    encoders::{BpeEncoder, ChunkCache, EncodeResult},
    errors::TCResult,
    pretokenize::Pretokenizer,
    regex::RegexWrapperPattern,
    types::{SymbolId, TokenType},
    vocab::VocabularyTable,
};

/// One encode/decode worker.
///
/// Mutating calls take `&mut self`: the scratch buffer is private to the engine.
#[derive(Debug)]
pub struct BpeEngine<T: TokenType> {
    pretokenizer: Pretokenizer,
    encoder: BpeEncoder<T>,
    decoder: BpeDecoder<T>,
    scratch: Vec<SymbolId>,
}

impl<T: TokenType> BpeEngine<T> {
    /// Build an engine, compiling its own copy of the split pattern.
    ///
    /// ## Arguments
    /// * `vocab` - the shared vocabulary.
    /// * `pattern` - the pretokenizer split pattern.
    /// * `cache` - the shared chunk cache, if any.
    pub fn new(
        vocab: Arc<VocabularyTable<T>>,
        pattern: &RegexWrapperPattern,
        cache: Option<Arc<ChunkCache<T>>>,
    ) -> TCResult<Self> {
        let pretokenizer = Pretokenizer::from_pattern(pattern.clone())?;
        Ok(Self::from_parts(
            pretokenizer,
            BpeEncoder::new(vocab.clone(), cache),
            BpeDecoder::new(vocab),
        ))
    }

    /// Assemble an engine from its parts.
    pub fn from_parts(
        pretokenizer: Pretokenizer,
        encoder: BpeEncoder<T>,
        decoder: BpeDecoder<T>,
    ) -> Self {
        Self {
            pretokenizer,
            encoder,
            decoder,
            scratch: Vec::with_capacity(64),
        }
    }

    /// Get the pretokenizer.
    pub fn pretokenizer(&self) -> &Pretokenizer {
        &self.pretokenizer
    }

    /// Get the encoder.
    pub fn encoder(&self) -> &BpeEncoder<T> {
        &self.encoder
    }

    /// Get the decoder.
    pub fn decoder(&self) -> &BpeDecoder<T> {
        &self.decoder
    }

    /// Encode text.
    pub fn encode(
        &mut self,
        text: &str,
    ) -> TCResult<EncodeResult<T>> {
        self.encoder
            .try_encode(&self.pretokenizer, text, &mut self.scratch)
    }

    /// Count the tokens of a text.
    pub fn count_tokens(
        &mut self,
        text: &str,
    ) -> TCResult<usize> {
        self.encode(text).map(|result| result.len())
    }

    /// Decode tokens into bytes.
    pub fn decode_to_bytes(
        &self,
        tokens: &[T],
    ) -> TCResult<Vec<u8>> {
        self.decoder.try_decode_to_bytes(tokens)
    }

    /// Decode tokens into a string; invalid UTF-8 is replaced with `U+FFFD`.
    pub fn decode(
        &self,
        tokens: &[T],
    ) -> TCResult<String> {
        self.decoder.try_decode_to_string(tokens)
    }
}
