//! # BPE Encoder
//!
//! Greedy byte-level BPE, as GPT-2 does it:
//! repeatedly pick the lowest-ranked adjacent symbol pair, merge every
//! non-overlapping occurrence of it in one left-to-right pass, and re-scan
//! until no adjacent pair has a rank.

use std::sync::Arc;

use crate::{
    encoders::{ChunkCache, EncodeResult},
    errors::{TCResult, TokenCostError},
    pretokenize::Pretokenizer,
    types::{SymbolId, TokenType},
    vocab::{VocabularyTable, size_hints::est_token_capacity},
};

/// Byte-level BPE encoder over a shared [`VocabularyTable`].
///
/// Holds no per-call state; callers supply the scratch buffer.
#[derive(Clone, Debug)]
pub struct BpeEncoder<T: TokenType> {
    vocab: Arc<VocabularyTable<T>>,
    cache: Option<Arc<ChunkCache<T>>>,
}

impl<T: TokenType> BpeEncoder<T> {
    /// Create an encoder.
    ///
    /// ## Arguments
    /// * `vocab` - the shared vocabulary.
    /// * `cache` - an optional chunk cache; may be shared with other encoders
    ///   over the same vocabulary.
    pub fn new(
        vocab: Arc<VocabularyTable<T>>,
        cache: Option<Arc<ChunkCache<T>>>,
    ) -> Self {
        Self { vocab, cache }
    }

    /// Get the vocabulary.
    pub fn vocab(&self) -> &Arc<VocabularyTable<T>> {
        &self.vocab
    }

    /// Get the chunk cache, if any.
    pub fn cache(&self) -> Option<&Arc<ChunkCache<T>>> {
        self.cache.as_ref()
    }

    /// Run the merge loop over a symbol buffer, in place.
    pub fn merge_symbols(
        &self,
        symbols: &mut Vec<SymbolId>,
    ) {
        while symbols.len() >= 2 {
            // Find the lowest ranked merge available.
            let Some((pair, target)) = symbols
                .windows(2)
                .filter_map(|w| {
                    let pair = (w[0], w[1]);
                    self.vocab.lookup_merge(&pair).map(|target| (pair, target))
                })
                .min_by_key(|(_, target)| target.rank)
            else {
                break;
            };

            // Merge every occurrence of the pair, left to right.
            let len = symbols.len();
            let mut read = 0;
            let mut write = 0;
            while read < len {
                if read + 1 < len && (symbols[read], symbols[read + 1]) == pair {
                    symbols[write] = target.symbol;
                    read += 2;
                } else {
                    symbols[write] = symbols[read];
                    read += 1;
                }
                write += 1;
            }
            symbols.truncate(write);
        }
    }

    /// Encode one chunk, bypassing the cache.
    ///
    /// ## Arguments
    /// * `chunk` - the chunk text.
    /// * `scratch` - working memory; cleared before use.
    /// * `out` - the result to append to; untouched on error.
    ///
    /// ## Returns
    /// `VocabularyMismatch` if a merged symbol has no token id.
    pub fn encode_chunk_uncached(
        &self,
        chunk: &str,
        scratch: &mut Vec<SymbolId>,
        out: &mut EncodeResult<T>,
    ) -> TCResult<()> {
        scratch.clear();
        self.vocab.append_byte_symbol_ids(chunk.as_bytes(), scratch);
        self.merge_symbols(scratch);

        let byte_table = self.vocab.byte_table();
        let mut encoded = EncodeResult::with_capacity(scratch.len());
        let mut buf = Vec::new();
        for &symbol in scratch.iter() {
            let symbols = self.vocab.symbol(symbol);
            let Some(id) = self.vocab.symbol_token(symbol) else {
                return Err(TokenCostError::VocabularyMismatch {
                    symbol: symbols.to_string(),
                });
            };

            buf.clear();
            byte_table.append_bytes(symbols, &mut buf)?;
            encoded.push(id, String::from_utf8_lossy(&buf).into_owned());
        }

        out.extend_from(&encoded);
        Ok(())
    }

    /// Encode one chunk, consulting the cache first.
    ///
    /// ## Arguments
    /// * `chunk` - the chunk text.
    /// * `scratch` - working memory; cleared before use.
    /// * `out` - the result to append to; untouched on error.
    pub fn encode_chunk_append(
        &self,
        chunk: &str,
        scratch: &mut Vec<SymbolId>,
        out: &mut EncodeResult<T>,
    ) -> TCResult<()> {
        let Some(cache) = &self.cache else {
            return self.encode_chunk_uncached(chunk, scratch, out);
        };

        if let Some(hit) = cache.get(chunk) {
            out.extend_from(&hit);
            return Ok(());
        }

        let mut encoded = EncodeResult::with_capacity(chunk.len());
        self.encode_chunk_uncached(chunk, scratch, &mut encoded)?;
        out.extend_from(&encoded);
        cache.insert(chunk, Arc::new(encoded));

        Ok(())
    }

    /// Encode a text, chunk by chunk, appending to `out`.
    ///
    /// On error, `out` holds the tokens of the chunks before the failing one.
    pub fn encode_append(
        &self,
        pretokenizer: &Pretokenizer,
        text: &str,
        scratch: &mut Vec<SymbolId>,
        out: &mut EncodeResult<T>,
    ) -> TCResult<()> {
        pretokenizer.try_for_each_chunk(text, |chunk| self.encode_chunk_append(chunk, scratch, out))
    }

    /// Encode a text.
    pub fn try_encode(
        &self,
        pretokenizer: &Pretokenizer,
        text: &str,
        scratch: &mut Vec<SymbolId>,
    ) -> TCResult<EncodeResult<T>> {
        let mut out = EncodeResult::with_capacity(est_token_capacity(text.len()));
        self.encode_append(pretokenizer, text, scratch, &mut out)?;
        Ok(out)
    }
}
