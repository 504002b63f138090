//! # Combined Tokenizer

use core::{fmt::Debug, num::NonZeroUsize};
use std::{sync::Arc, thread};

use crate::{
    concurrency::resolve_max_pool,
    encoders::{ChunkCache, EncodeResult},
    engine::{BpeEngine, EngineHandle, EnginePool, PoolStats},
    errors::{TCResult, TokenCostError},
    tokenizer::TokenizerOptions,
    types::TokenType,
    vocab::VocabularyTable,
};

/// Text used by [`Tokenizer::verify`].
pub const VERIFY_SAMPLE: &str = "Hello world! It's 2023:\n\tnaïve café, 東京 🎉";

/// GPT-style byte-level BPE tokenizer.
///
/// Combines:
///  * a shared [`VocabularyTable`],
///  * a shared [`ChunkCache`] (unless disabled), and
///  * an [`EnginePool`] of [`BpeEngine`]s, one per concurrent call.
pub struct Tokenizer<T: TokenType> {
    vocab: Arc<VocabularyTable<T>>,
    options: TokenizerOptions,
    cache: Option<Arc<ChunkCache<T>>>,
    pool: EnginePool<T>,
}

impl<T: TokenType> Debug for Tokenizer<T> {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("Tokenizer")
            .field("vocab", &self.vocab)
            .field("options", &self.options)
            .field("cache", &self.cache)
            .field("pool", &self.pool)
            .finish()
    }
}

impl<T: TokenType> Tokenizer<T> {
    /// Create a new tokenizer.
    ///
    /// Engines are built lazily; a split pattern that fails to compile
    /// surfaces as [`TokenCostError::EngineInitFailed`] on use.
    /// See [`TokenizerOptions::build`] for the eager variant.
    pub fn new(
        vocab: Arc<VocabularyTable<T>>,
        options: TokenizerOptions,
    ) -> Self {
        let max_pool = resolve_max_pool(options.max_pool);
        let default_shards = NonZeroUsize::new(max_pool).unwrap_or(NonZeroUsize::MIN);

        let cache = NonZeroUsize::new(options.cache_capacity).map(|capacity| {
            Arc::new(ChunkCache::new(
                capacity,
                options.cache_shards.unwrap_or(default_shards),
            ))
        });

        let pool = {
            let vocab = vocab.clone();
            let cache = cache.clone();
            let pattern = options.split_pattern();
            EnginePool::new(
                move || BpeEngine::new(vocab.clone(), &pattern, cache.clone()),
                max_pool,
            )
        };

        Self {
            vocab,
            options,
            cache,
            pool,
        }
    }

    /// Get the underlying vocabulary.
    pub fn vocab(&self) -> &Arc<VocabularyTable<T>> {
        &self.vocab
    }

    /// Get the options this tokenizer was built with.
    pub fn options(&self) -> &TokenizerOptions {
        &self.options
    }

    /// Get the chunk cache, if enabled.
    pub fn cache(&self) -> Option<&Arc<ChunkCache<T>>> {
        self.cache.as_ref()
    }

    /// Get the engine pool.
    pub fn pool(&self) -> &EnginePool<T> {
        &self.pool
    }

    /// Snapshot the engine pool counters.
    pub fn pool_stats(&self) -> PoolStats {
        self.pool.stats()
    }

    /// Draw an engine handle, for callers running many operations in a row.
    pub fn acquire(&self) -> EngineHandle<'_, T> {
        self.pool.acquire()
    }

    /// Encode text into ids and token strings.
    pub fn encode(
        &self,
        text: &str,
    ) -> TCResult<EncodeResult<T>> {
        self.acquire().encode(text)
    }

    /// Count the tokens of a text.
    pub fn try_count_tokens(
        &self,
        text: &str,
    ) -> TCResult<usize> {
        self.acquire().count_tokens(text)
    }

    /// Count the tokens of a text; best effort.
    ///
    /// On failure the error is logged and `0` is returned;
    /// use [`Self::try_count_tokens`] to observe it.
    pub fn count_tokens(
        &self,
        text: &str,
    ) -> usize {
        match self.try_count_tokens(text) {
            Ok(count) => count,
            Err(err) => {
                log::error!("token count failed, reporting 0: {err}");
                0
            }
        }
    }

    /// Decode ids into bytes.
    pub fn decode_to_bytes(
        &self,
        tokens: &[T],
    ) -> TCResult<Vec<u8>> {
        self.acquire().decode_to_bytes(tokens)
    }

    /// Decode ids into text; invalid UTF-8 is replaced with `U+FFFD`.
    pub fn decode(
        &self,
        tokens: &[T],
    ) -> TCResult<String> {
        self.acquire().decode(tokens)
    }

    /// Encode text.
    ///
    /// ## Panics
    /// Panics if encoding fails.
    pub fn must_encode(
        &self,
        text: &str,
    ) -> EncodeResult<T> {
        self.encode(text)
            .unwrap_or_else(|err| panic!("encode failed: {err}"))
    }

    /// Decode ids into text.
    ///
    /// ## Panics
    /// Panics if decoding fails.
    pub fn must_decode(
        &self,
        tokens: &[T],
    ) -> String {
        self.decode(tokens)
            .unwrap_or_else(|err| panic!("decode failed: {err}"))
    }

    /// Count the tokens of a text.
    ///
    /// ## Panics
    /// Panics if encoding fails.
    pub fn must_count_tokens(
        &self,
        text: &str,
    ) -> usize {
        self.try_count_tokens(text)
            .unwrap_or_else(|err| panic!("token count failed: {err}"))
    }

    /// Encode a batch of texts.
    ///
    /// Runs in parallel under the `rayon` feature; each worker holds one engine.
    pub fn encode_batch<S>(
        &self,
        batch: &[S],
    ) -> TCResult<Vec<EncodeResult<T>>>
    where
        S: AsRef<str> + Sync,
    {
        #[cfg(feature = "rayon")]
        let results = {
            use rayon::prelude::*;
            batch
                .par_iter()
                .map_init(|| self.acquire(), |handle, text| handle.encode(text.as_ref()))
                .collect()
        };

        #[cfg(not(feature = "rayon"))]
        let results = {
            let mut handle = self.acquire();
            batch.iter().map(|text| handle.encode(text.as_ref())).collect()
        };

        results
    }

    /// Decode a batch of id sequences.
    ///
    /// Runs in parallel under the `rayon` feature.
    pub fn decode_batch(
        &self,
        batch: &[&[T]],
    ) -> TCResult<Vec<String>> {
        #[cfg(feature = "rayon")]
        let results = {
            use rayon::prelude::*;
            batch
                .par_iter()
                .map_init(|| self.acquire(), |handle, tokens| handle.decode(tokens))
                .collect()
        };

        #[cfg(not(feature = "rayon"))]
        let results = {
            let handle = self.acquire();
            batch.iter().map(|tokens| handle.decode(tokens)).collect()
        };

        results
    }

    /// Check that an engine builds and round-trips [`VERIFY_SAMPLE`].
    pub fn verify(&self) -> TCResult<()> {
        let mut handle = self.acquire();
        let encoded = handle.encode(VERIFY_SAMPLE)?;
        let decoded = handle.decode(&encoded.ids)?;

        if decoded != VERIFY_SAMPLE {
            return Err(verify_mismatch(&decoded));
        }

        log::debug!("verified: {} sample tokens", encoded.len());
        Ok(())
    }

    /// Run [`Self::verify`] on a background thread.
    ///
    /// Also warms the pool with one engine.
    pub fn spawn_verify(self: &Arc<Self>) -> thread::JoinHandle<TCResult<()>> {
        let tokenizer = self.clone();
        thread::spawn(move || {
            let result = tokenizer.verify();
            if let Err(err) = &result {
                log::error!("tokenizer verification failed: {err}");
            }
            result
        })
    }
}

fn verify_mismatch(decoded: &str) -> TokenCostError {
    TokenCostError::VocabConflict(format!(
        "startup verification: sample text {VERIFY_SAMPLE:?} decoded as {decoded:?}"
    ))
}
