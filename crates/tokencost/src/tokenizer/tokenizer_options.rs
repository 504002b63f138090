use core::num::NonZeroUsize;
use std::{env, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::{
    concurrency::threads::env_nonzero_usize,
    errors::TCResult,
    pretokenize::GPT2_PATTERN,
    regex::RegexWrapperPattern,
    tokenizer::Tokenizer,
    types::TokenType,
    vocab::VocabularyTable,
};

/// Default total chunk-cache entries.
pub const DEFAULT_CACHE_CAPACITY: usize = 4096;

/// Environment override for [`TokenizerOptions::cache_capacity`].
pub const CACHE_CAPACITY_ENV: &str = "TOKENCOST_CACHE_CAPACITY";

/// Environment override for [`TokenizerOptions::max_pool`].
pub const MAX_POOL_ENV: &str = "TOKENCOST_MAX_POOL";

/// Options for configuring a [`Tokenizer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerOptions {
    /// Pretokenizer split pattern; `None` selects [`GPT2_PATTERN`].
    pub pattern: Option<String>,

    /// Total chunk-cache entries; `0` disables the cache.
    pub cache_capacity: usize,

    /// Chunk-cache shard count; `None` uses the resolved pool size.
    pub cache_shards: Option<NonZeroUsize>,

    /// Cap on idle engines, see [`crate::concurrency::resolve_max_pool`].
    pub max_pool: Option<NonZeroUsize>,
}

impl Default for TokenizerOptions {
    fn default() -> Self {
        Self {
            pattern: None,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            cache_shards: None,
            max_pool: None,
        }
    }
}

impl TokenizerOptions {
    /// Defaults, overridden by [`CACHE_CAPACITY_ENV`] and [`MAX_POOL_ENV`].
    ///
    /// Unparsable values are ignored.
    pub fn from_env() -> Self {
        let mut options = Self::default();

        if let Some(capacity) = env::var(CACHE_CAPACITY_ENV)
            .ok()
            .and_then(|s| s.trim().parse::<usize>().ok())
        {
            options.cache_capacity = capacity;
        }

        if let Some(max_pool) = env_nonzero_usize(MAX_POOL_ENV) {
            options.max_pool = Some(max_pool);
        }

        options
    }

    /// The effective split pattern.
    ///
    /// A custom pattern is compiled with `regex` when possible, else `fancy_regex`.
    pub fn split_pattern(&self) -> RegexWrapperPattern {
        match &self.pattern {
            Some(pattern) => RegexWrapperPattern::Adaptive(pattern.clone()),
            None => GPT2_PATTERN.to_pattern(),
        }
    }

    /// Sets the split pattern.
    pub fn with_pattern<S: Into<String>>(
        mut self,
        pattern: S,
    ) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Sets the chunk-cache capacity; `0` disables the cache.
    pub fn with_cache_capacity(
        mut self,
        cache_capacity: usize,
    ) -> Self {
        self.cache_capacity = cache_capacity;
        self
    }

    /// Sets the chunk-cache shard count.
    pub fn with_cache_shards(
        mut self,
        cache_shards: Option<NonZeroUsize>,
    ) -> Self {
        self.cache_shards = cache_shards;
        self
    }

    /// Sets the idle engine cap.
    pub fn with_max_pool(
        mut self,
        max_pool: Option<NonZeroUsize>,
    ) -> Self {
        self.max_pool = max_pool;
        self
    }

    /// Build a [`Tokenizer`] for the given vocab.
    ///
    /// The split pattern is compiled once up front, so a bad pattern
    /// fails here rather than on first use.
    pub fn build<T, V>(
        &self,
        vocab: V,
    ) -> TCResult<Arc<Tokenizer<T>>>
    where
        T: TokenType,
        V: Into<Arc<VocabularyTable<T>>>,
    {
        self.split_pattern().compile()?;
        Ok(Arc::new(Tokenizer::new(vocab.into(), self.clone())))
    }
}
