//! # Chunk Cache
//!
//! A memo of ``{ chunk text -> encoded chunk }``, shared by every engine of a
//! tokenizer. Entries never go stale: the vocabulary is immutable.

use core::{fmt::Debug, hash::BuildHasher, num::NonZeroUsize};
use std::sync::Arc;

use lru::LruCache;
use parking_lot::Mutex;

use crate::{
    encoders::EncodeResult,
    types::{TCBuildHasher, TokenType},
};

type ChunkShard<T> = LruCache<String, Arc<EncodeResult<T>>, TCBuildHasher>;

/// Sharded LRU cache of encoded chunks.
///
/// Each shard is an independent [`LruCache`] behind its own lock;
/// the shard for a chunk is chosen by hashing the chunk text.
/// Concurrent inserts of the same chunk are allowed; the last write wins.
pub struct ChunkCache<T: TokenType> {
    shards: Vec<Mutex<ChunkShard<T>>>,
    hasher: TCBuildHasher,
    capacity: usize,
}

impl<T: TokenType> Debug for ChunkCache<T> {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("ChunkCache")
            .field("shards", &self.shards.len())
            .field("capacity", &self.capacity)
            .field("len", &self.len())
            .finish()
    }
}

impl<T: TokenType> ChunkCache<T> {
    /// Create a cache.
    ///
    /// ## Arguments
    /// * `capacity` - total entries, split evenly (rounding up) across shards.
    /// * `shards` - the number of shards; clamped to `capacity`.
    pub fn new(
        capacity: NonZeroUsize,
        shards: NonZeroUsize,
    ) -> Self {
        let shard_count = shards.min(capacity);
        let per_shard = capacity.get().div_ceil(shard_count.get());
        let per_shard = NonZeroUsize::new(per_shard).unwrap_or(NonZeroUsize::MIN);

        log::debug!(
            "chunk cache: {} shards x {} entries",
            shard_count.get(),
            per_shard.get()
        );

        let hasher = TCBuildHasher::default();
        let shards = (0..shard_count.get())
            .map(|_| Mutex::new(LruCache::with_hasher(per_shard, hasher.clone())))
            .collect();

        Self {
            shards,
            hasher,
            capacity: per_shard.get() * shard_count.get(),
        }
    }

    /// The maximum number of entries across all shards.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The number of shards.
    pub fn shard_count(&self) -> usize {
        self.shards.len()
    }

    /// The number of cached entries.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|shard| shard.lock().len()).sum()
    }

    /// Is the cache empty?
    pub fn is_empty(&self) -> bool {
        self.shards.iter().all(|shard| shard.lock().is_empty())
    }

    fn shard(
        &self,
        chunk: &str,
    ) -> &Mutex<ChunkShard<T>> {
        let idx = BuildHasher::hash_one(&self.hasher, chunk) as usize % self.shards.len();
        &self.shards[idx]
    }

    /// Look up a chunk, marking it as recently used.
    pub fn get(
        &self,
        chunk: &str,
    ) -> Option<Arc<EncodeResult<T>>> {
        self.shard(chunk).lock().get(chunk).cloned()
    }

    /// Insert a chunk, evicting the shard's least recently used entry if full.
    pub fn insert(
        &self,
        chunk: &str,
        encoded: Arc<EncodeResult<T>>,
    ) {
        self.shard(chunk).lock().put(chunk.to_string(), encoded);
    }

    /// Drop every entry.
    pub fn clear(&self) {
        for shard in &self.shards {
            shard.lock().clear();
        }
    }
}
