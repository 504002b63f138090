//! # Common Types and Traits
use core::{
    fmt::{Debug, Display},
    hash::Hash,
};

use num_traits::{FromPrimitive, PrimInt, ToPrimitive, Unsigned};

/// A type that can be used as a token id.
///
/// These are constrained to be unsigned primitive integers;
/// such that the max token in a vocabulary is less than `T::max()`.
pub trait TokenType:
    'static
    + PrimInt
    + FromPrimitive
    + ToPrimitive
    + Unsigned
    + Hash
    + Default
    + Debug
    + Display
    + Send
    + Sync
{
}

impl<T> TokenType for T where
    T: 'static
        + PrimInt
        + FromPrimitive
        + ToPrimitive
        + Unsigned
        + Hash
        + Default
        + Debug
        + Display
        + Send
        + Sync
{
}

/// A pair of values.
pub type Pair<T> = (T, T);

/// Interned symbol id.
///
/// Symbol ids are dense over the symbols a [`crate::vocab::VocabularyTable`]
/// can produce while merging; they are *not* token ids.
pub type SymbolId = u32;

cfg_if::cfg_if! {
    if #[cfg(feature = "ahash")] {
        /// Type Alias for hash maps in this crate.
        pub type TCHashMap<K, V> = ahash::AHashMap<K, V>;

        /// Type Alias for the hash builder in this crate.
        pub type TCBuildHasher = ahash::RandomState;

    } else {
        /// Type Alias for hash maps in this crate.
        pub type TCHashMap<K, V> = std::collections::HashMap<K, V>;

        /// Type Alias for the hash builder in this crate.
        pub type TCBuildHasher = std::collections::hash_map::RandomState;
    }
}

/// Create a new hash map with the given capacity.
pub fn hash_map_with_capacity<K, V>(capacity: usize) -> TCHashMap<K, V> {
    TCHashMap::with_capacity(capacity)
}

/// Compile-time check that a value is `Send + Sync`.
pub fn static_is_send_sync_check<S: Send + Sync>(_: &S) {}
