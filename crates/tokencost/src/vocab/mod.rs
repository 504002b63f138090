//! # Vocabulary
//!
//! This module provides the vocabulary and related io mechanisms.
//!
//! ## Byte Symbols
//!
//! Byte-level BPE runs over printable symbols rather than raw bytes;
//! the mapping between the two is provided by:
//! * [`ByteSymbolTable`].
//!
//! ## Vocabulary Table
//!
//! The primary user-oriented vocabulary is [`VocabularyTable`], which contains:
//! * ``{ token string <-> id }`` tables,
//! * the ``{ (symbol, symbol) -> rank }`` merge table.
//!
//! It is loaded once (see [`io`]) and shared read-only by every engine.

pub mod byte_symbols;
pub mod io;
pub mod size_hints;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
pub mod vocab_types;
pub mod vocabulary_table;

#[doc(inline)]
pub use byte_symbols::ByteSymbolTable;
#[doc(inline)]
pub use vocab_types::{MergeRule, PairMergeMap, SymbolTokenMap};
#[doc(inline)]
pub use vocabulary_table::{MergeTarget, VocabularyTable};
