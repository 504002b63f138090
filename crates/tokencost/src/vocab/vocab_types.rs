//! # Vocabulary Types

use crate::{
    types::{Pair, SymbolId, TCHashMap},
    vocab::vocabulary_table::MergeTarget,
};

/// `{ String -> T }` map, from token string (in byte-symbol form) to id.
///
/// ## Style Hints
/// Instance names should prefer `token_ids`, or `symbol_token_map`.
pub type SymbolTokenMap<T> = TCHashMap<String, T>;

/// A ``(left, right)`` merge rule, in byte-symbol form.
///
/// ## Style Hints
/// Instance names should prefer `rule`; collections `merges`.
pub type MergeRule = Pair<String>;

/// `{ Pair<SymbolId> -> MergeTarget }` map.
///
/// ## Style Hints
/// Instance names should prefer `pair_merges`, or `merges`.
pub type PairMergeMap = TCHashMap<Pair<SymbolId>, MergeTarget>;
