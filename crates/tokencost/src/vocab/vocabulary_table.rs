//! # Vocabulary Table
//!
//! The immutable ``{ token string <-> id }`` vocabulary,
//! plus the ``{ (symbol, symbol) -> rank }`` merge table.
//!
//! Merging runs on interned [`SymbolId`]s rather than strings:
//! the table interns every symbol that can appear while merging
//! (the 256 byte symbols, each merge operand, each merge result),
//! and records which of those symbols have a token id.

use core::fmt::Debug;

use crate::{
    errors::{TCResult, TokenCostError},
    types::{Pair, SymbolId, TCHashMap, TokenType, hash_map_with_capacity},
    vocab::{
        byte_symbols::ByteSymbolTable,
        vocab_types::{MergeRule, PairMergeMap, SymbolTokenMap},
    },
};

/// The result of merging a symbol pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MergeTarget {
    /// Merge priority; lower merges first.
    pub rank: u32,

    /// The merged symbol.
    pub symbol: SymbolId,
}

/// Immutable GPT-style BPE vocabulary.
///
/// Ids are dense over ``[0, len())``; the encode and decode tables are exact inverses.
/// Byte symbols occupy symbol ids ``0..256`` in byte order.
#[derive(Clone)]
pub struct VocabularyTable<T: TokenType> {
    /// Byte/symbol mapping table.
    byte_table: ByteSymbolTable,

    /// ``{ token string -> id }``.
    token_ids: SymbolTokenMap<T>,

    /// ``id -> token string``.
    token_strings: Vec<String>,

    /// ``symbol id -> symbol string``.
    symbols: Vec<String>,

    /// ``{ symbol string -> symbol id }``.
    symbol_ids: TCHashMap<String, SymbolId>,

    /// ``symbol id -> token id``; `None` for merge results outside the vocabulary.
    symbol_tokens: Vec<Option<T>>,

    /// ``{ (symbol, symbol) -> (rank, symbol) }``.
    merges: PairMergeMap,
}

impl<T: TokenType> Debug for VocabularyTable<T> {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("VocabularyTable")
            .field("len", &self.len())
            .field("merges", &self.merges.len())
            .field("symbols", &self.symbols.len())
            .finish()
    }
}

impl<T: TokenType> PartialEq for VocabularyTable<T> {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.byte_table == other.byte_table
            && self.token_strings == other.token_strings
            && self.merge_rules() == other.merge_rules()
    }
}

/// Symbol interning for table construction.
struct SymbolInterner {
    symbols: Vec<String>,
    symbol_ids: TCHashMap<String, SymbolId>,
}

impl SymbolInterner {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            symbols: Vec::with_capacity(capacity),
            symbol_ids: hash_map_with_capacity(capacity),
        }
    }

    fn intern(
        &mut self,
        symbol: &str,
    ) -> SymbolId {
        if let Some(&id) = self.symbol_ids.get(symbol) {
            return id;
        }
        let id = self.symbols.len() as SymbolId;
        self.symbols.push(symbol.to_string());
        self.symbol_ids.insert(symbol.to_string(), id);
        id
    }
}

/// Build the dense ``id -> token string`` table.
fn dense_token_strings<T: TokenType>(token_ids: &SymbolTokenMap<T>) -> TCResult<Vec<String>> {
    let n = token_ids.len();
    let mut slots: Vec<Option<&str>> = vec![None; n];

    for (token, &id) in token_ids {
        let idx = match id.to_usize() {
            Some(idx) if idx < n => idx,
            _ => {
                return Err(TokenCostError::VocabConflict(format!(
                    "token {token:?} has id {id}, outside the dense range [0, {n})"
                )));
            }
        };
        if let Some(prev) = slots[idx] {
            return Err(TokenCostError::VocabConflict(format!(
                "tokens {prev:?} and {token:?} share id {id}"
            )));
        }
        slots[idx] = Some(token.as_str());
    }

    // n distinct ids, all below n: every slot is filled.
    Ok(slots
        .into_iter()
        .map(|s| s.unwrap_or_default().to_string())
        .collect())
}

impl<T: TokenType> VocabularyTable<T> {
    /// Build a table over the GPT-2 byte/symbol table.
    ///
    /// ## Arguments
    /// * `token_ids` - the ``{ token string -> id }`` vocabulary.
    /// * `merges` - merge rules in rank order.
    pub fn new(
        token_ids: SymbolTokenMap<T>,
        merges: &[MergeRule],
    ) -> TCResult<Self> {
        Self::with_byte_table(ByteSymbolTable::default(), token_ids, merges)
    }

    /// Build a table over a custom byte/symbol table.
    ///
    /// ## Arguments
    /// * `byte_table` - the byte/symbol bijection.
    /// * `token_ids` - the ``{ token string -> id }`` vocabulary.
    /// * `merges` - merge rules in rank order; a repeated rule keeps its first rank.
    ///
    /// ## Returns
    /// `VocabConflict` if ids are not dense, or if a merge rule is empty or
    /// uses a character outside the byte table.
    pub fn with_byte_table(
        byte_table: ByteSymbolTable,
        mut token_ids: SymbolTokenMap<T>,
        merges: &[MergeRule],
    ) -> TCResult<Self> {
        let token_strings = dense_token_strings(&token_ids)?;
        token_ids.shrink_to_fit();

        let mut interner = SymbolInterner::with_capacity(256 + 2 * merges.len());
        for &c in byte_table.byte_symbols() {
            let mut buf = [0u8; 4];
            interner.intern(c.encode_utf8(&mut buf));
        }

        let mut pair_merges: PairMergeMap = hash_map_with_capacity(merges.len());
        for (rank, (left, right)) in merges.iter().enumerate() {
            for side in [left, right] {
                if side.is_empty() {
                    return Err(TokenCostError::VocabConflict(format!(
                        "merge rule {rank} ({left:?}, {right:?}) has an empty symbol"
                    )));
                }
                if let Some(c) = side.chars().find(|&c| byte_table.symbol_byte(c).is_none()) {
                    return Err(TokenCostError::VocabConflict(format!(
                        "merge rule {rank} ({left:?}, {right:?}) uses non-byte symbol {c:?}"
                    )));
                }
            }

            let pair: Pair<SymbolId> = (interner.intern(left), interner.intern(right));
            let merged = interner.intern(&format!("{left}{right}"));

            if pair_merges.contains_key(&pair) {
                log::warn!("duplicate merge rule ({left:?}, {right:?}) at rank {rank} ignored");
                continue;
            }
            pair_merges.insert(
                pair,
                MergeTarget {
                    rank: rank as u32,
                    symbol: merged,
                },
            );
        }
        pair_merges.shrink_to_fit();

        let SymbolInterner {
            symbols,
            symbol_ids,
        } = interner;

        let symbol_tokens = symbols
            .iter()
            .map(|s| token_ids.get(s).copied())
            .collect::<Vec<_>>();

        log::info!(
            "vocabulary loaded: {} tokens, {} merges, {} symbols",
            token_strings.len(),
            pair_merges.len(),
            symbols.len()
        );

        Ok(Self {
            byte_table,
            token_ids,
            token_strings,
            symbols,
            symbol_ids,
            symbol_tokens,
            merges: pair_merges,
        })
    }

    /// The number of tokens in the vocabulary.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.token_strings.len()
    }

    /// The number of distinct merge rules.
    pub fn merge_count(&self) -> usize {
        self.merges.len()
    }

    /// The number of interned symbols.
    pub fn symbol_count(&self) -> usize {
        self.symbols.len()
    }

    /// Get the byte/symbol mapping table.
    pub fn byte_table(&self) -> &ByteSymbolTable {
        &self.byte_table
    }

    /// Get the ``{ token string -> id }`` map.
    pub fn token_ids(&self) -> &SymbolTokenMap<T> {
        &self.token_ids
    }

    /// Look up the id of a token string.
    pub fn token_id(
        &self,
        token: &str,
    ) -> Option<T> {
        self.token_ids.get(token).copied()
    }

    /// Look up the string of a token id.
    pub fn token_string(
        &self,
        id: T,
    ) -> Option<&str> {
        id.to_usize()
            .and_then(|idx| self.token_strings.get(idx))
            .map(String::as_str)
    }

    /// The symbol id of a byte.
    #[inline(always)]
    pub fn byte_symbol_id(
        &self,
        byte: u8,
    ) -> SymbolId {
        byte as SymbolId
    }

    /// Append the byte symbol ids for a span to a target buffer.
    #[inline(always)]
    pub fn append_byte_symbol_ids(
        &self,
        bytes: &[u8],
        buf: &mut Vec<SymbolId>,
    ) {
        buf.extend(bytes.iter().map(|&b| self.byte_symbol_id(b)));
    }

    /// Look up an interned symbol id by string.
    pub fn symbol_id(
        &self,
        symbol: &str,
    ) -> Option<SymbolId> {
        self.symbol_ids.get(symbol).copied()
    }

    /// The string of an interned symbol.
    ///
    /// ## Panics
    /// If `symbol` was not produced by this table.
    pub fn symbol(
        &self,
        symbol: SymbolId,
    ) -> &str {
        &self.symbols[symbol as usize]
    }

    /// The token id of an interned symbol, if it is in the vocabulary.
    #[inline(always)]
    pub fn symbol_token(
        &self,
        symbol: SymbolId,
    ) -> Option<T> {
        self.symbol_tokens
            .get(symbol as usize)
            .copied()
            .flatten()
    }

    /// Look up the merge for a symbol pair.
    #[inline(always)]
    pub fn lookup_merge(
        &self,
        pair: &Pair<SymbolId>,
    ) -> Option<MergeTarget> {
        self.merges.get(pair).copied()
    }

    /// Look up the merge rank of a symbol pair, by string.
    pub fn merge_rank(
        &self,
        left: &str,
        right: &str,
    ) -> Option<u32> {
        let pair = (self.symbol_id(left)?, self.symbol_id(right)?);
        self.lookup_merge(&pair).map(|m| m.rank)
    }

    /// The merge rules, in rank order.
    pub fn merge_rules(&self) -> Vec<MergeRule> {
        let mut ranked: Vec<(&Pair<SymbolId>, &MergeTarget)> = self.merges.iter().collect();
        ranked.sort_by_key(|(_, target)| target.rank);
        ranked
            .into_iter()
            .map(|(&(a, b), _)| (self.symbol(a).to_string(), self.symbol(b).to_string()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::testing::{build_test_vocab, byte_token_map};

    fn rules(pairs: &[(&str, &str)]) -> Vec<MergeRule> {
        pairs
            .iter()
            .map(|&(a, b)| (a.to_string(), b.to_string()))
            .collect()
    }

    #[test]
    fn test_byte_symbol_ids() {
        let vocab: VocabularyTable<u32> = build_test_vocab(&[]);

        assert_eq!(vocab.len(), 256);
        assert_eq!(vocab.symbol_count(), 256);
        assert_eq!(vocab.merge_count(), 0);

        let table = vocab.byte_table().clone();
        for b in 0..=255u8 {
            let sid = vocab.byte_symbol_id(b);
            assert_eq!(vocab.symbol(sid), table.byte_symbol(b).to_string());
            assert_eq!(vocab.symbol_token(sid), Some(b as u32));
        }

        let mut buf = vec![];
        vocab.append_byte_symbol_ids(b"ab", &mut buf);
        assert_eq!(buf, vec![b'a' as SymbolId, b'b' as SymbolId]);
    }

    #[test]
    fn test_merges() {
        let vocab: VocabularyTable<u32> = build_test_vocab(&[("a", "b"), ("b", "c"), ("ab", "c")]);

        assert_eq!(vocab.len(), 259);
        assert_eq!(vocab.merge_count(), 3);

        assert_eq!(vocab.merge_rank("a", "b"), Some(0));
        assert_eq!(vocab.merge_rank("b", "c"), Some(1));
        assert_eq!(vocab.merge_rank("ab", "c"), Some(2));
        assert_eq!(vocab.merge_rank("c", "a"), None);
        assert_eq!(vocab.merge_rank("zz", "a"), None);

        let ab = vocab.lookup_merge(&(b'a' as SymbolId, b'b' as SymbolId)).unwrap();
        assert_eq!(ab.rank, 0);
        assert_eq!(vocab.symbol(ab.symbol), "ab");
        assert_eq!(vocab.symbol_token(ab.symbol), Some(256));

        assert_eq!(vocab.token_id("abc"), Some(258));
        assert_eq!(vocab.token_string(258), Some("abc"));
        assert_eq!(vocab.token_string(259), None);

        assert_eq!(
            vocab.merge_rules(),
            rules(&[("a", "b"), ("b", "c"), ("ab", "c")])
        );

        assert_eq!(
            format!("{vocab:?}"),
            "VocabularyTable { len: 259, merges: 3, symbols: 259 }"
        );
    }

    #[test]
    fn test_duplicate_merge_keeps_first_rank() {
        let vocab: VocabularyTable<u32> =
            build_test_vocab(&[("a", "b"), ("c", "d"), ("a", "b")]);

        assert_eq!(vocab.merge_count(), 2);
        assert_eq!(vocab.merge_rank("a", "b"), Some(0));
        assert_eq!(vocab.merge_rank("c", "d"), Some(1));
    }

    #[test]
    fn test_merge_result_outside_vocab() {
        let token_ids = byte_token_map::<u32>();
        let vocab = VocabularyTable::new(token_ids, &rules(&[("a", "b")])).unwrap();

        let ab = vocab.symbol_id("ab").unwrap();
        assert_eq!(vocab.symbol_token(ab), None);
    }

    #[test]
    fn test_rejects_sparse_ids() {
        let mut token_ids = byte_token_map::<u32>();
        token_ids.insert("ab".to_string(), 300);

        let err = VocabularyTable::new(token_ids, &[]).unwrap_err();
        assert!(matches!(err, TokenCostError::VocabConflict(_)), "{err:?}");
    }

    #[test]
    fn test_rejects_shared_ids() {
        let mut token_ids = byte_token_map::<u32>();
        token_ids.insert("ab".to_string(), 255);
        token_ids.insert("cd".to_string(), 256);
        token_ids.remove("a");

        let err = VocabularyTable::new(token_ids, &[]).unwrap_err();
        assert!(matches!(err, TokenCostError::VocabConflict(_)), "{err:?}");
    }

    #[test]
    fn test_rejects_bad_merge_rules() {
        let token_ids = byte_token_map::<u32>();
        assert!(VocabularyTable::new(token_ids.clone(), &rules(&[("a", "")])).is_err());

        // ' ' is not a GPT-2 byte symbol.
        assert!(VocabularyTable::new(token_ids, &rules(&[(" ", "a")])).is_err());
    }

    #[test]
    fn test_eq() {
        let a: VocabularyTable<u32> = build_test_vocab(&[("a", "b")]);
        let b: VocabularyTable<u32> = build_test_vocab(&[("a", "b")]);
        let c: VocabularyTable<u32> = build_test_vocab(&[("b", "a")]);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
