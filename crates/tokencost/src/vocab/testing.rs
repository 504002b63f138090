//! # Vocab Testing Tools

use crate::{
    types::TokenType,
    vocab::{ByteSymbolTable, MergeRule, SymbolTokenMap, VocabularyTable},
};

/// Build a ``{ byte symbol -> byte ordinal }`` map over the GPT-2 byte table.
pub fn byte_token_map<T: TokenType>() -> SymbolTokenMap<T> {
    let table = ByteSymbolTable::gpt2();
    (0..=255u8)
        .map(|b| {
            (
                table.byte_symbol(b).to_string(),
                T::from_u8(b).expect("token type holds a byte"),
            )
        })
        .collect()
}

/// Create a test [`VocabularyTable`].
///
/// Byte tokens take ids ``0..256`` in byte order;
/// each new merge result takes the next id, in rule order.
pub fn build_test_vocab<T: TokenType>(merges: &[(&str, &str)]) -> VocabularyTable<T> {
    let mut token_ids = byte_token_map::<T>();

    let merges: Vec<MergeRule> = merges
        .iter()
        .map(|&(a, b)| (a.to_string(), b.to_string()))
        .collect();

    for (a, b) in &merges {
        let next = T::from_usize(token_ids.len()).expect("token type holds the vocab");
        token_ids.entry(format!("{a}{b}")).or_insert(next);
    }

    VocabularyTable::new(token_ids, &merges).expect("test vocab is consistent")
}

/// Merge rules covering a few common English words, in GPT-2 symbol form.
pub const TEST_WORD_MERGES: &[(&str, &str)] = &[
    ("h", "e"),
    ("l", "l"),
    ("o", "r"),
    ("Ġ", "w"),
    ("Ġ", "t"),
    ("he", "ll"),
    ("hell", "o"),
    ("Ġw", "or"),
    ("l", "d"),
    ("Ġwor", "ld"),
    ("Ġt", "he"),
    ("i", "t"),
    ("'", "s"),
    ("Ġ", "s"),
    ("a", "l"),
    ("Ġs", "al"),
    ("Ġsal", "t"),
];

/// Create a test [`VocabularyTable`] over [`TEST_WORD_MERGES`].
pub fn build_test_word_vocab<T: TokenType>() -> VocabularyTable<T> {
    build_test_vocab(TEST_WORD_MERGES)
}
