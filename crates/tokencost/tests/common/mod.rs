//! Shared integration test fixtures.
#![allow(dead_code)]

use std::sync::Arc;

use tokencost::{
    Tokenizer,
    TokenizerOptions,
    vocab::{ByteSymbolTable, MergeRule, SymbolTokenMap, VocabularyTable},
};

/// A slice of the GPT-2 merge table, then a few rules reaching common words.
pub const FIXTURE_MERGES: &[(&str, &str)] = &[
    ("Ġ", "t"),
    ("Ġ", "a"),
    ("h", "e"),
    ("i", "n"),
    ("r", "e"),
    ("o", "n"),
    ("Ġt", "he"),
    ("e", "r"),
    ("Ġ", "s"),
    ("a", "t"),
    ("Ġ", "w"),
    ("Ġ", "o"),
    ("e", "n"),
    ("Ġ", "c"),
    ("i", "t"),
    ("i", "s"),
    ("a", "n"),
    ("o", "r"),
    ("e", "s"),
    ("Ġ", "b"),
    ("e", "d"),
    ("Ġ", "f"),
    ("in", "g"),
    ("Ġ", "p"),
    ("o", "u"),
    ("Ġa", "n"),
    ("a", "l"),
    ("a", "r"),
    ("Ġt", "o"),
    ("Ġ", "m"),
    ("Ġo", "f"),
    ("Ġ", "in"),
    ("Ġ", "d"),
    ("Ġ", "h"),
    ("Ġan", "d"),
    ("l", "l"),
    ("l", "d"),
    ("Ġw", "or"),
    ("Ġwor", "ld"),
    ("H", "e"),
    ("He", "ll"),
    ("Hell", "o"),
    ("Ġ", "Hello"),
    ("Ġ", "I"),
    ("'", "s"),
    ("Ġ", "2"),
    ("Ġ", "T"),
    ("Ġs", "al"),
    ("Ġsal", "t"),
];

/// Tokens carrying their published GPT-2 ids.
///
/// The first [`FIXTURE_MERGES`] results take ids ``256 + rank``, as in GPT-2.
pub const PINNED_IDS: &[(&str, u32)] = &[
    ("Hello", 15496),
    ("Ġworld", 995),
    ("ĠHello", 18435),
    ("<|endoftext|>", 50256),
];

/// The number of leading [`FIXTURE_MERGES`] that are GPT-2's own first merges.
pub const GPT2_PREFIX_MERGES: usize = 35;

/// Ids handed to fixture-only merge results.
const FIXTURE_ID_BASE: u32 = 50000;

/// Bytes in GPT-2 token id order: the self-mapped printable bytes first,
/// then the rest ascending.
pub fn gpt2_byte_order() -> Vec<u8> {
    let printable = |b: u8| matches!(b, 0x21..=0x7E | 0xA1..=0xAC | 0xAE..=0xFF);
    let mut order: Vec<u8> = (0..=255u8).filter(|&b| printable(b)).collect();
    order.extend((0..=255u8).filter(|&b| !printable(b)));
    order
}

/// Build the fixture ``{ token -> id }`` map and merge rules.
///
/// Ids are dense: every id not otherwise assigned holds an ``<|unusedN|>`` token.
pub fn gpt2_fixture_parts() -> (SymbolTokenMap<u32>, Vec<MergeRule>) {
    let table = ByteSymbolTable::gpt2();
    let mut token_ids: SymbolTokenMap<u32> = Default::default();

    for (id, b) in gpt2_byte_order().into_iter().enumerate() {
        token_ids.insert(table.byte_symbol(b).to_string(), id as u32);
    }
    for &(token, id) in PINNED_IDS {
        token_ids.insert(token.to_string(), id);
    }

    let mut next_fixture_id = FIXTURE_ID_BASE;
    for (rank, (a, b)) in FIXTURE_MERGES.iter().enumerate() {
        let merged = format!("{a}{b}");
        if token_ids.contains_key(&merged) {
            continue;
        }
        let id = if rank < GPT2_PREFIX_MERGES {
            256 + rank as u32
        } else {
            next_fixture_id += 1;
            next_fixture_id - 1
        };
        token_ids.insert(merged, id);
    }

    let max_id = token_ids.values().copied().max().unwrap();
    let mut used = vec![false; max_id as usize + 1];
    for &id in token_ids.values() {
        used[id as usize] = true;
    }
    for (id, used) in used.into_iter().enumerate() {
        if !used {
            token_ids.insert(format!("<|unused{id}|>"), id as u32);
        }
    }

    let merges = FIXTURE_MERGES
        .iter()
        .map(|&(a, b)| (a.to_string(), b.to_string()))
        .collect();

    (token_ids, merges)
}

/// The fixture vocabulary.
pub fn gpt2_fixture_vocab() -> VocabularyTable<u32> {
    let (token_ids, merges) = gpt2_fixture_parts();
    VocabularyTable::new(token_ids, &merges).unwrap()
}

/// A tokenizer over the fixture vocabulary.
pub fn gpt2_fixture_tokenizer(options: TokenizerOptions) -> Arc<Tokenizer<u32>> {
    options.build(gpt2_fixture_vocab()).unwrap()
}

/// Round-trip samples.
pub const SAMPLES: &[&str] = &[
    "hello world",
    "Hello world",
    "The quick brown fox jumps over the lazy dog.",
    "It's a beautiful day, and I'll be taking my 3 dogs for a walk.",
    "Don't forget: the temperature is 72 degrees!",
    "  multiple   spaces  ",
    "line1\nline2\r\nline3",
    "123 + 456 = 789",
    "caf\u{00e9} na\u{00ef}ve \u{4f60}\u{597d}",
    "Geburtstag 2024: Alles Gute!",
    "$$$!!!...---",
    " ",
    "a",
    "\t\ttabs\tand\tspaces ",
    "emoji: \u{1f600}\u{1f680}\u{1f4a1}",
    "mixed: hello\u{00a0}world\u{2003}wide",
    "<|endoftext|>",
];
