//! End-to-end tests over a GPT-2 shaped fixture vocabulary.

mod common;

use std::{num::NonZeroUsize, sync::Arc, thread};

use common::{SAMPLES, gpt2_fixture_tokenizer, gpt2_fixture_vocab};
use once_cell::sync::Lazy;
use proptest::prelude::*;
use tempdir::TempDir;
use tokencost::{
    TokenCostError,
    Tokenizer,
    TokenizerOptions,
    vocab::{
        VocabularyTable,
        io::{load_gpt2_vocab_dir, save_gpt2_vocab_dir},
    },
};

fn init_logging() {
    let _ = stderrlog::new()
        .verbosity(stderrlog::LogLevelNum::Warn)
        .init();
}

#[test]
fn test_fixture_shape() {
    let vocab = gpt2_fixture_vocab();
    assert_eq!(vocab.len(), 50257);
    assert_eq!(vocab.token_id(" "), None);
    assert_eq!(vocab.token_id("Ġ"), Some(220));
    assert_eq!(vocab.token_id("Ċ"), Some(198));
    assert_eq!(vocab.token_id("!"), Some(0));
    assert_eq!(vocab.token_id("Ġthe"), Some(262));
    assert_eq!(vocab.token_string(50256), Some("<|endoftext|>"));
}

#[test]
fn test_hello_world() {
    init_logging();
    let tokenizer = gpt2_fixture_tokenizer(TokenizerOptions::default());

    let encoded = tokenizer.encode("Hello world").unwrap();
    assert_eq!(encoded.ids, vec![15496, 995]);
    assert_eq!(encoded.tokens, vec!["Hello", " world"]);
    assert_eq!(
        encoded.token_symbols(tokenizer.vocab()).unwrap(),
        vec!["Hello", "Ġworld"]
    );

    assert_eq!(tokenizer.count_tokens("Hello world"), 2);
    assert_eq!(tokenizer.decode(&[15496, 995]).unwrap(), "Hello world");
}

#[test]
fn test_punctuated_sentence() {
    let tokenizer = gpt2_fixture_tokenizer(TokenizerOptions::default());

    let encoded = tokenizer.encode("Hello, Hello world!").unwrap();
    assert_eq!(encoded.ids, vec![15496, 11, 18435, 995, 0]);
    assert_eq!(encoded.tokens, vec!["Hello", ",", " Hello", " world", "!"]);

    let encoded = tokenizer.encode("the cat and the hat").unwrap();
    assert_eq!(encoded.ids, vec![83, 258, 269, 265, 290, 262, 289, 265]);

    let encoded = tokenizer.encode("\n\n").unwrap();
    assert_eq!(encoded.ids, vec![198, 198]);
    assert_eq!(encoded.tokens, vec!["\n", "\n"]);
    assert_eq!(encoded.token_symbols(tokenizer.vocab()).unwrap(), vec!["Ċ", "Ċ"]);
}

#[test]
fn test_empty_text() {
    let tokenizer = gpt2_fixture_tokenizer(TokenizerOptions::default());

    let encoded = tokenizer.encode("").unwrap();
    assert!(encoded.is_empty());
    assert_eq!(tokenizer.count_tokens(""), 0);
    assert_eq!(tokenizer.decode(&[]).unwrap(), "");
}

#[test]
fn test_end_of_text() {
    let tokenizer = gpt2_fixture_tokenizer(TokenizerOptions::default());

    assert_eq!(tokenizer.decode(&[50256]).unwrap(), "<|endoftext|>");

    // Plain text never produces the special token.
    let encoded = tokenizer.encode("<|endoftext|>").unwrap();
    assert!(!encoded.ids.contains(&50256));
    assert_eq!(tokenizer.decode(&encoded.ids).unwrap(), "<|endoftext|>");
}

#[test]
fn test_unknown_token_id() {
    let tokenizer = gpt2_fixture_tokenizer(TokenizerOptions::default());

    match tokenizer.decode(&[15496, 50257]).unwrap_err() {
        TokenCostError::UnknownTokenId { id } => assert_eq!(id, 50257),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_json_payload() {
    let tokenizer = gpt2_fixture_tokenizer(TokenizerOptions::default());

    let encoded = tokenizer.encode("Hello world").unwrap();
    assert_eq!(
        serde_json::to_string(&encoded).unwrap(),
        r#"{"bpe":[15496,995],"text":["Hello"," world"]}"#
    );
}

#[test]
fn test_long_whitespace_run() {
    let tokenizer = gpt2_fixture_tokenizer(TokenizerOptions::default().with_cache_capacity(0));
    let text = format!("{}a", " ".repeat(1_000_001));

    // One token per space, then " a".
    let encoded = tokenizer.encode(&text).unwrap();
    assert_eq!(encoded.len(), 1_000_001);
    assert_eq!(encoded.ids[0], 220);
    assert_eq!(encoded.ids[1_000_000], 257);
    assert_eq!(encoded.tokens[1_000_000], " a");
    assert_eq!(tokenizer.decode(&encoded.ids).unwrap(), text);
}

#[test]
fn test_roundtrip_samples() {
    for options in [
        TokenizerOptions::default(),
        TokenizerOptions::default().with_cache_capacity(0),
    ] {
        let tokenizer = gpt2_fixture_tokenizer(options);

        for text in SAMPLES {
            let encoded = tokenizer.encode(text).unwrap();
            assert_eq!(
                encoded.ids.len(),
                encoded.tokens.len(),
                "ids/tokens length mismatch for: {text:?}"
            );
            assert_eq!(
                tokenizer.count_tokens(text),
                encoded.len(),
                "count mismatch for: {text:?}"
            );

            let decoded = tokenizer.decode(&encoded.ids).unwrap();
            assert_eq!(&decoded, text, "Roundtrip mismatch for: {text:?}");
        }
    }
}

#[test]
fn test_batch_matches_single() {
    let tokenizer = gpt2_fixture_tokenizer(TokenizerOptions::default());

    let batch = tokenizer.encode_batch(SAMPLES).unwrap();
    assert_eq!(batch.len(), SAMPLES.len());
    for (text, encoded) in SAMPLES.iter().zip(&batch) {
        assert_eq!(encoded, &tokenizer.encode(text).unwrap());
    }

    let ids: Vec<&[u32]> = batch.iter().map(|e| e.ids.as_slice()).collect();
    let decoded = tokenizer.decode_batch(&ids).unwrap();
    assert_eq!(decoded, SAMPLES);
}

#[test]
fn test_save_and_load() {
    let vocab = gpt2_fixture_vocab();

    let dir = TempDir::new("tokencost_gpt2").unwrap();
    save_gpt2_vocab_dir(&vocab, dir.path()).unwrap();

    let loaded: VocabularyTable<u32> = load_gpt2_vocab_dir(dir.path()).unwrap();
    assert_eq!(loaded.len(), vocab.len());
    assert_eq!(loaded.merge_count(), vocab.merge_count());
    assert_eq!(loaded.merge_rules(), vocab.merge_rules());

    let tokenizer = TokenizerOptions::default().build(loaded).unwrap();
    assert_eq!(tokenizer.encode("Hello world").unwrap().ids, vec![15496, 995]);
}

#[test]
fn test_concurrent_encode() {
    let tokenizer = gpt2_fixture_tokenizer(
        TokenizerOptions::default().with_max_pool(NonZeroUsize::new(4)),
    );
    let text = "Hello, Hello world! It's the salt of the earth.";
    let expected = Arc::new(tokenizer.encode(text).unwrap());

    let handles: Vec<_> = (0..100)
        .map(|_| {
            let tokenizer = tokenizer.clone();
            let expected = expected.clone();
            thread::spawn(move || {
                let encoded = tokenizer.encode(text).unwrap();
                assert_eq!(&encoded, expected.as_ref());
                assert_eq!(tokenizer.decode(&encoded.ids).unwrap(), text);
            })
        })
        .collect();

    for h in handles {
        h.join().unwrap();
    }

    let stats = tokenizer.pool_stats();
    assert_eq!(stats.failed, 0);
    assert!(stats.idle <= 4, "{stats:?}");
}

#[test]
fn test_verify() {
    let tokenizer = gpt2_fixture_tokenizer(TokenizerOptions::default());
    tokenizer.verify().unwrap();
    tokenizer.spawn_verify().join().unwrap().unwrap();
}

/// Runs against a real GPT-2 vocabulary directory named by `TOKENCOST_GPT2_DIR`.
#[test]
#[ignore]
fn test_published_gpt2_vocab() {
    let Ok(dir) = std::env::var("TOKENCOST_GPT2_DIR") else {
        return;
    };
    let vocab: VocabularyTable<u32> = load_gpt2_vocab_dir(dir).unwrap();
    assert_eq!(vocab.len(), 50257);
    assert_eq!(vocab.merge_count(), 50000);

    let tokenizer = TokenizerOptions::default().build(vocab).unwrap();
    assert_eq!(tokenizer.encode("Hello world").unwrap().ids, vec![15496, 995]);
    for text in SAMPLES {
        let ids = tokenizer.encode(text).unwrap().ids;
        assert_eq!(&tokenizer.decode(&ids).unwrap(), text);
    }
}

static SHARED: Lazy<Arc<Tokenizer<u32>>> =
    Lazy::new(|| gpt2_fixture_tokenizer(TokenizerOptions::default()));

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_roundtrip(text in "\\PC{0,48}") {
        let tokenizer = &*SHARED;
        let encoded = tokenizer.encode(&text).unwrap();
        prop_assert_eq!(tokenizer.decode(&encoded.ids).unwrap(), text.clone());
        prop_assert_eq!(tokenizer.count_tokens(&text), encoded.len());
        prop_assert_eq!(tokenizer.encode(&text).unwrap(), encoded);
    }
}
