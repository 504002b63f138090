//! # `tokencost` GPT-3 Token Counting
//!
//! Count, encode and decode text with a GPT-2/GPT-3 style byte-level BPE vocabulary.
//!
//! See:
//! * [`tokenizer`] for the public facade, [`Tokenizer`] and [`TokenizerOptions`].
//! * [`vocab`] to load a [`vocab::VocabularyTable`] from `encoder.json` / `vocab.bpe`.
//! * [`encoders`] and [`decoders`] for the BPE machinery.
//! * [`engine`] for the pool that lets many threads encode at once.
//! * [`estimate`] for a vocabulary-free token estimate.
//!
//! ## Crate Features
//!
//! #### feature: ``default``
//!
//! * ``ahash``
//! * ``rayon``
//!
//! #### feature: ``ahash``
//!
//! This swaps all HashMap/HashSet implementations for ``ahash``; which is a performance
//! win on many/(most?) modern CPUs.
//!
//! This is done by the ``types::TC{*}`` type alias machinery.
//!
//! #### feature: ``rayon``
//!
//! Runs [`Tokenizer::encode_batch`] and [`Tokenizer::decode_batch`] on the
//! ``rayon`` thread pool; it also makes ``RAYON_NUM_THREADS`` bound the engine pool.
//!
//! #### feature: ``testing``
//!
//! Exposes ``vocab::testing``, small hand-built vocabularies for downstream tests.
//!
//! ## Counting Tokens
//!
//! ```rust,no_run
//! use tokencost::{TCResult, TokenizerOptions, vocab::io::load_gpt2_vocab_dir};
//!
//! fn example() -> TCResult<()> {
//!     let vocab = load_gpt2_vocab_dir::<u32, _>("/opt/models/gpt2")?;
//!     let tokenizer = TokenizerOptions::from_env().build(vocab)?;
//!
//!     let encoded = tokenizer.encode("Hello world")?;
//!     assert_eq!(encoded.ids, vec![15496, 995]);
//!     assert_eq!(encoded.tokens, vec!["Hello", " world"]);
//!
//!     assert_eq!(tokenizer.count_tokens("Hello world"), 2);
//!     assert_eq!(tokenizer.decode(&encoded.ids)?, "Hello world");
//!     Ok(())
//! }
//! ```
#![warn(missing_docs, unused)]

pub mod concurrency;
pub mod decoders;
pub mod encoders;
pub mod engine;
pub mod errors;
pub mod estimate;
pub mod pretokenize;
pub mod regex;
pub mod tokenizer;
pub mod types;
pub mod vocab;

#[doc(inline)]
pub use encoders::EncodeResult;
#[doc(inline)]
pub use errors::{TCResult, TokenCostError};
#[doc(inline)]
pub use tokenizer::{Tokenizer, TokenizerOptions};
#[doc(inline)]
pub use types::TokenType;
