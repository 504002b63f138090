//! # Vocabulary IO
//!
//! ## Loading A Vocab
//!
//! ```rust,no_run
//! use tokencost::{
//!     tokenizer::{Tokenizer, TokenizerOptions},
//!     vocab::{VocabularyTable, io::load_gpt2_vocab_dir},
//! };
//!
//! fn example() -> tokencost::TCResult<usize> {
//!     let vocab: VocabularyTable<u32> = load_gpt2_vocab_dir("/opt/models/gpt2")?;
//!     let tokenizer = TokenizerOptions::default().build(vocab)?;
//!
//!     tokenizer.try_count_tokens("hello world")
//! }
//! ```

mod gpt2_io;

#[doc(inline)]
pub use gpt2_io::*;
