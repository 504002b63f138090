//! # BPE Encoders
//!
//! * [`BpeEncoder`] - byte-level BPE over one chunk, or over a whole text
//!   given a [`crate::pretokenize::Pretokenizer`].
//! * [`ChunkCache`] - a sharded LRU memo of encoded chunks, shared across engines.
//! * [`EncodeResult`] - token ids parallel to token strings.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use tokencost::{
//!     TCResult,
//!     encoders::{BpeEncoder, EncodeResult},
//!     pretokenize::Pretokenizer,
//!     vocab::VocabularyTable,
//! };
//!
//! fn example(vocab: Arc<VocabularyTable<u32>>, text: &str) -> TCResult<EncodeResult<u32>> {
//!     let encoder = BpeEncoder::new(vocab, None);
//!     let pretokenizer = Pretokenizer::gpt2()?;
//!     encoder.try_encode(&pretokenizer, text, &mut Vec::new())
//! }
//! ```

pub mod bpe_encoder;
pub mod chunk_cache;
pub mod encode_result;

#[doc(inline)]
pub use bpe_encoder::BpeEncoder;
#[doc(inline)]
pub use chunk_cache::ChunkCache;
#[doc(inline)]
pub use encode_result::EncodeResult;
