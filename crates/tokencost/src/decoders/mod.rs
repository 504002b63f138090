//! # Token Decoders
//!
//! * [`TokenDecoder`] - the decode trait; ids to bytes, with lossy string variants.
//! * [`BpeDecoder`] - the [`crate::vocab::VocabularyTable`] backed decoder.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use tokencost::{
//!     TCResult,
//!     decoders::{BpeDecoder, TokenDecoder},
//!     vocab::VocabularyTable,
//! };
//!
//! fn example(vocab: Arc<VocabularyTable<u32>>, ids: &[u32]) -> TCResult<String> {
//!     BpeDecoder::new(vocab).try_decode_to_string(ids)
//! }
//! ```

pub mod bpe_decoder;
pub mod token_decoder;

#[doc(inline)]
pub use bpe_decoder::BpeDecoder;
#[doc(inline)]
pub use token_decoder::TokenDecoder;
