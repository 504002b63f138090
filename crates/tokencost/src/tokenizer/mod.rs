//! # Tokenizer
//!
//! [`Tokenizer`] is the public facade: count, encode and decode over a pool of
//! engines, safe to share across threads as ``Arc<Tokenizer<T>>``.
//! [`TokenizerOptions`] configures and builds it.

mod tokenizer_impl;
mod tokenizer_options;

#[doc(inline)]
pub use tokenizer_impl::*;
#[doc(inline)]
pub use tokenizer_options::*;
