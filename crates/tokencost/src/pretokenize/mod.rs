//! # Pretokenization
//!
//! Text is split into chunks before BPE; merges never cross a chunk boundary.
//!
//! * [`Pretokenizer`] - pattern-driven splitting; gaps between matches are chunks too,
//!   so the chunks of a text always concatenate back to the text.
//! * [`patterns`] - the published GPT-2/GPT-3 split pattern.

pub mod patterns;
pub mod pretokenizer;

#[doc(inline)]
pub use patterns::GPT2_PATTERN;
#[doc(inline)]
pub use pretokenizer::{ChunkSpan, Pretokenizer};
