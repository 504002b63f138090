//! # Engines
//!
//! A [`BpeEngine`] bundles everything one encode/decode call needs:
//! its own compiled [`crate::pretokenize::Pretokenizer`], the shared vocabulary,
//! the shared chunk cache, and a private scratch buffer.
//!
//! Engines are not shared between calls; an [`EnginePool`] hands each caller
//! its own [`EngineHandle`], building engines on demand rather than waiting.

pub mod bpe_engine;
pub mod engine_pool;

#[doc(inline)]
pub use bpe_engine::BpeEngine;
#[doc(inline)]
pub use engine_pool::{EngineFactory, EngineHandle, EnginePool, PoolStats};
