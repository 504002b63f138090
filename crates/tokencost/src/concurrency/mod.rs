//! # Concurrency Utilities

pub mod threads;

#[doc(inline)]
pub use threads::resolve_max_pool;
