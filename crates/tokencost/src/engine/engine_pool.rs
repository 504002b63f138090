//! # Engine Pool
//!
//! Idle engines wait in a list behind a [`parking_lot::Mutex`]; the lock is held
//! only to push or pop, never while an engine is built or used.

use core::{
    fmt::Debug,
    sync::atomic::{AtomicUsize, Ordering},
};

use parking_lot::Mutex;

use crate::{
    encoders::EncodeResult,
    engine::BpeEngine,
    errors::{TCResult, TokenCostError},
    types::TokenType,
};

/// Builds a fresh [`BpeEngine`].
pub type EngineFactory<T> = dyn Fn() -> TCResult<BpeEngine<T>> + Send + Sync;

/// Pool counters, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
    /// Engines successfully built.
    pub created: usize,

    /// Engine builds that failed.
    pub failed: usize,

    /// Engines currently idle in the pool.
    pub idle: usize,

    /// Cap on idle engines.
    pub max_idle: usize,
}

/// Lazily grown pool of [`BpeEngine`]s.
///
/// [`EnginePool::acquire`] pops an idle engine, or builds a new one when none is
/// idle; it never waits for another caller. A handle returns its engine on drop.
pub struct EnginePool<T: TokenType> {
    factory: Box<EngineFactory<T>>,
    idle: Mutex<Vec<BpeEngine<T>>>,
    max_idle: usize,
    created: AtomicUsize,
    failed: AtomicUsize,
}

impl<T: TokenType> Debug for EnginePool<T> {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("EnginePool")
            .field("stats", &self.stats())
            .finish()
    }
}

impl<T: TokenType> EnginePool<T> {
    /// Create an empty pool.
    ///
    /// ## Arguments
    /// * `factory` - builds engines on demand.
    /// * `max_idle` - engines released beyond this many idle are dropped.
    pub fn new<F>(
        factory: F,
        max_idle: usize,
    ) -> Self
    where
        F: Fn() -> TCResult<BpeEngine<T>> + Send + Sync + 'static,
    {
        log::info!("engine pool: max {max_idle} idle engines");
        Self {
            factory: Box::new(factory),
            idle: Mutex::new(Vec::with_capacity(max_idle)),
            max_idle,
            created: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
        }
    }

    /// Snapshot the pool counters.
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            created: self.created.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
            idle: self.idle.lock().len(),
            max_idle: self.max_idle,
        }
    }

    /// Draw a handle.
    ///
    /// Never fails: a failed build is carried by the handle, and every
    /// operation on that handle returns [`TokenCostError::EngineInitFailed`].
    pub fn acquire(&self) -> EngineHandle<'_, T> {
        let idle = self.idle.lock().pop();

        let slot = match idle {
            Some(engine) => Ok(engine),
            None => self.build(),
        };

        EngineHandle { pool: self, slot }
    }

    /// Return a handle to the pool; same as dropping it.
    pub fn release(
        &self,
        handle: EngineHandle<'_, T>,
    ) {
        debug_assert!(core::ptr::eq(handle.pool, self));
        drop(handle);
    }

    /// Drop every idle engine.
    pub fn clear(&self) {
        self.idle.lock().clear();
    }

    fn build(&self) -> Result<BpeEngine<T>, String> {
        match (self.factory)() {
            Ok(engine) => {
                let n = self.created.fetch_add(1, Ordering::Relaxed) + 1;
                log::debug!("engine constructed ({n} total)");
                Ok(engine)
            }
            Err(err) => {
                self.failed.fetch_add(1, Ordering::Relaxed);
                log::error!("engine construction failed: {err}");
                Err(err.to_string())
            }
        }
    }

    fn put_back(
        &self,
        engine: BpeEngine<T>,
    ) {
        let mut idle = self.idle.lock();
        if idle.len() < self.max_idle {
            idle.push(engine);
        }
    }
}

/// Exclusive use of one pooled engine.
///
/// Returned to its [`EnginePool`] on drop; a handle whose engine failed to
/// build is discarded instead, so the next [`EnginePool::acquire`] retries.
pub struct EngineHandle<'p, T: TokenType> {
    pool: &'p EnginePool<T>,
    slot: Result<BpeEngine<T>, String>,
}

impl<T: TokenType> Debug for EngineHandle<'_, T> {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        match &self.slot {
            Ok(_) => f.write_str("EngineHandle(ready)"),
            Err(err) => write!(f, "EngineHandle(failed: {err})"),
        }
    }
}

impl<T: TokenType> Drop for EngineHandle<'_, T> {
    fn drop(&mut self) {
        let slot = core::mem::replace(&mut self.slot, Err(String::new()));
        if let Ok(engine) = slot {
            self.pool.put_back(engine);
        }
    }
}

impl<T: TokenType> EngineHandle<'_, T> {
    /// Did the engine build?
    pub fn is_ready(&self) -> bool {
        self.slot.is_ok()
    }

    /// The build failure, if any.
    pub fn init_error(&self) -> Option<&str> {
        self.slot.as_ref().err().map(String::as_str)
    }

    /// Get the engine.
    pub fn engine(&self) -> TCResult<&BpeEngine<T>> {
        self.slot
            .as_ref()
            .map_err(|err| TokenCostError::EngineInitFailed(err.clone()))
    }

    /// Get the engine, mutably.
    pub fn engine_mut(&mut self) -> TCResult<&mut BpeEngine<T>> {
        self.slot
            .as_mut()
            .map_err(|err| TokenCostError::EngineInitFailed(err.clone()))
    }

    /// See [`BpeEngine::encode`].
    pub fn encode(
        &mut self,
        text: &str,
    ) -> TCResult<EncodeResult<T>> {
        self.engine_mut()?.encode(text)
    }

    /// See [`BpeEngine::count_tokens`].
    pub fn count_tokens(
        &mut self,
        text: &str,
    ) -> TCResult<usize> {
        self.engine_mut()?.count_tokens(text)
    }

    /// See [`BpeEngine::decode_to_bytes`].
    pub fn decode_to_bytes(
        &self,
        tokens: &[T],
    ) -> TCResult<Vec<u8>> {
        self.engine()?.decode_to_bytes(tokens)
    }

    /// See [`BpeEngine::decode`].
    pub fn decode(
        &self,
        tokens: &[T],
    ) -> TCResult<String> {
        self.engine()?.decode(tokens)
    }
}
