//! # Thread Utilities

use core::str::FromStr;
use std::{env, num::NonZeroUsize, thread};

/// The search list of environment variables that Rayon uses to control parallelism.
#[cfg(feature = "rayon")]
const RAYON_VARS: &[&str] = &["RAYON_NUM_THREADS", "RAYON_RS_NUM_CPUS"];

/// Parse a positive integer from an environment variable.
///
/// Unset, unparsable, and zero values all read as `None`.
pub fn env_nonzero_usize(name: &str) -> Option<NonZeroUsize> {
    env::var(name)
        .ok()
        .and_then(|s| usize::from_str(s.trim()).ok())
        .and_then(NonZeroUsize::new)
}

/// Get the max parallelism available.
///
/// When `rayon` is enabled, will scan over `RAYON_VARS`.
pub fn est_max_parallelism() -> usize {
    let default = || {
        thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
    };

    #[cfg(feature = "rayon")]
    for name in RAYON_VARS {
        if let Some(x) = env_nonzero_usize(name) {
            return x.get();
        }
    }

    default()
}

/// Resolve the max pool size.
///
/// ``min(max_pool, thread::available_parallelism(), env::var("RAYON_NUM_THREADS"))``
pub fn resolve_max_pool(max_pool: Option<NonZeroUsize>) -> usize {
    let sys_max = est_max_parallelism();

    let max_pool = max_pool.map(|x| x.get()).unwrap_or(sys_max);

    core::cmp::min(max_pool, sys_max)
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn test_env_nonzero_usize() {
        let name = "TOKENCOST_TEST_ENV_NONZERO";

        unsafe { env::remove_var(name) };
        assert_eq!(env_nonzero_usize(name), None);

        unsafe { env::set_var(name, " 12 ") };
        assert_eq!(env_nonzero_usize(name), NonZeroUsize::new(12));

        unsafe { env::set_var(name, "0") };
        assert_eq!(env_nonzero_usize(name), None);

        unsafe { env::set_var(name, "many") };
        assert_eq!(env_nonzero_usize(name), None);

        unsafe { env::remove_var(name) };
    }

    #[test]
    #[serial]
    fn test_est_max_parallelism() {
        #[cfg(feature = "rayon")]
        let orig_env: Vec<(&str, Option<String>)> = RAYON_VARS
            .iter()
            .map(|&name| (name, env::var(name).ok()))
            .collect();

        #[cfg(feature = "rayon")]
        for name in RAYON_VARS {
            unsafe { env::remove_var(name) };
        }

        let base = est_max_parallelism();
        assert!(base >= 1);

        #[cfg(feature = "rayon")]
        for name in RAYON_VARS {
            unsafe { env::set_var(name, format!("{}", base + 12)) };
            assert_eq!(est_max_parallelism(), base + 12);
            unsafe { env::remove_var(name) };
        }

        assert_eq!(est_max_parallelism(), base);

        #[cfg(feature = "rayon")]
        for (name, val) in orig_env {
            match val {
                Some(s) => unsafe { env::set_var(name, s) },
                None => unsafe { env::remove_var(name) },
            }
        }
    }

    #[test]
    #[serial]
    fn test_resolve_max_pool() {
        let sys_max = est_max_parallelism();

        assert_eq!(resolve_max_pool(None), sys_max);
        assert_eq!(resolve_max_pool(NonZeroUsize::new(1)), 1);
        assert_eq!(resolve_max_pool(NonZeroUsize::new(sys_max + 100)), sys_max);
    }
}
