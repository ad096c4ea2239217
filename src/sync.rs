//! # Synchronization Utilities
//!
//! Mutex handling for the shared caches in this crate.
//!
//! Rust's standard library mutexes become "poisoned" when a thread panics
//! while holding the lock. The mutexes here guard caches of layout
//! results, and a cache holding a half-written entry is still safe to
//! read: the worst case is a recomputed layout. So poisoned locks are
//! recovered instead of propagated.
//!
//! | Scenario | Function |
//! |----------|----------|
//! | Library code | [`lock_recover`] |
//! | Need context in the log | [`lock_recover_debug`] |
//! | Test code | `.lock().unwrap()` |
//!
//! ```rust
//! use std::sync::Mutex;
//! use rich_layout::sync::lock_recover;
//!
//! let data = Mutex::new(vec![1, 2, 3]);
//! let guard = lock_recover(&data);
//! assert_eq!(guard.len(), 3);
//! ```

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock a mutex, recovering from poison if necessary.
///
/// # Panics
///
/// This function never panics. It always recovers from poison.
#[inline]
pub fn lock_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Lock a mutex, logging a warning with `context` when the lock was
/// poisoned.
#[inline]
pub fn lock_recover_debug<'a, T>(mutex: &'a Mutex<T>, context: &str) -> MutexGuard<'a, T> {
    mutex.lock().unwrap_or_else(|e| {
        log::warn!("mutex poison recovered at: {context}");
        e.into_inner()
    })
}
