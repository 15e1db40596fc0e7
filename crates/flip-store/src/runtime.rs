//! Process-wide native runtime lifecycle.
//!
//! Native multi-frame backends typically require one-time library
//! initialization and a matching teardown. Rather than coordinating that
//! implicitly through destructors of unrelated objects, this module keeps
//! explicit process-wide state with paired calls:
//!
//! - [`acquire`] - increments the runtime refcount; the **first** acquire
//!   runs genesis (library initialization)
//! - [`release`] - decrements the refcount; the **last** release runs
//!   terminus (library teardown)
//!
//! Every store instance holds a [`RuntimeGuard`] so pairing is automatic
//! for the common case, while the functions stay available for callers
//! that need to pin the runtime across store lifetimes.
//!
//! Calling [`release`] without a matching [`acquire`] is a programming
//! error and panics.

use std::sync::Mutex;

static REFCOUNT: Mutex<usize> = Mutex::new(0);

/// RAII handle on the process runtime.
///
/// Dropping the guard releases the reference it holds.
#[derive(Debug)]
pub struct RuntimeGuard(());

impl Drop for RuntimeGuard {
    fn drop(&mut self) {
        release();
    }
}

/// Acquires a reference on the process runtime.
///
/// The first acquire initializes the shared native state (genesis).
pub fn acquire() -> RuntimeGuard {
    let mut refs = REFCOUNT.lock().unwrap();
    if *refs == 0 {
        genesis();
    }
    *refs += 1;
    RuntimeGuard(())
}

/// Releases one reference on the process runtime.
///
/// The last release tears the shared native state down (terminus).
///
/// # Panics
///
/// Panics if the runtime refcount is already zero.
pub fn release() {
    let mut refs = REFCOUNT.lock().unwrap();
    assert!(*refs > 0, "runtime released more times than acquired");
    *refs -= 1;
    if *refs == 0 {
        terminus();
    }
}

/// Returns `true` if the runtime is currently initialized.
pub fn is_initialized() -> bool {
    *REFCOUNT.lock().unwrap() > 0
}

fn genesis() {
    tracing::debug!("frame runtime genesis");
}

fn terminus() {
    tracing::debug!("frame runtime terminus");
}
