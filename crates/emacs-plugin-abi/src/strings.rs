//! Owned C strings handed across the boundary, with allocation tracking.
//!
//! Every string returned to the host is allocated here and must be
//! released through [`release`] exactly once; the core never frees a
//! string it has returned. The live counter exists so tests can verify the
//! pairing.

use std::ffi::{CString, c_char};
use std::ptr;
use std::sync::atomic::{AtomicUsize, Ordering};

static LIVE_STRINGS: AtomicUsize = AtomicUsize::new(0);

/// Moves `payload` into a heap C string owned by the caller.
///
/// Returns null when the payload contains an interior NUL byte, which our
/// JSON output never does; the check exists so boundary output can never
/// be a truncated buffer.
pub(crate) fn into_owned(payload: String) -> *const c_char {
    CString::new(payload).map_or(ptr::null(), |owned| {
        LIVE_STRINGS.fetch_add(1, Ordering::Relaxed);
        owned.into_raw().cast_const()
    })
}

/// Releases a string previously produced by [`into_owned`]. Null is a
/// no-op.
///
/// # Safety
///
/// `ptr` must be null or a pointer obtained from [`into_owned`] that has
/// not already been released.
pub(crate) unsafe fn release(ptr: *const c_char) {
    if ptr.is_null() {
        return;
    }
    LIVE_STRINGS.fetch_sub(1, Ordering::Relaxed);
    drop(unsafe { CString::from_raw(ptr.cast_mut()) });
}

/// Number of boundary strings currently held by the host.
#[must_use]
pub fn live_string_count() -> usize {
    LIVE_STRINGS.load(Ordering::Relaxed)
}
