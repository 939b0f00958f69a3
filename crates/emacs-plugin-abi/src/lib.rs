//! C-ABI dispatch surface for the Osaurus Emacs plugin.
//!
//! The host loads this library, resolves [`osaurus_plugin_entry`], and
//! drives the plugin exclusively through the returned [`PluginApi`] table:
//! `init`/`destroy` bound the context lifecycle, `get_manifest` serves
//! discovery, `invoke` routes tool calls, and `free_string` releases every
//! non-null string any other slot returned.
//!
//! Failure is signalled by absence at this layer: null or unknown handles,
//! null arguments, and non-UTF-8 input all yield a null return, because
//! structured errors cannot unwind across the boundary. Semantic failures
//! arrive as parseable `{"error": …}` documents produced below the
//! boundary in `emacs-plugin`; this crate never inspects them.

mod context;
mod strings;

#[cfg(test)]
mod tests;

use std::ffi::{CStr, c_char, c_void};
use std::ptr;

use tracing::debug;

pub use self::context::live_context_count;
pub use self::strings::live_string_count;

/// Tracing target for boundary operations.
const ABI_TARGET: &str = "osaurus_emacs::abi";

/// Function-pointer table exposed to the host.
///
/// Slot order and signatures are ABI-stable. Every slot is populated; the
/// `Option` wrapping exists so a null slot stays representable at the ABI
/// level, which is how the host probes for optional operations.
#[repr(C)]
pub struct PluginApi {
    /// Releases a string previously returned by any other slot. The host
    /// must call this on every non-null string result after use.
    pub free_string: Option<unsafe extern "C" fn(*const c_char)>,
    /// Allocates a plugin context; null on failure. Each call yields an
    /// independent context.
    pub init: Option<unsafe extern "C" fn() -> *mut c_void>,
    /// Destroys a context created by `init`. Must be called exactly once
    /// per handle.
    pub destroy: Option<unsafe extern "C" fn(*mut c_void)>,
    /// Returns the manifest JSON as an owned string.
    pub get_manifest: Option<unsafe extern "C" fn(*mut c_void) -> *const c_char>,
    /// Routes an invocation by `(type, id, payload)`; returns an owned
    /// `{"result": …}` or `{"error": …}` document.
    pub invoke: Option<
        unsafe extern "C" fn(
            *mut c_void,
            *const c_char,
            *const c_char,
            *const c_char,
        ) -> *const c_char,
    >,
}

static PLUGIN_API: PluginApi = PluginApi {
    free_string: Some(plugin_free_string),
    init: Some(plugin_init),
    destroy: Some(plugin_destroy),
    get_manifest: Some(plugin_get_manifest),
    invoke: Some(plugin_invoke),
};

/// Entry point the host resolves after loading the library. The returned
/// table lives for the whole process; the host must not free it.
#[unsafe(no_mangle)]
#[must_use]
pub extern "C" fn osaurus_plugin_entry() -> *const PluginApi {
    &raw const PLUGIN_API
}

unsafe extern "C" fn plugin_free_string(ptr: *const c_char) {
    unsafe { strings::release(ptr) };
}

unsafe extern "C" fn plugin_init() -> *mut c_void {
    let handle = context::insert();
    debug!(target: ABI_TARGET, handle, "context initialised");
    // Handles are table ids, never dereferenced as addresses.
    ptr::without_provenance_mut(handle)
}

unsafe extern "C" fn plugin_destroy(handle: *mut c_void) {
    if handle.is_null() {
        return;
    }
    let released = context::remove(handle.addr());
    debug!(target: ABI_TARGET, handle = handle.addr(), released, "context destroyed");
}

unsafe extern "C" fn plugin_get_manifest(handle: *mut c_void) -> *const c_char {
    if handle.is_null() {
        return ptr::null();
    }
    context::get(handle.addr()).map_or(ptr::null(), |ctx| {
        strings::into_owned(ctx.manifest_json().to_owned())
    })
}

unsafe extern "C" fn plugin_invoke(
    handle: *mut c_void,
    type_ptr: *const c_char,
    id_ptr: *const c_char,
    payload_ptr: *const c_char,
) -> *const c_char {
    if handle.is_null() {
        return ptr::null();
    }
    let Some(ctx) = context::get(handle.addr()) else {
        return ptr::null();
    };
    let (Some(capability_type), Some(capability_id), Some(payload)) = (
        unsafe { arg_str(type_ptr) },
        unsafe { arg_str(id_ptr) },
        unsafe { arg_str(payload_ptr) },
    ) else {
        return ptr::null();
    };

    strings::into_owned(ctx.invoke(capability_type, capability_id, payload))
}

/// Borrows a boundary argument as UTF-8; null or invalid bytes are `None`.
///
/// # Safety
///
/// `ptr` must be null or point at a NUL-terminated string that outlives
/// the returned borrow.
unsafe fn arg_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}
