//! Boundary tests driving the plugin through its C-ABI table.
//!
//! The handle table and string counter are process-global, so every test
//! serialises on one lock before touching them. Invocations here use only
//! payloads that fail decoding or routing; nothing in this module spawns a
//! real emacsclient.

use std::ffi::{CStr, CString, c_char, c_void};
use std::ptr;
use std::sync::{Mutex, MutexGuard, PoisonError};

use rstest::rstest;
use serde_json::Value;

use super::*;

static BOUNDARY_LOCK: Mutex<()> = Mutex::new(());

fn boundary_lock() -> MutexGuard<'static, ()> {
    BOUNDARY_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}

fn api() -> &'static PluginApi {
    let table = osaurus_plugin_entry();
    assert!(!table.is_null(), "entry returned a null table");
    unsafe { &*table }
}

fn init(api: &PluginApi) -> *mut c_void {
    let init_fn = api.init.expect("init slot");
    let handle = unsafe { init_fn() };
    assert!(!handle.is_null(), "init returned a null handle");
    handle
}

fn destroy(api: &PluginApi, handle: *mut c_void) {
    let destroy_fn = api.destroy.expect("destroy slot");
    unsafe { destroy_fn(handle) };
}

/// Copies a returned string and releases it through `free_string`.
fn take_string(api: &PluginApi, ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    let copied = unsafe { CStr::from_ptr(ptr) }
        .to_str()
        .expect("boundary strings are UTF-8")
        .to_owned();
    let free_fn = api.free_string.expect("free_string slot");
    unsafe { free_fn(ptr) };
    Some(copied)
}

fn invoke(
    api: &PluginApi,
    handle: *mut c_void,
    capability_type: &str,
    capability_id: &str,
    payload: &str,
) -> *const c_char {
    let capability_type = CString::new(capability_type).expect("type argument");
    let capability_id = CString::new(capability_id).expect("id argument");
    let payload = CString::new(payload).expect("payload argument");
    let invoke_fn = api.invoke.expect("invoke slot");
    unsafe {
        invoke_fn(
            handle,
            capability_type.as_ptr(),
            capability_id.as_ptr(),
            payload.as_ptr(),
        )
    }
}

fn error_field(document: &str) -> String {
    let value: Value = serde_json::from_str(document).expect("valid JSON document");
    value["error"].as_str().expect("error field").to_owned()
}

// ---------------------------------------------------------------------------
// Table shape
// ---------------------------------------------------------------------------

#[test]
fn entry_table_is_fully_populated() {
    let api = api();
    assert!(api.free_string.is_some());
    assert!(api.init.is_some());
    assert!(api.destroy.is_some());
    assert!(api.get_manifest.is_some());
    assert!(api.invoke.is_some());
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[test]
fn init_yields_independent_handles() {
    let _guard = boundary_lock();
    let api = api();
    let contexts_before = live_context_count();

    let first = init(api);
    let second = init(api);
    assert_ne!(first, second);
    assert_eq!(live_context_count(), contexts_before + 2);

    // Destroying one handle must leave the other usable.
    destroy(api, first);
    let get_manifest = api.get_manifest.expect("get_manifest slot");
    let manifest = take_string(api, unsafe { get_manifest(second) });
    assert!(manifest.is_some());

    destroy(api, second);
    assert_eq!(live_context_count(), contexts_before);
}

#[test]
fn operations_after_destroy_return_null() {
    let _guard = boundary_lock();
    let api = api();

    let handle = init(api);
    destroy(api, handle);

    let get_manifest = api.get_manifest.expect("get_manifest slot");
    assert!(unsafe { get_manifest(handle) }.is_null());
    assert!(invoke(api, handle, "tool", "execute_emacs_lisp_code", "{}").is_null());

    // Double destroy falls out of the table lookup without touching
    // anything.
    destroy(api, handle);
}

// ---------------------------------------------------------------------------
// Manifest
// ---------------------------------------------------------------------------

#[test]
fn manifest_fetches_are_byte_identical_and_released() {
    let _guard = boundary_lock();
    let api = api();
    let strings_before = live_string_count();

    let handle = init(api);
    let get_manifest = api.get_manifest.expect("get_manifest slot");

    let first = take_string(api, unsafe { get_manifest(handle) }).expect("manifest string");
    let second = take_string(api, unsafe { get_manifest(handle) }).expect("manifest string");
    assert_eq!(first, second);

    let value: Value = serde_json::from_str(&first).expect("manifest parses");
    assert_eq!(value["plugin_id"], "osaurus.emacs");
    assert_eq!(
        value["capabilities"]["tools"][0]["id"],
        "execute_emacs_lisp_code"
    );

    destroy(api, handle);
    assert_eq!(live_string_count(), strings_before);
}

// ---------------------------------------------------------------------------
// Invocation routing
// ---------------------------------------------------------------------------

#[test]
fn unknown_capability_routes_to_error_document() {
    let _guard = boundary_lock();
    let api = api();
    let handle = init(api);

    let response =
        take_string(api, invoke(api, handle, "prompt", "summarise", "{}")).expect("response");
    assert_eq!(error_field(&response), "Unknown capability");

    destroy(api, handle);
}

#[test]
fn invalid_payload_reaches_the_tool_handler() {
    let _guard = boundary_lock();
    let api = api();
    let handle = init(api);

    let response = take_string(
        api,
        invoke(api, handle, "tool", "execute_emacs_lisp_code", "not json"),
    )
    .expect("response");
    assert_eq!(
        error_field(&response),
        "Invalid arguments: expected 'code' field"
    );

    destroy(api, handle);
}

// ---------------------------------------------------------------------------
// Boundary misuse
// ---------------------------------------------------------------------------

#[rstest]
#[case::null_type(true, false, false)]
#[case::null_id(false, true, false)]
#[case::null_payload(false, false, true)]
fn null_arguments_return_null(
    #[case] null_type: bool,
    #[case] null_id: bool,
    #[case] null_payload: bool,
) {
    let _guard = boundary_lock();
    let api = api();
    let handle = init(api);

    let capability_type = CString::new("tool").expect("type argument");
    let capability_id = CString::new("execute_emacs_lisp_code").expect("id argument");
    let payload = CString::new("{}").expect("payload argument");
    let invoke_fn = api.invoke.expect("invoke slot");

    let response = unsafe {
        invoke_fn(
            handle,
            if null_type { ptr::null() } else { capability_type.as_ptr() },
            if null_id { ptr::null() } else { capability_id.as_ptr() },
            if null_payload { ptr::null() } else { payload.as_ptr() },
        )
    };
    assert!(response.is_null());

    destroy(api, handle);
}

#[test]
fn null_handle_and_null_string_are_quiet_noops() {
    let _guard = boundary_lock();
    let api = api();
    let strings_before = live_string_count();
    let contexts_before = live_context_count();

    let get_manifest = api.get_manifest.expect("get_manifest slot");
    assert!(unsafe { get_manifest(ptr::null_mut()) }.is_null());
    assert!(invoke(api, ptr::null_mut(), "tool", "execute_emacs_lisp_code", "{}").is_null());

    destroy(api, ptr::null_mut());
    let free = api.free_string.expect("free_string slot");
    unsafe { free(ptr::null()) };

    assert_eq!(live_string_count(), strings_before);
    assert_eq!(live_context_count(), contexts_before);
}

// ---------------------------------------------------------------------------
// Allocation pairing
// ---------------------------------------------------------------------------

#[test]
fn every_returned_string_has_one_matching_release() {
    let _guard = boundary_lock();
    let api = api();
    let strings_before = live_string_count();
    let handle = init(api);

    let mut held = Vec::new();
    let get_manifest = api.get_manifest.expect("get_manifest slot");
    for _ in 0..3 {
        held.push(unsafe { get_manifest(handle) });
        held.push(invoke(api, handle, "tool", "unknown", "{}"));
    }
    assert_eq!(live_string_count(), strings_before + held.len());

    let free = api.free_string.expect("free_string slot");
    for ptr in held {
        assert!(!ptr.is_null());
        unsafe { free(ptr) };
    }
    assert_eq!(live_string_count(), strings_before);

    destroy(api, handle);
}
