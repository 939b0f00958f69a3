//! Handle table mapping opaque host handles to live plugin contexts.
//!
//! Handles are small integer ids rather than raw pointers, so a stale or
//! forged handle fails a table lookup instead of dereferencing freed
//! memory. Ids start at 1; zero would be indistinguishable from the null
//! sentinel at the boundary.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, Mutex, MutexGuard, PoisonError};

use emacs_plugin::PluginContext;

struct ContextTable {
    next_id: usize,
    live: HashMap<usize, Arc<PluginContext>>,
}

static CONTEXTS: LazyLock<Mutex<ContextTable>> = LazyLock::new(|| {
    Mutex::new(ContextTable {
        next_id: 1,
        live: HashMap::new(),
    })
});

fn table() -> MutexGuard<'static, ContextTable> {
    CONTEXTS.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Allocates a fresh context and returns its handle id. Each call mints an
/// independent context; repeated `init` calls are never deduplicated.
pub(crate) fn insert() -> usize {
    let mut guard = table();
    let id = guard.next_id;
    guard.next_id = guard.next_id.wrapping_add(1);
    guard.live.insert(id, Arc::new(PluginContext::new()));
    id
}

/// Looks up a live context by handle id.
pub(crate) fn get(id: usize) -> Option<Arc<PluginContext>> {
    table().live.get(&id).map(Arc::clone)
}

/// Removes a context; returns `true` when the handle was live.
pub(crate) fn remove(id: usize) -> bool {
    table().live.remove(&id).is_some()
}

/// Number of live contexts. Exposed so boundary tests can assert that
/// every `init` is paired with exactly one `destroy`.
#[must_use]
pub fn live_context_count() -> usize {
    table().live.len()
}
