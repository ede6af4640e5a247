//! Notice callback registry.
//!
//! Maps client-assigned callback ids to the handlers that receive the
//! matching server-pushed payloads.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Handler invoked on the reader task with each notice payload.
pub type NoticeHandler = Arc<dyn Fn(Value) + Send + Sync>;

/// Client-assigned callback id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CallbackId(pub u64);

impl fmt::Display for CallbackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Default)]
struct Registry {
    handlers: HashMap<u64, NoticeHandler>,
    /// Last id handed out
    last_id: u64,
}

/// Callback registry
#[derive(Default)]
pub struct CallbackRegistry {
    inner: Mutex<Registry>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `handler` under the next id. Ids start at 1 and wrap past
    /// `u64::MAX` back to 1.
    pub fn register(&self, handler: NoticeHandler) -> CallbackId {
        let mut inner = self.inner.lock();
        inner.last_id = next_id(inner.last_id);
        let id = inner.last_id;
        inner.handlers.insert(id, handler);
        drop(inner);

        debug!(callback_id = id, "Registered notice callback");
        CallbackId(id)
    }

    /// Remove one registration.
    pub fn remove(&self, id: CallbackId) -> bool {
        let removed = self.inner.lock().handlers.remove(&id.0).is_some();
        if removed {
            debug!(callback_id = id.0, "Removed notice callback");
        }
        removed
    }

    /// Handler for `id`, cloned out so it runs without the lock held.
    pub fn get(&self, id: u64) -> Option<NoticeHandler> {
        self.inner.lock().handlers.get(&id).cloned()
    }

    /// Drop every registration, returning how many there were.
    pub fn clear(&self) -> usize {
        let mut inner = self.inner.lock();
        let count = inner.handlers.len();
        inner.handlers.clear();
        count
    }

    pub fn len(&self) -> usize {
        self.inner.lock().handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[cfg(test)]
    fn set_last_id(&self, id: u64) {
        self.inner.lock().last_id = id;
    }
}

/// Successor of `id` in the 1..=u64::MAX cycle.
pub(crate) fn next_id(id: u64) -> u64 {
    if id == u64::MAX {
        1
    } else {
        id + 1
    }
}
