//! Pending Call Table - correlates request ids with waiting callers.
//!
//! Flow:
//! 1. A caller allocates a request id and calls `register()` for a receiver
//! 2. The caller sends the request and awaits the receiver
//! 3. The reader task sees the response and calls `complete()`
//! 4. On connection loss `shutdown()` resolves everything still waiting

use crate::domain::error::TransportError;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;
use tokio::sync::oneshot;
use tracing::{debug, warn};

/// Outcome delivered to a waiting caller.
pub type CallResult = Result<Value, TransportError>;

/// A call waiting for its response
struct PendingCall {
    /// Channel to deliver the outcome
    sender: oneshot::Sender<CallResult>,
    /// When the call was registered
    created_at: Instant,
    /// Method name (for logging)
    method: String,
}

/// Statistics for the pending call table
#[derive(Debug, Default)]
pub struct PendingStats {
    /// Total calls registered
    pub total_registered: AtomicU64,
    /// Total calls answered by the node
    pub total_completed: AtomicU64,
    /// Responses that arrived after the caller stopped waiting
    pub total_abandoned: AtomicU64,
    /// Calls resolved by connection shutdown
    pub total_shutdown: AtomicU64,
}

#[derive(Default)]
struct Table {
    calls: HashMap<u64, PendingCall>,
    closed: bool,
}

/// Request id → waiting caller.
///
/// Every critical section is a single map operation; no I/O happens under
/// the lock.
#[derive(Default)]
pub struct PendingCalls {
    table: Mutex<Table>,
    stats: PendingStats,
}

impl PendingCalls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a call and get the receiver for its outcome.
    ///
    /// Fails with [`TransportError::Shutdown`] once the table is closed.
    pub fn register(
        &self,
        id: u64,
        method: &str,
    ) -> Result<oneshot::Receiver<CallResult>, TransportError> {
        let (tx, rx) = oneshot::channel();
        {
            let mut table = self.table.lock();
            if table.closed {
                return Err(TransportError::Shutdown);
            }
            table.calls.insert(
                id,
                PendingCall {
                    sender: tx,
                    created_at: Instant::now(),
                    method: method.to_string(),
                },
            );
        }
        self.stats.total_registered.fetch_add(1, Ordering::Relaxed);

        debug!(request_id = id, method = method, "Registered pending call");
        Ok(rx)
    }

    /// Deliver the outcome of call `id`.
    ///
    /// Returns true if a caller received it, false if the id is unknown or
    /// its caller has stopped waiting.
    pub fn complete(&self, id: u64, result: CallResult) -> bool {
        let Some(pending) = self.table.lock().calls.remove(&id) else {
            warn!(request_id = id, "Response for unknown request id");
            return false;
        };

        let elapsed = pending.created_at.elapsed();
        match pending.sender.send(result) {
            Ok(()) => {
                self.stats.total_completed.fetch_add(1, Ordering::Relaxed);
                debug!(
                    request_id = id,
                    method = %pending.method,
                    response_time_ms = elapsed.as_millis(),
                    "Completed pending call"
                );
                true
            }
            Err(_) => {
                self.stats.total_abandoned.fetch_add(1, Ordering::Relaxed);
                warn!(
                    request_id = id,
                    method = %pending.method,
                    response_time_ms = elapsed.as_millis(),
                    "Discarding response for abandoned call"
                );
                false
            }
        }
    }

    /// Drop call `id` without resolving it (its request never left).
    pub fn remove(&self, id: u64) -> bool {
        self.table.lock().calls.remove(&id).is_some()
    }

    /// Close the table and resolve every waiting call with `Shutdown`.
    ///
    /// Returns the number of calls resolved. Later registrations fail.
    pub fn shutdown(&self) -> usize {
        let drained: Vec<(u64, PendingCall)> = {
            let mut table = self.table.lock();
            table.closed = true;
            table.calls.drain().collect()
        };

        let count = drained.len();
        for (id, pending) in drained {
            debug!(request_id = id, method = %pending.method, "Resolving call on shutdown");
            let _ = pending.sender.send(Err(TransportError::Shutdown));
        }
        self.stats
            .total_shutdown
            .fetch_add(count as u64, Ordering::Relaxed);
        count
    }

    pub fn is_pending(&self, id: u64) -> bool {
        self.table.lock().calls.contains_key(&id)
    }

    pub fn is_closed(&self) -> bool {
        self.table.lock().closed
    }

    /// Number of calls currently waiting
    pub fn len(&self) -> usize {
        self.table.lock().calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> &PendingStats {
        &self.stats
    }
}
