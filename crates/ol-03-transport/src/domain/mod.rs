//! Domain types for the transport.
//!
//! Wire envelopes, the error taxonomy, and the two tables shared between
//! callers and the reader task.

pub mod callbacks;
pub mod error;
pub mod pending;
pub mod protocol;

// Re-exports for convenience
pub use callbacks::{CallbackId, CallbackRegistry, NoticeHandler};
pub use error::{RpcError, TransportError};
pub use pending::{CallResult, PendingCalls, PendingStats};
pub use protocol::{ApiId, Incoming, RpcRequest};
