//! Ports exposed to API wrappers.

pub mod outbound;

pub use outbound::{CallCloser, Caller, CallerExt};
