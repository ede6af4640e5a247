//! WebSocket adapter for the [`Caller`](crate::ports::Caller) port.

pub mod transport;

pub use transport::{ConnectionState, WsTransport};
