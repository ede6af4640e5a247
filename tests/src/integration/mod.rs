//! End-to-end flows over a real [`WsTransport`](ol_03_transport::WsTransport).

pub mod flows;
pub mod mock_node;

pub use mock_node::{reference_chain, MockNode, CHAIN_ID};
