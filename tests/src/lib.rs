//! # OpenLedger Client Test Suite
//!
//! Cross-crate flows driven against an in-memory node.
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/
//! │   └── codec_benchmarks.rs   # encode, digest, sign
//! └── src/
//!     └── integration/
//!         ├── mock_node.rs      # scripted node on a duplex WebSocket
//!         └── flows.rs          # client → transport → node and back
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p ol-tests
//! cargo test -p ol-tests integration::
//!
//! # Benchmarks
//! cargo bench -p ol-tests
//! ```

pub mod integration;
