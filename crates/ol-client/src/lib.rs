//! # OpenLedger Client
//!
//! High-level entry point: connect to a node, then transfer, place and
//! cancel orders with WIF keys.
//!
//! ```ignore
//! use ol_client::{Client, ClientConfig};
//! use shared_types::{AssetAmount, ObjectId};
//!
//! let client = Client::connect(&ClientConfig::load("ol-client.toml")?).await?;
//! client
//!     .transfer(
//!         &wif,
//!         "1.2.974337".parse()?,
//!         "1.2.22805".parse()?,
//!         AssetAmount::new(1_000_000, ObjectId::CORE_ASSET),
//!         AssetAmount::new(0, ObjectId::CORE_ASSET),
//!     )
//!     .await?;
//! client.close().await?;
//! ```
//!
//! The lower layers are re-exported for callers that need them directly.

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod errors;

pub use client::Client;
pub use config::{ClientConfig, ConfigError, NodeConfig, TransactionConfig};
pub use errors::ClientError;

pub use ol_01_encoding as encoding;
pub use ol_02_signing as signing;
pub use ol_03_transport as transport;
pub use ol_04_apis as apis;
pub use shared_types as types;
