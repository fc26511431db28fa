//! A minimal proof-of-work ledger node.
//!
//! - `blockchain/`: blocks, hashing, mining and the [`Ledger`] itself
//! - `transaction/`: the transfer record blocks carry
//! - `consensus/`: longest-valid-chain resolution against peers
//! - [`node::Node`]: one ledger shared by concurrent request handlers
//! - `api/`: the HTTP routes peers and clients talk to

pub mod api;
pub mod blockchain;
pub mod config;
pub mod consensus;
pub mod error;
pub mod node;
pub mod transaction;

pub use blockchain::{Block, ChainResponse, Ledger};
pub use config::NodeConfig;
pub use consensus::{ChainSource, HttpChainSource, Resolution};
pub use error::{ChainError, NodeError, PeerError};
pub use node::Node;
pub use transaction::Transaction;
