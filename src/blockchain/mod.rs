pub mod block;
pub mod model;
pub mod validate;

pub use block::Block;
pub use model::{ChainResponse, Ledger};
pub use validate::validate_chain;

/// Default Proof-of-Work difficulty (number of leading hex zeros).
pub const DEFAULT_DIFFICULTY: u32 = 2;

/// Hex characters in a SHA-256 digest; no higher difficulty can be met.
pub const MAX_DIFFICULTY: u32 = 64;

/// Amount credited to the miner of each block.
pub const MINING_REWARD: f64 = 10.0;

/// `previous_hash` carried by the genesis block.
pub const GENESIS_PREVIOUS_HASH: &str = "0";
