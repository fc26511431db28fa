use chrono::Utc;
use log::debug;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::GENESIS_PREVIOUS_HASH;
use crate::transaction::Transaction;

/// A single block in the chain holding a batch of transactions.
///
/// This is also the wire record exchanged between nodes, so field names and
/// the hash preimage built by [`Block::calculate_hash`] must not change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub transactions: Vec<Transaction>,
    pub timestamp: f64, // seconds since epoch (UTC)
    pub previous_hash: String,
    pub nonce: u64,   // Proof-of-Work nonce
    pub hash: String, // Cached hash of the block
}

impl Block {
    /// Create the genesis block (first block in the chain).
    pub fn genesis() -> Self {
        Self::new(0, Vec::new(), String::from(GENESIS_PREVIOUS_HASH))
    }

    /// Create a new block stamped with the current time (not mined yet).
    /// Call `mine()` to perform PoW.
    pub fn new(index: u64, transactions: Vec<Transaction>, previous_hash: String) -> Self {
        Self::new_with_timestamp(index, transactions, now_secs(), previous_hash)
    }

    pub fn new_with_timestamp(
        index: u64,
        transactions: Vec<Transaction>,
        timestamp: f64,
        previous_hash: String,
    ) -> Self {
        let mut block = Self {
            index,
            transactions,
            timestamp,
            previous_hash,
            nonce: 0,
            hash: String::new(),
        };
        block.hash = block.calculate_hash();
        block
    }

    /// SHA-256 over `index ∥ transactions ∥ timestamp ∥ previous_hash ∥ nonce`.
    ///
    /// Transactions are rendered as compact JSON and the timestamp with the
    /// shortest decimal that round-trips, so every node derives the same
    /// preimage from the same wire record.
    pub fn calculate_hash(&self) -> String {
        let txs_json = serde_json::to_string(&self.transactions).expect("serialize txs");
        let preimage = format!(
            "{}{}{}{}{}",
            self.index, txs_json, self.timestamp, self.previous_hash, self.nonce
        );
        let mut hasher = Sha256::new();
        hasher.update(preimage.as_bytes());
        hex::encode(hasher.finalize())
    }

    /// Perform Proof-of-Work: bump the nonce until the hash starts with
    /// `difficulty` hex zeros. Unbounded and CPU-bound.
    pub fn mine(&mut self, difficulty: u32) -> &str {
        while !self.meets_difficulty(difficulty) {
            self.nonce = self.nonce.wrapping_add(1);
            self.hash = self.calculate_hash();
        }
        debug!(
            "Block #{} mined: {} (nonce={})",
            self.index, self.hash, self.nonce
        );
        &self.hash
    }

    /// Whether the cached hash carries `difficulty` leading zeros.
    pub fn meets_difficulty(&self, difficulty: u32) -> bool {
        let difficulty = difficulty as usize;
        self.hash.len() >= difficulty && self.hash.bytes().take(difficulty).all(|c| c == b'0')
    }
}

fn now_secs() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}
