use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::{Block, validate_chain};
use crate::consensus::normalize_peer_address;
use crate::error::{NodeError, PeerError};
use crate::transaction::Transaction;

/// Chain as served to readers and peers (`GET /chain`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainResponse {
    pub chain: Vec<Block>,
    pub length: usize,
    #[serde(default)]
    pub difficulty: u32,
}

/// In-memory ledger: the chain, the pending-transaction buffer and the peers
/// consulted during consensus.
///
/// Invariants maintained by this type:
/// - Always contains at least the genesis block.
/// - The chain only grows by appending a block that links to the tip, or is
///   replaced wholesale by [`Ledger::replace_chain`].
#[derive(Debug)]
pub struct Ledger {
    chain: Vec<Block>,
    difficulty: u32,
    pending_transactions: Vec<Transaction>,
    mining_reward: f64,
    peers: Vec<String>,
}

impl Ledger {
    /// Initialize a new ledger with a freshly minted genesis block.
    pub fn new(difficulty: u32, mining_reward: f64) -> Self {
        Self {
            chain: vec![Block::genesis()],
            difficulty,
            pending_transactions: Vec::new(),
            mining_reward,
            peers: Vec::new(),
        }
    }

    /// Return the last block in the chain.
    pub fn latest_block(&self) -> &Block {
        self.chain
            .last()
            .expect("Ledger should always have at least the genesis block")
    }

    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    pub fn pending_transactions(&self) -> &[Transaction] {
        &self.pending_transactions
    }

    /// Copy of the chain for readers that must not hold the ledger while
    /// they serialize or hash it.
    pub fn snapshot(&self) -> ChainResponse {
        ChainResponse {
            chain: self.chain.clone(),
            length: self.chain.len(),
            difficulty: self.difficulty,
        }
    }

    /// Buffer a transaction for the next block. No balance check is made.
    pub fn add_transaction(&mut self, transaction: Transaction) {
        self.pending_transactions.push(transaction);
        debug!(
            "pending buffer size now {}",
            self.pending_transactions.len()
        );
    }

    /// First mining phase: append the reward to the pending buffer, then drain
    /// the whole buffer into an unmined block on top of the current tip.
    pub fn prepare_block(&mut self, reward_address: &str) -> Block {
        self.pending_transactions
            .push(Transaction::reward(reward_address, self.mining_reward));

        let transactions = std::mem::take(&mut self.pending_transactions);
        Block::new(
            self.chain.len() as u64,
            transactions,
            self.latest_block().hash.clone(),
        )
    }

    /// Last mining phase: append a mined block. A block that no longer links
    /// to the tip is discarded.
    pub fn append_block(&mut self, block: Block) -> Result<&Block, NodeError> {
        let tip = &self.latest_block().hash;
        if block.previous_hash != *tip {
            return Err(NodeError::StaleBlock {
                expected: tip.clone(),
                found: block.previous_hash,
            });
        }
        self.chain.push(block);
        Ok(self.latest_block())
    }

    /// Put drained user transactions back in front of anything submitted
    /// since, so a failed mining job loses nothing.
    pub fn restore_pending(&mut self, mut transactions: Vec<Transaction>) {
        transactions.append(&mut self.pending_transactions);
        self.pending_transactions = transactions;
    }

    /// Mine all pending transactions (plus the reward) into a new block.
    pub fn mine_pending(&mut self, reward_address: &str) -> &Block {
        let mut block = self.prepare_block(reward_address);
        block.mine(self.difficulty);
        self.chain.push(block);
        self.latest_block()
    }

    /// Balance of `address`, recomputed from every transaction on the chain.
    pub fn get_balance(&self, address: &str) -> f64 {
        self.chain
            .iter()
            .flat_map(|block| &block.transactions)
            .map(|tx| tx.delta_for(address))
            .sum()
    }

    /// Link/hash validation of the local chain.
    pub fn is_chain_valid(&self) -> bool {
        validate_chain(&self.chain).is_ok()
    }

    /// Register a peer given as a URL or `host:port`. Returns the stored
    /// `host:port` form; registering the same peer twice is a no-op.
    pub fn register_node(&mut self, address: &str) -> Result<&str, PeerError> {
        let peer = normalize_peer_address(address)?;
        Ok(self.add_peer(peer))
    }

    /// Store a peer already reduced to `host:port`; duplicates are ignored.
    pub(crate) fn add_peer(&mut self, peer: String) -> &str {
        let pos = match self.peers.iter().position(|p| *p == peer) {
            Some(pos) => pos,
            None => {
                info!("registered peer {peer}");
                self.peers.push(peer);
                self.peers.len() - 1
            }
        };
        &self.peers[pos]
    }

    /// Registered peers in registration order.
    pub fn peers(&self) -> &[String] {
        &self.peers
    }

    /// Swap in a whole new chain. Blocks are kept as received, including
    /// their transmitted hashes. An empty chain is refused.
    pub fn replace_chain(&mut self, chain: Vec<Block>) -> bool {
        if chain.is_empty() {
            return false;
        }
        self.chain = chain;
        true
    }
}
