use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use actix_web::web;
use log::{debug, info, warn};
use tokio::sync::Mutex;

use crate::blockchain::{Block, ChainResponse, Ledger, validate_chain};
use crate::consensus::{ChainSource, Resolution, adopt, find_longest_chain, normalize_peer_address};
use crate::error::NodeError;
use crate::transaction::Transaction;

/// One node's ledger plus the discipline around it.
///
/// The ledger lock is only held for short critical sections. Mining and
/// consensus additionally hold `mutation` for their whole run, so they
/// serialize with each other while reads and transaction intake continue.
pub struct Node {
    id: String,
    ledger: RwLock<Ledger>,
    mutation: Mutex<()>,
    source: Box<dyn ChainSource>,
}

impl Node {
    pub fn new(id: impl Into<String>, ledger: Ledger, source: impl ChainSource + 'static) -> Self {
        Self {
            id: id.into(),
            ledger: RwLock::new(ledger),
            mutation: Mutex::new(()),
            source: Box::new(source),
        }
    }

    /// Address credited with the reward for blocks this node mines.
    pub fn id(&self) -> &str {
        &self.id
    }

    fn read(&self) -> RwLockReadGuard<'_, Ledger> {
        self.ledger.read().expect("ledger lock poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, Ledger> {
        self.ledger.write().expect("ledger lock poisoned")
    }

    pub fn chain(&self) -> ChainResponse {
        self.read().snapshot()
    }

    pub fn submit_transaction(&self, transaction: Transaction) {
        debug!(
            "TX - from={:?} to={} amount={}",
            transaction.from, transaction.to, transaction.amount
        );
        self.write().add_transaction(transaction);
    }

    pub fn balance(&self, address: &str) -> f64 {
        self.read().get_balance(address)
    }

    /// Validates a copy so hashing does not hold the ledger.
    pub fn is_chain_valid(&self) -> bool {
        let snapshot = self.chain();
        validate_chain(&snapshot.chain).is_ok()
    }

    /// Register every address or none: the first malformed one aborts.
    pub fn register_peers(&self, addresses: &[String]) -> Result<Vec<String>, NodeError> {
        let normalized = addresses
            .iter()
            .map(|a| normalize_peer_address(a))
            .collect::<Result<Vec<_>, _>>()?;

        let mut ledger = self.write();
        for peer in normalized {
            ledger.add_peer(peer);
        }
        Ok(ledger.peers().to_vec())
    }

    pub fn peers(&self) -> Vec<String> {
        self.read().peers().to_vec()
    }

    /// Mine the pending buffer into a new block.
    ///
    /// The Proof-of-Work search runs on the blocking pool. If the job fails,
    /// the drained user transactions go back into the pending buffer.
    pub async fn mine(&self) -> Result<Block, NodeError> {
        let _gate = self.mutation.lock().await;

        let (mut block, difficulty) = {
            let mut ledger = self.write();
            (ledger.prepare_block(&self.id), ledger.difficulty())
        };
        let drained = block.transactions.clone();

        let mined = web::block(move || {
            block.mine(difficulty);
            block
        })
        .await;

        match mined {
            Ok(block) => self.seal(block, drained),
            Err(e) => {
                warn!("MINER - mining job failed: {e}");
                give_back(&mut self.write(), drained);
                Err(NodeError::Mining(e.to_string()))
            }
        }
    }

    /// Append a mined block. If it no longer extends the tip, it is dropped
    /// and its user transactions return to the pending buffer.
    fn seal(&self, block: Block, drained: Vec<Transaction>) -> Result<Block, NodeError> {
        let mut ledger = self.write();
        let sealed = ledger.append_block(block).cloned();
        match &sealed {
            Ok(block) => info!(
                "MINER - sealed block #{} (hash={}, nonce={}, txs={})",
                block.index,
                block.hash,
                block.nonce,
                block.transactions.len()
            ),
            Err(e) => {
                warn!("MINER - discarding mined block: {e}");
                give_back(&mut ledger, drained);
            }
        }
        sealed
    }

    /// Run one consensus round against the registered peers. The returned
    /// chain is the one the round settled on, taken before the gate opens.
    pub async fn resolve(&self) -> (Resolution, ChainResponse) {
        let _gate = self.mutation.lock().await;

        let (peers, local_len) = {
            let ledger = self.read();
            (ledger.peers().to_vec(), ledger.len())
        };

        let candidate = find_longest_chain(self.source.as_ref(), &peers, local_len).await;

        let mut ledger = self.write();
        let outcome = match candidate {
            Some(candidate) => adopt(&mut ledger, candidate),
            None => {
                debug!("CONSENSUS - local chain of length {local_len} is authoritative");
                Resolution::KeptLocal
            }
        };
        (outcome, ledger.snapshot())
    }
}

/// Return drained user transactions (reward excluded) to the pending buffer.
fn give_back(ledger: &mut Ledger, mut drained: Vec<Transaction>) {
    drained.pop(); // reward
    ledger.restore_pending(drained);
}
