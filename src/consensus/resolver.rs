use log::{debug, info, warn};

use super::ChainSource;
use crate::blockchain::{Block, ChainResponse, Ledger, validate_chain};
use crate::error::ChainError;

/// Outcome of one consensus round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Replaced,
    KeptLocal,
}

impl Resolution {
    pub fn is_replaced(self) -> bool {
        self == Resolution::Replaced
    }
}

/// A peer chain that is strictly longer than ours and passed validation.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub peer: String,
    pub chain: Vec<Block>,
}

/// Ask every peer for its chain and keep the longest valid one that beats
/// `local_len`.
///
/// Peers are visited in the given order and only a strictly greater length
/// displaces the current best, so the first peer wins a tie. Unreachable
/// peers, non-success answers and invalid chains are skipped.
pub async fn find_longest_chain<S>(
    source: &S,
    peers: &[String],
    local_len: usize,
) -> Option<Candidate>
where
    S: ChainSource + ?Sized,
{
    let mut max_length = local_len;
    let mut best = None;

    for peer in peers {
        let response = match source.fetch_chain(peer).await {
            Ok(response) => response,
            Err(e) => {
                warn!("CONSENSUS - skipping peer {peer}: {e}");
                continue;
            }
        };

        if response.length <= max_length {
            debug!(
                "CONSENSUS - peer {peer} length {} does not beat {max_length}",
                response.length
            );
            continue;
        }

        if let Err(e) = check_candidate(&response) {
            warn!("CONSENSUS - rejected chain from {peer}: {e}");
            continue;
        }

        debug!(
            "CONSENSUS - peer {peer} offers valid chain of length {}",
            response.length
        );
        max_length = response.length;
        best = Some(Candidate {
            peer: peer.clone(),
            chain: response.chain,
        });
    }

    best
}

fn check_candidate(response: &ChainResponse) -> Result<(), ChainError> {
    if response.length != response.chain.len() {
        return Err(ChainError::LengthMismatch {
            reported: response.length,
            actual: response.chain.len(),
        });
    }
    validate_chain(&response.chain)
}

/// Replace the ledger's chain with the longest valid chain among its peers,
/// if any is strictly longer.
pub async fn resolve_conflicts<S>(ledger: &mut Ledger, source: &S) -> Resolution
where
    S: ChainSource + ?Sized,
{
    let peers = ledger.peers().to_vec();
    match find_longest_chain(source, &peers, ledger.len()).await {
        Some(candidate) => adopt(ledger, candidate),
        None => Resolution::KeptLocal,
    }
}

pub(crate) fn adopt(ledger: &mut Ledger, candidate: Candidate) -> Resolution {
    let length = candidate.chain.len();
    if ledger.replace_chain(candidate.chain) {
        info!(
            "CONSENSUS - adopted chain of length {length} from {}",
            candidate.peer
        );
        Resolution::Replaced
    } else {
        Resolution::KeptLocal
    }
}
