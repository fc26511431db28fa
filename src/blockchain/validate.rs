use super::Block;
use crate::error::ChainError;

/// Link/hash validation shared by the local chain and chains received from
/// peers.
///
/// For every block after the first, its stored `hash` must equal the hash of
/// its contents and its `previous_hash` must equal the predecessor's stored
/// `hash`. The genesis block is taken as-is, and the Proof-of-Work target is
/// not checked: a correctly linked but under-mined block passes.
pub fn validate_chain(blocks: &[Block]) -> Result<(), ChainError> {
    for pair in blocks.windows(2) {
        let (prev, current) = (&pair[0], &pair[1]);

        if current.hash != current.calculate_hash() {
            return Err(ChainError::HashMismatch {
                index: current.index,
            });
        }
        if current.previous_hash != prev.hash {
            return Err(ChainError::BrokenLink {
                index: current.index,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::validate_chain;
    use crate::blockchain::Block;
    use crate::error::ChainError;
    use crate::transaction::Transaction;

    fn chain_of(len: usize) -> Vec<Block> {
        let mut blocks = vec![Block::genesis()];
        for i in 1..len {
            let prev = blocks[i - 1].hash.clone();
            let mut b = Block::new(i as u64, vec![Transaction::reward("R", 10.0)], prev);
            b.mine(1);
            blocks.push(b);
        }
        blocks
    }

    #[test]
    fn empty_and_single_block_chains_pass() {
        assert!(validate_chain(&[]).is_ok());
        assert!(validate_chain(&chain_of(1)).is_ok());
    }

    #[test]
    fn reports_first_hash_mismatch() {
        let mut blocks = chain_of(4);
        blocks[2].nonce += 1;
        blocks[3].nonce += 1;
        assert_eq!(
            validate_chain(&blocks),
            Err(ChainError::HashMismatch { index: 2 })
        );
    }

    #[test]
    fn reports_broken_link_with_consistent_hash() {
        let mut blocks = chain_of(3);
        blocks[2].previous_hash = "f".repeat(64);
        blocks[2].hash = blocks[2].calculate_hash();
        assert_eq!(
            validate_chain(&blocks),
            Err(ChainError::BrokenLink { index: 2 })
        );
    }

    #[test]
    fn genesis_hash_is_not_checked() {
        let mut blocks = chain_of(1);
        blocks[0].hash = "anything".into();
        assert!(validate_chain(&blocks).is_ok());
    }
}
