use thiserror::Error;

/// Why a sequence of blocks failed link/hash validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChainError {
    #[error("block {index} hash does not match its contents")]
    HashMismatch { index: u64 },

    #[error("block {index} does not link to its predecessor")]
    BrokenLink { index: u64 },

    #[error("peer reported length {reported} but sent {actual} blocks")]
    LengthMismatch { reported: usize, actual: usize },
}

#[derive(Debug, Error)]
pub enum PeerError {
    #[error("invalid peer address: {0:?}")]
    InvalidAddress(String),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("peer {peer} answered with status {status}")]
    Status { peer: String, status: u16 },
}

#[derive(Debug, Error)]
pub enum NodeError {
    #[error("mining job failed: {0}")]
    Mining(String),

    #[error("mined block no longer extends the tip (expected {expected}, found {found})")]
    StaleBlock { expected: String, found: String },

    #[error(transparent)]
    InvalidPeer(#[from] PeerError),
}
