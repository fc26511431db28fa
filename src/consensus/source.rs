use async_trait::async_trait;

use crate::blockchain::ChainResponse;
use crate::error::PeerError;

/// Where the resolver gets a peer's chain from.
#[async_trait]
pub trait ChainSource: Send + Sync {
    /// Fetch the chain `peer` (a `host:port`) currently reports.
    async fn fetch_chain(&self, peer: &str) -> Result<ChainResponse, PeerError>;
}
