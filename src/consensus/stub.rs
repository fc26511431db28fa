use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::ChainSource;
use crate::blockchain::{Block, ChainResponse};
use crate::error::PeerError;

/// Canned peer answers for tests. Peers with no script answer 503.
#[derive(Default)]
pub struct ScriptedSource {
    answers: HashMap<String, Result<ChainResponse, u16>>,
    calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn with_chain(self, peer: &str, chain: &[Block]) -> Self {
        let response = ChainResponse {
            chain: chain.to_vec(),
            length: chain.len(),
            difficulty: 1,
        };
        self.with_response(peer, response)
    }

    pub fn with_response(mut self, peer: &str, response: ChainResponse) -> Self {
        self.answers.insert(peer.to_string(), Ok(response));
        self
    }

    pub fn with_status(mut self, peer: &str, status: u16) -> Self {
        self.answers.insert(peer.to_string(), Err(status));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ChainSource for ScriptedSource {
    async fn fetch_chain(&self, peer: &str) -> Result<ChainResponse, PeerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.answers.get(peer) {
            Some(Ok(response)) => Ok(response.clone()),
            Some(Err(status)) => Err(PeerError::Status {
                peer: peer.to_string(),
                status: *status,
            }),
            None => Err(PeerError::Status {
                peer: peer.to_string(),
                status: 503,
            }),
        }
    }
}
