//! Longest-valid-chain consensus between nodes.

mod http;
mod peer;
mod resolver;
mod source;

#[cfg(test)]
pub(crate) mod stub;

pub use http::HttpChainSource;
pub use peer::normalize_peer_address;
pub use resolver::{Candidate, Resolution, find_longest_chain, resolve_conflicts};
pub(crate) use resolver::adopt;
pub use source::ChainSource;
