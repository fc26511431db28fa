use std::env;
use std::str::FromStr;
use std::time::Duration;

use log::warn;

use crate::blockchain::{DEFAULT_DIFFICULTY, MAX_DIFFICULTY, MINING_REWARD};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_PEER_TIMEOUT_SECS: u64 = 5;

/// Node settings read from the environment (and `.env`, loaded in `main`).
#[derive(Debug, Clone, PartialEq)]
pub struct NodeConfig {
    pub host: String,
    pub port: u16,
    /// Reward address for blocks mined by this node.
    pub node_id: String,
    pub difficulty: u32,
    pub mining_reward: f64,
    pub peer_timeout: Duration,
}

impl NodeConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_or(&lookup, "PORT", DEFAULT_PORT);
        let node_id = lookup("NODE_ID")
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| format!("node_{port}"));

        let mut difficulty = parse_or(&lookup, "DIFFICULTY", DEFAULT_DIFFICULTY);
        if difficulty == 0 || difficulty > MAX_DIFFICULTY {
            warn!("DIFFICULTY must be in 1..={MAX_DIFFICULTY}, using {DEFAULT_DIFFICULTY}");
            difficulty = DEFAULT_DIFFICULTY;
        }

        let mining_reward = parse_or(&lookup, "MINING_REWARD", MINING_REWARD);
        let peer_timeout = Duration::from_secs(parse_or(
            &lookup,
            "PEER_TIMEOUT_SECS",
            DEFAULT_PEER_TIMEOUT_SECS,
        ));

        Self {
            host,
            port,
            node_id,
            difficulty,
            mining_reward,
            peer_timeout,
        }
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("ignoring unparseable {key}={raw:?}");
            default
        }),
        None => default,
    }
}
