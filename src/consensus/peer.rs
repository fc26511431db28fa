use reqwest::Url;

use crate::error::PeerError;

/// Reduce a peer given as `http://host:port/...` or bare `host:port` to
/// `host:port`.
pub fn normalize_peer_address(address: &str) -> Result<String, PeerError> {
    let trimmed = address.trim();
    // Bare `host:port` would otherwise parse as a scheme, or not at all.
    let url = if trimmed.contains("://") {
        Url::parse(trimmed)
    } else {
        Url::parse(&format!("http://{trimmed}"))
    }
    .map_err(|_| PeerError::InvalidAddress(address.to_string()))?;

    let host = url
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| PeerError::InvalidAddress(address.to_string()))?;

    Ok(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}
