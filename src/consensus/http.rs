use std::time::Duration;

use async_trait::async_trait;
use log::debug;

use super::ChainSource;
use crate::blockchain::ChainResponse;
use crate::error::PeerError;

/// Fetches `GET http://<peer>/chain`. Each request is bounded by the
/// configured timeout and never retried.
#[derive(Debug, Clone)]
pub struct HttpChainSource {
    client: reqwest::Client,
}

impl HttpChainSource {
    pub fn new(timeout: Duration) -> Result<Self, PeerError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client))
    }

    /// Use a pre-configured client; its timeout bounds each fetch.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ChainSource for HttpChainSource {
    async fn fetch_chain(&self, peer: &str) -> Result<ChainResponse, PeerError> {
        let url = format!("http://{peer}/chain");
        debug!("CONSENSUS - fetching {url}");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PeerError::Status {
                peer: peer.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.json::<ChainResponse>().await?)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use actix_web::{App, HttpResponse, HttpServer, web};

    use super::HttpChainSource;
    use crate::blockchain::{Ledger, validate_chain};
    use crate::consensus::{ChainSource, find_longest_chain};
    use crate::error::PeerError;

    #[derive(Debug, Clone, Copy)]
    enum Behaviour {
        Serve,
        Fail,
        Garbage,
        Stall,
    }

    fn three_block_chain() -> HttpResponse {
        let mut ledger = Ledger::new(1, 10.0);
        ledger.mine_pending("peer");
        ledger.mine_pending("peer");
        HttpResponse::Ok().json(ledger.snapshot())
    }

    async fn chain(behaviour: web::Data<Behaviour>) -> HttpResponse {
        match *behaviour.get_ref() {
            Behaviour::Serve => three_block_chain(),
            Behaviour::Fail => HttpResponse::InternalServerError().finish(),
            Behaviour::Garbage => HttpResponse::Ok().body("not a chain"),
            Behaviour::Stall => {
                actix_web::rt::time::sleep(Duration::from_secs(3)).await;
                three_block_chain()
            }
        }
    }

    /// Start a one-worker peer on an ephemeral port and return its `host:port`.
    fn spawn_peer(behaviour: Behaviour) -> String {
        let server = HttpServer::new(move || {
            App::new()
                .app_data(web::Data::new(behaviour))
                .route("/chain", web::get().to(chain))
        })
        .workers(1)
        .bind(("127.0.0.1", 0))
        .unwrap();
        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());
        addr.to_string()
    }

    // Loopback peers must not be routed through a proxy from the environment.
    fn source() -> HttpChainSource {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(500))
            .no_proxy()
            .build()
            .unwrap();
        HttpChainSource::with_client(client)
    }

    #[actix_web::test]
    async fn fetches_chain_from_peer() {
        let peer = spawn_peer(Behaviour::Serve);

        let response = source().fetch_chain(&peer).await.unwrap();

        assert_eq!(response.length, 3);
        assert_eq!(response.chain.len(), 3);
        assert!(validate_chain(&response.chain).is_ok());
    }

    #[actix_web::test]
    async fn non_success_status_is_reported() {
        let peer = spawn_peer(Behaviour::Fail);

        let err = source().fetch_chain(&peer).await.unwrap_err();

        match err {
            PeerError::Status { peer: p, status } => {
                assert_eq!(p, peer);
                assert_eq!(status, 500);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[actix_web::test]
    async fn undecodable_body_is_an_error() {
        let peer = spawn_peer(Behaviour::Garbage);

        let err = source().fetch_chain(&peer).await.unwrap_err();

        assert!(matches!(err, PeerError::Request(e) if e.is_decode()));
    }

    #[actix_web::test]
    async fn slow_peer_times_out() {
        let peer = spawn_peer(Behaviour::Stall);

        let err = source().fetch_chain(&peer).await.unwrap_err();

        assert!(matches!(err, PeerError::Request(e) if e.is_timeout()));
    }

    #[actix_web::test]
    async fn resolver_skips_bad_peers_over_http() {
        let peers = vec![
            spawn_peer(Behaviour::Fail),
            spawn_peer(Behaviour::Garbage),
            spawn_peer(Behaviour::Stall),
            spawn_peer(Behaviour::Serve),
        ];

        let best = find_longest_chain(&source(), &peers, 1).await.unwrap();

        assert_eq!(best.peer, peers[3]);
        assert_eq!(best.chain.len(), 3);
    }
}
