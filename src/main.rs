use actix_web::{App, HttpServer, web};
use dotenvy::dotenv;
use log::info;

use ledger_node::{HttpChainSource, Ledger, Node, NodeConfig, api};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let _ = dotenv();
    env_logger::init();

    let config = NodeConfig::from_env();
    let source = HttpChainSource::new(config.peer_timeout).map_err(std::io::Error::other)?;
    let ledger = Ledger::new(config.difficulty, config.mining_reward);

    info!(
        "⛓️ Starting ledger node {} at http://{}:{} (difficulty={}, reward={})",
        config.node_id, config.host, config.port, config.difficulty, config.mining_reward
    );

    let node = web::Data::new(Node::new(config.node_id.clone(), ledger, source));

    HttpServer::new(move || {
        App::new()
            .app_data(node.clone())
            .configure(api::init_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
