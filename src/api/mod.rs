mod balance;
mod chain;
mod health;
pub mod models;
mod nodes;
mod tx;

use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::web::{self, ServiceConfig};
use actix_web::{HttpRequest, HttpResponse};
use log::warn;

/// Routes peers and clients rely on. The paths are part of the node-to-node
/// protocol (`GET /chain` in particular) and must stay stable.
pub fn init_routes(cfg: &mut ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(reject_body))
        .service(health::index)
        .service(chain::get_chain)
        .service(chain::mine)
        .service(chain::validate_chain)
        .service(tx::new_transaction)
        .service(balance::get_balance)
        .service(nodes::register_nodes)
        .service(nodes::resolve_conflicts)
        .service(nodes::get_nodes);
}

/// Malformed or incomplete JSON bodies are answered with a plain 400.
fn reject_body(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!("{} {} - rejected body: {err}", req.method(), req.path());
    InternalError::from_response(err, HttpResponse::BadRequest().body("Missing values")).into()
}
