use actix_web::{HttpResponse, Responder, get, post, web};
use log::warn;

use super::models::{NodesResponse, RegisterNodesRequest, RegisterNodesResponse, ResolveResponse};
use crate::node::Node;

#[post("/nodes/register")]
pub async fn register_nodes(
    node: web::Data<Node>,
    body: web::Json<RegisterNodesRequest>,
) -> impl Responder {
    let Some(addresses) = body.into_inner().nodes else {
        return HttpResponse::BadRequest().body("Error: Please supply a valid list of nodes");
    };

    match node.register_peers(&addresses) {
        Ok(total_nodes) => HttpResponse::Created().json(RegisterNodesResponse {
            message: "New nodes have been added",
            total_nodes,
        }),
        Err(e) => {
            warn!("POST /nodes/register - {e}");
            HttpResponse::BadRequest().body(e.to_string())
        }
    }
}

#[get("/nodes")]
pub async fn get_nodes(node: web::Data<Node>) -> impl Responder {
    HttpResponse::Ok().json(NodesResponse {
        nodes: node.peers(),
    })
}

/// Run consensus: adopt the longest valid peer chain if it beats ours.
#[get("/nodes/resolve")]
pub async fn resolve_conflicts(node: web::Data<Node>) -> impl Responder {
    let (outcome, snapshot) = node.resolve().await;
    let replaced = outcome.is_replaced();
    HttpResponse::Ok().json(ResolveResponse {
        message: if replaced {
            "Our chain was replaced"
        } else {
            "Our chain is authoritative"
        },
        replaced,
        chain: snapshot.chain,
    })
}
