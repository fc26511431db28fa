use actix_web::{HttpResponse, Responder, get, post, web};
use log::error;

use super::models::{MineResponse, ValidateResponse};
use crate::node::Node;

/// Get the full chain. Peers call this during consensus.
#[get("/chain")]
pub async fn get_chain(node: web::Data<Node>) -> impl Responder {
    HttpResponse::Ok().json(node.chain())
}

/// Mine the pending transactions, rewarding this node.
#[post("/mine")]
pub async fn mine(node: web::Data<Node>) -> impl Responder {
    match node.mine().await {
        Ok(block) => HttpResponse::Ok().json(MineResponse {
            message: "New block mined successfully",
            block,
        }),
        Err(e) => {
            error!("POST /mine - {e}");
            HttpResponse::InternalServerError().body(e.to_string())
        }
    }
}

/// Validate the whole chain (links and hashes only).
#[get("/validate")]
pub async fn validate_chain(node: web::Data<Node>) -> impl Responder {
    let valid = node.is_chain_valid();
    HttpResponse::Ok().json(ValidateResponse {
        valid,
        message: if valid {
            "Blockchain is valid"
        } else {
            "Blockchain is invalid"
        },
    })
}
