use actix_web::{HttpResponse, Responder, get, web};

use crate::node::Node;

#[get("/")]
pub async fn index(node: web::Data<Node>) -> impl Responder {
    HttpResponse::Ok().body(format!("Ledger node {} is up and running 🦀", node.id()))
}
