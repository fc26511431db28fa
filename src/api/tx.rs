use actix_web::{HttpResponse, Responder, post, web};

use super::models::MessageResponse;
use crate::node::Node;
use crate::transaction::Transaction;

/// Buffer a transaction for the next block. Bodies missing `from`, `to` or
/// `amount` never get here: the JSON extractor answers 400.
#[post("/transactions/new")]
pub async fn new_transaction(
    node: web::Data<Node>,
    body: web::Json<Transaction>,
) -> impl Responder {
    node.submit_transaction(body.into_inner());
    HttpResponse::Created().json(MessageResponse {
        message: "Transaction will be added to next block",
    })
}
