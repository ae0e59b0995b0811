use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::presentation::http::handlers::DocumentHandler;

pub fn document_routes(document_handler: Arc<DocumentHandler>) -> Router {
    Router::new()
        .route("/api/upload", post(DocumentHandler::upload_document))
        .route("/api/documents", get(DocumentHandler::list_documents))
        .route(
            "/api/documents/{document_id}",
            get(DocumentHandler::get_document).delete(DocumentHandler::delete_document),
        )
        .route(
            "/api/documents/{document_id}/chunks",
            get(DocumentHandler::get_document_chunks),
        )
        .with_state(document_handler)
}
