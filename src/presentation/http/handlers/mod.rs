pub mod document_handler;
pub mod health_handler;
pub mod query_handler;

pub use document_handler::DocumentHandler;
pub use health_handler::HealthHandler;
pub use query_handler::QueryHandler;

use uuid::Uuid;

use crate::application::errors::RagError;

pub(crate) fn parse_document_id(raw: &str) -> Result<Uuid, RagError> {
    Uuid::parse_str(raw)
        .map_err(|_| RagError::InvalidRequest(format!("'{}' is not a valid document id", raw)))
}
