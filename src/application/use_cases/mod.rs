pub mod delete_document;
pub mod get_document;
pub mod list_documents;
pub mod query_documents;
pub mod upload_document;

pub use delete_document::DeleteDocumentUseCase;
pub use get_document::GetDocumentUseCase;
pub use list_documents::ListDocumentsUseCase;
pub use query_documents::QueryDocumentsUseCase;
pub use upload_document::UploadDocumentUseCase;
