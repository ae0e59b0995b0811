use axum::{
    Json,
    extract::{Multipart, Path, Query, State, multipart::MultipartError},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use std::sync::Arc;

use crate::application::errors::RagError;
use crate::application::use_cases::{
    DeleteDocumentUseCase, GetDocumentUseCase, ListDocumentsUseCase, UploadDocumentUseCase,
    list_documents::ListDocumentsRequest, upload_document::UploadDocumentRequest,
};
use crate::presentation::http::dto::{
    ApiResponse, ChunkResponseDto, DeleteResponseDto, DocumentChunksResponseDto,
    DocumentListResponseDto, DocumentResponseDto, PaginationDto, PaginationMetaDto,
    UploadResponseDto, bad_request, error_response,
};
use super::parse_document_id;

pub struct DocumentHandler {
    upload_use_case: Arc<UploadDocumentUseCase>,
    list_documents_use_case: Arc<ListDocumentsUseCase>,
    get_document_use_case: Arc<GetDocumentUseCase>,
    delete_document_use_case: Arc<DeleteDocumentUseCase>,
    max_upload_bytes: usize,
}

impl DocumentHandler {
    pub fn new(
        upload_use_case: Arc<UploadDocumentUseCase>,
        list_documents_use_case: Arc<ListDocumentsUseCase>,
        get_document_use_case: Arc<GetDocumentUseCase>,
        delete_document_use_case: Arc<DeleteDocumentUseCase>,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            upload_use_case,
            list_documents_use_case,
            get_document_use_case,
            delete_document_use_case,
            max_upload_bytes,
        }
    }

    /// The body limit tripped while reading a part. The declared length is
    /// reported when the client sent one.
    fn multipart_failure(
        &self,
        headers: &HeaderMap,
        error: MultipartError,
    ) -> (StatusCode, Json<ApiResponse<UploadResponseDto>>) {
        if error.status() != StatusCode::PAYLOAD_TOO_LARGE {
            return bad_request("INVALID_MULTIPART", error.body_text());
        }

        let size = headers
            .get(header::CONTENT_LENGTH)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<usize>().ok())
            .unwrap_or(self.max_upload_bytes + 1);

        error_response(RagError::FileTooLarge {
            size,
            limit: self.max_upload_bytes,
        })
    }

    /// Multipart upload: a `file` part and an optional `chunk_mode` text part,
    /// in either order.
    pub async fn upload_document(
        State(handler): State<Arc<DocumentHandler>>,
        headers: HeaderMap,
        mut multipart: Multipart,
    ) -> Result<impl IntoResponse, StatusCode> {
        let mut file: Option<(String, Vec<u8>)> = None;
        let mut chunk_mode: Option<String> = None;

        loop {
            let field = match multipart.next_field().await {
                Ok(Some(field)) => field,
                Ok(None) => break,
                Err(e) => return Ok(handler.multipart_failure(&headers, e)),
            };

            match field.name() {
                Some("file") => {
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let data = match field.bytes().await {
                        Ok(bytes) => bytes.to_vec(),
                        Err(e) => return Ok(handler.multipart_failure(&headers, e)),
                    };
                    file = Some((file_name, data));
                }
                Some("chunk_mode") => match field.text().await {
                    Ok(text) => chunk_mode = Some(text),
                    Err(e) => return Ok(handler.multipart_failure(&headers, e)),
                },
                _ => {}
            }
        }

        let Some((file_name, data)) = file else {
            return Ok(bad_request(
                "NO_FILE_PROVIDED",
                "No file provided in the request".to_string(),
            ));
        };

        let request = UploadDocumentRequest {
            file_name,
            data,
            chunk_mode,
        };

        match handler.upload_use_case.execute(request).await {
            Ok(response) => Ok((
                StatusCode::CREATED,
                Json(ApiResponse::success(UploadResponseDto::from(response))),
            )),
            Err(e) => Ok(error_response(e)),
        }
    }

    pub async fn list_documents(
        State(handler): State<Arc<DocumentHandler>>,
        Query(pagination): Query<PaginationDto>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let request = ListDocumentsRequest {
            skip: pagination.skip,
            limit: pagination.limit,
        };

        match handler.list_documents_use_case.execute(request).await {
            Ok(response) => {
                let dto = DocumentListResponseDto {
                    documents: response
                        .documents
                        .into_iter()
                        .map(DocumentResponseDto::from)
                        .collect(),
                    meta: PaginationMetaDto {
                        offset: response.skip,
                        limit: response.limit,
                        total: response.total_count,
                    },
                };

                Ok((StatusCode::OK, Json(ApiResponse::success(dto))))
            }
            Err(e) => Ok(error_response(e)),
        }
    }

    pub async fn get_document(
        State(handler): State<Arc<DocumentHandler>>,
        Path(document_id): Path<String>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let result = match parse_document_id(&document_id) {
            Ok(id) => handler.get_document_use_case.execute(id).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(document) => Ok((
                StatusCode::OK,
                Json(ApiResponse::success(DocumentResponseDto::from(document))),
            )),
            Err(e) => Ok(error_response(e)),
        }
    }

    pub async fn get_document_chunks(
        State(handler): State<Arc<DocumentHandler>>,
        Path(document_id): Path<String>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let result = match parse_document_id(&document_id) {
            Ok(id) => handler.get_document_use_case.chunks(id).await,
            Err(e) => Err(e),
        };

        match result {
            Ok((document, chunks)) => {
                let dto = DocumentChunksResponseDto {
                    document: DocumentResponseDto::from(document),
                    chunks: chunks.into_iter().map(ChunkResponseDto::from).collect(),
                };
                Ok((StatusCode::OK, Json(ApiResponse::success(dto))))
            }
            Err(e) => Ok(error_response(e)),
        }
    }

    pub async fn delete_document(
        State(handler): State<Arc<DocumentHandler>>,
        Path(document_id): Path<String>,
    ) -> Result<impl IntoResponse, StatusCode> {
        let result = match parse_document_id(&document_id) {
            Ok(id) => handler.delete_document_use_case.execute(id).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(outcome) => Ok((
                StatusCode::OK,
                Json(ApiResponse::success(DeleteResponseDto::from(outcome))),
            )),
            Err(e) => Ok(error_response(e)),
        }
    }
}
