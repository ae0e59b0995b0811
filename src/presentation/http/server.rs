use axum::Router;
use axum::extract::DefaultBodyLimit;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::classify::ServerErrorsFailureClass;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ServerConfig;
use crate::presentation::http::{
    handlers::{DocumentHandler, HealthHandler, QueryHandler},
    routes::{document_routes, health_routes, query_routes},
};

/// Room for multipart boundaries and the `chunk_mode` field on top of the
/// file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub struct HttpServer {
    document_handler: Arc<DocumentHandler>,
    query_handler: Arc<QueryHandler>,
    health_handler: Arc<HealthHandler>,
    config: ServerConfig,
}

impl HttpServer {
    pub fn new(
        document_handler: Arc<DocumentHandler>,
        query_handler: Arc<QueryHandler>,
        health_handler: Arc<HealthHandler>,
        config: ServerConfig,
    ) -> Self {
        Self {
            document_handler,
            query_handler,
            health_handler,
            config,
        }
    }

    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        Router::new()
            .merge(health_routes(self.health_handler.clone()))
            .merge(document_routes(self.document_handler.clone()))
            .merge(query_routes(self.query_handler.clone()))
            .layer(cors)
            // Enforced while the multipart stream is read, so the upload
            // handler can answer with FILE_TOO_LARGE.
            .layer(DefaultBodyLimit::max(
                self.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES,
            ))
            .layer(
                TraceLayer::new_for_http()
                    .on_request(
                        |request: &axum::http::Request<axum::body::Body>, _span: &tracing::Span| {
                            tracing::info!(
                                "Received request: {} {}",
                                request.method(),
                                request.uri()
                            );
                        },
                    )
                    .on_response(
                        |response: &axum::http::Response<axum::body::Body>,
                         latency: std::time::Duration,
                         _span: &tracing::Span| {
                            tracing::info!(
                                "Response: {} (took {} ms)",
                                response.status(),
                                latency.as_millis()
                            );
                        },
                    )
                    .on_failure(
                        |error: ServerErrorsFailureClass,
                         latency: std::time::Duration,
                         _span: &tracing::Span| {
                            tracing::error!(
                                "Request failed: {:?} (took {} ms)",
                                error,
                                latency.as_millis()
                            );
                        },
                    ),
            )
    }

    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();
        let addr = self.config.bind_address();

        let listener = TcpListener::bind(&addr).await?;
        info!("Listening on {}", addr);
        axum::serve(listener, app).await?;

        Ok(())
    }
}
