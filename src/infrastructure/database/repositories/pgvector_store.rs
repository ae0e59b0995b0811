use async_trait::async_trait;
use diesel::prelude::*;
use diesel::upsert::excluded;
use pgvector::{Vector, VectorExpressionMethods};
use uuid::Uuid;

use crate::domain::entities::{ContentChunk, ScoredChunk};
use crate::domain::repositories::{VectorRecord, VectorStore, vector_store::VectorStoreError};
use crate::infrastructure::database::models::{DocumentChunkModel, NewDocumentChunkModel};
use crate::infrastructure::database::schema::document_chunks::dsl::*;
use crate::infrastructure::database::{DbPool, get_connection_from_pool};

const BACKEND: &str = "pgvector";

/// Rows per INSERT statement; keeps well under PostgreSQL's bind limit.
const INSERT_BATCH_ROWS: usize = 1000;

/// Chunk vectors in a `vector` column, searched with the `<=>` cosine
/// distance operator.
pub struct PgVectorStore {
    pool: DbPool,
    dimension: usize,
}

impl PgVectorStore {
    pub fn new(pool: DbPool, dimension: usize) -> Self {
        Self { pool, dimension }
    }

    fn check_dimension(&self, actual: usize) -> Result<(), VectorStoreError> {
        if actual != self.dimension {
            return Err(VectorStoreError::DimensionMismatch {
                expected: self.dimension,
                actual,
            });
        }
        Ok(())
    }
}

fn backend_error(e: impl std::fmt::Display) -> VectorStoreError {
    VectorStoreError::backend(BACKEND, e)
}

#[async_trait]
impl VectorStore for PgVectorStore {
    async fn add(&self, records: &[VectorRecord]) -> Result<(), VectorStoreError> {
        if records.is_empty() {
            return Ok(());
        }
        for record in records {
            self.check_dimension(record.embedding.dimension())?;
        }

        let rows: Vec<NewDocumentChunkModel> =
            records.iter().map(NewDocumentChunkModel::from).collect();

        let mut conn = get_connection_from_pool(&self.pool).map_err(backend_error)?;

        conn.transaction::<_, diesel::result::Error, _>(|conn| {
            for batch in rows.chunks(INSERT_BATCH_ROWS) {
                diesel::insert_into(document_chunks)
                    .values(batch)
                    .on_conflict(id)
                    .do_update()
                    .set((
                        chunk_text.eq(excluded(chunk_text)),
                        chunk_start.eq(excluded(chunk_start)),
                        metadata.eq(excluded(metadata)),
                        model_name.eq(excluded(model_name)),
                        embedding.eq(excluded(embedding)),
                        generated_at.eq(excluded(generated_at)),
                    ))
                    .execute(conn)?;
            }
            Ok(())
        })
        .map_err(backend_error)
    }

    async fn search(
        &self,
        query_vector: &Vector,
        top_k: usize,
    ) -> Result<Vec<ScoredChunk>, VectorStoreError> {
        self.check_dimension(query_vector.as_slice().len())?;

        let mut conn = get_connection_from_pool(&self.pool).map_err(backend_error)?;

        let rows: Vec<(DocumentChunkModel, f64)> = document_chunks
            .select((
                DocumentChunkModel::as_select(),
                embedding.cosine_distance(query_vector.clone()),
            ))
            .order((embedding.cosine_distance(query_vector.clone()), id.asc()))
            .limit(top_k as i64)
            .load(&mut conn)
            .map_err(backend_error)?;

        rows.into_iter()
            .map(|(model, distance)| {
                let chunk = ContentChunk::try_from(model).map_err(backend_error)?;
                Ok(ScoredChunk {
                    chunk,
                    score: (1.0 - distance) as f32,
                })
            })
            .collect()
    }

    async fn chunks_for_document(
        &self,
        owner_id: Uuid,
    ) -> Result<Vec<ContentChunk>, VectorStoreError> {
        let mut conn = get_connection_from_pool(&self.pool).map_err(backend_error)?;

        let models = document_chunks
            .filter(document_id.eq(owner_id))
            .select(DocumentChunkModel::as_select())
            .order(chunk_index.asc())
            .load(&mut conn)
            .map_err(backend_error)?;

        models
            .into_iter()
            .map(|model| ContentChunk::try_from(model).map_err(backend_error))
            .collect()
    }

    async fn delete_by_document(&self, owner_id: Uuid) -> Result<u64, VectorStoreError> {
        let mut conn = get_connection_from_pool(&self.pool).map_err(backend_error)?;

        let deleted_count = diesel::delete(document_chunks.filter(document_id.eq(owner_id)))
            .execute(&mut conn)
            .map_err(backend_error)?;

        Ok(deleted_count as u64)
    }

    async fn count(&self) -> Result<u64, VectorStoreError> {
        let mut conn = get_connection_from_pool(&self.pool).map_err(backend_error)?;

        let total: i64 = document_chunks
            .count()
            .get_result(&mut conn)
            .map_err(backend_error)?;

        Ok(total as u64)
    }

    fn backend_name(&self) -> &'static str {
        BACKEND
    }
}
