use serde::{Deserialize, Serialize};

use crate::application::use_cases::query_documents::QueryDocumentsResponse;
use crate::domain::entities::ScoredChunk;

#[derive(Debug, Serialize, Deserialize)]
pub struct QueryRequestDto {
    pub question: String,
    pub top_k: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RelevantChunkDto {
    pub chunk_id: String,
    pub content: String,
    pub metadata: serde_json::Value,
    pub score: f32,
}

impl From<ScoredChunk> for RelevantChunkDto {
    fn from(scored: ScoredChunk) -> Self {
        Self {
            chunk_id: scored.chunk.id().to_string(),
            content: scored.chunk.chunk_text().to_string(),
            metadata: scored.chunk.metadata().clone().into(),
            score: scored.score,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct QueryResponseDto {
    pub answer: String,
    pub relevant_chunks: Vec<RelevantChunkDto>,
    pub question: String,
    pub model: String,
    pub timestamp: String,
    pub query_time_ms: u64,
}

impl From<QueryDocumentsResponse> for QueryResponseDto {
    fn from(response: QueryDocumentsResponse) -> Self {
        let answer = response.answer;
        Self {
            answer: answer.answer,
            relevant_chunks: answer.chunks.into_iter().map(RelevantChunkDto::from).collect(),
            question: answer.question,
            model: answer.model,
            timestamp: answer.answered_at.to_rfc3339(),
            query_time_ms: response.query_time_ms,
        }
    }
}
