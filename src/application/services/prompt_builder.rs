use crate::domain::entities::ScoredChunk;

const INSTRUCTION: &str = "Answer the question using only the document content below. \
If the documents do not contain the relevant information, say that the answer \
cannot be found in the documents.";

const ANSWER_CUE: &str = "Answer based on the document content above:";

pub const EMPTY_ANSWER_FALLBACK: &str = "Sorry, no answer could be generated.";

/// Assembles the retrieval-augmented prompt: the fixed instruction, the
/// retrieved fragments in rank order, then the question.
pub fn build_prompt(question: &str, context: &[ScoredChunk]) -> String {
    let fragments = context
        .iter()
        .enumerate()
        .map(|(i, scored)| format!("[Document fragment {}]\n{}", i + 1, scored.chunk.chunk_text()))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!(
        "{}\n\nDocument content:\n{}\n\nQuestion: {}\n\n{}",
        INSTRUCTION,
        fragments,
        question.trim(),
        ANSWER_CUE
    )
}
