use async_trait::async_trait;
use thiserror::Error;

pub mod gemini;

pub use gemini::GeminiGenerator;

/// Reply used when the text generator fails.
pub const GENERATION_FALLBACK: &str = "I'm sorry, I couldn't get an answer at this time.";

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("generation request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("generation service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("generation service returned no text")]
    EmptyResponse,
}

pub type GenerationResult<T> = Result<T, GenerationError>;

/// Produces an answer to `question` grounded in `context`.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, context: &str, question: &str) -> GenerationResult<String>;
}

/// Prompt sent to the generator for a matched passage.
pub fn answer_prompt(context: &str, question: &str) -> String {
    format!(
        "Based on the insights answer the question below in a concise manner without leaving any point but in a summarized form:\n\n\"{question}\"\n\nContext:\n{context}"
    )
}

/// Calls `generator`, replacing any failure with [`GENERATION_FALLBACK`].
pub async fn generate_or_fallback<G>(generator: &G, context: &str, question: &str) -> String
where
    G: TextGenerator + ?Sized,
{
    match generator.generate(context, question).await {
        Ok(answer) => answer,
        Err(e) => {
            log::error!("Error getting answer from generator: {e}");
            GENERATION_FALLBACK.to_string()
        }
    }
}
