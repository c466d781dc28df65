pub mod ollama;

pub use ollama::*;

use thiserror::Error;

/// Failure kinds for a single oracle round-trip. Resolvers map each kind to
/// a distinct user-facing message; a failure never aborts sibling work.
#[derive(Error, Debug, Clone)]
pub enum OracleError {
    #[error("Ollama is not running at {0}")]
    Unreachable(String),

    #[error("Ollama request failed: {0}")]
    RequestFailed(String),

    #[error("could not decode Ollama response: {0}")]
    DecodeFailed(String),

    #[error("unexpected oracle failure: {0}")]
    Unexpected(String),
}

/// LLM request/response collaborator. The model id and endpoint travel with
/// the implementing value; downstream code never sees a raw response shape.
pub trait Oracle {
    fn call(&self, prompt: &str, temperature: f32) -> Result<String, OracleError>;
}
