use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("Failed to build OpenAI HTTP client: {0}")]
    Client(String),

    #[error("OpenAI request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("OpenAI returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Failed to decode OpenAI response: {0}")]
    Decode(String),

    #[error("Received an empty response from OpenAI.")]
    EmptyResponse,
}
