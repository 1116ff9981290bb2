use thiserror::Error;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("failed to encode thermos payload: {0}")]
    ThermosPayload(#[from] serde_json::Error),
    #[error("thermos ordering constraint references unknown process: {0}")]
    UnknownProcess(String),
}
