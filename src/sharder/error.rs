use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShardError {
    #[error("Max jobs must be at least 1")]
    ZeroMaxJobs,

    #[error("Failed to encode job record: {0}")]
    EncodeFailed(String),

    #[error("Malformed job data: {0}")]
    MalformedData(String),

    #[error("Matrix verification failed: {0}")]
    VerificationFailed(String),
}
