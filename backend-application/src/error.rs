use backend_domain::PayloadError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("invalid signature")]
    InvalidSignature,
    #[error(transparent)]
    InvalidPayload(#[from] PayloadError),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}
