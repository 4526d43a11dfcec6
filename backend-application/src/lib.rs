// Backend Application Layer

pub mod commands;
pub mod error;
pub mod metrics;
pub mod queries;
pub mod signature;
pub mod state;

pub use error::AppError;
pub use metrics::Metrics;
pub use signature::SignatureVerifier;
pub use state::AppState;
