use std::sync::Arc;

use backend_domain::ports::RecordRepository;
use backend_domain::RuntimeConfig;

use crate::{Metrics, SignatureVerifier};

#[derive(Clone)]
pub struct AppState {
    pub config: RuntimeConfig,
    pub record_repo: Arc<dyn RecordRepository>,
    pub verifier: Arc<SignatureVerifier>,
    pub metrics: Arc<Metrics>,
}
