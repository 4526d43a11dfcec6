use tracing::error;

use crate::{AppError, AppState};
use backend_domain::PaymentRecord;

pub async fn list_records(state: &AppState) -> Result<Vec<PaymentRecord>, AppError> {
    let rows = state.record_repo.list_sorted_by_order().await.map_err(|err| {
        state.metrics.record_store_error();
        error!("failed to list records: {}", err);
        AppError::Internal(err)
    })?;
    Ok(rows)
}
