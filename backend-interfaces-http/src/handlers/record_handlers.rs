use axum::extract::State;
use axum::Json;

use backend_application::queries::record_queries;
use backend_application::AppState;
use backend_domain::PaymentRecord;

use crate::error::HttpError;

pub async fn get_names(
    State(state): State<AppState>,
) -> Result<Json<Vec<PaymentRecord>>, HttpError> {
    let records = record_queries::list_records(&state).await?;
    Ok(Json(records))
}
