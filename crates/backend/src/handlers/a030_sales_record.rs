use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use contracts::domain::a030_sales_record::{CreateSalesRecordDto, SalesRecord, SalesResponse};

use super::ApiError;
use crate::AppState;

/// GET /api/sales
pub async fn list(State(state): State<AppState>) -> Result<Json<SalesResponse>, ApiError> {
    if state.store.should_fail() {
        tracing::warn!("A030 Sales: simulated source failure");
        return Err(ApiError::Unavailable(
            "Sales source is temporarily unavailable".to_string(),
        ));
    }

    let response = state.store.current().await;
    tracing::debug!(
        "A030 Sales: returning {} records (live: {})",
        response.data.len(),
        response.is_live
    );
    Ok(Json(response))
}

/// POST /api/sales
///
/// Требует `year` и `sales`; запись того же года заменяется.
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateSalesRecordDto>, JsonRejection>,
) -> Result<(StatusCode, Json<SalesRecord>), ApiError> {
    let Json(dto) = payload.map_err(|e| {
        tracing::warn!("A030 Sales: rejected malformed body: {}", e);
        ApiError::BadRequest(format!("Invalid request body: {}", e.body_text()))
    })?;

    let record = dto.into_record().map_err(|e| {
        tracing::warn!("A030 Sales: rejected request: {}", e);
        ApiError::BadRequest(e)
    })?;

    let year = record.year;
    let created = state.store.upsert(record.clone()).await;
    if created {
        tracing::info!("A030 Sales: added year {}", year);
        Ok((StatusCode::CREATED, Json(record)))
    } else {
        tracing::info!("A030 Sales: replaced year {}", year);
        Ok((StatusCode::OK, Json(record)))
    }
}
