use axum::extract::State;
use axum::Json;
use contracts::dashboards::d410_sales_insights::{compute_insights, InsightBundle};

use crate::AppState;

/// GET /api/d410/insights
///
/// Аналитика по текущему содержимому хранилища; `null` для пустого ряда.
pub async fn get_insights(State(state): State<AppState>) -> Json<Option<InsightBundle>> {
    let records = state.store.records().await;
    let insights = compute_insights(&records);
    tracing::info!(
        "D410 Dashboard: insights for {} records (empty: {})",
        records.len(),
        insights.is_none()
    );
    Json(insights)
}
