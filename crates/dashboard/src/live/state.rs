use chrono::{DateTime, Utc};
use contracts::dashboards::d410_sales_insights::InsightBundle;
use contracts::domain::a030_sales_record::SalesSeries;
use std::time::Duration;

use crate::shared::api_client::FetchError;

/// Фаза конвейера, выводится из флагов состояния
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelinePhase {
    /// Ни одной загрузки ещё не было
    Idle,
    /// Идёт загрузка с индикатором (первичная или ручная)
    Loading,
    Ready,
    /// Последняя загрузка завершилась ошибкой; прежние данные сохранены
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineErrorKind {
    Network,
    Status,
    Malformed,
}

/// Structured copy of the last fetch failure, kept in the snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineError {
    pub kind: PipelineErrorKind,
    pub status: Option<u16>,
    pub message: String,
    pub occurred_at: DateTime<Utc>,
}

impl PipelineError {
    pub fn from_fetch(error: &FetchError) -> Self {
        let (kind, status) = match error {
            FetchError::Network(_) => (PipelineErrorKind::Network, None),
            FetchError::Status { status, .. } => (PipelineErrorKind::Status, Some(*status)),
            FetchError::Malformed(_) => (PipelineErrorKind::Malformed, None),
        };
        Self {
            kind,
            status,
            message: error.to_string(),
            occurred_at: Utc::now(),
        }
    }
}

/// Состояние живого конвейера.
///
/// Изменяется только самим конвейером; потребители получают копии
/// через `LivePipeline::snapshot` или подписку.
#[derive(Debug, Clone, Default)]
pub struct PipelineState {
    /// Последний успешно полученный ряд (в порядке источника)
    pub series: SalesSeries,
    /// `None` пока данных нет или ряд пуст
    pub insights: Option<InsightBundle>,
    /// Source-reported timestamp of the last successful fetch.
    pub last_updated: Option<DateTime<Utc>>,
    pub is_live: bool,
    pub polling_enabled: bool,
    /// Период опроса, заданный последним `start`; `None` — опрос не настроен
    pub poll_interval: Option<Duration>,
    pub loading: bool,
    pub error: Option<PipelineError>,
    /// Количество завершённых загрузок (успешных и неуспешных)
    pub completed_fetches: u64,
    pub(crate) pending_loads: usize,
}

impl PipelineState {
    pub fn phase(&self) -> PipelinePhase {
        if self.loading {
            PipelinePhase::Loading
        } else if self.error.is_some() {
            PipelinePhase::Error
        } else if self.last_updated.is_some() {
            PipelinePhase::Ready
        } else {
            PipelinePhase::Idle
        }
    }

    pub fn has_data(&self) -> bool {
        self.last_updated.is_some()
    }

    /// Polling is visibly "live" only when the source says so and the timer runs.
    pub fn is_streaming(&self) -> bool {
        self.is_live && self.polling_enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_derivation() {
        let mut state = PipelineState::default();
        assert_eq!(state.phase(), PipelinePhase::Idle);

        state.loading = true;
        assert_eq!(state.phase(), PipelinePhase::Loading);

        state.loading = false;
        state.last_updated = Some(Utc::now());
        assert_eq!(state.phase(), PipelinePhase::Ready);

        state.error = Some(PipelineError::from_fetch(&FetchError::Status {
            status: 503,
            message: "down".to_string(),
        }));
        assert_eq!(state.phase(), PipelinePhase::Error);
        assert!(state.has_data());
    }

    #[test]
    fn test_error_conversion() {
        let error = PipelineError::from_fetch(&FetchError::Malformed("missing field `data`".into()));
        assert_eq!(error.kind, PipelineErrorKind::Malformed);
        assert_eq!(error.status, None);
        assert!(error.message.contains("missing field"));
    }
}
