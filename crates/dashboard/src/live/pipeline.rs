use contracts::dashboards::d410_sales_insights::compute_insights;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::state::{PipelineError, PipelineState};
use crate::shared::api_client::SalesSource;

/// Вид загрузки: с индикатором или фоновая (по таймеру)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FetchKind {
    Loading,
    Silent,
}

/// Перевести период из конфигурации в `Duration`; `<= 0` отключает опрос
fn poll_interval(interval_ms: i64) -> Option<Duration> {
    u64::try_from(interval_ms)
        .ok()
        .filter(|ms| *ms > 0)
        .map(Duration::from_millis)
}

/// Общая часть конвейера, доступная таймеру и задачам загрузки
struct Shared {
    source: Arc<dyn SalesSource>,
    state: watch::Sender<PipelineState>,
}

impl Shared {
    /// Выполнить одну загрузку и применить результат.
    ///
    /// Ошибка источника сохраняется в состоянии и дальше не пробрасывается.
    async fn fetch(&self, kind: FetchKind) {
        let result = self.source.fetch_sales().await;

        match &result {
            Ok(response) => debug!(
                "Live pipeline: fetched {} records ({:?}, live: {})",
                response.data.len(),
                kind,
                response.is_live
            ),
            Err(e) => warn!("Live pipeline: fetch failed ({:?}): {}", kind, e),
        }

        self.state.send_modify(|state| {
            if kind == FetchKind::Loading {
                state.pending_loads = state.pending_loads.saturating_sub(1);
                state.loading = state.pending_loads > 0;
            }
            state.completed_fetches += 1;

            match result {
                Ok(response) => {
                    state.insights = compute_insights(&response.data);
                    state.series = response.data;
                    state.last_updated = Some(response.timestamp);
                    state.is_live = response.is_live;
                    state.error = None;
                }
                // Последний успешный ряд остаётся на месте
                Err(e) => state.error = Some(PipelineError::from_fetch(&e)),
            }
        });
    }
}

/// Живой конвейер данных о продажах.
///
/// Владеет таймером опроса (не более одного на экземпляр) и состоянием.
/// Загрузки выполняются отдельными задачами и могут перекрываться;
/// результаты применяются в порядке завершения, а не запуска.
/// Остановка отменяет только таймер: начатая загрузка доводится до конца
/// и её результат применяется.
///
/// Методы управления запускают задачи tokio, поэтому вызываются
/// внутри runtime.
pub struct LivePipeline {
    shared: Arc<Shared>,
    timer: Mutex<Option<JoinHandle<()>>>,
}

impl LivePipeline {
    pub fn new(source: Arc<dyn SalesSource>) -> Self {
        let (state, _) = watch::channel(PipelineState::default());
        Self {
            shared: Arc::new(Shared { source, state }),
            timer: Mutex::new(None),
        }
    }

    /// Запустить опрос с периодом `interval_ms` и сразу загрузить данные с индикатором.
    ///
    /// Повторный вызов заменяет таймер новым периодом. `interval_ms <= 0`
    /// оставляет только ручное обновление.
    pub fn start(&self, interval_ms: i64) {
        let interval = poll_interval(interval_ms);
        match interval {
            Some(period) => info!("Live pipeline: starting, polling every {:?}", period),
            None => info!("Live pipeline: starting with automatic polling disabled"),
        }

        self.shared.state.send_modify(|state| {
            state.poll_interval = interval;
            state.polling_enabled = interval.is_some();
        });
        self.restart_timer(interval);
        self.spawn_fetch(FetchKind::Loading);
    }

    /// Остановить таймер. Начатые загрузки не отменяются.
    pub fn stop(&self) {
        if self.cancel_timer() {
            info!("Live pipeline: polling stopped");
        }
        self.shared
            .state
            .send_modify(|state| state.polling_enabled = false);
    }

    /// Немедленная загрузка вне расписания таймера, с индикатором.
    ///
    /// The returned handle may be awaited to wait for the result to be
    /// applied, or dropped.
    pub fn refresh_now(&self) -> JoinHandle<()> {
        debug!("Live pipeline: manual refresh");
        self.spawn_fetch(FetchKind::Loading)
    }

    /// Переключить опрос. Возвращает новое значение флага.
    ///
    /// Включение перезапускает таймер с последним заданным периодом; если
    /// период не задан, опрос остаётся выключенным.
    pub fn toggle_polling(&self) -> bool {
        let (enabled, interval) = {
            let state = self.shared.state.borrow();
            (state.polling_enabled, state.poll_interval)
        };

        if enabled {
            self.cancel_timer();
            self.shared
                .state
                .send_modify(|state| state.polling_enabled = false);
            info!("Live pipeline: polling paused");
            return false;
        }

        match interval {
            Some(period) => {
                self.shared
                    .state
                    .send_modify(|state| state.polling_enabled = true);
                self.restart_timer(Some(period));
                info!("Live pipeline: polling resumed every {:?}", period);
                true
            }
            None => {
                warn!("Live pipeline: cannot resume polling, no interval configured");
                false
            }
        }
    }

    /// Текущий снимок состояния (без ожидания загрузок)
    pub fn snapshot(&self) -> PipelineState {
        self.shared.state.borrow().clone()
    }

    /// Подписка на изменения состояния
    pub fn subscribe(&self) -> watch::Receiver<PipelineState> {
        self.shared.state.subscribe()
    }

    fn spawn_fetch(&self, kind: FetchKind) -> JoinHandle<()> {
        // Индикатор поднимается сразу, до начала загрузки
        if kind == FetchKind::Loading {
            self.shared.state.send_modify(|state| {
                state.pending_loads += 1;
                state.loading = true;
            });
        }

        let shared = Arc::clone(&self.shared);
        tokio::spawn(async move { shared.fetch(kind).await })
    }

    fn restart_timer(&self, interval: Option<Duration>) {
        let mut timer = self.timer.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = timer.take() {
            handle.abort();
        }

        let Some(period) = interval else {
            return;
        };

        let shared = Arc::clone(&self.shared);
        *timer = Some(tokio::spawn(async move {
            // Первый тик через период: немедленную загрузку делает сам start
            let mut ticker = time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;
                debug!("Live pipeline: timer tick");
                // Загрузка в отдельной задаче, чтобы медленный источник не сдвигал расписание
                let shared = Arc::clone(&shared);
                tokio::spawn(async move { shared.fetch(FetchKind::Silent).await });
            }
        }));
    }

    /// Returns `true` when a running timer was cancelled.
    fn cancel_timer(&self) -> bool {
        let mut timer = self.timer.lock().unwrap_or_else(PoisonError::into_inner);
        match timer.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }
}

impl Drop for LivePipeline {
    fn drop(&mut self) {
        self.cancel_timer();
    }
}
