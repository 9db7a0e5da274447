//! Клиентская часть дашборда продаж.
//!
//! - [`shared::api_client`] — источник данных (`SalesSource`) и HTTP-реализация
//! - [`live`] — живой конвейер: опрос по таймеру, ручное обновление, снимки состояния
//! - [`insights`] — карточки KPI и рекомендации поверх `InsightBundle`
//! - [`console`] — команды с консоли для headless-режима

pub mod console;
pub mod insights;
pub mod live;
pub mod shared;

pub use live::{LivePipeline, PipelinePhase, PipelineState};
pub use shared::api_client::{FetchError, HttpSalesSource, SalesSource};
