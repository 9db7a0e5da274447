//! Общие контракты между backend и dashboard.
//!
//! Здесь живут только типы данных и чистые функции без I/O:
//! записи продаж, DTO API и расчёт аналитики по ряду продаж.

pub mod dashboards;
pub mod domain;
pub mod enums;
