use serde::{Deserialize, Serialize};

use crate::enums::Month;

/// Год с его суммой продаж (лучший / худший год)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearHighlight {
    pub year: i32,
    pub sales: f64,
}

/// Отдельный месяц конкретного года (лучший / худший месяц)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthHighlight {
    pub month: Month,
    pub value: f64,
    pub year: i32,
}

/// Рост между двумя соседними годами
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearOverYearGrowth {
    pub year: i32,
    pub previous_year: i32,
    /// Growth in percent. `None` when the previous year had zero sales.
    pub growth: Option<f64>,
}

/// Средние продажи календарного месяца по всем годам, где он встречается
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTrend {
    pub month: Month,
    pub avg_value: f64,
}

/// Сводная аналитика по ряду продаж.
///
/// Value object: пересчитывается целиком на каждый новый ряд и не имеет
/// собственной идентичности.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightBundle {
    pub total_revenue: f64,
    pub avg_yearly_sales: f64,
    /// Mean of the defined year-over-year growth values, 0 when there are none.
    pub avg_growth_rate: f64,
    pub best_year: YearHighlight,
    pub worst_year: YearHighlight,
    pub best_month: Option<MonthHighlight>,
    pub worst_month: Option<MonthHighlight>,
    pub year_over_year_growth: Vec<YearOverYearGrowth>,
    pub monthly_trends: Vec<MonthlyTrend>,
    /// First → last year growth in percent. `Some(0.0)` for a single record,
    /// `None` when the first year had zero sales.
    pub revenue_growth: Option<f64>,
    pub record_count: usize,
    /// Количество помесячных записей во всём ряду
    pub data_points: usize,
    pub first_year: i32,
    pub last_year: i32,
}

impl InsightBundle {
    /// Последний переход год-к-году (для карточки «latest YoY»)
    pub fn latest_growth(&self) -> Option<&YearOverYearGrowth> {
        self.year_over_year_growth.last()
    }
}

/// Одна строка помесячного сравнения двух последних лет
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub month: Month,
    pub previous: Option<f64>,
    pub current: Option<f64>,
}

/// Помесячное сравнение двух последних лет ряда
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyComparison {
    pub previous_year: i32,
    pub current_year: i32,
    pub rows: Vec<ComparisonRow>,
}
