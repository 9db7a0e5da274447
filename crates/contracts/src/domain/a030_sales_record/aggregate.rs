use serde::{Deserialize, Serialize};

use crate::enums::Month;

// ============================================================================
// Monthly entry
// ============================================================================

/// Продажи за один календарный месяц.
///
/// Отрицательное значение допустимо (признак битых исходных данных),
/// такие записи не отбрасываются.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthEntry {
    pub month: Month,
    pub value: f64,
}

impl MonthEntry {
    pub fn new(month: Month, value: f64) -> Self {
        Self { month, value }
    }
}

// ============================================================================
// Yearly record
// ============================================================================

/// Годовая запись продаж
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub year: i32,

    #[serde(rename = "sales", alias = "totalSales")]
    pub total_sales: f64,

    /// Up to 12 entries in calendar order. Their sum is expected to be close
    /// to `total_sales`, but nothing enforces it.
    #[serde(
        rename = "monthly",
        alias = "monthlyBreakdown",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub monthly_breakdown: Option<Vec<MonthEntry>>,

    #[serde(rename = "topProduct", default, skip_serializing_if = "Option::is_none")]
    pub top_product: Option<String>,

    #[serde(rename = "topRegion", default, skip_serializing_if = "Option::is_none")]
    pub top_region: Option<String>,

    #[serde(rename = "isPartialYear", default, skip_serializing_if = "Option::is_none")]
    pub is_partial_year: Option<bool>,
}

impl SalesRecord {
    /// Запись без помесячной разбивки и тегов
    pub fn new(year: i32, total_sales: f64) -> Self {
        Self {
            year,
            total_sales,
            monthly_breakdown: None,
            top_product: None,
            top_region: None,
            is_partial_year: None,
        }
    }

    pub fn with_monthly(mut self, monthly: Vec<MonthEntry>) -> Self {
        self.monthly_breakdown = Some(monthly);
        self
    }

    /// Сумма помесячных значений (если разбивка есть)
    pub fn monthly_sum(&self) -> Option<f64> {
        self.monthly_breakdown
            .as_ref()
            .map(|entries| entries.iter().map(|e| e.value).sum())
    }

    /// Проверить помесячную разбивку: месяцы строго по возрастанию, без повторов
    pub fn validate_monthly(&self) -> Result<(), String> {
        let Some(monthly) = &self.monthly_breakdown else {
            return Ok(());
        };

        for pair in monthly.windows(2) {
            if pair[1].month.index() <= pair[0].month.index() {
                let problem = if pair[1].month == pair[0].month {
                    "is repeated"
                } else {
                    "is out of calendar order"
                };
                return Err(format!(
                    "Year {}: month {} {} in 'monthly'",
                    self.year, pair[1].month, problem
                ));
            }
        }
        Ok(())
    }

    /// Значение за конкретный месяц
    pub fn month_value(&self, month: Month) -> Option<f64> {
        self.monthly_breakdown
            .as_ref()?
            .iter()
            .find(|e| e.month == month)
            .map(|e| e.value)
    }
}

/// Ряд продаж: годовые записи, упорядоченные по году.
///
/// Каждая загрузка даёт новый ряд, старый не изменяется.
pub type SalesSeries = Vec<SalesRecord>;
