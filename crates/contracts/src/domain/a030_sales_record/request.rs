use serde::{Deserialize, Serialize};

use super::aggregate::{MonthEntry, SalesRecord};

/// Тело запроса `POST /api/sales`.
///
/// `year` и `sales` обязательны, но объявлены как `Option`, чтобы
/// отсутствие поля давало понятную ошибку валидации, а не ошибку парсинга.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateSalesRecordDto {
    #[serde(default)]
    pub year: Option<i32>,

    #[serde(default, alias = "totalSales")]
    pub sales: Option<f64>,

    #[serde(default, alias = "monthlyBreakdown")]
    pub monthly: Option<Vec<MonthEntry>>,

    #[serde(rename = "topProduct", default)]
    pub top_product: Option<String>,

    #[serde(rename = "topRegion", default)]
    pub top_region: Option<String>,

    #[serde(rename = "isPartialYear", default)]
    pub is_partial_year: Option<bool>,
}

impl CreateSalesRecordDto {
    /// Проверить запрос и собрать из него запись
    pub fn into_record(self) -> Result<SalesRecord, String> {
        let year = self.year.ok_or_else(|| "Field 'year' is required".to_string())?;
        let sales = self
            .sales
            .ok_or_else(|| "Field 'sales' is required".to_string())?;

        if !sales.is_finite() || sales < 0.0 {
            return Err(format!(
                "Field 'sales' must be a non-negative number, got {}",
                sales
            ));
        }

        let record = SalesRecord {
            year,
            total_sales: sales,
            monthly_breakdown: self.monthly,
            top_product: self.top_product,
            top_region: self.top_region,
            is_partial_year: self.is_partial_year,
        };
        // Строго возрастающие месяцы: не больше 12 записей и без повторов
        record.validate_monthly()?;
        Ok(record)
    }
}
