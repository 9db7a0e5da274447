use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::aggregate::SalesRecord;

/// Ответ `GET /api/sales`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesResponse {
    pub data: Vec<SalesRecord>,
    /// Момент формирования данных на стороне источника
    pub timestamp: DateTime<Utc>,
    /// `true` when the source simulates live data, `false` for the static fixture.
    pub is_live: bool,
}

/// Тело ответа с ошибкой (любой не-2xx статус)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sales_response_wire_format() {
        let json = r#"{
            "data": [{"year": 2024, "sales": 5}],
            "timestamp": "2024-06-01T12:00:00Z",
            "isLive": true
        }"#;
        let response: SalesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.data.len(), 1);
        assert!(response.is_live);
        assert_eq!(response.timestamp.to_rfc3339(), "2024-06-01T12:00:00+00:00");
    }
}
