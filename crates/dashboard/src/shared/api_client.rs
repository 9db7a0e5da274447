use async_trait::async_trait;
use contracts::domain::a030_sales_record::{ErrorResponse, SalesResponse};
use std::time::Duration;
use thiserror::Error;

/// Ошибки получения ряда продаж
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Source responded with status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// Источник ряда продаж для живого конвейера
#[async_trait]
pub trait SalesSource: Send + Sync {
    /// Получить текущий ряд вместе с метаданными источника
    async fn fetch_sales(&self) -> Result<SalesResponse, FetchError>;
}

/// HTTP-клиент mock-backend'а (`GET /api/sales`)
pub struct HttpSalesSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSalesSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .no_proxy()
            .build()
            .map_err(|e| FetchError::Network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn sales_url(&self) -> String {
        format!("{}/api/sales", self.base_url)
    }
}

#[async_trait]
impl SalesSource for HttpSalesSource {
    async fn fetch_sales(&self) -> Result<SalesResponse, FetchError> {
        let url = self.sales_url();
        tracing::debug!("Sales API: GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| FetchError::Network(format!("Request to {} failed: {}", url, e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(format!("Failed to read body from {}: {}", url, e)))?;

        if !status.is_success() {
            // Тело ошибки `{"error": "..."}`; если формат другой — отдаём текст как есть
            let message = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.error)
                .unwrap_or_else(|_| body.chars().take(200).collect());
            return Err(FetchError::Status {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str::<SalesResponse>(&body).map_err(|e| FetchError::Malformed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use tokio::net::TcpListener;

    /// Поднять локальный сервер с одним маршрутом `/api/sales`
    async fn serve(router: Router) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn source(base_url: &str) -> HttpSalesSource {
        HttpSalesSource::new(base_url, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_success() {
        let router = Router::new().route(
            "/api/sales",
            get(|| async {
                Json(serde_json::json!({
                    "data": [{"year": 2022, "sales": 100}, {"year": 2023, "sales": 150}],
                    "timestamp": "2024-01-01T00:00:00Z",
                    "isLive": true
                }))
            }),
        );
        let base_url = serve(router).await;

        let response = source(&format!("{}/", base_url)).fetch_sales().await.unwrap();
        assert_eq!(response.data.len(), 2);
        assert!(response.is_live);
    }

    #[tokio::test]
    async fn test_error_status_carries_message() {
        let router = Router::new().route(
            "/api/sales",
            get(|| async {
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(serde_json::json!({"error": "down for maintenance"})),
                )
            }),
        );
        let base_url = serve(router).await;

        match source(&base_url).fetch_sales().await {
            Err(FetchError::Status { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "down for maintenance");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let router = Router::new().route(
            "/api/sales",
            get(|| async { Json(serde_json::json!({"rows": []})) }),
        );
        let base_url = serve(router).await;

        assert!(matches!(
            source(&base_url).fetch_sales().await,
            Err(FetchError::Malformed(_))
        ));
    }

    #[tokio::test]
    async fn test_unreachable_source_is_network_error() {
        // Занимаем порт и сразу освобождаем, чтобы соединение отклонялось
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        assert!(matches!(
            source(&format!("http://{}", addr)).fetch_sales().await,
            Err(FetchError::Network(_))
        ));
    }
}
