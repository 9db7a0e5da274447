pub mod handlers;
pub mod routes;
pub mod shared;
pub mod system;

pub use shared::data::sales_store::SalesStore;

use std::sync::Arc;

/// Общее состояние приложения для обработчиков axum
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<SalesStore>,
}

impl AppState {
    pub fn new(store: SalesStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}
