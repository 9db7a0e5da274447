pub mod api_client;
pub mod config;
pub mod format;
