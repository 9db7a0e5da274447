use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

/// Настройки клиента дашборда
#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Период опроса в миллисекундах; `<= 0` отключает автоматический опрос
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: i64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Порог подсветки лет в сводке; не задан или `0` — без подсветки
    #[serde(default)]
    pub highlight_threshold: Option<f64>,
}

impl DashboardConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            poll_interval_ms: default_poll_interval_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            highlight_threshold: None,
        }
    }
}

fn default_api_base_url() -> String {
    "http://127.0.0.1:3000".to_string()
}

fn default_poll_interval_ms() -> i64 {
    5000
}

fn default_request_timeout_secs() -> u64 {
    10
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[dashboard]
api_base_url = "http://127.0.0.1:3000"
poll_interval_ms = 5000
request_timeout_secs = 10
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. `DASHBOARD_CONFIG` environment variable
/// 2. Next to the executable
/// 3. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(path) = std::env::var("DASHBOARD_CONFIG") {
        tracing::info!("Loading config from DASHBOARD_CONFIG: {}", path);
        let contents = std::fs::read_to_string(&path)?;
        return Ok(toml::from_str(&contents)?);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                return Ok(toml::from_str(&contents)?);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    Ok(toml::from_str(DEFAULT_CONFIG)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.dashboard.poll_interval_ms, 5000);
        assert_eq!(config.dashboard.api_base_url, "http://127.0.0.1:3000");
        assert_eq!(config.dashboard.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_shared_config_file_with_backend_sections() {
        let contents = r#"
            [server]
            port = 8080

            [dashboard]
            poll_interval_ms = -1
        "#;
        let config: Config = toml::from_str(contents).unwrap();
        assert_eq!(config.dashboard.poll_interval_ms, -1);
        assert_eq!(config.dashboard.request_timeout_secs, 10);
        assert_eq!(config.dashboard.highlight_threshold, None);
    }

    #[test]
    fn test_highlight_threshold() {
        let config: Config = toml::from_str("[dashboard]\nhighlight_threshold = 150000.0").unwrap();
        assert_eq!(config.dashboard.highlight_threshold, Some(150000.0));
    }

    #[test]
    fn test_missing_dashboard_section_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.dashboard.poll_interval_ms, 5000);
    }
}
