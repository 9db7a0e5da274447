use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub sales: SalesConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

/// Настройки mock-источника данных о продажах
#[derive(Debug, Deserialize, Clone)]
pub struct SalesConfig {
    /// JSON fixture with the initial series; relative paths resolve next to the executable.
    #[serde(default = "default_fixture_path")]
    pub fixture_path: String,
    /// Имитировать «живые» данные: каждый GET немного сдвигает последний месяц
    #[serde(default = "default_true")]
    pub simulate_live: bool,
    /// Доля запросов GET /api/sales, завершающихся ошибкой 503 (0.0 – 1.0)
    #[serde(default)]
    pub failure_rate: f64,
}

impl Default for SalesConfig {
    fn default() -> Self {
        Self {
            fixture_path: default_fixture_path(),
            simulate_live: true,
            failure_rate: 0.0,
        }
    }
}

fn default_port() -> u16 {
    3000
}

fn default_fixture_path() -> String {
    "data/sales.json".to_string()
}

fn default_true() -> bool {
    true
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
port = 3000

[sales]
fixture_path = "data/sales.json"
simulate_live = true
failure_rate = 0.0
"#;

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                let config: Config = toml::from_str(&contents)?;
                return Ok(config);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

/// Resolve the fixture path.
///
/// Absolute paths are used as is; relative ones are tried next to the
/// executable first, then against the working directory.
pub fn resolve_fixture_path(config: &Config) -> PathBuf {
    let path = Path::new(&config.sales.fixture_path);
    if path.is_absolute() {
        return path.to_path_buf();
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let resolved = exe_dir.join(path);
            if resolved.exists() {
                return resolved;
            }
        }
    }

    PathBuf::from(&config.sales.fixture_path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.sales.fixture_path, "data/sales.json");
        assert!(config.sales.simulate_live);
        assert_eq!(config.sales.failure_rate, 0.0);
    }

    #[test]
    fn test_missing_sections_take_defaults() {
        let config: Config = toml::from_str("[dashboard]\npoll_interval_ms = 1000\n").unwrap();
        assert_eq!(config.server.port, 3000);
        assert!(config.sales.simulate_live);
    }

    #[test]
    fn test_absolute_fixture_path_is_kept() {
        let mut config = Config::default();
        let absolute = std::env::temp_dir().join("sales.json");
        config.sales.fixture_path = absolute.display().to_string();
        assert_eq!(resolve_fixture_path(&config), absolute);
    }
}
