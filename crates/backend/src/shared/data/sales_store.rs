use anyhow::{bail, Context, Result};
use chrono::Utc;
use contracts::domain::a030_sales_record::{SalesRecord, SalesResponse};
use rand::Rng;
use std::collections::HashSet;
use std::path::Path;
use tokio::sync::RwLock;

/// Встроенный ряд продаж на случай, если файл фикстуры не найден
const DEFAULT_FIXTURE: &str = include_str!("../../../data/sales.json");

/// Максимальный относительный сдвиг значения за один запрос в режиме live
const LIVE_DRIFT: f64 = 0.03;

/// In-memory хранилище годовых записей продаж.
///
/// Записи хранятся отсортированными по году, год уникален.
pub struct SalesStore {
    records: RwLock<Vec<SalesRecord>>,
    simulate_live: bool,
    failure_rate: f64,
}

impl SalesStore {
    pub fn new(mut records: Vec<SalesRecord>, simulate_live: bool, failure_rate: f64) -> Self {
        records.sort_by_key(|r| r.year);
        Self {
            records: RwLock::new(records),
            simulate_live,
            failure_rate: failure_rate.clamp(0.0, 1.0),
        }
    }

    /// Загрузить ряд из JSON-файла; при отсутствии файла используется встроенный ряд
    pub fn from_fixture(path: &Path, simulate_live: bool, failure_rate: f64) -> Result<Self> {
        let records = if path.exists() {
            tracing::info!("Loading sales fixture from: {}", path.display());
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Cannot read sales fixture {}", path.display()))?;
            parse_fixture(&contents)?
        } else {
            tracing::warn!(
                "Sales fixture not found at {}, using embedded series",
                path.display()
            );
            parse_fixture(DEFAULT_FIXTURE)?
        };

        tracing::info!("Sales store initialized with {} records", records.len());
        Ok(Self::new(records, simulate_live, failure_rate))
    }

    /// Store seeded with the embedded series.
    pub fn with_default_fixture(simulate_live: bool) -> Result<Self> {
        Ok(Self::new(parse_fixture(DEFAULT_FIXTURE)?, simulate_live, 0.0))
    }

    pub fn is_live(&self) -> bool {
        self.simulate_live
    }

    /// Решить, должен ли текущий запрос имитировать сбой источника
    pub fn should_fail(&self) -> bool {
        self.failure_rate > 0.0 && rand::thread_rng().gen_bool(self.failure_rate)
    }

    /// Текущий ряд в формате ответа `GET /api/sales`.
    ///
    /// В режиме live перед выдачей данные немного сдвигаются.
    pub async fn current(&self) -> SalesResponse {
        let data = if self.simulate_live {
            let factor = rand::thread_rng().gen_range(-LIVE_DRIFT..=LIVE_DRIFT);
            let mut records = self.records.write().await;
            apply_drift(&mut records, factor);
            records.clone()
        } else {
            self.records.read().await.clone()
        };

        SalesResponse {
            data,
            timestamp: Utc::now(),
            is_live: self.simulate_live,
        }
    }

    pub async fn records(&self) -> Vec<SalesRecord> {
        self.records.read().await.clone()
    }

    /// Добавить запись или заменить запись того же года.
    ///
    /// Возвращает `true`, если год добавлен впервые.
    pub async fn upsert(&self, record: SalesRecord) -> bool {
        let mut records = self.records.write().await;
        match records.iter_mut().find(|r| r.year == record.year) {
            Some(existing) => {
                *existing = record;
                false
            }
            None => {
                records.push(record);
                records.sort_by_key(|r| r.year);
                true
            }
        }
    }
}

/// Разобрать фикстуру: годы уникальны, месяцы каждого года по возрастанию
pub fn parse_fixture(json: &str) -> Result<Vec<SalesRecord>> {
    let records: Vec<SalesRecord> =
        serde_json::from_str(json).context("Sales fixture is not a valid series")?;

    let mut seen = HashSet::new();
    for record in &records {
        if !seen.insert(record.year) {
            bail!("Sales fixture contains year {} more than once", record.year);
        }
        if let Err(e) = record.validate_monthly() {
            bail!("Sales fixture is invalid: {}", e);
        }
    }

    Ok(records)
}

/// Сдвинуть последнее помесячное значение последнего года на `factor`.
///
/// Годовой итог меняется на ту же дельту, значения не уходят ниже нуля.
/// Если у года нет разбивки, сдвигается сам итог.
fn apply_drift(records: &mut [SalesRecord], factor: f64) {
    let Some(latest) = records.last_mut() else {
        return;
    };

    let delta = match latest
        .monthly_breakdown
        .as_mut()
        .and_then(|monthly| monthly.last_mut())
    {
        Some(entry) => {
            let updated = (entry.value * (1.0 + factor)).round().max(0.0);
            let delta = updated - entry.value;
            entry.value = updated;
            delta
        }
        None => (latest.total_sales * factor).round(),
    };

    latest.total_sales = (latest.total_sales + delta).max(0.0);
}
