use contracts::dashboards::d410_sales_insights::{compare_latest_years, years_above_threshold};
use dashboard::console::Console;
use dashboard::insights::{kpi_cards, recommendations};
use dashboard::live::PipelineState;
use dashboard::shared::config;
use dashboard::shared::format::format_money;
use dashboard::{HttpSalesSource, LivePipeline};
use std::sync::Arc;
use tokio::io::BufReader;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Вывести сводку по новому снимку состояния
fn report(state: &PipelineState, threshold: Option<f64>) {
    tracing::info!(
        "Snapshot: phase={:?}, records={}, live={}, polling={}, fetches={}",
        state.phase(),
        state.series.len(),
        state.is_streaming(),
        state.polling_enabled,
        state.completed_fetches
    );

    if let Some(error) = &state.error {
        tracing::warn!("Last fetch failed at {}: {}", error.occurred_at, error.message);
    }

    let Some(insights) = &state.insights else {
        return;
    };

    for card in kpi_cards(Some(insights), state.loading) {
        match &card.trend {
            Some(trend) => tracing::info!(
                "  {}: {} ({}) {} {}{}",
                card.title,
                card.value,
                card.subtitle,
                trend.direction.arrow(),
                trend.value,
                trend.label.as_deref().map(|l| format!(" {}", l)).unwrap_or_default()
            ),
            None => tracing::info!("  {}: {} ({})", card.title, card.value, card.subtitle),
        }
    }

    for item in recommendations(insights) {
        tracing::info!(
            "  [{:?}] {}{}",
            item.kind,
            item.title,
            item.metric.as_deref().map(|m| format!(" ({})", m)).unwrap_or_default()
        );
    }

    if let Some(comparison) = compare_latest_years(&state.series) {
        for row in &comparison.rows {
            tracing::debug!(
                "  {}: {} {} / {} {}",
                row.month,
                comparison.previous_year,
                row.previous.map(format_money).unwrap_or_else(|| "-".to_string()),
                comparison.current_year,
                row.current.map(format_money).unwrap_or_else(|| "-".to_string())
            );
        }
    }

    let highlighted = years_above_threshold(&state.series, threshold);
    if !highlighted.is_empty() {
        tracing::info!("  Years above threshold: {:?}", highlighted);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let config = config::load_config()?.dashboard;
    let source = HttpSalesSource::new(&config.api_base_url, config.request_timeout())?;
    tracing::info!("Sales source: {}", source.sales_url());

    let pipeline = LivePipeline::new(Arc::new(source));
    let mut updates = pipeline.subscribe();
    pipeline.start(config.poll_interval_ms);

    tracing::info!("Commands: r - refresh, p - pause/resume polling, q - quit");
    let mut console = Console::new(BufReader::new(tokio::io::stdin()));

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = updates.borrow_and_update().clone();
                // Промежуточные снимки с поднятым индикатором не печатаем
                if !state.loading {
                    report(&state, config.highlight_threshold);
                }
            }
            command = console.next_command(), if console.is_open() => {
                match command? {
                    Some(command) => {
                        if command.apply(&pipeline).is_break() {
                            break;
                        }
                    }
                    None => tracing::info!("stdin closed, running until Ctrl+C"),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Ctrl+C received");
                break;
            }
        }
    }

    pipeline.stop();
    tracing::info!("Dashboard stopped");
    Ok(())
}
