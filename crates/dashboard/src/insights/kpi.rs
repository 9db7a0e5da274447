use contracts::dashboards::d410_sales_insights::InsightBundle;

use super::trend::TrendDirection;
use crate::shared::format::{format_money, format_percent};

/// Цветовой вариант карточки
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardVariant {
    Default,
    Success,
    Info,
    Warning,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardTrend {
    pub direction: TrendDirection,
    pub value: String,
    pub label: Option<String>,
}

/// KPI-карточка в виде готовых к выводу строк
#[derive(Debug, Clone, PartialEq)]
pub struct KpiCard {
    pub title: String,
    pub value: String,
    pub subtitle: String,
    pub trend: Option<CardTrend>,
    pub variant: CardVariant,
}

const LOADING: &str = "Loading...";

fn growth_trend(growth: Option<f64>, label: &str) -> CardTrend {
    CardTrend {
        direction: TrendDirection::from_optional(growth),
        value: growth.map(format_percent).unwrap_or_else(|| "n/a".to_string()),
        label: Some(label.to_string()),
    }
}

/// Четыре KPI-карточки дашборда.
///
/// Пока идёт загрузка, значения заменяются на `Loading...`; без аналитики
/// карточки показывают нули и не имеют тренда.
pub fn kpi_cards(insights: Option<&InsightBundle>, loading: bool) -> Vec<KpiCard> {
    let value = |text: String| if loading { LOADING.to_string() } else { text };

    let total_revenue = KpiCard {
        title: "Total Revenue".to_string(),
        value: value(format_money(insights.map_or(0.0, |i| i.total_revenue))),
        subtitle: insights
            .map(|i| format!("{}-{} combined", i.first_year, i.last_year))
            .unwrap_or_default(),
        trend: insights.map(|i| growth_trend(i.revenue_growth, "total growth")),
        variant: CardVariant::Default,
    };

    let average_growth = KpiCard {
        title: "Average Growth".to_string(),
        value: value(format_percent(insights.map_or(0.0, |i| i.avg_growth_rate))),
        subtitle: "Year over year".to_string(),
        trend: insights.map(|i| CardTrend {
            direction: super::trend::trend_direction(i.avg_growth_rate),
            value: if i.avg_growth_rate > 0.0 { "Growing" } else { "Declining" }.to_string(),
            label: None,
        }),
        variant: CardVariant::Success,
    };

    let best_year = KpiCard {
        title: "Best Year".to_string(),
        value: value(
            insights
                .map(|i| i.best_year.year.to_string())
                .unwrap_or_else(|| "-".to_string()),
        ),
        subtitle: insights
            .map(|i| format!("{} in sales", format_money(i.best_year.sales)))
            .unwrap_or_default(),
        trend: None,
        variant: CardVariant::Info,
    };

    let avg_yearly = KpiCard {
        title: "Avg. Yearly Sales".to_string(),
        value: value(format_money(insights.map_or(0.0, |i| i.avg_yearly_sales))),
        subtitle: "Per year average".to_string(),
        trend: insights
            .and_then(|i| i.latest_growth())
            .map(|latest| growth_trend(latest.growth, "latest YoY")),
        variant: CardVariant::Warning,
    };

    vec![total_revenue, average_growth, best_year, avg_yearly]
}
