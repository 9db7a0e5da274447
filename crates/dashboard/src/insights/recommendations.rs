//! Рекомендации по ряду продаж: рост, лучший год, пиковый и слабый месяц, прогноз

use contracts::dashboards::d410_sales_insights::InsightBundle;

use crate::shared::format::{format_money, format_percent, format_signed_percent, format_thousands};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecommendationKind {
    Positive,
    Negative,
    Neutral,
    Info,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub title: String,
    pub description: String,
    /// Короткая метрика для бейджа (`+23.1% YoY`, `$209.0K`)
    pub metric: Option<String>,
}

impl Recommendation {
    fn new(kind: RecommendationKind, title: impl Into<String>, description: String) -> Self {
        Self {
            kind,
            title: title.into(),
            description,
            metric: None,
        }
    }

    fn with_metric(mut self, metric: String) -> Self {
        self.metric = Some(metric);
        self
    }
}

/// Прогноз выручки на следующий год: `total_revenue * (1 + avg_growth_rate / 100)`
pub fn projected_next_year(insights: &InsightBundle) -> f64 {
    insights.total_revenue * (1.0 + insights.avg_growth_rate / 100.0)
}

fn growth_recommendation(rate: f64) -> Recommendation {
    let metric = format!("{} YoY", format_signed_percent(rate));

    let recommendation = if rate > 20.0 {
        Recommendation::new(
            RecommendationKind::Positive,
            "Strong Growth Momentum",
            format!(
                "Sales have been growing at {} year-over-year on average. Market traction is excellent.",
                format_percent(rate)
            ),
        )
    } else if rate > 10.0 {
        Recommendation::new(
            RecommendationKind::Positive,
            "Healthy Growth Rate",
            format!(
                "Sales are growing at {} annually. Scale the strategies that work to accelerate further.",
                format_percent(rate)
            ),
        )
    } else if rate > 0.0 {
        Recommendation::new(
            RecommendationKind::Neutral,
            "Moderate Growth",
            format!(
                "Growth of {} is positive but modest. Review pricing and marketing.",
                format_percent(rate)
            ),
        )
    } else {
        Recommendation::new(
            RecommendationKind::Negative,
            "Sales Decline Detected",
            format!(
                "Sales are declining at {} annually. Root causes need immediate attention.",
                format_percent(rate.abs())
            ),
        )
    };

    recommendation.with_metric(metric)
}

/// Упорядоченный список рекомендаций для готовой аналитики
pub fn recommendations(insights: &InsightBundle) -> Vec<Recommendation> {
    let mut items = vec![growth_recommendation(insights.avg_growth_rate)];

    let best = &insights.best_year;
    items.push(
        Recommendation::new(
            RecommendationKind::Info,
            format!("Best Year: {}", best.year),
            format!(
                "{} achieved the highest sales at {}. Analyze what worked during this period.",
                best.year,
                format_money(best.sales)
            ),
        )
        .with_metric(format_thousands(best.sales, 1)),
    );

    if let Some(peak) = &insights.best_month {
        items.push(
            Recommendation::new(
                RecommendationKind::Positive,
                format!("Peak Month: {}", peak.month),
                format!(
                    "{} {} shows the strongest performance ({}). Increase marketing spend and inventory for this period.",
                    peak.month,
                    peak.year,
                    format_money(peak.value)
                ),
            )
            .with_metric(format_money(peak.value)),
        );
    }

    if let Some(low) = &insights.worst_month {
        items.push(
            Recommendation::new(
                RecommendationKind::Neutral,
                format!("Opportunity Month: {}", low.month),
                format!(
                    "{} {} shows lower sales ({}). Consider seasonal promotions or targeted campaigns.",
                    low.month,
                    low.year,
                    format_money(low.value)
                ),
            )
            .with_metric(format_money(low.value)),
        );
    }

    let projected = projected_next_year(insights);
    let next_year = insights.last_year + 1;
    items.push(
        Recommendation::new(
            RecommendationKind::Info,
            format!("{} Projection", next_year),
            format!(
                "Based on current trends, projected {} revenue is {}. Set targets 10-15% above projection.",
                next_year,
                format_money(projected)
            ),
        )
        .with_metric(format!("~{}", format_thousands(projected, 0))),
    );

    items
}
