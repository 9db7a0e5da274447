pub mod kpi;
pub mod recommendations;
pub mod trend;

pub use kpi::{kpi_cards, CardTrend, CardVariant, KpiCard};
pub use recommendations::{projected_next_year, recommendations, Recommendation, RecommendationKind};
pub use trend::{trend_direction, TrendDirection};
