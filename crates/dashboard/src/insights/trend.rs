/// Направление тренда для карточек
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendDirection {
    Up,
    Down,
    Neutral,
}

/// Порог (в процентах), ниже которого изменение считается нейтральным
const NEUTRAL_BAND: f64 = 5.0;

/// Классифицировать процент изменения: `> 5` рост, `< -5` падение
pub fn trend_direction(rate: f64) -> TrendDirection {
    if rate > NEUTRAL_BAND {
        TrendDirection::Up
    } else if rate < -NEUTRAL_BAND {
        TrendDirection::Down
    } else {
        TrendDirection::Neutral
    }
}

impl TrendDirection {
    /// Для неопределённого роста (база равна нулю) направление нейтральное
    pub fn from_optional(rate: Option<f64>) -> Self {
        rate.map(trend_direction).unwrap_or(TrendDirection::Neutral)
    }

    pub fn arrow(&self) -> &'static str {
        match self {
            TrendDirection::Up => "↑",
            TrendDirection::Down => "↓",
            TrendDirection::Neutral => "→",
        }
    }
}
