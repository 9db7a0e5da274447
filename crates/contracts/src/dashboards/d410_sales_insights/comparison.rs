use crate::domain::a030_sales_record::SalesRecord;
use crate::enums::Month;

use super::dto::{ComparisonRow, MonthlyComparison};

/// Помесячное сравнение двух последних (по году) записей ряда.
///
/// В результат попадают месяцы, присутствующие хотя бы в одном из двух лет,
/// в календарном порядке. Для ряда короче двух лет возвращает `None`.
pub fn compare_latest_years(series: &[SalesRecord]) -> Option<MonthlyComparison> {
    let mut sorted: Vec<&SalesRecord> = series.iter().collect();
    sorted.sort_by_key(|r| r.year);

    let [.., previous, current] = sorted.as_slice() else {
        return None;
    };

    let rows = Month::ALL
        .iter()
        .filter_map(|month| {
            let prev = previous.month_value(*month);
            let cur = current.month_value(*month);
            (prev.is_some() || cur.is_some()).then_some(ComparisonRow {
                month: *month,
                previous: prev,
                current: cur,
            })
        })
        .collect();

    Some(MonthlyComparison {
        previous_year: previous.year,
        current_year: current.year,
        rows,
    })
}

/// Годы, продажи которых превышают порог (подсветка на графике).
///
/// Нулевой или нечисловой порог подсветку отключает.
pub fn years_above_threshold(series: &[SalesRecord], threshold: Option<f64>) -> Vec<i32> {
    let threshold = match threshold {
        Some(t) if t != 0.0 && !t.is_nan() => t,
        _ => return Vec::new(),
    };

    let mut years: Vec<i32> = series
        .iter()
        .filter(|r| r.total_sales > threshold)
        .map(|r| r.year)
        .collect();
    years.sort_unstable();
    years
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a030_sales_record::MonthEntry;

    fn with_months(year: i32, entries: &[(Month, f64)]) -> SalesRecord {
        SalesRecord::new(year, entries.iter().map(|(_, v)| v).sum()).with_monthly(
            entries
                .iter()
                .map(|(m, v)| MonthEntry::new(*m, *v))
                .collect(),
        )
    }

    #[test]
    fn test_compares_two_most_recent_years() {
        let series = vec![
            with_months(2024, &[(Month::Jan, 30.0), (Month::Mar, 10.0)]),
            with_months(2022, &[(Month::Jan, 1.0)]),
            with_months(2023, &[(Month::Jan, 20.0), (Month::Feb, 15.0)]),
        ];

        let cmp = compare_latest_years(&series).unwrap();
        assert_eq!(cmp.previous_year, 2023);
        assert_eq!(cmp.current_year, 2024);
        assert_eq!(
            cmp.rows,
            vec![
                ComparisonRow {
                    month: Month::Jan,
                    previous: Some(20.0),
                    current: Some(30.0),
                },
                ComparisonRow {
                    month: Month::Feb,
                    previous: Some(15.0),
                    current: None,
                },
                ComparisonRow {
                    month: Month::Mar,
                    previous: None,
                    current: Some(10.0),
                },
            ]
        );
    }

    #[test]
    fn test_needs_two_years() {
        assert!(compare_latest_years(&[]).is_none());
        assert!(compare_latest_years(&[SalesRecord::new(2024, 1.0)]).is_none());
    }

    #[test]
    fn test_threshold_highlight() {
        let series = vec![
            SalesRecord::new(2024, 300.0),
            SalesRecord::new(2022, 100.0),
            SalesRecord::new(2023, 200.0),
        ];
        assert_eq!(years_above_threshold(&series, Some(150.0)), vec![2023, 2024]);
        assert!(years_above_threshold(&series, Some(0.0)).is_empty());
        assert!(years_above_threshold(&series, None).is_empty());
    }
}
