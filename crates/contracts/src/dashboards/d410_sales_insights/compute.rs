use crate::domain::a030_sales_record::SalesRecord;
use crate::enums::Month;

use super::dto::{
    InsightBundle, MonthHighlight, MonthlyTrend, YearHighlight, YearOverYearGrowth,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Percentage change from `prev` to `cur`; undefined when `prev` is zero.
fn pct_change(cur: f64, prev: f64) -> Option<f64> {
    if prev == 0.0 {
        None
    } else {
        Some((cur - prev) / prev * 100.0)
    }
}

fn highlight(record: &SalesRecord) -> YearHighlight {
    YearHighlight {
        year: record.year,
        sales: record.total_sales,
    }
}

#[derive(Default, Clone, Copy)]
struct MonthBucket {
    sum: f64,
    count: u32,
}

/// Результат одного прохода по помесячным данным
struct MonthlyScan {
    best: Option<MonthHighlight>,
    worst: Option<MonthHighlight>,
    buckets: [MonthBucket; 12],
    data_points: usize,
}

fn scan_months(sorted: &[&SalesRecord]) -> MonthlyScan {
    let mut scan = MonthlyScan {
        best: None,
        worst: None,
        buckets: [MonthBucket::default(); 12],
        data_points: 0,
    };

    for record in sorted {
        let Some(monthly) = record.monthly_breakdown.as_ref() else {
            continue;
        };

        for entry in monthly {
            scan.data_points += 1;

            // Строгое сравнение: при равенстве остаётся первый найденный месяц
            if scan.best.as_ref().map_or(true, |b| entry.value > b.value) {
                scan.best = Some(MonthHighlight {
                    month: entry.month,
                    value: entry.value,
                    year: record.year,
                });
            }
            if scan.worst.as_ref().map_or(true, |w| entry.value < w.value) {
                scan.worst = Some(MonthHighlight {
                    month: entry.month,
                    value: entry.value,
                    year: record.year,
                });
            }

            let bucket = &mut scan.buckets[entry.month.index()];
            bucket.sum += entry.value;
            bucket.count += 1;
        }
    }

    scan
}

// ---------------------------------------------------------------------------
// Public compute function
// ---------------------------------------------------------------------------

/// Рассчитать сводную аналитику по ряду продаж.
///
/// Возвращает `None` для пустого ряда. Функция тотальна: вырожденные
/// входные данные (один год, нулевые продажи) дают определённый результат,
/// а не ошибку. Входной порядок не важен, записи сортируются по году.
pub fn compute_insights(series: &[SalesRecord]) -> Option<InsightBundle> {
    let mut sorted: Vec<&SalesRecord> = series.iter().collect();
    sorted.sort_by_key(|r| r.year);

    let first = *sorted.first()?;
    let last = *sorted.last()?;
    let record_count = sorted.len();

    let total_revenue: f64 = sorted.iter().map(|r| r.total_sales).sum();
    let avg_yearly_sales = total_revenue / record_count as f64;

    let mut best_year = first;
    let mut worst_year = first;
    for record in sorted.iter().skip(1) {
        if record.total_sales > best_year.total_sales {
            best_year = record;
        }
        if record.total_sales < worst_year.total_sales {
            worst_year = record;
        }
    }

    let year_over_year_growth: Vec<YearOverYearGrowth> = sorted
        .windows(2)
        .map(|pair| YearOverYearGrowth {
            year: pair[1].year,
            previous_year: pair[0].year,
            growth: pct_change(pair[1].total_sales, pair[0].total_sales),
        })
        .collect();

    // Переходы с нулевым предыдущим годом в среднее не входят
    let defined: Vec<f64> = year_over_year_growth
        .iter()
        .filter_map(|g| g.growth)
        .collect();
    let avg_growth_rate = if defined.is_empty() {
        0.0
    } else {
        defined.iter().sum::<f64>() / defined.len() as f64
    };

    let revenue_growth = if record_count < 2 {
        Some(0.0)
    } else {
        pct_change(last.total_sales, first.total_sales)
    };

    let scan = scan_months(&sorted);
    let monthly_trends: Vec<MonthlyTrend> = Month::ALL
        .iter()
        .filter_map(|month| {
            let bucket = scan.buckets[month.index()];
            (bucket.count > 0).then(|| MonthlyTrend {
                month: *month,
                avg_value: bucket.sum / bucket.count as f64,
            })
        })
        .collect();

    Some(InsightBundle {
        total_revenue,
        avg_yearly_sales,
        avg_growth_rate,
        best_year: highlight(best_year),
        worst_year: highlight(worst_year),
        best_month: scan.best,
        worst_month: scan.worst,
        year_over_year_growth,
        monthly_trends,
        revenue_growth,
        record_count,
        data_points: scan.data_points,
        first_year: first.year,
        last_year: last.year,
    })
}
