//! Sales reports over individual sale records.
//!
//! These rollups feed the statistics view: a per-day series for charts, a
//! per-service breakdown, the headline summary and all-time totals.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::Serialize;
use tracing::warn;

use crate::error::{Error, Result};
use crate::date_range::DateRange;
use crate::history::{normalize_date, parse_day, range_filter};
use crate::sale::{Haircut, ServicePrice};
use crate::types::Amount;

/// Spanish weekday abbreviations, Sunday first.
const WEEKDAY_NAMES: [&str; 7] = ["Dom", "Lun", "Mar", "Mié", "Jue", "Vie", "Sáb"];

/// Preset report windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportPreset {
    /// Every recorded sale
    #[default]
    All,
    /// Today only
    Today,
    /// Last 7 days (rolling)
    Week,
    /// Last 15 days (rolling)
    FifteenDays,
    /// Last 30 days (rolling)
    ThirtyDays,
    /// Last 3 months (rolling)
    ThreeMonths,
    /// Last 12 months (rolling)
    Year,
}

impl ReportPreset {
    /// Get display name for the preset.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::All => "Todo",
            Self::Today => "Hoy",
            Self::Week => "Esta semana",
            Self::FifteenDays => "Últimos 15 días",
            Self::ThirtyDays => "Últimos 30 días",
            Self::ThreeMonths => "Últimos 3 meses",
            Self::Year => "Último año",
        }
    }

    /// Command-line key for the preset.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Today => "today",
            Self::Week => "week",
            Self::FifteenDays => "15days",
            Self::ThirtyDays => "30days",
            Self::ThreeMonths => "3months",
            Self::Year => "year",
        }
    }

    /// Get all presets.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::All,
            Self::Today,
            Self::Week,
            Self::FifteenDays,
            Self::ThirtyDays,
            Self::ThreeMonths,
            Self::Year,
        ]
    }

    /// Inclusive `(start, end)` window of this preset.
    ///
    /// `All` spans the earliest to the latest sale; with no datable sales
    /// it falls back to the last month.
    #[must_use]
    pub fn span(self, today: NaiveDate, sales: &[Haircut]) -> (NaiveDate, NaiveDate) {
        let back_days = |n: u64| today.checked_sub_days(Days::new(n)).unwrap_or(today);
        let back_months = |n: u32| today.checked_sub_months(Months::new(n)).unwrap_or(today);

        let start = match self {
            Self::All => {
                let mut dates = sales.iter().filter_map(|s| parse_day(&s.date).ok());
                if let Some(first) = dates.next() {
                    let (min, max) = dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)));
                    return (min, max);
                }
                back_months(1)
            }
            Self::Today => today,
            Self::Week => back_days(7),
            Self::FifteenDays => back_days(15),
            Self::ThirtyDays => back_days(30),
            Self::ThreeMonths => back_months(3),
            Self::Year => back_months(12),
        };
        (start, today)
    }
}

impl FromStr for ReportPreset {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|preset| preset.key() == s.trim().to_lowercase())
            .ok_or_else(|| {
                let keys: Vec<&str> = Self::all().iter().map(|p| p.key()).collect();
                Error::other(format!("unknown preset '{s}', expected one of {keys:?}"))
            })
    }
}

impl fmt::Display for ReportPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One day of the chart series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub day_name: &'static str,
    pub revenue: Amount,
    pub count: u64,
    pub tip: Amount,
    pub avg_price: f64,
}

/// Share of one service in the selected sales.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStat {
    pub name: String,
    pub count: u64,
    pub revenue: Amount,
    /// Percentage of the total service count (0-100)
    pub percentage: f64,
}

/// Headline numbers of a report.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub records: usize,
    pub total_revenue: Amount,
    pub total_tips: Amount,
    pub total_services: u64,
    /// Distinct days with at least one sale
    pub active_days: usize,
    /// Revenue per active day
    pub average_daily: f64,
    pub top_service: Option<ServiceStat>,
}

/// All-time totals over every recorded sale.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalStats {
    pub total_cuts: usize,
    pub total_revenue: Amount,
    pub average_ticket: f64,
    pub first_sale_date: Option<NaiveDate>,
}

/// A complete report for one window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesReport {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub daily: Vec<DailyPoint>,
    pub services: Vec<ServiceStat>,
    pub summary: SalesSummary,
}

/// Sales whose date lies inside `range`, in their original order.
#[must_use]
pub fn sales_in_range<'a>(sales: &'a [Haircut], range: &DateRange) -> Vec<&'a Haircut> {
    let in_range = range_filter(range);
    sales.iter().filter(|sale| in_range(&sale.date)).collect()
}

/// One point per calendar day in `[start, end]`; days without sales are
/// zero-valued.
#[must_use]
pub fn daily_series(
    sales: &[&Haircut],
    prices: &[ServicePrice],
    start: NaiveDate,
    end: NaiveDate,
    default_base_price: i64,
) -> Vec<DailyPoint> {
    let mut points: Vec<DailyPoint> = start
        .iter_days()
        .take_while(|day| *day <= end)
        .map(|date| DailyPoint {
            date,
            day_name: weekday_name(date),
            revenue: Amount::default(),
            count: 0,
            tip: Amount::default(),
            avg_price: 0.0,
        })
        .collect();

    for sale in sales {
        let day = match parse_day(&sale.date) {
            Ok(day) => day,
            Err(e) => {
                warn!(id = %sale.id, error = %e, "Skipping sale with unreadable date");
                continue;
            }
        };
        let Ok(offset) = usize::try_from((day - start).num_days()) else {
            continue;
        };
        if let Some(point) = points.get_mut(offset) {
            point.count += sale.effective_count(prices, default_base_price);
            point.revenue += sale.price;
            point.tip += sale.tip;
            point.avg_price = point.revenue / usize::try_from(point.count).unwrap_or(usize::MAX);
        }
    }

    points
}

/// Per-service counts and revenue, most-sold first.
#[must_use]
pub fn service_breakdown(
    sales: &[&Haircut],
    prices: &[ServicePrice],
    default_base_price: i64,
) -> Vec<ServiceStat> {
    let mut stats: Vec<ServiceStat> = Vec::new();
    let mut total_count: u64 = 0;

    for sale in sales {
        let count = sale.effective_count(prices, default_base_price);
        total_count += count;

        if let Some(stat) = stats.iter_mut().find(|s| s.name == sale.service_name) {
            stat.count += count;
            stat.revenue += sale.price;
        } else {
            stats.push(ServiceStat {
                name: sale.service_name.clone(),
                count,
                revenue: sale.price,
                percentage: 0.0,
            });
        }
    }

    for stat in &mut stats {
        stat.percentage = percentage(stat.count, total_count);
    }
    stats.sort_by(|a, b| b.count.cmp(&a.count));
    stats
}

/// Headline numbers for the selected sales.
#[must_use]
pub fn sales_summary(
    sales: &[&Haircut],
    prices: &[ServicePrice],
    default_base_price: i64,
) -> SalesSummary {
    let total_revenue: Amount = sales.iter().map(|s| s.price).sum();
    let total_tips: Amount = sales.iter().map(|s| s.tip).sum();
    let total_services = sales
        .iter()
        .map(|s| s.effective_count(prices, default_base_price))
        .sum();

    let mut days: Vec<String> = sales
        .iter()
        .map(|s| {
            parse_day(&s.date)
                .map_or_else(|_| normalize_date(&s.date).into_owned(), |day| day.to_string())
        })
        .collect();
    days.sort();
    days.dedup();

    SalesSummary {
        records: sales.len(),
        total_revenue,
        total_tips,
        total_services,
        active_days: days.len(),
        average_daily: total_revenue / days.len(),
        top_service: service_breakdown(sales, prices, default_base_price)
            .into_iter()
            .next(),
    }
}

/// Build the full report for a preset window.
#[must_use]
pub fn build_report(
    sales: &[Haircut],
    prices: &[ServicePrice],
    preset: ReportPreset,
    today: NaiveDate,
    default_base_price: i64,
) -> SalesReport {
    let (start, end) = preset.span(today, sales);
    let selected = sales_in_range(sales, &DateRange::new(start, end, preset.display_name()));

    SalesReport {
        start,
        end,
        daily: daily_series(&selected, prices, start, end, default_base_price),
        services: service_breakdown(&selected, prices, default_base_price),
        summary: sales_summary(&selected, prices, default_base_price),
    }
}

/// All-time totals over every sale.
#[must_use]
pub fn global_stats(sales: &[Haircut]) -> GlobalStats {
    let total_revenue: Amount = sales.iter().map(|s| s.price).sum();

    GlobalStats {
        total_cuts: sales.len(),
        total_revenue,
        average_ticket: total_revenue / sales.len(),
        first_sale_date: sales.iter().filter_map(|s| parse_day(&s.date).ok()).min(),
    }
}

fn weekday_name(date: NaiveDate) -> &'static str {
    WEEKDAY_NAMES[date.weekday().num_days_from_sunday() as usize]
}

#[allow(clippy::cast_precision_loss)]
fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 / total as f64 * 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn sale(id: &str, service: &str, price: i64, date: &str, count: u32, tip: i64) -> Haircut {
        Haircut {
            id: id.to_string(),
            client_name: format!("client-{id}"),
            service_name: service.to_string(),
            price: Amount::new(price),
            date: date.to_string(),
            time: None,
            count,
            tip: Amount::new(tip),
        }
    }

    fn sample() -> Vec<Haircut> {
        vec![
            sale("1", "Corte", 5000, "03/01/2026", 1, 0),
            sale("2", "Corte", 13000, "08/01/2026", 2, 500),
            sale("3", "Barba", 60000, "09/01/2026", 8, 1000),
        ]
    }

    fn prices() -> Vec<ServicePrice> {
        vec![ServicePrice {
            service_name: "Corte".to_string(),
            base_price: Amount::new(5000),
        }]
    }

    #[test]
    fn test_preset_parsing() {
        assert_eq!("15days".parse::<ReportPreset>().unwrap(), ReportPreset::FifteenDays);
        assert_eq!(" YEAR ".parse::<ReportPreset>().unwrap(), ReportPreset::Year);
        assert!("fortnight".parse::<ReportPreset>().is_err());
        assert_eq!(ReportPreset::all().len(), 7);
        assert_eq!(ReportPreset::ThreeMonths.to_string(), "Últimos 3 meses");
    }

    #[test]
    fn test_preset_spans() {
        let today = d(2026, 10, 16);
        assert_eq!(ReportPreset::Today.span(today, &[]), (today, today));
        assert_eq!(ReportPreset::Week.span(today, &[]), (d(2026, 10, 9), today));
        assert_eq!(ReportPreset::ThreeMonths.span(today, &[]), (d(2026, 7, 16), today));
        assert_eq!(ReportPreset::Year.span(today, &[]), (d(2025, 10, 16), today));
        assert_eq!(ReportPreset::All.span(today, &[]), (d(2026, 9, 16), today));
        assert_eq!(
            ReportPreset::All.span(today, &sample()),
            (d(2026, 1, 3), d(2026, 1, 9))
        );
    }

    #[test]
    fn test_sales_in_range() {
        let mut sales = sample();
        sales.push(sale("4", "Corte", 8000, "2026-01-09T19:45:00", 1, 0));
        sales.push(sale("5", "Corte", 8000, "2026-01-10T08:00:00", 1, 0));

        let range = DateRange::new(d(2026, 1, 4), d(2026, 1, 9), "x");
        let selected = sales_in_range(&sales, &range);
        let ids: Vec<&str> = selected.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3", "4"]);
    }

    #[test]
    fn test_daily_series_fills_every_day() {
        let sales = sample();
        let selected: Vec<&Haircut> = sales.iter().collect();
        let series = daily_series(&selected, &prices(), d(2026, 1, 1), d(2026, 1, 10), 8000);

        assert_eq!(series.len(), 10);
        assert_eq!(series[0].date, d(2026, 1, 1));
        assert_eq!(series[0].day_name, "Jue");
        assert!(series[0].revenue.is_zero());

        let jan9 = &series[8];
        assert_eq!(jan9.date, d(2026, 1, 9));
        assert_eq!(jan9.revenue, Amount::new(60000));
        assert_eq!(jan9.count, 8);
        assert_eq!(jan9.tip, Amount::new(1000));
        assert!((jan9.avg_price - 7500.0).abs() < f64::EPSILON);

        let active: Vec<_> = series.iter().filter(|p| p.count > 0).collect();
        assert_eq!(active.len(), 3);
    }

    #[test]
    fn test_service_breakdown() {
        let mut sales = sample();
        sales.push(sale("4", "Corte", 10000, "10/01/2026", 0, 0));
        let selected: Vec<&Haircut> = sales.iter().collect();

        let stats = service_breakdown(&selected, &prices(), 8000);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].name, "Barba");
        assert_eq!(stats[0].count, 8);
        // Corte: 1 + 2 + legacy 10000/5000
        assert_eq!(stats[1].count, 5);
        assert_eq!(stats[1].revenue, Amount::new(28000));
        assert!((stats[0].percentage + stats[1].percentage - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_summary() {
        let mut sales = sample();
        sales.push(sale("4", "Corte", 2000, "2026-01-09T18:10:00", 1, 0));
        let selected: Vec<&Haircut> = sales.iter().collect();

        let summary = sales_summary(&selected, &prices(), 8000);
        assert_eq!(summary.records, 4);
        assert_eq!(summary.total_revenue, Amount::new(80000));
        assert_eq!(summary.total_tips, Amount::new(1500));
        assert_eq!(summary.total_services, 12);
        assert_eq!(summary.active_days, 3);
        assert!((summary.average_daily - 80000.0 / 3.0).abs() < 1e-9);
        assert_eq!(summary.top_service.unwrap().name, "Barba");
    }

    #[test]
    fn test_summary_empty() {
        let summary = sales_summary(&[], &prices(), 8000);
        assert_eq!(summary, SalesSummary::default());
    }

    #[test]
    fn test_build_report() {
        let sales = sample();
        let report = build_report(&sales, &prices(), ReportPreset::All, d(2026, 10, 16), 8000);
        assert_eq!(report.start, d(2026, 1, 3));
        assert_eq!(report.end, d(2026, 1, 9));
        assert_eq!(report.daily.len(), 7);
        assert_eq!(report.summary.total_revenue, Amount::new(78000));
        assert_eq!(report.summary.total_services, 11);
    }

    #[test]
    fn test_global_stats() {
        let stats = global_stats(&sample());
        assert_eq!(stats.total_cuts, 3);
        assert_eq!(stats.total_revenue, Amount::new(78000));
        assert!((stats.average_ticket - 26000.0).abs() < f64::EPSILON);
        assert_eq!(stats.first_sale_date, Some(d(2026, 1, 3)));

        assert_eq!(global_stats(&[]), GlobalStats::default());
    }
}
