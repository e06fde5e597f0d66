//! Display utilities for formatting sales statistics in the terminal.
//!
//! # Functions
//!
//! - [`format_currency`] - Pesos with Argentine thousands separators
//! - [`format_date`] / [`format_short_date`] / [`format_display_date`] - Spanish date labels
//! - [`truncate`] - Truncate strings to a maximum length with ellipsis
//! - [`make_bar`] - Create visual bar charts for relative values
//! - [`print_section`] / [`print_section_simple`] - Print section headers
//! - [`display_history`] / [`display_history_stats`] / etc. - Display formatted stats

use chrono::{Datelike, NaiveDate};

use crate::date_range::DateRange;
use crate::history::{normalize_date, parse_day, visible_days, DailyHistoryItem, HistoryStats};
use crate::report::{DailyPoint, GlobalStats, SalesSummary, ServiceStat};
use crate::types::Amount;

/// Month abbreviations used in date labels, January first.
const MONTH_LABELS: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sept", "oct", "nov", "dic",
];

/// Lower-case Spanish weekday abbreviations, Monday first.
const WEEKDAY_ABBREVIATIONS: [&str; 7] = ["lun", "mar", "mié", "jue", "vie", "sáb", "dom"];

/// Upper-case the first character of a string.
#[must_use]
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Format an amount as Argentine pesos without decimals, e.g. `$ 78.000`.
#[must_use]
pub fn format_currency(amount: Amount) -> String {
    let value = amount.get();
    let digits = value.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    if value < 0 {
        format!("-$ {grouped}")
    } else {
        format!("$ {grouped}")
    }
}

/// Format a fractional amount (an average) as pesos, rounded to the peso.
#[must_use]
pub fn format_currency_f64(amount: f64) -> String {
    if amount.is_finite() {
        format_currency(Amount::from(amount))
    } else {
        format_currency(Amount::default())
    }
}

/// Format a date as `dd/mm/yyyy`.
#[must_use]
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Format a date as `15 ene 2026`.
#[must_use]
pub fn format_short_date(date: NaiveDate) -> String {
    format!(
        "{} {} {}",
        date.day(),
        MONTH_LABELS[date.month0() as usize],
        date.year()
    )
}

/// Friendly label for a history date: `Hoy`, `Ayer` or `vie 9 de ene`.
///
/// Dates that cannot be read are returned unchanged.
#[must_use]
pub fn format_display_date(date: &str, today: NaiveDate) -> String {
    let Ok(day) = parse_day(date) else {
        return date.to_string();
    };

    if day == today {
        "Hoy".to_string()
    } else if today.pred_opt() == Some(day) {
        "Ayer".to_string()
    } else {
        format!(
            "{} {} de {}",
            WEEKDAY_ABBREVIATIONS[day.weekday().num_days_from_monday() as usize],
            day.day(),
            MONTH_LABELS[day.month0() as usize]
        )
    }
}

/// Truncate a string to a maximum length, adding "..." if truncated.
///
/// Counts characters rather than bytes. For `max_len < 3`, truncates
/// without ellipsis since there's no room for "...".
///
/// # Examples
///
/// ```
/// use barber_stats::display::truncate;
///
/// assert_eq!(truncate("hello", 10), "hello");
/// assert_eq!(truncate("hello world", 8), "hello...");
/// assert_eq!(truncate("hello", 2), "he");
/// ```
#[must_use]
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        s.to_string()
    } else if max_len < 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{truncated}...")
    }
}

/// Create a visual bar for displaying relative values.
///
/// Uses Unicode block characters to create a proportional bar chart.
///
/// # Arguments
///
/// * `value` - The value to represent (negative values treated as 0)
/// * `max_value` - The maximum value (determines 100% width)
/// * `width` - The total width of the bar in characters
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn make_bar(value: i64, max_value: i64, width: usize) -> String {
    if max_value <= 0 || value <= 0 {
        return " ".repeat(width);
    }
    let ratio = (value as f64 / max_value as f64).clamp(0.0, 1.0);
    let filled = (ratio * width as f64) as usize;
    let empty = width.saturating_sub(filled);
    format!("{}{}", "█".repeat(filled), "░".repeat(empty))
}

/// Print a section header with equals signs.
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(50));
    println!("  {title}");
    println!("{}", "=".repeat(50));
}

/// Print a simple section header with dashes.
pub fn print_section_simple(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(30));
}

/// Display the active range.
pub fn display_range(range: &DateRange) {
    println!(
        "  Período:          {} ({} - {}, {} días)",
        range.label,
        format_date(range.start_date),
        format_date(range.end_date),
        range.num_days()
    );
}

/// Display history rollups.
pub fn display_history_stats(stats: &HistoryStats, today: NaiveDate) {
    println!("  Días:             {:>12}", stats.total_days);
    println!("  Total:            {:>12}", format_currency(stats.total_amount));
    println!("  Servicios:        {:>12}", stats.total_count);
    println!(
        "  Promedio diario:  {:>12}",
        format_currency_f64(stats.average_daily)
    );
    if let Some(ref date) = stats.max_date {
        println!(
            "  Mejor día:        {:>12} ({})",
            format_currency(stats.max_amount),
            format_display_date(date, today)
        );
    }
}

/// Display the days of a history worth listing, newest first.
///
/// With `hide_zero_days` set, days without revenue are left out.
pub fn display_history(
    items: &[DailyHistoryItem],
    today: NaiveDate,
    bar_width: usize,
    hide_zero_days: bool,
) {
    let days: Vec<&DailyHistoryItem> = if hide_zero_days {
        visible_days(items)
    } else {
        let mut all: Vec<&DailyHistoryItem> = items.iter().collect();
        all.sort_by(|a, b| normalize_date(&b.date).cmp(&normalize_date(&a.date)));
        all
    };
    let max_total = days.iter().map(|d| d.total.get()).max().unwrap_or(0);

    for day in days {
        println!(
            "  {:<14} {} {:>12} {:>3} serv.  {}",
            format_display_date(&day.date, today),
            make_bar(day.total.get(), max_total, bar_width),
            format_currency(day.total),
            day.count,
            truncate(&day.clients.join(", "), 40)
        );
    }
}

/// Display the per-day chart series as bars of revenue.
pub fn display_daily_series(points: &[DailyPoint], bar_width: usize) {
    let max_revenue = points.iter().map(|p| p.revenue.get()).max().unwrap_or(0);

    for point in points {
        println!(
            "  {} {} {} {:>12} {:>3} cortes  propina {}",
            point.day_name,
            point.date.format("%m-%d"),
            make_bar(point.revenue.get(), max_revenue, bar_width),
            format_currency(point.revenue),
            point.count,
            format_currency(point.tip)
        );
    }
}

/// Display the per-service breakdown.
pub fn display_service_breakdown(services: &[ServiceStat], bar_width: usize) {
    let max_count = services
        .first()
        .map_or(0, |s| i64::try_from(s.count).unwrap_or(i64::MAX));

    for (i, service) in services.iter().enumerate() {
        println!(
            "  {:2}. {:<20} {} {:>4} ({:>5.1}%) {:>12}",
            i + 1,
            truncate(&service.name, 20),
            make_bar(
                i64::try_from(service.count).unwrap_or(i64::MAX),
                max_count,
                bar_width
            ),
            service.count,
            service.percentage,
            format_currency(service.revenue)
        );
    }
}

/// Display the headline numbers of a report.
pub fn display_summary(summary: &SalesSummary) {
    println!("  Registros:        {:>12}", summary.records);
    println!("  Total ingresos:   {:>12}", format_currency(summary.total_revenue));
    println!("  Propinas:         {:>12}", format_currency(summary.total_tips));
    println!("  Total cortes:     {:>12}", summary.total_services);
    println!(
        "  Promedio diario:  {:>12}",
        format_currency_f64(summary.average_daily)
    );
    match &summary.top_service {
        Some(top) => println!("  Servicio popular: {:>12} ({} cortes)", top.name, top.count),
        None => println!("  Servicio popular: {:>12}", "-"),
    }
}

/// Display all-time totals.
pub fn display_global_stats(stats: &GlobalStats) {
    println!("  Cortes totales:   {:>12}", stats.total_cuts);
    println!("  Ingresos totales: {:>12}", format_currency(stats.total_revenue));
    println!(
        "  Ticket promedio:  {:>12}",
        format_currency_f64(stats.average_ticket)
    );
    println!(
        "  Primer corte:     {:>12}",
        stats
            .first_sale_date
            .map_or_else(|| "N/A".to_string(), format_date)
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(Amount::new(0)), "$ 0");
        assert_eq!(format_currency(Amount::new(999)), "$ 999");
        assert_eq!(format_currency(Amount::new(5000)), "$ 5.000");
        assert_eq!(format_currency(Amount::new(78000)), "$ 78.000");
        assert_eq!(format_currency(Amount::new(1_234_567)), "$ 1.234.567");
        assert_eq!(format_currency(Amount::new(-5000)), "-$ 5.000");
    }

    #[test]
    fn test_format_currency_f64() {
        assert_eq!(format_currency_f64(26000.4), "$ 26.000");
        assert_eq!(format_currency_f64(f64::NAN), "$ 0");
    }

    #[test]
    fn test_date_formats() {
        assert_eq!(format_date(d(2026, 1, 9)), "09/01/2026");
        assert_eq!(format_short_date(d(2026, 1, 15)), "15 ene 2026");
        assert_eq!(format_short_date(d(2025, 12, 1)), "1 dic 2025");
        assert_eq!(format_short_date(d(2026, 9, 15)), "15 sept 2026");
    }

    #[test]
    fn test_format_display_date() {
        let today = d(2026, 10, 16);
        assert_eq!(format_display_date("2026-10-16", today), "Hoy");
        assert_eq!(format_display_date("15/10/2026", today), "Ayer");
        assert_eq!(format_display_date("09/01/2026", today), "vie 9 de ene");
        assert_eq!(format_display_date("2026-09-01", today), "mar 1 de sept");
        assert_eq!(format_display_date("sin fecha", today), "sin fecha");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("enero"), "Enero");
        assert_eq!(capitalize("ñandú"), "Ñandú");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 8), "hello...");
        assert_eq!(truncate("Peñaloza Martínez", 8), "Peñal...");
        assert_eq!(truncate("hello", 2), "he");
        assert_eq!(truncate("hello", 3), "...");
    }

    #[test]
    fn test_make_bar() {
        assert_eq!(make_bar(100, 100, 10), "██████████");
        assert_eq!(make_bar(50, 100, 10), "█████░░░░░");
        assert_eq!(make_bar(50, 0, 10), "          ");
    }
}
