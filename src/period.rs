//! Natural-language period resolution.
//!
//! Turns a Spanish period expression ("hoy", "semana pasada",
//! "enero 2026", "15/01", "2025") into a [`DateRange`]. Parsing is purely
//! syntactic and produces a [`PeriodKind`]; boundaries are derived from the
//! kind and an explicit `today`, so nothing here reads the clock.

use chrono::{Datelike, Days, Months, NaiveDate};
use tracing::debug;

use crate::config::SearchConfig;
use crate::date_range::{
    last_day_of_month, start_of_week, DateRange, MONTH_ABBREVIATIONS, MONTH_NAMES,
};
use crate::display::{capitalize, format_short_date};
use crate::validation::{validate_date_input, validate_date_range, ValidationError};

/// Label given to ranges built from an explicit start/end pair.
pub const CUSTOM_RANGE_LABEL: &str = "Rango personalizado";

/// Message shown when a period expression cannot be interpreted.
pub const NO_MATCH_MESSAGE: &str = "No se pudo interpretar la fecha. Intente con \"hoy\", \"esta semana\", \"este mes\", o una fecha específica.";

/// The shape of a period expression, before any calendar arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodKind {
    Today,
    Yesterday,
    ThisWeek,
    LastWeek,
    ThisMonth,
    LastMonth,
    ThisYear,
    /// `(month, year)`, month is 1-based
    MonthYear(u32, i32),
    YearOnly(i32),
    /// `(day, month)` in the current year
    DayMonth(u32, u32),
    Unrecognized,
}

impl PeriodKind {
    /// Classify a period expression.
    ///
    /// Input is lower-cased and trimmed, and inner whitespace runs are
    /// collapsed. Keyword phrasings within a family are synonyms.
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let normalized = input
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();

        keyword(&normalized)
            .or_else(|| month_year(&normalized))
            .or_else(|| year_only(&normalized))
            .or_else(|| day_month(&normalized))
            .unwrap_or(Self::Unrecognized)
    }

    /// Compute the date range for this kind relative to `today`.
    ///
    /// Returns `None` for [`PeriodKind::Unrecognized`] and for day/month
    /// pairs that do not exist in the current year (e.g. 31/02).
    #[must_use]
    pub fn resolve(self, today: NaiveDate) -> Option<DateRange> {
        let range = match self {
            Self::Today => DateRange::single_day(today, "Hoy"),
            Self::Yesterday => DateRange::single_day(today.pred_opt()?, "Ayer"),
            Self::ThisWeek => {
                let monday = start_of_week(today);
                DateRange::new(monday, monday.checked_add_days(Days::new(6))?, "Esta semana")
            }
            Self::LastWeek => {
                let monday = start_of_week(today).checked_sub_days(Days::new(7))?;
                DateRange::new(monday, monday.checked_add_days(Days::new(6))?, "Semana pasada")
            }
            Self::ThisMonth => DateRange::month(today.year(), today.month(), "Este mes")?,
            Self::LastMonth => {
                let previous = today.with_day(1)?.checked_sub_months(Months::new(1))?;
                DateRange::new(previous, last_day_of_month(previous)?, "Mes pasado")
            }
            Self::ThisYear => DateRange::year(today.year(), "Este año")?,
            Self::MonthYear(month, year) => {
                let name = MONTH_NAMES.get(usize::try_from(month).ok()?.checked_sub(1)?)?;
                DateRange::month(year, month, format!("{} {year}", capitalize(name)))?
            }
            Self::YearOnly(year) => DateRange::year(year, format!("Año {year}"))?,
            Self::DayMonth(day, month) => {
                let date = NaiveDate::from_ymd_opt(today.year(), month, day)?;
                DateRange::single_day(date, format_short_date(date))
            }
            Self::Unrecognized => return None,
        };
        Some(range)
    }
}

/// Resolve a period expression relative to `today`.
///
/// An unrecognized expression is a normal outcome and yields `None`.
#[must_use]
pub fn resolve_period(input: &str, today: NaiveDate) -> Option<DateRange> {
    let kind = PeriodKind::parse(input);
    let range = kind.resolve(today);
    match &range {
        Some(r) => debug!(
            input,
            ?kind,
            start = %r.start_date,
            end = %r.end_date,
            "Resolved period expression"
        ),
        None => debug!(input, ?kind, "Period expression not recognized"),
    }
    range
}

/// Build a range from an explicit start/end pair after validating it.
pub fn explicit_range(
    start: &str,
    end: &str,
    today: NaiveDate,
    limits: &SearchConfig,
) -> Result<DateRange, ValidationError> {
    let (start, end) = validate_date_range(start, end, today, limits)?;
    Ok(DateRange::new(start, end, CUSTOM_RANGE_LABEL))
}

/// Build a single-day range from one hand-typed date.
pub fn explicit_day(input: &str, today: NaiveDate) -> Result<DateRange, ValidationError> {
    let day = validate_date_input(input, today)?;
    Ok(DateRange::single_day(day, format_short_date(day)))
}

/// Preset periods offered as one-click shortcuts, as `(label, expression)`.
#[must_use]
pub const fn quick_periods() -> &'static [(&'static str, &'static str)] {
    &[
        ("Hoy", "hoy"),
        ("Ayer", "ayer"),
        ("Esta semana", "esta semana"),
        ("Semana pasada", "ultima semana"),
        ("Este mes", "este mes"),
        ("Mes pasado", "ultimo mes"),
    ]
}

fn keyword(input: &str) -> Option<PeriodKind> {
    let kind = match input {
        "hoy" => PeriodKind::Today,
        "ayer" => PeriodKind::Yesterday,
        "esta semana" | "semana actual" | "semana" | "la semana" => PeriodKind::ThisWeek,
        "ultima semana" | "última semana" | "semana pasada" => PeriodKind::LastWeek,
        "este mes" | "mes actual" | "el mes" | "mes" => PeriodKind::ThisMonth,
        "ultimo mes" | "último mes" | "mes pasado" => PeriodKind::LastMonth,
        "este año" | "este ano" | "año actual" | "ano actual" | "el año" | "el ano" | "año"
        | "ano" => PeriodKind::ThisYear,
        _ => return None,
    };
    Some(kind)
}

/// `<month-name> <yyyy>`, the space being optional.
fn month_year(input: &str) -> Option<PeriodKind> {
    let split = input.find(|c: char| c.is_ascii_digit())?;
    let (name, year) = input.split_at(split);
    let name = name.trim_end();

    if name.is_empty() || !name.chars().all(char::is_alphabetic) {
        return None;
    }
    let year = four_digit_year(year)?;
    Some(PeriodKind::MonthYear(month_number(name)?, year))
}

fn year_only(input: &str) -> Option<PeriodKind> {
    four_digit_year(input).map(PeriodKind::YearOnly)
}

/// `D/M` or `D-M` with one or two digits each.
fn day_month(input: &str) -> Option<PeriodKind> {
    let (day, month) = input.split_once(['/', '-'])?;
    Some(PeriodKind::DayMonth(short_number(day)?, short_number(month)?))
}

fn four_digit_year(s: &str) -> Option<i32> {
    if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        s.parse().ok()
    } else {
        None
    }
}

fn short_number(s: &str) -> Option<u32> {
    if (1..=2).contains(&s.len()) && s.bytes().all(|b| b.is_ascii_digit()) {
        s.parse().ok()
    } else {
        None
    }
}

/// 1-based month number for a Spanish month name or abbreviation.
fn month_number(name: &str) -> Option<u32> {
    let index = MONTH_NAMES
        .iter()
        .position(|m| *m == name)
        .or_else(|| MONTH_ABBREVIATIONS.iter().position(|m| *m == name))
        .or_else(|| match name {
            "setiembre" | "sept" => Some(8),
            _ => None,
        })?;
    u32::try_from(index + 1).ok()
}
