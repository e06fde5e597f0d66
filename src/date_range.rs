//! Resolved date intervals used to filter the sales history.
//!
//! A [`DateRange`] is produced by the period resolver (see
//! [`crate::period`]) and is never mutated afterwards; a new search
//! replaces it. Both endpoints are inclusive at day granularity.

use std::fmt;

use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

/// Spanish month names, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

/// Three-letter Spanish month abbreviations accepted in search input,
/// January first.
pub const MONTH_ABBREVIATIONS: [&str; 12] = [
    "ene", "feb", "mar", "abr", "may", "jun", "jul", "ago", "sep", "oct", "nov", "dic",
];

/// A resolved, inclusive date interval with a display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    /// First day of the interval (inclusive)
    pub start_date: NaiveDate,
    /// Last day of the interval (inclusive)
    pub end_date: NaiveDate,
    /// Human-readable name for this period (e.g. "Esta semana", "Enero 2026")
    pub label: String,
}

/// The same interval as a [`DateRange`], expressed as start-of-day and
/// end-of-day instants for containment tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRangeResult {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub label: String,
}

impl DateRange {
    /// Create a new date range.
    ///
    /// Endpoints given in the wrong order are swapped so that
    /// `start_date <= end_date` always holds.
    #[must_use]
    pub(crate) fn new(start: NaiveDate, end: NaiveDate, label: impl Into<String>) -> Self {
        let (start_date, end_date) = if start <= end { (start, end) } else { (end, start) };
        Self {
            start_date,
            end_date,
            label: label.into(),
        }
    }

    /// Create a range covering a single day.
    #[must_use]
    pub(crate) fn single_day(day: NaiveDate, label: impl Into<String>) -> Self {
        Self::new(day, day, label)
    }

    /// Create a range covering a full calendar month.
    ///
    /// Returns `None` for an invalid month number.
    #[must_use]
    pub(crate) fn month(year: i32, month: u32, label: impl Into<String>) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)?;
        Some(Self::new(start, last_day_of_month(start)?, label))
    }

    /// Create a range covering a full calendar year.
    #[must_use]
    pub(crate) fn year(year: i32, label: impl Into<String>) -> Option<Self> {
        let start = NaiveDate::from_ymd_opt(year, 1, 1)?;
        let end = NaiveDate::from_ymd_opt(year, 12, 31)?;
        Some(Self::new(start, end, label))
    }

    /// Start date in canonical `YYYY-MM-DD` form.
    #[must_use]
    pub fn start_str(&self) -> String {
        self.start_date.format("%Y-%m-%d").to_string()
    }

    /// End date in canonical `YYYY-MM-DD` form.
    #[must_use]
    pub fn end_str(&self) -> String {
        self.end_date.format("%Y-%m-%d").to_string()
    }

    /// Start-of-day / end-of-day boundaries of this range.
    #[must_use]
    pub fn bounds(&self) -> DateRangeResult {
        DateRangeResult {
            start: self.start_date.and_time(NaiveTime::MIN),
            end: end_of_day(self.end_date),
            label: self.label.clone(),
        }
    }

    /// Number of calendar days covered, both endpoints included.
    #[must_use]
    pub fn num_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

impl DateRangeResult {
    /// Check whether an instant falls inside the range (both ends inclusive).
    #[must_use]
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        (self.start..=self.end).contains(&instant)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}

/// Last calendar day of the month containing `day`.
#[must_use]
pub fn last_day_of_month(day: NaiveDate) -> Option<NaiveDate> {
    let first = day.with_day(1)?;
    first.checked_add_months(chrono::Months::new(1))?.pred_opt()
}

/// Monday of the week containing `day`.
#[must_use]
pub fn start_of_week(day: NaiveDate) -> NaiveDate {
    let offset = u64::from(day.weekday().num_days_from_monday());
    day.checked_sub_days(Days::new(offset)).unwrap_or(day)
}

fn end_of_day(day: NaiveDate) -> NaiveDateTime {
    // 23:59:59.999 always exists
    day.and_hms_milli_opt(23, 59, 59, 999)
        .unwrap_or_else(|| day.and_time(NaiveTime::MIN))
}
