//! Day-level sales history: date normalization, range filtering and rollups.
//!
//! The data API hands out one [`DailyHistoryItem`] per calendar day. Dates
//! in that feed are not consistent (`DD/MM/YYYY` next to `YYYY-MM-DD`), so
//! every comparison goes through [`normalize_date`] first.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::date_range::DateRange;
use crate::error::{Error, Result};
use crate::sale::Haircut;
use crate::types::Amount;

/// One calendar day's rollup as served by the data API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyHistoryItem {
    /// Day in any supported textual format
    pub date: String,
    /// Revenue for the day
    pub total: Amount,
    /// Number of services rendered
    pub count: u32,
    /// Client names in the order they were served, duplicates included
    #[serde(default)]
    pub clients: Vec<String>,
}

/// Rollup statistics over a collection of days.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryStats {
    pub total_days: usize,
    pub total_amount: Amount,
    pub average_daily: f64,
    pub max_amount: Amount,
    /// Date of the best day, as it appears in the source record
    pub max_date: Option<String>,
    pub total_count: u64,
}

/// Rewrite a date string into canonical `YYYY-MM-DD` form.
///
/// Strings that already start with a four-digit year are returned as-is.
/// Otherwise the string is split on `/`, `-` or `.` and read as day, month,
/// year; day and month are zero-padded and a two-digit year is placed in
/// the 2000s. Anything with fewer than three parts comes back unchanged.
/// No calendar validation is done.
#[must_use]
pub fn normalize_date(date: &str) -> Cow<'_, str> {
    if date
        .split_once('-')
        .is_some_and(|(head, _)| head.len() == 4)
    {
        return Cow::Borrowed(date);
    }

    let parts: Vec<&str> = date.split(['/', '-', '.']).collect();
    let [day, month, year, ..] = parts.as_slice() else {
        return Cow::Borrowed(date);
    };

    let century = if year.len() == 2 { "20" } else { "" };
    Cow::Owned(format!("{century}{year}-{month:0>2}-{day:0>2}"))
}

/// Time-of-day shapes accepted after a canonical date.
const INSTANT_FORMATS: [&str; 3] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
];

/// Parse a history date into an instant. Date-only values land on
/// midnight; an RFC 3339 offset is dropped in favour of the local reading.
pub fn parse_instant(date: &str) -> Result<NaiveDateTime> {
    let canonical = normalize_date(date);
    if let Ok(day) = NaiveDate::parse_from_str(&canonical, "%Y-%m-%d") {
        return Ok(day.and_time(NaiveTime::MIN));
    }

    INSTANT_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(&canonical, format).ok())
        .or_else(|| {
            DateTime::parse_from_rfc3339(&canonical)
                .ok()
                .map(|instant| instant.naive_local())
        })
        .ok_or_else(|| Error::invalid_date(format!("'{date}' is not a recognized date")))
}

/// Parse a history date in any supported format into a calendar day.
pub fn parse_day(date: &str) -> Result<NaiveDate> {
    parse_instant(date).map(|instant| instant.date())
}

/// Membership test for `range` over raw history date strings.
///
/// Readable dates are checked against the range's start-of-day and
/// end-of-day instants. Anything else falls back to comparing its
/// canonical text with the range endpoints.
pub(crate) fn range_filter(range: &DateRange) -> impl Fn(&str) -> bool {
    let bounds = range.bounds();
    let (start, end) = (range.start_str(), range.end_str());

    move |date: &str| match parse_instant(date) {
        Ok(instant) => bounds.contains(instant),
        Err(_) => (start.as_str()..=end.as_str()).contains(&&*normalize_date(date)),
    }
}

/// Keep the items whose date lies inside `range`, preserving order.
#[must_use]
pub fn filter_by_range(items: &[DailyHistoryItem], range: &DateRange) -> Vec<DailyHistoryItem> {
    let in_range = range_filter(range);

    let filtered: Vec<DailyHistoryItem> = items
        .iter()
        .filter(|item| in_range(&item.date))
        .cloned()
        .collect();

    debug!(
        range = %range,
        kept = filtered.len(),
        total = items.len(),
        "Filtered history"
    );
    filtered
}

/// Compute rollup statistics for a collection of days.
///
/// The best day is the first one holding the largest total.
#[must_use]
pub fn history_stats(items: &[DailyHistoryItem]) -> HistoryStats {
    let total_amount: Amount = items.iter().map(|item| item.total).sum();
    let total_count = items.iter().map(|item| u64::from(item.count)).sum();

    let best = items.iter().fold(None::<&DailyHistoryItem>, |best, item| match best {
        Some(b) if b.total >= item.total => Some(b),
        _ => Some(item),
    });

    HistoryStats {
        total_days: items.len(),
        total_amount,
        average_daily: total_amount / items.len(),
        max_amount: best.map(|item| item.total).unwrap_or_default(),
        max_date: best.map(|item| item.date.clone()),
        total_count,
    }
}

/// Days worth listing: drops days with no revenue and orders the rest
/// newest first.
#[must_use]
pub fn visible_days(items: &[DailyHistoryItem]) -> Vec<&DailyHistoryItem> {
    let mut days: Vec<&DailyHistoryItem> =
        items.iter().filter(|item| !item.total.is_zero()).collect();
    days.sort_by(|a, b| normalize_date(&b.date).cmp(&normalize_date(&a.date)));
    days
}

/// Roll individual sales up into one history item per day, oldest first.
///
/// Used when the data export carries raw sales but no daily history.
#[must_use]
pub fn rollup_sales(sales: &[Haircut]) -> Vec<DailyHistoryItem> {
    let mut days: Vec<DailyHistoryItem> = Vec::new();

    for sale in sales {
        let date = normalize_date(&sale.date).into_owned();
        let index = match days.iter().position(|day| day.date == date) {
            Some(index) => index,
            None => {
                days.push(DailyHistoryItem {
                    date,
                    total: Amount::default(),
                    count: 0,
                    clients: Vec::new(),
                });
                days.len() - 1
            }
        };

        let day = &mut days[index];
        day.total += sale.price;
        day.count += sale.count;
        day.clients.push(sale.client_name.clone());
    }

    days.sort_by(|a, b| a.date.cmp(&b.date));
    days
}
