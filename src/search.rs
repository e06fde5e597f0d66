//! Date search over the day-level history.
//!
//! [`DateSearch`] wires input validation, the period resolver and the
//! history aggregator together and keeps the last known state: the active
//! range, the filtered days and the message to show when a search fails.
//! Failures never escape; they leave the previous results visible.

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::config::SearchConfig;
use crate::date_range::DateRange;
use crate::history::{filter_by_range, history_stats, DailyHistoryItem, HistoryStats};
use crate::period::{explicit_day, explicit_range, resolve_period, NO_MATCH_MESSAGE};
use crate::validation::validate_period_input;

/// Search state over a day-level history.
#[derive(Debug, Clone, Default)]
pub struct DateSearch {
    history: Vec<DailyHistoryItem>,
    filtered: Vec<DailyHistoryItem>,
    query: String,
    range: Option<DateRange>,
    error: Option<String>,
    limits: SearchConfig,
}

impl DateSearch {
    /// Start with the full history visible and no active range.
    #[must_use]
    pub fn new(history: Vec<DailyHistoryItem>, limits: SearchConfig) -> Self {
        Self {
            filtered: history.clone(),
            history,
            limits,
            ..Self::default()
        }
    }

    /// Search with a free-form period expression.
    ///
    /// On a validation failure or an unrecognized expression the error
    /// message is recorded, the range is cleared and the full history is
    /// shown again.
    pub fn search(&mut self, query: &str, today: NaiveDate) {
        self.query = query.to_string();
        self.error = None;

        if let Err(e) = validate_period_input(query, &self.limits) {
            warn!(query, error = %e, "Rejected period expression");
            self.fail(e.to_string());
            return;
        }

        let Some(range) = resolve_period(query, today) else {
            self.fail(NO_MATCH_MESSAGE.to_string());
            return;
        };

        self.apply(range);
    }

    /// Search with an explicit start/end pair.
    ///
    /// On a validation failure the message is recorded and the range is
    /// cleared; the previously filtered days stay visible.
    pub fn search_custom(&mut self, start: &str, end: &str, today: NaiveDate) {
        self.query.clear();
        self.error = None;

        match explicit_range(start, end, today, &self.limits) {
            Ok(range) => self.apply(range),
            Err(e) => {
                warn!(start, end, error = %e, "Rejected explicit date range");
                self.error = Some(e.to_string());
                self.range = None;
            }
        }
    }

    /// Search a single hand-typed date. Failures behave as in
    /// [`DateSearch::search_custom`].
    pub fn search_day(&mut self, date: &str, today: NaiveDate) {
        self.query.clear();
        self.error = None;

        match explicit_day(date, today) {
            Ok(range) => self.apply(range),
            Err(e) => {
                warn!(date, error = %e, "Rejected date");
                self.error = Some(e.to_string());
                self.range = None;
            }
        }
    }

    /// Drop the active search and show the full history.
    pub fn clear(&mut self) {
        self.query.clear();
        self.range = None;
        self.error = None;
        self.filtered = self.history.clone();
    }

    /// Replace the history, e.g. after a refresh, re-applying the active
    /// range if there is one.
    pub fn update_history(&mut self, history: Vec<DailyHistoryItem>) {
        self.filtered = match &self.range {
            Some(range) => filter_by_range(&history, range),
            None => history.clone(),
        };
        self.history = history;
        debug!(days = self.history.len(), "History replaced");
    }

    /// Last query typed, empty after a custom range or a clear.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Active range, if the last search succeeded.
    #[must_use]
    pub const fn range(&self) -> Option<&DateRange> {
        self.range.as_ref()
    }

    /// Days currently shown.
    #[must_use]
    pub fn filtered(&self) -> &[DailyHistoryItem] {
        &self.filtered
    }

    /// Full history this search works over.
    #[must_use]
    pub fn history(&self) -> &[DailyHistoryItem] {
        &self.history
    }

    /// Rollups over the days currently shown.
    #[must_use]
    pub fn stats(&self) -> HistoryStats {
        history_stats(&self.filtered)
    }

    /// Message from the last failed search.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    fn apply(&mut self, range: DateRange) {
        self.filtered = filter_by_range(&self.history, &range);
        self.range = Some(range);
    }

    fn fail(&mut self, message: String) {
        self.error = Some(message);
        self.range = None;
        self.filtered = self.history.clone();
    }
}
