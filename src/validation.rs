//! Input pre-screening for date searches.
//!
//! Free-form period expressions and explicit date pairs are checked here
//! before they reach the period resolver. Every failure carries the
//! user-facing message through its `Display` impl.

use chrono::{Months, NaiveDate};
use thiserror::Error;

use crate::config::SearchConfig;

/// Maximum length of a single date typed by hand.
const MAX_DATE_INPUT_LEN: usize = 20;

/// Characters stripped by [`sanitize_input`].
const STRIPPED_CHARS: [char; 5] = ['<', '>', '"', '\'', '&'];

/// Accented letters accepted in period expressions.
const ACCENTED_LETTERS: &str = "áéíóúüñÁÉÍÓÚÜÑ";

/// A rejected search input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Ingrese una fecha o período de tiempo")]
    EmptyQuery,

    #[error("El texto ingresado es demasiado largo (máximo {max} caracteres)")]
    QueryTooLong { max: usize },

    #[error("El texto contiene caracteres no válidos")]
    InvalidCharacters,

    #[error("Debe seleccionar ambas fechas")]
    MissingDate,

    #[error("Formato de fecha no válido")]
    UnparseableDate,

    #[error("La fecha de inicio no puede ser posterior a la fecha de fin")]
    InvertedRange,

    #[error("No puede seleccionar fechas futuras")]
    FutureDate,

    #[error("El rango de fechas no puede exceder {max_days} días")]
    RangeTooLong { max_days: i64 },

    #[error("La fecha de inicio es demasiado antigua (máximo {max_years} años)")]
    StartTooOld { max_years: u32 },

    #[error("Ingrese una fecha")]
    EmptyDate,

    #[error("La fecha ingresada es demasiado larga")]
    DateTooLong,
}

/// Check a free-form period expression.
///
/// Rejects empty input, input longer than `limits.max_query_len`
/// characters, and any character outside letters (including Spanish
/// accented forms), digits, whitespace, `/`, `-`, `,` and `.`.
pub fn validate_period_input(input: &str, limits: &SearchConfig) -> Result<(), ValidationError> {
    if input.trim().is_empty() {
        return Err(ValidationError::EmptyQuery);
    }

    if input.chars().count() > limits.max_query_len {
        return Err(ValidationError::QueryTooLong {
            max: limits.max_query_len,
        });
    }

    if !input.chars().all(is_allowed_query_char) {
        return Err(ValidationError::InvalidCharacters);
    }

    Ok(())
}

fn is_allowed_query_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || c.is_whitespace()
        || matches!(c, '/' | '-' | ',' | '.')
        || ACCENTED_LETTERS.contains(c)
}

/// Check an explicit `(start, end)` pair and return the parsed dates.
///
/// Checks run in a fixed order and the first failure wins: missing date,
/// unparseable date, inverted range, future date, range too long, start
/// too old.
pub fn validate_date_range(
    start: &str,
    end: &str,
    today: NaiveDate,
    limits: &SearchConfig,
) -> Result<(NaiveDate, NaiveDate), ValidationError> {
    let (start, end) = (start.trim(), end.trim());
    if start.is_empty() || end.is_empty() {
        return Err(ValidationError::MissingDate);
    }

    let start = parse_input_date(start).ok_or(ValidationError::UnparseableDate)?;
    let end = parse_input_date(end).ok_or(ValidationError::UnparseableDate)?;

    if start > end {
        return Err(ValidationError::InvertedRange);
    }

    if start > today || end > today {
        return Err(ValidationError::FutureDate);
    }

    if (end - start).num_days() > limits.max_range_days {
        return Err(ValidationError::RangeTooLong {
            max_days: limits.max_range_days,
        });
    }

    let oldest = today
        .checked_sub_months(Months::new(limits.max_lookback_years.saturating_mul(12)))
        .unwrap_or(NaiveDate::MIN);
    if start <= oldest {
        return Err(ValidationError::StartTooOld {
            max_years: limits.max_lookback_years,
        });
    }

    Ok((start, end))
}

/// Check a single hand-typed date and return it parsed.
pub fn validate_date_input(input: &str, today: NaiveDate) -> Result<NaiveDate, ValidationError> {
    if input.trim().is_empty() {
        return Err(ValidationError::EmptyDate);
    }

    if input.chars().count() > MAX_DATE_INPUT_LEN {
        return Err(ValidationError::DateTooLong);
    }

    let date = parse_input_date(input.trim()).ok_or(ValidationError::UnparseableDate)?;
    if date > today {
        return Err(ValidationError::FutureDate);
    }

    Ok(date)
}

/// Clean up free-form input without rejecting it.
///
/// Trims, collapses whitespace runs to a single space, strips markup
/// characters and truncates to `max_len` characters.
#[must_use]
pub fn sanitize_input(input: &str, max_len: usize) -> String {
    input
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .filter(|c| !STRIPPED_CHARS.contains(c))
        .take(max_len)
        .collect()
}

/// Parse a date typed as `YYYY-MM-DD` or `DD/MM/YYYY`.
#[must_use]
pub fn parse_input_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(input, "%d/%m/%Y"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn limits() -> SearchConfig {
        SearchConfig::default()
    }

    #[test]
    fn test_period_input_accepts_spanish_text() {
        assert!(validate_period_input("este año", &limits()).is_ok());
        assert!(validate_period_input("ÚLTIMA SEMANA", &limits()).is_ok());
        assert!(validate_period_input("15/01", &limits()).is_ok());
        assert!(validate_period_input("ene. 2026, mañana", &limits()).is_ok());
    }

    #[test]
    fn test_period_input_rejections() {
        assert_eq!(
            validate_period_input("   ", &limits()),
            Err(ValidationError::EmptyQuery)
        );
        assert_eq!(
            validate_period_input(&"a".repeat(51), &limits()),
            Err(ValidationError::QueryTooLong { max: 50 })
        );
        assert!(validate_period_input(&"a".repeat(50), &limits()).is_ok());
        assert_eq!(
            validate_period_input("hoy<script>", &limits()),
            Err(ValidationError::InvalidCharacters)
        );
        assert_eq!(
            validate_period_input("hoy!", &limits()),
            Err(ValidationError::InvalidCharacters)
        );
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        // 50 two-byte characters
        let input = "ñ".repeat(50);
        assert!(validate_period_input(&input, &limits()).is_ok());
    }

    #[test]
    fn test_date_range_accepts_valid_pair() {
        let (start, end) =
            validate_date_range("2026-01-01", "2026-01-31", today(), &limits()).unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2026, 1, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2026, 1, 31).unwrap());

        assert!(validate_date_range("01/09/2026", "16/10/2026", today(), &limits()).is_ok());
    }

    #[test]
    fn test_date_range_six_failures() {
        let l = limits();
        assert_eq!(
            validate_date_range("", "2026-01-31", today(), &l),
            Err(ValidationError::MissingDate)
        );
        assert_eq!(
            validate_date_range("2026-13-01", "2026-01-31", today(), &l),
            Err(ValidationError::UnparseableDate)
        );
        assert_eq!(
            validate_date_range("2026-02-01", "2026-01-31", today(), &l),
            Err(ValidationError::InvertedRange)
        );
        assert_eq!(
            validate_date_range("2026-10-01", "2026-10-17", today(), &l),
            Err(ValidationError::FutureDate)
        );
        assert_eq!(
            validate_date_range("2025-01-01", "2026-01-02", today(), &l),
            Err(ValidationError::RangeTooLong { max_days: 365 })
        );

        let wide = SearchConfig {
            max_range_days: 10_000,
            ..SearchConfig::default()
        };
        assert_eq!(
            validate_date_range("2020-01-01", "2020-06-01", today(), &wide),
            Err(ValidationError::StartTooOld { max_years: 5 })
        );
    }

    #[test]
    fn test_date_range_limit_edges() {
        // exactly 365 days apart is still allowed
        assert!(validate_date_range("2025-01-01", "2026-01-01", today(), &limits()).is_ok());
        // today itself is not in the future
        assert!(validate_date_range("2026-10-16", "2026-10-16", today(), &limits()).is_ok());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            ValidationError::RangeTooLong { max_days: 365 }.to_string(),
            "El rango de fechas no puede exceder 365 días"
        );
        assert_eq!(
            ValidationError::FutureDate.to_string(),
            "No puede seleccionar fechas futuras"
        );
    }

    #[test]
    fn test_date_input() {
        assert_eq!(
            validate_date_input("", today()),
            Err(ValidationError::EmptyDate)
        );
        assert_eq!(
            validate_date_input("2026-01-01 and some more", today()),
            Err(ValidationError::DateTooLong)
        );
        assert_eq!(
            validate_date_input("mañana", today()),
            Err(ValidationError::UnparseableDate)
        );
        assert_eq!(
            validate_date_input("2027-01-01", today()),
            Err(ValidationError::FutureDate)
        );
        assert_eq!(
            validate_date_input("09/01/2026", today()),
            Ok(NaiveDate::from_ymd_opt(2026, 1, 9).unwrap())
        );
    }

    #[test]
    fn test_sanitize_input() {
        assert_eq!(sanitize_input("  esta   semana  ", 50), "esta semana");
        assert_eq!(sanitize_input("<b>hoy</b>", 50), "bhoy/b");
        assert_eq!(sanitize_input("it's \"mes\" & más", 50), "its mes  más");
        assert_eq!(sanitize_input(&"x".repeat(80), 50).len(), 50);
    }
}
