//! # Barber Stats
//!
//! Sales history analytics for a barbershop.
//!
//! This crate provides:
//! - Natural-language period search in Spanish ("hoy", "semana pasada",
//!   "enero 2026", "15/01") resolved to concrete date ranges
//! - Day-level history filtering and rollups (totals, averages, best day)
//! - Validation and sanitization of search input
//! - Sales reports for charts: per-day series, per-service breakdown
//! - A read-only JSON export source for the data API
//!
//! Persistence and business rules live server-side; this crate only reads
//! the collections it is given.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod date_range;
pub mod display;
pub mod error;
pub mod history;
pub mod period;
pub mod report;
pub mod sale;
pub mod search;
pub mod source;
pub mod types;
pub mod validation;

pub use config::Config;
pub use date_range::DateRange;
pub use error::{Error, Result};
pub use history::{DailyHistoryItem, HistoryStats};
pub use period::{resolve_period, PeriodKind};
pub use search::DateSearch;

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "barber-stats";
