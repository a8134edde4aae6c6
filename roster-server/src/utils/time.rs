//! Date parameter parsing

use chrono::NaiveDate;

use super::{AppError, AppResult};

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// Parse an optional date parameter, defaulting to today (UTC)
pub fn parse_date_or_today(date: Option<&str>) -> AppResult<NaiveDate> {
    match date {
        Some(raw) if !raw.trim().is_empty() => parse_date(raw),
        _ => Ok(shared::util::today()),
    }
}
