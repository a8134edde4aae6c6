//! Week boundary calculation
//!
//! A roster week is seven consecutive days starting on a configured weekday.
//! Every week computation in the server goes through [`WeekStart::bounds`].

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// First day of the roster week
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

impl WeekStart {
    pub const fn weekday(self) -> Weekday {
        match self {
            WeekStart::Monday => Weekday::Mon,
            WeekStart::Sunday => Weekday::Sun,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            WeekStart::Monday => "monday",
            WeekStart::Sunday => "sunday",
        }
    }

    /// `(start, end)` of the week containing `date`; `end = start + 6 days`
    pub fn bounds(self, date: NaiveDate) -> (NaiveDate, NaiveDate) {
        week_bounds(date, self.weekday())
    }

    pub fn contains(self, week_start: NaiveDate, date: NaiveDate) -> bool {
        self.bounds(date).0 == week_start
    }
}

impl fmt::Display for WeekStart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeekStart {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monday" | "mon" => Ok(WeekStart::Monday),
            "sunday" | "sun" => Ok(WeekStart::Sunday),
            other => Err(format!("unsupported week start '{other}', expected monday or sunday")),
        }
    }
}

/// Most recent `first_day` on or before `date`, and six days after it
pub fn week_bounds(date: NaiveDate, first_day: Weekday) -> (NaiveDate, NaiveDate) {
    let days_back = (date.weekday().num_days_from_monday() + 7
        - first_day.num_days_from_monday())
        % 7;
    let start = date - Duration::days(days_back as i64);
    (start, start + Duration::days(6))
}
