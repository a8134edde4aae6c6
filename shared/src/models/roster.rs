//! Roster Models
//!
//! Row types (`DayRecord`, `Slot`), submission payloads and the rendered
//! views returned to clients.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// One specialist's roster for one date. Never persisted without slots.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DayRecord {
    pub id: i64,
    pub specialist_id: i64,
    pub date: NaiveDate,
    pub created_at: i64,
    pub updated_at: i64,
}

/// A time-of-day assignment at a venue, owned by one day record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Slot {
    pub id: i64,
    pub day_record_id: i64,
    pub venue_id: i64,
    #[serde(with = "crate::serde_helpers::time_hm")]
    pub time: NaiveTime,
    pub created_at: i64,
    pub updated_at: i64,
}

// ==================== Submissions ====================

/// Submitted slot; `id` present means "keep and update this slot".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotInput {
    pub id: Option<i64>,
    pub venue_id: i64,
    #[serde(with = "crate::serde_helpers::time_hm")]
    pub time: NaiveTime,
}

/// Submitted day; `id` present means the day record already exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayInput {
    pub id: Option<i64>,
    pub date: NaiveDate,
    #[serde(default)]
    pub slots: Vec<SlotInput>,
}

/// A week of days for one specialist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekSubmission {
    pub specialist_id: i64,
    pub days: Vec<DayInput>,
}

/// Day-sheet entry: a day that carries its own specialist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetEntry {
    pub specialist_id: i64,
    #[serde(flatten)]
    pub day: DayInput,
}

// ==================== Views ====================

/// Slot rendered with its venue's display attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotView {
    pub id: i64,
    pub venue_id: i64,
    pub venue_code: Option<String>,
    #[serde(with = "crate::serde_helpers::time_hm")]
    pub time: NaiveTime,
    pub color: Option<String>,
    #[serde(default, with = "crate::serde_helpers::base64_opt")]
    pub icon: Option<Vec<u8>>,
}

/// Rendered day. `id` is absent for placeholder days with no record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayView {
    pub id: Option<i64>,
    pub specialist_id: i64,
    pub specialist_code: Option<String>,
    pub date: NaiveDate,
    pub slots: Vec<SlotView>,
}

impl DayView {
    /// Placeholder for a specialist with nothing rostered on `date`
    pub fn placeholder(specialist_id: i64, specialist_code: Option<String>, date: NaiveDate) -> Self {
        Self {
            id: None,
            specialist_id,
            specialist_code,
            date,
            slots: Vec::new(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.id.is_none()
    }
}

/// One specialist's week
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekView {
    pub specialist_id: i64,
    pub specialist_name: Option<String>,
    pub specialist_code: Option<String>,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    /// Persisted days ordered by date
    pub days: Vec<DayView>,
}

/// Index row: one per (specialist, week) with at least one record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekSummary {
    /// Earliest record id in the week; usable as the week's anchor
    pub id: i64,
    pub specialist_id: i64,
    pub specialist_name: String,
    pub specialist_code: String,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
}
