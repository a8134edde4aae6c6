//! Day/slot view assembly
//!
//! Slots only carry a venue id; display attributes are joined here from a
//! per-request venue cache.

use std::collections::HashMap;

use chrono::NaiveDate;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{DayRecord, DayView, Slot, SlotView, Venue};
use sqlx::SqliteConnection;

use crate::db::repository::{slot, venue};

/// Venues resolved during one operation, keyed by id
#[derive(Debug, Default)]
pub struct VenueCache {
    venues: HashMap<i64, Venue>,
}

impl VenueCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a venue, hitting storage at most once per id
    pub async fn resolve(&mut self, conn: &mut SqliteConnection, id: i64) -> AppResult<&Venue> {
        if !self.venues.contains_key(&id) {
            let found = venue::find_by_id(&mut *conn, id)
                .await?
                .ok_or_else(|| AppError::not_found_id(ErrorCode::VenueNotFound, id))?;
            self.venues.insert(id, found);
        }
        self.venues
            .get(&id)
            .ok_or_else(|| AppError::not_found_id(ErrorCode::VenueNotFound, id))
    }

    fn slot_view(&self, slot: &Slot) -> SlotView {
        let venue = self.venues.get(&slot.venue_id);
        SlotView {
            id: slot.id,
            venue_id: slot.venue_id,
            venue_code: venue.and_then(|v| v.code.clone()),
            time: slot.time,
            color: venue.and_then(|v| v.color.clone()),
            icon: venue.and_then(|v| v.icon.clone()),
        }
    }
}

/// Load a record's slots and render them with venue attributes
pub async fn load_day_view(
    conn: &mut SqliteConnection,
    record: &DayRecord,
    specialist_code: Option<String>,
    cache: &mut VenueCache,
) -> AppResult<DayView> {
    let slots = slot::find_by_day_record(&mut *conn, record.id).await?;
    for s in &slots {
        cache.resolve(&mut *conn, s.venue_id).await?;
    }
    Ok(render_day(
        record.id,
        record.specialist_id,
        specialist_code,
        record.date,
        &slots,
        cache,
    ))
}

pub fn render_day(
    record_id: i64,
    specialist_id: i64,
    specialist_code: Option<String>,
    date: NaiveDate,
    slots: &[Slot],
    cache: &VenueCache,
) -> DayView {
    DayView {
        id: Some(record_id),
        specialist_id,
        specialist_code,
        date,
        slots: slots.iter().map(|s| cache.slot_view(s)).collect(),
    }
}
