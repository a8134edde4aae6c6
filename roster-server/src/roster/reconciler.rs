//! Roster reconciliation
//!
//! Brings stored day records in line with a submitted set of days. Slots are
//! matched by identity only: a submitted slot with an id updates that slot,
//! one without an id is created, and persisted slots the submission no longer
//! mentions are removed. A day left without slots is deleted (or never
//! written, if it was new).

use std::collections::HashSet;

use chrono::NaiveTime;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{DayInput, DayRecord, DayView, Slot, SlotInput};
use shared::serde_helpers::time_hm::to_minute;
use sqlx::SqliteConnection;

use super::render::{VenueCache, render_day};
use crate::db::repository::{day_record, slot, specialist};

/// Persistence operations for one day's slots
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SlotPlan {
    /// Persisted slot ids to delete
    pub remove: Vec<i64>,
    /// `(slot id, venue id, time)` for slots whose venue or time changed
    pub update: Vec<(i64, i64, NaiveTime)>,
    /// `(venue id, time)` for new slots
    pub create: Vec<(i64, NaiveTime)>,
}

impl SlotPlan {
    pub fn is_noop(&self) -> bool {
        self.remove.is_empty() && self.update.is_empty() && self.create.is_empty()
    }
}

/// Diff submitted slots against the persisted slots of the same record.
///
/// Fails when a submitted id is not one of `persisted`, when an id is
/// submitted twice, or when the resulting day would hold the same
/// `(venue, time)` pair more than once. Times are compared and stored at
/// minute resolution.
pub fn plan_slots(persisted: &[Slot], submitted: &[SlotInput]) -> AppResult<SlotPlan> {
    let mut plan = SlotPlan::default();
    let mut referenced = HashSet::with_capacity(submitted.len());
    let mut pairs = HashSet::with_capacity(submitted.len());

    for input in submitted {
        let time = to_minute(input.time);
        if !pairs.insert((input.venue_id, time)) {
            return Err(AppError::new(ErrorCode::DuplicateSlot)
                .with_detail("venue_id", input.venue_id)
                .with_detail("time", time.format("%H:%M").to_string()));
        }

        match input.id {
            Some(id) => {
                let current = persisted
                    .iter()
                    .find(|s| s.id == id)
                    .ok_or_else(|| AppError::not_found_id(ErrorCode::SlotNotFound, id))?;
                if !referenced.insert(id) {
                    return Err(AppError::validation(format!("Slot {id} submitted twice"))
                        .with_detail("id", id));
                }
                if current.venue_id != input.venue_id || current.time != time {
                    plan.update.push((id, input.venue_id, time));
                }
            }
            None => plan.create.push((input.venue_id, time)),
        }
    }

    plan.remove = persisted
        .iter()
        .filter(|s| !referenced.contains(&s.id))
        .map(|s| s.id)
        .collect();

    Ok(plan)
}

/// Reconcile each `(specialist, day)` entry in order on `conn`.
///
/// The caller owns the transaction: any error leaves it to be rolled back.
/// Returns the rendered view of every day that ends up persisted.
pub async fn reconcile_days(
    conn: &mut SqliteConnection,
    entries: &[(i64, DayInput)],
) -> AppResult<Vec<DayView>> {
    if entries.is_empty() {
        return Err(AppError::new(ErrorCode::EmptySubmission));
    }

    let mut seen = HashSet::with_capacity(entries.len());
    for (specialist_id, day) in entries {
        if !seen.insert((*specialist_id, day.date)) {
            return Err(AppError::validation(format!(
                "Date {} submitted twice for specialist {}",
                day.date, specialist_id
            ))
            .with_detail("date", day.date.to_string()));
        }
    }

    let mut cache = VenueCache::new();
    let mut results = Vec::with_capacity(entries.len());

    for (specialist_id, day) in entries {
        let specialist = specialist::find_by_id(&mut *conn, *specialist_id)
            .await?
            .ok_or_else(|| AppError::not_found_id(ErrorCode::SpecialistNotFound, *specialist_id))?;

        let existing = resolve_record(conn, *specialist_id, day).await?;
        let persisted = match &existing {
            Some(record) => slot::find_by_day_record(&mut *conn, record.id).await?,
            None => Vec::new(),
        };

        let plan = plan_slots(&persisted, &day.slots)?;
        for input in &day.slots {
            cache.resolve(conn, input.venue_id).await?;
        }

        if day.slots.is_empty() {
            if let Some(record) = existing {
                day_record::delete(&mut *conn, record.id).await?;
                tracing::debug!(record_id = record.id, date = %day.date, "Removed emptied day record");
            }
            continue;
        }

        let record_id = match &existing {
            Some(record) => record.id,
            None => day_record::insert(&mut *conn, *specialist_id, day.date).await?.id,
        };

        for id in &plan.remove {
            slot::delete(&mut *conn, *id).await?;
        }
        for (id, venue_id, time) in &plan.update {
            slot::update(&mut *conn, *id, *venue_id, *time).await?;
        }
        for (venue_id, time) in &plan.create {
            slot::insert(&mut *conn, record_id, *venue_id, *time).await?;
        }
        if existing.is_some() && !plan.is_noop() {
            day_record::touch(&mut *conn, record_id).await?;
        }

        tracing::debug!(
            record_id,
            specialist_id,
            date = %day.date,
            removed = plan.remove.len(),
            updated = plan.update.len(),
            created = plan.create.len(),
            "Reconciled day"
        );

        let slots = slot::find_by_day_record(&mut *conn, record_id).await?;
        results.push(render_day(
            record_id,
            *specialist_id,
            Some(specialist.code.clone()),
            day.date,
            &slots,
            &cache,
        ));
    }

    Ok(results)
}

/// Load the record a submitted day refers to, or check that a new one may be created
async fn resolve_record(
    conn: &mut SqliteConnection,
    specialist_id: i64,
    day: &DayInput,
) -> AppResult<Option<DayRecord>> {
    match day.id {
        Some(id) => {
            let record = day_record::find_by_id(&mut *conn, id)
                .await?
                .ok_or_else(|| AppError::not_found_id(ErrorCode::DayRecordNotFound, id))?;
            if record.specialist_id != specialist_id || record.date != day.date {
                return Err(AppError::validation(format!(
                    "Day record {id} belongs to specialist {} on {}",
                    record.specialist_id, record.date
                ))
                .with_detail("id", id));
            }
            Ok(Some(record))
        }
        None => {
            let clash =
                day_record::find_by_specialist_and_date(&mut *conn, specialist_id, day.date).await?;
            if let Some(record) = clash {
                return Err(AppError::new(ErrorCode::DayRecordExists)
                    .with_detail("id", record.id)
                    .with_detail("date", day.date.to_string()));
            }
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn stored(id: i64, venue_id: i64, time: NaiveTime) -> Slot {
        Slot {
            id,
            day_record_id: 1,
            venue_id,
            time,
            created_at: 0,
            updated_at: 0,
        }
    }

    fn input(id: Option<i64>, venue_id: i64, time: NaiveTime) -> SlotInput {
        SlotInput { id, venue_id, time }
    }

    #[test]
    fn new_day_creates_everything() {
        let plan = plan_slots(&[], &[input(None, 1, hm(7, 0)), input(None, 2, hm(19, 0))]).unwrap();
        assert_eq!(plan.create, vec![(1, hm(7, 0)), (2, hm(19, 0))]);
        assert!(plan.update.is_empty());
        assert!(plan.remove.is_empty());
    }

    #[test]
    fn update_create_and_remove() {
        let persisted = [stored(10, 1, hm(7, 0)), stored(11, 2, hm(13, 0))];
        let submitted = [input(Some(10), 3, hm(7, 0)), input(None, 2, hm(19, 0))];

        let plan = plan_slots(&persisted, &submitted).unwrap();
        assert_eq!(plan.update, vec![(10, 3, hm(7, 0))]);
        assert_eq!(plan.create, vec![(2, hm(19, 0))]);
        assert_eq!(plan.remove, vec![11]);
    }

    #[test]
    fn unchanged_resubmission_is_noop() {
        let persisted = [stored(10, 1, hm(7, 0)), stored(11, 2, hm(13, 0))];
        let submitted = [input(Some(11), 2, hm(13, 0)), input(Some(10), 1, hm(7, 0))];
        assert!(plan_slots(&persisted, &submitted).unwrap().is_noop());
    }

    #[test]
    fn empty_submission_removes_all() {
        let persisted = [stored(10, 1, hm(7, 0)), stored(11, 2, hm(13, 0))];
        let plan = plan_slots(&persisted, &[]).unwrap();
        assert_eq!(plan.remove, vec![10, 11]);
    }

    #[test]
    fn unknown_slot_id_is_rejected() {
        let persisted = [stored(10, 1, hm(7, 0))];
        let err = plan_slots(&persisted, &[input(Some(99), 1, hm(7, 0))]).unwrap_err();
        assert_eq!(err.code, ErrorCode::SlotNotFound);
    }

    #[test]
    fn duplicate_pair_is_rejected() {
        let err = plan_slots(&[], &[input(None, 1, hm(7, 0)), input(None, 1, hm(7, 0))]).unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateSlot);
    }

    #[test]
    fn moving_a_slot_onto_a_created_pair_is_rejected() {
        let persisted = [stored(10, 1, hm(7, 0))];
        let submitted = [input(Some(10), 2, hm(8, 0)), input(None, 2, hm(8, 0))];
        let err = plan_slots(&persisted, &submitted).unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateSlot);
    }

    #[test]
    fn same_id_twice_is_rejected() {
        let persisted = [stored(10, 1, hm(7, 0))];
        let submitted = [input(Some(10), 1, hm(7, 0)), input(Some(10), 1, hm(8, 0))];
        let err = plan_slots(&persisted, &submitted).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[test]
    fn swapping_times_between_slots_is_allowed() {
        let persisted = [stored(10, 1, hm(7, 0)), stored(11, 1, hm(19, 0))];
        let submitted = [input(Some(10), 1, hm(19, 0)), input(Some(11), 1, hm(7, 0))];
        let plan = plan_slots(&persisted, &submitted).unwrap();
        assert_eq!(plan.update.len(), 2);
        assert!(plan.remove.is_empty());
    }

    #[test]
    fn times_compare_at_minute_resolution() {
        let late = NaiveTime::from_hms_opt(8, 0, 30).unwrap();

        let err = plan_slots(&[], &[input(None, 1, late), input(None, 1, hm(8, 0))]).unwrap_err();
        assert_eq!(err.code, ErrorCode::DuplicateSlot);

        let plan = plan_slots(&[], &[input(None, 1, late)]).unwrap();
        assert_eq!(plan.create, vec![(1, hm(8, 0))]);

        // a stored whole-minute slot resubmitted with stray seconds is unchanged
        let plan = plan_slots(&[stored(10, 1, hm(8, 0))], &[input(Some(10), 1, late)]).unwrap();
        assert!(plan.is_noop());
    }
}
