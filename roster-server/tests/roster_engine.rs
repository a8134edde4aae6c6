//! Roster engine against an in-memory database with the real migrations.

use chrono::{NaiveDate, NaiveTime};
use roster_server::db::DbService;
use roster_server::db::repository::{day_record, slot, specialist, venue};
use roster_server::{ErrorCode, RosterService, WeekStart};
use shared::models::{
    DayInput, DayView, SheetEntry, SlotInput, SpecialistCreate, VenueCreate, WeekSubmission,
};
use sqlx::SqlitePool;

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

struct Fixture {
    pool: SqlitePool,
    roster: RosterService,
    specialist: i64,
    ward: i64,
    clinic: i64,
}

async fn add_specialist(pool: &SqlitePool, name: &str, code: &str, on: NaiveDate) -> i64 {
    specialist::create(
        pool,
        SpecialistCreate {
            name: name.to_string(),
            code: code.to_string(),
            is_active: None,
            associated_on: Some(on),
        },
    )
    .await
    .unwrap()
    .id
}

async fn add_venue(pool: &SqlitePool, name: &str, code: &str, color: &str) -> i64 {
    venue::create(
        pool,
        VenueCreate {
            name: name.to_string(),
            code: Some(code.to_string()),
            color: Some(color.to_string()),
            icon: None,
            is_active: None,
        },
    )
    .await
    .unwrap()
    .id
}

async fn fixture(week_start: WeekStart) -> Fixture {
    let pool = DbService::in_memory().await.unwrap().pool;
    let specialist = add_specialist(&pool, "Ana Lima", "AL", ymd(2020, 1, 1)).await;
    let ward = add_venue(&pool, "General Ward", "GW", "#AA0000").await;
    let clinic = add_venue(&pool, "North Clinic", "NC", "#00AA00").await;
    Fixture {
        roster: RosterService::new(pool.clone(), week_start),
        pool,
        specialist,
        ward,
        clinic,
    }
}

fn new_slot(venue_id: i64, time: NaiveTime) -> SlotInput {
    SlotInput {
        id: None,
        venue_id,
        time,
    }
}

fn new_day(date: NaiveDate, slots: Vec<SlotInput>) -> DayInput {
    DayInput {
        id: None,
        date,
        slots,
    }
}

/// Resubmission payload that keeps every slot of a rendered day
fn keep(day: &DayView) -> DayInput {
    DayInput {
        id: day.id,
        date: day.date,
        slots: day
            .slots
            .iter()
            .map(|s| SlotInput {
                id: Some(s.id),
                venue_id: s.venue_id,
                time: s.time,
            })
            .collect(),
    }
}

async fn save_first_week(f: &Fixture) -> Vec<DayView> {
    let week = f
        .roster
        .reconcile_week(WeekSubmission {
            specialist_id: f.specialist,
            days: vec![
                new_day(
                    ymd(2024, 6, 12),
                    vec![new_slot(f.clinic, hm(19, 0)), new_slot(f.ward, hm(7, 0))],
                ),
                new_day(ymd(2024, 6, 10), vec![new_slot(f.ward, hm(8, 30))]),
            ],
        })
        .await
        .unwrap();
    week.days
}

#[tokio::test]
async fn saved_week_round_trips_through_get_week() {
    let f = fixture(WeekStart::Monday).await;
    let saved = save_first_week(&f).await;

    assert_eq!(saved.len(), 2);
    assert_eq!(saved[0].date, ymd(2024, 6, 10));
    assert_eq!(saved[1].date, ymd(2024, 6, 12));

    let week = f.roster.get_week(saved[1].id.unwrap()).await.unwrap();
    assert_eq!(week.week_start, ymd(2024, 6, 10));
    assert_eq!(week.week_end, ymd(2024, 6, 16));
    assert_eq!(week.specialist_name.as_deref(), Some("Ana Lima"));
    assert_eq!(week.specialist_code.as_deref(), Some("AL"));
    assert_eq!(week.days.len(), 2);

    let wednesday = &week.days[1];
    assert_eq!(wednesday.slots.len(), 2);
    // ordered by time, venue attributes joined
    assert_eq!(wednesday.slots[0].time, hm(7, 0));
    assert_eq!(wednesday.slots[0].venue_code.as_deref(), Some("GW"));
    assert_eq!(wednesday.slots[0].color.as_deref(), Some("#AA0000"));
    assert_eq!(wednesday.slots[1].time, hm(19, 0));
    assert_eq!(wednesday.slots[1].venue_code.as_deref(), Some("NC"));
    assert_eq!(wednesday.slots, saved[1].slots);
}

#[tokio::test]
async fn identical_resubmission_changes_nothing() {
    let f = fixture(WeekStart::Monday).await;
    let saved = save_first_week(&f).await;

    let again = f
        .roster
        .reconcile_week(WeekSubmission {
            specialist_id: f.specialist,
            days: saved.iter().map(keep).collect(),
        })
        .await
        .unwrap();

    assert_eq!(again.days.len(), saved.len());
    for (before, after) in saved.iter().zip(&again.days) {
        assert_eq!(before.id, after.id);
        assert_eq!(before.slots, after.slots);
    }

    let records = day_record::find_by_specialist_in_range(
        &f.pool,
        f.specialist,
        ymd(2024, 6, 10),
        ymd(2024, 6, 16),
    )
    .await
    .unwrap();
    assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn seconds_on_the_wire_do_not_break_resubmission() {
    let f = fixture(WeekStart::Monday).await;

    let submission: WeekSubmission = serde_json::from_value(serde_json::json!({
        "specialist_id": f.specialist,
        "days": [{"date": "2024-06-12", "slots": [
            {"venue_id": f.ward, "time": "08:00:30"},
            {"venue_id": f.clinic, "time": "19:15:59"}
        ]}]
    }))
    .unwrap();
    let first = f.roster.reconcile_week(submission).await.unwrap();
    let record_id = first.days[0].id.unwrap();
    let stored_before = slot::find_by_day_record(&f.pool, record_id).await.unwrap();
    assert_eq!(
        stored_before.iter().map(|s| s.time).collect::<Vec<_>>(),
        vec![hm(8, 0), hm(19, 15)]
    );

    // resubmit exactly what the client received
    let view = serde_json::to_value(&first).unwrap();
    assert_eq!(view["days"][0]["slots"][0]["time"], "08:00");
    let resubmission: WeekSubmission = serde_json::from_value(view).unwrap();
    let second = f.roster.reconcile_week(resubmission).await.unwrap();

    assert_eq!(second.days[0].slots, first.days[0].slots);
    let stored_after = slot::find_by_day_record(&f.pool, record_id).await.unwrap();
    assert_eq!(
        stored_after.iter().map(|s| (s.id, s.venue_id, s.time, s.updated_at)).collect::<Vec<_>>(),
        stored_before.iter().map(|s| (s.id, s.venue_id, s.time, s.updated_at)).collect::<Vec<_>>()
    );
}

#[tokio::test]
async fn same_minute_with_different_seconds_is_a_duplicate() {
    let f = fixture(WeekStart::Monday).await;

    let submission: WeekSubmission = serde_json::from_value(serde_json::json!({
        "specialist_id": f.specialist,
        "days": [{"date": "2024-06-12", "slots": [
            {"venue_id": f.ward, "time": "08:00:30"},
            {"venue_id": f.ward, "time": "08:00"}
        ]}]
    }))
    .unwrap();
    let err = f.roster.reconcile_week(submission).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::DuplicateSlot);
}

#[tokio::test]
async fn slots_are_updated_created_and_removed_by_identity() {
    let f = fixture(WeekStart::Monday).await;
    let saved = save_first_week(&f).await;
    let wednesday = &saved[1];
    let morning = &wednesday.slots[0];

    let week = f
        .roster
        .reconcile_week(WeekSubmission {
            specialist_id: f.specialist,
            days: vec![DayInput {
                id: wednesday.id,
                date: wednesday.date,
                slots: vec![
                    // move the morning slot to the clinic, keep its identity
                    SlotInput {
                        id: Some(morning.id),
                        venue_id: f.clinic,
                        time: hm(7, 30),
                    },
                    new_slot(f.ward, hm(13, 0)),
                ],
            }],
        })
        .await
        .unwrap();

    assert_eq!(week.days.len(), 1);
    let slots = &week.days[0].slots;
    assert_eq!(slots.len(), 2);
    assert_eq!(slots[0].id, morning.id);
    assert_eq!(slots[0].venue_id, f.clinic);
    assert_eq!(slots[0].time, hm(7, 30));
    assert_eq!(slots[1].venue_id, f.ward);
    assert_eq!(slots[1].time, hm(13, 0));

    // the evening slot was not mentioned and is gone
    let stored = slot::find_by_day_record(&f.pool, wednesday.id.unwrap())
        .await
        .unwrap();
    assert_eq!(stored.len(), 2);
    assert!(stored.iter().all(|s| s.id != wednesday.slots[1].id));

    // Monday was not part of this submission and is untouched
    let full = f.roster.get_week(saved[0].id.unwrap()).await.unwrap();
    assert_eq!(full.days.len(), 2);
    assert_eq!(full.days[0].slots, saved[0].slots);
}

#[tokio::test]
async fn emptied_day_is_deleted_and_shows_as_placeholder() {
    let f = fixture(WeekStart::Monday).await;
    let saved = save_first_week(&f).await;
    let wednesday = &saved[1];

    let week = f
        .roster
        .reconcile_week(WeekSubmission {
            specialist_id: f.specialist,
            days: vec![DayInput {
                id: wednesday.id,
                date: wednesday.date,
                slots: vec![],
            }],
        })
        .await
        .unwrap();
    assert!(week.days.is_empty());

    assert!(
        day_record::find_by_id(&f.pool, wednesday.id.unwrap())
            .await
            .unwrap()
            .is_none()
    );
    // slots cascade with their record
    assert!(
        slot::find_by_day_record(&f.pool, wednesday.id.unwrap())
            .await
            .unwrap()
            .is_empty()
    );

    let grid = f.roster.list_day(ymd(2024, 6, 12)).await.unwrap();
    assert_eq!(grid.len(), 1);
    assert!(grid[0].is_placeholder());
    assert_eq!(grid[0].specialist_id, f.specialist);
    assert_eq!(grid[0].specialist_code.as_deref(), Some("AL"));
}

#[tokio::test]
async fn new_day_without_slots_is_not_persisted() {
    let f = fixture(WeekStart::Monday).await;
    let week = f
        .roster
        .reconcile_week(WeekSubmission {
            specialist_id: f.specialist,
            days: vec![
                new_day(ymd(2024, 6, 10), vec![]),
                new_day(ymd(2024, 6, 11), vec![new_slot(f.ward, hm(7, 0))]),
            ],
        })
        .await
        .unwrap();

    assert_eq!(week.days.len(), 1);
    assert_eq!(week.days[0].date, ymd(2024, 6, 11));
    assert!(
        day_record::find_by_specialist_and_date(&f.pool, f.specialist, ymd(2024, 6, 10))
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn failure_on_a_later_day_rolls_back_earlier_days() {
    let f = fixture(WeekStart::Monday).await;

    let err = f
        .roster
        .reconcile_week(WeekSubmission {
            specialist_id: f.specialist,
            days: vec![
                new_day(ymd(2024, 6, 10), vec![new_slot(f.ward, hm(7, 0))]),
                new_day(ymd(2024, 6, 11), vec![new_slot(9999, hm(7, 0))]),
            ],
        })
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::VenueNotFound);

    assert!(
        day_record::find_by_specialist_and_date(&f.pool, f.specialist, ymd(2024, 6, 10))
            .await
            .unwrap()
            .is_none()
    );
    assert!(f.roster.list_week_summaries().await.unwrap().is_empty());
}

#[tokio::test]
async fn failure_leaves_existing_week_untouched() {
    let f = fixture(WeekStart::Monday).await;
    let saved = save_first_week(&f).await;

    let mut monday = keep(&saved[0]);
    monday.slots.clear();
    let mut wednesday = keep(&saved[1]);
    wednesday.slots.push(wednesday.slots[0].clone());
    wednesday.slots[2].id = None;

    let err = f
        .roster
        .reconcile_week(WeekSubmission {
            specialist_id: f.specialist,
            days: vec![monday, wednesday],
        })
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::DuplicateSlot);

    let week = f.roster.get_week(saved[0].id.unwrap()).await.unwrap();
    assert_eq!(week.days.len(), 2);
    assert_eq!(week.days[0].slots, saved[0].slots);
}

#[tokio::test]
async fn submission_rules() {
    let f = fixture(WeekStart::Monday).await;
    let saved = save_first_week(&f).await;

    let empty = f
        .roster
        .reconcile_week(WeekSubmission {
            specialist_id: f.specialist,
            days: vec![],
        })
        .await
        .unwrap_err();
    assert_eq!(empty.code, ErrorCode::EmptySubmission);

    // Sunday 16th is in the week, Monday 17th is not
    let outside = f
        .roster
        .reconcile_week(WeekSubmission {
            specialist_id: f.specialist,
            days: vec![
                new_day(ymd(2024, 6, 16), vec![new_slot(f.ward, hm(7, 0))]),
                new_day(ymd(2024, 6, 17), vec![new_slot(f.ward, hm(7, 0))]),
            ],
        })
        .await
        .unwrap_err();
    assert_eq!(outside.code, ErrorCode::DayOutsideWeek);

    let clash = f
        .roster
        .reconcile_week(WeekSubmission {
            specialist_id: f.specialist,
            days: vec![new_day(ymd(2024, 6, 10), vec![new_slot(f.clinic, hm(9, 0))])],
        })
        .await
        .unwrap_err();
    assert_eq!(clash.code, ErrorCode::DayRecordExists);

    let twice = f
        .roster
        .reconcile_week(WeekSubmission {
            specialist_id: f.specialist,
            days: vec![
                new_day(ymd(2024, 6, 14), vec![new_slot(f.ward, hm(7, 0))]),
                new_day(ymd(2024, 6, 14), vec![new_slot(f.clinic, hm(7, 0))]),
            ],
        })
        .await
        .unwrap_err();
    assert_eq!(twice.code, ErrorCode::ValidationFailed);

    let unknown_specialist = f
        .roster
        .reconcile_week(WeekSubmission {
            specialist_id: 9999,
            days: vec![new_day(ymd(2024, 6, 14), vec![new_slot(f.ward, hm(7, 0))])],
        })
        .await
        .unwrap_err();
    assert_eq!(unknown_specialist.code, ErrorCode::SpecialistNotFound);

    // a slot id belonging to Monday's record submitted on Wednesday
    let mut wednesday = keep(&saved[1]);
    wednesday.slots[0].id = Some(saved[0].slots[0].id);
    let foreign = f
        .roster
        .reconcile_week(WeekSubmission {
            specialist_id: f.specialist,
            days: vec![wednesday],
        })
        .await
        .unwrap_err();
    assert_eq!(foreign.code, ErrorCode::SlotNotFound);

    // a day id submitted under another date
    let mut moved = keep(&saved[0]);
    moved.date = ymd(2024, 6, 11);
    let mismatched = f
        .roster
        .reconcile_week(WeekSubmission {
            specialist_id: f.specialist,
            days: vec![moved],
        })
        .await
        .unwrap_err();
    assert_eq!(mismatched.code, ErrorCode::ValidationFailed);

    let missing_record = f
        .roster
        .reconcile_week(WeekSubmission {
            specialist_id: f.specialist,
            days: vec![DayInput {
                id: Some(9999),
                date: ymd(2024, 6, 13),
                slots: vec![new_slot(f.ward, hm(7, 0))],
            }],
        })
        .await
        .unwrap_err();
    assert_eq!(missing_record.code, ErrorCode::DayRecordNotFound);
}

#[tokio::test]
async fn daily_grid_lists_every_active_specialist() {
    let f = fixture(WeekStart::Monday).await;
    let second = add_specialist(&f.pool, "Bruno Costa", "BC", ymd(2021, 1, 1)).await;
    let third = add_specialist(&f.pool, "Carla Dias", "CD", ymd(2019, 1, 1)).await;
    let retired = add_specialist(&f.pool, "Davi Reis", "DR", ymd(2018, 1, 1)).await;
    specialist::update(
        &f.pool,
        retired,
        shared::models::SpecialistUpdate {
            is_active: Some(false),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    f.roster
        .reconcile_week(WeekSubmission {
            specialist_id: second,
            days: vec![new_day(ymd(2024, 6, 12), vec![new_slot(f.ward, hm(7, 0))])],
        })
        .await
        .unwrap();

    let grid = f.roster.list_day(ymd(2024, 6, 12)).await.unwrap();
    let ids: Vec<i64> = grid.iter().map(|d| d.specialist_id).collect();
    // association order, inactive excluded
    assert_eq!(ids, vec![third, f.specialist, second]);
    assert!(grid[0].is_placeholder());
    assert!(grid[1].is_placeholder());
    assert!(!grid[2].is_placeholder());
    assert_eq!(grid[2].slots.len(), 1);
    assert!(grid.iter().all(|d| d.date == ymd(2024, 6, 12)));
}

#[tokio::test]
async fn week_summaries_group_by_specialist_and_week() {
    let f = fixture(WeekStart::Monday).await;
    let saved = save_first_week(&f).await;
    let other = add_specialist(&f.pool, "Bruno Costa", "BC", ymd(2021, 1, 1)).await;

    let later = f
        .roster
        .reconcile_week(WeekSubmission {
            specialist_id: f.specialist,
            days: vec![new_day(ymd(2024, 6, 18), vec![new_slot(f.ward, hm(7, 0))])],
        })
        .await
        .unwrap();
    let other_week = f
        .roster
        .reconcile_week(WeekSubmission {
            specialist_id: other,
            days: vec![new_day(ymd(2024, 6, 16), vec![new_slot(f.ward, hm(7, 0))])],
        })
        .await
        .unwrap();

    let summaries = f.roster.list_week_summaries().await.unwrap();
    assert_eq!(summaries.len(), 3);

    assert_eq!(summaries[0].week_start, ymd(2024, 6, 17));
    assert_eq!(summaries[0].id, later.days[0].id.unwrap());

    // same week: ordered by specialist name
    assert_eq!(summaries[1].week_start, ymd(2024, 6, 10));
    assert_eq!(summaries[1].specialist_name, "Ana Lima");
    let first_id = saved.iter().filter_map(|d| d.id).min().unwrap();
    assert_eq!(summaries[1].id, first_id);
    assert_eq!(summaries[2].specialist_id, other);
    assert_eq!(summaries[2].specialist_code, "BC");
    assert_eq!(summaries[2].week_end, ymd(2024, 6, 16));
    assert_eq!(summaries[2].id, other_week.days[0].id.unwrap());
}

#[tokio::test]
async fn delete_week_only_removes_that_week() {
    let f = fixture(WeekStart::Monday).await;
    let saved = save_first_week(&f).await;
    let later = f
        .roster
        .reconcile_week(WeekSubmission {
            specialist_id: f.specialist,
            days: vec![new_day(ymd(2024, 6, 17), vec![new_slot(f.ward, hm(7, 0))])],
        })
        .await
        .unwrap();

    let removed = f.roster.delete_week(saved[1].id.unwrap()).await.unwrap();
    assert_eq!(removed, 2);

    let summaries = f.roster.list_week_summaries().await.unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].id, later.days[0].id.unwrap());

    let err = f.roster.get_week(saved[0].id.unwrap()).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::DayRecordNotFound);
    let err = f.roster.delete_week(saved[0].id.unwrap()).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::DayRecordNotFound);
}

#[tokio::test]
async fn sunday_weeks() {
    let f = fixture(WeekStart::Sunday).await;
    let week = f
        .roster
        .reconcile_week(WeekSubmission {
            specialist_id: f.specialist,
            days: vec![
                new_day(ymd(2024, 6, 22), vec![new_slot(f.ward, hm(7, 0))]),
                new_day(ymd(2024, 6, 16), vec![new_slot(f.ward, hm(7, 0))]),
            ],
        })
        .await
        .unwrap();
    assert_eq!(week.week_start, ymd(2024, 6, 16));
    assert_eq!(week.week_end, ymd(2024, 6, 22));
    assert_eq!(week.days[0].date, ymd(2024, 6, 16));

    let summaries = f.roster.list_week_summaries().await.unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].week_start, ymd(2024, 6, 16));
}

#[tokio::test]
async fn specialist_week_without_records_is_empty() {
    let f = fixture(WeekStart::Monday).await;
    let week = f
        .roster
        .specialist_week(f.specialist, ymd(2024, 6, 12))
        .await
        .unwrap();
    assert!(week.days.is_empty());
    assert_eq!(week.week_start, ymd(2024, 6, 10));

    let err = f
        .roster
        .specialist_week(9999, ymd(2024, 6, 12))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::SpecialistNotFound);
}

#[tokio::test]
async fn day_sheet_covers_several_specialists() {
    let f = fixture(WeekStart::Monday).await;
    let other = add_specialist(&f.pool, "Bruno Costa", "BC", ymd(2021, 1, 1)).await;
    let date = ymd(2024, 6, 12);

    let saved = f
        .roster
        .reconcile_sheet(vec![
            SheetEntry {
                specialist_id: f.specialist,
                day: new_day(date, vec![new_slot(f.ward, hm(7, 0))]),
            },
            SheetEntry {
                specialist_id: other,
                day: new_day(date, vec![new_slot(f.clinic, hm(19, 0))]),
            },
        ])
        .await
        .unwrap();
    assert_eq!(saved.len(), 2);
    assert_eq!(saved[1].specialist_code.as_deref(), Some("BC"));

    let grid = f.roster.list_day(date).await.unwrap();
    assert!(grid.iter().all(|d| !d.is_placeholder()));

    // clearing one specialist's day through the sheet
    let cleared = f
        .roster
        .reconcile_sheet(vec![SheetEntry {
            specialist_id: other,
            day: DayInput {
                id: saved[1].id,
                date,
                slots: vec![],
            },
        }])
        .await
        .unwrap();
    assert!(cleared.is_empty());
    let grid = f.roster.list_day(date).await.unwrap();
    assert_eq!(grid.iter().filter(|d| d.is_placeholder()).count(), 1);

    let err = f.roster.reconcile_sheet(vec![]).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::EmptySubmission);
}

#[tokio::test]
async fn referenced_venue_and_specialist_cannot_be_deleted() {
    let f = fixture(WeekStart::Monday).await;
    save_first_week(&f).await;

    assert!(matches!(
        venue::delete(&f.pool, f.ward).await,
        Err(roster_server::db::repository::RepoError::InUse(_))
    ));
    assert!(matches!(
        specialist::delete(&f.pool, f.specialist).await,
        Err(roster_server::db::repository::RepoError::InUse(_))
    ));
}
