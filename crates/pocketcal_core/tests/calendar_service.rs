use chrono::NaiveDate;
use pocketcal_core::{
    BlobStatus, CalendarService, Event, EventColor, EventDraft, EventStore, FixedClock,
    IdGenerator, MemoryKeyValueStore, MonthCursor, ServiceError, ValidationError,
    DEFAULT_EVENTS_KEY,
};
use std::cell::Cell;

#[derive(Default)]
struct SequentialIds(Cell<u32>);

impl IdGenerator for SequentialIds {
    fn generate(&self) -> String {
        let next = self.0.get() + 1;
        self.0.set(next);
        format!("evt-{next}")
    }
}

type TestService = CalendarService<MemoryKeyValueStore, FixedClock, SequentialIds>;

fn service_with(backend: MemoryKeyValueStore) -> TestService {
    let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    CalendarService::new(
        EventStore::new(backend),
        FixedClock(today),
        SequentialIds::default(),
    )
}

fn service() -> TestService {
    service_with(MemoryKeyValueStore::new())
}

fn draft(title: &str, date: &str, start: &str, end: &str) -> EventDraft {
    EventDraft::new(title, date, start, end)
}

fn validation_error(err: ServiceError) -> ValidationError {
    match err {
        ServiceError::Validation(inner) => inner,
        other => panic!("expected validation error, got {other}"),
    }
}

#[test]
fn overlapping_create_is_rejected_and_abutting_create_succeeds() {
    let mut service = service();
    let a = service
        .create_event(draft("A", "2024-03-15", "09:00", "10:00"))
        .unwrap();

    let err = service
        .create_event(draft("B", "2024-03-15", "09:30", "09:45"))
        .unwrap_err();
    let reason = validation_error(err);
    assert_eq!(
        reason,
        ValidationError::Overlap {
            conflicting_id: a.id.clone()
        }
    );
    assert_eq!(reason.to_string(), "Event overlaps with an existing event");
    assert_eq!(service.store().list().unwrap().len(), 1);

    let b = service
        .create_event(draft("B", "2024-03-15", "10:00", "10:30"))
        .unwrap();
    assert_eq!(b.id, "evt-2");
    assert_eq!(service.store().list().unwrap().len(), 2);
}

#[test]
fn same_times_on_another_day_do_not_conflict() {
    let mut service = service();
    service
        .create_event(draft("A", "2024-03-15", "09:00", "10:00"))
        .unwrap();
    service
        .create_event(draft("A again", "2024-03-16", "09:00", "10:00"))
        .unwrap();
}

#[test]
fn create_rejects_blank_title_and_inverted_times() {
    let mut service = service();

    let err = service
        .create_event(draft("  ", "2024-03-15", "09:00", "10:00"))
        .unwrap_err();
    assert_eq!(validation_error(err).to_string(), "Title is required");

    let err = service
        .create_event(draft("Late", "2024-03-15", "11:00", "10:00"))
        .unwrap_err();
    assert!(matches!(
        validation_error(err),
        ValidationError::EndNotAfterStart { .. }
    ));

    let err = service
        .create_event(draft("Bad date", "15/03/2024", "09:00", "10:00"))
        .unwrap_err();
    assert!(matches!(
        validation_error(err),
        ValidationError::InvalidDate(_)
    ));

    assert!(service.store().list().unwrap().is_empty());
}

#[test]
fn update_may_overlap_its_own_previous_slot() {
    let mut service = service();
    let a = service
        .create_event(draft("A", "2024-03-15", "09:00", "10:00"))
        .unwrap();
    service
        .create_event(draft("B", "2024-03-15", "11:00", "12:00"))
        .unwrap();

    let edited = service
        .update_event(
            &a.id,
            draft("A longer", "2024-03-15", "09:00", "11:00").with_color(EventColor::Work),
        )
        .unwrap()
        .unwrap();
    assert_eq!(edited.id, a.id);
    assert_eq!(edited.color, Some(EventColor::Work));

    let err = service
        .update_event(&a.id, draft("A too long", "2024-03-15", "09:00", "11:30"))
        .unwrap_err();
    assert!(matches!(
        validation_error(err),
        ValidationError::Overlap { .. }
    ));

    let stored = service.store().list().unwrap();
    assert_eq!(stored[0].title, "A longer");
}

#[test]
fn update_of_missing_event_returns_none() {
    let mut service = service();
    let result = service
        .update_event("ghost", draft("Ghost", "2024-03-15", "09:00", "10:00"))
        .unwrap();
    assert!(result.is_none());
    assert!(service.store().list().unwrap().is_empty());
}

#[test]
fn reschedule_moves_event_and_checks_target_day() {
    let mut service = service();
    let a = service
        .create_event(draft("A", "2024-03-15", "09:00", "10:00"))
        .unwrap();
    let blocker = service
        .create_event(draft("Blocker", "2024-03-20", "09:30", "10:30"))
        .unwrap();

    let err = service.reschedule_event(&a.id, "2024-03-20").unwrap_err();
    assert_eq!(
        validation_error(err),
        ValidationError::Overlap {
            conflicting_id: blocker.id
        }
    );

    let moved = service
        .reschedule_event(&a.id, "2024-03-18")
        .unwrap()
        .unwrap();
    assert_eq!(moved.date, "2024-03-18");
    assert_eq!(moved.start_time, "09:00");
    assert!(service.day_events("2024-03-15").unwrap().is_empty());
    assert_eq!(service.day_events("2024-03-18").unwrap(), vec![moved]);

    assert!(service
        .reschedule_event("ghost", "2024-03-18")
        .unwrap()
        .is_none());
}

#[test]
fn reschedule_to_same_date_is_noop() {
    let mut service = service();
    let a = service
        .create_event(draft("A", "2024-03-15", "09:00", "10:00"))
        .unwrap();

    let unchanged = service
        .reschedule_event(&a.id, "2024-03-15")
        .unwrap()
        .unwrap();
    assert_eq!(unchanged, a);
}

#[test]
fn delete_is_idempotent() {
    let mut service = service();
    let a = service
        .create_event(draft("A", "2024-03-15", "09:00", "10:00"))
        .unwrap();

    assert!(service.delete_event(&a.id).unwrap());
    assert!(!service.delete_event(&a.id).unwrap());
}

#[test]
fn day_events_are_sorted_by_start_time() {
    let mut service = service();
    service
        .create_event(draft("Late", "2024-03-15", "15:00", "16:00"))
        .unwrap();
    service
        .create_event(draft("Early", "2024-03-15", "08:00", "09:00"))
        .unwrap();

    let titles = service
        .day_events("2024-03-15")
        .unwrap()
        .into_iter()
        .map(|event| event.title)
        .collect::<Vec<_>>();
    assert_eq!(titles, vec!["Early", "Late"]);
}

#[test]
fn month_view_joins_events_and_marks_today() {
    let mut service = service();
    service
        .create_event(draft("Standup", "2024-03-15", "09:00", "09:15"))
        .unwrap();
    service
        .create_event(draft("Padding", "2024-02-29", "09:00", "09:15"))
        .unwrap();

    let days = service.month_view(MonthCursor::new(2024, 2)).unwrap();
    assert_eq!(days.len(), 42);

    let today = days.iter().find(|day| day.is_today).unwrap();
    assert_eq!(today.events.len(), 1);
    assert_eq!(today.events[0].title, "Standup");

    let leap_day = days
        .iter()
        .find(|day| day.date == NaiveDate::from_ymd_opt(2024, 2, 29).unwrap())
        .unwrap();
    assert!(!leap_day.is_current_month);
    assert_eq!(leap_day.events.len(), 1);
}

#[test]
fn search_month_view_filters_and_blank_query_shows_all() {
    let mut service = service();
    service
        .create_event(draft("Work meeting", "2024-03-04", "09:00", "10:00"))
        .unwrap();
    service
        .create_event(draft("Dentist", "2024-03-05", "09:00", "10:00"))
        .unwrap();

    let count = |days: &[pocketcal_core::CalendarDay]| -> usize {
        days.iter().map(|day| day.events.len()).sum()
    };
    let march = MonthCursor::new(2024, 2);

    assert_eq!(count(&service.search_month_view(march, "meeting").unwrap()), 1);
    assert_eq!(count(&service.search_month_view(march, "   ").unwrap()), 2);
    assert_eq!(count(&service.search_month_view(march, "yoga").unwrap()), 0);
}

#[test]
fn export_month_includes_only_that_month() {
    let mut service = service();
    service
        .create_event(draft("March", "2024-03-04", "09:00", "10:00").with_description("notes"))
        .unwrap();
    service
        .create_event(draft("April", "2024-04-01", "09:00", "10:00"))
        .unwrap();
    service
        .create_event(draft("Last March", "2023-03-04", "09:00", "10:00"))
        .unwrap();

    let json = service.export_month(MonthCursor::new(2024, 2)).unwrap();
    let exported: Vec<Event> = serde_json::from_str(&json).unwrap();
    assert_eq!(exported.len(), 1);
    assert_eq!(exported[0].title, "March");
    assert_eq!(exported[0].description.as_deref(), Some("notes"));
}

#[test]
fn load_status_surfaces_corrupt_blob() {
    let mut backend = MemoryKeyValueStore::new();
    backend.insert_raw(DEFAULT_EVENTS_KEY, "[[[");
    let service = service_with(backend);

    assert!(matches!(
        service.load_status().unwrap(),
        BlobStatus::Corrupt { .. }
    ));
    assert!(service
        .month_view(MonthCursor::new(2024, 2))
        .unwrap()
        .iter()
        .all(|day| day.events.is_empty()));
}

#[test]
fn storage_write_failure_is_not_a_validation_error() {
    let mut service = service_with(MemoryKeyValueStore::with_quota(10));
    let err = service
        .create_event(draft("A", "2024-03-15", "09:00", "10:00"))
        .unwrap_err();
    assert!(matches!(err, ServiceError::Store(_)));
}
