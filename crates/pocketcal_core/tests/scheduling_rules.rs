use pocketcal_core::{find_conflict, overlaps, sort_by_start_time, Event, EventDraft};

fn event(id: &str, start: &str, end: &str) -> Event {
    Event::from_draft(id, EventDraft::new(id, "2024-03-15", start, end))
}

const PAIRS: &[(&str, &str, &str, &str)] = &[
    ("09:00", "10:00", "10:00", "11:00"),
    ("09:00", "10:00", "09:30", "09:45"),
    ("09:00", "11:00", "08:00", "12:00"),
    ("09:00", "10:00", "09:00", "10:00"),
    ("09:00", "10:30", "10:00", "11:00"),
    ("08:00", "09:00", "13:00", "14:00"),
    ("00:00", "23:59", "12:00", "12:30"),
    ("09:00", "09:00", "09:00", "10:00"),
    ("10:00", "10:00", "09:00", "10:00"),
];

#[test]
fn abutting_ranges_do_not_overlap() {
    assert!(!overlaps("09:00", "10:00", "10:00", "11:00"));
    assert!(!overlaps("10:00", "11:00", "09:00", "10:00"));
}

#[test]
fn containment_overlaps_in_both_directions() {
    assert!(overlaps("09:00", "10:00", "09:30", "09:45"));
    assert!(overlaps("09:00", "11:00", "08:00", "12:00"));
}

#[test]
fn partial_overlap_is_detected() {
    assert!(overlaps("09:00", "10:30", "10:00", "11:00"));
    assert!(overlaps("10:00", "11:00", "09:00", "10:30"));
}

#[test]
fn disjoint_ranges_do_not_overlap() {
    assert!(!overlaps("08:00", "09:00", "13:00", "14:00"));
}

#[test]
fn overlap_is_symmetric_for_all_pairs() {
    for &(a_start, a_end, b_start, b_end) in PAIRS {
        assert_eq!(
            overlaps(a_start, a_end, b_start, b_end),
            overlaps(b_start, b_end, a_start, a_end),
            "asymmetric for [{a_start},{a_end}) vs [{b_start},{b_end})"
        );
    }
}

#[test]
fn overlap_matches_half_open_intersection_for_positive_ranges() {
    for &(a_start, a_end, b_start, b_end) in PAIRS {
        if a_start >= a_end || b_start >= b_end {
            continue;
        }
        let intersect = a_start < b_end && b_start < a_end;
        assert_eq!(overlaps(a_start, a_end, b_start, b_end), intersect);
    }
}

#[test]
fn sort_is_stable_and_leaves_input_untouched() {
    let input = vec![
        event("c", "11:00", "12:00"),
        event("a1", "09:00", "09:30"),
        event("b", "10:00", "10:30"),
        event("a2", "09:00", "09:45"),
    ];
    let snapshot = input.clone();

    let sorted = sort_by_start_time(&input);
    let ids = sorted.iter().map(|e| e.id.as_str()).collect::<Vec<_>>();
    assert_eq!(ids, vec!["a1", "a2", "b", "c"]);
    assert_eq!(input, snapshot);
}

#[test]
fn sort_of_empty_slice_is_empty() {
    assert!(sort_by_start_time(&[]).is_empty());
}

#[test]
fn find_conflict_returns_first_overlapping_event() {
    let day = vec![
        event("a", "08:00", "09:00"),
        event("b", "09:00", "10:00"),
        event("c", "09:30", "11:00"),
    ];

    let hit = find_conflict("09:15", "09:45", &day, None).unwrap();
    assert_eq!(hit.id, "b");

    let skipped = find_conflict("09:15", "09:45", &day, Some("b")).unwrap();
    assert_eq!(skipped.id, "c");

    assert!(find_conflict("11:00", "12:00", &day, None).is_none());
}
