use chrono::NaiveDate;
use roster_tool::{Roster, RosterError};

fn d(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn week_roster() -> Roster {
    Roster::with_dates(d(2024, 1, 1), d(2024, 1, 7)).unwrap()
}

#[test]
fn add_appends_in_insertion_order() {
    let mut roster = week_roster();
    roster.add_employee("Ana").unwrap();
    roster.add_employee("Bruno").unwrap();
    roster.add_employee("Clara").unwrap();

    let names: Vec<&str> = roster.employees().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Ana", "Bruno", "Clara"]);
}

#[test]
fn add_trims_whitespace_from_name() {
    let mut roster = week_roster();
    let employee = roster.add_employee("  Ana  ").unwrap();
    assert_eq!(employee.name, "Ana");
    assert!(employee.day_offs.is_empty());
}

#[test]
fn add_rejects_empty_and_blank_names() {
    let mut roster = week_roster();
    for name in ["", "   "] {
        let err = roster.add_employee(name).unwrap_err();
        assert!(matches!(err, RosterError::Validation(_)));
    }
    assert!(roster.employees().is_empty());
}

#[test]
fn minted_ids_are_unique_for_rapid_adds() {
    let mut roster = week_roster();
    for i in 0..20 {
        roster.add_employee(&format!("Employee {i}")).unwrap();
    }
    let mut ids: Vec<String> = roster.employees().iter().map(|e| e.id.clone()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 20);
}

#[test]
fn rename_replaces_name_and_nothing_else() {
    let mut roster = week_roster();
    let id = roster.add_employee("Ana").unwrap().id.clone();
    roster.toggle_day_off(&id, d(2024, 1, 2)).unwrap();

    roster.rename_employee(&id, "  Ana Paula ").unwrap();

    let employee = roster.employee(&id).unwrap();
    assert_eq!(employee.name, "Ana Paula");
    assert_eq!(employee.id, id);
    assert!(employee.is_off(d(2024, 1, 2)));
}

#[test]
fn rename_rejects_blank_name_and_keeps_current() {
    let mut roster = week_roster();
    let id = roster.add_employee("Ana").unwrap().id.clone();

    let err = roster.rename_employee(&id, "   ").unwrap_err();
    assert!(matches!(err, RosterError::Validation(_)));
    assert_eq!(roster.employee(&id).unwrap().name, "Ana");
}

#[test]
fn rename_unknown_id_is_not_found() {
    let mut roster = week_roster();
    let err = roster.rename_employee("missing", "Ana").unwrap_err();
    assert_eq!(err, RosterError::NotFound("missing".to_string()));
}

#[test]
fn remove_preserves_order_of_remaining() {
    let mut roster = week_roster();
    roster.add_employee("Ana").unwrap();
    let bruno = roster.add_employee("Bruno").unwrap().id.clone();
    roster.add_employee("Clara").unwrap();

    let removed = roster.remove_employee(&bruno).unwrap();
    assert_eq!(removed.name, "Bruno");

    let names: Vec<&str> = roster.employees().iter().map(|e| e.name.as_str()).collect();
    assert_eq!(names, vec!["Ana", "Clara"]);
}

#[test]
fn operations_on_removed_id_report_not_found() {
    let mut roster = week_roster();
    let id = roster.add_employee("Ana").unwrap().id.clone();
    roster.remove_employee(&id).unwrap();

    assert!(matches!(
        roster.rename_employee(&id, "Ana"),
        Err(RosterError::NotFound(_))
    ));
    assert!(matches!(
        roster.toggle_day_off(&id, d(2024, 1, 2)),
        Err(RosterError::NotFound(_))
    ));
    assert!(matches!(
        roster.remove_employee(&id),
        Err(RosterError::NotFound(_))
    ));
}

#[test]
fn toggle_day_off_is_an_involution() {
    let mut roster = week_roster();
    let id = roster.add_employee("Ana").unwrap().id.clone();
    let day = d(2024, 1, 2);

    assert!(roster.toggle_day_off(&id, day).unwrap());
    assert!(roster.employee(&id).unwrap().is_off(day));

    assert!(!roster.toggle_day_off(&id, day).unwrap());
    assert!(roster.employee(&id).unwrap().day_offs.is_empty());
}

#[test]
fn toggling_distinct_days_accumulates_without_duplicates() {
    let mut roster = week_roster();
    let id = roster.add_employee("Ana").unwrap().id.clone();

    roster.toggle_day_off(&id, d(2024, 1, 2)).unwrap();
    roster.toggle_day_off(&id, d(2024, 1, 4)).unwrap();
    roster.toggle_day_off(&id, d(2024, 1, 2)).unwrap();
    roster.toggle_day_off(&id, d(2024, 1, 2)).unwrap();

    let days: Vec<NaiveDate> = roster
        .employee(&id)
        .unwrap()
        .day_offs
        .iter()
        .copied()
        .collect();
    assert_eq!(days, vec![d(2024, 1, 2), d(2024, 1, 4)]);
}

#[test]
fn date_setters_enforce_ordering() {
    let mut roster = week_roster();

    let err = roster.set_end_date(d(2023, 12, 31)).unwrap_err();
    assert!(matches!(err, RosterError::Validation(_)));
    assert_eq!(roster.end_date(), d(2024, 1, 7));

    let err = roster.set_start_date(d(2024, 1, 8)).unwrap_err();
    assert!(matches!(err, RosterError::Validation(_)));
    assert_eq!(roster.start_date(), d(2024, 1, 1));

    roster.set_start_date(d(2024, 1, 3)).unwrap();
    roster.set_end_date(d(2024, 1, 10)).unwrap();
    assert_eq!(roster.start_date(), d(2024, 1, 3));
    assert_eq!(roster.end_date(), d(2024, 1, 10));
}

#[test]
fn set_dates_moves_both_bounds_atomically() {
    let mut roster = week_roster();
    roster.set_dates(d(2024, 3, 1), d(2024, 3, 31)).unwrap();
    assert_eq!(roster.start_date(), d(2024, 3, 1));
    assert_eq!(roster.end_date(), d(2024, 3, 31));

    assert!(matches!(
        roster.set_dates(d(2024, 4, 2), d(2024, 4, 1)),
        Err(RosterError::Validation(_))
    ));
    assert_eq!(roster.start_date(), d(2024, 3, 1));
}

#[test]
fn with_dates_rejects_inverted_bounds() {
    assert!(matches!(
        Roster::with_dates(d(2024, 1, 7), d(2024, 1, 1)),
        Err(RosterError::Validation(_))
    ));
}

#[test]
fn starting_at_covers_one_week() {
    let roster = Roster::starting_at(d(2024, 5, 1));
    assert_eq!(roster.start_date(), d(2024, 5, 1));
    assert_eq!(roster.end_date(), d(2024, 5, 7));
    assert_eq!(roster.date_range().len(), 7);
}

#[test]
fn date_range_accessor_matches_bounds() {
    let roster = week_roster();
    let days = roster.date_range();
    assert_eq!(days.len(), 7);
    assert_eq!(days.first().copied().unwrap(), roster.start_date());
    assert_eq!(days.last().copied().unwrap(), roster.end_date());
}
