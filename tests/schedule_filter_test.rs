use chrono::{NaiveDate, NaiveTime, Weekday};
use studyhelper_core::models::{LessonType, ScheduleEntry, WeekParity};
use studyhelper_core::prefs::SchedulePreferences;
use studyhelper_core::schedule::{
    apply_preferences, available_instructors, filter_by_instructor_preference,
    filter_by_subgroup, find_alternate_entry, group_week, is_elective_sport_entry,
};

fn entry(
    id: &str,
    subject: &str,
    day: Weekday,
    start_hour: u32,
    subgroup: Option<u8>,
    teacher: Option<&str>,
) -> ScheduleEntry {
    ScheduleEntry {
        id: id.to_string(),
        day_of_week: day,
        start_time: NaiveTime::from_hms_opt(start_hour, 0, 0).expect("valid time"),
        end_time: NaiveTime::from_hms_opt(start_hour + 1, 30, 0).expect("valid time"),
        lesson_type: LessonType::Practice,
        subject: subject.to_string(),
        subject_id: None,
        teacher: teacher.map(str::to_string),
        room: None,
        subgroup,
        note: None,
    }
}

fn ids(entries: &[ScheduleEntry]) -> Vec<&str> {
    entries.iter().map(|e| e.id.as_str()).collect()
}

#[test]
fn subgroup_filter_keeps_general_and_matching_entries() {
    let entries = vec![
        entry("a", "Math", Weekday::Mon, 9, None, None),
        entry("b", "Math", Weekday::Mon, 11, Some(1), None),
        entry("c", "Math", Weekday::Mon, 11, Some(2), None),
    ];

    let filtered = filter_by_subgroup(&entries, Some(1));
    assert_eq!(ids(&filtered), vec!["a", "b"]);
}

#[test]
fn subgroup_filter_without_preference_is_identity() {
    let entries = vec![
        entry("a", "Math", Weekday::Mon, 9, Some(1), None),
        entry("b", "Math", Weekday::Mon, 11, Some(2), None),
    ];

    let filtered = filter_by_subgroup(&entries, None);
    assert_eq!(ids(&filtered), ids(&entries));
}

#[test]
fn subgroup_filter_result_is_ordered_subset() {
    let entries = vec![
        entry("a", "Math", Weekday::Mon, 9, Some(2), None),
        entry("b", "Physics", Weekday::Tue, 9, None, None),
        entry("c", "Math", Weekday::Wed, 9, Some(3), None),
        entry("d", "Chemistry", Weekday::Thu, 9, Some(3), None),
    ];

    let filtered = filter_by_subgroup(&entries, Some(3));
    assert_eq!(ids(&filtered), vec!["b", "c", "d"]);
    for kept in &filtered {
        assert!(kept.subgroup.is_none() || kept.subgroup == Some(3));
    }
}

#[test]
fn alternate_entry_is_found_for_other_subgroup_at_same_slot() {
    let nine = NaiveTime::from_hms_opt(9, 0, 0).expect("valid time");
    let entries = vec![
        entry("mine", "Math", Weekday::Mon, 9, Some(1), None),
        entry("other", "Math", Weekday::Mon, 9, Some(2), None),
        entry("later", "Math", Weekday::Mon, 11, Some(2), None),
    ];

    let alternate = find_alternate_entry(&entries, Weekday::Mon, nine, Some(1));
    assert_eq!(alternate.map(|e| e.id.as_str()), Some("other"));
}

#[test]
fn alternate_entry_requires_a_subgroup_preference() {
    let nine = NaiveTime::from_hms_opt(9, 0, 0).expect("valid time");
    let entries = vec![
        entry("a", "Math", Weekday::Mon, 9, Some(1), None),
        entry("b", "Math", Weekday::Mon, 9, Some(2), None),
    ];

    assert!(find_alternate_entry(&entries, Weekday::Mon, nine, None).is_none());
}

#[test]
fn alternate_entry_ignores_general_and_same_subgroup_entries() {
    let nine = NaiveTime::from_hms_opt(9, 0, 0).expect("valid time");
    let entries = vec![
        entry("general", "Math", Weekday::Mon, 9, None, None),
        entry("same", "Math", Weekday::Mon, 9, Some(1), None),
    ];

    assert!(find_alternate_entry(&entries, Weekday::Mon, nine, Some(1)).is_none());
}

#[test]
fn elective_sport_classification_is_case_insensitive() {
    let pe = entry("a", "PHYSICAL EDUCATION (Basketball)", Weekday::Fri, 8, None, None);
    let elective = entry("b", "Elective Sport: Swimming", Weekday::Fri, 8, None, None);
    let math = entry("c", "Mathematical Analysis", Weekday::Fri, 8, None, None);

    assert!(is_elective_sport_entry(&pe));
    assert!(is_elective_sport_entry(&elective));
    assert!(!is_elective_sport_entry(&math));
}

#[test]
fn instructor_preference_only_affects_elective_sport_entries() {
    let entries = vec![
        entry("math", "Math", Weekday::Fri, 9, None, Some("Petrov")),
        entry("pe1", "Physical Education", Weekday::Fri, 11, None, Some("Ivanov")),
        entry("pe2", "Physical Education", Weekday::Fri, 11, None, Some("Sidorov")),
        entry("pe3", "Physical Education", Weekday::Fri, 11, None, None),
    ];

    let filtered = filter_by_instructor_preference(&entries, Some("Ivanov"));
    assert_eq!(ids(&filtered), vec!["math", "pe1"]);
}

#[test]
fn instructor_preference_unset_is_identity() {
    let entries = vec![
        entry("pe1", "Physical Education", Weekday::Fri, 11, None, Some("Ivanov")),
        entry("pe2", "Physical Education", Weekday::Fri, 11, None, Some("Sidorov")),
    ];

    let filtered = filter_by_instructor_preference(&entries, None);
    assert_eq!(ids(&filtered), vec!["pe1", "pe2"]);
}

#[test]
fn available_instructors_are_sorted_and_deduplicated() {
    let entries = vec![
        entry("a", "Physical Education", Weekday::Mon, 8, None, Some("Sidorov")),
        entry("b", "Physical Education", Weekday::Wed, 8, None, Some("Ivanov")),
        entry("c", "Physical Education", Weekday::Fri, 8, None, Some("Sidorov")),
        entry("d", "Math", Weekday::Fri, 10, None, Some("Petrov")),
        entry("e", "Physical Education", Weekday::Fri, 8, None, None),
    ];

    assert_eq!(available_instructors(&entries), vec!["Ivanov", "Sidorov"]);
}

#[test]
fn apply_preferences_combines_both_filters() {
    let prefs = SchedulePreferences {
        subgroup: Some(2),
        elective_sport_instructor: Some("Ivanov".to_string()),
    };
    let entries = vec![
        entry("lecture", "Math", Weekday::Mon, 9, None, None),
        entry("lab1", "Math", Weekday::Mon, 11, Some(1), None),
        entry("lab2", "Math", Weekday::Mon, 11, Some(2), None),
        entry("pe1", "Physical Education", Weekday::Fri, 8, None, Some("Ivanov")),
        entry("pe2", "Physical Education", Weekday::Fri, 8, None, Some("Sidorov")),
    ];

    let filtered = apply_preferences(&entries, &prefs);
    assert_eq!(ids(&filtered), vec!["lecture", "lab2", "pe1"]);
}

#[test]
fn group_week_buckets_days_and_sorts_by_start_time() {
    let monday = NaiveDate::from_ymd_opt(2025, 9, 1).expect("valid date");
    let entries = vec![
        entry("mon_late", "Math", Weekday::Mon, 13, None, None),
        entry("wed", "Physics", Weekday::Wed, 9, None, None),
        entry("mon_early", "History", Weekday::Mon, 9, None, None),
    ];

    let week = group_week(&entries, monday, WeekParity::Odd);

    assert_eq!(week.week_start, monday);
    assert_eq!(week.week_end, NaiveDate::from_ymd_opt(2025, 9, 7).expect("valid date"));
    assert_eq!(week.days.len(), 7);

    assert_eq!(ids(&week.days[0].entries), vec!["mon_early", "mon_late"]);
    assert_eq!(ids(&week.days[2].entries), vec!["wed"]);
    assert!(week.days[1].entries.is_empty());

    for day in &week.days {
        for e in &day.entries {
            assert_eq!(e.day_of_week, chrono::Datelike::weekday(&day.date));
        }
    }
}
