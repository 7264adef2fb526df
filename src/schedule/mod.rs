//! Pure filtering and grouping over schedule entries.
//!
//! Every function here is synchronous, never mutates its input and
//! preserves the input ordering of surviving entries.

use chrono::{Datelike, Days, NaiveDate, NaiveTime, Weekday};

use crate::models::{DaySchedule, ScheduleEntry, WeekParity, WeekSchedule};
use crate::prefs::SchedulePreferences;

/// Subjects matching any of these (case-insensitively) are treated as
/// elective-sport lessons, where students follow one instructor of choice.
const ELECTIVE_SPORT_KEYWORDS: &[&str] = &["physical education", "elective sport"];

/// Keeps general entries (no subgroup) and entries of the user's subgroup.
/// No preference means no filtering.
pub fn filter_by_subgroup(entries: &[ScheduleEntry], subgroup: Option<u8>) -> Vec<ScheduleEntry> {
    let Some(subgroup) = subgroup else {
        return entries.to_vec();
    };

    entries
        .iter()
        .filter(|entry| entry.is_general() || entry.subgroup == Some(subgroup))
        .cloned()
        .collect()
}

/// Finds a lesson at the same day and start time that belongs to a
/// *different* explicit subgroup than the user's, signalling "another
/// section meets at this time". Without a subgroup preference there is
/// nothing meaningful to find.
pub fn find_alternate_entry<'a>(
    all_entries: &'a [ScheduleEntry],
    day: Weekday,
    slot_start: NaiveTime,
    subgroup: Option<u8>,
) -> Option<&'a ScheduleEntry> {
    let subgroup = subgroup?;

    all_entries.iter().find(|entry| {
        entry.day_of_week == day
            && entry.start_time == slot_start
            && entry.subgroup.is_some_and(|s| s != subgroup)
    })
}

pub fn is_elective_sport_entry(entry: &ScheduleEntry) -> bool {
    let subject = entry.subject.to_lowercase();
    ELECTIVE_SPORT_KEYWORDS
        .iter()
        .any(|keyword| subject.contains(keyword))
}

/// Keeps only the preferred instructor's elective-sport lessons; everything
/// that is not an elective-sport lesson passes through untouched. No
/// preference means no filtering.
pub fn filter_by_instructor_preference(
    entries: &[ScheduleEntry],
    preferred: Option<&str>,
) -> Vec<ScheduleEntry> {
    let Some(preferred) = preferred else {
        return entries.to_vec();
    };

    entries
        .iter()
        .filter(|entry| {
            !is_elective_sport_entry(entry) || entry.teacher.as_deref() == Some(preferred)
        })
        .cloned()
        .collect()
}

/// Sorted, deduplicated instructor names drawn from elective-sport entries.
/// Used to populate the instructor selection control.
pub fn available_instructors(entries: &[ScheduleEntry]) -> Vec<String> {
    let mut names: Vec<String> = entries
        .iter()
        .filter(|entry| is_elective_sport_entry(entry))
        .filter_map(|entry| entry.teacher.clone())
        .collect();
    names.sort();
    names.dedup();
    names
}

/// Applies both user preferences: instructor first, then subgroup.
pub fn apply_preferences(
    entries: &[ScheduleEntry],
    prefs: &SchedulePreferences,
) -> Vec<ScheduleEntry> {
    let by_instructor =
        filter_by_instructor_preference(entries, prefs.elective_sport_instructor.as_deref());
    filter_by_subgroup(&by_instructor, prefs.subgroup)
}

/// Collects the entries falling on `date`'s weekday, sorted by start time.
/// The sort is stable, so entries sharing a start time keep their input order.
pub fn group_day(entries: &[ScheduleEntry], date: NaiveDate) -> DaySchedule {
    let mut day_entries: Vec<ScheduleEntry> = entries
        .iter()
        .filter(|entry| entry.day_of_week == date.weekday())
        .cloned()
        .collect();
    day_entries.sort_by_key(|entry| entry.start_time);

    DaySchedule {
        date,
        entries: day_entries,
    }
}

/// Buckets a flat entry list into the seven days of the week starting at
/// `week_start` (expected to be a Monday).
pub fn group_week(
    entries: &[ScheduleEntry],
    week_start: NaiveDate,
    parity: WeekParity,
) -> WeekSchedule {
    let days = (0..7)
        .map(|offset| group_day(entries, week_start + Days::new(offset)))
        .collect();

    WeekSchedule {
        week_start,
        week_end: week_start + Days::new(6),
        parity,
        days,
    }
}
