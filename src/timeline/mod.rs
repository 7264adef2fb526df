//! Projection of calendar dates onto a semester progress bar.
//!
//! Malformed ranges are an expected input (semester dates are user-entered
//! on the backend), so every function degrades to a well-defined output
//! instead of failing: 0% positions and empty tick lists.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::Serialize;

use crate::models::{DeadlineStatus, Semester};

const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// One axis label on the timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthTick {
    pub label: &'static str,
    pub percent: f64,
}

/// Visual classification of a deadline marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerSeverity {
    /// Green: finalized, whatever the date.
    Completed,
    /// Yellow: being worked on.
    AtRisk,
    /// Red: past due and not finalized.
    Overdue,
    /// Gray: untouched and not yet due.
    Pending,
}

/// Projects `date` onto the closed interval [0, 100] within the range.
/// Degenerate ranges (`range_end <= range_start`) always map to 0.
pub fn project_position(date: NaiveDate, range_start: NaiveDate, range_end: NaiveDate) -> f64 {
    if range_end <= range_start {
        return 0.0;
    }

    let span = (range_end - range_start).num_days() as f64;
    let offset = (date - range_start).num_days() as f64;
    (offset / span * 100.0).clamp(0.0, 100.0)
}

/// Axis labels for every month boundary within the range. A `range_start`
/// on the 1st contributes its own month at position 0; otherwise the first
/// tick is the 1st of the following month. Empty for degenerate ranges.
pub fn month_tick_labels(range_start: NaiveDate, range_end: NaiveDate) -> Vec<MonthTick> {
    if range_end <= range_start {
        return Vec::new();
    }

    let mut ticks = Vec::new();
    let mut cursor = if range_start.day() == 1 {
        Some(range_start)
    } else {
        first_of_next_month(range_start)
    };

    while let Some(boundary) = cursor {
        if boundary > range_end {
            break;
        }
        ticks.push(MonthTick {
            label: MONTH_LABELS[boundary.month0() as usize],
            percent: project_position(boundary, range_start, range_end),
        });
        cursor = first_of_next_month(boundary);
    }

    ticks
}

fn first_of_next_month(date: NaiveDate) -> Option<NaiveDate> {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// How far along the range today (UTC) is: 0 before it starts, 100 after
/// it ends.
pub fn elapsed_progress(range_start: NaiveDate, range_end: NaiveDate) -> f64 {
    project_position(Utc::now().date_naive(), range_start, range_end)
}

pub fn semester_progress(semester: &Semester) -> f64 {
    match semester.date_range() {
        Some((start, end)) => elapsed_progress(start, end),
        None => 0.0,
    }
}

pub fn semester_month_ticks(semester: &Semester) -> Vec<MonthTick> {
    match semester.date_range() {
        Some((start, end)) => month_tick_labels(start, end),
        None => Vec::new(),
    }
}

pub fn deadline_marker_severity(due_at: DateTime<Utc>, status: DeadlineStatus) -> MarkerSeverity {
    deadline_marker_severity_at(due_at, status, Utc::now())
}

/// Severity rule: finalized always wins, then in-progress, then the date.
pub fn deadline_marker_severity_at(
    due_at: DateTime<Utc>,
    status: DeadlineStatus,
    now: DateTime<Utc>,
) -> MarkerSeverity {
    if status.is_finalized() {
        MarkerSeverity::Completed
    } else if status == DeadlineStatus::InProgress {
        MarkerSeverity::AtRisk
    } else if due_at < now {
        MarkerSeverity::Overdue
    } else {
        MarkerSeverity::Pending
    }
}
