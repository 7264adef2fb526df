use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LessonType {
    Lecture,
    Practice,
    Lab,
    Seminar,
    Exam,
    Consultation,
    Other,
}

/// One scheduled lesson occurrence, as delivered by the backend.
/// Read-only on the client; never constructed or mutated locally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub id: String,
    pub day_of_week: Weekday,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub lesson_type: LessonType,
    pub subject: String,
    pub subject_id: Option<String>,
    pub teacher: Option<String>,
    pub room: Option<String>,
    /// `None` means the lesson applies to all subgroups.
    pub subgroup: Option<u8>,
    pub note: Option<String>,
}

impl ScheduleEntry {
    pub fn is_valid(&self) -> bool {
        self.start_time < self.end_time
    }

    /// A general entry is one with no explicit subgroup.
    pub fn is_general(&self) -> bool {
        self.subgroup.is_none()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaySchedule {
    pub date: NaiveDate,
    pub entries: Vec<ScheduleEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeekParity {
    Odd,
    Even,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekSchedule {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub parity: WeekParity,
    pub days: Vec<DaySchedule>,
}
