use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Semester {
    pub number: u8,
    /// e.g. "2025/2026"
    pub academic_years: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl Semester {
    /// The semester's date range, when it is usable for projection.
    /// `None` when either date is missing or the range is inverted.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) if start <= end => Some((start, end)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeadlineStatus {
    NotStarted,
    InProgress,
    Completed,
    Submitted,
    Graded,
}

impl DeadlineStatus {
    /// Finalized work never counts as overdue, whatever its date.
    pub fn is_finalized(self) -> bool {
        matches!(self, Self::Completed | Self::Submitted | Self::Graded)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineDeadline {
    pub id: String,
    pub title: String,
    pub subject: String,
    pub due_at: DateTime<Utc>,
    pub status: DeadlineStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineExam {
    pub id: String,
    pub subject: String,
    pub held_at: DateTime<Utc>,
    pub room: Option<String>,
}
