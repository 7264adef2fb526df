pub mod note;
pub mod schedule;
pub mod timeline;

pub use note::{LessonNote, MAX_NOTE_LEN, NewNoteRequest, NoteTarget, UpdateNoteRequest};
pub use schedule::{DaySchedule, LessonType, ScheduleEntry, WeekParity, WeekSchedule};
pub use timeline::{DeadlineStatus, Semester, TimelineDeadline, TimelineExam};
