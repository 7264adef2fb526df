//! StudyHelper core: the in-process utility layer between the REST client
//! and the presentation layer of the student planner. Schedule preference
//! filtering, semester timeline projection, and debounced note autosave.

pub mod error;
pub mod models;
pub mod notes;
pub mod prefs;
pub mod schedule;
pub mod timeline;
