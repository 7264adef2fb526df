use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum note length accepted by the backend, in characters.
pub const MAX_NOTE_LEN: usize = 2000;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonNote {
    pub id: String,
    pub text: String,
    pub entry_id: Option<String>,
    pub subject: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewNoteRequest {
    pub text: String,
    pub entry_id: Option<String>,
    pub subject: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateNoteRequest {
    pub text: String,
}

/// What a note is attached to: a concrete schedule entry or a subject name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteTarget {
    Entry(String),
    Subject(String),
}

impl NoteTarget {
    pub fn new_request(&self, text: String) -> NewNoteRequest {
        match self {
            Self::Entry(id) => NewNoteRequest {
                text,
                entry_id: Some(id.clone()),
                subject: None,
            },
            Self::Subject(name) => NewNoteRequest {
                text,
                entry_id: None,
                subject: Some(name.clone()),
            },
        }
    }
}
