//! Debounced autosave for the note editor.
//!
//! One controller per editing session (one note target, one mounted
//! widget). Keystrokes update the text immediately; the actual network
//! write happens once the input has been quiet for the debounce interval.
//! A newer edit aborts both the pending timer and any in-flight request,
//! so at most one write is ever in flight and a slow stale response can
//! never overwrite the state of a newer save.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::AppError;
use crate::models::{NoteTarget, UpdateNoteRequest, MAX_NOTE_LEN};
use crate::notes::NoteService;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveState {
    Idle,
    Saving,
    Saved,
    Error,
}

#[derive(Debug)]
struct Session {
    text: String,
    save_state: SaveState,
    note_id: Option<String>,
    /// Bumped on every edit. A save task only applies its outcome while
    /// its epoch is still current, so an aborted-but-racing task cannot
    /// clobber the state of a newer one.
    epoch: u64,
}

pub struct AutosaveController {
    service: Arc<dyn NoteService>,
    target: NoteTarget,
    debounce: Duration,
    session: Arc<Mutex<Session>>,
    pending: Option<JoinHandle<()>>,
}

impl AutosaveController {
    pub fn new(service: Arc<dyn NoteService>, target: NoteTarget) -> Self {
        Self::with_debounce(service, target, DEFAULT_DEBOUNCE)
    }

    pub fn with_debounce(
        service: Arc<dyn NoteService>,
        target: NoteTarget,
        debounce: Duration,
    ) -> Self {
        Self {
            service,
            target,
            debounce,
            session: Arc::new(Mutex::new(Session {
                text: String::new(),
                save_state: SaveState::Idle,
                note_id: None,
                epoch: 0,
            })),
            pending: None,
        }
    }

    /// Picks up editing of a note that already exists on the server, so
    /// the first save is an update rather than a create.
    pub fn resume(
        service: Arc<dyn NoteService>,
        target: NoteTarget,
        note_id: String,
        text: String,
        debounce: Duration,
    ) -> Self {
        let controller = Self::with_debounce(service, target, debounce);
        {
            let mut session = lock(&controller.session);
            session.note_id = Some(note_id);
            session.text = text;
        }
        controller
    }

    /// Accepts a keystroke. Text longer than [`MAX_NOTE_LEN`] characters
    /// is rejected outright and the session is left untouched.
    pub fn on_text_change(&mut self, text: &str) -> Result<(), AppError> {
        let len = text.chars().count();
        if len > MAX_NOTE_LEN {
            return Err(AppError::NoteTooLong {
                len,
                max: MAX_NOTE_LEN,
            });
        }

        let epoch = {
            let mut session = lock(&self.session);
            session.text = text.to_string();
            session.save_state = SaveState::Idle;
            session.epoch += 1;
            session.epoch
        };

        self.cancel_pending();
        self.pending = Some(tokio::spawn(save_after_debounce(
            self.service.clone(),
            self.target.clone(),
            self.session.clone(),
            self.debounce,
            epoch,
        )));

        Ok(())
    }

    pub fn text(&self) -> String {
        lock(&self.session).text.clone()
    }

    pub fn save_state(&self) -> SaveState {
        lock(&self.session).save_state
    }

    pub fn note_id(&self) -> Option<String> {
        lock(&self.session).note_id.clone()
    }

    /// Cancels the pending timer and any in-flight request. Called on
    /// widget teardown; also runs on drop.
    pub fn shutdown(&mut self) {
        self.cancel_pending();
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
    }
}

impl Drop for AutosaveController {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

fn lock(session: &Mutex<Session>) -> MutexGuard<'_, Session> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

async fn save_after_debounce(
    service: Arc<dyn NoteService>,
    target: NoteTarget,
    session: Arc<Mutex<Session>>,
    debounce: Duration,
    epoch: u64,
) {
    tokio::time::sleep(debounce).await;

    let (text, note_id) = {
        let mut guard = lock(&session);
        if guard.epoch != epoch {
            return;
        }
        // Whitespace-only content is never written out.
        if guard.text.trim().is_empty() {
            return;
        }
        guard.save_state = SaveState::Saving;
        (guard.text.clone(), guard.note_id.clone())
    };

    let result = match &note_id {
        Some(id) => {
            service
                .update_note(id, &UpdateNoteRequest { text: text.clone() })
                .await
        }
        None => service.create_note(&target.new_request(text)).await,
    };

    let mut guard = lock(&session);
    if guard.epoch != epoch {
        // Superseded while the request was in flight; the newer edit's
        // task owns the session now.
        return;
    }
    match result {
        Ok(note) => {
            debug!("note {} saved", note.id);
            guard.save_state = SaveState::Saved;
            if guard.note_id.is_none() {
                guard.note_id = Some(note.id);
            }
        }
        Err(err) => {
            warn!("autosave failed: {}", err);
            guard.save_state = SaveState::Error;
        }
    }
}
