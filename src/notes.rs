//! Note management for one register entry.
//!
//! Predefined notes toggle membership independently. The "Other note" slot
//! is always the last row of the panel: entering it opens an inline edit
//! buffer whose lifecycle is a tiny state machine scoped to one entry, so
//! concurrent edits across entries are structurally impossible. A confirmed
//! custom note behaves like any other note afterwards, except that toggling
//! it off deletes it for good.

use crate::catalog::{self};
use crate::register::Entry;

/// Prefix of custom note ids; the suffix is the per-entry custom index.
pub const CUSTOM_NOTE_PREFIX: &str = "custom:";

/// True for `custom:{n}` ids.
pub fn is_custom_id(id: &str) -> bool {
    id.starts_with(CUSTOM_NOTE_PREFIX)
}

/// One row of the note panel for an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteRow {
    /// A predefined note from the catalog.
    Predefined(&'static str),
    /// A committed custom note (id, text).
    Custom(String, String),
    /// The trailing free-text slot.
    OtherSlot,
}

/// Rows shown for `entry`: available predefined notes, then committed
/// custom notes in id order, then the free-text slot.
pub fn note_rows(entry: &Entry) -> Vec<NoteRow> {
    let mut rows: Vec<NoteRow> = catalog::available_notes(entry.dish)
        .iter()
        .map(|def| NoteRow::Predefined(def.id))
        .collect();
    for (id, label) in &entry.notes {
        if is_custom_id(id) {
            rows.push(NoteRow::Custom(id.clone(), label.clone()));
        }
    }
    rows.push(NoteRow::OtherSlot);
    rows
}

/// Flip membership of one note row. Predefined notes re-attach freely; a
/// custom note is removed permanently and must be re-typed to return.
pub fn toggle_note(entry: &mut Entry, row: &NoteRow) {
    match row {
        NoteRow::Predefined(id) => {
            if entry.notes.remove(*id).is_none() {
                if let Some(def) = catalog::note(id) {
                    entry.notes.insert(def.id.to_string(), def.label.to_string());
                }
            }
        }
        NoteRow::Custom(id, _) => {
            entry.notes.remove(id);
        }
        NoteRow::OtherSlot => {}
    }
}

/// Whether a note row is currently attached to the entry.
pub fn is_selected(entry: &Entry, row: &NoteRow) -> bool {
    match row {
        NoteRow::Predefined(id) => entry.notes.contains_key(*id),
        NoteRow::Custom(..) => true,
        NoteRow::OtherSlot => false,
    }
}

/// Inline editor for the free-text slot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum NoteEditor {
    #[default]
    Idle,
    Editing(String),
}

impl NoteEditor {
    pub fn is_editing(&self) -> bool {
        matches!(self, NoteEditor::Editing(_))
    }

    pub fn buffer(&self) -> Option<&str> {
        match self {
            NoteEditor::Idle => None,
            NoteEditor::Editing(buf) => Some(buf),
        }
    }

    /// Start editing with an empty buffer.
    pub fn begin(&mut self) {
        *self = NoteEditor::Editing(String::new());
    }

    pub fn push_char(&mut self, c: char) {
        if let NoteEditor::Editing(buf) = self {
            buf.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let NoteEditor::Editing(buf) = self {
            buf.pop();
        }
    }

    /// Discard the buffer without touching the entry's notes.
    pub fn cancel(&mut self) {
        *self = NoteEditor::Idle;
    }

    /// Commit the buffer as a new `custom:{n}` note on `entry`, where `n`
    /// is the lowest index not currently in use there. An empty buffer
    /// commits nothing. Returns the new note id.
    pub fn confirm(&mut self, entry: &mut Entry) -> Option<String> {
        let NoteEditor::Editing(buf) = std::mem::take(self) else {
            return None;
        };
        if buf.is_empty() {
            return None;
        }
        let mut n = 0;
        let id = loop {
            let candidate = format!("{CUSTOM_NOTE_PREFIX}{n}");
            if !entry.notes.contains_key(&candidate) {
                break candidate;
            }
            n += 1;
        };
        entry.notes.insert(id.clone(), buf);
        Some(id)
    }
}
