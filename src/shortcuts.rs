//! Shortcut add/edit form workflow
//!
//! One form instance moves Closed → Adding → Closed or
//! Closed → Editing(index) → Closed. Submission validates at this boundary;
//! the entry type itself never enforces non-empty fields.

use thiserror::Error;

use crate::constants::shortcuts::FALLBACK_ICON;
use crate::state::ShortcutEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Closed,
    Adding,
    /// Editing the entry at this position; submit replaces in place
    Editing(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Title cannot be empty")]
    EmptyTitle,
    #[error("URL cannot be empty")]
    EmptyUrl,
}

/// Edit buffers plus the current mode. Lives in the settings panel state.
pub struct ShortcutForm {
    pub mode: FormMode,
    pub title: String,
    pub url: String,
    pub icon: String,
    /// Validation message shown next to the submit button
    pub error: Option<FormError>,
}

impl ShortcutForm {
    pub fn new() -> Self {
        Self {
            mode: FormMode::Closed,
            title: String::new(),
            url: String::new(),
            icon: String::new(),
            error: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.mode != FormMode::Closed
    }

    /// Open with empty fields to append a new entry
    pub fn open_add(&mut self) {
        self.mode = FormMode::Adding;
        self.title.clear();
        self.url.clear();
        self.icon.clear();
        self.error = None;
    }

    /// Open pre-filled to edit the entry at `index`
    pub fn open_edit(&mut self, index: usize, entry: &ShortcutEntry) {
        self.mode = FormMode::Editing(index);
        self.title = entry.title.clone();
        self.url = entry.url.clone();
        self.icon = entry.icon.clone();
        self.error = None;
    }

    /// Discard the buffers and close without touching state
    pub fn cancel(&mut self) {
        self.mode = FormMode::Closed;
        self.error = None;
    }

    /// Validate and apply the form to the shortcut list. On success the form
    /// closes and the caller must persist; on failure the form stays open
    /// with a visible error and the list is untouched.
    pub fn submit(&mut self, shortcuts: &mut Vec<ShortcutEntry>) -> bool {
        let entry = match self.validated_entry() {
            Ok(entry) => entry,
            Err(err) => {
                self.error = Some(err);
                return false;
            }
        };

        match self.mode {
            FormMode::Editing(index) if index < shortcuts.len() => {
                shortcuts[index] = entry;
            }
            // Adding, or a stale edit index after an external delete
            _ => shortcuts.push(entry),
        }

        self.mode = FormMode::Closed;
        self.error = None;
        true
    }

    fn validated_entry(&self) -> Result<ShortcutEntry, FormError> {
        let title = self.title.trim();
        let url = self.url.trim();
        if title.is_empty() {
            return Err(FormError::EmptyTitle);
        }
        if url.is_empty() {
            return Err(FormError::EmptyUrl);
        }

        let icon = self.icon.trim();
        Ok(ShortcutEntry {
            title: title.to_string(),
            url: url.to_string(),
            icon: if icon.is_empty() {
                FALLBACK_ICON.to_string()
            } else {
                icon.to_string()
            },
        })
    }
}

impl Default for ShortcutForm {
    fn default() -> Self {
        Self::new()
    }
}
