//! Domain models for draft classification.
//!
//! This module contains the documents handed to the classifier, the notes and
//! project tags it produces, and the per-document records it emits.

mod document;
pub use document::{Document, TalkPage};

/// Document-level notes.
pub mod note;
pub use note::Note;

mod record;
pub use record::ClassificationRecord;

/// Project tag shortcuts and name normalization.
pub mod tag;
pub use tag::{InvalidShortcutError, TagShortcut, normalize_name};

mod settings;
pub use settings::{Settings, SettingsError};
