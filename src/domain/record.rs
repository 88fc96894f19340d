use std::collections::BTreeSet;

use serde::Serialize;

use crate::domain::{Note, TagShortcut};

/// The classification result for a single draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassificationRecord {
    /// Title of the classified draft.
    pub title: String,

    /// Notes raised by the classifier, in evaluation order.
    pub notes: BTreeSet<Note>,

    /// Associated project shortcuts, deduplicated in first-seen order.
    pub tags: Vec<TagShortcut>,

    /// HTML description of the associated projects.
    pub description: String,
}

impl ClassificationRecord {
    /// Returns the notes as a comma-separated list of identifiers.
    #[must_use]
    pub fn notes_list(&self) -> String {
        self.notes
            .iter()
            .map(|note| note.id())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Returns the tags as a space-separated list.
    #[must_use]
    pub fn tags_list(&self) -> String {
        self.tags
            .iter()
            .map(TagShortcut::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}
