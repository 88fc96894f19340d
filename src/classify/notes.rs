//! Heuristic notes raised on a draft.
//!
//! Each rule is an independent predicate over the draft's text, categories and
//! title. The citation rule is the only one that can produce more than one
//! kind of note, and it is modelled as a [`CitationStatus`] so that `no-inline`
//! and `unsourced` can never both be raised.

use std::collections::BTreeSet;

use regex::Regex;

use crate::domain::{Document, Note, Settings};

/// How a draft supports its claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CitationStatus {
    /// The draft has at least one `<ref>...</ref>` span.
    Inline,
    /// No inline citations, but at least one link off the wiki.
    ExternalLinksOnly,
    /// Neither inline citations nor external links.
    Unsourced,
}

impl CitationStatus {
    /// The note raised for this status, if any.
    #[must_use]
    pub const fn note(self) -> Option<Note> {
        match self {
            Self::Inline => None,
            Self::ExternalLinksOnly => Some(Note::NoInline),
            Self::Unsourced => Some(Note::Unsourced),
        }
    }
}

/// Applies the note rules to drafts.
///
/// The classifier is immutable once built and can be shared between threads.
#[derive(Debug, Clone)]
pub struct NoteClassifier {
    short_threshold: usize,
    very_old_marker: String,
    userspace_prefix: String,
    host_domain: String,
    copyvio: Regex,
    inline_citation: Regex,
    external_link: Regex,
    declined: Regex,
}

impl NoteClassifier {
    /// Builds a classifier from the run settings.
    ///
    /// # Panics
    ///
    /// Panics if one of the built-in patterns fails to compile, which would be
    /// a bug in this crate.
    #[must_use]
    pub fn new(settings: &Settings) -> Self {
        Self {
            short_threshold: settings.short_threshold,
            very_old_marker: settings.very_old_marker.clone(),
            userspace_prefix: settings.userspace_prefix.clone(),
            host_domain: settings.host_domain.clone(),
            copyvio: Regex::new(r"\{\{\s*AfC suspected copyvio").expect("this must never fail"),
            inline_citation: Regex::new(r"(?is)<ref(?:\s[^>]*)?>.*?</ref\s*>")
                .expect("this must never fail"),
            external_link: Regex::new(r#"(?i)(?:https?:|\[)//([^\s\[\]/|<>{}?#'"()]+)"#)
                .expect("this must never fail"),
            declined: Regex::new(r"(?i)\{\{AfC submission\|d\|").expect("this must never fail"),
        }
    }

    /// Returns the notes raised for a document.
    #[must_use]
    pub fn classify(&self, document: &Document) -> BTreeSet<Note> {
        let text = document.text.as_str();
        let mut notes = BTreeSet::new();

        if self.copyvio.is_match(text) {
            notes.insert(Note::Copyvio);
        }

        if let Some(note) = self.citation_status(text).note() {
            notes.insert(note);
        }

        if text.len() < self.short_threshold {
            notes.insert(Note::Short);
        }

        if self.declined.is_match(text) {
            notes.insert(Note::Resubmit);
        }

        if document
            .categories
            .iter()
            .any(|category| category.ends_with(&self.very_old_marker))
        {
            notes.insert(Note::Veryold);
        }

        if document.title.starts_with(&self.userspace_prefix) {
            notes.insert(Note::Userspace);
        }

        tracing::trace!(title = %document.title, ?notes, "Classified notes");
        notes
    }

    /// Decides how the text supports its claims.
    #[must_use]
    pub fn citation_status(&self, text: &str) -> CitationStatus {
        if self.inline_citation.is_match(text) {
            CitationStatus::Inline
        } else if self.has_external_link(text) {
            CitationStatus::ExternalLinksOnly
        } else {
            CitationStatus::Unsourced
        }
    }

    fn has_external_link(&self, text: &str) -> bool {
        self.external_link
            .captures_iter(text)
            .filter_map(|captures| captures.get(1))
            .map(|host| strip_port(host.as_str().trim_end_matches(['.', ',', ';', ':'])))
            .any(|host| !host.eq_ignore_ascii_case(&self.host_domain))
    }
}

fn strip_port(authority: &str) -> &str {
    let host = authority.rsplit('@').next().unwrap_or(authority);
    host.split(':').next().unwrap_or(host)
}
