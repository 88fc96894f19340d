//! Associates drafts with projects.
//!
//! Two independent sources are consulted:
//!
//! - project banners (`{{WikiProject Computing|...}}`) on the talk page, looked
//!   up by project name
//! - infoboxes (`{{Infobox software\n| ...}}`) in the draft itself, looked up
//!   in the infobox table
//!
//! Names the tables don't know are ignored. The tables are never complete.

use std::collections::BTreeSet;

use handlebars::html_escape;
use regex::Regex;

use crate::{
    classify::LookupTables,
    domain::{Document, TagShortcut},
};

/// The projects associated with a single draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Association {
    /// Shortcuts in first-seen order, banners before infoboxes, without
    /// duplicates.
    pub tags: Vec<TagShortcut>,

    /// HTML fragments describing each shortcut, joined by `, `.
    pub description: String,
}

/// Finds project banners and infoboxes in drafts.
#[derive(Debug, Clone)]
pub struct ProjectAssociator {
    banner: Regex,
    infobox: Regex,
}

impl Default for ProjectAssociator {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectAssociator {
    /// Compiles the banner and infobox patterns.
    ///
    /// # Panics
    ///
    /// Panics if one of the built-in patterns fails to compile, which would be
    /// a bug in this crate.
    #[must_use]
    pub fn new() -> Self {
        Self {
            // The name runs up to the first parameter, closing brace or line end.
            banner: Regex::new(r"(?i)\{\{\s*(wikiproject[ \t_][^|}\n]+)")
                .expect("this must never fail"),
            // The name must be followed directly by a line break or a parameter.
            infobox: Regex::new(r"(?i)\{\{\s*(infobox[ \t_][^|}\n]*)(?:\n|\|)")
                .expect("this must never fail"),
        }
    }

    /// Extracts the project names of every banner in `text`.
    pub fn banner_names<'t>(&self, text: &'t str) -> impl Iterator<Item = &'t str> {
        capture_names(&self.banner, text)
    }

    /// Extracts the infobox names of every infobox in `text`.
    pub fn infobox_names<'t>(&self, text: &'t str) -> impl Iterator<Item = &'t str> {
        capture_names(&self.infobox, text)
    }

    /// Associates a draft with the projects named by its talk page banners
    /// and its infoboxes.
    #[must_use]
    pub fn associate(&self, document: &Document, tables: &LookupTables) -> Association {
        let mut tags: Vec<TagShortcut> = Vec::new();

        if let Some(talk) = document.banner_source() {
            for name in self.banner_names(talk) {
                let Some(shortcut) = tables.shortcut_for_name(name) else {
                    tracing::trace!(title = %document.title, "Unknown banner '{name}'");
                    continue;
                };
                tags.push(shortcut.clone());
            }
        }

        for name in self.infobox_names(&document.text) {
            let Some(shortcuts) = tables.shortcuts_for_infobox(name) else {
                tracing::trace!(title = %document.title, "Unknown infobox '{name}'");
                continue;
            };
            tags.extend_from_slice(shortcuts);
        }

        let mut seen = BTreeSet::new();
        tags.retain(|shortcut| seen.insert(shortcut.clone()));

        let description = tags
            .iter()
            .map(|shortcut| describe(shortcut, tables.name_of(shortcut)))
            .collect::<Vec<_>>()
            .join(", ");

        Association { tags, description }
    }
}

fn capture_names<'t>(regex: &Regex, text: &'t str) -> impl Iterator<Item = &'t str> {
    regex
        .captures_iter(text)
        .filter_map(|captures| captures.get(1))
        .map(|name| name.as_str().trim())
}

fn describe(shortcut: &TagShortcut, name: Option<&str>) -> String {
    let shortcut = html_escape(shortcut.as_str());
    let Some(name) = name else {
        return shortcut;
    };
    format!("<abbr title=\"{}\">{shortcut}</abbr>", html_escape(name))
}
