//! HTML report rendering.
//!
//! The report is a single page with one row per classified draft and filter
//! controls for notes and projects. Rendering uses a Handlebars template; the
//! built-in template can be replaced with `--template`.

use std::{fs, io, path::Path};

use chrono::{DateTime, Utc};
use handlebars::Handlebars;
use serde::Serialize;

use crate::{
    classify::{Classification, LookupTables},
    domain::{ClassificationRecord, Note},
};

/// The built-in report template.
pub const DEFAULT_TEMPLATE: &str = include_str!("../../templates/report.html.hbs");

/// Filter matching drafts with no associated projects.
const NO_PROJECTS_FILTER: Filter = Filter {
    id: "no-projs",
    description: "No associated projects",
};

/// A classified run ready to be rendered.
#[derive(Debug)]
pub struct Report<'a> {
    classification: &'a Classification,
    tables: &'a LookupTables,
    generated: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
struct Context<'a> {
    asof: String,
    count: usize,
    filters: Vec<Filter>,
    projects: Vec<ProjectOption<'a>>,
    subs: Vec<Row<'a>>,
}

#[derive(Debug, Clone, Copy, Serialize)]
struct Filter {
    id: &'static str,
    description: &'static str,
}

#[derive(Debug, Serialize)]
struct ProjectOption<'a> {
    shortcut: &'a str,
    name: &'a str,
}

#[derive(Debug, Serialize)]
struct Row<'a> {
    title: &'a str,
    url_title: String,
    anchor_id: String,
    notes: String,
    tags: String,
    description: &'a str,
}

impl<'a> Row<'a> {
    fn new(record: &'a ClassificationRecord) -> Self {
        Self {
            title: &record.title,
            url_title: url_title(&record.title),
            anchor_id: anchor_id(&record.title),
            notes: record.notes_list(),
            tags: record.tags_list(),
            description: &record.description,
        }
    }
}

/// Errors that can occur when producing the report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// The template could not be parsed or rendered.
    #[error("failed to render report: {0}")]
    Render(#[from] handlebars::RenderError),
    /// The template or the output file could not be accessed.
    #[error("failed to access report file: {0}")]
    Io(#[from] io::Error),
}

impl<'a> Report<'a> {
    /// Prepares a report for the given run, stamped with the current time.
    #[must_use]
    pub fn new(classification: &'a Classification, tables: &'a LookupTables) -> Self {
        Self::generated_at(classification, tables, Utc::now())
    }

    /// Prepares a report with an explicit generation time.
    #[must_use]
    pub const fn generated_at(
        classification: &'a Classification,
        tables: &'a LookupTables,
        generated: DateTime<Utc>,
    ) -> Self {
        Self {
            classification,
            tables,
            generated,
        }
    }

    fn context(&self) -> Context<'_> {
        let filters = Note::ALL
            .into_iter()
            .map(|note| Filter {
                id: note.id(),
                description: note.description(),
            })
            .chain(std::iter::once(NO_PROJECTS_FILTER))
            .collect();

        let projects = self
            .classification
            .projects_seen(self.tables)
            .map(|(shortcut, name)| ProjectOption {
                shortcut: shortcut.as_str(),
                name,
            })
            .collect();

        Context {
            asof: self
                .generated
                .format("Generated at %H:%M, %d %B %Y (UTC).")
                .to_string(),
            count: self.classification.records.len(),
            filters,
            projects,
            subs: self.classification.records.iter().map(Row::new).collect(),
        }
    }

    /// Renders the report with the given template.
    ///
    /// # Errors
    ///
    /// Returns an error if the template is invalid or cannot be rendered.
    pub fn render(&self, template: &str) -> Result<String, ReportError> {
        let handlebars = Handlebars::new();
        Ok(handlebars.render_template(template, &self.context())?)
    }

    /// Renders the report and writes it to `path`.
    ///
    /// The report is rendered in full and written next to `path` before being
    /// moved into place, so a failed run leaves any previous report intact.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails or the file cannot be written.
    pub fn write(&self, path: &Path, template: &str) -> Result<(), ReportError> {
        let html = self.render(template)?;

        let file_name = path.file_name().map_or_else(
            || "report.html".to_string(),
            |name| name.to_string_lossy().into_owned(),
        );
        let staging = path.with_file_name(format!(".{file_name}.tmp"));

        fs::write(&staging, html)?;
        fs::rename(&staging, path)?;

        tracing::info!("Wrote report to {}", path.display());
        Ok(())
    }
}

/// The title as it appears in a wiki URL. Namespace and subpage separators
/// stay readable; everything else outside the unreserved set is
/// percent-encoded.
fn url_title(title: &str) -> String {
    urlencoding::encode(&title.replace(' ', "_"))
        .replace("%3A", ":")
        .replace("%2F", "/")
}

/// An HTML id derived from the title.
fn anchor_id(title: &str) -> String {
    title.replace([' ', '\'', '+'], "-")
}
