//! Runs the note and project classifiers over a set of drafts.

use std::{
    collections::BTreeSet,
    sync::atomic::{AtomicUsize, Ordering},
};

use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use tracing::instrument;

use crate::{
    classify::{LookupTables, NoteClassifier, ProjectAssociator},
    domain::{ClassificationRecord, Document, Settings, TagShortcut},
};

/// The outcome of classifying a set of drafts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// One record per candidate draft, sorted by title.
    pub records: Vec<ClassificationRecord>,

    /// Every shortcut that appears in at least one record.
    pub tags_seen: BTreeSet<TagShortcut>,

    /// The number of documents that were not candidates.
    pub skipped: usize,
}

impl Classification {
    /// Pairs each shortcut seen during the run with its canonical name.
    ///
    /// Used to offer only relevant projects as report filters.
    pub fn projects_seen<'a>(
        &'a self,
        tables: &'a LookupTables,
    ) -> impl Iterator<Item = (&'a TagShortcut, &'a str)> {
        self.tags_seen.iter().map(|shortcut| {
            let name = tables
                .name_of(shortcut)
                .unwrap_or_else(|| shortcut.as_str());
            (shortcut, name)
        })
    }
}

/// Classifies drafts against a fixed set of lookup tables.
#[derive(Debug)]
pub struct Pipeline<'a> {
    settings: &'a Settings,
    tables: &'a LookupTables,
    notes: NoteClassifier,
    projects: ProjectAssociator,
}

impl<'a> Pipeline<'a> {
    /// Creates a pipeline for one run.
    #[must_use]
    pub fn new(settings: &'a Settings, tables: &'a LookupTables) -> Self {
        Self {
            settings,
            tables,
            notes: NoteClassifier::new(settings),
            projects: ProjectAssociator::new(),
        }
    }

    /// Whether a document should be classified at all.
    ///
    /// Redirects and disallowed titles are excluded.
    #[must_use]
    pub fn is_candidate(&self, document: &Document) -> bool {
        !document.redirect && !self.settings.is_disallowed(&document.title)
    }

    /// Classifies a single document.
    #[must_use]
    pub fn classify(&self, document: &Document) -> ClassificationRecord {
        let notes = self.notes.classify(document);
        let association = self.projects.associate(document, self.tables);

        tracing::debug!(
            title = %document.title,
            notes = notes.len(),
            tags = association.tags.len(),
            "Classified document"
        );

        ClassificationRecord {
            title: document.title.clone(),
            notes,
            tags: association.tags,
            description: association.description,
        }
    }

    /// Classifies every candidate document.
    ///
    /// Documents are processed in parallel. The resulting records are sorted
    /// by title, so the output does not depend on scheduling.
    #[must_use]
    #[instrument(level = "debug", skip_all, fields(documents = documents.len()))]
    pub fn run(&self, documents: &[Document]) -> Classification {
        let processed = AtomicUsize::new(0);
        let interval = self.settings.progress_interval;

        let mut records: Vec<ClassificationRecord> = documents
            .par_iter()
            .filter(|document| self.is_candidate(document))
            .map(|document| {
                let record = self.classify(document);
                let count = processed.fetch_add(1, Ordering::Relaxed) + 1;
                if interval > 0 && count % interval == 0 {
                    tracing::info!("Processed {count} documents");
                }
                record
            })
            .collect();

        records.sort_by(|a, b| a.title.cmp(&b.title));

        let tags_seen = records
            .iter()
            .flat_map(|record| record.tags.iter().cloned())
            .collect();

        let skipped = documents.len() - records.len();
        tracing::info!(
            classified = records.len(),
            skipped,
            "Finished classifying documents"
        );

        Classification {
            records,
            tags_seen,
            skipped,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Note, TalkPage};

    const EDITOR: &str = "Maintainer";

    fn settings() -> Settings {
        Settings {
            trusted_editor: EDITOR.to_string(),
            ..Settings::default()
        }
    }

    fn tables(settings: &Settings) -> LookupTables {
        LookupTables::parse(
            EDITOR,
            "Infobox software|COMP\n----\nWikiProject Computing|COMP\nWikiProject Biography|BIO\n",
            settings,
        )
        .unwrap()
    }

    #[test]
    fn infobox_draft_end_to_end() {
        let settings = settings();
        let tables = tables(&settings);
        let pipeline = Pipeline::new(&settings, &tables);

        let doc = Document::new(
            "Draft:Example",
            "{{Infobox software\n| name = Example\n}}\nExample is a program.",
        );
        let record = pipeline.classify(&doc);

        assert_eq!(record.title, "Draft:Example");
        assert_eq!(record.tags, [TagShortcut::try_from("COMP").unwrap()]);
        assert_eq!(
            record.notes.iter().copied().collect::<Vec<_>>(),
            [Note::Unsourced, Note::Short]
        );
        assert_eq!(
            record.description,
            "<abbr title=\"WikiProject Computing\">COMP</abbr>"
        );
    }

    #[test]
    fn userspace_draft_end_to_end() {
        let settings = settings();
        let tables = tables(&settings);
        let pipeline = Pipeline::new(&settings, &tables);

        let record = pipeline.classify(&Document::new("User:Someone/Draft", "Hello"));
        assert!(record.notes.contains(&Note::Userspace));
    }

    #[test]
    fn very_old_draft_end_to_end() {
        let settings = settings();
        let tables = tables(&settings);
        let pipeline = Pipeline::new(&settings, &tables);

        let doc = Document::new("Draft:Ancient", "Hello")
            .with_category("Category:AfC pending submissions by age/Very old");
        let record = pipeline.classify(&doc);
        assert!(record.notes.contains(&Note::Veryold));
    }

    #[test]
    fn run_skips_redirects_and_disallowed_titles() {
        let settings = settings();
        let tables = tables(&settings);
        let pipeline = Pipeline::new(&settings, &tables);

        let mut redirect = Document::new("Draft:Moved", "#REDIRECT [[Foo]]");
        redirect.redirect = true;
        let documents = vec![
            Document::new("Draft:Kept", "Hello"),
            redirect,
            Document::new("Wikipedia:Files for upload", "Requests"),
        ];

        let classification = pipeline.run(&documents);

        let titles: Vec<_> = classification
            .records
            .iter()
            .map(|record| record.title.as_str())
            .collect();
        assert_eq!(titles, ["Draft:Kept"]);
        assert_eq!(classification.skipped, 2);
    }

    #[test]
    fn run_sorts_records_and_collects_seen_tags() {
        let settings = Settings {
            progress_interval: 2,
            ..settings()
        };
        let tables = tables(&settings);
        let pipeline = Pipeline::new(&settings, &tables);

        let documents = vec![
            Document::new("Draft:Zeta", "{{Infobox software\n}}"),
            Document {
                talk: Some(TalkPage {
                    text: "{{WikiProject Computing}}".to_string(),
                    redirect: false,
                }),
                ..Document::new("Draft:Alpha", "Hello")
            },
            Document::new("Draft:Mu", "No projects"),
        ];

        let classification = pipeline.run(&documents);

        let titles: Vec<_> = classification
            .records
            .iter()
            .map(|record| record.title.as_str())
            .collect();
        assert_eq!(titles, ["Draft:Alpha", "Draft:Mu", "Draft:Zeta"]);

        let seen: Vec<_> = classification
            .projects_seen(&tables)
            .map(|(shortcut, name)| (shortcut.to_string(), name))
            .collect();
        assert_eq!(seen, [("COMP".to_string(), "WikiProject Computing")]);
    }

    #[test]
    fn empty_run_is_empty() {
        let settings = settings();
        let tables = tables(&settings);
        let classification = Pipeline::new(&settings, &tables).run(&[]);

        assert_eq!(classification, Classification::default());
    }
}
