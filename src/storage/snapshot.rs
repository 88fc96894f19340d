//! A snapshot of the pending drafts and the configuration page.
//!
//! Fetching from the wiki happens elsewhere. This crate reads what was
//! fetched from a JSON file of the form:
//!
//! ```json
//! {
//!   "config": { "last_editor": "Maintainer", "text": "Infobox software|COMP\n----\n..." },
//!   "documents": [
//!     { "title": "Draft:Foo", "text": "...", "categories": ["..."], "talk": { "text": "..." } }
//!   ]
//! }
//! ```

use std::{
    fs::File,
    io::{self, BufReader, Read},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::{
    classify::{LookupTables, TablesError},
    domain::{Document, Settings},
};

/// The configuration page as fetched from the wiki.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigPage {
    /// The account that last edited the page.
    pub last_editor: String,
    /// Raw text of the page.
    pub text: String,
}

/// Everything the classifier needs for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// The configuration page.
    pub config: ConfigPage,
    /// Every document in the pending category.
    #[serde(default)]
    pub documents: Vec<Document>,
}

impl Snapshot {
    /// Reads a snapshot from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or is not a valid
    /// snapshot.
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let file = File::open(path).map_err(|io_error| match io_error.kind() {
            io::ErrorKind::NotFound => SnapshotError::NotFound,
            _ => SnapshotError::Io(io_error),
        })?;
        Self::read(BufReader::new(file))
    }

    /// Reads a snapshot from any reader.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not a valid snapshot.
    pub fn read<R: Read>(reader: R) -> Result<Self, SnapshotError> {
        let snapshot: Self = serde_json::from_reader(reader)?;
        tracing::debug!(
            documents = snapshot.documents.len(),
            "Loaded snapshot"
        );
        Ok(snapshot)
    }

    /// Builds the lookup tables from the snapshot's configuration page.
    ///
    /// # Errors
    ///
    /// See [`LookupTables::parse`].
    pub fn tables(&self, settings: &Settings) -> Result<LookupTables, TablesError> {
        LookupTables::parse(&self.config.last_editor, &self.config.text, settings)
    }
}

/// Errors that can occur when loading a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    /// The snapshot file was not found.
    #[error("snapshot file not found")]
    NotFound,
    /// An I/O error occurred.
    #[error("failed to read snapshot: {0}")]
    Io(#[from] io::Error),
    /// The content is not a valid snapshot.
    #[error("failed to parse snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const SNAPSHOT: &str = r#"{
        "config": {
            "last_editor": "PendingSubsMaintainer",
            "text": "Infobox software|COMP\n----\nWikiProject Computing|COMP\n"
        },
        "documents": [
            { "title": "Draft:Foo", "text": "{{Infobox software\n}}" },
            {
                "title": "Draft:Bar",
                "text": "Bar",
                "redirect": true,
                "categories": ["Category:AfC pending submissions by age/Very old"],
                "talk": { "text": "{{WikiProject Computing}}" }
            }
        ]
    }"#;

    #[test]
    fn reads_documents_and_config() {
        let snapshot = Snapshot::read(SNAPSHOT.as_bytes()).unwrap();

        assert_eq!(snapshot.config.last_editor, "PendingSubsMaintainer");
        assert_eq!(snapshot.documents.len(), 2);
        assert!(snapshot.documents[1].redirect);
        assert_eq!(
            snapshot.documents[1].banner_source(),
            Some("{{WikiProject Computing}}")
        );

        let tables = snapshot.tables(&Settings::default()).unwrap();
        assert_eq!(tables.project_count(), 1);
    }

    #[test]
    fn load_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SNAPSHOT.as_bytes()).unwrap();

        let snapshot = Snapshot::load(file.path()).unwrap();
        assert_eq!(snapshot.documents[0].title, "Draft:Foo");
    }

    #[test]
    fn load_missing_file_returns_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let error = Snapshot::load(&tmp.path().join("missing.json")).unwrap_err();
        assert!(matches!(error, SnapshotError::NotFound));
    }

    #[test]
    fn missing_config_is_rejected() {
        let error = Snapshot::read(r#"{"documents": []}"#.as_bytes()).unwrap_err();
        assert!(matches!(error, SnapshotError::Json(_)));
    }

    #[test]
    fn untrusted_config_editor_is_rejected() {
        let snapshot = Snapshot::read(SNAPSHOT.as_bytes()).unwrap();
        let settings = Settings {
            trusted_editor: "Someone else".to_string(),
            ..Settings::default()
        };

        assert!(matches!(
            snapshot.tables(&settings),
            Err(TablesError::Stale(_))
        ));
    }
}
