//! Pending draft classification
//!
//! Drafts awaiting review are tagged with notes (`short`, `unsourced`, ...)
//! and associated with projects, then rendered as a filterable report.

pub mod domain;
pub use domain::{ClassificationRecord, Document, Note, Settings, TagShortcut};

pub mod classify;
pub use classify::{Classification, LookupTables, Pipeline, StaleConfigError, TablesError};

/// Snapshot input and report output.
pub mod storage;
pub use storage::{Report, Snapshot};
