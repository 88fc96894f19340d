//! Draft classification.
//!
//! The [`LookupTables`] are built once from the configuration page and then
//! shared by every classification in the run. The [`Pipeline`] combines the
//! [`NoteClassifier`] and the [`ProjectAssociator`] into one record per draft.

pub mod notes;
pub use notes::{CitationStatus, NoteClassifier};

mod pipeline;
pub use pipeline::{Classification, Pipeline};

pub mod projects;
pub use projects::{Association, ProjectAssociator};

pub mod tables;
pub use tables::{LookupTables, StaleConfigError, TablesError};
