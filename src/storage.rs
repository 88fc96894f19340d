/// HTML report rendering.
pub mod report;
/// JSON snapshots of drafts and configuration.
pub mod snapshot;

pub use report::{DEFAULT_TEMPLATE, Report, ReportError};
pub use snapshot::{ConfigPage, Snapshot, SnapshotError};
