// # Migration Module
//
// Folder-export migration engine with focused, testable components:
//
// - **Scanner**: walks the export folder and builds the candidate inventory
// - **Deduplicator**: keeps one representative per content digest,
//   preferring copies that carry a metadata sidecar
// - **MediaMigrator**: the per-asset import state machine
// - **ProgressObserver**: lifecycle callbacks toward the presentation layer
//
// Public API:
// - `MediaMigrator`: create and drive a migration run
// - `CancelFlag`: cooperative stop requests
// - `ChannelObserver` / `MigrationEvent`: event stream for a UI consumer

mod dedup;
mod progress;
mod scanner;
mod service;
mod types;

pub use dedup::dedupe_candidates;
pub use progress::{ChannelObserver, MigrationEvent, ProgressObserver, TracingObserver};
pub use scanner::{is_sidecar_file, scan_candidates, ScanError, ScanOutcome};
pub use service::MediaMigrator;
pub use types::{CancelFlag, CandidateAsset};
