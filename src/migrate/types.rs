use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// One discovered media file, hashed at discovery time.
#[derive(Debug, Clone)]
pub struct CandidateAsset {
    /// Location of the media file.
    pub path: PathBuf,
    /// Content hash computed once during the scan. Files are assumed
    /// immutable for the duration of a run, so it is never recomputed.
    pub content_digest: String,
    /// Whether a same-named `.json` sidecar existed at discovery time.
    pub has_sidecar: bool,
}

/// Cooperative stop request shared between a running migration and its
/// controller.
///
/// Sampled at the top of the scan and import loops, never preemptively; an
/// in-flight asset always completes before the flag takes effect.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request a graceful stop.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}
