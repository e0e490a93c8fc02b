// # Media Migrator - import orchestrator
//
// Drives one migration run as a sequential state machine on a single worker
// task: album creation, scan, dedup, then per-asset import with photo-to-
// video fallback. Progress and the terminal outcome are delivered through
// the ProgressObserver; the destination library is reached through the
// PhotoLibraryManager. Only startup failures abort the run; per-asset
// failures are recorded and processing continues.

use crate::config::{CaptureTimeFallback, MigrationConfig};
use crate::migrate::dedup::dedupe_candidates;
use crate::migrate::progress::ProgressObserver;
use crate::migrate::scanner::{scan_candidates, ScanOutcome};
use crate::migrate::types::{CancelFlag, CandidateAsset};
use crate::photos::{AlbumHandle, MediaKind, PhotoLibraryError, PhotoLibraryManager};
use crate::sidecar::{self, SidecarMetadata};
use chrono::Utc;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// One-shot migration of a folder export into the destination library.
///
/// `run()` consumes the migrator, so a second run on the same instance is
/// unrepresentable; construct a fresh migrator per run.
pub struct MediaMigrator {
    folder: PathBuf,
    library: PhotoLibraryManager,
    observer: Arc<dyn ProgressObserver>,
    config: MigrationConfig,
    cancel: CancelFlag,
}

impl MediaMigrator {
    pub fn new(
        folder: PathBuf,
        library: PhotoLibraryManager,
        observer: Arc<dyn ProgressObserver>,
    ) -> Self {
        Self::with_config(folder, library, observer, MigrationConfig::default())
    }

    pub fn with_config(
        folder: PathBuf,
        library: PhotoLibraryManager,
        observer: Arc<dyn ProgressObserver>,
        config: MigrationConfig,
    ) -> Self {
        MediaMigrator {
            folder,
            library,
            observer,
            config,
            cancel: CancelFlag::new(),
        }
    }

    /// Share a pre-existing cancel flag, e.g. one already wired to a UI
    /// control.
    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = cancel;
        self
    }

    /// The flag a controller sets to request a graceful stop.
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Spawn the run as a background worker on the given runtime.
    pub fn start(self, runtime_handle: tokio::runtime::Handle) -> tokio::task::JoinHandle<()> {
        runtime_handle.spawn(self.run())
    }

    /// Drive the run to its terminal event.
    pub async fn run(self) {
        info!("Starting migration of {}", self.folder.display());
        self.observer.started();

        let album = match self.library.create_album(&self.config.album_title).await {
            Ok(album) => album,
            Err(e) => {
                error!(
                    "Could not create album {:?}: {}",
                    self.config.album_title, e
                );
                self.observer.failed();
                return;
            }
        };

        let mut errors: Vec<String> = Vec::new();

        let candidates = match scan_candidates(
            &self.folder,
            &self.cancel,
            self.observer.as_ref(),
            &mut errors,
        )
        .await
        {
            Ok(ScanOutcome::Completed(candidates)) => candidates,
            Ok(ScanOutcome::Cancelled) => {
                info!("Migration cancelled during scan");
                self.observer.stopped(&errors);
                return;
            }
            Err(e) => {
                error!("{}", e);
                self.observer.failed();
                return;
            }
        };

        if candidates.is_empty() {
            info!("No media files found under {}", self.folder.display());
            self.observer.finished(&errors);
            return;
        }

        let mut pending = dedupe_candidates(candidates, |candidate| {
            self.observer.update(&format!(
                "Checking for duplicates: {}",
                candidate.path.display()
            ));
        });
        debug!("{} unique asset(s) to import", pending.len());

        for asset in pending.clone() {
            if self.cancel.is_cancelled() {
                info!(
                    "Migration cancelled with {} asset(s) unresolved",
                    pending.len()
                );
                self.observer.stopped(&errors);
                return;
            }

            let metadata = sidecar::load_sidecar(&asset.path).await;
            if let Err(e) = self.import_asset(&album, &asset, metadata.as_ref()).await {
                warn!("Could not import {}: {}", asset.path.display(), e);
                errors.push(format!("Unable to import media file {}", asset.path.display()));
            }

            // Remove from pending, then check for completion. The empty
            // pending set is the sole termination signal.
            pending.retain(|other| other.path != asset.path);
            self.observer
                .update(&format!("Imported {}", asset.path.display()));
            if pending.is_empty() {
                self.observer.finished(&errors);
                return;
            }
        }
    }

    /// Attempt the asset as a photo, then as a video. Either success
    /// resolves the asset; both failing is the per-asset error.
    async fn import_asset(
        &self,
        album: &AlbumHandle,
        asset: &CandidateAsset,
        metadata: Option<&SidecarMetadata>,
    ) -> Result<(), PhotoLibraryError> {
        match self
            .import_as(MediaKind::Photo, album, asset, metadata)
            .await
        {
            Ok(()) => Ok(()),
            Err(photo_error) => {
                debug!(
                    "Photo import of {} failed ({}), retrying as video",
                    asset.path.display(),
                    photo_error
                );
                self.import_as(MediaKind::Video, album, asset, metadata)
                    .await
            }
        }
    }

    async fn import_as(
        &self,
        kind: MediaKind,
        album: &AlbumHandle,
        asset: &CandidateAsset,
        metadata: Option<&SidecarMetadata>,
    ) -> Result<(), PhotoLibraryError> {
        let placeholder = match kind {
            MediaKind::Photo => self.library.create_asset_from_image(&asset.path).await?,
            MediaKind::Video => self.library.create_asset_from_video(&asset.path).await?,
        };
        self.library.add_to_album(album, &placeholder).await?;

        if let Some(metadata) = metadata {
            let taken_at = match metadata.capture_instant() {
                Some(instant) => instant,
                None => match self.config.capture_time_fallback {
                    CaptureTimeFallback::ImportTime => {
                        warn!(
                            "Unparseable capture timestamp {:?} for {}, dating with import time",
                            metadata.photo_taken_time.timestamp,
                            asset.path.display()
                        );
                        Utc::now()
                    }
                    CaptureTimeFallback::Omit => {
                        warn!(
                            "Unparseable capture timestamp {:?} for {}, leaving asset untagged",
                            metadata.photo_taken_time.timestamp,
                            asset.path.display()
                        );
                        return Ok(());
                    }
                },
            };

            self.library.set_creation_date(&placeholder, taken_at).await?;
            self.library
                .set_location(
                    &placeholder,
                    metadata.coordinate(),
                    metadata.accuracy(),
                    taken_at,
                )
                .await?;
        }

        Ok(())
    }
}
