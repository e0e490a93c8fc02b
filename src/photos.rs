// # Photo Library Gateway
//
// Thin abstraction over the destination photo library. The engine only needs
// album creation plus per-asset create/tag operations; the concrete
// implementation (the platform photo framework) lives with the host
// application. Trait-based so tests can substitute an in-memory library.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PhotoLibraryError {
    #[error("album creation failed: {0}")]
    CreateAlbum(String),
    #[error("asset creation failed for {path}: {reason}")]
    CreateAsset { path: PathBuf, reason: String },
    #[error("change request failed: {0}")]
    ChangeRequest(String),
}

/// Identifier of a destination album.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlbumHandle(pub String);

/// Handle for an asset created inside a pending library change, usable for
/// tagging before the change commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPlaceholder(pub String);

/// Media flavor an asset was created as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Photo,
    Video,
}

/// WGS84 coordinate with altitude in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
}

/// Horizontal/vertical accuracy radii in meters. Never negative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationAccuracy {
    pub horizontal: f64,
    pub vertical: f64,
}

impl LocationAccuracy {
    /// Build accuracy radii from raw uncertainty spans. Anything that is not
    /// a valid accuracy value (negative, NaN, infinite) clamps to zero.
    pub fn from_spans(latitude_span: f64, longitude_span: f64) -> Self {
        LocationAccuracy {
            horizontal: clamp_accuracy(latitude_span),
            vertical: clamp_accuracy(longitude_span),
        }
    }
}

fn clamp_accuracy(span: f64) -> f64 {
    if span.is_finite() && span >= 0.0 {
        span
    } else {
        0.0
    }
}

/// Operations the engine needs from a photo library (allows mocking for tests)
#[async_trait]
pub trait PhotoLibrary: Send + Sync {
    async fn create_album(&self, title: &str) -> Result<AlbumHandle, PhotoLibraryError>;

    async fn create_asset_from_image(
        &self,
        path: &Path,
    ) -> Result<AssetPlaceholder, PhotoLibraryError>;

    async fn create_asset_from_video(
        &self,
        path: &Path,
    ) -> Result<AssetPlaceholder, PhotoLibraryError>;

    async fn add_to_album(
        &self,
        album: &AlbumHandle,
        asset: &AssetPlaceholder,
    ) -> Result<(), PhotoLibraryError>;

    async fn set_creation_date(
        &self,
        asset: &AssetPlaceholder,
        taken_at: DateTime<Utc>,
    ) -> Result<(), PhotoLibraryError>;

    async fn set_location(
        &self,
        asset: &AssetPlaceholder,
        coordinate: GeoCoordinate,
        accuracy: LocationAccuracy,
        timestamp: DateTime<Utc>,
    ) -> Result<(), PhotoLibraryError>;
}

/// Gateway the engine drives the destination library through.
#[derive(Clone)]
pub struct PhotoLibraryManager {
    library: Arc<dyn PhotoLibrary>,
}

impl std::fmt::Debug for PhotoLibraryManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PhotoLibraryManager")
            .field("library", &"<dyn PhotoLibrary>")
            .finish()
    }
}

impl PhotoLibraryManager {
    /// Wrap a concrete library implementation.
    pub fn from_library(library: Arc<dyn PhotoLibrary>) -> Self {
        PhotoLibraryManager { library }
    }

    pub async fn create_album(&self, title: &str) -> Result<AlbumHandle, PhotoLibraryError> {
        self.library.create_album(title).await
    }

    pub async fn create_asset_from_image(
        &self,
        path: &Path,
    ) -> Result<AssetPlaceholder, PhotoLibraryError> {
        self.library.create_asset_from_image(path).await
    }

    pub async fn create_asset_from_video(
        &self,
        path: &Path,
    ) -> Result<AssetPlaceholder, PhotoLibraryError> {
        self.library.create_asset_from_video(path).await
    }

    pub async fn add_to_album(
        &self,
        album: &AlbumHandle,
        asset: &AssetPlaceholder,
    ) -> Result<(), PhotoLibraryError> {
        self.library.add_to_album(album, asset).await
    }

    pub async fn set_creation_date(
        &self,
        asset: &AssetPlaceholder,
        taken_at: DateTime<Utc>,
    ) -> Result<(), PhotoLibraryError> {
        self.library.set_creation_date(asset, taken_at).await
    }

    pub async fn set_location(
        &self,
        asset: &AssetPlaceholder,
        coordinate: GeoCoordinate,
        accuracy: LocationAccuracy,
        timestamp: DateTime<Utc>,
    ) -> Result<(), PhotoLibraryError> {
        self.library
            .set_location(asset, coordinate, accuracy, timestamp)
            .await
    }
}
