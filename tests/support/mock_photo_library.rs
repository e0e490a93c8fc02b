// In-memory photo library double.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use shoebox::photos::{
    AlbumHandle, AssetPlaceholder, GeoCoordinate, LocationAccuracy, MediaKind, PhotoLibrary,
    PhotoLibraryError,
};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Records albums, created assets, and the tags applied to them, instead of
/// driving a real photo library. Individual create calls can be told to
/// reject files by extension to exercise the photo-to-video fallback, and
/// album creation can be made to fail to exercise startup failure.
pub struct MockPhotoLibrary {
    state: Mutex<MockState>,
    reject_image_extensions: HashSet<String>,
    reject_video_extensions: HashSet<String>,
    fail_album_creation: bool,
}

#[derive(Default)]
struct MockState {
    albums: HashMap<String, MockAlbum>,
    assets: HashMap<String, MockAsset>,
}

struct MockAlbum {
    title: String,
    members: Vec<String>,
}

/// One asset as the library saw it, including every tag applied.
#[derive(Debug, Clone)]
pub struct MockAsset {
    pub path: PathBuf,
    pub kind: MediaKind,
    pub creation_date: Option<DateTime<Utc>>,
    pub location: Option<MockLocation>,
}

#[derive(Debug, Clone)]
pub struct MockLocation {
    pub coordinate: GeoCoordinate,
    pub accuracy: LocationAccuracy,
    pub timestamp: DateTime<Utc>,
}

impl Default for MockPhotoLibrary {
    fn default() -> Self {
        MockPhotoLibrary {
            state: Mutex::new(MockState::default()),
            reject_image_extensions: HashSet::new(),
            reject_video_extensions: HashSet::new(),
            fail_album_creation: false,
        }
    }
}

impl MockPhotoLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject `create_asset_from_image` for files with this extension.
    pub fn reject_images_with_extension(mut self, extension: &str) -> Self {
        self.reject_image_extensions.insert(extension.to_lowercase());
        self
    }

    /// Reject `create_asset_from_video` for files with this extension.
    pub fn reject_videos_with_extension(mut self, extension: &str) -> Self {
        self.reject_video_extensions.insert(extension.to_lowercase());
        self
    }

    /// Make `create_album` fail, simulating a library that refuses changes.
    pub fn failing_album_creation(mut self) -> Self {
        self.fail_album_creation = true;
        self
    }

    pub fn album_titles(&self) -> Vec<String> {
        let state = self.state.lock().unwrap();
        state.albums.values().map(|album| album.title.clone()).collect()
    }

    /// Members of the single album, for tests that only ever create one.
    pub fn sole_album_members(&self) -> Vec<MockAsset> {
        let state = self.state.lock().unwrap();
        assert_eq!(state.albums.len(), 1, "expected exactly one album");
        let album = state.albums.values().next().unwrap();
        album
            .members
            .iter()
            .filter_map(|id| state.assets.get(id).cloned())
            .collect()
    }

    pub fn assets(&self) -> Vec<MockAsset> {
        self.state.lock().unwrap().assets.values().cloned().collect()
    }

    pub fn asset_for_path(&self, path: &Path) -> Option<MockAsset> {
        self.state
            .lock()
            .unwrap()
            .assets
            .values()
            .find(|asset| asset.path == path)
            .cloned()
    }

    fn insert_asset(&self, path: &Path, kind: MediaKind) -> AssetPlaceholder {
        let id = uuid::Uuid::new_v4().to_string();
        self.state.lock().unwrap().assets.insert(
            id.clone(),
            MockAsset {
                path: path.to_path_buf(),
                kind,
                creation_date: None,
                location: None,
            },
        );
        AssetPlaceholder(id)
    }
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_default()
}

#[async_trait]
impl PhotoLibrary for MockPhotoLibrary {
    async fn create_album(&self, title: &str) -> Result<AlbumHandle, PhotoLibraryError> {
        if self.fail_album_creation {
            return Err(PhotoLibraryError::CreateAlbum(
                "album creation disabled by test".to_string(),
            ));
        }

        let handle = uuid::Uuid::new_v4().to_string();
        self.state.lock().unwrap().albums.insert(
            handle.clone(),
            MockAlbum {
                title: title.to_string(),
                members: Vec::new(),
            },
        );
        Ok(AlbumHandle(handle))
    }

    async fn create_asset_from_image(
        &self,
        path: &Path,
    ) -> Result<AssetPlaceholder, PhotoLibraryError> {
        if self.reject_image_extensions.contains(&extension_of(path)) {
            return Err(PhotoLibraryError::CreateAsset {
                path: path.to_path_buf(),
                reason: "not importable as a photo".to_string(),
            });
        }
        Ok(self.insert_asset(path, MediaKind::Photo))
    }

    async fn create_asset_from_video(
        &self,
        path: &Path,
    ) -> Result<AssetPlaceholder, PhotoLibraryError> {
        if self.reject_video_extensions.contains(&extension_of(path)) {
            return Err(PhotoLibraryError::CreateAsset {
                path: path.to_path_buf(),
                reason: "not importable as a video".to_string(),
            });
        }
        Ok(self.insert_asset(path, MediaKind::Video))
    }

    async fn add_to_album(
        &self,
        album: &AlbumHandle,
        asset: &AssetPlaceholder,
    ) -> Result<(), PhotoLibraryError> {
        let mut state = self.state.lock().unwrap();
        let album = state
            .albums
            .get_mut(&album.0)
            .ok_or_else(|| PhotoLibraryError::ChangeRequest(format!("unknown album {}", album.0)))?;
        album.members.push(asset.0.clone());
        Ok(())
    }

    async fn set_creation_date(
        &self,
        asset: &AssetPlaceholder,
        taken_at: DateTime<Utc>,
    ) -> Result<(), PhotoLibraryError> {
        let mut state = self.state.lock().unwrap();
        let asset = state
            .assets
            .get_mut(&asset.0)
            .ok_or_else(|| PhotoLibraryError::ChangeRequest(format!("unknown asset {}", asset.0)))?;
        asset.creation_date = Some(taken_at);
        Ok(())
    }

    async fn set_location(
        &self,
        asset: &AssetPlaceholder,
        coordinate: GeoCoordinate,
        accuracy: LocationAccuracy,
        timestamp: DateTime<Utc>,
    ) -> Result<(), PhotoLibraryError> {
        let mut state = self.state.lock().unwrap();
        let asset = state
            .assets
            .get_mut(&asset.0)
            .ok_or_else(|| PhotoLibraryError::ChangeRequest(format!("unknown asset {}", asset.0)))?;
        asset.location = Some(MockLocation {
            coordinate,
            accuracy,
            timestamp,
        });
        Ok(())
    }
}
