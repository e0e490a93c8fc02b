//! Takeout sidecar metadata: the `<name>.<ext>.json` document written next
//! to each exported media file, carrying the capture time and geolocation
//! the export strips from the media itself.
//!
//! Absence is never an error here. A missing, unreadable, or malformed
//! sidecar means the asset imports without metadata.

use crate::photos::{GeoCoordinate, LocationAccuracy};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Suffix appended to the full media file name to locate its sidecar.
pub const SIDECAR_SUFFIX: &str = ".json";

/// Geolocation block of a sidecar document.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoData {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    /// Latitude uncertainty span, reused as a horizontal accuracy proxy.
    pub latitude_span: f64,
    /// Longitude uncertainty span, reused as a vertical accuracy proxy.
    pub longitude_span: f64,
}

/// Capture-time block. Takeout writes the epoch as a numeric string plus a
/// human-readable rendering; the numeric value is authoritative.
#[derive(Debug, Clone, Deserialize)]
pub struct PhotoTakenTime {
    pub timestamp: String,
    pub formatted: String,
}

/// Parsed sidecar document. Fields beyond these two blocks are ignored;
/// a document missing either block is treated as absent.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SidecarMetadata {
    pub geo_data: GeoData,
    pub photo_taken_time: PhotoTakenTime,
}

impl SidecarMetadata {
    /// Capture instant from the numeric epoch string, if parseable.
    pub fn capture_instant(&self) -> Option<DateTime<Utc>> {
        let seconds = self.photo_taken_time.timestamp.parse::<i64>().ok()?;
        DateTime::from_timestamp(seconds, 0)
    }

    /// Coordinate recorded by the sidecar.
    pub fn coordinate(&self) -> GeoCoordinate {
        GeoCoordinate {
            latitude: self.geo_data.latitude,
            longitude: self.geo_data.longitude,
            altitude: self.geo_data.altitude,
        }
    }

    /// Accuracy radii derived from the uncertainty spans.
    pub fn accuracy(&self) -> LocationAccuracy {
        LocationAccuracy::from_spans(self.geo_data.latitude_span, self.geo_data.longitude_span)
    }
}

/// Expected sidecar location for a media file: the full file name plus
/// `.json`, in the same directory (`a.jpg` pairs with `a.jpg.json`).
pub fn sidecar_path(media_path: &Path) -> PathBuf {
    let mut raw = media_path.as_os_str().to_os_string();
    raw.push(SIDECAR_SUFFIX);
    PathBuf::from(raw)
}

/// Load the sidecar paired with a media file.
///
/// Every failure mode (no sidecar, unreadable, undecodable, missing required
/// fields) yields `None`; the caller imports the asset without metadata.
pub async fn load_sidecar(media_path: &Path) -> Option<SidecarMetadata> {
    let path = sidecar_path(media_path);

    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(_) => return None,
    };

    match serde_json::from_slice(&bytes) {
        Ok(metadata) => Some(metadata),
        Err(e) => {
            debug!("Ignoring undecodable sidecar {}: {}", path.display(), e);
            None
        }
    }
}
