use tracing::info;

/// Title of the destination album when none is configured.
pub const DEFAULT_ALBUM_TITLE: &str = "Imported from Google Photos";

/// What to do when a sidecar's capture timestamp does not parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureTimeFallback {
    /// Date the asset with the import time. This is the historical behavior;
    /// it can silently misdate an asset, so the engine logs a warning when
    /// it kicks in.
    #[default]
    ImportTime,
    /// Leave the asset undated and unlocated rather than guessing.
    Omit,
}

/// Engine configuration for migration runs.
#[derive(Debug, Clone)]
pub struct MigrationConfig {
    /// Title of the album created at run start; every imported asset is
    /// added to it.
    pub album_title: String,
    pub capture_time_fallback: CaptureTimeFallback,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        MigrationConfig {
            album_title: DEFAULT_ALBUM_TITLE.to_string(),
            capture_time_fallback: CaptureTimeFallback::default(),
        }
    }
}

impl MigrationConfig {
    /// Load configuration from the environment.
    /// In debug builds a `.env` file is loaded first if present.
    pub fn load() -> Self {
        #[cfg(debug_assertions)]
        {
            if dotenvy::dotenv().is_ok() {
                info!("Loaded .env file");
            }
        }

        Self::from_env()
    }

    fn from_env() -> Self {
        let album_title = std::env::var("SHOEBOX_ALBUM_TITLE")
            .ok()
            .filter(|title| !title.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_ALBUM_TITLE.to_string());

        let capture_time_fallback = match std::env::var("SHOEBOX_STRICT_CAPTURE_TIME") {
            Ok(value) if value.eq_ignore_ascii_case("true") || value == "1" => {
                CaptureTimeFallback::Omit
            }
            _ => CaptureTimeFallback::ImportTime,
        };

        let config = MigrationConfig {
            album_title,
            capture_time_fallback,
        };
        info!("Config: {:?}", config);
        config
    }
}
