use std::env;
use std::path::PathBuf;

/// Application configuration, loaded from the environment with defaults.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Connection string for the flashcard store (default: local SQLite file)
    pub database_url: String,

    /// Directory images are uploaded to and served from (default: static/images)
    pub upload_dir: PathBuf,

    /// Maximum upload size in bytes (default: 10 MB)
    pub max_upload_size: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_url: "sqlite://flashcards.db?mode=rwc".to_string(),
            upload_dir: PathBuf::from("static/images"),
            max_upload_size: 10 * 1024 * 1024,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let default = Self::default();

        Self {
            database_url: env::var("DATABASE_URL").unwrap_or(default.database_url),

            upload_dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(default.upload_dir),

            max_upload_size: env::var("MAX_UPLOAD_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(default.max_upload_size),
        }
    }
}
