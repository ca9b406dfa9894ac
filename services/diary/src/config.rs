use std::path::PathBuf;

use anyhow::Context as _;

/// Diary service configuration loaded from environment variables.
#[derive(Debug)]
pub struct DiaryConfig {
    /// PostgreSQL connection URL. Env var: `DATABASE_URL`.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3114). Env var: `DIARY_PORT`.
    pub diary_port: u16,
    /// Directory diet images are written to (default `storage/diets`). Env var: `UPLOAD_DIR`.
    pub upload_dir: PathBuf,
    /// Firebase service-account JSON. Push delivery is disabled when unset.
    /// Env var: `FCM_CREDENTIALS_PATH`.
    pub fcm_credentials_path: Option<PathBuf>,
    /// Bound of the push job queue (default 256). Env var: `PUSH_QUEUE_CAPACITY`.
    pub push_queue_capacity: usize,
}

impl DiaryConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            database_url: std::env::var("DATABASE_URL").context("DATABASE_URL")?,
            diary_port: parse_or("DIARY_PORT", 3114),
            upload_dir: std::env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("storage/diets")),
            fcm_credentials_path: std::env::var("FCM_CREDENTIALS_PATH")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
            push_queue_capacity: parse_or("PUSH_QUEUE_CAPACITY", 256),
        })
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
