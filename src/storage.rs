use crate::errors::AppError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::{env, path::PathBuf};
use tokio::fs;
use tracing::error;

pub const TASKS_KEY: &str = "tasks";
pub const NOTES_KEY: &str = "notes";
pub const THEME_KEY: &str = "theme";

/// Key-value persistence over per-key JSON files in a single directory.
/// Reads never fail: a missing, unreadable, or malformed file degrades to
/// the caller's fallback value.
#[derive(Debug, Clone)]
pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        let path = self.key_path(key);
        match fs::read(&path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(value) => value,
                Err(err) => {
                    error!("malformed data for key {key}: {err}");
                    fallback
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => fallback,
            Err(err) => {
                error!("failed to read key {key}: {err}");
                fallback
            }
        }
    }

    pub async fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), AppError> {
        let payload = serde_json::to_vec_pretty(value).map_err(AppError::internal)?;
        fs::write(self.key_path(key), payload)
            .await
            .map_err(AppError::internal)?;
        Ok(())
    }
}

pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = env::var("APP_DATA_DIR") {
        return PathBuf::from(dir);
    }

    PathBuf::from("data")
}
