use crate::error::{ApodError, Result};
use crate::settings::SETTINGS_FILENAME;
use directories::ProjectDirs;
use std::env;
use std::path::{Path, PathBuf};

pub const HOME_ENV: &str = "APODLOG_HOME";
pub const API_KEY_ENV: &str = "NASA_API_KEY";
pub const BASE_URL_ENV: &str = "APODLOG_BASE_URL";

pub const DEFAULT_API_KEY: &str = "DEMO_KEY";
pub const DEFAULT_BASE_URL: &str = "https://api.nasa.gov/planetary/apod";

const LINES_FILENAME: &str = "output.jsonl";
const TABLE_FILENAME: &str = "output.csv";
const DOWNLOADS_DIRNAME: &str = "downloads";

/// Locations of every file the logger owns, all under one data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    pub data_dir: PathBuf,
}

impl AppPaths {
    pub fn new<P: Into<PathBuf>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn lines_file(&self) -> PathBuf {
        self.data_dir.join(LINES_FILENAME)
    }

    pub fn table_file(&self) -> PathBuf {
        self.data_dir.join(TABLE_FILENAME)
    }

    pub fn settings_file(&self) -> PathBuf {
        self.data_dir.join(SETTINGS_FILENAME)
    }

    pub fn downloads_dir(&self) -> PathBuf {
        self.data_dir.join(DOWNLOADS_DIRNAME)
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub paths: AppPaths,
    pub api_key: String,
    pub base_url: String,
}

impl AppConfig {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable lookup. Empty values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_dir = match var(HOME_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };

        Ok(Self {
            paths: AppPaths::new(data_dir),
            api_key: var(API_KEY_ENV).unwrap_or_else(|| DEFAULT_API_KEY.to_string()),
            base_url: var(BASE_URL_ENV).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.paths.data_dir
    }
}

fn default_data_dir() -> Result<PathBuf> {
    ProjectDirs::from("com", "apodlog", "apodlog")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            ApodError::Store(format!(
                "Could not determine a data directory; set {} instead",
                HOME_ENV
            ))
        })
}
