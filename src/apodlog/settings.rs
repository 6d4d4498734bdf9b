use crate::error::{ApodError, Result};
use crate::store::{ensure_parent, replace_file};
use serde_json::{Map, Value};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use tracing::warn;

pub const SETTINGS_FILENAME: &str = "user_settings.jsonl";

const KEY_REDIRECT: &str = "automatically_redirect";
const KEY_LAUNCH_COUNT: &str = "launch_count";
const KEY_WALLPAPER: &str = "automatically_set_wallpaper";
const KEY_SAVE_FILES: &str = "automatically_save_apod_files";

/// User preferences, stored as one single-key JSON object per line in a fixed
/// order. Flags are written as `"yes"`/`"no"` and the counter as a string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub automatically_redirect: bool,
    pub launch_count: u64,
    pub automatically_set_wallpaper: bool,
    pub automatically_save_apod_files: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            automatically_redirect: true,
            launch_count: 0,
            automatically_set_wallpaper: false,
            automatically_save_apod_files: false,
        }
    }
}

/// The toggleable flags. The launch counter is not user-settable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    AutoRedirect,
    AutoWallpaper,
    AutoSaveFiles,
}

impl SettingKey {
    pub fn all() -> &'static [SettingKey] {
        &[
            SettingKey::AutoRedirect,
            SettingKey::AutoWallpaper,
            SettingKey::AutoSaveFiles,
        ]
    }

    pub fn file_key(&self) -> &'static str {
        match self {
            SettingKey::AutoRedirect => KEY_REDIRECT,
            SettingKey::AutoWallpaper => KEY_WALLPAPER,
            SettingKey::AutoSaveFiles => KEY_SAVE_FILES,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SettingKey::AutoRedirect => "Auto-open in browser",
            SettingKey::AutoWallpaper => "Auto-set-wallpaper",
            SettingKey::AutoSaveFiles => "Auto-save APOD files",
        }
    }
}

impl fmt::Display for SettingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SettingKey::AutoRedirect => "auto-redirect",
            SettingKey::AutoWallpaper => "auto-wallpaper",
            SettingKey::AutoSaveFiles => "auto-save",
        };
        f.write_str(name)
    }
}

impl FromStr for SettingKey {
    type Err = ApodError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "auto-redirect" | "automatically-redirect" | "redirect" => {
                Ok(SettingKey::AutoRedirect)
            }
            "auto-wallpaper" | "automatically-set-wallpaper" | "wallpaper" => {
                Ok(SettingKey::AutoWallpaper)
            }
            "auto-save" | "automatically-save-apod-files" | "auto-save-apod-files" | "save" => {
                Ok(SettingKey::AutoSaveFiles)
            }
            _ => Err(ApodError::InvalidInput(format!("Unknown setting: {}", s.trim()))),
        }
    }
}

/// Parses a user-supplied switch value.
pub fn parse_switch(value: &str) -> Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "y" | "yes" | "on" | "true" => Ok(true),
        "n" | "no" | "off" | "false" => Ok(false),
        other => Err(ApodError::InvalidInput(format!(
            "Expected yes/no or on/off, got '{}'",
            other
        ))),
    }
}

fn flag_value(map: &Map<String, Value>, key: &str, default: bool) -> bool {
    match map.get(key) {
        None => default,
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => parse_switch(s).unwrap_or_else(|_| {
            warn!(key, value = %s, "unrecognised settings value, using default");
            default
        }),
        Some(other) => {
            warn!(key, value = %other, "unrecognised settings value, using default");
            default
        }
    }
}

fn count_value(map: &Map<String, Value>) -> u64 {
    match map.get(KEY_LAUNCH_COUNT) {
        None => 0,
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or_else(|_| {
            warn!(value = %s, "launch_count is not a number, resetting");
            0
        }),
        Some(other) => {
            warn!(value = %other, "launch_count is not a number, resetting");
            0
        }
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

impl Settings {
    /// Merges every JSON object line; later lines win. Missing keys take defaults.
    pub fn from_lines(content: &str) -> Result<Self> {
        let mut merged = Map::new();
        for line in content.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<Value>(line) {
                Ok(Value::Object(obj)) => merged.extend(obj),
                Ok(other) => warn!(line = %other, "ignoring non-object settings line"),
                Err(e) => warn!(line, error = %e, "ignoring undecodable settings line"),
            }
        }

        let defaults = Settings::default();
        Ok(Self {
            automatically_redirect: flag_value(&merged, KEY_REDIRECT, defaults.automatically_redirect),
            launch_count: count_value(&merged),
            automatically_set_wallpaper: flag_value(
                &merged,
                KEY_WALLPAPER,
                defaults.automatically_set_wallpaper,
            ),
            automatically_save_apod_files: flag_value(
                &merged,
                KEY_SAVE_FILES,
                defaults.automatically_save_apod_files,
            ),
        })
    }

    pub fn to_lines(&self) -> String {
        [
            (KEY_REDIRECT, yes_no(self.automatically_redirect).to_string()),
            (KEY_LAUNCH_COUNT, self.launch_count.to_string()),
            (KEY_WALLPAPER, yes_no(self.automatically_set_wallpaper).to_string()),
            (KEY_SAVE_FILES, yes_no(self.automatically_save_apod_files).to_string()),
        ]
        .into_iter()
        .map(|(key, value)| {
            let mut line = Map::new();
            line.insert(key.to_string(), Value::String(value));
            format!("{}\n", Value::Object(line))
        })
        .collect()
    }

    /// Load settings from `path`, or return defaults if not found.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(ApodError::Io)?;
        Self::from_lines(&content)
    }

    /// Load and write back so the file holds exactly the four known keys.
    pub fn load_normalized<P: AsRef<Path>>(path: P) -> Result<Self> {
        let settings = Self::load(path.as_ref())?;
        settings.save(path)?;
        Ok(settings)
    }

    /// Rewrites the whole file; there are no partial updates.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        ensure_parent(path)?;
        replace_file(path, self.to_lines().as_bytes())
    }

    pub fn get(&self, key: SettingKey) -> bool {
        match key {
            SettingKey::AutoRedirect => self.automatically_redirect,
            SettingKey::AutoWallpaper => self.automatically_set_wallpaper,
            SettingKey::AutoSaveFiles => self.automatically_save_apod_files,
        }
    }

    pub fn set(&mut self, key: SettingKey, value: bool) {
        match key {
            SettingKey::AutoRedirect => self.automatically_redirect = value,
            SettingKey::AutoWallpaper => self.automatically_set_wallpaper = value,
            SettingKey::AutoSaveFiles => self.automatically_save_apod_files = value,
        }
    }
}
