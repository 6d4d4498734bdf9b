//! Saving an entry's picture or video next to the logs.
//!
//! Files land in `<data dir>/downloads/apod-<date><ext>`. A date that already
//! has any `apod-<date>*` file is never downloaded again; a name clash with a
//! different file gets a `-1`, `-2`, ... suffix.

use crate::error::{ApodError, Result};
use crate::model::RawApod;
use crate::source::ApodSource;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const MEDIA_EXTENSIONS: &[&str] = &[
    ".jpg", ".jpeg", ".png", ".gif", ".webp", ".bmp", ".tif", ".tiff", ".svg", ".mp4", ".mov",
    ".webm", ".mkv", ".avi", ".mp3", ".wav",
];

const CONTENT_TYPES: &[(&str, &str)] = &[
    ("image/jpeg", ".jpg"),
    ("image/png", ".png"),
    ("image/gif", ".gif"),
    ("image/webp", ".webp"),
    ("image/bmp", ".bmp"),
    ("image/tiff", ".tiff"),
    ("image/svg+xml", ".svg"),
    ("video/mp4", ".mp4"),
    ("video/webm", ".webm"),
    ("video/quicktime", ".mov"),
    ("audio/mpeg", ".mp3"),
    ("audio/wav", ".wav"),
];

const FALLBACK_EXTENSION: &str = ".bin";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaOutcome {
    Saved(PathBuf),
    /// A file for this date is already in the downloads directory.
    AlreadyPresent,
    /// Neither `hdurl` nor `url` points at something downloadable.
    NoMediaUrl,
}

/// Lowercased known media suffix of the URL path, if any.
fn url_extension(url: &str) -> Option<String> {
    let path = match reqwest::Url::parse(url) {
        Ok(parsed) => parsed.path().to_string(),
        Err(_) => url.split(['?', '#']).next().unwrap_or_default().to_string(),
    };
    let file_name = path.rsplit('/').next().unwrap_or_default();
    let dot = file_name.rfind('.')?;
    let suffix = file_name[dot..].to_lowercase();
    MEDIA_EXTENSIONS
        .contains(&suffix.as_str())
        .then_some(suffix)
}

fn is_http(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

/// Picks the URL to download: a direct media link is preferred over a page
/// link, and the HD variant over the regular one.
pub fn resolve_media_url(raw: &RawApod) -> Option<String> {
    let hdurl = raw.hdurl.as_deref().map(str::trim).unwrap_or_default();
    let url = raw.url.trim();

    [hdurl, url]
        .into_iter()
        .find(|candidate| !candidate.is_empty() && url_extension(candidate).is_some())
        .or_else(|| [hdurl, url].into_iter().find(|candidate| is_http(candidate)))
        .map(String::from)
}

pub fn infer_extension(content_type: Option<&str>, url: &str) -> String {
    content_type
        .and_then(|ct| {
            CONTENT_TYPES
                .iter()
                .find(|(known, _)| *known == ct)
                .map(|(_, ext)| ext.to_string())
        })
        .or_else(|| url_extension(url))
        .unwrap_or_else(|| FALLBACK_EXTENSION.to_string())
}

fn base_name(date: &str) -> String {
    format!("apod-{}", date)
}

/// Whether any file in `dir` already belongs to `date`.
pub fn has_file_for_date(dir: &Path, date: &str) -> Result<bool> {
    if !dir.is_dir() {
        return Ok(false);
    }
    let prefix = base_name(date);
    for entry in fs::read_dir(dir).map_err(ApodError::Io)? {
        let entry = entry.map_err(ApodError::Io)?;
        if entry.path().is_file() && entry.file_name().to_string_lossy().starts_with(&prefix) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// First free `apod-<date>[-n]<ext>` path in `dir`.
pub fn download_path(dir: &Path, date: &str, extension: &str) -> PathBuf {
    let base = base_name(date);
    let candidate = dir.join(format!("{}{}", base, extension));
    if !candidate.exists() {
        return candidate;
    }
    (1..)
        .map(|n| dir.join(format!("{}-{}{}", base, n, extension)))
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}

/// Downloads the media for `raw` into `dir`.
pub fn save_media<S: ApodSource + ?Sized>(
    source: &S,
    raw: &RawApod,
    dir: &Path,
) -> Result<MediaOutcome> {
    let date = raw.date.trim();
    if date.is_empty() {
        return Err(ApodError::InvalidInput(
            "Cannot save media for an entry without a date".to_string(),
        ));
    }
    if has_file_for_date(dir, date)? {
        return Ok(MediaOutcome::AlreadyPresent);
    }
    let Some(url) = resolve_media_url(raw) else {
        return Ok(MediaOutcome::NoMediaUrl);
    };

    let media = source.download(&url)?;
    let extension = infer_extension(media.content_type.as_deref(), &url);

    fs::create_dir_all(dir).map_err(ApodError::Io)?;
    let path = download_path(dir, date, &extension);
    fs::write(&path, &media.bytes).map_err(ApodError::Io)?;
    debug!(path = %path.display(), bytes = media.bytes.len(), "saved media");

    Ok(MediaOutcome::Saved(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn raw(url: &str, hdurl: Option<&str>) -> RawApod {
        RawApod {
            date: "2006-04-15".to_string(),
            url: url.to_string(),
            hdurl: hdurl.map(String::from),
            ..RawApod::default()
        }
    }

    #[test]
    fn prefers_direct_hd_link() {
        let entry = raw(
            "https://apod.nasa.gov/apod/image/0604/m81_small.jpg",
            Some("https://apod.nasa.gov/apod/image/0604/m81_big.JPG"),
        );
        assert_eq!(
            resolve_media_url(&entry).as_deref(),
            Some("https://apod.nasa.gov/apod/image/0604/m81_big.JPG")
        );
    }

    #[test]
    fn direct_url_beats_hd_page_link() {
        let entry = raw(
            "https://apod.nasa.gov/apod/image/a.png",
            Some("https://example.com/viewer"),
        );
        assert_eq!(
            resolve_media_url(&entry).as_deref(),
            Some("https://apod.nasa.gov/apod/image/a.png")
        );
    }

    #[test]
    fn falls_back_to_any_http_link() {
        let entry = raw("https://www.youtube.com/embed/abc?rel=0", None);
        assert_eq!(
            resolve_media_url(&entry).as_deref(),
            Some("https://www.youtube.com/embed/abc?rel=0")
        );
        assert_eq!(resolve_media_url(&raw("not a url", None)), None);
    }

    #[test]
    fn extension_from_content_type_then_url() {
        assert_eq!(infer_extension(Some("image/png"), "https://x/a.jpg"), ".png");
        assert_eq!(infer_extension(None, "https://x/a.JPEG?size=big"), ".jpeg");
        assert_eq!(infer_extension(Some("text/html"), "https://x/page"), ".bin");
    }

    #[test]
    fn download_path_skips_taken_names() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("apod-2006-04-15.jpg"), b"x").unwrap();
        fs::write(dir.path().join("apod-2006-04-15-1.jpg"), b"x").unwrap();

        let path = download_path(dir.path(), "2006-04-15", ".jpg");
        assert_eq!(path, dir.path().join("apod-2006-04-15-2.jpg"));
    }

    #[test]
    fn detects_existing_file_for_date() {
        let dir = TempDir::new().unwrap();
        assert!(!has_file_for_date(dir.path(), "2006-04-15").unwrap());
        fs::write(dir.path().join("apod-2006-04-15.png"), b"x").unwrap();
        assert!(has_file_for_date(dir.path(), "2006-04-15").unwrap());
        assert!(!has_file_for_date(dir.path(), "2006-04-16").unwrap());
    }
}
