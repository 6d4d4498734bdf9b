use serde::{Deserialize, Serialize};

/// An APOD entry as returned by the remote API. Only the fields the logger
/// cares about are kept; anything else in the payload is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawApod {
    pub date: String,
    pub title: String,
    pub url: String,
    pub explanation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hdurl: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
}

/// A normalized entry as stored in both logs. Field order is the on-disk order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApodRecord {
    pub date: String,
    pub title: String,
    pub url: String,
    pub explanation: String,
    pub logged_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_file_path: Option<String>,
}

impl ApodRecord {
    pub fn new(
        date: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
        explanation: impl Into<String>,
        logged_at: impl Into<String>,
    ) -> Self {
        Self {
            date: date.into(),
            title: title.into(),
            url: url.into(),
            explanation: explanation.into(),
            logged_at: logged_at.into(),
            local_file_path: None,
        }
    }

    pub fn with_local_file_path(mut self, path: impl Into<String>) -> Self {
        self.local_file_path = Some(path.into());
        self
    }

    /// Record key within a store.
    pub fn key(&self) -> &str {
        &self.date
    }
}
