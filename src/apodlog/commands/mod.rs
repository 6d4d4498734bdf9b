use crate::model::ApodRecord;
use crate::settings::Settings;
use std::path::PathBuf;

pub mod append;
pub mod attach;
pub mod clear;
pub mod count;
pub mod delete;
pub mod doctor;
pub mod extremes;
pub mod fetch;
pub mod init;
pub mod list;
pub mod settings;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// Outcome of a startup check on one of the files the logger owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckStatus {
    Found,
    Created,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupCheck {
    pub name: String,
    pub path: PathBuf,
    pub status: CheckStatus,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub records: Vec<ApodRecord>,
    pub messages: Vec<CmdMessage>,
    pub count: Option<usize>,
    pub settings: Option<Settings>,
    pub checks: Vec<StartupCheck>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_records(mut self, records: Vec<ApodRecord>) -> Self {
        self.records = records;
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Appends another result's messages and records to this one.
    pub fn merge(&mut self, other: CmdResult) {
        self.records.extend(other.records);
        self.messages.extend(other.messages);
        self.checks.extend(other.checks);
        if other.count.is_some() {
            self.count = other.count;
        }
        if other.settings.is_some() {
            self.settings = other.settings;
        }
    }

    pub fn has_level(&self, level: MessageLevel) -> bool {
        self.messages.iter().any(|m| m.level == level)
    }
}
