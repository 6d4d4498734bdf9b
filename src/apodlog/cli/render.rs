//! # Rendering
//!
//! Turns `CmdResult` pieces into terminal text. Functions here build strings
//! so they can be tested; the `print_*` wrappers are the only ones that write.

use super::styles::APOD_THEME;
use apodlog::api::{CheckStatus, CmdMessage, MessageLevel, StartupCheck};
use apodlog::model::ApodRecord;
use apodlog::settings::{SettingKey, Settings};
use colored::Colorize;
use unicode_width::UnicodeWidthStr;

const SEPARATOR: &str = "=====================================";
const CHECK_NAME_WIDTH: usize = 18;

/// One numbered block per record, in the order given.
pub fn render_entries(records: &[ApodRecord]) -> String {
    let theme = &*APOD_THEME;
    let mut out = String::new();

    for (i, record) in records.iter().enumerate() {
        out.push_str(&format!("{}\n", theme.separator.apply_to(SEPARATOR)));
        out.push_str(&format!(
            "{}\n",
            theme
                .heading
                .apply_to(format!("Entry #{} ({}):", i + 1, record.title))
        ));
        let mut fields = vec![
            ("Date", record.date.as_str()),
            ("Title", record.title.as_str()),
            ("Url", record.url.as_str()),
            ("Explanation", record.explanation.as_str()),
            ("Logged_At", record.logged_at.as_str()),
        ];
        if let Some(path) = &record.local_file_path {
            fields.push(("Local_File", path.as_str()));
        }
        for (label, value) in fields {
            let value = if label == "Url" {
                theme.link.apply_to(value).to_string()
            } else {
                value.to_string()
            };
            out.push_str(&format!("{} {}\n", theme.label.apply_to(format!("{}:", label)), value));
        }
    }
    out
}

/// The link line shown after a fetch.
pub fn render_links(records: &[ApodRecord]) -> String {
    records
        .iter()
        .map(|r| format!("APOD link: {}\n", APOD_THEME.link.apply_to(&r.url)))
        .collect()
}

pub fn render_settings(settings: &Settings) -> String {
    let theme = &*APOD_THEME;
    let mut out = String::new();
    out.push_str(&format!("{}\n", theme.heading.apply_to("Settings")));
    for key in SettingKey::all() {
        let value = if settings.get(*key) {
            theme.on.apply_to("ON")
        } else {
            theme.off.apply_to("OFF")
        };
        out.push_str(&format!("  {:<22} {}\n", key.label(), value));
    }
    out.push_str(&format!(
        "  {:<22} {}\n",
        "Launch count",
        settings.launch_count
    ));
    out
}

pub fn render_checks(checks: &[StartupCheck]) -> String {
    let theme = &*APOD_THEME;
    checks
        .iter()
        .map(|check| {
            let status = match check.status {
                CheckStatus::Found => theme.on.apply_to("Found"),
                CheckStatus::Created => theme.label.apply_to("Created"),
            };
            let pad = CHECK_NAME_WIDTH.saturating_sub(check.name.width());
            format!(
                "{}{} [✓] {}  {}\n",
                check.name,
                " ".repeat(pad),
                status,
                theme.dim.apply_to(check.path.display())
            )
        })
        .collect()
}

pub fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub fn print_entries(records: &[ApodRecord]) {
    print!("{}", render_entries(records));
}
