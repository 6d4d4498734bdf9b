use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::settings::{SettingKey, Settings};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsAction {
    Show,
    Set(SettingKey, bool),
    Toggle(SettingKey),
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "ON"
    } else {
        "OFF"
    }
}

pub fn run(settings_file: &Path, action: SettingsAction) -> Result<CmdResult> {
    let mut settings = Settings::load_normalized(settings_file)?;
    let mut result = CmdResult::default();

    let change = match action {
        SettingsAction::Show => None,
        SettingsAction::Set(key, value) => Some((key, value)),
        SettingsAction::Toggle(key) => Some((key, !settings.get(key))),
    };

    if let Some((key, value)) = change {
        settings.set(key, value);
        settings.save(settings_file)?;
        result.add_message(CmdMessage::success(format!(
            "{} is now {}.",
            key.label(),
            on_off(value)
        )));
    }

    Ok(result.with_settings(settings))
}

/// Bumps `launch_count`. Called once per process start.
pub fn record_launch(settings_file: &Path) -> Result<Settings> {
    let mut settings = Settings::load(settings_file)?;
    settings.launch_count = settings.launch_count.saturating_add(1);
    settings.save(settings_file)?;
    Ok(settings)
}
