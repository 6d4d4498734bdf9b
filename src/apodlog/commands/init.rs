use crate::commands::{CheckStatus, CmdMessage, CmdResult, StartupCheck};
use crate::config::AppPaths;
use crate::error::{ApodError, Result};
use crate::settings::Settings;
use crate::store::{LogPair, LogStore};
use std::fs;
use std::path::PathBuf;

fn status(created: bool) -> CheckStatus {
    if created {
        CheckStatus::Created
    } else {
        CheckStatus::Found
    }
}

fn check(name: &str, path: PathBuf, created: bool) -> StartupCheck {
    StartupCheck {
        name: name.to_string(),
        path,
        status: status(created),
    }
}

/// Makes sure the data directory, both logs and the settings file exist.
pub fn run<L: LogStore, T: LogStore>(
    paths: &AppPaths,
    pair: &mut LogPair<L, T>,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();

    let dir_created = !paths.data_dir.is_dir();
    if dir_created {
        fs::create_dir_all(&paths.data_dir).map_err(ApodError::Io)?;
    }
    result
        .checks
        .push(check("Data directory", paths.data_dir.clone(), dir_created));

    let lines_created = pair.lines.create()?;
    result
        .checks
        .push(check("JSONL log", paths.lines_file(), lines_created));

    let table_created = pair.table.create()?;
    result
        .checks
        .push(check("CSV log", paths.table_file(), table_created));

    let settings_file = paths.settings_file();
    let settings_created = !settings_file.is_file();
    let settings = Settings::load_normalized(&settings_file)?;
    result
        .checks
        .push(check("Settings", settings_file, settings_created));

    if result.checks.iter().all(|c| c.status == CheckStatus::Found) {
        result.add_message(CmdMessage::info("All files present."));
    }
    Ok(result.with_settings(settings))
}
