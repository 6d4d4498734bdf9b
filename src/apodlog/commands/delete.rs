use crate::commands::{CmdMessage, CmdResult};
use crate::dates::{check_apod_date, parse_date};
use crate::error::{ApodError, Result};
use crate::model::ApodRecord;
use crate::store::{LogPair, LogStore};
use chrono::NaiveDate;
use tracing::info;

/// Removes every record with `date` from one store. The store is only
/// rewritten when something matched. Returns the removed records.
fn delete_from(store: &mut dyn LogStore, date: &str) -> Result<Vec<ApodRecord>> {
    let (removed, kept): (Vec<ApodRecord>, Vec<ApodRecord>) =
        store.load()?.into_iter().partition(|r| r.key() == date);
    if !removed.is_empty() {
        store.rewrite(&kept)?;
        info!(date, store = store.label(), "deleted entry");
    }
    Ok(removed)
}

pub fn run<L: LogStore, T: LogStore>(
    pair: &mut LogPair<L, T>,
    input: &str,
    today: NaiveDate,
) -> Result<CmdResult> {
    let parsed = parse_date(input)?;
    let date = parsed.format("%Y-%m-%d").to_string();
    let mut result = CmdResult::default();

    // Outside the archive window is unusual but not fatal: a record fetched
    // as "today" in US Eastern time can be dated ahead of the local clock.
    if let Err(e) = check_apod_date(parsed, today) {
        result.add_message(CmdMessage::warning(e.to_string()));
    }
    let mut found_any = false;

    for store in pair.both_mut() {
        let removed = delete_from(&mut *store, &date)?;
        if removed.is_empty() {
            result.add_message(CmdMessage::error(format!(
                "Entry {} was not found in {}.",
                date,
                store.label()
            )));
        } else {
            found_any = true;
            result.add_message(CmdMessage::success(format!(
                "Entry {} was successfully deleted from {}.",
                date,
                store.label()
            )));
            if result.records.is_empty() {
                result.records = removed;
            }
        }
    }

    if !found_any {
        return Err(ApodError::EntryNotFound(date));
    }
    Ok(result)
}
