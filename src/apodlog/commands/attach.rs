use crate::commands::{CmdMessage, CmdResult};
use crate::error::{ApodError, Result};
use crate::store::{LogPair, LogStore};

/// Sets `local_file_path` on the record for `date` in one store.
/// Returns whether the record was there.
pub fn patch_store(store: &mut dyn LogStore, date: &str, path: &str) -> Result<bool> {
    let mut records = store.load()?;
    let mut found = false;
    for record in records.iter_mut().filter(|r| r.key() == date) {
        record.local_file_path = Some(path.to_string());
        found = true;
    }
    if found {
        store.rewrite(&records)?;
    }
    Ok(found)
}

pub fn run<L: LogStore, T: LogStore>(
    pair: &mut LogPair<L, T>,
    date: &str,
    path: &str,
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    let mut found_any = false;

    for store in pair.both_mut() {
        if patch_store(&mut *store, date, path)? {
            found_any = true;
            result.add_message(CmdMessage::success(format!(
                "Linked {} to {} in {}.",
                date,
                path,
                store.label()
            )));
        } else {
            result.add_message(CmdMessage::error(format!(
                "Entry {} was not found in {}.",
                date,
                store.label()
            )));
        }
    }

    if !found_any {
        return Err(ApodError::EntryNotFound(date.to_string()));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn sets_path_in_both_stores() {
        let mut pair = StoreFixture::new()
            .with_dates(&["2001-01-01", "2002-02-02"])
            .build();
        run(&mut pair, "2002-02-02", "/d/apod-2002-02-02.jpg").unwrap();

        for records in [pair.lines.records(), pair.table.records()] {
            assert_eq!(records[0].local_file_path, None);
            assert_eq!(
                records[1].local_file_path.as_deref(),
                Some("/d/apod-2002-02-02.jpg")
            );
        }
    }

    #[test]
    fn missing_everywhere_is_not_found() {
        let mut pair = StoreFixture::new().with_dates(&["2001-01-01"]).build();
        assert!(matches!(
            run(&mut pair, "2009-09-09", "/x.jpg"),
            Err(ApodError::EntryNotFound(_))
        ));
        assert_eq!(pair.lines.writes, 0);
    }
}
