use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::ApodRecord;
use crate::store::{LogPair, LogStore};

/// Appends `record` to one store unless its date is already there.
/// Returns whether it was written.
pub fn append_one(
    store: &mut dyn LogStore,
    record: &ApodRecord,
    result: &mut CmdResult,
) -> Result<bool> {
    let existing = store.load()?;
    if existing.iter().any(|r| r.key() == record.key()) {
        result.add_message(CmdMessage::warning(format!(
            "APOD with date '{}' found in '{}'. Not logging again.",
            record.date,
            store.label()
        )));
        return Ok(false);
    }

    store.append(record)?;
    result.add_message(CmdMessage::success(format!(
        "Saved: APOD '{}' -> {}",
        record.date,
        store.label()
    )));
    Ok(true)
}

/// Runs the duplicate check and append against both stores, one store at a
/// time. A duplicate in one store does not stop the write to the other.
pub fn run<L: LogStore, T: LogStore>(
    pair: &mut LogPair<L, T>,
    records: &[ApodRecord],
) -> Result<CmdResult> {
    let mut result = CmdResult::default();
    for store in pair.both_mut() {
        for record in records {
            append_one(&mut *store, record, &mut result)?;
        }
    }
    Ok(result.with_records(records.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::memory::fixtures::{record, StoreFixture};

    #[test]
    fn appends_to_both_stores() {
        let mut pair = StoreFixture::new().build();
        let result = run(&mut pair, &[record("2013-10-01")]).unwrap();

        assert_eq!(pair.lines.records().len(), 1);
        assert_eq!(pair.table.records().len(), 1);
        assert_eq!(result.messages.len(), 2);
        assert_eq!(result.messages[0].content, "Saved: APOD '2013-10-01' -> output.jsonl");
        assert_eq!(result.messages[1].content, "Saved: APOD '2013-10-01' -> output.csv");
    }

    #[test]
    fn same_date_twice_is_stored_once() {
        let mut pair = StoreFixture::new().build();
        run(&mut pair, &[record("2013-10-01")]).unwrap();
        let result = run(&mut pair, &[record("2013-10-01")]).unwrap();

        assert_eq!(pair.lines.records().len(), 1);
        assert_eq!(pair.table.records().len(), 1);
        assert!(result.messages.iter().all(|m| m.level == MessageLevel::Warning));
        assert_eq!(
            result.messages[0].content,
            "APOD with date '2013-10-01' found in 'output.jsonl'. Not logging again."
        );
    }

    #[test]
    fn duplicate_in_one_store_still_fills_the_other() {
        let mut pair = StoreFixture::new().with_line_only("2000-01-01").build();
        run(&mut pair, &[record("2000-01-01")]).unwrap();

        assert_eq!(pair.lines.writes, 0);
        assert_eq!(pair.table.records().len(), 1);
    }

    #[test]
    fn batch_with_repeated_date_writes_once() {
        let mut pair = StoreFixture::new().build();
        run(&mut pair, &[record("2001-01-01"), record("2001-01-01")]).unwrap();
        assert_eq!(pair.lines.records().len(), 1);
    }
}
