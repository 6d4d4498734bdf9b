use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::ApodRecord;
use crate::store::{LogPair, LogStore};
use std::collections::{BTreeMap, HashSet};

fn duplicate_dates(records: &[ApodRecord]) -> Vec<String> {
    let mut seen: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        *seen.entry(record.key()).or_default() += 1;
    }
    seen.into_iter()
        .filter(|(_, n)| *n > 1)
        .map(|(date, _)| date.to_string())
        .collect()
}

/// Records of `from` whose date `to` lacks, first occurrence only.
fn missing_from(from: &[ApodRecord], to: &[ApodRecord]) -> Vec<ApodRecord> {
    let present: HashSet<&str> = to.iter().map(|r| r.key()).collect();
    let mut queued = HashSet::new();
    from.iter()
        .filter(|r| !present.contains(r.key()) && queued.insert(r.key()))
        .cloned()
        .collect()
}

/// Brings the two stores back to the same set of dates by copying whatever
/// one of them is missing from the other.
pub fn run<L: LogStore, T: LogStore>(pair: &mut LogPair<L, T>) -> Result<CmdResult> {
    let line_records = pair.lines.load()?;
    let table_records = pair.table.load()?;

    let to_table = missing_from(&line_records, &table_records);
    let to_lines = missing_from(&table_records, &line_records);

    for record in &to_table {
        pair.table.append(record)?;
    }
    for record in &to_lines {
        pair.lines.append(record)?;
    }

    let mut result = CmdResult::default();
    let line_dupes = duplicate_dates(&line_records);
    let table_dupes = duplicate_dates(&table_records);

    if to_table.is_empty() && to_lines.is_empty() && line_dupes.is_empty() && table_dupes.is_empty()
    {
        result.add_message(CmdMessage::success("No inconsistencies found."));
        return Ok(result);
    }

    result.add_message(CmdMessage::warning("Inconsistencies found:"));
    if !to_table.is_empty() {
        result.add_message(CmdMessage::success(format!(
            "  - Copied {} entry(ies) from {} into {}.",
            to_table.len(),
            pair.lines.label(),
            pair.table.label()
        )));
    }
    if !to_lines.is_empty() {
        result.add_message(CmdMessage::success(format!(
            "  - Copied {} entry(ies) from {} into {}.",
            to_lines.len(),
            pair.table.label(),
            pair.lines.label()
        )));
    }
    for (label, dupes) in [(pair.lines.label(), &line_dupes), (pair.table.label(), &table_dupes)] {
        if !dupes.is_empty() {
            result.add_message(CmdMessage::warning(format!(
                "  - {} has more than one entry for: {}",
                label,
                dupes.join(", ")
            )));
        }
    }

    let mut copied = to_table;
    copied.extend(to_lines);
    Ok(result.with_records(copied))
}
